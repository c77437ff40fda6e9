// codec.rs — Goal list ↔ persisted JSON blob.
//
// The blob is one JSON array of flat goal objects. Each object carries
// the shared fields, the variant fields, and a "type" discriminator; the
// variant's serde tag does the dispatch on decode. An element with an
// unknown or missing discriminator is dropped with a warning instead of
// poisoning the whole list — one corrupt record should not wipe a
// player's goals.

use gt_goal::Goal;

use crate::error::TrackerError;

/// Serialize the goal list to the blob stored under the host's config key.
pub fn encode(goals: &[Goal]) -> Result<String, TrackerError> {
    Ok(serde_json::to_string(goals)?)
}

/// Decode a stored blob back into goals.
///
/// An empty or whitespace blob is an empty list. A blob that is not a
/// JSON array is an error (the tracker's load path degrades that to an
/// empty list). Individual undecodable elements are skipped.
pub fn decode(blob: &str) -> Result<Vec<Goal>, TrackerError> {
    if blob.trim().is_empty() {
        return Ok(Vec::new());
    }

    let elements: Vec<serde_json::Value> = serde_json::from_str(blob)?;
    let mut goals = Vec::with_capacity(elements.len());

    for element in elements {
        match serde_json::from_value::<Goal>(element) {
            Ok(goal) => goals.push(goal),
            Err(e) => tracing::warn!("skipping undecodable goal record: {}", e),
        }
    }

    Ok(goals)
}
