// experience.rs — The experience-to-level curve.
//
// Reimplements the host's XP table: the cumulative XP threshold for each
// level is `sum(floor(n + 300 * 2^(n/7))) / 4` over the levels below it.
// Levels continue past the trained cap of 99 up to "virtual" level 126,
// which is where the 200M XP ceiling lands.

use std::sync::OnceLock;

/// Highest level a skill can actually be trained to.
pub const MAX_REAL_LEVEL: i64 = 99;

/// Highest virtual level reachable at the 200M XP ceiling.
pub const MAX_VIRTUAL_LEVEL: i64 = 126;

/// Cumulative XP threshold per level, indexed by `level - 1`.
fn thresholds() -> &'static [i64; MAX_VIRTUAL_LEVEL as usize] {
    static TABLE: OnceLock<[i64; MAX_VIRTUAL_LEVEL as usize]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0i64; MAX_VIRTUAL_LEVEL as usize];
        let mut acc = 0i64;
        for level in 1..=MAX_VIRTUAL_LEVEL {
            table[(level - 1) as usize] = acc / 4;
            acc += (level as f64 + 300.0 * 2f64.powf(level as f64 / 7.0)).floor() as i64;
        }
        table
    })
}

/// The XP threshold at which `level` is reached. Levels below 2 are 0 XP;
/// levels above the virtual cap are clamped to the cap's threshold.
pub fn xp_for_level(level: i64) -> i64 {
    let level = level.clamp(1, MAX_VIRTUAL_LEVEL);
    thresholds()[(level - 1) as usize]
}

/// The (virtual) level reached at `xp` — the highest level whose threshold
/// does not exceed it, capped at [`MAX_VIRTUAL_LEVEL`].
pub fn level_for_xp(xp: i64) -> i64 {
    if xp < 0 {
        return 1;
    }
    match thresholds().binary_search(&xp) {
        Ok(index) => index as i64 + 1,
        Err(insertion) => insertion as i64,
    }
}
