// tracker.rs — The orchestrator.
//
// Owns the ordered goal list and a kind index, applies mutations
// (add/remove/acknowledge), drives refreshes from host callbacks, and
// persists the whole collection after every observable change. Single
// threaded by design: every entry point runs on the host's event thread.
//
// Persistence failures are logged and swallowed — the in-memory list is
// the source of truth for the session.

use std::collections::HashMap;

use uuid::Uuid;

use gt_goal::{DataSource, Goal, GoalKind, GoalVariant, Skill};

use crate::codec;
use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::events::{EventDispatcher, NotificationSink, TrackerEvent};
use crate::storage::GoalStorage;

/// The one stateful process-wide component: goal store plus refresh logic.
pub struct GoalTracker<S: GoalStorage> {
    goals: Vec<Goal>,
    /// Kind → goal ids, maintained incrementally on add/remove.
    by_kind: HashMap<GoalKind, Vec<Uuid>>,
    storage: S,
    dispatcher: EventDispatcher,
    config: TrackerConfig,
    tick_counter: u32,
}

impl<S: GoalStorage> GoalTracker<S> {
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, TrackerConfig::default())
    }

    pub fn with_config(storage: S, config: TrackerConfig) -> Self {
        Self {
            goals: Vec::new(),
            by_kind: HashMap::new(),
            storage,
            dispatcher: EventDispatcher::new(),
            config,
            tick_counter: 0,
        }
    }

    /// Register a sink for change events (the rendering layer's hook).
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.dispatcher.add_sink(sink);
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replace in-memory state from storage.
    ///
    /// A missing blob is an empty list; a failed load or undecodable blob
    /// degrades to an empty list with a warning rather than propagating.
    /// Runs an initial refresh when a session is already connected.
    pub fn load(&mut self, source: &dyn DataSource) {
        self.goals = match self.storage.load() {
            Ok(Some(blob)) => match codec::decode(&blob) {
                Ok(goals) => goals,
                Err(e) => {
                    tracing::warn!("undecodable goal blob, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("failed to load goals, starting empty: {}", e);
                Vec::new()
            }
        };

        // Load path, not the hot path: rebuilding wholesale is fine here.
        self.by_kind.clear();
        for goal in &self.goals {
            self.by_kind.entry(goal.kind()).or_default().push(goal.id);
        }
        self.tick_counter = 0;

        tracing::info!(count = self.goals.len(), "loaded goals");

        if source.is_ready() {
            self.refresh_all(source);
        }
    }

    /// Add a freshly built goal: index it, give it one immediate progress
    /// update when a session is live, persist, and notify.
    pub fn add_goal(&mut self, mut goal: Goal, source: &dyn DataSource) -> Result<(), TrackerError> {
        if self.goals.iter().any(|g| g.id == goal.id) {
            return Err(TrackerError::DuplicateGoal(goal.id));
        }

        goal.update_progress(source);

        let added = TrackerEvent::goal_added(&goal);
        let completed = goal.is_completed().then(|| TrackerEvent::goal_completed(&goal));

        self.by_kind.entry(goal.kind()).or_default().push(goal.id);
        self.goals.push(goal);
        self.persist();

        self.dispatcher.dispatch(&added);
        if let Some(event) = completed {
            if self.config.notify_on_completion {
                self.dispatcher.dispatch(&event);
            }
        }
        Ok(())
    }

    /// Remove a goal by id. An absent id is a pure no-op: nothing is
    /// persisted and no event fires.
    pub fn remove_goal(&mut self, id: Uuid) -> bool {
        let Some(index) = self.goals.iter().position(|g| g.id == id) else {
            return false;
        };

        let goal = self.goals.remove(index);
        if let Some(ids) = self.by_kind.get_mut(&goal.kind()) {
            ids.retain(|gid| *gid != id);
        }

        self.persist();
        self.dispatcher.dispatch(&TrackerEvent::goal_removed(&goal));
        true
    }

    /// Acknowledge a completed goal. Unknown ids and goals still in
    /// progress are guarded no-ops; a successful acknowledgement persists
    /// exactly once.
    pub fn acknowledge_goal(&mut self, id: Uuid) -> bool {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return false;
        };
        if !goal.acknowledge() {
            return false;
        }

        let event = TrackerEvent::goal_acknowledged(goal);
        self.persist();
        self.dispatcher.dispatch(&event);
        true
    }

    /// Refresh every goal. A no-op while disconnected, so a logout can
    /// never zero out stored progress.
    pub fn refresh_all(&mut self, source: &dyn DataSource) {
        self.refresh_where(source, |_| true);
    }

    /// Targeted refresh of the skill goals tracking `skill`.
    pub fn refresh_skill(&mut self, skill: Skill, source: &dyn DataSource) {
        self.refresh_where(
            source,
            move |goal| matches!(&goal.variant, GoalVariant::Skill(s) if s.skill == skill),
        );
    }

    /// Refresh the goals matching `predicate`; the targeted variant of
    /// [`refresh_all`](Self::refresh_all) that keeps minor host signals
    /// from touching the whole store.
    pub fn refresh_where(&mut self, source: &dyn DataSource, predicate: impl Fn(&Goal) -> bool) {
        if !source.is_ready() {
            return;
        }

        let mut refreshed = 0;
        let mut completions = Vec::new();
        for goal in self.goals.iter_mut().filter(|g| predicate(g)) {
            let was_completed = goal.is_completed();
            goal.update_progress(source);
            refreshed += 1;
            if goal.is_completed() && !was_completed {
                completions.push(TrackerEvent::goal_completed(goal));
            }
        }

        // New completions carry a fresh timestamp worth keeping.
        if !completions.is_empty() {
            self.persist();
        }
        if self.config.notify_on_completion {
            for event in &completions {
                self.dispatcher.dispatch(event);
            }
        }
        self.dispatcher.dispatch(&TrackerEvent::goals_refreshed(refreshed));
    }

    /// Periodic host tick: runs a full refresh every Nth call.
    pub fn on_tick(&mut self, source: &dyn DataSource) {
        self.tick_counter += 1;
        if self.tick_counter % self.config.update_interval_ticks.max(1) != 0 {
            return;
        }
        self.tick_counter = 0;
        self.refresh_all(source);
    }

    /// A session (re)connected: refresh everything immediately.
    pub fn on_session_connected(&mut self, source: &dyn DataSource) {
        self.refresh_all(source);
    }

    /// A single stat changed: refresh only the goals tracking it.
    pub fn on_stat_changed(&mut self, skill: Skill, source: &dyn DataSource) {
        self.refresh_skill(skill, source);
    }

    /// Persist the current state, e.g. at host shutdown.
    pub fn save(&self) {
        self.persist();
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: Uuid) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Goals of one kind, in insertion order, via the incremental index.
    pub fn goals_by_kind(&self, kind: GoalKind) -> Vec<&Goal> {
        self.by_kind
            .get(&kind)
            .map(|ids| ids.iter().filter_map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    /// Whole-blob replace; failures are logged, never propagated.
    fn persist(&self) {
        let blob = match codec::encode(&self.goals) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!("failed to serialize goals: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.store(&blob) {
            tracing::warn!("failed to store goals: {}", e);
        }
    }
}
