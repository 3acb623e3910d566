//! Action source: one chronological log from three inputs
//!
//! - A periodic tick (tick `k` fires at `(k + 1) * tick_rate_ms` carrying `elapsed = k`)
//! - Scheduled pipe spawns (at `time * 1000` ms)
//! - Flap inputs at arbitrary millisecond timestamps
//!
//! Events sharing a timestamp are ordered spawn, flap, tick, then by
//! insertion, so the merged log is fully determined by its inputs.

use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;
use crate::sim::Action;

/// An action stamped with the real time it was emitted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedAction {
    pub at_ms: u64,
    pub action: Action,
}

/// Same-timestamp priority
fn rank(action: &Action) -> u8 {
    match action {
        Action::SpawnPipes { .. } => 0,
        Action::Flap => 1,
        Action::Tick { .. } => 2,
    }
}

/// Merges ticks, flaps and scheduled spawns
#[derive(Debug, Clone)]
pub struct Timeline {
    tick_rate_ms: u64,
    /// Non-tick events, kept sorted
    events: Vec<TimedAction>,
}

impl Timeline {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate_ms: tick_rate_ms.max(1),
            events: Vec::new(),
        }
    }

    pub fn tick_rate_ms(&self) -> u64 {
        self.tick_rate_ms
    }

    /// Add every pipe pair of a schedule
    pub fn with_schedule(mut self, schedule: &Schedule) -> Self {
        for spawn in schedule.iter() {
            self.push(spawn.at_ms(), spawn.action());
        }
        self
    }

    /// Add flap inputs at the given timestamps
    pub fn with_flaps(mut self, flaps_ms: &[u64]) -> Self {
        for &at_ms in flaps_ms {
            self.push(at_ms, Action::Flap);
        }
        self
    }

    fn push(&mut self, at_ms: u64, action: Action) {
        let event = TimedAction { at_ms, action };
        // Insert after every event that sorts before or equal to it
        let index = self
            .events
            .partition_point(|e| (e.at_ms, rank(&e.action)) <= (at_ms, rank(&action)));
        self.events.insert(index, event);
    }

    /// Time at which tick `elapsed` fires
    pub fn tick_at_ms(&self, elapsed: u64) -> u64 {
        elapsed.saturating_add(1).saturating_mul(self.tick_rate_ms)
    }

    /// The merged log up to and including tick `max_ticks - 1`, produced
    /// lazily so a consumer can stop early.
    ///
    /// Non-tick events later than the last tick are not emitted.
    pub fn actions(&self, max_ticks: u64) -> impl Iterator<Item = TimedAction> + '_ {
        let mut events = self.events.iter().copied().peekable();
        let mut ticks = (0..max_ticks).peekable();

        std::iter::from_fn(move || {
            let elapsed = *ticks.peek()?;
            let tick_ms = self.tick_at_ms(elapsed);
            if let Some(event) = events.next_if(|e| e.at_ms <= tick_ms) {
                return Some(event);
            }
            ticks.next();
            Some(TimedAction {
                at_ms: tick_ms,
                action: Action::Tick { elapsed },
            })
        })
    }
}
