//! Simulation clock: a fixed one-second cadence plus the active session.
//!
//! `draw_web()` calls at ~60fps with variable delta. [`SimClock`] turns that
//! into at most one tick per [`TICK_MS`] of wall-clock time. The clock owns no
//! game state; the tick handler works out elapsed time from
//! `Snapshot::last_tick` so that a throttled background tab still credits the
//! full gap on the next tick.

use super::catalog::Catalog;
use super::state::{Millis, Snapshot};

/// Milliseconds between ticks.
pub const TICK_MS: f64 = 1000.0;

pub struct SimClock {
    /// Accumulated milliseconds not yet consumed as a tick
    accumulator: f64,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            last_timestamp: None,
        }
    }

    /// Drop the current phase. The next tick comes one full [`TICK_MS`]
    /// after the first frame that follows.
    pub fn restart(&mut self) {
        self.accumulator = 0.0;
        self.last_timestamp = None;
    }

    /// Feed a wall-clock timestamp (from `Date.now()` or similar).
    /// Returns true when a tick is due.
    ///
    /// Call this once per draw frame. Several overdue ticks collapse into one;
    /// the elapsed-time calculation downstream picks up the whole gap.
    pub fn update(&mut self, now_ms: f64) -> bool {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).max(0.0),
            None => 0.0, // First frame: no delta
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        if self.accumulator < TICK_MS {
            return false;
        }
        self.accumulator %= TICK_MS;
        true
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Which fish (if any) is currently accruing time. At most one at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    active: Option<&'static str>,
}

/// Result of [`Session::toggle`].
#[derive(Clone, Debug, PartialEq)]
pub enum Toggle {
    Started {
        fish: &'static str,
        replaced: Option<&'static str>,
    },
    Stopped(&'static str),
    UnknownFish,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&'static str> {
        self.active
    }

    pub fn is_active(&self, fish_id: &str) -> bool {
        self.active == Some(fish_id)
    }

    /// Start `fish_id`, or stop it if it is already running. Starting a fish
    /// replaces whichever one was running before.
    ///
    /// Any real toggle moves `snapshot.last_tick` to `now` so the next tick
    /// does not credit time spent with no session running.
    pub fn toggle(
        &mut self,
        snapshot: &mut Snapshot,
        catalog: &Catalog,
        fish_id: &str,
        now: Millis,
    ) -> Toggle {
        let Some(def) = catalog.fish(fish_id) else {
            return Toggle::UnknownFish;
        };
        snapshot.last_tick = now;
        if self.active == Some(def.id) {
            self.active = None;
            Toggle::Stopped(def.id)
        } else {
            let replaced = self.active.replace(def.id);
            Toggle::Started {
                fish: def.id,
                replaced,
            }
        }
    }

    /// Clear the session without touching any snapshot (used by reset).
    pub fn stop(&mut self) -> Option<&'static str> {
        self.active.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fishtank::logic::{apply_elapsed, elapsed_seconds};

    #[test]
    fn first_frame_does_not_tick() {
        let mut clock = SimClock::new();
        assert!(!clock.update(0.0));
    }

    #[test]
    fn ticks_once_per_second() {
        let mut clock = SimClock::new();
        clock.update(0.0);
        assert!(!clock.update(999.0));
        assert!(clock.update(1000.0));
        assert!(!clock.update(1500.0));
        assert!(clock.update(2001.0));
    }

    #[test]
    fn sixty_fps_gives_one_tick_per_second() {
        let mut clock = SimClock::new();
        clock.update(0.0);
        let mut ticks = 0;
        for i in 1..=600 {
            if clock.update(i as f64 * 16.667) {
                ticks += 1;
            }
        }
        // 600 frames ≈ 10 seconds
        assert!((9..=11).contains(&ticks), "expected ~10 ticks, got {}", ticks);
    }

    #[test]
    fn long_gap_collapses_to_one_tick() {
        let mut clock = SimClock::new();
        clock.update(0.0);
        assert!(clock.update(60_000.0));
        assert!(!clock.update(60_016.0));
    }

    #[test]
    fn restart_drops_phase() {
        let mut clock = SimClock::new();
        clock.update(0.0);
        clock.update(999.0);
        clock.restart();
        assert!(!clock.update(1_000.0));
        assert!(!clock.update(1_999.0));
        assert!(clock.update(2_000.0));
    }

    #[test]
    fn backwards_time_is_ignored() {
        let mut clock = SimClock::new();
        clock.update(5_000.0);
        assert!(!clock.update(1_000.0));
        assert!(!clock.update(1_900.0));
        assert!(clock.update(2_000.0));
    }

    #[test]
    fn toggle_starts_and_stops() {
        let catalog = Catalog::standard();
        let mut snap = Snapshot::new(&catalog, 0);
        let mut session = Session::new();

        let t = session.toggle(&mut snap, &catalog, "reddit", 10);
        assert_eq!(t, Toggle::Started { fish: "reddit", replaced: None });
        assert!(session.is_active("reddit"));
        assert_eq!(snap.last_tick, 10);

        let t = session.toggle(&mut snap, &catalog, "reddit", 20);
        assert_eq!(t, Toggle::Stopped("reddit"));
        assert_eq!(session.active(), None);
        assert_eq!(snap.last_tick, 20);
    }

    #[test]
    fn starting_another_fish_replaces_the_active_one() {
        let catalog = Catalog::standard();
        let mut snap = Snapshot::new(&catalog, 0);
        let mut session = Session::new();
        session.toggle(&mut snap, &catalog, "reddit", 0);

        let t = session.toggle(&mut snap, &catalog, "github", 5);
        assert_eq!(t, Toggle::Started { fish: "github", replaced: Some("reddit") });
        assert_eq!(session.active(), Some("github"));
    }

    #[test]
    fn unknown_fish_toggle_changes_nothing() {
        let catalog = Catalog::standard();
        let mut snap = Snapshot::new(&catalog, 7);
        let mut session = Session::new();
        session.toggle(&mut snap, &catalog, "reddit", 8);

        assert_eq!(session.toggle(&mut snap, &catalog, "myspace", 99), Toggle::UnknownFish);
        assert_eq!(session.active(), Some("reddit"));
        assert_eq!(snap.last_tick, 8);
    }

    #[test]
    fn toggle_resets_last_tick_so_idle_time_is_not_credited() {
        let catalog = Catalog::standard();
        let mut snap = Snapshot::new(&catalog, 0);
        let mut session = Session::new();

        // Idle for an hour, then start
        session.toggle(&mut snap, &catalog, "reddit", 3_600_000);
        let now = 3_601_000;
        let elapsed = elapsed_seconds(snap.last_tick, now);
        apply_elapsed(&mut snap, &catalog, "reddit", elapsed, now);
        assert_eq!(snap.progress("reddit").unwrap().accumulated_seconds, 1);
    }

    #[test]
    fn switching_leaves_previous_fish_progress_alone() {
        let catalog = Catalog::standard();
        let mut snap = Snapshot::new(&catalog, 0);
        let mut session = Session::new();

        session.toggle(&mut snap, &catalog, "reddit", 0);
        apply_elapsed(&mut snap, &catalog, "reddit", 5, 5_000);
        let reddit_before = snap.progress("reddit").cloned();

        session.toggle(&mut snap, &catalog, "github", 5_000);
        let active = session.active().unwrap();
        apply_elapsed(&mut snap, &catalog, active, 5, 10_000);

        assert_eq!(snap.progress("reddit").cloned(), reddit_before);
        assert_eq!(snap.progress("github").unwrap().accumulated_seconds, 5);
    }

    #[test]
    fn stop_clears_session() {
        let catalog = Catalog::standard();
        let mut snap = Snapshot::new(&catalog, 0);
        let mut session = Session::new();
        session.toggle(&mut snap, &catalog, "email", 0);
        assert_eq!(session.stop(), Some("email"));
        assert_eq!(session.stop(), None);
    }
}
