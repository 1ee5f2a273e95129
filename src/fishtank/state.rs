//! Fishtank Tycoon game state definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;

/// Wall-clock milliseconds since the Unix epoch.
pub type Millis = u64;

/// Maximum number of entries kept in the notice log.
pub const LOG_CAPACITY: usize = 50;

/// Accumulated session time for a single fish.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishProgress {
    pub accumulated_seconds: u64,
    /// One-way: once set it is never cleared.
    pub unlocked: bool,
    pub unlocked_at: Option<Millis>,
}

impl FishProgress {
    /// Progress for a fish that has never been played.
    /// Fish with a zero threshold start unlocked.
    pub fn fresh(unlock_minutes: u32) -> Self {
        Self {
            accumulated_seconds: 0,
            unlocked: unlock_minutes == 0,
            unlocked_at: None,
        }
    }

    pub fn accumulated_minutes(&self) -> f64 {
        self.accumulated_seconds as f64 / 60.0
    }
}

/// The complete mutable game state. This is what gets persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub fish_progress: BTreeMap<String, FishProgress>,
    /// Always rounded to 2 decimal places.
    pub coins: f64,
    /// Achievement name → unlock time. Presence means unlocked.
    pub achievements: BTreeMap<String, Millis>,
    /// Decor id → owned quantity.
    pub decor: BTreeMap<String, u32>,
    /// Only used to compute elapsed time between ticks.
    pub last_tick: Millis,
}

impl Snapshot {
    /// A brand-new game: every catalog fish at zero progress.
    pub fn new(catalog: &Catalog, now: Millis) -> Self {
        let fish_progress = catalog
            .fish
            .iter()
            .map(|f| (f.id.to_string(), FishProgress::fresh(f.unlock_minutes)))
            .collect();
        Self {
            fish_progress,
            coins: 0.0,
            achievements: BTreeMap::new(),
            decor: BTreeMap::new(),
            last_tick: now,
        }
    }

    /// Add default progress for catalog fish the snapshot does not know about
    /// (e.g. a save written before the fish existed). Existing entries, including
    /// ones the catalog no longer lists, are left alone.
    pub fn fill_missing(&mut self, catalog: &Catalog) -> usize {
        let mut added = 0;
        for f in catalog.fish {
            if !self.fish_progress.contains_key(f.id) {
                self.fish_progress
                    .insert(f.id.to_string(), FishProgress::fresh(f.unlock_minutes));
                added += 1;
            }
        }
        added
    }

    pub fn progress(&self, fish_id: &str) -> Option<&FishProgress> {
        self.fish_progress.get(fish_id)
    }

    pub fn is_unlocked(&self, fish_id: &str) -> bool {
        self.progress(fish_id).is_some_and(|p| p.unlocked)
    }

    pub fn owned(&self, decor_id: &str) -> u32 {
        self.decor.get(decor_id).copied().unwrap_or(0)
    }
}

/// Which panel the player is looking at.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Screen {
    #[default]
    Fish,
    Shop,
    Achievements,
}

/// Log entry shown in the notice panel.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}
