//! Derived economy values. Recomputed on demand, never persisted.

use super::catalog::{Catalog, FishDef};
use super::state::{FishProgress, Snapshot};

/// Product of `multiplier ^ owned` over every owned decor item the catalog knows.
pub fn decor_multiplier(snapshot: &Snapshot, catalog: &Catalog) -> f64 {
    snapshot
        .decor
        .iter()
        .filter_map(|(id, &qty)| catalog.decor(id).map(|d| d.multiplier.powf(qty as f64)))
        .product()
}

/// Sum of unlocked fish production, boosted by decor.
pub fn projected_coins_per_min(snapshot: &Snapshot, catalog: &Catalog) -> f64 {
    let base: f64 = snapshot
        .fish_progress
        .iter()
        .filter(|(_, p)| p.unlocked)
        .filter_map(|(id, _)| catalog.fish(id))
        .map(|f| f.coins_per_min)
        .sum();
    base * decor_multiplier(snapshot, catalog)
}

/// Progress toward unlock as a whole percentage, capped at 100.
pub fn percent_complete(def: &FishDef, progress: &FishProgress) -> u32 {
    if def.unlock_minutes == 0 {
        return 100;
    }
    let pct = (100.0 * progress.accumulated_minutes() / def.unlock_minutes as f64).round();
    pct.min(100.0) as u32
}

pub fn unlocked_count(snapshot: &Snapshot) -> usize {
    snapshot.fish_progress.values().filter(|p| p.unlocked).count()
}

/// `"42m"` under an hour, `"1h 5m"` otherwise.
pub fn format_minutes(minutes: f64) -> String {
    if minutes < 60.0 {
        return format!("{}m", minutes.floor() as u64);
    }
    let h = (minutes / 60.0).floor() as u64;
    let rem = (minutes % 60.0).floor() as u64;
    format!("{}h {}m", h, rem)
}

pub fn format_coins(coins: f64) -> String {
    format!("{:.2}", coins)
}
