//! Fishtank Tycoon progress engine — pure functions over [`Snapshot`], fully testable.
//!
//! Nothing here reads the clock or touches storage. Callers pass `now` in and
//! persist the result themselves.

use thiserror::Error;

use super::catalog::{Catalog, FishDef};
use super::state::{FishProgress, Millis, Snapshot};

/// Round to 2 decimal places. Applied to the coin balance after every mutation
/// so drift between ticks stays deterministic.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whole seconds between two wall-clock readings, never less than 1.
pub fn elapsed_seconds(last_tick: Millis, now: Millis) -> u64 {
    let secs = (now.saturating_sub(last_tick) as f64 / 1000.0).round() as u64;
    secs.max(1)
}

/// What a single tick did, for the notice log.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub coins_gained: f64,
    /// The active fish crossed its threshold on this tick.
    pub unlocked: bool,
}

/// Unlock `progress` if it has reached the fish's threshold. Returns true only
/// on the false → true transition.
fn check_unlock(progress: &mut FishProgress, def: &FishDef, now: Millis) -> bool {
    if progress.unlocked {
        return false;
    }
    if progress.accumulated_minutes() >= def.unlock_minutes as f64 {
        progress.unlocked = true;
        progress.unlocked_at = Some(now);
        return true;
    }
    false
}

/// Advance the active fish by `elapsed` seconds.
///
/// Only the active fish is mutated. Coins accrue at the fish's own rate whether
/// or not it is unlocked yet. `last_tick` is moved to `now` last, even when the
/// id is not in the catalog.
pub fn apply_elapsed(
    snapshot: &mut Snapshot,
    catalog: &Catalog,
    active_id: &str,
    elapsed: u64,
    now: Millis,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    if let Some(def) = catalog.fish(active_id) {
        let progress = snapshot
            .fish_progress
            .entry(def.id.to_string())
            .or_insert_with(|| FishProgress::fresh(def.unlock_minutes));
        progress.accumulated_seconds += elapsed;

        let gained = def.coins_per_min * (elapsed as f64 / 60.0);
        snapshot.coins = round2(snapshot.coins + gained);
        outcome.coins_gained = gained;
        outcome.unlocked = check_unlock(progress, def, now);
    }

    snapshot.last_tick = now;
    outcome
}

/// Grant `minutes` of progress to a fish out of band. No coins are earned and
/// `last_tick` is untouched.
///
/// Returns `None` for an unknown fish, otherwise whether the grant unlocked it.
pub fn add_manual_time(
    snapshot: &mut Snapshot,
    catalog: &Catalog,
    fish_id: &str,
    minutes: u32,
    now: Millis,
) -> Option<bool> {
    let def = catalog.fish(fish_id)?;
    let progress = snapshot
        .fish_progress
        .entry(def.id.to_string())
        .or_insert_with(|| FishProgress::fresh(def.unlock_minutes));
    progress.accumulated_seconds += minutes as u64 * 60;
    Some(check_unlock(progress, def, now))
}

/// Why a decor purchase was refused.
#[derive(Debug, Error, PartialEq)]
pub enum PurchaseError {
    #[error("unknown decor item '{0}'")]
    UnknownItem(String),

    #[error("not enough coins: need {cost:.2}, have {balance:.2}")]
    InsufficientFunds { cost: f64, balance: f64 },
}

/// Try to buy one unit of a decor item. Returns the new owned quantity.
pub fn buy_decor(
    snapshot: &mut Snapshot,
    catalog: &Catalog,
    item_id: &str,
) -> Result<u32, PurchaseError> {
    let item = catalog
        .decor(item_id)
        .ok_or_else(|| PurchaseError::UnknownItem(item_id.to_string()))?;

    if snapshot.coins < item.cost {
        return Err(PurchaseError::InsufficientFunds {
            cost: item.cost,
            balance: snapshot.coins,
        });
    }

    let owned = snapshot.decor.entry(item.id.to_string()).or_insert(0);
    *owned += 1;
    let owned = *owned;
    snapshot.coins = round2(snapshot.coins - item.cost);
    Ok(owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_FISH: &[FishDef] = &[
        FishDef { id: "free", name: "Free", domains: &[], unlock_minutes: 0, coins_per_min: 0.1 },
        FishDef { id: "easy", name: "Easy", domains: &[], unlock_minutes: 5, coins_per_min: 0.3 },
        FishDef { id: "hard", name: "Hard", domains: &[], unlock_minutes: 30, coins_per_min: 0.45 },
    ];

    fn catalog() -> Catalog {
        Catalog { fish: TEST_FISH, ..Catalog::standard() }
    }

    fn fresh() -> Snapshot {
        Snapshot::new(&catalog(), 0)
    }

    #[test]
    fn elapsed_rounds_to_nearest_second() {
        assert_eq!(elapsed_seconds(0, 1_000), 1);
        assert_eq!(elapsed_seconds(0, 1_499), 1);
        assert_eq!(elapsed_seconds(0, 1_500), 2);
        assert_eq!(elapsed_seconds(10_000, 310_000), 300);
    }

    #[test]
    fn elapsed_is_at_least_one() {
        assert_eq!(elapsed_seconds(5_000, 5_000), 1);
        assert_eq!(elapsed_seconds(5_000, 5_200), 1);
        // Clock went backwards
        assert_eq!(elapsed_seconds(5_000, 1_000), 1);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(1.0049), 1.0);
        assert_eq!(round2(49.994), 49.99);
        assert_eq!(round2(0.126), 0.13);
    }

    #[test]
    fn five_minute_tick_unlocks_and_pays() {
        let mut s = fresh();
        let out = apply_elapsed(&mut s, &catalog(), "easy", 300, 300_000);

        let p = s.progress("easy").unwrap();
        assert!(p.unlocked);
        assert_eq!(p.accumulated_seconds, 300);
        assert_eq!(p.unlocked_at, Some(300_000));
        assert!(out.unlocked);
        assert!((s.coins - 1.50).abs() < 1e-9);
        assert_eq!(s.last_tick, 300_000);
    }

    #[test]
    fn tick_below_threshold_pays_but_stays_locked() {
        let mut s = fresh();
        let out = apply_elapsed(&mut s, &catalog(), "easy", 60, 60_000);
        assert!(!out.unlocked);
        assert!(!s.is_unlocked("easy"));
        assert!((s.coins - 0.3).abs() < 1e-9);
    }

    #[test]
    fn tick_only_touches_active_fish() {
        let mut s = fresh();
        apply_elapsed(&mut s, &catalog(), "hard", 120, 1);
        assert_eq!(s.progress("hard").unwrap().accumulated_seconds, 120);
        assert_eq!(s.progress("easy").unwrap().accumulated_seconds, 0);
        assert_eq!(s.progress("free").unwrap().accumulated_seconds, 0);
    }

    #[test]
    fn unlock_timestamp_is_fixed_once_set() {
        let mut s = fresh();
        apply_elapsed(&mut s, &catalog(), "easy", 300, 1_000);
        let out = apply_elapsed(&mut s, &catalog(), "easy", 300, 2_000);
        assert!(!out.unlocked);
        assert_eq!(s.progress("easy").unwrap().unlocked_at, Some(1_000));
    }

    #[test]
    fn unknown_active_fish_only_moves_last_tick() {
        let mut s = fresh();
        let before = s.clone();
        let out = apply_elapsed(&mut s, &catalog(), "myspace", 60, 42);
        assert_eq!(out, TickOutcome::default());
        assert_eq!(s.fish_progress, before.fish_progress);
        assert_eq!(s.coins, 0.0);
        assert_eq!(s.last_tick, 42);
    }

    #[test]
    fn sub_cent_ticks_are_rounded_away() {
        // 0.1 coins/min for 1s = 0.00166.. → rounds to 0.00 every tick
        let mut s = fresh();
        for t in 1..=10 {
            apply_elapsed(&mut s, &catalog(), "free", 1, t * 1_000);
        }
        assert_eq!(s.coins, 0.0);
        assert_eq!(s.progress("free").unwrap().accumulated_seconds, 10);
    }

    #[test]
    fn manual_time_unlocks_without_coins() {
        let mut s = fresh();
        s.last_tick = 7;
        assert_eq!(add_manual_time(&mut s, &catalog(), "easy", 5, 99), Some(true));
        let p = s.progress("easy").unwrap();
        assert_eq!(p.accumulated_seconds, 300);
        assert_eq!(p.unlocked_at, Some(99));
        assert_eq!(s.coins, 0.0);
        assert_eq!(s.last_tick, 7);
    }

    #[test]
    fn manual_time_below_threshold() {
        let mut s = fresh();
        assert_eq!(add_manual_time(&mut s, &catalog(), "hard", 5, 0), Some(false));
        assert_eq!(add_manual_time(&mut s, &catalog(), "hard", 30, 0), Some(true));
        assert_eq!(s.progress("hard").unwrap().accumulated_seconds, 35 * 60);
    }

    #[test]
    fn manual_time_unknown_fish_is_noop() {
        let mut s = fresh();
        let before = s.clone();
        assert_eq!(add_manual_time(&mut s, &catalog(), "ghost", 30, 0), None);
        assert_eq!(s, before);
    }

    #[test]
    fn missing_progress_entry_is_created_on_tick() {
        let mut s = fresh();
        s.fish_progress.remove("hard");
        apply_elapsed(&mut s, &catalog(), "hard", 10, 0);
        assert_eq!(s.progress("hard").unwrap().accumulated_seconds, 10);
    }

    #[test]
    fn buy_decor_succeeds() {
        let mut s = fresh();
        s.coins = 60.5;
        assert_eq!(buy_decor(&mut s, &catalog(), "castle"), Ok(1));
        assert_eq!(s.owned("castle"), 1);
        assert!((s.coins - 10.5).abs() < 1e-9);
    }

    #[test]
    fn buy_decor_insufficient_funds() {
        let mut s = fresh();
        s.coins = 49.99;
        let err = buy_decor(&mut s, &catalog(), "castle").unwrap_err();
        assert_eq!(err, PurchaseError::InsufficientFunds { cost: 50.0, balance: 49.99 });
        assert_eq!(s.coins, 49.99);
        assert_eq!(s.owned("castle"), 0);
    }

    #[test]
    fn buy_decor_exact_balance() {
        let mut s = fresh();
        s.coins = 10.0;
        assert_eq!(buy_decor(&mut s, &catalog(), "plant"), Ok(1));
        assert_eq!(s.coins, 0.0);
    }

    #[test]
    fn buy_decor_has_no_cap() {
        let mut s = fresh();
        s.coins = 1_000.0;
        for _ in 0..100 {
            buy_decor(&mut s, &catalog(), "plant").unwrap();
        }
        assert_eq!(s.owned("plant"), 100);
        assert_eq!(s.coins, 0.0);
        assert!(buy_decor(&mut s, &catalog(), "plant").is_err());
    }

    #[test]
    fn buy_unknown_decor_is_rejected_without_change() {
        let mut s = fresh();
        s.coins = 1_000.0;
        let before = s.clone();
        assert_eq!(
            buy_decor(&mut s, &catalog(), "submarine"),
            Err(PurchaseError::UnknownItem("submarine".into()))
        );
        assert_eq!(s, before);
    }

    #[test]
    fn purchase_error_messages() {
        let e = PurchaseError::InsufficientFunds { cost: 50.0, balance: 49.99 };
        assert_eq!(e.to_string(), "not enough coins: need 50.00, have 49.99");
    }
}
