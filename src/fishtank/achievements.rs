//! Achievement evaluation pass.

use std::collections::HashSet;

use super::catalog::Catalog;
use super::state::{Millis, Snapshot};

/// Record every achievement whose required fish are all unlocked.
///
/// Already-recorded achievements are skipped and never revoked, so running this
/// twice in a row is a no-op the second time. Returns the names unlocked by
/// this pass, in catalog order.
pub fn evaluate(snapshot: &mut Snapshot, catalog: &Catalog, now: Millis) -> Vec<&'static str> {
    let unlocked_fish: HashSet<&str> = snapshot
        .fish_progress
        .iter()
        .filter(|(_, p)| p.unlocked)
        .map(|(id, _)| id.as_str())
        .collect();

    let newly: Vec<&'static str> = catalog
        .achievements
        .iter()
        .filter(|a| !snapshot.achievements.contains_key(a.name))
        .filter(|a| a.fish_ids.iter().all(|id| unlocked_fish.contains(id)))
        .map(|a| a.name)
        .collect();

    for name in &newly {
        snapshot.achievements.insert(name.to_string(), now);
    }
    newly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fishtank::catalog::{AchievementDef, FishDef};
    use crate::fishtank::logic::{add_manual_time, apply_elapsed};

    static FISH: &[FishDef] = &[
        FishDef { id: "google", name: "G", domains: &[], unlock_minutes: 0, coins_per_min: 0.1 },
        FishDef { id: "zoom", name: "Z", domains: &[], unlock_minutes: 30, coins_per_min: 0.4 },
        FishDef { id: "email", name: "E", domains: &[], unlock_minutes: 10, coins_per_min: 0.25 },
    ];

    static ACHIEVEMENTS: &[AchievementDef] = &[
        AchievementDef { name: "Working From Home", fish_ids: &["zoom", "email"] },
        AchievementDef { name: "Search Party", fish_ids: &["google"] },
        AchievementDef { name: "Stale", fish_ids: &["google", "retired"] },
    ];

    fn catalog() -> Catalog {
        Catalog { fish: FISH, achievements: ACHIEVEMENTS, ..Catalog::standard() }
    }

    #[test]
    fn fresh_snapshot_unlocks_achievements_of_free_fish() {
        let c = catalog();
        let mut s = Snapshot::new(&c, 0);
        assert_eq!(evaluate(&mut s, &c, 5), vec!["Search Party"]);
        assert_eq!(s.achievements.get("Search Party"), Some(&5));
    }

    #[test]
    fn pair_needs_both_fish() {
        let c = catalog();
        let mut s = Snapshot::new(&c, 0);
        evaluate(&mut s, &c, 0);

        add_manual_time(&mut s, &c, "zoom", 30, 1_000);
        assert!(evaluate(&mut s, &c, 1_000).is_empty());
        assert!(!s.achievements.contains_key("Working From Home"));

        add_manual_time(&mut s, &c, "email", 5, 2_000);
        assert!(evaluate(&mut s, &c, 2_000).is_empty());

        apply_elapsed(&mut s, &c, "email", 300, 3_000);
        assert_eq!(evaluate(&mut s, &c, 3_500), vec!["Working From Home"]);
        // Stamped with the evaluation time, not either fish's unlock time
        assert_eq!(s.achievements.get("Working From Home"), Some(&3_500));
    }

    #[test]
    fn second_pass_is_a_noop() {
        let c = catalog();
        let mut s = Snapshot::new(&c, 0);
        add_manual_time(&mut s, &c, "zoom", 30, 0);
        add_manual_time(&mut s, &c, "email", 30, 0);
        assert_eq!(evaluate(&mut s, &c, 10).len(), 2);

        let after_first = s.clone();
        assert!(evaluate(&mut s, &c, 20).is_empty());
        assert_eq!(s, after_first);
    }

    #[test]
    fn never_revokes() {
        let c = catalog();
        let mut s = Snapshot::new(&c, 0);
        evaluate(&mut s, &c, 1);
        // Force the impossible: re-lock the fish behind an unlocked achievement
        s.fish_progress.get_mut("google").unwrap().unlocked = false;
        assert!(evaluate(&mut s, &c, 2).is_empty());
        assert_eq!(s.achievements.get("Search Party"), Some(&1));
    }

    #[test]
    fn requirement_on_unknown_fish_is_never_met() {
        let c = catalog();
        let mut s = Snapshot::new(&c, 0);
        evaluate(&mut s, &c, 0);
        assert!(!s.achievements.contains_key("Stale"));
    }

    #[test]
    fn standard_catalog_first_achievement() {
        let c = Catalog::standard();
        let mut s = Snapshot::new(&c, 0);
        assert!(evaluate(&mut s, &c, 0).is_empty());
        add_manual_time(&mut s, &c, "wikipedia", 5, 0);
        assert_eq!(evaluate(&mut s, &c, 9), vec!["I Know Everything"]);
    }
}
