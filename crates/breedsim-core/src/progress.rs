//! Goal progress and trend series derived from the frequency history.

use serde::{Deserialize, Serialize};

use crate::catalog::TraitKind;
use crate::components::TraitCounts;

/// Percentage of goal-trait slots filled in the latest litter.
///
/// `sum(latest frequency of each goal trait) / (goal traits * population)`,
/// rounded and capped at 100. An achieved goal always reads 100.
pub fn goal_progress(
    history: &[TraitCounts],
    goal_traits: &[TraitKind],
    population_size: usize,
    achieved: bool,
) -> u32 {
    if achieved {
        return 100;
    }
    let Some(latest) = history.last() else {
        return 0;
    };
    let slots = goal_traits.len() * population_size;
    if slots == 0 {
        return 0;
    }
    let score = latest.sum_of(goal_traits) as f64;
    (score * 100.0 / slots as f64).round().min(100.0) as u32
}

/// Frequency of one trait across generations, for trend charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub trait_kind: TraitKind,
    /// `values[i]` is the count in generation `i + 1`.
    pub values: Vec<u32>,
}

/// One series per catalog trait recorded in any snapshot, zeros included.
///
/// Snapshots store every catalog trait, so a non-empty history charts all
/// of them.
pub fn trend_series(history: &[TraitCounts]) -> Vec<TrendSeries> {
    TraitKind::ALL
        .iter()
        .filter(|&&kind| history.iter().any(|snapshot| snapshot.contains(kind)))
        .map(|&kind| TrendSeries {
            trait_kind: kind,
            values: history.iter().map(|snapshot| snapshot.get(kind)).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GoalKind;

    fn snapshot(entries: &[(TraitKind, u32)]) -> TraitCounts {
        let mut counts = TraitCounts::zeroed();
        for &(kind, n) in entries {
            counts.set(kind, n);
        }
        counts
    }

    #[test]
    fn empty_history_is_zero() {
        let goal = GoalKind::CuteDog.required_traits();
        assert_eq!(goal_progress(&[], goal, 10, false), 0);
    }

    #[test]
    fn achieved_is_full() {
        let goal = GoalKind::CuteDog.required_traits();
        assert_eq!(goal_progress(&[], goal, 10, true), 100);
    }

    #[test]
    fn uses_latest_snapshot_only() {
        let goal = GoalKind::CuteDog.required_traits();
        let history = vec![
            snapshot(&[(TraitKind::BigEyes, 10), (TraitKind::Loyalty, 10)]),
            snapshot(&[
                (TraitKind::BigEyes, 4),
                (TraitKind::FloppyEars, 3),
                (TraitKind::ThickFur, 9),
            ]),
        ];
        // (4 + 3) / 40 = 17.5% rounds to 18
        assert_eq!(goal_progress(&history, goal, 10, false), 18);
    }

    #[test]
    fn saturated_litter_reads_hundred() {
        let goal = GoalKind::GuardDog.required_traits();
        let full: Vec<_> = goal.iter().map(|&k| (k, 10)).collect();
        assert_eq!(goal_progress(&[snapshot(&full)], goal, 10, false), 100);
    }

    #[test]
    fn trend_charts_every_recorded_trait() {
        let history = vec![
            snapshot(&[(TraitKind::ThickFur, 3)]),
            snapshot(&[(TraitKind::ThickFur, 5), (TraitKind::Loyalty, 2)]),
            snapshot(&[]),
        ];
        let series = trend_series(&history);
        assert_eq!(series.len(), TraitKind::ALL.len());
        let kinds: Vec<_> = series.iter().map(|s| s.trait_kind).collect();
        assert_eq!(kinds, TraitKind::ALL.to_vec());

        let of = |kind| &series.iter().find(|s| s.trait_kind == kind).unwrap().values;
        assert_eq!(of(TraitKind::ThickFur), &vec![3, 5, 0]);
        assert_eq!(of(TraitKind::Loyalty), &vec![0, 2, 0]);
        assert_eq!(of(TraitKind::BigEyes), &vec![0, 0, 0]);
    }

    #[test]
    fn trend_skips_unrecorded_traits() {
        let mut sparse = TraitCounts::new();
        sparse.set(TraitKind::BigEyes, 4);
        sparse.set(TraitKind::SpeedyReflexes, 0);
        let series = trend_series(&[sparse, TraitCounts::new()]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].trait_kind, TraitKind::SpeedyReflexes);
        assert_eq!(series[0].values, vec![0, 0]);
        assert_eq!(series[1].trait_kind, TraitKind::BigEyes);
        assert_eq!(series[1].values, vec![4, 0]);
    }

    #[test]
    fn trend_of_empty_history() {
        assert!(trend_series(&[]).is_empty());
    }
}
