//! Generation simulator - one breeding step from selection to outcome.
//!
//! A step spawns a fresh litter into its own ECS world and runs the
//! breeding system over it:
//! - **Acquisition**: per dog, per selected trait, one die roll
//! - **Inheritance**: per dog, per inherited trait, one coin flip
//!
//! A census then counts every catalog trait across the litter. Traits
//! present in at least one dog are inherited by the next generation, and
//! the goal is met only when a single dog carries all of its traits.
//!
//! The step is a pure function of its input and the random source.

use hecs::World;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{roll_die, GoalKind, TraitKind};
use crate::components::{Dog, TraitCounts, TraitSet};
use crate::generation::{collect_litter, generate_litter};

/// Everything a generation step reads.
#[derive(Debug, Clone)]
pub struct GenerationInput<'a> {
    pub goal: GoalKind,
    pub budget: u32,
    /// Traits attempted this generation, in selection order.
    pub selected: &'a [TraitKind],
    /// Traits present somewhere in the previous litter.
    pub inherited: &'a TraitSet,
    /// Cumulative successful acquisition rolls so far.
    pub success_counts: &'a TraitCounts,
    pub population_size: usize,
    pub inheritance_chance: f64,
}

/// Everything a generation step produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// The new litter, in spawn order.
    pub litter: Vec<Dog>,
    /// Budget after paying for the attempts.
    pub budget: u32,
    /// Total cost of the selected traits.
    pub cost_paid: u32,
    /// Inherited set for the next generation.
    pub inherited: TraitSet,
    /// Cumulative success counts including this step.
    pub success_counts: TraitCounts,
    /// Successful acquisition rolls in this step alone.
    pub acquired: TraitCounts,
    /// Dogs carrying each catalog trait, zeros included.
    pub frequencies: TraitCounts,
    pub goal_achieved: bool,
    pub game_over: bool,
}

/// Run one generation.
pub fn simulate(input: &GenerationInput<'_>, rng: &mut impl Rng) -> GenerationResult {
    let mut world = World::new();
    let litter = generate_litter(&mut world, input.population_size, &TraitSet::new());

    let acquired = breeding_system(
        &mut world,
        input.selected,
        input.inherited,
        input.inheritance_chance,
        rng,
    );

    let mut success_counts = input.success_counts.clone();
    for (kind, hits) in acquired.iter() {
        success_counts.add(kind, hits);
    }

    let frequencies = census(&world);
    let inherited: TraitSet = frequencies.present().collect();
    let goal_achieved = has_perfect_dog(&world, input.goal.required_traits());

    let cost_paid = selection_cost(input.selected);
    let budget = input.budget.saturating_sub(cost_paid);
    let game_over = !goal_achieved && budget == 0;

    log::debug!(
        "Generation step: {} selected, ${} paid, ${} left, {} traits present, goal {}",
        input.selected.len(),
        cost_paid,
        budget,
        inherited.len(),
        if goal_achieved { "met" } else { "not met" }
    );

    GenerationResult {
        litter: collect_litter(&world, &litter),
        budget,
        cost_paid,
        inherited,
        success_counts,
        acquired,
        frequencies,
        goal_achieved,
        game_over,
    }
}

/// Total price of a selection.
pub fn selection_cost(selected: &[TraitKind]) -> u32 {
    selected.iter().map(|k| k.cost()).sum()
}

/// Roll acquisition then inheritance for each dog in turn.
///
/// Returns the number of successful acquisition rolls per trait.
fn breeding_system(
    world: &mut World,
    selected: &[TraitKind],
    inherited: &TraitSet,
    inheritance_chance: f64,
    rng: &mut impl Rng,
) -> TraitCounts {
    let mut acquired = TraitCounts::new();

    for (_entity, dog) in world.query_mut::<&mut Dog>() {
        for &kind in selected {
            if kind.spec().is_success(roll_die(rng)) {
                dog.traits.insert(kind);
                acquired.increment(kind);
            }
        }

        // Chances outside 0..=1 saturate.
        for kind in inherited.iter() {
            if rng.gen::<f64>() < inheritance_chance {
                dog.traits.insert(kind);
            }
        }
    }

    acquired
}

/// Count dogs carrying each catalog trait.
fn census(world: &World) -> TraitCounts {
    let mut frequencies = TraitCounts::zeroed();
    for (_entity, dog) in world.query::<&Dog>().iter() {
        for kind in dog.traits.iter() {
            frequencies.increment(kind);
        }
    }
    frequencies
}

/// True when one dog carries every required trait by itself.
fn has_perfect_dog(world: &World, required: &[TraitKind]) -> bool {
    world
        .query::<&Dog>()
        .iter()
        .any(|(_entity, dog)| dog.satisfies(required))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn input<'a>(
        goal: GoalKind,
        budget: u32,
        selected: &'a [TraitKind],
        inherited: &'a TraitSet,
        counts: &'a TraitCounts,
    ) -> GenerationInput<'a> {
        GenerationInput {
            goal,
            budget,
            selected,
            inherited,
            success_counts: counts,
            population_size: 10,
            inheritance_chance: 0.5,
        }
    }

    #[test]
    fn test_population_size_is_fixed() {
        let mut rng = StdRng::seed_from_u64(1);
        let inherited = TraitSet::new();
        let counts = TraitCounts::new();
        let selected = [TraitKind::FloppyEars, TraitKind::ThickFur];
        let result = simulate(
            &input(GoalKind::CuteDog, 100, &selected, &inherited, &counts),
            &mut rng,
        );
        assert_eq!(result.litter.len(), 10);
    }

    #[test]
    fn test_budget_pays_for_attempts() {
        let mut rng = StdRng::seed_from_u64(2);
        let inherited = TraitSet::new();
        let counts = TraitCounts::new();
        let selected = [TraitKind::FloppyEars, TraitKind::BigEyes];
        let result = simulate(
            &input(GoalKind::GuardDog, 100, &selected, &inherited, &counts),
            &mut rng,
        );
        assert_eq!(result.cost_paid, 20);
        assert_eq!(result.budget, 80);
        assert!(!result.game_over);
    }

    #[test]
    fn test_frequencies_cover_catalog_and_match_litter() {
        let mut rng = StdRng::seed_from_u64(3);
        let inherited: TraitSet = [TraitKind::Loyalty, TraitKind::LongLegs].into_iter().collect();
        let counts = TraitCounts::new();
        let selected = [TraitKind::ThickFur, TraitKind::ShortSnout];
        let result = simulate(
            &input(GoalKind::HuntingDog, 100, &selected, &inherited, &counts),
            &mut rng,
        );

        assert_eq!(result.frequencies.iter().count(), TraitKind::ALL.len());
        for kind in TraitKind::ALL {
            let expected = result.litter.iter().filter(|d| d.has(kind)).count() as u32;
            assert_eq!(result.frequencies.get(kind), expected, "{}", kind);
            assert!(expected <= 10);
        }
    }

    #[test]
    fn test_inherited_set_is_present_traits() {
        let mut rng = StdRng::seed_from_u64(4);
        let inherited: TraitSet = [TraitKind::CalmTemperament].into_iter().collect();
        let counts = TraitCounts::new();
        let selected = [TraitKind::Loyalty];
        let result = simulate(
            &input(GoalKind::ServiceDog, 100, &selected, &inherited, &counts),
            &mut rng,
        );

        for kind in TraitKind::ALL {
            assert_eq!(result.inherited.contains(kind), result.frequencies.get(kind) > 0);
        }
    }

    #[test]
    fn test_only_selected_or_inherited_traits_appear() {
        let mut rng = StdRng::seed_from_u64(5);
        let inherited: TraitSet = [TraitKind::SenseOfSmell].into_iter().collect();
        let counts = TraitCounts::new();
        let selected = [TraitKind::BigEyes];
        let result = simulate(
            &input(GoalKind::CuteDog, 100, &selected, &inherited, &counts),
            &mut rng,
        );

        for dog in &result.litter {
            for kind in dog.traits.iter() {
                assert!(kind == TraitKind::BigEyes || kind == TraitKind::SenseOfSmell);
            }
        }
    }

    #[test]
    fn test_success_counts_accumulate() {
        let mut rng = StdRng::seed_from_u64(6);
        let inherited = TraitSet::new();
        let mut counts = TraitCounts::new();
        counts.set(TraitKind::ThickFur, 7);
        let selected = [TraitKind::ThickFur];
        let result = simulate(
            &input(GoalKind::GuardDog, 100, &selected, &inherited, &counts),
            &mut rng,
        );

        let this_round = result.acquired.get(TraitKind::ThickFur);
        assert_eq!(result.success_counts.get(TraitKind::ThickFur), 7 + this_round);
        // No inheritance, so every carrier acquired it by roll this round.
        assert_eq!(result.frequencies.get(TraitKind::ThickFur), this_round);
    }

    #[test]
    fn test_inheritance_without_selection_rolls() {
        let mut rng = StdRng::seed_from_u64(7);
        let inherited: TraitSet = [TraitKind::Loyalty].into_iter().collect();
        let counts = TraitCounts::new();
        let result = simulate(&input(GoalKind::CuteDog, 100, &[], &inherited, &counts), &mut rng);

        assert_eq!(result.cost_paid, 0);
        assert_eq!(result.budget, 100);
        assert_eq!(result.acquired.total(), 0);
        assert!(result.success_counts.is_empty());
    }

    #[test]
    fn test_certain_inheritance() {
        let mut rng = StdRng::seed_from_u64(8);
        let inherited: TraitSet = [TraitKind::Loyalty, TraitKind::BigEyes].into_iter().collect();
        let counts = TraitCounts::new();
        let mut step = input(GoalKind::CuteDog, 100, &[], &inherited, &counts);
        step.inheritance_chance = 1.0;
        let result = simulate(&step, &mut rng);
        assert!(result
            .litter
            .iter()
            .all(|d| d.has(TraitKind::Loyalty) && d.has(TraitKind::BigEyes)));

        step.inheritance_chance = 0.0;
        let result = simulate(&step, &mut rng);
        assert!(result.litter.iter().all(|d| d.traits.is_empty()));
        assert!(result.inherited.is_empty());
    }

    #[test]
    fn test_goal_requires_single_dog() {
        let mut world = World::new();
        let required = GoalKind::CuteDog.required_traits();
        let half_a: TraitSet = required[..2].iter().copied().collect();
        let half_b: TraitSet = required[2..].iter().copied().collect();
        world.spawn((Dog::new(half_a),));
        world.spawn((Dog::new(half_b),));
        assert!(!has_perfect_dog(&world, required));

        let full: TraitSet = required.iter().copied().collect();
        world.spawn((Dog::new(full),));
        assert!(has_perfect_dog(&world, required));
    }

    #[test]
    fn test_goal_beats_budget_exhaustion() {
        // Certain inheritance of the whole goal yields a perfect dog.
        let mut rng = StdRng::seed_from_u64(9);
        let goal = GoalKind::CuteDog;
        let inherited: TraitSet = goal.required_traits().iter().copied().collect();
        let counts = TraitCounts::new();
        let selected = [TraitKind::BigEyes];
        let mut step = input(goal, 10, &selected, &inherited, &counts);
        step.inheritance_chance = 1.0;
        let result = simulate(&step, &mut rng);

        assert_eq!(result.budget, 0);
        assert!(result.goal_achieved);
        assert!(!result.game_over);
    }

    #[test]
    fn test_game_over_when_budget_spent() {
        let mut rng = StdRng::seed_from_u64(10);
        let inherited = TraitSet::new();
        let counts = TraitCounts::new();
        let selected = [TraitKind::HighIntelligence];
        let result = simulate(
            &input(GoalKind::HuntingDog, 25, &selected, &inherited, &counts),
            &mut rng,
        );

        // High Intelligence is not a Hunting Dog trait, so the goal cannot be met.
        assert!(!result.goal_achieved);
        assert_eq!(result.budget, 0);
        assert!(result.game_over);
    }

    #[test]
    fn test_same_seed_same_litter() {
        let inherited: TraitSet = [TraitKind::ThickFur].into_iter().collect();
        let counts = TraitCounts::new();
        let selected = [TraitKind::Loyalty, TraitKind::LongLegs];
        let step = input(GoalKind::HuntingDog, 100, &selected, &inherited, &counts);

        let a = simulate(&step, &mut StdRng::seed_from_u64(11));
        let b = simulate(&step, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_selection_cost() {
        assert_eq!(selection_cost(&[]), 0);
        assert_eq!(selection_cost(&[TraitKind::FloppyEars, TraitKind::HighIntelligence]), 35);
    }

    #[test]
    fn test_out_of_range_chance_saturates() {
        let mut rng = StdRng::seed_from_u64(12);
        let inherited: TraitSet = [TraitKind::ThickFur].into_iter().collect();
        let counts = TraitCounts::new();
        let selected = [TraitKind::Loyalty];
        let mut step = input(GoalKind::GuardDog, 100, &selected, &inherited, &counts);

        step.inheritance_chance = 1.5;
        let result = simulate(&step, &mut rng);
        assert!(result.litter.iter().all(|d| d.has(TraitKind::ThickFur)));

        step.inheritance_chance = f64::NAN;
        let result = simulate(&step, &mut rng);
        assert!(result.litter.iter().all(|d| !d.has(TraitKind::ThickFur)));
    }
}
