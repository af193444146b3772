//! Litter generation - spawning a fresh cohort of dogs.
//!
//! The generator only lays out structure. Trait acquisition and
//! inheritance rolls happen later in the simulation step.

use hecs::{Entity, World};

use crate::components::{Dog, TraitSet};

/// Dogs per generation in the standard game.
pub const LITTER_SIZE: usize = 10;

/// Spawn `size` dogs, each with its own copy of `base`.
///
/// Entities are returned in spawn order.
pub fn generate_litter(world: &mut World, size: usize, base: &TraitSet) -> Vec<Entity> {
    let mut litter = Vec::with_capacity(size);
    for _ in 0..size {
        litter.push(world.spawn((Dog::new(base.clone()),)));
    }
    litter
}

/// Empty-trait cohort shown before the first generation runs.
pub fn fresh_litter(size: usize) -> Vec<Dog> {
    vec![Dog::default(); size]
}

/// Read dogs back out of the world, in the order given.
pub fn collect_litter(world: &World, litter: &[Entity]) -> Vec<Dog> {
    litter
        .iter()
        .filter_map(|&entity| world.get::<&Dog>(entity).ok().map(|dog| (*dog).clone()))
        .collect()
}
