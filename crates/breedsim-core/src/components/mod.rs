//! Component definitions for the litter ECS.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior - that lives in the simulation systems.

mod counts;
mod dog;

pub use counts::*;
pub use dog::*;
