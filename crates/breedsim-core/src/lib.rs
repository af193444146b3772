//! Breedsim Core - Artificial Selection Breeding Engine
//!
//! A turn-based breeding game: a litter of dogs picks up heritable traits
//! over generations while a budget pays for every acquisition attempt. The
//! game ends when one dog carries every trait of the goal, or when the
//! budget runs out.
//!
//! # Architecture
//!
//! Each generation is simulated in its own ECS world via `hecs`:
//! - **Entities**: the dogs of one litter, discarded after the step
//! - **Components**: [`components::Dog`] and the [`components::TraitSet`] it carries
//! - **Systems**: breeding (acquisition and inheritance rolls) and a census
//!
//! [`session::SessionState`] holds the whole game as plain data and moves
//! forward through a single transition. [`session::BreedingSession`] owns
//! that state and the random source.
//!
//! # Example
//!
//! ```rust
//! use breedsim_core::prelude::*;
//!
//! let mut session = BreedingSession::new(SessionConfig::seeded(42)).expect("valid config");
//!
//! // Pick traits within the budget
//! for &kind in session.goal_traits() {
//!     let _ = session.select_trait(kind);
//! }
//!
//! // Run one generation
//! let report = session.run_generation().expect("traits selected");
//! assert_eq!(report.generation, 1);
//! assert!(session.budget() < 100);
//! ```

pub mod catalog;
pub mod components;
pub mod config;
pub mod error;
pub mod generation;
pub mod progress;
pub mod session;
pub mod simulation;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::catalog::{catalogs, GoalKind, TraitKind};
    pub use crate::components::*;
    pub use crate::config::SessionConfig;
    pub use crate::error::{ActionError, ConfigError};
    pub use crate::progress::TrendSeries;
    pub use crate::session::{BreedingSession, GenerationReport, Outcome, SessionState};
}
