//! Static trait and goal tables.
//!
//! Every trait has a cost and a set of favorable die faces. A roll of a
//! uniform six-sided die acquires the trait when the face is in that set,
//! so `{4, 5, 6}` succeeds half the time and `{2, 3, 4, 5, 6}` five times
//! in six.
//!
//! ```
//! use breedsim_core::catalog::{GoalKind, TraitKind};
//!
//! let spec = TraitKind::Loyalty.spec();
//! assert_eq!(spec.cost, 15);
//! assert!(GoalKind::CuteDog.required_traits().contains(&TraitKind::Loyalty));
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on the acquisition die.
pub const DIE_FACES: u8 = 6;

/// All heritable traits, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TraitKind {
    FloppyEars,
    MuscularBuild,
    LongLegs,
    HighIntelligence,
    ThickFur,
    SpeedyReflexes,
    ShortSnout,
    Loyalty,
    BigEyes,
    CompactSize,
    SenseOfSmell,
    CalmTemperament,
}

impl TraitKind {
    /// All traits in catalog order.
    pub const ALL: [TraitKind; 12] = [
        TraitKind::FloppyEars,
        TraitKind::MuscularBuild,
        TraitKind::LongLegs,
        TraitKind::HighIntelligence,
        TraitKind::ThickFur,
        TraitKind::SpeedyReflexes,
        TraitKind::ShortSnout,
        TraitKind::Loyalty,
        TraitKind::BigEyes,
        TraitKind::CompactSize,
        TraitKind::SenseOfSmell,
        TraitKind::CalmTemperament,
    ];

    /// Catalog entry for this trait.
    pub fn spec(self) -> &'static TraitSpec {
        &TRAITS[self as usize]
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn cost(self) -> u32 {
        self.spec().cost
    }

    /// Look a trait up by its exact display name.
    pub fn from_name(name: &str) -> Option<TraitKind> {
        TRAITS.iter().find(|t| t.name == name).map(|t| t.kind)
    }
}

impl std::fmt::Display for TraitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the trait catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitSpec {
    pub kind: TraitKind,
    pub name: &'static str,
    /// Price of one acquisition attempt for the whole litter.
    pub cost: u32,
    /// Die faces that count as a successful acquisition.
    pub success_faces: &'static [u8],
}

impl TraitSpec {
    /// Whether a die face acquires this trait.
    pub fn is_success(&self, face: u8) -> bool {
        self.success_faces.contains(&face)
    }

    /// Chance that a single roll acquires this trait.
    pub fn success_probability(&self) -> f64 {
        self.success_faces.len() as f64 / DIE_FACES as f64
    }
}

/// The trait catalog. Indexed by `TraitKind as usize`.
pub static TRAITS: [TraitSpec; 12] = [
    TraitSpec {
        kind: TraitKind::FloppyEars,
        name: "Floppy Ears",
        cost: 10,
        success_faces: &[4, 5, 6],
    },
    TraitSpec {
        kind: TraitKind::MuscularBuild,
        name: "Muscular Build",
        cost: 20,
        success_faces: &[5, 6],
    },
    TraitSpec {
        kind: TraitKind::LongLegs,
        name: "Long Legs",
        cost: 15,
        success_faces: &[3, 4, 5, 6],
    },
    TraitSpec {
        kind: TraitKind::HighIntelligence,
        name: "High Intelligence",
        cost: 25,
        success_faces: &[4, 5, 6],
    },
    TraitSpec {
        kind: TraitKind::ThickFur,
        name: "Thick Fur",
        cost: 10,
        success_faces: &[2, 3, 4, 5, 6],
    },
    TraitSpec {
        kind: TraitKind::SpeedyReflexes,
        name: "Speedy Reflexes",
        cost: 20,
        success_faces: &[5, 6],
    },
    TraitSpec {
        kind: TraitKind::ShortSnout,
        name: "Short Snout",
        cost: 10,
        success_faces: &[3, 4, 5, 6],
    },
    TraitSpec {
        kind: TraitKind::Loyalty,
        name: "Loyalty",
        cost: 15,
        success_faces: &[2, 3, 4, 5, 6],
    },
    TraitSpec {
        kind: TraitKind::BigEyes,
        name: "Big Eyes",
        cost: 10,
        success_faces: &[4, 5, 6],
    },
    TraitSpec {
        kind: TraitKind::CompactSize,
        name: "Compact Size",
        cost: 10,
        success_faces: &[3, 4, 5, 6],
    },
    TraitSpec {
        kind: TraitKind::SenseOfSmell,
        name: "Sense of Smell",
        cost: 20,
        success_faces: &[4, 5, 6],
    },
    TraitSpec {
        kind: TraitKind::CalmTemperament,
        name: "Calm Temperament",
        cost: 15,
        success_faces: &[3, 4, 5, 6],
    },
];

/// Breeding targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GoalKind {
    CuteDog,
    GuardDog,
    ServiceDog,
    HuntingDog,
}

impl GoalKind {
    pub const ALL: [GoalKind; 4] = [
        GoalKind::CuteDog,
        GoalKind::GuardDog,
        GoalKind::ServiceDog,
        GoalKind::HuntingDog,
    ];

    pub fn spec(self) -> &'static GoalSpec {
        &GOALS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Traits a single dog must carry together to satisfy the goal.
    pub fn required_traits(self) -> &'static [TraitKind; 4] {
        &self.spec().required
    }

    pub fn from_name(name: &str) -> Option<GoalKind> {
        GOALS.iter().find(|g| g.name == name).map(|g| g.kind)
    }

    /// Uniform pick over the goal catalog.
    pub fn random(rng: &mut impl Rng) -> GoalKind {
        GoalKind::ALL[rng.gen_range(0..GoalKind::ALL.len())]
    }
}

impl std::fmt::Display for GoalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the goal catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalSpec {
    pub kind: GoalKind,
    pub name: &'static str,
    pub required: [TraitKind; 4],
}

/// The goal catalog. Indexed by `GoalKind as usize`.
pub static GOALS: [GoalSpec; 4] = [
    GoalSpec {
        kind: GoalKind::CuteDog,
        name: "Cute Dog",
        required: [
            TraitKind::BigEyes,
            TraitKind::FloppyEars,
            TraitKind::CompactSize,
            TraitKind::Loyalty,
        ],
    },
    GoalSpec {
        kind: GoalKind::GuardDog,
        name: "Guard Dog",
        required: [
            TraitKind::MuscularBuild,
            TraitKind::SpeedyReflexes,
            TraitKind::ThickFur,
            TraitKind::Loyalty,
        ],
    },
    GoalSpec {
        kind: GoalKind::ServiceDog,
        name: "Service Dog",
        required: [
            TraitKind::HighIntelligence,
            TraitKind::Loyalty,
            TraitKind::ShortSnout,
            TraitKind::CalmTemperament,
        ],
    },
    GoalSpec {
        kind: GoalKind::HuntingDog,
        name: "Hunting Dog",
        required: [
            TraitKind::LongLegs,
            TraitKind::SenseOfSmell,
            TraitKind::SpeedyReflexes,
            TraitKind::ThickFur,
        ],
    },
];

/// Static reference data for rendering trait cards and goal descriptions.
pub fn catalogs() -> (&'static [TraitSpec], &'static [GoalSpec]) {
    (&TRAITS, &GOALS)
}

/// Uniform roll of the acquisition die, 1 through 6.
pub fn roll_die(rng: &mut impl Rng) -> u8 {
    rng.gen_range(1..=DIE_FACES)
}
