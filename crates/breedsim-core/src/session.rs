//! Session state and the breeding session engine - main entry point.
//!
//! [`SessionState`] is the whole game as plain data. It moves forward only
//! through [`SessionState::advance`], which takes the prior state and returns
//! the next one. [`BreedingSession`] owns a state, its config and a random
//! source, and serializes every mutation through `&mut self`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog::{GoalKind, TraitKind};
use crate::components::{Dog, TraitCounts, TraitSet};
use crate::config::SessionConfig;
use crate::error::{ActionError, ConfigError};
use crate::generation::fresh_litter;
use crate::progress::{goal_progress, trend_series, TrendSeries};
use crate::simulation::{selection_cost, simulate, GenerationInput};

/// How a generation ended the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Continuing,
    GoalAchieved,
    GameOver,
}

/// Summary of the most recent generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Generation number that was simulated.
    pub generation: u32,
    pub attempted: Vec<TraitKind>,
    pub cost_paid: u32,
    /// Successful acquisition rolls in this generation.
    pub acquired: TraitCounts,
    pub outcome: Outcome,
}

/// Complete game state. This is the snapshot shape handed to presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub goal: GoalKind,
    /// Next generation to simulate. Starts at 1.
    pub generation: u32,
    pub budget: u32,
    /// Pending selection, in the order traits were picked.
    pub selection: Vec<TraitKind>,
    pub inherited: TraitSet,
    pub success_counts: TraitCounts,
    /// One frequency snapshot per simulated generation.
    pub history: Vec<TraitCounts>,
    pub litter: Vec<Dog>,
    pub goal_achieved: bool,
    pub game_over: bool,
    pub last_report: Option<GenerationReport>,
}

impl SessionState {
    /// Fresh game with a uniformly random goal.
    pub fn initial(config: &SessionConfig, rng: &mut impl Rng) -> Self {
        Self::with_goal(config, GoalKind::random(rng))
    }

    /// Fresh game with a chosen goal.
    pub fn with_goal(config: &SessionConfig, goal: GoalKind) -> Self {
        Self {
            goal,
            generation: 1,
            budget: config.starting_budget,
            selection: Vec::new(),
            inherited: TraitSet::new(),
            success_counts: TraitCounts::new(),
            history: Vec::new(),
            litter: fresh_litter(config.population_size),
            goal_achieved: false,
            game_over: false,
            last_report: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.goal_achieved || self.game_over
    }

    pub fn selected_cost(&self) -> u32 {
        selection_cost(&self.selection)
    }

    /// Whether `kind` could be added to the selection right now.
    pub fn can_select(&self, kind: TraitKind) -> bool {
        self.check_select(kind).is_ok()
    }

    fn check_select(&self, kind: TraitKind) -> Result<(), ActionError> {
        if self.is_finished() {
            return Err(ActionError::SessionFinished);
        }
        if self.selection.contains(&kind) {
            return Err(ActionError::AlreadySelected(kind));
        }
        let selected_cost = self.selected_cost();
        if selected_cost + kind.cost() > self.budget {
            return Err(ActionError::OverBudget {
                trait_kind: kind,
                cost: kind.cost(),
                selected_cost,
                budget: self.budget,
            });
        }
        Ok(())
    }

    /// Add a trait, keeping the selected total within budget.
    pub fn select(&mut self, kind: TraitKind) -> Result<(), ActionError> {
        self.check_select(kind)?;
        self.selection.push(kind);
        Ok(())
    }

    pub fn deselect(&mut self, kind: TraitKind) -> Result<(), ActionError> {
        let index = self
            .selection
            .iter()
            .position(|&k| k == kind)
            .ok_or(ActionError::NotSelected(kind))?;
        self.selection.remove(index);
        Ok(())
    }

    pub fn can_run(&self) -> bool {
        !self.selection.is_empty() && !self.is_finished()
    }

    /// Simulate one generation and return the next state.
    ///
    /// `self` is untouched. Rejected when nothing is selected or the game
    /// has already ended.
    pub fn advance(
        &self,
        config: &SessionConfig,
        rng: &mut impl Rng,
    ) -> Result<SessionState, ActionError> {
        self.step(config, rng).map(|(next, _)| next)
    }

    fn step(
        &self,
        config: &SessionConfig,
        rng: &mut impl Rng,
    ) -> Result<(SessionState, GenerationReport), ActionError> {
        if self.is_finished() {
            return Err(ActionError::SessionFinished);
        }
        if self.selection.is_empty() {
            return Err(ActionError::EmptySelection);
        }

        let input = GenerationInput {
            goal: self.goal,
            budget: self.budget,
            selected: &self.selection,
            inherited: &self.inherited,
            success_counts: &self.success_counts,
            population_size: config.population_size,
            inheritance_chance: config.inheritance_chance,
        };
        let result = simulate(&input, rng);

        let outcome = if result.goal_achieved {
            Outcome::GoalAchieved
        } else if result.game_over {
            Outcome::GameOver
        } else {
            Outcome::Continuing
        };
        let report = GenerationReport {
            generation: self.generation,
            attempted: self.selection.clone(),
            cost_paid: result.cost_paid,
            acquired: result.acquired,
            outcome,
        };

        let mut history = self.history.clone();
        history.push(result.frequencies);

        let next = SessionState {
            goal: self.goal,
            generation: self.generation + 1,
            budget: result.budget,
            selection: Vec::new(),
            inherited: result.inherited,
            success_counts: result.success_counts,
            history,
            litter: result.litter,
            goal_achieved: result.goal_achieved,
            game_over: result.game_over,
            last_report: Some(report.clone()),
        };
        Ok((next, report))
    }
}

/// Single-owner breeding game.
///
/// All randomness (die rolls, inheritance flips, goal picks) comes from
/// the session's own random source.
pub struct BreedingSession<R: Rng = StdRng> {
    config: SessionConfig,
    rng: R,
    state: SessionState,
}

impl BreedingSession<StdRng> {
    /// Create a session, seeded from `config.seed` or from entropy.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl Default for BreedingSession<StdRng> {
    fn default() -> Self {
        // The default config always validates.
        Self::start(SessionConfig::default(), StdRng::from_entropy())
    }
}

impl<R: Rng> BreedingSession<R> {
    /// Create a session driven by the given random source.
    ///
    /// The config is validated before any state is built.
    pub fn with_rng(config: SessionConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::start(config, rng))
    }

    fn start(config: SessionConfig, mut rng: R) -> Self {
        let state = SessionState::initial(&config, &mut rng);
        log::info!("New breeding session: goal {}, budget ${}", state.goal, state.budget);
        Self { config, rng, state }
    }

    /// Replace the random goal. Only allowed before the first generation.
    pub fn with_goal(mut self, goal: GoalKind) -> Self {
        if self.state.history.is_empty() {
            self.state.goal = goal;
        }
        self
    }

    /// Add a trait to the pending selection.
    pub fn select_trait(&mut self, kind: TraitKind) -> Result<(), ActionError> {
        self.state.select(kind).inspect_err(|e| log::trace!("select {} rejected: {}", kind, e))
    }

    /// Remove a trait from the pending selection.
    pub fn deselect_trait(&mut self, kind: TraitKind) -> Result<(), ActionError> {
        self.state.deselect(kind).inspect_err(|e| log::trace!("deselect {} rejected: {}", kind, e))
    }

    /// Flip a trait in or out of the selection. Returns whether it is now selected.
    pub fn toggle_trait(&mut self, kind: TraitKind) -> Result<bool, ActionError> {
        if self.state.selection.contains(&kind) {
            self.deselect_trait(kind)?;
            Ok(false)
        } else {
            self.select_trait(kind)?;
            Ok(true)
        }
    }

    pub fn select_by_name(&mut self, name: &str) -> Result<(), ActionError> {
        let kind = TraitKind::from_name(name)
            .ok_or_else(|| ActionError::UnknownTrait(name.to_string()))?;
        self.select_trait(kind)
    }

    pub fn deselect_by_name(&mut self, name: &str) -> Result<(), ActionError> {
        let kind = TraitKind::from_name(name)
            .ok_or_else(|| ActionError::UnknownTrait(name.to_string()))?;
        self.deselect_trait(kind)
    }

    /// Simulate one generation with the pending selection.
    pub fn run_generation(&mut self) -> Result<GenerationReport, ActionError> {
        let (next, report) = self
            .state
            .step(&self.config, &mut self.rng)
            .inspect_err(|e| log::trace!("run_generation rejected: {}", e))?;
        self.state = next;

        match report.outcome {
            Outcome::GoalAchieved => log::info!(
                "Bred a perfect {} in generation {} with ${} left",
                self.state.goal,
                report.generation,
                self.state.budget
            ),
            Outcome::GameOver => log::info!(
                "Out of budget after generation {} without a perfect {}",
                report.generation,
                self.state.goal
            ),
            Outcome::Continuing => {}
        }

        Ok(report)
    }

    /// Start over with a new random goal and a full budget.
    pub fn restart(&mut self) {
        self.state = SessionState::initial(&self.config, &mut self.rng);
        log::info!("Session restarted: goal {}, budget ${}", self.state.goal, self.state.budget);
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn goal(&self) -> GoalKind {
        self.state.goal
    }

    pub fn goal_traits(&self) -> &'static [TraitKind; 4] {
        self.state.goal.required_traits()
    }

    pub fn generation(&self) -> u32 {
        self.state.generation
    }

    pub fn budget(&self) -> u32 {
        self.state.budget
    }

    pub fn selection(&self) -> &[TraitKind] {
        &self.state.selection
    }

    pub fn selected_cost(&self) -> u32 {
        self.state.selected_cost()
    }

    /// Budget left if the pending selection were run now.
    pub fn remaining_after_selection(&self) -> u32 {
        self.state.budget.saturating_sub(self.state.selected_cost())
    }

    pub fn litter(&self) -> &[Dog] {
        &self.state.litter
    }

    pub fn inherited(&self) -> &TraitSet {
        &self.state.inherited
    }

    pub fn success_counts(&self) -> &TraitCounts {
        &self.state.success_counts
    }

    pub fn history(&self) -> &[TraitCounts] {
        &self.state.history
    }

    pub fn goal_achieved(&self) -> bool {
        self.state.goal_achieved
    }

    pub fn game_over(&self) -> bool {
        self.state.game_over
    }

    /// The game has ended and only `restart` does anything useful.
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn can_run(&self) -> bool {
        self.state.can_run()
    }

    pub fn can_select(&self, kind: TraitKind) -> bool {
        self.state.can_select(kind)
    }

    /// Unselected traits that still fit in the budget.
    pub fn affordable_traits(&self) -> Vec<TraitKind> {
        TraitKind::ALL
            .iter()
            .copied()
            .filter(|&k| self.state.can_select(k))
            .collect()
    }

    pub fn last_report(&self) -> Option<&GenerationReport> {
        self.state.last_report.as_ref()
    }

    /// Goal progress in percent for the latest litter.
    pub fn goal_progress(&self) -> u32 {
        goal_progress(
            &self.state.history,
            self.goal_traits(),
            self.config.population_size,
            self.state.goal_achieved,
        )
    }

    pub fn trend_series(&self) -> Vec<TrendSeries> {
        trend_series(&self.state.history)
    }
}
