//! Errors reported by session actions and configuration loading.
//!
//! Session errors are policy rejections: the action was not applied and
//! the session is unchanged. Nothing in the engine panics on user input.

use crate::catalog::TraitKind;

/// Why a session action was not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// No catalog trait has this name.
    UnknownTrait(String),
    /// The trait is already in the pending selection.
    AlreadySelected(TraitKind),
    /// The trait is not in the pending selection.
    NotSelected(TraitKind),
    /// Adding the trait would push the selection past the budget.
    OverBudget {
        trait_kind: TraitKind,
        cost: u32,
        selected_cost: u32,
        budget: u32,
    },
    /// A generation needs at least one selected trait.
    EmptySelection,
    /// The goal was achieved or the budget ran out. Restart to play again.
    SessionFinished,
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionError::UnknownTrait(name) => write!(f, "Unknown trait: {}", name),
            ActionError::AlreadySelected(kind) => write!(f, "{} is already selected", kind),
            ActionError::NotSelected(kind) => write!(f, "{} is not selected", kind),
            ActionError::OverBudget {
                trait_kind,
                cost,
                selected_cost,
                budget,
            } => write!(
                f,
                "Cannot afford {} (${}): ${} already selected of ${} budget",
                trait_kind, cost, selected_cost, budget
            ),
            ActionError::EmptySelection => write!(f, "No traits selected"),
            ActionError::SessionFinished => write!(f, "Session is finished, restart to play again"),
        }
    }
}

impl std::error::Error for ActionError {}

/// Errors that can occur while loading a session config
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_budget_message_names_the_trait() {
        let err = ActionError::OverBudget {
            trait_kind: TraitKind::HighIntelligence,
            cost: 25,
            selected_cost: 80,
            budget: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("High Intelligence"));
        assert!(msg.contains("$25"));
    }

    #[test]
    fn parse_error_converts() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
