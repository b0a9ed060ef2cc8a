//! Reasons an action is refused before resolution.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EncounterPhase, SlotDenied};

/// Returned instead of a result when an action is illegal right now.
///
/// A rejection never changes the encounter state. Display strings are meant to
/// be shown to the player as-is.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionRejected {
    #[error("The encounter has already started.")]
    AlreadyStarted,

    #[error("The encounter is over.")]
    EncounterOver,

    #[error("It's not your turn.")]
    NotPlayersTurn { phase: EncounterPhase },

    #[error("It's not the monster's turn.")]
    NotMonstersTurn { phase: EncounterPhase },

    #[error("You've already used your action this turn.")]
    TurnActionUsed,

    #[error("You've already used your bonus action this turn.")]
    BonusActionUsed,

    #[error("You can't use more than {limit} items per turn.")]
    ItemLimitReached { limit: u8 },

    #[error("You can't flee from this fight!")]
    CannotFleeBoss,

    #[error("Not enough MP ({available}/{required}).")]
    InsufficientMana { required: u32, available: u32 },

    #[error("Unknown spell or ability '{0}'.")]
    UnknownTechnique(String),

    #[error("You don't know '{0}'.")]
    TechniqueNotKnown(String),

    #[error("You don't have any '{0}'.")]
    ItemNotOwned(String),

    #[error("Unknown item '{0}'.")]
    UnknownItem(String),

    #[error("{0} can't be used in combat.")]
    ItemNotUsable(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ActionRejected {
    pub(crate) fn from_slot(denied: SlotDenied, item_limit: u8) -> Self {
        match denied {
            SlotDenied::TurnActionUsed => Self::TurnActionUsed,
            SlotDenied::BonusActionUsed => Self::BonusActionUsed,
            SlotDenied::ItemLimitReached => Self::ItemLimitReached { limit: item_limit },
        }
    }
}

impl GameError for ActionRejected {
    fn severity(&self) -> ErrorSeverity {
        use ActionRejected::*;
        match self {
            AlreadyStarted | EncounterOver => ErrorSeverity::Validation,
            NotPlayersTurn { .. } | NotMonstersTurn { .. } => ErrorSeverity::Recoverable,
            TurnActionUsed | BonusActionUsed | ItemLimitReached { .. } => {
                ErrorSeverity::Recoverable
            }
            CannotFleeBoss | InsufficientMana { .. } => ErrorSeverity::Recoverable,
            UnknownTechnique(_) | TechniqueNotKnown(_) => ErrorSeverity::Validation,
            ItemNotOwned(_) | UnknownItem(_) | ItemNotUsable(_) => ErrorSeverity::Validation,
            Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionRejected::*;
        match self {
            AlreadyStarted => "COMBAT_ALREADY_STARTED",
            EncounterOver => "COMBAT_ENCOUNTER_OVER",
            NotPlayersTurn { .. } => "COMBAT_NOT_PLAYERS_TURN",
            NotMonstersTurn { .. } => "COMBAT_NOT_MONSTERS_TURN",
            TurnActionUsed => "COMBAT_TURN_ACTION_USED",
            BonusActionUsed => "COMBAT_BONUS_ACTION_USED",
            ItemLimitReached { .. } => "COMBAT_ITEM_LIMIT_REACHED",
            CannotFleeBoss => "COMBAT_CANNOT_FLEE_BOSS",
            InsufficientMana { .. } => "COMBAT_INSUFFICIENT_MANA",
            UnknownTechnique(_) => "COMBAT_UNKNOWN_TECHNIQUE",
            TechniqueNotKnown(_) => "COMBAT_TECHNIQUE_NOT_KNOWN",
            ItemNotOwned(_) => "COMBAT_ITEM_NOT_OWNED",
            UnknownItem(_) => "COMBAT_UNKNOWN_ITEM",
            ItemNotUsable(_) => "COMBAT_ITEM_NOT_USABLE",
            Oracle(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn economy_rejections_are_recoverable() {
        let rejected = ActionRejected::from_slot(SlotDenied::ItemLimitReached, 2);
        assert_eq!(rejected.to_string(), "You can't use more than 2 items per turn.");
        assert!(rejected.severity().is_recoverable());
        assert_eq!(rejected.error_code(), "COMBAT_ITEM_LIMIT_REACHED");
    }

    #[test]
    fn missing_oracle_is_fatal() {
        let rejected = ActionRejected::from(OracleError::ItemsNotAvailable);
        assert_eq!(rejected.severity(), ErrorSeverity::Fatal);
    }
}
