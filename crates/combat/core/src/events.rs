//! Events emitted by the engine, in the order they happened.

use crate::combat::{ActionResult, Initiative};
use crate::outcome::{DefeatReport, VictoryReport};
use crate::state::EncounterPhase;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    InitiativeRolled(Initiative),
    ActionResolved(ActionResult),
    PhaseChanged {
        from: EncounterPhase,
        to: EncounterPhase,
    },
    ArmorClassDiscovered {
        monster_id: String,
        armor_class: i32,
    },
    Victory(VictoryReport),
    Defeat(DefeatReport),
    Fled,
}

impl CombatEvent {
    /// Outcome events close the encounter.
    pub fn is_outcome(&self) -> bool {
        matches!(self, Self::Victory(_) | Self::Defeat(_) | Self::Fled)
    }
}
