//! Encounter state.
//!
//! [`CombatState`] is everything scoped to one encounter. The player inside it
//! is a working copy of the overworld player; the embedding layer copies it
//! back once the encounter is over.

mod economy;
mod phase;

pub use economy::{ActionSlot, SlotDenied, TurnEconomy};
pub use phase::EncounterPhase;

use crate::codex::{ArmorClassDisplay, ArmorClassTracker};
use crate::combat::Initiative;
use crate::env::WeatherModifiers;
use crate::outcome::EncounterOutcome;
use crate::stats::{MonsterState, MonsterTemplate, PlayerState};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub phase: EncounterPhase,
    pub economy: TurnEconomy,
    pub player: PlayerState,
    pub monster: MonsterState,
    pub weather: WeatherModifiers,
    pub tracker: ArmorClassTracker,
    /// Player turns started so far.
    pub round: u32,
    pub initiative: Option<Initiative>,
    /// Set exactly once, on entering a terminal phase.
    pub outcome: Option<EncounterOutcome>,
}

impl CombatState {
    pub fn new(player: PlayerState, monster: MonsterTemplate, weather: WeatherModifiers) -> Self {
        Self {
            phase: EncounterPhase::Init,
            economy: TurnEconomy::default(),
            player,
            monster: MonsterState::spawn(monster),
            weather,
            tracker: ArmorClassTracker::new(),
            round: 0,
            initiative: None,
            outcome: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// What the player currently knows about the monster's AC.
    pub fn armor_class_display(&self) -> ArmorClassDisplay {
        self.tracker.display(self.monster.template.armor_class)
    }
}
