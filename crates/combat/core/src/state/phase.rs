/// Encounter phase.
///
/// ```text
/// Init ──initiative──▶ PlayerTurn ◀──────▶ MonsterTurn
///                          │                    │
///                          ├─▶ Victory          └─▶ Defeat
///                          └─▶ Fled
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EncounterPhase {
    #[default]
    Init,
    PlayerTurn,
    MonsterTurn,
    Victory,
    Defeat,
    Fled,
}

impl EncounterPhase {
    /// Victory, defeat and fled end the encounter for good.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Fled)
    }
}
