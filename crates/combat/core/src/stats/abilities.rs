//! Ability scores.
//!
//! The six raw scores are the only permanently stored stats; every bonus used
//! in combat is derived from them on demand.

use strum::IntoEnumIterator;

use crate::dice::ability_modifier;
use crate::error::{ErrorSeverity, GameError};

/// One of the six abilities.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

/// A stored score outside 1-30.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{ability} score {score} is outside 1-30")]
pub struct ScoreOutOfRange {
    pub ability: Ability,
    pub score: i32,
}

impl GameError for ScoreOutOfRange {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "ABILITY_SCORE_OUT_OF_RANGE"
    }
}

/// The six raw scores (1-30).
///
/// [`AbilityScores::new`] clamps; deserialization rejects out-of-range scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawAbilityScores", into = "RawAbilityScores"))]
pub struct AbilityScores {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub cha: i32,
}

impl AbilityScores {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 30;

    /// Create scores, clamping each into the legal 1-30 range.
    pub fn new(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        let clamp = |score: i32| score.clamp(Self::MIN, Self::MAX);
        Self {
            str: clamp(str),
            dex: clamp(dex),
            con: clamp(con),
            int: clamp(int),
            wis: clamp(wis),
            cha: clamp(cha),
        }
    }

    /// Create scores, rejecting any outside 1-30.
    pub fn checked(
        str: i32,
        dex: i32,
        con: i32,
        int: i32,
        wis: i32,
        cha: i32,
    ) -> Result<Self, ScoreOutOfRange> {
        let scores = Self {
            str,
            dex,
            con,
            int,
            wis,
            cha,
        };
        let out_of_range = Ability::iter()
            .map(|ability| (ability, scores.score(ability)))
            .find(|(_, score)| !(Self::MIN..=Self::MAX).contains(score));
        match out_of_range {
            Some((ability, score)) => Err(ScoreOutOfRange { ability, score }),
            None => Ok(scores),
        }
    }

    pub fn score(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.str,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Int => self.int,
            Ability::Wis => self.wis,
            Ability::Cha => self.cha,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.score(ability))
    }
}

impl Default for AbilityScores {
    /// All 10 (average human).
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// Unvalidated scores used at the serialization boundary.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawAbilityScores {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub cha: i32,
}

impl TryFrom<RawAbilityScores> for AbilityScores {
    type Error = ScoreOutOfRange;

    fn try_from(raw: RawAbilityScores) -> Result<Self, Self::Error> {
        Self::checked(raw.str, raw.dex, raw.con, raw.int, raw.wis, raw.cha)
    }
}

impl From<AbilityScores> for RawAbilityScores {
    fn from(scores: AbilityScores) -> Self {
        Self {
            str: scores.str,
            dex: scores.dex,
            con: scores.con,
            int: scores.int,
            wis: scores.wis,
            cha: scores.cha,
        }
    }
}
