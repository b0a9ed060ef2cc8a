//! Runtime configuration.

use std::str::FromStr;
use std::time::Duration;

use crate::api::{Result, RuntimeError};

/// Settings for pacing and event delivery, shared by sessions and runners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Pause before each monster turn so presentation can keep up.
    pub monster_delay: Duration,
    /// Buffered events per topic before slow subscribers start lagging.
    pub event_capacity: usize,
}

impl RuntimeConfig {
    pub const MONSTER_DELAY_ENV: &'static str = "COMBAT_MONSTER_DELAY_MS";
    pub const EVENT_CAPACITY_ENV: &'static str = "COMBAT_EVENT_CAPACITY";

    pub const DEFAULT_MONSTER_DELAY: Duration = Duration::from_millis(600);
    pub const DEFAULT_EVENT_CAPACITY: usize = 100;

    /// Defaults overridden by `COMBAT_MONSTER_DELAY_MS` and
    /// `COMBAT_EVENT_CAPACITY` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(ms) = parse::<u64>(&lookup, Self::MONSTER_DELAY_ENV)? {
            config.monster_delay = Duration::from_millis(ms);
        }
        if let Some(capacity) = parse::<usize>(&lookup, Self::EVENT_CAPACITY_ENV)? {
            if capacity == 0 {
                return Err(RuntimeError::InvalidConfig {
                    key: Self::EVENT_CAPACITY_ENV,
                    value: capacity.to_string(),
                });
            }
            config.event_capacity = capacity;
        }
        Ok(config)
    }

    /// No pacing; for tests and headless simulation.
    pub fn immediate() -> Self {
        Self {
            monster_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            monster_delay: Self::DEFAULT_MONSTER_DELAY,
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
        }
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RuntimeError::InvalidConfig { key, value: raw }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_variables() {
        let config = RuntimeConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.monster_delay, Duration::from_millis(600));
    }

    #[test]
    fn reads_overrides() {
        let config = RuntimeConfig::from_lookup(|key| match key {
            RuntimeConfig::MONSTER_DELAY_ENV => Some("250".into()),
            RuntimeConfig::EVENT_CAPACITY_ENV => Some(" 16 ".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.monster_delay, Duration::from_millis(250));
        assert_eq!(config.event_capacity, 16);
    }

    #[test]
    fn rejects_garbage() {
        let err = RuntimeConfig::from_lookup(|key| {
            (key == RuntimeConfig::MONSTER_DELAY_ENV).then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::InvalidConfig {
                key: RuntimeConfig::MONSTER_DELAY_ENV,
                ..
            }
        ));
    }
}
