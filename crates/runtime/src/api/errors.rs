//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from configuration, action providers and the session fault
//! boundary so clients can bubble them up with consistent context.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("scripted provider ran out of actions")]
    ScriptExhausted,

    #[error("player action provider failed: {0}")]
    Provider(String),

    #[error("encounter aborted after an internal fault: {0}")]
    Fault(String),

    #[error("encounter has not started")]
    NotStarted,
}
