//! Player action provider implementations.

pub mod autopilot;
pub mod scripted;

pub use autopilot::AutoPilot;
pub use scripted::ScriptedProvider;
