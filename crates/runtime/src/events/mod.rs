//! Topic-based event bus for encounter events.
//!
//! Engine events are published to a topic, and consumers (log panes,
//! animation, input gating) subscribe only to the topics they need.

mod bus;

pub use bus::{EventBus, Topic};
