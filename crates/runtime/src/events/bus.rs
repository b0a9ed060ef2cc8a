//! Topic-based event bus implementation.

use combat_core::CombatEvent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::broadcast;

use crate::config::RuntimeConfig;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Resolved actions, initiative and AC discoveries
    Action,
    /// Phase transitions (enable or disable player input)
    Phase,
    /// Victory, defeat or escape
    Outcome,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Action, Topic::Phase, Topic::Outcome];

    /// Topic an engine event is published under.
    pub fn of(event: &CombatEvent) -> Self {
        match event {
            CombatEvent::InitiativeRolled(_)
            | CombatEvent::ActionResolved(_)
            | CombatEvent::ArmorClassDiscovered { .. } => Topic::Action,
            CombatEvent::PhaseChanged { .. } => Topic::Phase,
            CombatEvent::Victory(_) | CombatEvent::Defeat(_) | CombatEvent::Fled => Topic::Outcome,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: events sent while a
/// topic has no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    action: broadcast::Sender<CombatEvent>,
    phase: broadcast::Sender<CombatEvent>,
    outcome: broadcast::Sender<CombatEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(RuntimeConfig::DEFAULT_EVENT_CAPACITY)
    }

    /// Creates a bus sized by [`RuntimeConfig::event_capacity`]
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::with_capacity(config.event_capacity)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            action: broadcast::channel(capacity).0,
            phase: broadcast::channel(capacity).0,
            outcome: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<CombatEvent> {
        match topic {
            Topic::Action => &self.action,
            Topic::Phase => &self.phase,
            Topic::Outcome => &self.outcome,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: CombatEvent) {
        let topic = Topic::of(&event);
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CombatEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<CombatEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("action_subscribers", &self.action.receiver_count())
            .field("phase_subscribers", &self.phase.receiver_count())
            .field("outcome_subscribers", &self.outcome.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::EncounterPhase;

    #[test]
    fn routes_by_topic() {
        let bus = EventBus::with_capacity(4);
        let mut phases = bus.subscribe(Topic::Phase);
        let mut outcomes = bus.subscribe(Topic::Outcome);

        bus.publish(CombatEvent::PhaseChanged {
            from: EncounterPhase::Init,
            to: EncounterPhase::PlayerTurn,
        });
        bus.publish(CombatEvent::Fled);

        assert!(matches!(
            phases.try_recv(),
            Ok(CombatEvent::PhaseChanged { .. })
        ));
        assert!(phases.try_recv().is_err());
        assert_eq!(outcomes.try_recv().unwrap(), CombatEvent::Fled);
    }

    #[test]
    fn configured_capacity_bounds_each_topic() {
        let config = RuntimeConfig {
            event_capacity: 2,
            ..RuntimeConfig::immediate()
        };
        let bus = EventBus::from_config(&config);
        let mut outcomes = bus.subscribe(Topic::Outcome);

        for _ in 0..3 {
            bus.publish(CombatEvent::Fled);
        }

        assert!(matches!(
            outcomes.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
        assert_eq!(outcomes.try_recv().unwrap(), CombatEvent::Fled);
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.publish(CombatEvent::Fled);
        let all = bus.subscribe_multiple(&Topic::ALL);
        assert_eq!(all.len(), 3);
    }
}
