//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};
use tokio::sync::broadcast;

use super::types::{BeatEvent, CombatUpdate, MatchEvent, RhythmEvent};

/// Topics for event routing
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    /// Beat clock ticks
    Beat,
    /// Timing judgements
    Rhythm,
    /// Clashes, hits, defeats and skill casts
    Combat,
    /// Match start and end
    Match,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Beat(BeatEvent),
    Rhythm(RhythmEvent),
    Combat(CombatUpdate),
    Match(MatchEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Beat(_) => Topic::Beat,
            Event::Rhythm(_) => Topic::Rhythm,
            Event::Combat(_) => Topic::Combat,
            Event::Match(_) => Topic::Match,
        }
    }
}

/// Topic-based event bus
///
/// One broadcast channel per topic, created up front. Publishing is
/// best-effort: events sent while a topic has no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; Topic::COUNT]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(std::array::from_fn(|_| broadcast::channel(capacity.max(1)).0)),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        &self.channels[topic as usize]
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to every topic at once.
    pub fn subscribe_all(&self) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        Topic::iter()
            .map(|topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
