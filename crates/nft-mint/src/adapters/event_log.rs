//! Event Log Adapter
//!
//! Records published events in memory, in publication order.

use crate::events::MintEvent;
use crate::ports::outbound::EventPublisher;
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::trace;

/// In-memory event recorder.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: RwLock<Vec<MintEvent>>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All events so far.
    #[must_use]
    pub fn events(&self) -> Vec<MintEvent> {
        self.events.read().clone()
    }

    /// Events with the given topic.
    #[must_use]
    pub fn by_topic(&self, topic: &str) -> Vec<MintEvent> {
        self.events
            .read()
            .iter()
            .filter(|event| event.topic() == topic)
            .cloned()
            .collect()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// True if nothing has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventLog {
    async fn publish(&self, event: MintEvent) {
        trace!(topic = event.topic(), "Event published");
        self.events.write().push(event);
    }
}
