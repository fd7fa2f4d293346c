use super::{EventSink, ModelEvent, SubscriptionId, Topic};
use log::{debug, trace};

struct Listener {
    id: SubscriptionId,
    topic: Topic,
    sink: EventSink,
}

/// Subscription bookkeeping for [`ProjectModel`](super::ProjectModel) implementations.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Listener>,
    next_id: u64,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, topic: Topic, sink: EventSink) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push(Listener { id, topic, sink });
        debug!("Listeners: subscribed {:?} to {:?} ({} active)", id, topic, self.entries.len());
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|listener| listener.id != id);
        let removed = self.entries.len() != before;
        debug!(
            "Listeners: unsubscribe {:?} ({}; {} active)",
            id,
            if removed { "removed" } else { "unknown id" },
            self.entries.len()
        );
        removed
    }

    /// Deliver `event` to every sink subscribed to its topic.
    /// Sinks whose receiver is gone are dropped.
    pub fn publish(&mut self, event: ModelEvent) {
        let topic = event.topic();
        self.entries.retain(|listener| {
            if listener.topic != topic {
                return true;
            }
            let delivered = listener.sink.send(event.clone()).is_ok();
            if !delivered {
                trace!("Listeners: dropping closed sink {:?}", listener.id);
            }
            delivered
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_for(&self, topic: Topic) -> usize {
        self.entries.iter().filter(|listener| listener.topic == topic).count()
    }
}
