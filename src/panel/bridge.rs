//! Attach/detach lifecycle of the panel's model subscriptions.

use super::registry::TrackedEntity;
use crate::model::{ModelEvent, OperationHandle, ProjectModel, SubscriptionId, Topic};
use log::{debug, info, warn};
use tokio::sync::mpsc;

/// Topics the panel listens to while attached.
pub const TOPICS: [Topic; 3] = [
    Topic::ProjectUpdateFinished,
    Topic::AllContainerSyncFinished,
    Topic::ContainerSyncRequested,
];

/// Panel routine a notification maps to.
#[derive(Debug, Clone)]
pub enum Refresh {
    /// Field synchronizers plus trigger enablement
    ProjectUpdated,
    /// Trigger enablement only
    SyncButtons,
    /// Incremental indicator for one container
    ContainerProgress {
        entity: TrackedEntity,
        handle: OperationHandle,
    },
}

impl From<ModelEvent> for Refresh {
    fn from(event: ModelEvent) -> Self {
        match event {
            ModelEvent::ProjectUpdateFinished => Refresh::ProjectUpdated,
            ModelEvent::AllContainerSyncFinished => Refresh::SyncButtons,
            ModelEvent::ContainerSyncRequested { container, handle } => Refresh::ContainerProgress {
                entity: TrackedEntity::from(&container),
                handle,
            },
        }
    }
}

enum BridgeState {
    Detached,
    Attached {
        subscriptions: Vec<SubscriptionId>,
        events: mpsc::UnboundedReceiver<ModelEvent>,
    },
}

/// Owns the panel's subscriptions for one attach cycle.
///
/// Attaching subscribes once per topic and keeps the tokens; detaching hands
/// exactly those tokens back to the model and drops anything still queued.
pub struct ListenerBridge {
    state: BridgeState,
}

impl ListenerBridge {
    pub fn new() -> Self {
        Self {
            state: BridgeState::Detached,
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, BridgeState::Attached { .. })
    }

    /// Subscriptions held right now.
    pub fn subscription_count(&self) -> usize {
        match &self.state {
            BridgeState::Attached { subscriptions, .. } => subscriptions.len(),
            BridgeState::Detached => 0,
        }
    }

    /// Subscribe to every topic. No-op when already attached.
    ///
    /// Returns `true` on the Detached to Attached transition.
    pub fn attach(&mut self, model: &mut dyn ProjectModel) -> bool {
        if self.is_attached() {
            debug!("ListenerBridge: already attached");
            return false;
        }

        let (tx, events) = mpsc::unbounded_channel();
        let subscriptions = TOPICS
            .iter()
            .map(|topic| model.subscribe(*topic, tx.clone()))
            .collect::<Vec<_>>();
        info!("ListenerBridge: attached with {} subscriptions", subscriptions.len());

        self.state = BridgeState::Attached { subscriptions, events };
        true
    }

    /// Unsubscribe everything taken by [`attach`](Self::attach). No-op when
    /// detached.
    ///
    /// Returns `true` on the Attached to Detached transition.
    pub fn detach(&mut self, model: &mut dyn ProjectModel) -> bool {
        let BridgeState::Attached { subscriptions, events } =
            std::mem::replace(&mut self.state, BridgeState::Detached)
        else {
            debug!("ListenerBridge: already detached");
            return false;
        };

        for id in &subscriptions {
            if !model.unsubscribe(*id) {
                warn!("ListenerBridge: model did not know subscription {:?}", id);
            }
        }
        drop(events);
        info!("ListenerBridge: detached, released {} subscriptions", subscriptions.len());
        true
    }

    /// Take every notification delivered since the last call.
    pub fn drain(&mut self) -> Vec<Refresh> {
        let BridgeState::Attached { events, .. } = &mut self.state else {
            return Vec::new();
        };

        let mut refreshes = Vec::new();
        while let Ok(event) = events.try_recv() {
            debug!("ListenerBridge: received {:?}", event.topic());
            refreshes.push(Refresh::from(event));
        }
        refreshes
    }
}

impl Default for ListenerBridge {
    fn default() -> Self {
        Self::new()
    }
}
