//! Project model collaborator.
//!
//! The panel never fetches, persists or serializes anything itself. It talks to
//! a [`ProjectModel`], reads the operation state that model exposes and
//! subscribes to its notifications. [`local::LocalProject`] is the in-process
//! implementation used by the binary; tests supply their own.

pub mod asset;
pub mod listeners;
pub mod local;
pub mod operation;

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;
use uuid::Uuid;

pub use listeners::Listeners;
pub use asset::{AssetError, ProjectAsset};
pub use local::{LocalProject, Simulation};
pub use operation::OperationHandle;

/// Stable identity of a container, independent of its name or position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerId(Uuid);

impl ContainerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ContainerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of one container as exposed by the project.
#[derive(Debug, Clone)]
pub struct ContainerRef {
    pub id: ContainerId,
    pub name: String,
    /// Present exactly while the container is syncing.
    pub operation: Option<OperationHandle>,
}

/// Reference to a locale asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocaleRef {
    pub code: String,
    pub name: String,
}

impl LocaleRef {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for LocaleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// A project locale code paired with the locale asset it maps to.
///
/// The code is fixed when the project is populated; only the asset reference
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleBinding {
    code: String,
    locale: Option<LocaleRef>,
}

impl LocaleBinding {
    pub fn new(code: impl Into<String>, locale: Option<LocaleRef>) -> Self {
        Self {
            code: code.into(),
            locale,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn locale(&self) -> Option<&LocaleRef> {
        self.locale.as_ref()
    }

    pub fn set_locale(&mut self, locale: Option<LocaleRef>) {
        self.locale = locale;
    }
}

/// Address of a persisted model property, e.g. `locales[2].locale`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath(String);

impl PropertyPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Path of the locale asset reference of the binding at `index`.
    pub fn locale_at(index: usize) -> Self {
        Self(format!("locales[{index}].locale"))
    }

    /// Inverse of [`locale_at`](Self::locale_at).
    pub fn locale_index(&self) -> Option<usize> {
        self.0
            .strip_prefix("locales[")?
            .strip_suffix("].locale")?
            .parse()
            .ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Notification kinds a model publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    ProjectUpdateFinished,
    AllContainerSyncFinished,
    ContainerSyncRequested,
}

#[derive(Debug, Clone)]
pub enum ModelEvent {
    ProjectUpdateFinished,
    AllContainerSyncFinished,
    ContainerSyncRequested {
        container: ContainerRef,
        handle: OperationHandle,
    },
}

impl ModelEvent {
    pub fn topic(&self) -> Topic {
        match self {
            ModelEvent::ProjectUpdateFinished => Topic::ProjectUpdateFinished,
            ModelEvent::AllContainerSyncFinished => Topic::AllContainerSyncFinished,
            ModelEvent::ContainerSyncRequested { .. } => Topic::ContainerSyncRequested,
        }
    }
}

/// Where a model delivers notifications for one subscription.
pub type EventSink = mpsc::UnboundedSender<ModelEvent>;

/// Token returned by [`ProjectModel::subscribe`], needed to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Cannot start {0}: another operation is in progress")]
    Busy(&'static str),

    #[error("Locale index {index} out of range (project has {len} locales)")]
    LocaleIndexOutOfRange { index: usize, len: usize },

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Failed to persist project: {0}")]
    Persist(String),
}

/// Everything the panel needs from the project model.
pub trait ProjectModel {
    fn is_fetching_project(&self) -> bool;

    fn is_syncing_any_container(&self) -> bool;

    /// Handle of the running project update, if any.
    ///
    /// May briefly be `None` while [`is_fetching_project`](Self::is_fetching_project)
    /// is still `true`.
    fn update_operation(&self) -> Option<OperationHandle>;

    /// Containers currently syncing, each carrying its own operation handle.
    fn syncing_containers(&self) -> Vec<ContainerRef>;

    /// Empty until the project has been synced at least once.
    fn project_tag(&self) -> String;

    /// Empty until the project has been synced at least once.
    fn last_sync_timestamp(&self) -> String;

    fn locale_bindings(&self) -> Vec<LocaleBinding>;

    /// Persisted storage backing the locale binding at `index`, when the model has one.
    fn locale_property(&self, index: usize) -> Option<PropertyPath>;

    fn set_locale(&mut self, index: usize, locale: Option<LocaleRef>) -> Result<(), ModelError>;

    fn set_property(&mut self, path: &PropertyPath, locale: Option<LocaleRef>) -> Result<(), ModelError>;

    fn trigger_project_fetch(&mut self) -> Result<(), ModelError>;

    fn trigger_container_sync(&mut self) -> Result<(), ModelError>;

    fn subscribe(&mut self, topic: Topic, sink: EventSink) -> SubscriptionId;

    /// Returns `false` if the id was not subscribed.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}
