//! The sync panel.
//!
//! The panel triggers project fetches and container syncs, shows one progress
//! indicator per running operation and keeps its labels and locale list in
//! step with the model, including changes that started outside the panel.
//!
//! # Module Components
//!
//! - [`scheduler`] - Recurring callbacks driven by the host's tick
//! - [`indicator`] - Progress views that poll an operation until it finishes
//! - [`registry`] - At most one indicator per tracked entity
//! - [`triggers`] - Trigger button enablement
//! - [`bridge`] - Model subscriptions for one attach/detach cycle
//! - [`fields`] - Name label, timestamp label and locale list renders
//! - [`layout`] - Typed view slots
//!
//! # Data flow
//!
//! Model notifications are queued by the [`ListenerBridge`] and dispatched by
//! [`SyncPanel::process_notifications`] on the UI tick. Button presses go the
//! other way: they call the model, then rebuild progress and button state
//! before returning, since the new operation's own notification arrives later.

pub mod bridge;
pub mod fields;
pub mod indicator;
pub mod layout;
pub mod registry;
pub mod scheduler;
pub mod triggers;

pub use bridge::{ListenerBridge, Refresh};
pub use indicator::{Indicator, IndicatorFactory, Outcome, ProgressView};
pub use layout::{FieldBinding, LocaleField, LocaleList, PanelLayout, TextLabel, TriggerButton};
pub use registry::{EntityKey, ProgressRegistry, TrackedEntity};
pub use scheduler::{Schedule, ScheduledTask, TickScheduler};
pub use triggers::SyncTriggers;

use crate::model::{LocaleRef, ModelError, ProjectModel};
use log::{debug, info, warn};

pub struct SyncPanel {
    layout: PanelLayout,
    bridge: ListenerBridge,
}

impl SyncPanel {
    pub fn new(layout: PanelLayout) -> Self {
        Self {
            layout,
            bridge: ListenerBridge::new(),
        }
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    pub fn bridge(&self) -> &ListenerBridge {
        &self.bridge
    }

    pub fn is_attached(&self) -> bool {
        self.bridge.is_attached()
    }

    /// Panel became visible: start listening to the model.
    pub fn on_enable(&mut self, model: &mut dyn ProjectModel) -> bool {
        self.bridge.attach(model)
    }

    /// Panel was hidden: stop listening to the model.
    pub fn on_disable(&mut self, model: &mut dyn ProjectModel) -> bool {
        self.bridge.detach(model)
    }

    /// Populate every slot from current model state, picking up operations
    /// that are already running.
    pub fn create_view(&mut self, model: &dyn ProjectModel) {
        debug!("SyncPanel: building view");
        if let Some(progress) = self.layout.progress.as_mut() {
            progress.clear();
            if model.is_syncing_any_container() {
                progress.rebuild_for_containers(model);
            }
            if model.is_fetching_project() {
                progress.rebuild_for_project(model);
            }
        }

        self.refresh_timestamp_label(model);
        self.refresh_locales(model);
        self.refresh_name_label(model);
        self.refresh_triggers(model);
    }

    /// Start a project fetch.
    ///
    /// Progress and button state are refreshed before returning, also when
    /// the model refuses the request.
    pub fn press_sync_project(&mut self, model: &mut dyn ProjectModel) -> Result<(), ModelError> {
        info!("SyncPanel: sync project pressed");
        let result = model.trigger_project_fetch();
        if let Err(e) = &result {
            warn!("SyncPanel: {}", e);
        }

        if let Some(progress) = self.layout.progress.as_mut() {
            progress.rebuild_for_project(model);
        }
        self.refresh_triggers(model);
        result
    }

    /// Start syncing every container.
    ///
    /// Progress and button state are refreshed before returning, also when
    /// the model refuses the request.
    pub fn press_sync_containers(&mut self, model: &mut dyn ProjectModel) -> Result<(), ModelError> {
        info!("SyncPanel: sync containers pressed");
        let result = model.trigger_container_sync();
        if let Err(e) = &result {
            warn!("SyncPanel: {}", e);
        }

        if let Some(progress) = self.layout.progress.as_mut() {
            progress.rebuild_for_containers(model);
        }
        self.refresh_triggers(model);
        result
    }

    /// Dispatch every notification queued since the last call.
    ///
    /// Returns the number of notifications handled.
    pub fn process_notifications(&mut self, model: &dyn ProjectModel) -> usize {
        let refreshes = self.bridge.drain();
        let count = refreshes.len();
        for refresh in refreshes {
            self.dispatch(refresh, model);
        }
        count
    }

    fn dispatch(&mut self, refresh: Refresh, model: &dyn ProjectModel) {
        match refresh {
            Refresh::ProjectUpdated => self.project_updated(model),
            Refresh::SyncButtons => {
                self.refresh_triggers(model);
            }
            Refresh::ContainerProgress { entity, handle } => {
                // Incremental: a rebuild here would drop siblings already shown
                if let Some(progress) = self.layout.progress.as_mut() {
                    progress.upsert(&entity, &handle);
                }
            }
        }
    }

    fn project_updated(&mut self, model: &dyn ProjectModel) {
        self.refresh_triggers(model);
        self.refresh_locales(model);
        self.refresh_timestamp_label(model);
        self.refresh_name_label(model);
    }

    pub fn refresh_triggers(&mut self, model: &dyn ProjectModel) -> bool {
        self.layout.triggers.refresh_enablement(model)
    }

    pub fn refresh_name_label(&mut self, model: &dyn ProjectModel) {
        fields::refresh_name_label(self.layout.name_label.as_mut(), model);
    }

    pub fn refresh_timestamp_label(&mut self, model: &dyn ProjectModel) {
        fields::refresh_timestamp_label(self.layout.timestamp_label.as_mut(), model);
    }

    pub fn refresh_locales(&mut self, model: &dyn ProjectModel) {
        fields::refresh_locales(self.layout.locales.as_mut(), model);
    }

    /// Apply a user edit of the locale field at `row`.
    ///
    /// Persisted fields write to model storage, the others write back into
    /// the locale binding. Without a locale list there is nothing to edit.
    pub fn edit_locale(
        &mut self,
        model: &mut dyn ProjectModel,
        row: usize,
        value: Option<LocaleRef>,
    ) -> Result<(), ModelError> {
        let Some(list) = self.layout.locales.as_mut() else {
            return Ok(());
        };
        let len = list.len();
        let field = list
            .field_mut(row)
            .ok_or(ModelError::LocaleIndexOutOfRange { index: row, len })?;

        match &field.binding {
            FieldBinding::Persisted(path) => model.set_property(path, value.clone())?,
            FieldBinding::WriteBack(index) => model.set_locale(*index, value.clone())?,
        }
        debug!("SyncPanel: locale '{}' set to {:?}", field.label, value);
        field.value = value;
        Ok(())
    }
}
