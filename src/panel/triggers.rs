use super::layout::TriggerButton;
use crate::model::ProjectModel;
use log::info;

/// Enables the trigger buttons exactly when nothing is running.
///
/// State is always read back from the model, never tracked locally, so
/// operations started outside the panel disable the buttons too.
#[derive(Debug, Default)]
pub struct SyncTriggers {
    project: Option<TriggerButton>,
    containers: Option<TriggerButton>,
    /// Last state applied, `None` before the first refresh
    applied: Option<bool>,
    transitions: usize,
}

impl SyncTriggers {
    pub fn new(project: Option<TriggerButton>, containers: Option<TriggerButton>) -> Self {
        Self {
            project,
            containers,
            applied: None,
            transitions: 0,
        }
    }

    pub fn project_button(&self) -> Option<&TriggerButton> {
        self.project.as_ref()
    }

    pub fn containers_button(&self) -> Option<&TriggerButton> {
        self.containers.as_ref()
    }

    /// Disable both buttons while the project fetches or any container syncs,
    /// enable them otherwise. Returns the enabled state applied.
    pub fn refresh_enablement(&mut self, model: &dyn ProjectModel) -> bool {
        let enabled = !(model.is_fetching_project() || model.is_syncing_any_container());

        for button in [self.project.as_mut(), self.containers.as_mut()].into_iter().flatten() {
            button.set_enabled(enabled);
        }

        if self.applied != Some(enabled) {
            if self.applied.is_some() {
                self.transitions += 1;
            }
            info!("SyncTriggers: buttons {}", if enabled { "enabled" } else { "disabled" });
            self.applied = Some(enabled);
        }
        enabled
    }

    /// Enabled state from the last refresh.
    pub fn is_enabled(&self) -> Option<bool> {
        self.applied
    }

    /// How many times the applied state flipped since construction.
    pub fn transition_count(&self) -> usize {
        self.transitions
    }
}
