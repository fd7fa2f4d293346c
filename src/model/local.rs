//! In-process project model.
//!
//! Operations run as tokio tasks that advance their [`OperationHandle`] in
//! steps. Completion is reported over a channel and only applied to the model
//! when the UI loop calls [`LocalProject::process_background_events`], so
//! model state and notifications change on the UI context only.

use super::asset::{ContainerAsset, ProjectAsset};
use super::{
    ContainerId, ContainerRef, EventSink, Listeners, LocaleBinding, LocaleRef, ModelError, ModelEvent,
    OperationHandle, ProjectModel, PropertyPath, SubscriptionId, Topic,
};
use crate::config::Config;
use crate::utils::datetime;
use log::{debug, error, info, warn};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::time::Duration;

/// How simulated operations behave.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub step: Duration,
    pub progress_step: f32,
    /// Probability in [0, 1] that an operation fails on top of per-container flags
    pub failure_rate: f64,
    /// Tag given to a project that had none when its first fetch succeeds
    pub default_tag: String,
    pub timestamp_format: String,
    /// Where persisted locale edits are written back; `None` keeps them in memory
    pub asset_path: Option<PathBuf>,
}

impl Simulation {
    pub fn from_config(config: &Config) -> Self {
        Self {
            step: Duration::from_millis(config.simulation.step_ms),
            progress_step: config.simulation.progress_step,
            failure_rate: config.simulation.failure_rate,
            default_tag: config.simulation.default_tag.clone(),
            timestamp_format: config.display.timestamp_format.clone(),
            asset_path: config.simulation.asset_path.clone(),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug)]
enum Completion {
    Project { success: bool },
    Container { id: ContainerId, success: bool },
}

struct LocalContainer {
    id: ContainerId,
    name: String,
    fail: bool,
    operation: Option<OperationHandle>,
}

impl LocalContainer {
    fn snapshot(&self) -> ContainerRef {
        ContainerRef {
            id: self.id,
            name: self.name.clone(),
            operation: self.operation.clone(),
        }
    }
}

struct LocalLocale {
    binding: LocaleBinding,
    persisted: bool,
}

pub struct LocalProject {
    tag: String,
    last_sync: String,
    locales: Vec<LocalLocale>,
    containers: Vec<LocalContainer>,
    available_locales: Vec<LocaleRef>,
    update_operation: Option<OperationHandle>,
    is_fetching: bool,
    listeners: Listeners,
    simulation: Simulation,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl LocalProject {
    pub fn new(asset: ProjectAsset, simulation: Simulation) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        let locales = asset
            .locales
            .into_iter()
            .map(|entry| LocalLocale {
                binding: LocaleBinding::new(entry.code, entry.locale),
                persisted: entry.persisted,
            })
            .collect();

        let containers = asset
            .containers
            .into_iter()
            .map(|ContainerAsset { name, fail }| LocalContainer {
                id: ContainerId::new(),
                name,
                fail,
                operation: None,
            })
            .collect();

        Self {
            tag: asset.tag,
            last_sync: asset.last_sync,
            locales,
            containers,
            available_locales: asset.available_locales,
            update_operation: None,
            is_fetching: false,
            listeners: Listeners::new(),
            simulation,
            completion_tx,
            completion_rx,
        }
    }

    /// Locale assets a binding may point at.
    pub fn available_locales(&self) -> &[LocaleRef] {
        &self.available_locales
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Rebuild the asset that describes the current state.
    pub fn to_asset(&self) -> ProjectAsset {
        ProjectAsset {
            tag: self.tag.clone(),
            last_sync: self.last_sync.clone(),
            locales: self
                .locales
                .iter()
                .map(|locale| super::asset::LocaleEntry {
                    code: locale.binding.code().to_string(),
                    locale: locale.binding.locale().cloned(),
                    persisted: locale.persisted,
                })
                .collect(),
            containers: self
                .containers
                .iter()
                .map(|container| ContainerAsset {
                    name: container.name.clone(),
                    fail: container.fail,
                })
                .collect(),
            available_locales: self.available_locales.clone(),
        }
    }

    /// Apply completions reported by background operations and publish the
    /// matching notifications. Call once per UI tick.
    ///
    /// Returns the number of completions applied.
    pub fn process_background_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            debug!("LocalProject: applying {:?}", completion);
            match completion {
                Completion::Project { success } => self.complete_project_fetch(success),
                Completion::Container { id, success } => self.complete_container_sync(id, success),
            }
            applied += 1;
        }
        applied
    }

    fn complete_project_fetch(&mut self, success: bool) {
        self.update_operation = None;
        self.is_fetching = false;

        if success {
            if self.tag.is_empty() {
                self.tag = self.simulation.default_tag.clone();
            }
            self.last_sync = datetime::format_now(&self.simulation.timestamp_format);
            info!("LocalProject: project '{}' fetched at {}", self.tag, self.last_sync);
        } else {
            warn!("LocalProject: project fetch failed");
        }

        self.listeners.publish(ModelEvent::ProjectUpdateFinished);
    }

    fn complete_container_sync(&mut self, id: ContainerId, success: bool) {
        let Some(container) = self.containers.iter_mut().find(|container| container.id == id) else {
            warn!("LocalProject: completion for unknown container {}", id);
            return;
        };
        container.operation = None;
        if success {
            info!("LocalProject: container '{}' synced", container.name);
        } else {
            warn!("LocalProject: container '{}' failed to sync", container.name);
        }

        if !self.is_syncing_any_container() {
            info!("LocalProject: all container syncs finished");
            self.listeners.publish(ModelEvent::AllContainerSyncFinished);
        }
    }

    fn roll_failure(&self) -> bool {
        self.simulation.failure_rate > 0.0 && rand::random::<f64>() < self.simulation.failure_rate
    }

    fn spawn_operation(&self, handle: OperationHandle, fail: bool, completion: Completion) {
        let tx = self.completion_tx.clone();
        let step = self.simulation.step;
        let progress_step = self.simulation.progress_step;

        tokio::spawn(async move {
            let mut progress = 0.0f32;
            loop {
                tokio::time::sleep(step).await;
                progress = (progress + progress_step).min(1.0);
                // A failing operation gives up halfway through
                if fail && progress >= 0.5 {
                    handle.finish(false);
                    break;
                }
                handle.set_progress(progress);
                if progress >= 1.0 {
                    handle.finish(true);
                    break;
                }
            }
            if tx.send(completion).is_err() {
                error!("LocalProject: model dropped before operation {} completed", handle.id());
            }
        });
    }

    fn persist(&self) -> Result<(), ModelError> {
        let Some(path) = &self.simulation.asset_path else {
            return Ok(());
        };
        let mut asset = self.to_asset();
        asset.locales.retain(|entry| entry.persisted);
        asset.save(path).map_err(|e| ModelError::Persist(e.to_string()))?;
        debug!("LocalProject: saved asset to {}", path.display());
        Ok(())
    }
}

impl ProjectModel for LocalProject {
    fn is_fetching_project(&self) -> bool {
        self.is_fetching
    }

    fn is_syncing_any_container(&self) -> bool {
        self.containers.iter().any(|container| container.operation.is_some())
    }

    fn update_operation(&self) -> Option<OperationHandle> {
        self.update_operation.clone()
    }

    fn syncing_containers(&self) -> Vec<ContainerRef> {
        self.containers
            .iter()
            .filter(|container| container.operation.is_some())
            .map(LocalContainer::snapshot)
            .collect()
    }

    fn project_tag(&self) -> String {
        self.tag.clone()
    }

    fn last_sync_timestamp(&self) -> String {
        self.last_sync.clone()
    }

    fn locale_bindings(&self) -> Vec<LocaleBinding> {
        self.locales.iter().map(|locale| locale.binding.clone()).collect()
    }

    fn locale_property(&self, index: usize) -> Option<PropertyPath> {
        self.locales
            .get(index)
            .filter(|locale| locale.persisted)
            .map(|_| PropertyPath::locale_at(index))
    }

    fn set_locale(&mut self, index: usize, locale: Option<LocaleRef>) -> Result<(), ModelError> {
        let len = self.locales.len();
        let entry = self
            .locales
            .get_mut(index)
            .ok_or(ModelError::LocaleIndexOutOfRange { index, len })?;
        debug!("LocalProject: locale '{}' -> {:?}", entry.binding.code(), locale);
        entry.binding.set_locale(locale);
        Ok(())
    }

    fn set_property(&mut self, path: &PropertyPath, locale: Option<LocaleRef>) -> Result<(), ModelError> {
        let index = path
            .locale_index()
            .filter(|index| self.locales.get(*index).is_some_and(|locale| locale.persisted))
            .ok_or_else(|| ModelError::UnknownProperty(path.to_string()))?;

        let previous = self.locales[index].binding.locale().cloned();
        self.set_locale(index, locale)?;
        if let Err(e) = self.persist() {
            // Keep memory and disk in agreement
            self.locales[index].binding.set_locale(previous);
            return Err(e);
        }
        Ok(())
    }

    fn trigger_project_fetch(&mut self) -> Result<(), ModelError> {
        if self.is_fetching || self.is_syncing_any_container() {
            warn!("LocalProject: project fetch requested while busy, ignoring");
            return Err(ModelError::Busy("project fetch"));
        }

        let handle = OperationHandle::new();
        info!("LocalProject: starting project fetch {}", handle.id());
        self.update_operation = Some(handle.clone());
        self.is_fetching = true;

        let fail = self.roll_failure();
        self.spawn_operation(handle, fail, Completion::Project { success: !fail });
        Ok(())
    }

    fn trigger_container_sync(&mut self) -> Result<(), ModelError> {
        if self.is_fetching || self.is_syncing_any_container() {
            warn!("LocalProject: container sync requested while busy, ignoring");
            return Err(ModelError::Busy("container sync"));
        }
        if self.containers.is_empty() {
            info!("LocalProject: no containers to sync");
            return Ok(());
        }

        let mut requested = Vec::with_capacity(self.containers.len());
        for index in 0..self.containers.len() {
            let fail = self.containers[index].fail || self.roll_failure();
            let container = &mut self.containers[index];
            let handle = OperationHandle::new();
            container.operation = Some(handle.clone());
            info!("LocalProject: syncing container '{}' ({})", container.name, handle.id());
            requested.push((container.snapshot(), handle, fail));
        }

        for (container, handle, fail) in requested {
            self.spawn_operation(
                handle.clone(),
                fail,
                Completion::Container {
                    id: container.id,
                    success: !fail,
                },
            );
            self.listeners
                .publish(ModelEvent::ContainerSyncRequested { container, handle });
        }
        Ok(())
    }

    fn subscribe(&mut self, topic: Topic, sink: EventSink) -> SubscriptionId {
        self.listeners.subscribe(topic, sink)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}
