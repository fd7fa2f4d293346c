#![allow(dead_code)]

use std::rc::Rc;
use std::time::Duration;
use syncpanel::model::{
    ContainerId, ContainerRef, EventSink, Listeners, LocaleBinding, LocaleRef, ModelError, ModelEvent,
    OperationHandle, ProjectModel, PropertyPath, SubscriptionId, Topic,
};
use syncpanel::panel::{IndicatorFactory, PanelLayout, ProgressRegistry, SyncPanel, TickScheduler};

pub const POLL: Duration = Duration::from_millis(100);

/// Hand-driven model: tests flip its state directly and finish operations
/// when they choose to.
#[derive(Default)]
pub struct FakeProject {
    pub fetching: bool,
    pub update_operation: Option<OperationHandle>,
    pub containers: Vec<ContainerRef>,
    pub tag: String,
    pub last_sync: String,
    pub locales: Vec<LocaleBinding>,
    /// Indices backed by persisted storage
    pub persisted: Vec<usize>,
    pub property_writes: Vec<(PropertyPath, Option<LocaleRef>)>,
    pub listeners: Listeners,
    pub subscribe_calls: usize,
    pub unsubscribe_calls: usize,
}

impl FakeProject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_containers(names: &[&str]) -> Self {
        let mut project = Self::new();
        project.containers = names
            .iter()
            .map(|name| ContainerRef {
                id: ContainerId::new(),
                name: name.to_string(),
                operation: None,
            })
            .collect();
        project
    }

    pub fn with_locales(codes: &[&str], persisted: &[usize]) -> Self {
        let mut project = Self::new();
        project.locales = codes.iter().map(|code| LocaleBinding::new(*code, None)).collect();
        project.persisted = persisted.to_vec();
        project
    }

    pub fn container_handle(&self, index: usize) -> Option<OperationHandle> {
        self.containers[index].operation.clone()
    }

    /// Finish the running fetch and notify, as a completion callback would.
    pub fn finish_fetch(&mut self, success: bool) {
        if let Some(handle) = self.update_operation.take() {
            handle.finish(success);
        }
        self.fetching = false;
        self.listeners.publish(ModelEvent::ProjectUpdateFinished);
    }

    /// Finish one container's sync; notifies once the last one is done.
    pub fn finish_container(&mut self, index: usize, success: bool) {
        if let Some(handle) = self.containers[index].operation.take() {
            handle.finish(success);
        }
        if !self.is_syncing_any_container() {
            self.listeners.publish(ModelEvent::AllContainerSyncFinished);
        }
    }

    pub fn active_subscriptions(&self) -> usize {
        self.listeners.len()
    }
}

impl ProjectModel for FakeProject {
    fn is_fetching_project(&self) -> bool {
        self.fetching
    }

    fn is_syncing_any_container(&self) -> bool {
        self.containers.iter().any(|c| c.operation.is_some())
    }

    fn update_operation(&self) -> Option<OperationHandle> {
        self.update_operation.clone()
    }

    fn syncing_containers(&self) -> Vec<ContainerRef> {
        self.containers.iter().filter(|c| c.operation.is_some()).cloned().collect()
    }

    fn project_tag(&self) -> String {
        self.tag.clone()
    }

    fn last_sync_timestamp(&self) -> String {
        self.last_sync.clone()
    }

    fn locale_bindings(&self) -> Vec<LocaleBinding> {
        self.locales.clone()
    }

    fn locale_property(&self, index: usize) -> Option<PropertyPath> {
        self.persisted.contains(&index).then(|| PropertyPath::locale_at(index))
    }

    fn set_locale(&mut self, index: usize, locale: Option<LocaleRef>) -> Result<(), ModelError> {
        let len = self.locales.len();
        let binding = self
            .locales
            .get_mut(index)
            .ok_or(ModelError::LocaleIndexOutOfRange { index, len })?;
        binding.set_locale(locale);
        Ok(())
    }

    fn set_property(&mut self, path: &PropertyPath, locale: Option<LocaleRef>) -> Result<(), ModelError> {
        let index = path
            .locale_index()
            .ok_or_else(|| ModelError::UnknownProperty(path.to_string()))?;
        self.set_locale(index, locale.clone())?;
        self.property_writes.push((path.clone(), locale));
        Ok(())
    }

    fn trigger_project_fetch(&mut self) -> Result<(), ModelError> {
        if self.fetching || self.is_syncing_any_container() {
            return Err(ModelError::Busy("project fetch"));
        }
        self.fetching = true;
        self.update_operation = Some(OperationHandle::new());
        Ok(())
    }

    fn trigger_container_sync(&mut self) -> Result<(), ModelError> {
        if self.fetching || self.is_syncing_any_container() {
            return Err(ModelError::Busy("container sync"));
        }
        for index in 0..self.containers.len() {
            let handle = OperationHandle::new();
            self.containers[index].operation = Some(handle.clone());
            let container = self.containers[index].clone();
            self.listeners.publish(ModelEvent::ContainerSyncRequested { container, handle });
        }
        Ok(())
    }

    fn subscribe(&mut self, topic: Topic, sink: EventSink) -> SubscriptionId {
        self.subscribe_calls += 1;
        self.listeners.subscribe(topic, sink)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.unsubscribe_calls += 1;
        self.listeners.unsubscribe(id)
    }
}

pub fn scheduler() -> Rc<TickScheduler> {
    Rc::new(TickScheduler::new())
}

pub fn factory(scheduler: &Rc<TickScheduler>) -> IndicatorFactory {
    IndicatorFactory::new(scheduler.clone(), POLL)
}

pub fn registry(scheduler: &Rc<TickScheduler>) -> ProgressRegistry {
    ProgressRegistry::new(factory(scheduler))
}

/// Panel with every slot present.
pub fn complete_panel(scheduler: &Rc<TickScheduler>) -> SyncPanel {
    SyncPanel::new(PanelLayout::complete(registry(scheduler)))
}

/// Titles of the displayed indicators, in display order.
pub fn titles(panel: &SyncPanel) -> Vec<String> {
    panel
        .layout()
        .progress
        .as_ref()
        .map(|registry| registry.iter().map(|(_, i)| i.view().title().to_string()).collect())
        .unwrap_or_default()
}
