//! Which tracked entity owns which progress indicator.

use super::indicator::{Indicator, IndicatorFactory};
use crate::constants::{CONTAINER_PROGRESS_PREFIX, PROJECT_PROGRESS_TITLE};
use crate::model::{ContainerId, ContainerRef, OperationHandle, ProjectModel};
use indexmap::IndexMap;
use log::debug;

/// Registry key. The project is a singleton; containers are keyed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Project,
    Container(ContainerId),
}

/// Something whose operation can be tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackedEntity {
    Project,
    Container { id: ContainerId, name: String },
}

impl TrackedEntity {
    pub fn key(&self) -> EntityKey {
        match self {
            TrackedEntity::Project => EntityKey::Project,
            TrackedEntity::Container { id, .. } => EntityKey::Container(*id),
        }
    }

    /// Title shown on the entity's indicator.
    pub fn label(&self) -> String {
        match self {
            TrackedEntity::Project => PROJECT_PROGRESS_TITLE.to_string(),
            TrackedEntity::Container { name, .. } => format!("{CONTAINER_PROGRESS_PREFIX}{name}"),
        }
    }
}

impl From<&ContainerRef> for TrackedEntity {
    fn from(container: &ContainerRef) -> Self {
        TrackedEntity::Container {
            id: container.id,
            name: container.name.clone(),
        }
    }
}

/// Displayed indicators, at most one per entity, in display order.
pub struct ProgressRegistry {
    factory: IndicatorFactory,
    indicators: IndexMap<EntityKey, Indicator>,
}

impl ProgressRegistry {
    pub fn new(factory: IndicatorFactory) -> Self {
        Self {
            factory,
            indicators: IndexMap::new(),
        }
    }

    /// Remove every displayed indicator.
    pub fn clear(&mut self) {
        if !self.indicators.is_empty() {
            debug!("ProgressRegistry: clearing {} indicators", self.indicators.len());
        }
        self.indicators.clear();
    }

    /// Show an indicator for `entity` unless it already has one.
    ///
    /// Returns `true` if an indicator was added.
    pub fn upsert(&mut self, entity: &TrackedEntity, handle: &OperationHandle) -> bool {
        let key = entity.key();
        if self.indicators.contains_key(&key) {
            return false;
        }

        let indicator = self.factory.create(handle);
        indicator.set_title(entity.label());
        debug!("ProgressRegistry: added '{}'", entity.label());
        self.indicators.insert(key, indicator);
        true
    }

    /// Replace the display with the running project update, if any.
    ///
    /// Does nothing while the project is not fetching. Returns whether the
    /// rebuild ran.
    pub fn rebuild_for_project(&mut self, model: &dyn ProjectModel) -> bool {
        if !model.is_fetching_project() {
            return false;
        }

        self.clear();
        match model.update_operation() {
            Some(handle) => {
                self.upsert(&TrackedEntity::Project, &handle);
            }
            None => debug!("ProgressRegistry: project fetching without a handle yet"),
        }
        true
    }

    /// Replace the display with one indicator per syncing container.
    ///
    /// Does nothing while no container is syncing. Returns whether the
    /// rebuild ran.
    pub fn rebuild_for_containers(&mut self, model: &dyn ProjectModel) -> bool {
        if !model.is_syncing_any_container() {
            return false;
        }

        self.clear();
        for container in model.syncing_containers() {
            match &container.operation {
                Some(handle) => {
                    self.upsert(&TrackedEntity::from(&container), handle);
                }
                None => debug!("ProgressRegistry: container '{}' syncing without a handle", container.name),
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn get(&self, key: &EntityKey) -> Option<&Indicator> {
        self.indicators.get(key)
    }

    /// Indicators in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &Indicator)> {
        self.indicators.iter()
    }
}
