//! Typed view slots the panel renders into.
//!
//! The host builds a [`PanelLayout`] with the slots it actually shows. Any slot
//! may be left out; the routines that would fill it skip their work.

use super::registry::ProgressRegistry;
use super::triggers::SyncTriggers;
use crate::constants::{SYNC_CONTAINERS_BUTTON, SYNC_PROJECT_BUTTON};
use crate::model::{LocaleRef, PropertyPath};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerButton {
    label: String,
    enabled: bool,
}

impl TriggerButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextLabel {
    text: String,
}

impl TextLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// Where an edit of a locale field is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldBinding {
    /// Bound to persisted model storage
    Persisted(PropertyPath),
    /// Written back into the project's locale binding at this index
    WriteBack(usize),
}

/// One reference field of the locale list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleField {
    pub label: String,
    pub value: Option<LocaleRef>,
    pub binding: FieldBinding,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocaleList {
    fields: Vec<LocaleField>,
}

impl LocaleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[LocaleField] {
        &self.fields
    }

    pub fn field_mut(&mut self, row: usize) -> Option<&mut LocaleField> {
        self.fields.get_mut(row)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn push(&mut self, field: LocaleField) {
        self.fields.push(field);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The panel's view slots.
#[derive(Default)]
pub struct PanelLayout {
    pub triggers: SyncTriggers,
    pub progress: Option<ProgressRegistry>,
    pub locales: Option<LocaleList>,
    pub name_label: Option<TextLabel>,
    pub timestamp_label: Option<TextLabel>,
}

impl PanelLayout {
    pub fn builder() -> PanelLayoutBuilder {
        PanelLayoutBuilder::default()
    }

    /// Layout with every slot present.
    pub fn complete(progress: ProgressRegistry) -> Self {
        Self::builder()
            .sync_project_button(TriggerButton::new(SYNC_PROJECT_BUTTON))
            .sync_containers_button(TriggerButton::new(SYNC_CONTAINERS_BUTTON))
            .progress_list(progress)
            .locale_list(LocaleList::new())
            .name_label(TextLabel::new())
            .timestamp_label(TextLabel::new())
            .build()
    }
}

#[derive(Default)]
pub struct PanelLayoutBuilder {
    sync_project_button: Option<TriggerButton>,
    sync_containers_button: Option<TriggerButton>,
    progress: Option<ProgressRegistry>,
    locales: Option<LocaleList>,
    name_label: Option<TextLabel>,
    timestamp_label: Option<TextLabel>,
}

impl PanelLayoutBuilder {
    pub fn sync_project_button(mut self, button: TriggerButton) -> Self {
        self.sync_project_button = Some(button);
        self
    }

    pub fn sync_containers_button(mut self, button: TriggerButton) -> Self {
        self.sync_containers_button = Some(button);
        self
    }

    pub fn progress_list(mut self, registry: ProgressRegistry) -> Self {
        self.progress = Some(registry);
        self
    }

    pub fn locale_list(mut self, list: LocaleList) -> Self {
        self.locales = Some(list);
        self
    }

    pub fn name_label(mut self, label: TextLabel) -> Self {
        self.name_label = Some(label);
        self
    }

    pub fn timestamp_label(mut self, label: TextLabel) -> Self {
        self.timestamp_label = Some(label);
        self
    }

    pub fn build(self) -> PanelLayout {
        PanelLayout {
            triggers: SyncTriggers::new(self.sync_project_button, self.sync_containers_button),
            progress: self.progress,
            locales: self.locales,
            name_label: self.name_label,
            timestamp_label: self.timestamp_label,
        }
    }
}
