//! Label and locale-list renders. Each one rebuilds its slot from the model
//! and can be called any number of times.

use super::layout::{FieldBinding, LocaleField, LocaleList, TextLabel};
use crate::constants::{NAME_LABEL_PLACEHOLDER, NAME_LABEL_PREFIX, TIMESTAMP_LABEL_PREFIX};
use crate::model::ProjectModel;

pub fn name_text(tag: &str) -> String {
    if tag.trim().is_empty() {
        NAME_LABEL_PLACEHOLDER.to_string()
    } else {
        format!("{NAME_LABEL_PREFIX}{tag}")
    }
}

pub fn timestamp_text(timestamp: &str) -> String {
    if timestamp.trim().is_empty() {
        String::new()
    } else {
        format!("{TIMESTAMP_LABEL_PREFIX}{timestamp}")
    }
}

pub fn refresh_name_label(label: Option<&mut TextLabel>, model: &dyn ProjectModel) {
    if let Some(label) = label {
        label.set_text(name_text(&model.project_tag()));
    }
}

pub fn refresh_timestamp_label(label: Option<&mut TextLabel>, model: &dyn ProjectModel) {
    if let Some(label) = label {
        label.set_text(timestamp_text(&model.last_sync_timestamp()));
    }
}

/// One field per locale binding, bound to persisted storage where the model
/// has it and writing back into the binding otherwise.
pub fn refresh_locales(list: Option<&mut LocaleList>, model: &dyn ProjectModel) {
    let Some(list) = list else {
        return;
    };

    list.clear();
    for (index, binding) in model.locale_bindings().into_iter().enumerate() {
        let binding_target = match model.locale_property(index) {
            Some(path) => FieldBinding::Persisted(path),
            None => FieldBinding::WriteBack(index),
        };
        list.push(LocaleField {
            label: binding.code().to_string(),
            value: binding.locale().cloned(),
            binding: binding_target,
        });
    }
}
