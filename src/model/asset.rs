//! On-disk project definition.
//!
//! A project asset is what the model is populated from: the synced tag and
//! timestamp (empty until the first sync), the locale table, the containers
//! and the locale assets a binding can point at.

use super::LocaleRef;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Failed to read project asset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write project asset {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse project asset {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize project asset: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectAsset {
    pub tag: String,
    pub last_sync: String,
    pub locales: Vec<LocaleEntry>,
    pub containers: Vec<ContainerAsset>,
    /// Locale assets available for binding
    pub available_locales: Vec<LocaleRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleEntry {
    pub code: String,
    #[serde(default)]
    pub locale: Option<LocaleRef>,
    /// Whether the entry is stored in the asset file. Entries that are not
    /// only live in memory for the session.
    #[serde(default = "default_persisted")]
    pub persisted: bool,
}

fn default_persisted() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerAsset {
    pub name: String,
    /// Force this container's sync to fail
    #[serde(default)]
    pub fail: bool,
}

impl ProjectAsset {
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let content = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| AssetError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), AssetError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| AssetError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Built-in project used when no asset file is configured.
    pub fn sample() -> Self {
        let english = LocaleRef::new("en", "English");
        let french = LocaleRef::new("fr", "French");
        let german = LocaleRef::new("de", "German");
        let japanese = LocaleRef::new("ja", "Japanese");

        Self {
            tag: String::new(),
            last_sync: String::new(),
            locales: vec![
                LocaleEntry {
                    code: "en".to_string(),
                    locale: Some(english.clone()),
                    persisted: true,
                },
                LocaleEntry {
                    code: "fr".to_string(),
                    locale: Some(french.clone()),
                    persisted: true,
                },
                LocaleEntry {
                    code: "de".to_string(),
                    locale: None,
                    persisted: true,
                },
                LocaleEntry {
                    code: "ja".to_string(),
                    locale: None,
                    persisted: false,
                },
            ],
            containers: vec![
                ContainerAsset {
                    name: "UI Strings".to_string(),
                    fail: false,
                },
                ContainerAsset {
                    name: "Dialogue".to_string(),
                    fail: false,
                },
                ContainerAsset {
                    name: "Item Descriptions".to_string(),
                    fail: true,
                },
            ],
            available_locales: vec![english, french, german, japanese],
        }
    }
}
