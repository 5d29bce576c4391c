//! Named presets
//!
//! A preset is a reusable, named sequence of layers. Config files pull them
//! in with `extends`; the loader expands each name into its layers ahead of
//! the declaring layer, so the resolver only ever sees an explicit list.

use crate::error::LintfoldError;
use crate::layer::ConfigLayer;
use crate::result::Result;
use std::collections::BTreeMap;

/// Caller-owned catalogue of presets
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: BTreeMap<String, Vec<ConfigLayer>>,
}

impl PresetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a preset, replacing any preset of the same name
    pub fn register(&mut self, name: impl Into<String>, layers: Vec<ConfigLayer>) -> &mut Self {
        let name = name.into();
        if self.presets.insert(name.clone(), layers).is_some() {
            tracing::debug!("Replaced preset '{}'", name);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&[ConfigLayer]> {
        self.presets.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Expand preset names into their layers, in order
    pub fn expand<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<ConfigLayer>> {
        let mut layers = Vec::new();
        for name in names {
            let name = name.as_ref();
            let preset = self.get(name).ok_or_else(|| {
                let known: Vec<_> = self.names().collect();
                LintfoldError::config_error(format!(
                    "unknown preset '{name}' (available: {})",
                    if known.is_empty() {
                        "none".to_string()
                    } else {
                        known.join(", ")
                    }
                ))
            })?;
            layers.extend(preset.iter().cloned());
        }
        Ok(layers)
    }
}
