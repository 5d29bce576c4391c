//! Layered configuration resolution
//!
//! Resolution is a single fold over the layers, lowest precedence first:
//! 1. the layer's plugin bindings join the namespaces seen so far
//! 2. each rule entry is validated (severity, then plugin namespace) and
//!    replaces any earlier setting for the same rule
//! 3. the layer's ignore patterns join the ignore set
//!
//! The first error aborts resolution; no partial configuration escapes.

use crate::effective::EffectiveConfig;
use crate::error::LintfoldError;
use crate::layer::ConfigLayer;
use crate::plugin::RuleProvider;
use crate::rule::{RuleEntry, RuleSetting};
use crate::result::Result;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Options controlling how strictly layers are validated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Reject namespaced rules their plugin does not provide
    pub strict_rules: bool,
}

impl ResolverOptions {
    pub fn strict() -> Self {
        Self { strict_rules: true }
    }
}

/// Merges ordered configuration layers into one [`EffectiveConfig`]
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    options: ResolverOptions,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    /// Resolve layers ordered from lowest to highest precedence
    pub fn resolve(&self, layers: &[ConfigLayer]) -> Result<EffectiveConfig> {
        if layers.is_empty() {
            return Err(LintfoldError::NoLayers);
        }

        let mut bindings: BTreeMap<String, Arc<dyn RuleProvider>> = BTreeMap::new();
        let mut config = EffectiveConfig::default();

        for (layer_index, layer) in layers.iter().enumerate() {
            debug!(
                "Resolving layer {}: {} rules, {} ignores, {} plugins",
                layer.label(layer_index),
                layer.rule_entries().len(),
                layer.ignore_patterns().len(),
                layer.plugin_bindings().len()
            );

            Self::bind_plugins(&mut bindings, layer, layer_index)?;

            for entry in layer.rule_entries() {
                let setting = self.validate_entry(entry, &bindings, layer_index)?;
                if let Some(previous) = config.rules.insert(entry.id.clone(), setting) {
                    trace!(
                        "Layer {} overrides '{}' (was {})",
                        layer_index, entry.id, previous.severity
                    );
                }
            }

            for pattern in layer.ignore_patterns() {
                config.ignores.insert(pattern, layer_index)?;
            }
        }

        config.plugins = bindings.into_keys().collect();
        debug!(
            "Resolved {} layers into {} rules and {} ignore patterns",
            layers.len(),
            config.rule_count(),
            config.ignores.len()
        );
        Ok(config)
    }

    fn bind_plugins(
        bindings: &mut BTreeMap<String, Arc<dyn RuleProvider>>,
        layer: &ConfigLayer,
        layer_index: usize,
    ) -> Result<()> {
        for (namespace, provider) in layer.plugin_bindings() {
            match bindings.get(namespace) {
                Some(existing) if Arc::ptr_eq(existing, provider) => {}
                Some(_) => return Err(LintfoldError::plugin_conflict(namespace, layer_index)),
                None => {
                    trace!("Layer {} registers plugin '{}'", layer_index, namespace);
                    bindings.insert(namespace.clone(), Arc::clone(provider));
                }
            }
        }
        Ok(())
    }

    fn validate_entry(
        &self,
        entry: &RuleEntry,
        bindings: &BTreeMap<String, Arc<dyn RuleProvider>>,
        layer_index: usize,
    ) -> Result<RuleSetting> {
        let severity = entry.parse_severity().ok_or_else(|| {
            LintfoldError::malformed_severity(
                entry.id.as_str(),
                layer_index,
                entry.severity.to_string(),
            )
        })?;

        if let Some(namespace) = entry.id.namespace() {
            let provider = bindings
                .get(namespace)
                .ok_or_else(|| LintfoldError::unknown_plugin(entry.id.as_str(), layer_index))?;

            if self.options.strict_rules && !provider.has_rule(entry.id.name()) {
                return Err(LintfoldError::unknown_rule(entry.id.as_str(), layer_index));
            }
        }

        if !severity.is_enabled() && !entry.options.is_empty() {
            warn!(
                "Rule '{}' is turned off in layer {} but carries options",
                entry.id, layer_index
            );
        }

        Ok(RuleSetting {
            id: entry.id.clone(),
            severity,
            options: entry.options.clone(),
        })
    }
}

/// Resolve with default options
pub fn resolve(layers: &[ConfigLayer]) -> Result<EffectiveConfig> {
    ConfigResolver::new().resolve(layers)
}
