//! Configuration layers

use crate::plugin::RuleProvider;
use crate::rule::{RuleEntry, RuleId, Severity};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One source of configuration: rule entries, ignore patterns and plugin bindings
///
/// Layers are assembled once (by hand or by the config loader) and are
/// only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ConfigLayer {
    name: Option<String>,
    rules: Vec<RuleEntry>,
    ignores: Vec<String>,
    plugins: BTreeMap<String, Arc<dyn RuleProvider>>,
}

impl ConfigLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer with a display name used in logs and CLI output
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set a rule to a severity
    pub fn rule(mut self, id: impl Into<RuleId>, severity: Severity) -> Self {
        self.rules.push(RuleEntry::new(id, severity));
        self
    }

    /// Set a rule from a raw declarative value (`"warn"`, `2`, `["error", {...}]`)
    pub fn rule_value(mut self, id: impl Into<RuleId>, value: Value) -> Self {
        self.rules.push(RuleEntry::from_value(id, value));
        self
    }

    pub fn entry(mut self, entry: RuleEntry) -> Self {
        self.rules.push(entry);
        self
    }

    pub fn ignore(mut self, pattern: impl Into<String>) -> Self {
        self.ignores.push(pattern.into());
        self
    }

    pub fn ignores<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignores.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Bind a provider under its own namespace
    pub fn plugin(self, provider: Arc<dyn RuleProvider>) -> Self {
        let namespace = provider.namespace().to_string();
        self.plugin_as(namespace, provider)
    }

    /// Bind a provider under an explicit namespace
    pub fn plugin_as(mut self, namespace: impl Into<String>, provider: Arc<dyn RuleProvider>) -> Self {
        self.plugins.insert(namespace.into(), provider);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn rule_entries(&self) -> &[RuleEntry] {
        &self.rules
    }

    pub fn ignore_patterns(&self) -> &[String] {
        &self.ignores
    }

    pub fn plugin_bindings(&self) -> &BTreeMap<String, Arc<dyn RuleProvider>> {
        &self.plugins
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.ignores.is_empty() && self.plugins.is_empty()
    }

    /// Label for messages: the name if there is one, otherwise the index
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => format!("#{index} ({name})"),
            None => format!("#{index}"),
        }
    }
}
