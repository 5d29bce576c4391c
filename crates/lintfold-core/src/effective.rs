//! The effective configuration produced by resolution

use crate::ignore::IgnoreSet;
use crate::rule::{RuleId, RuleSetting, Severity};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Final merged configuration used to drive a lint run
///
/// Every collection is sorted, so two configs resolved from the same layers
/// serialize to identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EffectiveConfig {
    pub(crate) rules: BTreeMap<RuleId, RuleSetting>,
    pub(crate) ignores: IgnoreSet,
    pub(crate) plugins: BTreeSet<String>,
}

impl EffectiveConfig {
    /// Severity of a rule, `Off` for rules that were never configured
    pub fn severity_of(&self, rule_id: &str) -> Severity {
        self.setting(rule_id)
            .map(|setting| setting.severity)
            .unwrap_or(Severity::Off)
    }

    /// Whether a path matches any ignore pattern from any layer
    pub fn is_ignored(&self, path: impl AsRef<Path>) -> bool {
        self.ignores.is_ignored(path)
    }

    /// The pattern responsible for ignoring a path
    pub fn ignored_by(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.ignores.matching(path)
    }

    pub fn setting(&self, rule_id: &str) -> Option<&RuleSetting> {
        self.rules.get(&RuleId::new(rule_id))
    }

    /// Options of a configured rule, empty when absent
    pub fn options_of(&self, rule_id: &str) -> &[Value] {
        self.setting(rule_id)
            .map(|setting| setting.options.as_slice())
            .unwrap_or_default()
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleSetting> {
        self.rules.values()
    }

    /// Rules whose severity is above `off`
    pub fn enabled_rules(&self) -> impl Iterator<Item = &RuleSetting> {
        self.rules
            .values()
            .filter(|setting| setting.severity.is_enabled())
    }

    pub fn ignores(&self) -> &IgnoreSet {
        &self.ignores
    }

    /// Plugin namespaces registered by any layer
    pub fn plugins(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(String::as_str)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Count of configured rules per severity
    pub fn severity_counts(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for setting in self.rules.values() {
            *counts.entry(setting.severity).or_insert(0) += 1;
        }
        counts
    }
}
