//! Plugin rule providers and the explicit plugin registry

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Capability exposing the rules a plugin implements
///
/// Providers are registered explicitly, by binding them in a layer, before
/// any rule in their namespace may be configured.
pub trait RuleProvider: Send + Sync {
    /// Default namespace the plugin's rules live under
    fn namespace(&self) -> &str;

    /// Names of the rules the plugin implements, without the namespace
    fn rules(&self) -> BTreeSet<String>;

    fn has_rule(&self, name: &str) -> bool {
        self.rules().contains(name)
    }
}

impl fmt::Debug for dyn RuleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleProvider")
            .field("namespace", &self.namespace())
            .finish_non_exhaustive()
    }
}

/// Provider backed by a fixed list of rule names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRuleProvider {
    namespace: String,
    rules: BTreeSet<String>,
}

impl StaticRuleProvider {
    pub fn new<I, S>(namespace: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespace: namespace.into(),
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }
}

impl RuleProvider for StaticRuleProvider {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn rules(&self) -> BTreeSet<String> {
        self.rules.clone()
    }

    fn has_rule(&self, name: &str) -> bool {
        self.rules.contains(name)
    }
}

/// Caller-owned mapping from plugin name to provider
///
/// Config files refer to plugins by name; the loader turns those names into
/// provider handles through a registry handed to it. Nothing is registered
/// implicitly.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    providers: BTreeMap<String, Arc<dyn RuleProvider>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own namespace, replacing any previous one
    pub fn register(&mut self, provider: Arc<dyn RuleProvider>) -> &mut Self {
        let namespace = provider.namespace().to_string();
        self.register_as(namespace, provider)
    }

    /// Register a provider under an explicit name
    pub fn register_as(
        &mut self,
        name: impl Into<String>,
        provider: Arc<dyn RuleProvider>,
    ) -> &mut Self {
        let name = name.into();
        if self.providers.insert(name.clone(), provider).is_some() {
            tracing::debug!("Replaced plugin registration for '{}'", name);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn RuleProvider>> {
        self.providers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn RuleProvider>)> {
        self.providers.iter().map(|(name, p)| (name.as_str(), p))
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }
}
