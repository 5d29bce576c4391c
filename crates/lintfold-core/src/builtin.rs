//! Built-in rule catalogue, plugins and presets

use crate::config::PresetCatalog;
use crate::layer::ConfigLayer;
use crate::plugin::{PluginRegistry, StaticRuleProvider};
use crate::rule::Severity;
use std::sync::Arc;

/// Core rules, available without any plugin
pub const CORE_RULES: &[&str] = &[
    "arrow-parens",
    "comma-dangle",
    "eqeqeq",
    "indent",
    "max-len",
    "no-console",
    "no-debugger",
    "no-dupe-keys",
    "no-empty",
    "no-extra-semi",
    "no-mixed-spaces-and-tabs",
    "no-undef",
    "no-unreachable",
    "no-unused-vars",
    "quotes",
    "semi",
];

/// Core rules turned on by the `recommended` preset
pub const RECOMMENDED_RULES: &[&str] = &[
    "no-debugger",
    "no-dupe-keys",
    "no-empty",
    "no-undef",
    "no-unreachable",
    "no-unused-vars",
];

/// Formatting rules turned off by the `prettier` preset
pub const FORMATTING_RULES: &[&str] = &[
    "arrow-parens",
    "comma-dangle",
    "indent",
    "max-len",
    "no-extra-semi",
    "no-mixed-spaces-and-tabs",
    "quotes",
    "semi",
];

/// Rules of the bundled `import` plugin
pub const IMPORT_RULES: &[&str] = &[
    "default",
    "export",
    "first",
    "named",
    "namespace",
    "newline-after-import",
    "no-cycle",
    "no-duplicates",
    "no-unresolved",
    "order",
];

const IMPORT_RECOMMENDED_RULES: &[&str] =
    &["default", "export", "named", "namespace", "no-unresolved"];

/// Registry holding the bundled plugins
pub fn builtin_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    registry.register(Arc::new(StaticRuleProvider::new(
        "import",
        IMPORT_RULES.iter().copied(),
    )));
    registry
}

/// Built-in presets.
///
/// `import/recommended` is only offered when `registry` has an `import`
/// plugin; the preset binds that same provider so configs that also list
/// the plugin do not conflict.
pub fn builtin_presets(registry: &PluginRegistry) -> PresetCatalog {
    let mut catalog = PresetCatalog::new();

    let recommended = RECOMMENDED_RULES
        .iter()
        .fold(ConfigLayer::named("preset:recommended"), |layer, rule| {
            layer.rule(*rule, Severity::Error)
        });
    catalog.register("recommended", vec![recommended]);

    let prettier = FORMATTING_RULES
        .iter()
        .fold(ConfigLayer::named("preset:prettier"), |layer, rule| {
            layer.rule(*rule, Severity::Off)
        });
    catalog.register("prettier", vec![prettier]);

    if let Some(import) = registry.get("import") {
        let layer = IMPORT_RECOMMENDED_RULES.iter().fold(
            ConfigLayer::named("preset:import/recommended").plugin_as("import", import),
            |layer, rule| layer.rule(format!("import/{rule}"), Severity::Error),
        );
        catalog.register("import/recommended", vec![layer]);
    }

    catalog
}

pub fn is_core_rule(name: &str) -> bool {
    CORE_RULES.contains(&name)
}
