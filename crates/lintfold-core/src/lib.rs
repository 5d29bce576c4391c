//! Lintfold Core
//!
//! Resolves layered lint configuration into one effective rule set.
//! Layers (presets, plugin rule sets, user overrides, ignore lists) are
//! folded lowest precedence first; the result answers two questions for a
//! lint engine: how severe is a rule, and is a path ignored.

pub mod builtin;
pub mod config;
pub mod effective;
pub mod error;
pub mod ignore;
pub mod layer;
pub mod plugin;
pub mod resolver;
pub mod result;
pub mod rule;

// Re-export commonly used types
pub use config::{
    ConfigFile, ConfigFormat, ConfigLoader, LayerDeclaration, LoadedConfig, PresetCatalog,
};
pub use effective::EffectiveConfig;
pub use error::{ErrorKind, LintfoldError};
pub use ignore::{IgnorePattern, IgnoreSet};
pub use layer::ConfigLayer;
pub use plugin::{PluginRegistry, RuleProvider, StaticRuleProvider};
pub use resolver::{ConfigResolver, ResolverOptions, resolve};
pub use result::Result;
pub use rule::{RuleEntry, RuleId, RuleSetting, Severity};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    init_tracing_with_filter("lintfold=info");
}

/// Initialize tracing with an explicit default filter; `RUST_LOG` still wins
pub fn init_tracing_with_filter(default_filter: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed (tests, embedding tools)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
