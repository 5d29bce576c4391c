//! Command implementations

pub mod config;

use colored::Colorize;
use lintfold_core::builtin::CORE_RULES;
use lintfold_core::{
    ConfigLoader, EffectiveConfig, LoadedConfig, ResolverOptions, Result, RuleId, Severity,
};
use std::path::PathBuf;
use tracing::debug;

use crate::OutputFormat;
use crate::output::{self, PathCheck};

/// Options shared by every command
pub struct Settings {
    pub config_path: Option<PathBuf>,
    pub strict: bool,
}

impl Settings {
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            strict_rules: self.strict,
        }
    }

    /// Load the configured (or discovered) config file
    pub fn load(&self, loader: &ConfigLoader) -> Result<LoadedConfig> {
        loader.load(self.config_path.as_deref(), None)
    }

    /// Load and resolve, pointing at the offending layer on failure
    pub fn resolve(&self, loader: &ConfigLoader) -> Result<(LoadedConfig, EffectiveConfig)> {
        self.resolve_loaded(self.load(loader)?)
    }

    pub fn resolve_loaded(&self, loaded: LoadedConfig) -> Result<(LoadedConfig, EffectiveConfig)> {
        debug!(
            "Resolving {} layers from {}",
            loaded.layers.len(),
            loaded.path.display()
        );

        match loaded.resolve(self.resolver_options()) {
            Ok(config) => Ok((loaded, config)),
            Err(e) => {
                if let Some(index) = e.layer_index()
                    && let Some(layer) = loaded.layers.get(index)
                {
                    eprintln!(
                        "{} layer {} of {}",
                        "-->".blue().bold(),
                        layer.label(index),
                        loaded.path.display()
                    );
                }
                Err(e)
            }
        }
    }
}

/// Resolve command implementation
pub fn resolve_command(settings: &Settings, format: OutputFormat) -> Result<()> {
    let loader = ConfigLoader::builtin();
    let (loaded, config) = settings.resolve(&loader)?;

    match format {
        OutputFormat::Human => output::print_effective_human(&loaded, &config),
        OutputFormat::Json => output::print_json(&config),
    }
}

/// Severity command implementation
pub fn severity_command(
    settings: &Settings,
    rule_ids: Vec<String>,
    format: OutputFormat,
) -> Result<()> {
    let loader = ConfigLoader::builtin();
    let (_, config) = settings.resolve(&loader)?;

    let severities: Vec<(String, Severity)> = rule_ids
        .into_iter()
        .map(|id| {
            let severity = config.severity_of(&id);
            (id, severity)
        })
        .collect();

    match format {
        OutputFormat::Human => {
            for (id, severity) in &severities {
                println!("{id}: {}", output::paint_severity(*severity));
            }
            Ok(())
        }
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = severities
                .into_iter()
                .map(|(id, severity)| (id, serde_json::Value::from(severity.as_str())))
                .collect();
            output::print_json(&map)
        }
    }
}

/// Check command implementation
pub fn check_command(
    settings: &Settings,
    paths: Vec<PathBuf>,
    format: OutputFormat,
    fail_on_ignored: bool,
) -> Result<()> {
    let loader = ConfigLoader::builtin();
    let (_, config) = settings.resolve(&loader)?;

    let checks: Vec<PathCheck> = paths
        .iter()
        .map(|path| PathCheck {
            path: path.display().to_string(),
            ignored: config.is_ignored(path),
            pattern: config.ignored_by(path).map(str::to_string),
        })
        .collect();

    match format {
        OutputFormat::Human => output::print_path_checks(&checks),
        OutputFormat::Json => output::print_json(&checks)?,
    }

    let ignored = checks.iter().filter(|check| check.ignored).count();
    debug!("{} of {} paths ignored", ignored, checks.len());
    if fail_on_ignored && ignored > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Rules command implementation
pub fn rules_command(settings: &Settings, plugin: Option<String>, enabled: bool) -> Result<()> {
    let loader = ConfigLoader::builtin();

    if let Some(wanted) = &plugin
        && !loader.registry().contains(wanted)
    {
        println!("Plugin '{wanted}' is not registered.");
        return Ok(());
    }

    // Severities are shown only when a config file is available
    let loaded = match settings.load(&loader) {
        Ok(loaded) => Some(loaded),
        Err(e) if settings.config_path.is_none() && !enabled => {
            debug!("No configuration for rule severities: {}", e);
            None
        }
        Err(e) => return Err(e),
    };
    let config = match loaded {
        Some(loaded) => Some(settings.resolve_loaded(loaded)?.1),
        None => None,
    };

    let mut rule_ids: Vec<RuleId> = Vec::new();
    if plugin.is_none() {
        rule_ids.extend(CORE_RULES.iter().map(|name| RuleId::new(*name)));
    }
    for (namespace, provider) in loader.registry().iter() {
        if plugin.as_deref().is_some_and(|wanted| wanted != namespace) {
            continue;
        }
        rule_ids.extend(
            provider
                .rules()
                .into_iter()
                .map(|name| RuleId::new(format!("{namespace}/{name}"))),
        );
    }

    println!("Available Rules:");
    println!("================");

    let mut count = 0;
    for id in &rule_ids {
        let severity = config.as_ref().map(|c| c.severity_of(id.as_str()));
        if enabled && !severity.is_some_and(|s| s.is_enabled()) {
            continue;
        }
        count += 1;
        match severity {
            Some(severity) => println!("  {:<6} {}", output::paint_severity(severity), id),
            None => println!("  {id}"),
        }
    }

    if count == 0 {
        println!("\nNo rules found matching the specified filters.");
    } else {
        println!("\nTotal: {count} rules");
    }

    Ok(())
}

/// Presets command implementation
pub fn presets_command() -> Result<()> {
    let loader = ConfigLoader::builtin();

    println!("Available Presets:");
    println!("==================");
    for name in loader.presets().names() {
        let layers = loader.presets().get(name).unwrap_or_default();
        let rules: usize = layers.iter().map(|l| l.rule_entries().len()).sum();
        println!("  {name} ({rules} rules)");
    }

    Ok(())
}
