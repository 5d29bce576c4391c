//! `lintfold config` subcommands

use lintfold_core::{ConfigFile, ConfigLoader, LintfoldError, Result};
use std::path::PathBuf;
use tracing::{debug, error};

use super::Settings;
use crate::ConfigFormat;
use crate::output;

/// Config init command implementation
pub fn init_command(format: ConfigFormat, force: bool) -> Result<()> {
    debug!("Initializing configuration file with format: {:?}", format);

    let filename = match format {
        ConfigFormat::Json => ".lintfoldrc.json",
        ConfigFormat::Toml => ".lintfoldrc.toml",
    };
    let config_path = PathBuf::from(filename);

    if config_path.exists() && !force {
        error!(
            "Configuration file '{}' already exists. Use --force to overwrite.",
            filename
        );
        return Err(LintfoldError::config_error(format!(
            "Configuration file '{filename}' already exists"
        )));
    }

    let layers = default_layers();
    let config_content = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(&layers)
            .map_err(|e| LintfoldError::serialization_error(format!("JSON: {e}")))?,
        ConfigFormat::Toml => {
            let document = serde_json::json!({ "layers": layers });
            toml::to_string_pretty(&document)
                .map_err(|e| LintfoldError::serialization_error(format!("TOML: {e}")))?
        }
    };

    std::fs::write(&config_path, config_content)
        .map_err(|e| LintfoldError::io_error(&config_path, e))?;

    println!("✅ Created configuration file: {filename}");
    println!("   Edit the file to customize your linting rules.");

    Ok(())
}

/// Config validate command implementation
pub fn validate_command(settings: &Settings, path: Option<PathBuf>) -> Result<()> {
    debug!("Validating configuration file: {:?}", path);

    let settings = Settings {
        config_path: path.or_else(|| settings.config_path.clone()),
        strict: settings.strict,
    };
    let loader = ConfigLoader::builtin();

    match settings.resolve(&loader) {
        Ok((loaded, config)) => {
            println!("✅ Configuration is valid: {}", loaded.path.display());
            println!("   Layers: {}", loaded.layers.len());
            println!("   Rules: {}", config.rule_count());
            println!("   Enabled rules: {}", config.enabled_rules().count());
            println!("   Ignore patterns: {}", config.ignores().len());
            Ok(())
        }
        Err(e) => {
            error!("❌ Configuration validation failed: {}", e);
            Err(e)
        }
    }
}

/// Config show command implementation
pub fn show_command(settings: &Settings, resolved: bool) -> Result<()> {
    debug!("Showing configuration (resolved: {})", resolved);

    let loader = ConfigLoader::builtin();
    if resolved {
        let (_, config) = settings.resolve(&loader)?;
        return output::print_json(&config);
    }

    let loaded = settings.load(&loader)?;
    let file = ConfigLoader::parse_file(&loaded.path)?;
    output::print_json(&file)
}

/// Config schema command implementation
pub fn schema_command() -> Result<()> {
    println!("{}", ConfigFile::json_schema()?);
    Ok(())
}

/// Starter configuration: presets, the import plugin and common ignores
fn default_layers() -> serde_json::Value {
    serde_json::json!([
        {
            "extends": ["recommended", "prettier"]
        },
        {
            "plugins": ["import"],
            "rules": {
                "import/order": "error",
                "no-unused-vars": "warn",
                "no-console": "warn"
            },
            "ignores": ["node_modules/", "dist/"]
        }
    ])
}
