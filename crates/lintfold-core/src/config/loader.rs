//! Configuration file discovery and loading

use super::file::{ConfigFile, ConfigFormat, LayerDeclaration};
use super::presets::PresetCatalog;
use crate::builtin::{builtin_presets, builtin_registry};
use crate::effective::EffectiveConfig;
use crate::error::LintfoldError;
use crate::layer::ConfigLayer;
use crate::plugin::PluginRegistry;
use crate::resolver::{ConfigResolver, ResolverOptions};
use crate::result::{Result, ResultExt};
use std::path::{Path, PathBuf};

/// Config file names searched during discovery, highest priority first
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".lintfoldrc.json",
    ".lintfoldrc.jsonc",
    ".lintfoldrc.toml",
    "lintfold.yaml",
    "lintfold.yml",
    "lintfold.json",
];

/// Layers loaded from one config file
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub layers: Vec<ConfigLayer>,
}

impl LoadedConfig {
    /// Resolve the loaded layers
    pub fn resolve(&self, options: ResolverOptions) -> Result<EffectiveConfig> {
        ConfigResolver::with_options(options).resolve(&self.layers)
    }
}

/// Turns config files into explicit layer sequences
///
/// Plugin names and preset names are looked up in the registry and
/// catalogue the loader was built with; nothing is looked up globally.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    registry: PluginRegistry,
    presets: PresetCatalog,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ConfigLoader {
    pub fn new(registry: PluginRegistry, presets: PresetCatalog) -> Self {
        Self { registry, presets }
    }

    /// Loader with the bundled plugins and presets
    pub fn builtin() -> Self {
        let registry = builtin_registry();
        let presets = builtin_presets(&registry);
        Self::new(registry, presets)
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn presets(&self) -> &PresetCatalog {
        &self.presets
    }

    /// Auto-discover config file by traversing upward from start_path
    ///
    /// Tries each name in [`CONFIG_FILE_NAMES`] per directory and moves up
    /// the directory tree until a config is found or the filesystem root is
    /// reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| LintfoldError::io_error(start_path, e))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Parse a config file without expanding it
    pub fn parse_file(path: &Path) -> Result<ConfigFile> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            LintfoldError::config_error(format!(
                "{}: unsupported file extension (expected .json, .jsonc, .json5, .toml, .yaml or .yml)",
                path.display()
            ))
        })?;
        let content =
            std::fs::read_to_string(path).map_err(|e| LintfoldError::io_error(path, e))?;

        ConfigFile::parse(&content, format).in_source(&path.display().to_string())
    }

    /// Load a config file into its expanded layer sequence
    pub fn load_from_file(&self, path: &Path) -> Result<LoadedConfig> {
        let file = Self::parse_file(path)?;
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let layers = self
            .expand(&file, &source)
            .in_source(&path.display().to_string())?;

        tracing::debug!(
            "Loaded {} layers from {}",
            layers.len(),
            path.display()
        );
        Ok(LoadedConfig {
            path: path.to_path_buf(),
            layers,
        })
    }

    /// Load config from path or auto-discover
    ///
    /// If a custom path is provided, loads from that path. Otherwise,
    /// discovers a config file starting from `start_dir` (or the current
    /// directory).
    pub fn load(&self, custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<LoadedConfig> {
        let config_path = if let Some(path) = custom_path {
            if !path.exists() {
                return Err(LintfoldError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        } else {
            let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
            Self::auto_discover(search_dir)?.ok_or_else(|| {
                LintfoldError::config_error(format!(
                    "No config file found ({}). Run 'lintfold config init' to create one",
                    CONFIG_FILE_NAMES.join(", ")
                ))
            })?
        };

        self.load_from_file(&config_path)
    }

    /// Expand declarations into layers: each declaration's presets come
    /// first, then the declaration's own layer.
    pub fn expand(&self, file: &ConfigFile, source: &str) -> Result<Vec<ConfigLayer>> {
        let mut layers = Vec::new();
        for (index, declaration) in file.layers.iter().enumerate() {
            if let Some(extends) = &declaration.extends {
                layers.extend(self.presets.expand(extends)?);
            }
            let own = self.layer_from(declaration, &format!("{source}[{index}]"))?;
            if !own.is_empty() || declaration.extends.is_none() {
                layers.push(own);
            }
        }
        Ok(layers)
    }

    fn layer_from(&self, declaration: &LayerDeclaration, default_name: &str) -> Result<ConfigLayer> {
        let name = declaration
            .name
            .clone()
            .unwrap_or_else(|| default_name.to_string());
        let mut layer = ConfigLayer::named(name);

        for plugin in declaration.plugins.iter().flatten() {
            let provider = self.registry.get(plugin).ok_or_else(|| {
                let known: Vec<_> = self.registry.names().collect();
                LintfoldError::config_error(format!(
                    "unknown plugin '{plugin}' (available: {})",
                    if known.is_empty() {
                        "none".to_string()
                    } else {
                        known.join(", ")
                    }
                ))
            })?;
            layer = layer.plugin_as(plugin.clone(), provider);
        }

        for (rule_id, value) in declaration.rules.iter().flatten() {
            layer = layer.rule_value(rule_id.as_str(), value.clone());
        }

        if let Some(ignores) = &declaration.ignores {
            layer = layer.ignores(ignores.iter().cloned());
        }

        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Severity;
    use std::fs;
    use tempfile::TempDir;

    fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_file_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "lintfold.json",
            r#"{"rules": {"no-console": "warn"}, "ignores": ["dist/"]}"#,
        );

        let loaded = ConfigLoader::builtin().load_from_file(&config_path).unwrap();
        assert_eq!(loaded.layers.len(), 1);
        assert_eq!(loaded.layers[0].name(), Some("lintfold.json[0]"));

        let config = loaded.resolve(ResolverOptions::default()).unwrap();
        assert_eq!(config.severity_of("no-console"), Severity::Warn);
    }

    #[test]
    fn test_extends_inserts_presets_first() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "lintfold.json",
            r#"{"extends": ["recommended", "prettier"], "rules": {"semi": "error"}}"#,
        );

        let loaded = ConfigLoader::builtin().load_from_file(&config_path).unwrap();
        let names: Vec<_> = loaded.layers.iter().filter_map(ConfigLayer::name).collect();
        assert_eq!(
            names,
            vec!["preset:recommended", "preset:prettier", "lintfold.json[0]"]
        );

        // The declaring layer wins over its presets
        let config = loaded.resolve(ResolverOptions::default()).unwrap();
        assert_eq!(config.severity_of("semi"), Severity::Error);
        assert_eq!(config.severity_of("quotes"), Severity::Off);
    }

    #[test]
    fn test_extends_only_layer_adds_no_empty_layer() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "lintfold.json",
            r#"[{"extends": ["recommended"]}]"#,
        );

        let loaded = ConfigLoader::builtin().load_from_file(&config_path).unwrap();
        assert_eq!(loaded.layers.len(), 1);
    }

    #[test]
    fn test_unknown_plugin_name_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "lintfold.json",
            r#"{"plugins": ["react"]}"#,
        );

        let err = ConfigLoader::builtin()
            .load_from_file(&config_path)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown plugin 'react'"), "{message}");
        assert!(message.contains("import"), "{message}");
        assert!(message.contains("lintfold.json"), "{message}");
    }

    #[test]
    fn test_unknown_preset_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "lintfold.json",
            r#"{"extends": ["airbnb"]}"#,
        );

        let err = ConfigLoader::builtin()
            .load_from_file(&config_path)
            .unwrap_err();
        assert!(err.to_string().contains("unknown preset 'airbnb'"));
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(temp_dir.path(), "lintfold.ini", "");
        assert!(ConfigLoader::parse_file(&config_path).is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::builtin().load(Some(Path::new("nonexistent.json")), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path =
            create_temp_config(temp_dir.path(), "invalid.json", r#"{ invalid json }"#);

        let err = ConfigLoader::parse_file(&config_path).unwrap_err();
        assert!(err.to_string().contains("invalid JSON syntax"));
    }

    #[test]
    fn test_auto_discover() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("src/nested");
        fs::create_dir_all(&nested).unwrap();

        create_temp_config(temp_dir.path(), "lintfold.json", r#"{}"#);

        let found = ConfigLoader::auto_discover(&nested).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), "lintfold.json");
    }

    #[test]
    fn test_auto_discover_priority() {
        let temp_dir = TempDir::new().unwrap();

        create_temp_config(temp_dir.path(), ".lintfoldrc.json", r#"{}"#);
        create_temp_config(temp_dir.path(), "lintfold.yaml", "rules: {}\n");
        create_temp_config(temp_dir.path(), "lintfold.json", r#"{}"#);

        let found = ConfigLoader::auto_discover(temp_dir.path()).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), ".lintfoldrc.json");
    }

    #[test]
    fn test_load_discovers_from_start_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("packages/app");
        fs::create_dir_all(&nested).unwrap();
        create_temp_config(
            temp_dir.path(),
            "lintfold.yaml",
            "rules:\n  no-console: 1\nignores:\n  - build/\n",
        );

        let loaded = ConfigLoader::builtin().load(None, Some(&nested)).unwrap();
        let config = loaded.resolve(ResolverOptions::default()).unwrap();
        assert_eq!(config.severity_of("no-console"), Severity::Warn);
        assert!(config.is_ignored("build/index.js"));
    }
}
