//! Declarative config file format
//!
//! A config file holds either a single layer object, an array of layer
//! objects, or (for TOML, whose documents must be tables) a `layers` array.

use crate::error::LintfoldError;
use crate::result::Result;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Supported config file syntaxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// Strict JSON
    Json,
    /// JSON with comments and trailing commas
    Jsonc,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Json),
            Some("jsonc") | Some("json5") => Some(Self::Jsonc),
            Some("toml") => Some(Self::Toml),
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Parse a document into a generic value
    pub fn parse(&self, content: &str) -> Result<Value> {
        let parsed = match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Jsonc => json5::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| {
            LintfoldError::config_error(format!("invalid {} syntax: {message}", self.name()))
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Jsonc => "JSONC",
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
        }
    }
}

/// One layer object as written in a config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayerDeclaration {
    /// Display name for the layer
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Name shown in logs and error messages")]
    pub name: Option<String>,

    /// Presets applied before this layer's own settings
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Named presets inserted before this layer, in order")]
    pub extends: Option<Vec<String>>,

    /// Plugin namespaces to register
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Plugin namespaces this layer registers")]
    pub plugins: Option<Vec<String>>,

    /// Rule settings, in declaration order
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(
        description = "Rule settings: \"off\" | \"warn\" | \"error\" | 0 | 1 | 2, or [severity, ...options]"
    )]
    pub rules: Option<IndexMap<String, Value>>,

    /// Glob patterns excluded from linting
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Glob patterns of paths to ignore; cannot be negated")]
    pub ignores: Option<Vec<String>>,
}

/// Every shape a config document may take, used for schema generation
#[allow(dead_code)]
#[derive(JsonSchema)]
#[serde(untagged)]
enum ConfigDocument {
    Layer(LayerDeclaration),
    Layers(Vec<LayerDeclaration>),
    Table { layers: Vec<LayerDeclaration> },
}

/// A parsed config file: its layer declarations in order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigFile {
    pub layers: Vec<LayerDeclaration>,
}

impl ConfigFile {
    /// Parse a document in the given format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        Self::from_value(format.parse(content)?)
    }

    /// Interpret a generic document value
    pub fn from_value(value: Value) -> Result<Self> {
        let layers = match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| declaration(item, Some(index)))
                .collect::<Result<Vec<_>>>()?,
            Value::Object(mut map)
                if map.len() == 1 && map.get("layers").is_some_and(Value::is_array) =>
            {
                let items = match map.remove("layers") {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                };
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| declaration(item, Some(index)))
                    .collect::<Result<Vec<_>>>()?
            }
            Value::Object(map) => vec![declaration(Value::Object(map), None)?],
            other => {
                return Err(LintfoldError::config_error(format!(
                    "expected a layer object or an array of layers, found {}",
                    kind_of(&other)
                )));
            }
        };

        Ok(Self { layers })
    }

    /// JSON Schema describing the file format
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(ConfigDocument);
        serde_json::to_string_pretty(&schema)
            .map_err(|e| LintfoldError::serialization_error(format!("schema: {e}")))
    }
}

fn declaration(value: Value, index: Option<usize>) -> Result<LayerDeclaration> {
    serde_json::from_value(value).map_err(|e| {
        let location = match index {
            Some(index) => format!("layer {index}"),
            None => "layer".to_string(),
        };
        LintfoldError::config_error(format!("{location}: {e}"))
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new(".lintfoldrc.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("lintfold.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("a.jsonc")),
            Some(ConfigFormat::Jsonc)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("a.ini")), None);
    }

    #[test]
    fn test_single_layer_object() {
        let file = ConfigFile::from_value(json!({
            "rules": {"no-console": "warn"},
            "ignores": ["dist/"]
        }))
        .unwrap();
        assert_eq!(file.layers.len(), 1);
        assert_eq!(file.layers[0].ignores, Some(vec!["dist/".to_string()]));
    }

    #[test]
    fn test_layer_array_keeps_rule_order() {
        let file = ConfigFile::parse(
            r#"[
                {"extends": ["recommended"]},
                {"rules": {"z-rule": "warn", "a-rule": ["error", {"x": 1}]}}
            ]"#,
            ConfigFormat::Json,
        )
        .unwrap();
        assert_eq!(file.layers.len(), 2);
        let rules = file.layers[1].rules.as_ref().unwrap();
        assert_eq!(rules.keys().collect::<Vec<_>>(), vec!["z-rule", "a-rule"]);
    }

    #[test]
    fn test_toml_layers_table() {
        let file = ConfigFile::parse(
            r#"
[[layers]]
extends = ["recommended"]

[[layers]]
plugins = ["import"]
ignores = ["dist/"]

[layers.rules]
no-console = "warn"
"#,
            ConfigFormat::Toml,
        )
        .unwrap();
        assert_eq!(file.layers.len(), 2);
        assert_eq!(file.layers[1].plugins, Some(vec!["import".to_string()]));
    }

    #[test]
    fn test_jsonc_comments_and_trailing_commas() {
        let file = ConfigFile::parse(
            r#"{
                // keep consoles visible
                "rules": {"no-console": "warn",},
            }"#,
            ConfigFormat::Jsonc,
        )
        .unwrap();
        assert!(file.layers[0].rules.is_some());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ConfigFile::from_value(json!([{"rulez": {}}])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("layer 0"), "{message}");
        assert!(message.contains("rulez"), "{message}");
    }

    #[test]
    fn test_scalar_document_rejected() {
        let err = ConfigFile::from_value(json!("nope")).unwrap_err();
        assert!(err.to_string().contains("found a string"));
    }

    #[test]
    fn test_schema_mentions_fields() {
        let schema = ConfigFile::json_schema().unwrap();
        assert!(schema.contains("extends"));
        assert!(schema.contains("ignores"));
    }
}
