//! Rule identifiers, severities and settings

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Identifier for a single lint rule, optionally namespaced as `plugin/ruleName`
///
/// The namespace is everything before the last `/`, so scoped plugin names
/// such as `@scope/plugin/rule` resolve to the `@scope/plugin` namespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Plugin namespace, `None` for core rules
    pub fn namespace(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(namespace, _)| namespace)
    }

    /// Rule name without the plugin namespace
    pub fn name(&self) -> &str {
        self.0
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.0)
    }

    pub fn is_namespaced(&self) -> bool {
        self.namespace().is_some()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for RuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Rule severity levels
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Disable the rule
    Off,
    /// Warning (doesn't fail the run)
    Warn,
    /// Error (fails the run)
    Error,
}

impl Severity {
    /// Parse a raw configuration value.
    ///
    /// Accepts `"off"`, `"warn"`, `"error"` and the numeric forms 0, 1, 2.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => {
                let level = match n.as_u64() {
                    Some(level) => level,
                    // json5 reads every number as a float
                    None => {
                        let float = n.as_f64()?;
                        if float.fract() != 0.0 || float < 0.0 {
                            return None;
                        }
                        float as u64
                    }
                };
                match level {
                    0 => Some(Severity::Off),
                    1 => Some(Severity::Warn),
                    2 => Some(Severity::Error),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self != Severity::Off
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Severity::Off),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated rule setting as it appears in the effective configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSetting {
    #[serde(skip)]
    pub id: RuleId,
    pub severity: Severity,
    /// Rule-specific options, opaque to the resolver
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Value>,
}

impl RuleSetting {
    pub fn new(id: impl Into<RuleId>, severity: Severity) -> Self {
        Self {
            id: id.into(),
            severity,
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<Value>) -> Self {
        self.options = options;
        self
    }
}

/// A rule as declared in a layer, before its severity has been validated
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEntry {
    pub id: RuleId,
    /// Raw severity value exactly as declared
    pub severity: Value,
    pub options: Vec<Value>,
}

impl RuleEntry {
    /// Entry with a known-good severity and no options
    pub fn new(id: impl Into<RuleId>, severity: Severity) -> Self {
        Self {
            id: id.into(),
            severity: Value::String(severity.as_str().to_string()),
            options: Vec::new(),
        }
    }

    /// Split a declarative rule value into severity and options.
    ///
    /// `"warn"` and `2` carry only a severity; `["error", {...}]` carries
    /// the severity first and the options after it.
    pub fn from_value(id: impl Into<RuleId>, value: Value) -> Self {
        let id = id.into();
        match value {
            Value::Array(items) if !items.is_empty() => {
                let mut items = items.into_iter();
                let severity = items.next().unwrap_or(Value::Null);
                Self {
                    id,
                    severity,
                    options: items.collect(),
                }
            }
            other => Self {
                id,
                severity: other,
                options: Vec::new(),
            },
        }
    }

    pub fn with_options(mut self, options: Vec<Value>) -> Self {
        self.options = options;
        self
    }

    /// Validate the raw severity
    pub fn parse_severity(&self) -> Option<Severity> {
        Severity::from_value(&self.severity)
    }
}
