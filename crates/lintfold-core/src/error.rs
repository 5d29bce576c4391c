//! Error types and handling for configuration resolution

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lintfold operations
#[derive(Debug, Error)]
pub enum LintfoldError {
    /// A rule references a plugin namespace that no layer up to this one registered
    #[error("Unknown plugin in rule '{rule_id}' (layer {layer_index}): namespace is not registered")]
    UnknownPlugin { rule_id: String, layer_index: usize },

    /// A severity value outside {off, warn, error}
    #[error(
        "Malformed severity for rule '{rule_id}' (layer {layer_index}): {provided_value} (expected \"off\", \"warn\", \"error\", 0, 1 or 2)"
    )]
    MalformedSeverity {
        rule_id: String,
        layer_index: usize,
        provided_value: String,
    },

    /// Resolution was requested over an empty layer sequence
    #[error("Cannot resolve an empty layer sequence")]
    NoLayers,

    /// A namespace was bound to two different providers
    #[error("Plugin namespace '{namespace}' (layer {layer_index}) is already bound to a different provider")]
    PluginConflict { namespace: String, layer_index: usize },

    /// A namespaced rule is not provided by its plugin (strict mode only)
    #[error("Rule '{rule_id}' (layer {layer_index}) is not provided by its plugin")]
    UnknownRule { rule_id: String, layer_index: usize },

    /// An ignore pattern that cannot be used
    #[error("Invalid ignore pattern '{pattern}' (layer {layer_index}): {reason}")]
    InvalidIgnorePattern {
        pattern: String,
        layer_index: usize,
        reason: String,
    },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization of configuration or schema output failed
    #[error("Serialization error: {message}")]
    SerializationError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Plugin,
    Severity,
    Rule,
    Ignore,
    Config,
    Io,
    Serialization,
}

impl LintfoldError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LintfoldError::UnknownPlugin { .. } | LintfoldError::PluginConflict { .. } => {
                ErrorKind::Plugin
            }
            LintfoldError::MalformedSeverity { .. } => ErrorKind::Severity,
            LintfoldError::UnknownRule { .. } => ErrorKind::Rule,
            LintfoldError::InvalidIgnorePattern { .. } => ErrorKind::Ignore,
            LintfoldError::NoLayers | LintfoldError::ConfigError { .. } => ErrorKind::Config,
            LintfoldError::IoError { .. } => ErrorKind::Io,
            LintfoldError::SerializationError { .. } => ErrorKind::Serialization,
        }
    }

    /// Whether this error must stop any lint run.
    ///
    /// Everything that describes a broken configuration is fatal; only
    /// output serialization failures leave the resolved config usable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Serialization)
    }

    /// Index of the layer the error was detected in, if any
    pub fn layer_index(&self) -> Option<usize> {
        match self {
            LintfoldError::UnknownPlugin { layer_index, .. }
            | LintfoldError::MalformedSeverity { layer_index, .. }
            | LintfoldError::PluginConflict { layer_index, .. }
            | LintfoldError::UnknownRule { layer_index, .. }
            | LintfoldError::InvalidIgnorePattern { layer_index, .. } => Some(*layer_index),
            _ => None,
        }
    }

    /// Rule the error refers to, if any
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            LintfoldError::UnknownPlugin { rule_id, .. }
            | LintfoldError::MalformedSeverity { rule_id, .. }
            | LintfoldError::UnknownRule { rule_id, .. } => Some(rule_id),
            _ => None,
        }
    }

    /// Create an unknown plugin error
    pub fn unknown_plugin(rule_id: impl Into<String>, layer_index: usize) -> Self {
        Self::UnknownPlugin {
            rule_id: rule_id.into(),
            layer_index,
        }
    }

    /// Create a malformed severity error
    pub fn malformed_severity(
        rule_id: impl Into<String>,
        layer_index: usize,
        provided_value: impl Into<String>,
    ) -> Self {
        Self::MalformedSeverity {
            rule_id: rule_id.into(),
            layer_index,
            provided_value: provided_value.into(),
        }
    }

    /// Create a plugin conflict error
    pub fn plugin_conflict(namespace: impl Into<String>, layer_index: usize) -> Self {
        Self::PluginConflict {
            namespace: namespace.into(),
            layer_index,
        }
    }

    /// Create an unknown rule error
    pub fn unknown_rule(rule_id: impl Into<String>, layer_index: usize) -> Self {
        Self::UnknownRule {
            rule_id: rule_id.into(),
            layer_index,
        }
    }

    /// Create an invalid ignore pattern error
    pub fn invalid_ignore_pattern(
        pattern: impl Into<String>,
        layer_index: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidIgnorePattern {
            pattern: pattern.into(),
            layer_index,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization_error(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for LintfoldError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_plugin_message_names_rule_and_layer() {
        let err = LintfoldError::unknown_plugin("unregistered/ruleX", 0);
        let message = err.to_string();
        assert!(message.contains("unregistered/ruleX"));
        assert!(message.contains("layer 0"));
        assert_eq!(err.kind(), ErrorKind::Plugin);
        assert_eq!(err.layer_index(), Some(0));
        assert_eq!(err.rule_id(), Some("unregistered/ruleX"));
    }

    #[test]
    fn test_malformed_severity_keeps_provided_value() {
        let err = LintfoldError::malformed_severity("no-console", 3, "\"loud\"");
        assert!(err.to_string().contains("\"loud\""));
        assert_eq!(err.layer_index(), Some(3));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_serialization_is_not_fatal() {
        let err = LintfoldError::serialization_error("boom");
        assert!(!err.is_fatal());
        assert_eq!(err.layer_index(), None);
    }
}
