//! Result type alias for lintfold operations

use crate::error::LintfoldError;

/// Standard Result type for lintfold operations
pub type Result<T> = std::result::Result<T, LintfoldError>;

/// Extension trait for attaching file context to configuration errors
pub trait ResultExt<T> {
    /// Prefix configuration errors with the source they came from.
    ///
    /// Resolver errors carry their own layer index and are passed through.
    fn in_source(self, source: &str) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn in_source(self, source: &str) -> Result<T> {
        self.map_err(|err| match err {
            LintfoldError::ConfigError { message } => {
                tracing::debug!("Configuration error in {}: {}", source, message);
                LintfoldError::ConfigError {
                    message: format!("{source}: {message}"),
                }
            }
            other => other,
        })
    }
}
