//! Configuration files for lintfold
//!
//! This module turns declarative config files into explicit layer
//! sequences for the resolver:
//! - JSON, JSONC, TOML and YAML syntaxes
//! - Auto-discovery by traversing up directories
//! - Named presets pulled in with `extends`
//! - Plugin names looked up in a caller-provided registry
//! - JSON Schema generation via schemars
//!
//! ## Configuration Files
//!
//! Discovery looks for, in order: `.lintfoldrc.json`, `.lintfoldrc.jsonc`,
//! `.lintfoldrc.toml`, `lintfold.yaml`, `lintfold.yml` and `lintfold.json`,
//! starting from the current directory and moving up the directory tree
//! until one is found or the filesystem root is reached.
//!
//! ## Example Configuration
//!
//! ```jsonc
//! [
//!   { "extends": ["recommended", "prettier"] },
//!   {
//!     "plugins": ["import"],
//!     "rules": {
//!       "import/order": ["error", { "newlines-between": "always" }],
//!       "no-unused-vars": "warn",
//!       "no-console": "warn"
//!     },
//!     "ignores": ["node_modules/", "dist/", "src/output.css"]
//!   }
//! ]
//! ```
//!
//! Later layers take precedence over earlier ones. A layer's `extends`
//! presets are placed immediately before the layer itself.

mod file;
mod loader;
mod presets;

pub use file::{ConfigFile, ConfigFormat, LayerDeclaration};
pub use loader::{CONFIG_FILE_NAMES, ConfigLoader, LoadedConfig};
pub use presets::PresetCatalog;
