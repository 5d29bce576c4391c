//! Output formatting and reporting
//!
//! Human output uses colors when the terminal supports them; JSON output is
//! pretty-printed and stable across runs.

use colored::*;
use lintfold_core::{EffectiveConfig, LintfoldError, LoadedConfig, Result, Severity};
use serde::Serialize;

/// Result of checking one path against the ignore set
#[derive(Debug, Clone, Serialize)]
pub struct PathCheck {
    pub path: String,
    pub ignored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Colorize a severity for terminal output
pub fn paint_severity(severity: Severity) -> ColoredString {
    match severity {
        Severity::Off => severity.as_str().dimmed(),
        Severity::Warn => severity.as_str().yellow(),
        Severity::Error => severity.as_str().red(),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| LintfoldError::serialization_error(format!("Failed to serialize: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Print the effective configuration with the layers it came from
pub fn print_effective_human(loaded: &LoadedConfig, config: &EffectiveConfig) -> Result<()> {
    println!(
        "{} {}",
        "Effective configuration from".bold(),
        loaded.path.display()
    );

    println!("\n{}", "Layers:".bold());
    for (index, layer) in loaded.layers.iter().enumerate() {
        println!(
            "  {} ({} rules, {} ignores)",
            layer.label(index),
            layer.rule_entries().len(),
            layer.ignore_patterns().len()
        );
    }

    let plugins: Vec<_> = config.plugins().collect();
    if !plugins.is_empty() {
        println!("\n{} {}", "Plugins:".bold(), plugins.join(", "));
    }

    println!("\n{} ({})", "Rules:".bold(), config.rule_count());
    for setting in config.rules() {
        let options = match setting.options.len() {
            0 => String::new(),
            1 => "  [1 option]".dimmed().to_string(),
            n => format!("  [{n} options]").dimmed().to_string(),
        };
        println!(
            "  {:<6} {}{}",
            paint_severity(setting.severity),
            setting.id,
            options
        );
    }

    if !config.ignores().is_empty() {
        println!("\n{}", "Ignores:".bold());
        for pattern in config.ignores().patterns() {
            println!("  {pattern}");
        }
    }

    print_summary_human(config);
    Ok(())
}

fn print_summary_human(config: &EffectiveConfig) {
    let counts = config.severity_counts();
    let count = |severity| counts.get(&severity).copied().unwrap_or(0);

    println!("\n{}", "Summary:".bold());
    println!(
        "  {} error, {} warn, {} off",
        count(Severity::Error).to_string().red(),
        count(Severity::Warn).to_string().yellow(),
        count(Severity::Off)
    );
}

/// Print ignore decisions for a set of paths
pub fn print_path_checks(checks: &[PathCheck]) {
    for check in checks {
        match &check.pattern {
            Some(pattern) => println!(
                "{:<8} {}  {}",
                "ignored".yellow(),
                check.path,
                format!("({pattern})").dimmed()
            ),
            None => println!("{:<8} {}", "linted".green(), check.path),
        }
    }
}
