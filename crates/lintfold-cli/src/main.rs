//! Lintfold CLI
//!
//! Command-line interface for inspecting resolved lint configurations

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use colored::Colorize;
use lintfold_core::{Result, init_tracing_with_filter};
use std::io;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "lintfold")]
#[command(about = "Lintfold: resolve layered lint configurations")]
#[command(version = lintfold_core::VERSION)]
#[command(
    long_about = "Lintfold folds layered lint configuration (presets, plugins, overrides, ignore lists)\n\
into the single effective rule set a lint engine runs with.\n\
\n\
Examples:\n  \
lintfold resolve                     # Show the effective configuration\n  \
lintfold severity no-console         # Effective severity of a rule\n  \
lintfold check dist/app.js src/a.js  # Which paths are ignored\n  \
lintfold rules --plugin import       # Rules provided by a plugin\n  \
lintfold config init                 # Create a configuration file"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (default: discover .lintfoldrc.* / lintfold.*)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Reject plugin rules their plugin does not provide
    #[arg(long, global = true, help = "Reject plugin rules the plugin does not provide")]
    strict: bool,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve all layers and print the effective configuration
    #[command(alias = "show")]
    Resolve {
        /// Output format
        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,
    },

    /// Print the effective severity of rules
    Severity {
        /// Rule IDs to query
        #[arg(required = true, help = "Rule IDs, e.g. no-console or import/order")]
        rule_ids: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,
    },

    /// Check whether paths are ignored by the effective configuration
    Check {
        /// Paths to check
        #[arg(required = true, help = "Paths relative to the configuration base")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,

        /// Exit with non-zero code when any path is ignored
        #[arg(long, help = "Exit with non-zero code when any path is ignored")]
        fail_on_ignored: bool,
    },

    /// List rules known to the core and the registered plugins
    Rules {
        /// Only list rules of this plugin
        #[arg(long, help = "Only list rules of the given plugin namespace")]
        plugin: Option<String>,

        /// Only list rules configured above `off`
        #[arg(long, help = "Only list rules enabled by the configuration")]
        enabled: bool,
    },

    /// List available presets
    Presets,

    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    #[command(alias = "ver")]
    Version {
        /// Show detailed version information
        #[arg(long, help = "Show detailed version and build information")]
        detailed: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Initialize a new configuration file
    Init {
        /// Configuration file format
        #[arg(long, default_value = "json", help = "Configuration file format")]
        format: ConfigFormat,

        /// Overwrite existing configuration file
        #[arg(long, help = "Overwrite existing configuration file")]
        force: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(help = "Path to configuration file (default: discover)")]
        path: Option<PathBuf>,
    },

    /// Show current configuration
    Show {
        /// Show resolved configuration (after presets and merging)
        #[arg(long, help = "Show resolved configuration after presets and merging")]
        resolved: bool,
    },

    /// Print the JSON Schema of configuration files
    Schema,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON format for programmatic consumption
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ConfigFormat {
    /// JSON configuration format
    Json,
    /// TOML configuration format
    Toml,
}

fn main() {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    if cli.no_color || std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "lintfold=error", // Only errors by default
        1 => "lintfold=warn",  // Warnings on first -v
        2 => "lintfold=info",  // Info on -vv
        3 => "lintfold=debug", // Debug on -vvv
        _ => "lintfold=trace", // Trace on -vvvv+
    };
    init_tracing_with_filter(log_level);

    if let Err(e) = run_command(cli) {
        error!("lintfold failed: {}", e);
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn run_command(cli: Cli) -> Result<()> {
    let settings = commands::Settings {
        config_path: cli.config,
        strict: cli.strict,
    };

    match cli.command {
        Some(Commands::Resolve { format }) => commands::resolve_command(&settings, format),

        Some(Commands::Severity { rule_ids, format }) => {
            commands::severity_command(&settings, rule_ids, format)
        }

        Some(Commands::Check {
            paths,
            format,
            fail_on_ignored,
        }) => commands::check_command(&settings, paths, format, fail_on_ignored),

        Some(Commands::Rules { plugin, enabled }) => {
            commands::rules_command(&settings, plugin, enabled)
        }

        Some(Commands::Presets) => commands::presets_command(),

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { format, force } => commands::config::init_command(format, force),
            ConfigAction::Validate { path } => {
                commands::config::validate_command(&settings, path)
            }
            ConfigAction::Show { resolved } => commands::config::show_command(&settings, resolved),
            ConfigAction::Schema => commands::config::schema_command(),
        },

        Some(Commands::Version { detailed }) => {
            if detailed {
                println!("lintfold {}", lintfold_core::VERSION);
                println!("Build information:");
                println!("  Target: {}", std::env::consts::ARCH);
                println!("  OS: {}", std::env::consts::OS);
            } else {
                println!("{}", lintfold_core::VERSION);
            }
            Ok(())
        }

        None => {
            // No subcommand provided, show help
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
