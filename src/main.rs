//! json-diff-tree: structural JSON diff tool
//!
//! Compares two JSON documents node by node and reports a mirrored tree of
//! per-path relations.

#![allow(clippy::struct_excessive_bools)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use json_diff_tree::{
    cli,
    config::{
        config_search_dirs, discover_config_file, generate_full_example_config,
        generate_json_schema, load_or_default, AppConfig, ConfigPreset, DiffPaths,
        CONFIG_FILE_NAMES,
    },
    diff::Relation,
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "json-diff-tree")]
#[command(version)]
#[command(about = "Structural, path-addressed JSON diff", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected (or no --fail-on-change)
    1  Changes detected
    3  Error occurred

PATHS:
    Object members are addressed as `a.b`, array elements as `a.list[#1]`
    (1-based). The root is the empty path.

EXAMPLES:
    # Full result tree as JSON
    json-diff-tree diff old.json new.json

    # CI check ignoring a timestamp and number formatting
    json-diff-tree diff old.json new.json --ignore-path meta.generated_at \\
        --ignore-number-type -o summary --fail-on-change

    # Only the changes, as a table
    json-diff-tree diff old.json new.json --omit-equal -o table")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the old/baseline document
    old: PathBuf,

    /// Path to the new document
    new: PathBuf,

    /// Leave this path out of the comparison (exact match, repeatable)
    #[arg(long = "ignore-path", value_name = "PATH")]
    ignore_paths: Vec<String>,

    /// Compare the array at this path without regard to order (repeatable,
    /// "" is the root)
    #[arg(long = "ignore-order-path", value_name = "PATH")]
    ignore_order_paths: Vec<String>,

    /// Sort every array before comparing
    #[arg(long)]
    ignore_array_order: bool,

    /// Treat 100, 100.0 and 1e2 as equal
    #[arg(long)]
    ignore_number_type: bool,

    /// Leave equal nodes out of the result
    #[arg(long)]
    omit_equal: bool,

    /// Fail on documents nested deeper than this
    #[arg(long)]
    max_depth: Option<usize>,

    /// Compare children in parallel once a node has this many
    #[arg(long)]
    parallel_threshold: Option<usize>,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Compact JSON output
    #[arg(long)]
    compact: bool,

    /// Keep only nodes with this relation (repeatable)
    #[arg(long = "relation", value_enum)]
    relations: Vec<Relation>,

    /// Keep only nodes whose path matches this regular expression
    #[arg(long)]
    path_pattern: Option<String>,

    /// Exit with code 1 if any difference is found
    #[arg(long)]
    fail_on_change: bool,

    /// Start from a named preset (default, lenient, changes-only, strict)
    #[arg(long)]
    preset: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two JSON documents
    Diff(DiffArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .json-diff-tree.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(exit_codes::SUCCESS) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Diff(args) => {
            let (file_config, loaded_from) = load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }
            let paths = DiffPaths {
                old: args.old.clone(),
                new: args.new.clone(),
            };
            let config = build_diff_config(file_config, args, cli.quiet, cli.no_color)?;
            cli::run_diff(&config, &paths)
        }

        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "json-diff-tree",
                &mut io::stdout(),
            );
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = generate_json_schema().context("failed to serialize schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                eprintln!("Config file search paths (in order):");
                for dir in config_search_dirs() {
                    eprintln!("  {}", dir.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".json-diff-tree.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, generate_full_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}

/// Layer the configuration: file (or defaults), then preset, then flags.
fn build_diff_config(
    mut config: AppConfig,
    args: DiffArgs,
    quiet: bool,
    no_color: bool,
) -> Result<AppConfig> {
    if let Some(name) = args.preset.as_deref() {
        let preset = ConfigPreset::from_name(name).with_context(|| {
            let known: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
            format!("unknown preset '{name}' (expected one of: {})", known.join(", "))
        })?;
        config.merge(&AppConfig::from_preset(preset));
    }

    let mut overrides = AppConfig::builder()
        .output_file(args.output_file)
        .no_color(no_color)
        .relations(args.relations)
        .path_pattern(args.path_pattern)
        .fail_on_change(args.fail_on_change)
        .quiet(quiet)
        .build();
    overrides.diff.ignore_paths = args.ignore_paths;
    overrides.diff.ignore_array_order_paths = args.ignore_order_paths;
    overrides.diff.global_ignore_array_order = args.ignore_array_order;
    overrides.diff.global_ignore_number_type = args.ignore_number_type;
    overrides.diff.omit_equal = args.omit_equal;
    overrides.output.compact = args.compact;
    config.merge(&overrides);

    // Explicit values win even when they equal the defaults
    if let Some(depth) = args.max_depth {
        config.diff.max_depth = depth;
    }
    if let Some(threshold) = args.parallel_threshold {
        config.diff.parallel_threshold = threshold;
    }
    if let Some(format) = args.output {
        config.output.format = format;
    }

    Ok(config)
}
