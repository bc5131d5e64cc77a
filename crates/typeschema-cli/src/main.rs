//! typeschema CLI - JSON-Schema generation from model files
//!
//! Commands:
//! - `typeschema generate` - Generate the schema for one model type
//! - `typeschema check` - Validate a generator config file
//! - `typeschema list` - List the types a model declares

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use typeschema::LogLevel;

mod check;
mod expr;
mod generate;
mod list;
mod logging;
mod model;

#[derive(Parser)]
#[command(name = "typeschema")]
#[command(author, version, about = "JSON-Schema generator for declared type models", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error, off); RUST_LOG overrides it
    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the JSON schema for a model type
    Generate {
        /// Path to the model file (.toml or .json)
        #[arg(short, long)]
        model: PathBuf,

        /// Type to generate, by full or simple name
        #[arg(short = 't', long = "type")]
        type_name: String,

        /// Path to a generator config file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the schema to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate a generator config file
    Check {
        /// Path to the config file
        #[arg(short, long)]
        config: PathBuf,
    },

    /// List the types declared in a model file
    List {
        /// Path to the model file (.toml or .json)
        #[arg(short, long)]
        model: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_level);

    match cli.command {
        Commands::Generate {
            model,
            type_name,
            config,
            output,
            pretty,
        } => {
            generate::run(&generate::GenerateArgs {
                model,
                type_name,
                config,
                output,
                pretty,
            })?;
        }
        Commands::Check { config } => {
            check::run(&config)?;
        }
        Commands::List { model } => {
            list::run(&model)?;
        }
    }

    Ok(())
}
