//! dynasync - synthesize a GraphQL API and its storage tables from a
//! declarative config document.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;
mod prelude;

/// Synthesize a GraphQL schema, resolvers and storage tables
#[derive(Debug, Parser)]
#[command(name = "dynasync")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: Global,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Silence the command output
    #[clap(long, global = true)]
    pub silent: bool,

    /// Enable verbose output
    #[clap(long, global = true)]
    pub verbose: bool,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn default_filter(&self) -> &'static str {
        if self.is_silent() {
            "off"
        } else if self.is_verbose() {
            "dynasync=debug,dynasync_core=debug"
        } else {
            "dynasync=warn"
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Run a synthesis pass and write every artifact
    Synth(commands::SynthCommand),

    /// Print the synthesized schema
    Schema(commands::SchemaCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so schema output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.global.default_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Synth(cmd) => commands::run_synth(cmd, &cli.global),
        Commands::Schema(cmd) => commands::run_schema(cmd, &cli.global),
    }
}
