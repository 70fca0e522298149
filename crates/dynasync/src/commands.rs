//! Subcommands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use dynasync_core::config::resolve_config;
use dynasync_core::provision::format_table_plan;
use dynasync_core::{synthesize, SynthesisOutput};

use crate::output::write_artifacts;
use crate::prelude::*;
use crate::Global;

/// Where the config comes from and how the pass is named.
#[derive(Debug, Clone, clap::Args)]
pub struct SourceArgs {
    /// Config document. Defaults to `dynasync.json` in the working directory.
    #[arg(long, short, env = "DYNASYNC_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Namespace label prepended to every table name.
    #[arg(long)]
    pub label: Option<String>,

    /// Identifier the API and its user pool are named after.
    #[arg(long, default_value = "Dynasync")]
    pub api_id: String,
}

/// Run a synthesis pass and write its artifacts.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Run a synthesis pass over the config document.

Writes the schema text, resolver bindings, table descriptors and the API
descriptor into the output directory:

  schema.graphql   - the synthesized schema
  resolvers.json   - one binding per root field
  tables.json      - storage table descriptors
  api.json         - API, data sources and authorization

Environment variables:
  DYNASYNC_CONFIG  - default config document path
  RUST_LOG         - log filter (e.g. dynasync=debug)")]
pub struct SynthCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory the artifacts are written to.
    #[arg(long, short, default_value = "dynasync-out")]
    pub out: PathBuf,

    /// Print the schema instead of writing artifacts.
    #[arg(long)]
    pub stdout: bool,
}

/// Print the synthesized schema.
#[derive(Debug, clap::Parser)]
pub struct SchemaCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run_synth(cmd: SynthCommand, global: &Global) -> Result<()> {
    let output = run_pass(&cmd.source)?;

    if cmd.stdout {
        print!("{}", output.schema);
        return Ok(());
    }

    if !global.is_silent() {
        aprintln!("{}", p_y("Tables:"));
        for table in &output.tables {
            for line in format_table_plan(table) {
                aprintln!("  {}", p_c(&line));
            }
        }
        aprintln!();
    }

    let written = write_artifacts(&output, &cmd.out)?;
    tracing::info!(out = %cmd.out.display(), files = written.len(), "artifacts written");

    if !global.is_silent() {
        for path in &written {
            aprintln!("{} {}", p_g("Wrote"), path.display());
        }
        aprintln!(
            "{} {} resolvers across {} tables",
            p_b("Synthesized"),
            output.bindings.len(),
            output.tables.len()
        );
    }
    Ok(())
}

pub fn run_schema(cmd: SchemaCommand, _global: &Global) -> Result<()> {
    let output = run_pass(&cmd.source)?;
    print!("{}", output.schema);
    Ok(())
}

fn run_pass(source: &SourceArgs) -> Result<SynthesisOutput> {
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let config = resolve_config(source.config.as_deref(), &cwd)?;
    tracing::debug!(
        tables = config.tables.len(),
        explicit = source.config.is_some(),
        "config resolved"
    );

    let output = synthesize(&source.api_id, config, source.label.as_deref())?;
    tracing::info!(
        api = %output.api.name,
        tables = output.tables.len(),
        bindings = output.bindings.len(),
        "synthesis complete"
    );
    Ok(output)
}
