// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `sch`: developer CLI for schematic record files.
//!
//! A record file holds one `|KEY=value|...` record per line; line 1 is the
//! document root and every later record names its owner by line position
//! through `OWNERINDEX`.
//!
//! # Usage
//! ```text
//! sch [--config-dir <dir>] [--strict] <command>
//!
//!   inspect <file>                     tree view of the loaded document
//!   roundtrip <file> [-o out] [--check] load, re-export, optionally compare
//!   fingerprint <file>                 BLAKE3 of the rendered records
//!   options [--save]                   effective load options as JSON
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` to adjust (default `info`).

// The CLI is expected to print to stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets, ContentArrangement, Table};
use sch_config_fs::FsConfigStore;
use sch_core::{
    fingerprint, load_records, ConfigService, LoadOptions, LoadedDocument, OrphanPolicy,
    UnknownKindPolicy,
};
use sch_params::{parse_records, render_records, ParameterCollection};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sch", version, about = "Schematic record file tools")]
struct Cli {
    /// Read and write config here instead of the platform config dir.
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Abort on unknown record kinds and orphan records.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the loaded primitive tree as a table.
    Inspect {
        /// Record file to load.
        file: PathBuf,
    },
    /// Load and re-export a record file.
    Roundtrip(RoundtripArgs),
    /// Print the hex BLAKE3 fingerprint of a record file.
    Fingerprint {
        /// Record file to hash.
        file: PathBuf,
    },
    /// Print the effective load options as JSON.
    Options {
        /// Persist the effective options to the config store.
        #[arg(long)]
        save: bool,
    },
}

#[derive(Args)]
struct RoundtripArgs {
    /// Record file to load.
    file: PathBuf,

    /// Write the export here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail unless the export fingerprint matches the input's.
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config_service(cli.config_dir.as_deref())?;
    let mut options = config.load_options().context("failed to load options")?;
    if cli.strict {
        options.unknown_kinds = UnknownKindPolicy::Abort;
        options.orphans = OrphanPolicy::Abort;
    }

    match cli.command {
        Commands::Inspect { file } => run_inspect(&file, &options),
        Commands::Roundtrip(args) => run_roundtrip(&args, &options),
        Commands::Fingerprint { file } => run_fingerprint(&file),
        Commands::Options { save } => run_options(&config, &options, save),
    }
}

fn config_service(dir: Option<&Path>) -> Result<ConfigService<FsConfigStore>> {
    let store = match dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new(),
    }
    .context("failed to open config store")?;
    Ok(ConfigService::new(store))
}

fn read_records(file: &Path) -> Result<Vec<ParameterCollection>> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    parse_records(&text).with_context(|| format!("failed to parse {}", file.display()))
}

fn load(file: &Path, options: &LoadOptions) -> Result<LoadedDocument> {
    let records = read_records(file)?;
    load_records(&records, options).with_context(|| format!("failed to load {}", file.display()))
}

fn run_inspect(file: &Path, options: &LoadOptions) -> Result<()> {
    let doc = load(file, options)?;
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "kind", "index", "part", "mode", "visible"]);

    let mut stack = vec![(doc.root, 0_usize)];
    let mut position = 0_usize;
    while let Some((id, depth)) = stack.pop() {
        if let Some(p) = doc.tree.get(id) {
            let kind = p.record_kind();
            table.add_row(vec![
                position.to_string(),
                format!("{}{} ({kind})", "  ".repeat(depth), kind.name()),
                doc.tree.index_in_sheet(id).to_string(),
                p.owner_part_id.to_string(),
                p.owner_part_display_mode.to_string(),
                if doc.tree.is_visible(id) { "yes" } else { "no" }.to_owned(),
            ]);
        }
        position += 1;
        stack.extend(
            doc.tree
                .children(id)
                .iter()
                .rev()
                .map(|&c| (c, depth + 1)),
        );
    }
    println!("{table}");
    println!(
        "{} loaded, {} placeholders, {} skipped, {} orphaned, {} vetoed",
        doc.report.loaded,
        doc.report.placeholders,
        doc.report.skipped,
        doc.report.orphaned,
        doc.report.vetoed
    );
    Ok(())
}

fn run_roundtrip(args: &RoundtripArgs, options: &LoadOptions) -> Result<()> {
    let input = read_records(&args.file)?;
    let mut doc = load_records(&input, options)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let output = doc.export(options).context("failed to export document")?;
    let dropped = doc.unreachable_count();
    if dropped > 0 {
        let (total, vetoed, orphaned) = (input.len(), doc.report.vetoed, doc.report.orphaned);
        eprintln!(
            "warning: {dropped} of {total} records are detached \
             ({vetoed} vetoed, {orphaned} orphaned), not written"
        );
    }

    if args.check {
        let before = fingerprint(&input);
        let after = fingerprint(&output);
        if before != after {
            bail!(
                "round trip changed the document: {} -> {}",
                hex::encode(before),
                hex::encode(after)
            );
        }
        info!(fingerprint = %hex::encode(after), "round trip is stable");
    }

    let text = render_records(&output).context("failed to render records")?;
    match &args.output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{text}"),
    }
    Ok(())
}

fn run_fingerprint(file: &Path) -> Result<()> {
    let records = read_records(file)?;
    println!("{}", hex::encode(fingerprint(&records)));
    Ok(())
}

fn run_options(
    config: &ConfigService<FsConfigStore>,
    options: &LoadOptions,
    save: bool,
) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(options)?);
    if save {
        config.save_options(options).context("failed to save options")?;
        info!("saved load options");
    }
    Ok(())
}
