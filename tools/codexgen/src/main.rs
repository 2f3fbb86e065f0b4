// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! codexgen CLI
//!
//! Generates keyed-wire codecs from a YAML schema.
//!
//! # Usage
//!
//! ```bash
//! # Generate one unit per type under ./generated
//! codexgen generate --schema library.yaml
//!
//! # Custom output root and a single bundled file
//! codexgen generate --schema library.yaml --output src --bundle src/codex.rs
//!
//! # Raise the group arity limit
//! codexgen generate --schema library.yaml --max-group-arity 8
//!
//! # Check a schema without writing anything
//! codexgen validate --schema library.yaml
//!
//! # Write an example configuration file
//! codexgen gen-config --output codexgen.yaml
//! ```

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use codexgen::{provider, DirectorySink, GenerationReport, Generator, GeneratorConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Keyed-wire codec generator
#[derive(Parser, Debug)]
#[command(name = "codexgen")]
#[command(about = "codexgen - serialization codecs for product and sum types")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate codec units from a schema
    Generate {
        /// Schema file (YAML)
        #[arg(short, long)]
        schema: PathBuf,

        /// Generator configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Root directory the output folder is created under
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Override the project name from the configuration
        #[arg(long)]
        project_name: Option<String>,

        /// Override the output folder from the configuration
        #[arg(long)]
        output_folder: Option<String>,

        /// Override the largest supported group arity
        #[arg(long)]
        max_group_arity: Option<usize>,

        /// Also write every module inlined into this single file
        #[arg(long)]
        bundle: Option<PathBuf>,

        /// Report what would be written without touching the filesystem
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a schema without writing anything
    Validate {
        /// Schema file (YAML)
        #[arg(short, long)]
        schema: PathBuf,

        /// Generator configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate example configuration file
    GenConfig {
        /// Output file path
        #[arg(short, long, default_value = "codexgen.yaml")]
        output: PathBuf,
    },
}

/// Written next to the generated units.
#[derive(Debug, Serialize)]
struct Manifest {
    generator: &'static str,
    version: &'static str,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: GenerationReport,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match args.command {
        Commands::Generate {
            schema,
            config,
            output,
            project_name,
            output_folder,
            max_group_arity,
            bundle,
            dry_run,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(name) = project_name {
                config = config.with_project_name(name);
            }
            if let Some(folder) = output_folder {
                config = config.with_output_folder(folder);
            }
            if let Some(arity) = max_group_arity {
                config = config.with_max_group_arity(arity);
            }
            cmd_generate(&schema, config, &output, bundle.as_deref(), dry_run)
        }
        Commands::Validate { schema, config } => {
            cmd_validate(&schema, load_config(config.as_deref())?)
        }
        Commands::GenConfig { output } => cmd_gen_config(&output),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

fn cmd_generate(
    schema: &Path,
    config: GeneratorConfig,
    output: &Path,
    bundle: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let specs = provider::load_schema(schema)
        .with_context(|| format!("loading schema {}", schema.display()))?;
    tracing::info!(schema = %schema.display(), types = specs.len(), "schema loaded");

    let project_name = config.project_name.clone();
    let output_folder = config.output_folder.clone();
    let generation = Generator::new(config)?.generate(&specs)?;
    let report = generation.report(&project_name);

    if dry_run {
        println!("Dry run, nothing written:");
        print_report(&report, output);
        return Ok(());
    }

    let mut sink = DirectorySink::new(output);
    let written = generation
        .write_to(&mut sink)
        .with_context(|| format!("writing units under {}", output.display()))?;

    let manifest = Manifest {
        generator: "codexgen",
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now(),
        report,
    };
    let manifest_path = output.join(&output_folder).join("manifest.json");
    std::fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("writing {}", manifest_path.display()))?;

    if let Some(bundle) = bundle {
        if let Some(parent) = bundle.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(bundle, &generation.bundle)
            .with_context(|| format!("writing bundle {}", bundle.display()))?;
        tracing::info!(path = %bundle.display(), "bundle written");
    }

    print_report(&manifest.report, output);
    println!();
    println!("Wrote {} unit(s) and {}", written, manifest_path.display());
    Ok(())
}

fn cmd_validate(schema: &Path, config: GeneratorConfig) -> anyhow::Result<()> {
    let specs = provider::load_schema(schema)
        .with_context(|| format!("loading schema {}", schema.display()))?;
    let max_arity = config.max_group_arity;

    match Generator::new(config)?.generate(&specs) {
        Ok(generation) => {
            println!("Schema valid!");
            println!();
            println!("Types: {}", specs.len());
            for spec in &specs {
                let codec = spec
                    .codec()
                    .map_or_else(|| "not annotated".to_string(), |c| format!("{c:?}"));
                println!("  {} ({})", spec.name(), codec);
            }
            println!("Units: {}", generation.units.len());
            println!("Group arity limit: {max_arity}");
            Ok(())
        }
        Err(e) => {
            eprintln!("Schema invalid: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_gen_config(output: &Path) -> anyhow::Result<()> {
    let config = GeneratorConfig::default().with_project_name("my-project");
    let content = format!(
        "# codexgen configuration\n# Generated by codexgen gen-config\n\n{}",
        config.to_yaml()?
    );
    std::fs::write(output, content)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Generated configuration file: {}", output.display());
    Ok(())
}

fn print_report(report: &GenerationReport, root: &Path) {
    println!("Project: {}", report.project_name);
    for unit in &report.units {
        println!(
            "  {:<12} {:<24} {} ({} lines)",
            format!("{:?}", unit.kind),
            unit.type_name.as_deref().unwrap_or("-"),
            root.join(&unit.path).display(),
            unit.lines
        );
    }
}
