//! CLI entry point for gm-codegen

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gm_codegen::codegen::TargetLanguage;
use gm_codegen::config::{defaults, CodegenConfig};

#[derive(Parser)]
#[command(name = "gm-codegen")]
#[command(about = "Generate struct definitions from MySQL table metadata")]
#[command(version)]
struct Cli {
    /// Path to configuration file (INI with a [mysql] section)
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    config: PathBuf,

    /// Output directory (overrides genDir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Comma-separated table names (overrides tables)
    #[arg(short, long)]
    tables: Option<String>,

    /// Target language (overrides lang)
    #[arg(short, long, value_enum)]
    lang: Option<TargetLanguage>,

    /// Skip the formatting step
    #[arg(long)]
    no_format: bool,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one file per configured table
    Generate,
    /// Inspect schema (show column metadata for debugging)
    Inspect,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration first (before logging, so the debug flag can pick the level)
    let config = CodegenConfig::load(&cli.config);

    // Priority: RUST_LOG env var > debug = true > info
    let log_level = match &config {
        Ok(config) => config.log_level(),
        Err(_) => "info",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(anyhow::Error::new(e).context("Failed to load config")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, mut config: CodegenConfig) -> Result<()> {
    // Apply CLI overrides
    if let Some(output) = cli.output {
        config.gen_dir = output;
    }
    if let Some(tables) = cli.tables {
        config.tables = tables;
    }
    if let Some(lang) = cli.lang {
        config.lang = lang;
    }
    if cli.no_format {
        config.formatter = defaults::FORMATTER_NONE.to_string();
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    if let Some(Commands::Inspect) = cli.command {
        return inspect_schema(&config).await;
    }

    info!("Generating code from tables: {}", config.tables);
    let dry_run = config.dry_run;
    gm_codegen::generate_with(&config, |file| {
        if dry_run {
            println!(
                "Would generate {} ({}) for table {}",
                file.path.display(),
                file.struct_name,
                file.table
            );
        } else {
            println!("Successfully generated file for table {}", file.table);
        }
    })
    .await
    .context("Code generation failed")?;

    info!("Code generation completed successfully");
    Ok(())
}

async fn inspect_schema(config: &CodegenConfig) -> Result<()> {
    let tables = gm_codegen::inspect(config)
        .await
        .context("Schema inspection failed")?;

    for table in &tables {
        println!("Table: {}", table.name);
        if table.columns.is_empty() {
            println!("  (no columns - table missing or empty)");
        }
        for col in &table.columns {
            let nullable = if col.nullable { "NULL" } else { "NOT NULL" };
            let key = if col.key.is_empty() {
                String::new()
            } else {
                format!(" [{}]", col.key)
            };
            println!("  - {} {} {}{}", col.name, col.column_type, nullable, key);
            if !col.comment.is_empty() {
                println!("      {}", col.comment);
            }
        }
        let pk = table.primary_key_columns();
        if !pk.is_empty() {
            println!("  Primary Key: {:?}", pk);
        }
        println!();
    }

    Ok(())
}
