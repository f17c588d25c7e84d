use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use genome::cli::{self, ConfigOverrides, OutputFormat, OutputWriter, ProgressReporter};
use genome::config::{GenomeConfig, GENOME_DIR};
use genome::extractors;
use genome::genome::{GenomePipeline, Pipeline};
use genome::watcher::{ChangeWatcher, PipelineFactory};

#[derive(Parser)]
#[command(name = "genome")]
#[command(about = "Structural summaries of a source repository, kept fresh as files change", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the repository and write the genome
    Generate {
        /// Repository root
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Genome output path (relative to root unless absolute)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of parallel workers (defaults to min(CPU count, 8))
        #[arg(short, long)]
        workers: Option<usize>,

        /// Batch size for aggregation work
        #[arg(long)]
        batch_size: Option<usize>,

        /// Extra ignore substrings
        #[arg(long)]
        ignore: Vec<String>,

        /// Only update files that changed since the last genome
        #[arg(long)]
        incremental: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Watch the repository and regenerate after changes settle
    Watch {
        /// Repository root
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Seconds of quiet before regenerating
        #[arg(short, long)]
        debounce: Option<f64>,

        /// Genome output path (relative to root unless absolute)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of parallel workers
        #[arg(short, long)]
        workers: Option<usize>,

        /// Extra ignore substrings
        #[arg(long)]
        ignore: Vec<String>,
    },

    /// Print the structural summary of individual files
    Extract {
        /// Files to analyze
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormatArg,
    },
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormatArg {
    /// Pretty-printed JSON
    Json,
    /// Newline-delimited JSON (streaming)
    Ndjson,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Ndjson => OutputFormat::Ndjson,
        }
    }
}

/// Console layer on stderr, plus a daily rolling file under `<root>/.genome/logs`
/// when a root is known. Returned guards must outlive the program.
fn init_logging(root: Option<&Path>) -> Vec<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("genome=info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let mut guards = Vec::new();
    let (console, console_guard) = non_blocking(std::io::stderr());
    guards.push(console_guard);

    let file_layer = root.and_then(|root| {
        let logs_dir = root.join(GENOME_DIR).join("logs");
        if let Err(e) = fs::create_dir_all(&logs_dir) {
            eprintln!("Failed to create logs directory {}: {}", logs_dir.display(), e);
            return None;
        }
        let (file, file_guard) = non_blocking(rolling::daily(&logs_dir, "genome.log"));
        guards.push(file_guard);
        Some(
            fmt::layer()
                .with_writer(file)
                .with_target(true)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(console)
                .with_target(false)
                .with_ansi(true),
        )
        .with(file_layer)
        .init();

    guards
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            root,
            output,
            workers,
            batch_size,
            ignore,
            incremental,
            quiet,
        } => {
            let _guards = init_logging(Some(&root));
            let config = cli::resolve_config(
                &root,
                ConfigOverrides {
                    output,
                    workers,
                    batch_size,
                    ignore,
                    ..Default::default()
                },
            )?;
            generate(&root, config, incremental, quiet).await
        }
        Commands::Watch {
            root,
            debounce,
            output,
            workers,
            ignore,
        } => {
            let _guards = init_logging(Some(&root));
            let config = cli::resolve_config(
                &root,
                ConfigOverrides {
                    output,
                    workers,
                    debounce_secs: debounce,
                    ignore,
                    ..Default::default()
                },
            )?;
            watch(&root, config).await
        }
        Commands::Extract { files, format } => {
            let _guards = init_logging(None);
            extract(&files, format.into())
        }
    }
}

async fn generate(root: &Path, config: GenomeConfig, incremental: bool, quiet: bool) -> Result<()> {
    let reporter = Arc::new(if quiet {
        ProgressReporter::quiet()
    } else {
        ProgressReporter::new()
    });
    let callback = reporter.callback();
    let root = root.to_path_buf();

    let (genome, output) = tokio::task::spawn_blocking(move || -> Result<_> {
        let mut pipeline = GenomePipeline::new(&root, config)?.with_progress(callback);
        let changed = if incremental {
            pipeline.refresh_set()
        } else {
            BTreeSet::new()
        };
        let genome = pipeline.generate(incremental, &changed)?;
        Ok((genome, pipeline.output_path()))
    })
    .await
    .context("Generation task failed")??;

    genome.save(&output)?;
    reporter.complete(genome.len());
    info!(
        "🧬 {} files, {} functions, {} types, {} imports ({} with errors)",
        genome.stats.files,
        genome.stats.functions,
        genome.stats.types,
        genome.stats.imports,
        genome.stats.files_with_errors
    );
    Ok(())
}

async fn watch(root: &Path, config: GenomeConfig) -> Result<()> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Cannot watch {}", root.display()))?;

    if !config.output_path(&root).exists() {
        info!("No genome yet, running initial generation");
        generate(&root, config.clone(), false, true).await?;
    }

    let factory_root = root.clone();
    let factory_config = config.clone();
    let factory: Arc<PipelineFactory> = Arc::new(move || -> genome::error::Result<Box<dyn Pipeline>> {
        let pipeline = GenomePipeline::new(&factory_root, factory_config.clone())?;
        Ok(Box::new(pipeline) as Box<dyn Pipeline>)
    });

    let mut watcher = ChangeWatcher::new(&root, &config, factory)?;
    watcher.start()?;
    info!("Watching {} (Ctrl-C to stop)", root.display());

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
    }
    watcher.stop();
    Ok(())
}

fn extract(files: &[PathBuf], format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut writer = OutputWriter::new(format, stdout.lock());
    for file in files {
        let summary = extractors::analyze(file);
        writer.write_summary(&file.to_string_lossy(), &summary)?;
    }
    let _stdout = writer.finish()?;
    Ok(())
}
