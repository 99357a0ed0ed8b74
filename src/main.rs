//! CLI entry point for the movie ratings analysis tool.
//!
//! Loads the title basics and ratings files, builds the cleaned working set
//! and either runs the five analyses or exports the working set.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use movie_stats::analyzers::Analysis;
use movie_stats::analyzers::analyzer::run_all;
use movie_stats::config::AnalysisConfig;
use movie_stats::loader::{LoadOptions, load_ratings, load_titles};
use movie_stats::output::{
    write_report, write_top_rated, write_top_voted, write_working_set, write_working_set_summary,
};
use movie_stats::pipeline::{WorkingSet, build_working_set};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "movie_stats")]
#[command(about = "Summarize movie ratings from title and rating dumps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all analyses, print the summary tables and optionally write report files
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Directory to write one CSV per analysis plus report.json
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Only write these tables (repeatable); defaults to all
        #[arg(long, value_enum)]
        only: Vec<Analysis>,
    },
    /// Build the cleaned working set and write it as CSV
    Clean {
        #[command(flatten)]
        input: InputArgs,

        /// CSV file to write the working set to
        #[arg(short, long, default_value = "working_set.csv")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Headerless title basics file (.gz is decompressed)
    #[arg(long, env = "MOVIE_BASICS_PATH", default_value = "title.basics.csv")]
    basics: PathBuf,

    /// Headerless ratings file (.gz is decompressed)
    #[arg(long, env = "MOVIE_RATINGS_PATH", default_value = "title.ratings.csv")]
    ratings: PathBuf,

    /// Field delimiter, e.g. "\t" for the upstream .tsv dumps
    #[arg(short, long, default_value = ",")]
    delimiter: String,

    /// Treat double quotes as ordinary characters
    #[arg(long, default_value_t = false)]
    no_quoting: bool,

    /// JSON file overriding the analysis thresholds
    #[arg(short, long, env = "MOVIE_STATS_CONFIG")]
    config: Option<PathBuf>,
}

impl InputArgs {
    fn load_options(&self) -> Result<LoadOptions> {
        let delimiter = match self.delimiter.as_str() {
            "\\t" | "tab" => b'\t',
            d if d.len() == 1 => d.as_bytes()[0],
            other => bail!("Delimiter must be a single byte, got {other:?}"),
        };
        Ok(LoadOptions {
            delimiter,
            quoting: !self.no_quoting,
        })
    }

    fn working_set(&self, config: &AnalysisConfig) -> Result<WorkingSet> {
        let options = self.load_options()?;
        let titles = load_titles(&self.basics, &options)?;
        let ratings = load_ratings(&self.ratings, &options)?;
        Ok(build_working_set(&titles, &ratings, config))
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/movie_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("movie_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output_dir,
            only,
        } => {
            let config = AnalysisConfig::load_or_default(input.config.as_deref())?;
            let working_set = input.working_set(&config)?;
            let report = run_all(&working_set, &config);

            let mut stdout = std::io::stdout().lock();
            write_working_set_summary(&mut stdout, &working_set, config.sample_rows)?;
            write_top_rated(&mut stdout, config.recent_since_year, &report.top_rated_since)?;
            write_top_voted(&mut stdout, &report.top_voted_by_genre)?;
            stdout.flush()?;

            if let Some(dir) = output_dir {
                let only = if only.is_empty() {
                    Analysis::ALL.to_vec()
                } else {
                    only
                };
                write_report(&dir, &report, &only)
                    .with_context(|| format!("writing report to {}", dir.display()))?;
            } else {
                info!("No output directory given, skipping report files");
            }
        }
        Commands::Clean { input, output } => {
            let config = AnalysisConfig::load_or_default(input.config.as_deref())?;
            let working_set = input.working_set(&config)?;

            let mut stdout = std::io::stdout().lock();
            write_working_set_summary(&mut stdout, &working_set, config.sample_rows)?;
            stdout.flush()?;

            write_working_set(&output, &working_set.records)?;
        }
    }

    Ok(())
}
