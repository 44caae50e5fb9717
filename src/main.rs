use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use sectioner::{
    analyzer, emitter, summarizer, AnalysisStore, AnalyzeConfig, DocumentProfile, OracleClient,
    SegmentationEngine,
};

#[derive(Parser)]
#[command(name = "sectioner", version, about = "Split documents into coherent sections and batch-analyze stored records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split a document into sections using oracle hints plus structural patterns
    Split {
        /// Input text file
        input: PathBuf,
        /// Directory for the emitted sections
        output_dir: PathBuf,
        /// Document profile to apply
        #[arg(long, value_enum, default_value_t = Kind::Semantic)]
        kind: Kind,
        /// Oracle model (defaults to the profile's model)
        #[arg(long)]
        model: Option<String>,
        /// Analysis window size in bytes
        #[arg(long)]
        chunk_size: Option<usize>,
        /// Overlap between windows in bytes
        #[arg(long)]
        overlap: Option<usize>,
        /// Minimum section length in bytes
        #[arg(long)]
        min_section: Option<usize>,
        #[arg(long, default_value = "http://localhost:11434")]
        endpoint: String,
    },
    /// Batch-analyze unprocessed database rows and write metadata back
    Analyze {
        /// Path to the sqlite database
        db_path: PathBuf,
        #[arg(long, default_value = "mistral")]
        model: String,
        /// Max rows to process in this run
        #[arg(long, default_value_t = 200)]
        limit: usize,
        /// Token budget per oracle call
        #[arg(long, default_value_t = 100_000)]
        budget: usize,
        /// Delay between oracle calls, in seconds
        #[arg(long, default_value_t = 3)]
        delay_secs: u64,
        /// Retries per oracle call
        #[arg(long, default_value_t = 3)]
        retries: u32,
        #[arg(long, default_value = "http://localhost:11434")]
        endpoint: String,
    },
    /// Write a companion summary file for each markdown document in a folder
    Summarize {
        /// Folder containing markdown files (not searched recursively)
        folder: PathBuf,
        #[arg(long, default_value = "mistral")]
        model: String,
        #[arg(long, default_value = "http://localhost:11434")]
        endpoint: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Semantic,
    Legal,
    Meeting,
}

impl Kind {
    fn profile(self) -> DocumentProfile {
        match self {
            Kind::Semantic => DocumentProfile::semantic(),
            Kind::Legal => DocumentProfile::legal(),
            Kind::Meeting => DocumentProfile::meeting(),
        }
    }
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Split {
            input,
            output_dir,
            kind,
            model,
            chunk_size,
            overlap,
            min_section,
            endpoint,
        } => {
            let profile = kind.profile();
            let mut config = profile.default_config(&endpoint);
            if let Some(model) = model {
                config.model = model;
            }
            if let Some(chunk_size) = chunk_size {
                config.chunk_size = chunk_size;
            }
            if let Some(overlap) = overlap {
                config.overlap = overlap;
            }
            if let Some(min_section) = min_section {
                config.min_section = min_section;
            }

            let full_text = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read input file {}", input.display()))?;

            let oracle = OracleClient::new(&config.endpoint, &config.model);
            let engine = SegmentationEngine::new(profile, config)?;
            let boundaries = engine.split(&oracle, &full_text)?;

            let segments = emitter::materialize(&full_text, &boundaries);
            let written = emitter::write_segments(&output_dir, &segments, engine.profile())?;

            println!("Created {} sections in {}", written.len(), output_dir.display());
        }
        Command::Analyze {
            db_path,
            model,
            limit,
            budget,
            delay_secs,
            retries,
            endpoint,
        } => {
            let config = AnalyzeConfig {
                endpoint,
                model,
                limit,
                token_budget: budget,
                max_retries: retries,
                request_delay: Duration::from_secs(delay_secs),
                ..AnalyzeConfig::default()
            };
            config.validate()?;

            let store = AnalysisStore::open(&db_path.to_string_lossy())?;
            let oracle =
                OracleClient::new(&config.endpoint, &config.model).with_retries(config.max_retries);

            let report = analyzer::run(&store, &oracle, &config)?;
            println!(
                "Analyzed {} of {} records across {} batches ({} batch failures)",
                report.updated, report.fetched, report.batches, report.failed_batches
            );
        }
        Command::Summarize {
            folder,
            model,
            endpoint,
        } => {
            let oracle = OracleClient::new(&endpoint, &model);
            let report = summarizer::run(&folder, &oracle)?;
            println!(
                "Summarized {} of {} markdown files ({} failed)",
                report.summarized, report.candidates, report.failed
            );
        }
    }

    Ok(())
}
