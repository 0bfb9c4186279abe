pub mod config;
pub mod rank;
pub mod search;
pub mod ui;

pub use config::handle_config;
pub use rank::handle_rank;
pub use search::handle_search;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use ranker_config::{Config, ConfigBuilder, ConfigOverrides, ErrorFormatter};
use ranker_core::scanner::scan_documents;
use ranker_core::QueryResult;
use ranker_pipeline::{load_documents, load_query, LoadReport, Retriever};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "ranker")]
#[command(about = "Rank resumes against a job description with semantic search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Retrieve the best matching resume chunks and ask the LLM to rank them
    Rank {
        #[command(flatten)]
        retrieval: RetrievalArgs,

        /// Where the generated ranking is written
        #[arg(short, long, value_name = "FILE", default_value = "output.txt")]
        output: PathBuf,
    },
    /// Print the best matching resume chunks without calling the LLM
    Search {
        #[command(flatten)]
        retrieval: RetrievalArgs,

        /// Emit results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Args, Debug, Clone)]
pub struct RetrievalArgs {
    /// Job description (plain text or PDF)
    #[arg(short, long, value_name = "FILE")]
    pub job: PathBuf,

    /// Directory holding the candidate resumes
    #[arg(short, long, value_name = "DIR")]
    pub resumes: PathBuf,

    /// Number of chunks to retrieve
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Chunk size in characters
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Overlap between consecutive chunks in characters
    #[arg(long)]
    pub chunk_overlap: Option<usize>,
}

impl RetrievalArgs {
    /// Flags given on the command line; each one set wins over file and env
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            top_k: self.top_k,
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
        }
    }
}

/// defaults < config file < RANKER_* env < command-line flags
pub fn load_config(config_path: Option<&Path>, args: Option<&RetrievalArgs>) -> Result<Config> {
    let mut builder = match config_path {
        Some(path) => ConfigBuilder::new().with_file(path),
        None => ConfigBuilder::new().with_default_file(),
    };
    builder = builder.with_env();
    if let Some(args) = args {
        builder = builder.with_overrides(args.overrides());
    }
    builder
        .build()
        .map_err(|err| anyhow!(ErrorFormatter::new(err).format()))
}

pub struct Retrieval {
    pub query: String,
    pub report: LoadReport,
    pub results: Vec<QueryResult>,
    pub model: String,
}

/// Scan, load and retrieve; shared by `rank` and `search`.
pub async fn run_retrieval(config: &Config, args: &RetrievalArgs) -> Result<Retrieval> {
    let query = load_query(&args.job).await?;

    let paths = scan_documents(&args.resumes, &config.input)
        .with_context(|| format!("failed to scan {}", args.resumes.display()))?;
    info!("Found {} candidate files in {}", paths.len(), args.resumes.display());
    let report = load_documents(paths, config.input.concurrency).await?;

    let embedder = ranker_embed::select_embedder(&config.embedding).await?;
    let model = embedder.model_id().to_string();
    let retriever = Retriever::from_config(embedder, config)?;
    let results = retriever
        .retrieve_top_k(&query, &report.documents, config.search.top_k)
        .await?;

    Ok(Retrieval {
        query,
        report,
        results,
        model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_cli_parses_rank() {
        let cli = Cli::try_parse_from([
            "ranker", "rank", "--job", "jd.txt", "--resumes", "cvs", "-k", "5", "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Rank { retrieval, output } => {
                assert_eq!(retrieval.top_k, Some(5));
                assert_eq!(retrieval.chunk_size, None);
                assert_eq!(output, PathBuf::from("output.txt"));
            }
            _ => panic!("expected rank"),
        }
    }

    fn args(top_k: Option<usize>, chunk_size: Option<usize>) -> RetrievalArgs {
        RetrievalArgs {
            job: PathBuf::from("jd.txt"),
            resumes: PathBuf::from("cvs"),
            top_k,
            chunk_size,
            chunk_overlap: None,
        }
    }

    #[test]
    fn test_flags_become_overrides() {
        let overrides = args(Some(7), Some(500)).overrides();
        assert_eq!(overrides.top_k, Some(7));
        assert_eq!(overrides.chunk_size, Some(500));
        assert_eq!(overrides.chunk_overlap, None);
    }

    #[test]
    fn test_flags_win_over_config_file_even_at_default_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranker.yml");
        fs::write(&path, "search:\n  top_k: 5\nchunking:\n  chunk_size: 400\n").unwrap();

        let config = load_config(Some(&path), Some(&args(Some(3), Some(1000)))).unwrap();
        assert_eq!(config.search.top_k, 3);
        assert_eq!(config.chunking.chunk_size, 1000);

        let config = load_config(Some(&path), Some(&args(None, None))).unwrap();
        assert_eq!(config.search.top_k, 5);
        assert_eq!(config.chunking.chunk_size, 400);
    }
}
