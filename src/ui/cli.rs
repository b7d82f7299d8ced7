use crate::core::config::Config;
use clap::{Parser, Subcommand};

/// codescout - Index a codebase and find the files relevant to a question
#[derive(Parser, Debug)]
#[command(name = "codescout")]
#[command(about = "A lightweight, in-process codebase indexer with keyword relevance ranking", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print raw JSON instead of a human-readable summary
    #[arg(long, global = true)]
    pub json: bool,

    /// Maximum number of files indexed per project
    #[arg(long, global = true)]
    pub max_files: Option<usize>,

    /// Skip files larger than this many bytes
    #[arg(long, global = true)]
    pub max_file_size: Option<u64>,

    /// Maximum number of concurrent file reads
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index a project directory and print a summary
    Index {
        /// Path to the project directory
        path: String,
    },
    /// Index a project directory, then rank its files against a query
    Search {
        /// Path to the project directory
        path: String,
        /// Free-text query
        query: String,
        /// Maximum number of results to return
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Serve JSON-lines requests on stdin, one response per line on stdout
    Stdio,
}

impl Cli {
    /// Build the indexer configuration from defaults plus any flag overrides
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        if let Some(max_files) = self.max_files {
            config = config.with_max_files(max_files);
        }
        if let Some(max_file_size) = self.max_file_size {
            config = config.with_max_file_size(max_file_size);
        }
        if let Some(concurrency) = self.concurrency {
            config = config.with_read_concurrency(concurrency);
        }
        config
    }
}
