// Core functionality
pub mod core {
    pub mod config;
    pub mod error;
}

// Data storage
pub mod storage {
    pub mod entry;
    pub mod store;
}

// Indexing pipeline
pub mod indexing {
    pub mod discovery;
    pub mod extract;
    pub mod language;
    pub mod scanner;
}

// Ranking
pub mod search {
    pub mod query;
}

pub mod service;

// User interfaces
pub mod ui {
    pub mod cli;
    pub mod stdio;
}

// Re-export commonly used types
pub use self::core::config::Config;
pub use self::core::error::{Error, Result};
pub use indexing::discovery::discover_files;
pub use indexing::language::detect_language;
pub use indexing::scanner::{normalize_project_path, ProjectScanner};
pub use search::query::{rank, tokenize, QueryResult};
pub use service::{
    CodebaseIndex, IndexState, QueryRequest, QueryResponse, ScanSummary, StatusReport,
};
pub use storage::entry::{IndexEntry, IndexStats, ProjectIndex};
pub use storage::store::{IndexStore, MemoryIndexStore};
pub use ui::cli::Cli;
