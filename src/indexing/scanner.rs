use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::indexing::discovery::{discover_files, DiscoveredFile};
use crate::indexing::extract::extract;
use crate::indexing::language::detect_language;
use crate::storage::entry::{IndexEntry, ProjectIndex};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Trim whitespace and surrounding quote characters from a user-supplied path
pub fn normalize_project_path(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .trim()
        .to_string()
}

/// Walks a project directory and builds a [`ProjectIndex`] from it
#[derive(Debug, Clone)]
pub struct ProjectScanner {
    config: Arc<Config>,
}

impl ProjectScanner {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan `project_path` and return a complete index stamped with `generation`.
    ///
    /// Files that cannot be stat'ed or read, or that exceed the size cap, are
    /// left out; only an invalid root fails the scan.
    pub async fn scan(&self, project_path: &str, generation: u64) -> Result<ProjectIndex> {
        let normalized = normalize_project_path(project_path);
        if normalized.is_empty() {
            return Err(Error::InvalidInput("projectPath is required".to_string()));
        }

        let started = Instant::now();
        info!("Scanning {}", normalized);

        let root = PathBuf::from(&normalized);
        let config = Arc::clone(&self.config);
        let files = tokio::task::spawn_blocking(move || discover_files(&root, &config))
            .await
            .map_err(|e| Error::Unknown(format!("File discovery task failed: {}", e)))??;

        let candidates = files.len();
        let entries = self.read_entries(files).await;

        let index = ProjectIndex::new(normalized, entries, generation);
        info!(
            "Indexed {} of {} files ({} lines) in {} in {:?}",
            index.stats.total_files,
            candidates,
            index.stats.total_lines,
            index.project_path,
            started.elapsed()
        );

        Ok(index)
    }

    /// Read and analyze files concurrently, returning entries in discovery order
    async fn read_entries(&self, files: Vec<DiscoveredFile>) -> Vec<IndexEntry> {
        let semaphore = Arc::new(Semaphore::new(self.config.read_concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for (order, file) in files.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let config = Arc::clone(&self.config);

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                match read_entry(&file, &config).await {
                    Ok(Some(entry)) => Some((order, entry)),
                    Ok(None) => None,
                    Err(e) => {
                        debug!("Skipping {}: {}", file.key, e);
                        None
                    }
                }
            });
        }

        let mut indexed = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(item)) => indexed.push(item),
                Ok(None) => {}
                Err(e) => warn!("File read task failed: {}", e),
            }
        }

        indexed.sort_by_key(|(order, _)| *order);
        indexed.into_iter().map(|(_, entry)| entry).collect()
    }
}

/// Build the entry for one file, or `None` when it is over the size cap
async fn read_entry(file: &DiscoveredFile, config: &Config) -> Result<Option<IndexEntry>> {
    let metadata = tokio::fs::metadata(&file.path).await?;
    if metadata.len() > config.max_file_size {
        debug!("Skipping {} ({} bytes)", file.key, metadata.len());
        return Ok(None);
    }

    // Invalid UTF-8 is replaced, not rejected
    let bytes = tokio::fs::read(&file.path).await?;
    let content = String::from_utf8_lossy(&bytes).into_owned();
    let language = detect_language(&file.key);
    let extracted = extract(&content, language, config.max_symbols, config.max_imports);
    let last_modified: DateTime<Utc> = metadata.modified()?.into();

    Ok(Some(IndexEntry {
        file_path: file.key.clone(),
        language: language.to_string(),
        content,
        symbols: extracted.symbols,
        imports: extracted.imports,
        size: metadata.len(),
        last_modified,
    }))
}
