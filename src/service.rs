//! Request/response facade over the scanner, store, and query engine.
//!
//! This is the surface that tool layers (CLI, JSON-lines loop, chat tools)
//! call. Every operation normalizes the project path the same way, so the
//! path a caller scans is the path it later queries.

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::indexing::scanner::{normalize_project_path, ProjectScanner};
use crate::search::query::{rank, tokenize, QueryResult};
use crate::storage::entry::ProjectIndex;
use crate::storage::store::{IndexStore, MemoryIndexStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Client-facing indexing lifecycle of one project path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum IndexState {
    Idle,
    Indexing,
    Ready,
    Error(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub ok: bool,
    pub project_path: String,
    pub file_count: usize,
    pub total_lines: usize,
    pub languages: BTreeMap<String, usize>,
    pub indexed_at: DateTime<Utc>,
    /// Set when a newer scan of the same path stored its index first
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub superseded: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub project_path: String,
    #[serde(default)]
    pub max_files: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub query: String,
    pub total_indexed: usize,
    pub found: usize,
    pub files: Vec<QueryResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub indexed: bool,
    pub status: IndexState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_lines: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<BTreeMap<String, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_at: Option<DateTime<Utc>>,
}

/// Codebase index service shared by all callers of one process
pub struct CodebaseIndex {
    scanner: ProjectScanner,
    store: Arc<dyn IndexStore>,
    // Lifecycle per path, tagged with the generation that last wrote it
    states: RwLock<HashMap<String, (u64, IndexState)>>,
    next_generation: AtomicU64,
}

impl CodebaseIndex {
    /// Create a service backed by a fresh in-memory store
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Arc::new(MemoryIndexStore::new()))
    }

    pub fn with_store(config: Config, store: Arc<dyn IndexStore>) -> Self {
        Self {
            scanner: ProjectScanner::new(config),
            store,
            states: RwLock::new(HashMap::new()),
            next_generation: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &Config {
        self.scanner.config()
    }

    pub fn store(&self) -> &Arc<dyn IndexStore> {
        &self.store
    }

    /// Scan a project and replace its stored index
    pub async fn scan(&self, project_path: &str) -> Result<ScanSummary> {
        let path = normalize_project_path(project_path);
        if path.is_empty() {
            return Err(Error::InvalidInput("projectPath is required".to_string()));
        }

        let generation = self.begin_scan(&path);
        let result = self.scanner.scan(&path, generation).await;
        self.finish_scan(&path, generation, result)
    }

    fn begin_scan(&self, path: &str) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        self.set_state(path, generation, IndexState::Indexing);
        generation
    }

    fn finish_scan(
        &self,
        path: &str,
        generation: u64,
        result: Result<ProjectIndex>,
    ) -> Result<ScanSummary> {
        let index = match result {
            Ok(index) => index,
            Err(e) => {
                self.set_state(path, generation, IndexState::Error(e.to_string()));
                return Err(e);
            }
        };

        let mut summary = ScanSummary {
            ok: true,
            project_path: path.to_string(),
            file_count: index.stats.total_files,
            total_lines: index.stats.total_lines,
            languages: index.stats.languages.clone(),
            indexed_at: index.indexed_at,
            superseded: false,
        };

        // An older scan finishing late must not clobber a newer index
        if self.store.put_if_newer(path, index) {
            self.set_state(path, generation, IndexState::Ready);
        } else {
            info!("Scan {} of {} superseded by a newer scan", generation, path);
            summary.superseded = true;
        }

        Ok(summary)
    }

    /// Rank the files of an indexed project against a free-text query
    pub fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let path = normalize_project_path(&request.project_path);
        if request.query.trim().is_empty() || path.is_empty() {
            return Err(Error::InvalidInput(
                "query and projectPath are required".to_string(),
            ));
        }

        let index = self
            .store
            .get(&path)
            .ok_or_else(|| Error::NotIndexed(path.clone()))?;

        let tokens = tokenize(&request.query);
        let max_files = request
            .max_files
            .unwrap_or(self.config().default_max_results);
        let files = rank(&index, &tokens, max_files, self.config().content_window);

        Ok(QueryResponse {
            query: request.query.clone(),
            total_indexed: index.files.len(),
            found: files.len(),
            files,
        })
    }

    /// Report whether a project is indexed; never fails
    pub fn status(&self, project_path: &str) -> StatusReport {
        let path = normalize_project_path(project_path);
        let status = self.state(&path);

        match self.store.get(&path) {
            Some(index) => StatusReport {
                indexed: true,
                status,
                file_count: Some(index.stats.total_files),
                total_lines: Some(index.stats.total_lines),
                languages: Some(index.stats.languages.clone()),
                indexed_at: Some(index.indexed_at),
            },
            None => StatusReport {
                indexed: false,
                status,
                file_count: None,
                total_lines: None,
                languages: None,
                indexed_at: None,
            },
        }
    }

    /// Drop a project's index and reset its lifecycle; returns whether an index existed
    pub fn unlink(&self, project_path: &str) -> bool {
        let path = normalize_project_path(project_path);
        self.states
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&path);
        self.store.remove(&path).is_some()
    }

    /// Current lifecycle state of a project path
    pub fn state(&self, project_path: &str) -> IndexState {
        let path = normalize_project_path(project_path);
        self.states
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&path)
            .map(|(_, state)| state.clone())
            .unwrap_or(IndexState::Idle)
    }

    /// Record `state` unless a newer scan of `path` has already started
    fn set_state(&self, path: &str, generation: u64, state: IndexState) {
        let mut states = self.states.write().unwrap_or_else(PoisonError::into_inner);
        if let Some((current, _)) = states.get(path) {
            if *current > generation {
                debug!("Ignoring {:?} from stale scan {} of {}", state, generation, path);
                return;
            }
        }
        if let IndexState::Error(message) = &state {
            warn!("Indexing {} failed: {}", path, message);
        }
        states.insert(path.to_string(), (generation, state));
    }
}

impl Default for CodebaseIndex {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
