/// Hard cap on files retained per scan
pub const DEFAULT_MAX_FILES: usize = 500;
/// Files larger than this (in bytes) are skipped
pub const DEFAULT_MAX_FILE_SIZE: u64 = 200_000;
/// Leading characters of content considered when scoring
pub const DEFAULT_CONTENT_WINDOW: usize = 2_000;
pub const DEFAULT_MAX_RESULTS: usize = 12;
pub const DEFAULT_MAX_SYMBOLS: usize = 30;
pub const DEFAULT_MAX_IMPORTS: usize = 20;
pub const DEFAULT_READ_CONCURRENCY: usize = 64;

/// Configuration for codescout
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of files kept in one project index
    pub max_files: usize,
    /// Maximum on-disk size of an indexed file
    pub max_file_size: u64,
    /// Number of leading content characters scanned per query token
    pub content_window: usize,
    /// Result count used when a query does not specify one
    pub default_max_results: usize,
    /// Maximum symbols recorded per file
    pub max_symbols: usize,
    /// Maximum imports recorded per file
    pub max_imports: usize,
    /// Maximum number of file reads in flight during a scan
    pub read_concurrency: usize,
    /// Whether the walker follows symbolic links
    pub follow_links: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            content_window: DEFAULT_CONTENT_WINDOW,
            default_max_results: DEFAULT_MAX_RESULTS,
            max_symbols: DEFAULT_MAX_SYMBOLS,
            max_imports: DEFAULT_MAX_IMPORTS,
            read_concurrency: DEFAULT_READ_CONCURRENCY,
            follow_links: false,
        }
    }
}

impl Config {
    /// Create a configuration with the default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_content_window(mut self, content_window: usize) -> Self {
        self.content_window = content_window;
        self
    }

    pub fn with_default_max_results(mut self, max_results: usize) -> Self {
        self.default_max_results = max_results;
        self
    }

    /// Set the read concurrency; zero is bumped to one so scans always make progress
    pub fn with_read_concurrency(mut self, read_concurrency: usize) -> Self {
        self.read_concurrency = read_concurrency.max(1);
        self
    }
}
