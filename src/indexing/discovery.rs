use crate::core::config::Config;
use crate::core::error::{Error, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions considered source-relevant
const SOURCE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "py", "go", "rs", "java", "cs", "rb", "css", "scss", "html", "vue",
    "svelte", "json", "yaml", "yml", "md", "mdx", "sh", "sql", "prisma",
];

/// Directories pruned during the walk itself
const PRUNED_DIRS: &[&str] = &["node_modules", ".next", "dist", ".git"];

/// Exclusions applied on top of the project's own .gitignore
const BUILTIN_IGNORES: &[&str] = &[
    "node_modules",
    ".next",
    "dist",
    "build",
    ".git",
    "__pycache__",
    "*.min.js",
    "*.min.css",
    "*.map",
    "*.lock",
    "package-lock.json",
    ".env",
    ".env.*",
    "*.png",
    "*.jpg",
    "*.jpeg",
    "*.gif",
    "*.svg",
    "*.ico",
    "*.woff",
    "*.woff2",
    "*.ttf",
    "*.eot",
    "*.webp",
];

/// Represents a discovered file with its metadata
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    /// Root-relative path with forward slashes
    pub key: String,
}

/// Check that `root` exists and is a directory
pub fn validate_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(Error::NotFound(root.display().to_string()));
    }

    if !root.is_dir() {
        return Err(Error::NotADirectory(root.display().to_string()));
    }

    Ok(())
}

/// Build the ignore matcher: root .gitignore (if any) plus the built-in set
pub fn build_ignore_rules(root: &Path) -> Result<Gitignore> {
    let mut builder = GitignoreBuilder::new(root);

    let gitignore_path = root.join(".gitignore");
    if gitignore_path.is_file() {
        // add() reports problems without failing the whole file
        if let Some(e) = builder.add(&gitignore_path) {
            warn!("Partially loaded {}: {}", gitignore_path.display(), e);
        }
    }

    for pattern in BUILTIN_IGNORES {
        builder.add_line(None, pattern)?;
    }

    Ok(builder.build()?)
}

/// Discover source files under `root`, in walk order, capped at `config.max_files`
pub fn discover_files(root: &Path, config: &Config) -> Result<Vec<DiscoveredFile>> {
    validate_root(root)?;

    let rules = build_ignore_rules(root)?;
    let mut files = Vec::new();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(true)
        .follow_links(config.follow_links)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let name = entry.file_name().to_string_lossy();
            entry.depth() == 0 || !is_dir || !PRUNED_DIRS.iter().any(|dir| *dir == name)
        })
        .build();

    for result in walker {
        if files.len() >= config.max_files {
            break;
        }

        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                // Some files might be inaccessible
                debug!("Failed to access entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        let path = entry.path();
        if !is_source_file(path) {
            continue;
        }

        let Ok(relative_path) = path.strip_prefix(root) else {
            continue;
        };

        if rules
            .matched_path_or_any_parents(relative_path, false)
            .is_ignore()
        {
            continue;
        }

        files.push(DiscoveredFile {
            path: path.to_path_buf(),
            key: relative_path.to_string_lossy().replace('\\', "/"),
            relative_path: relative_path.to_path_buf(),
        });
    }

    Ok(files)
}

/// Check if a file carries one of the source-relevant extensions
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_EXTENSIONS.iter().any(|known| *known == ext))
        .unwrap_or(false)
}
