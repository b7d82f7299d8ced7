use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata for one indexed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    /// Root-relative path, forward slashes
    pub file_path: String,
    /// Language tag from the classifier
    pub language: String,
    /// File text at scan time
    pub content: String,
    /// Declared names, first-seen order, no duplicates
    pub symbols: Vec<String>,
    /// Import targets, first-seen order, no duplicates
    pub imports: Vec<String>,
    /// Size on disk in bytes
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

impl IndexEntry {
    /// Number of lines, counting a trailing empty line after a final newline
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }
}

/// Aggregate counters derived from the files of a project index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub total_files: usize,
    pub total_lines: usize,
    pub languages: BTreeMap<String, usize>,
}

impl IndexStats {
    pub fn from_entries(entries: &[IndexEntry]) -> Self {
        let mut stats = Self {
            total_files: entries.len(),
            ..Self::default()
        };
        for entry in entries {
            stats.total_lines += entry.line_count();
            *stats.languages.entry(entry.language.clone()).or_insert(0) += 1;
        }
        stats
    }
}

/// Complete scan result for one project directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIndex {
    /// Normalized project path, the store key
    pub project_path: String,
    pub indexed_at: DateTime<Utc>,
    pub files: Vec<IndexEntry>,
    pub stats: IndexStats,
    /// Monotonic scan number; a higher generation started later
    #[serde(default)]
    pub generation: u64,
}

impl ProjectIndex {
    /// Assemble an index, deriving stats from `files`
    pub fn new(project_path: String, files: Vec<IndexEntry>, generation: u64) -> Self {
        let stats = IndexStats::from_entries(&files);
        Self {
            project_path,
            indexed_at: Utc::now(),
            files,
            stats,
            generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, language: &str, content: &str) -> IndexEntry {
        IndexEntry {
            file_path: path.to_string(),
            language: language.to_string(),
            content: content.to_string(),
            symbols: Vec::new(),
            imports: Vec::new(),
            size: content.len() as u64,
            last_modified: Utc::now(),
        }
    }

    #[test]
    fn test_line_count() {
        assert_eq!(entry("a", "text", "").line_count(), 1);
        assert_eq!(entry("a", "text", "one").line_count(), 1);
        assert_eq!(entry("a", "text", "one\ntwo\n").line_count(), 3);
    }

    #[test]
    fn test_stats_from_entries() {
        let files = vec![
            entry("a.ts", "typescript", "a\nb"),
            entry("b.ts", "typescript", "c"),
            entry("c.py", "python", "d\ne\nf"),
        ];
        let stats = IndexStats::from_entries(&files);
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_lines, 6);
        assert_eq!(stats.languages.get("typescript"), Some(&2));
        assert_eq!(stats.languages.get("python"), Some(&1));
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let json = serde_json::to_value(entry("src/a.ts", "typescript", "x")).unwrap();
        assert_eq!(json["filePath"], "src/a.ts");
        assert!(json.get("lastModified").is_some());
    }
}
