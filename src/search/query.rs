use crate::storage::entry::{IndexEntry, ProjectIndex};
use serde::{Deserialize, Serialize};

// Per-token weights
const SCORE_PATH_MATCH: u32 = 5;
const SCORE_SYMBOL_MATCH: u32 = 4;
const SCORE_IMPORT_MATCH: u32 = 2;
const SCORE_CONTENT_CAP: u32 = 5;

/// Flat bonus for files whose path looks like shared definitions
const SCORE_KEY_FILE_BONUS: u32 = 1;
const KEY_FILE_MARKERS: &[&str] = &["config", "schema", "types", "index"];

/// Tokens no longer than this are dropped
const MIN_TOKEN_LEN: usize = 2;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "you", "are", "was", "but", "not", "all",
    "can", "her", "his", "they", "new", "one", "our", "add", "get", "set", "use", "has", "have",
];

/// An index entry paired with its score for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(flatten)]
    pub entry: IndexEntry,
    pub relevance_score: u32,
}

/// Split a free-text query into lowercase keywords.
///
/// Anything outside `[a-z0-9]` and whitespace becomes a separator; short
/// tokens and stop words are dropped. Repeated words are kept and count once
/// per occurrence when scoring.
pub fn tokenize(query: &str) -> Vec<String> {
    let cleaned: String = query
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.len() > MIN_TOKEN_LEN && !STOP_WORDS.iter().any(|stop| stop == token))
        .map(str::to_string)
        .collect()
}

/// Score one file against the query tokens
pub fn score_entry(entry: &IndexEntry, tokens: &[String], content_window: usize) -> u32 {
    let path = entry.file_path.to_lowercase();
    let symbols = entry.symbols.join(" ").to_lowercase();
    let imports = entry.imports.join(" ").to_lowercase();
    let preview: String = entry.content.chars().take(content_window).collect();
    let preview = preview.to_lowercase();

    let mut score = 0;
    for token in tokens {
        let token = token.as_str();
        if path.contains(token) {
            score += SCORE_PATH_MATCH;
        }
        if symbols.contains(token) {
            score += SCORE_SYMBOL_MATCH;
        }
        if imports.contains(token) {
            score += SCORE_IMPORT_MATCH;
        }
        let occurrences = preview.matches(token).take(SCORE_CONTENT_CAP as usize).count();
        score += occurrences as u32;
    }

    if KEY_FILE_MARKERS.iter().any(|marker| path.contains(marker)) {
        score += SCORE_KEY_FILE_BONUS;
    }

    score
}

/// Rank the files of `index` against `tokens`.
///
/// Files scoring zero are dropped. The key-file bonus counts toward the
/// score, so a config or index file can surface on the bonus alone. The sort
/// is stable, so equal scores keep scan order. At most `max_files` results
/// are returned.
pub fn rank(
    index: &ProjectIndex,
    tokens: &[String],
    max_files: usize,
    content_window: usize,
) -> Vec<QueryResult> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(u32, &IndexEntry)> = index
        .files
        .iter()
        .map(|entry| (score_entry(entry, tokens, content_window), entry))
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(max_files);

    scored
        .into_iter()
        .map(|(relevance_score, entry)| QueryResult {
            entry: entry.clone(),
            relevance_score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(path: &str, symbols: &[&str], imports: &[&str], content: &str) -> IndexEntry {
        IndexEntry {
            file_path: path.to_string(),
            language: "typescript".to_string(),
            content: content.to_string(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            imports: imports.iter().map(|s| s.to_string()).collect(),
            size: content.len() as u64,
            last_modified: Utc::now(),
        }
    }

    fn project(files: Vec<IndexEntry>) -> ProjectIndex {
        ProjectIndex::new("/project".to_string(), files, 0)
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Fix the Login-Button in auth_view!"),
            vec!["fix", "login", "button", "auth", "view"]
        );
    }

    #[test]
    fn test_tokenize_drops_short_and_stop_words() {
        assert!(tokenize("the and for").is_empty());
        assert!(tokenize("a an to of").is_empty());
        assert!(tokenize("").is_empty());
        assert_eq!(tokenize("get user settings"), vec!["user", "settings"]);
    }

    #[test]
    fn test_score_path_symbol_and_bonus() {
        let file = entry("auth/config.ts", &["login"], &[], "");
        let tokens = tokenize("login config");
        assert_eq!(score_entry(&file, &tokens, 2_000), 5 + 4 + 1);
    }

    #[test]
    fn test_score_imports_and_content() {
        let file = entry("src/app.ts", &[], &["react-router"], "router router");
        let tokens = tokenize("router");
        // import match plus two content occurrences
        assert_eq!(score_entry(&file, &tokens, 2_000), 2 + 2);
    }

    #[test]
    fn test_score_content_is_capped() {
        let file = entry("src/app.ts", &[], &[], &"cache ".repeat(40));
        let tokens = tokenize("cache");
        assert_eq!(score_entry(&file, &tokens, 2_000), 5);
    }

    #[test]
    fn test_score_content_window() {
        let content = format!("{}needle", "x".repeat(2_000));
        let file = entry("src/app.ts", &[], &[], &content);
        let tokens = tokenize("needle");
        assert_eq!(score_entry(&file, &tokens, 2_000), 0);
        assert_eq!(score_entry(&file, &tokens, 2_006), 1);
    }

    #[test]
    fn test_key_file_bonus_alone_surfaces_file() {
        let index = project(vec![
            entry("src/index.ts", &[], &[], "nothing here"),
            entry("src/app.ts", &[], &[], "nothing here"),
        ]);
        let results = rank(&index, &tokenize("payment"), 12, 2_000);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.file_path, "src/index.ts");
        assert_eq!(results[0].relevance_score, 1);
    }

    #[test]
    fn test_rank_sorts_and_truncates() {
        let index = project(vec![
            entry("src/misc.ts", &[], &[], "payment"),
            entry("src/payment/service.ts", &["processPayment"], &[], "payment"),
            entry("src/other.ts", &[], &[], "unrelated"),
            entry("src/billing.ts", &[], &["./payment"], ""),
        ]);
        let tokens = tokenize("payment");

        let results = rank(&index, &tokens, 12, 2_000);
        let paths: Vec<&str> = results.iter().map(|r| r.entry.file_path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["src/payment/service.ts", "src/billing.ts", "src/misc.ts"]
        );
        assert!(results.windows(2).all(|w| w[0].relevance_score >= w[1].relevance_score));
        assert!(results.iter().all(|r| r.relevance_score > 0));

        let limited = rank(&index, &tokens, 1, 2_000);
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].entry.file_path, "src/payment/service.ts");
    }

    #[test]
    fn test_rank_ties_keep_scan_order() {
        let index = project(vec![
            entry("b.ts", &[], &[], "widget"),
            entry("a.ts", &[], &[], "widget"),
            entry("c.ts", &[], &[], "widget"),
        ]);
        let results = rank(&index, &tokenize("widget"), 12, 2_000);
        let paths: Vec<&str> = results.iter().map(|r| r.entry.file_path.as_str()).collect();
        assert_eq!(paths, vec!["b.ts", "a.ts", "c.ts"]);
    }

    #[test]
    fn test_query_result_serializes_flat() {
        let result = QueryResult {
            entry: entry("src/a.ts", &[], &[], ""),
            relevance_score: 7,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["filePath"], "src/a.ts");
        assert_eq!(json["relevanceScore"], 7);
    }
}
