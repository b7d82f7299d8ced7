//! Best-effort lexical extraction of symbols and imports.
//!
//! Matching is regex-based, not a parse: names inside strings or comments are
//! picked up, and constructs the patterns do not cover are missed. Ranking
//! treats the output as approximate, so both lists are plain first-seen
//! prefixes capped at a fixed length.

use once_cell::sync::Lazy;
use regex::Regex;

static EXPORTED_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"export\s+(?:default\s+)?(?:function|class|const|let|var|type|interface|enum)\s+([A-Za-z0-9_]+)",
    )
    .expect("valid exported declaration regex")
});

static BARE_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:function|class)\s+([A-Za-z0-9_]+)").expect("valid declaration regex")
});

static PYTHON_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:def|class)\s+([A-Za-z0-9_]+)").expect("valid Python declaration regex")
});

static IMPORT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // import x from 'mod' / import 'mod' / require 'mod'
        r#"(?:import|require)\s+(?:.*?\s+from\s+)?['"]([A-Za-z0-9_@/.:-]+)['"]"#,
        // export { x } from 'mod' / from 'mod'
        r#"from\s+['"]([A-Za-z0-9_@/.:-]+)['"]"#,
        // require('mod') / import('mod')
        r#"(?:import|require)\s*\(\s*['"]([A-Za-z0-9_@/.:-]+)['"]\s*\)"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid import regex"))
    .collect()
});

/// Symbols and imports pulled out of one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub symbols: Vec<String>,
    pub imports: Vec<String>,
}

/// Run both extractors over `content`
pub fn extract(content: &str, language: &str, max_symbols: usize, max_imports: usize) -> Extracted {
    Extracted {
        symbols: extract_symbols(content, language, max_symbols),
        imports: extract_imports(content, max_imports),
    }
}

/// Declared names for the languages that have patterns; empty for the rest
pub fn extract_symbols(content: &str, language: &str, cap: usize) -> Vec<String> {
    let patterns: Vec<&Regex> = match language {
        "typescript" | "javascript" => vec![&*EXPORTED_DECL, &*BARE_DECL],
        "python" => vec![&*PYTHON_DECL],
        _ => return Vec::new(),
    };

    let mut symbols = Vec::new();
    for pattern in patterns {
        collect_captures(pattern, content, &mut symbols, cap);
    }
    symbols
}

/// Quoted module targets of import/require/from statements, in any language
pub fn extract_imports(content: &str, cap: usize) -> Vec<String> {
    let mut imports = Vec::new();
    for pattern in IMPORT_PATTERNS.iter() {
        collect_captures(pattern, content, &mut imports, cap);
    }
    imports
}

fn collect_captures(pattern: &Regex, content: &str, out: &mut Vec<String>, cap: usize) {
    for caps in pattern.captures_iter(content) {
        if out.len() >= cap {
            return;
        }
        if let Some(name) = caps.get(1).map(|m| m.as_str()) {
            if !out.iter().any(|existing| existing == name) {
                out.push(name.to_string());
            }
        }
    }
}
