use codescout::indexing::extract::{extract, extract_imports, extract_symbols};
use codescout::{detect_language, tokenize, IndexStore, MemoryIndexStore, ProjectIndex};
use std::collections::HashSet;

fn assert_unique(values: &[String]) {
    let unique: HashSet<&String> = values.iter().collect();
    assert_eq!(unique.len(), values.len(), "duplicates in {:?}", values);
}

/// Extraction output stays unique and within caps for varied inputs
#[test]
fn test_extraction_caps_and_uniqueness() {
    let mut samples = vec![
        String::new(),
        "function a() {}\nfunction a() {}\nclass a {}".to_string(),
        "import x from 'y';\nimport z from 'y';\nfrom 'y'".to_string(),
        "def f():\n  pass\nclass f: pass\ndef g(): pass".to_string(),
    ];
    samples.push(
        (0..100)
            .map(|i| {
                format!(
                    "export class C{} {{}}\nimport m{} from \"pkg{}\";\n",
                    i % 45,
                    i,
                    i % 33
                )
            })
            .collect(),
    );

    for content in &samples {
        for language in ["typescript", "javascript", "python", "rust", "text"] {
            let extracted = extract(content, language, 30, 20);
            assert!(extracted.symbols.len() <= 30);
            assert!(extracted.imports.len() <= 20);
            assert_unique(&extracted.symbols);
            assert_unique(&extracted.imports);
        }
    }
}

#[test]
fn test_symbols_in_comments_are_captured() {
    // Lexical extraction does not understand comments or strings
    let content = "// TODO: class Legacy was removed\nconst s = \"function fake\";";
    assert_eq!(extract_symbols(content, "typescript", 30), vec!["Legacy", "fake"]);
}

#[test]
fn test_imports_for_non_js_languages() {
    let content = "import \"github.com/pkg/errors\"\n";
    assert_eq!(extract_imports(content, 20), vec!["github.com/pkg/errors"]);
}

#[test]
fn test_language_fallback() {
    for path in ["", "LICENSE", "a.unknown", "archive.zip", "dir/"] {
        assert_eq!(detect_language(path), "text", "path: {:?}", path);
    }
}

#[test]
fn test_tokenize_non_ascii() {
    assert_eq!(tokenize("café résumé parser"), vec!["caf", "sum", "parser"]);
}

#[test]
fn test_store_isolates_paths() {
    let store = MemoryIndexStore::new();
    store.put("/a", ProjectIndex::new("/a".to_string(), Vec::new(), 1));
    store.put("/b", ProjectIndex::new("/b".to_string(), Vec::new(), 1));
    store.remove("/a");

    assert!(store.get("/a").is_none());
    assert_eq!(store.get("/b").unwrap().project_path, "/b");
}
