/// Tag returned for files with no or an unrecognized extension
pub const FALLBACK_LANGUAGE: &str = "text";

/// Classify a file path by its lowercased extension.
///
/// The extension is whatever follows the last `.` of the final path segment,
/// so dotfiles such as `.env` classify by their name.
pub fn detect_language(path: &str) -> &'static str {
    let Some(ext) = extension_of(path) else {
        return FALLBACK_LANGUAGE;
    };

    match ext.to_lowercase().as_str() {
        "ts" | "tsx" => "typescript",
        "js" | "jsx" => "javascript",
        "py" => "python",
        "rs" => "rust",
        "go" => "go",
        "java" => "java",
        "cs" => "csharp",
        "rb" => "ruby",
        "css" | "scss" | "sass" => "css",
        "html" => "html",
        "vue" => "vue",
        "svelte" => "svelte",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "md" | "mdx" => "markdown",
        "sh" | "bash" => "shell",
        "sql" => "sql",
        "prisma" => "prisma",
        "env" => "env",
        _ => FALLBACK_LANGUAGE,
    }
}

fn extension_of(path: &str) -> Option<&str> {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}
