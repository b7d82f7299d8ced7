use anyhow::Context;
use clap::Parser;
use codescout::ui::cli::{Cli, Commands};
use codescout::ui::stdio;
use codescout::{CodebaseIndex, QueryRequest, QueryResponse, ScanSummary};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("codescout=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let service = CodebaseIndex::new(cli.config());

    match &cli.command {
        Commands::Index { path } => handle_index(&service, path, cli.json).await,
        Commands::Search { path, query, limit } => {
            handle_search(&service, path, query, *limit, cli.json).await
        }
        Commands::Stdio => {
            let reader = BufReader::new(tokio::io::stdin());
            stdio::run(&service, reader, tokio::io::stdout())
                .await
                .context("stdio loop failed")
        }
    }
}

async fn handle_index(service: &CodebaseIndex, path: &str, json: bool) -> anyhow::Result<()> {
    let summary = service
        .scan(path)
        .await
        .with_context(|| format!("Failed to index {}", path))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

async fn handle_search(
    service: &CodebaseIndex,
    path: &str,
    query: &str,
    limit: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let summary = service
        .scan(path)
        .await
        .with_context(|| format!("Failed to index {}", path))?;

    let response = service.query(&QueryRequest {
        query: query.to_string(),
        project_path: summary.project_path.clone(),
        max_files: limit,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_results(&response);
    }
    Ok(())
}

fn print_summary(summary: &ScanSummary) {
    println!("Indexed {}", summary.project_path);
    println!("  Files: {}", summary.file_count);
    println!("  Lines: {}", summary.total_lines);
    for (language, count) in &summary.languages {
        println!("  {:<12} {}", language, count);
    }
}

fn print_results(response: &QueryResponse) {
    if response.files.is_empty() {
        println!(
            "No relevant files for \"{}\" ({} indexed)",
            response.query, response.total_indexed
        );
        return;
    }

    println!(
        "Found {} of {} files for \"{}\":",
        response.found, response.total_indexed, response.query
    );
    for (i, result) in response.files.iter().enumerate() {
        println!(
            "\n{}. {} (score: {}, {})",
            i + 1,
            result.entry.file_path,
            result.relevance_score,
            result.entry.language
        );
        if !result.entry.symbols.is_empty() {
            let symbols: Vec<&str> = result
                .entry
                .symbols
                .iter()
                .take(8)
                .map(String::as_str)
                .collect();
            println!("   Symbols: {}", symbols.join(", "));
        }
    }
}
