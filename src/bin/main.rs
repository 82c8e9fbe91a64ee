use autocomplete_core::config::DatasetPaths;
use autocomplete_core::core::index::IndexStats;
use autocomplete_core::status::SourceOutcome;
use autocomplete_core::{AutocompleteEngine, EngineConfig, EngineStatus, InitReport};
use clap::Parser;
use crossterm::style::Stylize;
use serde::Serialize;
use std::error::Error;
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Query autocompletion over static entity, keyword and pattern datasets.
///
/// With a QUERY, prints its suggestions and exits. Without one, starts an
/// interactive prompt.
#[derive(Parser, Debug)]
#[command(name = "autocomplete", version)]
struct Cli {
    /// JSON file with engine settings; the flags below override it
    #[arg(long, env = "AUTOCOMPLETE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding entities.csv, keywords.csv and patterns.csv
    #[arg(long, env = "AUTOCOMPLETE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[arg(long)]
    entities: Option<PathBuf>,

    #[arg(long)]
    keywords: Option<PathBuf>,

    #[arg(long)]
    patterns: Option<PathBuf>,

    /// Suggestions per query; zero or negative yields none
    #[arg(long, env = "AUTOCOMPLETE_MAX_RESULTS", allow_negative_numbers = true)]
    max_results: Option<i64>,

    /// Cached (query, count) results; 0 disables the cache
    #[arg(long, env = "AUTOCOMPLETE_CACHE_CAPACITY")]
    cache_capacity: Option<usize>,

    /// Print JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Print the startup report and exit
    #[arg(long)]
    status: bool,

    query: Vec<String>,
}

#[derive(Serialize)]
struct SuggestResponse<'a> {
    query: &'a str,
    suggestions: &'a [String],
    count: usize,
}

#[derive(Serialize)]
struct StatusResponse<'a> {
    status: EngineStatus,
    datasets: &'a InitReport,
    index: IndexStats,
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    tracing::debug!(?config, "resolved configuration");

    let (engine, report) = AutocompleteEngine::from_config(&config);
    if let EngineStatus::Degraded { missing } = report.status() {
        tracing::warn!(?missing, "running with incomplete datasets");
    }

    if cli.status {
        return print_status(&engine, &report, cli.json);
    }

    if !cli.query.is_empty() {
        let query = cli.query.join(" ");
        let suggestions = engine.generate_suggestions(&query, config.default_max_results);
        return print_once(&query, &suggestions, cli.json);
    }

    run_interactive(&engine, config.default_max_results)
}

/// Negative counts from the command line mean "no suggestions".
fn result_count(requested: i64) -> usize {
    usize::try_from(requested).unwrap_or(0)
}

fn build_config(cli: &Cli) -> Result<EngineConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.datasets = DatasetPaths::in_dir(dir);
    }
    if let Some(path) = &cli.entities {
        config.datasets.entities = path.clone();
    }
    if let Some(path) = &cli.keywords {
        config.datasets.keywords = path.clone();
    }
    if let Some(path) = &cli.patterns {
        config.datasets.patterns = path.clone();
    }
    if let Some(capacity) = cli.cache_capacity {
        config.cache_capacity = capacity;
    }
    if let Some(requested) = cli.max_results {
        config.default_max_results = result_count(requested);
    }
    Ok(config)
}

fn print_once(query: &str, suggestions: &[String], json: bool) -> Result<(), Box<dyn Error>> {
    let mut out = stdout().lock();
    if json {
        let response = SuggestResponse {
            query,
            suggestions,
            count: suggestions.len(),
        };
        serde_json::to_writer_pretty(&mut out, &response)?;
        writeln!(out)?;
    } else {
        for suggestion in suggestions {
            writeln!(out, "{}", suggestion)?;
        }
    }
    Ok(())
}

fn print_status(
    engine: &AutocompleteEngine,
    report: &InitReport,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let mut out = stdout().lock();
    if json {
        let response = StatusResponse {
            status: report.status(),
            datasets: report,
            index: engine.index().stats(),
        };
        serde_json::to_writer_pretty(&mut out, &response)?;
        writeln!(out)?;
        return Ok(());
    }

    match report.status() {
        EngineStatus::Ready => writeln!(out, "autocomplete: {}", "ready".green())?,
        EngineStatus::Degraded { missing } => {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            writeln!(out, "autocomplete: {} (missing {})", "degraded".yellow(), names.join(", "))?
        }
    }
    for (dataset, outcome) in report.outcomes() {
        match outcome {
            SourceOutcome::Loaded { records } => {
                writeln!(out, "  {:<9} {} records", dataset, records)?
            }
            SourceOutcome::Unavailable { reason } => {
                writeln!(out, "  {:<9} {}", dataset, reason.as_str().red())?
            }
        }
    }
    let stats = engine.index().stats();
    writeln!(
        out,
        "  index     {} entities in {} categories, {} keywords, {} patterns",
        stats.distinct_entities, stats.categories, stats.keywords, stats.patterns
    )?;
    Ok(())
}

fn run_interactive(engine: &AutocompleteEngine, max_results: usize) -> Result<(), Box<dyn Error>> {
    println!("{}", "Autocomplete (type 'exit' or Ctrl+D to quit)".bold());

    loop {
        print!("\n{} ", "Search:".cyan());
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let query = input.trim();
        match query {
            "" => continue,
            "exit" => break,
            _ => {}
        }

        let suggestions = engine.generate_suggestions(query, max_results);
        print_suggestions(engine, &suggestions);
    }

    println!("\nExiting...");
    Ok(())
}

fn print_suggestions(engine: &AutocompleteEngine, suggestions: &[String]) {
    if suggestions.is_empty() {
        println!("  {}", "No suggestions found".dark_grey());
        return;
    }
    for (i, suggestion) in suggestions.iter().enumerate() {
        let categories = engine.index().categories_of(suggestion);
        if categories.is_empty() {
            println!("  {:2}. {}", i + 1, suggestion);
        } else {
            let tag = format!("[{}]", categories.join(", "));
            println!("  {:2}. {} {}", i + 1, suggestion, tag.dark_grey());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_counts_clamp_to_zero() {
        assert_eq!(result_count(-3), 0);
        assert_eq!(result_count(0), 0);
        assert_eq!(result_count(7), 7);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "autocomplete",
            "--data-dir",
            "/srv/lexicon",
            "--patterns",
            "/tmp/patterns.csv",
            "--max-results",
            "-1",
            "--cache-capacity",
            "32",
            "how",
            "to",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.datasets.entities, PathBuf::from("/srv/lexicon/entities.csv"));
        assert_eq!(config.datasets.patterns, PathBuf::from("/tmp/patterns.csv"));
        assert_eq!(config.default_max_results, 0);
        assert_eq!(config.cache_capacity, 32);
        assert_eq!(cli.query, ["how", "to"]);
    }
}
