//! gsearch - recursive case-insensitive text search.
//!
//! Usage:
//!   gsearch QUERY [PATH]           Search a directory tree
//!   gsearch QUERY -f json [PATH]   Emit matches as JSON lines
//!   gsearch --help                 Show help

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::Result;

use globalsearch_engine::{start_search, SearchConfig, SearchEvent};

#[derive(Parser)]
#[command(
    name = "gsearch",
    version,
    about = "Recursive case-insensitive text search",
    long_about = "gsearch walks a directory tree and reports every line \
                  containing the query, streaming matches as they are found."
)]
struct Cli {
    /// Substring to search for (case-insensitive)
    query: String,

    /// Directory to search (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Follow symbolic links
    #[arg(short = 'L', long)]
    follow_symlinks: bool,

    /// Maximum directory depth to descend below the root
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Skip hidden files and directories
    #[arg(long)]
    skip_hidden: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Only print the final counts
    #[arg(short, long)]
    count: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = SearchConfig::builder()
        .root(cli.path)
        .query(cli.query)
        .follow_symlinks(cli.follow_symlinks)
        .max_depth(cli.max_depth)
        .include_hidden(!cli.skip_hidden)
        .build()
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;

    let mut rx = start_search(config);

    while let Some(event) = rx.recv().await {
        match event {
            SearchEvent::Match(m) => {
                if cli.count {
                    continue;
                }
                match cli.format {
                    OutputFormat::Text => {
                        println!("{}:{}: {}", m.file_path.display(), m.line_number, m.line_text);
                    }
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string(&m)?);
                    }
                }
            }
            SearchEvent::Failure(failure) => {
                eprintln!("gsearch: {failure}");
            }
            SearchEvent::Complete(summary) => match cli.format {
                OutputFormat::Text => {
                    eprintln!(
                        "{} match(es) in {} file(s), {} failure(s), {:.2}s",
                        summary.total_matches,
                        summary.distinct_files,
                        summary.failure_count,
                        summary.elapsed.as_secs_f64()
                    );
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string(&summary)?);
                }
            },
        }
    }

    Ok(())
}
