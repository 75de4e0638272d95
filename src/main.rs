mod db;
mod parser;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};

use parser::results::ParsedResult;
use parser::SerpParser;

#[derive(Parser)]
#[command(name = "serp_parser", about = "Search-results page component parser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load SERP HTML files from a directory into the queue
    Import {
        /// Directory of .html files (file stem becomes the serp id)
        dir: PathBuf,
        /// Crawl batch id attached to every imported page (default: today)
        #[arg(short, long)]
        crawl_id: Option<String>,
    },
    /// Parse imported pages into flat result records
    Parse {
        /// Max pages to parse (default: all unparsed)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Dump parsed results as JSON lines
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Max records to export
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show pipeline statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Import { dir, crawl_id } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let crawl_id =
                crawl_id.unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());
            let pages = read_html_dir(&dir, &crawl_id)?;
            if pages.is_empty() {
                println!("No .html files found in {}", dir.display());
                return Ok(());
            }
            let inserted = db::insert_serps(&conn, &pages)?;
            println!(
                "Imported {} new pages ({} files found, crawl {})",
                inserted,
                pages.len(),
                crawl_id
            );
            Ok(())
        }
        Commands::Parse { limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let pages = db::fetch_unparsed(&conn, limit)?;
            if pages.is_empty() {
                println!("No unparsed pages. Run 'import' first.");
                return Ok(());
            }
            println!("Parsing {} pages...", pages.len());
            let counts = parse_pages(&conn, pages)?;
            counts.print();
            Ok(())
        }
        Commands::Export { out, limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let results = db::fetch_results(&conn, limit)?;
            let mut lines = String::new();
            for r in &results {
                lines.push_str(&serde_json::to_string(r)?);
                lines.push('\n');
            }
            match out {
                Some(path) => {
                    std::fs::write(&path, lines)?;
                    println!("Wrote {} records to {}", results.len(), path.display());
                }
                None => print!("{}", lines),
            }
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Vocabulary: {}", parser::vocabulary::VOCABULARY_VERSION);
            println!("Pages:    {}", s.total);
            println!("Parsed:   {}", s.parsed);
            println!("Unparsed: {}", s.unparsed);
            println!("Errors:   {}", s.errors);
            println!("Results:  {}", s.results);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn read_html_dir(
    dir: &Path,
    crawl_id: &str,
) -> anyhow::Result<Vec<(String, Option<String>, String, String)>> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.path());

    let mut pages = Vec::new();
    for entry in entries {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("html") {
            continue;
        }
        let Some(serp_id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let html = std::fs::read_to_string(&path)?;
        pages.push((
            serp_id.to_string(),
            Some(crawl_id.to_string()),
            path.display().to_string(),
            html,
        ));
    }
    Ok(pages)
}

struct ParseCounts {
    pages: usize,
    results: usize,
    errors: usize,
}

impl ParseCounts {
    fn print(&self) {
        println!(
            "Saved {} result records from {} pages ({} page errors).",
            self.results, self.pages, self.errors,
        );
    }
}

fn parse_pages(conn: &rusqlite::Connection, pages: Vec<db::SerpPage>) -> anyhow::Result<ParseCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let serp_parser = SerpParser::new();

    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut counts = ParseCounts {
        pages: 0,
        results: 0,
        errors: 0,
    };

    for chunk in pages.chunks(200) {
        let outcomes: Vec<(i64, anyhow::Result<Vec<ParsedResult>>)> = chunk
            .par_iter()
            .map(|page| (page.id, parser::process_page(&serp_parser, page)))
            .collect();

        let mut results = Vec::new();
        let mut done_ids = Vec::new();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(records) => {
                    counts.results += records.len();
                    results.extend(records);
                    done_ids.push(id);
                }
                Err(e) => {
                    counts.errors += 1;
                    db::mark_error(conn, id, &format!("{e:#}"))?;
                }
            }
        }

        counts.pages += done_ids.len();
        db::save_results(conn, &results)?;
        db::mark_parsed(conn, &done_ids)?;
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
