#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use folio_query::{select_projects, shuffle_projects, Selection, TagQuery};
use folio_store::{load_collections, scan_projects};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio catalog operations CLI")]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every project file in a directory.
    Check {
        #[arg(long)]
        dir: PathBuf,
    },
    /// Print the catalog in display order, optionally filtered.
    List {
        #[arg(long)]
        dir: PathBuf,
        /// Comma-separated tag filter; matches demote instead of drop.
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        collection: Option<String>,
        #[arg(long)]
        collections_file: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        shuffle: bool,
    },
    /// Print the collection registry.
    Collections {
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

// Process exit contract: 0 success, 3 validation findings, 4 dependency
// (filesystem/config) failure.
const EXIT_VALIDATION: u8 = 3;
const EXIT_DEPENDENCY: u8 = 4;

fn run_check(dir: &PathBuf, json_output: bool) -> Result<u8, String> {
    let report = scan_projects(dir).map_err(|e| e.to_string())?;
    if json_output {
        let payload = json!({
            "loaded": report.projects.len(),
            "skipped": report.skipped,
        });
        println!("{payload}");
    } else {
        println!(
            "loaded {} project(s), skipped {} file(s)",
            report.projects.len(),
            report.skipped.len()
        );
        for skip in &report.skipped {
            println!("  {}: {} ({})", skip.file, skip.reason.as_str(), skip.detail);
        }
    }
    if report.skipped.is_empty() {
        Ok(0)
    } else {
        Ok(EXIT_VALIDATION)
    }
}

fn run_list(
    dir: &PathBuf,
    tags: Option<&str>,
    collection: Option<&str>,
    collections_file: Option<&PathBuf>,
    shuffle: bool,
    json_output: bool,
) -> Result<u8, String> {
    let selection = if let Some(raw) = collection {
        let set = load_collections(collections_file.map(PathBuf::as_path))
            .map_err(|e| e.to_string())?;
        let def = set
            .get(raw)
            .ok_or_else(|| format!("unknown collection: {raw}"))?;
        Selection::Collection(TagQuery::new(&def.tags))
    } else if let Some(raw) = tags {
        let requested: Vec<&str> = raw.split(',').collect();
        Selection::Tags(TagQuery::new(&requested))
    } else {
        Selection::All
    };

    let report = scan_projects(dir).map_err(|e| e.to_string())?;
    let mut selected = select_projects(report.projects, &selection);
    if shuffle {
        shuffle_projects(&mut rand::thread_rng(), &mut selected);
    }

    if json_output {
        println!(
            "{}",
            serde_json::to_string(&selected).map_err(|e| e.to_string())?
        );
    } else {
        for p in &selected {
            println!("{}  {}  {}", p.id, p.year.as_str(), p.title);
        }
    }
    Ok(0)
}

fn run_collections(file: Option<&PathBuf>, json_output: bool) -> Result<u8, String> {
    let set = load_collections(file.map(PathBuf::as_path)).map_err(|e| e.to_string())?;
    if json_output {
        println!(
            "{}",
            serde_json::to_string(&set).map_err(|e| e.to_string())?
        );
    } else {
        for def in &set.collections {
            println!("{}  {}  [{}]", def.id, def.display_name, def.tags.join(", "));
        }
    }
    Ok(0)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Check { dir } => run_check(dir, cli.json),
        Commands::List {
            dir,
            tags,
            collection,
            collections_file,
            shuffle,
        } => run_list(
            dir,
            tags.as_deref(),
            collection.as_deref(),
            collections_file.as_ref(),
            *shuffle,
            cli.json,
        ),
        Commands::Collections { file } => run_collections(file.as_ref(), cli.json),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(EXIT_DEPENDENCY)
        }
    }
}
