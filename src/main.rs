use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use inquire::Select;
use locsync::model::Document;
use locsync::sync;
use locsync::{Result, SyncError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;

    if !cli.dir.exists() {
        return Err(SyncError::MissingInput(cli.dir));
    }

    let candidates = discover_documents(&cli.dir)?;
    if candidates.len() < 2 {
        return Err(SyncError::NotEnoughDocuments(cli.dir));
    }

    let source_path = pick_document("Select source localization", &candidates, None)?;
    let target_path = pick_document("Select target localization", &candidates, Some(&source_path))?;

    let Some(source) = load_or_report(&source_path)? else {
        return Ok(());
    };
    let Some(mut target) = load_or_report(&target_path)? else {
        return Ok(());
    };

    let report = sync::sync_documents(source, &mut target);
    sync::write_document(&target_path, &target)?;

    if report.version_mismatch {
        println!("{}", "Version is not the same. Please, check version.".yellow());
    }
    if report.tips_mismatch {
        println!("{}", "Tips count is not the same. Please, check tips.".yellow());
    }
    println!("{}", "Sync complete.".green());
    Ok(())
}

/// Lists the `*.yml` files directly inside the directory, sorted by path.
fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "yml") {
            documents.push(path);
        }
    }
    documents.sort();
    Ok(documents)
}

/// Prompts the user to pick one document. The `exclude` path is left out of
/// the options, which is how the source and target are kept distinct.
fn pick_document(
    message: &str,
    candidates: &[PathBuf],
    exclude: Option<&PathBuf>,
) -> Result<PathBuf> {
    let eligible: Vec<&PathBuf> = candidates
        .iter()
        .filter(|path| exclude.is_none_or(|excluded| *path != excluded))
        .collect();
    let options: Vec<String> = eligible.iter().map(|path| display_name(path)).collect();
    let chosen = Select::new(message, options).raw_prompt()?;
    Ok(eligible[chosen.index].clone())
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Loads a document, turning any parse failure into the user-facing
/// "contains errors" message. Returns `Ok(None)` when the run should stop
/// without treating the situation as a process error.
fn load_or_report(path: &Path) -> Result<Option<Document>> {
    match sync::load_document(path) {
        Ok(document) => Ok(Some(document)),
        Err(SyncError::Io(error)) => Err(SyncError::Io(error)),
        Err(_) => {
            println!("{}", format!("{} contains errors.", path.display()).red());
            Ok(None)
        }
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| SyncError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Synchronise the key structure of YAML localization files."
)]
struct Cli {
    /// Directory scanned for localization documents.
    #[arg(long, default_value = ".")]
    dir: PathBuf,
}
