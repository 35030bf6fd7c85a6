use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use sportguess::{
    analysis::{analyze, Classification},
    classifier::KeywordTable,
    config::Config,
    extractor, server, upload,
};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "sportguess")]
#[command(about = "Detect which sport a PDF or Word document is about")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (defaults to config/settings.toml or ~/.config/sportguess/settings.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify documents; directories are searched recursively
    #[command(name = "classify")]
    Classify {
        /// Files or directories
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
        /// Print the keyword count of every category
        #[arg(long)]
        scores: bool,
        /// Print one JSON object per document
        #[arg(long)]
        json: bool,
    },
    /// Print the text extracted from a document
    #[command(name = "extract")]
    Extract {
        /// Document to read
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Run the upload web server
    #[command(name = "serve")]
    Serve {
        /// Address to listen on (overrides config and SPORTGUESS_BIND)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    config.apply_env();

    let default_level = if config.server.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Commands::Classify { paths, scores, json } => {
            let table = config.keyword_table()?;
            let documents = collect_documents(&paths);
            if documents.is_empty() {
                eprintln!("No documents found");
                return Ok(());
            }

            let results: Vec<(PathBuf, Result<Classification>)> = documents
                .into_par_iter()
                .map(|path| {
                    let result = classify_file(&path, &table);
                    (path, result)
                })
                .collect();

            for (path, result) in results {
                report(&path, &result, scores, json);
            }
        }
        Commands::Extract { file } => {
            let format = upload::validate(file_name(&file))?;
            let content = std::fs::read(&file)
                .with_context(|| format!("Failed to read file: {}", file.display()))?;
            let text = extractor::extract(&content, format)
                .with_context(|| format!("Failed to extract text from {}", file.display()))?;
            println!("{}", text);
        }
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            server::serve(&config).await?;
        }
    }

    Ok(())
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Expand directories into the accepted documents they contain.
/// Explicit file arguments are kept as-is so rejections get reported.
fn collect_documents(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file() && upload::validate(file_name(entry.path())).is_ok() {
                    documents.push(entry.into_path());
                }
            }
        } else {
            documents.push(path.clone());
        }
    }
    documents
}

fn classify_file(path: &Path, table: &KeywordTable) -> Result<Classification> {
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let document = upload::accept(file_name(path), content)?;
    Ok(analyze(&document, table)?)
}

fn report(path: &Path, result: &Result<Classification>, scores: bool, json: bool) {
    match (result, json) {
        (Ok(classification), true) => {
            let mut value = serde_json::to_value(classification).unwrap_or_default();
            value["path"] = serde_json::Value::String(path.display().to_string());
            println!("{}", value);
        }
        (Err(e), true) => {
            println!(
                "{}",
                serde_json::json!({ "path": path.display().to_string(), "error": format!("{:#}", e) })
            );
        }
        (Ok(classification), false) => {
            println!("{}: {}", path.display(), classification.label);
            if scores {
                for entry in &classification.scores {
                    println!("  {:<12} {}", entry.category, entry.score);
                }
            }
        }
        (Err(e), false) => eprintln!("{}: {:#}", path.display(), e),
    }
}
