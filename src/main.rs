use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use ies_lsp::config::Config;
use ies_lsp::kb::KnowledgeBase;
use ies_lsp::lsp::{LanguageService, TripleService};
use ies_lsp::server;

#[derive(Parser)]
#[command(name = "ies-lsp", version, about = "Language server for IES triple notation.")]
struct Cli {
    /// Knowledge base JSON file (overrides config)
    #[arg(long, global = true)]
    records: Option<PathBuf>,

    /// Tracing filter directive, e.g. `ies_lsp=debug` (overrides config)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the language server on stdin/stdout (default)
    Serve,
    /// Print line-style diagnostics for a file
    Check { file: PathBuf },
    /// Print the instance → class index for a file
    Index { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, warnings) = Config::load();
    config.merge(Config {
        records: cli.records,
        log_filter: cli.log,
    });

    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_filter().parse()?),
        )
        .init();

    for warning in &warnings {
        warn!("{warning}");
    }

    let kb = load_kb(&config)?;
    let service = TripleService::new(Arc::new(kb));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("ies-lsp {} serving on stdio", env!("CARGO_PKG_VERSION"));
            server::serve_stdio(service).await;
        }
        Command::Check { file } => {
            let content = read(&file)?;
            let diags = service.diagnostics(&content);
            for d in &diags {
                println!(
                    "{}:{}:{}: error: {}",
                    file.display(),
                    d.range.start.line + 1,
                    d.range.start.character + 1,
                    d.message
                );
            }
            if !diags.is_empty() {
                std::process::exit(1);
            }
        }
        Command::Index { file } => {
            let content = read(&file)?;
            for (instance, class) in service.index(&content).sorted() {
                println!("{instance}\t{class}");
            }
        }
    }

    Ok(())
}

fn load_kb(config: &Config) -> Result<KnowledgeBase> {
    let kb = match &config.records {
        Some(path) => KnowledgeBase::load(path)
            .with_context(|| format!("loading knowledge base {}", path.display()))?,
        None => {
            let kb = KnowledgeBase::bundled();
            if kb.is_empty() {
                warn!("bundled knowledge base is empty");
            }
            kb
        }
    };
    let source = config
        .records
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "bundled".into());
    info!(%source, entries = kb.len(), "knowledge base loaded");
    Ok(kb)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
