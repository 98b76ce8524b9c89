//! Compliance analysis invocation shim
//!
//! Thin wrapper around the engine: paths to already-extracted text files in,
//! the analysis as JSON on stdout. Extraction from binary formats happens
//! upstream; a file that failed extraction simply is not passed here.

use anyhow::{Context, Result};
use clap::Parser;
use compliance_engine::catalog::RuleCatalog;
use compliance_engine::knowledge::StaticKnowledgeBase;
use compliance_engine::ComplianceEngine;
use shared_types::DocumentSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "compliance-cli")]
#[command(
    version,
    about = "Analyze extracted document texts for ADGM compliance"
)]
struct Args {
    /// Text files to analyze; the file name becomes the document display name
    #[arg(required = false)]
    files: Vec<PathBuf>,

    /// Retrieval call timeout in milliseconds
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    /// Skip retrieval augmentation and run rule-based checks only
    #[arg(long)]
    rules_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // JSON result goes to stdout, so all logging goes to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let documents = load_documents(&args.files)?;

    let catalog = RuleCatalog::adgm_default();
    let engine = if args.rules_only {
        ComplianceEngine::rules_only(catalog)
    } else {
        ComplianceEngine::new(catalog, Arc::new(StaticKnowledgeBase::new()))
    }
    .with_retrieval_timeout(Duration::from_millis(args.timeout_ms));

    let analysis = engine.analyze(&documents).await;

    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn load_documents(files: &[PathBuf]) -> Result<DocumentSet> {
    let mut documents = DocumentSet::new();
    for path in files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        documents.insert(display_name(path), text);
    }
    Ok(documents)
}

/// File name component of the path, falling back to the full path string
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
