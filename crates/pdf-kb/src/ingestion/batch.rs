//! Sequential import of every PDF in a directory

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;

use super::filename::has_pdf_extension;
use super::pipeline::IngestPipeline;

/// Import every `.pdf` file (case-insensitive) directly inside `dir`.
///
/// Files are processed one at a time in filename order and every file
/// yields exactly one status message, whether it imported or not. A
/// missing directory is created and yields no messages.
pub async fn import_pdfs(pipeline: &IngestPipeline, dir: &Path) -> Result<Vec<String>> {
    if !tokio::fs::try_exists(dir).await? {
        tracing::info!("Creating import directory {}", dir.display());
        tokio::fs::create_dir_all(dir).await?;
        return Ok(Vec::new());
    }

    let files = list_pdfs(dir).await?;
    tracing::info!("Batch importing {} PDFs from {}", files.len(), dir.display());

    let bar = progress_bar(files.len() as u64);
    let mut results = Vec::with_capacity(files.len());

    for path in &files {
        if let Some(name) = path.file_name() {
            bar.set_message(name.to_string_lossy().into_owned());
        }
        let outcome = pipeline.process_pdf(path).await;
        results.push(outcome.message);
        bar.inc(1);
    }

    bar.finish_and_clear();
    let failed = results.iter().filter(|m| m.starts_with("Import failed")).count();
    tracing::info!(
        "Batch import finished: {} imported, {} failed",
        files.len() - failed,
        failed
    );

    Ok(results)
}

/// Regular files with a PDF extension, sorted by name
async fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if has_pdf_extension(&entry.file_name().to_string_lossy()) {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

fn progress_bar(len: u64) -> ProgressBar {
    if !console::user_attended_stderr() {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("{bar:30} [{pos}/{len}] Importing {msg}") {
        bar.set_style(style);
    }
    bar
}
