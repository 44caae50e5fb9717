use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::oracle::SummaryOracle;

/// Outcome of one folder-summarization run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SummaryReport {
    pub candidates: usize,
    pub summarized: usize,
    pub failed: usize,
}

/// Summarize every markdown file in a directory (non-recursive), writing one
/// `<stem>-summary.md` next to each source. Existing summary files are
/// skipped as inputs. A file that fails to read or summarize is logged and
/// skipped; the run continues.
pub fn run(folder: &Path, oracle: &dyn SummaryOracle) -> Result<SummaryReport> {
    let files = markdown_candidates(folder)?;
    eprintln!("[summarizer] found {} markdown files", files.len());

    let mut report = SummaryReport {
        candidates: files.len(),
        ..SummaryReport::default()
    };

    for path in files {
        eprintln!("[summarizer] processing {}", path.display());
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("[summarizer] failed to read {}: {e}", path.display());
                report.failed += 1;
                continue;
            }
        };

        let summary = match oracle.summarize(&content) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("[summarizer] oracle failed for {}: {e}", path.display());
                report.failed += 1;
                continue;
            }
        };

        let target = summary_path(&path);
        match fs::write(&target, summary) {
            Ok(()) => report.summarized += 1,
            Err(e) => {
                eprintln!("[summarizer] failed to write {}: {e}", target.display());
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

/// Markdown files eligible for summarization, sorted for a deterministic
/// processing order.
pub fn markdown_candidates(folder: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(folder)
        .with_context(|| format!("Failed to read directory {}", folder.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.context("Failed to read directory entry")?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.ends_with(".md") && !name.ends_with("-summary.md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// `notes.md` -> `notes-summary.md`, alongside the source.
fn summary_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    source.with_file_name(format!("{stem}-summary.md"))
}
