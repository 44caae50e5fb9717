use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::engine::DocumentProfile;

const MAX_LABEL_LEN: usize = 50;

/// One contiguous span of the document between two boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Materialize the half-open spans `[boundary[i], boundary[i+1])`.
/// Concatenating the untrimmed segment texts reconstructs the document
/// exactly; trimming and empty-segment filtering happen at write time.
pub fn materialize(full_text: &str, boundaries: &[usize]) -> Vec<Segment> {
    boundaries
        .windows(2)
        .map(|pair| Segment {
            start: pair[0],
            end: pair[1],
            text: full_text[pair[0]..pair[1]].to_string(),
        })
        .collect()
}

/// Derive a short label from a segment's text using the profile's title
/// patterns, sanitized to a filename-safe charset. `None` when nothing
/// heading-like is found.
pub fn derive_label(section: &str, profile: &DocumentProfile) -> Option<String> {
    for pattern in &profile.title_patterns {
        let Some(captures) = pattern.captures(section) else {
            continue;
        };
        let raw = captures
            .get(1)
            .or_else(|| captures.get(0))
            .map(|m| m.as_str())?;
        let clean = sanitize(raw);
        if !clean.is_empty() {
            return Some(truncate_label(&clean));
        }
    }
    None
}

/// Write one file per non-empty segment, in boundary order, named by
/// sequence number and label. A computed name that collides with an earlier
/// one in the same run gets a numeric suffix instead of silently overwriting.
pub fn write_segments(
    output_dir: &Path,
    segments: &[Segment],
    profile: &DocumentProfile,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut used: HashSet<String> = HashSet::new();
    let mut written = Vec::new();

    for (i, segment) in segments.iter().enumerate() {
        let trimmed = segment.text.trim();
        if trimmed.is_empty() {
            continue;
        }

        let stem = match derive_label(trimmed, profile) {
            Some(label) => format!("{:03}_{}", i + 1, label.replace(' ', "_")),
            None => format!("{}_{:03}", profile.fallback_stem, i + 1),
        }
        .to_lowercase();
        let name = disambiguate(&mut used, &stem, profile.extension);

        let path = output_dir.join(&name);
        fs::write(&path, trimmed)
            .with_context(|| format!("Failed to write section {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

fn disambiguate(used: &mut HashSet<String>, stem: &str, extension: &str) -> String {
    let mut name = format!("{stem}.{extension}");
    let mut suffix = 2;
    while !used.insert(name.clone()) {
        name = format!("{stem}-{suffix}.{extension}");
        suffix += 1;
    }
    name
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim()
        .to_string()
}

fn truncate_label(label: &str) -> String {
    label.chars().take(MAX_LABEL_LEN).collect::<String>().trim_end().to_string()
}
