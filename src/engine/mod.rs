mod patterns;
mod profiles;
mod reconcile;
mod resolver;

#[cfg(test)]
mod tests;

pub use patterns::PatternSet;
pub use profiles::DocumentProfile;
pub use reconcile::reconcile;
pub use resolver::{resolve, ResolutionMode};

use crate::chunker;
use crate::config::{ConfigError, SplitConfig};
use crate::oracle::BoundaryOracle;

/// The shared segmentation pipeline: window the document, collect boundary
/// candidates from the oracle, derive structural offsets, and reconcile both
/// into one boundary list. The three splitter variants differ only in their
/// [`DocumentProfile`].
pub struct SegmentationEngine {
    profile: DocumentProfile,
    config: SplitConfig,
}

impl SegmentationEngine {
    /// Fails fast on an invalid window geometry; nothing is processed after
    /// a configuration error.
    pub fn new(profile: DocumentProfile, config: SplitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { profile, config })
    }

    pub fn profile(&self) -> &DocumentProfile {
        &self.profile
    }

    /// Compute the boundary list for one document. Oracle queries are issued
    /// sequentially, one per window; a degraded window contributes no
    /// candidates and the structural patterns still apply.
    pub fn split(&self, oracle: &dyn BoundaryOracle, full_text: &str) -> Result<Vec<usize>, ConfigError> {
        let windows = chunker::chunk(full_text, self.config.chunk_size, self.config.overlap)?;
        eprintln!(
            "[engine] {} profile: analyzing {} windows",
            self.profile.name,
            windows.len()
        );

        let mut candidates = Vec::new();
        for (i, window) in windows.iter().enumerate() {
            eprintln!("[engine] window {}/{}", i + 1, windows.len());
            candidates.extend(oracle.boundary_candidates(window.text(full_text), &self.profile));
        }

        let candidate_offsets = resolve(full_text, &candidates, self.profile.resolution);
        let structural_offsets = self.profile.patterns.offsets(full_text);
        eprintln!(
            "[engine] {} oracle offsets, {} structural offsets",
            candidate_offsets.len(),
            structural_offsets.len()
        );

        Ok(reconcile(
            &candidate_offsets,
            &structural_offsets,
            self.config.min_section,
            full_text.len(),
        ))
    }
}
