use regex::Regex;

/// A fixed, document-type-specific list of boundary patterns, applied in
/// priority order. Structural cues are deterministic and independent of the
/// oracle: they provide a reliable floor even when the oracle is unavailable
/// or returns nothing useful.
#[derive(Debug)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile a fixed pattern list. Patterns are compile-time constants, so
    /// a failure here is a programming error.
    pub fn new(patterns: &[&str]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("invalid built-in pattern"))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self { patterns: Vec::new() }
    }

    /// Every non-overlapping match start, across all patterns, sorted and
    /// deduplicated.
    pub fn offsets(&self, full_text: &str) -> Vec<usize> {
        let mut out = Vec::new();
        for pattern in &self.patterns {
            for found in pattern.find_iter(full_text) {
                out.push(found.start());
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::profiles::DocumentProfile;

    #[test]
    fn test_empty_set_yields_nothing() {
        assert!(PatternSet::empty().offsets("# Heading\ntext").is_empty());
    }

    #[test]
    fn test_legal_patterns_find_headings_and_clauses() {
        let text = "# Agreement\nbody text\nARTICLE III: REPRESENTATIONS\nmore\n3.2. Confidentiality\nend";
        let offsets = DocumentProfile::legal().patterns.offsets(text);

        // Markdown heading at 0, ARTICLE label and numbered clause at the
        // preceding newlines.
        assert!(offsets.contains(&0));
        assert!(offsets.contains(&(text.find("\nARTICLE").unwrap())));
        assert!(offsets.contains(&(text.find("\n3.2.").unwrap())));
    }

    #[test]
    fn test_meeting_patterns_find_speakers_and_timestamps() {
        let text = "opening\nCHAIR: welcome everyone\n[00:15:00] moving on\nTopic: Budget\nclose";
        let offsets = DocumentProfile::meeting().patterns.offsets(text);

        assert!(offsets.contains(&(text.find("\nCHAIR:").unwrap())));
        assert!(offsets.contains(&(text.find("[00:15:00]").unwrap())));
        assert!(offsets.contains(&(text.find("\nTopic:").unwrap())));
    }

    #[test]
    fn test_deterministic() {
        let text = "1. INTRODUCTION\nBODY: text\n[00:01:02] mark";
        let set = DocumentProfile::meeting();
        assert_eq!(set.patterns.offsets(text), set.patterns.offsets(text));
    }
}
