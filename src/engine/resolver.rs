/// How a resolved candidate maps to a boundary offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// The boundary starts at the candidate itself (headings, labels).
    MatchStart,
    /// The boundary follows the candidate phrase.
    AfterMatch,
}

/// Map oracle-returned phrases back to byte offsets in the original text.
///
/// Each candidate is located by its first literal occurrence; candidates with
/// no occurrence are discarded silently (oracle hallucinations are expected).
/// Candidates are resolved longest-first, and a match starting inside a span
/// already claimed by a longer candidate is dropped so a short common
/// substring cannot fragment a more specific match.
pub fn resolve(full_text: &str, candidates: &[String], mode: ResolutionMode) -> Vec<usize> {
    let mut unique: Vec<&str> = candidates
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    unique.sort_unstable();
    unique.dedup();
    unique.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut claimed: Vec<(usize, usize)> = Vec::new();
    let mut offsets = Vec::new();
    for candidate in unique {
        let Some(start) = full_text.find(candidate) else {
            continue;
        };
        if claimed.iter().any(|&(s, e)| start >= s && start < e) {
            continue;
        }
        let end = start + candidate.len();
        claimed.push((start, end));
        offsets.push(match mode {
            ResolutionMode::MatchStart => start,
            ResolutionMode::AfterMatch => end,
        });
    }

    offsets.sort_unstable();
    offsets.dedup();
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_match_start_offsets() {
        let text = "preamble ARTICLE I text SECTION 2 more";
        let offsets = resolve(text, &phrases(&["ARTICLE I", "SECTION 2"]), ResolutionMode::MatchStart);
        assert_eq!(offsets, vec![9, 24]);
    }

    #[test]
    fn test_after_match_offsets() {
        let text = "first topic ends here. second topic begins";
        let offsets = resolve(text, &phrases(&["ends here."]), ResolutionMode::AfterMatch);
        assert_eq!(offsets, vec![22]);
    }

    #[test]
    fn test_misses_discarded_silently() {
        let offsets = resolve("some text", &phrases(&["not present"]), ResolutionMode::MatchStart);
        assert!(offsets.is_empty());
    }

    #[test]
    fn test_longer_candidate_suppresses_contained_shorter() {
        // "Section" alone would match inside "Section 5.3 Governing Law"
        // and fragment it; the longer candidate claims the span first.
        let text = "intro Section 5.3 Governing Law body";
        let offsets = resolve(
            text,
            &phrases(&["Section", "Section 5.3 Governing Law"]),
            ResolutionMode::MatchStart,
        );
        assert_eq!(offsets, vec![6]);
    }

    #[test]
    fn test_duplicates_and_blanks_collapse() {
        let text = "alpha beta gamma";
        let offsets = resolve(
            text,
            &phrases(&["beta", "beta", "", "   "]),
            ResolutionMode::MatchStart,
        );
        assert_eq!(offsets, vec![6]);
    }

    #[test]
    fn test_first_occurrence_only() {
        let text = "marker once, marker twice";
        let offsets = resolve(text, &phrases(&["marker"]), ResolutionMode::MatchStart);
        assert_eq!(offsets, vec![0]);
    }
}
