use super::*;
use crate::config::SplitConfig;
use crate::oracle::BoundaryOracle;

/// Scripted oracle: returns a fixed candidate list for every window.
struct FixedOracle {
    candidates: Vec<String>,
}

impl BoundaryOracle for FixedOracle {
    fn boundary_candidates(&self, _window_text: &str, _profile: &DocumentProfile) -> Vec<String> {
        self.candidates.clone()
    }
}

/// Oracle that always fails (degrades to empty).
struct DeadOracle;

impl BoundaryOracle for DeadOracle {
    fn boundary_candidates(&self, _window_text: &str, _profile: &DocumentProfile) -> Vec<String> {
        Vec::new()
    }
}

fn engine(profile: DocumentProfile, chunk_size: usize, overlap: usize, min_section: usize) -> SegmentationEngine {
    let config = SplitConfig {
        endpoint: String::new(),
        model: String::new(),
        chunk_size,
        overlap,
        min_section,
    };
    SegmentationEngine::new(profile, config).unwrap()
}

#[test]
fn test_rejects_invalid_geometry_before_processing() {
    let config = SplitConfig {
        endpoint: String::new(),
        model: String::new(),
        chunk_size: 100,
        overlap: 200,
        min_section: 0,
    };
    assert!(SegmentationEngine::new(DocumentProfile::semantic(), config).is_err());
}

#[test]
fn test_oracle_candidates_become_boundaries() {
    let text = "alpha section one ends. beta section two continues onward to the end.";
    let eng = engine(DocumentProfile::semantic(), 1000, 100, 0);
    let oracle = FixedOracle {
        candidates: vec!["one ends.".to_string()],
    };

    let boundaries = eng.split(&oracle, text).unwrap();
    let after = text.find("one ends.").unwrap() + "one ends.".len();
    assert_eq!(boundaries, vec![0, after, text.len()]);
}

#[test]
fn test_structural_floor_without_oracle() {
    // The legal pattern set alone should still find the ARTICLE label.
    let body = "x".repeat(60);
    let text = format!("# Opening\n{body}\nARTICLE II: TERMS\n{body}");
    let eng = engine(DocumentProfile::legal(), 10_000, 1000, 20);

    let boundaries = eng.split(&DeadOracle, &text).unwrap();
    assert!(boundaries.contains(&text.find("\nARTICLE").unwrap()));
    assert_eq!(*boundaries.first().unwrap(), 0);
    assert_eq!(*boundaries.last().unwrap(), text.len());
}

#[test]
fn test_hallucinated_candidates_are_harmless() {
    let text = "plain text with no matching phrases at all, long enough to window.";
    let eng = engine(DocumentProfile::semantic(), 1000, 100, 0);
    let oracle = FixedOracle {
        candidates: vec!["this phrase is not in the document".to_string()],
    };

    let boundaries = eng.split(&oracle, text).unwrap();
    assert_eq!(boundaries, vec![0, text.len()]);
}

#[test]
fn test_min_section_collapses_close_boundaries() {
    let text = "abcdefghij".repeat(10); // 100 bytes, no structure
    let eng = engine(DocumentProfile::semantic(), 1000, 100, 30);
    // "abcde" resolves after-match to 5, "fghij" to 10: too close together,
    // the later one wins; both are within min_section of the start so the
    // leading span stays short but pinned at 0.
    let oracle = FixedOracle {
        candidates: vec!["abcde".to_string(), "fghij".to_string()],
    };

    let boundaries = eng.split(&oracle, &text).unwrap();
    assert_eq!(*boundaries.first().unwrap(), 0);
    assert_eq!(*boundaries.last().unwrap(), text.len());
    for pair in boundaries.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}
