use std::fs;

use super::*;
use crate::engine::DocumentProfile;

#[test]
fn test_round_trip_reconstruction() {
    let text = "  leading space\nmiddle part\ntrailing  ";
    let boundaries = vec![0, 16, 28, text.len()];
    let segments = materialize(text, &boundaries);

    let rebuilt: String = segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(rebuilt, text);
}

#[test]
fn test_label_from_markdown_heading() {
    let section = "## Article 1: Definitions\nThe parties agree...";
    let label = derive_label(section, &DocumentProfile::legal()).unwrap();
    assert_eq!(label, "Article 1 Definitions");
}

#[test]
fn test_label_from_clause_line() {
    let section = "SECTION 5.3. Governing Law\nThis agreement shall...";
    let label = derive_label(section, &DocumentProfile::legal()).unwrap();
    assert_eq!(label, "SECTION 53 Governing Law");
}

#[test]
fn test_label_from_meeting_title() {
    let section = "[00:30:45] Topic: Budget Allocation Discussion\nChair: ...";
    let label = derive_label(section, &DocumentProfile::meeting()).unwrap();
    assert_eq!(label, "Budget Allocation Discussion");
}

#[test]
fn test_label_truncated_and_sanitized() {
    let long_heading = format!("# {}!!!", "word ".repeat(30));
    let label = derive_label(&long_heading, &DocumentProfile::legal()).unwrap();
    assert!(label.chars().count() <= 50);
    assert!(label.chars().all(|c| c.is_ascii_alphanumeric() || c == ' '));
}

#[test]
fn test_no_label_for_plain_prose() {
    assert!(derive_label("just some ordinary text", &DocumentProfile::semantic()).is_none());
}

#[test]
fn test_write_segments_names_and_skips_empty() {
    let dir = tempfile::tempdir().unwrap();
    let profile = DocumentProfile::legal();
    let segments = vec![
        Segment {
            start: 0,
            end: 20,
            text: "# Scope\nIntro text".to_string(),
        },
        Segment {
            start: 20,
            end: 24,
            text: "   \n".to_string(), // whitespace only, skipped
        },
        Segment {
            start: 24,
            end: 40,
            text: "no heading here".to_string(),
        },
    ];

    let written = write_segments(dir.path(), &segments, &profile).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["001_scope.md", "section_003.md"]);
    assert_eq!(fs::read_to_string(&written[0]).unwrap(), "# Scope\nIntro text");
}

#[test]
fn test_unsanitizable_heading_falls_back_to_stem() {
    let dir = tempfile::tempdir().unwrap();
    let profile = DocumentProfile::legal();
    let segments = vec![
        Segment {
            start: 0,
            end: 5,
            text: "# ???\nbody".to_string(), // label sanitizes to empty
        },
        Segment {
            start: 5,
            end: 10,
            text: "plain".to_string(),
        },
    ];

    let written = write_segments(dir.path(), &segments, &profile).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["section_001.md", "section_002.md"]);
}

#[test]
fn test_creates_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let segments = vec![Segment {
        start: 0,
        end: 4,
        text: "text".to_string(),
    }];

    let written = write_segments(&nested, &segments, &DocumentProfile::semantic()).unwrap();
    assert!(written[0].exists());
}
