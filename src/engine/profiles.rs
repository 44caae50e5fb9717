use regex::Regex;

use crate::config::SplitConfig;
use crate::engine::patterns::PatternSet;
use crate::engine::resolver::ResolutionMode;

const SEMANTIC_PROMPT: &str = "Analyze this text and identify natural section breaks. Return ONLY the exact phrases that \
should precede each break, one per line. Focus on topic changes and semantic boundaries:

{chunk}";

const LEGAL_PROMPT: &str = "ANALYZE THIS LEGAL DOCUMENT AND IDENTIFY STRUCTURAL BOUNDARIES. RETURN:
1. Exact headings, article numbers, or clause markers where new sections begin
2. Include hierarchical markers (e.g., '##', '###') if present
3. One marker per line
4. Focus on these patterns:
   - Document headings (e.g., '# Scope', '## Article 1: Definitions')
   - Numbered clauses (e.g., '3.2 Confidentiality Obligations')
   - Roman numeral sections (e.g., 'IV. INDEMNIFICATION')
   - Section breaks (e.g., horizontal rules)
   - Clause titles in bold or ALL CAPS

EXAMPLES OF VALID RESPONSES:
# AGREEMENT AND PLAN OF MERGER
## ARTICLE III: REPRESENTATIONS
### Section 5.3. Governing Law
CLAUSE 4.2: Notices
SCHEDULE A
EXHIBIT B-1

TEXT TO ANALYZE:
{chunk}

RETURN ONLY THE EXACT SECTION HEADERS, ONE PER LINE:";

const MEETING_PROMPT: &str = "ANALYZE THIS MEETING TRANSCRIPT AND IDENTIFY TOPIC TRANSITIONS. RETURN:
1. Exact phrases where new agenda items or presentations begin
2. Focus on these patterns:
   - Agenda item announcements (\"Now moving to item 3...\")
   - Presentation titles (\"Quarterly Financial Report Overview\")
   - Moderation transitions (\"Let's open the floor for discussion\")
   - Topic shift markers (\"Next, we'll discuss...\")
3. Include timestamps if available
4. Return ONLY the exact transition phrases, one per line

EXAMPLES OF VALID RESPONSES:
[00:15:00] Chair: Moving to agenda item 5
Presentation: Community Outreach Strategy
Moderator: Let's hear from department heads
[00:30:45] Topic: Budget Allocation Discussion

TRANSCRIPT CHUNK:
{chunk}

TOPIC TRANSITIONS:";

/// Everything that distinguishes one splitter variant from another: prompt
/// text, structural patterns, how candidates resolve to offsets, window
/// geometry, and output naming. The reconciliation logic itself is shared.
#[derive(Debug)]
pub struct DocumentProfile {
    pub name: &'static str,
    prompt_template: &'static str,
    pub patterns: PatternSet,
    pub resolution: ResolutionMode,
    /// Oracle response lines at or below this length are discarded as noise.
    pub min_candidate_len: usize,
    pub default_model: &'static str,
    pub default_chunk_size: usize,
    pub default_overlap: usize,
    pub default_min_section: usize,
    /// Output file extension for emitted segments.
    pub extension: &'static str,
    /// Stem for segments with no derivable title.
    pub fallback_stem: &'static str,
    /// Tried in order against a segment's text; first capture group (or the
    /// whole match) becomes the segment label.
    pub title_patterns: Vec<Regex>,
}

impl DocumentProfile {
    /// Generic prose: oracle-only, split after the suggested phrase.
    pub fn semantic() -> Self {
        Self {
            name: "semantic",
            prompt_template: SEMANTIC_PROMPT,
            patterns: PatternSet::empty(),
            resolution: ResolutionMode::AfterMatch,
            min_candidate_len: 0,
            default_model: "mistral",
            default_chunk_size: 3000,
            default_overlap: 500,
            default_min_section: 0,
            extension: "txt",
            fallback_stem: "section",
            title_patterns: Vec::new(),
        }
    }

    /// Contracts and similar: headings, articles, numbered clauses.
    pub fn legal() -> Self {
        Self {
            name: "legal",
            prompt_template: LEGAL_PROMPT,
            patterns: PatternSet::new(&[
                r"(?m)^\s*#+\s+.+$",
                r"\n[A-Z]{3,}[^a-z\n]{15,}",
                r"\n(?:ARTICLE|SECTION|CLAUSE|SCHEDULE|EXHIBIT)\s+[IVXLCDM0-9.:]+",
                r"\n\d+\.\d+\.",
            ]),
            resolution: ResolutionMode::MatchStart,
            min_candidate_len: 2,
            default_model: "phi4",
            default_chunk_size: 5000,
            default_overlap: 1000,
            default_min_section: 1000,
            extension: "md",
            fallback_stem: "section",
            title_patterns: vec![
                Regex::new(r"(?m)^\s*#+\s*(.+)$").expect("invalid built-in pattern"),
                Regex::new(r"(?mi)^((?:ARTICLE|SECTION|CLAUSE)[^\n]*)").expect("invalid built-in pattern"),
            ],
        }
    }

    /// Meeting transcripts: agenda items, speaker labels, timestamps.
    pub fn meeting() -> Self {
        Self {
            name: "meeting",
            prompt_template: MEETING_PROMPT,
            patterns: PatternSet::new(&[
                r"\n\d+\.\s[A-Z]+",
                r"\n[A-Z]{2,}:\s",
                r"\[?\d+:\d+:\d+\]?",
                r"\nPresentation:\s",
                r"\nTopic:\s",
            ]),
            resolution: ResolutionMode::MatchStart,
            min_candidate_len: 5,
            default_model: "mistral",
            default_chunk_size: 6000,
            default_overlap: 1000,
            default_min_section: 1500,
            extension: "txt",
            fallback_stem: "discussion",
            title_patterns: vec![
                Regex::new(r"(?:Presentation|Topic|Agenda Item)[:\s]+([^\n]+)")
                    .expect("invalid built-in pattern"),
            ],
        }
    }

    /// Instantiate the profile's prompt for one analysis window.
    pub fn prompt_for(&self, window_text: &str) -> String {
        self.prompt_template.replace("{chunk}", window_text)
    }

    /// Split settings seeded with this profile's defaults.
    pub fn default_config(&self, endpoint: &str) -> SplitConfig {
        SplitConfig {
            endpoint: endpoint.to_string(),
            model: self.default_model.to_string(),
            chunk_size: self.default_chunk_size,
            overlap: self.default_overlap,
            min_section: self.default_min_section,
        }
    }
}
