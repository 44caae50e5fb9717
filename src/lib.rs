// Public API exports
pub mod analyzer;
pub mod batcher;
pub mod chunker;
pub mod config;
pub mod emitter;
pub mod engine;
pub mod oracle;
pub mod store;
pub mod summarizer;

// Re-export main types for convenience
pub use analyzer::AnalysisReport;
pub use batcher::{estimate_tokens, pack, PackPolicy};
pub use chunker::{chunk, Window};
pub use config::{AnalyzeConfig, ConfigError, SplitConfig};
pub use emitter::{derive_label, materialize, write_segments, Segment};
pub use engine::{
    reconcile, resolve, DocumentProfile, PatternSet, ResolutionMode, SegmentationEngine,
};
pub use oracle::{
    BatchItem, BoundaryOracle, OracleClient, OracleError, RecordAnalysis, SummaryOracle,
};
pub use store::{AnalysisStore, StoredRecord};
pub use summarizer::SummaryReport;
