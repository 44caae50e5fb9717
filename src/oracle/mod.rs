mod client;
mod types;


pub use client::{
    batch_prompt_overhead, build_batch_prompt, parse_batch_response, parse_candidate_lines,
    BatchItem, BoundaryOracle, OracleClient, OracleError, SummaryOracle,
};
pub use types::RecordAnalysis;
