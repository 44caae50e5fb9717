use std::thread;

use anyhow::Result;

use crate::batcher::{estimate_tokens, pack, PackPolicy};
use crate::config::AnalyzeConfig;
use crate::oracle::{batch_prompt_overhead, BatchItem, OracleClient};
use crate::store::{AnalysisStore, StoredRecord};

/// Estimated token cost of one record's delimiter wrapper.
const RECORD_WRAPPER_TOKENS: usize = 20;

/// Outcome of one analysis run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    pub fetched: usize,
    pub batches: usize,
    pub updated: usize,
    pub failed_batches: usize,
}

/// Run the batched metadata analysis: fetch unanalyzed rows, pack them under
/// the token budget, and process one batch at a time. A batch that fails
/// after retries is logged and skipped; a row whose update fails is logged
/// and skipped; the run always continues with what remains.
pub fn run(store: &AnalysisStore, oracle: &OracleClient, config: &AnalyzeConfig) -> Result<AnalysisReport> {
    config.validate()?;
    store.ensure_metadata_columns()?;

    let records = store.fetch_unanalyzed(config.limit)?;
    if records.is_empty() {
        eprintln!("[analyzer] all rows have already been analyzed");
        return Ok(AnalysisReport::default());
    }

    let batches = plan_batches(records, config);
    let total = batches.len();
    eprintln!("[analyzer] {total} batches planned");

    let mut report = AnalysisReport {
        fetched: batches.iter().map(Vec::len).sum(),
        batches: total,
        ..AnalysisReport::default()
    };

    for (i, batch) in batches.iter().enumerate() {
        eprintln!(
            "[analyzer] processing batch {}/{} ({} records)",
            i + 1,
            total,
            batch.len()
        );

        let items: Vec<BatchItem<'_>> = batch
            .iter()
            .map(|r| BatchItem {
                id: r.rowid,
                text: &r.text,
            })
            .collect();

        match oracle.analyze_batch(&items, config.max_record_len) {
            Some(results) => {
                eprintln!("[analyzer] received analysis for {} records", results.len());
                for (rowid, analysis) in &results {
                    match store.apply_analysis(*rowid, analysis, &config.model) {
                        Ok(()) => report.updated += 1,
                        Err(e) => eprintln!("[analyzer] failed to update row {rowid}: {e}"),
                    }
                }
            }
            None => {
                eprintln!("[analyzer] batch {} failed after retries, skipping", i + 1);
                report.failed_batches += 1;
            }
        }

        // Fixed inter-call delay to respect external rate limits.
        if i + 1 < total {
            thread::sleep(config.request_delay);
        }
    }

    Ok(report)
}

/// Group records into oracle batches under the token budget. The fixed
/// prompt instructions are charged once per batch, each record's wrapper
/// once per record; record cost is estimated from the full stored text.
pub fn plan_batches(records: Vec<StoredRecord>, config: &AnalyzeConfig) -> Vec<Vec<StoredRecord>> {
    let policy = PackPolicy {
        budget: config.token_budget,
        per_batch_overhead: batch_prompt_overhead(config.chars_per_token),
        per_record_overhead: RECORD_WRAPPER_TOKENS,
    };
    let chars_per_token = config.chars_per_token;
    let batches = pack(records, &policy, |r| estimate_tokens(&r.text, chars_per_token));
    eprintln!(
        "[analyzer] packed {} records into {} batches",
        batches.iter().map(Vec::len).sum::<usize>(),
        batches.len()
    );
    batches
}
