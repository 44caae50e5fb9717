/// Cost budget for one batch, in estimated tokens.
#[derive(Debug, Clone, Copy)]
pub struct PackPolicy {
    /// Target token count for one oracle call.
    pub budget: usize,
    /// Fixed cost charged when a batch is opened (prompt instructions).
    pub per_batch_overhead: usize,
    /// Fixed cost charged per admitted record (delimiter wrapper).
    pub per_record_overhead: usize,
}

/// Greedy single-pass bin packing in input order.
///
/// Records stay in encounter order across and within batches; an empty batch
/// always admits its record, so a single oversized record forms a singleton
/// batch rather than being dropped or split. This is first-fit-in-order, not
/// optimal packing: determinism and order preservation are the requirements,
/// optimality is not.
pub fn pack<T, F>(records: Vec<T>, policy: &PackPolicy, cost: F) -> Vec<Vec<T>>
where
    F: Fn(&T) -> usize,
{
    let mut batches = Vec::new();
    let mut current = Vec::new();
    let mut running = policy.per_batch_overhead;

    for record in records {
        let record_cost = cost(&record) + policy.per_record_overhead;
        if !current.is_empty() && running + record_cost > policy.budget {
            batches.push(std::mem::take(&mut current));
            running = policy.per_batch_overhead;
        }
        running += record_cost;
        current.push(record);
    }

    if !current.is_empty() {
        batches.push(current);
    }
    batches
}

/// Estimated cost of a text in abstract tokens, using a fixed
/// characters-per-token ratio. A replaceable strategy: `pack` takes any cost
/// function, so an exact tokenizer can be substituted without touching the
/// packing algorithm.
pub fn estimate_tokens(text: &str, chars_per_token: usize) -> usize {
    (text.len() / chars_per_token.max(1)).max(1)
}
