/// Merge oracle-resolved and structural offsets into one monotonic boundary
/// list bracketed by `0` and `doc_len`.
///
/// Offsets outside `(0, doc_len]` are dropped, the union is sorted and
/// deduplicated, then a single pass enforces `min_spacing`: an offset too
/// close to the previously accepted one replaces it (the later of two
/// colliding candidates is assumed closer to the true boundary). The document
/// start is pinned, so the leading span may be shorter than `min_spacing`,
/// and the `doc_len` sentinel always survives: a boundary too close to the
/// end is absorbed into it rather than cutting a sliver segment.
pub fn reconcile(
    candidate_offsets: &[usize],
    structural_offsets: &[usize],
    min_spacing: usize,
    doc_len: usize,
) -> Vec<usize> {
    if doc_len == 0 {
        return vec![0];
    }

    let mut offsets: Vec<usize> = candidate_offsets
        .iter()
        .chain(structural_offsets.iter())
        .copied()
        .filter(|&o| o > 0 && o < doc_len)
        .collect();
    offsets.push(doc_len);
    offsets.sort_unstable();
    offsets.dedup();

    // `offsets` is strictly increasing and starts above 0, so every offset
    // either pushes or replaces and `last` tracks the tail of `accepted`.
    let mut accepted = vec![0usize];
    let mut last = 0usize;
    for &offset in &offsets {
        if offset - last >= min_spacing {
            accepted.push(offset);
        } else if accepted.len() > 1 {
            let tail = accepted.len() - 1;
            accepted[tail] = offset;
        } else {
            // Too close to the pinned document start: keep the offset
            // rather than displacing 0.
            accepted.push(offset);
        }
        last = offset;
    }

    accepted
}
