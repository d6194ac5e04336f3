use crate::rng::DeRng;

/// Picks `K` donor indices from `0..pool_size`, never returning `exclude`.
///
/// Indices are distinct as long as the pool holds at least `K` candidates
/// other than `exclude`. Smaller pools are drawn without replacement first,
/// then the remaining slots are drawn with replacement from the same
/// candidates, so every slot stays a valid non-target individual.
pub(crate) fn distinct_indices<const K: usize>(
    exclude: usize,
    pool_size: usize,
    rng: &mut DeRng,
) -> [usize; K] {
    debug_assert!(exclude < pool_size && pool_size >= 2);
    let mut candidates: Vec<usize> = (0..pool_size).filter(|&idx| idx != exclude).collect();
    let distinct = K.min(candidates.len());

    let mut out = [0usize; K];
    // partial Fisher-Yates
    for k in 0..distinct {
        let j = k + rng.index(candidates.len() - k);
        candidates.swap(k, j);
        out[k] = candidates[k];
    }
    for slot in out.iter_mut().skip(distinct) {
        *slot = candidates[rng.index(candidates.len())];
    }
    out
}
