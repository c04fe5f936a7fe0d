//! Suffix array construction by prefix doubling, with the inverse array and
//! the Burrows-Wheeler column derived from it.

/// Builds the suffix array of `seq` by prefix doubling: suffixes are sorted
/// by their first `2^r` symbols in round `r`, comparing pairs of ranks from
/// the previous round.
///
/// No sentinel is assumed; ties between a suffix and its proper prefix are
/// broken by length (the shorter compares smaller), which matches appending
/// a symbol below the whole alphabet.
///
/// # Examples
///
/// ```
/// use suctxt::algorithms::suffix::suffix_array;
///
/// let seq: Vec<usize> = b"banana".iter().map(|&b| b as usize).collect();
/// assert_eq!(suffix_array(&seq), vec![5, 3, 1, 0, 4, 2]);
/// ```
pub fn suffix_array(seq: &[usize]) -> Vec<usize> {
    let n = seq.len();
    if n <= 1 {
        return (0..n).collect();
    }

    let mut sorted = seq.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    let mut rank: Vec<usize> = seq
        .iter()
        .map(|v| sorted.binary_search(v).unwrap())
        .collect();

    let mut sa: Vec<usize> = (0..n).collect();
    let mut tmp = vec![0; n];
    let mut k = 1;
    loop {
        sa.sort_unstable_by_key(|&i| rank_pair(&rank, i, k));
        tmp[sa[0]] = 0;
        for t in 1..n {
            tmp[sa[t]] = tmp[sa[t - 1]]
                + (rank_pair(&rank, sa[t], k) != rank_pair(&rank, sa[t - 1], k)) as usize;
        }
        rank.copy_from_slice(&tmp);
        if rank[sa[n - 1]] == n - 1 {
            break;
        }
        k *= 2;
    }
    sa
}

// Sort key of suffix i in a round with window 2k: the ranks of its first and
// second halves. A missing second half sorts below every real rank.
#[inline(always)]
fn rank_pair(rank: &[usize], i: usize, k: usize) -> (usize, usize) {
    (rank[i], rank.get(i + k).map_or(0, |&r| r + 1))
}

/// Returns the inverse of the permutation `sa`.
///
/// # Examples
///
/// ```
/// use suctxt::algorithms::suffix::inverse_array;
///
/// assert_eq!(inverse_array(&[2, 0, 1]), vec![1, 2, 0]);
/// ```
pub fn inverse_array(sa: &[usize]) -> Vec<usize> {
    let mut isa = vec![0; sa.len()];
    for (rank, &pos) in sa.iter().enumerate() {
        isa[pos] = rank;
    }
    isa
}

/// Derives the Burrows-Wheeler column from `seq` and its suffix array:
/// the symbol preceding each suffix in text order, wrapping at the front.
pub fn bwt_from_sa(seq: &[usize], sa: &[usize]) -> Vec<usize> {
    let n = seq.len();
    sa.iter().map(|&pos| seq[(pos + n - 1) % n]).collect()
}
