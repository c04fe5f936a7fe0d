//! LF and ψ navigation in the suffix-array domain.
//!
//! Both steps are pure functions over the shared BWT column and cumulative
//! counts of a [`SuccinctText`]; neither owns the other, and each is the
//! inverse of the other. For a row `i` of the conceptual suffix array `SA`,
//!
//! - [`lf`] moves to the row of the preceding text position:
//!   `SA[lf(i)] = SA[i] - 1 (mod m)`,
//! - [`psi`] moves to the row of the following text position:
//!   `SA[psi(i)] = SA[i] + 1 (mod m)`,
//!
//! where `m` is the number of rows (text length plus the sentinel).

use crate::text_indexes::SuccinctText;

/// Maps row `i` to the row of the preceding text position:
/// the cumulative count of the BWT symbol at `i` plus its rank before `i`.
///
/// # Panics
///
/// In debug builds, panics if `i` is out of bounds.
#[inline]
pub fn lf(st: &SuccinctText, i: usize) -> usize {
    debug_assert!(i < st.seq_len());
    // In-bounds rows always hold a symbol.
    let id = st.bwt().access(i).unwrap();
    st.counts()[id] + st.bwt().rank(i, id).unwrap()
}

/// Maps row `i` to the row of the following text position: the inverse of
/// [`lf`], found by binary-searching the cumulative counts for the leading
/// symbol of row `i` and selecting its occurrence in the BWT column.
///
/// # Panics
///
/// In debug builds, panics if `i` is out of bounds.
#[inline]
pub fn psi(st: &SuccinctText, i: usize) -> usize {
    debug_assert!(i < st.seq_len());
    let id = st.f_symbol(i);
    // The k-th row leading with a symbol has a k-th BWT occurrence of it.
    st.bwt().select(i - st.counts()[id], id).unwrap()
}
