//! Sequences of integer symbols with rank/select queries.
//!
//! [`WaveletMatrix`] represents a sequence over an integer alphabet
//! $`[0, \sigma)`$ and answers `access`, `rank`, and `select` for any symbol
//! in $`O(\lg \sigma)`$ time. It is the substrate under the BWT column of
//! [`SuccinctText`](crate::text_indexes::SuccinctText).
pub mod wavelet_matrix;

pub use wavelet_matrix::WaveletMatrix;
