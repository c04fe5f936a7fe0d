//! # Suctxt: a self-indexing compressed text store in Rust
//!
//! Suctxt stores a byte sequence in a compressed suffix-array index and
//! answers substring queries directly on the compressed representation,
//! without ever reconstructing the whole text:
//!
//! - [`count`](text_indexes::SuccinctText::count): number of occurrences of
//!   a byte pattern,
//! - [`search`](text_indexes::SuccinctText::search): all occurrence offsets,
//! - [`extract`](text_indexes::SuccinctText::extract): random access to any
//!   substring,
//! - [`regex_search`](text_indexes::SuccinctText::regex_search): bounded
//!   regular-expression search evaluated in the suffix-array domain.
//!
//! The index is built once from a byte slice, is immutable afterwards, and
//! can be persisted to a byte-exact big-endian layout with [`Serializable`].
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use suctxt::text_indexes::SuccinctText;
//!
//! let idx = SuccinctText::new(b"abracadabra")?;
//!
//! assert_eq!(idx.count(b"abra"), 2);
//! let mut offsets = idx.search(b"abra");
//! offsets.sort_unstable();
//! assert_eq!(offsets, vec![0, 7]);
//!
//! assert_eq!(idx.extract(7, 4)?, b"abra");
//! # Ok(())
//! # }
//! ```
//!
//! # Structure
//!
//! The crate is layered bottom-up, each layer a self-contained succinct
//! structure:
//!
//! | Module | Contents |
//! | --- | --- |
//! | [`bit_vectors`] | plain bit vectors and the [`RsBitVector`] rank/select dictionary |
//! | [`int_vectors`] | [`CompactVector`], a fixed-width bit-packed integer array |
//! | [`char_sequences`] | [`WaveletMatrix`] with rank/select over an integer alphabet |
//! | [`algorithms`] | build-time suffix array, inverse array, and BWT construction |
//! | [`text_indexes`] | [`SuccinctText`], the compressed self-index tying it together |
//! | [`regex`] | the byte-regex dialect searched through the index |
#![deny(missing_docs)]
#![cfg(target_pointer_width = "64")]

pub mod algorithms;
pub mod bit_vectors;
pub mod broadword;
pub mod char_sequences;
pub mod int_vectors;
pub mod regex;
pub mod serial;
pub mod text_indexes;

pub use bit_vectors::{BitVector, RsBitVector};
pub use char_sequences::WaveletMatrix;
pub use int_vectors::CompactVector;
pub use serial::Serializable;
pub use text_indexes::SuccinctText;
