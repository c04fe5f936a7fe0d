//! The prelude for bit vectors.
//!
//! Alleviates imports of the common bit-vector traits.
//!
//! ```
//! # #![allow(unused_imports)]
//! use suctxt::bit_vectors::prelude::*;
//! ```
pub use crate::bit_vectors::{Access, Build, NumBits, Rank, Select};
