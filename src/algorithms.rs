//! Build-time algorithms over symbol sequences.
//!
//! These run once during index construction and are not needed on the query
//! path; they may allocate linear transient memory.
pub mod suffix;
