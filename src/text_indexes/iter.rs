//! Lazy iteration over pattern occurrences.

use crate::text_indexes::{SaRange, SuccinctText};

/// Lazy iterator over the text offsets of the occurrences of a pattern,
/// created by [`SuccinctText::occurrences()`].
///
/// Yields one offset per suffix-array row of the match range, in row order
/// (not text order). The iterator is single-pass: to restart, call
/// [`SuccinctText::occurrences()`] again.
pub struct Occurrences<'a> {
    st: &'a SuccinctText,
    next: usize,
    end: usize,
}

impl<'a> Occurrences<'a> {
    pub(crate) fn new(st: &'a SuccinctText, range: SaRange) -> Self {
        Self {
            st,
            next: range.begin,
            end: range.end.max(range.begin),
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next < self.end {
            // Rows of a match range always decode.
            let offset = self.st.lookup_sa(self.next).unwrap();
            self.next += 1;
            Some(offset)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Occurrences<'_> {}
