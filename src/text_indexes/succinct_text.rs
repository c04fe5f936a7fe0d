//! The compressed self-index over a byte text.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::io::{Read, Write};

use anyhow::{anyhow, Result};

use crate::algorithms::suffix;
use crate::bit_vectors::{Access, Rank, RsBitVector};
use crate::broadword;
use crate::char_sequences::WaveletMatrix;
use crate::int_vectors::CompactVector;
use crate::regex::{self, RegexMatch, RegexParseError};
use crate::text_indexes::iter::Occurrences;
use crate::text_indexes::{nav, SaRange};
use crate::Serializable;

/// The compressed self-index over a byte text.
///
/// [`SuccinctText`] stores a byte sequence in a compressed suffix-array
/// index and answers queries directly on that representation:
///
/// - [`count`](Self::count) and [`search`](Self::search) for substring
///   occurrences via backward search on the BWT,
/// - [`extract`](Self::extract) and friends for random access to any
///   substring via sampled inverse-suffix-array walks,
/// - [`regex_search`](Self::regex_search) for a byte-regex dialect evaluated
///   in the suffix-array domain.
///
/// Internally the text is terminated by a sentinel symbol smaller than every
/// byte, so the conceptual suffix array has `self.len() + 1` rows; the
/// sentinel never appears in query results. Symbols are stored as dense ids
/// in sorted byte order, which the cumulative counts and the wavelet matrix
/// over the BWT column share as their single canonical ordering.
///
/// Once built, the index is immutable: all query methods take `&self`, so an
/// instance can be queried concurrently from any number of threads.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use suctxt::text_indexes::SuccinctText;
///
/// let idx = SuccinctText::new(b"mississippi")?;
///
/// assert_eq!(idx.count(b"issi"), 2);
/// let mut offsets = idx.search(b"issi");
/// offsets.sort_unstable();
/// assert_eq!(offsets, vec![1, 4]);
///
/// assert_eq!(idx.extract(4, 4)?, b"issi");
/// assert_eq!(idx.char_at(10)?, b'i');
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccinctText {
    text_len: usize,
    alphabet: Vec<u8>,
    counts: Vec<usize>,
    bwt: WaveletMatrix<RsBitVector>,
    // Rows whose suffix-array value is a multiple of the rate, i.e., exactly
    // the rows named by isa_samples.
    sampled_rows: RsBitVector,
    // Per marked row in row order, its suffix-array value over the rate.
    sa_samples: CompactVector,
    isa_samples: CompactVector,
    sample_rate: usize,
}

/// The default suffix-array sampling rate.
pub const DEFAULT_SAMPLE_RATE: usize = 32;

impl SuccinctText {
    /// Builds an index over `text` with the default sampling rate of 32.
    ///
    /// # Errors
    ///
    /// An error is returned if the construction fails.
    pub fn new(text: &[u8]) -> Result<Self> {
        Self::with_sample_rate(text, DEFAULT_SAMPLE_RATE)
    }

    /// Builds an index over `text`, materializing every `sample_rate`-th
    /// suffix-array and inverse entry.
    ///
    /// Smaller rates speed up [`Self::search`] and [`Self::extract`] at the
    /// cost of space. Query results are identical for any rate.
    ///
    /// # Errors
    ///
    /// An error is returned if `sample_rate` is zero or not a power of two.
    pub fn with_sample_rate(text: &[u8], sample_rate: usize) -> Result<Self> {
        if sample_rate == 0 || !sample_rate.is_power_of_two() {
            return Err(anyhow!(
                "sample_rate must be a positive power of two, but got {sample_rate}."
            ));
        }

        let mut present = [false; 256];
        for &b in text {
            present[b as usize] = true;
        }
        let alphabet: Vec<u8> = (0..=255u8).filter(|&b| present[b as usize]).collect();

        // Dense ids in sorted byte order; id 0 is the sentinel.
        let mut seq: Vec<usize> = Vec::with_capacity(text.len() + 1);
        for &b in text {
            seq.push(alphabet.binary_search(&b).unwrap() + 1);
        }
        seq.push(0);

        let num_ids = alphabet.len() + 1;
        let mut counts = vec![0; num_ids + 1];
        for &id in &seq {
            counts[id + 1] += 1;
        }
        for i in 1..counts.len() {
            counts[i] += counts[i - 1];
        }

        let sa = suffix::suffix_array(&seq);
        let isa = suffix::inverse_array(&sa);
        let bwt_ids = suffix::bwt_from_sa(&seq, &sa);

        let id_width = broadword::msb(num_ids as u64).map_or(1, |n| n + 1);
        let mut bwt_seq = CompactVector::new(id_width)?;
        bwt_seq.extend(bwt_ids.into_iter().map(|id| id as u64))?;
        let bwt = WaveletMatrix::new(bwt_seq)?;

        // Sample the inverse at every rate-th text position and mark the rows
        // those samples name; a marked row holds a suffix-array value that is
        // a multiple of the rate, which bounds the locate walk.
        let num_samples = (seq.len() + sample_rate - 1) / sample_rate;
        let mut isa_vals = Vec::with_capacity(num_samples);
        for k in 0..num_samples {
            isa_vals.push(isa[k * sample_rate]);
        }
        let mut marked = vec![false; seq.len()];
        for &row in &isa_vals {
            marked[row] = true;
        }
        let mut sa_vals = Vec::with_capacity(num_samples);
        for (row, &mark) in marked.iter().enumerate() {
            if mark {
                debug_assert_eq!(sa[row] % sample_rate, 0);
                sa_vals.push(sa[row] / sample_rate);
            }
        }
        let sampled_rows = RsBitVector::from_bits(marked);
        let sa_samples = CompactVector::from_slice(&sa_vals)?;
        let isa_samples = CompactVector::from_slice(&isa_vals)?;

        Ok(Self {
            text_len: text.len(),
            alphabet,
            counts,
            bwt,
            sampled_rows,
            sa_samples,
            isa_samples,
            sample_rate,
        })
    }

    /// Returns the length of the indexed text in bytes.
    pub const fn len(&self) -> usize {
        self.text_len
    }

    /// Checks if the indexed text is empty.
    pub const fn is_empty(&self) -> bool {
        self.text_len == 0
    }

    /// Returns the sorted distinct bytes of the indexed text.
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    /// Returns the suffix-array sampling rate.
    pub const fn sample_rate(&self) -> usize {
        self.sample_rate
    }

    // The number of suffix-array rows: text length plus the sentinel.
    pub(crate) const fn seq_len(&self) -> usize {
        self.text_len + 1
    }

    pub(crate) fn bwt(&self) -> &WaveletMatrix<RsBitVector> {
        &self.bwt
    }

    pub(crate) fn counts(&self) -> &[usize] {
        &self.counts
    }

    // The id of the leading symbol of row i: the largest id whose cumulative
    // count does not exceed i.
    pub(crate) fn f_symbol(&self, i: usize) -> usize {
        debug_assert!(i < self.seq_len());
        self.counts.partition_point(|&c| c <= i) - 1
    }

    fn byte_to_id(&self, b: u8) -> Option<usize> {
        self.alphabet.binary_search(&b).ok().map(|r| r + 1)
    }

    // All rows except the sentinel row, i.e., the match range of the empty
    // pattern.
    fn full_range(&self) -> SaRange {
        SaRange::new(1, self.seq_len())
    }

    /// Recovers the text offset of suffix-array row `i`, or [`None`] if out
    /// of bounds.
    ///
    /// Steps LF to the nearest sampled row, at most
    /// `self.sample_rate() - 1` times, and offsets that row's stored sample
    /// by the hop count.
    pub fn lookup_sa(&self, i: usize) -> Option<usize> {
        if self.seq_len() <= i {
            return None;
        }
        let mut row = i;
        let mut hops = 0;
        // Each LF step lowers the suffix-array value by one, and every value
        // that is a multiple of the rate sits on a marked row.
        while !self.sampled_rows.access(row).unwrap() {
            row = nav::lf(self, row);
            hops += 1;
        }
        debug_assert!(hops < self.sample_rate);
        let slot = self.sampled_rows.rank1(row).unwrap();
        let sampled = self.sa_samples.get_int(slot).unwrap() as usize * self.sample_rate;
        Some((sampled + hops) % self.seq_len())
    }

    /// Recovers the suffix-array row of text position `p`, or [`None`] if
    /// out of bounds. Position `self.len()` addresses the sentinel row.
    ///
    /// Starts at the nearest preceding sampled position and steps ψ at most
    /// `self.sample_rate() - 1` times.
    pub fn lookup_isa(&self, p: usize) -> Option<usize> {
        if self.seq_len() <= p {
            return None;
        }
        let mut row = self.isa_samples.get_int(p / self.sample_rate).unwrap() as usize;
        for _ in 0..p % self.sample_rate {
            row = nav::psi(self, row);
        }
        Some(row)
    }

    /// Performs backward search, returning the suffix-array range of rows
    /// whose suffixes start with `pat`.
    ///
    /// The empty pattern matches before every text position. A pattern byte
    /// absent from the alphabet yields the empty range.
    ///
    /// # Complexity
    ///
    /// $`O(|pat| \lg \sigma)`$
    pub fn bwd_search(&self, pat: &[u8]) -> SaRange {
        if pat.is_empty() {
            return self.full_range();
        }
        self.continue_bwd_search(pat, SaRange::new(0, self.seq_len()))
    }

    /// Continues a backward search: prepends the whole of `pat` to the
    /// matches represented by `range`.
    ///
    /// `range` must come from a previous search on this index.
    pub fn continue_bwd_search(&self, pat: &[u8], range: SaRange) -> SaRange {
        let (mut lo, mut hi) = (range.begin, range.end);
        for &b in pat.iter().rev() {
            let id = match self.byte_to_id(b) {
                Some(id) => id,
                None => return SaRange::EMPTY,
            };
            // Range bounds stay within the row count.
            lo = self.counts[id] + self.bwt.rank(lo, id).unwrap();
            hi = self.counts[id] + self.bwt.rank(hi, id).unwrap();
            if hi <= lo {
                return SaRange::EMPTY;
            }
        }
        SaRange::new(lo, hi)
    }

    /// Performs forward search, returning the same range as
    /// [`Self::bwd_search`] by binary search over the suffix order, with
    /// suffix symbols streamed through ψ.
    ///
    /// # Complexity
    ///
    /// $`O(|pat| \lg^2 n)`$
    pub fn fwd_search(&self, pat: &[u8]) -> SaRange {
        if pat.is_empty() {
            return self.full_range();
        }
        self.continue_fwd_search(pat, SaRange::new(0, self.seq_len()), 0)
    }

    /// Continues a forward search: narrows `range` to the rows whose
    /// suffixes also carry `pat[offset..]` from position `offset` onwards.
    ///
    /// All rows of `range` must share the first `offset` pattern bytes,
    /// which holds when `range` came from a forward search of
    /// `pat[..offset]`.
    pub fn continue_fwd_search(&self, pat: &[u8], range: SaRange, offset: usize) -> SaRange {
        if pat.len() <= offset {
            return range;
        }
        if range.is_empty() {
            return SaRange::EMPTY;
        }

        let (mut a, mut b) = (range.begin, range.end);
        while a < b {
            let mid = a + (b - a) / 2;
            if self.cmp_row_suffix(mid, pat, offset) == Ordering::Less {
                a = mid + 1;
            } else {
                b = mid;
            }
        }
        let begin = a;

        let mut b = range.end;
        while a < b {
            let mid = a + (b - a) / 2;
            if self.cmp_row_suffix(mid, pat, offset) == Ordering::Greater {
                b = mid;
            } else {
                a = mid + 1;
            }
        }
        if begin < a {
            SaRange::new(begin, a)
        } else {
            SaRange::EMPTY
        }
    }

    // Compares the suffix at row `row` against `pat[skip..]`, skipping the
    // first `skip` suffix symbols, truncated to the pattern length. A suffix
    // that runs out compares less.
    fn cmp_row_suffix(&self, mut row: usize, pat: &[u8], skip: usize) -> Ordering {
        for _ in 0..skip {
            row = nav::psi(self, row);
        }
        for &b in &pat[skip..] {
            let id = self.f_symbol(row);
            if id == 0 {
                return Ordering::Less;
            }
            match self.alphabet[id - 1].cmp(&b) {
                Ordering::Equal => row = nav::psi(self, row),
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// Returns the suffix-array range spanning every suffix between the two
    /// patterns: from the first suffix starting with `lo_pat` through the
    /// last suffix starting with `hi_pat`.
    ///
    /// The empty range is returned if either endpoint pattern does not
    /// occur.
    pub fn range_search(&self, lo_pat: &[u8], hi_pat: &[u8]) -> SaRange {
        let lo = self.bwd_search(lo_pat);
        let hi = self.bwd_search(hi_pat);
        if lo.is_empty() || hi.is_empty() {
            return SaRange::EMPTY;
        }
        SaRange::new(lo.begin, hi.end)
    }

    /// Returns the number of occurrences of `pat` in the text.
    ///
    /// The empty pattern counts once per text position.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use suctxt::text_indexes::SuccinctText;
    ///
    /// let idx = SuccinctText::new(b"abracadabra")?;
    /// assert_eq!(idx.count(b"a"), 5);
    /// assert_eq!(idx.count(b"abra"), 2);
    /// assert_eq!(idx.count(b"abracadabrax"), 0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn count(&self, pat: &[u8]) -> usize {
        self.bwd_search(pat).len()
    }

    /// Returns the offsets of all occurrences of `pat`, in no particular
    /// order.
    pub fn search(&self, pat: &[u8]) -> Vec<usize> {
        self.occurrences(pat).collect()
    }

    /// Returns a lazy iterator over the offsets of all occurrences of `pat`.
    ///
    /// The iterator is single-pass; restart by calling this method again.
    pub fn occurrences(&self, pat: &[u8]) -> Occurrences<'_> {
        Occurrences::new(self, self.bwd_search(pat))
    }

    /// Resolves every row of `range` to its text offset, in no particular
    /// order.
    ///
    /// `range` must come from a previous search on this index.
    pub fn range_to_offsets(&self, range: SaRange) -> Vec<usize> {
        Occurrences::new(self, range).collect()
    }

    /// Extracts `len` bytes of the text starting at `offset`, clamped to the
    /// end of the text.
    ///
    /// # Errors
    ///
    /// An error is returned if `self.len() < offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use suctxt::text_indexes::SuccinctText;
    ///
    /// let idx = SuccinctText::new(b"abracadabra")?;
    /// assert_eq!(idx.extract(7, 4)?, b"abra");
    /// assert_eq!(idx.extract(10, 5)?, b"a");
    /// # Ok(())
    /// # }
    /// ```
    pub fn extract(&self, offset: usize, len: usize) -> Result<Vec<u8>> {
        if self.text_len < offset {
            return Err(anyhow!(
                "offset must be no greater than self.len()={}, but got {offset}.",
                self.text_len
            ));
        }
        let end = offset.saturating_add(len).min(self.text_len);
        let mut buf = Vec::with_capacity(end - offset);
        // In-bounds positions always resolve.
        let mut row = self.lookup_isa(end).unwrap();
        for _ in offset..end {
            let id = self.bwt.access(row).unwrap();
            debug_assert_ne!(id, 0);
            buf.push(self.alphabet[id - 1]);
            row = nav::lf(self, row);
        }
        buf.reverse();
        Ok(buf)
    }

    /// Extracts bytes starting at `offset` up to (not including) the first
    /// occurrence of `delim`, or to the end of the text.
    ///
    /// # Errors
    ///
    /// An error is returned if `self.len() < offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use suctxt::text_indexes::SuccinctText;
    ///
    /// let idx = SuccinctText::new(b"The quick brown fox")?;
    /// assert_eq!(idx.extract_until(0, b' ')?, b"The");
    /// assert_eq!(idx.extract_until(16, b' ')?, b"fox");
    /// # Ok(())
    /// # }
    /// ```
    pub fn extract_until(&self, offset: usize, delim: u8) -> Result<Vec<u8>> {
        if self.text_len < offset {
            return Err(anyhow!(
                "offset must be no greater than self.len()={}, but got {offset}.",
                self.text_len
            ));
        }
        let mut buf = vec![];
        let mut row = self.lookup_isa(offset).unwrap();
        loop {
            let id = self.f_symbol(row);
            if id == 0 {
                break;
            }
            let b = self.alphabet[id - 1];
            if b == delim {
                break;
            }
            buf.push(b);
            row = nav::psi(self, row);
        }
        Ok(buf)
    }

    /// Returns the byte at text position `i`.
    ///
    /// # Errors
    ///
    /// An error is returned if `self.len() <= i`.
    pub fn char_at(&self, i: usize) -> Result<u8> {
        if self.text_len <= i {
            return Err(anyhow!(
                "i must be less than self.len()={}, but got {i}.",
                self.text_len
            ));
        }
        // T[i] is the BWT symbol of the row following position i.
        let row = self.lookup_isa(i + 1).unwrap();
        let id = self.bwt.access(row).unwrap();
        debug_assert_ne!(id, 0);
        Ok(self.alphabet[id - 1])
    }

    /// Extracts the big-endian `u16` at `offset`.
    ///
    /// # Errors
    ///
    /// An error is returned if fewer than two bytes remain at `offset`.
    pub fn extract_u16(&self, offset: usize) -> Result<u16> {
        let bytes = self.extract_exact(offset, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Extracts the big-endian `u32` at `offset`.
    ///
    /// # Errors
    ///
    /// An error is returned if fewer than four bytes remain at `offset`.
    pub fn extract_u32(&self, offset: usize) -> Result<u32> {
        let bytes = self.extract_exact(offset, 4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Extracts the big-endian `u64` at `offset`.
    ///
    /// # Errors
    ///
    /// An error is returned if fewer than eight bytes remain at `offset`.
    pub fn extract_u64(&self, offset: usize) -> Result<u64> {
        let bytes = self.extract_exact(offset, 8)?;
        let mut fixed = [0; 8];
        fixed.copy_from_slice(&bytes);
        Ok(u64::from_be_bytes(fixed))
    }

    fn extract_exact(&self, offset: usize, width: usize) -> Result<Vec<u8>> {
        if self.text_len < offset.saturating_add(width) {
            return Err(anyhow!(
                "offset must leave at least {width} bytes in self.len()={}, but got {offset}.",
                self.text_len
            ));
        }
        self.extract(offset, width)
    }

    /// Compares `buf` lexicographically with the text starting at position
    /// `i`, truncated to the buffer length.
    ///
    /// Returns [`Ordering::Less`] if `buf` is smaller than the text there,
    /// [`Ordering::Greater`] if larger. A text that runs out first compares
    /// smaller.
    ///
    /// # Errors
    ///
    /// An error is returned if `self.len() < i`.
    pub fn compare(&self, buf: &[u8], i: usize) -> Result<Ordering> {
        self.compare_from(buf, i, 0)
    }

    /// Like [`Self::compare`], but skips the first `skip` bytes of `buf`
    /// (comparing `buf[skip..]` with the text starting at `i`).
    ///
    /// # Errors
    ///
    /// An error is returned if `self.len() < i` or `buf.len() < skip`.
    pub fn compare_from(&self, buf: &[u8], i: usize, skip: usize) -> Result<Ordering> {
        if self.text_len < i {
            return Err(anyhow!(
                "i must be no greater than self.len()={}, but got {i}.",
                self.text_len
            ));
        }
        if buf.len() < skip {
            return Err(anyhow!(
                "skip must be no greater than buf.len()={}, but got {skip}.",
                buf.len()
            ));
        }
        let mut row = self.lookup_isa(i).unwrap();
        for &b in &buf[skip..] {
            let id = self.f_symbol(row);
            if id == 0 {
                return Ok(Ordering::Greater);
            }
            match b.cmp(&self.alphabet[id - 1]) {
                Ordering::Equal => row = nav::psi(self, row),
                other => return Ok(other),
            }
        }
        Ok(Ordering::Equal)
    }

    /// Checks if two offsets belong to the same record.
    ///
    /// A plain text has a single record, so this always holds; sharded
    /// variants layering a record map over the index override the notion.
    pub fn same_record(&self, _first: usize, _second: usize) -> bool {
        true
    }

    /// Searches the text for every match of the regular expression
    /// `pattern`, returning the set of `(offset, length)` matches.
    ///
    /// The dialect covers literals, `.`, `[...]` classes with ranges,
    /// groups, alternation, `*`, `+`, `?`, and backslash escapes. Matching
    /// is evaluated in the suffix-array domain and enumerates all repeat
    /// counts of `*`/`+`; zero-length matches are never reported.
    ///
    /// # Errors
    ///
    /// [`RegexParseError`] is returned for a malformed or unsupported
    /// pattern, pointing at the offending byte.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use suctxt::regex::RegexMatch;
    /// use suctxt::text_indexes::SuccinctText;
    ///
    /// let idx = SuccinctText::new(b"banana")?;
    /// let matches = idx.regex_search("an+")?;
    /// let expected = [RegexMatch::new(1, 2), RegexMatch::new(3, 2)];
    /// assert_eq!(matches, expected.into_iter().collect());
    /// # Ok(())
    /// # }
    /// ```
    pub fn regex_search(
        &self,
        pattern: &str,
    ) -> std::result::Result<BTreeSet<RegexMatch>, RegexParseError> {
        let ast = regex::parser::parse(pattern)?;
        Ok(regex::executor::execute(self, &ast))
    }
}

impl Serializable for SuccinctText {
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mut mem = (self.text_len as u64).serialize_into(&mut writer)?;
        mem += (self.alphabet.len() as u32).serialize_into(&mut writer)?;
        for &b in &self.alphabet {
            mem += (b as u32).serialize_into(&mut writer)?;
        }
        mem += self.counts.serialize_into(&mut writer)?;
        mem += self.bwt.serialize_into(&mut writer)?;
        mem += (self.sample_rate as u32).serialize_into(&mut writer)?;
        mem += self.sa_samples.serialize_into(&mut writer)?;
        mem += self.isa_samples.serialize_into(&mut writer)?;
        mem += self.sampled_rows.serialize_into(&mut writer)?;
        Ok(mem)
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        let text_len = u64::deserialize_from(&mut reader)? as usize;
        let sigma = u32::deserialize_from(&mut reader)? as usize;
        let mut alphabet = Vec::with_capacity(sigma);
        for _ in 0..sigma {
            let v = u32::deserialize_from(&mut reader)?;
            let b = u8::try_from(v)
                .map_err(|_| anyhow!("alphabet symbol must be a byte, but got {v}."))?;
            alphabet.push(b);
        }
        let counts = Vec::<usize>::deserialize_from(&mut reader)?;
        let bwt = WaveletMatrix::<RsBitVector>::deserialize_from(&mut reader)?;
        let sample_rate = u32::deserialize_from(&mut reader)? as usize;
        let sa_samples = CompactVector::deserialize_from(&mut reader)?;
        let isa_samples = CompactVector::deserialize_from(&mut reader)?;
        let sampled_rows = RsBitVector::deserialize_from(&mut reader)?;
        Ok(Self {
            text_len,
            alphabet,
            counts,
            bwt,
            sampled_rows,
            sa_samples,
            isa_samples,
            sample_rate,
        })
    }

    fn size_in_bytes(&self) -> usize {
        u64::size_of().unwrap()
            + u32::size_of().unwrap()
            + u32::size_of().unwrap() * self.alphabet.len()
            + self.counts.size_in_bytes()
            + self.bwt.size_in_bytes()
            + u32::size_of().unwrap()
            + self.sa_samples.size_in_bytes()
            + self.isa_samples.size_in_bytes()
            + self.sampled_rows.size_in_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_search(st: &SuccinctText, pat: &[u8]) -> Vec<usize> {
        let mut offsets = st.search(pat);
        offsets.sort_unstable();
        offsets
    }

    #[test]
    fn test_mississippi() {
        let st = SuccinctText::with_sample_rate(b"mississippi", 4).unwrap();
        assert_eq!(st.count(b"issi"), 2);
        assert_eq!(sorted_search(&st, b"issi"), vec![1, 4]);
        assert_eq!(st.count(b"ssi"), 2);
        assert_eq!(st.count(b"mississippi"), 1);
        assert_eq!(st.count(b"x"), 0);
    }

    #[test]
    fn test_abracadabra() {
        let st = SuccinctText::with_sample_rate(b"abracadabra", 4).unwrap();
        assert_eq!(st.count(b"a"), 5);
        assert_eq!(sorted_search(&st, b"a"), vec![0, 3, 5, 7, 10]);
        assert_eq!(st.extract(7, 4).unwrap(), b"abra");
    }

    #[test]
    fn test_repetitive_text() {
        let st = SuccinctText::with_sample_rate(b"aaaaaa", 4).unwrap();
        assert_eq!(st.count(b"aa"), 5);
        assert_eq!(sorted_search(&st, b"aa"), vec![0, 1, 2, 3, 4]);
        assert_eq!(st.count(b"aaaaaa"), 1);
        assert_eq!(st.count(b"aaaaaaa"), 0);
    }

    #[test]
    fn test_quick_brown_fox() {
        let st = SuccinctText::with_sample_rate(b"The quick brown fox", 4).unwrap();
        assert_eq!(st.count(b"quick"), 1);
        assert_eq!(sorted_search(&st, b"quick"), vec![4]);
        assert_eq!(st.extract(4, 5).unwrap(), b"quick");
        assert_eq!(st.extract_until(0, b' ').unwrap(), b"The");
    }

    #[test]
    fn test_empty_pattern() {
        let text = b"abracadabra";
        let st = SuccinctText::with_sample_rate(text, 4).unwrap();
        assert_eq!(st.count(b""), text.len());
        assert_eq!(
            sorted_search(&st, b""),
            (0..text.len()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_pattern_longer_than_text() {
        let st = SuccinctText::with_sample_rate(b"abc", 4).unwrap();
        assert_eq!(st.count(b"abcd"), 0);
        assert!(st.search(b"abcd").is_empty());
    }

    #[test]
    fn test_single_symbol_text() {
        let st = SuccinctText::with_sample_rate(b"z", 4).unwrap();
        assert_eq!(st.len(), 1);
        assert_eq!(st.count(b"z"), 1);
        assert_eq!(st.search(b"z"), vec![0]);
        assert_eq!(st.count(b"y"), 0);
        assert_eq!(st.char_at(0).unwrap(), b'z');
        assert_eq!(st.extract(0, 10).unwrap(), b"z");
    }

    #[test]
    fn test_empty_text() {
        let st = SuccinctText::with_sample_rate(b"", 4).unwrap();
        assert!(st.is_empty());
        assert_eq!(st.count(b""), 0);
        assert_eq!(st.count(b"a"), 0);
        assert_eq!(st.extract(0, 5).unwrap(), b"");
        assert!(st.char_at(0).is_err());
    }

    #[test]
    fn test_extract_clamps_at_end() {
        let text = b"mississippi";
        let st = SuccinctText::with_sample_rate(text, 4).unwrap();
        assert_eq!(st.extract(text.len() - 1, 5).unwrap(), b"i");
        assert_eq!(st.extract(text.len(), 5).unwrap(), b"");
        assert!(st.extract(text.len() + 1, 1).is_err());
    }

    #[test]
    fn test_extract_matches_slices() {
        let text = b"the compressed text answers its own queries";
        let st = SuccinctText::with_sample_rate(text, 8).unwrap();
        for offset in 0..=text.len() {
            for len in [0, 1, 3, 17, text.len()] {
                let end = (offset + len).min(text.len());
                assert_eq!(st.extract(offset, len).unwrap(), &text[offset..end]);
            }
        }
    }

    #[test]
    fn test_extract_until_without_delimiter() {
        let st = SuccinctText::with_sample_rate(b"abcdef", 4).unwrap();
        assert_eq!(st.extract_until(2, b'|').unwrap(), b"cdef");
        assert_eq!(st.extract_until(6, b'|').unwrap(), b"");
    }

    #[test]
    fn test_char_at_every_position() {
        let text = b"The quick brown fox";
        let st = SuccinctText::with_sample_rate(text, 4).unwrap();
        for (i, &b) in text.iter().enumerate() {
            assert_eq!(st.char_at(i).unwrap(), b);
        }
        assert!(st.char_at(text.len()).is_err());
    }

    #[test]
    fn test_fixed_width_extraction() {
        let text = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09];
        let st = SuccinctText::with_sample_rate(&text, 4).unwrap();
        assert_eq!(st.extract_u16(0).unwrap(), 0x0102);
        assert_eq!(st.extract_u32(1).unwrap(), 0x0203_0405);
        assert_eq!(st.extract_u64(1).unwrap(), 0x0203_0405_0607_0809);
        assert!(st.extract_u64(2).is_err());
    }

    #[test]
    fn test_sa_isa_roundtrip() {
        let st = SuccinctText::with_sample_rate(b"abracadabra", 4).unwrap();
        for i in 0..st.seq_len() {
            assert_eq!(st.lookup_isa(st.lookup_sa(i).unwrap()), Some(i));
            assert_eq!(st.lookup_sa(st.lookup_isa(i).unwrap()), Some(i));
        }
        assert_eq!(st.lookup_sa(st.seq_len()), None);
        assert_eq!(st.lookup_isa(st.seq_len()), None);
    }

    #[test]
    fn test_fwd_search_agrees_with_bwd_search() {
        let text = b"mississippi mississippi";
        let st = SuccinctText::with_sample_rate(text, 4).unwrap();
        for pat in [
            &b"i"[..],
            b"issi",
            b"miss",
            b"ppi",
            b" ",
            b"mississippi m",
            b"zzz",
            b"",
        ] {
            assert_eq!(st.fwd_search(pat), st.bwd_search(pat), "pat: {pat:?}");
        }
    }

    #[test]
    fn test_continued_searches() {
        let st = SuccinctText::with_sample_rate(b"mississippi", 4).unwrap();
        // "ssi" backward-extended with "mi" gives "missi".
        let range = st.bwd_search(b"ssi");
        let extended = st.continue_bwd_search(b"mi", range);
        assert_eq!(extended, st.bwd_search(b"missi"));
        // "mis" forward-extended to "missis".
        let range = st.fwd_search(b"mis");
        let extended = st.continue_fwd_search(b"missis", range, 3);
        assert_eq!(extended, st.bwd_search(b"missis"));
        // Extending with an absent byte collapses the range.
        let range = st.bwd_search(b"ssi");
        assert_eq!(st.continue_bwd_search(b"x", range), SaRange::EMPTY);
    }

    #[test]
    fn test_range_search_spans_patterns() {
        let st = SuccinctText::with_sample_rate(b"abracadabra", 4).unwrap();
        // All suffixes from those starting with "ab" through those starting
        // with "b": rows of "ab..." (2) plus "ac..." (1), "ad..." (1),
        // "b..." (2).
        let range = st.range_search(b"ab", b"b");
        assert_eq!(range.len(), 6);
        // Every row in the range decodes to an offset within bounds.
        for row in range.begin..range.end {
            assert!(st.lookup_sa(row).unwrap() < st.len());
        }
        assert_eq!(st.range_search(b"zz", b"b"), SaRange::EMPTY);
    }

    #[test]
    fn test_compare_streams_text() {
        let st = SuccinctText::with_sample_rate(b"mississippi", 4).unwrap();
        assert_eq!(st.compare(b"issi", 1).unwrap(), Ordering::Equal);
        assert_eq!(st.compare(b"issa", 1).unwrap(), Ordering::Less);
        assert_eq!(st.compare(b"issz", 1).unwrap(), Ordering::Greater);
        // Text runs out before the buffer does.
        assert_eq!(st.compare(b"pix", 9).unwrap(), Ordering::Greater);
        assert_eq!(st.compare_from(b"??ssi", 2, 2).unwrap(), Ordering::Equal);
        assert!(st.compare(b"a", 12).is_err());
    }

    #[test]
    fn test_occurrences_iterator_is_lazy_and_finite() {
        let st = SuccinctText::with_sample_rate(b"aaaaaa", 4).unwrap();
        let mut it = st.occurrences(b"aa");
        assert_eq!(it.len(), 5);
        let mut seen: Vec<usize> = it.by_ref().take(2).collect();
        assert_eq!(seen.len(), 2);
        seen.extend(it);
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_same_record_always_true() {
        let st = SuccinctText::with_sample_rate(b"one two", 4).unwrap();
        assert!(st.same_record(0, 6));
    }

    #[test]
    fn test_sampling_invariance() {
        let text = b"how much wood would a woodchuck chuck";
        let reference = SuccinctText::with_sample_rate(text, 2).unwrap();
        for rate in [4, 8, 16, 32] {
            let st = SuccinctText::with_sample_rate(text, rate).unwrap();
            for pat in [&b"wood"[..], b"chuck", b"o", b"", b"zebra"] {
                assert_eq!(st.count(pat), reference.count(pat));
                assert_eq!(sorted_search(&st, pat), sorted_search(&reference, pat));
            }
            assert_eq!(st.extract(9, 10).unwrap(), reference.extract(9, 10).unwrap());
        }
    }

    #[test]
    fn test_invalid_sample_rate() {
        for rate in [0, 3, 12] {
            let e = SuccinctText::with_sample_rate(b"abc", rate);
            assert_eq!(
                e.err().map(|x| x.to_string()),
                Some(format!(
                    "sample_rate must be a positive power of two, but got {rate}."
                ))
            );
        }
    }

    #[test]
    fn test_serialize_roundtrip_preserves_queries() {
        let text = b"mississippi";
        let st = SuccinctText::with_sample_rate(text, 4).unwrap();

        let mut bytes = vec![];
        let size = st.serialize_into(&mut bytes).unwrap();
        assert_eq!(size, bytes.len());
        assert_eq!(size, st.size_in_bytes());

        let other = SuccinctText::deserialize_from(&bytes[..]).unwrap();
        assert_eq!(st, other);

        // Re-serializing produces identical bytes.
        let mut bytes2 = vec![];
        other.serialize_into(&mut bytes2).unwrap();
        assert_eq!(bytes, bytes2);

        assert_eq!(other.count(b"issi"), 2);
        assert_eq!(sorted_search(&other, b"issi"), vec![1, 4]);
        assert_eq!(other.extract(0, 11).unwrap(), text);
    }

    #[test]
    fn test_binary_alphabet_with_all_byte_values() {
        let text: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).collect();
        let st = SuccinctText::with_sample_rate(&text, 8).unwrap();
        assert_eq!(st.alphabet().len(), 256);
        assert_eq!(st.count(&[255, 255]), 1);
        assert_eq!(st.count(&[0]), 2);
        assert_eq!(st.extract(254, 4).unwrap(), &[254, 255, 255, 254]);
    }
}
