//! Space-efficient data structure for a sequence of integers, supporting
//! rank/select/access queries in logarithmic time in the alphabet size.

use std::io::{Read, Write};

use anyhow::{anyhow, Result};

use crate::bit_vectors::{Access, BitVector, Build, NumBits, Rank, Select};
use crate::broadword;
use crate::int_vectors::CompactVector;
use crate::Serializable;

/// Space-efficient data structure for a sequence of integers, supporting
/// rank/select/access queries in logarithmic time in the alphabet size.
///
/// For a sequence of $`n`$ integers from $`[0, \sigma)`$, the matrix stores
/// one bit-vector layer per bit of the alphabet width and answers queries in
/// $`O(\lg \sigma)`$ time using $`O(n \lg \sigma)`$ bits of memory
/// (given constant-time rank/select layers).
///
/// The layer descent follows the binary representation of the symbols from
/// the most significant bit down, so symbol ids compare in the same order as
/// the integers themselves; structures deriving cumulative symbol counts can
/// share that single canonical ordering.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use suctxt::bit_vectors::RsBitVector;
/// use suctxt::char_sequences::WaveletMatrix;
/// use suctxt::int_vectors::CompactVector;
///
/// let mut seq = CompactVector::new(8)?;
/// seq.extend("banana".bytes().map(u64::from))?;
/// let wm = WaveletMatrix::<RsBitVector>::new(seq)?;
///
/// assert_eq!(wm.len(), 6);
/// assert_eq!(wm.access(2), Some(b'n' as usize));
/// assert_eq!(wm.rank(3, b'a' as usize), Some(1));
/// assert_eq!(wm.select(1, b'n' as usize), Some(4));
/// # Ok(())
/// # }
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct WaveletMatrix<B> {
    layers: Vec<B>,
    alph_size: usize,
}

impl<B> WaveletMatrix<B>
where
    B: Access + Build + NumBits + Rank + Select,
{
    /// Creates a new instance from an input sequence `seq`.
    ///
    /// # Errors
    ///
    /// An error is returned if `seq` is empty or `B::build_from_bits` fails.
    pub fn new(seq: CompactVector) -> Result<Self> {
        if seq.is_empty() {
            return Err(anyhow!("seq must not be empty."));
        }

        let alph_size = seq.iter().max().unwrap() as usize + 1;
        let alph_width = broadword::msb(alph_size as u64).map_or(1, |n| n + 1);

        let mut zeros = seq;
        let mut ones = CompactVector::new(alph_width)?;
        let mut layers = vec![];

        for depth in 0..alph_width {
            let mut next_zeros = CompactVector::new(alph_width)?;
            let mut next_ones = CompactVector::new(alph_width)?;
            let mut bv = BitVector::new();
            Self::filter(
                &zeros,
                alph_width - depth - 1,
                &mut next_zeros,
                &mut next_ones,
                &mut bv,
            )?;
            Self::filter(
                &ones,
                alph_width - depth - 1,
                &mut next_zeros,
                &mut next_ones,
                &mut bv,
            )?;
            zeros = next_zeros;
            ones = next_ones;
            layers.push(B::build_from_bits(bv.iter())?);
        }

        Ok(Self { layers, alph_size })
    }

    fn filter(
        seq: &CompactVector,
        shift: usize,
        next_zeros: &mut CompactVector,
        next_ones: &mut CompactVector,
        bv: &mut BitVector,
    ) -> Result<()> {
        for val in seq.iter() {
            let bit = ((val >> shift) & 1) == 1;
            bv.push_bit(bit);
            if bit {
                next_ones.push_int(val)?;
            } else {
                next_zeros.push_int(val)?;
            }
        }
        Ok(())
    }

    /// Returns the `pos`-th integer, or [`None`] if `self.len() <= pos`.
    ///
    /// # Complexity
    ///
    /// $`O(\lg \sigma)`$
    #[inline(always)]
    pub fn access(&self, mut pos: usize) -> Option<usize> {
        if self.len() <= pos {
            return None;
        }
        let mut val = 0;
        for layer in &self.layers {
            val <<= 1;
            // The position is always in bounds after the precheck.
            if layer.access(pos).unwrap() {
                val |= 1;
                pos = layer.rank1(pos).unwrap() + layer.num_zeros();
            } else {
                pos = layer.rank0(pos).unwrap();
            }
        }
        Some(val)
    }

    /// Returns the number of occurrences of `val` in the range `0..pos`,
    /// or [`None`] if `self.len() < pos`.
    ///
    /// # Complexity
    ///
    /// $`O(\lg \sigma)`$
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use suctxt::bit_vectors::RsBitVector;
    /// use suctxt::char_sequences::WaveletMatrix;
    /// use suctxt::int_vectors::CompactVector;
    ///
    /// let mut seq = CompactVector::new(8)?;
    /// seq.extend("banana".bytes().map(u64::from))?;
    /// let wm = WaveletMatrix::<RsBitVector>::new(seq)?;
    ///
    /// assert_eq!(wm.rank(3, b'a' as usize), Some(1));
    /// assert_eq!(wm.rank(6, b'x' as usize), Some(0));
    /// assert_eq!(wm.rank(7, b'b' as usize), None);
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn rank(&self, pos: usize, val: usize) -> Option<usize> {
        if self.len() < pos {
            return None;
        }
        if self.alph_size <= val {
            return Some(0);
        }

        let mut start_pos = 0;
        let mut end_pos = pos;
        for (depth, layer) in self.layers.iter().enumerate() {
            // Ranks are in bounds after the precheck.
            if Self::get_msb(val, depth, self.alph_width()) {
                start_pos = layer.rank1(start_pos).unwrap() + layer.num_zeros();
                end_pos = layer.rank1(end_pos).unwrap() + layer.num_zeros();
            } else {
                start_pos = layer.rank0(start_pos).unwrap();
                end_pos = layer.rank0(end_pos).unwrap();
            }
        }
        Some(end_pos - start_pos)
    }

    /// Returns the occurrence position of the `k`-th `val` (0-indexed),
    /// or [`None`] if there is no such occurrence.
    ///
    /// # Complexity
    ///
    /// $`O(\lg \sigma)`$
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use suctxt::bit_vectors::RsBitVector;
    /// use suctxt::char_sequences::WaveletMatrix;
    /// use suctxt::int_vectors::CompactVector;
    ///
    /// let mut seq = CompactVector::new(8)?;
    /// seq.extend("banana".bytes().map(u64::from))?;
    /// let wm = WaveletMatrix::<RsBitVector>::new(seq)?;
    ///
    /// assert_eq!(wm.select(1, b'a' as usize), Some(3));
    /// assert_eq!(wm.select(0, b'x' as usize), None);
    /// # Ok(())
    /// # }
    /// ```
    #[inline(always)]
    pub fn select(&self, k: usize, val: usize) -> Option<usize> {
        if self.alph_size <= val {
            return None;
        }
        self.select_helper(k, val, 0, 0)
    }

    #[inline]
    fn select_helper(
        &self,
        mut k: usize,
        val: usize,
        mut pos: usize,
        depth: usize,
    ) -> Option<usize> {
        if depth == self.alph_width() {
            return Some(pos + k);
        }
        let bit = Self::get_msb(val, depth, self.alph_width());
        let layer = &self.layers[depth];
        if bit {
            let zeros = layer.num_zeros();
            pos = layer.rank1(pos)? + zeros;
            k = self.select_helper(k, val, pos, depth + 1)?;
            layer.select1(k - zeros)
        } else {
            pos = layer.rank0(pos)?;
            k = self.select_helper(k, val, pos, depth + 1)?;
            layer.select0(k)
        }
    }

    #[inline(always)]
    fn get_msb(val: usize, depth: usize, width: usize) -> bool {
        (val >> (width - depth - 1)) & 1 == 1
    }

    /// Returns the number of integers stored.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.layers[0].num_bits()
    }

    /// Checks if the sequence is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the exclusive upper bound of the stored integers.
    #[inline(always)]
    pub const fn alph_size(&self) -> usize {
        self.alph_size
    }

    /// Returns the number of layers, i.e., bits per symbol.
    #[inline(always)]
    pub fn alph_width(&self) -> usize {
        self.layers.len()
    }
}

impl<B> Serializable for WaveletMatrix<B>
where
    B: Serializable,
{
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mut mem = self.layers.serialize_into(&mut writer)?;
        mem += self.alph_size.serialize_into(&mut writer)?;
        Ok(mem)
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        let layers = Vec::<B>::deserialize_from(&mut reader)?;
        let alph_size = usize::deserialize_from(&mut reader)?;
        Ok(Self { layers, alph_size })
    }

    fn size_in_bytes(&self) -> usize {
        self.layers.size_in_bytes() + usize::size_of().unwrap()
    }
}
