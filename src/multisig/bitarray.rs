//! Compact bit array
//!
//! `cosmos.crypto.multisig.v1beta1.CompactBitArray`. Bit `i` lives in byte
//! `i >> 3` at position `7 - (i % 8)`, most significant bit first.

use crate::error::{ChainError, ChainResult};
use crate::signing::proto::{ProtoMessage, ProtoWriter};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

const MAX_ELEMS: usize = i32::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompactBitArray {
    extra_bits_stored: u32,
    elems: Vec<u8>,
}

impl CompactBitArray {
    /// All bits start cleared
    pub fn new(bits: usize) -> ChainResult<Self> {
        if bits == 0 {
            return Err(ChainError::invalid_size("bit array length must be positive"));
        }
        let n_elems = bits.div_ceil(8);
        if n_elems > MAX_ELEMS {
            return Err(ChainError::invalid_size(format!(
                "bit array of {} bits exceeds the maximum size",
                bits
            )));
        }
        Ok(Self {
            extra_bits_stored: (bits % 8) as u32,
            elems: vec![0; n_elems],
        })
    }

    /// Number of addressable bits
    pub fn count(&self) -> usize {
        if self.extra_bits_stored == 0 {
            self.elems.len() * 8
        } else {
            (self.elems.len() - 1) * 8 + self.extra_bits_stored as usize
        }
    }

    /// `false` for any index outside `[0, count)`
    pub fn get(&self, index: usize) -> bool {
        if index >= self.count() {
            return false;
        }
        self.elems[index >> 3] & mask(index) != 0
    }

    /// Returns `false` and leaves the array untouched when out of range
    pub fn set(&mut self, index: usize, value: bool) -> bool {
        if index >= self.count() {
            return false;
        }
        if value {
            self.elems[index >> 3] |= mask(index);
        } else {
            self.elems[index >> 3] &= !mask(index);
        }
        true
    }

    /// Number of set bits strictly before `index`
    ///
    /// This is the position a signature for participant `index` takes in
    /// the packed signature list.
    pub fn num_true_bits_before(&self, index: usize) -> usize {
        let index = index.min(self.count());
        let whole = index >> 3;
        let mut ones: usize = self.elems[..whole]
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum();
        let rem = index % 8;
        if rem > 0 {
            ones += (self.elems[whole] >> (8 - rem)).count_ones() as usize;
        }
        ones
    }

    /// Clear every bit, keeping the length
    pub fn clear(&mut self) {
        self.elems.iter_mut().for_each(|b| *b = 0);
    }

    pub fn count_set_bits(&self) -> usize {
        self.elems.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn extra_bits_stored(&self) -> u32 {
        self.extra_bits_stored
    }

    pub fn elems(&self) -> &[u8] {
        &self.elems
    }
}

#[inline]
fn mask(index: usize) -> u8 {
    1 << (7 - (index % 8))
}

impl ProtoMessage for CompactBitArray {
    fn encode_proto(&self, w: &mut ProtoWriter) {
        w.uint32(1, self.extra_bits_stored).bytes(2, &self.elems);
    }
}

impl fmt::Display for CompactBitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "extra_bits_stored:{}, elems:{}",
            self.extra_bits_stored,
            STANDARD.encode(&self.elems)
        )
    }
}
