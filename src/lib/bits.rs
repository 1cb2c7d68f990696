//! Bit and nibble packing shared by the glyph and sprite encoders.

use crate::TailAlignment;

pub const WORD_BITS: u32 = 32;

/// Collects bits most-significant first into 32-bit words.
///
/// Full words are handed back from [`push`](Self::push) as soon as the 32nd
/// bit arrives; nothing else ever flushes the accumulator except
/// [`finish`](Self::finish), so bits keep flowing across glyph rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BitAccumulator {
    value: u32,
    len: u32,
}

impl BitAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bit: bool) -> Option<u32> {
        self.value = (self.value << 1) | u32::from(bit);
        self.len += 1;

        if self.len == WORD_BITS {
            let word = self.value;
            *self = Self::default();
            Some(word)
        } else {
            None
        }
    }

    /// Number of bits waiting for a full word.
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flushes a partial word, zero filling the positions no bit reached.
    pub fn finish(self, tail: TailAlignment) -> Option<u32> {
        match (self.len, tail) {
            (0, _) => None,
            (len, TailAlignment::Msb) => Some(self.value << (WORD_BITS - len)),
            (_, TailAlignment::Lsb) => Some(self.value),
        }
    }
}

/// Packs `bits` into words, flushing the tail the way `tail` says.
pub fn pack_bits<I: IntoIterator<Item = bool>>(bits: I, tail: TailAlignment) -> Vec<u32> {
    let mut accumulator = BitAccumulator::new();
    let mut words = bits
        .into_iter()
        .filter_map(|bit| accumulator.push(bit))
        .collect::<Vec<_>>();
    words.extend(accumulator.finish(tail));
    words
}

/// Reverses [`pack_bits`], yielding the first `count` bits.
///
/// # Panics
///
/// Panics if `words` holds fewer than `count` bits.
pub fn unpack_bits(words: &[u32], count: usize, tail: TailAlignment) -> Vec<bool> {
    let word_bits = WORD_BITS as usize;
    let full_words = count / word_bits;
    let tail_len = count % word_bits;

    (0..count)
        .map(|i| {
            let word = i / word_bits;
            let width = match tail {
                TailAlignment::Lsb if word == full_words => tail_len,
                _ => word_bits,
            };
            words[word] >> (width - 1 - i % word_bits) & 1 == 1
        })
        .collect()
}

/// Words needed for a `width` by `height` mask.
pub fn word_count(width: u32, height: u32) -> usize {
    (width as usize * height as usize).div_ceil(WORD_BITS as usize)
}

/// One byte holding two palette indices, `first` in the low nibble.
pub const fn pack_pair(first: u8, second: u8) -> u8 {
    (first & 0x0f) | (second << 4)
}

/// Packs a flat stream of 4-bit indices two to a byte.
///
/// Pairing never restarts, so an index lands in the high nibble whenever an
/// odd number of indices came before it. A lone final index leaves the high
/// nibble of the last byte zero.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NibblePacker {
    bytes: Vec<u8>,
    count: usize,
}

impl NibblePacker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, index: u8) {
        debug_assert!(index < 16, "palette index {index} does not fit a nibble");

        match self.bytes.last_mut() {
            Some(last) if self.count % 2 == 1 => *last = pack_pair(*last, index),
            _ => self.bytes.push(pack_pair(index, 0)),
        }
        self.count += 1;
    }

    /// Indices pushed so far. This, not the byte length, is what sprite
    /// offsets count.
    pub fn index_count(&self) -> usize {
        self.count
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Extend<u8> for NibblePacker {
    fn extend<T: IntoIterator<Item = u8>>(&mut self, iter: T) {
        for index in iter {
            self.push(index);
        }
    }
}
