#![no_std]

//! Table layouts shared by the asset encoder and the firmware that embeds its
//! output.
//!
//! Glyph bitmaps are stored as one flat `u32` table, sprites as one flat byte
//! table of 4-bit palette indices. Each asset record carries the offset at
//! which its data begins, so nothing is parsed at load time.

use embedded_graphics::pixelcolor::Rgb888;

mod palette;

pub use palette::{rgb888, PALETTE, PALETTE_RGB};

/// Width, height and start word of one glyph in [`FontTables::data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Glyph {
    pub width: u8,
    pub height: u8,
    pub offset: u16,
}

impl Glyph {
    /// Number of packed words the glyph's opacity mask occupies.
    pub const fn word_count(&self) -> usize {
        (self.width as usize * self.height as usize + 31) / 32
    }
}

/// Width, height and start of one sprite in [`SpriteTables::data`].
///
/// `offset` counts palette indices, not bytes. Two indices share a byte, so a
/// sprite whose offset is odd starts in the high nibble of
/// [`byte_offset`](Sprite::byte_offset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sprite {
    pub width: u8,
    pub height: u8,
    pub offset: u16,
}

impl Sprite {
    pub const fn index_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte in the sprite table holding the sprite's first index.
    pub const fn byte_offset(&self) -> usize {
        self.offset as usize / 2
    }

    pub const fn starts_high_nibble(&self) -> bool {
        self.offset & 1 == 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontTables<'a> {
    pub data: &'a [u32],
    pub first_glyph: u32,
    pub glyphs: &'a [Glyph],
}

impl<'a> FontTables<'a> {
    /// Glyph for `c`, assuming glyph codes are contiguous from `first_glyph`.
    pub fn glyph(&self, c: char) -> Option<&'a Glyph> {
        let index = (c as u32).checked_sub(self.first_glyph)?;
        self.glyphs.get(index as usize)
    }

    pub fn words(&self, glyph: &Glyph) -> Option<&'a [u32]> {
        let start = glyph.offset as usize;
        self.data.get(start..start + glyph.word_count())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpriteTables<'a> {
    pub data: &'a [u8],
    pub sprites: &'a [Sprite],
}

impl SpriteTables<'_> {
    /// Palette index of the pixel at `(x, y)` inside `sprite`.
    pub fn index_at(&self, sprite: &Sprite, x: u8, y: u8) -> Option<u8> {
        if x >= sprite.width || y >= sprite.height {
            return None;
        }

        let index = sprite.offset as usize + y as usize * sprite.width as usize + x as usize;
        let byte = self.data.get(index / 2)?;

        Some(if index & 1 == 0 { byte & 0x0f } else { byte >> 4 })
    }

    pub fn color_at(&self, sprite: &Sprite, x: u8, y: u8) -> Option<Rgb888> {
        self.index_at(sprite, x, y)
            .map(|index| PALETTE[index as usize])
    }
}
