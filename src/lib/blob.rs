//! Little-endian binary images of encoded tables, ready to be linked into a
//! firmware's read-only data.
//!
//! Font blob: `u32 glyph count, u32 word count, u32 first glyph`, then one
//! `u8 width, u8 height, u16 offset` record per glyph, then the words.
//!
//! Sprite blob: `u32 sprite count, u32 index count, u32 byte count`, then one
//! record per sprite in the same shape, then the bytes.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{FontTable, SpriteTable};

fn write_record<W: Write>(w: &mut W, width: u8, height: u8, offset: u16) -> io::Result<()> {
    w.write_u8(width)?;
    w.write_u8(height)?;
    w.write_u16::<LittleEndian>(offset)
}

fn write_count<W: Write>(w: &mut W, count: usize) -> io::Result<()> {
    let count = u32::try_from(count)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "table too large"))?;
    w.write_u32::<LittleEndian>(count)
}

impl FontTable {
    pub fn write_blob<W: Write>(&self, mut w: W) -> io::Result<()> {
        write_count(&mut w, self.glyphs.len())?;
        write_count(&mut w, self.data.len())?;
        w.write_u32::<LittleEndian>(self.first_glyph.unwrap_or(0))?;

        for glyph in &self.glyphs {
            write_record(&mut w, glyph.width, glyph.height, glyph.offset)?;
        }
        for word in &self.data {
            w.write_u32::<LittleEndian>(*word)?;
        }

        Ok(())
    }

    pub fn to_blob(&self) -> io::Result<Vec<u8>> {
        let mut blob = Vec::with_capacity(12 + 4 * self.glyphs.len() + 4 * self.data.len());
        self.write_blob(&mut blob)?;
        Ok(blob)
    }
}

impl SpriteTable {
    pub fn write_blob<W: Write>(&self, mut w: W) -> io::Result<()> {
        write_count(&mut w, self.sprites.len())?;
        write_count(&mut w, self.index_count)?;
        write_count(&mut w, self.data.len())?;

        for sprite in &self.sprites {
            write_record(&mut w, sprite.width, sprite.height, sprite.offset)?;
        }
        w.write_all(&self.data)
    }

    pub fn to_blob(&self) -> io::Result<Vec<u8>> {
        let mut blob = Vec::with_capacity(12 + 4 * self.sprites.len() + self.data.len());
        self.write_blob(&mut blob)?;
        Ok(blob)
    }
}
