use std::{
    iter::Enumerate,
    path::{Path, PathBuf},
    str,
};

use crate::{read_to_string, DescriptorError, GlyphEntry};

/// A parsed `.sfl` font descriptor.
///
/// ```text
/// <font name>
/// <canvas dimensions>
/// <image filename>
/// <glyph count>
/// <char> <x> <y> <w> <h> <x offset> <y offset> <advance>
/// ...
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct FontDescriptor {
    pub name: String,
    pub dimensions: String,
    pub image: PathBuf,
    pub glyphs: Vec<GlyphEntry>,
}

/// Walks descriptor lines while remembering where it is, so that running out
/// of input can still be reported against a line number.
struct Cursor<'a> {
    lines: Enumerate<str::Lines<'a>>,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            line: 0,
        }
    }

    fn next(&mut self, expected: &str) -> Result<(usize, &'a str), DescriptorError> {
        match self.lines.next() {
            Some((i, text)) => {
                self.line = i + 1;
                Ok((self.line, text.trim()))
            }
            None => Err(DescriptorError::malformed(
                self.line + 1,
                format!("unexpected end of descriptor, expected {expected}"),
            )),
        }
    }

    fn header(&mut self, expected: &str) -> Result<&'a str, DescriptorError> {
        let (line, text) = self.next(expected)?;
        if text.is_empty() {
            return Err(DescriptorError::malformed(line, format!("empty {expected}")));
        }

        Ok(text)
    }
}

impl FontDescriptor {
    pub fn parse(text: &str) -> Result<Self, DescriptorError> {
        let mut cursor = Cursor::new(text);

        let name = cursor.header("font name")?.to_owned();
        let dimensions = cursor.header("canvas dimensions")?.to_owned();
        let image = PathBuf::from(cursor.header("image filename")?);

        let count = cursor.header("glyph count")?;
        let count: usize = count.parse().map_err(|_| {
            DescriptorError::malformed(
                cursor.line,
                format!("glyph count: expected an integer, found {count:?}"),
            )
        })?;

        let mut glyphs = Vec::with_capacity(count);
        for _ in 0..count {
            let (line, text) = cursor.next("a glyph line")?;
            glyphs.push(GlyphEntry::parse(text, line)?);
        }

        for (i, text) in cursor.lines {
            if !text.trim().is_empty() {
                log::warn!("line {}: ignoring text after the last glyph", i + 1);
            }
        }

        Ok(Self {
            name,
            dimensions,
            image,
            glyphs,
        })
    }

    /// Reads and parses `path`. The image path is resolved against the
    /// descriptor's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DescriptorError> {
        let path = path.as_ref();
        let mut descriptor = Self::parse(&read_to_string(path)?)?;

        if let Some(dir) = path.parent() {
            descriptor.image = dir.join(&descriptor.image);
        }

        Ok(descriptor)
    }

    /// Character code of the first glyph, the base of char to glyph lookups.
    pub fn first_glyph(&self) -> Option<u32> {
        self.glyphs.first().map(|glyph| glyph.code)
    }

    /// Whether glyph codes increase by exactly one from line to line.
    pub fn is_contiguous(&self) -> bool {
        self.glyphs
            .windows(2)
            .all(|pair| pair[0].code.checked_add(1) == Some(pair[1].code))
    }
}
