use std::str::FromStr;

use crate::DescriptorError;

const FIELD_NAMES: [&str; 8] = [
    "char", "x", "y", "width", "height", "x offset", "y offset", "advance",
];

/// One glyph line of a font descriptor: `char x y w h x_offset y_offset advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphEntry {
    pub code: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
    pub advance: i32,
    /// 1-based line in the descriptor.
    pub line: usize,
}

impl GlyphEntry {
    pub(crate) fn parse(text: &str, line: usize) -> Result<Self, DescriptorError> {
        let fields = text.split_whitespace().collect::<Vec<_>>();
        if fields.len() != FIELD_NAMES.len() {
            return Err(DescriptorError::malformed(
                line,
                format!(
                    "expected {} fields, found {}",
                    FIELD_NAMES.len(),
                    fields.len()
                ),
            ));
        }

        Ok(Self {
            code: field(&fields, 0, line)?,
            x: field(&fields, 1, line)?,
            y: field(&fields, 2, line)?,
            width: field(&fields, 3, line)?,
            height: field(&fields, 4, line)?,
            x_offset: field(&fields, 5, line)?,
            y_offset: field(&fields, 6, line)?,
            advance: field(&fields, 7, line)?,
            line,
        })
    }

    pub fn encoding(&self) -> Option<char> {
        char::from_u32(self.code)
    }
}

fn field<T: FromStr>(fields: &[&str], index: usize, line: usize) -> Result<T, DescriptorError> {
    fields[index].parse().map_err(|_| {
        DescriptorError::malformed(
            line,
            format!(
                "{}: expected an integer, found {:?}",
                FIELD_NAMES[index], fields[index]
            ),
        )
    })
}
