use asset_descriptor::GlyphEntry;

use crate::{
    bits::{word_count, BitAccumulator},
    source::ImageSource,
    Error, FontOptions, GlyphSampling,
};

/// Where a glyph sits in its font sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl GlyphRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl From<&GlyphEntry> for GlyphRect {
    fn from(entry: &GlyphEntry) -> Self {
        Self::new(entry.x, entry.y, entry.width, entry.height)
    }
}

/// Encodes one glyph's opacity mask as packed words.
///
/// Pixels are visited row by row, left to right, one bit each, most
/// significant bit first. Rows are not padded: a row that ends mid-word
/// continues in that word. Only the glyph's last word is zero filled, as
/// `options.tail` says. The result always holds
/// `ceil(width * height / 32)` words.
pub fn encode_glyph<S: ImageSource + ?Sized>(
    source: &S,
    rect: GlyphRect,
    options: &FontOptions,
) -> Result<Vec<u32>, Error> {
    let (origin_x, origin_y) = match options.sampling {
        // legacy tables: the descriptor rect only sizes the glyph
        GlyphSampling::ImageOrigin => (0, 0),
        GlyphSampling::GlyphRect => (rect.x, rect.y),
    };

    let mut accumulator = BitAccumulator::new();
    let mut words = Vec::with_capacity(word_count(rect.width, rect.height));

    for gy in 0..rect.height {
        for gx in 0..rect.width {
            let [_, _, _, alpha] = source.pixel(
                origin_x.saturating_add(gx),
                origin_y.saturating_add(gy),
            )?;
            words.extend(accumulator.push(alpha >= options.alpha_threshold));
        }
    }
    words.extend(accumulator.finish(options.tail));

    Ok(words)
}
