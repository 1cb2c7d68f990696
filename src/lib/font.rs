use std::path::Path;

use asset_descriptor::{FontDescriptor, GlyphEntry};
use rodata_tables::Glyph;

use crate::{
    glyph::{encode_glyph, GlyphRect},
    source::{load_image, ImageSource},
    Error, FontOptions,
};

/// Encoded font: one word table plus a record per glyph.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FontTable {
    pub data: Vec<u32>,
    /// Code of the first glyph, `None` for a font without glyphs.
    pub first_glyph: Option<u32>,
    pub glyphs: Vec<Glyph>,
}

/// Running state of a font conversion: the word table so far and the glyph
/// records pointing into it.
#[derive(Debug, Default)]
pub struct FontEncoder {
    options: FontOptions,
    table: FontTable,
    last_code: Option<u32>,
}

impl FontEncoder {
    pub fn new(options: FontOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Word offset the next glyph will start at.
    pub fn offset(&self) -> usize {
        self.table.data.len()
    }

    /// Encodes one glyph and appends it. On error nothing is appended.
    pub fn push<S: ImageSource + ?Sized>(
        &mut self,
        code: u32,
        source: &S,
        rect: GlyphRect,
    ) -> Result<Glyph, Error> {
        let overflow = Error::DimensionOverflow {
            width: rect.width,
            height: rect.height,
        };
        let (Ok(width), Ok(height)) = (u8::try_from(rect.width), u8::try_from(rect.height)) else {
            return Err(overflow);
        };
        let offset = u16::try_from(self.offset()).map_err(|_| Error::OffsetOverflow {
            offset: self.offset(),
        })?;

        let words = encode_glyph(source, rect, &self.options)?;

        if let Some(last) = self.last_code {
            if last.checked_add(1) != Some(code) {
                log::warn!(
                    "glyph {code} does not follow glyph {last}, lookups past it will be off"
                );
            }
        }
        self.table.first_glyph.get_or_insert(code);
        self.last_code = Some(code);

        let glyph = Glyph {
            width,
            height,
            offset,
        };
        log::debug!(
            "glyph {code}: {width}x{height} at word {offset}, {} words",
            words.len()
        );

        self.table.data.extend(words);
        self.table.glyphs.push(glyph);

        Ok(glyph)
    }

    pub fn finish(self) -> FontTable {
        self.table
    }
}

fn glyph_name(entry: &GlyphEntry) -> String {
    match entry.encoding() {
        Some(c) if !c.is_control() => format!("glyph {:?} ({})", c, entry.code),
        _ => format!("glyph {}", entry.code),
    }
}

/// Encodes every glyph of `descriptor` from `sheet`, in descriptor order.
pub fn encode_font<S: ImageSource + ?Sized>(
    descriptor: &FontDescriptor,
    sheet: &S,
    options: &FontOptions,
) -> Result<FontTable, Error> {
    let mut encoder = FontEncoder::new(*options);

    for entry in &descriptor.glyphs {
        encoder
            .push(entry.code, sheet, entry.into())
            .map_err(|err| err.in_asset(glyph_name(entry), entry.line))?;
    }

    let table = encoder.finish();
    log::info!(
        "font {:?}: {} glyphs, {} words",
        descriptor.name,
        table.glyphs.len(),
        table.data.len()
    );

    Ok(table)
}

/// Reads a `.sfl` descriptor and its sheet, then encodes the font.
pub fn load_font(path: impl AsRef<Path>, options: &FontOptions) -> Result<FontTable, Error> {
    let descriptor = FontDescriptor::load(path)?;
    // the image filename is the third header line
    let sheet = load_image(&descriptor.image).map_err(|err| err.in_asset("font sheet", 3))?;

    encode_font(&descriptor, &sheet, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bits::word_count, GlyphSampling};
    use image::{Rgba, RgbaImage};
    use std::path::PathBuf;

    fn solid(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
    }

    fn descriptor(lines: &[&str]) -> FontDescriptor {
        let text = format!("Test\n64 16\ntest.png\n{}\n{}\n", lines.len(), lines.join("\n"));
        FontDescriptor::parse(&text).unwrap()
    }

    #[test]
    fn it_chains_glyph_offsets() {
        let font = descriptor(&[
            "65 0 0 8 1 0 0 8",
            "66 0 0 7 9 0 0 8",
            "67 0 0 0 0 0 0 3",
            "68 0 0 8 8 0 0 9",
            "69 0 0 3 3 0 0 4",
        ]);
        let table = encode_font(&font, &solid(16, 16), &FontOptions::default()).unwrap();

        assert_eq!(Some(65), table.first_glyph);
        let offsets = table.glyphs.iter().map(|g| g.offset).collect::<Vec<_>>();
        assert_eq!(vec![0, 1, 3, 3, 5], offsets);
        assert_eq!(6, table.data.len());

        for (entry, glyph) in font.glyphs.iter().zip(&table.glyphs) {
            assert_eq!(word_count(entry.width, entry.height), glyph.word_count());
        }
    }

    #[test]
    fn it_encodes_an_empty_font() {
        let font = descriptor(&[]);
        let table = encode_font(&font, &solid(1, 1), &FontOptions::default()).unwrap();
        assert_eq!(FontTable::default(), table);
    }

    #[test]
    fn it_names_the_failing_glyph() {
        let font = descriptor(&["65 0 0 2 2 0 0 3", "66 4 0 2 2 0 0 3"]);
        let options = FontOptions {
            sampling: GlyphSampling::GlyphRect,
            ..FontOptions::default()
        };
        let err = encode_font(&font, &solid(5, 2), &options).unwrap_err();

        assert!(matches!(err, Error::Asset { line: 6, .. }));
        assert!(matches!(err.root_cause(), Error::OutOfBounds { x: 5, y: 0, .. }));
        assert!(err.to_string().starts_with("glyph 'B' (66) (line 6): "));
    }

    #[test]
    fn it_rejects_oversized_glyphs() {
        let mut encoder = FontEncoder::new(FontOptions::default());
        let err = encoder.push(65, &solid(300, 1), GlyphRect::new(0, 0, 256, 1)).unwrap_err();
        assert!(matches!(err, Error::DimensionOverflow { width: 256, height: 1 }));
        assert_eq!(0, encoder.offset());
    }

    #[test]
    fn it_rejects_offsets_past_u16() {
        let sheet = solid(255, 255);
        let mut encoder = FontEncoder::new(FontOptions::default());
        // 255 * 255 pixels is 2033 words, so 33 glyphs fill 67089 words
        for code in 0..33 {
            encoder.push(code, &sheet, GlyphRect::new(0, 0, 255, 255)).unwrap();
        }
        let err = encoder.push(33, &sheet, GlyphRect::new(0, 0, 1, 1)).unwrap_err();
        assert!(matches!(err, Error::OffsetOverflow { offset: 67089 }));
    }

    #[test]
    fn it_leaves_tables_untouched_on_failure() {
        let sheet = solid(4, 4);
        let mut encoder = FontEncoder::new(FontOptions::default());
        encoder.push(65, &sheet, GlyphRect::new(0, 0, 4, 4)).unwrap();
        assert!(encoder.push(66, &sheet, GlyphRect::new(0, 0, 4, 5)).is_err());

        let table = encoder.finish();
        assert_eq!(1, table.glyphs.len());
        assert_eq!(vec![0xFFFF_0000], table.data);
    }

    #[test]
    fn it_loads_a_font_from_disk() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/font.sfl");
        let options = FontOptions {
            sampling: GlyphSampling::GlyphRect,
            ..FontOptions::default()
        };
        let table = load_font(path, &options).unwrap();

        assert_eq!(Some(48), table.first_glyph);
        assert_eq!(3, table.glyphs.len());
        // "0" is a 4x5 ring: #### #..# #..# #..# ####
        assert_eq!(0b1111_1001_1001_1001_1111_u32 << 12, table.data[0]);
    }

    #[test]
    fn it_reports_a_missing_sheet() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/missing-sheet.sfl");
        let err = load_font(path, &FontOptions::default()).unwrap_err();
        assert!(matches!(err.root_cause(), Error::AssetNotFound { .. }));
    }

    #[test]
    fn it_reports_malformed_descriptors() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/malformed.sfl");
        let err = load_font(path, &FontOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedDescriptor(_)));
    }
}
