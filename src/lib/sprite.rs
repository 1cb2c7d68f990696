use std::path::Path;

use asset_descriptor::SpriteManifest;
use rodata_tables::Sprite;

use crate::{
    bits::NibblePacker,
    palette::{rgb, Palette},
    source::{load_image, ImageSource, Padded},
    Error, SpriteOptions,
};

/// Palette indices of one sprite after width normalization.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EncodedSprite {
    pub width: u32,
    pub height: u32,
    /// Row-major, `width * height` entries.
    pub indices: Vec<u8>,
}

/// Classifies every pixel of `source` against `palette`.
///
/// Odd-width sources are first widened with transparent columns according to
/// `options.odd_width`; the reported width is the widened one.
pub fn encode_sprite<S: ImageSource + ?Sized>(
    source: &S,
    palette: &Palette,
    options: &SpriteOptions,
) -> Result<EncodedSprite, Error> {
    let (left, right) = options.odd_width.padding(source.size().0);
    let padded = Padded::new(source, left, right);
    let (width, height) = padded.size();

    let mut indices = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let pixel = padded.pixel(x, y)?;
            let index = palette.classify(pixel).ok_or_else(|| {
                let [r, g, b, _] = pixel;
                // padding is transparent, so a miss is always inside the source
                Error::PaletteMiss {
                    rgb: rgb(r, g, b),
                    x: x - left,
                    y,
                }
            })?;
            indices.push(index);
        }
    }

    Ok(EncodedSprite {
        width,
        height,
        indices,
    })
}

/// Encoded sprites: one flat nibble table plus a record per sprite.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SpriteTable {
    pub data: Vec<u8>,
    pub sprites: Vec<Sprite>,
    /// Indices in `data`; odd when the last byte only uses its low nibble.
    pub index_count: usize,
}

/// Running state of a sprite conversion. Offsets count indices, so the
/// packer's index count, not its byte length, is the next sprite's offset.
#[derive(Debug, Default)]
pub struct SpriteEncoder {
    options: SpriteOptions,
    palette: Palette,
    packer: NibblePacker,
    sprites: Vec<Sprite>,
}

impl SpriteEncoder {
    pub fn new(options: SpriteOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Index offset the next sprite will start at.
    pub fn offset(&self) -> usize {
        self.packer.index_count()
    }

    /// Encodes one sprite and appends it. On error nothing is appended.
    pub fn push<S: ImageSource + ?Sized>(&mut self, source: &S) -> Result<Sprite, Error> {
        let offset = u16::try_from(self.offset()).map_err(|_| Error::OffsetOverflow {
            offset: self.offset(),
        })?;

        let encoded = encode_sprite(source, &self.palette, &self.options)?;
        let (Ok(width), Ok(height)) = (u8::try_from(encoded.width), u8::try_from(encoded.height))
        else {
            return Err(Error::DimensionOverflow {
                width: encoded.width,
                height: encoded.height,
            });
        };

        let sprite = Sprite {
            width,
            height,
            offset,
        };
        log::debug!(
            "sprite {}x{} at index {} (byte {}{})",
            width,
            height,
            offset,
            sprite.byte_offset(),
            if sprite.starts_high_nibble() { ", high nibble" } else { "" }
        );

        self.packer.extend(encoded.indices);
        self.sprites.push(sprite);

        Ok(sprite)
    }

    pub fn finish(self) -> SpriteTable {
        SpriteTable {
            index_count: self.packer.index_count(),
            data: self.packer.into_bytes(),
            sprites: self.sprites,
        }
    }
}

/// Loads and encodes every sprite of `manifest`, in manifest order.
pub fn encode_sprites(
    manifest: &SpriteManifest,
    options: &SpriteOptions,
) -> Result<SpriteTable, Error> {
    let mut encoder = SpriteEncoder::new(*options);

    for entry in &manifest.sprites {
        load_image(&entry.path)
            .and_then(|image| encoder.push(&image))
            .map_err(|err| err.in_asset(entry.name(), entry.line))?;
    }

    let table = encoder.finish();
    log::info!(
        "{} sprites, {} indices in {} bytes",
        table.sprites.len(),
        table.index_count,
        table.data.len()
    );

    Ok(table)
}

/// Reads a sprite manifest, then loads and encodes every sprite it lists.
pub fn load_sprites(path: impl AsRef<Path>, options: &SpriteOptions) -> Result<SpriteTable, Error> {
    let manifest = SpriteManifest::load(path)?;
    encode_sprites(&manifest, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OddWidth;
    use image::{Rgba, RgbaImage};
    use rodata_tables::{SpriteTables, PALETTE_RGB};
    use std::path::PathBuf;

    fn color(index: usize) -> Rgba<u8> {
        let [_, r, g, b] = PALETTE_RGB[index].to_be_bytes();
        Rgba([r, g, b, 255])
    }

    /// Sprite whose pixel `(x, y)` is palette color `indices[y][x]`.
    fn sprite(indices: &[&[usize]]) -> RgbaImage {
        RgbaImage::from_fn(indices[0].len() as u32, indices.len() as u32, |x, y| {
            color(indices[y as usize][x as usize])
        })
    }

    fn assets() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
    }

    #[test]
    fn it_classifies_pixels_in_row_major_order() {
        let image = sprite(&[&[3, 10], &[15, 1]]);
        let encoded = encode_sprite(&image, &Palette::default(), &SpriteOptions::default()).unwrap();
        assert_eq!((2, 2), (encoded.width, encoded.height));
        assert_eq!(vec![3, 10, 15, 1], encoded.indices);
    }

    #[test]
    fn it_widens_a_transparent_pixel() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([0xde, 0xad, 0xbe, 0]));
        let encoded = encode_sprite(&image, &Palette::default(), &SpriteOptions::default()).unwrap();
        assert_eq!((3, 1), (encoded.width, encoded.height));
        assert_eq!(vec![0, 0, 0], encoded.indices);
    }

    #[test]
    fn it_widens_odd_sprites_around_the_middle() {
        let image = sprite(&[&[5, 6, 7], &[8, 9, 11]]);
        let encoded = encode_sprite(&image, &Palette::default(), &SpriteOptions::default()).unwrap();
        assert_eq!(5, encoded.width);
        assert_eq!(vec![0, 5, 6, 7, 0, 0, 8, 9, 11, 0], encoded.indices);

        let options = SpriteOptions {
            odd_width: OddWidth::Even,
        };
        let encoded = encode_sprite(&image, &Palette::default(), &options).unwrap();
        assert_eq!(6, encoded.width);
        assert_eq!(vec![0, 5, 6, 7, 0, 0, 0, 8, 9, 11, 0, 0], encoded.indices);
    }

    #[test]
    fn it_rejects_colors_outside_the_palette() {
        let mut image = sprite(&[&[1, 2, 3]]);
        image.put_pixel(2, 0, Rgba([0x12, 0x34, 0x56, 200]));
        let err = encode_sprite(&image, &Palette::default(), &SpriteOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::PaletteMiss {
                rgb: 0x123456,
                x: 2,
                y: 0
            }
        ));
    }

    #[test]
    fn it_pairs_indices_across_sprites() {
        let mut encoder = SpriteEncoder::new(SpriteOptions::default());
        let first = encoder.push(&sprite(&[&[1, 2, 3]])).unwrap();
        let second = encoder.push(&sprite(&[&[4, 5], &[6, 7]])).unwrap();
        let table = encoder.finish();

        assert_eq!(Sprite { width: 5, height: 1, offset: 0 }, first);
        assert_eq!(Sprite { width: 2, height: 2, offset: 5 }, second);
        assert!(second.starts_high_nibble());
        // 0 1 2 3 0 | 4 5 6 7
        assert_eq!(vec![0x10, 0x32, 0x40, 0x65, 0x07], table.data);
        assert_eq!(9, table.index_count);

        let tables = SpriteTables {
            data: &table.data,
            sprites: &table.sprites,
        };
        assert_eq!(Some(4), tables.index_at(&second, 0, 0));
        assert_eq!(Some(7), tables.index_at(&second, 1, 1));
    }

    #[test]
    fn it_chains_sprite_offsets() {
        let mut encoder = SpriteEncoder::new(SpriteOptions::default());
        for image in [
            sprite(&[&[1, 2], &[3, 4], &[5, 6]]),
            sprite(&[&[7]]),
            sprite(&[&[8, 9, 10, 11]]),
        ] {
            encoder.push(&image).unwrap();
        }
        let table = encoder.finish();

        for pair in table.sprites.windows(2) {
            assert!(pair[1].offset > pair[0].offset);
            assert_eq!(pair[1].offset as usize, pair[0].offset as usize + pair[0].index_count());
        }
        assert_eq!(vec![0, 6, 9], table.sprites.iter().map(|s| s.offset).collect::<Vec<_>>());
        assert_eq!(13, table.index_count);
        assert_eq!(7, table.data.len());
    }

    #[test]
    fn it_leaves_tables_untouched_on_failure() {
        let mut encoder = SpriteEncoder::new(SpriteOptions::default());
        encoder.push(&sprite(&[&[1, 2]])).unwrap();

        let bad = RgbaImage::from_pixel(2, 1, Rgba([1, 2, 3, 255]));
        assert!(encoder.push(&bad).is_err());
        assert_eq!(2, encoder.offset());
        assert_eq!(vec![0x21], encoder.finish().data);
    }

    #[test]
    fn it_rejects_oversized_sprites() {
        let mut encoder = SpriteEncoder::new(SpriteOptions::default());
        let wide = RgbaImage::new(255, 1);
        let err = encoder.push(&wide).unwrap_err();
        assert!(matches!(err, Error::DimensionOverflow { width: 257, height: 1 }));
    }

    #[test]
    fn it_encodes_an_empty_manifest() {
        let table = encode_sprites(&SpriteManifest::default(), &SpriteOptions::default()).unwrap();
        assert_eq!(SpriteTable::default(), table);
    }

    #[test]
    fn it_loads_sprites_from_disk() {
        let table = load_sprites(assets().join("sprites.list"), &SpriteOptions::default()).unwrap();

        // heart.png is 5x4 and widens to 7, coin.png is 4x4
        assert_eq!(
            vec![
                Sprite { width: 7, height: 4, offset: 0 },
                Sprite { width: 4, height: 4, offset: 28 },
            ],
            table.sprites
        );
        assert_eq!(44, table.index_count);
        assert_eq!(22, table.data.len());
        // heart row 0: . R R . R R .  with the padding column first
        assert_eq!(&[0x20, 0x02, 0x22, 0x00], &table.data[..4]);
    }

    #[test]
    fn it_names_a_missing_sprite() {
        let manifest = SpriteManifest::from_paths([assets().join("sprites/coin.png"), assets().join("sprites/nope.png")]);
        let err = encode_sprites(&manifest, &SpriteOptions::default()).unwrap_err();

        assert!(matches!(err, Error::Asset { line: 2, .. }));
        assert!(matches!(err.root_cause(), Error::AssetNotFound { .. }));
        assert!(err.to_string().starts_with("nope.png (line 2)"));
    }

    #[test]
    fn it_names_a_sprite_with_foreign_colors() {
        let manifest = SpriteManifest::from_paths([assets().join("sprites/off-palette.png")]);
        let err = encode_sprites(&manifest, &SpriteOptions::default()).unwrap_err();
        assert!(matches!(err.root_cause(), Error::PaletteMiss { rgb: 0xff00ff, .. }));
    }
}
