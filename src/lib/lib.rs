//! Converts a bitmap font sheet and a set of sprite images into the fixed
//! layout tables of [`rodata_tables`].
//!
//! Fonts become one table of 32-bit words holding a 1-bit opacity mask per
//! pixel, sprites become one table of bytes holding two 4-bit palette indices
//! each. Every asset gets a `{ width, height, offset }` record pointing at the
//! start of its data. A conversion either produces complete tables or fails
//! with an [`Error`] naming the asset and descriptor line at fault.

pub mod bits;
mod blob;
mod error;
mod font;
mod glyph;
mod options;
mod palette;
mod source;
mod sprite;

pub use error::Error;
pub use font::{encode_font, load_font, FontEncoder, FontTable};
pub use glyph::{encode_glyph, GlyphRect};
pub use options::{
    FontOptions, GlyphSampling, OddWidth, ParseOptionError, SpriteOptions, TailAlignment,
    DEFAULT_ALPHA_THRESHOLD,
};
pub use palette::{rgb, Palette, TRANSPARENT_INDEX};
pub use source::{load_image, ImageSource, Padded, Rgba, TRANSPARENT};
pub use sprite::{encode_sprite, encode_sprites, load_sprites, EncodedSprite, SpriteEncoder, SpriteTable};

pub use asset_descriptor::{FontDescriptor, GlyphEntry, SpriteEntry, SpriteManifest};
pub use rodata_tables::{Glyph, Sprite, PALETTE_RGB};
