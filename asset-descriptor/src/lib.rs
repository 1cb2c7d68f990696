//! Readers for the text files that drive the asset encoders: `.sfl` font
//! descriptors and sprite manifests.

mod error;
mod font;
mod glyph;
mod manifest;

pub use error::DescriptorError;
pub use font::FontDescriptor;
pub use glyph::GlyphEntry;
pub use manifest::{SpriteEntry, SpriteManifest};

use std::{fs, io, path::Path};

fn read_to_string(path: &Path) -> Result<String, DescriptorError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DescriptorError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
