use std::{io, path::PathBuf};

use asset_descriptor::DescriptorError;
use thiserror::Error;

/// Everything that can abort a conversion. None of these are recoverable: a
/// failed conversion produces no tables at all.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed descriptor, {0}")]
    MalformedDescriptor(DescriptorError),

    #[error("{}: file not found", .path.display())]
    AssetNotFound { path: PathBuf },

    #[error("{}: cannot decode image: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("color #{rgb:06x} at ({x}, {y}) is not in the palette")]
    PaletteMiss { rgb: u32, x: u32, y: u32 },

    #[error("{width}x{height} does not fit a table record (255x255 at most)")]
    DimensionOverflow { width: u32, height: u32 },

    #[error("table offset {offset} does not fit a table record (65535 at most)")]
    OffsetOverflow { offset: usize },

    #[error("{name} (line {line}): {source}")]
    Asset {
        name: String,
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attaches the asset and descriptor line being converted when `self` was
    /// raised.
    pub(crate) fn in_asset(self, name: impl Into<String>, line: usize) -> Self {
        Self::Asset {
            name: name.into(),
            line,
            source: Box::new(self),
        }
    }

    /// The error underneath any asset context.
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Asset { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<DescriptorError> for Error {
    fn from(err: DescriptorError) -> Self {
        match err {
            DescriptorError::NotFound { path } => Self::AssetNotFound { path },
            DescriptorError::Io { path, source } => Self::Io { path, source },
            malformed => Self::MalformedDescriptor(malformed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_names_the_failing_asset() {
        let err = Error::PaletteMiss {
            rgb: 0xff00ff,
            x: 3,
            y: 1,
        }
        .in_asset("ship.png", 2);

        assert_eq!(
            "ship.png (line 2): color #ff00ff at (3, 1) is not in the palette",
            err.to_string()
        );
        assert!(matches!(err.root_cause(), Error::PaletteMiss { x: 3, .. }));
    }

    #[test]
    fn it_maps_descriptor_errors() {
        let missing = Error::from(DescriptorError::NotFound {
            path: PathBuf::from("font.sfl"),
        });
        assert!(matches!(missing, Error::AssetNotFound { .. }));

        let err = asset_descriptor::FontDescriptor::parse("Font\n8 8\nfont.png\nx\n").unwrap_err();
        assert!(matches!(Error::from(err), Error::MalformedDescriptor(_)));
    }
}
