use std::{fmt, str::FromStr};

use thiserror::Error;

/// Alpha at or above which a glyph pixel counts as set.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 128;

/// Where glyph pixels are read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GlyphSampling {
    /// Every glyph is read starting at the sheet's top-left corner, ignoring
    /// the `x`/`y` of its descriptor line. Keeps existing firmware tables
    /// stable bit for bit.
    #[default]
    ImageOrigin,
    /// Each glyph is read from its own `x`/`y` in the sheet.
    GlyphRect,
}

/// Placement of the leftover bits in the last word of a glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TailAlignment {
    /// Leftover bits stay in the high-order positions, continuing the
    /// MSB-first order of full words. The low-order bits are zero.
    #[default]
    Msb,
    /// Leftover bits are moved to the low-order positions and the high-order
    /// bits are zero.
    Lsb,
}

/// How sprites with an odd width are widened with transparent columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OddWidth {
    /// One column on each side: `width + 2`.
    #[default]
    Centered,
    /// One column on the left, two on the right: `width + 3`, which keeps
    /// every sprite row a whole number of bytes.
    Even,
}

impl OddWidth {
    /// Transparent columns added to the left and right of a sprite `width`
    /// pixels wide.
    pub fn padding(self, width: u32) -> (u32, u32) {
        if width % 2 == 0 {
            return (0, 0);
        }

        match self {
            Self::Centered => (1, 1),
            Self::Even => (1, 2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontOptions {
    pub alpha_threshold: u8,
    pub sampling: GlyphSampling,
    pub tail: TailAlignment,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            sampling: GlyphSampling::default(),
            tail: TailAlignment::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpriteOptions {
    pub odd_width: OddWidth,
}

#[derive(Debug, Error)]
#[error("unknown {kind} {value:?}, expected one of: {expected}")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

macro_rules! option_names {
    ($type:ty, $kind:literal, { $($name:literal => $variant:path),+ $(,)? }) => {
        impl FromStr for $type {
            type Err = ParseOptionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($variant),)+
                    _ => Err(ParseOptionError {
                        kind: $kind,
                        value: s.to_owned(),
                        expected: concat!($($name, " "),+).trim_end(),
                    }),
                }
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match *self {
                    $($variant => $name,)+
                })
            }
        }
    };
}

option_names!(GlyphSampling, "glyph sampling", {
    "image_origin" => GlyphSampling::ImageOrigin,
    "glyph_rect" => GlyphSampling::GlyphRect,
});

option_names!(TailAlignment, "tail alignment", {
    "msb" => TailAlignment::Msb,
    "lsb" => TailAlignment::Lsb,
});

option_names!(OddWidth, "odd width policy", {
    "centered" => OddWidth::Centered,
    "even" => OddWidth::Even,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_pads_only_odd_widths() {
        assert_eq!((0, 0), OddWidth::Centered.padding(4));
        assert_eq!((0, 0), OddWidth::Even.padding(0));
        assert_eq!((1, 1), OddWidth::Centered.padding(1));
        assert_eq!((1, 2), OddWidth::Even.padding(7));
    }

    #[test]
    fn it_parses_option_names() {
        assert_eq!(TailAlignment::Lsb, "lsb".parse::<TailAlignment>().unwrap());
        assert_eq!(GlyphSampling::GlyphRect, "glyph_rect".parse::<GlyphSampling>().unwrap());
        assert_eq!("even", OddWidth::Even.to_string());
    }

    #[test]
    fn it_lists_expected_names() {
        let err = "middle".parse::<TailAlignment>().unwrap_err();
        assert_eq!(
            "unknown tail alignment \"middle\", expected one of: msb lsb",
            err.to_string()
        );
    }

    #[test]
    fn it_defaults_to_a_threshold_of_128() {
        assert_eq!(128, FontOptions::default().alpha_threshold);
    }
}
