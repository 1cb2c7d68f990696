use hashbrown::HashMap;
use rodata_tables::PALETTE_RGB;

use crate::source::Rgba;

/// Index every fully transparent pixel maps to, whatever its color.
pub const TRANSPARENT_INDEX: u8 = 0;

/// Exact-match lookup from 24-bit color to palette index.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: [u32; 16],
    indices: HashMap<u32, u8>,
}

impl Palette {
    pub fn new(colors: [u32; 16]) -> Self {
        let mut indices = HashMap::with_capacity(colors.len());
        for (i, color) in colors.iter().enumerate() {
            // earliest entry wins, like a linear search would
            indices.entry(color & 0xff_ffff).or_insert(i as u8);
        }

        Self { colors, indices }
    }

    pub fn colors(&self) -> &[u32; 16] {
        &self.colors
    }

    pub fn index_of(&self, rgb: u32) -> Option<u8> {
        self.indices.get(&rgb).copied()
    }

    /// Palette index for one pixel; `None` when an opaque color has no exact
    /// match. There is deliberately no nearest-color fallback.
    pub fn classify(&self, pixel: Rgba) -> Option<u8> {
        let [r, g, b, a] = pixel;
        if a == 0 {
            return Some(TRANSPARENT_INDEX);
        }

        self.index_of(rgb(r, g, b))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(PALETTE_RGB)
    }
}

pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}
