use embedded_graphics::pixelcolor::Rgb888;

/// The fixed 16 color palette sprite indices refer to, as `0xRRGGBB`.
///
/// Every encoded sprite byte depends on this order, so reordering or editing an
/// entry invalidates all previously generated sprite tables.
pub const PALETTE_RGB: [u32; 16] = [
    0x1a1c2c, 0x5d275d, 0xb13e53, 0xef7d57, 0xffcd75, 0xa7f070, 0x38b764, 0x257179, //
    0x29366f, 0x3b5dc9, 0x41a6f6, 0x73eff7, 0x333c57, 0x566c86, 0x94b0c2, 0xf4f4f4,
];

/// [`PALETTE_RGB`] as embedded-graphics colors.
pub const PALETTE: [Rgb888; 16] = {
    let mut colors = [Rgb888::new(0, 0, 0); 16];
    let mut i = 0;
    while i < PALETTE_RGB.len() {
        colors[i] = rgb888(PALETTE_RGB[i]);
        i += 1;
    }
    colors
};

/// Splits a `0xRRGGBB` value into an [`Rgb888`].
pub const fn rgb888(value: u32) -> Rgb888 {
    Rgb888::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn it_splits_palette_channels() {
        let first = PALETTE[0];
        assert_eq!((0x1a, 0x1c, 0x2c), (first.r(), first.g(), first.b()));

        let last = PALETTE[15];
        assert_eq!((0xf4, 0xf4, 0xf4), (last.r(), last.g(), last.b()));
    }

    #[test]
    fn it_has_no_duplicate_entries() {
        for (i, a) in PALETTE_RGB.iter().enumerate() {
            for b in &PALETTE_RGB[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
