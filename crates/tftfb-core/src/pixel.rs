//! Pixel byte-order conversion for the wire.
//!
//! Frame memory is host-native little-endian; both supported
//! controllers want something else. The serial 16 bpp path sends each
//! RGB565 value big-endian; the parallel 24-bit path decomposes a
//! 32-bit pixel into one byte per channel in the panel's scan order.

use crate::geometry::ColorOrder;

/// RGB565 value to the two bytes the controller expects, MSB first.
pub fn rgb565_be(px: u16) -> [u8; 2] {
    px.to_be_bytes()
}

/// Decompose an XRGB8888 pixel into the channel triple streamed to the
/// panel. The source layout is fixed (R at bit 16, G at 8, B at 0);
/// `order` selects which channel leads on the wire.
pub fn rgb888_triple(px: u32, order: ColorOrder) -> [u8; 3] {
    let r = (px >> 16) as u8;
    let g = (px >> 8) as u8;
    let b = px as u8;
    match order {
        ColorOrder::Rgb => [r, g, b],
        ColorOrder::Bgr => [b, g, r],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb565_is_msb_first() {
        assert_eq!(rgb565_be(0xF800), [0xF8, 0x00]);
        assert_eq!(rgb565_be(0x07E0), [0x07, 0xE0]);
        assert_eq!(rgb565_be(0x001F), [0x00, 0x1F]);
    }

    #[test]
    fn rgb565_is_deterministic() {
        for px in [0u16, 0x1234, 0xFFFF, 0x8001] {
            assert_eq!(rgb565_be(px), rgb565_be(px));
        }
    }

    #[test]
    fn triple_matches_channel_order() {
        let px = 0x00AA_BB_CC; // R=0xAA G=0xBB B=0xCC
        assert_eq!(rgb888_triple(px, ColorOrder::Rgb), [0xAA, 0xBB, 0xCC]);
        assert_eq!(rgb888_triple(px, ColorOrder::Bgr), [0xCC, 0xBB, 0xAA]);
    }

    #[test]
    fn triple_ignores_the_top_byte() {
        assert_eq!(
            rgb888_triple(0xFF10_2030, ColorOrder::Rgb),
            rgb888_triple(0x0010_2030, ColorOrder::Rgb)
        );
    }
}
