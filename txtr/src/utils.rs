//! Channel bit-depth conversions and 16-bit texel packing.
//!
//! Low-depth channels are widened by bit replication and narrowed by truncation, so narrowing a
//! widened value always gives back the original bits.

use crate::consts::{RGB5A3_OPAQUE_FLAG, RGB5A3_OPAQUE_THRESHOLD};

/// Widens a 3-bit channel to 8 bits.
#[inline]
pub const fn expand3(v: u8) -> u8 {
    (v << 5) | (v << 2) | (v >> 1)
}

/// Widens a 4-bit channel to 8 bits.
#[inline]
pub const fn expand4(v: u8) -> u8 {
    (v << 4) | v
}

/// Widens a 5-bit channel to 8 bits.
#[inline]
pub const fn expand5(v: u8) -> u8 {
    (v << 3) | (v >> 2)
}

/// Widens a 6-bit channel to 8 bits.
#[inline]
pub const fn expand6(v: u8) -> u8 {
    (v << 2) | (v >> 4)
}

/// Mean of the color channels, alpha is ignored.
#[inline]
pub const fn intensity([r, g, b, _]: [u8; 4]) -> u8 {
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}

/// Splits a RGB565 pixel into its components.
#[inline]
pub const fn decode_565(pixel: u16) -> [u8; 3] {
    let r = (pixel & 0b1111_1000_0000_0000) >> 11;
    let g = (pixel & 0b0000_0111_1110_0000) >> 5;
    let b = pixel & 0b0000_0000_0001_1111;

    [r as u8, g as u8, b as u8]
}

/// Compose the 5-bit R, 6-bit G, and 5-bit B values into a RGB565 u16 pixel. Does not mask off
/// higher bits if they are set.
#[inline]
pub const fn encode_rgb565_unchecked([r, g, b]: [u8; 3]) -> u16 {
    ((r as u16) << 11) | ((g as u16) << 5) | (b as u16)
}

#[inline]
pub const fn rgb565_to_rgba(texel: u16) -> [u8; 4] {
    let [r, g, b] = decode_565(texel);
    [expand5(r), expand6(g), expand5(b), 0xFF]
}

#[inline]
pub const fn rgba_to_rgb565([r, g, b, _]: [u8; 4]) -> u16 {
    encode_rgb565_unchecked([r >> 3, g >> 2, b >> 3])
}

/// Unpacks an IA8 word: alpha in the high byte, intensity in the low byte.
#[inline]
pub const fn ia8_to_rgba(texel: u16) -> [u8; 4] {
    let [a, i] = texel.to_be_bytes();
    [i, i, i, a]
}

#[inline]
pub const fn rgba_to_ia8(pixel: [u8; 4]) -> u16 {
    u16::from_be_bytes([pixel[3], intensity(pixel)])
}

#[inline]
pub const fn rgb5a3_to_rgba(texel: u16) -> [u8; 4] {
    if texel & RGB5A3_OPAQUE_FLAG != 0 {
        let r = (texel >> 10) & 0x1F;
        let g = (texel >> 5) & 0x1F;
        let b = texel & 0x1F;
        [expand5(r as u8), expand5(g as u8), expand5(b as u8), 0xFF]
    } else {
        let a = (texel >> 12) & 0x7;
        let r = (texel >> 8) & 0xF;
        let g = (texel >> 4) & 0xF;
        let b = texel & 0xF;
        [
            expand4(r as u8),
            expand4(g as u8),
            expand4(b as u8),
            expand3(a as u8),
        ]
    }
}

/// Packs a pixel as RGB5A3. Pixels with an alpha above `opaque_threshold` use the opaque RGB555
/// layout, everything else keeps 3 bits of alpha.
#[inline]
pub const fn rgba_to_rgb5a3([r, g, b, a]: [u8; 4], opaque_threshold: u8) -> u16 {
    if a > opaque_threshold {
        RGB5A3_OPAQUE_FLAG
            | ((r as u16 >> 3) << 10)
            | ((g as u16 >> 3) << 5)
            | (b as u16 >> 3)
    } else {
        ((a as u16 >> 5) << 12) | ((r as u16 >> 4) << 8) | ((g as u16 >> 4) << 4) | (b as u16 >> 4)
    }
}

/// [`rgba_to_rgb5a3`] with the threshold used for direct RGB5A3 textures.
#[inline]
pub const fn rgba_to_rgb5a3_direct(pixel: [u8; 4]) -> u16 {
    rgba_to_rgb5a3(pixel, RGB5A3_OPAQUE_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_replication() {
        assert_eq!(expand3(0), 0);
        assert_eq!(expand3(1), 36);
        assert_eq!(expand3(6), 0xDB);
        assert_eq!(expand3(7), 0xFF);
        assert_eq!(expand4(0xA), 0xAA);
        assert_eq!(expand5(1), 8);
        assert_eq!(expand5(0x1F), 0xFF);
        assert_eq!(expand6(1), 4);
        assert_eq!(expand6(0x3F), 0xFF);
    }

    #[test]
    fn truncation_inverts_replication() {
        for v in 0..8 {
            assert_eq!(expand3(v) >> 5, v);
        }
        for v in 0..16 {
            assert_eq!(expand4(v) >> 4, v);
        }
        for v in 0..32 {
            assert_eq!(expand5(v) >> 3, v);
        }
        for v in 0..64 {
            assert_eq!(expand6(v) >> 2, v);
        }
    }

    #[test]
    fn rgb565() {
        assert_eq!(rgb565_to_rgba(0xF800), [0xFF, 0, 0, 0xFF]);
        assert_eq!(rgb565_to_rgba(0x07E0), [0, 0xFF, 0, 0xFF]);
        assert_eq!(rgba_to_rgb565([0xFF, 0x80, 0x08, 0x10]), 0xFC01);
    }

    #[test]
    fn ia8() {
        assert_eq!(rgba_to_ia8([30, 60, 90, 0x7F]), 0x7F3C);
        assert_eq!(ia8_to_rgba(0x7F3C), [60, 60, 60, 0x7F]);
    }

    #[test]
    fn rgb5a3_layouts() {
        assert_eq!(rgba_to_rgb5a3_direct([0xFF, 0, 0xFF, 0xFF]), 0xFC1F);
        assert_eq!(rgb5a3_to_rgba(0xFC1F), [0xFF, 0, 0xFF, 0xFF]);

        assert_eq!(rgba_to_rgb5a3_direct([0x10, 0x20, 0x30, 0x40]), 0x2123);
        assert_eq!(rgb5a3_to_rgba(0x2123), [0x11, 0x22, 0x33, 0x49]);
    }

    #[test]
    fn rgb5a3_is_stable_for_every_alpha() {
        for a in 0..=255 {
            let once = rgb5a3_to_rgba(rgba_to_rgb5a3_direct([0x40, 0x80, 0xC0, a]));
            let twice = rgb5a3_to_rgba(rgba_to_rgb5a3_direct(once));
            assert_eq!(once, twice, "alpha {a}");
        }
    }
}
