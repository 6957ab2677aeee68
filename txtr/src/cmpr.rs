//! CMPR: BC1 blocks in GX byte order.
//!
//! Each 8x8 tile holds four 4x4 sub-blocks in row-major order. A sub-block differs from standard
//! BC1 in two ways: the endpoint words are big-endian, and the four 2-bit indices of each row are
//! stored leftmost pixel first (most significant bits). [`swap_block_layout`] converts between the
//! two layouts in either direction.

pub mod bc1;

use crate::tiles::{put_texel, sub_block_origins, texel_at};
use image::RgbaImage;

/// Reverses the order of the four 2-bit fields in a byte.
#[inline]
pub const fn reverse_index_order(byte: u8) -> u8 {
    ((byte & 0b0000_0011) << 6)
        | ((byte & 0b0000_1100) << 2)
        | ((byte & 0b0011_0000) >> 2)
        | ((byte & 0b1100_0000) >> 6)
}

/// Converts a block between GX and standard BC1 layout.
pub fn swap_block_layout(block: [u8; bc1::BLOCK_SIZE]) -> [u8; bc1::BLOCK_SIZE] {
    let [a0, a1, b0, b1, rows @ ..] = block;
    let [r0, r1, r2, r3] = rows.map(reverse_index_order);
    [a1, a0, b1, b0, r0, r1, r2, r3]
}

pub fn decode(data: &[u8], width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    for (chunk, (ox, oy)) in data
        .chunks_exact(bc1::BLOCK_SIZE)
        .zip(sub_block_origins(width, height))
    {
        let mut block = [0; bc1::BLOCK_SIZE];
        block.copy_from_slice(chunk);
        let pixels = bc1::decompress_block(&swap_block_layout(block));
        for (i, rgba) in (0u32..).zip(pixels) {
            put_texel(&mut image, (ox + i % 4, oy + i / 4), rgba);
        }
    }
    image
}

pub fn encode(image: &RgbaImage) -> Vec<u8> {
    sub_block_origins(image.width(), image.height())
        .flat_map(|(ox, oy)| {
            let pixels = std::array::from_fn(|i| {
                let i = i as u32;
                texel_at(image, (ox + i % 4, oy + i / 4))
            });
            swap_block_layout(bc1::compress_block(&pixels))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn index_order_reversal() {
        assert_eq!(reverse_index_order(0b11_10_01_00), 0b00_01_10_11);
        assert_eq!(reverse_index_order(0b11_00_00_00), 0b00_00_00_11);
        for byte in 0..=255 {
            assert_eq!(reverse_index_order(reverse_index_order(byte)), byte);
        }
    }

    #[test]
    fn layout_swap_is_an_involution() {
        let block = [0x12, 0x34, 0x56, 0x78, 0x1B, 0xE4, 0x00, 0xFF];
        let swapped = swap_block_layout(block);
        assert_eq!(swapped, [0x34, 0x12, 0x78, 0x56, 0xE4, 0x1B, 0x00, 0xFF]);
        assert_eq!(swap_block_layout(swapped), block);
    }

    fn gx_block(color0: u16, color1: u16, row: u8) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend(color0.to_be_bytes());
        data.extend(color1.to_be_bytes());
        data.extend([row; 4]);
        data.resize(32, 0);
        data
    }

    #[test]
    fn three_color_block_alpha() {
        // blue <= red, so index 3 is transparent; indices 0, 1, 2, 3 from left to right
        let data = gx_block(0x001F, 0xF800, 0b00_01_10_11);
        let image = decode(&data, 4, 4);

        for (x, y, pixel) in image.enumerate_pixels() {
            let expected = if x == 3 { 0 } else { 0xFF };
            assert_eq!(pixel[3], expected, "pixel ({x}, {y})");
        }
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0xFF, 0xFF]);
        assert_eq!(image.get_pixel(1, 2).0, [0xFF, 0, 0, 0xFF]);
        assert_eq!(image.get_pixel(2, 1).0, [0x7F, 0, 0x7F, 0xFF]);
    }

    #[test]
    fn four_color_block_is_opaque() {
        let data = gx_block(0xF800, 0x001F, 0b00_01_10_11);
        let image = decode(&data, 4, 4);
        assert!(image.pixels().all(|p| p[3] == 0xFF));
        assert_eq!(image.get_pixel(3, 0).0, [0x55, 0, 0xAA, 0xFF]);
    }

    #[test]
    fn sub_blocks_fill_the_tile() {
        let image = RgbaImage::from_fn(8, 8, |x, y| {
            let v = if (x < 4) == (y < 4) { 0xFF } else { 0 };
            Rgba([v, 0, 0xFF - v, 0xFF])
        });
        let data = encode(&image);
        assert_eq!(data.len(), 32);
        assert_eq!(decode(&data, 8, 8), image);
    }

    #[test]
    fn mixed_colors_inside_sub_blocks() {
        let image = RgbaImage::from_fn(8, 8, |x, y| match (x, y) {
            (5, 6) => Rgba([0; 4]),
            _ if (x + y) % 2 == 0 => Rgba([0xFF, 0, 0, 0xFF]),
            _ => Rgba([0, 0xFF, 0, 0xFF]),
        });
        assert_eq!(decode(&encode(&image), 8, 8), image);
    }
}
