//! Standard BC1 (DXT1) color blocks: two little-endian RGB565 endpoints followed by sixteen 2-bit
//! indices, least significant bits first.

use texpresso::{Algorithm, Format, Params};

use crate::utils::rgb565_to_rgba;

pub const BLOCK_SIZE: usize = 8;

fn lerp(a: u8, b: u8, num: u32, den: u32) -> u8 {
    ((u32::from(a) * (den - num) + u32::from(b) * num) / den) as u8
}

fn mix(c0: [u8; 4], c1: [u8; 4], num: u32, den: u32) -> [u8; 4] {
    [
        lerp(c0[0], c1[0], num, den),
        lerp(c0[1], c1[1], num, den),
        lerp(c0[2], c1[2], num, den),
        0xFF,
    ]
}

/// The four colors a block can select from. With `color0 <= color1` the block has a single
/// midpoint and color 3 is transparent black.
pub fn block_palette(color0: u16, color1: u16) -> [[u8; 4]; 4] {
    let c0 = rgb565_to_rgba(color0);
    let c1 = rgb565_to_rgba(color1);

    if color0 > color1 {
        [c0, c1, mix(c0, c1, 1, 3), mix(c0, c1, 2, 3)]
    } else {
        [c0, c1, mix(c0, c1, 1, 2), [0; 4]]
    }
}

/// Decodes a block into 16 pixels, row-major.
pub fn decompress_block(block: &[u8; BLOCK_SIZE]) -> [[u8; 4]; 16] {
    let color0 = u16::from_le_bytes([block[0], block[1]]);
    let color1 = u16::from_le_bytes([block[2], block[3]]);
    let indices = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);
    let palette = block_palette(color0, color1);

    std::array::from_fn(|i| palette[((indices >> (2 * i)) & 0b11) as usize])
}

/// Compresses 16 pixels (row-major) with libsquish's cluster fit. Blocks with any pixel below
/// [`CMPR_ALPHA_CUTOFF`](crate::consts::CMPR_ALPHA_CUTOFF) use the three color mode and store
/// those pixels as transparent.
pub fn compress_block(pixels: &[[u8; 4]; 16]) -> [u8; BLOCK_SIZE] {
    let params = Params {
        algorithm: Algorithm::ClusterFit,
        ..Params::default()
    };

    let mut block = [0; BLOCK_SIZE];
    Format::Bc1.compress(&pixels.concat(), 4, 4, params, &mut block);
    block
}
