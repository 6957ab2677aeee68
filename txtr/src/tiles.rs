//! Tile traversal shared by every texture format.
//!
//! Texture data is a sequence of tiles, left to right and then top to bottom. Inside a tile the
//! pixels are stored row by row. Tiles on the right and bottom edges may hang over the image;
//! those positions still occupy storage.

use crate::format::TextureFormat;
use image::RgbaImage;
use itertools::iproduct;

/// Pixel positions in storage order for a texture of the given format.
pub(crate) fn tile_order(
    format: TextureFormat,
    width: u32,
    height: u32,
) -> impl Iterator<Item = (u32, u32)> {
    let (block_width, block_height) = format.block_dimensions();
    blocks(width, height, block_width, block_height)
}

fn blocks(
    width: u32,
    height: u32,
    block_width: u32,
    block_height: u32,
) -> impl Iterator<Item = (u32, u32)> {
    let tiles_x = width.div_ceil(block_width);
    let tiles_y = height.div_ceil(block_height);
    iproduct!(0..tiles_y, 0..tiles_x, 0..block_height, 0..block_width)
        .map(move |(ty, tx, y, x)| (tx * block_width + x, ty * block_height + y))
}

/// Top-left corners of the 4x4 sub-blocks of a CMPR texture: 8x8 tiles in storage order, each
/// split into four sub-blocks in row-major order.
pub(crate) fn sub_block_origins(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let (tile_width, tile_height) = TextureFormat::CMPR.block_dimensions();
    blocks(width, height, tile_width, tile_height).filter(|(x, y)| x % 4 == 0 && y % 4 == 0)
}

/// Color at a storage position, transparent black past the image edge.
#[inline]
pub(crate) fn texel_at(image: &RgbaImage, (x, y): (u32, u32)) -> [u8; 4] {
    if x < image.width() && y < image.height() {
        image.get_pixel(x, y).0
    } else {
        [0; 4]
    }
}

/// Stores a decoded color, dropping positions past the image edge.
#[inline]
pub(crate) fn put_texel(image: &mut RgbaImage, (x, y): (u32, u32), rgba: [u8; 4]) {
    if x < image.width() && y < image.height() {
        image.put_pixel(x, y, image::Rgba(rgba));
    }
}
