//! Color formats: RGB565, RGB5A3 and RGBA32.

use crate::{
    format::TextureFormat,
    tiles::{put_texel, texel_at, tile_order},
    utils::{rgb565_to_rgba, rgb5a3_to_rgba, rgba_to_rgb565, rgba_to_rgb5a3_direct},
};
use byteorder::{BigEndian, ByteOrder};
use image::RgbaImage;

fn decode_words(
    format: TextureFormat,
    data: &[u8],
    width: u32,
    height: u32,
    to_rgba: fn(u16) -> [u8; 4],
) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    let positions = tile_order(format, width, height);
    for (word, pos) in data.chunks_exact(2).zip(positions) {
        put_texel(&mut image, pos, to_rgba(BigEndian::read_u16(word)));
    }
    image
}

fn encode_words(format: TextureFormat, image: &RgbaImage, to_word: fn([u8; 4]) -> u16) -> Vec<u8> {
    tile_order(format, image.width(), image.height())
        .flat_map(|pos| to_word(texel_at(image, pos)).to_be_bytes())
        .collect()
}

pub(super) fn decode_rgb565(data: &[u8], width: u32, height: u32) -> RgbaImage {
    decode_words(TextureFormat::RGB565, data, width, height, rgb565_to_rgba)
}

pub(super) fn encode_rgb565(image: &RgbaImage) -> Vec<u8> {
    encode_words(TextureFormat::RGB565, image, rgba_to_rgb565)
}

pub(super) fn decode_rgb5a3(data: &[u8], width: u32, height: u32) -> RgbaImage {
    decode_words(TextureFormat::RGB5A3, data, width, height, rgb5a3_to_rgba)
}

pub(super) fn encode_rgb5a3(image: &RgbaImage) -> Vec<u8> {
    encode_words(TextureFormat::RGB5A3, image, rgba_to_rgb5a3_direct)
}

/// Each 4x4 tile is 64 bytes: 16 alpha/red pairs followed by 16 green/blue pairs.
pub(super) fn decode_rgba32(data: &[u8], width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    let positions: Vec<_> = tile_order(TextureFormat::RGBA32, width, height).collect();
    for (tile, block) in positions.chunks_exact(16).zip(data.chunks_exact(64)) {
        let (ar, gb) = block.split_at(32);
        for ((&pos, ar), gb) in tile.iter().zip(ar.chunks_exact(2)).zip(gb.chunks_exact(2)) {
            put_texel(&mut image, pos, [ar[1], gb[0], gb[1], ar[0]]);
        }
    }
    image
}

pub(super) fn encode_rgba32(image: &RgbaImage) -> Vec<u8> {
    let positions: Vec<_> = tile_order(TextureFormat::RGBA32, image.width(), image.height()).collect();
    let mut data = Vec::with_capacity(positions.len() * 4);
    for tile in positions.chunks_exact(16) {
        let texels = tile.iter().map(|&pos| texel_at(image, pos));
        data.extend(texels.clone().flat_map(|[r, _, _, a]| [a, r]));
        data.extend(texels.flat_map(|[_, g, b, _]| [g, b]));
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn rgb565_tile_layout() {
        let mut image = RgbaImage::new(4, 4);
        image.put_pixel(1, 0, Rgba([0xFF, 0, 0, 0xFF]));
        image.put_pixel(0, 1, Rgba([0, 0, 0xFF, 0xFF]));

        let data = encode_rgb565(&image);
        assert_eq!(data.len(), 32);
        assert_eq!(&data[2..4], [0xF8, 0x00]);
        assert_eq!(&data[8..10], [0x00, 0x1F]);
        assert_eq!(decode_rgb565(&data, 4, 4), {
            let mut expected = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0xFF]));
            expected.put_pixel(1, 0, Rgba([0xFF, 0, 0, 0xFF]));
            expected.put_pixel(0, 1, Rgba([0, 0, 0xFF, 0xFF]));
            expected
        });
    }

    #[test]
    fn rgb5a3_picks_layout_by_alpha() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([0xFF, 0xFF, 0xFF, 0xFF]));
        image.put_pixel(1, 0, Rgba([0xFF, 0xFF, 0xFF, 0x10]));

        let data = encode_rgb5a3(&image);
        assert_eq!(&data[..4], [0xFF, 0xFF, 0x0F, 0xFF]);
        let decoded = decode_rgb5a3(&data, 2, 1);
        assert_eq!(decoded.get_pixel(1, 0).0, [0xFF, 0xFF, 0xFF, 0x00]);
    }

    #[test]
    fn rgba32_splits_tile_into_two_passes() {
        let image = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8, y as u8, 0x80, 0x40]));
        let data = encode_rgba32(&image);
        assert_eq!(data.len(), 64);
        assert_eq!(&data[..4], [0x40, 0, 0x40, 1]);
        assert_eq!(&data[32..36], [0, 0x80, 0, 0x80]);
        assert_eq!(&data[62..], [3, 0x80]);
        assert_eq!(decode_rgba32(&data, 4, 4), image);
    }

    #[test]
    fn rgba32_is_lossless_with_partial_tiles() {
        let image = RgbaImage::from_fn(5, 3, |x, y| Rgba([x as u8 * 40, y as u8 * 70, 7, 200]));
        let data = encode_rgba32(&image);
        assert_eq!(data.len(), TextureFormat::RGBA32.data_size(5, 3));
        assert_eq!(decode_rgba32(&data, 5, 3), image);
    }
}
