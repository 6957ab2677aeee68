//! Grayscale formats: I4, I8, IA4 and IA8.

use crate::{
    format::TextureFormat,
    tiles::{put_texel, texel_at, tile_order},
    utils::{expand4, ia8_to_rgba, intensity, rgba_to_ia8},
};
use byteorder::{BigEndian, ByteOrder};
use image::RgbaImage;
use itertools::Itertools;

const fn gray(i: u8) -> [u8; 4] {
    [i, i, i, 0xFF]
}

pub(super) fn decode_i4(data: &[u8], width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    let positions = tile_order(TextureFormat::I4, width, height).tuples::<(_, _)>();
    for (&byte, (first, second)) in data.iter().zip(positions) {
        put_texel(&mut image, first, gray(expand4(byte >> 4)));
        put_texel(&mut image, second, gray(expand4(byte & 0xF)));
    }
    image
}

pub(super) fn encode_i4(image: &RgbaImage) -> Vec<u8> {
    tile_order(TextureFormat::I4, image.width(), image.height())
        .tuples::<(_, _)>()
        .map(|(first, second)| {
            let hi = intensity(texel_at(image, first)) >> 4;
            let lo = intensity(texel_at(image, second)) >> 4;
            (hi << 4) | lo
        })
        .collect()
}

pub(super) fn decode_i8(data: &[u8], width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    for (&byte, pos) in data.iter().zip(tile_order(TextureFormat::I8, width, height)) {
        put_texel(&mut image, pos, gray(byte));
    }
    image
}

pub(super) fn encode_i8(image: &RgbaImage) -> Vec<u8> {
    tile_order(TextureFormat::I8, image.width(), image.height())
        .map(|pos| intensity(texel_at(image, pos)))
        .collect()
}

/// High nibble alpha, low nibble intensity.
pub(super) fn decode_ia4(data: &[u8], width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    for (&byte, pos) in data.iter().zip(tile_order(TextureFormat::IA4, width, height)) {
        let i = expand4(byte & 0xF);
        put_texel(&mut image, pos, [i, i, i, expand4(byte >> 4)]);
    }
    image
}

pub(super) fn encode_ia4(image: &RgbaImage) -> Vec<u8> {
    tile_order(TextureFormat::IA4, image.width(), image.height())
        .map(|pos| {
            let pixel = texel_at(image, pos);
            (pixel[3] & 0xF0) | (intensity(pixel) >> 4)
        })
        .collect()
}

pub(super) fn decode_ia8(data: &[u8], width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    let positions = tile_order(TextureFormat::IA8, width, height);
    for (word, pos) in data.chunks_exact(2).zip(positions) {
        put_texel(&mut image, pos, ia8_to_rgba(BigEndian::read_u16(word)));
    }
    image
}

pub(super) fn encode_ia8(image: &RgbaImage) -> Vec<u8> {
    tile_order(TextureFormat::IA8, image.width(), image.height())
        .flat_map(|pos| rgba_to_ia8(texel_at(image, pos)).to_be_bytes())
        .collect()
}
