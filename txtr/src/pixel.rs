//! Conversion between tiled texture data and linear RGBA images.
//!
//! Decoding never looks past the data it is given and never fails for direct formats; the
//! container layer is responsible for handing over buffers of the right size.

mod color;
mod indexed;
mod intensity;

use crate::{cmpr, format::DirectFormat};
use image::RgbaImage;

pub use indexed::{decode_indexed, encode_indexed};

/// Decodes one level of a direct format, rows in storage order.
pub fn decode_direct(format: DirectFormat, data: &[u8], width: u32, height: u32) -> RgbaImage {
    match format {
        DirectFormat::I4 => intensity::decode_i4(data, width, height),
        DirectFormat::I8 => intensity::decode_i8(data, width, height),
        DirectFormat::IA4 => intensity::decode_ia4(data, width, height),
        DirectFormat::IA8 => intensity::decode_ia8(data, width, height),
        DirectFormat::RGB565 => color::decode_rgb565(data, width, height),
        DirectFormat::RGB5A3 => color::decode_rgb5a3(data, width, height),
        DirectFormat::RGBA32 => color::decode_rgba32(data, width, height),
        DirectFormat::CMPR => cmpr::decode(data, width, height),
    }
}

/// Encodes an image into one level of a direct format, rows in storage order.
pub fn encode_direct(format: DirectFormat, image: &RgbaImage) -> Vec<u8> {
    match format {
        DirectFormat::I4 => intensity::encode_i4(image),
        DirectFormat::I8 => intensity::encode_i8(image),
        DirectFormat::IA4 => intensity::encode_ia4(image),
        DirectFormat::IA8 => intensity::encode_ia8(image),
        DirectFormat::RGB565 => color::encode_rgb565(image),
        DirectFormat::RGB5A3 => color::encode_rgb5a3(image),
        DirectFormat::RGBA32 => color::encode_rgba32(image),
        DirectFormat::CMPR => cmpr::encode(image),
    }
}
