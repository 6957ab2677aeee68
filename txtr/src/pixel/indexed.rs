//! Palette index packing for CI4, CI8 and CI14X2.

use crate::{
    error::{CodecError, PaletteIndexOutOfRangeSnafu},
    format::IndexedFormat,
    palette::Palette,
    tiles::{put_texel, texel_at, tile_order},
};
use byteorder::{BigEndian, ByteOrder};
use image::RgbaImage;
use itertools::Itertools;
use snafu::OptionExt;

const CI14X2_INDEX_MASK: u16 = 0x3FFF;

/// Indices in storage order, two per byte for CI4 (high nibble first).
fn unpack_indices(format: IndexedFormat, data: &[u8]) -> Box<dyn Iterator<Item = usize> + '_> {
    match format {
        IndexedFormat::CI4 => Box::new(
            data.iter()
                .flat_map(|&byte| [usize::from(byte >> 4), usize::from(byte & 0xF)]),
        ),
        IndexedFormat::CI8 => Box::new(data.iter().map(|&byte| usize::from(byte))),
        IndexedFormat::CI14X2 => Box::new(
            data.chunks_exact(2)
                .map(|word| usize::from(BigEndian::read_u16(word) & CI14X2_INDEX_MASK)),
        ),
    }
}

/// Decodes an index buffer against expanded palette colors. Indices in the padding around the
/// image are never looked up.
pub fn decode_indexed(
    format: IndexedFormat,
    data: &[u8],
    colors: &[[u8; 4]],
    width: u32,
    height: u32,
) -> Result<RgbaImage, CodecError> {
    let mut image = RgbaImage::new(width, height);
    let positions = tile_order(format.texture_format(), width, height);
    for (index, (x, y)) in unpack_indices(format, data).zip(positions) {
        if x >= width || y >= height {
            continue;
        }
        let color = colors.get(index).context(PaletteIndexOutOfRangeSnafu {
            index,
            len: colors.len(),
        })?;
        put_texel(&mut image, (x, y), *color);
    }
    Ok(image)
}

/// Maps every pixel to its palette index and packs the indices.
pub fn encode_indexed(format: IndexedFormat, image: &RgbaImage, palette: &Palette) -> Vec<u8> {
    let mut quantizer = palette.quantizer();
    let indices = tile_order(format.texture_format(), image.width(), image.height())
        .map(|pos| quantizer.index_of(texel_at(image, pos)));

    match format {
        IndexedFormat::CI4 => indices
            .tuples::<(_, _)>()
            .map(|(hi, lo)| ((hi as u8 & 0xF) << 4) | (lo as u8 & 0xF))
            .collect(),
        IndexedFormat::CI8 => indices.map(|index| index as u8).collect(),
        IndexedFormat::CI14X2 => indices
            .flat_map(|index| (index & CI14X2_INDEX_MASK).to_be_bytes())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PaletteFormat;
    use image::Rgba;

    #[test]
    fn ci4_nibbles() {
        let palette = Palette::from_values(
            IndexedFormat::CI4,
            PaletteFormat::RGB565,
            vec![0, 0xF800, 0x07E0],
        );
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([0, 0xFF, 0, 0xFF]));
        image.put_pixel(1, 0, Rgba([0xFF, 0, 0, 0xFF]));

        let data = encode_indexed(IndexedFormat::CI4, &image, &palette);
        assert_eq!(data.len(), 32);
        assert_eq!(data[0], 0x21);
        assert!(data[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn ci14x2_words() {
        let mut colors = vec![[0; 4]; 0x1235];
        colors[0x1234] = [1, 2, 3, 4];
        let mut data = vec![0; 32];
        data[..2].copy_from_slice(&[0xD2, 0x34]);

        let image = decode_indexed(IndexedFormat::CI14X2, &data, &colors, 1, 1).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [1, 2, 3, 4]);
    }

    #[test]
    fn out_of_range_index() {
        let data = [0xFF; 32];
        let err = decode_indexed(IndexedFormat::CI8, &data, &[[0; 4]; 16], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            CodecError::PaletteIndexOutOfRange { index: 0xFF, len: 16 }
        ));
    }

    #[test]
    fn padding_indices_are_ignored() {
        let mut data = [0xFF; 32];
        data[0] = 1;
        let image =
            decode_indexed(IndexedFormat::CI8, &data, &[[0; 4], [9, 9, 9, 9]], 1, 1).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [9, 9, 9, 9]);
    }
}
