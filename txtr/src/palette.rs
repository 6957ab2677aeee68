//! Palette construction and nearest-color quantization for the indexed formats.

use crate::{
    consts::{PALETTE_RGB5A3_OPAQUE_THRESHOLD, PALETTE_SENTINEL},
    format::{IndexedFormat, PaletteFormat, PaletteSizeTarget},
    utils::{ia8_to_rgba, rgb565_to_rgba, rgb5a3_to_rgba, rgba_to_ia8, rgba_to_rgb565, rgba_to_rgb5a3},
};
use byteorder::{BigEndian, ByteOrder};
use image::RgbaImage;
use std::collections::{HashMap, HashSet};

/// Packs a pixel into a palette entry.
pub fn quantize_value(format: PaletteFormat, pixel: [u8; 4]) -> u16 {
    match format {
        PaletteFormat::IA8 => rgba_to_ia8(pixel),
        PaletteFormat::RGB565 => rgba_to_rgb565(pixel),
        PaletteFormat::RGB5A3 => rgba_to_rgb5a3(pixel, PALETTE_RGB5A3_OPAQUE_THRESHOLD),
    }
}

/// Unpacks a palette entry into a color.
pub fn expand_value(format: PaletteFormat, value: u16) -> [u8; 4] {
    match format {
        PaletteFormat::IA8 => ia8_to_rgba(value),
        PaletteFormat::RGB565 => rgb565_to_rgba(value),
        PaletteFormat::RGB5A3 => rgb5a3_to_rgba(value),
    }
}

/// Expands raw palette data (big-endian entries) into colors.
pub fn palette_colors(format: PaletteFormat, data: &[u8]) -> Vec<[u8; 4]> {
    data.chunks_exact(2)
        .map(|entry| expand_value(format, BigEndian::read_u16(entry)))
        .collect()
}

fn distance(a: [u8; 4], b: [u8; 4]) -> u32 {
    a.into_iter().zip(b).map(|(a, b)| u32::from(a.abs_diff(b))).sum()
}

/// An immutable palette built from a source image.
///
/// Entry 0 is always the value `0` and is where pixels below the alpha threshold of the texture
/// format end up. The length is a multiple of 16, unused trailing entries hold
/// [`PALETTE_SENTINEL`].
#[derive(Debug, Clone)]
pub struct Palette {
    format: PaletteFormat,
    texture_format: IndexedFormat,
    values: Vec<u16>,
    colors: Vec<[u8; 4]>,
    first_index: HashMap<u16, u16>,
}

impl Palette {
    /// Collects the distinct entries of `image` in raster order until the palette is full.
    pub fn build(image: &RgbaImage, texture_format: IndexedFormat, format: PaletteFormat) -> Self {
        let capacity = texture_format.capacity();
        let threshold = texture_format.alpha_threshold();

        let mut values = vec![0];
        let mut seen = HashSet::from([0]);
        for pixel in image.pixels() {
            if values.len() == capacity {
                break;
            }
            if pixel[3] < threshold {
                continue;
            }
            let value = quantize_value(format, pixel.0);
            if seen.insert(value) {
                values.push(value);
            }
        }

        let padded = values.len().next_multiple_of(16);
        values.resize(padded, PALETTE_SENTINEL);

        Self::from_values(texture_format, format, values)
    }

    pub(crate) fn from_values(
        texture_format: IndexedFormat,
        format: PaletteFormat,
        values: Vec<u16>,
    ) -> Self {
        let colors = values.iter().map(|&v| expand_value(format, v)).collect();
        let mut first_index = HashMap::with_capacity(values.len());
        for (index, &value) in values.iter().enumerate() {
            first_index.entry(value).or_insert(index as u16);
        }

        Self {
            format,
            texture_format,
            values,
            colors,
            first_index,
        }
    }

    pub fn format(&self) -> PaletteFormat {
        self.format
    }

    pub fn texture_format(&self) -> IndexedFormat {
        self.texture_format
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Palette header `(width, height)` for this palette.
    pub fn dimensions(&self, target: PaletteSizeTarget) -> (u16, u16) {
        // at most 16384 entries
        target.dimensions(self.values.len() as u16)
    }

    /// Big-endian palette data as stored in the container.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.values.iter().flat_map(|v| v.to_be_bytes()).collect()
    }

    /// Index of the entry closest to `pixel`. An identical entry wins outright, otherwise the
    /// smallest sum of absolute channel differences, lowest index on ties.
    pub fn quantize(&self, pixel: [u8; 4]) -> u16 {
        if pixel[3] < self.texture_format.alpha_threshold() {
            return 0;
        }
        self.nearest(quantize_value(self.format, pixel))
    }

    fn nearest(&self, value: u16) -> u16 {
        if let Some(&index) = self.first_index.get(&value) {
            return index;
        }

        let target = expand_value(self.format, value);
        self.colors
            .iter()
            .enumerate()
            .min_by_key(|&(_, &color)| distance(target, color))
            .map_or(0, |(index, _)| index as u16)
    }

    pub fn quantizer(&self) -> Quantizer<'_> {
        Quantizer {
            palette: self,
            cache: HashMap::new(),
        }
    }
}

/// [`Palette::quantize`] with the nearest-entry searches remembered per packed value.
#[derive(Debug)]
pub struct Quantizer<'a> {
    palette: &'a Palette,
    cache: HashMap<u16, u16>,
}

impl Quantizer<'_> {
    pub fn index_of(&mut self, pixel: [u8; 4]) -> u16 {
        let palette = self.palette;
        if pixel[3] < palette.texture_format.alpha_threshold() {
            return 0;
        }
        let value = quantize_value(palette.format, pixel);
        *self
            .cache
            .entry(value)
            .or_insert_with(|| palette.nearest(value))
    }
}
