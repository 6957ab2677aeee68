//! TXTR to RGBA images.

use crate::{
    container::TextureContainer,
    error::{CodecError, EmptyPaletteSnafu, MipmapSizeMismatchSnafu},
    format::FormatKind,
    pixel::{decode_direct, decode_indexed},
};
use image::{imageops, RgbaImage};
use snafu::ensure;
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Decode every mipmap level instead of just the base level.
    pub read_all_mipmaps: bool,
}

/// Decodes a TXTR stream into one image per mipmap level, base level first.
pub fn decode<R: Read>(reader: R, options: &DecodeOptions) -> Result<Vec<RgbaImage>, CodecError> {
    decode_with_progress(reader, options, |_, _| ())
}

/// Like [`decode`], calling `progress(levels_done, total_levels)` after each level.
pub fn decode_with_progress<R: Read, P: FnMut(u32, u32)>(
    mut reader: R,
    options: &DecodeOptions,
    progress: P,
) -> Result<Vec<RgbaImage>, CodecError> {
    let container = TextureContainer::read_from(&mut reader, options.read_all_mipmaps)?;
    decode_container(&container, progress)
}

/// Decodes the levels held by an already parsed container.
pub fn decode_container<P: FnMut(u32, u32)>(
    container: &TextureContainer,
    mut progress: P,
) -> Result<Vec<RgbaImage>, CodecError> {
    let header = &container.header;
    let total = container.mipmaps.len() as u32;
    let colors = container.palette.as_ref().map(|palette| palette.colors());

    let mut images = Vec::with_capacity(container.mipmaps.len());
    for (level, data) in (0u32..).zip(&container.mipmaps) {
        let (width, height) = header.level_dimensions(level)?;
        let expected = header.format.data_size(width, height);
        ensure!(
            data.len() == expected,
            MipmapSizeMismatchSnafu {
                level,
                expected,
                actual: data.len(),
            }
        );

        let image = match (header.format.kind(), &colors) {
            (FormatKind::Indexed(indexed), Some(colors)) => {
                decode_indexed(indexed, data, colors, width, height)?
            }
            (FormatKind::Indexed(_), None) => return EmptyPaletteSnafu.fail(),
            (FormatKind::Direct(direct), _) => {
                let mut image = decode_direct(direct, data, width, height);
                imageops::flip_vertical_in_place(&mut image);
                image
            }
        };
        images.push(image);
        progress(level + 1, total);
    }
    Ok(images)
}
