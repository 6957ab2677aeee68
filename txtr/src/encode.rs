//! RGBA images to TXTR.

use crate::{
    container::{Header, PaletteHeader, PaletteSection, TextureContainer},
    error::{CodecError, InvalidDimensionSnafu, MipmapNotAllowedSnafu},
    format::{FormatKind, PaletteFormat, PaletteSizeTarget, TextureFormat},
    mipmap::{downsample, mipmap_count},
    palette::Palette,
    pixel::{encode_direct, encode_indexed},
};
use image::{imageops, RgbaImage};
use snafu::{ensure, OptionExt};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub texture_format: TextureFormat,
    /// Only used by indexed texture formats.
    pub palette_format: PaletteFormat,
    pub palette_size_target: PaletteSizeTarget,
    /// Generate a mipmap chain. Not allowed for indexed texture formats.
    pub generate_mipmaps: bool,
    pub mipmap_width_limit: u32,
    pub mipmap_height_limit: u32,
}

impl EncodeOptions {
    pub fn new(texture_format: TextureFormat) -> Self {
        Self {
            texture_format,
            ..Self::default()
        }
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            texture_format: TextureFormat::RGBA32,
            palette_format: PaletteFormat::RGB5A3,
            palette_size_target: PaletteSizeTarget::Width,
            generate_mipmaps: false,
            mipmap_width_limit: 1,
            mipmap_height_limit: 1,
        }
    }
}

/// Encodes an image into a complete TXTR file.
pub fn encode(image: &RgbaImage, options: &EncodeOptions) -> Result<Vec<u8>, CodecError> {
    encode_with_progress(image, options, |_, _| ())
}

/// Like [`encode`], calling `progress(levels_done, total_levels)` after each level.
pub fn encode_with_progress<P: FnMut(u32, u32)>(
    image: &RgbaImage,
    options: &EncodeOptions,
    progress: P,
) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    encode_to_writer(image, options, &mut out, progress)?;
    Ok(out)
}

pub fn encode_to_writer<W: Write, P: FnMut(u32, u32)>(
    image: &RgbaImage,
    options: &EncodeOptions,
    mut writer: W,
    progress: P,
) -> Result<(), CodecError> {
    encode_container(image, options, progress)?.write_to(&mut writer)
}

fn checked_dimension(what: &'static str, value: u32) -> Result<u16, CodecError> {
    u16::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .context(InvalidDimensionSnafu { what, value })
}

/// Builds the container for an image. The source image is never modified, flipping and
/// downsampling happen on a private copy.
pub fn encode_container<P: FnMut(u32, u32)>(
    image: &RgbaImage,
    options: &EncodeOptions,
    mut progress: P,
) -> Result<TextureContainer, CodecError> {
    let format = options.texture_format;
    let width = checked_dimension("image width", image.width())?;
    let height = checked_dimension("image height", image.height())?;

    match format.kind() {
        FormatKind::Indexed(indexed) => {
            ensure!(!options.generate_mipmaps, MipmapNotAllowedSnafu { format });

            let palette = Palette::build(image, indexed, options.palette_format);
            let (palette_width, palette_height) = palette.dimensions(options.palette_size_target);
            let data = encode_indexed(indexed, image, &palette);
            progress(1, 1);

            Ok(TextureContainer {
                header: Header {
                    format,
                    width,
                    height,
                    mipmap_count: 1,
                },
                palette: Some(PaletteSection {
                    header: PaletteHeader {
                        format: options.palette_format,
                        width: palette_width,
                        height: palette_height,
                    },
                    data: palette.to_bytes(),
                }),
                mipmaps: vec![data],
            })
        }
        FormatKind::Direct(direct) => {
            let count = if options.generate_mipmaps {
                mipmap_count(
                    image.width(),
                    image.height(),
                    options.mipmap_width_limit,
                    options.mipmap_height_limit,
                    true,
                )
            } else {
                1
            };

            let mut working = image.clone();
            imageops::flip_vertical_in_place(&mut working);

            let mut mipmaps = Vec::with_capacity(count as usize);
            for level in 0..count {
                if level > 0 {
                    working = downsample(&working);
                }
                mipmaps.push(encode_direct(direct, &working));
                progress(level + 1, count);
            }

            Ok(TextureContainer {
                header: Header {
                    format,
                    width,
                    height,
                    mipmap_count: count,
                },
                palette: None,
                mipmaps,
            })
        }
    }
}
