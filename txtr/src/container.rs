//! Raw TXTR containers, parsed and serialized without touching pixel data.

use crate::{
    error::{
        CodecError, EmptyPaletteSnafu, InvalidDimensionSnafu, MipmapCountMismatchSnafu,
        MipmapNotAllowedSnafu, MipmapSizeMismatchSnafu, PaletteSizeExceededSnafu,
        PaletteSizeMismatchSnafu,
        UnexpectedPaletteSnafu,
    },
    format::{FormatKind, IndexedFormat, PaletteFormat, TextureFormat},
    mipmap::level_dimensions,
    palette::palette_colors,
    stream::{ReadExt, WriteExt},
};
use snafu::{ensure, OptionExt};
use std::io::{Read, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub format: TextureFormat,
    pub width: u16,
    pub height: u16,
    pub mipmap_count: u32,
}

impl Header {
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, CodecError> {
        let format = TextureFormat::try_from(reader.read_be_u32()?)?;
        let width = reader.read_be_u16()?;
        let height = reader.read_be_u16()?;
        let mipmap_count = reader.read_be_u32()?;

        let header = Header {
            format,
            width,
            height,
            mipmap_count,
        };
        header.validate()?;
        Ok(header)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.validate()?;
        writer.write_be_u32(self.format.code())?;
        writer.write_be_u16(self.width)?;
        writer.write_be_u16(self.height)?;
        writer.write_be_u32(self.mipmap_count)
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        ensure!(
            self.width > 0,
            InvalidDimensionSnafu {
                what: "texture width",
                value: self.width,
            }
        );
        ensure!(
            self.height > 0,
            InvalidDimensionSnafu {
                what: "texture height",
                value: self.height,
            }
        );
        ensure!(
            self.mipmap_count > 0,
            InvalidDimensionSnafu {
                what: "mipmap count",
                value: self.mipmap_count,
            }
        );
        ensure!(
            !self.format.is_indexed() || self.mipmap_count == 1,
            MipmapNotAllowedSnafu {
                format: self.format
            }
        );
        Ok(())
    }

    /// Dimensions of mipmap `level`, failing once either of them reaches 0.
    pub fn level_dimensions(&self, level: u32) -> Result<(u32, u32), CodecError> {
        let (width, height) = (u32::from(self.width), u32::from(self.height));
        level_dimensions(width, height, level).with_context(|| InvalidDimensionSnafu {
            what: format!("size of mipmap {level} for a {width}x{height} texture"),
            value: 0u64,
        })
    }

    /// Byte size of mipmap `level`.
    pub fn level_size(&self, level: u32) -> Result<usize, CodecError> {
        let (width, height) = self.level_dimensions(level)?;
        Ok(self.format.data_size(width, height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteHeader {
    pub format: PaletteFormat,
    pub width: u16,
    pub height: u16,
}

impl PaletteHeader {
    pub fn read_from<R: Read>(
        reader: &mut R,
        texture_format: IndexedFormat,
    ) -> Result<Self, CodecError> {
        let format = PaletteFormat::try_from(reader.read_be_u32()?)?;
        let width = reader.read_be_u16()?;
        let height = reader.read_be_u16()?;

        let header = PaletteHeader {
            format,
            width,
            height,
        };
        header.validate(texture_format)?;
        Ok(header)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), CodecError> {
        writer.write_be_u32(self.format.code())?;
        writer.write_be_u16(self.width)?;
        writer.write_be_u16(self.height)
    }

    pub fn validate(&self, texture_format: IndexedFormat) -> Result<(), CodecError> {
        ensure!(
            self.width > 0,
            InvalidDimensionSnafu {
                what: "palette width",
                value: self.width,
            }
        );
        ensure!(
            self.height > 0,
            InvalidDimensionSnafu {
                what: "palette height",
                value: self.height,
            }
        );

        let size = self.data_size();
        let max = texture_format.max_palette_size();
        ensure!(size <= max, PaletteSizeExceededSnafu { size, max });
        ensure!(size > 0, EmptyPaletteSnafu);
        Ok(())
    }

    pub fn entry_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Byte size of the palette data.
    pub fn data_size(&self) -> usize {
        self.entry_count() * 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteSection {
    pub header: PaletteHeader,
    /// Big-endian 16-bit entries.
    pub data: Vec<u8>,
}

impl PaletteSection {
    pub fn read_from<R: Read>(
        reader: &mut R,
        texture_format: IndexedFormat,
    ) -> Result<Self, CodecError> {
        let header = PaletteHeader::read_from(reader, texture_format)?;
        let data = reader.read_buffer(header.data_size())?;
        Ok(Self { header, data })
    }

    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        texture_format: IndexedFormat,
    ) -> Result<(), CodecError> {
        self.validate(texture_format)?;
        self.header.write_to(writer)?;
        writer.write_buffer(&self.data)
    }

    pub fn validate(&self, texture_format: IndexedFormat) -> Result<(), CodecError> {
        self.header.validate(texture_format)?;
        let expected = self.header.data_size();
        ensure!(
            self.data.len() == expected,
            PaletteSizeMismatchSnafu {
                expected,
                actual: self.data.len(),
            }
        );
        Ok(())
    }

    /// Palette entries expanded to colors.
    pub fn colors(&self) -> Vec<[u8; 4]> {
        palette_colors(self.header.format, &self.data)
    }
}

/// A TXTR file: header, the palette of indexed formats, and the raw data of each mipmap level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureContainer {
    pub header: Header,
    pub palette: Option<PaletteSection>,
    /// Data of the levels that were read, base level first.
    pub mipmaps: Vec<Vec<u8>>,
}

impl TextureContainer {
    /// Reads a container. Only the base level is read unless `read_all_mipmaps` is set, anything
    /// after the last level read is left in the reader.
    pub fn read_from<R: Read>(reader: &mut R, read_all_mipmaps: bool) -> Result<Self, CodecError> {
        let header = Header::read_from(reader)?;
        let palette = match header.format.kind() {
            FormatKind::Indexed(indexed) => Some(PaletteSection::read_from(reader, indexed)?),
            FormatKind::Direct(_) => None,
        };

        let levels = if read_all_mipmaps {
            header.mipmap_count
        } else {
            1
        };
        let mut mipmaps = Vec::new();
        for level in 0..levels {
            let size = header.level_size(level)?;
            mipmaps.push(reader.read_buffer(size)?);
        }

        Ok(Self {
            header,
            palette,
            mipmaps,
        })
    }

    /// Writes a complete container, every declared level must be present.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), CodecError> {
        self.validate()?;
        self.header.write_to(writer)?;
        if let (FormatKind::Indexed(indexed), Some(palette)) =
            (self.header.format.kind(), &self.palette)
        {
            palette.write_to(writer, indexed)?;
        }
        for data in &self.mipmaps {
            writer.write_buffer(data)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        let header = &self.header;
        header.validate()?;

        match (header.format.kind(), &self.palette) {
            (FormatKind::Indexed(indexed), Some(palette)) => palette.validate(indexed)?,
            (FormatKind::Indexed(_), None) => return EmptyPaletteSnafu.fail(),
            (FormatKind::Direct(_), Some(_)) => {
                return UnexpectedPaletteSnafu {
                    format: header.format,
                }
                .fail()
            }
            (FormatKind::Direct(_), None) => {}
        }

        ensure!(
            self.mipmaps.len() == header.mipmap_count as usize,
            MipmapCountMismatchSnafu {
                declared: header.mipmap_count,
                actual: self.mipmaps.len(),
            }
        );
        for (level, data) in (0u32..).zip(&self.mipmaps) {
            let expected = header.level_size(level)?;
            ensure!(
                data.len() == expected,
                MipmapSizeMismatchSnafu {
                    level,
                    expected,
                    actual: data.len(),
                }
            );
        }
        Ok(())
    }
}
