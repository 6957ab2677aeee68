//! Texture and palette format codes and their geometry.

use crate::error::{CodecError, UnsupportedFormatSnafu};
use snafu::{OptionExt, Snafu};
use std::{fmt, str::FromStr};

/// Pixel format of the texture data, as stored in the first header word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TextureFormat {
    I4 = 0x0,
    I8 = 0x1,
    IA4 = 0x2,
    IA8 = 0x3,
    CI4 = 0x4,
    CI8 = 0x5,
    CI14X2 = 0x6,
    RGB565 = 0x7,
    RGB5A3 = 0x8,
    RGBA32 = 0x9,
    CMPR = 0xA,
}

/// Texture formats that store color directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectFormat {
    I4,
    I8,
    IA4,
    IA8,
    RGB565,
    RGB5A3,
    RGBA32,
    CMPR,
}

/// Texture formats that store palette indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexedFormat {
    CI4,
    CI8,
    CI14X2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Direct(DirectFormat),
    Indexed(IndexedFormat),
}

impl TextureFormat {
    pub const ALL: [TextureFormat; 11] = [
        TextureFormat::I4,
        TextureFormat::I8,
        TextureFormat::IA4,
        TextureFormat::IA8,
        TextureFormat::CI4,
        TextureFormat::CI8,
        TextureFormat::CI14X2,
        TextureFormat::RGB565,
        TextureFormat::RGB5A3,
        TextureFormat::RGBA32,
        TextureFormat::CMPR,
    ];

    pub const fn code(self) -> u32 {
        self as u32
    }

    pub const fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            0x0 => TextureFormat::I4,
            0x1 => TextureFormat::I8,
            0x2 => TextureFormat::IA4,
            0x3 => TextureFormat::IA8,
            0x4 => TextureFormat::CI4,
            0x5 => TextureFormat::CI8,
            0x6 => TextureFormat::CI14X2,
            0x7 => TextureFormat::RGB565,
            0x8 => TextureFormat::RGB5A3,
            0x9 => TextureFormat::RGBA32,
            0xA => TextureFormat::CMPR,
            _ => return None,
        })
    }

    pub const fn kind(self) -> FormatKind {
        use FormatKind::{Direct, Indexed};

        match self {
            TextureFormat::I4 => Direct(DirectFormat::I4),
            TextureFormat::I8 => Direct(DirectFormat::I8),
            TextureFormat::IA4 => Direct(DirectFormat::IA4),
            TextureFormat::IA8 => Direct(DirectFormat::IA8),
            TextureFormat::CI4 => Indexed(IndexedFormat::CI4),
            TextureFormat::CI8 => Indexed(IndexedFormat::CI8),
            TextureFormat::CI14X2 => Indexed(IndexedFormat::CI14X2),
            TextureFormat::RGB565 => Direct(DirectFormat::RGB565),
            TextureFormat::RGB5A3 => Direct(DirectFormat::RGB5A3),
            TextureFormat::RGBA32 => Direct(DirectFormat::RGBA32),
            TextureFormat::CMPR => Direct(DirectFormat::CMPR),
        }
    }

    pub const fn is_indexed(self) -> bool {
        matches!(self.kind(), FormatKind::Indexed(_))
    }

    /// Width and height of one tile in pixels.
    pub const fn block_dimensions(self) -> (u32, u32) {
        match self {
            TextureFormat::I4 | TextureFormat::CI4 | TextureFormat::CMPR => (8, 8),
            TextureFormat::I8 | TextureFormat::IA4 | TextureFormat::CI8 => (8, 4),
            TextureFormat::IA8
            | TextureFormat::CI14X2
            | TextureFormat::RGB565
            | TextureFormat::RGB5A3
            | TextureFormat::RGBA32 => (4, 4),
        }
    }

    /// Storage bits per pixel, including the unused bits of CI14X2 words.
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            TextureFormat::I4 | TextureFormat::CI4 | TextureFormat::CMPR => 4,
            TextureFormat::I8 | TextureFormat::IA4 | TextureFormat::CI8 => 8,
            TextureFormat::IA8
            | TextureFormat::CI14X2
            | TextureFormat::RGB565
            | TextureFormat::RGB5A3 => 16,
            TextureFormat::RGBA32 => 32,
        }
    }

    /// Size in bytes of one mipmap level, with both dimensions padded up to whole tiles.
    pub fn data_size(self, width: u32, height: u32) -> usize {
        let (block_width, block_height) = self.block_dimensions();
        let padded_width = width.div_ceil(block_width) as usize * block_width as usize;
        let padded_height = height.div_ceil(block_height) as usize * block_height as usize;
        padded_width * padded_height * self.bits_per_pixel() as usize / 8
    }

    pub const fn name(self) -> &'static str {
        match self {
            TextureFormat::I4 => "I4",
            TextureFormat::I8 => "I8",
            TextureFormat::IA4 => "IA4",
            TextureFormat::IA8 => "IA8",
            TextureFormat::CI4 => "CI4",
            TextureFormat::CI8 => "CI8",
            TextureFormat::CI14X2 => "CI14X2",
            TextureFormat::RGB565 => "RGB565",
            TextureFormat::RGB5A3 => "RGB5A3",
            TextureFormat::RGBA32 => "RGBA32",
            TextureFormat::CMPR => "CMPR",
        }
    }
}

impl DirectFormat {
    pub const fn texture_format(self) -> TextureFormat {
        match self {
            DirectFormat::I4 => TextureFormat::I4,
            DirectFormat::I8 => TextureFormat::I8,
            DirectFormat::IA4 => TextureFormat::IA4,
            DirectFormat::IA8 => TextureFormat::IA8,
            DirectFormat::RGB565 => TextureFormat::RGB565,
            DirectFormat::RGB5A3 => TextureFormat::RGB5A3,
            DirectFormat::RGBA32 => TextureFormat::RGBA32,
            DirectFormat::CMPR => TextureFormat::CMPR,
        }
    }
}

impl IndexedFormat {
    pub const fn texture_format(self) -> TextureFormat {
        match self {
            IndexedFormat::CI4 => TextureFormat::CI4,
            IndexedFormat::CI8 => TextureFormat::CI8,
            IndexedFormat::CI14X2 => TextureFormat::CI14X2,
        }
    }

    /// Maximum number of palette entries.
    pub const fn capacity(self) -> usize {
        match self {
            IndexedFormat::CI4 => 16,
            IndexedFormat::CI8 => 256,
            IndexedFormat::CI14X2 => 16384,
        }
    }

    /// Maximum palette size in bytes.
    pub const fn max_palette_size(self) -> usize {
        self.capacity() * 2
    }

    /// Pixels with an alpha below this value are left out of the palette and map to index 0.
    pub const fn alpha_threshold(self) -> u8 {
        match self {
            IndexedFormat::CI4 | IndexedFormat::CI8 => 25,
            IndexedFormat::CI14X2 => 1,
        }
    }
}

impl TryFrom<u32> for TextureFormat {
    type Error = CodecError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_code(code).context(UnsupportedFormatSnafu {
            what: "texture",
            code,
        })
    }
}

impl From<TextureFormat> for u32 {
    fn from(format: TextureFormat) -> Self {
        format.code()
    }
}

impl fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("unknown {what} format `{name}`"))]
pub struct ParseFormatError {
    what: &'static str,
    name: String,
}

impl FromStr for TextureFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextureFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .context(ParseFormatSnafu {
                what: "texture",
                name: s,
            })
    }
}

/// Encoding of the 16-bit palette entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PaletteFormat {
    IA8 = 0x0,
    RGB565 = 0x1,
    RGB5A3 = 0x2,
}

impl PaletteFormat {
    pub const ALL: [PaletteFormat; 3] = [
        PaletteFormat::IA8,
        PaletteFormat::RGB565,
        PaletteFormat::RGB5A3,
    ];

    pub const fn code(self) -> u32 {
        self as u32
    }

    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0x0 => Some(PaletteFormat::IA8),
            0x1 => Some(PaletteFormat::RGB565),
            0x2 => Some(PaletteFormat::RGB5A3),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PaletteFormat::IA8 => "IA8",
            PaletteFormat::RGB565 => "RGB565",
            PaletteFormat::RGB5A3 => "RGB5A3",
        }
    }
}

impl TryFrom<u32> for PaletteFormat {
    type Error = CodecError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_code(code).context(UnsupportedFormatSnafu {
            what: "palette",
            code,
        })
    }
}

impl From<PaletteFormat> for u32 {
    fn from(format: PaletteFormat) -> Self {
        format.code()
    }
}

impl fmt::Display for PaletteFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .context(ParseFormatSnafu {
                what: "palette",
                name: s,
            })
    }
}

/// Which palette header dimension holds the entry count. The other one is always 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteSizeTarget {
    #[default]
    Width,
    Height,
}

impl PaletteSizeTarget {
    /// Palette header `(width, height)` for a palette of `len` entries.
    pub const fn dimensions(self, len: u16) -> (u16, u16) {
        match self {
            PaletteSizeTarget::Width => (len, 1),
            PaletteSizeTarget::Height => (1, len),
        }
    }
}

impl FromStr for PaletteSizeTarget {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("width") {
            Ok(PaletteSizeTarget::Width)
        } else if s.eq_ignore_ascii_case("height") {
            Ok(PaletteSizeTarget::Height)
        } else {
            ParseFormatSnafu {
                what: "palette size target",
                name: s,
            }
            .fail()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for format in TextureFormat::ALL {
            assert_eq!(TextureFormat::try_from(format.code()).unwrap(), format);
        }
        for format in PaletteFormat::ALL {
            assert_eq!(PaletteFormat::try_from(format.code()).unwrap(), format);
        }
    }

    #[test]
    fn unknown_codes() {
        assert!(matches!(
            TextureFormat::try_from(0xB),
            Err(CodecError::UnsupportedFormat { code: 0xB, .. })
        ));
        assert!(matches!(
            PaletteFormat::try_from(3),
            Err(CodecError::UnsupportedFormat { code: 3, .. })
        ));
    }

    #[test]
    fn data_sizes_pad_to_whole_tiles() {
        assert_eq!(TextureFormat::I4.data_size(1, 1), 32);
        assert_eq!(TextureFormat::I8.data_size(8, 4), 32);
        assert_eq!(TextureFormat::RGB565.data_size(4, 4), 32);
        assert_eq!(TextureFormat::RGBA32.data_size(5, 5), 256);
        assert_eq!(TextureFormat::CI14X2.data_size(4, 4), 32);
        assert_eq!(TextureFormat::CMPR.data_size(8, 8), 32);
        assert_eq!(TextureFormat::CMPR.data_size(9, 1), 64);
    }

    #[test]
    fn kind_round_trip() {
        for format in TextureFormat::ALL {
            let back = match format.kind() {
                FormatKind::Direct(direct) => direct.texture_format(),
                FormatKind::Indexed(indexed) => indexed.texture_format(),
            };
            assert_eq!(back, format);
        }
    }

    #[test]
    fn indexed_split() {
        let indexed: Vec<_> = TextureFormat::ALL
            .into_iter()
            .filter(|format| format.is_indexed())
            .collect();
        assert_eq!(
            indexed,
            [TextureFormat::CI4, TextureFormat::CI8, TextureFormat::CI14X2]
        );
        assert_eq!(IndexedFormat::CI8.max_palette_size(), 512);
    }

    #[test]
    fn parse_names() {
        assert_eq!("ci14x2".parse::<TextureFormat>().unwrap(), TextureFormat::CI14X2);
        assert_eq!("rgb5a3".parse::<PaletteFormat>().unwrap(), PaletteFormat::RGB5A3);
        assert_eq!(
            "Height".parse::<PaletteSizeTarget>().unwrap(),
            PaletteSizeTarget::Height
        );
        assert!("DXT1".parse::<TextureFormat>().is_err());
        assert_eq!(TextureFormat::CMPR.to_string(), "CMPR");
    }
}
