use crate::format::TextureFormat;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CodecError {
    #[snafu(display("unsupported {what} format code 0x{code:X}"))]
    UnsupportedFormat { what: &'static str, code: u32 },

    #[snafu(display("invalid {what}: {value}"))]
    InvalidDimension { what: String, value: u64 },

    #[snafu(display("{format} is an indexed format and cannot carry mipmaps"))]
    MipmapNotAllowed { format: TextureFormat },

    #[snafu(display("palette of {size} bytes exceeds the maximum of {max} bytes"))]
    PaletteSizeExceeded { size: usize, max: usize },

    #[snafu(display("palette data is {actual} bytes, but its header declares {expected}"))]
    PaletteSizeMismatch { expected: usize, actual: usize },

    #[snafu(display("palette is empty"))]
    EmptyPalette,

    #[snafu(display("palette index {index} is out of range for a palette of {len} entries"))]
    PaletteIndexOutOfRange { index: usize, len: usize },

    #[snafu(display(
        "mipmap {level} holds {actual} bytes of pixel data, but its dimensions require {expected}"
    ))]
    MipmapSizeMismatch {
        level: u32,
        expected: usize,
        actual: usize,
    },

    #[snafu(display("header declares {declared} mipmaps, but {actual} were given"))]
    MipmapCountMismatch { declared: u32, actual: usize },

    #[snafu(display("{format} is a direct format and cannot carry a palette"))]
    UnexpectedPalette { format: TextureFormat },

    #[snafu(display("unexpected end of data"))]
    UnexpectedEndOfData,

    #[snafu(display("I/O error: {source}"))]
    Io { source: std::io::Error },
}
