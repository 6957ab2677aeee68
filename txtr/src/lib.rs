//! Codec for TXTR texture containers.
//!
//! A TXTR file holds one texture in one of the eleven GX texture formats, optionally with a
//! palette (indexed formats) or a chain of mipmaps (direct formats). All integers are big-endian.
//!
//! # Layout
//!
//! ```plain
//! u32 texture format       see [`TextureFormat`]
//! u16 width                non-zero
//! u16 height               non-zero
//! u32 mipmap count         non-zero, exactly 1 for indexed formats
//!
//! indexed formats only:
//!     u32 palette format   see [`PaletteFormat`]
//!     u16 palette width    non-zero
//!     u16 palette height   non-zero
//!     u16[width * height]  palette entries
//!
//! for every mipmap level k:
//!     texture data of (width >> k) x (height >> k) pixels
//! ```
//!
//! Texture data is stored in tiles whose size depends on the format, see
//! [`TextureFormat::block_dimensions`]. Tiles that hang over the right or bottom edge are stored
//! in full. Direct formats store their rows bottom to top; this crate flips them so that decoded
//! images and images handed to the encoder are top to bottom. Indexed formats are stored top to
//! bottom.
//!
//! # Example
//!
//! ```
//! use txtr::{DecodeOptions, EncodeOptions, TextureFormat};
//!
//! let image = txtr::RgbaImage::from_pixel(16, 16, image::Rgba([0xFF, 0x00, 0x00, 0xFF]));
//! let options = EncodeOptions {
//!     generate_mipmaps: true,
//!     ..EncodeOptions::new(TextureFormat::RGB565)
//! };
//! let bytes = txtr::encode(&image, &options)?;
//!
//! let levels = txtr::decode(&bytes[..], &DecodeOptions { read_all_mipmaps: true })?;
//! assert_eq!(levels.len(), 5);
//! assert_eq!(levels[0], image);
//! # Ok::<(), txtr::CodecError>(())
//! ```

pub mod cmpr;
pub mod container;
pub mod decode;
pub mod encode;
mod error;
pub mod format;
pub mod mipmap;
pub mod palette;
pub mod pixel;
mod stream;
mod tiles;
pub mod utils;

pub use container::{Header, PaletteHeader, PaletteSection, TextureContainer};
pub use decode::{decode, decode_with_progress, DecodeOptions};
pub use encode::{encode, encode_to_writer, encode_with_progress, EncodeOptions};
pub use error::CodecError;
pub use format::{FormatKind, PaletteFormat, PaletteSizeTarget, TextureFormat};
pub use image::RgbaImage;

pub mod consts {
    /// Size of the texture header in bytes.
    pub const HEADER_SIZE: usize = 12;

    /// Size of the palette header of indexed formats in bytes.
    pub const PALETTE_HEADER_SIZE: usize = 8;

    /// Value of the palette entries past the last used one. Palettes are padded to a multiple of
    /// 16 entries.
    pub const PALETTE_SENTINEL: u16 = 0xFFFF;

    /// Layout selector of an RGB5A3 texel.
    ///
    /// ```plain
    /// opaque       | 15 | 14 13 12 11 10 | 9  8  7  6  5 | 4  3  2  1  0 |
    ///              |  1 |      red       |     green     |     blue      |
    ///
    /// translucent  | 15 | 14 13 12 | 11 10  9  8 | 7  6  5  4 | 3  2  1  0 |
    ///              |  0 |  alpha   |     red     |   green    |    blue    |
    /// ```
    ///
    /// - opaque: 5 bits each of red, green and blue
    /// - translucent: 3 bits of alpha, 4 bits each of red, green and blue
    pub const RGB5A3_OPAQUE_FLAG: u16 = 0b1000_0000_0000_0000;

    /// Direct RGB5A3 textures store pixels with an alpha above this value as opaque. 3-bit alpha
    /// values widen to at most `0xDB`, so decoded pixels encode to the same layout again.
    pub const RGB5A3_OPAQUE_THRESHOLD: u8 = 0xDF;

    /// RGB5A3 palettes store entries with an alpha above this value as opaque.
    pub const PALETTE_RGB5A3_OPAQUE_THRESHOLD: u8 = 0xDA;

    /// CMPR pixels with an alpha below this value are stored as transparent.
    pub const CMPR_ALPHA_CUTOFF: u8 = 0x80;
}
