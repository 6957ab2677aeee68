use core::slice;
use txtr::{
    CodecError, DecodeOptions, EncodeOptions, Header, PaletteFormat, PaletteSizeTarget,
    RgbaImage, TextureFormat,
};

pub const TXTR_STATUS_OK: i32 = 0;
pub const TXTR_STATUS_UNSUPPORTED_FORMAT: i32 = 1;
pub const TXTR_STATUS_INVALID_DIMENSION: i32 = 2;
pub const TXTR_STATUS_MIPMAP_NOT_ALLOWED: i32 = 3;
pub const TXTR_STATUS_PALETTE_SIZE_EXCEEDED: i32 = 4;
pub const TXTR_STATUS_EMPTY_PALETTE: i32 = 5;
pub const TXTR_STATUS_UNEXPECTED_END_OF_DATA: i32 = 6;
pub const TXTR_STATUS_PALETTE_INDEX_OUT_OF_RANGE: i32 = 7;
/// Any other failure, including I/O errors and inconsistent containers.
pub const TXTR_STATUS_OTHER: i32 = 8;
pub const TXTR_STATUS_NULL_POINTER: i32 = -1;
pub const TXTR_STATUS_BUFFER_TOO_SMALL: i32 = -2;
pub const TXTR_STATUS_INVALID_ARGUMENT: i32 = -3;

/// Called with `(levels_done, total_levels)` after each mipmap level.
pub type TxtrProgressCallback = Option<unsafe extern "C" fn(done: u32, total: u32)>;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct TxtrHeader {
    pub texture_format: u32,
    pub width: u16,
    pub height: u16,
    pub mipmap_count: u32,
}

impl From<Header> for TxtrHeader {
    fn from(header: Header) -> Self {
        Self {
            texture_format: header.format.code(),
            width: header.width,
            height: header.height,
            mipmap_count: header.mipmap_count,
        }
    }
}

fn status(err: &CodecError) -> i32 {
    match err {
        CodecError::UnsupportedFormat { .. } => TXTR_STATUS_UNSUPPORTED_FORMAT,
        CodecError::InvalidDimension { .. } => TXTR_STATUS_INVALID_DIMENSION,
        CodecError::MipmapNotAllowed { .. } => TXTR_STATUS_MIPMAP_NOT_ALLOWED,
        CodecError::PaletteSizeExceeded { .. } => TXTR_STATUS_PALETTE_SIZE_EXCEEDED,
        CodecError::EmptyPalette => TXTR_STATUS_EMPTY_PALETTE,
        CodecError::UnexpectedEndOfData => TXTR_STATUS_UNEXPECTED_END_OF_DATA,
        CodecError::PaletteIndexOutOfRange { .. } => TXTR_STATUS_PALETTE_INDEX_OUT_OF_RANGE,
        CodecError::PaletteSizeMismatch { .. }
        | CodecError::MipmapSizeMismatch { .. }
        | CodecError::MipmapCountMismatch { .. }
        | CodecError::UnexpectedPalette { .. }
        | CodecError::Io { .. } => TXTR_STATUS_OTHER,
    }
}

fn report(progress: TxtrProgressCallback) -> impl FnMut(u32, u32) {
    move |done, total| {
        if let Some(callback) = progress {
            unsafe { callback(done, total) }
        }
    }
}

/// Reads the header of a TXTR file.
///
/// - `input`: Pointer to the TXTR file
/// - `input_len`: Length of the input buffer, in bytes
/// - `header`: Receives the header
///
/// Returns `TXTR_STATUS_OK` or an error status.
///
/// # Safety
///
/// `input` must be valid for `input_len` bytes of reads, `header` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn txtr_read_header(
    input: *const u8,
    input_len: usize,
    header: *mut TxtrHeader,
) -> i32 {
    if input.is_null() || header.is_null() {
        return TXTR_STATUS_NULL_POINTER;
    }
    let mut input = unsafe { slice::from_raw_parts(input, input_len) };

    match Header::read_from(&mut input) {
        Ok(parsed) => {
            unsafe { header.write(parsed.into()) };
            TXTR_STATUS_OK
        }
        Err(e) => status(&e),
    }
}

/// Decodes one mipmap level of a TXTR file into RGBA8 pixels, rows top to bottom.
///
/// - `input`: Pointer to the TXTR file
/// - `input_len`: Length of the input buffer, in bytes
/// - `level`: Mipmap level to decode, 0 is the base level
/// - `output`: Pointer to the output buffer
/// - `output_len`: Length of the output buffer, in bytes
/// - `width`, `height`: Receive the dimensions of the decoded level, may be null
/// - `progress`: Optional progress callback
///
/// Returns `TXTR_STATUS_OK`, `TXTR_STATUS_BUFFER_TOO_SMALL` if `output` can't hold
/// `width * height * 4` bytes (the dimensions are still reported), or an error status.
///
/// # Safety
///
/// `input` must be valid for `input_len` bytes of reads, `output` for `output_len` bytes of
/// writes. `width` and `height` must each be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn txtr_decode_rgba(
    input: *const u8,
    input_len: usize,
    level: u32,
    output: *mut u8,
    output_len: usize,
    width: *mut u32,
    height: *mut u32,
    progress: TxtrProgressCallback,
) -> i32 {
    if input.is_null() || output.is_null() {
        return TXTR_STATUS_NULL_POINTER;
    }
    let input = unsafe { slice::from_raw_parts(input, input_len) };

    let options = DecodeOptions {
        read_all_mipmaps: level > 0,
    };
    let mut levels = match txtr::decode_with_progress(input, &options, report(progress)) {
        Ok(levels) => levels,
        Err(e) => return status(&e),
    };
    if level as usize >= levels.len() {
        return TXTR_STATUS_INVALID_ARGUMENT;
    }
    let image = levels.swap_remove(level as usize);

    if !width.is_null() {
        unsafe { width.write(image.width()) };
    }
    if !height.is_null() {
        unsafe { height.write(image.height()) };
    }

    let pixels = image.as_raw();
    if output_len < pixels.len() {
        return TXTR_STATUS_BUFFER_TOO_SMALL;
    }
    let output = unsafe { slice::from_raw_parts_mut(output, pixels.len()) };
    output.copy_from_slice(pixels);

    TXTR_STATUS_OK
}

/// Encodes RGBA8 pixels (rows top to bottom) as a TXTR file.
///
/// - `pixels`: Pointer to `width * height * 4` bytes of pixel data
/// - `texture_format`, `palette_format`: Format codes as stored in the container
/// - `palette_size_target`: 0 to store the palette length as its width, 1 as its height
/// - `generate_mipmaps`, `width_limit`, `height_limit`: Mipmap chain generation
/// - `output`: Pointer to the output buffer, may be null if `output_capacity` is 0
/// - `output_capacity`: Length of the output buffer, in bytes
/// - `written`: Receives the size of the TXTR file
/// - `progress`: Optional progress callback
///
/// Returns `TXTR_STATUS_OK`, `TXTR_STATUS_BUFFER_TOO_SMALL` if the file doesn't fit (`written`
/// then holds the required size), or an error status.
///
/// # Safety
///
/// `pixels` must be valid for `width * height * 4` bytes of reads, `output` for
/// `output_capacity` bytes of writes, and `written` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn txtr_encode_rgba(
    pixels: *const u8,
    width: u32,
    height: u32,
    texture_format: u32,
    palette_format: u32,
    palette_size_target: u32,
    generate_mipmaps: bool,
    width_limit: u32,
    height_limit: u32,
    output: *mut u8,
    output_capacity: usize,
    written: *mut usize,
    progress: TxtrProgressCallback,
) -> i32 {
    if pixels.is_null() || written.is_null() || (output.is_null() && output_capacity > 0) {
        return TXTR_STATUS_NULL_POINTER;
    }

    let texture_format = match TextureFormat::try_from(texture_format) {
        Ok(format) => format,
        Err(e) => return status(&e),
    };
    let palette_format = match PaletteFormat::try_from(palette_format) {
        Ok(format) => format,
        Err(e) => return status(&e),
    };
    let palette_size_target = match palette_size_target {
        0 => PaletteSizeTarget::Width,
        1 => PaletteSizeTarget::Height,
        _ => return TXTR_STATUS_INVALID_ARGUMENT,
    };

    let Some(len) = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
    else {
        return TXTR_STATUS_INVALID_DIMENSION;
    };
    let pixels = unsafe { slice::from_raw_parts(pixels, len) };
    let Some(image) = RgbaImage::from_raw(width, height, pixels.to_vec()) else {
        return TXTR_STATUS_INVALID_DIMENSION;
    };

    let options = EncodeOptions {
        texture_format,
        palette_format,
        palette_size_target,
        generate_mipmaps,
        mipmap_width_limit: width_limit,
        mipmap_height_limit: height_limit,
    };
    let bytes = match txtr::encode_with_progress(&image, &options, report(progress)) {
        Ok(bytes) => bytes,
        Err(e) => return status(&e),
    };

    unsafe { written.write(bytes.len()) };
    if output_capacity < bytes.len() {
        return TXTR_STATUS_BUFFER_TOO_SMALL;
    }
    let output = unsafe { slice::from_raw_parts_mut(output, bytes.len()) };
    output.copy_from_slice(&bytes);

    TXTR_STATUS_OK
}
