//! Big-endian primitives over `std::io`.

use crate::error::{CodecError, IoSnafu, UnexpectedEndOfDataSnafu};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use snafu::{ensure, ResultExt};
use std::io::{self, Read, Write};

fn read_error(err: io::Error) -> CodecError {
    match err.kind() {
        io::ErrorKind::UnexpectedEof => CodecError::UnexpectedEndOfData,
        _ => CodecError::Io { source: err },
    }
}

pub(crate) trait ReadExt: Read + Sized {
    fn read_be_u16(&mut self) -> Result<u16, CodecError> {
        self.read_u16::<BigEndian>().map_err(read_error)
    }

    fn read_be_u32(&mut self) -> Result<u32, CodecError> {
        self.read_u32::<BigEndian>().map_err(read_error)
    }

    /// Reads exactly `len` bytes. The buffer only grows as data arrives, so a bogus length in a
    /// corrupt header fails with [`CodecError::UnexpectedEndOfData`] instead of allocating it.
    fn read_buffer(&mut self, len: usize) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        self.by_ref()
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(read_error)?;
        ensure!(buf.len() == len, UnexpectedEndOfDataSnafu);
        Ok(buf)
    }
}

impl<R: Read> ReadExt for R {}

pub(crate) trait WriteExt: Write + Sized {
    fn write_be_u16(&mut self, value: u16) -> Result<(), CodecError> {
        self.write_u16::<BigEndian>(value).context(IoSnafu)
    }

    fn write_be_u32(&mut self, value: u32) -> Result<(), CodecError> {
        self.write_u32::<BigEndian>(value).context(IoSnafu)
    }

    fn write_buffer(&mut self, data: &[u8]) -> Result<(), CodecError> {
        self.write_all(data).context(IoSnafu)
    }
}

impl<W: Write> WriteExt for W {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian() {
        let mut data: &[u8] = &[0x12, 0x34, 0xDE, 0xAD, 0xBE, 0xEF];
        assert_eq!(data.read_be_u16().unwrap(), 0x1234);
        assert_eq!(data.read_be_u32().unwrap(), 0xDEAD_BEEF);
        assert!(matches!(
            data.read_be_u16(),
            Err(CodecError::UnexpectedEndOfData)
        ));
    }

    #[test]
    fn short_buffer_is_end_of_data() {
        let mut data: &[u8] = &[1, 2, 3];
        assert!(matches!(
            data.read_buffer(4),
            Err(CodecError::UnexpectedEndOfData)
        ));

        let mut data: &[u8] = &[1, 2, 3, 4, 5];
        assert_eq!(data.read_buffer(4).unwrap(), [1, 2, 3, 4]);
        assert_eq!(data, [5]);
    }

    #[test]
    fn writes_big_endian() {
        let mut out = Vec::new();
        out.write_be_u32(0xA).unwrap();
        out.write_be_u16(0x0102).unwrap();
        out.write_buffer(&[9]).unwrap();
        assert_eq!(out, [0, 0, 0, 0xA, 1, 2, 9]);
    }
}
