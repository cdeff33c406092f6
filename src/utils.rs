use std::io::{self, Read};

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};

use crate::types::Result;

/// Byte order selected at run time, e.g. from a TIFF byte order mark.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Maps a `II`/`MM` byte order mark to the corresponding byte order.
    pub fn from_mark(mark: &[u8]) -> Option<Endianness> {
        match mark {
            b"II" => Some(Endianness::Little),
            b"MM" => Some(Endianness::Big),
            _ => None,
        }
    }

    #[inline]
    pub fn read_u16(self, buf: &[u8]) -> u16 {
        match self {
            Endianness::Little => LittleEndian::read_u16(buf),
            Endianness::Big => BigEndian::read_u16(buf),
        }
    }

    #[inline]
    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endianness::Little => LittleEndian::read_u32(buf),
            Endianness::Big => BigEndian::read_u32(buf),
        }
    }

    pub fn u16_at(self, buf: &[u8], offset: usize, what: &'static str) -> Result<u16> {
        slice_at(buf, offset, 2, what).map(|b| self.read_u16(b))
    }

    pub fn u32_at(self, buf: &[u8], offset: usize, what: &'static str) -> Result<u32> {
        slice_at(buf, offset, 4, what).map(|b| self.read_u32(b))
    }
}

pub trait ByteOrderReadExt: Read {
    fn read_u16_in(&mut self, order: Endianness) -> io::Result<u16> {
        match order {
            Endianness::Little => self.read_u16::<LittleEndian>(),
            Endianness::Big => self.read_u16::<BigEndian>(),
        }
    }

    fn read_u32_in(&mut self, order: Endianness) -> io::Result<u32> {
        match order {
            Endianness::Little => self.read_u32::<LittleEndian>(),
            Endianness::Big => self.read_u32::<BigEndian>(),
        }
    }
}

impl<R: Read + ?Sized> ByteOrderReadExt for R {}

/// Returns `len` bytes starting at `offset`, or a truncation error naming `what`.
pub fn slice_at<'a>(buf: &'a [u8], offset: usize, len: usize, what: &'static str) -> Result<&'a [u8]> {
    offset
        .checked_add(len)
        .and_then(|end| buf.get(offset..end))
        .ok_or_else(|| truncated!("when reading {} at offset {}", what, offset))
}

#[inline]
pub fn u8_at(buf: &[u8], offset: usize, what: &'static str) -> Result<u8> {
    slice_at(buf, offset, 1, what).map(|b| b[0])
}

#[inline]
pub fn le_u16_at(buf: &[u8], offset: usize, what: &'static str) -> Result<u16> {
    Endianness::Little.u16_at(buf, offset, what)
}

#[inline]
pub fn be_u16_at(buf: &[u8], offset: usize, what: &'static str) -> Result<u16> {
    Endianness::Big.u16_at(buf, offset, what)
}

#[inline]
pub fn be_u32_at(buf: &[u8], offset: usize, what: &'static str) -> Result<u32> {
    Endianness::Big.u32_at(buf, offset, what)
}

/// Reads a run of ASCII digits starting at `*cursor` as a decimal number.
///
/// The cursor ends up one byte past the end of the digit run, skipping the
/// delimiter that follows it. Returns 0 when there are no digits at the
/// cursor. The value saturates at `u32::MAX` instead of overflowing.
pub fn parse_number(buf: &[u8], cursor: &mut usize) -> u32 {
    let mut value = 0u32;
    let mut pos = *cursor;
    while let Some(&b) = buf.get(pos) {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add((b - b'0') as u32);
        pos += 1;
    }
    *cursor = pos + 1;
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        let buf = b"640 480\n";
        let mut cursor = 0;
        assert_eq!(parse_number(buf, &mut cursor), 640);
        assert_eq!(cursor, 4);
        assert_eq!(parse_number(buf, &mut cursor), 480);
        assert_eq!(cursor, 8);
    }

    #[test]
    fn test_parse_number_without_digits() {
        let mut cursor = 0;
        assert_eq!(parse_number(b" 12", &mut cursor), 0);
        assert_eq!(cursor, 1);
        assert_eq!(parse_number(b" 12", &mut cursor), 12);
    }

    #[test]
    fn test_parse_number_saturates() {
        let mut cursor = 0;
        assert_eq!(parse_number(b"99999999999999999999,", &mut cursor), u32::MAX);
        assert_eq!(cursor, 21);
    }

    #[test]
    fn test_parse_number_at_end_of_buffer() {
        let mut cursor = 3;
        assert_eq!(parse_number(b"123", &mut cursor), 0);
        assert_eq!(cursor, 4);
    }

    #[test]
    fn test_fixed_offset_reads() {
        let buf = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(le_u16_at(&buf, 0, "x").unwrap(), 0x3412);
        assert_eq!(be_u16_at(&buf, 2, "x").unwrap(), 0x5678);
        assert_eq!(be_u32_at(&buf, 0, "x").unwrap(), 0x12345678);
        assert_eq!(Endianness::Little.u32_at(&buf, 0, "x").unwrap(), 0x78563412);
        assert!(be_u32_at(&buf, 1, "x").is_err());
        assert!(u8_at(&buf, 4, "x").is_err());
        assert!(slice_at(&buf, usize::MAX, 2, "x").is_err());
    }

    #[test]
    fn test_endianness_from_mark() {
        assert_eq!(Endianness::from_mark(b"II"), Some(Endianness::Little));
        assert_eq!(Endianness::from_mark(b"MM"), Some(Endianness::Big));
        assert_eq!(Endianness::from_mark(b"IM"), None);
    }
}
