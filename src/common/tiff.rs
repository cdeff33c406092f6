use arrayvec::ArrayVec;
use tracing::{trace, warn};

use crate::options::MAX_DIRECTORY_ENTRIES;
use crate::traits::ByteSource;
use crate::types::{Error, Result};
use crate::utils::{ByteOrderReadExt, Endianness};

/// Size of one directory entry on disk.
pub const ENTRY_SIZE: usize = 12;

// field types
pub const ASCII: u16 = 2;
pub const SHORT: u16 = 3;
pub const LONG: u16 = 4;
pub const RATIONAL: u16 = 5;
pub const SBYTE: u16 = 6;
pub const UNDEFINED: u16 = 7;
pub const SRATIONAL: u16 = 10;

/// One 12-byte entry of an image file directory.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct DirectoryEntry {
    pub tag: u16,
    pub field_type: u16,
    pub count: u32,
    /// The value itself when it fits, otherwise the offset of the value list.
    pub value: [u8; 4],
}

impl DirectoryEntry {
    fn parse(mut r: &[u8], order: Endianness) -> Result<DirectoryEntry> {
        let tag = r.read_u16_in(order).map_err(if_eof!("when reading entry tag"))?;
        let field_type = r.read_u16_in(order).map_err(if_eof!("when reading entry type"))?;
        let count = r.read_u32_in(order).map_err(if_eof!("when reading entry count"))?;
        let mut value = [0u8; 4];
        value.copy_from_slice(r.get(..4).ok_or_else(|| truncated!("when reading entry value"))?);
        Ok(DirectoryEntry { tag, field_type, count, value })
    }

    /// Resolves the entry to a single integer.
    ///
    /// Entries with more than one value are read as the offset of their value
    /// list. Rationals and strings also yield their first 32-bit word rather
    /// than being resolved.
    pub fn value(&self, order: Endianness) -> i64 {
        let field_type = if self.count > 1 { LONG } else { self.field_type };
        match field_type {
            SHORT => order.read_u16(&self.value) as i64,
            LONG | UNDEFINED => order.read_u32(&self.value) as i64,
            SBYTE => self.value[0] as i8 as i64,
            ASCII | RATIONAL | SRATIONAL => order.read_u32(&self.value) as i64,
            _ => 0,
        }
    }

    /// The value field read as an offset into the file.
    #[inline]
    pub fn offset(&self, order: Endianness) -> u64 {
        order.read_u32(&self.value) as u64
    }
}

pub type Entries = ArrayVec<DirectoryEntry, MAX_DIRECTORY_ENTRIES>;

/// Reads the first image file directory of a TIFF stream.
///
/// `header` holds the start of the file, including the byte order mark and
/// the offset of the first directory. At most `limit` entries are returned;
/// entries cut off by the end of the file are dropped.
pub fn read_first_directory<S: ?Sized + ByteSource>(
    header: &[u8],
    src: &mut S,
    file_size: u64,
    limit: usize,
) -> Result<(Endianness, Entries)> {
    let order = header
        .get(..2)
        .and_then(Endianness::from_mark)
        .ok_or_else(|| truncated!("when reading byte order mark"))?;
    let directory_offset = order.u32_at(header, 4, "first directory offset")? as u64;
    if directory_offset >= file_size {
        return Err(truncated!(
            "first directory offset {} is past end of file ({} bytes)",
            directory_offset, file_size
        ));
    }

    let limit = limit.min(MAX_DIRECTORY_ENTRIES);
    let data = src.read_at(directory_offset, 2 + limit * ENTRY_SIZE)?;
    let declared = order.u16_at(&data, 0, "number of directory entries")? as usize;
    let available = (data.len() - 2) / ENTRY_SIZE;
    let count = declared.min(limit).min(available);
    if count < declared {
        warn!(declared, read = count, "directory entry count clamped");
    }

    let mut entries = Entries::new();
    for chunk in data[2..].chunks_exact(ENTRY_SIZE).take(count) {
        let entry = DirectoryEntry::parse(chunk, order)?;
        trace!(tag = entry.tag, field_type = entry.field_type, count = entry.count, "directory entry");
        entries.push(entry);
    }
    Ok((order, entries))
}

/// Reads the first 16-bit value of an out-of-line list.
pub fn read_first_short<S: ?Sized + ByteSource>(
    src: &mut S,
    order: Endianness,
    entry: &DirectoryEntry,
    file_size: u64,
) -> Result<u16> {
    let offset = entry.offset(order);
    if offset >= file_size {
        return Err(Error::OutOfBoundsOffset { offset, size: file_size });
    }
    let data = src.read_at(offset, 2)?;
    if data.len() < 2 {
        return Err(Error::OutOfBoundsOffset { offset, size: file_size });
    }
    Ok(order.read_u16(&data))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn entry(field_type: u16, count: u32, value: [u8; 4]) -> DirectoryEntry {
        DirectoryEntry { tag: 256, field_type, count, value }
    }

    #[test]
    fn test_value_by_type() {
        let le = Endianness::Little;
        assert_eq!(entry(SHORT, 1, [0x80, 0x02, 0, 0]).value(le), 640);
        assert_eq!(entry(LONG, 1, [0x00, 0x00, 0x01, 0x00]).value(le), 65536);
        assert_eq!(entry(UNDEFINED, 1, [1, 0, 0, 0]).value(le), 1);
        assert_eq!(entry(SBYTE, 1, [0xfe, 0, 0, 0]).value(le), -2);
        assert_eq!(entry(RATIONAL, 1, [8, 0, 0, 0]).value(le), 8);
        assert_eq!(entry(ASCII, 1, [0x10, 0, 0, 0]).value(le), 16);
        assert_eq!(entry(1, 1, [5, 0, 0, 0]).value(le), 0);
    }

    #[test]
    fn test_value_big_endian_short_is_left_justified() {
        assert_eq!(entry(SHORT, 1, [0x01, 0xe0, 0, 0]).value(Endianness::Big), 480);
    }

    #[test]
    fn test_value_list_is_an_offset() {
        let e = entry(SHORT, 3, [0x08, 0x01, 0, 0]);
        assert_eq!(e.value(Endianness::Little), 0x108);
        assert_eq!(e.offset(Endianness::Little), 0x108);
    }

    #[test]
    fn test_read_directory_clamps_to_file() {
        let mut data = b"II*\0\x08\0\0\0".to_vec();
        data.extend_from_slice(&5u16.to_le_bytes());
        // only one complete entry follows
        data.extend_from_slice(&[0x00, 0x01, 0x03, 0x00, 1, 0, 0, 0, 0x10, 0, 0, 0]);
        data.extend_from_slice(&[0x01, 0x01, 0x03]);
        let size = data.len() as u64;
        let header = data.clone();
        let (order, entries) = read_first_directory(&header, &mut Cursor::new(data), size, 256).unwrap();
        assert_eq!(order, Endianness::Little);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tag, 256);
        assert_eq!(entries[0].value(order), 16);
    }

    #[test]
    fn test_read_directory_respects_limit() {
        let mut data = b"MM\0*\0\0\0\x08".to_vec();
        data.extend_from_slice(&3u16.to_be_bytes());
        for tag in 256u16..259 {
            data.extend_from_slice(&tag.to_be_bytes());
            data.extend_from_slice(&[0, 3, 0, 0, 0, 1, 0, 1, 0, 0]);
        }
        let size = data.len() as u64;
        let header = data.clone();
        let (_, entries) = read_first_directory(&header, &mut Cursor::new(data), size, 2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].tag, 257);
    }

    #[test]
    fn test_directory_past_end_of_file() {
        let data = b"II*\0\xff\0\0\0".to_vec();
        let header = data.clone();
        assert!(read_first_directory(&header, &mut Cursor::new(data), 8, 256).is_err());
    }

    #[test]
    fn test_first_short_out_of_bounds() {
        let e = entry(SHORT, 3, [0xff, 0, 0, 0]);
        let err = read_first_short(&mut Cursor::new(vec![0u8; 16]), Endianness::Little, &e, 16).unwrap_err();
        assert!(matches!(err, Error::OutOfBoundsOffset { offset: 255, size: 16 }));
    }
}
