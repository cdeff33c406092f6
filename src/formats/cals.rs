//! CALS raster (MIL-R-28002) header.
//!
//! The header is a sequence of 128-byte ASCII records. Only the record type
//! and the `rpelcnt` record with the pixel counts are looked at.

use tracing::debug;

use crate::info::{Compression, HeaderInfo};
use crate::sniff::Format;
use crate::traits::ByteSource;
use crate::types::Result;
use crate::utils::parse_number;

const RECORD_TYPE_OFFSET: u64 = 750;
/// Start of the `rpelcnt` record.
const PIXEL_COUNT_RECORD: u64 = 1024;
const PIXEL_COUNT_LABEL: &[u8] = b"rpelcnt:";
/// Label plus the blank which follows it.
const PIXEL_COUNT_VALUES: usize = 9;

pub fn load<S: ?Sized + ByteSource>(src: &mut S) -> Result<HeaderInfo> {
    let mut info = HeaderInfo::new(Format::Cals);
    info.compression = Compression::G4;
    info.bits_per_pixel = 1;

    let record_type = src.read_at(RECORD_TYPE_OFFSET, 1)?;
    let record_type = *record_type
        .first()
        .ok_or_else(|| truncated!("when reading CALS record type at offset {}", RECORD_TYPE_OFFSET))?;

    let (width, height) = if record_type == b'1' {
        // type 1 files are trusted to have the label in place
        let offset = PIXEL_COUNT_RECORD + PIXEL_COUNT_VALUES as u64;
        let values = src.read_at(offset, 256)?;
        if values.is_empty() {
            return Err(truncated!("when reading CALS pixel count record at offset {}", offset));
        }
        let mut cursor = 0;
        (parse_number(&values, &mut cursor), parse_number(&values, &mut cursor))
    } else {
        let record = src.read_at(PIXEL_COUNT_RECORD, 128)?;
        if record.len() < PIXEL_COUNT_LABEL.len() {
            return Err(truncated!(
                "when reading CALS pixel count record at offset {}",
                PIXEL_COUNT_RECORD
            ));
        }
        if record.starts_with(PIXEL_COUNT_LABEL) {
            let mut cursor = PIXEL_COUNT_VALUES;
            (parse_number(&record, &mut cursor), parse_number(&record, &mut cursor))
        } else {
            debug!("CALS type 2 header without rpelcnt record");
            (0, 0)
        }
    };

    info.dimensions = (width, height).into();
    Ok(info)
}
