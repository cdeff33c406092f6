//! Windows and OS/2 bitmap headers.

use crate::info::{Compression, HeaderInfo};
use crate::sniff::Format;
use crate::types::Result;
use crate::utils::{le_u16_at, u8_at};

/// Size of the OS/2 1.x `BITMAPCOREHEADER`, which stores 16-bit dimensions
/// right after the size field and has no compression field.
const OS2_V1_HEADER_SIZE: u8 = 12;

/// Interprets a 16-bit height field as a signed value.
///
/// Heights with the top bit set are stored as `65536 - d` and denote `-d`.
#[inline]
pub fn logical_height(raw: u16) -> i32 {
    if raw & 0x8000 != 0 {
        raw as i32 - 65536
    } else {
        raw as i32
    }
}

pub fn load(header: &[u8], format: Format) -> Result<HeaderInfo> {
    let mut info = HeaderInfo::new(format);
    info.compression = Compression::None;

    let os2_v1 = format == Format::Os2Bmp && u8_at(header, 14, "header size")? == OS2_V1_HEADER_SIZE;

    let width = le_u16_at(header, 18, "width")?;
    let (height, bits, planes) = if os2_v1 {
        (
            le_u16_at(header, 20, "height")?,
            u8_at(header, 22, "bits per plane")?,
            u8_at(header, 24, "number of planes")?,
        )
    } else {
        (
            le_u16_at(header, 22, "height")?,
            u8_at(header, 28, "bits per plane")?,
            u8_at(header, 26, "number of planes")?,
        )
    };

    info.dimensions = (width, logical_height(height).unsigned_abs()).into();
    info.bits_per_pixel = bits as u32 * planes as u32;

    if !os2_v1 {
        // 1 = 8-bit RLE, 2 = 4-bit RLE
        let compression = u8_at(header, 30, "compression")?;
        if compression != 0 && (info.bits_per_pixel == 4 || info.bits_per_pixel == 8) {
            info.compression = Compression::Rle;
        }
    }
    Ok(info)
}
