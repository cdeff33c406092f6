//! Truevision Targa header.

use crate::info::{Compression, HeaderInfo};
use crate::sniff::Format;
use crate::types::Result;
use crate::utils::{le_u16_at, u8_at};

const TYPE_MONOCHROME: u8 = 3;
const TYPE_RLE_MONOCHROME: u8 = 11;
/// Image types from this value on are run-length encoded.
const TYPE_FIRST_RLE: u8 = 9;

pub fn load(header: &[u8]) -> Result<HeaderInfo> {
    let image_type = u8_at(header, 2, "image type")?;
    let width = le_u16_at(header, 12, "width")?;
    let height = le_u16_at(header, 14, "height")?;
    let pixel_depth = u8_at(header, 16, "pixel depth")?;

    let mut info = HeaderInfo::new(Format::Targa);
    info.dimensions = (width, height).into();
    info.bits_per_pixel = match image_type {
        TYPE_MONOCHROME | TYPE_RLE_MONOCHROME => 1,
        _ => pixel_depth as u32,
    };
    info.compression = if image_type < TYPE_FIRST_RLE {
        Compression::None
    } else {
        Compression::Rle
    };
    Ok(info)
}
