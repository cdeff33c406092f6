//! GIF logical screen descriptor.

use crate::info::{Compression, Details, HeaderInfo};
use crate::sniff::Format;
use crate::types::Result;
use crate::utils::{le_u16_at, u8_at};

pub fn load(header: &[u8]) -> Result<HeaderInfo> {
    let width = le_u16_at(header, 6, "logical screen width")?;
    let height = le_u16_at(header, 8, "logical screen height")?;
    let packed_flags = u8_at(header, 10, "packed flags")?;

    let mut info = HeaderInfo::new(Format::Gif);
    info.compression = Compression::Lzw;
    info.dimensions = (width, height).into();
    info.bits_per_pixel = (packed_flags & 0b0000_0111) as u32 + 1;
    info.details = Details::Interlace(packed_flags & 0b0100_0000 != 0);
    Ok(info)
}
