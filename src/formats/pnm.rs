//! Portable bitmap, graymap and pixmap (binary `P4`, `P5` and `P6` variants).

use crate::info::{Compression, HeaderInfo};
use crate::sniff::Format;
use crate::types::Result;
use crate::utils::{parse_number, u8_at};

/// Skips whitespace and `#` comment lines between header fields.
fn skip_separators(buf: &[u8], cursor: &mut usize) {
    while let Some(&b) = buf.get(*cursor) {
        if b.is_ascii_whitespace() {
            *cursor += 1;
        } else if b == b'#' {
            while buf.get(*cursor).map_or(false, |&b| b != b'\n' && b != b'\r') {
                *cursor += 1;
            }
        } else {
            break;
        }
    }
}

pub fn load(header: &[u8]) -> Result<HeaderInfo> {
    let mut info = HeaderInfo::new(Format::PortableMap);
    info.compression = Compression::None;
    info.bits_per_pixel = match u8_at(header, 1, "magic number")? {
        b'4' => 1,
        b'5' => 8,
        b'6' => 24,
        _ => 0,
    };

    let mut cursor = 2;
    skip_separators(header, &mut cursor);
    let width = parse_number(header, &mut cursor);
    skip_separators(header, &mut cursor);
    let height = parse_number(header, &mut cursor);

    info.dimensions = (width, height).into();
    Ok(info)
}
