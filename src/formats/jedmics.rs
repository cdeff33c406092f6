//! JEDMICS C4 raster header. Always bilevel, G4 compressed.

use crate::info::{Compression, HeaderInfo};
use crate::sniff::Format;
use crate::types::Result;
use crate::utils::le_u16_at;

pub fn load(header: &[u8]) -> Result<HeaderInfo> {
    let height = le_u16_at(header, 4, "height")?;
    // stored as bytes per row
    let width = (le_u16_at(header, 6, "row width")? as u32) << 3;

    let mut info = HeaderInfo::new(Format::Jedmics);
    info.compression = Compression::G4;
    info.dimensions = (width, height).into();
    info.bits_per_pixel = 1;
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimensions;

    #[test]
    fn test_header() {
        let mut buf = vec![0u8; 256];
        buf[0] = 0x80;
        buf[4..6].copy_from_slice(&2200u16.to_le_bytes());
        buf[6..8].copy_from_slice(&216u16.to_le_bytes());
        buf[36] = 4;
        let info = load(&buf).unwrap();
        assert_eq!(info.format, Format::Jedmics);
        assert_eq!(info.compression, Compression::G4);
        assert_eq!(info.dimensions, Dimensions { width: 1728, height: 2200 });
        assert_eq!(info.bits_per_pixel, 1);
    }
}
