use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use tracing::debug;

use crate::formats::{bmp, cals, gif, jedmics, jpeg, png, pnm, targa, tiff};
use crate::info::HeaderInfo;
use crate::options::LoadOptions;
use crate::sniff::{sniff, Format};
use crate::traits::ByteSource;
use crate::types::{Error, Result};

/// Number of leading bytes used to identify a file. Shorter files are rejected.
pub const PROBE_SIZE: usize = 256;

/// Identifies the format of `src` and reads its header with default options.
pub fn load<S: ?Sized + ByteSource>(src: &mut S) -> Result<HeaderInfo> {
    load_with_options(src, &LoadOptions::default())
}

pub fn load_with_options<S: ?Sized + ByteSource>(src: &mut S, options: &LoadOptions) -> Result<HeaderInfo> {
    let file_size = src.size()?;
    src.seek_to(0)?;

    let mut header = [0u8; PROBE_SIZE];
    let n = src.fill(&mut header)?;
    if n != PROBE_SIZE {
        return Err(truncated!("file is {} bytes long, at least {} are needed", n, PROBE_SIZE));
    }

    let format = sniff(&header);
    debug!(%format, file_size, "identified image format");

    let info = match format {
        Format::Unknown => return Err(Error::UnknownFormat),
        Format::Png => png::load(&header)?,
        Format::Jpeg => jpeg::load(&header, src, file_size, options.probe_exif)?,
        Format::WindowsBmp | Format::Os2Bmp => bmp::load(&header, format)?,
        Format::Tiff => tiff::load(&header, src, file_size, options.directory_entry_limit())?,
        Format::Gif => gif::load(&header)?,
        Format::PortableMap => pnm::load(&header)?,
        Format::Targa => targa::load(&header)?,
        Format::Jedmics => jedmics::load(&header)?,
        Format::Cals => cals::load(src)?,
    };
    debug!(?info, "decoded image header");
    Ok(info)
}

pub fn load_from_file<P: AsRef<Path>>(p: P) -> Result<HeaderInfo> {
    let mut f = File::open(p)?;
    load(&mut f)
}

pub fn load_from_buffer(buf: &[u8]) -> Result<HeaderInfo> {
    load(&mut Cursor::new(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_file_is_rejected() {
        let err = load_from_buffer(b"GIF89a\x01\x00\x01\x00").unwrap_err();
        assert!(matches!(err, Error::TruncatedHeader(_)), "{:?}", err);
    }

    #[test]
    fn test_unknown_format() {
        let err = load_from_buffer(&[0x42; 512]).unwrap_err();
        assert!(matches!(err, Error::UnknownFormat), "{:?}", err);
    }

    #[test]
    fn test_source_position_does_not_matter() {
        let mut data = b"GIF87a\x20\x00\x10\x00\x07".to_vec();
        data.resize(300, 0);
        let mut cursor = Cursor::new(data);
        cursor.set_position(123);
        let info = load(&mut cursor).unwrap();
        assert_eq!(info.format, Format::Gif);
        assert_eq!(info.width(), 32);
        assert_eq!(info.height(), 16);
    }
}
