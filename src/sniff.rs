//! Format detection from the leading bytes of a file.

use std::fmt;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Image container formats which can be recognized.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Format {
    Unknown,
    Png,
    Jpeg,
    WindowsBmp,
    Os2Bmp,
    Tiff,
    Gif,
    PortableMap,
    Targa,
    Jedmics,
    Cals,
}

impl Format {
    pub fn name(&self) -> &'static str {
        match *self {
            Format::Unknown => "Unknown",
            Format::Png => "PNG",
            Format::Jpeg => "JFIF",
            Format::WindowsBmp => "Win BMP",
            Format::Os2Bmp => "OS/2 BMP",
            Format::Tiff => "TIFF",
            Format::Gif => "GIF",
            Format::PortableMap => "Portable Pixmap",
            Format::Targa => "Targa",
            Format::Jedmics => "JEDMICS",
            Format::Cals => "CALS",
        }
    }

    pub fn mime_type(&self) -> Option<&'static str> {
        match *self {
            Format::Png => Some("image/png"),
            Format::Jpeg => Some("image/jpeg"),
            Format::WindowsBmp | Format::Os2Bmp => Some("image/bmp"),
            Format::Tiff => Some("image/tiff"),
            Format::Gif => Some("image/gif"),
            Format::PortableMap => Some("image/x-portable-anymap"),
            Format::Targa => Some("image/x-tga"),
            Format::Unknown | Format::Jedmics | Format::Cals => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

const PNG_SIGNATURE: u32 = 0x8950_4e47;
const JPEG_SOI: u32 = 0xffd8_ff00;
const GIF_SIGNATURE: u32 = 0x4749_4638; // "GIF8"
const CALS_SIGNATURE: u32 = 0x6463_7273; // "srcd", little-endian
const JEDMICS_SIGNATURE: u32 = 0x80;
const BMP_WINDOWS_HEADER_SIZE: u8 = 0x28;
const PORTABLE_MAP_MASK: u32 = 0xffff_8080;
const PORTABLE_MAP_SIGNATURES: [u32; 3] = [0x5036_0000, 0x5035_0000, 0x5034_0000]; // P6, P5, P4
const MPEG_PACK_START: u32 = 0x1ba;
const MPEG_SEQUENCE_START: u32 = 0x1b3;
const TARGA_IMAGE_TYPES: [u8; 6] = [1, 2, 3, 9, 10, 11];

/// Identifies the image format of `header`.
///
/// `header` is expected to hold the first 256 bytes of the file; shorter
/// buffers are accepted but tests which look past their end simply fail.
/// Targa has no magic number, so it is only guessed when no signature matched.
pub fn sniff(header: &[u8]) -> Format {
    match match_signature(header) {
        Format::Unknown if looks_like_targa(header) => Format::Targa,
        format => format,
    }
}

fn match_signature(header: &[u8]) -> Format {
    let be = header.get(..4).map(BigEndian::read_u32);
    let le = header.get(..4).map(LittleEndian::read_u32);
    let byte = |i: usize| header.get(i).copied();

    if be == Some(PNG_SIGNATURE) {
        Format::Png
    } else if header.starts_with(b"BM") {
        if byte(14) == Some(BMP_WINDOWS_HEADER_SIZE) {
            Format::WindowsBmp
        } else {
            Format::Os2Bmp
        }
    } else if le == Some(JEDMICS_SIGNATURE) && matches!(byte(36), Some(4) | Some(6)) {
        Format::Jedmics
    } else if le == Some(CALS_SIGNATURE) {
        Format::Cals
    } else if be.map(|v| v & 0xffff_ff00) == Some(JPEG_SOI) {
        Format::Jpeg
    } else if be == Some(GIF_SIGNATURE) {
        Format::Gif
    } else if header.starts_with(b"II") || header.starts_with(b"MM") {
        Format::Tiff
    } else if be.map_or(false, |v| PORTABLE_MAP_SIGNATURES.contains(&(v & PORTABLE_MAP_MASK))) {
        Format::PortableMap
    } else {
        Format::Unknown
    }
}

fn looks_like_targa(header: &[u8]) -> bool {
    let (color_map, image_type) = match (header.get(1), header.get(2)) {
        (Some(&i), Some(&j)) => (i & 0xfe, j),
        _ => return false,
    };
    let be = header.get(..4).map(BigEndian::read_u32);
    // MPEG program and video streams start with 00 00 01 BA / 00 00 01 B3
    if be == Some(MPEG_PACK_START) || be == Some(MPEG_SEQUENCE_START) {
        return false;
    }
    color_map == 0 && TARGA_IMAGE_TYPES.contains(&image_type)
}
