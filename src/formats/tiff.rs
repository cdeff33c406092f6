//! TIFF header: the fields of the first image file directory.

use std::fmt;

use num::ToPrimitive;
use tracing::{debug, warn};

use crate::common::tiff::{read_first_directory, read_first_short};
use crate::info::{Compression, Details, HeaderInfo};
use crate::sniff::Format;
use crate::traits::ByteSource;
use crate::types::{Error, Result};

const IMAGE_WIDTH: u16 = 256;
const IMAGE_LENGTH: u16 = 257;
const BITS_PER_SAMPLE: u16 = 258;
const COMPRESSION: u16 = 259;
const PHOTOMETRIC_INTERPRETATION: u16 = 262;
const PLANAR_CONFIGURATION: u16 = 284;

/// How sample values map to colors.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Photometric {
    WhiteIsZero,
    BlackIsZero,
    Rgb,
    PaletteColor,
    TransparencyMask,
    Cmyk,
    YCbCr,
    #[default]
    Unknown,
}

impl Photometric {
    pub fn from_value(n: i64) -> Photometric {
        match n {
            0 => Photometric::WhiteIsZero,
            1 => Photometric::BlackIsZero,
            2 => Photometric::Rgb,
            3 => Photometric::PaletteColor,
            4 => Photometric::TransparencyMask,
            5 => Photometric::Cmyk,
            6 => Photometric::YCbCr,
            _ => Photometric::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Photometric::WhiteIsZero => "WhiteIsZero",
            Photometric::BlackIsZero => "BlackIsZero",
            Photometric::Rgb => "RGB",
            Photometric::PaletteColor => "Palette Color",
            Photometric::TransparencyMask => "Transparency Mask",
            Photometric::Cmyk => "CMYK",
            Photometric::YCbCr => "YCbCr",
            Photometric::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Photometric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether samples of a pixel are interleaved or stored in separate planes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum PlanarConfig {
    #[default]
    Unknown,
    Chunky,
    Planar,
}

impl PlanarConfig {
    pub fn from_value(n: i64) -> PlanarConfig {
        match n {
            1 => PlanarConfig::Chunky,
            2 => PlanarConfig::Planar,
            _ => PlanarConfig::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            PlanarConfig::Unknown => "Unknown",
            PlanarConfig::Chunky => "Chunky",
            PlanarConfig::Planar => "Planar",
        }
    }
}

impl fmt::Display for PlanarConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a TIFF `Compression` tag value to a compression scheme.
pub fn compression_from_code(code: i64) -> Compression {
    match code {
        1 => Compression::None,
        2 => Compression::ModifiedHuffman,
        3 => Compression::G3,
        4 => Compression::G4,
        5 => Compression::Lzw,
        6 | 7 => Compression::Jpeg,
        8 | 32946 => Compression::Flate,
        32773 => Compression::Packbits,
        32809 => Compression::ThunderscanRle,
        _ => Compression::Unknown,
    }
}

pub fn load<S: ?Sized + ByteSource>(
    header: &[u8],
    src: &mut S,
    file_size: u64,
    max_entries: usize,
) -> Result<HeaderInfo> {
    let (order, entries) = read_first_directory(header, src, file_size, max_entries)?;

    // fields are optional, so start from what a reader should assume
    let mut width = 0i64;
    let mut height = 0i64;
    let mut bits_per_pixel = 1i64;
    let mut compression = Compression::None;
    let mut photometric = Photometric::Unknown;
    let mut planar = PlanarConfig::Chunky;

    for entry in &entries {
        match entry.tag {
            IMAGE_WIDTH => width = entry.value(order),
            IMAGE_LENGTH => height = entry.value(order),
            BITS_PER_SAMPLE if entry.count > 1 => {
                // one value per sample; assume they are all equal
                match read_first_short(src, order, entry, file_size) {
                    Ok(bits) => bits_per_pixel = bits as i64 * entry.count as i64,
                    Err(Error::OutOfBoundsOffset { offset, size }) => {
                        warn!(offset, size, "skipping BitsPerSample list outside of file");
                    }
                    Err(e) => return Err(e),
                }
            }
            BITS_PER_SAMPLE => bits_per_pixel = entry.value(order),
            COMPRESSION => compression = compression_from_code(entry.value(order)),
            PHOTOMETRIC_INTERPRETATION => photometric = Photometric::from_value(entry.value(order)),
            PLANAR_CONFIGURATION => planar = PlanarConfig::from_value(entry.value(order)),
            _ => {}
        }
    }
    debug!(entries = entries.len(), ?order, "read TIFF directory");

    let mut info = HeaderInfo::new(Format::Tiff);
    info.compression = compression;
    info.dimensions = (width, height).into();
    info.bits_per_pixel = bits_per_pixel.to_u32().unwrap_or(0);
    info.details = Details::Tiff { photometric, planar };
    Ok(info)
}
