use std::fmt;

use crate::formats::tiff::{Photometric, PlanarConfig};
use crate::sniff::Format;
use crate::types::Dimensions;
use crate::utils::Endianness;

/// Compression schemes reported for image data.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Compression {
    #[default]
    Unknown,
    Flate,
    Jpeg,
    None,
    Rle,
    Lzw,
    G3,
    G4,
    Packbits,
    ModifiedHuffman,
    ThunderscanRle,
}

impl Compression {
    pub fn name(&self) -> &'static str {
        match *self {
            Compression::Unknown => "Unknown",
            Compression::Flate => "Flate",
            Compression::Jpeg => "JPEG",
            Compression::None => "None",
            Compression::Rle => "RLE",
            Compression::Lzw => "LZW",
            Compression::G3 => "G3",
            Compression::G4 => "G4",
            Compression::Packbits => "Packbits",
            Compression::ModifiedHuffman => "Modified Huffman",
            Compression::ThunderscanRle => "Thunderscan RLE",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Chroma subsampling factors from a JPEG frame header.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Subsampling {
    pub horizontal: u8,
    pub vertical: u8,
}

impl Subsampling {
    /// Splits a packed sampling factor byte into its two nibbles.
    #[inline]
    pub fn from_packed(b: u8) -> Subsampling {
        Subsampling {
            horizontal: b >> 4,
            vertical: b & 0x0f,
        }
    }
}

/// Format-specific attributes which do not fit into the common fields.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Details {
    #[default]
    None,
    /// Interlacing flag of PNG and GIF images.
    Interlace(bool),
    Jpeg {
        subsampling: Subsampling,
        /// Byte order of the embedded EXIF block, if the stream has one.
        exif: Option<Endianness>,
    },
    Tiff {
        photometric: Photometric,
        planar: PlanarConfig,
    },
}

impl fmt::Display for Details {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Details::None => Ok(()),
            Details::Interlace(true) => f.write_str("Interlaced"),
            Details::Interlace(false) => f.write_str("Not interlaced"),
            Details::Jpeg { subsampling, .. } => write!(
                f,
                "color subsampling = {}:{}",
                subsampling.horizontal, subsampling.vertical
            ),
            Details::Tiff { photometric, planar } => {
                write!(f, "Photometric = {}, Planar config = {}", photometric, planar)
            }
        }
    }
}

/// Header metadata of one image file.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct HeaderInfo {
    pub format: Format,
    pub compression: Compression,
    pub dimensions: Dimensions,
    /// Bits per pixel summed over all channels and planes.
    pub bits_per_pixel: u32,
    pub details: Details,
}

impl HeaderInfo {
    /// An empty result for `format`: zero dimensions and depth, unknown compression.
    pub fn new(format: Format) -> HeaderInfo {
        HeaderInfo {
            format,
            compression: Compression::Unknown,
            dimensions: Dimensions::default(),
            bits_per_pixel: 0,
            details: Details::None,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    /// The auxiliary options as text, or `None` when the format has none.
    pub fn options(&self) -> Option<String> {
        match self.details {
            Details::None => None,
            ref d => Some(d.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_defaults() {
        let info = HeaderInfo::new(Format::Gif);
        assert_eq!(info.compression, Compression::Unknown);
        assert_eq!(info.dimensions, Dimensions { width: 0, height: 0 });
        assert_eq!(info.bits_per_pixel, 0);
        assert_eq!(info.options(), None);
    }

    #[test]
    fn test_options_text() {
        let mut info = HeaderInfo::new(Format::Png);
        info.details = Details::Interlace(true);
        assert_eq!(info.options().as_deref(), Some("Interlaced"));
        info.details = Details::Interlace(false);
        assert_eq!(info.options().as_deref(), Some("Not interlaced"));
        info.details = Details::Jpeg {
            subsampling: Subsampling::from_packed(0x21),
            exif: None,
        };
        assert_eq!(info.options().as_deref(), Some("color subsampling = 2:1"));
        info.details = Details::Tiff {
            photometric: Photometric::Rgb,
            planar: PlanarConfig::Chunky,
        };
        assert_eq!(
            info.options().as_deref(),
            Some("Photometric = RGB, Planar config = Chunky")
        );
    }

    #[test]
    fn test_compression_names() {
        assert_eq!(Compression::ModifiedHuffman.to_string(), "Modified Huffman");
        assert_eq!(Compression::ThunderscanRle.to_string(), "Thunderscan RLE");
        assert_eq!(Compression::default(), Compression::Unknown);
    }
}
