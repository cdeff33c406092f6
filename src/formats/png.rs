//! PNG header: the IHDR chunk which must follow the signature.

use crate::info::{Compression, Details, HeaderInfo};
use crate::sniff::Format;
use crate::types::Result;
use crate::utils::{be_u32_at, u8_at};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ColorType {
    Grayscale,
    Rgb,
    Indexed,
    GrayscaleAlpha,
    RgbAlpha,
}

const CT_GRAYSCALE: u8 = 0;
const CT_RGB: u8 = 2;
const CT_INDEXED: u8 = 3;
const CT_GRAYSCALE_ALPHA: u8 = 4;
const CT_RGB_ALPHA: u8 = 6;

impl ColorType {
    pub fn from_u8(n: u8) -> Option<ColorType> {
        match n {
            CT_GRAYSCALE       => Some(ColorType::Grayscale),
            CT_RGB             => Some(ColorType::Rgb),
            CT_INDEXED         => Some(ColorType::Indexed),
            CT_GRAYSCALE_ALPHA => Some(ColorType::GrayscaleAlpha),
            CT_RGB_ALPHA       => Some(ColorType::RgbAlpha),
            _                  => None
        }
    }

    pub fn channels(self) -> u32 {
        match self {
            ColorType::Grayscale | ColorType::Indexed => 1,
            ColorType::GrayscaleAlpha => 2,
            ColorType::Rgb => 3,
            ColorType::RgbAlpha => 4,
        }
    }
}

const IHDR: u32 = 0x4948_4452;

pub fn load(header: &[u8]) -> Result<HeaderInfo> {
    let mut info = HeaderInfo::new(Format::Png);
    info.compression = Compression::Flate;

    if be_u32_at(header, 12, "chunk type")? != IHDR {
        return Ok(info);
    }

    let width = be_u32_at(header, 16, "width")?;
    let height = be_u32_at(header, 20, "height")?;
    let bit_depth = u8_at(header, 24, "bit depth")?;
    let color_type = u8_at(header, 25, "color type")?;
    let interlace_method = u8_at(header, 28, "interlace method")?;

    info.dimensions = (width, height).into();
    // unknown color types leave the depth at zero
    info.bits_per_pixel = ColorType::from_u8(color_type)
        .map_or(0, |ct| bit_depth as u32 * ct.channels());
    info.details = Details::Interlace(interlace_method == 1);
    Ok(info)
}
