use std::borrow::Cow;
use std::io;
use std::result;

use num::ToPrimitive;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// None of the format signatures matched the leading bytes.
    #[error("unknown image format")]
    UnknownFormat,
    /// The file ended before a required header field could be read.
    #[error("truncated header: {0}")]
    TruncatedHeader(Cow<'static, str>),
    /// A JPEG stream did not contain a start-of-frame marker within the scanned range.
    #[error("start of frame marker not found: {0}")]
    MarkerNotFound(Cow<'static, str>),
    /// An out-of-line value offset points past the end of the file.
    #[error("offset {offset} is past the end of file ({size} bytes)")]
    OutOfBoundsOffset { offset: u64, size: u64 },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = result::Result<T, Error>;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Values which do not fit into `u32` (negative or too large) become zero.
impl<T: ToPrimitive, U: ToPrimitive> From<(T, U)> for Dimensions {
    fn from((w, h): (T, U)) -> Dimensions {
        Dimensions {
            width: w.to_u32().unwrap_or(0),
            height: h.to_u32().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_from_tuple() {
        assert_eq!(Dimensions::from((640u16, 480u16)), Dimensions { width: 640, height: 480 });
        assert_eq!(Dimensions::from((-1i64, 5u64)), Dimensions { width: 0, height: 5 });
        assert_eq!(Dimensions::from((1u64 << 40, 7i32)), Dimensions { width: 0, height: 7 });
    }

    #[test]
    fn test_error_display() {
        let e = Error::TruncatedHeader("when reading width".into());
        assert_eq!(e.to_string(), "truncated header: when reading width");
        let e = Error::OutOfBoundsOffset { offset: 4096, size: 100 };
        assert_eq!(e.to_string(), "offset 4096 is past the end of file (100 bytes)");
    }
}
