//! Identifies image files from their leading bytes and reads header metadata
//! (dimensions, bit depth, compression) without decoding any pixel data.
//!
//! ```no_run
//! let info = imginfo::load_from_file("scan.tif")?;
//! println!("{} {}x{}", info.format, info.width(), info.height());
//! # Ok::<(), imginfo::Error>(())
//! ```

pub use crate::generic::*;
pub use crate::info::{Compression, Details, HeaderInfo, Subsampling};
pub use crate::options::LoadOptions;
pub use crate::sniff::{sniff, Format};
pub use crate::traits::ByteSource;
pub use crate::types::{Dimensions, Error, Result};
pub use crate::utils::{parse_number, Endianness};

#[macro_use]
mod macros;
mod info;
mod options;
mod sniff;
mod traits;
mod types;
mod utils;
mod generic;

mod common;
pub mod formats;
