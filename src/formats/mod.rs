//! Header decoding routines, one per image format.

pub mod bmp;
pub mod cals;
pub mod gif;
pub mod jedmics;
pub mod jpeg;
pub mod png;
pub mod pnm;
pub mod targa;
pub mod tiff;
