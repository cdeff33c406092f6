//! JPEG header: scans the marker stream for the start-of-frame segment.

use arrayvec::ArrayVec;
use tracing::trace;

use crate::generic::PROBE_SIZE;
use crate::info::{Compression, Details, HeaderInfo, Subsampling};
use crate::sniff::Format;
use crate::traits::ByteSource;
use crate::types::Result;
use crate::utils::{be_u16_at, slice_at, u8_at, Endianness};

/// Bytes read at each marker position after leaving the initial probe.
const WINDOW_SIZE: usize = 32;
/// Marker, length and the frame header fields up to the first sampling factor.
const FRAME_HEADER_LEN: usize = 12;
/// Consecutive invalid marker positions tolerated before giving up.
const MAX_RESYNC_STEPS: usize = WINDOW_SIZE / 2;
/// Segments skipped before the start of frame is given up on.
const MAX_SEGMENTS: usize = 32;
/// Bytes of an EXIF segment read to inspect its TIFF header.
const EXIF_PROBE_SIZE: usize = 1024;

// marker codes are compared with the two low bits cleared, so SOF0 also
// matches SOF1-3 and APP0 matches APP0-3 (APP1 carries EXIF)
const MARKER_MASK: u16 = 0xfffc;
const SOF0: u16 = 0xffc0;
const APP0: u16 = 0xffe0;

pub fn load<S: ?Sized + ByteSource>(
    header: &[u8],
    src: &mut S,
    file_size: u64,
    probe_exif: bool,
) -> Result<HeaderInfo> {
    let mut window: ArrayVec<u8, PROBE_SIZE> = ArrayVec::new();
    window.extend(header.iter().take(PROBE_SIZE).copied());
    // absolute file offset of window[0]
    let mut base = 0u64;
    let mut cursor = 2usize;
    let mut resync_steps = 0;
    let mut segments = 0;
    let mut exif = None;

    loop {
        let pos = base + cursor as u64;
        if pos >= file_size {
            return Err(marker_not_found!("reached end of file at offset {}", pos));
        }

        if cursor + FRAME_HEADER_LEN > window.len() {
            let mut buf = [0u8; WINDOW_SIZE];
            src.seek_to(pos)?;
            let n = src.fill(&mut buf)?;
            window.clear();
            window.extend(buf[..n].iter().copied());
            base = pos;
            cursor = 0;
        }

        let marker = be_u16_at(&window, cursor, "marker")? & MARKER_MASK;
        if marker < 0xff00 {
            // garbage between segments written by some encoders, try to resync
            resync_steps += 1;
            if resync_steps > MAX_RESYNC_STEPS {
                return Err(marker_not_found!("no valid marker near offset {}", pos));
            }
            trace!(offset = pos, "skipping invalid JPEG marker");
            cursor += 2;
            continue;
        }
        resync_steps = 0;

        if marker == SOF0 {
            break;
        }

        if probe_exif && marker == APP0 && window.get(cursor + 4..cursor + 6) == Some(&b"Ex"[..]) {
            exif = read_exif_byte_order(src, pos)?;
        }

        segments += 1;
        if segments > MAX_SEGMENTS {
            return Err(marker_not_found!("no start of frame within {} segments", MAX_SEGMENTS));
        }

        let length = be_u16_at(&window, cursor + 2, "segment length")?;
        let next = pos + 2 + length as u64;
        trace!(marker, length, next, "skipping JPEG segment");
        window.clear();
        base = next;
        cursor = 0;
    }

    let frame = slice_at(&window, cursor, FRAME_HEADER_LEN, "start of frame segment")?;
    let sample_precision = u8_at(frame, 4, "sample precision")? as u32;
    let height = be_u16_at(frame, 5, "height")?;
    let width = be_u16_at(frame, 7, "width")?;
    let components = u8_at(frame, 9, "number of components")? as u32;
    let sampling = u8_at(frame, 11, "sampling factors")?;

    let mut info = HeaderInfo::new(Format::Jpeg);
    info.compression = Compression::Jpeg;
    info.dimensions = (width, height).into();
    info.bits_per_pixel = sample_precision * components;
    info.details = Details::Jpeg {
        subsampling: Subsampling::from_packed(sampling),
        exif,
    };
    Ok(info)
}

/// Reads the beginning of an APPn segment holding `Exif\0\0` followed by a
/// TIFF header and returns the byte order of that header.
fn read_exif_byte_order<S: ?Sized + ByteSource>(src: &mut S, segment: u64) -> Result<Option<Endianness>> {
    let data = src.read_at(segment, EXIF_PROBE_SIZE)?;
    trace!(offset = segment, len = data.len(), "read EXIF segment");
    Ok(data.get(10..12).and_then(Endianness::from_mark))
}
