use std::io::{self, ErrorKind, Read, Seek, SeekFrom};

/// A seekable byte stream borrowed for the duration of one decode.
///
/// Implemented for every `Read + Seek` type, so files, `Cursor`s and similar
/// readers can be passed directly.
pub trait ByteSource {
    /// Reads until `buf` is full or the source is exhausted, returning the
    /// number of bytes read. A short count means end of file, not an error.
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Moves to an absolute offset from the start of the source.
    fn seek_to(&mut self, offset: u64) -> io::Result<()>;

    /// Total size of the source in bytes.
    fn size(&mut self) -> io::Result<u64>;

    /// Seeks to `offset` and reads up to `len` bytes from there.
    fn read_at(&mut self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        self.seek_to(offset)?;
        let mut buf = vec![0u8; len];
        let n = self.fill(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }
}

impl<R: Read + Seek + ?Sized> ByteSource for R {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut read = 0;
        while read < buf.len() {
            match self.read(&mut buf[read..]) {
                Ok(0) => break,
                Ok(n) => read += n,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(read)
    }

    #[inline]
    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    fn size(&mut self) -> io::Result<u64> {
        let current = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(current))?;
        Ok(end)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::ByteSource;

    #[test]
    fn test_fill_is_short_on_eof() {
        let mut src = Cursor::new(vec![1u8, 2, 3]);
        let mut buf = [0u8; 8];
        assert_eq!(src.fill(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
    }

    #[test]
    fn test_size_keeps_position() {
        let mut src = Cursor::new(vec![0u8; 100]);
        src.seek_to(40).unwrap();
        assert_eq!(src.size().unwrap(), 100);
        assert_eq!(src.position(), 40);
    }

    #[test]
    fn test_read_at() {
        let data: Vec<u8> = (0..20).collect();
        let mut src = Cursor::new(data);
        assert_eq!(src.read_at(5, 3).unwrap(), vec![5, 6, 7]);
        assert_eq!(src.read_at(18, 10).unwrap(), vec![18, 19]);
        assert!(src.read_at(30, 4).unwrap().is_empty());
    }
}
