/// Upper bound on the number of tagged-directory entries which are examined.
pub const MAX_DIRECTORY_ENTRIES: usize = 256;

/// Tunables for a single header load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// How many TIFF directory entries to read at most. Values above
    /// `MAX_DIRECTORY_ENTRIES` are clamped to it.
    pub max_directory_entries: usize,
    /// Whether the JPEG marker scan reads the EXIF block it passes over to
    /// record its byte order.
    pub probe_exif: bool,
}

impl Default for LoadOptions {
    fn default() -> LoadOptions {
        LoadOptions {
            max_directory_entries: MAX_DIRECTORY_ENTRIES,
            probe_exif: true,
        }
    }
}

impl LoadOptions {
    #[inline]
    pub fn directory_entry_limit(&self) -> usize {
        self.max_directory_entries.min(MAX_DIRECTORY_ENTRIES)
    }
}
