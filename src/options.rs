//! Reading options configuration.

/// Default capacity of the buffer placed in front of each part stream.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Options for opening a workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Capacity of the read buffer wrapped around each decompressed part
    pub buffer_capacity: usize,

    /// Maximum number of shared strings accepted during initialization
    pub max_shared_strings: Option<usize>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_shared_strings: None,
        }
    }
}

impl ReadOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the part stream buffer capacity. Zero falls back to the default.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = if capacity == 0 {
            DEFAULT_BUFFER_CAPACITY
        } else {
            capacity
        };
        self
    }

    /// Reject workbooks whose shared string table has more than `max` entries.
    pub fn with_max_shared_strings(mut self, max: usize) -> Self {
        self.max_shared_strings = Some(max);
        self
    }
}
