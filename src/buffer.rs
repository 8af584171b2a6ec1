//! Capture storage and paged text export.
//!
//! A [`CaptureBuffer`] holds the samples written by the most recent
//! acquisition and pages them out as bounded text chunks. Export is
//! read-once: an internal cursor advances with every page, and once the
//! buffer is drained further reads report the `"No data"` sentinel until the
//! next capture republishes it.

use crate::config::MAX_SAMPLE_SIZE;

/// Ceiling for a single exported page, in bytes.
pub const PAGE_SIZE: usize = 1024;

/// Sentinel payload returned when no captured data is available.
pub const NO_DATA: &str = "No data\n";

/// One polled snapshot of the register bank.
///
/// `timestamp_ns` is present only for samples taken in Accurate mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sample {
    pub value: u32,
    pub timestamp_ns: Option<u64>,
}

/// Text layout of an exported page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    /// 8 uppercase hex digits per value, concatenated, one trailing newline
    /// per page.
    Compact,
    /// One `"<9-hex-digit timestamp>,<8-hex-digit value>\n"` line per
    /// sample. Samples without a timestamp render it as zero.
    TimestampedCsv,
}

impl RenderFormat {
    /// Nominal rendered size of one record, used to decide whether another
    /// record still fits in the page budget.
    fn record_width(&self) -> usize {
        match self {
            RenderFormat::Compact => 8,
            RenderFormat::TimestampedCsv => 19,
        }
    }

    fn render_record(&self, sample: &Sample) -> String {
        match self {
            RenderFormat::Compact => format!("{:08X}", sample.value),
            RenderFormat::TimestampedCsv => format!(
                "{:09X},{:08X}\n",
                sample.timestamp_ns.unwrap_or(0),
                sample.value
            ),
        }
    }
}

/// One page of rendered sample text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub text: String,
    pub samples_consumed: usize,
}

impl Page {
    fn no_data() -> Self {
        Self {
            text: NO_DATA.to_string(),
            samples_consumed: 0,
        }
    }

    fn empty() -> Self {
        Self {
            text: String::new(),
            samples_consumed: 0,
        }
    }
}

/// Bounded text writer backing a single page.
///
/// Tracks the remaining byte budget and refuses any record that would push
/// the page past it. Both render formats go through this, so neither can
/// overflow the page ceiling.
#[derive(Debug)]
pub struct PageWriter {
    out: String,
    limit: usize,
}

impl PageWriter {
    pub fn new(limit: usize) -> Self {
        Self {
            out: String::new(),
            limit,
        }
    }

    /// Whether `width` more bytes still fit.
    pub fn can_fit(&self, width: usize) -> bool {
        self.out.len() + width <= self.limit
    }

    /// Append `record` if it fits; reports whether it was written.
    pub fn try_push(&mut self, record: &str) -> bool {
        if !self.can_fit(record.len()) {
            return false;
        }
        self.out.push_str(record);
        true
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

/// Fixed-capacity sample storage with read-once paged export.
#[derive(Debug)]
pub struct CaptureBuffer {
    samples: Vec<Sample>,
    length_used: usize,
    ready: bool,
    cursor: usize,
    elapsed_ns: u64,
}

impl CaptureBuffer {
    /// Allocate the full [`MAX_SAMPLE_SIZE`] capacity up front; the buffer
    /// never grows or shrinks afterwards.
    pub fn new() -> Self {
        Self {
            samples: vec![Sample::default(); MAX_SAMPLE_SIZE],
            length_used: 0,
            ready: false,
            cursor: 0,
            elapsed_ns: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Unconsumed samples of the current capture; 0 once drained or when no
    /// capture is ready. Pure query.
    pub fn remaining(&self) -> usize {
        if self.ready {
            self.length_used - self.cursor
        } else {
            0
        }
    }

    /// Elapsed time of the last capture, in nanoseconds. Stays visible after
    /// drain, until overwritten by the next capture.
    pub fn elapsed_ns(&self) -> u64 {
        self.elapsed_ns
    }

    /// Raw slot access for the acquisition loop.
    pub(crate) fn slots_mut(&mut self) -> &mut [Sample] {
        &mut self.samples
    }

    /// Publish a completed acquisition: the first `length_used` slots become
    /// the exportable capture, the cursor rewinds, and the buffer is ready.
    pub(crate) fn publish(&mut self, length_used: usize, elapsed_ns: u64) {
        debug_assert!(length_used > 0 && length_used <= self.samples.len());
        self.length_used = length_used;
        self.cursor = 0;
        self.elapsed_ns = elapsed_ns;
        self.ready = true;
    }

    /// Render the next page of at most `max_bytes` bytes.
    ///
    /// Returns the `"No data"` sentinel when no capture is ready. A buffer
    /// whose previous page ended exactly on the last sample stays ready
    /// until this next attempt, which returns an empty page and clears the
    /// ready flag; draining mid-page clears it during the render.
    pub fn next_page(&mut self, max_bytes: usize, format: RenderFormat) -> Page {
        if !self.ready {
            return Page::no_data();
        }
        if self.cursor >= self.length_used {
            self.ready = false;
            return Page::empty();
        }

        // Compact pages carry a single trailing newline; reserve for it.
        let budget = match format {
            RenderFormat::Compact => max_bytes.saturating_sub(1),
            RenderFormat::TimestampedCsv => max_bytes,
        };

        let mut writer = PageWriter::new(budget);
        let mut consumed = 0;
        loop {
            if !writer.can_fit(format.record_width()) {
                break;
            }
            if self.cursor >= self.length_used {
                self.ready = false;
                break;
            }
            let record = format.render_record(&self.samples[self.cursor]);
            if !writer.try_push(&record) {
                break;
            }
            self.cursor += 1;
            consumed += 1;
        }

        let mut text = writer.into_string();
        if format == RenderFormat::Compact && max_bytes > 0 {
            text.push('\n');
        }
        Page {
            text,
            samples_consumed: consumed,
        }
    }
}

impl Default for CaptureBuffer {
    fn default() -> Self {
        Self::new()
    }
}
