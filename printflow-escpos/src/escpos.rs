//! ESC/POS command-stream builder
//!
//! Accumulates printable text interleaved with control sequences in a UTF-8
//! `String`. The finished stream is encoded to bytes separately (see
//! `encoding`), which keeps formatters free of byte bookkeeping.

use crate::cmd;

/// Default paper width in characters (80mm paper at the receipt font)
pub const DEFAULT_WIDTH: usize = 42;

/// String-based ESC/POS command builder
///
/// The stream starts with the INIT sequence; every other command is emitted
/// explicitly by the caller so the output is byte-for-byte predictable.
pub struct EscPosBuilder {
    buf: String,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 42 or 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = String::with_capacity(1024);
        buf.push_str(cmd::INIT);
        Self { buf, width }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text
    pub fn write(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    /// Write text followed by newline
    pub fn write_line(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self.buf.push('\n');
        self
    }

    /// Write an empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn align_center(&mut self) -> &mut Self {
        self.buf.push_str(cmd::ALIGN_CENTER);
        self
    }

    /// Align text to left (default)
    pub fn align_left(&mut self) -> &mut Self {
        self.buf.push_str(cmd::ALIGN_LEFT);
        self
    }

    /// Align text to right
    pub fn align_right(&mut self) -> &mut Self {
        self.buf.push_str(cmd::ALIGN_RIGHT);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold_on(&mut self) -> &mut Self {
        self.buf.push_str(cmd::BOLD_ON);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.push_str(cmd::BOLD_OFF);
        self
    }

    /// Double width and height
    pub fn size_double(&mut self) -> &mut Self {
        self.buf.push_str(cmd::SIZE_DOUBLE);
        self
    }

    /// Double height only
    pub fn size_double_height(&mut self) -> &mut Self {
        self.buf.push_str(cmd::SIZE_DOUBLE_HEIGHT);
        self
    }

    /// Double width only
    pub fn size_double_width(&mut self) -> &mut Self {
        self.buf.push_str(cmd::SIZE_DOUBLE_WIDTH);
        self
    }

    /// Reset to normal size
    pub fn size_reset(&mut self) -> &mut Self {
        self.buf.push_str(cmd::SIZE_RESET);
        self
    }

    // === Separators ===

    /// Print a full-width line of '-' characters
    pub fn dash_sep(&mut self) -> &mut Self {
        let sep = self.dash_sep_str();
        self.write_line(&sep)
    }

    /// Separator string without writing it
    pub fn dash_sep_str(&self) -> String {
        "-".repeat(self.width)
    }

    // === Layout Helpers ===

    /// Print text centered via the alignment command
    pub fn text_center(&mut self, s: &str) -> &mut Self {
        self.align_center();
        self.write_line(s);
        self.align_left();
        self
    }

    // === Build ===

    /// Finalize and return the accumulated command stream
    pub fn finalize(self) -> String {
        self.buf
    }

    /// Current buffer as a string reference
    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}
