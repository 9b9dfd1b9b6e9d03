//! Raw ESC/POS control sequences
//!
//! Kept as string constants so formatters can interleave them with printable
//! text in a single command stream. Every char is in the 0x00-0x7F range, so
//! the stream encodes one byte per char.

/// Initialize printer (ESC @)
pub const INIT: &str = "\x1B\x40";

/// Align left (default)
pub const ALIGN_LEFT: &str = "\x1B\x61\x00";

/// Align center
pub const ALIGN_CENTER: &str = "\x1B\x61\x01";

/// Align right
pub const ALIGN_RIGHT: &str = "\x1B\x61\x02";

/// Enable emphasis
pub const BOLD_ON: &str = "\x1B\x45\x01";

/// Disable emphasis
pub const BOLD_OFF: &str = "\x1B\x45\x00";

/// Double width and height
pub const SIZE_DOUBLE: &str = "\x1D\x21\x11";

/// Double height only
pub const SIZE_DOUBLE_HEIGHT: &str = "\x1D\x21\x01";

/// Double width only
pub const SIZE_DOUBLE_WIDTH: &str = "\x1D\x21\x10";

/// Reset to normal size
pub const SIZE_RESET: &str = "\x1D\x21\x00";

/// Full cut with feed (GS V 66 0)
///
/// Must always travel as a standalone text-mode job, even on image-output
/// printers: rasterizing the cutter sequence would sever the paper early.
pub const CUT: &str = "\x1D\x56\x42\x00";
