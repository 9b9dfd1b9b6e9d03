//! # printflow-escpos
//!
//! ESC/POS command-stream building and encoding - low-level printing
//! capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW a command stream is built and encoded:
//! - ESC/POS command building (alignment, emphasis, character scale)
//! - Stream-to-byte encoding (one char per output byte, 0-255)
//! - Base64 payload encoding for the print agent wire format
//! - Printable-ASCII filtering for kitchen item names
//!
//! Business logic (WHAT to print) stays in `printflow-engine`:
//! - Kitchen ticket formatting
//! - Final receipt reformatting
//!
//! ## Example
//!
//! ```
//! use printflow_escpos::EscPosBuilder;
//!
//! let mut b = EscPosBuilder::new(42);
//! b.align_center();
//! b.bold_on();
//! b.write_line("KITCHEN ORDER");
//! b.bold_off();
//! b.align_left();
//! b.dash_sep();
//! let stream = b.finalize();
//! assert!(stream.starts_with("\x1B\x40"));
//! ```

pub mod cmd;
mod encoding;
mod error;
mod escpos;

// Re-exports
pub use encoding::{encode_stream, encode_stream_base64, filter_printable_ascii, to_base64};
pub use error::{EncodeError, EscposResult};
pub use escpos::{DEFAULT_WIDTH, EscPosBuilder};
