//! Print job encoding
//!
//! Turns a formatted command stream or an externally-produced blob into the
//! agent wire payload. Only text mode does real work; image/pdf/zpl payloads
//! arrive already base64-encoded and pass through, distinguished by the
//! `raw_type` tag.

use crate::types::{PrintJob, RawType};
use printflow_escpos::{EncodeError, EscposResult, cmd, encode_stream_base64, to_base64};

/// Stateless print-job constructors
pub struct JobEncoder;

impl JobEncoder {
    /// Encode a formatted command stream as a text-mode job
    ///
    /// Each char of the stream becomes one output byte; a char above 0xFF is
    /// rejected rather than silently corrupted.
    pub fn text(printer_name: &str, stream: &str) -> EscposResult<PrintJob> {
        if stream.is_empty() {
            return Err(EncodeError::EmptyPayload);
        }
        Ok(PrintJob {
            printer_name: printer_name.to_string(),
            raw_type: RawType::Text,
            raw_data: encode_stream_base64(stream)?,
        })
    }

    /// Wrap rasterizer output (base64 PNG) as an image job
    pub fn image(printer_name: &str, png_base64: &str) -> EscposResult<PrintJob> {
        Self::prepared(printer_name, RawType::Image, png_base64)
    }

    /// Wrap an externally-generated PDF blob
    pub fn pdf(printer_name: &str, pdf_base64: &str) -> EscposResult<PrintJob> {
        Self::prepared(printer_name, RawType::Pdf, pdf_base64)
    }

    /// Wrap an externally-generated ZPL blob
    pub fn zpl(printer_name: &str, zpl_base64: &str) -> EscposResult<PrintJob> {
        Self::prepared(printer_name, RawType::Zpl, zpl_base64)
    }

    /// Wrap a payload that is already base64, tagged as-is
    pub fn prepared(printer_name: &str, raw_type: RawType, payload: &str) -> EscposResult<PrintJob> {
        if payload.is_empty() {
            return Err(EncodeError::EmptyPayload);
        }
        Ok(PrintJob {
            printer_name: printer_name.to_string(),
            raw_type,
            raw_data: payload.to_string(),
        })
    }

    /// The standalone cut job; always text mode
    pub fn cut(printer_name: &str) -> PrintJob {
        PrintJob {
            printer_name: printer_name.to_string(),
            raw_type: RawType::Text,
            raw_data: to_base64(cmd::CUT.as_bytes()),
        }
    }
}

/// Whether a command stream is exactly the cut sequence
pub fn is_cut_stream(stream: &str) -> bool {
    stream == cmd::CUT
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;

    #[test]
    fn test_text_job_roundtrip() {
        let job = JobEncoder::text("Kitchen", "\x1B\x40hello\n").unwrap();
        assert_eq!(job.raw_type, RawType::Text);
        let bytes = STANDARD.decode(&job.raw_data).unwrap();
        assert_eq!(bytes, b"\x1B\x40hello\n");
    }

    #[test]
    fn test_text_rejects_empty() {
        assert_eq!(
            JobEncoder::text("Kitchen", "").unwrap_err(),
            EncodeError::EmptyPayload
        );
    }

    #[test]
    fn test_text_rejects_wide_char() {
        let err = JobEncoder::text("Kitchen", "price \u{20AC}5").unwrap_err();
        assert!(matches!(err, EncodeError::CharOutOfRange { .. }));
    }

    #[test]
    fn test_image_passthrough() {
        let job = JobEncoder::image("Front", "aW1hZ2U=").unwrap();
        assert_eq!(job.raw_type, RawType::Image);
        assert_eq!(job.raw_data, "aW1hZ2U=");
    }

    #[test]
    fn test_pdf_and_zpl_tags() {
        assert_eq!(
            JobEncoder::pdf("Office", "cGRm").unwrap().raw_type,
            RawType::Pdf
        );
        assert_eq!(
            JobEncoder::zpl("Labels", "enBs").unwrap().raw_type,
            RawType::Zpl
        );
    }

    #[test]
    fn test_cut_job_bytes() {
        let job = JobEncoder::cut("Front");
        assert_eq!(job.raw_type, RawType::Text);
        let bytes = STANDARD.decode(&job.raw_data).unwrap();
        assert_eq!(bytes, vec![0x1D, 0x56, 0x42, 0x00]);
    }

    #[test]
    fn test_is_cut_stream() {
        assert!(is_cut_stream(cmd::CUT));
        assert!(!is_cut_stream("\x1B\x40"));
    }
}
