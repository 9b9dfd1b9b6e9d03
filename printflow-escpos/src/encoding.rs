//! Stream and payload encoding
//!
//! The print agent expects `raw_data` as base64. For text-mode jobs the
//! command stream is interpreted as a sequence of character codes, one output
//! byte per char (0-255), so ESC/POS control sequences pass through intact.

use crate::error::{EncodeError, EscposResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{instrument, warn};

/// Encode a command stream into raw printer bytes
///
/// Each char becomes exactly one byte. A char above U+00FF cannot be
/// represented and is rejected rather than silently mangled.
#[instrument(skip(stream), fields(stream_len = stream.len()))]
pub fn encode_stream(stream: &str) -> EscposResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(stream.len());
    for (index, ch) in stream.chars().enumerate() {
        let code = ch as u32;
        if code > 0xFF {
            warn!(ch = %ch, index, "char has no single-byte form, rejecting stream");
            return Err(EncodeError::CharOutOfRange { ch, index });
        }
        bytes.push(code as u8);
    }
    Ok(bytes)
}

/// Base64-encode raw bytes for the agent wire format
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Encode a command stream straight to its base64 wire form
pub fn encode_stream_base64(stream: &str) -> EscposResult<String> {
    Ok(to_base64(&encode_stream(stream)?))
}

/// Drop every char outside the printable ASCII range (0x20-0x7E)
///
/// Characters are removed, not substituted. Used for kitchen item names,
/// which must survive printers without extended code pages.
pub fn filter_printable_ascii(s: &str) -> String {
    let filtered: String = s.chars().filter(|c| (' '..='~').contains(c)).collect();
    if filtered.len() != s.len() {
        tracing::debug!(input = %s, "dropped chars outside printable ascii");
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd;

    #[test]
    fn test_encode_stream_ascii() {
        let bytes = encode_stream("AB\n").unwrap();
        assert_eq!(bytes, vec![0x41, 0x42, 0x0A]);
    }

    #[test]
    fn test_encode_stream_preserves_commands() {
        let stream = format!("{}hello{}", cmd::INIT, cmd::CUT);
        let bytes = encode_stream(&stream).unwrap();
        assert_eq!(&bytes[..2], &[0x1B, 0x40]);
        assert_eq!(&bytes[bytes.len() - 4..], &[0x1D, 0x56, 0x42, 0x00]);
    }

    #[test]
    fn test_encode_stream_latin1_range() {
        // U+00E9 fits in one byte
        let bytes = encode_stream("caf\u{e9}").unwrap();
        assert_eq!(bytes, vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_encode_stream_rejects_wide_char() {
        let err = encode_stream("total \u{20AC}9").unwrap_err();
        assert_eq!(
            err,
            EncodeError::CharOutOfRange {
                ch: '\u{20AC}',
                index: 6
            }
        );
    }

    #[test]
    fn test_to_base64() {
        assert_eq!(to_base64(&[0x1D, 0x56, 0x42, 0x00]), "HVZCAA==");
    }

    #[test]
    fn test_filter_printable_ascii_drops() {
        assert_eq!(filter_printable_ascii("Caf\u{e9} Crème"), "Caf Crme");
        assert_eq!(filter_printable_ascii("plain text"), "plain text");
        assert_eq!(filter_printable_ascii("宫保鸡丁"), "");
    }
}
