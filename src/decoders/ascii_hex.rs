//! ASCIIHexDecode implementation.
//!
//! Whitespace is ignored, `>` ends the data, and a final odd digit is padded
//! with an implicit `0`.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};

/// ASCIIHexDecode filter implementation.
pub struct AsciiHexDecoder;

impl StreamDecoder for AsciiHexDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() / 2);
        let mut pending: Option<u8> = None;

        for &c in input {
            if c == b'>' {
                break;
            }
            if c.is_ascii_whitespace() {
                continue;
            }
            let nibble = (c as char).to_digit(16).ok_or_else(|| {
                Error::Decode(format!("ASCIIHexDecode: invalid hex digit '{}'", c as char))
            })? as u8;
            match pending.take() {
                Some(high) => output.push((high << 4) | nibble),
                None => pending = Some(nibble),
            }
        }

        if let Some(high) = pending {
            output.push(high << 4);
        }
        Ok(output)
    }

    fn name(&self) -> &str {
        "ASCIIHexDecode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_whitespace() {
        let out = AsciiHexDecoder.decode(b"48 65 6c\n6C 6F>").unwrap();
        assert_eq!(out, b"Hello");
    }

    #[test]
    fn test_decode_odd_length() {
        let out = AsciiHexDecoder.decode(b"486").unwrap();
        assert_eq!(out, vec![0x48, 0x60]);
    }

    #[test]
    fn test_decode_invalid_digit() {
        assert!(AsciiHexDecoder.decode(b"4G").is_err());
    }
}
