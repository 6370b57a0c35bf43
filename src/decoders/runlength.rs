//! RunLengthDecode implementation.
//!
//! Length byte 0-127 copies the next N+1 bytes, 129-255 repeats the next byte
//! 257-N times, 128 ends the data.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};

/// RunLengthDecode filter implementation.
pub struct RunLengthDecoder;

impl StreamDecoder for RunLengthDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut rest = input;

        while let Some((&length, tail)) = rest.split_first() {
            match length {
                128 => break,
                0..=127 => {
                    let count = length as usize + 1;
                    if tail.len() < count {
                        return Err(Error::Decode(format!(
                            "RunLengthDecode: literal run of {} bytes, {} available",
                            count,
                            tail.len()
                        )));
                    }
                    output.extend_from_slice(&tail[..count]);
                    rest = &tail[count..];
                },
                _ => {
                    let (&byte, tail) = tail.split_first().ok_or_else(|| {
                        Error::Decode("RunLengthDecode: missing byte for run".to_string())
                    })?;
                    output.resize(output.len() + 257 - length as usize, byte);
                    rest = tail;
                },
            }
        }
        Ok(output)
    }

    fn name(&self) -> &str {
        "RunLengthDecode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_and_repeat() {
        let out = RunLengthDecoder.decode(&[2, b'a', b'b', b'c', 254, b'x', 128]).unwrap();
        assert_eq!(out, b"abcxxx");
    }

    #[test]
    fn test_truncated_literal() {
        assert!(RunLengthDecoder.decode(&[4, b'a']).is_err());
    }

    #[test]
    fn test_missing_run_byte() {
        assert!(RunLengthDecoder.decode(&[200]).is_err());
    }
}
