//! ASCII85Decode implementation.
//!
//! Five characters in `!`..=`u` encode four bytes; `z` stands for four zero
//! bytes; `~>` ends the data.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};

/// ASCII85Decode filter implementation.
pub struct Ascii85Decoder;

impl StreamDecoder for Ascii85Decoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() * 4 / 5);
        let mut group = [0u8; 5];
        let mut len = 0usize;

        for &c in input {
            match c {
                b'~' => break,
                b'z' if len == 0 => output.extend_from_slice(&[0; 4]),
                b'z' => {
                    return Err(Error::Decode("ASCII85Decode: 'z' inside a group".to_string()));
                },
                b'!'..=b'u' => {
                    group[len] = c - b'!';
                    len += 1;
                    if len == 5 {
                        output.extend_from_slice(&group_value(&group)?.to_be_bytes());
                        len = 0;
                    }
                },
                _ if c.is_ascii_whitespace() => {},
                _ => {
                    return Err(Error::Decode(format!(
                        "ASCII85Decode: invalid character '{}'",
                        c as char
                    )));
                },
            }
        }

        match len {
            0 => {},
            1 => {
                return Err(Error::Decode("ASCII85Decode: dangling single character".to_string()));
            },
            n => {
                // Pad with 'u' and keep n-1 bytes
                for slot in group.iter_mut().skip(n) {
                    *slot = b'u' - b'!';
                }
                output.extend_from_slice(&group_value(&group)?.to_be_bytes()[..n - 1]);
            },
        }
        Ok(output)
    }

    fn name(&self) -> &str {
        "ASCII85Decode"
    }
}

fn group_value(group: &[u8; 5]) -> Result<u32> {
    group
        .iter()
        .try_fold(0u32, |acc, &d| acc.checked_mul(85)?.checked_add(d as u32))
        .ok_or_else(|| Error::Decode("ASCII85Decode: group overflow".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple() {
        let out = Ascii85Decoder.decode(b"87cURDZ~>").unwrap();
        assert_eq!(out, b"Hello");
    }

    #[test]
    fn test_decode_zero_group() {
        let out = Ascii85Decoder.decode(b"z~>").unwrap();
        assert_eq!(out, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_invalid() {
        assert!(Ascii85Decoder.decode(b"8z7").is_err());
        assert!(Ascii85Decoder.decode(b"{").is_err());
    }
}
