//! LZWDecode implementation.
//!
//! PDF's LZW uses MSB-first codes starting at 9 bits, with the code width
//! growing one code early unless `/EarlyChange 0` is given (PDF Reference,
//! Section 7.4.4).

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};
use crate::object::{Dictionary, Object};
use weezl::{decode::Decoder as WeezlDecoder, BitOrder};

/// LZWDecode filter implementation.
pub struct LzwDecoder {
    /// Value of `/EarlyChange` (default 1)
    pub early_change: bool,
}

impl LzwDecoder {
    /// Build from the filter's `/DecodeParms`.
    pub fn from_parms(parms: Option<&Dictionary>) -> Self {
        let early_change = parms
            .and_then(|p| p.get("EarlyChange"))
            .and_then(Object::as_integer)
            .map_or(true, |v| v != 0);
        Self { early_change }
    }
}

impl StreamDecoder for LzwDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = if self.early_change {
            WeezlDecoder::with_tiff_size_switch(BitOrder::Msb, 8)
        } else {
            WeezlDecoder::new(BitOrder::Msb, 8)
        };
        decoder
            .decode(input)
            .map_err(|e| Error::Decode(format!("LZWDecode: {:?}", e)))
    }

    fn name(&self) -> &str {
        "LZWDecode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weezl::encode::Encoder as WeezlEncoder;

    #[test]
    fn test_lzw_round_trip() {
        let data = b"-----A---B-----A---B-----A---B";
        let encoded = WeezlEncoder::with_tiff_size_switch(BitOrder::Msb, 8)
            .encode(data)
            .unwrap();
        let out = LzwDecoder::from_parms(None).decode(&encoded).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_early_change_parm() {
        let mut parms = Dictionary::new();
        parms.insert("EarlyChange".to_string(), Object::Integer(0));
        assert!(!LzwDecoder::from_parms(Some(&parms)).early_change);
        assert!(LzwDecoder::from_parms(None).early_change);
    }
}
