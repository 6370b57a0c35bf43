//! FlateDecode (zlib/deflate) implementation.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};
use flate2::read::{DeflateDecoder, ZlibDecoder};
use std::io::Read;

/// FlateDecode filter implementation.
///
/// In lenient mode a corrupt zlib stream is retried as raw deflate, and
/// whatever was inflated before the corruption is kept.
pub struct FlateDecoder {
    /// Recover from corrupt streams instead of failing
    pub lenient: bool,
}

impl StreamDecoder for FlateDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let err = match ZlibDecoder::new(input).read_to_end(&mut output) {
            Ok(_) => return Ok(output),
            Err(e) => e,
        };

        if !self.lenient {
            return Err(Error::Decode(format!("FlateDecode: {}", err)));
        }

        if !output.is_empty() {
            log::warn!(
                "FlateDecode partial recovery: kept {} bytes before corruption: {}",
                output.len(),
                err
            );
            return Ok(output);
        }

        // Some writers omit the zlib wrapper
        log::info!("Zlib decode failed ({}), retrying as raw deflate", err);
        output.clear();
        match DeflateDecoder::new(input).read_to_end(&mut output) {
            Ok(_) => Ok(output),
            Err(_) if !output.is_empty() => Ok(output),
            Err(e) => Err(Error::Decode(format!("FlateDecode: {}", e))),
        }
    }

    fn name(&self) -> &str {
        "FlateDecode"
    }
}
