//! Stream decoders for the PDF filter pipeline.
//!
//! Supported filters:
//! - FlateDecode (zlib/deflate)
//! - ASCIIHexDecode
//! - ASCII85Decode
//! - LZWDecode
//! - RunLengthDecode
//!
//! Flate and LZW output is post-processed by the TIFF or PNG predictor named
//! in `/DecodeParms`.
//!
//! Image codecs (DCTDecode, JPXDecode, CCITTFaxDecode, JBIG2Decode) are left
//! encoded: the validator never needs pixels. Filters are applied in order and
//! every stage is checked against the decompression limits of the
//! [`ValidationConfig`].

use crate::config::ValidationConfig;
use crate::error::{Error, Result};
use crate::object::FilterSpec;

mod ascii85;
mod ascii_hex;
mod flate;
mod lzw;
mod predictor;
mod runlength;

pub use ascii85::Ascii85Decoder;
pub use ascii_hex::AsciiHexDecoder;
pub use flate::FlateDecoder;
pub use lzw::LzwDecoder;
pub use predictor::{decode_predictor, PredictorParams};
pub use runlength::RunLengthDecoder;

/// Trait for PDF stream decoders.
pub trait StreamDecoder {
    /// Decode the input data.
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Name of the filter this decoder implements (e.g., "FlateDecode").
    fn name(&self) -> &str;
}

/// Image codecs whose payload is kept as is.
const PASS_THROUGH_FILTERS: &[&str] = &["DCTDecode", "JPXDecode", "CCITTFaxDecode", "JBIG2Decode"];

/// Decode `data` through a filter pipeline.
///
/// # Security
///
/// The decompression ratio and output size are checked after every stage.
pub fn decode_pipeline(
    data: &[u8],
    filters: &[FilterSpec],
    config: &ValidationConfig,
) -> Result<Vec<u8>> {
    let compressed_size = data.len();
    let mut current = data.to_vec();

    for filter in filters {
        if PASS_THROUGH_FILTERS.contains(&filter.name.as_str()) {
            log::debug!("Leaving {} payload undecoded", filter.name);
            break;
        }

        let decoder: Box<dyn StreamDecoder> = match filter.name.as_str() {
            "FlateDecode" | "Fl" => Box::new(FlateDecoder {
                lenient: config.is_relaxed(),
            }),
            "ASCIIHexDecode" | "AHx" => Box::new(AsciiHexDecoder),
            "ASCII85Decode" | "A85" => Box::new(Ascii85Decoder),
            "LZWDecode" | "LZW" => Box::new(LzwDecoder::from_parms(filter.decode_parms.as_ref())),
            "RunLengthDecode" | "RL" => Box::new(RunLengthDecoder),
            other => return Err(Error::UnsupportedFilter(other.to_string())),
        };

        current = decoder.decode(&current)?;
        check_limits(compressed_size, current.len(), config)?;

        if let Some(params) = predictor_params(filter)? {
            log::debug!("Undoing /Predictor {} after {}", params.predictor, filter.name);
            current = decode_predictor(&current, &params)?;
            check_limits(compressed_size, current.len(), config)?;
        }
    }

    Ok(current)
}

/// Predictor parameters of a Flate or LZW stage, if it uses one.
fn predictor_params(filter: &FilterSpec) -> Result<Option<PredictorParams>> {
    if !matches!(filter.name.as_str(), "FlateDecode" | "Fl" | "LZWDecode" | "LZW") {
        return Ok(None);
    }
    let Some(parms) = &filter.decode_parms else {
        return Ok(None);
    };
    let params = PredictorParams::from_parms(parms)?;
    Ok((params.predictor > 1).then_some(params))
}

fn check_limits(compressed: usize, decoded: usize, config: &ValidationConfig) -> Result<()> {
    let max_ratio = config.max_decompression_ratio as usize;
    if max_ratio > 0 && compressed > 0 && decoded / compressed > max_ratio {
        return Err(Error::Decode(format!(
            "decompression ratio {}:1 exceeds limit {}:1",
            decoded / compressed,
            max_ratio
        )));
    }
    if config.max_decompressed_size > 0 && decoded > config.max_decompressed_size {
        return Err(Error::Decode(format!(
            "decompressed size {} bytes exceeds limit {} bytes",
            decoded, config.max_decompressed_size
        )));
    }
    Ok(())
}
