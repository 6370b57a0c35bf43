//! Predictor post-processing for FlateDecode and LZWDecode.
//!
//! PDF Spec: ISO 32000-1:2008, Section 7.4.4.4 - LZW and Flate Predictor
//! Functions. `/Predictor 2` is TIFF horizontal differencing; 10 to 15 are PNG
//! filters, where every row starts with a tag byte naming the filter used for
//! that row.

use crate::error::{Error, Result};
use crate::object::{Dictionary, Object};

/// Row layout taken from a filter's `/DecodeParms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictorParams {
    /// `/Predictor` (1 = none, 2 = TIFF, 10-15 = PNG)
    pub predictor: i64,
    /// `/Columns`: samples per row
    pub columns: usize,
    /// `/Colors`: components per sample
    pub colors: usize,
    /// `/BitsPerComponent`
    pub bits_per_component: usize,
}

impl Default for PredictorParams {
    fn default() -> Self {
        Self {
            predictor: 1,
            columns: 1,
            colors: 1,
            bits_per_component: 8,
        }
    }
}

impl PredictorParams {
    /// Read the predictor entries of a `/DecodeParms` dictionary.
    pub fn from_parms(parms: &Dictionary) -> Result<Self> {
        let defaults = Self::default();
        let get = |key: &str, default: i64| -> Result<i64> {
            match parms.get(key) {
                None | Some(Object::Null) => Ok(default),
                Some(Object::Integer(v)) => Ok(*v),
                Some(other) => Err(Error::Decode(format!(
                    "/DecodeParms /{} must be an integer, found {}",
                    key,
                    other.type_name()
                ))),
            }
        };
        let positive = |key: &str, v: i64| -> Result<usize> {
            usize::try_from(v)
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| Error::Decode(format!("/DecodeParms /{} out of range: {}", key, v)))
        };

        let params = Self {
            predictor: get("Predictor", defaults.predictor)?,
            columns: positive("Columns", get("Columns", 1)?)?,
            colors: positive("Colors", get("Colors", 1)?)?,
            bits_per_component: positive("BitsPerComponent", get("BitsPerComponent", 8)?)?,
        };
        if !matches!(params.bits_per_component, 1 | 2 | 4 | 8 | 16) {
            return Err(Error::Decode(format!(
                "/DecodeParms /BitsPerComponent {} is not 1, 2, 4, 8 or 16",
                params.bits_per_component
            )));
        }
        Ok(params)
    }

    /// Bytes of sample data per row, without the PNG tag byte.
    pub fn row_bytes(&self) -> usize {
        (self.columns * self.colors * self.bits_per_component).div_ceil(8)
    }

    /// Distance in bytes to the corresponding byte of the previous sample, at least 1.
    fn sample_bytes(&self) -> usize {
        (self.colors * self.bits_per_component).div_ceil(8).max(1)
    }
}

/// Undo the predictor described by `params`.
pub fn decode_predictor(data: &[u8], params: &PredictorParams) -> Result<Vec<u8>> {
    match params.predictor {
        1 => Ok(data.to_vec()),
        2 => decode_tiff(data, params),
        10..=15 => decode_png(data, params),
        other => Err(Error::Decode(format!("unknown /Predictor {}", other))),
    }
}

/// TIFF Predictor 2, for 8-bit components.
fn decode_tiff(data: &[u8], params: &PredictorParams) -> Result<Vec<u8>> {
    if params.bits_per_component != 8 {
        return Err(Error::Unsupported(format!(
            "TIFF predictor with {} bits per component",
            params.bits_per_component
        )));
    }
    let row_bytes = params.row_bytes();
    let colors = params.colors;

    let mut output = Vec::with_capacity(data.len());
    for row in data.chunks(row_bytes) {
        let start = output.len();
        for (i, &byte) in row.iter().enumerate() {
            let left = if i >= colors { output[start + i - colors] } else { 0 };
            output.push(byte.wrapping_add(left));
        }
    }
    Ok(output)
}

/// PNG predictors. The per-row tag byte decides the filter for every value 10-15.
fn decode_png(data: &[u8], params: &PredictorParams) -> Result<Vec<u8>> {
    let row_bytes = params.row_bytes();
    let stride = row_bytes + 1;
    let bpp = params.sample_bytes();

    if data.len() % stride != 0 {
        return Err(Error::Decode(format!(
            "predicted data length {} is not a multiple of row size {}",
            data.len(),
            stride
        )));
    }

    let mut output = Vec::with_capacity(data.len() / stride * row_bytes);
    let mut previous = vec![0u8; row_bytes];
    let mut current = vec![0u8; row_bytes];

    for row in data.chunks(stride) {
        let (tag, encoded) = (row[0], &row[1..]);
        for i in 0..row_bytes {
            let left = if i >= bpp { current[i - bpp] } else { 0 };
            let up = previous[i];
            let up_left = if i >= bpp { previous[i - bpp] } else { 0 };
            let predicted = match tag {
                0 => 0,
                1 => left,
                2 => up,
                3 => ((left as u16 + up as u16) / 2) as u8,
                4 => paeth(left, up, up_left),
                other => return Err(Error::Decode(format!("invalid PNG filter tag {}", other))),
            };
            current[i] = encoded[i].wrapping_add(predicted);
        }
        output.extend_from_slice(&current);
        std::mem::swap(&mut previous, &mut current);
    }
    Ok(output)
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let (ia, ib, ic) = (a as i16, b as i16, c as i16);
    let p = ia + ib - ic;
    let (pa, pb, pc) = ((p - ia).abs(), (p - ib).abs(), (p - ic).abs());
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}
