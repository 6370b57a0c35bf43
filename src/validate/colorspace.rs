//! Color spaces.
//!
//! PDF Spec: ISO 32000-1:2008, Section 8.6 - Colour Spaces.

use crate::error::{Error, Result};
use crate::object::{Object, ObjectRef};
use crate::validate::entry::{
    validate_integer_entry, validate_number_array_entry, validate_number_entry, validate_stream_entry,
};
use crate::validate::resources::for_each_resource;
use crate::validate::{catalog, nested, pattern};
use crate::version::Version;
use crate::xref::XRefTable;

/// Size of the ICC profile header.
const ICC_HEADER_LEN: usize = 128;
/// Offset of the `acsp` profile file signature in the header.
const ICC_SIGNATURE_OFFSET: usize = 36;

/// Validate the `ColorSpace` category of a resource dictionary.
pub fn validate_color_space_resource_dict(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    for_each_resource(xref, obj, "ColorSpace", |xref, cs| validate_color_space(xref, cs, false))
}

/// Validate a color space given by name or array.
///
/// `exclude_pattern` forbids the `Pattern` family, as in the base space of an
/// uncolored pattern or the alternate space of a separation.
pub fn validate_color_space(xref: &mut XRefTable, obj: &Object, exclude_pattern: bool) -> Result<()> {
    match xref.dereference(obj)? {
        Object::Name(name) => validate_color_space_name(xref, &name, exclude_pattern),
        Object::Array(arr) => nested(xref, |xref| validate_color_space_array(xref, &arr, exclude_pattern)),
        other => Err(Error::mismatch("colorSpace", "ColorSpace", "Name or Array", other.type_name())),
    }
}

fn validate_color_space_name(xref: &XRefTable, name: &str, exclude_pattern: bool) -> Result<()> {
    match name {
        "DeviceGray" | "DeviceRGB" | "DeviceCMYK" => Ok(()),
        "Pattern" if !exclude_pattern => Ok(()),
        "G" | "RGB" | "CMYK" if xref.config().is_relaxed() => {
            log::warn!("Abbreviated color space name /{} outside inline image", name);
            Ok(())
        },
        _ => Err(Error::violation("colorSpace", "ColorSpace", format!("/{}", name))),
    }
}

fn validate_color_space_array(
    xref: &mut XRefTable,
    arr: &[Object],
    exclude_pattern: bool,
) -> Result<()> {
    let family = match arr.first().map(|f| xref.dereference(f)).transpose()? {
        Some(Object::Name(n)) => n,
        _ => {
            return Err(Error::violation(
                "colorSpace",
                "ColorSpace",
                Object::Array(arr.to_vec()),
            ))
        },
    };
    let context = format!("colorSpace.{}", family);
    let check_len = |ok: bool| -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(Error::violation("colorSpace", &family, Object::Array(arr.to_vec())))
        }
    };

    match family.as_str() {
        "DeviceGray" | "DeviceRGB" | "DeviceCMYK" if arr.len() == 1 => {
            validate_color_space_name(xref, &family, exclude_pattern)
        },
        "CalGray" | "CalRGB" | "Lab" => {
            check_len(arr.len() == 2)?;
            xref.validate_version(&context, Version::V11)?;
            validate_cie_dict(xref, &family, &arr[1])
        },
        "ICCBased" => {
            check_len(arr.len() == 2)?;
            xref.validate_version(&context, Version::V13)?;
            match &arr[1] {
                Object::Reference(r) => validate_icc_based(xref, *r),
                other => Err(Error::mismatch("colorSpace", "ICCBased", "Reference", other.type_name())),
            }
        },
        "Indexed" | "I" => {
            check_len(arr.len() == 4)?;
            xref.validate_version(&context, Version::V11)?;
            validate_indexed(xref, arr)
        },
        "Pattern" if !exclude_pattern => {
            check_len(arr.len() == 1 || arr.len() == 2)?;
            xref.validate_version(&context, Version::V12)?;
            match arr.get(1) {
                Some(base) => validate_color_space(xref, base, true),
                None => Ok(()),
            }
        },
        "Separation" => {
            check_len(arr.len() == 4)?;
            xref.validate_version(&context, Version::V12)?;
            if xref.dereference(&arr[1])?.as_name().is_none() {
                return Err(Error::mismatch("colorSpace", "Separation[1]", "Name", arr[1].type_name()));
            }
            validate_alternate(xref, &arr[2])?;
            pattern::validate_function(xref, &arr[3])
        },
        "DeviceN" => {
            check_len(arr.len() == 4 || arr.len() == 5)?;
            xref.validate_version(&context, Version::V13)?;
            let names = xref.dereference_array(&arr[1])?.unwrap_or_default();
            if names.is_empty() || names.iter().any(|n| n.as_name().is_none()) {
                return Err(Error::violation("colorSpace", "DeviceN[1]", arr[1].clone()));
            }
            validate_alternate(xref, &arr[2])?;
            pattern::validate_function(xref, &arr[3])?;
            if let Some(attrs) = arr.get(4) {
                if xref.dereference_dict(attrs)?.is_none() {
                    return Err(Error::mismatch("colorSpace", "DeviceN[4]", "Dictionary", "Null"));
                }
            }
            Ok(())
        },
        _ => Err(Error::violation("colorSpace", "ColorSpace", format!("/{}", family))),
    }
}

/// Alternate space of a Separation or DeviceN space: no special families.
fn validate_alternate(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    if let Object::Array(arr) = xref.dereference(obj)? {
        if let Some(Object::Name(family)) = arr.first() {
            if matches!(family.as_str(), "Indexed" | "Separation" | "DeviceN" | "Pattern") {
                return Err(Error::violation("colorSpace", "Alternate", format!("/{}", family)));
            }
        }
    }
    validate_color_space(xref, obj, true)
}

fn validate_cie_dict(xref: &mut XRefTable, family: &str, obj: &Object) -> Result<()> {
    let dict = xref
        .dereference_dict(obj)?
        .ok_or_else(|| Error::missing("colorSpace", family))?;
    let dict_name = format!("{}Dict", family);
    let three = |a: &Vec<Object>| a.len() == 3;

    validate_number_array_entry(xref, &dict, &dict_name, "WhitePoint", true, Version::V10, Some(&three))?;
    validate_number_array_entry(xref, &dict, &dict_name, "BlackPoint", false, Version::V10, Some(&three))?;

    match family {
        "CalGray" => {
            validate_number_entry(xref, &dict, &dict_name, "Gamma", false, Version::V10, Some(&|g: f64| g > 0.0))?;
        },
        "CalRGB" => {
            let nine = |a: &Vec<Object>| a.len() == 9;
            validate_number_array_entry(xref, &dict, &dict_name, "Gamma", false, Version::V10, Some(&three))?;
            validate_number_array_entry(xref, &dict, &dict_name, "Matrix", false, Version::V10, Some(&nine))?;
        },
        _ => {
            let four = |a: &Vec<Object>| a.len() == 4;
            validate_number_array_entry(xref, &dict, &dict_name, "Range", false, Version::V10, Some(&four))?;
        },
    }
    Ok(())
}

fn validate_indexed(xref: &mut XRefTable, arr: &[Object]) -> Result<()> {
    if let Object::Array(base) = xref.dereference(&arr[1])? {
        if matches!(base.first().and_then(Object::as_name), Some("Indexed" | "I" | "Pattern")) {
            return Err(Error::violation("colorSpace", "Indexed[1]", arr[1].clone()));
        }
    }
    validate_color_space(xref, &arr[1], true)?;

    match xref.dereference(&arr[2])? {
        Object::Integer(hival) if (0..=255).contains(&hival) => {},
        other => return Err(Error::violation("colorSpace", "Indexed[2]", other)),
    }

    match xref.dereference(&arr[3])? {
        Object::String(_) | Object::HexString(_) => Ok(()),
        Object::Stream(_) => xref.validate_version("colorSpace.Indexed.lookup", Version::V12),
        other => Err(Error::mismatch("colorSpace", "Indexed[3]", "String or Stream", other.type_name())),
    }
}

/// Validate an ICC profile stream (`ICCBased` color space).
///
/// The stream is latched: a profile shared by several color spaces is checked
/// once. In strict mode the decoded profile must carry the `acsp` signature.
pub fn validate_icc_based(xref: &mut XRefTable, obj_ref: ObjectRef) -> Result<()> {
    if !xref.mark_validated(obj_ref, "ICCBased") {
        return Ok(());
    }
    xref.set_current_object(obj_ref);

    let stream = xref
        .dereference_stream(&Object::Reference(obj_ref))?
        .ok_or(Error::ObjectNotFound(obj_ref))?;
    let dict = &stream.dict;

    let n = validate_integer_entry(
        xref,
        dict,
        "iccProfileStream",
        "N",
        true,
        Version::V13,
        Some(&|n: &i64| matches!(n, 1 | 3 | 4)),
    )?
    .unwrap_or_default();

    if let Some(alternate) = dict.get("Alternate") {
        validate_color_space(xref, alternate, true)?;
    }

    let range_len = (2 * n) as usize;
    let range = |a: &Vec<Object>| a.len() == range_len;
    validate_number_array_entry(xref, dict, "iccProfileStream", "Range", false, Version::V13, Some(&range))?;

    if let Some(metadata) = validate_stream_entry(xref, dict, "iccProfileStream", "Metadata", false, Version::V14)? {
        catalog::validate_metadata_stream(xref, &metadata)?;
    }

    if xref.config().is_strict() {
        let profile = xref.decoded_stream(obj_ref)?;
        let signed = profile.len() >= ICC_HEADER_LEN
            && &profile[ICC_SIGNATURE_OFFSET..ICC_SIGNATURE_OFFSET + 4] == b"acsp";
        if !signed {
            return Err(Error::violation(
                "iccProfileStream",
                "profile",
                format!("{} bytes without acsp signature", profile.len()),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationConfig;
    use crate::error::ErrorKind;
    use crate::object::{Dictionary, StreamDict};

    fn profile() -> Vec<u8> {
        let mut data = vec![0u8; ICC_HEADER_LEN];
        data[ICC_SIGNATURE_OFFSET..ICC_SIGNATURE_OFFSET + 4].copy_from_slice(b"acsp");
        data
    }

    fn icc_stream(n: i64, data: Vec<u8>) -> Object {
        let mut dict = Dictionary::new();
        dict.insert("N".to_string(), Object::Integer(n));
        Object::Stream(StreamDict::new(dict, data))
    }

    #[test]
    fn test_device_names() {
        let mut xref = XRefTable::new(Version::V17, ValidationConfig::strict());
        assert!(validate_color_space(&mut xref, &Object::name("DeviceRGB"), false).is_ok());
        assert!(validate_color_space(&mut xref, &Object::name("Pattern"), false).is_ok());
        assert!(validate_color_space(&mut xref, &Object::name("Pattern"), true).is_err());
        assert!(validate_color_space(&mut xref, &Object::name("RGB"), false).is_err());

        let mut relaxed = XRefTable::new(Version::V17, ValidationConfig::relaxed());
        assert!(validate_color_space(&mut relaxed, &Object::name("RGB"), false).is_ok());
    }

    #[test]
    fn test_icc_based_components() {
        let mut xref = XRefTable::new(Version::V17, ValidationConfig::strict());
        let good = ObjectRef::new(1, 0);
        let bad = ObjectRef::new(2, 0);
        xref.insert(good, icc_stream(3, profile())).unwrap();
        xref.insert(bad, icc_stream(2, profile())).unwrap();

        let cs = |r| Object::Array(vec![Object::name("ICCBased"), Object::Reference(r)]);
        assert!(validate_color_space(&mut xref, &cs(good), false).is_ok());
        let err = validate_color_space(&mut xref, &cs(bad), false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PredicateViolation);
    }

    #[test]
    fn test_icc_based_signature_strict_only() {
        let mut strict = XRefTable::new(Version::V17, ValidationConfig::strict());
        let r = ObjectRef::new(1, 0);
        strict.insert(r, icc_stream(1, vec![0u8; 64])).unwrap();
        assert!(validate_icc_based(&mut strict, r).is_err());

        let mut relaxed = XRefTable::new(Version::V17, ValidationConfig::relaxed());
        relaxed.insert(r, icc_stream(1, vec![0u8; 64])).unwrap();
        assert!(validate_icc_based(&mut relaxed, r).is_ok());
    }

    #[test]
    fn test_icc_based_latched() {
        let mut xref = XRefTable::new(Version::V17, ValidationConfig::strict());
        let r = ObjectRef::new(1, 0);
        xref.insert(r, icc_stream(4, profile())).unwrap();
        validate_icc_based(&mut xref, r).unwrap();
        assert!(xref.is_valid(r));
        // Second visit short-circuits even though the stream is gone
        if let Some(obj) = xref.find_mut(r) {
            *obj = Object::Null;
        }
        assert!(validate_icc_based(&mut xref, r).is_ok());
    }

    #[test]
    fn test_icc_based_direct_stream_rejected() {
        let mut xref = XRefTable::new(Version::V17, ValidationConfig::strict());
        let cs = Object::Array(vec![Object::name("ICCBased"), icc_stream(3, profile())]);
        let err = validate_color_space(&mut xref, &cs, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_indexed() {
        let mut xref = XRefTable::new(Version::V17, ValidationConfig::strict());
        let cs = Object::Array(vec![
            Object::name("Indexed"),
            Object::name("DeviceRGB"),
            Object::Integer(1),
            Object::HexString(vec![0; 6]),
        ]);
        assert!(validate_color_space(&mut xref, &cs, false).is_ok());

        let cs = Object::Array(vec![
            Object::name("Indexed"),
            Object::name("DeviceRGB"),
            Object::Integer(256),
            Object::HexString(vec![]),
        ]);
        assert!(validate_color_space(&mut xref, &cs, false).is_err());
    }

    #[test]
    fn test_cal_rgb_version_gate() {
        let mut xref = XRefTable::new(Version::V10, ValidationConfig::strict());
        let mut cal = Dictionary::new();
        cal.insert(
            "WhitePoint".to_string(),
            Object::Array(vec![Object::Real(0.95), Object::Integer(1), Object::Real(1.09)]),
        );
        let cs = Object::Array(vec![Object::name("CalRGB"), Object::Dictionary(cal)]);
        let err = validate_color_space(&mut xref, &cs, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VersionViolation);
    }
}
