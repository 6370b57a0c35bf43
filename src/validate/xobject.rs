//! External objects.
//!
//! PDF Spec: ISO 32000-1:2008, Section 8.8 - External Objects. Image and form
//! XObjects are validated; PostScript XObjects are rejected as unsupported.

use crate::error::{Error, Result};
use crate::object::{Dictionary, Object, StreamDict};
use crate::validate::date::validate_date_entry;
use crate::validate::entry::{
    name_in, validate_array_entry, validate_boolean_entry, validate_dict_entry,
    validate_int_or_string_entry, validate_integer_array_entry, validate_integer_entry,
    validate_name_entry, validate_number_array_entry, validate_rectangle_entry,
    validate_stream_entry, validate_string_entry,
};
use crate::validate::resources::{for_each_resource, validate_resources};
use crate::validate::{catalog, colorspace, extgstate};
use crate::version::Version;
use crate::xref::XRefTable;

/// Validate the `XObject` category of a resource dictionary.
pub fn validate_xobject_resource_dict(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    for_each_resource(xref, obj, "XObject", validate_xobject)
}

/// Validate an XObject. XObjects are streams and must be indirect.
///
/// Each XObject is validated at most once, so forms that reference each
/// other through their resources terminate.
pub fn validate_xobject(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    let obj_ref = match obj {
        Object::Reference(r) => *r,
        other => return Err(Error::mismatch("xObjectDict", "XObject", "Reference", other.type_name())),
    };
    if !xref.mark_validated(obj_ref, "XObject") {
        log::debug!("XObject {} already validated", obj_ref);
        return Ok(());
    }
    xref.set_current_object(obj_ref);

    let stream = xref
        .dereference_stream(obj)?
        .ok_or(Error::ObjectNotFound(obj_ref))?;

    let subtype = validate_name_entry(xref, &stream.dict, "xObjectDict", "Subtype", true, Version::V10, None)?
        .unwrap_or_default();
    match subtype.as_str() {
        "Image" => validate_image(xref, &stream),
        "Form" => validate_form(xref, &stream),
        "PS" => Err(Error::Unsupported(format!("PostScript XObject {}", obj_ref))),
        other => Err(Error::violation("xObjectDict", "Subtype", format!("/{}", other))),
    }
}

fn validate_image(xref: &mut XRefTable, stream: &StreamDict) -> Result<()> {
    const DICT: &str = "imageDict";
    let dict = &stream.dict;
    let positive = |v: &i64| *v > 0;

    validate_name_entry(xref, dict, DICT, "Type", false, Version::V10, Some(&name_in(&["XObject"])))?;
    validate_integer_entry(xref, dict, DICT, "Width", true, Version::V10, Some(&positive))?;
    validate_integer_entry(xref, dict, DICT, "Height", true, Version::V10, Some(&positive))?;

    let image_mask = validate_boolean_entry(xref, dict, DICT, "ImageMask", false, Version::V10)?.unwrap_or(false);
    let is_jpx = stream.filters.iter().any(|f| f.name == "JPXDecode");

    match dict.get("ColorSpace") {
        Some(cs) if image_mask => {
            if !xref.dereference(cs)?.is_null() {
                return Err(Error::violation(DICT, "ColorSpace", "present on image mask"));
            }
        },
        Some(cs) => colorspace::validate_color_space(xref, cs, true)?,
        None if image_mask || is_jpx => {},
        None => return Err(Error::missing(DICT, "ColorSpace")),
    }

    let bits: fn(&i64) -> bool = if image_mask {
        |b| *b == 1
    } else {
        |b| matches!(b, 1 | 2 | 4 | 8 | 16)
    };
    validate_integer_entry(xref, dict, DICT, "BitsPerComponent", !image_mask && !is_jpx, Version::V10, Some(&bits))?;
    validate_name_entry(
        xref,
        dict,
        DICT,
        "Intent",
        false,
        Version::V11,
        Some(&name_in(extgstate::RENDERING_INTENTS)),
    )?;

    let even = |a: &Vec<Object>| a.len() % 2 == 0;
    if let Some(mask) = dict.get("Mask") {
        xref.validate_version("imageDict.Mask", Version::V13)?;
        match xref.dereference(mask)? {
            Object::Null => {},
            Object::Stream(_) => validate_xobject(xref, mask)?,
            Object::Array(_) => {
                validate_integer_array_entry(xref, dict, DICT, "Mask", false, Version::V13, Some(&even))?;
            },
            other => return Err(Error::mismatch(DICT, "Mask", "Stream or Array", other.type_name())),
        }
    }

    validate_number_array_entry(xref, dict, DICT, "Decode", false, Version::V10, Some(&even))?;
    validate_boolean_entry(xref, dict, DICT, "Interpolate", false, Version::V10)?;
    validate_array_entry(xref, dict, DICT, "Alternates", false, Version::V13, None)?;

    if let Some(smask) = dict.get("SMask") {
        xref.validate_version("imageDict.SMask", Version::V14)?;
        validate_xobject(xref, smask)?;
    }
    validate_integer_entry(
        xref,
        dict,
        DICT,
        "SMaskInData",
        false,
        Version::V15,
        Some(&|v: &i64| (0..=2).contains(v)),
    )?;
    validate_name_entry(xref, dict, DICT, "Name", false, Version::V10, None)?;
    validate_integer_entry(xref, dict, DICT, "StructParent", false, Version::V13, None)?;
    validate_string_entry(xref, dict, DICT, "ID", false, Version::V13, None)?;
    validate_dict_entry(xref, dict, DICT, "OPI", false, Version::V12)?;
    validate_metadata_entry(xref, dict, DICT)?;
    validate_dict_entry(xref, dict, DICT, "OC", false, Version::V15)?;
    Ok(())
}

fn validate_form(xref: &mut XRefTable, stream: &StreamDict) -> Result<()> {
    const DICT: &str = "formStreamDict";
    let dict = &stream.dict;

    validate_name_entry(xref, dict, DICT, "Type", false, Version::V10, Some(&name_in(&["XObject"])))?;
    validate_integer_entry(xref, dict, DICT, "FormType", false, Version::V10, Some(&|t: &i64| *t == 1))?;
    validate_rectangle_entry(xref, dict, DICT, "BBox", true, Version::V10, None)?;
    let six = |a: &Vec<Object>| a.len() == 6;
    validate_number_array_entry(xref, dict, DICT, "Matrix", false, Version::V10, Some(&six))?;

    if let Some(resources) = dict.get("Resources") {
        xref.validate_version("formStreamDict.Resources", Version::V12)?;
        validate_resources(xref, resources)?;
    }

    if let Some(group) = validate_dict_entry(xref, dict, DICT, "Group", false, Version::V14)? {
        validate_group_attributes(xref, &group)?;
    }
    if let Some(reference) = validate_dict_entry(xref, dict, DICT, "Ref", false, Version::V14)? {
        validate_reference_dict(xref, &reference)?;
    }
    validate_metadata_entry(xref, dict, DICT)?;
    validate_dict_entry(xref, dict, DICT, "PieceInfo", false, Version::V13)?;
    validate_date_entry(xref, dict, DICT, "LastModified", false, Version::V13)?;
    validate_integer_entry(xref, dict, DICT, "StructParent", false, Version::V13, None)?;
    validate_integer_entry(xref, dict, DICT, "StructParents", false, Version::V13, None)?;
    validate_dict_entry(xref, dict, DICT, "OPI", false, Version::V12)?;
    validate_dict_entry(xref, dict, DICT, "OC", false, Version::V15)?;
    validate_name_entry(xref, dict, DICT, "Name", false, Version::V10, None)?;
    Ok(())
}

/// Reference XObject dictionary (`Ref`): an embedded page of another file.
fn validate_reference_dict(xref: &XRefTable, dict: &Dictionary) -> Result<()> {
    const DICT: &str = "referenceDict";
    if dict.get("F").map_or(true, Object::is_null) {
        return Err(Error::missing(DICT, "F"));
    }
    validate_int_or_string_entry(xref, dict, DICT, "Page", true, Version::V14)?;
    validate_array_entry(xref, dict, DICT, "ID", false, Version::V14, None)?;
    Ok(())
}

/// Group attributes dictionary (`Group` of a page or form).
pub fn validate_group_attributes(xref: &mut XRefTable, dict: &Dictionary) -> Result<()> {
    const DICT: &str = "groupDict";
    validate_name_entry(xref, dict, DICT, "Type", false, Version::V14, Some(&name_in(&["Group"])))?;
    validate_name_entry(xref, dict, DICT, "S", true, Version::V14, Some(&name_in(&["Transparency"])))?;
    if let Some(cs) = dict.get("CS") {
        colorspace::validate_color_space(xref, cs, true)?;
    }
    validate_boolean_entry(xref, dict, DICT, "I", false, Version::V14)?;
    validate_boolean_entry(xref, dict, DICT, "K", false, Version::V14)?;
    Ok(())
}

/// Optional `Metadata` stream of a dictionary.
pub(crate) fn validate_metadata_entry(xref: &XRefTable, dict: &Dictionary, dict_name: &str) -> Result<()> {
    if let Some(metadata) = validate_stream_entry(xref, dict, dict_name, "Metadata", false, Version::V14)? {
        catalog::validate_metadata_stream(xref, &metadata)?;
    }
    Ok(())
}
