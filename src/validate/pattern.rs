//! Patterns, shadings and functions.
//!
//! PDF Spec: ISO 32000-1:2008, Sections 8.7 - Patterns and 7.10 - Functions.

use crate::error::{Error, Result};
use crate::object::{Dictionary, Object};
use crate::validate::entry::{
    name_in, validate_boolean_array_entry, validate_boolean_entry, validate_integer_array_entry,
    validate_integer_entry, validate_name_entry, validate_number_array_entry, validate_number_entry,
    validate_rectangle_entry,
};
use crate::validate::resources::{for_each_resource, validate_resources};
use crate::validate::{colorspace, dict_of, extgstate, nested, resolve_once};
use crate::version::Version;
use crate::xref::XRefTable;

fn len_is(n: usize) -> impl Fn(&Vec<Object>) -> bool {
    move |a: &Vec<Object>| a.len() == n
}

fn even_len(a: &Vec<Object>) -> bool {
    !a.is_empty() && a.len() % 2 == 0
}

fn expect_stream(obj: &Object, dict_name: &str, entry: &str) -> Result<()> {
    match obj {
        Object::Stream(_) => Ok(()),
        other => Err(Error::mismatch(dict_name, entry, "Stream", other.type_name())),
    }
}

/// Validate the `Pattern` category of a resource dictionary.
pub fn validate_pattern_resource_dict(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    for_each_resource(xref, obj, "Pattern", validate_pattern)
}

/// Validate the `Shading` category of a resource dictionary.
pub fn validate_shading_resource_dict(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    for_each_resource(xref, obj, "Shading", validate_shading)
}

/// Validate a tiling (type 1) or shading (type 2) pattern.
pub fn validate_pattern(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    let Some(pattern) = resolve_once(xref, obj, "Pattern")? else {
        return Ok(());
    };
    let dict = dict_of(&pattern, "Pattern")?.clone();

    validate_name_entry(xref, &dict, "patternDict", "Type", false, Version::V10, Some(&name_in(&["Pattern"])))?;
    let pattern_type = validate_integer_entry(
        xref,
        &dict,
        "patternDict",
        "PatternType",
        true,
        Version::V12,
        Some(&|t: &i64| matches!(t, 1 | 2)),
    )?
    .unwrap_or_default();

    if pattern_type == 1 {
        expect_stream(&pattern, "patternDict", "PatternType")?;
        validate_tiling_pattern(xref, &dict)
    } else {
        validate_shading_pattern(xref, &dict)
    }
}

fn validate_tiling_pattern(xref: &mut XRefTable, dict: &Dictionary) -> Result<()> {
    const DICT: &str = "tilingPatternDict";
    validate_integer_entry(xref, dict, DICT, "PaintType", true, Version::V10, Some(&|t: &i64| matches!(t, 1 | 2)))?;
    validate_integer_entry(xref, dict, DICT, "TilingType", true, Version::V10, Some(&|t: &i64| (1..=3).contains(t)))?;
    validate_rectangle_entry(xref, dict, DICT, "BBox", true, Version::V10, None)?;
    validate_number_entry(xref, dict, DICT, "XStep", true, Version::V10, Some(&|s: f64| s != 0.0))?;
    validate_number_entry(xref, dict, DICT, "YStep", true, Version::V10, Some(&|s: f64| s != 0.0))?;
    validate_number_array_entry(xref, dict, DICT, "Matrix", false, Version::V10, Some(&len_is(6)))?;

    match dict.get("Resources") {
        Some(resources) => {
            validate_resources(xref, resources)?;
            Ok(())
        },
        None => Err(Error::missing(DICT, "Resources")),
    }
}

fn validate_shading_pattern(xref: &mut XRefTable, dict: &Dictionary) -> Result<()> {
    const DICT: &str = "shadingPatternDict";
    let shading = dict.get("Shading").ok_or_else(|| Error::missing(DICT, "Shading"))?;
    nested(xref, |xref| validate_shading(xref, shading))?;
    validate_number_array_entry(xref, dict, DICT, "Matrix", false, Version::V10, Some(&len_is(6)))?;
    if let Some(gs) = dict.get("ExtGState") {
        extgstate::validate_ext_g_state(xref, gs)?;
    }
    Ok(())
}

/// Validate a shading dictionary (types 1-3) or stream (types 4-7).
pub fn validate_shading(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    let Some(shading) = resolve_once(xref, obj, "Shading")? else {
        return Ok(());
    };
    let dict = dict_of(&shading, "Shading")?.clone();
    const DICT: &str = "shadingDict";

    let shading_type = validate_integer_entry(
        xref,
        &dict,
        DICT,
        "ShadingType",
        true,
        Version::V13,
        Some(&|t: &i64| (1..=7).contains(t)),
    )?
    .unwrap_or_default();

    let cs = dict.get("ColorSpace").ok_or_else(|| Error::missing(DICT, "ColorSpace"))?;
    colorspace::validate_color_space(xref, cs, true)?;
    validate_number_array_entry(xref, &dict, DICT, "Background", false, Version::V10, None)?;
    validate_rectangle_entry(xref, &dict, DICT, "BBox", false, Version::V10, None)?;
    validate_boolean_entry(xref, &dict, DICT, "AntiAlias", false, Version::V10)?;

    match shading_type {
        1 => {
            validate_number_array_entry(xref, &dict, DICT, "Domain", false, Version::V10, Some(&len_is(4)))?;
            validate_number_array_entry(xref, &dict, DICT, "Matrix", false, Version::V10, Some(&len_is(6)))?;
            validate_shading_function(xref, &dict, true)
        },
        2 | 3 => {
            let coords = if shading_type == 2 { 4 } else { 6 };
            validate_number_array_entry(xref, &dict, DICT, "Coords", true, Version::V10, Some(&len_is(coords)))?;
            validate_number_array_entry(xref, &dict, DICT, "Domain", false, Version::V10, Some(&len_is(2)))?;
            validate_boolean_array_entry(xref, &dict, DICT, "Extend", false, Version::V10, Some(&len_is(2)))?;
            validate_shading_function(xref, &dict, true)
        },
        _ => {
            expect_stream(&shading, DICT, "ShadingType")?;
            let bits = |b: &i64| matches!(b, 1 | 2 | 4 | 8 | 12 | 16 | 24 | 32);
            validate_integer_entry(xref, &dict, DICT, "BitsPerCoordinate", true, Version::V10, Some(&bits))?;
            validate_integer_entry(xref, &dict, DICT, "BitsPerComponent", true, Version::V10, Some(&bits))?;
            let flags = |b: &i64| matches!(b, 2 | 4 | 8);
            validate_integer_entry(xref, &dict, DICT, "BitsPerFlag", shading_type != 5, Version::V10, Some(&flags))?;
            validate_number_array_entry(xref, &dict, DICT, "Decode", true, Version::V10, Some(&even_len))?;
            if shading_type == 5 {
                validate_integer_entry(xref, &dict, DICT, "VerticesPerRow", true, Version::V10, Some(&|v: &i64| *v >= 2))?;
            }
            validate_shading_function(xref, &dict, false)
        },
    }
}

/// `Function`: a function, or an array of functions (one per color component).
fn validate_shading_function(xref: &mut XRefTable, dict: &Dictionary, required: bool) -> Result<()> {
    let Some(raw) = dict.get("Function") else {
        return if required {
            Err(Error::missing("shadingDict", "Function"))
        } else {
            Ok(())
        };
    };
    match xref.dereference(raw)? {
        Object::Array(functions) => {
            for f in &functions {
                validate_function(xref, f)?;
            }
            Ok(())
        },
        _ => validate_function(xref, raw),
    }
}

/// Validate a function dictionary or stream.
pub fn validate_function(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    let Some(function) = resolve_once(xref, obj, "Function")? else {
        return Ok(());
    };
    let dict = dict_of(&function, "Function")?.clone();
    const DICT: &str = "functionDict";

    let function_type = validate_integer_entry(
        xref,
        &dict,
        DICT,
        "FunctionType",
        true,
        Version::V12,
        Some(&|t: &i64| matches!(t, 0 | 2 | 3 | 4)),
    )?
    .unwrap_or_default();

    let sampled_or_postscript = matches!(function_type, 0 | 4);
    validate_number_array_entry(xref, &dict, DICT, "Domain", true, Version::V10, Some(&even_len))?;
    validate_number_array_entry(xref, &dict, DICT, "Range", sampled_or_postscript, Version::V10, Some(&even_len))?;

    match function_type {
        0 => {
            expect_stream(&function, DICT, "FunctionType")?;
            validate_integer_array_entry(xref, &dict, DICT, "Size", true, Version::V10, None)?;
            validate_integer_entry(
                xref,
                &dict,
                DICT,
                "BitsPerSample",
                true,
                Version::V10,
                Some(&|b: &i64| matches!(b, 1 | 2 | 4 | 8 | 12 | 16 | 24 | 32)),
            )?;
            validate_integer_entry(xref, &dict, DICT, "Order", false, Version::V10, Some(&|o: &i64| matches!(o, 1 | 3)))?;
            validate_number_array_entry(xref, &dict, DICT, "Encode", false, Version::V10, Some(&even_len))?;
            validate_number_array_entry(xref, &dict, DICT, "Decode", false, Version::V10, Some(&even_len))?;
        },
        2 => {
            validate_number_array_entry(xref, &dict, DICT, "C0", false, Version::V13, None)?;
            validate_number_array_entry(xref, &dict, DICT, "C1", false, Version::V13, None)?;
            validate_number_entry(xref, &dict, DICT, "N", true, Version::V13, None)?;
        },
        3 => {
            let functions = xref
                .dereference_array(dict.get("Functions").unwrap_or(&Object::Null))?
                .ok_or_else(|| Error::missing(DICT, "Functions"))?;
            nested(xref, |xref| {
                functions.iter().try_for_each(|f| validate_function(xref, f))
            })?;
            validate_number_array_entry(xref, &dict, DICT, "Bounds", true, Version::V13, None)?;
            validate_number_array_entry(xref, &dict, DICT, "Encode", true, Version::V13, Some(&even_len))?;
        },
        _ => expect_stream(&function, DICT, "FunctionType")?,
    }
    Ok(())
}
