//! Graphics state parameter dictionaries.
//!
//! PDF Spec: ISO 32000-1:2008, Section 8.4.5 - Graphics State Parameter
//! Dictionaries.

use crate::error::{Error, Result};
use crate::object::{Dictionary, Object};
use crate::validate::entry::{
    name_in, validate_boolean_entry, validate_integer_entry, validate_name_entry,
    validate_name_or_array_of_name_entry, validate_number_array_entry, validate_number_entry,
};
use crate::validate::resources::{self, for_each_resource};
use crate::validate::{dict_of, pattern, resolve_once, xobject};
use crate::version::Version;
use crate::xref::XRefTable;

const DICT: &str = "extGStateDict";

/// Rendering intents (Section 8.6.5.8).
pub const RENDERING_INTENTS: &[&str] =
    &["AbsoluteColorimetric", "RelativeColorimetric", "Saturation", "Perceptual"];

/// Blend modes (Section 11.3.5).
pub const BLEND_MODES: &[&str] = &[
    "Normal",
    "Compatible",
    "Multiply",
    "Screen",
    "Overlay",
    "Darken",
    "Lighten",
    "ColorDodge",
    "ColorBurn",
    "HardLight",
    "SoftLight",
    "Difference",
    "Exclusion",
    "Hue",
    "Saturation",
    "Color",
    "Luminosity",
];

/// Validate the `ExtGState` category of a resource dictionary.
pub fn validate_ext_g_state_resource_dict(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    for_each_resource(xref, obj, "ExtGState", validate_ext_g_state)
}

/// Validate one graphics state parameter dictionary.
pub fn validate_ext_g_state(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    let Some(resolved) = resolve_once(xref, obj, "ExtGState")? else {
        return Ok(());
    };
    let dict = dict_of(&resolved, "ExtGState")?.clone();

    validate_name_entry(xref, &dict, DICT, "Type", false, Version::V10, Some(&name_in(&["ExtGState"])))?;

    validate_number_entry(xref, &dict, DICT, "LW", false, Version::V13, Some(&|w: f64| w >= 0.0))?;
    validate_integer_entry(xref, &dict, DICT, "LC", false, Version::V13, Some(&|c: &i64| (0..=2).contains(c)))?;
    validate_integer_entry(xref, &dict, DICT, "LJ", false, Version::V13, Some(&|j: &i64| (0..=2).contains(j)))?;
    validate_number_entry(xref, &dict, DICT, "ML", false, Version::V13, Some(&|m: f64| m >= 1.0))?;
    validate_dash_pattern(xref, &dict)?;
    validate_name_entry(xref, &dict, DICT, "RI", false, Version::V13, Some(&name_in(RENDERING_INTENTS)))?;

    validate_boolean_entry(xref, &dict, DICT, "OP", false, Version::V12)?;
    validate_boolean_entry(xref, &dict, DICT, "op", false, Version::V13)?;
    validate_integer_entry(xref, &dict, DICT, "OPM", false, Version::V13, Some(&|m: &i64| (0..=1).contains(m)))?;
    validate_font_entry(xref, &dict)?;

    validate_function_entry(xref, &dict, "BG", Version::V12, &[])?;
    validate_function_entry(xref, &dict, "BG2", Version::V13, &["Default"])?;
    validate_function_entry(xref, &dict, "UCR", Version::V12, &[])?;
    validate_function_entry(xref, &dict, "UCR2", Version::V13, &["Default"])?;
    validate_transfer_entry(xref, &dict, "TR", Version::V12, &["Identity"])?;
    validate_transfer_entry(xref, &dict, "TR2", Version::V13, &["Identity", "Default"])?;
    validate_halftone_entry(xref, &dict)?;

    validate_number_entry(xref, &dict, DICT, "FL", false, Version::V13, Some(&|f: f64| f >= 0.0))?;
    validate_number_entry(xref, &dict, DICT, "SM", false, Version::V13, Some(&|s: f64| (0.0..=1.0).contains(&s)))?;
    validate_boolean_entry(xref, &dict, DICT, "SA", false, Version::V10)?;

    validate_blend_mode_entry(xref, &dict)?;
    validate_soft_mask_entry(xref, &dict)?;
    let alpha = |a: f64| (0.0..=1.0).contains(&a);
    validate_number_entry(xref, &dict, DICT, "CA", false, Version::V14, Some(&alpha))?;
    validate_number_entry(xref, &dict, DICT, "ca", false, Version::V14, Some(&alpha))?;
    validate_boolean_entry(xref, &dict, DICT, "AIS", false, Version::V14)?;
    validate_boolean_entry(xref, &dict, DICT, "TK", false, Version::V14)?;
    Ok(())
}

/// `D`: `[dashArray dashPhase]`.
fn validate_dash_pattern(xref: &XRefTable, dict: &Dictionary) -> Result<()> {
    let Some(raw) = dict.get("D") else {
        return Ok(());
    };
    xref.validate_version("extGStateDict.D", Version::V13)?;
    let Some(arr) = xref.dereference_array(raw)? else {
        return Ok(());
    };
    let valid = match arr.as_slice() {
        [dashes, phase] => {
            let dashes = xref.dereference_array(dashes)?.unwrap_or_default();
            dashes.iter().all(|d| d.as_number().is_some_and(|v| v >= 0.0))
                && xref.dereference(phase)?.as_number().is_some()
        },
        _ => false,
    };
    if !valid {
        return Err(Error::violation(DICT, "D", Object::Array(arr)));
    }
    Ok(())
}

/// `Font`: `[font size]` with an indirect font dictionary.
fn validate_font_entry(xref: &mut XRefTable, dict: &Dictionary) -> Result<()> {
    let Some(raw) = dict.get("Font") else {
        return Ok(());
    };
    xref.validate_version("extGStateDict.Font", Version::V13)?;
    let Some(arr) = xref.dereference_array(raw)? else {
        return Ok(());
    };
    if let [font @ Object::Reference(_), size] = arr.as_slice() {
        if xref.dereference(size)?.as_number().is_some() {
            return resources::validate_font(xref, font);
        }
    }
    Err(Error::violation(DICT, "Font", Object::Array(arr)))
}

/// Entries holding a function or one of a few names.
fn validate_function_entry(
    xref: &mut XRefTable,
    dict: &Dictionary,
    entry: &str,
    since: Version,
    names: &[&str],
) -> Result<()> {
    let Some(raw) = dict.get(entry) else {
        return Ok(());
    };
    xref.validate_version(&format!("{}.{}", DICT, entry), since)?;
    match xref.dereference(raw)? {
        Object::Null => Ok(()),
        Object::Name(n) if names.contains(&n.as_str()) => Ok(()),
        Object::Name(n) => Err(Error::violation(DICT, entry, format!("/{}", n))),
        _ => pattern::validate_function(xref, raw),
    }
}

/// Transfer functions: a function, an array of four functions, or a name.
fn validate_transfer_entry(
    xref: &mut XRefTable,
    dict: &Dictionary,
    entry: &str,
    since: Version,
    names: &[&str],
) -> Result<()> {
    let Some(raw) = dict.get(entry) else {
        return Ok(());
    };
    match xref.dereference(raw)? {
        Object::Array(functions) => {
            xref.validate_version(&format!("{}.{}", DICT, entry), since)?;
            if functions.len() != 4 {
                return Err(Error::violation(DICT, entry, Object::Array(functions)));
            }
            for f in &functions {
                match xref.dereference(f)? {
                    Object::Name(n) if names.contains(&n.as_str()) => {},
                    _ => pattern::validate_function(xref, f)?,
                }
            }
            Ok(())
        },
        _ => validate_function_entry(xref, dict, entry, since, names),
    }
}

/// `HT`: a halftone dictionary or stream, or `/Default`.
fn validate_halftone_entry(xref: &mut XRefTable, dict: &Dictionary) -> Result<()> {
    let Some(raw) = dict.get("HT") else {
        return Ok(());
    };
    xref.validate_version("extGStateDict.HT", Version::V12)?;
    match xref.dereference(raw)? {
        Object::Null => Ok(()),
        Object::Name(n) if n == "Default" => Ok(()),
        obj @ (Object::Dictionary(_) | Object::Stream(_)) => {
            let ht = dict_of(&obj, "Halftone")?;
            validate_integer_entry(
                xref,
                ht,
                "halfToneDict",
                "HalftoneType",
                true,
                Version::V12,
                Some(&|t: &i64| matches!(t, 1 | 5 | 6 | 10 | 16)),
            )?;
            Ok(())
        },
        other => Err(Error::mismatch(DICT, "HT", "Name, Dictionary or Stream", other.type_name())),
    }
}

/// `BM`: a blend mode name, or since 1.4 an array of them.
fn validate_blend_mode_entry(xref: &XRefTable, dict: &Dictionary) -> Result<()> {
    let allowed = name_in(BLEND_MODES);
    validate_name_or_array_of_name_entry(
        xref,
        dict,
        DICT,
        "BM",
        false,
        Version::V14,
        Some(&allowed),
    )?;
    Ok(())
}

/// `SMask`: `/None` or a soft mask dictionary.
fn validate_soft_mask_entry(xref: &mut XRefTable, dict: &Dictionary) -> Result<()> {
    let Some(raw) = dict.get("SMask") else {
        return Ok(());
    };
    xref.validate_version("extGStateDict.SMask", Version::V14)?;
    match xref.dereference(raw)? {
        Object::Null => Ok(()),
        Object::Name(n) if n == "None" => Ok(()),
        Object::Dictionary(mask) => validate_soft_mask_dict(xref, &mask),
        other => Err(Error::mismatch(DICT, "SMask", "Name or Dictionary", other.type_name())),
    }
}

fn validate_soft_mask_dict(xref: &mut XRefTable, mask: &Dictionary) -> Result<()> {
    const MASK: &str = "softMaskDict";
    validate_name_entry(xref, mask, MASK, "Type", false, Version::V14, Some(&name_in(&["Mask"])))?;
    validate_name_entry(
        xref,
        mask,
        MASK,
        "S",
        true,
        Version::V14,
        Some(&name_in(&["Alpha", "Luminosity"])),
    )?;

    match mask.get("G") {
        Some(group @ Object::Reference(_)) => xobject::validate_xobject(xref, group)?,
        Some(other) => {
            return Err(Error::mismatch(MASK, "G", "Reference", other.type_name()));
        },
        None => return Err(Error::missing(MASK, "G")),
    }

    validate_number_array_entry(xref, mask, MASK, "BC", false, Version::V14, None)?;
    validate_function_entry(xref, mask, "TR", Version::V14, &["Identity"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationConfig;
    use crate::error::ErrorKind;

    fn gs(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    fn xref() -> XRefTable {
        XRefTable::new(Version::V17, ValidationConfig::strict())
    }

    #[test]
    fn test_transparency_entries() {
        let mut xref = xref();
        let ok = gs(vec![
            ("Type", Object::name("ExtGState")),
            ("CA", Object::Real(0.5)),
            ("ca", Object::Integer(1)),
            ("BM", Object::name("Multiply")),
        ]);
        assert!(validate_ext_g_state(&mut xref, &ok).is_ok());

        let bad = gs(vec![("ca", Object::Real(1.5))]);
        assert_eq!(
            validate_ext_g_state(&mut xref, &bad).unwrap_err().kind(),
            ErrorKind::PredicateViolation
        );
    }

    #[test]
    fn test_line_styles() {
        let mut xref = xref();
        assert!(validate_ext_g_state(&mut xref, &gs(vec![("LC", Object::Integer(2))])).is_ok());
        assert!(validate_ext_g_state(&mut xref, &gs(vec![("LJ", Object::Integer(3))])).is_err());
        let dash = gs(vec![(
            "D",
            Object::Array(vec![
                Object::Array(vec![Object::Integer(3), Object::Integer(2)]),
                Object::Integer(0),
            ]),
        )]);
        assert!(validate_ext_g_state(&mut xref, &dash).is_ok());
        let bad_dash = gs(vec![("D", Object::Array(vec![Object::Integer(3)]))]);
        assert!(validate_ext_g_state(&mut xref, &bad_dash).is_err());
    }

    #[test]
    fn test_blend_mode_array() {
        let mut xref = xref();
        let bm = gs(vec![(
            "BM",
            Object::Array(vec![Object::name("Screen"), Object::name("Normal")]),
        )]);
        assert!(validate_ext_g_state(&mut xref, &bm).is_ok());
        let bad = gs(vec![("BM", Object::name("Glow"))]);
        assert!(validate_ext_g_state(&mut xref, &bad).is_err());
    }

    #[test]
    fn test_version_gates() {
        let mut xref = XRefTable::new(Version::V13, ValidationConfig::strict());
        let err = validate_ext_g_state(&mut xref, &gs(vec![("CA", Object::Real(0.5))])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VersionViolation);

        let mut relaxed = XRefTable::new(Version::V13, ValidationConfig::relaxed());
        assert!(validate_ext_g_state(&mut relaxed, &gs(vec![("CA", Object::Real(0.5))])).is_ok());
    }

    #[test]
    fn test_soft_mask_requires_group() {
        let mut xref = xref();
        let mask = gs(vec![(
            "SMask",
            gs(vec![("S", Object::name("Luminosity"))]),
        )]);
        let err = validate_ext_g_state(&mut xref, &mask).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredEntry);
        assert!(validate_ext_g_state(&mut xref, &gs(vec![("SMask", Object::name("None"))])).is_ok());
    }
}
