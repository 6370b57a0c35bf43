//! Resource dictionaries.
//!
//! PDF Spec: ISO 32000-1:2008, Section 7.8.3 - Resource Dictionaries. Each
//! resource category maps names to constructs; every category is handed to
//! the validator registered for it in [`RESOURCE_CATEGORIES`].

use crate::error::{Error, Result};
use crate::object::{Dictionary, Object};
use crate::validate::entry::{name_in, validate_name_array_entry, validate_name_entry};
use crate::validate::{colorspace, dict_of, extgstate, nested, pattern, resolve_once, xobject};
use crate::version::Version;
use crate::xref::XRefTable;

/// Validator for one resource category value.
pub type ConstructValidator = fn(&mut XRefTable, &Object) -> Result<()>;

/// One resource category.
pub struct ResourceCategory {
    /// Key in the resource dictionary
    pub name: &'static str,
    /// Version that introduced the category
    pub since: Version,
    /// Validator for the category's subdictionary
    pub validate: ConstructValidator,
}

/// Resource categories and their validators. `ProcSet` is checked inline.
pub static RESOURCE_CATEGORIES: &[ResourceCategory] = &[
    ResourceCategory {
        name: "ExtGState",
        since: Version::V12,
        validate: extgstate::validate_ext_g_state_resource_dict,
    },
    ResourceCategory {
        name: "ColorSpace",
        since: Version::V10,
        validate: colorspace::validate_color_space_resource_dict,
    },
    ResourceCategory {
        name: "Pattern",
        since: Version::V12,
        validate: pattern::validate_pattern_resource_dict,
    },
    ResourceCategory {
        name: "Shading",
        since: Version::V13,
        validate: pattern::validate_shading_resource_dict,
    },
    ResourceCategory {
        name: "XObject",
        since: Version::V10,
        validate: xobject::validate_xobject_resource_dict,
    },
    ResourceCategory {
        name: "Font",
        since: Version::V10,
        validate: validate_font_resource_dict,
    },
    ResourceCategory {
        name: "Properties",
        since: Version::V12,
        validate: validate_properties_resource_dict,
    },
];

const PROC_SETS: &[&str] = &["PDF", "Text", "ImageB", "ImageC", "ImageI"];

const FONT_SUBTYPES: &[&str] = &[
    "Type0",
    "Type1",
    "MMType1",
    "Type3",
    "TrueType",
    "CIDFontType0",
    "CIDFontType2",
];

/// Validate a resource dictionary, given directly or by reference.
///
/// Returns whether a resource dictionary was present. An indirect resource
/// dictionary shared between pages is validated once.
pub fn validate_resources(xref: &mut XRefTable, obj: &Object) -> Result<bool> {
    let Some(resolved) = resolve_once(xref, obj, "Resources")? else {
        // Null, or a dictionary already validated through another page
        return Ok(!xref.dereference(obj)?.is_null());
    };
    let dict = match resolved {
        Object::Dictionary(d) => d,
        other => {
            return Err(Error::InvalidObjectType {
                expected: "Resource dictionary".to_string(),
                found: other.type_name().to_string(),
            })
        },
    };
    nested(xref, |xref| validate_resource_dict(xref, &dict))?;
    Ok(true)
}

fn validate_resource_dict(xref: &mut XRefTable, dict: &Dictionary) -> Result<()> {
    for category in RESOURCE_CATEGORIES {
        let Some(value) = dict.get(category.name) else {
            continue;
        };
        if xref.dereference(value)?.is_null() {
            continue;
        }
        xref.validate_version(&format!("resourceDict.{}", category.name), category.since)?;
        log::debug!("Validating resource category {}", category.name);
        (category.validate)(xref, value)?;
    }

    if let Some(proc_sets) =
        validate_name_array_entry(xref, dict, "resourceDict", "ProcSet", false, Version::V10, None)?
    {
        if let Some(bad) = proc_sets.iter().find(|p| !PROC_SETS.contains(&p.as_str())) {
            if xref.config().is_relaxed() {
                log::warn!("resourceDict: ignoring unknown procedure set /{}", bad);
            } else {
                return Err(Error::violation("resourceDict", "ProcSet", format!("/{}", bad)));
            }
        }
    }
    Ok(())
}

/// Apply `validate` to every value of a resource category subdictionary.
pub(crate) fn for_each_resource(
    xref: &mut XRefTable,
    obj: &Object,
    category: &str,
    validate: fn(&mut XRefTable, &Object) -> Result<()>,
) -> Result<()> {
    let Some(dict) = xref.dereference_dict(obj)? else {
        return Ok(());
    };
    for (name, value) in &dict {
        log::debug!("Validating {} resource /{}", category, name);
        validate(xref, value)?;
    }
    Ok(())
}

/// Validate the `Font` category.
pub fn validate_font_resource_dict(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    for_each_resource(xref, obj, "Font", validate_font)
}

/// Shallow font dictionary check: `Type`, `Subtype`, `BaseFont`, and Type 3 resources.
pub fn validate_font(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    let Some(font) = resolve_once(xref, obj, "Font")? else {
        return Ok(());
    };
    let dict = dict_of(&font, "Font")?.clone();

    validate_name_entry(xref, &dict, "fontDict", "Type", true, Version::V10, Some(&name_in(&["Font"])))?;
    let subtype = validate_name_entry(
        xref,
        &dict,
        "fontDict",
        "Subtype",
        true,
        Version::V10,
        Some(&name_in(FONT_SUBTYPES)),
    )?
    .unwrap_or_default();

    let is_type3 = subtype == "Type3";
    validate_name_entry(xref, &dict, "fontDict", "BaseFont", !is_type3, Version::V10, None)?;
    if is_type3 {
        if let Some(resources) = dict.get("Resources") {
            xref.validate_version("fontDict.Resources", Version::V12)?;
            validate_resources(xref, resources)?;
        }
    }
    Ok(())
}

/// Validate the `Properties` category: every value is a dictionary.
pub fn validate_properties_resource_dict(xref: &mut XRefTable, obj: &Object) -> Result<()> {
    for_each_resource(xref, obj, "Properties", |xref, value| {
        if xref.dereference_dict(value)?.is_none() {
            return Err(Error::InvalidObjectType {
                expected: "Properties dictionary".to_string(),
                found: "Null".to_string(),
            });
        }
        Ok(())
    })
}
