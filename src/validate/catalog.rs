//! Document catalog and Info dictionary.
//!
//! PDF Spec: ISO 32000-1:2008, Sections 7.7.2 - Document Catalog and 14.3.3 -
//! Document Information Dictionary.

use crate::error::{Error, Result};
use crate::object::{Dictionary, Object, StreamDict};
use crate::validate::date::validate_date_entry;
use crate::validate::entry::{
    name_in, validate_array_entry, validate_boolean_entry, validate_dict_array_entry,
    validate_dict_entry, validate_either, validate_ind_ref_array_entry, validate_integer_entry,
    validate_name_entry, validate_stream_entry, validate_string_entry, ArrayKind, DictKind,
};
use crate::validate::pages::{validate_pages, PageSummary};
use crate::version::{Version, VersionGate};
use crate::xref::XRefTable;

const ROOT: &str = "rootDict";

/// Validate the trailer, the Info dictionary and the document catalog.
///
/// The catalog `/Version` is applied first, so every version-gated check,
/// including those on the Info dictionary, sees the effective version.
pub fn validate_document(xref: &mut XRefTable) -> Result<Vec<PageSummary>> {
    let trailer = xref.trailer().clone();

    let root_ref = match trailer.get("Root") {
        Some(Object::Reference(r)) => *r,
        Some(other) => return Err(Error::mismatch("trailerDict", "Root", "Reference", other.type_name())),
        None => return Err(Error::missing("trailerDict", "Root")),
    };
    xref.set_current_object(root_ref);
    let root = xref
        .dereference_dict(&Object::Reference(root_ref))?
        .ok_or(Error::ObjectNotFound(root_ref))?;
    apply_catalog_version(xref, &root)?;

    validate_document_info(xref, &trailer)?;
    validate_root_object(xref, &root)
}

/// Raise the document version to the catalog `/Version`, if it names one.
///
/// A value of the wrong type is left to the `/Version` entry check.
fn apply_catalog_version(xref: &mut XRefTable, root: &Dictionary) -> Result<()> {
    let Some(raw) = root.get("Version") else {
        return Ok(());
    };
    let Object::Name(name) = xref.dereference(raw)? else {
        return Ok(());
    };
    match Version::parse(&name) {
        Ok(v) => {
            log::debug!("Catalog /Version {} (header {})", v, xref.header_version());
            xref.set_root_version(v);
            Ok(())
        },
        Err(e) if xref.config().is_relaxed() => {
            log::warn!("Ignoring catalog /Version: {}", e);
            Ok(())
        },
        Err(e) => Err(e),
    }
}

/// Validate the document catalog, then walk its page tree.
pub fn validate_root_object(xref: &mut XRefTable, root: &Dictionary) -> Result<Vec<PageSummary>> {
    validate_name_entry(xref, root, ROOT, "Type", true, Version::V10, Some(&name_in(&["Catalog"])))?;

    apply_catalog_version(xref, root)?;
    validate_name_entry(xref, root, ROOT, "Version", false, Version::V14, None)?;

    validate_dict_entry(xref, root, ROOT, "Extensions", false, Version::V17)?;
    validate_dict_entry(xref, root, ROOT, "PageLabels", false, Version::V13)?;
    validate_dict_entry(xref, root, ROOT, "Names", false, Version::V12)?;
    validate_dict_entry(xref, root, ROOT, "Dests", false, Version::V11)?;
    if let Some(prefs) = validate_dict_entry(xref, root, ROOT, "ViewerPreferences", false, Version::V12)? {
        validate_viewer_preferences(xref, &prefs)?;
    }
    validate_page_layout(xref, root)?;
    validate_page_mode(xref, root)?;
    if let Some(outlines) = validate_dict_entry(xref, root, ROOT, "Outlines", false, Version::V10)? {
        validate_name_entry(xref, &outlines, "outlineDict", "Type", false, Version::V10, Some(&name_in(&["Outlines"])))?;
        validate_integer_entry(xref, &outlines, "outlineDict", "Count", false, Version::V10, None)?;
    }
    validate_ind_ref_array_entry(xref, root, ROOT, "Threads", false, Version::V11, None)?;
    validate_either::<ArrayKind, DictKind>(xref, root, ROOT, "OpenAction", false, Version::V11)?;
    validate_dict_entry(xref, root, ROOT, "AA", false, Version::V14)?;
    validate_dict_entry(xref, root, ROOT, "URI", false, Version::V11)?;
    if let Some(form) = validate_dict_entry(xref, root, ROOT, "AcroForm", false, Version::V12)? {
        validate_acro_form(xref, &form)?;
    }
    if let Some(metadata) = validate_stream_entry(xref, root, ROOT, "Metadata", false, Version::V14)? {
        validate_metadata_stream(xref, &metadata)?;
    }
    validate_dict_entry(xref, root, ROOT, "StructTreeRoot", false, Version::V13)?;
    if let Some(mark_info) = validate_dict_entry(xref, root, ROOT, "MarkInfo", false, Version::V14)? {
        validate_boolean_entry(xref, &mark_info, "markInfoDict", "Marked", false, Version::V14)?;
        validate_boolean_entry(xref, &mark_info, "markInfoDict", "UserProperties", false, Version::V16)?;
        validate_boolean_entry(xref, &mark_info, "markInfoDict", "Suspects", false, Version::V16)?;
    }
    validate_string_entry(xref, root, ROOT, "Lang", false, Version::V14, None)?;
    validate_dict_entry(xref, root, ROOT, "SpiderInfo", false, Version::V13)?;
    validate_output_intents(xref, root, ROOT, Version::V14)?;
    validate_dict_entry(xref, root, ROOT, "PieceInfo", false, Version::V14)?;
    if let Some(oc) = validate_dict_entry(xref, root, ROOT, "OCProperties", false, Version::V15)? {
        validate_array_entry(xref, &oc, "optContentPropertiesDict", "OCGs", true, Version::V15, None)?;
        validate_dict_entry(xref, &oc, "optContentPropertiesDict", "D", true, Version::V15)?;
    }
    validate_dict_entry(xref, root, ROOT, "Perms", false, Version::V15)?;
    validate_dict_entry(xref, root, ROOT, "Legal", false, Version::V15)?;
    validate_array_entry(xref, root, ROOT, "Requirements", false, Version::V17, None)?;
    validate_dict_entry(xref, root, ROOT, "Collection", false, Version::V17)?;
    validate_boolean_entry(xref, root, ROOT, "NeedsRendering", false, Version::V17)?;

    validate_pages(xref, root)
}

fn validate_viewer_preferences(xref: &XRefTable, prefs: &Dictionary) -> Result<()> {
    const DICT: &str = "viewerPreferencesDict";
    for flag in ["HideToolbar", "HideMenubar", "HideWindowUI", "FitWindow", "CenterWindow"] {
        validate_boolean_entry(xref, prefs, DICT, flag, false, Version::V10)?;
    }
    validate_boolean_entry(xref, prefs, DICT, "DisplayDocTitle", false, Version::V14)?;
    validate_name_entry(
        xref,
        prefs,
        DICT,
        "NonFullScreenPageMode",
        false,
        Version::V10,
        Some(&name_in(&["UseNone", "UseOutlines", "UseThumbs", "UseOC"])),
    )?;
    validate_name_entry(xref, prefs, DICT, "Direction", false, Version::V13, Some(&name_in(&["L2R", "R2L"])))?;
    validate_name_entry(
        xref,
        prefs,
        DICT,
        "PrintScaling",
        false,
        Version::V16,
        Some(&name_in(&["None", "AppDefault"])),
    )?;
    validate_name_entry(
        xref,
        prefs,
        DICT,
        "Duplex",
        false,
        Version::V17,
        Some(&name_in(&["Simplex", "DuplexFlipShortEdge", "DuplexFlipLongEdge"])),
    )?;
    validate_boolean_entry(xref, prefs, DICT, "PickTrayByPDFSize", false, Version::V17)?;
    validate_integer_entry(xref, prefs, DICT, "NumCopies", false, Version::V17, Some(&|n: &i64| *n >= 1))?;
    Ok(())
}

fn validate_page_layout(xref: &XRefTable, root: &Dictionary) -> Result<()> {
    let layouts = ["SinglePage", "OneColumn", "TwoColumnLeft", "TwoColumnRight", "TwoPageLeft", "TwoPageRight"];
    let Some(layout) = validate_name_entry(xref, root, ROOT, "PageLayout", false, Version::V10, Some(&name_in(&layouts)))?
    else {
        return Ok(());
    };
    if layout.starts_with("TwoPage") {
        xref.validate_version(&format!("rootDict.PageLayout.{}", layout), Version::V15)?;
    }
    Ok(())
}

fn validate_page_mode(xref: &XRefTable, root: &Dictionary) -> Result<()> {
    let modes = ["UseNone", "UseOutlines", "UseThumbs", "FullScreen", "UseOC", "UseAttachments"];
    let Some(mode) = validate_name_entry(xref, root, ROOT, "PageMode", false, Version::V10, Some(&name_in(&modes)))?
    else {
        return Ok(());
    };
    let since = match mode.as_str() {
        "UseOC" => Version::V15,
        "UseAttachments" => Version::V16,
        _ => return Ok(()),
    };
    xref.validate_version(&format!("rootDict.PageMode.{}", mode), since)
}

fn validate_acro_form(xref: &XRefTable, form: &Dictionary) -> Result<()> {
    const DICT: &str = "acroFormDict";
    validate_ind_ref_array_entry(xref, form, DICT, "Fields", true, Version::V12, None)?;
    validate_boolean_entry(xref, form, DICT, "NeedAppearances", false, Version::V12)?;
    validate_integer_entry(xref, form, DICT, "SigFlags", false, Version::V13, Some(&|f: &i64| (0..=3).contains(f)))?;
    validate_ind_ref_array_entry(xref, form, DICT, "CO", false, Version::V13, None)?;
    validate_dict_entry(xref, form, DICT, "DR", false, Version::V12)?;
    validate_string_entry(xref, form, DICT, "DA", false, Version::V12, None)?;
    validate_integer_entry(xref, form, DICT, "Q", false, Version::V12, Some(&|q: &i64| (0..=2).contains(q)))?;
    Ok(())
}

/// `OutputIntents`: an array of output intent dictionaries.
pub(crate) fn validate_output_intents(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    since: impl Into<VersionGate>,
) -> Result<()> {
    const DICT: &str = "outputIntentDict";
    let Some(intents) = validate_dict_array_entry(xref, dict, dict_name, "OutputIntents", false, since, None)? else {
        return Ok(());
    };
    for intent in &intents {
        validate_name_entry(xref, intent, DICT, "Type", false, Version::V10, Some(&name_in(&["OutputIntent"])))?;
        validate_name_entry(xref, intent, DICT, "S", true, Version::V10, None)?;
        validate_string_entry(xref, intent, DICT, "OutputConditionIdentifier", true, Version::V10, None)?;
        validate_string_entry(xref, intent, DICT, "OutputCondition", false, Version::V10, None)?;
        validate_string_entry(xref, intent, DICT, "RegistryName", false, Version::V10, None)?;
        validate_string_entry(xref, intent, DICT, "Info", false, Version::V10, None)?;
        validate_stream_entry(xref, intent, DICT, "DestOutputProfile", false, Version::V10)?;
    }
    Ok(())
}

/// Metadata stream: `/Type /Metadata /Subtype /XML`.
///
/// In relaxed mode both entries may be missing, but not wrong.
pub fn validate_metadata_stream(xref: &XRefTable, stream: &StreamDict) -> Result<()> {
    const DICT: &str = "metaDataDict";
    let required = xref.config().is_strict();
    validate_name_entry(xref, &stream.dict, DICT, "Type", required, Version::V14, Some(&name_in(&["Metadata"])))?;
    validate_name_entry(xref, &stream.dict, DICT, "Subtype", required, Version::V14, Some(&name_in(&["XML"])))?;
    Ok(())
}

/// Validate the trailer's optional `Info` dictionary.
pub fn validate_document_info(xref: &XRefTable, trailer: &Dictionary) -> Result<()> {
    const DICT: &str = "infoDict";
    let Some(raw) = trailer.get("Info") else {
        return Ok(());
    };
    let Some(info) = xref.dereference_dict(raw)? else {
        log::debug!("Trailer /Info does not resolve");
        return Ok(());
    };

    for (entry, since) in [
        ("Title", Version::V11),
        ("Author", Version::V10),
        ("Subject", Version::V11),
        ("Keywords", Version::V11),
        ("Creator", Version::V10),
        ("Producer", Version::V10),
    ] {
        validate_string_entry(xref, &info, DICT, entry, false, since, None)?;
    }
    validate_date_entry(xref, &info, DICT, "CreationDate", false, Version::V10)?;
    validate_date_entry(xref, &info, DICT, "ModDate", false, Version::V11)?;

    let trapped = info.get("Trapped").map(|t| xref.dereference(t)).transpose()?;
    match trapped {
        Some(Object::Boolean(b)) if xref.config().is_relaxed() => {
            log::warn!("infoDict: /Trapped written as boolean {}", b);
        },
        _ => {
            validate_name_entry(
                xref,
                &info,
                DICT,
                "Trapped",
                false,
                Version::V13,
                Some(&name_in(&["True", "False", "Unknown"])),
            )?;
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationConfig;
    use crate::error::ErrorKind;
    use crate::object::ObjectRef;

    fn dict(entries: Vec<(&str, Object)>) -> Dictionary {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn with_info(config: ValidationConfig, info: Dictionary) -> (XRefTable, Dictionary) {
        let mut xref = XRefTable::new(Version::V17, config);
        let r = ObjectRef::new(9, 0);
        xref.insert(r, Object::Dictionary(info)).unwrap();
        let trailer = dict(vec![("Info", Object::Reference(r))]);
        (xref, trailer)
    }

    #[test]
    fn test_info_strings_and_dates() {
        let (xref, trailer) = with_info(
            ValidationConfig::strict(),
            dict(vec![
                ("Title", Object::string("Report")),
                ("Producer", Object::HexString(b"pdf".to_vec())),
                ("CreationDate", Object::string("D:20230401120000Z")),
                ("Trapped", Object::name("Unknown")),
            ]),
        );
        assert!(validate_document_info(&xref, &trailer).is_ok());
    }

    #[test]
    fn test_info_bad_date() {
        let info = dict(vec![("ModDate", Object::string("April 1st"))]);
        let (xref, trailer) = with_info(ValidationConfig::strict(), info.clone());
        assert_eq!(
            validate_document_info(&xref, &trailer).unwrap_err().kind(),
            ErrorKind::PredicateViolation
        );

        let (xref, trailer) = with_info(ValidationConfig::relaxed(), info);
        assert!(validate_document_info(&xref, &trailer).is_ok());
    }

    #[test]
    fn test_trapped_boolean_relaxed_only() {
        let info = dict(vec![("Trapped", Object::Boolean(true))]);
        let (xref, trailer) = with_info(ValidationConfig::strict(), info.clone());
        assert_eq!(validate_document_info(&xref, &trailer).unwrap_err().kind(), ErrorKind::TypeMismatch);

        let (xref, trailer) = with_info(ValidationConfig::relaxed(), info);
        assert!(validate_document_info(&xref, &trailer).is_ok());
    }

    #[test]
    fn test_page_mode_versions() {
        let xref = XRefTable::new(Version::V14, ValidationConfig::strict());
        let root = dict(vec![("PageMode", Object::name("UseAttachments"))]);
        assert_eq!(validate_page_mode(&xref, &root).unwrap_err().kind(), ErrorKind::VersionViolation);

        let root = dict(vec![("PageMode", Object::name("UseOutlines"))]);
        assert!(validate_page_mode(&xref, &root).is_ok());
    }

    #[test]
    fn test_metadata_stream() {
        let strict = XRefTable::new(Version::V17, ValidationConfig::strict());
        let relaxed = XRefTable::new(Version::V17, ValidationConfig::relaxed());
        let bare = StreamDict::new(Dictionary::new(), &b"<x/>"[..]);
        assert!(validate_metadata_stream(&strict, &bare).is_err());
        assert!(validate_metadata_stream(&relaxed, &bare).is_ok());

        let typed = StreamDict::new(
            dict(vec![("Type", Object::name("Metadata")), ("Subtype", Object::name("XML"))]),
            &b"<x/>"[..],
        );
        assert!(validate_metadata_stream(&strict, &typed).is_ok());
    }

    #[test]
    fn test_root_must_be_reference() {
        let mut xref = XRefTable::new(Version::V17, ValidationConfig::strict());
        xref.set_trailer(dict(vec![("Root", Object::Dictionary(Dictionary::new()))]));
        assert_eq!(validate_document(&mut xref).unwrap_err().kind(), ErrorKind::TypeMismatch);

        xref.set_trailer(Dictionary::new());
        assert_eq!(validate_document(&mut xref).unwrap_err().kind(), ErrorKind::MissingRequiredEntry);
    }
}
