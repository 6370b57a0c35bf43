//! Validation entry point and report.

mod common;

use common::*;
use pdf_validate::config::{ValidationConfig, ValidationMode};
use pdf_validate::error::{Error, ErrorKind};
use pdf_validate::object::Object;
use pdf_validate::validate::validate_xref_table;
use pdf_validate::version::Version;

#[test]
fn test_report_json() {
    let mut xref = DocBuilder::strict()
        .single_page(vec![("Thumb", ind(9))])
        .object(9, stream(vec![], b"thumb"))
        .build();
    let report = validate_xref_table(&mut xref).unwrap();
    assert_eq!(report.mode, ValidationMode::Strict);
    assert!(!report.skipped);
    assert!(report.validated_objects >= 2);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["page_count"], 1);
    assert_eq!(json["version"], "V17");
    assert_eq!(json["pages"][0]["index"], 1);
    assert_eq!(json["pages"][0]["object"]["id"], 3);
    assert_eq!(json["pages"][0]["media_box"]["urx"], 612.0);
    assert_eq!(json["thumbnails"]["1"]["id"], 9);
}

#[test]
fn test_disabled_mode_skips_everything() {
    // Not even a catalog
    let mut xref = pdf_validate::xref::XRefTable::new(Version::V10, ValidationConfig::disabled());
    xref.insert(r(1), Object::Integer(0)).unwrap();

    let report = validate_xref_table(&mut xref).unwrap();
    assert!(report.skipped);
    assert_eq!(report.mode, ValidationMode::None);
    assert!(report.pages.is_empty());
    assert_eq!(report.validated_objects, 0);
}

#[test]
fn test_catalog_version_in_report() {
    let mut xref = DocBuilder::new(Version::V14, ValidationConfig::strict())
        .catalog_entry("Version", Object::name("1.6"))
        .catalog_entry("PageMode", Object::name("UseAttachments"))
        .single_page(vec![])
        .build();
    let report = validate_xref_table(&mut xref).unwrap();
    assert_eq!(report.version, Version::V16);
}

#[test]
fn test_catalog_version_unparsable() {
    let build = |config| {
        DocBuilder::new(Version::V15, config)
            .catalog_entry("Version", Object::name("1.x"))
            .single_page(vec![])
            .build()
    };

    let mut strict = build(ValidationConfig::strict());
    assert_eq!(validate_xref_table(&mut strict).unwrap_err().kind(), ErrorKind::Malformed);

    let mut relaxed = build(ValidationConfig::relaxed());
    let report = validate_xref_table(&mut relaxed).unwrap();
    assert_eq!(report.version, Version::V15);
}

#[test]
fn test_catalog_type_required() {
    let mut xref = DocBuilder::strict()
        .catalog_entry("Type", Object::name("Pages"))
        .single_page(vec![])
        .build();
    let err = validate_xref_table(&mut xref).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PredicateViolation);
    assert!(matches!(err, Error::Located { object, page: None, .. } if object == r(CATALOG)));
}

#[test]
fn test_info_dictionary_checked() {
    let mut xref = DocBuilder::strict().single_page(vec![]).build();
    let mut trailer = xref.trailer().clone();
    xref.insert(
        r(30),
        Object::Dictionary(dict(vec![("Title", Object::Integer(7))])),
    )
    .unwrap();
    trailer.insert("Info".to_string(), ind(30));
    xref.set_trailer(trailer);

    assert_eq!(validate_xref_table(&mut xref).unwrap_err().kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_error_display_carries_location() {
    let mut xref = DocBuilder::strict()
        .single_page(vec![("UserUnit", Object::Integer(0))])
        .build();
    let err = validate_xref_table(&mut xref).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("UserUnit"), "{}", message);
    assert!(message.contains("3 0 R"), "{}", message);
}
