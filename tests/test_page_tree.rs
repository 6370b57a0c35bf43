//! Page tree traversal: counting, inheritance and node consistency.

mod common;

use common::*;
use pdf_validate::config::ValidationConfig;
use pdf_validate::error::{Error, ErrorKind, PageTreeFault};
use pdf_validate::geometry::Rectangle;
use pdf_validate::object::{Dictionary, Object};
use pdf_validate::validate::validate_xref_table;
use pdf_validate::version::Version;
use pdf_validate::xref::XRefTable;
use proptest::prelude::*;

/// Root(2) -> [Pages(3) -> [Page(5), Page(6)], Page(4)]
///
/// The root carries MediaBox and indirect Resources; node 3 adds Rotate 90;
/// page 5 overrides MediaBox.
fn three_level(root_count: i64) -> DocBuilder {
    DocBuilder::strict()
        .object(
            PAGES_ROOT,
            pages_node(None, root_count, &[3, 4], vec![("MediaBox", letter()), ("Resources", ind(20))]),
        )
        .object(3, pages_node(Some(PAGES_ROOT), 2, &[5, 6], vec![("Rotate", Object::Integer(90))]))
        .object(4, page_node(PAGES_ROOT, vec![]))
        .object(5, page_node(3, vec![("MediaBox", rect(0, 0, 200, 200))]))
        .object(6, page_node(3, vec![]))
        .object(20, Object::Dictionary(Dictionary::new()))
}

#[test]
fn test_three_level_tree() {
    let mut xref = three_level(3).build();
    let report = validate_xref_table(&mut xref).unwrap();

    assert_eq!(report.page_count, 3);
    let order: Vec<u32> = report.pages.iter().map(|p| p.object.id).collect();
    assert_eq!(order, vec![5, 6, 4]);
    let indices: Vec<usize> = report.pages.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);

    assert_eq!(report.pages[0].media_box, Some(Rectangle::new(0.0, 0.0, 200.0, 200.0)));
    assert_eq!(report.pages[1].media_box, Some(Rectangle::new(0.0, 0.0, 612.0, 792.0)));
    assert_eq!(report.pages[0].rotate, 90);
    assert_eq!(report.pages[1].rotate, 90);
    assert_eq!(report.pages[2].rotate, 0);
    assert!(report.pages.iter().all(|p| p.resources_inherited));

    // Shared resources are validated once, through the root
    assert!(xref.is_valid(r(20)));
}

#[test]
fn test_root_count_mismatch() {
    let mut xref = three_level(4).build();
    let err = validate_xref_table(&mut xref).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PageTreeCorrupted);
    assert_eq!(
        err.root_cause(),
        &Error::PageTreeCorrupted {
            object: Some(r(PAGES_ROOT)),
            fault: PageTreeFault::CountMismatch {
                declared: 4,
                actual: 3
            },
        }
    );
}

#[test]
fn test_zero_count_ignores_kids() {
    let root = dict(vec![
        ("Type", Object::name("Pages")),
        ("Count", Object::Integer(0)),
        ("Kids", Object::Integer(5)),
    ]);
    let mut xref = DocBuilder::strict()
        .object(PAGES_ROOT, Object::Dictionary(root))
        .build();

    let report = validate_xref_table(&mut xref).unwrap();
    assert_eq!(report.page_count, 0);
    assert!(report.pages.is_empty());
}

#[test]
fn test_empty_interior_node_skipped() {
    // Node 3 has Count 0 and dangling kids; only the root total is checked
    let mut xref = DocBuilder::strict()
        .object(
            PAGES_ROOT,
            pages_node(None, 1, &[3, 4], vec![("MediaBox", letter()), ("Resources", ind(20))]),
        )
        .object(3, pages_node(Some(PAGES_ROOT), 0, &[99], vec![]))
        .object(4, page_node(PAGES_ROOT, vec![]))
        .object(20, Object::Dictionary(Dictionary::new()))
        .build();

    let report = validate_xref_table(&mut xref).unwrap();
    assert_eq!(report.pages.len(), 1);
}

#[test]
fn test_parent_mismatch() {
    let mut xref = three_level(3)
        .object(6, page_node(PAGES_ROOT, vec![]))
        .build();
    let err = validate_xref_table(&mut xref).unwrap_err();
    assert_eq!(
        err.root_cause(),
        &Error::PageTreeCorrupted {
            object: Some(r(6)),
            fault: PageTreeFault::ParentMismatch {
                expected: 3,
                found: 2
            },
        }
    );
}

#[test]
fn test_missing_node_type() {
    let mut xref = three_level(3)
        .object(6, Object::Dictionary(dict(vec![("Parent", ind(3))])))
        .build();
    let err = validate_xref_table(&mut xref).unwrap_err();
    assert_eq!(
        err.root_cause(),
        &Error::PageTreeCorrupted {
            object: Some(r(6)),
            fault: PageTreeFault::MissingNodeType,
        }
    );
}

#[test]
fn test_kids_must_be_references() {
    let root = pages_node(None, 1, &[], vec![("Kids", Object::Array(vec![page_node(PAGES_ROOT, vec![])]))]);
    let mut xref = DocBuilder::strict().object(PAGES_ROOT, root).build();
    let err = validate_xref_table(&mut xref).unwrap_err();
    assert_eq!(
        err.root_cause(),
        &Error::PageTreeCorrupted {
            object: Some(r(PAGES_ROOT)),
            fault: PageTreeFault::CorruptKids,
        }
    );
}

#[test]
fn test_cycle_in_tree_detected() {
    // Node 3 lists the root among its kids
    let mut xref = DocBuilder::strict()
        .object(PAGES_ROOT, pages_node(None, 1, &[3], vec![]))
        .object(3, pages_node(Some(PAGES_ROOT), 1, &[PAGES_ROOT], vec![]))
        .build();
    let err = validate_xref_table(&mut xref).unwrap_err();
    assert_eq!(
        err.root_cause(),
        &Error::PageTreeCorrupted {
            object: Some(r(PAGES_ROOT)),
            fault: PageTreeFault::DuplicateNode,
        }
    );
}

#[test]
fn test_depth_limit() {
    let mut config = ValidationConfig::strict();
    config.max_recursion_depth = 3;

    // 2 -> 3 -> 4 -> 5 -> page 6
    let mut xref = DocBuilder::new(Version::V17, config)
        .object(PAGES_ROOT, pages_node(None, 1, &[3], vec![("MediaBox", letter())]))
        .object(3, pages_node(Some(2), 1, &[4], vec![]))
        .object(4, pages_node(Some(3), 1, &[5], vec![]))
        .object(5, pages_node(Some(4), 1, &[6], vec![]))
        .object(6, page_node(5, vec![("Resources", Object::Dictionary(Dictionary::new()))]))
        .build();
    let err = validate_xref_table(&mut xref).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RecursionLimit);
}

#[test]
fn test_error_located_at_page() {
    let mut xref = three_level(3)
        .object(6, page_node(3, vec![("Rotate", Object::Integer(45))]))
        .build();
    let err = validate_xref_table(&mut xref).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PredicateViolation);
    match err {
        Error::Located { object, page, .. } => {
            assert_eq!(object, r(6));
            assert_eq!(page, Some(2));
        },
        other => panic!("expected a located error, got {:?}", other),
    }
}

#[test]
fn test_missing_media_box() {
    let mut strict = DocBuilder::strict()
        .object(PAGES_ROOT, pages_node(None, 1, &[3], vec![]))
        .object(3, page_node(PAGES_ROOT, vec![("Resources", Object::Dictionary(Dictionary::new()))]))
        .build();
    assert_eq!(
        validate_xref_table(&mut strict).unwrap_err().kind(),
        ErrorKind::MissingRequiredEntry
    );

    let mut relaxed = DocBuilder::relaxed()
        .object(PAGES_ROOT, pages_node(None, 1, &[3], vec![]))
        .object(3, page_node(PAGES_ROOT, vec![("Resources", Object::Dictionary(Dictionary::new()))]))
        .build();
    let report = validate_xref_table(&mut relaxed).unwrap();
    assert_eq!(report.pages[0].media_box, None);
}

#[test]
fn test_resources_reference_to_null() {
    let doc = |builder: DocBuilder| {
        builder
            .object(PAGES_ROOT, pages_node(None, 1, &[3], vec![("MediaBox", letter())]))
            .object(3, page_node(PAGES_ROOT, vec![("Resources", ind(20))]))
            .object(20, Object::Null)
            .build()
    };

    let mut strict = doc(DocBuilder::strict());
    let err = validate_xref_table(&mut strict).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredEntry);
    assert!(err.to_string().contains("Resources"), "{}", err);

    let mut relaxed = doc(DocBuilder::relaxed());
    let report = validate_xref_table(&mut relaxed).unwrap();
    assert!(!report.pages[0].resources_inherited);
}

#[test]
fn test_crop_box_inherited() {
    let mut xref = three_level(3)
        .object(
            3,
            pages_node(Some(PAGES_ROOT), 2, &[5, 6], vec![("CropBox", rect(10, 10, 100, 100))]),
        )
        .build();
    let report = validate_xref_table(&mut xref).unwrap();
    let crop = Some(Rectangle::new(10.0, 10.0, 100.0, 100.0));
    assert_eq!(report.pages[0].crop_box, crop);
    assert_eq!(report.pages[1].crop_box, crop);
    assert_eq!(report.pages[2].crop_box, None);
}

fn rotated_page(rotate: i64) -> XRefTable {
    DocBuilder::strict()
        .single_page(vec![("Rotate", Object::Integer(rotate))])
        .build()
}

#[test]
fn test_rotate_multiples_of_ninety() {
    for rotate in [0, 90, 180, 270, -90, 360] {
        let mut xref = rotated_page(rotate);
        let report = validate_xref_table(&mut xref).unwrap();
        assert_eq!(report.pages[0].rotate, rotate);
    }
    let mut xref = rotated_page(45);
    assert_eq!(
        validate_xref_table(&mut xref).unwrap_err().kind(),
        ErrorKind::PredicateViolation
    );
}

proptest! {
    #[test]
    fn prop_rotate_modulus(rotate in -1080i64..1080) {
        let mut xref = rotated_page(rotate);
        let result = validate_xref_table(&mut xref);
        prop_assert_eq!(result.is_ok(), rotate % 90 == 0);
    }
}
