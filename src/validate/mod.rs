//! Document validation.
//!
//! [`validate_xref_table`] is the entry point: it validates the trailer, the
//! document catalog and the Info dictionary, walks the page tree, and
//! delegates every resource it meets to the construct validators. Validation
//! fails fast; the first error is returned, annotated with the object (and
//! page) being validated when it occurred.
//!
//! # Example
//!
//! ```
//! use pdf_validate::config::ValidationConfig;
//! use pdf_validate::object::{Dictionary, Object, ObjectRef};
//! use pdf_validate::validate::validate_xref_table;
//! use pdf_validate::version::Version;
//! use pdf_validate::xref::XRefTable;
//!
//! let mut xref = XRefTable::new(Version::V17, ValidationConfig::strict());
//!
//! let mut pages = Dictionary::new();
//! pages.insert("Type".to_string(), Object::name("Pages"));
//! pages.insert("Count".to_string(), Object::Integer(0));
//! pages.insert("Kids".to_string(), Object::Array(vec![]));
//! xref.insert(ObjectRef::new(2, 0), Object::Dictionary(pages))?;
//!
//! let mut catalog = Dictionary::new();
//! catalog.insert("Type".to_string(), Object::name("Catalog"));
//! catalog.insert("Pages".to_string(), Object::Reference(ObjectRef::new(2, 0)));
//! xref.insert(ObjectRef::new(1, 0), Object::Dictionary(catalog))?;
//!
//! let mut trailer = Dictionary::new();
//! trailer.insert("Root".to_string(), Object::Reference(ObjectRef::new(1, 0)));
//! xref.set_trailer(trailer);
//!
//! let report = validate_xref_table(&mut xref)?;
//! assert_eq!(report.page_count, 0);
//! # Ok::<(), pdf_validate::error::Error>(())
//! ```

pub mod catalog;
pub mod colorspace;
pub mod date;
pub mod entry;
pub mod extgstate;
pub mod pages;
pub mod pattern;
pub mod resources;
pub mod xobject;

pub use pages::{InheritedAttributes, PageSummary};

use crate::config::ValidationMode;
use crate::error::{Error, Result};
use crate::object::{Dictionary, Object, ObjectRef};
use crate::version::Version;
use crate::xref::XRefTable;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of a successful validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Effective document version
    pub version: Version,
    /// Mode the document was validated in
    pub mode: ValidationMode,
    /// True when validation was disabled and nothing was checked
    pub skipped: bool,
    /// Page count declared by the page tree root
    pub page_count: usize,
    /// One entry per page, in document order
    pub pages: Vec<PageSummary>,
    /// Thumbnail images by 1-based page number
    pub thumbnails: BTreeMap<usize, ObjectRef>,
    /// Number of objects marked as validated
    pub validated_objects: usize,
}

impl ValidationReport {
    fn from_xref(xref: &XRefTable, skipped: bool, pages: Vec<PageSummary>) -> Self {
        Self {
            version: xref.version(),
            mode: xref.validation_mode(),
            skipped,
            page_count: xref.page_count(),
            pages,
            thumbnails: xref.page_thumbs().clone(),
            validated_objects: xref.validated_count(),
        }
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Validate a whole document held in `xref`.
///
/// In [`ValidationMode::None`] nothing is checked and the report is flagged
/// as skipped.
pub fn validate_xref_table(xref: &mut XRefTable) -> Result<ValidationReport> {
    if xref.validation_mode() == ValidationMode::None {
        log::info!("Validation disabled, skipping {} objects", xref.len());
        return Ok(ValidationReport::from_xref(xref, true, Vec::new()));
    }

    log::debug!(
        "Validating document (header version {}, mode {:?})",
        xref.header_version(),
        xref.validation_mode()
    );

    match catalog::validate_document(xref) {
        Ok(pages) => {
            log::debug!(
                "Validated {} pages, {} objects latched",
                pages.len(),
                xref.validated_count()
            );
            Ok(ValidationReport::from_xref(xref, false, pages))
        },
        Err(e) => {
            let page = match xref.current_page() {
                0 => None,
                n => Some(n),
            };
            let e = e.located(xref.current_object(), page);
            log::error!("Validation failed: {}", e);
            Err(e)
        },
    }
}

/// Resolve a construct for validation, latching it as `kind` if it is indirect.
///
/// Returns `None` when the construct was already validated as `kind` or
/// resolves to null.
pub(crate) fn resolve_once(xref: &mut XRefTable, obj: &Object, kind: &'static str) -> Result<Option<Object>> {
    if let Object::Reference(r) = obj {
        if !xref.mark_validated(*r, kind) {
            log::debug!("{} already validated as {}", r, kind);
            return Ok(None);
        }
        xref.set_current_object(*r);
    }
    let resolved = xref.dereference(obj)?;
    Ok((!resolved.is_null()).then_some(resolved))
}

/// Dictionary of a dictionary or stream object.
pub(crate) fn dict_of<'a>(obj: &'a Object, what: &str) -> Result<&'a Dictionary> {
    obj.as_dict().ok_or_else(|| Error::InvalidObjectType {
        expected: format!("{} dictionary", what),
        found: obj.type_name().to_string(),
    })
}

/// Run `f` one nesting level deeper.
pub(crate) fn nested<T>(
    xref: &mut XRefTable,
    f: impl FnOnce(&mut XRefTable) -> Result<T>,
) -> Result<T> {
    xref.enter_nested()?;
    let result = f(xref);
    xref.leave_nested();
    result
}
