// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # PDF Validate
//!
//! Structural validation of a parsed PDF object graph.
//!
//! ## Core Features
//!
//! - **Cross-reference table**: arena of indirect objects, dereferencing with
//!   chain and cycle detection, a per-object validated latch
//! - **Typed entry checks**: one combinator family for every PDF type, with
//!   required/optional handling, version gates and value predicates
//! - **Page tree walk**: inheritance of Resources, MediaBox, CropBox and Rotate,
//!   page counting and node consistency (ISO 32000-1:2008, Section 7.7.3)
//! - **Construct validators**: ExtGState, color spaces, patterns, shadings,
//!   functions, XObjects, fonts
//! - **Strict and relaxed modes**: relaxed mode tolerates the deviations
//!   common in real-world files
//! - **Stream filters**: Flate, LZW, ASCIIHex, ASCII85 and RunLength decoding
//!   for the streams whose content is inspected
//!
//! ## Quick Start
//!
//! ```
//! use pdf_validate::config::ValidationConfig;
//! use pdf_validate::object::{Dictionary, Object, ObjectRef};
//! use pdf_validate::validate::validate_xref_table;
//! use pdf_validate::version::Version;
//! use pdf_validate::xref::XRefTable;
//!
//! # fn main() -> pdf_validate::Result<()> {
//! let mut xref = XRefTable::new(Version::V14, ValidationConfig::relaxed());
//!
//! let mut page = Dictionary::new();
//! page.insert("Type".into(), Object::name("Page"));
//! page.insert("Parent".into(), Object::Reference(ObjectRef::new(2, 0)));
//! page.insert(
//!     "MediaBox".into(),
//!     Object::Array(vec![Object::Integer(0), Object::Integer(0), Object::Integer(612), Object::Integer(792)]),
//! );
//! page.insert("Resources".into(), Object::Dictionary(Dictionary::new()));
//! xref.insert(ObjectRef::new(3, 0), Object::Dictionary(page))?;
//!
//! let mut pages = Dictionary::new();
//! pages.insert("Type".into(), Object::name("Pages"));
//! pages.insert("Count".into(), Object::Integer(1));
//! pages.insert("Kids".into(), Object::Array(vec![Object::Reference(ObjectRef::new(3, 0))]));
//! xref.insert(ObjectRef::new(2, 0), Object::Dictionary(pages))?;
//!
//! let mut catalog = Dictionary::new();
//! catalog.insert("Type".into(), Object::name("Catalog"));
//! catalog.insert("Pages".into(), Object::Reference(ObjectRef::new(2, 0)));
//! xref.insert(ObjectRef::new(1, 0), Object::Dictionary(catalog))?;
//!
//! let mut trailer = Dictionary::new();
//! trailer.insert("Root".into(), Object::Reference(ObjectRef::new(1, 0)));
//! xref.set_trailer(trailer);
//!
//! let report = validate_xref_table(&mut xref)?;
//! assert_eq!(report.page_count, 1);
//! assert_eq!(report.pages[0].rotate, 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;
pub mod version;

// Object model
pub mod object;
pub mod xref;

// Stream decoders
pub mod decoders;

pub mod geometry;

// Validation
pub mod validate;

// Re-exports
pub use config::{ValidationConfig, ValidationMode};
pub use error::{Error, ErrorKind, PageTreeFault, Result};
pub use object::{Dictionary, Object, ObjectRef, StreamDict};
pub use validate::{validate_xref_table, PageSummary, ValidationReport};
pub use version::{Version, VersionGate};
pub use xref::XRefTable;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "pdf_validate";
