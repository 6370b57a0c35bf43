//! Shared fixtures: small in-memory documents built object by object.

#![allow(dead_code)]

use pdf_validate::config::ValidationConfig;
use pdf_validate::object::{Dictionary, Object, ObjectRef, StreamDict};
use pdf_validate::version::Version;
use pdf_validate::xref::XRefTable;

/// Object number of the catalog in documents built by [`DocBuilder`].
pub const CATALOG: u32 = 1;
/// Object number of the page tree root in documents built by [`DocBuilder`].
pub const PAGES_ROOT: u32 = 2;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn r(id: u32) -> ObjectRef {
    ObjectRef::new(id, 0)
}

pub fn ind(id: u32) -> Object {
    Object::Reference(r(id))
}

pub fn dict(entries: Vec<(&str, Object)>) -> Dictionary {
    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

pub fn rect(llx: i64, lly: i64, urx: i64, ury: i64) -> Object {
    Object::Array(vec![
        Object::Integer(llx),
        Object::Integer(lly),
        Object::Integer(urx),
        Object::Integer(ury),
    ])
}

pub fn letter() -> Object {
    rect(0, 0, 612, 792)
}

/// A `Pages` node. `parent` is `None` for the root.
pub fn pages_node(parent: Option<u32>, count: i64, kids: &[u32], extra: Vec<(&str, Object)>) -> Object {
    let mut d = dict(vec![
        ("Type", Object::name("Pages")),
        ("Count", Object::Integer(count)),
        ("Kids", Object::Array(kids.iter().map(|k| ind(*k)).collect())),
    ]);
    if let Some(parent) = parent {
        d.insert("Parent".to_string(), ind(parent));
    }
    d.extend(extra.into_iter().map(|(k, v)| (k.to_string(), v)));
    Object::Dictionary(d)
}

/// A `Page` leaf.
pub fn page_node(parent: u32, extra: Vec<(&str, Object)>) -> Object {
    let mut d = dict(vec![("Type", Object::name("Page")), ("Parent", ind(parent))]);
    d.extend(extra.into_iter().map(|(k, v)| (k.to_string(), v)));
    Object::Dictionary(d)
}

pub fn stream(entries: Vec<(&str, Object)>, data: &[u8]) -> Object {
    Object::Stream(StreamDict::new(dict(entries), data.to_vec()))
}

/// Builds an [`XRefTable`] with a catalog at object 1 pointing at a page
/// tree root at object 2.
pub struct DocBuilder {
    xref: XRefTable,
    catalog: Dictionary,
}

impl DocBuilder {
    pub fn new(version: Version, config: ValidationConfig) -> Self {
        init_logging();
        Self {
            xref: XRefTable::new(version, config),
            catalog: dict(vec![("Type", Object::name("Catalog")), ("Pages", ind(PAGES_ROOT))]),
        }
    }

    pub fn strict() -> Self {
        Self::new(Version::V17, ValidationConfig::strict())
    }

    pub fn relaxed() -> Self {
        Self::new(Version::V17, ValidationConfig::relaxed())
    }

    pub fn object(mut self, id: u32, object: Object) -> Self {
        self.xref.insert(r(id), object).unwrap();
        self
    }

    pub fn catalog_entry(mut self, key: &str, value: Object) -> Self {
        self.catalog.insert(key.to_string(), value);
        self
    }

    /// A single page with letter media box and empty resources at object 3.
    pub fn single_page(self, extra: Vec<(&str, Object)>) -> Self {
        let mut entries = vec![
            ("MediaBox", letter()),
            ("Resources", Object::Dictionary(Dictionary::new())),
        ];
        entries.extend(extra);
        self.object(PAGES_ROOT, pages_node(None, 1, &[3], vec![]))
            .object(3, page_node(PAGES_ROOT, entries))
    }

    pub fn build(mut self) -> XRefTable {
        self.xref
            .insert(r(CATALOG), Object::Dictionary(self.catalog))
            .unwrap();
        self.xref.set_trailer(dict(vec![("Root", ind(CATALOG))]));
        self.xref
    }
}
