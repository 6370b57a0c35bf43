//! Cross-reference table: the indirect object store and validation session state.
//!
//! Objects live in an arena indexed by object number. Each slot holds the
//! generation and the object itself; a parallel vector is the "already
//! validated" latch that makes validation of cyclic or shared object graphs
//! terminate. The latch records the kinds an object was validated as, so an
//! object reached both as, say, a graphics state and a font is checked as both. The table also carries the document-level scalars the page
//! tree walk publishes (page count, current page, thumbnails).

use crate::config::{ValidationConfig, ValidationMode};
use crate::decoders::decode_pipeline;
use crate::error::{Error, Result};
use crate::object::{Dictionary, Object, ObjectRef, StreamDict};
use crate::validate::entry::{
    ArrayKind, DictKind, EntryKind, IntegerKind, NameKind, Number, NumberKind, StreamKind,
};
use crate::version::{Version, VersionGate};
use bytes::Bytes;
use std::collections::BTreeMap;

/// One cross-reference table entry.
#[derive(Debug, Clone, PartialEq)]
pub struct XRefEntry {
    /// Generation number
    pub generation: u16,
    /// The object stored under this number
    pub object: Object,
}

/// Cross-reference table that owns every indirect object of a document.
///
/// # Example
///
/// ```
/// use pdf_validate::config::ValidationConfig;
/// use pdf_validate::object::{Object, ObjectRef};
/// use pdf_validate::version::Version;
/// use pdf_validate::xref::XRefTable;
///
/// let mut xref = XRefTable::new(Version::V17, ValidationConfig::strict());
/// xref.insert(ObjectRef::new(1, 0), Object::Integer(5))?;
///
/// let resolved = xref.dereference(&Object::Reference(ObjectRef::new(1, 0)))?;
/// assert_eq!(resolved, Object::Integer(5));
/// # Ok::<(), pdf_validate::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct XRefTable {
    /// Arena indexed by object number; slot 0 is reserved
    entries: Vec<Option<XRefEntry>>,
    /// Kinds each object has been validated as, same indexing as `entries`
    validated: Vec<Vec<&'static str>>,
    /// Trailer dictionary
    trailer: Dictionary,
    /// Version from the `%PDF-x.y` header
    header_version: Version,
    /// Version from the catalog's `/Version`, if any
    root_version: Option<Version>,
    config: ValidationConfig,
    /// Nesting depth of construct validators currently on the stack
    nesting_depth: u32,
    /// Root `/Count`
    page_count: usize,
    /// 1-based page being validated, 0 before the first page
    current_page: usize,
    /// Object being validated, for diagnostics
    current_object: Option<ObjectRef>,
    /// Thumbnail images by 1-based page number
    page_thumbs: BTreeMap<usize, ObjectRef>,
}

impl XRefTable {
    /// Create an empty table for a document with the given header version.
    pub fn new(header_version: Version, config: ValidationConfig) -> Self {
        Self {
            entries: vec![None],
            validated: vec![Vec::new()],
            trailer: Dictionary::new(),
            header_version,
            root_version: None,
            config,
            nesting_depth: 0,
            page_count: 0,
            current_page: 0,
            current_object: None,
            page_thumbs: BTreeMap::new(),
        }
    }

    /// Store `object` under `obj_ref`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Object number 0 is reserved for the head of the free list and is rejected.
    pub fn insert(&mut self, obj_ref: ObjectRef, object: Object) -> Result<()> {
        if obj_ref.id == 0 {
            return Err(Error::InvalidPdf("object number 0 is reserved".to_string()));
        }
        let idx = obj_ref.id as usize;
        if idx >= self.entries.len() {
            self.entries.resize(idx + 1, None);
            self.validated.resize(idx + 1, Vec::new());
        }
        self.entries[idx] = Some(XRefEntry {
            generation: obj_ref.gen,
            object,
        });
        self.validated[idx].clear();
        Ok(())
    }

    /// Store `object` under the next unused object number and return its reference.
    pub fn ind_ref_for_new_object(&mut self, object: Object) -> ObjectRef {
        let obj_ref = ObjectRef::new(self.entries.len() as u32, 0);
        self.entries.push(Some(XRefEntry {
            generation: 0,
            object,
        }));
        self.validated.push(Vec::new());
        log::debug!("Allocated {} for new object", obj_ref);
        obj_ref
    }

    /// Look up an entry by object number and generation.
    pub fn find(&self, obj_ref: ObjectRef) -> Option<&Object> {
        match self.entries.get(obj_ref.id as usize) {
            Some(Some(entry)) if entry.generation == obj_ref.gen => Some(&entry.object),
            _ => None,
        }
    }

    /// Mutable access to a stored object, for repair passes.
    pub fn find_mut(&mut self, obj_ref: ObjectRef) -> Option<&mut Object> {
        match self.entries.get_mut(obj_ref.id as usize) {
            Some(Some(entry)) if entry.generation == obj_ref.gen => Some(&mut entry.object),
            _ => None,
        }
    }

    /// Check if an object exists in the table.
    pub fn contains(&self, obj_ref: ObjectRef) -> bool {
        self.find(obj_ref).is_some()
    }

    /// Number of objects stored.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set the trailer dictionary.
    pub fn set_trailer(&mut self, trailer: Dictionary) {
        self.trailer = trailer;
    }

    /// Trailer dictionary.
    pub fn trailer(&self) -> &Dictionary {
        &self.trailer
    }

    /// Resolve `obj` to a direct object.
    ///
    /// Direct objects are returned as is. References are chased until a
    /// non-reference is reached; a reference to an object that is not in the
    /// table resolves to [`Object::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::CircularReference`] if a chain of references loops or
    /// exceeds `max_reference_chain` hops.
    pub fn dereference(&self, obj: &Object) -> Result<Object> {
        let mut current = match obj {
            Object::Reference(r) => *r,
            direct => return Ok(direct.clone()),
        };
        let mut seen: Vec<ObjectRef> = Vec::new();

        loop {
            if seen.contains(&current) || seen.len() as u32 >= self.config.max_reference_chain {
                log::error!("Reference chain through {} does not terminate", current);
                return Err(Error::CircularReference(current));
            }
            seen.push(current);

            match self.find(current) {
                None => {
                    log::debug!("Dereferencing {}: not in xref table", current);
                    return Ok(Object::Null);
                },
                Some(Object::Reference(next)) => current = *next,
                Some(object) => return Ok(object.clone()),
            }
        }
    }

    /// Like [`dereference`](Self::dereference), but a dangling reference is an error.
    pub fn dereference_required(&self, obj: &Object) -> Result<Object> {
        let resolved = self.dereference(obj)?;
        match (obj, &resolved) {
            (Object::Reference(r), Object::Null) if !self.contains(*r) => {
                Err(Error::ObjectNotFound(*r))
            },
            _ => Ok(resolved),
        }
    }

    /// Dereference and assert the dynamic type. Null resolves to `None`.
    pub fn dereference_typed<K: EntryKind>(&self, obj: &Object) -> Result<Option<K::Value>> {
        match self.dereference(obj)? {
            Object::Null => Ok(None),
            other => K::extract(other).map(Some).map_err(|found| Error::InvalidObjectType {
                expected: K::EXPECTED.to_string(),
                found: found.type_name().to_string(),
            }),
        }
    }

    /// Dereference to a dictionary.
    pub fn dereference_dict(&self, obj: &Object) -> Result<Option<Dictionary>> {
        self.dereference_typed::<DictKind>(obj)
    }

    /// Dereference to an array.
    pub fn dereference_array(&self, obj: &Object) -> Result<Option<Vec<Object>>> {
        self.dereference_typed::<ArrayKind>(obj)
    }

    /// Dereference to a stream.
    pub fn dereference_stream(&self, obj: &Object) -> Result<Option<StreamDict>> {
        self.dereference_typed::<StreamKind>(obj)
    }

    /// Dereference to a name.
    pub fn dereference_name(&self, obj: &Object) -> Result<Option<String>> {
        self.dereference_typed::<NameKind>(obj)
    }

    /// Dereference to an integer.
    pub fn dereference_integer(&self, obj: &Object) -> Result<Option<i64>> {
        self.dereference_typed::<IntegerKind>(obj)
    }

    /// Dereference to a number (integer or real).
    pub fn dereference_number(&self, obj: &Object) -> Result<Option<Number>> {
        self.dereference_typed::<NumberKind>(obj)
    }

    /// Latch slot of a stored object, if `obj_ref` names it with the right generation.
    fn latch(&self, obj_ref: ObjectRef) -> Option<&Vec<&'static str>> {
        self.find(obj_ref)?;
        self.validated.get(obj_ref.id as usize)
    }

    /// Has this object already been validated, as any kind?
    pub fn is_valid(&self, obj_ref: ObjectRef) -> bool {
        self.latch(obj_ref).is_some_and(|kinds| !kinds.is_empty())
    }

    /// Has this object already been validated as `kind`?
    pub fn is_valid_as(&self, obj_ref: ObjectRef, kind: &'static str) -> bool {
        self.latch(obj_ref).is_some_and(|kinds| kinds.contains(&kind))
    }

    /// Mark an object as validated, without a specific kind.
    ///
    /// A reference whose generation does not match the stored entry is ignored.
    pub fn set_valid(&mut self, obj_ref: ObjectRef) {
        self.mark_validated(obj_ref, "Object");
    }

    /// Mark an object as validated as `kind`.
    ///
    /// Returns `false` if it was already validated as that kind. Validators
    /// that may be re-entered for the same object call this before recursing,
    /// so a cycle back to the object short-circuits. A missing object, or a
    /// reference with the wrong generation, is never marked.
    pub fn mark_validated(&mut self, obj_ref: ObjectRef, kind: &'static str) -> bool {
        if self.find(obj_ref).is_none() {
            return true;
        }
        match self.validated.get_mut(obj_ref.id as usize) {
            Some(kinds) if kinds.contains(&kind) => false,
            Some(kinds) => {
                kinds.push(kind);
                true
            },
            None => true,
        }
    }

    /// Number of objects marked as validated.
    pub fn validated_count(&self) -> usize {
        self.validated.iter().filter(|kinds| !kinds.is_empty()).count()
    }

    /// Decoded payload of a stream object, decoded once and cached.
    pub fn decoded_stream(&mut self, obj_ref: ObjectRef) -> Result<Bytes> {
        let config = self.config;
        let stream = match self.find_mut(obj_ref) {
            Some(Object::Stream(stream)) => stream,
            Some(other) => {
                return Err(Error::InvalidObjectType {
                    expected: "Stream".to_string(),
                    found: other.type_name().to_string(),
                })
            },
            None => return Err(Error::ObjectNotFound(obj_ref)),
        };

        if let Some(decoded) = &stream.decoded {
            return Ok(decoded.clone());
        }

        log::debug!(
            "Decoding stream {} ({} bytes, {} filters)",
            obj_ref,
            stream.raw.len(),
            stream.filters.len()
        );
        let decoded = Bytes::from(decode_pipeline(&stream.raw, &stream.filters, &config)?);
        stream.decoded = Some(decoded.clone());
        Ok(decoded)
    }

    /// Effective document version: the header version, raised by the catalog's `/Version`.
    pub fn version(&self) -> Version {
        match self.root_version {
            Some(v) if v > self.header_version => v,
            _ => self.header_version,
        }
    }

    /// Version from the file header.
    pub fn header_version(&self) -> Version {
        self.header_version
    }

    /// Record the catalog's `/Version`.
    pub fn set_root_version(&mut self, version: Version) {
        self.root_version = Some(version);
    }

    /// Active validation mode.
    pub fn validation_mode(&self) -> ValidationMode {
        self.config.mode
    }

    /// Active configuration.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Check that `context` may be used in this document.
    ///
    /// The gate resolves to a threshold for the current mode; no threshold means
    /// the check is skipped.
    pub fn validate_version(&self, context: &str, gate: impl Into<VersionGate>) -> Result<()> {
        let gate = gate.into();
        let Some(required) = gate.resolve(self.config.mode) else {
            return Ok(());
        };
        let actual = self.version();
        if actual < required {
            return Err(Error::VersionViolation {
                context: context.to_string(),
                required,
                actual,
            });
        }
        if actual < gate.strict {
            log::warn!(
                "{} requires PDF {}, tolerated in {} document",
                context,
                gate.strict,
                actual
            );
        }
        Ok(())
    }

    /// Enter a nested construct (Form XObject resources, pattern resources...).
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecursionLimitExceeded`] beyond `max_recursion_depth`.
    pub fn enter_nested(&mut self) -> Result<()> {
        if self.nesting_depth >= self.config.max_recursion_depth {
            log::error!(
                "Recursion depth limit exceeded ({}) at {:?}",
                self.config.max_recursion_depth,
                self.current_object
            );
            return Err(Error::RecursionLimitExceeded(self.config.max_recursion_depth));
        }
        self.nesting_depth += 1;
        Ok(())
    }

    /// Leave a nested construct.
    pub fn leave_nested(&mut self) {
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    /// Page count declared by the root of the page tree.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub(crate) fn set_page_count(&mut self, count: usize) {
        self.page_count = count;
    }

    /// 1-based page currently being validated (0 before the first page).
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub(crate) fn advance_page(&mut self) -> usize {
        self.current_page += 1;
        self.current_page
    }

    /// Object currently being validated.
    pub fn current_object(&self) -> Option<ObjectRef> {
        self.current_object
    }

    /// Record the object being validated, for diagnostics.
    pub fn set_current_object(&mut self, obj_ref: ObjectRef) {
        self.current_object = Some(obj_ref);
    }

    /// Thumbnail image references by 1-based page number.
    pub fn page_thumbs(&self) -> &BTreeMap<usize, ObjectRef> {
        &self.page_thumbs
    }

    pub(crate) fn record_thumb(&mut self, page: usize, obj_ref: ObjectRef) {
        self.page_thumbs.insert(page, obj_ref);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn table() -> XRefTable {
        XRefTable::new(Version::V17, ValidationConfig::strict())
    }

    fn r(id: u32) -> ObjectRef {
        ObjectRef::new(id, 0)
    }

    #[test]
    fn test_insert_and_find() {
        let mut xref = table();
        xref.insert(r(3), Object::Integer(7)).unwrap();
        assert_eq!(xref.find(r(3)), Some(&Object::Integer(7)));
        assert!(xref.find(r(2)).is_none());
        assert!(xref.find(ObjectRef::new(3, 1)).is_none());
        assert_eq!(xref.len(), 1);
    }

    #[test]
    fn test_object_zero_reserved() {
        let mut xref = table();
        assert!(xref.insert(r(0), Object::Null).is_err());
        assert!(xref.is_empty());
    }

    #[test]
    fn test_new_object_numbers() {
        let mut xref = table();
        xref.insert(r(4), Object::Null).unwrap();
        let new_ref = xref.ind_ref_for_new_object(Object::Boolean(true));
        assert_eq!(new_ref, r(5));
        assert_eq!(xref.find(new_ref), Some(&Object::Boolean(true)));
    }

    #[test]
    fn test_dereference_direct_is_noop() {
        let xref = table();
        let obj = Object::name("Page");
        assert_eq!(xref.dereference(&obj).unwrap(), obj);
    }

    #[test]
    fn test_dereference_chain() {
        let mut xref = table();
        xref.insert(r(1), Object::Reference(r(2))).unwrap();
        xref.insert(r(2), Object::Integer(9)).unwrap();
        assert_eq!(xref.dereference(&Object::Reference(r(1))).unwrap(), Object::Integer(9));
    }

    #[test]
    fn test_dereference_missing_is_null() {
        let xref = table();
        assert_eq!(xref.dereference(&Object::Reference(r(8))).unwrap(), Object::Null);
        let err = xref.dereference_required(&Object::Reference(r(8))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReferenceError);
    }

    #[test]
    fn test_dereference_self_loop() {
        let mut xref = table();
        xref.insert(r(1), Object::Reference(r(2))).unwrap();
        xref.insert(r(2), Object::Reference(r(1))).unwrap();
        let err = xref.dereference(&Object::Reference(r(1))).unwrap_err();
        assert!(matches!(err, Error::CircularReference(_)));
    }

    #[test]
    fn test_dereference_typed_mismatch() {
        let mut xref = table();
        xref.insert(r(1), Object::Integer(1)).unwrap();
        let err = xref.dereference_dict(&Object::Reference(r(1))).unwrap_err();
        match err {
            Error::InvalidObjectType { expected, found } => {
                assert_eq!(expected, "Dictionary");
                assert_eq!(found, "Integer");
            },
            _ => panic!("Expected InvalidObjectType error"),
        }
        assert_eq!(xref.dereference_integer(&Object::Reference(r(1))).unwrap(), Some(1));
    }

    #[test]
    fn test_valid_latch() {
        let mut xref = table();
        xref.insert(r(2), Object::Null).unwrap();
        assert!(!xref.is_valid(r(2)));
        xref.set_valid(r(2));
        assert!(xref.is_valid(r(2)));
        assert!(!xref.is_valid(r(99)));
        xref.set_valid(r(99));
        assert!(!xref.is_valid(r(99)));
        assert_eq!(xref.validated_count(), 1);
    }

    #[test]
    fn test_latch_checks_generation() {
        let mut xref = table();
        let current = ObjectRef::new(4, 1);
        xref.insert(current, Object::Integer(1)).unwrap();

        // A stale generation neither marks nor reads the latch
        xref.set_valid(r(4));
        assert!(!xref.is_valid(current));
        xref.set_valid(current);
        assert!(xref.is_valid(current));
        assert!(!xref.is_valid(r(4)));
    }

    #[test]
    fn test_latch_is_per_kind() {
        let mut xref = table();
        xref.insert(r(6), Object::Dictionary(Dictionary::new())).unwrap();

        assert!(xref.mark_validated(r(6), "ExtGState"));
        assert!(!xref.mark_validated(r(6), "ExtGState"));
        assert!(xref.is_valid(r(6)));
        assert!(!xref.is_valid_as(r(6), "Font"));
        assert!(xref.mark_validated(r(6), "Font"));
        assert!(xref.is_valid_as(r(6), "Font"));
        assert_eq!(xref.validated_count(), 1);

        // Reinserting clears every kind
        xref.insert(r(6), Object::Dictionary(Dictionary::new())).unwrap();
        assert!(!xref.is_valid(r(6)));
    }

    #[test]
    fn test_root_version_raises_only() {
        let mut xref = XRefTable::new(Version::V14, ValidationConfig::strict());
        xref.set_root_version(Version::V13);
        assert_eq!(xref.version(), Version::V14);
        xref.set_root_version(Version::V16);
        assert_eq!(xref.version(), Version::V16);
        assert_eq!(xref.header_version(), Version::V14);
    }

    #[test]
    fn test_validate_version_modes() {
        let strict = XRefTable::new(Version::V13, ValidationConfig::strict());
        let err = strict.validate_version("pageDict.Group", Version::V14).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VersionViolation);

        let relaxed = XRefTable::new(Version::V13, ValidationConfig::relaxed());
        assert!(relaxed.validate_version("pageDict.Group", Version::V14).is_ok());
        let gate = VersionGate::since(Version::V15).relaxed_to(Version::V14);
        assert!(relaxed.validate_version("pageDict.Tabs", gate).is_err());

        let disabled = XRefTable::new(Version::V10, ValidationConfig::disabled());
        assert!(disabled.validate_version("anything", Version::V20).is_ok());
    }

    #[test]
    fn test_nesting_limit() {
        let config = ValidationConfig {
            max_recursion_depth: 2,
            ..ValidationConfig::strict()
        };
        let mut xref = XRefTable::new(Version::V17, config);
        xref.enter_nested().unwrap();
        xref.enter_nested().unwrap();
        assert!(matches!(xref.enter_nested(), Err(Error::RecursionLimitExceeded(2))));
        xref.leave_nested();
        assert!(xref.enter_nested().is_ok());
    }

    #[test]
    fn test_decoded_stream_is_cached() {
        let mut xref = table();
        let mut dict = Dictionary::new();
        dict.insert("Filter".to_string(), Object::name("ASCIIHexDecode"));
        xref.insert(r(1), Object::Stream(StreamDict::new(dict, &b"48656C6C6F>"[..])))
            .unwrap();

        assert_eq!(&xref.decoded_stream(r(1)).unwrap()[..], b"Hello");
        match xref.find(r(1)) {
            Some(Object::Stream(s)) => assert_eq!(s.decoded.as_deref(), Some(&b"Hello"[..])),
            _ => panic!("Expected stream"),
        }
    }

    #[test]
    fn test_decoded_stream_wrong_type() {
        let mut xref = table();
        xref.insert(r(1), Object::Integer(0)).unwrap();
        assert!(xref.decoded_stream(r(1)).is_err());
        assert!(matches!(xref.decoded_stream(r(2)), Err(Error::ObjectNotFound(_))));
    }
}
