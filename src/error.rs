//! Error types for PDF object graph validation.
//!
//! Every validation failure is fatal for the document being validated: the first
//! error aborts the walk and is returned to the caller. Errors carry structured
//! context (dictionary, entry, object) so callers can match on [`ErrorKind`]
//! without parsing messages.

use crate::object::ObjectRef;
use crate::version::Version;
use std::fmt;

/// Result type alias for validation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while resolving or validating PDF objects.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A required dictionary entry is absent or dereferences to nothing.
    #[error("{dict}: missing required entry /{entry}")]
    MissingRequiredEntry {
        /// Dictionary the entry belongs to
        dict: String,
        /// Entry name
        entry: String,
    },

    /// A dictionary entry has the wrong dynamic type.
    #[error("{dict}: entry /{entry} has wrong type: expected {expected}, found {found}")]
    TypeMismatch {
        /// Dictionary the entry belongs to
        dict: String,
        /// Entry name, index qualified for array elements
        entry: String,
        /// Expected type
        expected: String,
        /// Actual type found
        found: String,
    },

    /// A dereferenced object has the wrong type (no entry context).
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// A value has the right type but lies outside its allowed domain.
    #[error("{dict}: entry /{entry} has invalid value {value}")]
    PredicateViolation {
        /// Dictionary the entry belongs to
        dict: String,
        /// Entry name
        entry: String,
        /// Offending value, rendered for diagnostics
        value: String,
    },

    /// A construct is used in a document older than the version introducing it.
    #[error("{context}: unsupported in version {actual}, requires {required}")]
    VersionViolation {
        /// Construct being validated
        context: String,
        /// Version that introduced the construct
        required: Version,
        /// Effective document version
        actual: Version,
    },

    /// Referenced object not found in cross-reference table
    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectRef),

    /// Structural invariant of the page tree violated.
    #[error("Page tree corrupted at {}: {fault}", display_ref(.object))]
    PageTreeCorrupted {
        /// Node where the fault was detected
        object: Option<ObjectRef>,
        /// What went wrong
        fault: PageTreeFault,
    },

    /// Recognized PDF feature that is intentionally not supported.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Circular reference detected in object graph
    #[error("Circular reference detected: object {0}")]
    CircularReference(ObjectRef),

    /// Recursion depth limit exceeded
    #[error("Recursion depth limit exceeded (max: {0})")]
    RecursionLimitExceeded(u32),

    /// Malformed version string
    #[error("Invalid PDF version: {0}")]
    InvalidVersion(String),

    /// Invalid PDF structure (generic)
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// Stream decoding error
    #[error("Stream decoding error: {0}")]
    Decode(String),

    /// Unsupported stream filter
    #[error("Unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// Report serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An error annotated with the object and page being validated when it occurred.
    #[error("{source} (object {object}{})", display_page(.page))]
    Located {
        /// Object under validation
        object: ObjectRef,
        /// 1-based page being validated, if inside the page tree walk
        page: Option<usize>,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },
}

/// Structural page tree faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTreeFault {
    /// Catalog `/Pages` is not an indirect reference
    CorruptPagesReference,
    /// A node has no `/Type`
    MissingNodeType,
    /// A node `/Type` is neither `Pages` nor `Page`
    UnexpectedNodeType(String),
    /// A `Pages` node has no integer `/Count`
    MissingCount,
    /// `/Kids` is missing, not an array, or holds a non-reference
    CorruptKids,
    /// A kid is not a dictionary
    CorruptNode,
    /// A non-root node has no `/Parent` reference
    MissingParent,
    /// `/Parent` does not point back at the node that lists the kid
    ParentMismatch {
        /// Object number of the actual parent
        expected: u32,
        /// Object number found in `/Parent`
        found: u32,
    },
    /// A node is reachable twice
    DuplicateNode,
    /// Root `/Count` disagrees with the number of leaves visited
    CountMismatch {
        /// Root `/Count`
        declared: i64,
        /// Leaves visited
        actual: usize,
    },
}

impl fmt::Display for PageTreeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageTreeFault::CorruptPagesReference => {
                write!(f, "catalog /Pages is not an indirect reference")
            },
            PageTreeFault::MissingNodeType => write!(f, "page tree node missing /Type"),
            PageTreeFault::UnexpectedNodeType(t) => write!(f, "unexpected node type /{}", t),
            PageTreeFault::MissingCount => write!(f, "missing or corrupt /Count"),
            PageTreeFault::CorruptKids => write!(f, "corrupt /Kids"),
            PageTreeFault::CorruptNode => write!(f, "kid is not a dictionary"),
            PageTreeFault::MissingParent => write!(f, "missing /Parent"),
            PageTreeFault::ParentMismatch { expected, found } => {
                write!(f, "/Parent points to object {} instead of {}", found, expected)
            },
            PageTreeFault::DuplicateNode => write!(f, "node referenced more than once"),
            PageTreeFault::CountMismatch { declared, actual } => {
                write!(f, "root /Count is {} but {} pages were found", declared, actual)
            },
        }
    }
}

/// Classification of [`Error`] values, stable across the `Located` wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Required entry absent
    MissingRequiredEntry,
    /// Wrong dynamic type
    TypeMismatch,
    /// Value outside its domain
    PredicateViolation,
    /// Construct newer than the document
    VersionViolation,
    /// Dangling indirect reference
    ReferenceError,
    /// Page tree structure broken
    PageTreeCorrupted,
    /// Intentionally unimplemented construct
    UnsupportedConstruct,
    /// Cycle or depth guard tripped
    RecursionLimit,
    /// Anything else (malformed input, decoding)
    Malformed,
}

impl Error {
    /// Classify this error, looking through [`Error::Located`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingRequiredEntry { .. } => ErrorKind::MissingRequiredEntry,
            Error::TypeMismatch { .. } | Error::InvalidObjectType { .. } => {
                ErrorKind::TypeMismatch
            },
            Error::PredicateViolation { .. } => ErrorKind::PredicateViolation,
            Error::VersionViolation { .. } => ErrorKind::VersionViolation,
            Error::ObjectNotFound(_) => ErrorKind::ReferenceError,
            Error::PageTreeCorrupted { .. } => ErrorKind::PageTreeCorrupted,
            Error::Unsupported(_) | Error::UnsupportedFilter(_) => {
                ErrorKind::UnsupportedConstruct
            },
            Error::CircularReference(_) | Error::RecursionLimitExceeded(_) => {
                ErrorKind::RecursionLimit
            },
            Error::InvalidVersion(_)
            | Error::InvalidPdf(_)
            | Error::Decode(_)
            | Error::Serialization(_) => ErrorKind::Malformed,
            Error::Located { source, .. } => source.kind(),
        }
    }

    /// The innermost error, with any location wrapper removed.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Located { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Attach the object and page under validation, unless already located.
    pub(crate) fn located(self, object: Option<ObjectRef>, page: Option<usize>) -> Error {
        match (self, object) {
            (err @ Error::Located { .. }, _) => err,
            (err, Some(object)) => Error::Located {
                object,
                page,
                source: Box::new(err),
            },
            (err, None) => err,
        }
    }

    pub(crate) fn missing(dict: &str, entry: &str) -> Error {
        Error::MissingRequiredEntry {
            dict: dict.to_string(),
            entry: entry.to_string(),
        }
    }

    pub(crate) fn mismatch(dict: &str, entry: &str, expected: &str, found: &str) -> Error {
        Error::TypeMismatch {
            dict: dict.to_string(),
            entry: entry.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub(crate) fn violation(dict: &str, entry: &str, value: impl fmt::Display) -> Error {
        Error::PredicateViolation {
            dict: dict.to_string(),
            entry: entry.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn page_tree(object: Option<ObjectRef>, fault: PageTreeFault) -> Error {
        Error::PageTreeCorrupted { object, fault }
    }
}

fn display_ref(object: &Option<ObjectRef>) -> String {
    match object {
        Some(r) => r.to_string(),
        None => "<root>".to_string(),
    }
}

fn display_page(page: &Option<usize>) -> String {
    match page {
        Some(p) => format!(", page {}", p),
        None => String::new(),
    }
}
