//! PDF object types.
//!
//! The object model is a closed tagged union: every validator matches on
//! [`Object`] exhaustively, and indirect objects are represented by
//! [`ObjectRef`] handles into the [`XRefTable`](crate::xref::XRefTable).

use bytes::Bytes;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// PDF dictionary. Keys are names without the leading `/`.
pub type Dictionary = IndexMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// Name (starting with /)
    Name(String),
    /// Literal string `( ... )`
    String(Vec<u8>),
    /// Hexadecimal string `< ... >`
    HexString(Vec<u8>),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(Dictionary),
    /// Stream (dictionary + data)
    Stream(StreamDict),
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

/// One stage of a stream's filter pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Filter name, e.g. `FlateDecode`
    pub name: String,
    /// Matching `/DecodeParms` dictionary, if any
    pub decode_parms: Option<Dictionary>,
}

/// A stream object: its dictionary, raw payload and filter pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamDict {
    /// Stream dictionary
    pub dict: Dictionary,
    /// Stream data as stored in the file
    pub raw: Bytes,
    /// Decoded data, filled in the first time the stream is decoded
    pub decoded: Option<Bytes>,
    /// Filters to apply, in order
    pub filters: Vec<FilterSpec>,
}

impl StreamDict {
    /// Create a stream, deriving the filter pipeline from `/Filter` and `/DecodeParms`.
    ///
    /// Only direct `/Filter` values are understood here; the pipeline of a stream
    /// whose `/Filter` is an indirect reference is empty.
    pub fn new(dict: Dictionary, raw: impl Into<Bytes>) -> Self {
        let filters = filter_pipeline(&dict);
        Self {
            dict,
            raw: raw.into(),
            decoded: None,
            filters,
        }
    }

    /// Stream dictionary entry.
    pub fn get(&self, key: &str) -> Option<&Object> {
        self.dict.get(key)
    }
}

/// Build the filter pipeline described by a stream dictionary.
///
/// The Filter entry can be either a single Name or an Array of Names; DecodeParms
/// correspondingly a dictionary or an array of dictionaries (or nulls).
fn filter_pipeline(dict: &Dictionary) -> Vec<FilterSpec> {
    let names: Vec<String> = match dict.get("Filter") {
        Some(Object::Name(name)) => vec![name.clone()],
        Some(Object::Array(arr)) => arr
            .iter()
            .filter_map(|obj| obj.as_name().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };

    let parms: Vec<Option<Dictionary>> = match dict.get("DecodeParms") {
        Some(Object::Dictionary(d)) => vec![Some(d.clone())],
        Some(Object::Array(arr)) => arr
            .iter()
            .map(|obj| match obj {
                Object::Dictionary(d) => Some(d.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| FilterSpec {
            name,
            decode_parms: parms.get(i).cloned().flatten(),
        })
        .collect()
}

impl Object {
    /// Create a name object.
    pub fn name(name: &str) -> Object {
        Object::Name(name.to_string())
    }

    /// Create a literal string object.
    pub fn string(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec())
    }

    /// Get the type name of this object (without data).
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::Name(_) => "Name",
            Object::String(_) => "String",
            Object::HexString(_) => "HexString",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Stream(_) => "Stream",
            Object::Reference(_) => "Reference",
        }
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to cast to a number; integers are widened.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Object::Integer(i) => Some(*i as f64),
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to string bytes (literal or hexadecimal).
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) | Object::HexString(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary. Works for both Dictionary and Stream objects.
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream(s) => Some(&s.dict),
            _ => None,
        }
    }

    /// Try to cast to stream.
    pub fn as_stream(&self) -> Option<&StreamDict> {
        match self {
            Object::Stream(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if object is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }
}

impl From<Dictionary> for Object {
    fn from(dict: Dictionary) -> Self {
        Object::Dictionary(dict)
    }
}

impl From<ObjectRef> for Object {
    fn from(r: ObjectRef) -> Self {
        Object::Reference(r)
    }
}

impl From<StreamDict> for Object {
    fn from(s: StreamDict) -> Self {
        Object::Stream(s)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Null => write!(f, "null"),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::Integer(i) => write!(f, "{}", i),
            Object::Real(r) => write!(f, "{}", r),
            Object::Name(n) => write!(f, "/{}", n),
            Object::String(s) => write!(f, "({})", String::from_utf8_lossy(s)),
            Object::HexString(s) => {
                write!(f, "<")?;
                for b in s {
                    write!(f, "{:02X}", b)?;
                }
                write!(f, ">")
            },
            Object::Array(arr) => {
                write!(f, "[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            },
            Object::Dictionary(d) => fmt_dict(f, d),
            Object::Stream(s) => {
                fmt_dict(f, &s.dict)?;
                write!(f, " stream({} bytes)", s.raw.len())
            },
            Object::Reference(r) => write!(f, "{}", r),
        }
    }
}

fn fmt_dict(f: &mut fmt::Formatter<'_>, d: &Dictionary) -> fmt::Result {
    write!(f, "<<")?;
    for (key, value) in d {
        write!(f, " /{} {}", key, value)?;
    }
    write!(f, " >>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_integer() {
        let obj = Object::Integer(42);
        assert_eq!(obj.as_integer(), Some(42));
        assert_eq!(obj.as_number(), Some(42.0));
        assert!(obj.as_name().is_none());
        assert!(!obj.is_null());
    }

    #[test]
    fn test_object_strings() {
        let lit = Object::string("Hello");
        let hex = Object::HexString(b"Hello".to_vec());
        assert_eq!(lit.as_string(), Some(&b"Hello"[..]));
        assert_eq!(hex.as_string(), Some(&b"Hello"[..]));
        assert_eq!(hex.type_name(), "HexString");
    }

    #[test]
    fn test_object_stream_dict_access() {
        let mut dict = Dictionary::new();
        dict.insert("Length".to_string(), Object::Integer(11));
        let obj = Object::Stream(StreamDict::new(dict, &b"stream data"[..]));

        // Stream objects are also accessible as dictionaries
        let d = obj.as_dict().unwrap();
        assert_eq!(d.get("Length").unwrap().as_integer(), Some(11));
        assert!(obj.as_stream().unwrap().decoded.is_none());
    }

    #[test]
    fn test_filter_pipeline_single() {
        let mut dict = Dictionary::new();
        dict.insert("Filter".to_string(), Object::name("FlateDecode"));
        let stream = StreamDict::new(dict, Vec::new());
        assert_eq!(stream.filters.len(), 1);
        assert_eq!(stream.filters[0].name, "FlateDecode");
        assert!(stream.filters[0].decode_parms.is_none());
    }

    #[test]
    fn test_filter_pipeline_with_parms() {
        let mut parms = Dictionary::new();
        parms.insert("Predictor".to_string(), Object::Integer(12));
        let mut dict = Dictionary::new();
        dict.insert(
            "Filter".to_string(),
            Object::Array(vec![Object::name("ASCII85Decode"), Object::name("FlateDecode")]),
        );
        dict.insert(
            "DecodeParms".to_string(),
            Object::Array(vec![Object::Null, Object::Dictionary(parms)]),
        );
        let stream = StreamDict::new(dict, Vec::new());
        assert_eq!(stream.filters.len(), 2);
        assert!(stream.filters[0].decode_parms.is_none());
        assert!(stream.filters[1].decode_parms.is_some());
    }

    #[test]
    fn test_object_ref_display() {
        let obj_ref = ObjectRef::new(10, 0);
        assert_eq!(format!("{}", obj_ref), "10 0 R");
    }

    #[test]
    fn test_object_display() {
        let obj = Object::Array(vec![
            Object::Integer(1),
            Object::name("DeviceRGB"),
            Object::HexString(vec![0xAB]),
            Object::Reference(ObjectRef::new(3, 0)),
        ]);
        assert_eq!(obj.to_string(), "[1 /DeviceRGB <AB> 3 0 R]");
    }

    #[test]
    fn test_object_ref_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ObjectRef::new(1, 0));
        set.insert(ObjectRef::new(2, 0));
        set.insert(ObjectRef::new(1, 0)); // Duplicate

        assert_eq!(set.len(), 2);
    }
}
