//! Entry validation combinators.
//!
//! Each `validate_*_entry` function checks one dictionary entry and returns its
//! typed value. The common algorithm lives in [`validate_entry`]:
//!
//! 1. look the entry up; absent is an error only when the entry is required
//! 2. dereference it through the [`XRefTable`]
//! 3. a `null` result is treated like an absent entry
//! 4. check the version gate
//! 5. check the dynamic type
//! 6. run the predicate, if any
//!
//! Kinds of values are described by the [`EntryKind`] trait so the same
//! algorithm serves every PDF type.

use crate::error::{Error, Result};
use crate::geometry::Rectangle;
use crate::object::{Dictionary, Object, ObjectRef, StreamDict};
use crate::version::{Version, VersionGate};
use crate::xref::XRefTable;
use serde::Serialize;
use std::fmt;

/// A kind of PDF value an entry may hold.
pub trait EntryKind {
    /// Typed value extracted from a matching object.
    type Value;

    /// Type name used in mismatch errors.
    const EXPECTED: &'static str;

    /// Whether the entry is dereferenced before type checking.
    const RESOLVE: bool = true;

    /// Extract the typed value, handing the object back on mismatch.
    fn extract(obj: Object) -> std::result::Result<Self::Value, Object>;

    /// Whether the predicate runs on an optional entry holding `value`.
    fn predicate_applies(_value: &Self::Value) -> bool {
        true
    }
}

/// Boolean entries.
pub struct BooleanKind;
/// Integer entries.
pub struct IntegerKind;
/// Integer or real entries.
pub struct NumberKind;
/// Name entries.
pub struct NameKind;
/// Literal or hexadecimal string entries.
pub struct StringKind;
/// Array entries.
pub struct ArrayKind;
/// Dictionary entries (streams excluded).
pub struct DictKind;
/// Stream entries.
pub struct StreamKind;
/// Entries that must be written as an indirect reference.
pub struct IndRefKind;

impl EntryKind for BooleanKind {
    type Value = bool;
    const EXPECTED: &'static str = "Boolean";

    fn extract(obj: Object) -> std::result::Result<bool, Object> {
        match obj {
            Object::Boolean(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl EntryKind for IntegerKind {
    type Value = i64;
    const EXPECTED: &'static str = "Integer";

    fn extract(obj: Object) -> std::result::Result<i64, Object> {
        match obj {
            Object::Integer(i) => Ok(i),
            other => Err(other),
        }
    }
}

impl EntryKind for NumberKind {
    type Value = Number;
    const EXPECTED: &'static str = "Number";

    fn extract(obj: Object) -> std::result::Result<Number, Object> {
        match obj {
            Object::Integer(i) => Ok(Number::Integer(i)),
            Object::Real(r) => Ok(Number::Real(r)),
            other => Err(other),
        }
    }
}

impl EntryKind for NameKind {
    type Value = String;
    const EXPECTED: &'static str = "Name";

    fn extract(obj: Object) -> std::result::Result<String, Object> {
        match obj {
            Object::Name(n) => Ok(n),
            other => Err(other),
        }
    }

    fn predicate_applies(value: &String) -> bool {
        !value.is_empty()
    }
}

impl EntryKind for StringKind {
    type Value = Vec<u8>;
    const EXPECTED: &'static str = "String";

    fn extract(obj: Object) -> std::result::Result<Vec<u8>, Object> {
        match obj {
            Object::String(s) | Object::HexString(s) => Ok(s),
            other => Err(other),
        }
    }

    fn predicate_applies(value: &Vec<u8>) -> bool {
        !value.is_empty()
    }
}

impl EntryKind for ArrayKind {
    type Value = Vec<Object>;
    const EXPECTED: &'static str = "Array";

    fn extract(obj: Object) -> std::result::Result<Vec<Object>, Object> {
        match obj {
            Object::Array(a) => Ok(a),
            other => Err(other),
        }
    }
}

impl EntryKind for DictKind {
    type Value = Dictionary;
    const EXPECTED: &'static str = "Dictionary";

    fn extract(obj: Object) -> std::result::Result<Dictionary, Object> {
        match obj {
            Object::Dictionary(d) => Ok(d),
            other => Err(other),
        }
    }
}

impl EntryKind for StreamKind {
    type Value = StreamDict;
    const EXPECTED: &'static str = "Stream";

    fn extract(obj: Object) -> std::result::Result<StreamDict, Object> {
        match obj {
            Object::Stream(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl EntryKind for IndRefKind {
    type Value = ObjectRef;
    const EXPECTED: &'static str = "Reference";
    const RESOLVE: bool = false;

    fn extract(obj: Object) -> std::result::Result<ObjectRef, Object> {
        match obj {
            Object::Reference(r) => Ok(r),
            other => Err(other),
        }
    }
}

/// A PDF number that remembers whether it was written as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Number {
    /// Written as an integer
    Integer(i64),
    /// Written as a real
    Real(f64),
}

impl Number {
    /// Numeric value.
    pub fn value(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Real(r) => *r,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Real(r) => write!(f, "{}", r),
        }
    }
}

/// Value of an entry that admits two types.
#[derive(Debug, Clone, PartialEq)]
pub enum Either<L, R> {
    /// First alternative
    Left(L),
    /// Second alternative
    Right(R),
}

/// Predicate matching names from a fixed set.
pub fn name_in<'a>(allowed: &'a [&'a str]) -> impl Fn(&String) -> bool + 'a {
    move |name: &String| allowed.contains(&name.as_str())
}

fn absent<T>(dict_name: &str, entry_name: &str, required: bool) -> Result<Option<T>> {
    if required {
        Err(Error::missing(dict_name, entry_name))
    } else {
        Ok(None)
    }
}

/// Look up, dereference and version-check an entry; `None` when absent or null.
fn resolve_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: VersionGate,
) -> Result<Option<(Object, Object)>> {
    let Some(raw) = dict.get(entry_name) else {
        return absent(dict_name, entry_name, required);
    };
    let value = xref.dereference(raw)?;
    if value.is_null() {
        log::debug!("{}: /{} resolves to null", dict_name, entry_name);
        return absent(dict_name, entry_name, required);
    }
    xref.validate_version(&format!("{}.{}", dict_name, entry_name), since)?;
    Ok(Some((raw.clone(), value)))
}

/// Validate one dictionary entry of kind `K`.
///
/// For names and strings, the predicate of an optional entry is skipped when
/// the value is empty.
pub fn validate_entry<K: EntryKind>(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&K::Value) -> bool>,
) -> Result<Option<K::Value>> {
    let Some((raw, value)) = resolve_entry(xref, dict, dict_name, entry_name, required, since.into())?
    else {
        return Ok(None);
    };

    let candidate = if K::RESOLVE { value } else { raw };
    let typed = K::extract(candidate)
        .map_err(|found| Error::mismatch(dict_name, entry_name, K::EXPECTED, found.type_name()))?;

    if let Some(pred) = predicate {
        if (required || K::predicate_applies(&typed)) && !pred(&typed) {
            let shown = shown_value::<K>(xref, dict, entry_name, None);
            return Err(Error::violation(dict_name, entry_name, shown));
        }
    }
    Ok(Some(typed))
}

/// Text of an entry, or of one of its array elements, for a predicate
/// violation. Only called once a check has failed, so values are formatted
/// on the error path alone.
fn shown_value<K: EntryKind>(
    xref: &XRefTable,
    dict: &Dictionary,
    entry_name: &str,
    index: Option<usize>,
) -> String {
    let Some(raw) = dict.get(entry_name) else {
        return String::new();
    };
    let resolve = |obj: &Object| xref.dereference(obj).unwrap_or_else(|_| obj.clone());
    let value = resolve(raw);
    match index {
        Some(i) => match &value {
            Object::Array(items) => items.get(i).map_or_else(String::new, |item| {
                if K::RESOLVE {
                    resolve(item).to_string()
                } else {
                    item.to_string()
                }
            }),
            other => other.to_string(),
        },
        None if K::RESOLVE => value.to_string(),
        None => raw.to_string(),
    }
}

/// Validate a boolean entry.
pub fn validate_boolean_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
) -> Result<Option<bool>> {
    validate_entry::<BooleanKind>(xref, dict, dict_name, entry_name, required, since, None)
}

/// Validate an integer entry.
pub fn validate_integer_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&i64) -> bool>,
) -> Result<Option<i64>> {
    validate_entry::<IntegerKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate a number entry; the predicate sees the value widened to `f64`.
pub fn validate_number_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(f64) -> bool>,
) -> Result<Option<Number>> {
    let adapted = predicate.map(|p| move |n: &Number| p(n.value()));
    let adapted = adapted.as_ref().map(|f| f as &dyn Fn(&Number) -> bool);
    validate_entry::<NumberKind>(xref, dict, dict_name, entry_name, required, since, adapted)
}

/// Validate a name entry.
pub fn validate_name_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&String) -> bool>,
) -> Result<Option<String>> {
    validate_entry::<NameKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate a string entry (literal or hexadecimal).
pub fn validate_string_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&Vec<u8>) -> bool>,
) -> Result<Option<Vec<u8>>> {
    validate_entry::<StringKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate an array entry without looking at its elements.
pub fn validate_array_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&Vec<Object>) -> bool>,
) -> Result<Option<Vec<Object>>> {
    validate_entry::<ArrayKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate a dictionary entry.
pub fn validate_dict_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
) -> Result<Option<Dictionary>> {
    validate_entry::<DictKind>(xref, dict, dict_name, entry_name, required, since, None)
}

/// Validate a stream entry.
pub fn validate_stream_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
) -> Result<Option<StreamDict>> {
    validate_entry::<StreamKind>(xref, dict, dict_name, entry_name, required, since, None)
}

/// Validate an entry that must be an indirect reference.
pub fn validate_ind_ref_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
) -> Result<Option<ObjectRef>> {
    validate_entry::<IndRefKind>(xref, dict, dict_name, entry_name, required, since, None)
}

/// Validate an array whose elements are all of kind `K`.
///
/// The predicate sees the raw array (length rules). Null elements are skipped;
/// the first element of the wrong type fails with an index-qualified entry
/// name such as `Decode[3]`.
pub fn validate_array_of<K: EntryKind>(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&Vec<Object>) -> bool>,
) -> Result<Option<Vec<K::Value>>> {
    let Some(array) =
        validate_array_entry(xref, dict, dict_name, entry_name, required, since, predicate)?
    else {
        return Ok(None);
    };

    let mut values = Vec::with_capacity(array.len());
    for (i, element) in array.into_iter().enumerate() {
        let resolved = xref.dereference(&element)?;
        if resolved.is_null() {
            continue;
        }
        let candidate = if K::RESOLVE { resolved } else { element };
        let value = K::extract(candidate).map_err(|found| {
            Error::mismatch(
                dict_name,
                &format!("{}[{}]", entry_name, i),
                K::EXPECTED,
                found.type_name(),
            )
        })?;
        values.push(value);
    }
    Ok(Some(values))
}

/// Validate an array of integers.
pub fn validate_integer_array_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&Vec<Object>) -> bool>,
) -> Result<Option<Vec<i64>>> {
    validate_array_of::<IntegerKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate an array of numbers.
pub fn validate_number_array_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&Vec<Object>) -> bool>,
) -> Result<Option<Vec<Number>>> {
    validate_array_of::<NumberKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate an array of names.
pub fn validate_name_array_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&Vec<Object>) -> bool>,
) -> Result<Option<Vec<String>>> {
    validate_array_of::<NameKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate an array of strings.
pub fn validate_string_array_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&Vec<Object>) -> bool>,
) -> Result<Option<Vec<Vec<u8>>>> {
    validate_array_of::<StringKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate an array of booleans.
pub fn validate_boolean_array_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&Vec<Object>) -> bool>,
) -> Result<Option<Vec<bool>>> {
    validate_array_of::<BooleanKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate an array of indirect references.
pub fn validate_ind_ref_array_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&Vec<Object>) -> bool>,
) -> Result<Option<Vec<ObjectRef>>> {
    validate_array_of::<IndRefKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate an array of arrays.
pub fn validate_array_array_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&Vec<Object>) -> bool>,
) -> Result<Option<Vec<Vec<Object>>>> {
    validate_array_of::<ArrayKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate an array of dictionaries.
pub fn validate_dict_array_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&Vec<Object>) -> bool>,
) -> Result<Option<Vec<Dictionary>>> {
    validate_array_of::<DictKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate an entry holding either a single `K` or an array of `K`.
///
/// The predicate runs on every value.
pub fn validate_one_or_many<K: EntryKind>(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&K::Value) -> bool>,
) -> Result<Option<Vec<K::Value>>> {
    let Some((raw, value)) = resolve_entry(xref, dict, dict_name, entry_name, required, since.into())?
    else {
        return Ok(None);
    };

    let expected = format!("{} or Array of {}", K::EXPECTED, K::EXPECTED);
    let elements: Vec<(Option<usize>, Object)> = match value {
        Object::Array(items) => {
            let mut elements = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                let resolved = xref.dereference(&item)?;
                if resolved.is_null() {
                    continue;
                }
                let candidate = if K::RESOLVE { resolved } else { item };
                elements.push((Some(i), candidate));
            }
            elements
        },
        single => {
            let candidate = if K::RESOLVE { single } else { raw };
            vec![(None, candidate)]
        },
    };

    let entry_label = |index: Option<usize>| match index {
        Some(i) => format!("{}[{}]", entry_name, i),
        None => entry_name.to_string(),
    };
    let mut values = Vec::with_capacity(elements.len());
    for (index, candidate) in elements {
        let typed = K::extract(candidate).map_err(|found| {
            Error::mismatch(dict_name, &entry_label(index), &expected, found.type_name())
        })?;
        if let Some(pred) = predicate {
            if (required || K::predicate_applies(&typed)) && !pred(&typed) {
                let shown = shown_value::<K>(xref, dict, entry_name, index);
                return Err(Error::violation(dict_name, &entry_label(index), shown));
            }
        }
        values.push(typed);
    }
    Ok(Some(values))
}

/// Validate a name or an array of names.
pub fn validate_name_or_array_of_name_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&String) -> bool>,
) -> Result<Option<Vec<String>>> {
    validate_one_or_many::<NameKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate an integer or an array of integers.
pub fn validate_integer_or_array_of_integer_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&i64) -> bool>,
) -> Result<Option<Vec<i64>>> {
    validate_one_or_many::<IntegerKind>(xref, dict, dict_name, entry_name, required, since, predicate)
}

/// Validate a boolean or an array of booleans.
pub fn validate_boolean_or_array_of_boolean_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
) -> Result<Option<Vec<bool>>> {
    validate_one_or_many::<BooleanKind>(xref, dict, dict_name, entry_name, required, since, None)
}

/// Validate an entry holding a value of kind `L` or of kind `R`.
pub fn validate_either<L: EntryKind, R: EntryKind>(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
) -> Result<Option<Either<L::Value, R::Value>>> {
    let Some((raw, value)) = resolve_entry(xref, dict, dict_name, entry_name, required, since.into())?
    else {
        return Ok(None);
    };

    let left = if L::RESOLVE { value.clone() } else { raw.clone() };
    let found = match L::extract(left) {
        Ok(v) => return Ok(Some(Either::Left(v))),
        Err(found) => found,
    };
    let right = if R::RESOLVE { value } else { raw };
    match R::extract(right) {
        Ok(v) => Ok(Some(Either::Right(v))),
        Err(_) => Err(Error::mismatch(
            dict_name,
            entry_name,
            &format!("{} or {}", L::EXPECTED, R::EXPECTED),
            found.type_name(),
        )),
    }
}

/// Validate an integer or a string.
pub fn validate_int_or_string_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
) -> Result<Option<Either<i64, Vec<u8>>>> {
    validate_either::<IntegerKind, StringKind>(xref, dict, dict_name, entry_name, required, since)
}

/// Validate an integer or a dictionary.
pub fn validate_int_or_dict_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
) -> Result<Option<Either<i64, Dictionary>>> {
    validate_either::<IntegerKind, DictKind>(xref, dict, dict_name, entry_name, required, since)
}

/// Validate a string or a stream.
pub fn validate_string_or_stream_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
) -> Result<Option<Either<Vec<u8>, StreamDict>>> {
    validate_either::<StringKind, StreamKind>(xref, dict, dict_name, entry_name, required, since)
}

/// Validate a boolean or a stream.
pub fn validate_boolean_or_stream_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
) -> Result<Option<Either<bool, StreamDict>>> {
    validate_either::<BooleanKind, StreamKind>(xref, dict, dict_name, entry_name, required, since)
}

/// Validate a rectangle: an array of exactly four numbers.
pub fn validate_rectangle_entry(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    entry_name: &str,
    required: bool,
    since: impl Into<VersionGate>,
    predicate: Option<&dyn Fn(&Rectangle) -> bool>,
) -> Result<Option<Rectangle>> {
    let four = |a: &Vec<Object>| a.len() == 4;
    let Some(numbers) =
        validate_number_array_entry(xref, dict, dict_name, entry_name, required, since, Some(&four))?
    else {
        return Ok(None);
    };

    let values: Vec<f64> = numbers.iter().map(Number::value).collect();
    // Four elements were required, but null elements are skipped
    let rect = Rectangle::from_slice(&values).ok_or_else(|| {
        Error::violation(dict_name, entry_name, format!("{:?}", values))
    })?;

    if let Some(pred) = predicate {
        if !pred(&rect) {
            return Err(Error::violation(dict_name, entry_name, format!("{:?}", values)));
        }
    }
    Ok(Some(rect))
}

/// Validate an entry that must be a dictionary with a given `/Type`.
///
/// `/Type` itself is optional unless `type_required`.
pub fn validate_typed_dict(
    xref: &XRefTable,
    dict: &Dictionary,
    dict_name: &str,
    type_name: &str,
    type_required: bool,
) -> Result<()> {
    let expected = [type_name];
    validate_name_entry(
        xref,
        dict,
        dict_name,
        "Type",
        type_required,
        Version::V10,
        Some(&name_in(&expected)),
    )?;
    Ok(())
}
