//! Dynamic value model with Python container semantics.
//!
//! Mutable containers are held behind shared handles (`Rc<RefCell<..>>`), so
//! every clone of a `Value` aliases the same underlying storage exactly as
//! Python names alias the same object. That aliasing is what makes a shared
//! default value hazardous, and what `fresh_copy` exists to sever: it builds
//! a new container of the same kind seeded with the same contents.
//!
//! The set of kinds is closed. Reconstruction dispatches over a fixed
//! allow-list (list, dict, set, typed array, bytearray); anything else
//! reaching it is a `TypeError`, which indicates a predicate/reconstruction
//! mismatch rather than a user error.

use std::{
    cell::RefCell,
    fmt::{self, Display},
    rc::Rc,
};

use indexmap::{IndexMap, IndexSet};
use strum::{Display, IntoStaticStr};

use crate::{
    class_builder::{Class, Instance},
    exception::{ExcType, RunResult},
};

/// Hasher used for all ordered maps and sets in the crate.
pub(crate) type BuildHasher = ahash::RandomState;

/// Insertion-ordered mapping backing `Value::Dict`.
pub type DictMap = IndexMap<Key, Value, BuildHasher>;

/// Insertion-ordered set backing `Value::Set`.
pub type SetData = IndexSet<Key, BuildHasher>;

/// The kind of a [`Value`], displayed with its Python type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum Type {
    #[strum(serialize = "NoneType")]
    NoneType,
    #[strum(serialize = "bool")]
    Bool,
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "float")]
    Float,
    #[strum(serialize = "str")]
    Str,
    #[strum(serialize = "bytes")]
    Bytes,
    #[strum(serialize = "tuple")]
    Tuple,
    #[strum(serialize = "list")]
    List,
    #[strum(serialize = "dict")]
    Dict,
    #[strum(serialize = "set")]
    Set,
    #[strum(serialize = "array")]
    Array,
    #[strum(serialize = "bytearray")]
    ByteArray,
    #[strum(serialize = "type")]
    Class,
    #[strum(serialize = "object")]
    Instance,
}

/// A dynamically typed value.
///
/// Scalars (`None`, `Bool`, `Int`, `Float`, `Str`, `Bytes`, `Tuple`) are
/// immutable; cloning them is value semantics for all observable purposes.
/// Containers (`List`, `Dict`, `Set`, `Array`, `ByteArray`) clone as shared
/// handles: mutation through one clone is visible through every other.
#[derive(Debug, Clone)]
pub enum Value {
    /// Python's `None` singleton.
    None,
    /// Python boolean (`True` or `False`).
    Bool(bool),
    /// Python integer (64-bit signed).
    Int(i64),
    /// Python float (64-bit IEEE 754).
    Float(f64),
    /// Python string (UTF-8, immutable).
    Str(Rc<str>),
    /// Python bytes object (immutable).
    Bytes(Rc<[u8]>),
    /// Python tuple (immutable sequence).
    Tuple(Rc<[Value]>),
    /// Python list (mutable sequence).
    List(Rc<RefCell<Vec<Value>>>),
    /// Python dictionary (insertion-ordered mutable mapping).
    Dict(Rc<RefCell<DictMap>>),
    /// Python set (mutable; insertion-ordered here for determinism).
    Set(Rc<RefCell<SetData>>),
    /// Fixed-typed numeric array, mirroring `array.array`.
    Array(Rc<RefCell<TypedArray>>),
    /// Python bytearray (mutable byte buffer).
    ByteArray(Rc<RefCell<Vec<u8>>>),
    /// A class object, passed as the implicit first argument of class methods.
    Class(Rc<Class>),
    /// An instance of a class, passed as the implicit first argument of
    /// plain methods.
    Instance(Rc<Instance>),
}

impl Value {
    /// Creates a string value.
    pub fn str(s: &str) -> Self {
        Self::Str(Rc::from(s))
    }

    /// Creates an immutable bytes value.
    pub fn bytes(bytes: &[u8]) -> Self {
        Self::Bytes(Rc::from(bytes))
    }

    /// Creates a tuple from its items.
    #[must_use]
    pub fn tuple(items: Vec<Self>) -> Self {
        Self::Tuple(Rc::from(items))
    }

    /// Creates a list with fresh backing storage.
    #[must_use]
    pub fn list(items: Vec<Self>) -> Self {
        Self::List(Rc::new(RefCell::new(items)))
    }

    /// Creates a dict with fresh backing storage, preserving pair order.
    pub fn dict(pairs: impl IntoIterator<Item = (Key, Self)>) -> Self {
        Self::Dict(Rc::new(RefCell::new(pairs.into_iter().collect())))
    }

    /// Creates a set with fresh backing storage, preserving insertion order.
    pub fn set(items: impl IntoIterator<Item = Key>) -> Self {
        Self::Set(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Creates a typed-array value with fresh backing storage.
    #[must_use]
    pub fn array(array: TypedArray) -> Self {
        Self::Array(Rc::new(RefCell::new(array)))
    }

    /// Creates a bytearray with fresh backing storage.
    #[must_use]
    pub fn bytearray(bytes: Vec<u8>) -> Self {
        Self::ByteArray(Rc::new(RefCell::new(bytes)))
    }

    /// The kind of this value.
    #[must_use]
    pub fn py_type(&self) -> Type {
        match self {
            Self::None => Type::NoneType,
            Self::Bool(_) => Type::Bool,
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::Str(_) => Type::Str,
            Self::Bytes(_) => Type::Bytes,
            Self::Tuple(_) => Type::Tuple,
            Self::List(_) => Type::List,
            Self::Dict(_) => Type::Dict,
            Self::Set(_) => Type::Set,
            Self::Array(_) => Type::Array,
            Self::ByteArray(_) => Type::ByteArray,
            Self::Class(_) => Type::Class,
            Self::Instance(_) => Type::Instance,
        }
    }

    /// The Python type name of this value, e.g. `"list"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.py_type().into()
    }

    /// Whether this value belongs to the fixed allow-list of mutable
    /// container kinds subject to per-call reconstruction.
    ///
    /// Mirrors the `MutableSequence`/`MutableMapping`/`MutableSet`/`array`/
    /// `bytearray` predicate of the original module. Immutable kinds
    /// (including `tuple`, `str`, and `bytes`) are never rebound.
    #[must_use]
    pub fn is_mutable_container(&self) -> bool {
        matches!(
            self,
            Self::List(_) | Self::Dict(_) | Self::Set(_) | Self::Array(_) | Self::ByteArray(_)
        )
    }

    /// Builds a new, independent container of the same kind with the same
    /// contents.
    ///
    /// The reconstruction is shallow: elements are handle-cloned, so a
    /// mutable value nested inside the container stays shared with the
    /// original. A typed array is rebuilt from its type code plus element
    /// list, since such containers require a type code at construction.
    ///
    /// # Errors
    /// `TypeError` if the value is not a mutable container kind. The
    /// classification step filters those out, so hitting this indicates a
    /// predicate/reconstruction mismatch.
    pub fn fresh_copy(&self) -> RunResult<Self> {
        match self {
            Self::List(items) => Ok(Self::List(Rc::new(RefCell::new(items.borrow().clone())))),
            Self::Dict(map) => Ok(Self::Dict(Rc::new(RefCell::new(map.borrow().clone())))),
            Self::Set(set) => Ok(Self::Set(Rc::new(RefCell::new(set.borrow().clone())))),
            Self::Array(array) => {
                let array = array.borrow();
                let rebuilt = TypedArray::new(array.code(), array.data().clone())?;
                Ok(Self::Array(Rc::new(RefCell::new(rebuilt))))
            }
            Self::ByteArray(bytes) => Ok(Self::ByteArray(Rc::new(RefCell::new(bytes.borrow().clone())))),
            other => Err(ExcType::type_error(format!(
                "cannot rebuild default of type '{}'",
                other.type_name()
            ))),
        }
    }

    /// Pointer identity, Python's `is`.
    ///
    /// Containers and other handle-backed kinds compare by handle; immediate
    /// scalars compare by value (every `5` is the same `5`).
    #[must_use]
    pub fn is(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => Rc::ptr_eq(a, b),
            (Self::Bytes(a), Self::Bytes(b)) => Rc::ptr_eq(a, b),
            (Self::Tuple(a), Self::Tuple(b)) => Rc::ptr_eq(a, b),
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b),
            (Self::Dict(a), Self::Dict(b)) => Rc::ptr_eq(a, b),
            (Self::Set(a), Self::Set(b)) => Rc::ptr_eq(a, b),
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::ByteArray(a), Self::ByteArray(b)) => Rc::ptr_eq(a, b),
            (Self::Class(a), Self::Class(b)) => Rc::ptr_eq(a, b),
            (Self::Instance(a), Self::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Python `len()`, or `None` for kinds without a length.
    #[must_use]
    pub fn py_len(&self) -> Option<usize> {
        match self {
            Self::Str(s) => Some(s.chars().count()),
            Self::Bytes(b) => Some(b.len()),
            Self::Tuple(items) => Some(items.len()),
            Self::List(items) => Some(items.borrow().len()),
            Self::Dict(map) => Some(map.borrow().len()),
            Self::Set(set) => Some(set.borrow().len()),
            Self::Array(array) => Some(array.borrow().len()),
            Self::ByteArray(bytes) => Some(bytes.borrow().len()),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::str(v)
    }
}

impl PartialEq for Value {
    /// Structural equality in the Python sense: containers compare by
    /// contents, classes and instances by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::Dict(a), Self::Dict(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::Set(a), Self::Set(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::ByteArray(a), Self::ByteArray(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Self::Class(a), Self::Class(b)) => Rc::ptr_eq(a, b),
            (Self::Instance(a), Self::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Display for Value {
    /// Python-style repr, used in messages and test failures.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => float_repr_fmt(*v, f),
            Self::Str(s) => str_repr_fmt(s, f),
            Self::Bytes(b) => bytes_repr_fmt(b, f),
            Self::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Dict(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Set(set) => {
                let set = set.borrow();
                if set.is_empty() {
                    return f.write_str("set()");
                }
                f.write_str("{")?;
                for (i, key) in set.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}")?;
                }
                f.write_str("}")
            }
            Self::Array(array) => write!(f, "{}", array.borrow()),
            Self::ByteArray(bytes) => {
                f.write_str("bytearray(")?;
                bytes_repr_fmt(&bytes.borrow(), f)?;
                f.write_str(")")
            }
            Self::Class(class) => write!(f, "<class '{}'>", class.name()),
            Self::Instance(instance) => write!(f, "<{} object>", instance.class().name()),
        }
    }
}

/// The hashable subset of [`Value`], used for dict keys and set elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    None,
    Bool(bool),
    Int(i64),
    Str(Rc<str>),
    Tuple(Rc<[Key]>),
}

impl Key {
    /// Creates a string key.
    pub fn str(s: &str) -> Self {
        Self::Str(Rc::from(s))
    }

    /// The equivalent [`Value`].
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::None => Value::None,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(v) => Value::Int(*v),
            Self::Str(s) => Value::Str(Rc::clone(s)),
            Self::Tuple(keys) => Value::tuple(keys.iter().map(Self::to_value).collect()),
        }
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Self::str(v)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

/// Type code of a [`TypedArray`], displayed as the Python `array` character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum TypeCode {
    #[strum(serialize = "b")]
    I8,
    #[strum(serialize = "B")]
    U8,
    #[strum(serialize = "h")]
    I16,
    #[strum(serialize = "H")]
    U16,
    #[strum(serialize = "i")]
    I32,
    #[strum(serialize = "I")]
    U32,
    #[strum(serialize = "q")]
    I64,
    #[strum(serialize = "f")]
    F32,
    #[strum(serialize = "d")]
    F64,
}

impl TypeCode {
    /// Whether this code stores floating-point elements.
    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Inclusive element bounds for integer codes, `None` for float codes.
    fn int_bounds(self) -> Option<(i64, i64)> {
        match self {
            Self::I8 => Some((i64::from(i8::MIN), i64::from(i8::MAX))),
            Self::U8 => Some((0, i64::from(u8::MAX))),
            Self::I16 => Some((i64::from(i16::MIN), i64::from(i16::MAX))),
            Self::U16 => Some((0, i64::from(u16::MAX))),
            Self::I32 => Some((i64::from(i32::MIN), i64::from(i32::MAX))),
            Self::U32 => Some((0, i64::from(u32::MAX))),
            Self::I64 => Some((i64::MIN, i64::MAX)),
            Self::F32 | Self::F64 => None,
        }
    }
}

/// Element storage for a [`TypedArray`]: one lane per element family.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Int(Vec<i64>),
    Float(Vec<f64>),
}

impl ArrayData {
    fn len(&self) -> usize {
        match self {
            Self::Int(values) => values.len(),
            Self::Float(values) => values.len(),
        }
    }
}

/// A fixed-typed numeric array, the `array.array` equivalent.
///
/// Unlike the other containers, reconstruction cannot simply copy contents
/// into a default-constructed value: the type code is part of the identity
/// and must be supplied again at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedArray {
    code: TypeCode,
    data: ArrayData,
}

impl TypedArray {
    /// Creates an array from a type code and matching element storage.
    ///
    /// # Errors
    /// `TypeError` if the storage lane does not match the code (e.g. float
    /// elements for an integer code).
    pub fn new(code: TypeCode, data: ArrayData) -> RunResult<Self> {
        match (&data, code.is_float()) {
            (ArrayData::Int(_), false) | (ArrayData::Float(_), true) => Ok(Self { code, data }),
            (ArrayData::Int(_), true) => Err(ExcType::type_error(format!(
                "type code '{code}' requires float values"
            ))),
            (ArrayData::Float(_), false) => Err(ExcType::type_error(format!(
                "type code '{code}' requires integer values"
            ))),
        }
    }

    /// Creates an empty array of the given type code.
    #[must_use]
    pub fn empty(code: TypeCode) -> Self {
        let data = if code.is_float() {
            ArrayData::Float(Vec::new())
        } else {
            ArrayData::Int(Vec::new())
        };
        Self { code, data }
    }

    /// The array's type code.
    #[must_use]
    pub fn code(&self) -> TypeCode {
        self.code
    }

    /// The element storage.
    #[must_use]
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    /// Appends an integer element.
    ///
    /// Float codes accept integers by conversion, as `array.append` does.
    ///
    /// # Errors
    /// `OverflowError` if the value is outside the code's range.
    pub fn push_int(&mut self, value: i64) -> RunResult<()> {
        match &mut self.data {
            ArrayData::Int(values) => {
                let (min, max) = self.code.int_bounds().expect("integer lane has bounds");
                if value < min || value > max {
                    return Err(ExcType::overflow_error(format!(
                        "value {value} out of range for type code '{}'",
                        self.code
                    )));
                }
                values.push(value);
                Ok(())
            }
            ArrayData::Float(values) => {
                values.push(value as f64);
                Ok(())
            }
        }
    }

    /// Appends a float element.
    ///
    /// # Errors
    /// `TypeError` for integer codes, matching `array.append`.
    pub fn push_float(&mut self, value: f64) -> RunResult<()> {
        match &mut self.data {
            ArrayData::Float(values) => {
                values.push(value);
                Ok(())
            }
            ArrayData::Int(_) => Err(ExcType::type_error(
                "'float' object cannot be interpreted as an integer",
            )),
        }
    }
}

impl Display for TypedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "array('{}')", self.code);
        }
        write!(f, "array('{}', [", self.code)?;
        match &self.data {
            ArrayData::Int(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
            }
            ArrayData::Float(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    float_repr_fmt(*value, f)?;
                }
            }
        }
        f.write_str("])")
    }
}

/// Writes a float the way Python reprs it for whole values (`5.0`, not `5`).
fn float_repr_fmt(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.is_finite() && value.trunc() == value {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}

/// Writes a single-quoted string repr with minimal escaping.
fn str_repr_fmt(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("'")?;
    for c in s.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            other => write!(f, "{other}")?,
        }
    }
    f.write_str("'")
}

/// Writes a `b'..'` bytes repr.
fn bytes_repr_fmt(bytes: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("b'")?;
    for &byte in bytes {
        match byte {
            b'\'' => f.write_str("\\'")?,
            b'\\' => f.write_str("\\\\")?,
            b'\n' => f.write_str("\\n")?,
            b'\t' => f.write_str("\\t")?,
            b'\r' => f.write_str("\\r")?,
            0x20..=0x7e => write!(f, "{}", byte as char)?,
            other => write!(f, "\\x{other:02x}")?,
        }
    }
    f.write_str("'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_predicate_matches_allow_list() {
        assert!(Value::list(vec![]).is_mutable_container());
        assert!(Value::dict([]).is_mutable_container());
        assert!(Value::set([]).is_mutable_container());
        assert!(Value::array(TypedArray::empty(TypeCode::I32)).is_mutable_container());
        assert!(Value::bytearray(vec![]).is_mutable_container());

        assert!(!Value::None.is_mutable_container());
        assert!(!Value::Int(5).is_mutable_container());
        assert!(!Value::str("immutable").is_mutable_container());
        assert!(!Value::bytes(b"immutable").is_mutable_container());
        assert!(!Value::tuple(vec![Value::Int(1)]).is_mutable_container());
    }

    #[test]
    fn fresh_copy_is_independent_but_equal() {
        let original = Value::list(vec![Value::Int(1), Value::Int(2)]);
        let copy = original.fresh_copy().unwrap();
        assert_eq!(original, copy);
        assert!(!original.is(&copy));

        if let Value::List(items) = &copy {
            items.borrow_mut().push(Value::Int(3));
        }
        assert_eq!(original.py_len(), Some(2));
        assert_eq!(copy.py_len(), Some(3));
    }

    #[test]
    fn fresh_copy_preserves_array_type_code() {
        let original = Value::array(TypedArray::new(TypeCode::I16, ArrayData::Int(vec![7])).unwrap());
        let copy = original.fresh_copy().unwrap();
        let Value::Array(array) = &copy else {
            panic!("expected array, got {copy}");
        };
        assert_eq!(array.borrow().code(), TypeCode::I16);
        assert_eq!(array.borrow().len(), 1);
    }

    #[test]
    fn fresh_copy_rejects_non_container_kinds() {
        let err = Value::Int(5).fresh_copy().unwrap_err();
        assert_eq!(err.exc_type(), crate::ExcType::TypeError);
        assert_eq!(err.msg(), "cannot rebuild default of type 'int'");
    }

    #[test]
    fn fresh_copy_is_shallow() {
        let nested = Value::dict([(Key::str("k"), Value::str("v"))]);
        let original = Value::list(vec![Value::Int(1), nested.clone()]);
        let copy = original.fresh_copy().unwrap();

        // the outer list is new, the nested dict is the same object
        assert!(!original.is(&copy));
        if let Value::List(items) = &copy {
            assert!(items.borrow()[1].is(&nested));
        }
    }

    #[test]
    fn repr_matches_python() {
        let value = Value::list(vec![
            Value::Int(1),
            Value::dict([(Key::str("key"), Value::str("value"))]),
            Value::Float(2.0),
        ]);
        assert_eq!(value.to_string(), "[1, {'key': 'value'}, 2.0]");

        let array = Value::array(TypedArray::new(TypeCode::I32, ArrayData::Int(vec![1, 2])).unwrap());
        assert_eq!(array.to_string(), "array('i', [1, 2])");
        assert_eq!(Value::bytearray(b"ab\n".to_vec()).to_string(), "bytearray(b'ab\\n')");
        assert_eq!(Value::set([]).to_string(), "set()");
    }

    #[test]
    fn typed_array_checks_lanes_and_ranges() {
        let err = TypedArray::new(TypeCode::I32, ArrayData::Float(vec![1.0])).unwrap_err();
        assert_eq!(err.msg(), "type code 'i' requires integer values");

        let mut array = TypedArray::empty(TypeCode::U8);
        array.push_int(255).unwrap();
        let err = array.push_int(256).unwrap_err();
        assert_eq!(err.exc_type(), crate::ExcType::OverflowError);

        let err = array.push_float(1.5).unwrap_err();
        assert_eq!(err.msg(), "'float' object cannot be interpreted as an integer");
    }
}
