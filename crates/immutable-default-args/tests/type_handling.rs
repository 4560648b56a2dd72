//! Tests covering every container kind subject to reconstruction.
//!
//! Mirrors the matrix the module is specified over: list, dict, set, typed
//! array, and bytearray defaults must each come back empty on every call no
//! matter how earlier calls mutated their copy. Also pins down the two
//! subtleties of reconstruction: the type code of a typed array survives it,
//! and it is shallow.

use immutable_default_args::{
    ArgValues, ArrayData, Key, PyFunction, TypeCode, TypedArray, Value, fix_mutable_defaults,
};
use pretty_assertions::assert_eq;

/// One empty default of each reconstructible kind.
fn mutable_defaults() -> Vec<Value> {
    vec![
        Value::list(vec![]),
        Value::dict([]),
        Value::set([]),
        Value::array(TypedArray::empty(TypeCode::I32)),
        Value::bytearray(vec![]),
    ]
}

/// Mutates `value` in a kind-appropriate way so a shared default would grow.
fn mutate(value: &Value, index: i64) {
    match value {
        Value::List(items) => items.borrow_mut().push(Value::Int(index)),
        Value::Dict(map) => {
            map.borrow_mut().insert(Key::Int(index), Value::str("value"));
        }
        Value::Set(set) => {
            set.borrow_mut().insert(Key::Int(index));
        }
        Value::Array(array) => array.borrow_mut().push_int(index).unwrap(),
        Value::ByteArray(bytes) => bytes.borrow_mut().push(u8::try_from(index % 256).unwrap()),
        other => panic!("not a mutable container: {other}"),
    }
}

// =============================================================================
// 1. The full container matrix
// =============================================================================

/// Every reconstructible kind starts empty on every call, even after a
/// hundred rounds of mutation.
#[test]
fn every_container_kind_is_isolated_per_call() {
    for default in mutable_defaults() {
        let kind = default.type_name();
        let func = fix_mutable_defaults(PyFunction::new(
            "return_mutable_default",
            &["iterable"],
            vec![default],
            |ns| Ok(ns[0].clone()),
        ));

        for index in 0..100 {
            let result = func.call(ArgValues::Empty).unwrap();
            assert_eq!(result.py_len(), Some(0), "{kind} leaked a previous mutation");
            mutate(&result, index);
            assert_eq!(result.py_len(), Some(1));
        }
    }
}

/// The same matrix behind a required positional parameter.
#[test]
fn every_container_kind_is_isolated_after_positional_arg() {
    for default in mutable_defaults() {
        let kind = default.type_name();
        let func = fix_mutable_defaults(PyFunction::new(
            "return_mutable_default",
            &["positional_arg", "iterable"],
            vec![default],
            |ns| Ok(ns[1].clone()),
        ));

        for index in 0..100 {
            let result = func.call(ArgValues::One(Value::str("positional_arg"))).unwrap();
            assert_eq!(result.py_len(), Some(0), "{kind} leaked a previous mutation");
            mutate(&result, index);
        }
    }
}

// =============================================================================
// 2. Typed arrays
// =============================================================================

/// Reconstruction preserves the array's type code across calls, so kind-level
/// behaviour like overflow checks stays intact.
#[test]
fn array_default_keeps_its_type_code() {
    let default = Value::array(TypedArray::new(TypeCode::U8, ArrayData::Int(vec![1, 2])).unwrap());
    let func = fix_mutable_defaults(PyFunction::new(
        "return_mutable_default",
        &["iterable"],
        vec![default],
        |ns| Ok(ns[0].clone()),
    ));

    for _ in 0..3 {
        let result = func.call(ArgValues::Empty).unwrap();
        let Value::Array(array) = &result else {
            panic!("expected array, got {result}");
        };
        assert_eq!(array.borrow().code(), TypeCode::U8);
        assert_eq!(result.to_string(), "array('B', [1, 2])");

        // still a u8 array: range checks apply to the fresh copy too
        array.borrow_mut().push_int(255).unwrap();
        array.borrow_mut().push_int(256).unwrap_err();
    }
}

/// Define-time array contents are part of every fresh copy.
#[test]
fn array_default_keeps_initial_elements() {
    let default = Value::array(TypedArray::new(TypeCode::F64, ArrayData::Float(vec![1.5])).unwrap());
    let func = fix_mutable_defaults(PyFunction::new(
        "return_mutable_default",
        &["iterable"],
        vec![default],
        |ns| Ok(ns[0].clone()),
    ));

    for _ in 0..3 {
        let result = func.call(ArgValues::Empty).unwrap();
        assert_eq!(result.to_string(), "array('d', [1.5])");
        let Value::Array(array) = &result else {
            panic!("expected array, got {result}");
        };
        array.borrow_mut().push_float(2.5).unwrap();
    }
}

// =============================================================================
// 3. Shallowness
// =============================================================================

/// Reconstruction rebuilds the outer container only; a mutable value nested
/// inside the default is the same object in every call.
#[test]
fn nested_mutable_inside_default_stays_shared() {
    let nested = Value::list(vec![]);
    let default = Value::list(vec![Value::Int(1), nested.clone()]);
    let func = fix_mutable_defaults(PyFunction::new(
        "return_mutable_default",
        &["iterable"],
        vec![default],
        |ns| Ok(ns[0].clone()),
    ));

    for index in 0..3 {
        let result = func.call(ArgValues::Empty).unwrap();
        // outer list is fresh each call
        assert_eq!(result.py_len(), Some(2));
        let Value::List(items) = &result else {
            panic!("expected list, got {result}");
        };
        let inner = items.borrow()[1].clone();
        assert!(inner.is(&nested));
        // mutations of the nested list accumulate across calls
        assert_eq!(inner.py_len(), Some(usize::try_from(index).unwrap()));
        mutate(&inner, index);
    }
}
