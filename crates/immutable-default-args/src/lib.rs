#![doc = include_str!("../../../README.md")]
#![expect(clippy::float_cmp, reason = "value equality mirrors Python float semantics")]

mod args;
mod class_builder;
mod defaults;
mod exception;
mod function;
mod signature;
mod value;

pub use crate::{
    args::{ArgValues, Kwargs},
    class_builder::{Class, ClassAttr, ClassBuilder, Instance},
    defaults::fix_mutable_defaults,
    exception::{ExcType, RunResult, SimpleException},
    function::PyFunction,
    value::{ArrayData, DictMap, Key, SetData, Type, TypeCode, TypedArray, Value},
};
