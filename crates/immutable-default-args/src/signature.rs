//! Function signature representation and argument binding.
//!
//! Only positional-or-keyword parameters are modeled; defaults bind to the
//! tail of the parameter list. The binding algorithm follows CPython's
//! conventions and error messages: positional fill first, then keyword fill
//! with duplicate and unknown-name detection, then defaults, then the
//! missing-argument check.
//!
//! Defaults are applied by handle-cloning the define-time value. For mutable
//! containers that clone aliases the original object across calls, which is
//! exactly the shared-default hazard the rebinding layer removes before
//! binding ever sees the call.

use std::rc::Rc;

use crate::{
    args::ArgValues,
    exception::{ExcType, RunResult},
    value::Value,
};

/// A function signature: parameter names with tail-aligned defaults.
///
/// For `def f(a, b, c=1, d=2)` the params are `[a, b, c, d]` and
/// `defaults_count` is 2: defaults always apply to the last `k` parameters.
#[derive(Debug, Clone)]
pub(crate) struct Signature {
    params: Vec<Rc<str>>,
    defaults_count: usize,
}

impl Signature {
    /// Creates a signature.
    ///
    /// # Panics
    /// If there are more defaults than parameters; that shape is unwritable
    /// in the source convention being modeled.
    pub fn new(params: Vec<Rc<str>>, defaults_count: usize) -> Self {
        assert!(
            defaults_count <= params.len(),
            "more default values than parameters"
        );
        Self { params, defaults_count }
    }

    /// All parameter names in declaration order.
    pub fn params(&self) -> &[Rc<str>] {
        &self.params
    }

    /// Total number of parameters.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Number of trailing parameters with defaults.
    pub fn defaults_count(&self) -> usize {
        self.defaults_count
    }

    /// Names of the parameters before the first defaulted one.
    ///
    /// These are the slots a caller must always fill; positional arguments
    /// beyond this prefix start shadowing defaulted parameters.
    pub fn positional_names(&self) -> &[Rc<str>] {
        &self.params[..self.params.len() - self.defaults_count]
    }

    /// Binds arguments to parameters, producing the call namespace.
    ///
    /// The returned vector has one `Value` per parameter, in declaration
    /// order.
    ///
    /// # Errors
    /// `TypeError` for too many positional arguments, an unexpected keyword,
    /// an argument supplied both positionally and by name, or a missing
    /// required argument.
    pub fn bind(&self, args: ArgValues, defaults: &[Value], func_name: &str) -> RunResult<Vec<Value>> {
        debug_assert_eq!(defaults.len(), self.defaults_count);

        let (pos, kwargs) = args.into_parts();
        let param_count = self.params.len();
        if pos.len() > param_count {
            return Err(ExcType::type_error_too_many_positional(func_name, param_count, pos.len()));
        }
        let first_optional = param_count - self.defaults_count;

        // Fast path: purely positional calls just extend with defaults.
        if kwargs.is_empty() {
            let mut namespace = pos;
            if namespace.len() < first_optional {
                return Err(self.missing_positional_error(namespace.len(), func_name));
            }
            while namespace.len() < param_count {
                namespace.push(defaults[namespace.len() - first_optional].clone());
            }
            return Ok(namespace);
        }

        // Full algorithm: fill slots positionally, then by keyword.
        let mut slots: Vec<Option<Value>> = self.params.iter().map(|_| None).collect();
        for (slot, value) in slots.iter_mut().zip(pos) {
            *slot = Some(value);
        }

        for (name, value) in kwargs {
            let Some(idx) = self.params.iter().position(|param| **param == *name) else {
                return Err(ExcType::type_error_unexpected_keyword(func_name, &name));
            };
            if slots[idx].is_some() {
                return Err(ExcType::type_error_duplicate_arg(func_name, &self.params[idx]));
            }
            slots[idx] = Some(value);
        }

        for (offset, slot) in slots[first_optional..].iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(defaults[offset].clone());
            }
        }

        let missing: Vec<&str> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(idx, _)| &*self.params[idx])
            .collect();
        if !missing.is_empty() {
            return Err(ExcType::type_error_missing_positional_with_names(func_name, &missing));
        }

        Ok(slots
            .into_iter()
            .map(|slot| slot.expect("missing parameters rejected above"))
            .collect())
    }

    /// Builds the missing-argument error for a purely positional call.
    fn missing_positional_error(&self, actual_count: usize, func_name: &str) -> crate::SimpleException {
        let missing: Vec<&str> = self.params[actual_count..self.params.len() - self.defaults_count]
            .iter()
            .map(|name| &**name)
            .collect();
        ExcType::type_error_missing_positional_with_names(func_name, &missing)
    }
}
