//! Function objects over the dynamic calling convention.
//!
//! Rust carries no runtime metadata about parameter defaults, so a
//! `PyFunction` declares them explicitly: parameter names, define-time
//! default values for the tail of the list, and a body closure over the
//! bound namespace. `call` is the whole pipeline — rebind (when fixed),
//! bind, execute.

use std::{fmt, rc::Rc};

use crate::{
    args::ArgValues,
    defaults::SignatureInfo,
    exception::RunResult,
    signature::Signature,
    value::Value,
};

/// A function body: receives the bound namespace, one slot per parameter in
/// declaration order.
pub(crate) type FnBody = Rc<dyn Fn(&mut [Value]) -> RunResult<Value>>;

/// A function with explicit signature and define-time defaults.
///
/// Cloning shares the body and the defaults; a clone is the same callable.
#[derive(Clone)]
pub struct PyFunction {
    name: Rc<str>,
    signature: Signature,
    defaults: Vec<Value>,
    rebind: Option<Rc<SignatureInfo>>,
    body: FnBody,
}

impl PyFunction {
    /// Creates a function.
    ///
    /// `defaults` right-aligns to the parameter tail: with params
    /// `["a", "b", "c"]` and two defaults, `b` and `c` have them. The body
    /// receives one bound `Value` per parameter.
    ///
    /// # Panics
    /// If there are more defaults than parameters.
    pub fn new<F>(name: &str, params: &[&str], defaults: Vec<Value>, body: F) -> Self
    where
        F: Fn(&mut [Value]) -> RunResult<Value> + 'static,
    {
        let signature = Signature::new(params.iter().map(|param| Rc::from(*param)).collect(), defaults.len());
        Self {
            name: Rc::from(name),
            signature,
            defaults,
            rebind: None,
            body: Rc::new(body),
        }
    }

    /// The function name, used in error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether mutable-default rebinding has been attached.
    ///
    /// False both for never-inspected functions and for ones the inspector
    /// found not applicable.
    #[must_use]
    pub fn rebinds_defaults(&self) -> bool {
        self.rebind.is_some()
    }

    pub(crate) fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn defaults(&self) -> &[Value] {
        &self.defaults
    }

    pub(crate) fn with_rebind(self, info: SignatureInfo) -> Self {
        Self {
            rebind: Some(Rc::new(info)),
            ..self
        }
    }

    /// Calls the function.
    ///
    /// When rebinding is attached, defaulted parameters that the call left
    /// unsupplied receive a fresh copy of their define-time default before
    /// binding; everything else is untouched. Errors from the body propagate
    /// unchanged.
    pub fn call(&self, args: ArgValues) -> RunResult<Value> {
        let args = match &self.rebind {
            Some(info) => info.rebind(args)?,
            None => args,
        };
        let mut namespace = self.signature.bind(args, &self.defaults, &self.name)?;
        (self.body)(&mut namespace)
    }
}

impl fmt::Debug for PyFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PyFunction")
            .field("name", &self.name)
            .field("params", &self.signature.params())
            .field("defaults_count", &self.signature.defaults_count())
            .field("rebinds_defaults", &self.rebind.is_some())
            .finish_non_exhaustive()
    }
}
