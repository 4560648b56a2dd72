//! Mutable-default inspection and call-time rebinding.
//!
//! The inspector runs once, at fix time: it pairs default values with the
//! tail of the parameter list, keeps the container-like ones in a
//! declaration-ordered registry, and records the names that can only be
//! filled positionally. The rebinder runs per call: it works out which
//! registered parameters the caller left unsupplied — neither reached by the
//! positional fill nor named in the keywords — and injects a fresh copy of
//! each one's define-time default before binding.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::{
    args::ArgValues,
    exception::RunResult,
    function::PyFunction,
    signature::Signature,
    value::{BuildHasher, Value},
};

/// What the inspector learned about a signature with container-like defaults.
#[derive(Debug, Clone)]
pub(crate) struct SignatureInfo {
    /// Parameter name -> define-time default, declaration order, container-like
    /// entries only. Never mutated after construction; the stored values are
    /// the templates every call copies from.
    registry: IndexMap<Rc<str>, Value, BuildHasher>,
    /// Names before the first defaulted parameter. Positional arguments
    /// beyond this prefix shadow defaulted slots.
    positional_names: Vec<Rc<str>>,
}

impl SignatureInfo {
    /// Inspects a signature, returning `None` when rebinding is not
    /// applicable: no parameters, no defaults, or no container-like default.
    pub fn inspect(signature: &Signature, defaults: &[Value]) -> Option<Self> {
        if signature.param_count() == 0 || defaults.is_empty() {
            return None;
        }

        // defaults bind to the last k parameters
        let defaulted = &signature.params()[signature.param_count() - defaults.len()..];
        let mut registry: IndexMap<Rc<str>, Value, BuildHasher> = IndexMap::default();
        for (name, default) in defaulted.iter().zip(defaults) {
            if default.is_mutable_container() {
                registry.insert(Rc::clone(name), default.clone());
            }
        }
        if registry.is_empty() {
            return None;
        }

        Some(Self {
            registry,
            positional_names: signature.positional_names().to_vec(),
        })
    }

    /// Rewrites one call's arguments, injecting fresh copies for registered
    /// parameters the caller did not supply.
    ///
    /// `start` is how many registry entries the positional arguments reached;
    /// entries at positions below it were filled positionally and are skipped
    /// entirely — positional overrides always win. Entries at or past `start`
    /// are rebound unless the call names them as keywords.
    pub fn rebind(&self, args: ArgValues) -> RunResult<ArgValues> {
        let start = args.positional_count().saturating_sub(self.positional_names.len());
        if start >= self.registry.len() {
            return Ok(args);
        }

        let (pos, mut kwargs) = args.into_parts();
        for (name, template) in self.registry.iter().skip(start) {
            if !kwargs.contains(name) {
                kwargs.insert_rc(Rc::clone(name), template.fresh_copy()?);
            }
        }
        Ok(ArgValues::new(pos, kwargs))
    }
}

/// Attaches per-call reconstruction of mutable default arguments to a
/// function.
///
/// Returns the function unchanged when inspection finds nothing applicable
/// (no parameters, no defaults, or only non-container defaults), and when the
/// function has already been fixed — applying the fix twice is a no-op.
#[must_use]
pub fn fix_mutable_defaults(func: PyFunction) -> PyFunction {
    if func.rebinds_defaults() {
        return func;
    }
    match SignatureInfo::inspect(func.signature(), func.defaults()) {
        Some(info) => func.with_rebind(info),
        None => func,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args::Kwargs, value::Key};

    fn sig(params: &[&str], defaults_count: usize) -> Signature {
        Signature::new(params.iter().map(|p| Rc::from(*p)).collect(), defaults_count)
    }

    #[test]
    fn inspect_not_applicable_without_container_defaults() {
        assert!(SignatureInfo::inspect(&sig(&[], 0), &[]).is_none());
        assert!(SignatureInfo::inspect(&sig(&["a", "b"], 0), &[]).is_none());
        assert!(
            SignatureInfo::inspect(&sig(&["a", "test"], 1), &[Value::Int(5)]).is_none(),
            "immutable defaults are not registered"
        );
        assert!(SignatureInfo::inspect(&sig(&["a", "test"], 1), &[Value::str("immutable")]).is_none());
    }

    #[test]
    fn inspect_registers_container_defaults_in_order() {
        let signature = sig(&["cls", "argument_a", "test", "other"], 2);
        let defaults = [
            Value::dict([(Key::str("key"), Value::str("value"))]),
            Value::list(vec![]),
        ];
        let info = SignatureInfo::inspect(&signature, &defaults).expect("applicable");

        let names: Vec<&str> = info.registry.keys().map(|name| &**name).collect();
        assert_eq!(names, vec!["test", "other"]);
        let positional: Vec<&str> = info.positional_names.iter().map(|name| &**name).collect();
        assert_eq!(positional, vec!["cls", "argument_a"]);
    }

    #[test]
    fn inspect_skips_immutable_defaults_in_mixed_tail() {
        let signature = sig(&["a", "flag", "items"], 2);
        let defaults = [Value::Bool(true), Value::list(vec![])];
        let info = SignatureInfo::inspect(&signature, &defaults).expect("applicable");
        let names: Vec<&str> = info.registry.keys().map(|name| &**name).collect();
        assert_eq!(names, vec!["items"]);
    }

    #[test]
    fn rebind_injects_only_unsupplied_names() {
        let signature = sig(&["self", "pos", "a", "b"], 2);
        let defaults = [Value::list(vec![]), Value::dict([])];
        let info = SignatureInfo::inspect(&signature, &defaults).expect("applicable");

        // both defaulted params unsupplied: both injected
        let args = info
            .rebind(ArgValues::Two(Value::None, Value::str("pos")))
            .unwrap();
        let injected: Vec<&str> = args.keyword_names().collect();
        assert_eq!(injected, vec!["a", "b"]);

        // keyword override for 'a' is left alone, only 'b' injected
        let supplied = ArgValues::new(
            vec![Value::None, Value::str("pos")],
            Kwargs::new().set("a", Value::Int(1)),
        );
        let args = info.rebind(supplied).unwrap();
        let names: Vec<&str> = args.keyword_names().collect();
        assert_eq!(names, vec!["a", "b"]);
        let (_, kwargs) = args.into_parts();
        let a = kwargs.iter().find(|(name, _)| *name == "a").map(|(_, v)| v.clone());
        assert_eq!(a, Some(Value::Int(1)));
    }

    #[test]
    fn rebind_skips_positionally_filled_registry_entries() {
        let signature = sig(&["self", "pos", "a", "b"], 2);
        let defaults = [Value::list(vec![]), Value::dict([])];
        let info = SignatureInfo::inspect(&signature, &defaults).expect("applicable");

        // 'a' filled positionally: start = 3 - 2 = 1, only 'b' injected
        let args = info
            .rebind(ArgValues::positional(vec![
                Value::None,
                Value::str("pos"),
                Value::str("explicit"),
            ]))
            .unwrap();
        let injected: Vec<&str> = args.keyword_names().collect();
        assert_eq!(injected, vec!["b"]);

        // every registered entry filled positionally: args pass through untouched
        let args = info
            .rebind(ArgValues::positional(vec![
                Value::None,
                Value::str("pos"),
                Value::str("explicit"),
                Value::str("explicit"),
            ]))
            .unwrap();
        assert_eq!(args.keyword_names().count(), 0);
    }

    #[test]
    fn rebind_injects_fresh_copies_not_the_template() {
        let template = Value::list(vec![Value::Int(1)]);
        let signature = sig(&["a"], 1);
        let info = SignatureInfo::inspect(&signature, &[template.clone()]).expect("applicable");

        let (_, kwargs) = info.rebind(ArgValues::Empty).unwrap().into_parts();
        let injected = kwargs.iter().next().map(|(_, v)| v.clone()).expect("injected");
        assert_eq!(injected, template);
        assert!(!injected.is(&template));
    }
}
