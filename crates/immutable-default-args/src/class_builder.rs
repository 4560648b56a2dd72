//! Class construction with bulk default-rebinding.
//!
//! The dynamic original hooks type creation with a metaclass; here class
//! construction is an explicit builder, and `build` is the hook: it walks
//! every attribute, unwraps function-like ones from their method-kind
//! wrapper, attaches rebinding where applicable, and re-wraps them in the
//! same kind. Data attributes pass through untouched.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::{
    args::ArgValues,
    defaults::fix_mutable_defaults,
    exception::{ExcType, RunResult},
    function::PyFunction,
    value::{BuildHasher, Value},
};

/// An attribute bound on a class.
///
/// The three function-like variants are the method-kind wrapper: the bulk
/// pass fixes the inner function and keeps the variant, so a class method
/// stays a class method.
#[derive(Debug, Clone)]
pub enum ClassAttr {
    /// Plain data; never inspected or altered.
    Data(Value),
    /// An instance method; calls through an instance prepend it.
    Method(PyFunction),
    /// A class method; calls prepend the class, through either access path.
    ClassMethod(PyFunction),
    /// A static method; nothing is prepended.
    StaticMethod(PyFunction),
}

impl ClassAttr {
    /// The inner function for function-like attributes.
    #[must_use]
    pub fn as_function(&self) -> Option<&PyFunction> {
        match self {
            Self::Data(_) => None,
            Self::Method(func) | Self::ClassMethod(func) | Self::StaticMethod(func) => Some(func),
        }
    }

    /// Applies the mutable-default fix, preserving the method kind.
    fn fixed(self) -> Self {
        match self {
            Self::Data(value) => Self::Data(value),
            Self::Method(func) => Self::Method(fix_mutable_defaults(func)),
            Self::ClassMethod(func) => Self::ClassMethod(fix_mutable_defaults(func)),
            Self::StaticMethod(func) => Self::StaticMethod(fix_mutable_defaults(func)),
        }
    }
}

/// Builder for a [`Class`]; the construction-time bulk applier.
#[derive(Debug)]
pub struct ClassBuilder {
    name: Rc<str>,
    attrs: IndexMap<Rc<str>, ClassAttr, BuildHasher>,
}

impl ClassBuilder {
    /// Starts a class definition.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Rc::from(name),
            attrs: IndexMap::default(),
        }
    }

    /// Binds a data attribute.
    #[must_use]
    pub fn data(self, name: &str, value: Value) -> Self {
        self.set(name, ClassAttr::Data(value))
    }

    /// Binds an instance method. Its first parameter receives the instance.
    #[must_use]
    pub fn method(self, name: &str, func: PyFunction) -> Self {
        self.set(name, ClassAttr::Method(func))
    }

    /// Binds a class method. Its first parameter receives the class.
    #[must_use]
    pub fn class_method(self, name: &str, func: PyFunction) -> Self {
        self.set(name, ClassAttr::ClassMethod(func))
    }

    /// Binds a static method.
    #[must_use]
    pub fn static_method(self, name: &str, func: PyFunction) -> Self {
        self.set(name, ClassAttr::StaticMethod(func))
    }

    fn set(mut self, name: &str, attr: ClassAttr) -> Self {
        self.attrs.insert(Rc::from(name), attr);
        self
    }

    /// Finalizes the class, applying the mutable-default fix to every
    /// function-like attribute.
    ///
    /// Safe to run over attributes that were already fixed individually; the
    /// fix is a no-op the second time.
    #[must_use]
    pub fn build(self) -> Rc<Class> {
        let attrs = self
            .attrs
            .into_iter()
            .map(|(name, attr)| (name, attr.fixed()))
            .collect();
        Rc::new(Class { name: self.name, attrs })
    }
}

/// A finalized class.
#[derive(Debug)]
pub struct Class {
    name: Rc<str>,
    attrs: IndexMap<Rc<str>, ClassAttr, BuildHasher>,
}

impl Class {
    /// The class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&ClassAttr> {
        self.attrs.get(name)
    }

    /// Creates an instance of this class.
    #[must_use]
    pub fn instantiate(self: &Rc<Self>) -> Rc<Instance> {
        Rc::new(Instance { class: Rc::clone(self) })
    }

    /// Calls a method through the class.
    ///
    /// Class methods receive the class as implicit first argument. Instance
    /// methods called this way are unbound: the caller passes an explicit
    /// first argument, as in `Foo.method(instance, ..)`.
    ///
    /// # Errors
    /// `AttributeError` for unknown names, `TypeError` when the attribute is
    /// plain data.
    pub fn call_method(self: &Rc<Self>, name: &str, args: ArgValues) -> RunResult<Value> {
        match self.attrs.get(name) {
            None => Err(ExcType::attribute_error_type(&self.name, name)),
            Some(ClassAttr::Data(value)) => Err(ExcType::type_error_not_callable(value.type_name())),
            Some(ClassAttr::Method(func) | ClassAttr::StaticMethod(func)) => func.call(args),
            Some(ClassAttr::ClassMethod(func)) => func.call(args.prepend(Value::Class(Rc::clone(self)))),
        }
    }
}

/// An instance of a [`Class`].
#[derive(Debug)]
pub struct Instance {
    class: Rc<Class>,
}

impl Instance {
    /// The class this instance belongs to.
    #[must_use]
    pub fn class(&self) -> &Rc<Class> {
        &self.class
    }

    /// Calls a method through the instance.
    ///
    /// Instance methods receive the instance as implicit first argument;
    /// class methods receive the class, exactly as when called through the
    /// class itself.
    ///
    /// # Errors
    /// `AttributeError` for unknown names, `TypeError` when the attribute is
    /// plain data.
    pub fn call_method(self: &Rc<Self>, name: &str, args: ArgValues) -> RunResult<Value> {
        match self.class.attr(name) {
            None => Err(ExcType::attribute_error_instance(self.class.name(), name)),
            Some(ClassAttr::Data(value)) => Err(ExcType::type_error_not_callable(value.type_name())),
            Some(ClassAttr::Method(func)) => func.call(args.prepend(Value::Instance(Rc::clone(self)))),
            Some(ClassAttr::ClassMethod(func)) => func.call(args.prepend(Value::Class(Rc::clone(&self.class)))),
            Some(ClassAttr::StaticMethod(func)) => func.call(args),
        }
    }
}
