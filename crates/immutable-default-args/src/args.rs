//! Call-site argument values.
//!
//! `ArgValues` keeps dedicated variants for the common 0-2 positional-argument
//! calls so the typical invocation allocates nothing. Keyword arguments are an
//! insertion-ordered map, which keeps rebinding injections deterministic.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::value::{BuildHasher, Value};

/// Arguments supplied at a call site.
#[derive(Debug, Clone, Default)]
pub enum ArgValues {
    #[default]
    Empty,
    One(Value),
    Two(Value, Value),
    ArgsKwargs {
        args: Vec<Value>,
        kwargs: Kwargs,
    },
}

impl ArgValues {
    /// Creates arguments from positional values only, picking the smallest
    /// variant that fits.
    #[must_use]
    pub fn positional(args: Vec<Value>) -> Self {
        let mut iter = args.into_iter();
        match (iter.next(), iter.next()) {
            (None, _) => Self::Empty,
            (Some(first), None) => Self::One(first),
            (Some(first), Some(second)) => {
                let mut rest: Vec<Value> = iter.collect();
                if rest.is_empty() {
                    Self::Two(first, second)
                } else {
                    let mut args = vec![first, second];
                    args.append(&mut rest);
                    Self::ArgsKwargs {
                        args,
                        kwargs: Kwargs::default(),
                    }
                }
            }
        }
    }

    /// Creates arguments from positional values and keyword arguments.
    #[must_use]
    pub fn new(args: Vec<Value>, kwargs: Kwargs) -> Self {
        if kwargs.is_empty() {
            Self::positional(args)
        } else {
            Self::ArgsKwargs { args, kwargs }
        }
    }

    /// Number of positional arguments.
    #[must_use]
    pub fn positional_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Two(_, _) => 2,
            Self::ArgsKwargs { args, .. } => args.len(),
        }
    }

    /// Names supplied as keyword arguments, in call order.
    pub fn keyword_names(&self) -> impl Iterator<Item = &str> {
        let kwargs = match self {
            Self::ArgsKwargs { kwargs, .. } => Some(kwargs),
            _ => None,
        };
        kwargs.into_iter().flat_map(|kwargs| kwargs.iter().map(|(name, _)| name))
    }

    /// Inserts a value in front of the positional arguments.
    ///
    /// Used for the implicit first argument: an instance for plain methods,
    /// the class for class methods.
    #[must_use]
    pub fn prepend(self, value: Value) -> Self {
        match self {
            Self::Empty => Self::One(value),
            Self::One(first) => Self::Two(value, first),
            Self::Two(first, second) => Self::ArgsKwargs {
                args: vec![value, first, second],
                kwargs: Kwargs::default(),
            },
            Self::ArgsKwargs { mut args, kwargs } => {
                args.insert(0, value);
                Self::ArgsKwargs { args, kwargs }
            }
        }
    }

    /// Splits into positional values and keyword arguments.
    pub(crate) fn into_parts(self) -> (Vec<Value>, Kwargs) {
        match self {
            Self::Empty => (Vec::new(), Kwargs::default()),
            Self::One(first) => (vec![first], Kwargs::default()),
            Self::Two(first, second) => (vec![first, second], Kwargs::default()),
            Self::ArgsKwargs { args, kwargs } => (args, kwargs),
        }
    }
}

impl From<Vec<Value>> for ArgValues {
    fn from(args: Vec<Value>) -> Self {
        Self::positional(args)
    }
}

/// Keyword arguments: an insertion-ordered name-to-value map.
#[derive(Debug, Clone, Default)]
pub struct Kwargs {
    entries: IndexMap<Rc<str>, Value, BuildHasher>,
}

impl Kwargs {
    /// Creates an empty keyword-argument map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any existing entry for the name.
    #[must_use]
    pub fn set(mut self, name: &str, value: Value) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts an entry, replacing any existing one for the name.
    pub fn insert(&mut self, name: &str, value: Value) {
        self.entries.insert(Rc::from(name), value);
    }

    /// Inserts an entry under an already-shared name.
    pub(crate) fn insert_rc(&mut self, name: Rc<str>, value: Value) {
        self.entries.insert(name, value);
    }

    /// Whether a keyword with this name was supplied.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of keyword arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no keyword arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (&**name, value))
    }
}

impl IntoIterator for Kwargs {
    type Item = (Rc<str>, Value);
    type IntoIter = indexmap::map::IntoIter<Rc<str>, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_picks_smallest_variant() {
        assert!(matches!(ArgValues::positional(vec![]), ArgValues::Empty));
        assert!(matches!(ArgValues::positional(vec![Value::Int(1)]), ArgValues::One(_)));
        assert!(matches!(
            ArgValues::positional(vec![Value::Int(1), Value::Int(2)]),
            ArgValues::Two(_, _)
        ));
        assert_eq!(
            ArgValues::positional(vec![Value::Int(1), Value::Int(2), Value::Int(3)]).positional_count(),
            3
        );
    }

    #[test]
    fn prepend_shifts_existing_positionals() {
        let args = ArgValues::Two(Value::Int(1), Value::Int(2)).prepend(Value::Int(0));
        let (pos, kwargs) = args.into_parts();
        assert_eq!(pos, vec![Value::Int(0), Value::Int(1), Value::Int(2)]);
        assert!(kwargs.is_empty());
    }

    #[test]
    fn kwargs_preserve_insertion_order() {
        let kwargs = Kwargs::new().set("b", Value::Int(2)).set("a", Value::Int(1));
        let names: Vec<&str> = kwargs.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
