//! Exception types for the calling convention.
//!
//! The error surface is deliberately small: binding failures and the
//! (unreachable under correct classification) reconstruction mismatch are
//! `TypeError`s, unknown attributes are `AttributeError`s, and typed-array
//! range violations are `OverflowError`s. Errors raised by a function body
//! propagate unchanged; the rebinding machinery adds no failure kind of its
//! own.

use std::fmt::{self, Display};

use strum::{Display, EnumString, IntoStaticStr};

/// Result type alias for operations that can produce a runtime error.
pub type RunResult<T> = Result<T, SimpleException>;

/// Python exception types surfaced by this crate.
///
/// Uses strum derives for automatic `Display`, `FromStr`, and
/// `Into<&'static str>` implementations. The string representation matches
/// the variant name exactly (e.g., `TypeError` -> "TypeError").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum ExcType {
    /// Wrong argument shapes, uncallable attributes, and reconstruction of a
    /// kind outside the container allow-list.
    TypeError,
    /// Lookup of a name a class or instance does not define.
    AttributeError,
    /// A typed-array element outside the range of its type code.
    OverflowError,
}

impl ExcType {
    /// Creates a `TypeError` with the given message.
    pub(crate) fn type_error(msg: impl Into<String>) -> SimpleException {
        SimpleException::new_msg(Self::TypeError, msg)
    }

    /// Creates an `OverflowError` with the given message.
    pub(crate) fn overflow_error(msg: impl Into<String>) -> SimpleException {
        SimpleException::new_msg(Self::OverflowError, msg)
    }

    /// "f() takes 2 positional arguments but 3 were given"
    pub(crate) fn type_error_too_many_positional(func: &str, max: usize, given: usize) -> SimpleException {
        Self::type_error(format!(
            "{func}() takes {max} positional argument{} but {given} {} given",
            if max == 1 { "" } else { "s" },
            if given == 1 { "was" } else { "were" },
        ))
    }

    /// "f() got an unexpected keyword argument 'x'"
    pub(crate) fn type_error_unexpected_keyword(func: &str, keyword: &str) -> SimpleException {
        Self::type_error(format!("{func}() got an unexpected keyword argument '{keyword}'"))
    }

    /// "f() got multiple values for argument 'a'"
    pub(crate) fn type_error_duplicate_arg(func: &str, param: &str) -> SimpleException {
        Self::type_error(format!("{func}() got multiple values for argument '{param}'"))
    }

    /// "f() missing 2 required positional arguments: 'a' and 'b'"
    pub(crate) fn type_error_missing_positional_with_names(func: &str, names: &[&str]) -> SimpleException {
        let missing_count = names.len();
        SimpleException::new_msg(
            Self::TypeError,
            format!(
                "{func}() missing {missing_count} required positional argument{}: {}",
                if missing_count == 1 { "" } else { "s" },
                format_param_names(names),
            ),
        )
    }

    /// "'int' object is not callable"
    pub(crate) fn type_error_not_callable(type_name: &str) -> SimpleException {
        Self::type_error(format!("'{type_name}' object is not callable"))
    }

    /// "type object 'Foo' has no attribute 'bar'"
    pub(crate) fn attribute_error_type(class_name: &str, attr: &str) -> SimpleException {
        SimpleException::new_msg(
            Self::AttributeError,
            format!("type object '{class_name}' has no attribute '{attr}'"),
        )
    }

    /// "'Foo' object has no attribute 'bar'"
    pub(crate) fn attribute_error_instance(class_name: &str, attr: &str) -> SimpleException {
        SimpleException::new_msg(
            Self::AttributeError,
            format!("'{class_name}' object has no attribute '{attr}'"),
        )
    }
}

/// Joins quoted parameter names the way CPython lists them: a lone name
/// stands alone, two are joined with `and`, three or more are comma-separated
/// with `, and` before the last.
fn format_param_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => format!("'{only}'"),
        [first, second] => format!("'{first}' and '{second}'"),
        [init @ .., last] => {
            let mut joined: String = init
                .iter()
                .map(|name| format!("'{name}'"))
                .collect::<Vec<_>>()
                .join(", ");
            joined.push_str(", and '");
            joined.push_str(last);
            joined.push('\'');
            joined
        }
    }
}

/// An exception instance: a type plus a formatted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleException {
    exc_type: ExcType,
    msg: String,
}

impl SimpleException {
    /// Creates an exception of the given type with a message.
    ///
    /// Function bodies use this to raise; the binding and rebinding layers
    /// propagate such errors unchanged.
    pub fn new_msg(exc_type: ExcType, msg: impl Into<String>) -> Self {
        Self {
            exc_type,
            msg: msg.into(),
        }
    }

    /// The exception type.
    #[must_use]
    pub fn exc_type(&self) -> ExcType {
        self.exc_type
    }

    /// The message, without the exception type prefix.
    #[must_use]
    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl Display for SimpleException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.exc_type, self.msg)
    }
}

impl std::error::Error for SimpleException {}
