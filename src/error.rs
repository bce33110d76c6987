use std::borrow::Cow;
use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures from dictionary lookups, registration, validation, and example generation.
///
/// Every variant carries a context string naming where the failure happened. For validation
/// failures this is the breadcrumb path through the value (`district > officer > id`).
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A type name was looked up but nothing is registered under it.
    UnknownType { name: String, context: String },
    /// An entry was registered with an `extends` parent that isn't registered yet.
    UnknownParent { name: String, parent: String },
    /// Registering the entry would make its `extends` chain loop back onto itself.
    InheritanceCycle { name: String, parent: String },
    /// A required value, either at the top level or in a field, was not provided.
    MissingValue { description: String, context: String },
    /// The value was present but failed a structural check or a custom validator.
    Invalid { description: String, context: String },
    /// A leaf type had no example values to draw from.
    MissingExample { name: String, context: String },
    /// Recursion went deeper than the configured limit.
    DepthLimit { context: String },
}

impl Error {
    /// Construct a validation failure. This is what custom validator hooks should return.
    pub fn invalid(description: impl Into<String>, context: impl Into<String>) -> Self {
        Error::Invalid {
            description: description.into(),
            context: context.into(),
        }
    }

    pub(crate) fn missing(description: impl Into<String>, context: impl Into<String>) -> Self {
        Error::MissingValue {
            description: description.into(),
            context: context.into(),
        }
    }

    /// A human-readable description of what failed.
    pub fn description(&self) -> Cow<'_, str> {
        match *self {
            Error::UnknownType { ref name, .. } => Cow::Owned(format!("Type '{}' is not defined", name)),
            Error::UnknownParent { ref parent, .. } => {
                Cow::Owned(format!("Parent type '{}' not found", parent))
            }
            Error::InheritanceCycle { ref name, ref parent } => Cow::Owned(format!(
                "Extending '{}' would make '{}' inherit from itself",
                parent, name
            )),
            Error::MissingValue { ref description, .. } => Cow::Borrowed(description),
            Error::Invalid { ref description, .. } => Cow::Borrowed(description),
            Error::MissingExample { ref name, .. } => {
                Cow::Owned(format!("Type '{}' has no example values", name))
            }
            Error::DepthLimit { .. } => Cow::Borrowed("Depth limit exceeded"),
        }
    }

    /// Where the failure happened.
    pub fn context(&self) -> &str {
        match *self {
            Error::UnknownType { ref context, .. } => context,
            Error::UnknownParent { ref name, .. } => name,
            Error::InheritanceCycle { ref name, .. } => name,
            Error::MissingValue { ref context, .. } => context,
            Error::Invalid { ref context, .. } => context,
            Error::MissingExample { ref context, .. } => context,
            Error::DepthLimit { ref context } => context,
        }
    }

    /// True if this is a validation failure (as opposed to a lookup or registration problem).
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::MissingValue { .. } | Error::Invalid { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let context = self.context();
        if context.is_empty() {
            f.write_str(&self.description())
        } else {
            write!(f, "{} [context: {}]", self.description(), context)
        }
    }
}

impl std::error::Error for Error {}
