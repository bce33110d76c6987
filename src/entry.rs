use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::field::{FieldSpec, Fields, Target};
use crate::value::Value;

/// Signature of a custom validator: the value being checked and its context path.
pub type ValidatorFn = dyn Fn(&Value, &str) -> Result<()> + Send + Sync;

/// A custom validator attached to a schema entry. Runs after the structural field checks.
///
/// Two hooks are equal only if they are the same closure.
#[derive(Clone)]
pub struct Hook(Arc<ValidatorFn>);

impl Hook {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &str) -> Result<()> + Send + Sync + 'static,
    {
        Hook(Arc::new(f))
    }

    /// Run the validator.
    pub fn call(&self, value: &Value, context: &str) -> Result<()> {
        (self.0)(value, context)
    }
}

impl PartialEq for Hook {
    fn eq(&self, rhs: &Self) -> bool {
        Arc::ptr_eq(&self.0, &rhs.0)
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hook({:p})", Arc::as_ptr(&self.0))
    }
}

/// Documentation attached to a type.
///
/// Merged key by key under inheritance: a child's `description` replaces its parent's, but a
/// parent's `note` survives if the child doesn't set one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Doc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example values. Leaf types draw generated examples from here.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub example: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Doc {
    /// Overlay `child` on top of this doc, returning the merged result.
    pub fn merged_with(&self, child: &Doc) -> Doc {
        Doc {
            description: child.description.clone().or_else(|| self.description.clone()),
            example: if child.example.is_empty() {
                self.example.clone()
            } else {
                child.example.clone()
            },
            note: child.note.clone().or_else(|| self.note.clone()),
        }
    }
}

/// A type definition, as registered in a [`SchemaDict`][crate::SchemaDict] or passed inline.
///
/// An entry without fields (or with an empty field map) is a leaf type: it is checked only by
/// its validator hook, has no rendered shape, and draws examples from `doc.example`.
///
/// ```
/// # use typedict::{SchemaEntry, Error};
/// let officer = SchemaEntry::new()
///     .description("District Officer")
///     .req("id", "uint")
///     .opt("name", "string")
///     .req("wards", "array.companyName");
///
/// let company_name = SchemaEntry::new()
///     .description("Company Name")
///     .examples(["apple", "microsoft", "google", "amazon"])
///     .extends("string")
///     .validator(|v, ctx| match v.as_str() {
///         Some(s) if !s.is_empty() => Ok(()),
///         _ => Err(Error::invalid("Company name can't be empty", ctx)),
///     });
/// # let _ = (officer, company_name);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SchemaEntry {
    pub doc: Doc,
    pub fields: Option<Fields>,
    pub extends: Option<String>,
    pub validator: Option<Hook>,
}

impl SchemaEntry {
    /// Make a new, empty entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.doc.description = Some(description.into());
        self
    }

    /// Set the note.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.doc.note = Some(note.into());
        self
    }

    /// Add a value to the example pool.
    pub fn example(mut self, example: impl Into<Value>) -> Self {
        self.doc.example.push(example.into());
        self
    }

    /// Add several values to the example pool.
    pub fn examples<I, V>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.doc.example.extend(examples.into_iter().map(Into::into));
        self
    }

    /// Add or replace a field.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.get_or_insert_with(Fields::new).insert(name, spec);
        self
    }

    /// Add a required field.
    pub fn req(self, name: impl Into<String>, target: impl Into<Target>) -> Self {
        self.field(name, FieldSpec::req(target))
    }

    /// Add an optional field.
    pub fn opt(self, name: impl Into<String>, target: impl Into<Target>) -> Self {
        self.field(name, FieldSpec::new(target))
    }

    /// Mark this as a composite type even if it declares no fields of its own.
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Inherit from a registered type.
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    /// Attach a custom validator.
    pub fn validator<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &str) -> Result<()> + Send + Sync + 'static,
    {
        self.validator = Some(Hook::new(f));
        self
    }

    /// Attach an already-built validator hook, e.g. one shared between entries.
    pub fn hook(mut self, hook: Hook) -> Self {
        self.validator = Some(hook);
        self
    }
}

/// A schema entry with its inheritance chain flattened. This is what lookups produce.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedEntry {
    pub doc: Doc,
    /// `None` for leaf types. Never `Some` of an empty map.
    pub fields: Option<Fields>,
    pub validator: Option<Hook>,
}

impl ResolvedEntry {
    /// Take an entry as-is, ignoring its `extends`.
    pub(crate) fn own(entry: &SchemaEntry) -> Self {
        Self {
            doc: entry.doc.clone(),
            fields: entry.fields.clone().filter(|f| !f.is_empty()),
            validator: entry.validator.clone(),
        }
    }

    /// Flatten `child` on top of this (already resolved) parent.
    pub(crate) fn extended_by(self, child: &SchemaEntry) -> Self {
        let fields = match (self.fields, &child.fields) {
            (Some(mut parent), Some(own)) => {
                parent.merge(own);
                Some(parent)
            }
            (parent, own) => parent.or_else(|| own.clone()),
        };
        Self {
            doc: self.doc.merged_with(&child.doc),
            fields: fields.filter(|f| !f.is_empty()),
            validator: child.validator.clone().or(self.validator),
        }
    }

    /// True for leaf types.
    pub fn is_leaf(&self) -> bool {
        self.fields.is_none()
    }
}
