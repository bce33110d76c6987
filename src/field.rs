//! Field specifications: what type a member of a composite type holds, and whether it must be
//! present.

use crate::entry::SchemaEntry;

/// The reserved field name whose spec applies to every undeclared key of an object.
pub const WILDCARD: &str = "*";

/// Prefix of the historic string form of array types, as in `array.string`.
pub const ARRAY_PREFIX: &str = "array.";

/// A reference to a type: either a name looked up in the dictionary, or an anonymous entry
/// carried inline.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeRef {
    Named(String),
    Inline(Box<SchemaEntry>),
}

impl TypeRef {
    /// Label used when this type shows up as a leaf in a rendered shape or in a context path.
    pub fn label(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::Inline(_) => "inline",
        }
    }

    /// The registered name, if this is a named reference.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) => Some(name),
            TypeRef::Inline(_) => None,
        }
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::Named(name.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        TypeRef::Named(name)
    }
}

impl From<&String> for TypeRef {
    fn from(name: &String) -> Self {
        TypeRef::Named(name.clone())
    }
}

impl From<SchemaEntry> for TypeRef {
    fn from(entry: SchemaEntry) -> Self {
        TypeRef::Inline(Box::new(entry))
    }
}

/// What a field (or a top-level call) expects: a single value of some type, or an ordered
/// sequence of some target. Arrays of arrays nest structurally.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    Single(TypeRef),
    ArrayOf(Box<Target>),
}

impl Target {
    /// Build a target from a type name, unwrapping any number of leading `array.` prefixes into
    /// nested [`Target::ArrayOf`].
    pub fn named(name: &str) -> Self {
        match name.strip_prefix(ARRAY_PREFIX) {
            Some(rest) => Target::ArrayOf(Box::new(Target::named(rest))),
            None => Target::Single(TypeRef::Named(name.to_string())),
        }
    }

    /// A single value described by an anonymous entry.
    pub fn inline(entry: SchemaEntry) -> Self {
        Target::Single(TypeRef::Inline(Box::new(entry)))
    }

    /// An ordered sequence of `inner`.
    pub fn array_of(inner: impl Into<Target>) -> Self {
        Target::ArrayOf(Box::new(inner.into()))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Target::ArrayOf(_))
    }

    /// The innermost type reference, under any number of array wrappers.
    pub fn element(&self) -> &TypeRef {
        match self {
            Target::Single(r) => r,
            Target::ArrayOf(inner) => inner.element(),
        }
    }

    /// Name used as the root of a context path.
    pub fn label(&self) -> String {
        match self {
            Target::Single(r) => r.label().to_string(),
            Target::ArrayOf(inner) => format!("{}{}", ARRAY_PREFIX, inner.label()),
        }
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::named(name)
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::named(&name)
    }
}

impl From<&String> for Target {
    fn from(name: &String) -> Self {
        Target::named(name)
    }
}

impl From<SchemaEntry> for Target {
    fn from(entry: SchemaEntry) -> Self {
        Target::inline(entry)
    }
}

impl From<TypeRef> for Target {
    fn from(r: TypeRef) -> Self {
        Target::Single(r)
    }
}

impl From<&Target> for Target {
    fn from(t: &Target) -> Self {
        t.clone()
    }
}

/// One member of a composite type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    /// The type the member holds.
    pub target: Target,
    /// Whether the member must be present.
    pub required: bool,
}

impl FieldSpec {
    /// An optional field of the given type.
    pub fn new(target: impl Into<Target>) -> Self {
        Self {
            target: target.into(),
            required: false,
        }
    }

    /// A required field of the given type.
    pub fn req(target: impl Into<Target>) -> Self {
        Self::new(target).required(true)
    }

    /// An optional field holding an array of the given type.
    pub fn array_of(target: impl Into<Target>) -> Self {
        Self::new(Target::array_of(target))
    }

    /// Set whether the field is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Field specifications keyed by field name, kept in declaration order.
///
/// Inserting a name that's already present replaces its spec without moving it, which is what
/// inheritance merging relies on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fields {
    inner: Vec<(String, FieldSpec)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field. Returns the previous spec if one was replaced.
    pub fn insert(&mut self, name: impl Into<String>, spec: FieldSpec) -> Option<FieldSpec> {
        let name = name.into();
        match self.inner.iter_mut().find(|(n, _)| *n == name) {
            Some((_, old)) => Some(std::mem::replace(old, spec)),
            None => {
                self.inner.push((name, spec));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.inner.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The wildcard spec, if one is declared.
    pub fn wildcard(&self) -> Option<&FieldSpec> {
        self.get(WILDCARD)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over every field, wildcard included, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.inner.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Iterate over the explicitly named fields, skipping the wildcard.
    pub fn declared(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.iter().filter(|(n, _)| *n != WILDCARD)
    }

    /// Apply every field of `other` on top of this one.
    pub fn merge(&mut self, other: &Fields) {
        for (name, spec) in other.iter() {
            self.insert(name, spec.clone());
        }
    }
}

impl<N: Into<String>> FromIterator<(N, FieldSpec)> for Fields {
    fn from_iter<T: IntoIterator<Item = (N, FieldSpec)>>(iter: T) -> Self {
        let mut fields = Fields::new();
        for (name, spec) in iter {
            fields.insert(name, spec);
        }
        fields
    }
}
