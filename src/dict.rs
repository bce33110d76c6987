use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use educe::Educe;
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::diagnostic::{Diagnostic, DiagnosticSink, LogSink};
use crate::entry::{ResolvedEntry, SchemaEntry};
use crate::error::{Error, Result};
use crate::field::TypeRef;
use crate::MAX_DEPTH;

/// Settings for a [`SchemaDict`].
///
/// # Defaults
///
/// - warnings: true
/// - max_depth: [`MAX_DEPTH`]
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields, default)]
pub struct DictConfig {
    /// Whether non-fatal diagnostics (overrides, extra fields) are emitted.
    #[educe(Default = true)]
    pub warnings: bool,
    /// How deep validation, rendering, example generation, and `extends` chains may recurse.
    #[educe(Default = MAX_DEPTH)]
    pub max_depth: usize,
}

impl DictConfig {
    /// Make a new configuration with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether diagnostics are emitted.
    pub fn warnings(mut self, warnings: bool) -> Self {
        self.warnings = warnings;
        self
    }

    /// Set the recursion limit.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// A dictionary of named types.
///
/// Types are registered with [`put`][SchemaDict::put] and looked up with
/// [`get`][SchemaDict::get], which flattens any `extends` chain into a [`ResolvedEntry`]. The
/// dictionary also runs validation, shape rendering, and example generation against its types.
///
/// ```
/// # use typedict::{SchemaDict, SchemaEntry, value};
/// # fn main() -> typedict::Result<()> {
/// let mut dict = SchemaDict::with_builtins();
/// dict.put("officer", SchemaEntry::new()
///     .req("id", "uint")
///     .opt("name", "string")
///     .opt("wards", "array.string"))?;
///
/// dict.validate(&value!({ "id": 2, "name": "kaski", "wards": ["one"] }), "officer")?;
/// assert!(dict.validate(&value!({ "name": "kaski" }), "officer").is_err());
/// # Ok(())
/// # }
/// ```
pub struct SchemaDict {
    types: BTreeMap<String, SchemaEntry>,
    config: DictConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for SchemaDict {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemaDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaDict")
            .field("types", &self.types)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SchemaDict {
    /// Make an empty dictionary with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DictConfig::default())
    }

    /// Make an empty dictionary.
    pub fn with_config(config: DictConfig) -> Self {
        Self {
            types: BTreeMap::new(),
            config,
            sink: Arc::new(LogSink),
        }
    }

    /// Make a dictionary preloaded with the built-in primitive types. See [`catalog`].
    pub fn with_builtins() -> Self {
        let mut dict = Self::new();
        dict.register_builtins();
        dict
    }

    /// Register every built-in primitive type, overriding any type of the same name.
    pub fn register_builtins(&mut self) {
        for (name, entry) in catalog::entries() {
            self.insert(name.to_string(), entry);
        }
    }

    /// Replace the diagnostic sink. The default sends diagnostics to the `log` facade.
    pub fn set_sink(&mut self, sink: Arc<dyn DiagnosticSink>) {
        self.sink = sink;
    }

    /// Builder form of [`set_sink`][SchemaDict::set_sink].
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &DictConfig {
        &self.config
    }

    pub(crate) fn emit(&self, diagnostic: Diagnostic) {
        if self.config.warnings {
            self.sink.emit(&diagnostic);
        }
    }

    /// Check if a type is registered under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Register `entry` under `name`, replacing any existing entry.
    ///
    /// The entry's `extends` parent must already be registered. Replacing an existing entry is
    /// allowed but emits a [`Diagnostic::Override`].
    pub fn put(&mut self, name: impl Into<String>, entry: SchemaEntry) -> Result<()> {
        let name = name.into();
        if let Some(ref parent) = entry.extends {
            if !self.has(parent) {
                return Err(Error::UnknownParent {
                    name,
                    parent: parent.clone(),
                });
            }
            // Chains already in the dictionary are acyclic, so this walk ends unless the new
            // entry closes a loop through `name`.
            let mut current = Some(parent.as_str());
            while let Some(ancestor) = current {
                if ancestor == name {
                    return Err(Error::InheritanceCycle {
                        name,
                        parent: parent.clone(),
                    });
                }
                current = self.types.get(ancestor).and_then(|e| e.extends.as_deref());
            }
        }
        self.insert(name, entry);
        Ok(())
    }

    fn insert(&mut self, name: String, entry: SchemaEntry) {
        if self.has(&name) {
            self.emit(Diagnostic::Override { name: name.clone() });
        }
        log::debug!("registering type '{}'", name);
        self.types.insert(name, entry);
    }

    /// Look up a type and flatten its inheritance chain.
    ///
    /// Inline entries are resolved as-is, following their own `extends` if they have one.
    pub fn get(&self, ty: impl Into<TypeRef>) -> Result<ResolvedEntry> {
        let ty = ty.into();
        let context = ty.label().to_string();
        self.resolve(&ty, &context)
    }

    /// The entry exactly as registered, without inheritance applied.
    pub fn entry(&self, name: &str) -> Option<&SchemaEntry> {
        self.types.get(name)
    }

    /// Names of every registered type, in sorted order.
    pub fn list(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve a type reference, reporting unknown names against `context`.
    pub(crate) fn resolve(&self, ty: &TypeRef, context: &str) -> Result<ResolvedEntry> {
        match ty {
            TypeRef::Named(name) => {
                let entry = self.types.get(name).ok_or_else(|| Error::UnknownType {
                    name: name.clone(),
                    context: context.to_string(),
                })?;
                self.resolve_entry(entry, context, 0)
            }
            TypeRef::Inline(entry) => self.resolve_entry(entry, context, 0),
        }
    }

    fn resolve_entry(
        &self,
        entry: &SchemaEntry,
        context: &str,
        depth: usize,
    ) -> Result<ResolvedEntry> {
        let parent_name = match entry.extends {
            None => return Ok(ResolvedEntry::own(entry)),
            Some(ref parent) => parent,
        };
        if depth >= self.config.max_depth {
            return Err(Error::DepthLimit {
                context: context.to_string(),
            });
        }
        log::trace!("resolving parent '{}' of {}", parent_name, context);
        let parent = self.types.get(parent_name).ok_or_else(|| Error::UnknownType {
            name: parent_name.clone(),
            context: context.to_string(),
        })?;
        let parent = self.resolve_entry(parent, context, depth + 1)?;
        Ok(parent.extended_by(entry))
    }
}
