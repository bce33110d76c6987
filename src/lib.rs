//! typedict keeps a dictionary of named types and checks dynamic data against them.
//!
//! Types are described by [`SchemaEntry`] values and registered in a [`SchemaDict`] under a
//! name. An entry either declares fields, making it a composite type, or declares none, making
//! it a leaf type whose values are checked only by its custom validator. Entries can inherit
//! from an already-registered type with `extends`, and fields can hold arrays of any type.
//!
//! With a dictionary in hand, you can:
//!
//! - Validate a [`Value`] against a type, getting a breadcrumb path to the first failure
//! - Render a readable outline of a type's shape
//! - Generate example values, deterministically or at random
//! - Assemble markdown reference documentation for a set of types
//!
//! ```
//! # use typedict::{SchemaDict, SchemaEntry, Error, value};
//! # fn main() -> typedict::Result<()> {
//! let mut dict = SchemaDict::with_builtins();
//! dict.put("companyName", SchemaEntry::new()
//!     .description("Company Name")
//!     .examples(["apple", "microsoft", "google", "amazon"])
//!     .extends("string"))?;
//! dict.put("officer", SchemaEntry::new()
//!     .description("District Officer")
//!     .req("id", "uint")
//!     .opt("name", "string")
//!     .req("wards", "array.companyName"))?;
//!
//! // Validate some data
//! let officer = value!({ "id": 2, "name": "kaski", "wards": ["hari", "shyam"] });
//! dict.validate(&officer, "officer")?;
//!
//! let err = dict.validate(&value!({ "id": 2, "wards": [3] }), "officer").unwrap_err();
//! assert_eq!(err.context(), "officer > wards > [0]");
//!
//! // Generate an example
//! let example = dict.generate_example("officer")?;
//! assert_eq!(example, value!({ "id": 1, "name": "ram", "wards": ["apple"] }));
//! # Ok(())
//! # }
//! ```
//!
//! Validation, lookup, and example generation fail with an [`Error`]. Problems that don't stop
//! an operation, like a type being overridden or an object carrying undeclared fields, are
//! reported as [`Diagnostic`]s to the dictionary's [`DiagnosticSink`], which logs them through
//! the `log` crate by default.

#[macro_use]
mod macros;

pub mod catalog;
mod diagnostic;
mod dict;
mod docgen;
mod entry;
mod error;
mod example;
mod field;
mod render;
mod validate;
mod value;

#[cfg(test)]
mod testdict;

pub use diagnostic::{Diagnostic, DiagnosticSink, LogSink, MemorySink};
pub use dict::{DictConfig, SchemaDict};
pub use docgen::{generate_doc, DocEntry};
pub use entry::{Doc, Hook, ResolvedEntry, SchemaEntry, ValidatorFn};
pub use error::{Error, Result};
pub use example::{ExampleOptions, FirstPicker, Inclusion, MissingExample, Picker, RandPicker};
pub use field::{FieldSpec, Fields, Target, TypeRef, ARRAY_PREFIX, WILDCARD};
pub use value::Value;

/// The maximum nesting depth allowed while validating, rendering, generating examples, or
/// following `extends` chains, unless the [`DictConfig`] sets its own limit.
pub const MAX_DEPTH: usize = 100;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
