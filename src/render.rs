//! Human-readable outlines of composite types.
//!
//! A shape lists every field of a type with the type it expects, expanding nested composite and
//! array types in place:
//!
//! ```text
//! {
//!     id: 'uint',    // required
//!     name: 'string',
//!     wards:
//!     [
//!         'companyName',
//!     ],    // required
//! }
//! ```

use crate::dict::SchemaDict;
use crate::error::{Error, Result};
use crate::field::{Target, TypeRef};

const TAB: &str = "    ";

fn indent(level: usize) -> String {
    TAB.repeat(level)
}

impl SchemaDict {
    /// Render the shape of a type. Leaf types have no shape and give `None`.
    pub fn render_shape(&self, target: impl Into<Target>) -> Result<Option<String>> {
        self.render_shape_at(target, 0)
    }

    /// Render the shape of a type with every line indented by `level` tabs.
    pub fn render_shape_at(&self, target: impl Into<Target>, level: usize) -> Result<Option<String>> {
        let target = target.into();
        let context = target.label();
        let mut ancestors = Vec::new();
        self.shape(&target, level, &context, &mut ancestors)
    }

    /// `ancestors` holds the named types currently being expanded, outermost first.
    fn shape(
        &self,
        target: &Target,
        level: usize,
        context: &str,
        ancestors: &mut Vec<String>,
    ) -> Result<Option<String>> {
        if ancestors.len() > self.config().max_depth {
            return Err(Error::DepthLimit {
                context: context.to_string(),
            });
        }
        match target {
            Target::ArrayOf(inner) => {
                let element = match self.shape(inner, level + 1, context, ancestors)? {
                    Some(shape) => shape,
                    None => format!("{}'{}',", indent(level + 1), inner.label()),
                };
                Ok(Some(format!(
                    "{tab}[\n{element}\n{tab}]",
                    tab = indent(level),
                    element = element
                )))
            }
            Target::Single(ty) => {
                if let TypeRef::Named(name) = ty {
                    if ancestors.iter().any(|a| a == name) {
                        return Ok(None);
                    }
                }
                let entry = self.resolve(ty, context)?;
                let fields = match entry.fields {
                    Some(fields) => fields,
                    None => return Ok(None),
                };

                let pushed = match ty.name() {
                    Some(name) => {
                        ancestors.push(name.to_string());
                        true
                    }
                    None => false,
                };
                let mut out = format!("{}{{", indent(level));
                for (name, spec) in fields.iter() {
                    let context = format!("{} > {}", context, name);
                    let rendered = match self.shape(&spec.target, level + 1, &context, ancestors)? {
                        Some(shape) => format!("\n{}", shape),
                        None => format!(" '{}'", spec.target.label()),
                    };
                    out.push_str(&format!(
                        "\n{}{}:{},{}",
                        indent(level + 1),
                        name,
                        rendered,
                        if spec.required { "    // required" } else { "" }
                    ));
                }
                out.push_str(&format!("\n{}}}", indent(level)));
                if pushed {
                    ancestors.pop();
                }
                Ok(Some(out))
            }
        }
    }
}
