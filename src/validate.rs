//! Structural validation of values against dictionary types.

use std::collections::BTreeMap;

use crate::diagnostic::Diagnostic;
use crate::dict::SchemaDict;
use crate::error::{Error, Result};
use crate::field::{FieldSpec, Fields, Target};
use crate::value::Value;

impl SchemaDict {
    /// Validate a value against a type.
    ///
    /// Failures carry a context path rooted at the type's name, such as `district > id` or
    /// `officer > wards > [1]`. Validation stops at the first failure. Undeclared object keys are
    /// checked against the type's wildcard field if it has one, and otherwise only produce a
    /// [`Diagnostic::ExtraFields`].
    pub fn validate(&self, value: &Value, target: impl Into<Target>) -> Result<()> {
        let target = target.into();
        let context = target.label();
        self.check(Some(value), &target, &context, 0)
    }

    /// Validate a value against a type, using `context` as the root of every reported path.
    pub fn validate_in(&self, value: &Value, target: impl Into<Target>, context: &str) -> Result<()> {
        self.check(Some(value), &target.into(), context, 0)
    }

    fn check(&self, value: Option<&Value>, target: &Target, context: &str, depth: usize) -> Result<()> {
        let value = match value {
            Some(v) if !v.is_absent() => v,
            _ => return Err(Error::missing("Value must be provided", context)),
        };
        if depth > self.config().max_depth {
            return Err(Error::DepthLimit {
                context: context.to_string(),
            });
        }

        match target {
            Target::ArrayOf(inner) => {
                let items = value
                    .as_array()
                    .ok_or_else(|| Error::invalid("Value must be of type 'array'", context))?;
                for (i, item) in items.iter().enumerate() {
                    let context = format!("{} > [{}]", context, i);
                    self.check(Some(item), inner, &context, depth + 1)?;
                }
                Ok(())
            }
            Target::Single(ty) => {
                let entry = self.resolve(ty, context)?;
                if let Some(ref fields) = entry.fields {
                    self.check_fields(value, fields, context, depth)?;
                }
                if let Some(ref hook) = entry.validator {
                    hook.call(value, context)?;
                }
                Ok(())
            }
        }
    }

    fn check_fields(&self, value: &Value, fields: &Fields, context: &str, depth: usize) -> Result<()> {
        let map = value.as_map();
        for (name, spec) in fields.declared() {
            let member = map.and_then(|m| m.get(name));
            self.check_field(member, name, spec, context, depth)?;
        }

        let map = match map {
            Some(map) => map,
            None => return Ok(()),
        };
        let extra = undeclared(map, fields);
        if extra.is_empty() {
            return Ok(());
        }
        match fields.wildcard() {
            Some(spec) => {
                for (name, member) in extra {
                    self.check_field(Some(member), name, spec, context, depth)?;
                }
            }
            None => self.emit(Diagnostic::ExtraFields {
                context: context.to_string(),
                fields: extra.into_iter().map(|(name, _)| name.to_string()).collect(),
            }),
        }
        Ok(())
    }

    fn check_field(
        &self,
        member: Option<&Value>,
        name: &str,
        spec: &FieldSpec,
        context: &str,
        depth: usize,
    ) -> Result<()> {
        let context = format!("{} > {}", context, name);
        match member {
            Some(v) if !v.is_absent() => self.check(Some(v), &spec.target, &context, depth + 1),
            _ if spec.required => Err(Error::missing(
                format!("Field '{}' is required", name),
                context,
            )),
            _ => Ok(()),
        }
    }
}

fn undeclared<'a>(map: &'a BTreeMap<String, Value>, fields: &Fields) -> Vec<(&'a str, &'a Value)> {
    map.iter()
        .filter(|(k, _)| !fields.contains(k))
        .map(|(k, v)| (k.as_str(), v))
        .collect()
}
