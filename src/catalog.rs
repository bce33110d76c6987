//! The built-in primitive types.
//!
//! | name    | accepts                               |
//! |---------|---------------------------------------|
//! | boolean | booleans                              |
//! | number  | integers and floats                   |
//! | string  | strings                               |
//! | email   | strings that look like email addresses |
//! | int     | integers, and floats with no fraction |
//! | uint    | non-negative `int`s                   |
//! | array   | any array                             |
//! | object  | any map                               |
//! | unknown | anything present                      |
//!
//! Each comes with a pool of example values for example generation.

use std::sync::OnceLock;

use regex::Regex;

use crate::entry::SchemaEntry;
use crate::error::{Error, Result};
use crate::value::Value;

const EMAIL_PATTERN: &str = concat!(
    r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))"#,
    r#"@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
);

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| match Regex::new(EMAIL_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                log::error!("email pattern failed to compile: {}", e);
                None
            }
        })
        .as_ref()
}

/// Check that a string looks like an email address.
pub fn is_email(s: &str) -> bool {
    email_regex().map_or(false, |re| re.is_match(s))
}

fn basic(name: &'static str, accepts: fn(&Value) -> bool) -> SchemaEntry {
    SchemaEntry::new()
        .description(format!("Basic {}", name))
        .validator(move |v, ctx| {
            if accepts(v) {
                Ok(())
            } else {
                Err(Error::invalid(format!("Value must be of type '{}'", name), ctx))
            }
        })
}

fn check_email(v: &Value, ctx: &str) -> Result<()> {
    match v.as_str() {
        Some(s) if is_email(s) => Ok(()),
        _ => Err(Error::invalid("Value is not a valid email", ctx)),
    }
}

fn check_int(v: &Value, ctx: &str) -> Result<()> {
    match v.as_i64() {
        Some(_) => Ok(()),
        None => Err(Error::invalid("Value is not a valid integer", ctx)),
    }
}

fn check_uint(v: &Value, ctx: &str) -> Result<()> {
    match v.as_i64() {
        Some(n) if n >= 0 => Ok(()),
        _ => Err(Error::invalid("Value is not a valid unsigned integer", ctx)),
    }
}

/// Every built-in type, ready to register.
pub fn entries() -> Vec<(&'static str, SchemaEntry)> {
    vec![
        (
            "boolean",
            basic("boolean", Value::is_bool).examples([true, false]),
        ),
        (
            "number",
            basic("number", Value::is_number)
                .examples([1, 3, 4, 5, 6, 0, -1, -2, -3, -4, -10, -11, 3213])
                .examples([-10.12, 11.2121, 1298.432, 432.342, -23819.12, 23.21]),
        ),
        (
            "string",
            basic("string", Value::is_str).examples([
                "ram",
                "shyam",
                "hari",
                "home",
                "city",
                "long text",
                "ankit",
                "placeholder",
            ]),
        ),
        (
            "array",
            basic("array", Value::is_array).example(Value::Array(Vec::new())),
        ),
        (
            "object",
            basic("object", Value::is_map).example(Value::Map(Default::default())),
        ),
        (
            "unknown",
            SchemaEntry::new()
                .description("Unknown")
                .example("anything")
                .example(1)
                .example(true),
        ),
        (
            "email",
            SchemaEntry::new()
                .description("Email")
                .examples([
                    "johndoe@email.com",
                    "hariprasad@emailer.com",
                    "frozenhelium@toggle.com",
                    "doe.john@email.com",
                    "ramprasad1212@emailer.com",
                    "fruity1994@toggle.com",
                ])
                .validator(check_email),
        ),
        (
            "int",
            SchemaEntry::new()
                .description("Integer")
                .examples([1, 2, 10, -12, 11, 0, -3, 6, 7, -15, 14, -7])
                .validator(check_int),
        ),
        (
            "uint",
            SchemaEntry::new()
                .description("Unsigned Integer")
                .examples([1, 2, 10, 11, 0, 6, 7, 16, 13, 5])
                .validator(check_uint),
        ),
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dict::SchemaDict;
    use crate::value;

    #[test]
    fn emails() {
        assert!(is_email("shyam@gmail.com"));
        assert!(is_email("doe.john@email.com"));
        assert!(is_email("root@[192.168.0.1]"));
        assert!(is_email("\"odd name\"@example.org"));
        assert!(!is_email("shyam"));
        assert!(!is_email("shyam@gmail"));
        assert!(!is_email("sh yam@gmail.com"));
    }

    #[test]
    fn every_builtin_accepts_its_examples() {
        let dict = SchemaDict::with_builtins();
        for (name, entry) in entries() {
            assert!(!entry.doc.example.is_empty(), "{} has no examples", name);
            for example in entry.doc.example.iter() {
                dict.validate(example, name)
                    .unwrap_or_else(|e| panic!("{} rejected {:?}: {}", name, example, e));
            }
        }
    }

    #[test]
    fn builtin_messages() {
        let dict = SchemaDict::with_builtins();
        let err = dict.validate(&value!("yes"), "boolean").unwrap_err();
        assert_eq!(err.description(), "Value must be of type 'boolean'");
        let err = dict.validate(&value!(2.5), "int").unwrap_err();
        assert_eq!(err.description(), "Value is not a valid integer");
        let err = dict.validate(&value!(-3), "uint").unwrap_err();
        assert_eq!(err.description(), "Value is not a valid unsigned integer");
        let err = dict.validate(&value!(3), "email").unwrap_err();
        assert_eq!(err.description(), "Value is not a valid email");
        let err = dict.validate(&value!({}), "array").unwrap_err();
        assert_eq!(err.description(), "Value must be of type 'array'");
    }

    #[test]
    fn integral_floats_are_ints() {
        let dict = SchemaDict::with_builtins();
        dict.validate(&Value::F64(4.0), "int").unwrap();
        dict.validate(&Value::F64(4.0), "uint").unwrap();
        dict.validate(&value!([1, 2.5, "x", null, {}]), "unknown").unwrap();
    }

    #[test]
    fn builtins_are_leaves() {
        let dict = SchemaDict::with_builtins();
        for name in dict.list() {
            assert!(dict.get(name.as_str()).unwrap().is_leaf());
        }
        assert_eq!(dict.len(), 9);
    }
}
