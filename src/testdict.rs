//! A small dictionary of districts and officers shared by the test modules.

use crate::{Error, SchemaDict, SchemaEntry, WILDCARD};

pub(crate) fn company_name() -> SchemaEntry {
    SchemaEntry::new()
        .description("Company Name")
        .examples(["apple", "microsoft", "google", "amazon"])
        .extends("string")
}

pub(crate) fn ward() -> SchemaEntry {
    SchemaEntry::new()
        .description("Ward")
        .examples(["one", "two"])
        .req("name", "string")
}

pub(crate) fn officer() -> SchemaEntry {
    SchemaEntry::new()
        .description("District Officer")
        .req("id", "uint")
        .opt("name", "string")
        .req("wards", "array.companyName")
}

pub(crate) fn district() -> SchemaEntry {
    SchemaEntry::new()
        .description("Discrict")
        .note("A district can be assigned with one more officer if required.")
        .req("id", "uint")
        .opt("index", "number")
        .req("name", "string")
        .opt("description", "string")
        .opt("officerAssigned", "officer")
        .validator(|v, ctx| {
            let description = match v.get("description") {
                Some(d) if !d.is_absent() => d,
                _ => return Ok(()),
            };
            match description.as_str() {
                None => Err(Error::invalid("Value must be of type 'string'", ctx)),
                Some(s) if s.chars().count() <= 5 => {
                    Err(Error::invalid("Length must be greater than 5", ctx))
                }
                Some(_) => Ok(()),
            }
        })
}

pub(crate) fn dbentity() -> SchemaEntry {
    SchemaEntry::new()
        .description("Database Entity")
        .req("createdAt", "string")
        .opt("createdBy", "uint")
        .opt("createdByName", "string")
        .req("id", "uint")
        .req("modifiedAt", "string")
        .opt("modifiedBy", "uint")
        .opt("modifiedByName", "string")
        .req("versionId", "uint")
}

pub(crate) fn gallery_file() -> SchemaEntry {
    SchemaEntry::new()
        .description("Standard gallery file")
        .extends("dbentity")
        .req("file", "string")
        .opt("isPublic", "boolean")
        .opt("metaData", "object")
        .opt("mimeType", "string")
        .opt("permittedUserGroups", "array.uint")
        .opt("permittedUsers", "array.uint")
        .req("title", "string")
        .req(WILDCARD, "boolean")
}

/// Built-in types plus every entry above.
pub(crate) fn sample() -> SchemaDict {
    let mut dict = SchemaDict::with_builtins();
    let entries = vec![
        ("companyName", company_name()),
        ("ward", ward()),
        ("officer", officer()),
        ("district", district()),
        ("dbentity", dbentity()),
        ("galleryFile", gallery_file()),
    ];
    for (name, entry) in entries {
        dict.put(name, entry).unwrap();
    }
    dict
}
