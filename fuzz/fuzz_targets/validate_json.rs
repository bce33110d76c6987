#![no_main]
use libfuzzer_sys::fuzz_target;
use typedict::{SchemaDict, SchemaEntry, Value, WILDCARD};

fuzz_target!(|data: &[u8]| {
    let value: Value = match serde_json::from_slice(data) {
        Ok(v) => v,
        Err(_) => return,
    };
    let mut dict = SchemaDict::with_builtins();
    let _ = dict.put(
        "node",
        SchemaEntry::new()
            .opt("id", "uint")
            .opt("mail", "email")
            .opt("next", "node")
            .opt("children", "array.node")
            .opt(WILDCARD, "unknown"),
    );
    for name in dict.list() {
        let _ = dict.validate(&value, name.as_str());
        let _ = dict.validate(&value, format!("array.{}", name));
    }
});
