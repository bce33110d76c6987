//! Generating example values for dictionary types.
//!
//! Leaf types supply examples from their documented example pool; composite and array types are
//! assembled from their members. Generation is deterministic unless randomization is requested,
//! in which case every random choice goes through a [`Picker`].

use std::collections::BTreeMap;

use educe::Educe;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dict::SchemaDict;
use crate::error::{Error, Result};
use crate::field::{FieldSpec, Target, TypeRef};
use crate::value::Value;

/// Source of the random choices made while generating examples.
pub trait Picker {
    /// Pick one of `len` items. Must return less than `len` when `len` is non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
    /// Pick a count in `[0, bound)`.
    fn pick_count(&mut self, bound: usize) -> usize;
    /// Return true with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

/// A [`Picker`] backed by any `rand` random number generator.
#[derive(Clone, Debug)]
pub struct RandPicker<R> {
    rng: R,
}

impl<R: Rng> RandPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> Picker for RandPicker<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.rng.gen_range(0..len)
        }
    }

    fn pick_count(&mut self, bound: usize) -> usize {
        self.pick_index(bound)
    }

    fn chance(&mut self, probability: f64) -> bool {
        if probability >= 1.0 {
            true
        } else if probability > 0.0 {
            self.rng.gen_bool(probability)
        } else {
            false
        }
    }
}

/// A [`Picker`] that always picks the first item, zero items, and never takes a chance.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstPicker;

impl Picker for FirstPicker {
    fn pick_index(&mut self, _: usize) -> usize {
        0
    }

    fn pick_count(&mut self, _: usize) -> usize {
        0
    }

    fn chance(&mut self, _: f64) -> bool {
        false
    }
}

/// Whether optional fields show up in generated examples.
#[derive(Educe, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(rename_all = "snake_case")]
pub enum Inclusion {
    Always,
    Never,
    /// Include each optional field with this probability. Only applies when randomizing;
    /// deterministic generation includes every optional field.
    #[educe(Default)]
    Chance(#[educe(Default = 0.9)] f64),
}

/// What to do when a leaf type has no example values.
#[derive(Educe, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingExample {
    /// Fail with [`Error::MissingExample`].
    #[educe(Default)]
    Error,
    /// Generate nothing. Optional and wildcard fields holding nothing are left out.
    Absent,
}

/// Settings for example generation.
///
/// # Defaults
///
/// - count: 1
/// - randomize: false
/// - optional: `Inclusion::Chance(0.9)`
/// - missing_example: `MissingExample::Error`
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields, default)]
pub struct ExampleOptions {
    /// Number of elements generated for arrays. When randomizing, arrays get fewer than this.
    #[educe(Default = 1)]
    pub count: usize,
    /// Draw leaf examples, array lengths, and optional fields at random.
    pub randomize: bool,
    pub optional: Inclusion,
    pub missing_example: MissingExample,
}

impl ExampleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    pub fn optional(mut self, optional: Inclusion) -> Self {
        self.optional = optional;
        self
    }

    pub fn missing_example(mut self, missing_example: MissingExample) -> Self {
        self.missing_example = missing_example;
        self
    }
}

impl SchemaDict {
    /// Generate a deterministic example of a type: the first example of every leaf, one element
    /// per array, and every optional field.
    ///
    /// ```
    /// # use typedict::{SchemaDict, SchemaEntry, value};
    /// # fn main() -> typedict::Result<()> {
    /// let mut dict = SchemaDict::with_builtins();
    /// dict.put("officer", SchemaEntry::new().req("id", "uint").opt("wards", "array.string"))?;
    /// assert_eq!(dict.generate_example("officer")?, value!({ "id": 1, "wards": ["ram"] }));
    /// # Ok(())
    /// # }
    /// ```
    pub fn generate_example(&self, target: impl Into<Target>) -> Result<Value> {
        self.generate_example_with(target, &ExampleOptions::default(), &mut FirstPicker)
    }

    /// Generate an example of a type with the given options, drawing random choices from
    /// `picker`.
    pub fn generate_example_with<P: Picker + ?Sized>(
        &self,
        target: impl Into<Target>,
        options: &ExampleOptions,
        picker: &mut P,
    ) -> Result<Value> {
        let target = target.into();
        let context = target.label();
        let mut generator = Generator {
            dict: self,
            options,
            picker,
            ancestors: Vec::new(),
        };
        generator.value(&target, &context, 0)
    }
}

struct Generator<'a, P: ?Sized> {
    dict: &'a SchemaDict,
    options: &'a ExampleOptions,
    picker: &'a mut P,
    /// Named composite types currently being generated, outermost first.
    ancestors: Vec<String>,
}

impl<'a, P: Picker + ?Sized> Generator<'a, P> {
    fn value(&mut self, target: &Target, context: &str, depth: usize) -> Result<Value> {
        if depth > self.dict.config().max_depth {
            return Err(Error::DepthLimit {
                context: context.to_string(),
            });
        }
        match target {
            Target::ArrayOf(inner) => {
                if self.reenters(inner) {
                    return Ok(Value::Array(Vec::new()));
                }
                let count = if self.options.randomize {
                    self.picker.pick_count(self.options.count)
                } else {
                    self.options.count
                };
                // Same cap serde uses when preallocating from a size hint
                let mut items = Vec::with_capacity(count.min(4096));
                for i in 0..count {
                    let context = format!("{} > [{}]", context, i);
                    items.push(self.value(inner, &context, depth + 1)?);
                }
                Ok(Value::Array(items))
            }
            Target::Single(ty) => self.single(ty, context, depth),
        }
    }

    fn single(&mut self, ty: &TypeRef, context: &str, depth: usize) -> Result<Value> {
        let entry = self.dict.resolve(ty, context)?;
        let fields = match entry.fields {
            Some(fields) => fields,
            None => return self.leaf(ty, &entry.doc.example, context),
        };

        if let Some(name) = ty.name() {
            self.ancestors.push(name.to_string());
        }
        let mut map = BTreeMap::new();
        for (name, spec) in fields.declared() {
            if !spec.required && !self.include(spec) {
                continue;
            }
            let context = format!("{} > {}", context, name);
            let member = self.value(&spec.target, &context, depth + 1)?;
            if !member.is_absent() {
                map.insert(name.to_string(), member);
            }
        }
        if ty.name().is_some() {
            self.ancestors.pop();
        }
        Ok(Value::Map(map))
    }

    fn leaf(&mut self, ty: &TypeRef, pool: &[Value], context: &str) -> Result<Value> {
        if pool.is_empty() {
            return match self.options.missing_example {
                MissingExample::Error => Err(Error::MissingExample {
                    name: ty.label().to_string(),
                    context: context.to_string(),
                }),
                MissingExample::Absent => Ok(Value::Null),
            };
        }
        let index = if self.options.randomize {
            self.picker.pick_index(pool.len())
        } else {
            0
        };
        Ok(pool.get(index).unwrap_or(&pool[0]).clone())
    }

    fn include(&mut self, spec: &FieldSpec) -> bool {
        if self.reenters(&spec.target) {
            return false;
        }
        match self.options.optional {
            Inclusion::Always => true,
            Inclusion::Never => false,
            Inclusion::Chance(p) if self.options.randomize => self.picker.chance(p),
            Inclusion::Chance(_) => true,
        }
    }

    /// True if generating `target` would start over on a type already being generated.
    fn reenters(&self, target: &Target) -> bool {
        match target.element().name() {
            Some(name) => self.ancestors.iter().any(|a| a == name),
            None => false,
        }
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::entry::SchemaEntry;
    use crate::testdict::sample;
    use crate::value;

    #[test]
    fn leaf_example() {
        let dict = sample();
        assert_eq!(dict.generate_example("companyName").unwrap(), value!("apple"));
        assert_eq!(dict.generate_example("uint").unwrap(), value!(1));
    }

    #[test]
    fn officer() {
        let dict = sample();
        assert_eq!(
            dict.generate_example("officer").unwrap(),
            value!({ "id": 1, "name": "ram", "wards": ["apple"] })
        );
    }

    #[test]
    fn district() {
        let dict = sample();
        assert_eq!(
            dict.generate_example("district").unwrap(),
            value!({
                "id": 1,
                "index": 1,
                "name": "ram",
                "description": "ram",
                "officerAssigned": { "id": 1, "name": "ram", "wards": ["apple"] },
            })
        );
    }

    #[test]
    fn inline_entry() {
        let dict = sample();
        let inline = SchemaEntry::new()
            .description("District Officer")
            .req("id", "uint")
            .opt("name", "string")
            .req("age", Target::array_of("int"));
        assert_eq!(
            dict.generate_example(inline).unwrap(),
            value!({ "id": 1, "name": "ram", "age": [1] })
        );
    }

    #[test]
    fn count_and_inclusion() {
        let dict = sample();
        let options = ExampleOptions::new().count(3).optional(Inclusion::Never);
        assert_eq!(
            dict.generate_example_with("officer", &options, &mut FirstPicker)
                .unwrap(),
            value!({ "id": 1, "wards": ["apple", "apple", "apple"] })
        );
        assert_eq!(
            dict.generate_example_with("array.array.int", &ExampleOptions::new().count(2), &mut FirstPicker)
                .unwrap(),
            value!([[1, 1], [1, 1]])
        );
    }

    #[test]
    fn wildcard_skipped() {
        let dict = sample();
        let example = dict.generate_example("galleryFile").unwrap();
        assert!(example.get("*").is_none());
        assert_eq!(example["title"], value!("ram"));
        assert_eq!(example["versionId"], value!(1));
        dict.validate(&example, "galleryFile").unwrap();
    }

    #[test]
    fn missing_examples() {
        let mut dict = sample();
        dict.put("blank", SchemaEntry::new().description("Nothing to show"))
            .unwrap();
        dict.put("holder", SchemaEntry::new().req("id", "uint").opt("blank", "blank"))
            .unwrap();

        let err = dict.generate_example("holder").unwrap_err();
        assert_eq!(
            err,
            Error::MissingExample {
                name: "blank".into(),
                context: "holder > blank".into(),
            }
        );

        let options = ExampleOptions::new().missing_example(MissingExample::Absent);
        assert_eq!(
            dict.generate_example_with("holder", &options, &mut FirstPicker)
                .unwrap(),
            value!({ "id": 1 })
        );
        assert_eq!(
            dict.generate_example_with("blank", &options, &mut FirstPicker)
                .unwrap(),
            Value::Null
        );
    }

    #[test]
    fn self_reference_terminates() {
        let mut dict = sample();
        dict.put(
            "node",
            SchemaEntry::new()
                .req("v", "int")
                .opt("next", "node")
                .req("children", "array.node"),
        )
        .unwrap();
        let example = dict.generate_example("node").unwrap();
        assert_eq!(example, value!({ "v": 1, "children": [] }));
        dict.validate(&example, "node").unwrap();
    }

    #[test]
    fn required_self_reference_hits_depth_limit() {
        let mut dict = sample();
        dict.put("loop", SchemaEntry::new().req("next", "loop")).unwrap();
        let err = dict.generate_example("loop").unwrap_err();
        assert!(matches!(err, Error::DepthLimit { .. }));
    }

    #[test]
    fn randomized_examples_validate() {
        let dict = sample();
        let options = ExampleOptions::new().count(4).randomize(true);
        let mut picker = RandPicker::new(StdRng::seed_from_u64(0x5eed));
        for _ in 0..50 {
            let example = dict
                .generate_example_with("officer", &options, &mut picker)
                .unwrap();
            assert!(example["wards"].as_array().unwrap().len() < 4);
            dict.validate(&example, "officer").unwrap();
        }
    }

    /// Always picks the largest count it is allowed to.
    struct MaxPicker {
        bounds: Vec<usize>,
    }

    impl Picker for MaxPicker {
        fn pick_index(&mut self, _: usize) -> usize {
            0
        }

        fn pick_count(&mut self, bound: usize) -> usize {
            self.bounds.push(bound);
            bound.saturating_sub(1)
        }

        fn chance(&mut self, _: f64) -> bool {
            true
        }
    }

    #[test]
    fn randomized_count_stays_below_bound() {
        let dict = sample();
        let mut picker = MaxPicker { bounds: Vec::new() };
        let options = ExampleOptions::new().count(1).randomize(true);
        let example = dict
            .generate_example_with("array.uint", &options, &mut picker)
            .unwrap();
        assert_eq!(picker.bounds, vec![1]);
        assert_eq!(example, value!([]));

        let options = ExampleOptions::new().count(3).randomize(true);
        let example = dict
            .generate_example_with("array.uint", &options, &mut picker)
            .unwrap();
        assert_eq!(example.as_array().unwrap().len(), 2);
    }

    #[test]
    fn huge_count_does_not_overflow() {
        let dict = sample();
        let options: ExampleOptions = serde_json::from_str(&format!(
            r#"{{"count": {}, "randomize": true}}"#,
            usize::MAX
        ))
        .unwrap();
        assert_eq!(options.count, usize::MAX);
        let example = dict
            .generate_example_with("array.uint", &options, &mut FirstPicker)
            .unwrap();
        assert_eq!(example, value!([]));
    }

    #[test]
    fn inclusion_defaults_to_chance() {
        assert_eq!(Inclusion::default(), Inclusion::Chance(0.9));
        assert_eq!(ExampleOptions::default().optional, Inclusion::Chance(0.9));
    }

    #[test]
    fn first_picker_is_deterministic() {
        let dict = sample();
        let options = ExampleOptions::new().randomize(true);
        let a = dict
            .generate_example_with("officer", &options, &mut FirstPicker)
            .unwrap();
        let b = dict
            .generate_example_with("officer", &options, &mut FirstPicker)
            .unwrap();
        assert_eq!(a, b);
        // Randomized optional fields never pass a chance, arrays get zero elements
        assert_eq!(a, value!({ "id": 1, "wards": [] }));
    }

    #[test]
    fn options_from_json() {
        let options: ExampleOptions =
            serde_json::from_str(r#"{"randomize": true, "optional": {"chance": 0.5}}"#).unwrap();
        assert_eq!(
            options,
            ExampleOptions::new()
                .randomize(true)
                .optional(Inclusion::Chance(0.5))
        );
        assert_eq!(options.count, 1);
        let options: ExampleOptions =
            serde_json::from_str(r#"{"missing_example": "absent", "optional": "never"}"#).unwrap();
        assert_eq!(options.missing_example, MissingExample::Absent);
        assert_eq!(options.optional, Inclusion::Never);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const ROUND_TRIP_TYPES: &[&str] = &[
            "boolean",
            "number",
            "string",
            "email",
            "int",
            "uint",
            "array",
            "object",
            "unknown",
            "companyName",
            "ward",
            "officer",
            "dbentity",
            "galleryFile",
            "array.officer",
            "array.array.ward",
        ];

        proptest! {
            /// Every generated example validates against the type it was generated for.
            #[test]
            fn generated_examples_validate(
                seed in any::<u64>(),
                count in 0usize..5,
                name in prop::sample::select(ROUND_TRIP_TYPES),
            ) {
                let dict = sample();
                let options = ExampleOptions::new().count(count).randomize(true);
                let mut picker = RandPicker::new(StdRng::seed_from_u64(seed));
                let example = dict.generate_example_with(name, &options, &mut picker).unwrap();
                let result = dict.validate(&example, name);
                prop_assert!(result.is_ok(), "{} failed: {:?}", name, result.err());
            }

            /// Deterministic generation doesn't depend on the picker.
            #[test]
            fn deterministic_ignores_picker(
                seed in any::<u64>(),
                name in prop::sample::select(ROUND_TRIP_TYPES),
            ) {
                let dict = sample();
                let mut picker = RandPicker::new(StdRng::seed_from_u64(seed));
                let a = dict.generate_example_with(name, &ExampleOptions::new(), &mut picker).unwrap();
                let b = dict.generate_example(name).unwrap();
                prop_assert_eq!(a, b);
            }
        }
    }
}
