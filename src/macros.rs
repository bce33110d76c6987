/// Construct a [`Value`][crate::Value] from a JSON-like literal.
///
/// ```
/// # use typedict::value;
/// let district = value!({
///     "id": 12,
///     "name": "kaski",
///     "description": "Best district",
///     "officerAssigned": null,
///     "wards": ["one", "two"],
/// });
/// assert_eq!(district["wards"][1].as_str(), Some("two"));
/// ```
///
/// Variables or expressions can be interpolated into the literal. Anything interpolated must
/// implement `serde::Serialize`, which includes [`Value`][crate::Value] itself.
///
/// ```
/// # use typedict::{value, Value};
/// let id = 4u32;
/// let tags: Vec<Value> = vec!["first", "test"].into_iter().map(Value::from).collect();
/// let value = value!({
///     "id": id,
///     "public": id > 2,
///     "tags": tags,
/// });
/// assert_eq!(value["public"], Value::Bool(true));
/// ```
#[macro_export]
macro_rules! value {
    ($($json:tt)+) => {
        $crate::Value::from($crate::__private::serde_json::json!($($json)+))
    };
}
