//! Validation of a single value against a leaf field.

use std::cmp::Ordering;
use std::fmt;

use serde_json::{Number, Value};

use crate::{FieldKind, KeyPath, LeafSpec, Membership, ParamError, ParamResult, PopulationEntry, Populations};

/// Decimal places kept when normalising floats.
const FLOAT_PRECISION: usize = 6;

/// Check `value` against `spec`, returning the possibly coerced value.
///
/// Rules are applied in order: `min`, `max`, then the kind's own type and
/// membership rule. `keys` lists the names a `keys` field may reference; it
/// is only non-empty when checking fields of a `definition` record.
/// Structural kinds have no value rule and pass through after the bounds.
///
/// # Errors
///
/// Returns [`ParamError::Validation`] tagged with `path` on the first failed
/// rule, or [`ParamError::UnknownPopulation`] when a class is missing.
///
/// # Examples
///
/// ```rust
/// use paramdef::{FieldSpec, KeyPath, Populations, check_value};
/// use serde_json::json;
///
/// let schema = FieldSpec::from_value(&json!({
///     "p": {"type": "float", "min": 0, "max": 3, "default": 0.0}
/// }))?;
/// let Some(FieldSpec::Leaf(spec)) = schema.as_group().and_then(|f| f.get("p")) else {
///     unreachable!()
/// };
/// let path = KeyPath::from("item.test");
/// let pops = Populations::empty();
/// assert_eq!(check_value(json!(1), spec, &path, &[], &pops)?, json!(1.0));
/// assert!(check_value(json!(4.5), spec, &path, &[], &pops).is_err());
/// # Ok::<_, paramdef::ParamError>(())
/// ```
pub fn check_value(
    value: Value,
    spec: &LeafSpec,
    path: &KeyPath,
    keys: &[String],
    pops: &Populations,
) -> ParamResult<Value> {
    if let Some(min) = &spec.min
        && compare(&value, min, path)? == Ordering::Less
    {
        return Err(ParamError::validation(
            path,
            format!("{value} must be greater than {min}"),
        ));
    }
    if let Some(max) = &spec.max
        && compare(&value, max, path)? == Ordering::Greater
    {
        return Err(ParamError::validation(
            path,
            format!("{value} must be less than {max}"),
        ));
    }

    match &spec.kind {
        FieldKind::Int => {
            if value.is_i64() || value.is_u64() {
                Ok(value)
            } else {
                Err(ParamError::validation(path, format!("{value} must be an integer")))
            }
        }
        FieldKind::Float => normalise_float(&value, path),
        FieldKind::Boolean => {
            if value.is_boolean() {
                Ok(value)
            } else {
                Err(ParamError::validation(path, format!("{value} must be a bool")))
            }
        }
        FieldKind::Enum(membership) => {
            let allowed = Allowed::resolve(membership, pops, path)?;
            if allowed.contains(&value) {
                Ok(value)
            } else {
                Err(ParamError::validation(path, format!("{value} not in {allowed}")))
            }
        }
        FieldKind::Array(membership) => {
            let allowed = Allowed::resolve(membership, pops, path)?;
            let Some(items) = value.as_array() else {
                return Err(ParamError::validation(path, format!("{value} must be an array")));
            };
            if items.iter().all(|item| allowed.contains(item)) {
                Ok(value)
            } else {
                Err(ParamError::validation(path, format!("{value} not in {allowed}")))
            }
        }
        FieldKind::Keys => {
            let Some(items) = value.as_array() else {
                return Err(ParamError::validation(
                    path,
                    format!("{value} must be an array of keys"),
                ));
            };
            let known = |item: &Value| item.as_str().is_some_and(|name| keys.iter().any(|key| key == name));
            if items.iter().all(known) {
                Ok(value)
            } else {
                Err(ParamError::validation(
                    path,
                    format!("{value} not in [{}]", keys.join(", ")),
                ))
            }
        }
        FieldKind::Bin(_) | FieldKind::Definition(_) | FieldKind::SubDict(_) => Ok(value),
    }
}

fn compare(value: &Value, bound: &Number, path: &KeyPath) -> ParamResult<Ordering> {
    let Value::Number(number) = value else {
        return Err(ParamError::validation(
            path,
            format!("{value} must be a number to compare with {bound}"),
        ));
    };
    if let (Some(lhs), Some(rhs)) = (number.as_i64(), bound.as_i64()) {
        return Ok(lhs.cmp(&rhs));
    }
    number
        .as_f64()
        .zip(bound.as_f64())
        .and_then(|(lhs, rhs)| lhs.partial_cmp(&rhs))
        .ok_or_else(|| ParamError::validation(path, format!("{value} cannot be compared with {bound}")))
}

fn normalise_float(value: &Value, path: &KeyPath) -> ParamResult<Value> {
    let Some(raw) = value.as_f64() else {
        return Err(ParamError::validation(path, format!("{value} must be a float")));
    };
    format!("{raw:.FLOAT_PRECISION$}")
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| ParamError::validation(path, format!("{value} must be a finite float")))
}

/// Allowed set for an `enum` or `array` field.
enum Allowed<'a> {
    Values(&'a [Value]),
    Population(&'a PopulationEntry),
}

impl<'a> Allowed<'a> {
    fn resolve(membership: &'a Membership, pops: &'a Populations, path: &KeyPath) -> ParamResult<Self> {
        match membership {
            Membership::Values(values) => Ok(Self::Values(values)),
            Membership::Class(class) => pops.lookup(class, path).map(Self::Population),
        }
    }

    fn contains(&self, value: &Value) -> bool {
        match self {
            Self::Values(values) => values.iter().any(|allowed| same_member(allowed, value)),
            Self::Population(entry) => entry.contains(value),
        }
    }
}

/// Numbers match by magnitude, so `1.0` is a member of `[1, 2]`.
fn same_member(allowed: &Value, value: &Value) -> bool {
    match (allowed, value) {
        (Value::Number(lhs), Value::Number(rhs)) => lhs
            .as_f64()
            .zip(rhs.as_f64())
            .and_then(|(lhs, rhs)| lhs.partial_cmp(&rhs))
            .is_some_and(Ordering::is_eq),
        _ => allowed == value,
    }
}

impl fmt::Display for Allowed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Values(values) => {
                let rendered: Vec<String> = values.iter().map(Value::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Self::Population(entry) => entry.fmt(f),
        }
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "checker tests panic on malformed fixtures")]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use super::check_value;
    use crate::{FieldSpec, KeyPath, LeafSpec, ParamError, ParamResult, Populations};

    fn spec(definition: Value) -> LeafSpec {
        let schema = FieldSpec::from_value(&json!({ "item": definition })).expect("schema parses");
        match schema.as_group().and_then(|fields| fields.get("item")) {
            Some(FieldSpec::Leaf(leaf)) => leaf.clone(),
            other => panic!("expected a leaf, got {other:?}"),
        }
    }

    fn check(value: Value, definition: Value) -> ParamResult<Value> {
        check_value(
            value,
            &spec(definition),
            &KeyPath::from("item.test"),
            &[],
            &Populations::empty(),
        )
    }

    #[fixture]
    fn nested_pops() -> Populations {
        Populations::from_classes(&json!({"bond_types": {"Inj": {"a": 1}, "Other": {"b": 2}}}))
            .expect("nested classes")
    }

    #[fixture]
    fn flat_pops() -> Populations {
        Populations::from_classes(&json!({"bond_types": ["Inj", "Other"]})).expect("flat classes")
    }

    #[rstest]
    #[case::in_range(json!(1.5), json!(1.5))]
    #[case::int_coerced(json!(1), json!(1.0))]
    #[case::rounded(json!(0.1 + 0.2), json!(0.3))]
    fn float_bounds_accept(#[case] input: Value, #[case] expected: Value) {
        let checked = check(input, json!({"type": "float", "min": 0, "max": 3})).expect("valid float");
        assert_eq!(checked, expected);
        assert!(checked.is_f64());
    }

    #[rstest]
    #[case::below_min(json!(-1.5))]
    #[case::above_max(json!(4.5))]
    #[case::not_a_number(json!("1.5"))]
    fn float_bounds_reject(#[case] input: Value) {
        let err = check(input, json!({"type": "float", "min": 0, "max": 3})).expect_err("rejected");
        assert!(err.to_string().ends_with("[item.test]"), "missing path: {err}");
    }

    #[test]
    fn float_without_bounds_rejects_strings() {
        assert!(check(json!("x"), json!({"type": "float"})).is_err());
    }

    #[test]
    fn int_rejects_fractions() {
        let definition = json!({"type": "int", "min": 0, "max": 3});
        assert_eq!(check(json!(1), definition.clone()).expect("int"), json!(1));
        assert!(check(json!(1.5), definition).is_err());
    }

    #[test]
    fn boolean_rejects_integers() {
        assert_eq!(check(json!(true), json!({"type": "boolean"})).expect("bool"), json!(true));
        assert!(check(json!(1), json!({"type": "boolean"})).is_err());
    }

    #[test]
    fn enum_values() {
        let definition = json!({"type": "enum", "values": ["a", "b"]});
        assert_eq!(check(json!("a"), definition.clone()).expect("member"), json!("a"));
        let err = check(json!("c"), definition).expect_err("not a member");
        assert_eq!(err.to_string(), r#""c" not in ["a", "b"] [item.test]"#);
    }

    #[rstest]
    #[case(json!(["a", "b"]), true)]
    #[case(json!([]), true)]
    #[case(json!(["b"]), true)]
    #[case(json!(["c"]), false)]
    #[case(json!(["a", "c"]), false)]
    #[case(json!("a"), false)]
    fn array_values(#[case] input: Value, #[case] valid: bool) {
        let result = check(input.clone(), json!({"type": "array", "values": ["a", "b"]}));
        assert_eq!(result.is_ok(), valid, "{input} gave {result:?}");
    }

    #[rstest]
    #[case::integer(json!(1), true)]
    #[case::float_of_member(json!(1.0), true)]
    #[case::fraction(json!(1.5), false)]
    #[case::string_of_member(json!("1"), false)]
    fn numeric_enum_members_match_by_value(#[case] input: Value, #[case] valid: bool) {
        let result = check(input.clone(), json!({"type": "enum", "values": [1, 2]}));
        assert_eq!(result.is_ok(), valid, "{input} gave {result:?}");
    }

    #[rstest]
    #[case(json!([1.0, 2]), true)]
    #[case(json!([2.0, 3.0]), false)]
    fn numeric_array_members_match_by_value(#[case] input: Value, #[case] valid: bool) {
        let result = check(input.clone(), json!({"type": "array", "values": [1, 2]}));
        assert_eq!(result.is_ok(), valid, "{input} gave {result:?}");
    }

    #[rstest]
    #[case(json!(["a", "b"]), true)]
    #[case(json!([]), true)]
    #[case(json!(["b"]), true)]
    #[case(json!(["c"]), false)]
    #[case(json!(["a", "c"]), false)]
    fn keys_check_against_supplied_names(#[case] input: Value, #[case] valid: bool) {
        let keys = ["a".to_owned(), "b".to_owned()];
        let result = check_value(
            input,
            &spec(json!({"type": "keys"})),
            &KeyPath::from("item.test"),
            &keys,
            &Populations::empty(),
        );
        assert_eq!(result.is_ok(), valid);
    }

    #[rstest]
    fn class_enum_accepts_members_of_either_form(nested_pops: Populations, flat_pops: Populations) {
        let leaf = spec(json!({"type": "enum", "class": "bond_types", "default": "Inj"}));
        let path = KeyPath::from("item.test");
        for pops in [&nested_pops, &flat_pops] {
            assert_eq!(check_value(json!("Inj"), &leaf, &path, &[], pops).expect("member"), json!("Inj"));
            assert!(check_value(json!("Junk"), &leaf, &path, &[], pops).is_err());
        }
    }

    #[rstest]
    fn class_array_accepts_members_of_either_form(nested_pops: Populations, flat_pops: Populations) {
        let leaf = spec(json!({"type": "array", "class": "bond_types", "default": []}));
        let path = KeyPath::from("item.test");
        for pops in [&nested_pops, &flat_pops] {
            assert_eq!(
                check_value(json!(["Inj"]), &leaf, &path, &[], pops).expect("members"),
                json!(["Inj"])
            );
            assert!(check_value(json!(["Junk"]), &leaf, &path, &[], pops).is_err());
        }
    }

    #[test]
    fn missing_class_is_reported() {
        let err = check(json!("Inj"), json!({"type": "enum", "class": "bond_types", "default": "Inj"}))
            .expect_err("no populations");
        assert!(matches!(err, ParamError::UnknownPopulation { ref class, .. } if class == "bond_types"));
    }
}
