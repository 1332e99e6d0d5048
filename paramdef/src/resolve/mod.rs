//! Recursive resolution of override trees against the schema.
//!
//! [`Resolver`] walks the schema, looks up the matching override slot at each
//! node, and either checks a plain leaf, hands a structural leaf to its
//! expander (`bin`, `definition`, `sub-dict`), or descends into a group. The
//! key path grows by one segment per step so every failure names the exact
//! field.

mod bin;
mod definition;
mod sub_dict;

use serde_json::{Map, Value};

use crate::{FieldKind, FieldSpec, Fields, KeyPath, LeafSpec, ParamError, ParamResult, Populations, check_value};

/// Name of the schema subtree that defines the population index.
pub const CLASSES_KEY: &str = "classes";

/// Resolves override trees with a fixed population index.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'p> {
    pops: &'p Populations,
}

impl<'p> Resolver<'p> {
    /// Create a resolver that validates class references against `pops`.
    #[must_use]
    pub const fn new(pops: &'p Populations) -> Self {
        Self { pops }
    }

    /// Resolve `overrides` against `spec`, starting at `path`.
    ///
    /// A non-mapping `overrides` is returned unchanged; this is the escape a
    /// group slot takes when the caller supplied a scalar in its place.
    ///
    /// # Errors
    ///
    /// Fails fast with the first validation or structural error found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use paramdef::{FieldSpec, KeyPath, Populations, Resolver};
    /// use serde_json::json;
    ///
    /// let schema = FieldSpec::from_value(&json!({
    ///     "size": {"type": "int", "min": 0, "default": 3},
    ///     "ratio": {"type": "float", "default": 0.5},
    /// }))?;
    /// let pops = Populations::empty();
    /// let resolved = Resolver::new(&pops).resolve(&schema, &json!({"size": 5}), &KeyPath::root())?;
    /// assert_eq!(resolved, json!({"size": 5, "ratio": 0.5}));
    /// # Ok::<_, paramdef::ParamError>(())
    /// ```
    pub fn resolve(&self, spec: &FieldSpec, overrides: &Value, path: &KeyPath) -> ParamResult<Value> {
        if !overrides.is_object() {
            return Ok(overrides.clone());
        }
        self.resolve_slot(spec, Some(overrides), path)
    }

    /// Resolve one schema node against its override slot, which may be
    /// absent.
    fn resolve_slot(&self, spec: &FieldSpec, slot: Option<&Value>, path: &KeyPath) -> ParamResult<Value> {
        match spec {
            FieldSpec::Group(fields) => match slot {
                None => self.resolve_group(fields, &Map::new(), path),
                Some(Value::Object(overrides)) => self.resolve_group(fields, overrides, path),
                Some(scalar) => Ok(scalar.clone()),
            },
            FieldSpec::Leaf(leaf) => match &leaf.kind {
                FieldKind::Bin(record) => self.resolve_bin(record, slot, path),
                FieldKind::Definition(record) => self.resolve_definition(record, slot, path),
                FieldKind::SubDict(sub) => self.resolve_sub_dict(sub, slot, path),
                FieldKind::Int
                | FieldKind::Float
                | FieldKind::Boolean
                | FieldKind::Enum(_)
                | FieldKind::Array(_)
                | FieldKind::Keys => self.resolve_item(leaf, slot, path),
            },
        }
    }

    fn resolve_group(
        &self,
        fields: &Fields<FieldSpec>,
        overrides: &Map<String, Value>,
        path: &KeyPath,
    ) -> ParamResult<Value> {
        let mut resolved = Map::new();
        for (name, child) in fields.iter() {
            let value = self.resolve_slot(child, overrides.get(name), &path.child(name))?;
            resolved.insert(name.to_owned(), value);
        }
        Ok(Value::Object(resolved))
    }

    /// Check a supplied value, or fall back to the declared default.
    ///
    /// Defaults are taken as declared; only supplied values are checked.
    fn resolve_item(&self, leaf: &LeafSpec, slot: Option<&Value>, path: &KeyPath) -> ParamResult<Value> {
        slot.map_or_else(
            || {
                leaf.default
                    .clone()
                    .ok_or_else(|| ParamError::shape(path, "no value supplied and no default declared"))
            },
            |value| check_value(value.clone(), leaf, path, &[], self.pops),
        )
    }
}

/// Resolve only the schema's `classes` subtree and build the population
/// index from it.
///
/// Classes resolve against an empty index, so one class cannot enumerate
/// over another. A schema without `classes` yields an empty index.
///
/// # Errors
///
/// Returns the first resolution error inside `classes`, or
/// [`ParamError::Shape`] when a class does not resolve to a list or mapping.
pub fn resolve_classes(schema: &FieldSpec, overrides: &Value) -> ParamResult<Populations> {
    let Some(classes) = schema.as_group().and_then(|fields| fields.get(CLASSES_KEY)) else {
        return Ok(Populations::empty());
    };
    let empty = Populations::empty();
    let slot = overrides.as_object().and_then(|map| map.get(CLASSES_KEY));
    let resolved = Resolver::new(&empty).resolve_slot(classes, slot, &KeyPath::root().child(CLASSES_KEY))?;
    Populations::from_classes(&resolved)
}
