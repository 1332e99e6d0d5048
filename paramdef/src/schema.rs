//! Typed model of the schema document.
//!
//! A schema node is either a group of named children or a leaf carrying a
//! `type` tag. Leaves are parsed into a closed [`FieldKind`] so the resolver
//! and checker match on kinds rather than comparing type strings.

use serde_json::{Map, Number, Value};

use crate::{KeyPath, ParamError, ParamResult};

/// Ordered name → child mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct Fields<T>(Vec<(String, T)>);

impl<T> Fields<T> {
    /// Iterate children in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(name, child)| (name.as_str(), child))
    }

    /// Look up a child by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.0
            .iter()
            .find_map(|(key, child)| (key == name).then_some(child))
    }

    /// Number of children.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping has no children.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn parse_with<F>(map: &Map<String, Value>, path: &KeyPath, parse_child: F) -> ParamResult<Self>
    where
        F: Fn(&Value, &KeyPath) -> ParamResult<T>,
    {
        map.iter()
            .map(|(name, child)| {
                parse_child(child, &path.child(name)).map(|parsed| (name.clone(), parsed))
            })
            .collect::<ParamResult<Vec<_>>>()
            .map(Self)
    }
}

/// A node in the schema tree.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldSpec {
    /// Nested group of further fields.
    Group(Fields<Self>),
    /// Typed leaf or structural field.
    Leaf(LeafSpec),
}

impl FieldSpec {
    /// Parse a schema document.
    ///
    /// A mapping is a leaf when it carries a `default` key or a string `type`
    /// tag; every other mapping is a group whose values must be mappings.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Shape`] when a node is not a mapping, a leaf has
    /// an unknown type, or a structural leaf lacks its modifiers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use paramdef::{FieldKind, FieldSpec};
    /// use serde_json::json;
    ///
    /// let schema = FieldSpec::from_value(&json!({
    ///     "rate": {"type": "float", "min": 0, "default": 0.5}
    /// }))?;
    /// let FieldSpec::Group(fields) = &schema else { unreachable!() };
    /// assert!(matches!(
    ///     fields.get("rate"),
    ///     Some(FieldSpec::Leaf(leaf)) if leaf.kind == FieldKind::Float
    /// ));
    /// # Ok::<_, paramdef::ParamError>(())
    /// ```
    pub fn from_value(value: &Value) -> ParamResult<Self> {
        Self::parse(value, &KeyPath::root())
    }

    fn parse(value: &Value, path: &KeyPath) -> ParamResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| ParamError::shape(path, "field definitions must be mappings"))?;
        if is_leaf(map) {
            LeafSpec::parse_map(map, path).map(Self::Leaf)
        } else {
            Fields::parse_with(map, path, Self::parse).map(Self::Group)
        }
    }

    /// Returns the group's children, or `None` for a leaf.
    #[must_use]
    pub const fn as_group(&self) -> Option<&Fields<Self>> {
        match self {
            Self::Group(fields) => Some(fields),
            Self::Leaf(_) => None,
        }
    }
}

fn is_leaf(map: &Map<String, Value>) -> bool {
    map.contains_key("default") || map.get("type").is_some_and(Value::is_string)
}

/// A typed field with optional numeric bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafSpec {
    /// What kind of value the field holds.
    pub kind: FieldKind,
    /// Inclusive lower bound.
    pub min: Option<Number>,
    /// Inclusive upper bound.
    pub max: Option<Number>,
    /// Declared default for scalar kinds. Structural kinds keep their
    /// default inside [`FieldKind`].
    pub default: Option<Value>,
}

impl LeafSpec {
    fn parse(value: &Value, path: &KeyPath) -> ParamResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| ParamError::shape(path, "record fields must be mappings"))?;
        Self::parse_map(map, path)
    }

    fn parse_map(map: &Map<String, Value>, path: &KeyPath) -> ParamResult<Self> {
        let type_name = map
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ParamError::shape(path, "leaf fields must declare a 'type'"))?;
        let kind = match type_name {
            "int" => FieldKind::Int,
            "float" => FieldKind::Float,
            "boolean" => FieldKind::Boolean,
            "enum" => FieldKind::Enum(Membership::parse(map, path)?),
            "array" => FieldKind::Array(Membership::parse(map, path)?),
            "keys" => FieldKind::Keys,
            "bin" => FieldKind::Bin(RecordSpec::parse(map, path)?),
            "definition" => FieldKind::Definition(RecordSpec::parse(map, path)?),
            "sub-dict" => FieldKind::SubDict(SubDictSpec::parse(map, path)?),
            other => {
                return Err(ParamError::shape(
                    path,
                    format!("unknown field type '{other}'"),
                ));
            }
        };
        let default = if kind.is_structural() {
            None
        } else {
            map.get("default").cloned()
        };
        Ok(Self {
            kind,
            min: bound(map, "min", path)?,
            max: bound(map, "max", path)?,
            default,
        })
    }
}

fn bound(map: &Map<String, Value>, key: &str, path: &KeyPath) -> ParamResult<Option<Number>> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Number(number)) => Ok(Some(number.clone())),
        Some(other) => Err(ParamError::shape(
            path,
            format!("'{key}' must be a number, got {other}"),
        )),
    }
}

/// Kind of a leaf field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    /// Whole number.
    Int,
    /// Floating point number; integers are coerced.
    Float,
    /// `true` or `false`.
    Boolean,
    /// A single member of an allowed set.
    Enum(Membership),
    /// A list whose elements all belong to an allowed set.
    Array(Membership),
    /// A list of names defined alongside the field.
    Keys,
    /// Integer-keyed records, merged over the default set.
    Bin(RecordSpec),
    /// Name-keyed records, replaced wholesale when overridden.
    Definition(RecordSpec),
    /// A template expanded once per population member.
    SubDict(SubDictSpec),
}

impl FieldKind {
    /// Whether the kind is resolved by an expander rather than checked as a
    /// single value.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::Bin(_) | Self::Definition(_) | Self::SubDict(_))
    }
}

/// Source of the allowed set for `enum` and `array` fields.
#[derive(Clone, Debug, PartialEq)]
pub enum Membership {
    /// Explicit `values` list.
    Values(Vec<Value>),
    /// Members of the named class in the population index.
    Class(String),
}

impl Membership {
    fn parse(map: &Map<String, Value>, path: &KeyPath) -> ParamResult<Self> {
        if let Some(values) = map.get("values") {
            return values
                .as_array()
                .map(|list| Self::Values(list.clone()))
                .ok_or_else(|| ParamError::shape(path, "'values' must be a list"));
        }
        match map.get("class") {
            Some(Value::String(class)) => Ok(Self::Class(class.clone())),
            Some(_) => Err(ParamError::shape(path, "'class' must be a string")),
            None => Err(ParamError::shape(
                path,
                "enum and array fields need 'values' or 'class'",
            )),
        }
    }
}

/// Record shape and default set shared by `bin` and `definition` fields.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordSpec {
    /// Declared record fields.
    pub fields: Fields<LeafSpec>,
    /// Default records keyed by bin id or definition name.
    pub default: Map<String, Value>,
}

impl RecordSpec {
    fn parse(map: &Map<String, Value>, path: &KeyPath) -> ParamResult<Self> {
        let fields = map
            .get("fields")
            .and_then(Value::as_object)
            .ok_or_else(|| ParamError::shape(path, "bin and definition fields need a 'fields' mapping"))?;
        let default = map
            .get("default")
            .and_then(Value::as_object)
            .ok_or_else(|| ParamError::shape(path, "bin and definition fields need a mapping 'default'"))?;
        Ok(Self {
            fields: Fields::parse_with(fields, &path.child("fields"), LeafSpec::parse)?,
            default: default.clone(),
        })
    }
}

/// Expansion dimensions and template of a `sub-dict` field.
#[derive(Clone, Debug, PartialEq)]
pub struct SubDictSpec {
    /// Population expanded at the first level.
    pub outer: String,
    /// Optional population expanded beneath each outer member.
    pub inner: Option<String>,
    /// Schema applied once per member combination.
    pub template: Box<FieldSpec>,
}

impl SubDictSpec {
    fn parse(map: &Map<String, Value>, path: &KeyPath) -> ParamResult<Self> {
        let keys = map
            .get("keys")
            .and_then(Value::as_array)
            .ok_or_else(|| ParamError::shape(path, "sub-dict fields need a 'keys' list"))?;
        let names = keys
            .iter()
            .map(|key| {
                key.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| ParamError::shape(path, "sub-dict keys must be class names"))
            })
            .collect::<ParamResult<Vec<_>>>()?;
        let mut dimensions = names.into_iter();
        let (Some(outer), inner, None) = (dimensions.next(), dimensions.next(), dimensions.next()) else {
            return Err(ParamError::shape(
                path,
                "sub-dict fields expand over one or two classes",
            ));
        };
        let template = map
            .get("default")
            .ok_or_else(|| ParamError::shape(path, "sub-dict fields need a 'default' template"))?;
        Ok(Self {
            outer,
            inner,
            template: Box::new(FieldSpec::parse(template, &path.child("default"))?),
        })
    }
}
