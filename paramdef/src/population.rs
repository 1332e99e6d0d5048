//! Population index derived from the resolved `classes` subtree.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::{KeyPath, ParamError, ParamResult};

/// Members of one class.
#[derive(Clone, Debug, PartialEq)]
pub enum PopulationEntry {
    /// A plain list of member names.
    Flat(Vec<String>),
    /// A mapping from member name to that member's record.
    Nested(Map<String, Value>),
}

impl PopulationEntry {
    fn from_resolved(value: &Value, path: &KeyPath) -> ParamResult<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_owned).ok_or_else(|| {
                        ParamError::shape(path, format!("class members must be names, got {item}"))
                    })
                })
                .collect::<ParamResult<Vec<_>>>()
                .map(Self::Flat),
            Value::Object(records) => Ok(Self::Nested(records.clone())),
            other => Err(ParamError::shape(
                path,
                format!("classes must resolve to a list of names or a mapping, got {other}"),
            )),
        }
    }

    /// Member names in declaration order.
    #[must_use]
    pub fn members(&self) -> Vec<&str> {
        match self {
            Self::Flat(names) => names.iter().map(String::as_str).collect(),
            Self::Nested(records) => records.keys().map(String::as_str).collect(),
        }
    }

    /// Whether `value` names a member of this class.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        let Some(name) = value.as_str() else {
            return false;
        };
        match self {
            Self::Flat(names) => names.iter().any(|member| member == name),
            Self::Nested(records) => records.contains_key(name),
        }
    }
}

impl fmt::Display for PopulationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.members().join(", "))
    }
}

/// Class name → members, built once per resolution run and read-only after.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Populations {
    entries: HashMap<String, PopulationEntry>,
}

impl Populations {
    /// An index with no classes, used while the classes themselves resolve.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the index from a resolved `classes` subtree.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Shape`] when the subtree is not a mapping or a
    /// class resolves to something other than a list of names or a mapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use paramdef::{PopulationEntry, Populations};
    /// use serde_json::json;
    ///
    /// let pops = Populations::from_classes(&json!({
    ///     "habitats": ["barn", "ocean"],
    ///     "animals": {"cat": {"legs": 4}},
    /// }))?;
    /// assert_eq!(pops.get("habitats").map(PopulationEntry::members), Some(vec!["barn", "ocean"]));
    /// assert!(pops.get("animals").is_some_and(|animals| animals.contains(&json!("cat"))));
    /// # Ok::<_, paramdef::ParamError>(())
    /// ```
    pub fn from_classes(classes: &Value) -> ParamResult<Self> {
        let root = KeyPath::root().child("classes");
        let map = classes
            .as_object()
            .ok_or_else(|| ParamError::shape(&root, "classes must be a mapping"))?;
        let entries = map
            .iter()
            .map(|(name, value)| {
                PopulationEntry::from_resolved(value, &root.child(name))
                    .map(|entry| (name.clone(), entry))
            })
            .collect::<ParamResult<HashMap<_, _>>>()?;
        Ok(Self { entries })
    }

    /// Look up a class by name.
    #[must_use]
    pub fn get(&self, class: &str) -> Option<&PopulationEntry> {
        self.entries.get(class)
    }

    /// Look up a class, failing with the referring field's path.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::UnknownPopulation`] when `class` is absent.
    pub fn lookup(&self, class: &str, path: &KeyPath) -> ParamResult<&PopulationEntry> {
        self.get(class).ok_or_else(|| ParamError::UnknownPopulation {
            path: path.clone(),
            class: class.to_owned(),
        })
    }

    /// Number of classes in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
