//! Detection of override keys the resolver never consumed.

use std::fmt;

use serde_json::Value;

use crate::KeyPath;

/// Why an override entry was reported as unused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnusedKind {
    /// The key does not exist in the resolved tree.
    NotInSchema,
    /// A mapping was supplied where the schema holds a single value.
    ExpectedValue,
    /// A single value was supplied where the schema holds a mapping.
    ExpectedMapping,
}

impl UnusedKind {
    /// Short machine-friendly label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotInSchema => "not-in-schema",
            Self::ExpectedValue => "expected-value",
            Self::ExpectedMapping => "expected-mapping",
        }
    }
}

/// One override entry that did not contribute to the resolved tree.
#[derive(Clone, Debug, PartialEq)]
pub struct UnusedParam {
    /// Location of the entry in the merged override tree.
    pub path: KeyPath,
    /// Classification of the mismatch.
    pub kind: UnusedKind,
    /// The unused override subtree.
    pub value: Value,
}

impl fmt::Display for UnusedParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            UnusedKind::NotInSchema => write!(f, "[{}] is unused", self.path),
            UnusedKind::ExpectedValue => write!(f, "[{}] has unused params: {}", self.path, self.value),
            UnusedKind::ExpectedMapping => write!(
                f,
                "[{}] has sub-keys, got unused params: {}",
                self.path, self.value
            ),
        }
    }
}

/// Compare the merged overrides with the resolved tree and list every
/// override entry that was not used.
///
/// Each unused key counts once, however large its subtree.
///
/// # Examples
///
/// ```rust
/// use paramdef::{UnusedKind, find_unused};
/// use serde_json::json;
///
/// let resolved = json!({"cat": {"num": 2}});
/// let raw = json!({"cat": {"num": 2, "colour": "green"}, "dog": {}});
/// let unused = find_unused(&resolved, &raw);
/// let paths: Vec<&str> = unused.iter().map(|entry| entry.path.as_str()).collect();
/// assert_eq!(paths, [".cat.colour", ".dog"]);
/// assert!(unused.iter().all(|entry| entry.kind == UnusedKind::NotInSchema));
/// ```
#[must_use]
pub fn find_unused(resolved: &Value, raw: &Value) -> Vec<UnusedParam> {
    let mut unused = Vec::new();
    collect(resolved, raw, &KeyPath::root(), &mut unused);
    unused
}

fn collect(resolved: &Value, raw: &Value, path: &KeyPath, unused: &mut Vec<UnusedParam>) {
    let kind = match (resolved, raw) {
        (Value::Object(resolved_map), Value::Object(raw_map)) => {
            for (key, raw_child) in raw_map {
                let Some(resolved_child) = resolved_map.get(key) else {
                    unused.push(UnusedParam {
                        path: path.child(key),
                        kind: UnusedKind::NotInSchema,
                        value: raw_child.clone(),
                    });
                    continue;
                };
                collect(resolved_child, raw_child, &path.child(key), unused);
            }
            return;
        }
        (_, Value::Object(_)) => UnusedKind::ExpectedValue,
        (Value::Object(_), _) => UnusedKind::ExpectedMapping,
        _ => return,
    };
    unused.push(UnusedParam {
        path: path.clone(),
        kind,
        value: raw.clone(),
    });
}
