//! Dotted key paths attached to every diagnostic.

use std::fmt;

/// Fully-qualified location of a field, rendered as `.outer.inner.leaf`.
///
/// The root path renders as the empty string so that every descent step adds
/// exactly one `.segment`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(String);

impl KeyPath {
    /// The empty path at the top of a document.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Returns a new path with `segment` appended.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use paramdef::KeyPath;
    ///
    /// let path = KeyPath::root().child("demographics").child("cat");
    /// assert_eq!(path.as_str(), ".demographics.cat");
    /// ```
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut joined = String::with_capacity(self.0.len() + segment.len() + 1);
        joined.push_str(&self.0);
        joined.push('.');
        joined.push_str(segment);
        Self(joined)
    }

    /// Borrow the rendered path.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyPath {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}
