//! Move identifiers and the `START` sentinel.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Identifier of the sentinel predecessor that marks "may begin a sequence".
pub const START: &str = "START";

/// An immutable, cheaply clonable move identifier.
///
/// Ordering is lexicographic by the identifier's bytes; every deterministic
/// enumeration in the planner relies on it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MoveId(Arc<str>);

impl MoveId {
    /// Create an identifier from any string-like value.
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// The `START` sentinel.
    #[must_use]
    pub fn start() -> Self {
        Self::new(START)
    }

    /// Whether this is the `START` sentinel.
    #[must_use]
    pub fn is_start(&self) -> bool {
        &*self.0 == START
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MoveId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for MoveId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl AsRef<str> for MoveId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MoveId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for MoveId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for MoveId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}
