//! Named status conditions applied by actions.

use std::fmt;

/// A status condition identified by name (e.g. `"poison"`, `"stun"`).
///
/// The meaning of a condition belongs to the stats collaborator; actions only
/// know the names listed in their definition.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    name: String,
}

impl Condition {
    /// Makes a condition from its configured name.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
