//! Newtype id for positional category indices.
//!
//! Category ids are never stored alongside a name: they are derived from the
//! 1-based position of the name in whatever category list is in effect.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based, dense category index.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl CategoryId {
    /// Creates a new CategoryId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the id for the zero-based position `index` in a category list.
    #[inline]
    pub fn from_position(index: usize) -> Self {
        Self(index as u64 + 1)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for CategoryId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
