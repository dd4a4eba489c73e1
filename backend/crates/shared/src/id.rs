//! Typed Identifiers
//!
//! UUID-backed IDs tagged with a marker type so a user ID can never be
//! passed where a token ID is expected.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
/// let id = UserId::new();
/// assert_eq!(id.to_string().len(), 36);
/// ```
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<fn() -> T>,
}

/// The string was not a UUID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed identifier: {0}")]
pub struct IdParseError(String);

impl<T> Id<T> {
    /// Random ID (UUID v4)
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

// Manual impls: deriving would put bounds on the marker type.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self::from_uuid)
            .map_err(|_| IdParseError(s.to_string()))
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for entity IDs
pub mod markers {
    /// Marker for user documents
    pub struct User;

    /// Marker for issued auth tokens
    pub struct AuthToken;
}

pub type UserId = Id<markers::User>;
pub type TokenId = Id<markers::AuthToken>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_v4() {
        let id = UserId::new();
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id: TokenId = Id::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(Uuid::from(id), uuid);
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "me".parse::<UserId>().unwrap_err();
        assert_eq!(err.to_string(), "Malformed identifier: me");
    }
}
