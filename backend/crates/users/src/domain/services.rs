//! Update Authorizer
//!
//! Decides whether a partial update may proceed, by comparing the requested
//! field names with the entity's declared schema. Pure: no I/O, no state,
//! safe to call from any number of tasks at once.

use thiserror::Error;

use crate::domain::schema::EntitySchema;

/// Message surfaced to clients on rejection
pub const INVALID_FIELD_MESSAGE: &str = "Invalid field!";

/// A requested field is not declared for the entity
///
/// Carries no field name so the decision does not depend on which
/// offending field happened to be seen first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid field!")]
pub struct DisallowedFieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDecision {
    Allowed,
    Rejected(DisallowedFieldError),
}

impl UpdateDecision {
    #[cfg(test)]
    pub(crate) fn is_allowed(&self) -> bool {
        matches!(self, UpdateDecision::Allowed)
    }

    pub fn into_result(self) -> Result<(), DisallowedFieldError> {
        match self {
            UpdateDecision::Allowed => Ok(()),
            UpdateDecision::Rejected(err) => Err(err),
        }
    }
}

/// `Allowed` iff every requested field is declared by `schema`.
///
/// An empty request is allowed; an empty schema allows only the empty
/// request. Matching is exact and case-sensitive.
pub fn authorize<'a, I>(requested: I, schema: &EntitySchema) -> UpdateDecision
where
    I: IntoIterator<Item = &'a str>,
{
    if requested.into_iter().all(|field| schema.declares(field)) {
        UpdateDecision::Allowed
    } else {
        UpdateDecision::Rejected(DisallowedFieldError)
    }
}
