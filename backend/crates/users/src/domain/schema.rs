//! Declared Entity Schemas
//!
//! The set of field names a client may change, per entity type. Declared
//! statically and built once at startup; nothing here is derived from the
//! database at runtime.

use derive_more::Display;

/// Persisted entity types that accept partial updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EntityType {
    #[display("user")]
    User,
}

/// Fields of `User` that PATCH may touch.
///
/// `avatar` and `tokens` are stored with the user but change only through
/// the avatar and login/logout endpoints.
pub const USER_MUTABLE_FIELDS: &[&str] = &["name", "email", "password", "age"];

/// Ordered, duplicate-free set of declared field names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    entity: EntityType,
    fields: Vec<&'static str>,
}

impl EntitySchema {
    /// Build a schema; later duplicates are dropped, first-seen order kept.
    pub fn new(entity: EntityType, fields: &[&'static str]) -> Self {
        let mut unique: Vec<&'static str> = Vec::with_capacity(fields.len());
        for field in fields {
            if !unique.contains(field) {
                unique.push(field);
            }
        }

        Self {
            entity,
            fields: unique,
        }
    }

    pub fn entity(&self) -> EntityType {
        self.entity
    }

    /// Declared fields in declaration order
    #[cfg(test)]
    pub(crate) fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// Exact, case-sensitive membership
    pub fn declares(&self, field: &str) -> bool {
        self.fields.iter().any(|declared| *declared == field)
    }
}

/// Source of declared field sets, queried once per update request
pub trait SchemaProvider {
    fn declared_fields(&self, entity: EntityType) -> &EntitySchema;
}

/// Immutable registry of every entity schema, built at startup
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    user: EntitySchema,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self {
            user: EntitySchema::new(EntityType::User, USER_MUTABLE_FIELDS),
        }
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaProvider for SchemaRegistry {
    fn declared_fields(&self, entity: EntityType) -> &EntitySchema {
        match entity {
            EntityType::User => &self.user,
        }
    }
}
