use thiserror::Error;
use uuid::Uuid;

use crate::contract::error::{join_violations, EntityKind, FieldViolation};

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {}", join_violations(.violations))]
    Validation { violations: Vec<FieldViolation> },

    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: Uuid },

    #[error("User {user_id} is already registered for event {event_id}")]
    AlreadyRegistered { event_id: Uuid, user_id: Uuid },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation { violations }
    }

    pub fn event_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: EntityKind::Event,
            id,
        }
    }

    pub fn user_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: EntityKind::User,
            id,
        }
    }

    pub fn already_registered(event_id: Uuid, user_id: Uuid) -> Self {
        Self::AlreadyRegistered { event_id, user_id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
