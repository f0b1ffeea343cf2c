use async_trait::async_trait;

use crate::contract::{
    error::RegistrationsError,
    model::{NewRegistration, Registration, RegistrationDetails},
};

/// Public API of the registrations module for in-process consumers.
#[async_trait]
pub trait RegistrationsApi: Send + Sync {
    /// Register a user for an event. At most one registration per (event, user).
    async fn register(&self, req: NewRegistration) -> Result<Registration, RegistrationsError>;

    /// All registrations with their event and user, oldest first.
    async fn list_registrations(&self) -> Result<Vec<RegistrationDetails>, RegistrationsError>;
}
