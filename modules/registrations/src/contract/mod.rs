pub mod client;
pub mod error;
pub mod model;

pub use client::RegistrationsApi;
pub use error::{EntityKind, FieldViolation, RegistrationsError};
pub use model::{
    EventSummary, NewRegistration, Registration, RegistrationDetails, UserRole, UserSummary,
};
