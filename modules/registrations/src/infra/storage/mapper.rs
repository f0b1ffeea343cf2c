use crate::contract::model::{
    EventSummary, Registration, RegistrationDetails, UserRole, UserSummary,
};
use crate::infra::storage::entity::{event, registration, user};

/// Convert a database entity to a contract model
pub fn registration_to_contract(m: registration::Model) -> Registration {
    Registration {
        id: m.id,
        event_id: m.event_id,
        user_id: m.user_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub fn event_to_summary(m: event::Model) -> EventSummary {
    EventSummary {
        id: m.id,
        name: m.name,
        date: m.date,
        location: m.location,
        organizer_id: m.organizer_id,
    }
}

pub fn user_to_summary(m: user::Model) -> UserSummary {
    UserSummary {
        id: m.id,
        username: m.username,
        email: m.email,
        role: role_to_contract(m.role),
    }
}

pub fn role_to_contract(role: user::Role) -> UserRole {
    match role {
        user::Role::Attendee => UserRole::Attendee,
        user::Role::Organizer => UserRole::Organizer,
        user::Role::Admin => UserRole::Admin,
    }
}

pub fn details(
    r: registration::Model,
    e: event::Model,
    u: user::Model,
) -> RegistrationDetails {
    RegistrationDetails {
        registration: registration_to_contract(r),
        event: event_to_summary(e),
        user: user_to_summary(u),
    }
}
