use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use modkit::api::problem::{Problem, ProblemResponse, ValidationError};

use crate::contract::error::EntityKind;
use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.eventhub.dev/{}", code))
        .with_code(code)
        .with_instance(instance);

    // Add request ID from current tracing span if available
    let problem = if let Some(id) = tracing::Span::current().id() {
        problem.with_trace_id(id.into_u64().to_string())
    } else {
        problem
    };

    ProblemResponse(problem)
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::Validation { violations } => {
            let errors = violations
                .iter()
                .map(|v| ValidationError::new(format!("/{}", v.field), v.message.clone()))
                .collect();
            let ProblemResponse(problem) = from_parts(
                StatusCode::BAD_REQUEST,
                "REGISTRATIONS_VALIDATION",
                "Validation failed",
                e.to_string(),
                instance,
            );
            ProblemResponse(problem.with_errors(errors))
        }
        DomainError::NotFound {
            entity: EntityKind::Event,
            id,
        } => from_parts(
            StatusCode::NOT_FOUND,
            "REGISTRATIONS_EVENT_NOT_FOUND",
            "Event not found",
            format!("Event with id {} was not found", id),
            instance,
        ),
        DomainError::NotFound {
            entity: EntityKind::User,
            id,
        } => from_parts(
            StatusCode::NOT_FOUND,
            "REGISTRATIONS_USER_NOT_FOUND",
            "User not found",
            format!("User with id {} was not found", id),
            instance,
        ),
        DomainError::AlreadyRegistered { .. } => from_parts(
            StatusCode::CONFLICT,
            "REGISTRATIONS_ALREADY_REGISTERED",
            "Already registered",
            "User is already registered for this event",
            instance,
        ),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}

/// Answer an unreadable JSON body with a problem instead of axum's plain-text rejection.
pub fn map_json_rejection(rejection: &JsonRejection, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "REGISTRATIONS_INVALID_BODY",
        "Invalid request body",
        rejection.body_text(),
        instance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::error::FieldViolation;
    use uuid::Uuid;

    #[test]
    fn validation_problem_carries_pointers() {
        let e = DomainError::validation(vec![
            FieldViolation::new("eventId", "Event ID is required"),
            FieldViolation::new("userId", "Invalid userId format"),
        ]);
        let ProblemResponse(p) = map_domain_error(&e, "/api/v1/registrations");
        assert_eq!(p.status, 400);
        assert_eq!(p.code, "REGISTRATIONS_VALIDATION");
        let errors = p.errors.unwrap();
        assert_eq!(errors[0], ValidationError::new("/eventId", "Event ID is required"));
        assert_eq!(errors[1].pointer, "/userId");
    }

    #[test]
    fn status_mapping() {
        let id = Uuid::new_v4();
        let cases = [
            (DomainError::event_not_found(id), 404, "REGISTRATIONS_EVENT_NOT_FOUND"),
            (DomainError::user_not_found(id), 404, "REGISTRATIONS_USER_NOT_FOUND"),
            (
                DomainError::already_registered(id, id),
                409,
                "REGISTRATIONS_ALREADY_REGISTERED",
            ),
            (DomainError::database("disk I/O error"), 500, "INTERNAL_DB"),
        ];
        for (err, status, code) in cases {
            let ProblemResponse(p) = map_domain_error(&err, "/x");
            assert_eq!(p.status, status);
            assert_eq!(p.code, code);
            assert_eq!(p.instance, "/x");
        }
    }

    #[test]
    fn internal_detail_is_not_leaked() {
        let ProblemResponse(p) =
            map_domain_error(&DomainError::database("secret connection string"), "/x");
        assert!(!p.detail.contains("secret"));
    }
}
