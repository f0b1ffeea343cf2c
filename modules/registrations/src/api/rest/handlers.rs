use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use tracing::{error, info, warn};

use crate::api::rest::dto::{
    CreateRegistrationReq, RegistrationDetailsDto, RegistrationDto, RegistrationListDto,
};
use crate::api::rest::error::{map_domain_error, map_json_rejection};
use crate::domain::service::Service;
use modkit::api::problem::ProblemResponse;
use modkit::Caller;

/// List every registration with its event and user
pub async fn list_registrations(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> Result<Json<RegistrationListDto>, ProblemResponse> {
    info!("Listing registrations");

    match svc.list_registrations().await {
        Ok(items) => {
            let registrations: Vec<RegistrationDetailsDto> =
                items.into_iter().map(RegistrationDetailsDto::from).collect();
            Ok(Json(RegistrationListDto {
                total: registrations.len(),
                registrations,
            }))
        }
        Err(e) => {
            error!("Failed to list registrations: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Register a user for an event
///
/// The caller is present only when the server runs with an `auth` section.
pub async fn create_registration(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    caller: Option<Extension<Caller>>,
    body: Result<Json<CreateRegistrationReq>, JsonRejection>,
) -> Result<(StatusCode, Json<RegistrationDto>), ProblemResponse> {
    let Json(req_body) = body.map_err(|rejection| {
        warn!("Rejected registration body: {}", rejection.body_text());
        map_json_rejection(&rejection, uri.path())
    })?;
    match &caller {
        Some(Extension(c)) => info!(
            caller = %c.user_id,
            caller_role = %c.role,
            "Creating registration: {:?}", req_body
        ),
        None => info!("Creating registration: {:?}", req_body),
    }

    match svc.register(req_body.into()).await {
        Ok(registration) => Ok((StatusCode::CREATED, Json(RegistrationDto::from(registration)))),
        Err(e) => {
            warn!("Failed to create registration: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
