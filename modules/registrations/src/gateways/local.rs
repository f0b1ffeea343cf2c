use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::RegistrationsApi,
    error::RegistrationsError,
    model::{NewRegistration, Registration, RegistrationDetails},
};
use crate::domain::service::Service;

/// Local implementation of the RegistrationsApi trait that delegates to the domain service
pub struct RegistrationsLocalClient {
    service: Arc<Service>,
}

impl RegistrationsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RegistrationsApi for RegistrationsLocalClient {
    async fn register(&self, req: NewRegistration) -> Result<Registration, RegistrationsError> {
        self.service.register(req).await.map_err(Into::into)
    }

    async fn list_registrations(&self) -> Result<Vec<RegistrationDetails>, RegistrationsError> {
        self.service.list_registrations().await.map_err(Into::into)
    }
}
