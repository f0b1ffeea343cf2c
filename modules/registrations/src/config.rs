use serde::{Deserialize, Serialize};

/// Configuration for the registrations module (`modules.registrations` in the app config)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrationsConfig {
    /// Also serve `POST /api/v1/register/create` and `GET /api/v1/registers`.
    #[serde(default = "default_legacy_routes")]
    pub legacy_routes: bool,
}

impl Default for RegistrationsConfig {
    fn default() -> Self {
        Self {
            legacy_routes: default_legacy_routes(),
        }
    }
}

fn default_legacy_routes() -> bool {
    true
}
