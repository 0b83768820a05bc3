//! Configuration handed to the Falcon API client.
//!
//! Only the collaborator contract lives here: which resolved values the client
//! receives and how they are checked. No request is sent from this crate.
use std::fmt;

use crate::{
    config::{redacted, Config},
    lib::errors::ApiError,
};

pub mod cloud;

pub use cloud::Cloud;

/// User agent sent with every API request.
pub fn user_agent() -> String {
    format!("falcon-cli/{}", env!("CARGO_PKG_VERSION"))
}

/// Inputs of the Falcon API client.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub client_id: String,
    pub client_secret: String,
    pub member_cid: Option<String>,
    pub cloud: Cloud,
    pub user_agent: String,
}

impl ApiConfig {
    /// Build the client configuration from the effective configuration.
    ///
    /// An empty cloud means [`Cloud::Autodiscover`]; an unknown one is an error.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        if !config.has_credentials() {
            return Err(ApiError::MissingCredentials);
        }
        let cloud = if config.cloud.trim().is_empty() {
            Cloud::Autodiscover
        } else {
            config.cloud.parse()?
        };
        let member_cid = Some(config.member_cid.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            member_cid,
            cloud,
            user_agent: user_agent(),
        })
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(&self.client_secret))
            .field("member_cid", &self.member_cid)
            .field("cloud", &self.cloud)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
