//! Client for the external auth/session service.
//!
//! The service owns sign-in and role issuance. We forward the caller's bearer
//! token and receive the grants of that session: organization, roles,
//! permissions and platform roles. Nothing is cached; every navigation
//! request asks again so revoked roles disappear on the next render.

use crate::{
    navigation::{Permission, PlatformRole, ViewerGrants},
    store::parse_roles,
    APP_USER_AGENT,
};
use anyhow::{Context, Result};
use axum::{
    http::StatusCode as HttpStatus,
    response::{IntoResponse, Response},
};
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::{fmt, time::Duration};
use tracing::{debug, error, instrument};
use url::Url;
use uuid::Uuid;

const GRANTS_PATH: &str = "v1/session/grants";

/// Grants of one authenticated session as returned by the auth service.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SessionGrants {
    pub user_id: Uuid,
    pub organization_id: Uuid,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub platform_roles: Vec<String>,
    #[serde(default)]
    pub is_platform_user: bool,
}

impl SessionGrants {
    /// Typed grants; names unknown to this build are dropped.
    #[must_use]
    pub fn viewer_grants(&self) -> ViewerGrants {
        ViewerGrants {
            actual_roles: parse_roles(self.roles.as_slice()),
            actual_permissions: self
                .permissions
                .iter()
                .filter_map(|name| Permission::parse(name))
                .collect(),
            platform_roles: self
                .platform_roles
                .iter()
                .filter_map(|name| PlatformRole::parse(name))
                .collect(),
            is_platform_user: self.is_platform_user || !self.platform_roles.is_empty(),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    /// The session service refused the token.
    Rejected(StatusCode),
    /// Any other non-success status.
    Upstream(StatusCode),
    Transport(reqwest::Error),
    Decode(reqwest::Error),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(status) => write!(f, "session rejected: {status}"),
            Self::Upstream(status) => write!(f, "auth service returned {status}"),
            Self::Transport(err) => write!(f, "auth service unreachable: {err}"),
            Self::Decode(err) => write!(f, "invalid grants payload: {err}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Rejected(_) => {
                (HttpStatus::UNAUTHORIZED, "Invalid or expired session").into_response()
            }
            Self::Upstream(_) | Self::Transport(_) | Self::Decode(_) => {
                (HttpStatus::BAD_GATEWAY, "Auth service unavailable").into_response()
            }
        }
    }
}

pub struct AuthClient {
    client: Client,
    grants_url: Url,
    service_token: SecretString,
}

impl fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthClient")
            .field("grants_url", &self.grants_url.as_str())
            .field("service_token", &"***")
            .finish_non_exhaustive()
    }
}

impl AuthClient {
    /// # Errors
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, service_token: SecretString) -> Result<Self> {
        let grants_url = grants_url(base_url)
            .with_context(|| format!("Invalid auth service URL: {base_url}"))?;

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(Duration::from_secs(5))
            .build()
            .context("Error creating reqwest client")?;

        Ok(Self {
            client,
            grants_url,
            service_token,
        })
    }

    #[must_use]
    pub fn grants_endpoint(&self) -> &str {
        self.grants_url.as_str()
    }

    /// Resolve a bearer token into the session's grants.
    ///
    /// # Errors
    /// See [`AuthError`].
    #[instrument(skip_all)]
    pub async fn grants(&self, bearer_token: &str) -> Result<SessionGrants, AuthError> {
        let mut request = self
            .client
            .get(self.grants_url.clone())
            .header(AUTHORIZATION, format!("Bearer {bearer_token}"));

        let service_token = self.service_token.expose_secret();
        if !service_token.is_empty() {
            request = request.header("apikey", service_token);
        }

        let response = request.send().await.map_err(|err| {
            error!("Error calling auth service: {:?}", err);
            AuthError::Transport(err)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!("Session rejected: {}", status);
            return Err(AuthError::Rejected(status));
        }
        if !status.is_success() {
            error!("Auth service returned {}", status);
            return Err(AuthError::Upstream(status));
        }

        response.json::<SessionGrants>().await.map_err(|err| {
            error!("Error decoding grants: {:?}", err);
            AuthError::Decode(err)
        })
    }
}

fn grants_url(base_url: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(GRANTS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Role;
    use std::collections::BTreeSet;

    #[test]
    fn grants_url_keeps_base_path() {
        assert_eq!(
            grants_url("https://auth.salon.test").map(String::from).ok(),
            Some("https://auth.salon.test/v1/session/grants".to_string())
        );
        assert_eq!(
            grants_url("https://api.salon.test/auth").map(String::from).ok(),
            Some("https://api.salon.test/auth/v1/session/grants".to_string())
        );
        assert_eq!(
            grants_url("https://api.salon.test/auth/").map(String::from).ok(),
            Some("https://api.salon.test/auth/v1/session/grants".to_string())
        );
        assert!(grants_url("not a url").is_err());
    }

    #[test]
    fn viewer_grants_drop_unknown_names() {
        let grants = SessionGrants {
            user_id: Uuid::nil(),
            organization_id: Uuid::nil(),
            roles: vec!["stylist".to_string(), "sorcerer".to_string()],
            permissions: vec!["view_clients".to_string(), "fly".to_string()],
            platform_roles: vec!["platform_support".to_string(), "root".to_string()],
            is_platform_user: false,
        };
        let viewer = grants.viewer_grants();
        assert_eq!(viewer.actual_roles, BTreeSet::from([Role::Stylist]));
        assert_eq!(
            viewer.actual_permissions,
            BTreeSet::from([Permission::ViewClients])
        );
        assert_eq!(
            viewer.platform_roles,
            BTreeSet::from([PlatformRole::PlatformSupport])
        );
        assert!(viewer.is_platform_user);
    }

    #[test]
    fn grants_payload_defaults() {
        let grants: Result<SessionGrants, _> = serde_json::from_str(
            r#"{"user_id":"00000000-0000-0000-0000-000000000000","organization_id":"00000000-0000-0000-0000-000000000000"}"#,
        );
        assert!(grants.is_ok_and(|grants| grants.roles.is_empty() && !grants.is_platform_user));
    }

    #[test]
    fn rejected_sessions_map_to_unauthorized() {
        let response = AuthError::Rejected(StatusCode::FORBIDDEN).into_response();
        assert_eq!(response.status(), HttpStatus::UNAUTHORIZED);

        let response = AuthError::Upstream(StatusCode::INTERNAL_SERVER_ERROR).into_response();
        assert_eq!(response.status(), HttpStatus::BAD_GATEWAY);
    }

    #[test]
    fn debug_redacts_service_token() {
        let client = AuthClient::new("http://localhost:9999", SecretString::from("s3cr3t"));
        assert!(client.is_ok());
        if let Ok(client) = client {
            let debug = format!("{client:?}");
            assert!(!debug.contains("s3cr3t"));
            assert_eq!(
                client.grants_endpoint(),
                "http://localhost:9999/v1/session/grants"
            );
        }
    }
}
