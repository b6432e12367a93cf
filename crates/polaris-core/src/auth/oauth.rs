//! OAuth token lifecycle against the Polaris token endpoint.

use std::path::Path;

use reqwest::{header, Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, info};

use crate::api::client::{build_http_client, endpoint_url, parse_host};
use crate::api::REALM_HEADER;
use crate::auth::Credentials;
use crate::config::Config;
use crate::error::{Error, Result};

/// Token endpoint path segments, relative to the configured host
const TOKEN_ENDPOINT: [&str; 5] = ["api", "catalog", "v1", "oauth", "tokens"];

/// Scope requested on every client-credentials login
pub const DEFAULT_SCOPE: &str = "PRINCIPAL_ROLE:ALL";

const GRANT_CLIENT_CREDENTIALS: &str = "client_credentials";
const GRANT_TOKEN_EXCHANGE: &str = "urn:ietf:params:oauth:grant-type:token-exchange";
const TOKEN_TYPE_ACCESS_TOKEN: &str = "urn:ietf:params:oauth:token-type:access_token";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    expires_in: i64,
    #[serde(default)]
    scope: String,
}

#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Client for the OAuth token endpoint.
pub struct AuthClient {
    client: Client,
    token_url: Url,
    realm: Option<String>,
}

impl AuthClient {
    pub fn new(config: &Config) -> Result<Self> {
        let host = parse_host(&config.host)?;
        Ok(Self {
            client: build_http_client()?,
            token_url: endpoint_url(&host, TOKEN_ENDPOINT)?,
            realm: config.realm().map(str::to_string),
        })
    }

    /// Exchange client credentials for an access token.
    ///
    /// The returned record carries the supplied client id and secret so it can
    /// be persisted as-is.
    pub async fn login(&self, client_id: &str, client_secret: &str) -> Result<Credentials> {
        info!(client_id = client_id, "Requesting token with client credentials");
        let form = [
            ("grant_type", GRANT_CLIENT_CREDENTIALS),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("scope", DEFAULT_SCOPE),
        ];
        let token = self.request_token(&form).await?;

        Ok(Credentials {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            scope: token.scope,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }

    /// Exchange the current access token for a fresh one.
    ///
    /// The token endpoint does not echo the client identity, so the id and
    /// secret are carried over from `current`.
    pub async fn refresh_token(&self, current: &Credentials) -> Result<Credentials> {
        info!("Exchanging access token for a new one");
        let subject_token = current.access_token()?;
        let form = [
            ("grant_type", GRANT_TOKEN_EXCHANGE),
            ("subject_token", subject_token),
            ("subject_token_type", TOKEN_TYPE_ACCESS_TOKEN),
        ];
        let token = self.request_token(&form).await?;

        Ok(Credentials {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            scope: token.scope,
            client_id: current.client_id.clone(),
            client_secret: current.client_secret.clone(),
        })
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let mut request = self
            .client
            .post(self.token_url.clone())
            .header(header::ACCEPT, "application/json")
            .form(form);
        if let Some(ref realm) = self.realm {
            request = request.header(REALM_HEADER, realm);
        }

        debug!(url = %self.token_url, "POST token request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), "Token endpoint responded");

        if status != StatusCode::OK {
            return Err(Self::token_error(status, &body));
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            Error::InvalidServerResponse(format!("failed to parse token response: {}", e))
        })?;
        if token.access_token.is_empty() {
            return Err(Error::InvalidServerResponse(
                "received empty access token from server".to_string(),
            ));
        }
        Ok(token)
    }

    /// Prefer the structured OAuth error document; fall back to the raw body.
    fn token_error(status: StatusCode, body: &str) -> Error {
        match serde_json::from_str::<OAuthErrorBody>(body) {
            Ok(parsed) if !parsed.error.is_empty() => Error::OAuth {
                status: status.as_u16(),
                error: parsed.error,
                description: parsed.error_description,
            },
            _ => Error::Server {
                status: status.as_u16(),
                body: body.to_string(),
            },
        }
    }
}

/// Forget the stored token.
pub fn logout(dir: &Path) -> Result<()> {
    Credentials::clear_in(dir)
}
