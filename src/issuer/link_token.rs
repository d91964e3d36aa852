use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use tokio::time::Instant;
use tracing::{debug, error};

use crate::config::vendor::{Product, VendorConfig};
use crate::issuer::credentials::Credentials;
use crate::issuer::error::{IssuanceError, VendorError};
use crate::issuer::IssueLinkToken;
use crate::observability::metrics::get_metrics;
use crate::utils::constants::{VENDOR_CLIENT_ID_HEADER, VENDOR_SECRET_HEADER};

/// Identity of the end user a link token is issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClientUserId(String);

impl ClientUserId {
    /// Returns `None` for blank input.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        (!value.is_empty()).then_some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque token handed to the client-side linking flow. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LinkToken(String);

impl LinkToken {
    pub fn new(value: String) -> Option<Self> {
        (!value.is_empty()).then_some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ================================
/// Vendor wire contract
/// ================================
#[derive(Debug, Serialize)]
pub struct LinkTokenRequest<'a> {
    pub client_name: &'a str,
    pub user: LinkTokenUser<'a>,
    pub products: &'a [Product],
    pub country_codes: &'a [String],
    pub language: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LinkTokenUser<'a> {
    pub client_user_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LinkTokenResponse {
    pub link_token: String,
    /// Informational only; unparseable values become `None`.
    #[serde(default, deserialize_with = "lenient_expiration")]
    pub expiration: Option<DateTime<Utc>>,
    #[serde(default)]
    pub request_id: Option<String>,
}

fn lenient_expiration<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|value| value.as_str())
        .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|expiration| expiration.with_timezone(&Utc)))
}

/// Fixed part of every issuance request.
#[derive(Debug)]
struct RequestProfile {
    client_name: String,
    products: Vec<Product>,
    country_codes: Vec<String>,
    language: String,
}

/// Builds the shared vendor client. Constructed once per process.
pub fn build_client(vendor: &VendorConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_millis(vendor.request_timeout_ms))
        .build()
        .context("failed to build vendor HTTP client")
}

#[derive(Debug, Clone)]
pub struct LinkTokenIssuer {
    client: Client,
    endpoint: Arc<str>,
    credentials: Arc<Credentials>,
    profile: Arc<RequestProfile>,
}

impl LinkTokenIssuer {
    pub fn new(client: Client, vendor: &VendorConfig, credentials: Credentials) -> Self {
        let profile = RequestProfile {
            client_name: vendor.client_name.clone(),
            products: vendor.products.clone(),
            country_codes: vendor.country_codes.clone(),
            language: vendor.language.clone(),
        };
        Self {
            client,
            endpoint: Arc::from(vendor.link_token_url()),
            credentials: Arc::new(credentials),
            profile: Arc::new(profile),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_request<'a>(&'a self, user: &'a ClientUserId) -> LinkTokenRequest<'a> {
        LinkTokenRequest {
            client_name: &self.profile.client_name,
            user: LinkTokenUser {
                client_user_id: user.as_str(),
            },
            products: &self.profile.products,
            country_codes: &self.profile.country_codes,
            language: &self.profile.language,
        }
    }

    async fn request_link_token(&self, user: &ClientUserId) -> Result<LinkToken, IssuanceError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(VENDOR_CLIENT_ID_HEADER, &self.credentials.client_id)
            .header(VENDOR_SECRET_HEADER, &self.credentials.secret)
            .json(&self.build_request(user))
            .send()
            .await
            .map_err(IssuanceError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(IssuanceError::Transport)?;
        if !status.is_success() {
            return Err(IssuanceError::Rejected {
                status,
                detail: VendorError::from_body(&body),
            });
        }

        let parsed: LinkTokenResponse =
            serde_json::from_str(&body).map_err(IssuanceError::MalformedResponse)?;
        debug!(
            request_id = parsed.request_id.as_deref().unwrap_or("-"),
            expiration = ?parsed.expiration,
            "vendor issued link token"
        );
        LinkToken::new(parsed.link_token).ok_or(IssuanceError::EmptyToken)
    }
}

impl IssueLinkToken for LinkTokenIssuer {
    async fn issue_token(&self, user: &ClientUserId) -> Result<LinkToken, IssuanceError> {
        let metrics = get_metrics().await;
        let start = Instant::now();
        metrics.link_token_requests.inc();

        let result = self.request_link_token(user).await;
        metrics
            .link_token_duration
            .observe(start.elapsed().as_secs_f64());

        result.inspect_err(|err| {
            metrics
                .link_token_failures
                .with_label_values(&[err.reason()])
                .inc();
            match err {
                IssuanceError::Rejected { status, detail } => error!(
                    reason = err.reason(),
                    %status,
                    "error creating link token: {}",
                    detail
                ),
                other => error!(
                    reason = other.reason(),
                    "error creating link token: {:?}",
                    other
                ),
            }
        })
    }
}
