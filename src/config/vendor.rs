use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::constants::{
    DEFAULT_HTTP_TIMEOUT_MS, LINK_TOKEN_CREATE_PATH, VENDOR_DEVELOPMENT_URL,
    VENDOR_PRODUCTION_URL, VENDOR_SANDBOX_URL,
};

/// ================================
/// Vendor (token issuance API)
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct VendorConfig {
    #[serde(default)]
    pub environment: VendorEnvironment,
    /// Overrides the environment base url, e.g. for a local mock.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    pub client_id: SecretValue,
    pub secret: SecretValue,
    pub client_name: String,
    #[serde(default = "default_products")]
    pub products: Vec<Product>,
    #[serde(default = "default_country_codes")]
    pub country_codes: Vec<String>,
    #[serde(default = "default_language")]
    pub language: String,
    pub user: UserConfig,
}

impl VendorConfig {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    pub fn link_token_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url().trim_end_matches('/'),
            LINK_TOKEN_CREATE_PATH
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UserConfig {
    /// Used when a request carries no caller identity of its own.
    pub default_client_user_id: String,
}

/// Vendor deployment the service talks to.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VendorEnvironment {
    #[default]
    Sandbox,
    Development,
    Production,
}

impl VendorEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            VendorEnvironment::Sandbox => VENDOR_SANDBOX_URL,
            VendorEnvironment::Development => VENDOR_DEVELOPMENT_URL,
            VendorEnvironment::Production => VENDOR_PRODUCTION_URL,
        }
    }
}

/// Financial data products a link token may request access to.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    Transactions,
    Auth,
    Identity,
    Assets,
    Investments,
    Liabilities,
    IncomeVerification,
}

/// Where a credential comes from.
#[derive(Deserialize, Clone)]
#[serde(untagged)]
pub enum SecretValue {
    Literal { value: String },
    FromEnv { from_env: String },
    FromFile { path: String },
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretValue::Literal { .. } => f.write_str("Literal { value: \"***\" }"),
            SecretValue::FromEnv { from_env } => {
                f.debug_struct("FromEnv").field("from_env", from_env).finish()
            }
            SecretValue::FromFile { path } => f.debug_struct("FromFile").field("path", path).finish(),
        }
    }
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

fn default_products() -> Vec<Product> {
    vec![Product::Transactions]
}

fn default_country_codes() -> Vec<String> {
    vec!["US".to_string()]
}

fn default_language() -> String {
    "en".to_string()
}
