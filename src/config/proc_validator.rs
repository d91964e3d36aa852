//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Checks server, metrics and vendor request invariants

use tracing::{error, info};

use crate::config::service::ServiceConfig;
use crate::config::settings::SettingsConfig;
use crate::config::vendor::{SecretValue, VendorConfig};
use crate::utils::constants::{HEALTH_PATH, LINK_TOKEN_PATH};

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_vendor(&cfg.vendor, &mut errors);

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        Err(errors)
    }
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.server.host.trim().is_empty() {
        errors.push("settings.server.host must not be empty".to_string());
    }
    if settings.server.port == 0 {
        errors.push("settings.server.port must be a fixed port, got 0".to_string());
    }

    if let Some(logging) = &settings.logging {
        let level = logging.level.to_lowercase();
        if !["trace", "debug", "info", "warn", "error"].contains(&level.as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' must be one of trace, debug, info, warn, error",
                logging.level
            ));
        }
    }

    let metrics_path = &settings.metrics.path;
    if !metrics_path.starts_with('/') {
        errors.push(format!(
            "settings.metrics.path '{}' must start with '/'",
            metrics_path
        ));
    }
    if settings.metrics.is_enabled && (metrics_path == HEALTH_PATH || metrics_path == LINK_TOKEN_PATH)
    {
        errors.push(format!(
            "settings.metrics.path '{}' collides with a service route",
            metrics_path
        ));
    }
}

/// VENDOR VALIDATION
fn validate_vendor(vendor: &VendorConfig, errors: &mut Vec<String>) {
    if let Some(base_url) = &vendor.base_url {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            errors.push(format!(
                "vendor.base_url '{}' must start with http:// or https://",
                base_url
            ));
        }
    }
    if vendor.request_timeout_ms == 0 {
        errors.push("vendor.request_timeout_ms must be greater than 0".to_string());
    }

    validate_secret("vendor.client_id", &vendor.client_id, errors);
    validate_secret("vendor.secret", &vendor.secret, errors);

    if vendor.client_name.trim().is_empty() {
        errors.push("vendor.client_name must not be empty".to_string());
    }
    if vendor.products.is_empty() {
        errors.push("vendor.products must contain at least one product".to_string());
    }
    if vendor.country_codes.is_empty() {
        errors.push("vendor.country_codes must contain at least one country code".to_string());
    }
    for code in &vendor.country_codes {
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            errors.push(format!(
                "vendor.country_codes '{}' is not an ISO 3166-1 alpha-2 code",
                code
            ));
        }
    }
    if vendor.language.trim().is_empty() {
        errors.push("vendor.language must not be empty".to_string());
    }
    if vendor.user.default_client_user_id.trim().is_empty() {
        errors.push("vendor.user.default_client_user_id must not be empty".to_string());
    }
}

fn validate_secret(field: &str, value: &SecretValue, errors: &mut Vec<String>) {
    let empty = match value {
        SecretValue::Literal { value } => value.is_empty(),
        SecretValue::FromEnv { from_env } => from_env.is_empty(),
        SecretValue::FromFile { path } => path.is_empty(),
    };
    if empty {
        errors.push(format!("{} must not be empty", field));
    }
}
