//! Shared constants and invariants

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

// Facade routes
pub const LINK_TOKEN_PATH: &str = "/api/create_link_token";
pub const HEALTH_PATH: &str = "/health";
pub const HEALTH_PAYLOAD: &str = "Health Okay";
pub const LINK_TOKEN_ERROR_MSG: &str = "Error creating link token";

/// Optional request header carrying the caller identity forwarded to the vendor.
pub const CLIENT_USER_ID_HEADER: &str = "x-client-user-id";

// Vendor wire contract
pub const VENDOR_SANDBOX_URL: &str = "https://sandbox.plaid.com";
pub const VENDOR_DEVELOPMENT_URL: &str = "https://development.plaid.com";
pub const VENDOR_PRODUCTION_URL: &str = "https://production.plaid.com";
pub const LINK_TOKEN_CREATE_PATH: &str = "/link/token/create";
pub const VENDOR_CLIENT_ID_HEADER: &str = "PLAID-CLIENT-ID";
pub const VENDOR_SECRET_HEADER: &str = "PLAID-SECRET";
