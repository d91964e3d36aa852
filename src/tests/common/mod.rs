// tests/common/mod.rs
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use axum::Router;
use reqwest::Client;
use std::net::SocketAddr;

use crate::config::settings::{MetricsConfig, ServerConfig, SettingsConfig};
use crate::config::vendor::{Product, SecretValue, UserConfig, VendorConfig, VendorEnvironment};
use crate::issuer::credentials::Credentials;
use crate::issuer::{build_client, ClientUserId, LinkTokenIssuer};
use crate::server::server::{self, AppState};

pub const TEST_CLIENT_ID: &str = "test-client-id";
pub const TEST_SECRET: &str = "test-secret";
pub const DEFAULT_USER: &str = "demo-user";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn settings() -> SettingsConfig {
    SettingsConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        metrics: MetricsConfig {
            path: "/metrics".to_string(),
            is_enabled: true,
        },
        logging: None,
    }
}

pub fn vendor_config(base_url: &str) -> VendorConfig {
    VendorConfig {
        environment: VendorEnvironment::Sandbox,
        base_url: Some(base_url.to_string()),
        request_timeout_ms: 2000,
        client_id: SecretValue::Literal { value: TEST_CLIENT_ID.to_string() },
        secret: SecretValue::Literal { value: TEST_SECRET.to_string() },
        client_name: "one-fonance".to_string(),
        products: vec![Product::Transactions],
        country_codes: vec!["US".to_string()],
        language: "en".to_string(),
        user: UserConfig {
            default_client_user_id: DEFAULT_USER.to_string(),
        },
    }
}

/// Full facade wired to a real issuer pointed at `base_url`.
pub async fn spawn_service(base_url: &str) -> (JoinHandle<()>, SocketAddr) {
    let vendor = vendor_config(base_url);
    let credentials = Credentials::resolve(&vendor).await.expect("literal credentials");
    let client = build_client(&vendor).expect("vendor client");
    let issuer = LinkTokenIssuer::new(client, &vendor, credentials);
    let state = AppState::new(issuer, ClientUserId::new(DEFAULT_USER).unwrap());
    spawn_axum(server::router(&settings(), state)).await
}
