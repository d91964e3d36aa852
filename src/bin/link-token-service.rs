use anyhow::{anyhow, Result};
use clap::Parser;
use link_token_service::issuer::credentials::Credentials;
use link_token_service::issuer::{build_client, ClientUserId, LinkTokenIssuer};
use link_token_service::server::server::{self, AppState};
use link_token_service::utils::config_loader;
use link_token_service::utils::logging::{self, LogLevel};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "link-token-service.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config.settings, args.log_level)?;

    // -------------------------------
    // 2. Resolve credentials and build the vendor client
    // -------------------------------

    let vendor = &service_config.vendor;
    let credentials = Credentials::resolve(vendor).await?;
    let client = build_client(vendor)?;
    let issuer = LinkTokenIssuer::new(client, vendor, credentials);
    info!(
        "vendor endpoint: {}, environment: {:?}",
        issuer.endpoint(),
        vendor.environment
    );

    // -------------------------------
    // 3. Start http server
    // -------------------------------

    let default_user = ClientUserId::new(vendor.user.default_client_user_id.as_str())
        .ok_or_else(|| anyhow!("vendor.user.default_client_user_id must not be empty"))?;
    let state = AppState::new(issuer, default_user);

    info!("Service starting...");
    server::start(&service_config.settings, state, server::shutdown_signal()).await
}
