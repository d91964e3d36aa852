use prometheus::{HistogramOpts, Histogram, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;


// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}


#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Issuance metrics
    pub link_token_requests: IntCounter,
    pub link_token_failures: IntCounterVec,
    pub link_token_duration: Histogram,

    // Facade metrics
    pub health_checks: IntCounter,

    // Config/runtime
    pub config_validation_errors: IntCounter,
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("linktoken".into()), None)
            .expect("static registry prefix is valid");

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Issuance
            link_token_requests: IntCounter::new("link_token_requests_total", "Total link token issuance attempts").expect("valid metric"),
            link_token_failures: IntCounterVec::new(Opts::new("link_token_failures_total", "Link token issuance failures by reason"), &["reason"]).expect("valid metric"),
            link_token_duration: Histogram::with_opts(HistogramOpts::new("link_token_duration_seconds", "Vendor round trip seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])).expect("valid metric"),

            // Facade
            health_checks: IntCounter::new("health_checks_total", "Health endpoint hits").expect("valid metric"),

            // Config/runtime
            config_validation_errors: IntCounter::new("config_validation_errors_total", "Validation errors during startup").expect("valid metric"),
            up: IntGauge::new("up", "1 if service is serving").expect("valid metric"),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.link_token_requests.clone())).expect("unique metric");
        reg.register(Box::new(metrics.link_token_failures.clone())).expect("unique metric");
        reg.register(Box::new(metrics.link_token_duration.clone())).expect("unique metric");
        reg.register(Box::new(metrics.health_checks.clone())).expect("unique metric");
        reg.register(Box::new(metrics.config_validation_errors.clone())).expect("unique metric");
        reg.register(Box::new(metrics.up.clone())).expect("unique metric");

        metrics
    }
}
