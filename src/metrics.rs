use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `Ok(None)` when observability is disabled.
pub fn init_metrics() -> Result<Option<PrometheusHandle>, BuildError> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Metrics middleware to track HTTP requests
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router serving `GET /metrics` in the Prometheus text format
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Domain counters

/// `role` is the token type; `outcome` is `success`, `invalid_credentials`
/// or `forbidden`.
pub fn track_login(role: &str, outcome: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("logins_total", "role" => role.to_string(), "outcome" => outcome).increment(1);
}

pub fn track_token_issued(role: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("jwt_tokens_issued_total", "role" => role.to_string()).increment(1);
}

pub fn track_otp_sent(delivered: bool) {
    if !is_observability_enabled() {
        return;
    }
    let status = if delivered { "delivered" } else { "failed" };
    counter!("otp_sent_total", "status" => status).increment(1);
}

pub fn track_guard_rejection(policy: &str, reason: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("guard_rejections_total", "policy" => policy.to_string(), "reason" => reason)
        .increment(1);
}

pub fn track_owner_signup() {
    if !is_observability_enabled() {
        return;
    }
    counter!("owner_signups_total").increment(1);
}

pub fn track_rents_generated(count: u64) {
    if !is_observability_enabled() {
        return;
    }
    counter!("rents_generated_total").increment(count);
}

pub fn track_payment_recorded(kind: &str, amount: i64) {
    if !is_observability_enabled() {
        return;
    }
    counter!("payments_recorded_total", "kind" => kind.to_string()).increment(1);
    counter!("payments_amount_total", "kind" => kind.to_string()).increment(amount.max(0) as u64);
}
