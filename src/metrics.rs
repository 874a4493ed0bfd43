use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, TextEncoder};

/// Handler that serialises Prometheus metrics in text format.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            buffer,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

fn register_counter(name: &str, help: &str) -> IntCounter {
    IntCounter::new(name, help)
        .and_then(|c| {
            prometheus::default_registry().register(Box::new(c.clone()))?;
            Ok(c)
        })
        .unwrap_or_else(|e| {
            tracing::error!("failed to create {} counter: {}", name, e);
            IntCounter::new(format!("dummy_{}", name), "dummy").expect("dummy counter")
        })
}

/// Counter for registration attempts
static REGISTER_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "register_requests_total",
        "Total number of registration requests",
    )
});

/// Counter for registrations rejected on a uniqueness conflict
static REGISTER_CONFLICTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "register_conflicts_total",
        "Total number of registrations rejected because username, phone or email was taken",
    )
});

/// Counter for login attempts
static LOGIN_REQUESTS_TOTAL: Lazy<IntCounter> =
    Lazy::new(|| register_counter("login_requests_total", "Total number of login requests"));

/// Counter for failed logins (wrong password or unknown username)
static LOGIN_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "login_failures_total",
        "Total number of failed login attempts",
    )
});

/// Counter for rejected bearer tokens on protected requests
static TOKEN_REJECTIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "token_rejections_total",
        "Total number of bearer tokens rejected during verification",
    )
});

#[inline]
pub fn inc_register_requests() {
    REGISTER_REQUESTS_TOTAL.inc();
}

#[inline]
pub fn inc_register_conflicts() {
    REGISTER_CONFLICTS_TOTAL.inc();
}

#[inline]
pub fn inc_login_requests() {
    LOGIN_REQUESTS_TOTAL.inc();
}

#[inline]
pub fn inc_login_failures() {
    LOGIN_FAILURES_TOTAL.inc();
}

#[inline]
pub fn inc_token_rejections() {
    TOKEN_REJECTIONS_TOTAL.inc();
}
