use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "ofac_client_requests_total",
        "Total requests issued by the OFAC client",
        &["operation"]
    )
    .expect("register requests_total")
});

pub static REQUEST_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "ofac_client_request_failures_total",
        "Total failed OFAC client requests",
        &["operation", "kind"]
    )
    .expect("register request_failures_total")
});

pub static REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "ofac_client_request_duration_seconds",
        "Request duration in seconds, including body decoding",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register request_duration")
});

pub fn record_request(operation: &str) {
    REQUESTS_TOTAL.with_label_values(&[operation]).inc();
}

pub fn record_failure(operation: &str, kind: &str) {
    REQUEST_FAILURES_TOTAL
        .with_label_values(&[operation, kind])
        .inc();
}

pub fn observe_duration(operation: &str, seconds: f64) {
    REQUEST_DURATION
        .with_label_values(&[operation])
        .observe(seconds);
}

/// Render every registered metric in the Prometheus text format.
pub fn encode_metrics() -> Result<String, String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| format!("metrics encode error: {e}"))?;
    String::from_utf8(buffer).map_err(|e| format!("metrics encode error: {e}"))
}
