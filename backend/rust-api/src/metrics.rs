use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .unwrap();

    // Database Metrics (MongoDB)
    pub static ref DB_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "db_operations_total",
        "Total number of database operations",
        &["operation", "collection", "status"]
    )
    .unwrap();

    pub static ref DB_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "db_operation_duration_seconds",
        "Database operation duration in seconds",
        &["operation", "collection"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .unwrap();

    // AI provider
    pub static ref PROVIDER_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "ai_provider_requests_total",
        "Calls made to the generative-AI provider",
        &["purpose", "status"]
    )
    .unwrap();

    // Business Metrics
    pub static ref QUIZZES_GENERATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quizzes_generated_total",
        "Quizzes generated, by question source",
        &["source"]
    )
    .unwrap();

    pub static ref FEEDBACK_GENERATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feedback_generated_total",
        "Feedback texts produced, by winning strategy",
        &["strategy"]
    )
    .unwrap();

    pub static ref QUIZ_SUBMISSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quiz_submissions_total",
        "Scored quiz submissions, by performance band",
        &["band"]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

/// Helper: track database operation with metrics
pub async fn track_db_operation<F, T, E>(operation: &str, collection: &str, future: F) -> Result<T, E>
where
    F: std::future::Future<Output = Result<T, E>>,
{
    let start = std::time::Instant::now();
    let result = future.await;
    let duration = start.elapsed().as_secs_f64();

    let status = if result.is_ok() { "success" } else { "error" };

    DB_OPERATIONS_TOTAL
        .with_label_values(&[operation, collection, status])
        .inc();

    DB_OPERATION_DURATION_SECONDS
        .with_label_values(&[operation, collection])
        .observe(duration);

    result
}

pub fn record_provider_call(purpose: &str, ok: bool) {
    PROVIDER_REQUESTS_TOTAL
        .with_label_values(&[purpose, if ok { "success" } else { "error" }])
        .inc();
}
