/// Prometheus metrics for the engagement service
use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec, Encoder, TextEncoder};

lazy_static! {
    /// Total social graph / engagement events
    /// (labels: event=follow|unfollow|like|unlike|comment)
    pub static ref SOCIAL_EVENTS_TOTAL: CounterVec = register_counter_vec!(
        "engagement_social_events_total",
        "Total number of social events processed",
        &["event"]
    )
    .unwrap();

    /// Total notifications emitted (labels: kind=like|comment|follow|...)
    pub static ref NOTIFICATIONS_EMITTED_TOTAL: CounterVec = register_counter_vec!(
        "engagement_notifications_emitted_total",
        "Total number of notifications emitted",
        &["kind"]
    )
    .unwrap();
}

pub fn record_social_event(event: &str) {
    SOCIAL_EVENTS_TOTAL.with_label_values(&[event]).inc();
}

pub fn record_notification_emitted(kind: &str) {
    NOTIFICATIONS_EMITTED_TOTAL.with_label_values(&[kind]).inc();
}

/// Render all registered metrics in the Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
