//! Prometheus metric definitions.

use prometheus::{
    Counter, Histogram, Registry, register_counter_with_registry,
    register_histogram_with_registry,
};

/// Metric collectors for the recommendation service.
#[derive(Debug, Clone)]
pub struct Metrics {
    pub content_added: Counter,
    pub users_added: Counter,
    pub interactions_recorded: Counter,
    pub recommendations_served: Counter,
    pub serendipity_injections: Counter,
    pub recommend_duration: Histogram,
}

impl Metrics {
    /// Register every collector on the given registry.
    ///
    /// # Errors
    /// Returns an error when a collector name collides in the registry.
    pub fn new(registry: &Registry) -> prometheus::Result<Self> {
        Ok(Self {
            content_added: register_counter_with_registry!(
                "feedrank_content_added_total",
                "Content items added to the catalog",
                registry
            )?,
            users_added: register_counter_with_registry!(
                "feedrank_users_added_total",
                "Users registered",
                registry
            )?,
            interactions_recorded: register_counter_with_registry!(
                "feedrank_interactions_recorded_total",
                "Interactions appended to the log",
                registry
            )?,
            recommendations_served: register_counter_with_registry!(
                "feedrank_recommendations_served_total",
                "Recommendation list requests served",
                registry
            )?,
            serendipity_injections: register_counter_with_registry!(
                "feedrank_serendipity_injections_total",
                "Recommendation calls where a serendipity slot was injected",
                registry
            )?,
            recommend_duration: register_histogram_with_registry!(
                "feedrank_recommend_duration_seconds",
                "Latency of recommendation computation",
                vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0],
                registry
            )?,
        })
    }
}
