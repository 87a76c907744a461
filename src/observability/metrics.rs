//! Metrics for hotel resolution
//!
//! Counters are recorded through the `metrics` facade. Until a recorder is
//! installed (see [`init`]) they are no-ops.

use std::fmt;
use std::sync::OnceLock;
use tracing::info;

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    ResolutionsTotal,
    ResolutionFallbacks,
    SubFetchFailures,
    TransportFailures,
    ReviewsSynthesized,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::ResolutionsTotal => "hotel_resolutions_total",
            MetricName::ResolutionFallbacks => "hotel_resolution_fallbacks_total",
            MetricName::SubFetchFailures => "hotel_sub_fetch_failures_total",
            MetricName::TransportFailures => "hotel_transport_failures_total",
            MetricName::ReviewsSynthesized => "hotel_reviews_synthesized_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        [
            MetricName::ResolutionsTotal,
            MetricName::ResolutionFallbacks,
            MetricName::SubFetchFailures,
            MetricName::TransportFailures,
            MetricName::ReviewsSynthesized,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static PROMETHEUS_HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Calling it twice is an error from the exporter.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))?;
    PROMETHEUS_HANDLE.set(handle).ok();
    info!("Metrics recorder installed");
    Ok(())
}

/// Current exposition text, if a recorder was installed
pub fn render() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|handle| handle.render())
}

// ============================================================================
// Resolution Metrics
// ============================================================================

pub mod resolution {
    use super::MetricName;

    /// One terminal outcome reached
    pub fn completed(outcome: &'static str, source: &'static str) {
        ::metrics::counter!(MetricName::ResolutionsTotal.as_str(), "outcome" => outcome, "source" => source)
            .increment(1);
    }

    /// Demo catalog served an id after the store missed
    pub fn fallback_used() {
        ::metrics::counter!(MetricName::ResolutionFallbacks.as_str()).increment(1);
    }

    /// A contained sub-fetch failure
    pub fn sub_fetch_failed(kind: &'static str) {
        ::metrics::counter!(MetricName::SubFetchFailures.as_str(), "kind" => kind).increment(1);
    }

    pub fn transport_failed(source: &'static str) {
        ::metrics::counter!(MetricName::TransportFailures.as_str(), "source" => source).increment(1);
    }

    pub fn reviews_synthesized(count: usize) {
        ::metrics::counter!(MetricName::ReviewsSynthesized.as_str()).increment(count as u64);
    }
}
