//! Configuration for portfolio analytics computation.

use bondlens_analytics::ScheduleMethod;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the remaining term used for WAT comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermSource {
    /// Use the row's `Remaining_Term_Yrs` when present, else compute it.
    #[default]
    PreferColumn,
    /// Always compute from settlement to maturity under the row's day count.
    Computed,
}

impl fmt::Display for TermSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermSource::PreferColumn => write!(f, "prefer_column"),
            TermSource::Computed => write!(f, "computed"),
        }
    }
}

/// Configuration for portfolio analytics computation.
///
/// Controls parallelism and how per-bond inputs are derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum row count to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,

    /// Source of each bond's remaining term.
    pub term_source: TermSource,

    /// Schedule builder used for duration and convexity.
    pub schedule_method: ScheduleMethod,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 100,
            term_source: TermSource::PreferColumn,
            schedule_method: ScheduleMethod::CouponDates,
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Sets the remaining-term source.
    #[must_use]
    pub fn with_term_source(mut self, source: TermSource) -> Self {
        self.term_source = source;
        self
    }

    /// Sets the schedule method.
    #[must_use]
    pub fn with_schedule_method(mut self, method: ScheduleMethod) -> Self {
        self.schedule_method = method;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = AnalyticsConfig::default();
        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 100);
        assert_eq!(config.term_source, TermSource::PreferColumn);
        assert_eq!(config.schedule_method, ScheduleMethod::CouponDates);
    }

    #[test]
    fn test_sequential() {
        let config = AnalyticsConfig::sequential();
        assert!(!config.parallel);
        assert!(!config.should_parallelize(10_000));
    }

    #[test]
    fn test_builder_chain() {
        let config = AnalyticsConfig::new()
            .with_threshold(10)
            .with_term_source(TermSource::Computed)
            .with_schedule_method(ScheduleMethod::WholePeriods);

        assert_eq!(config.parallel_threshold, 10);
        assert_eq!(config.term_source, TermSource::Computed);
        assert_eq!(config.schedule_method, ScheduleMethod::WholePeriods);
    }

    #[test]
    #[cfg(feature = "parallel")]
    fn test_should_parallelize_with_feature() {
        let config = AnalyticsConfig::default().with_threshold(50);
        assert!(!config.should_parallelize(49));
        assert!(config.should_parallelize(50));
    }

    #[test]
    #[cfg(not(feature = "parallel"))]
    fn test_should_parallelize_without_feature() {
        let config = AnalyticsConfig::default().with_threshold(1);
        assert!(!config.should_parallelize(1_000));
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: AnalyticsConfig =
            serde_json::from_str(r#"{"term_source": "computed"}"#).unwrap();
        assert_eq!(config.term_source, TermSource::Computed);
        assert_eq!(config.parallel_threshold, 100);
    }
}
