//! The engine's configuration surface (§10.3).

use loomgraph_common::{MAX_LABEL_LEN, MAX_PROPERTY_STRING_LEN};
use std::time::Duration;

const DEFAULT_CACHE_CAPACITY: usize = 10_000;
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Builder-style configuration for an [`crate::Engine`].
///
/// ```
/// use loomgraph_engine::EngineConfig;
///
/// let config = EngineConfig::in_memory()
///     .with_cache_capacity(1_000)
///     .with_cache_enabled(false);
/// assert_eq!(config.cache_capacity, 1_000);
/// assert!(!config.cache_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of entries the query cache holds at once (§4.6).
    pub cache_capacity: usize,
    /// How long a cache entry stays valid after insertion (§4.6).
    pub cache_ttl: Duration,
    /// Whether the query cache is consulted at all. Disabling it must
    /// never change a query's result, only its latency.
    pub cache_enabled: bool,
    /// The label length ceiling this instance enforces. Must not exceed
    /// [`MAX_LABEL_LEN`]; hosts may only tighten it.
    pub max_label_len: usize,
    /// The property string length ceiling this instance enforces. Must
    /// not exceed [`MAX_PROPERTY_STRING_LEN`]; hosts may only tighten it.
    pub max_property_string_len: usize,
}

impl EngineConfig {
    /// Returns the default configuration for an in-memory engine.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_enabled: true,
            max_label_len: MAX_LABEL_LEN,
            max_property_string_len: MAX_PROPERTY_STRING_LEN,
        }
    }

    /// Sets the query cache's entry-count bound.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Sets the query cache's entry time-to-live.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Enables or disables the query cache entirely.
    #[must_use]
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Tightens the label length ceiling. Values above
    /// [`MAX_LABEL_LEN`] are clamped down to it: hosts may only make this
    /// stricter, never looser than the data model allows.
    #[must_use]
    pub fn with_max_label_len(mut self, len: usize) -> Self {
        self.max_label_len = len.min(MAX_LABEL_LEN);
        self
    }

    /// Tightens the property string length ceiling, clamped the same way
    /// as [`Self::with_max_label_len`].
    #[must_use]
    pub fn with_max_property_string_len(mut self, len: usize) -> Self {
        self.max_property_string_len = len.min(MAX_PROPERTY_STRING_LEN);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = EngineConfig::in_memory();
        assert_eq!(config.cache_capacity, 10_000);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert!(config.cache_enabled);
    }

    #[test]
    fn tightening_clamps_at_the_hard_ceiling() {
        let config = EngineConfig::in_memory().with_max_label_len(10_000);
        assert_eq!(config.max_label_len, MAX_LABEL_LEN);
    }
}
