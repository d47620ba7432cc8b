//! Resolver configuration.

use hallmark_ir::EnclosingConfiguration;

/// Environment variable overriding [`ResolverConfig::default_enclosing_configuration`].
pub const ENCLOSING_CONFIGURATION_ENV: &str = "HALLMARK_ENCLOSING_CONFIGURATION";

/// Environment variable overriding [`ResolverConfig::strategy_cache_capacity`].
pub const STRATEGY_CACHE_CAPACITY_ENV: &str = "HALLMARK_STRATEGY_CACHE_CAPACITY";

/// Tunables for a [`Resolver`](crate::Resolver).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Maximum number of types whose traversal strategy is remembered.
    pub strategy_cache_capacity: usize,
    /// Configuration assumed for types with no nested-configuration tag
    /// anywhere in their hierarchy.
    pub default_enclosing_configuration: EnclosingConfiguration,
}

impl ResolverConfig {
    /// Default strategy cache capacity.
    pub const DEFAULT_STRATEGY_CACHE_CAPACITY: usize = 32;

    /// Defaults overlaid with `HALLMARK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`, keyed like the
    /// environment. Unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENCLOSING_CONFIGURATION_ENV) {
            match raw.parse::<EnclosingConfiguration>() {
                Ok(configuration) => config.default_enclosing_configuration = configuration,
                Err(error) => tracing::warn!(
                    variable = ENCLOSING_CONFIGURATION_ENV,
                    %error,
                    "ignoring invalid enclosing configuration"
                ),
            }
        }

        if let Some(raw) = lookup(STRATEGY_CACHE_CAPACITY_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) => config = config.with_strategy_cache_capacity(capacity),
                Err(error) => tracing::warn!(
                    variable = STRATEGY_CACHE_CAPACITY_ENV,
                    value = %raw,
                    %error,
                    "ignoring invalid strategy cache capacity"
                ),
            }
        }

        config
    }

    /// Set the strategy cache capacity. Zero is raised to one.
    #[must_use]
    pub fn with_strategy_cache_capacity(mut self, capacity: usize) -> Self {
        if capacity == 0 {
            tracing::warn!("strategy cache capacity must be positive, using 1");
        }
        self.strategy_cache_capacity = capacity.max(1);
        self
    }

    #[must_use]
    pub fn with_default_enclosing_configuration(
        mut self,
        configuration: EnclosingConfiguration,
    ) -> Self {
        self.default_enclosing_configuration = configuration;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strategy_cache_capacity: Self::DEFAULT_STRATEGY_CACHE_CAPACITY,
            default_enclosing_configuration: EnclosingConfiguration::Override,
        }
    }
}
