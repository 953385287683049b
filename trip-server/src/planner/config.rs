//! Configuration for route resolution.

use crate::waypoints::ReturnPolicy;

/// Default number of legs requested at once in parallel mode.
const DEFAULT_BATCH_SIZE: usize = 4;

/// How the resolver schedules leg requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// One leg at a time; leg `i + 1` is requested only after leg `i` succeeds.
    #[default]
    Sequential,
    /// Up to `batch_size` legs in flight at once, merged by leg index.
    Parallel { batch_size: usize },
}

impl ResolveMode {
    /// Parallel mode with the default batch size.
    pub fn parallel() -> Self {
        ResolveMode::Parallel {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Configuration parameters for trip resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// Scheduling of leg requests.
    pub mode: ResolveMode,

    /// Whether the trip returns to the source after the last destination.
    pub return_policy: ReturnPolicy,
}

impl ResolverConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(mode: ResolveMode, return_policy: ReturnPolicy) -> Self {
        Self {
            mode,
            return_policy,
        }
    }

    /// Set the scheduling mode.
    pub fn with_mode(mut self, mode: ResolveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the return policy.
    pub fn with_return_policy(mut self, policy: ReturnPolicy) -> Self {
        self.return_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ResolverConfig::default();

        assert_eq!(config.mode, ResolveMode::Sequential);
        assert_eq!(config.return_policy, ReturnPolicy::RoundTrip);
    }

    #[test]
    fn parallel_default_batch() {
        assert_eq!(
            ResolveMode::parallel(),
            ResolveMode::Parallel {
                batch_size: DEFAULT_BATCH_SIZE
            }
        );
    }

    #[test]
    fn custom_config() {
        let config = ResolverConfig::new(ResolveMode::Parallel { batch_size: 2 }, ReturnPolicy::OneWay);
        assert_eq!(config.mode, ResolveMode::Parallel { batch_size: 2 });
        assert_eq!(config.return_policy, ReturnPolicy::OneWay);

        let config = ResolverConfig::default()
            .with_mode(ResolveMode::parallel())
            .with_return_policy(ReturnPolicy::OneWay);
        assert_eq!(config.mode, ResolveMode::parallel());
        assert_eq!(config.return_policy, ReturnPolicy::OneWay);
    }
}
