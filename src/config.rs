//! Table parameters.

use crate::error::ConfigError;

/// Bucket count of a table built with [`MapConfig::default`].
pub const DEFAULT_BUCKETS: usize = 8;

/// Load factor of a table built with [`MapConfig::default`].
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Initial bucket count and growth threshold for a `ChainHashMap`.
///
/// The load factor is the largest tolerated `len / buckets` ratio; an
/// insertion that would push the ratio above it grows the table first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    pub initial_buckets: usize,
    pub load_factor: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_buckets: DEFAULT_BUCKETS,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl MapConfig {
    pub fn new(load_factor: f64, initial_buckets: usize) -> Self {
        Self {
            initial_buckets,
            load_factor,
        }
    }

    pub fn with_initial_buckets(mut self, initial_buckets: usize) -> Self {
        self.initial_buckets = initial_buckets;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Checks that the bucket count is positive and the load factor lies in
    /// `(0, 1]`. NaN is rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_buckets == 0 {
            return Err(ConfigError::ZeroBuckets);
        }
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(ConfigError::InvalidLoadFactor(self.load_factor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: the default configuration is 8 buckets at 0.75 and is valid.
    #[test]
    fn default_is_valid() {
        let c = MapConfig::default();
        assert_eq!(c.initial_buckets, 8);
        assert_eq!(c.load_factor, 0.75);
        assert_eq!(c.validate(), Ok(()));
    }

    /// Invariant: zero buckets is rejected regardless of the load factor.
    #[test]
    fn zero_buckets_rejected() {
        let c = MapConfig::default().with_initial_buckets(0);
        assert_eq!(c.validate(), Err(ConfigError::ZeroBuckets));
    }

    /// Invariant: load factors outside `(0, 1]` are rejected; both bounds are checked.
    #[test]
    fn load_factor_range() {
        for lf in [0.0, -0.5, 1.000_1, 2.0, f64::INFINITY] {
            let c = MapConfig::new(lf, 4);
            assert_eq!(c.validate(), Err(ConfigError::InvalidLoadFactor(lf)));
        }
        assert!(MapConfig::new(f64::NAN, 4).validate().is_err());
        assert_eq!(MapConfig::new(1.0, 4).validate(), Ok(()));
        assert_eq!(MapConfig::new(0.01, 1).validate(), Ok(()));
    }
}
