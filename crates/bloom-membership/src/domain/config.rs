//! Membership filter configuration and validation
//!
//! # Example
//!
//! ```
//! use bloom_membership::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .size_bits(1024)
//!     .hash_count(3)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.size_bits, 1024);
//! ```

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parameters::calculate_optimal_parameters;
use crate::error::FilterError;

/// Reference filter size in bits (m)
pub const DEFAULT_SIZE_BITS: usize = 264;

/// Reference number of probes per value (k)
pub const DEFAULT_HASH_COUNT: usize = 2;

/// Upper bound on k; more probes than this only burns CPU
pub const MAX_HASH_COUNT: usize = 32;

/// Upper bound on m (2^32 - 1 bits, just under 512 MiB)
pub const MAX_SIZE_BITS: usize = u32::MAX as usize;

/// Environment variable overriding `size_bits`
pub const ENV_SIZE_BITS: &str = "BLOOM_SIZE_BITS";

/// Environment variable overriding `hash_count`
pub const ENV_HASH_COUNT: &str = "BLOOM_HASH_COUNT";

/// Fixed shape of a membership filter
///
/// Both values are fixed for the lifetime of the filter built from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Size of the bit array (m)
    pub size_bits: usize,
    /// Number of probe indices per value (k)
    pub hash_count: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            size_bits: DEFAULT_SIZE_BITS,
            hash_count: DEFAULT_HASH_COUNT,
        }
    }
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(size_bits: usize, hash_count: usize) -> Result<Self, FilterError> {
        let config = Self {
            size_bits,
            hash_count,
        };
        config.validate()?;
        Ok(config)
    }

    /// Size a configuration for an expected number of values
    ///
    /// Sizing happens once, up front; the filter never resizes afterwards.
    pub fn for_capacity(expected_elements: usize, target_fpr: f64) -> Result<Self, FilterError> {
        if !(target_fpr > 0.0 && target_fpr < 1.0) {
            return Err(FilterError::InvalidParameters(format!(
                "target_fpr must be in (0, 1), got {}",
                target_fpr
            )));
        }
        let params = calculate_optimal_parameters(expected_elements, target_fpr);
        Self::new(params.size_bits, params.hash_count)
    }

    /// Load a configuration from the environment
    ///
    /// # Environment Variables
    ///
    /// - `BLOOM_SIZE_BITS`: filter size in bits (default: 264)
    /// - `BLOOM_HASH_COUNT`: probes per value (default: 2)
    pub fn from_env() -> Result<Self, FilterError> {
        let defaults = Self::default();
        let config = Self {
            size_bits: env_or(ENV_SIZE_BITS, defaults.size_bits)?,
            hash_count: env_or(ENV_HASH_COUNT, defaults.hash_count)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject shapes that cannot produce in-range probe indices
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.size_bits == 0 {
            return Err(FilterError::InvalidParameters(
                "size_bits cannot be 0".to_string(),
            ));
        }

        if self.size_bits > MAX_SIZE_BITS {
            return Err(FilterError::InvalidParameters(format!(
                "size_bits {} exceeds maximum {}",
                self.size_bits, MAX_SIZE_BITS
            )));
        }

        if self.hash_count == 0 {
            return Err(FilterError::InvalidParameters(
                "hash_count cannot be 0".to_string(),
            ));
        }

        if self.hash_count > MAX_HASH_COUNT {
            return Err(FilterError::InvalidParameters(format!(
                "hash_count {} exceeds maximum {}",
                self.hash_count, MAX_HASH_COUNT
            )));
        }

        Ok(())
    }
}

fn env_or<T: FromStr>(var: &str, default: T) -> Result<T, FilterError> {
    match env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|_| FilterError::InvalidEnv {
            var: var.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

/// Builder for FilterConfig with validation
#[derive(Default)]
pub struct FilterConfigBuilder {
    size_bits: Option<usize>,
    hash_count: Option<usize>,
}

impl FilterConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter size in bits
    pub fn size_bits(mut self, bits: usize) -> Self {
        self.size_bits = Some(bits);
        self
    }

    /// Set the number of probes per value
    pub fn hash_count(mut self, k: usize) -> Self {
        self.hash_count = Some(k);
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let defaults = FilterConfig::default();
        FilterConfig::new(
            self.size_bits.unwrap_or(defaults.size_bits),
            self.hash_count.unwrap_or(defaults.hash_count),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_reference_shape() {
        let config = FilterConfig::default();
        assert_eq!(config.size_bits, 264);
        assert_eq!(config.hash_count, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_size() {
        let result = FilterConfig::new(0, 2);
        assert!(matches!(result, Err(FilterError::InvalidParameters(_))));
    }

    #[test]
    fn test_rejects_oversized_bit_array() {
        let result = FilterConfig::new(usize::MAX, 2);
        assert!(matches!(result, Err(FilterError::InvalidParameters(_))));

        let result = FilterConfig::new(MAX_SIZE_BITS + 1, 2);
        assert!(matches!(result, Err(FilterError::InvalidParameters(_))));
    }

    #[test]
    fn test_rejects_zero_hash_count() {
        let result = FilterConfig::new(264, 0);
        assert!(matches!(result, Err(FilterError::InvalidParameters(_))));
    }

    #[test]
    fn test_rejects_excessive_hash_count() {
        let result = FilterConfig::new(264, MAX_HASH_COUNT + 1);
        assert!(matches!(result, Err(FilterError::InvalidParameters(_))));
    }

    #[test]
    fn test_for_capacity_sizes_filter() {
        let config = FilterConfig::for_capacity(100, 0.01).unwrap();
        assert!(config.size_bits >= 800);
        assert!(config.hash_count >= 5);
    }

    #[test]
    fn test_for_capacity_rejects_bad_fpr() {
        assert!(FilterConfig::for_capacity(100, 0.0).is_err());
        assert!(FilterConfig::for_capacity(100, 1.0).is_err());
        assert!(FilterConfig::for_capacity(100, f64::NAN).is_err());
    }

    #[test]
    fn test_builder_uses_defaults() {
        let config = FilterConfigBuilder::new().size_bits(512).build().unwrap();
        assert_eq!(config.size_bits, 512);
        assert_eq!(config.hash_count, DEFAULT_HASH_COUNT);
    }

    #[test]
    fn test_builder_rejects_invalid() {
        let result = FilterConfigBuilder::new().hash_count(0).build();
        assert!(matches!(result, Err(FilterError::InvalidParameters(_))));
    }

    #[test]
    fn test_env_or_falls_back_when_unset() {
        let value: usize = env_or("BLOOM_TEST_UNSET_VARIABLE_7f3a", 99).unwrap();
        assert_eq!(value, 99);
    }

    #[test]
    fn test_env_or_rejects_garbage() {
        env::set_var("BLOOM_TEST_GARBAGE_VARIABLE_7f3a", "lots");
        let result: Result<usize, _> = env_or("BLOOM_TEST_GARBAGE_VARIABLE_7f3a", 1);
        env::remove_var("BLOOM_TEST_GARBAGE_VARIABLE_7f3a");
        assert!(matches!(result, Err(FilterError::InvalidEnv { .. })));
    }

    #[test]
    fn test_config_serde_shape() {
        let json = serde_json::to_string(&FilterConfig::default()).unwrap();
        assert_eq!(json, r#"{"size_bits":264,"hash_count":2}"#);
    }
}
