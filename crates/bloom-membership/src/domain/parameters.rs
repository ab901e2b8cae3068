//! Bloom filter parameter calculation
//!
//! Formulas:
//! - FPR = (1 - e^(-kn/m))^k
//! - m = -n*ln(fpr) / (ln(2)^2)  -- optimal bits
//! - k = (m/n) * ln(2)           -- optimal hash functions

use std::f64::consts::LN_2;

use super::config::MAX_HASH_COUNT;

/// Filter sizing derived from an expected load
#[derive(Clone, Debug, PartialEq)]
pub struct FilterParams {
    /// Number of bits in the filter
    pub size_bits: usize,
    /// Number of probes per value
    pub hash_count: usize,
    /// Expected false positive rate with these parameters
    pub expected_fpr: f64,
}

/// Calculate optimal parameters for an expected number of values
///
/// # Arguments
/// * `num_elements` - Expected number of values to insert (n)
/// * `target_fpr` - Target false positive rate
pub fn calculate_optimal_parameters(num_elements: usize, target_fpr: f64) -> FilterParams {
    if num_elements == 0 {
        return FilterParams {
            size_bits: 1,
            hash_count: 1,
            expected_fpr: 1.0,
        };
    }

    let n = num_elements as f64;
    let m = (-n * target_fpr.ln() / (LN_2 * LN_2)).ceil().max(1.0) as usize;
    let k = ((m as f64 / n) * LN_2).round() as usize;
    let k = k.clamp(1, MAX_HASH_COUNT);

    FilterParams {
        size_bits: m,
        hash_count: k,
        expected_fpr: calculate_fpr(m, num_elements, k),
    }
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_configuration_fpr() {
        // m=264, k=2, n=50 → ≈0.0994
        let fpr = calculate_fpr(264, 50, 2);
        assert!((fpr - 0.0994).abs() < 0.001, "Expected FPR≈0.0994, got {}", fpr);
    }

    #[test]
    fn test_empty_filter_has_zero_fpr() {
        assert_eq!(calculate_fpr(264, 0, 2), 0.0);
    }

    #[test]
    fn test_zero_bits_is_always_positive() {
        assert_eq!(calculate_fpr(0, 10, 2), 1.0);
    }

    #[test]
    fn test_optimal_parameters_n100_fpr001() {
        // For n=100, FPR=0.01 → expect k≈7, m≈959
        let params = calculate_optimal_parameters(100, 0.01);

        assert!(
            (5..=9).contains(&params.hash_count),
            "Expected k≈7, got k={}",
            params.hash_count
        );
        assert!(
            (800..=1200).contains(&params.size_bits),
            "Expected m≈959, got m={}",
            params.size_bits
        );
        assert!(params.expected_fpr <= 0.011);
    }

    #[test]
    fn test_zero_elements() {
        let params = calculate_optimal_parameters(0, 0.01);
        assert_eq!(params.size_bits, 1);
        assert_eq!(params.hash_count, 1);
    }

    #[test]
    fn test_k_clamped_to_reasonable_range() {
        let params = calculate_optimal_parameters(10, 0.000_000_1);
        assert!(params.hash_count <= MAX_HASH_COUNT);
        assert!(params.hash_count >= 1);
    }

    #[test]
    fn test_lower_fpr_needs_more_bits() {
        let loose = calculate_optimal_parameters(100, 0.1);
        let tight = calculate_optimal_parameters(100, 0.01);
        assert!(tight.size_bits > loose.size_bits);
    }
}
