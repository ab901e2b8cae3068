//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - The membership filter and its lock discipline
//! - Hash-to-probe derivation
//! - Parameter calculations
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod config;
pub mod filter;
pub mod hash_functions;
pub mod parameters;

pub use config::{
    FilterConfig, FilterConfigBuilder, DEFAULT_HASH_COUNT, DEFAULT_SIZE_BITS, MAX_SIZE_BITS,
};
pub use filter::{FilterStats, MembershipFilter};
pub use hash_functions::compute_hash_positions;
pub use parameters::{calculate_fpr, calculate_optimal_parameters, FilterParams};
