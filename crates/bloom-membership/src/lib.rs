//! # Bloom Membership
//!
//! Approximate set membership for string values: a fixed-size Bloom filter
//! answering "definitely not present" or "probably present".
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure filter logic, no I/O
//!   - `MembershipFilter`: bit array, probe derivation, lock discipline
//!   - `FilterConfig` / `FilterConfigBuilder`: fixed (m, k) shape
//!
//! - **Ports Layer** (`ports/`): `MembershipApi`, the driving port
//!
//! - **Handler Layer** (`handler/`): trims and validates raw input,
//!   phrases results for users
//!
//! - **Metrics** (`metrics`): counters behind the `MetricsRecorder` trait
//!
//! ## Probe derivation
//!
//! One SHA-256 digest per value. The first 8 bytes (big-endian) are `h1`,
//! the next 8 are `h2` (forced to 1 if zero), and probe `i` is
//! `(h1 + i * h2) mod m` for `i in 0..k`.
//!
//! ## Invariants
//!
//! - No false negatives: if inserted, `query()` returns true for the life of
//!   the filter
//! - Bits are never cleared; there is no delete
//! - `dump()` is a single atomic snapshot
//!
//! ## Usage Example
//!
//! ```
//! use std::sync::Arc;
//! use bloom_membership::{FilterConfig, MembershipFilter, MembershipHandler};
//!
//! let filter = Arc::new(MembershipFilter::new(FilterConfig::default()).unwrap());
//! filter.insert("alpha");
//! assert!(filter.query("alpha"));
//! assert_eq!(filter.dump().len(), 264);
//!
//! let handler = MembershipHandler::new(filter);
//! let response = handler.handle_lookup("  alpha ").unwrap();
//! assert_eq!(response.message, "\"alpha\" is probably in the set.");
//! ```

pub mod domain;
pub mod error;
pub mod handler;
pub mod metrics;
pub mod ports;

// Re-exports for convenience
pub use domain::{
    FilterConfig, FilterConfigBuilder, FilterStats, MembershipFilter, DEFAULT_HASH_COUNT,
    DEFAULT_SIZE_BITS, MAX_SIZE_BITS,
};
pub use error::FilterError;
pub use handler::{
    normalize_value, DumpResponse, ErrorResponse, InsertResponse, LookupResponse,
    MembershipHandler,
};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::MembershipApi;
