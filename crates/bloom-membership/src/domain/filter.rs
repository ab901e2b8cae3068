//! Core membership filter
//!
//! INVARIANTS:
//! - No false negatives: once `insert(v)` returns, `query(v)` is true forever
//! - Bits are only ever set, never cleared
//! - Every probe index lies in `[0, m)`
//!
//! All operations run under one re-entrant lock, so a thread already
//! holding it (see [`MembershipFilter::with_lock`]) may call back into the
//! filter.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use bitvec::prelude::*;
use parking_lot::ReentrantMutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::config::FilterConfig;
use super::hash_functions::{base_hashes, digest, probes, BaseHashes};
use super::parameters::calculate_fpr;
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};

/// Mutable part of the filter, only reachable through the lock
struct FilterState {
    bits: BitVec<u8, Lsb0>,
    inserts: u64,
}

/// Fixed-size Bloom filter over string values
///
/// False positives are possible, false negatives are not. The filter is
/// meant to be built once and shared (e.g. behind an `Arc`) by every caller.
pub struct MembershipFilter {
    state: ReentrantMutex<RefCell<FilterState>>,
    /// Size in bits (m)
    m: usize,
    /// Probes per value (k)
    k: usize,
    metrics: Arc<dyn MetricsRecorder>,
}

/// Atomic view of the filter's load
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterStats {
    pub size_bits: usize,
    pub hash_count: usize,
    pub bits_set: usize,
    /// Number of insert calls, repeats included
    pub inserts: u64,
    /// Fraction of bits set (load factor)
    pub fill_ratio: f64,
    /// fill_ratio^k, from the bits actually set
    pub estimated_fpr: f64,
    /// (1 - e^(-k*inserts/m))^k
    pub theoretical_fpr: f64,
}

impl MembershipFilter {
    /// Create a filter with the given shape
    ///
    /// Fails if the configuration could not produce in-range probes.
    pub fn new(config: FilterConfig) -> Result<Self, FilterError> {
        Self::with_metrics(config, Arc::new(NoOpMetrics))
    }

    /// Create a filter that reports to a metrics recorder
    pub fn with_metrics(
        config: FilterConfig,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self::from_parts(config, metrics))
    }

    fn from_parts(config: FilterConfig, metrics: Arc<dyn MetricsRecorder>) -> Self {
        let FilterConfig {
            size_bits,
            hash_count,
        } = config;

        metrics.record_filter_created(size_bits, hash_count);
        info!(size_bits, hash_count, "Membership filter created");

        Self {
            state: ReentrantMutex::new(RefCell::new(FilterState {
                bits: bitvec![u8, Lsb0; 0; size_bits],
                inserts: 0,
            })),
            m: size_bits,
            k: hash_count,
            metrics,
        }
    }

    /// Set the probe bits for `value`
    ///
    /// Idempotent, and infallible for every string including `""`.
    pub fn insert(&self, value: &str) {
        let start = Instant::now();
        let hashes = self.derive(value);

        {
            let guard = self.state.lock();
            let mut state = guard.borrow_mut();
            for index in probes(hashes, self.k, self.m) {
                set_bit(&mut state.bits, index);
            }
            state.inserts += 1;
        }

        self.metrics.record_insert(start.elapsed());
    }

    /// Test whether `value` might have been inserted
    ///
    /// - `true`: possibly inserted (could be a false positive)
    /// - `false`: definitely never inserted
    pub fn query(&self, value: &str) -> bool {
        let start = Instant::now();
        let hashes = self.derive(value);

        let found = {
            let guard = self.state.lock();
            let state = guard.borrow();
            probes(hashes, self.k, self.m).all(|index| get_bit(&state.bits, index))
        };

        self.metrics.record_query(start.elapsed(), found);
        found
    }

    /// Snapshot of the whole bit array, bit 0 first
    pub fn dump(&self) -> Vec<bool> {
        let bits: Vec<bool> = {
            let guard = self.state.lock();
            let state = guard.borrow();
            state.bits.iter().by_vals().collect()
        };

        self.metrics.record_dump();
        debug!(size_bits = bits.len(), "Filter dumped");
        bits
    }

    /// Run `f` while holding the filter lock
    ///
    /// Calls made on the filter from inside `f` re-enter the lock, so the
    /// whole closure is linearizable against other threads.
    pub fn with_lock<R>(&self, f: impl FnOnce(&Self) -> R) -> R {
        let _guard = self.state.lock();
        f(self)
    }

    /// Insert `value` unless it already tests present
    ///
    /// Returns the pre-insert answer of `query`.
    pub fn check_and_insert(&self, value: &str) -> bool {
        self.with_lock(|filter| {
            let present = filter.query(value);
            if !present {
                filter.insert(value);
            }
            present
        })
    }

    /// Current load figures, taken under the lock
    pub fn stats(&self) -> FilterStats {
        let guard = self.state.lock();
        let state = guard.borrow();

        let bits_set = state.bits.count_ones();
        let fill_ratio = bits_set as f64 / self.m as f64;

        FilterStats {
            size_bits: self.m,
            hash_count: self.k,
            bits_set,
            inserts: state.inserts,
            fill_ratio,
            estimated_fpr: fill_ratio.powi(self.k as i32),
            theoretical_fpr: calculate_fpr(self.m, state.inserts as usize, self.k),
        }
    }

    /// Probe indices for `value`, in probe order
    pub fn probe_indices(&self, value: &str) -> Vec<usize> {
        probes(self.derive(value), self.k, self.m).collect()
    }

    /// Get the filter size in bits
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Get the number of probes per value
    pub fn hash_count(&self) -> usize {
        self.k
    }

    fn derive(&self, value: &str) -> BaseHashes {
        let digest = digest(value);
        let hashes = base_hashes(&digest);
        trace!(
            digest = %hex::encode(&digest[..16]),
            h1 = hashes.h1,
            h2 = hashes.h2,
            "Derived base hashes"
        );
        hashes
    }
}

impl Default for MembershipFilter {
    fn default() -> Self {
        Self::from_parts(FilterConfig::default(), Arc::new(NoOpMetrics))
    }
}

impl fmt::Debug for MembershipFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MembershipFilter")
            .field("size_bits", &self.m)
            .field("hash_count", &self.k)
            .finish_non_exhaustive()
    }
}

fn set_bit(bits: &mut BitSlice<u8, Lsb0>, index: usize) {
    assert!(
        index < bits.len(),
        "probe index {} out of range for {} bits",
        index,
        bits.len()
    );
    bits.set(index, true);
}

fn get_bit(bits: &BitSlice<u8, Lsb0>, index: usize) -> bool {
    assert!(
        index < bits.len(),
        "probe index {} out of range for {} bits",
        index,
        bits.len()
    );
    bits[index]
}
