//! Request handler for membership operations
//!
//! Validates raw input before it reaches the filter:
//! - Surrounding whitespace is trimmed
//! - Empty values are rejected with [`FilterError::EmptyValue`]
//!
//! The filter itself accepts any string; these rules belong to the boundary.

use std::sync::Arc;

use tracing::debug;

use super::responses::{DumpResponse, InsertResponse, LookupResponse};
use crate::error::FilterError;
use crate::ports::MembershipApi;

/// Trim a raw value and reject it if nothing is left
pub fn normalize_value(raw: &str) -> Result<&str, FilterError> {
    match raw.trim() {
        "" => Err(FilterError::EmptyValue),
        value => Ok(value),
    }
}

/// Boundary handler holding one long-lived filter handle
pub struct MembershipHandler<A: MembershipApi + ?Sized> {
    api: Arc<A>,
}

impl<A: MembershipApi + ?Sized> Clone for MembershipHandler<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: MembershipApi + ?Sized> MembershipHandler<A> {
    /// Create a handler over a shared filter
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// The filter this handler drives
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Validate and insert a value
    pub fn handle_insert(&self, raw: &str) -> Result<InsertResponse, FilterError> {
        let value = normalize_value(raw)?;
        self.api.insert(value);
        debug!(value, "Insert handled");

        Ok(InsertResponse {
            ok: true,
            message: format!("\"{}\" inserted.", value),
        })
    }

    /// Validate and look up a value
    pub fn handle_lookup(&self, raw: &str) -> Result<LookupResponse, FilterError> {
        let value = normalize_value(raw)?;
        let exists = self.api.query(value);
        debug!(value, exists, "Lookup handled");

        let message = if exists {
            format!("\"{}\" is probably in the set.", value)
        } else {
            format!("\"{}\" is definitely not in the set.", value)
        };

        Ok(LookupResponse {
            ok: true,
            exists,
            message,
        })
    }

    /// Render the bit array, bit 0 as the first character
    pub fn handle_dump(&self) -> DumpResponse {
        let bits = self.api.dump_string();

        DumpResponse {
            ok: true,
            size_bits: bits.len(),
            bits,
        }
    }
}
