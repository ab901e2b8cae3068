//! Response messages returned by the request handler
//!
//! Every response carries `ok` so a transport can forward it unchanged.

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Result of an insert request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertResponse {
    pub ok: bool,
    pub message: String,
}

/// Result of a lookup request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    pub ok: bool,
    /// Possibly present (`true`) or definitely absent (`false`)
    pub exists: bool,
    pub message: String,
}

/// Bit array rendered for transport
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpResponse {
    pub ok: bool,
    pub size_bits: usize,
    /// `'0'`/`'1'` per bit, bit 0 first
    pub bits: String,
}

/// Rejected request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub message: String,
}

impl From<&FilterError> for ErrorResponse {
    fn from(err: &FilterError) -> Self {
        Self {
            ok: false,
            message: err.to_string(),
        }
    }
}
