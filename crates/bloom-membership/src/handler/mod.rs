//! Handler Layer
//!
//! Transport-agnostic request handling: input validation and the
//! user-facing wording of results. Any transport (shell, IPC, HTTP) sits
//! on top of this.

pub mod request_handler;
pub mod responses;

pub use request_handler::{normalize_value, MembershipHandler};
pub use responses::{DumpResponse, ErrorResponse, InsertResponse, LookupResponse};
