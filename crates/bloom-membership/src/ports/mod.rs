//! Ports Layer
//!
//! Defines the driving port collaborators use to reach the filter.

pub mod inbound;

pub use inbound::MembershipApi;
