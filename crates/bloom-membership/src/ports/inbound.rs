//! Inbound Ports (Driving Ports)
//!
//! The three calls collaborators make on a membership filter.

use crate::domain::MembershipFilter;

/// Primary membership API (Driving Port)
///
/// Implementations must be safe to call from many threads at once and
/// must never report a false negative.
pub trait MembershipApi: Send + Sync {
    /// Record `value` as a member
    fn insert(&self, value: &str);

    /// `true` if `value` is possibly a member, `false` if it definitely is not
    fn query(&self, value: &str) -> bool;

    /// Atomic snapshot of the bit array, bit 0 first
    fn dump(&self) -> Vec<bool>;

    /// The dump rendered as `'0'`/`'1'`, bit 0 first
    fn dump_string(&self) -> String {
        self.dump()
            .into_iter()
            .map(|bit| if bit { '1' } else { '0' })
            .collect()
    }
}

impl MembershipApi for MembershipFilter {
    fn insert(&self, value: &str) {
        MembershipFilter::insert(self, value);
    }

    fn query(&self, value: &str) -> bool {
        MembershipFilter::query(self, value)
    }

    fn dump(&self) -> Vec<bool> {
        MembershipFilter::dump(self)
    }
}
