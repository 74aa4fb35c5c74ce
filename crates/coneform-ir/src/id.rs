//! Leaf identities and the allocator that issues them.
//!
//! Every leaf carries a [`LeafId`] assigned once at construction. Identities
//! are the only equality and hashing key for leaves: two leaves with the same
//! shape and value but different identities are distinct graph nodes, and the
//! downstream reduction pass keys its node table on them. Ids are strictly
//! increasing and never reused, which gives a total order for deterministic
//! traversal and caching.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Unique identity of a leaf within the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LeafId(u64);

impl LeafId {
    /// Raw counter value, for use as an external cache key.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues strictly increasing leaf identities.
///
/// The default constructors of [`Parameter`](crate::Parameter),
/// [`Variable`](crate::Variable) and [`Constant`](crate::Constant) draw from
/// the process-wide allocator behind [`fresh_id`]. Tests that need
/// reproducible absolute ids can instantiate their own allocator; ids from
/// different allocators must never be mixed in one expression graph.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub const fn new() -> Self {
        IdAllocator {
            next: AtomicU64::new(0),
        }
    }

    /// Issue the next identity. Never returns the same id twice.
    pub fn next_id(&self) -> LeafId {
        LeafId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: IdAllocator = IdAllocator::new();

/// Issue a fresh identity from the process-wide allocator.
pub fn fresh_id() -> LeafId {
    GLOBAL.next_id()
}
