//! Identifier newtypes.
//!
//! Ids are allocated by [`crate::hash`]-adjacent counters in the engine
//! crate and are never reused within a process lifetime; `0` is reserved as
//! an invalid sentinel so a default-constructed id is never mistaken for a
//! live one.

use std::fmt;

/// A node identifier. Strictly increasing, unique for the lifetime of the
/// process, never `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct NodeId(u64);

/// An edge identifier. Strictly increasing, unique for the lifetime of the
/// process, never `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct EdgeId(u64);

/// The monotonic mutation version counter (§3 invariant 6). Bumped by every
/// successful mutation; used by the query cache to detect staleness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Version(u64);

macro_rules! id_type {
    ($name:ident) => {
        impl $name {
            /// Wraps a raw `u64`. Only the `IdAllocator` should call this
            /// with anything other than a value it has itself produced.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw `u64` value.
            #[must_use]
            pub const fn raw(self) -> u64 {
                self.0
            }

            /// Returns `false` for the reserved `0` sentinel.
            #[must_use]
            pub const fn is_valid(self) -> bool {
                self.0 != 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(NodeId);
id_type!(EdgeId);

impl Version {
    /// Wraps a raw counter value. Only [`crate`]'s mutation-serializing
    /// writer should call this with anything other than a value it has
    /// itself produced.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The initial version, before any mutation has occurred.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns the next version in sequence.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
