//! Fast, non-cryptographic hash map/set aliases.
//!
//! The store and indices are keyed overwhelmingly by small integer ids and
//! short interned strings, so we trade `std::collections::HashMap`'s
//! DoS-resistant hasher for `ahash`'s much faster one, and its table for
//! `hashbrown`'s (what `std` is built on, without the SipHash default
//! hard-wired in). None of this state is ever exposed to untrusted input
//! directly (ids are allocated internally, property keys and labels are
//! validated and size-capped before they ever reach a map), so the usual
//! SipHash rationale doesn't apply here.

use hashbrown::{HashMap, HashSet};

/// A [`HashMap`] using `hashbrown`'s table with `ahash`'s `RandomState`
/// instead of the default SipHash.
pub type FxHashMap<K, V> = HashMap<K, V, ahash::RandomState>;

/// A [`HashSet`] using `hashbrown`'s table with `ahash`'s `RandomState`
/// instead of the default SipHash.
pub type FxHashSet<T> = HashSet<T, ahash::RandomState>;
