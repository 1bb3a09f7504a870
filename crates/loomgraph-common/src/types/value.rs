//! Property values and the interned strings used as keys/labels.

use crate::hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Maximum length, in bytes, of a [`PropertyKey`] (§3).
pub const MAX_PROPERTY_KEY_LEN: usize = 64;

/// Maximum length, in bytes, of a string [`PropertyValue`] (§3).
pub const MAX_PROPERTY_STRING_LEN: usize = 64 * 1024;

/// Maximum length, in bytes, of an edge [`Label`] (§3).
pub const MAX_LABEL_LEN: usize = 256;

/// A short, interned property key (`Arc<str>` underneath, so clones are
/// cheap once a key has been seen once).
#[derive(Debug, Clone, Eq, serde::Serialize, serde::Deserialize)]
pub struct PropertyKey(Arc<str>);

/// An edge label (`Arc<str>` underneath, same interning rationale as
/// [`PropertyKey`]).
#[derive(Debug, Clone, Eq, serde::Serialize, serde::Deserialize)]
pub struct Label(Arc<str>);

macro_rules! interned_string {
    ($name:ident) => {
        impl $name {
            /// Wraps an owned string without validating its length. Prefer
            /// going through the validator at the API boundary; this
            /// constructor exists for tests and for code that has already
            /// validated its input.
            #[must_use]
            pub fn new(s: impl Into<Arc<str>>) -> Self {
                Self(s.into())
            }

            /// Returns the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(Arc::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(Arc::from(s))
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

interned_string!(PropertyKey);
interned_string!(Label);

/// A scalar property value. This is the information-preserving substitute
/// for the source system's dynamic typing (§9): exactly the four kinds the
/// data model allows, nothing more.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum PropertyValue {
    /// A signed 64-bit integer.
    Int(i64),
    /// A 64-bit floating point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// A UTF-8 string, at most [`MAX_PROPERTY_STRING_LEN`] bytes.
    String(Arc<str>),
}

impl PropertyValue {
    /// Returns the value as an `i64`, or `None` if it isn't one.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an `f64`, or `None` if it isn't one.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a `bool`, or `None` if it isn't one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a `&str`, or `None` if it isn't one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a human-readable name for this value's type, used in error
    /// messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
        }
    }

    /// Returns the length of the value in bytes, for size validation. Only
    /// strings can exceed the per-value size cap.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        match self {
            Self::Int(_) => std::mem::size_of::<i64>(),
            Self::Float(_) => std::mem::size_of::<f64>(),
            Self::Bool(_) => std::mem::size_of::<bool>(),
            Self::String(s) => s.len(),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::String(Arc::from(v))
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::String(Arc::from(v))
    }
}

/// Property values are used as secondary-index keys (§3,
/// `PropertyIndexKey`), so they need `Eq`/`Hash`. Floats compare by bit
/// pattern rather than IEEE-754 equality: this makes `NaN` hashable and
/// consistent with itself as an index key, at the cost of `0.0 != -0.0` in
/// the index. That's the right tradeoff for an index key (exact bucket
/// identity) even though it would be the wrong one for arithmetic.
impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PropertyValue {}

impl std::hash::Hash for PropertyValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Int(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Bool(v) => v.hash(state),
            Self::String(v) => v.hash(state),
        }
    }
}

/// A node or edge's full set of properties. Keys are unique; insertion
/// order is not part of the contract.
pub type PropertyMap = FxHashMap<PropertyKey, PropertyValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_key_interns_and_compares_by_value() {
        let a = PropertyKey::from("name");
        let b = PropertyKey::from("name".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn float_equality_is_bitwise() {
        let a = PropertyValue::from(0.0_f64);
        let b = PropertyValue::from(-0.0_f64);
        assert_ne!(a, b, "index keys use bit-pattern equality");

        let nan_a = PropertyValue::from(f64::NAN);
        let nan_b = PropertyValue::from(f64::NAN);
        assert_eq!(nan_a, nan_b, "NaN must be a stable, hashable index key");
    }

    #[test]
    fn conversions_roundtrip() {
        assert_eq!(PropertyValue::from(42i64).as_int(), Some(42));
        assert_eq!(PropertyValue::from(true).as_bool(), Some(true));
        assert_eq!(PropertyValue::from("hi").as_str(), Some("hi"));
    }
}
