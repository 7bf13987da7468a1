//! Values passed from scripts to the harness.
//!
//! Script-side data is dynamically typed, so every argument to `ok`/`message` is converted into a
//! [`Value`] first. Each variant has exactly one truthiness rule (see [`Value::is_truthy`]) and one
//! rendering rule (see [`crate::render`]).

use crate::host::{Buffer, BufferRef};
use std::sync::Arc;

type CallableFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A function reference handed to the harness.
///
/// The harness only ever renders callables; it never invokes them on its own.
#[derive(Clone)]
pub struct Callable {
    name: Option<String>,
    func: Arc<CallableFn>,
}

impl Callable {
    /// Create a named callable.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            func: Arc::new(func),
        }
    }

    /// Create an anonymous callable.
    pub fn anonymous<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: None,
            func: Arc::new(func),
        }
    }

    /// The function name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }
}

impl std::fmt::Debug for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callable").field("name", &self.name).finish()
    }
}

/// Callables compare by identity.
impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

/// A dynamically typed script value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value (a missing return, an out-of-range lookup).
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number (integers are represented exactly up to 2^53).
    Number(f64),
    /// String.
    String(String),
    /// Ordered list.
    List(Vec<Value>),
    /// Key/value pairs in insertion order.
    Mapping(Vec<(String, Value)>),
    /// Function reference.
    Callable(Callable),
    /// Reference to a host buffer.
    Buffer(BufferRef),
    /// A value of a kind the harness does not know, carrying its kind name.
    Opaque(String),
}

/// Mappings compare as key/value sets, ignoring entry order. Lists compare element-wise.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Mapping(a), Self::Mapping(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.iter().any(|(other_key, other_value)| {
                            key == other_key && value == other_value
                        })
                    })
            }
            (Self::Callable(a), Self::Callable(b)) => a == b,
            (Self::Buffer(a), Self::Buffer(b)) => a == b,
            (Self::Opaque(a), Self::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Build a mapping from key/value pairs, keeping their order.
    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a placeholder for an unrecognized value kind.
    pub fn opaque(kind: impl Into<String>) -> Self {
        Self::Opaque(kind.into())
    }

    /// Truthiness: `false`, `0`, `NaN`, `""`, null and undefined are falsy; everything else,
    /// including empty lists/mappings and every buffer reference, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::List(_)
            | Self::Mapping(_)
            | Self::Callable(_)
            | Self::Buffer(_)
            | Self::Opaque(_) => true,
        }
    }

    /// Short name of the value's kind.
    pub fn kind(&self) -> &str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Mapping(_) => "mapping",
            Self::Callable(_) => "function",
            Self::Buffer(_) => "buffer",
            Self::Opaque(kind) => kind.as_str(),
        }
    }

    /// Returns the number if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u32, u64, usize, f32, f64);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Callable> for Value {
    fn from(value: Callable) -> Self {
        Self::Callable(value)
    }
}

impl From<BufferRef> for Value {
    fn from(value: BufferRef) -> Self {
        Self::Buffer(value)
    }
}

impl From<Buffer<'_>> for Value {
    fn from(value: Buffer<'_>) -> Self {
        Self::Buffer(value.id())
    }
}

/// `None` becomes [`Value::Undefined`], matching a host lookup that found nothing.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undefined, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_set() {
        for v in [
            Value::Undefined,
            Value::Null,
            Value::from(false),
            Value::from(0),
            Value::from(-0.0),
            Value::from(f64::NAN),
            Value::from(""),
            Value::from(None::<i32>),
        ] {
            assert!(!v.is_truthy(), "{v:?} should be falsy");
        }
    }

    #[test]
    fn test_truthy_set() {
        let buf = BufferRef::new(1).unwrap();
        for v in [
            Value::from(true),
            Value::from(3),
            Value::from(-1),
            Value::from("0"),
            Value::List(Vec::new()),
            Value::Mapping(Vec::new()),
            Value::from(Callable::anonymous(|_| Value::Undefined)),
            Value::from(buf),
            Value::opaque("Symbol"),
        ] {
            assert!(v.is_truthy(), "{v:?} should be truthy");
        }
    }

    #[test]
    fn test_callable_identity() {
        let f = Callable::new("f", |_| Value::from(1));
        let g = Callable::new("f", |_| Value::from(1));
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
        assert_eq!(f.call(&[]), Value::from(1));
    }

    #[test]
    fn test_from_json_keeps_structure() {
        let v = Value::from(json!({ "a": 123, "b": [true, null] }));
        assert_eq!(
            v,
            Value::mapping([
                ("a", Value::from(123)),
                (
                    "b",
                    Value::List(vec![Value::from(true), Value::Null])
                ),
            ])
        );
    }

    #[test]
    fn test_mapping_equality_ignores_order() {
        let ab = Value::mapping([("a", 1), ("b", 2)]);
        let ba = Value::mapping([("b", 2), ("a", 1)]);
        assert_eq!(ab, ba);
        assert_ne!(ab, Value::mapping([("a", 1), ("b", 3)]));
        assert_ne!(ab, Value::mapping([("a", 1)]));
        assert_ne!(ab, Value::mapping([("a", 1), ("c", 2)]));
        assert_ne!(
            Value::List(vec![Value::from(1), Value::from(2)]),
            Value::List(vec![Value::from(2), Value::from(1)])
        );
    }
}
