//! Data sources supply the values of the fields referenced by an expression.
//!
//! Every value is handed to the substitution stage as text. Map implementations coerce their
//! values with [`Display`], so a `HashMap<&str, i32>` works just as well as a record of strings.
//!
//! ```rust
//! use std::collections::{BTreeMap, HashMap};
//!
//! use branching_logic::{DataSource, FieldRef};
//!
//! let record = HashMap::from([("age", "20")]);
//! assert_eq!(record.value_for("age"), Some("20".to_string()));
//!
//! let scores = BTreeMap::from([("score", 7)]);
//! assert_eq!(scores.value_for_field(&FieldRef::new("score").with_event("visit_1")), Some("7".to_string()));
//! ```

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::Arc;

use crate::field::FieldRef;

/// Key to text-value lookup consulted once per comparison.
pub trait DataSource {
    /// Return the value of the named field as text, or `None` if the field is unknown.
    fn value_for(&self, name: &str) -> Option<String>;

    /// Return the value referenced by a field reference.
    ///
    /// The event and checkbox qualifiers are not part of the key unless an implementation
    /// overrides this method.
    fn value_for_field(&self, field: &FieldRef) -> Option<String> {
        self.value_for(field.name())
    }
}

impl<T> DataSource for &T
where
    T: DataSource + ?Sized,
{
    fn value_for(&self, name: &str) -> Option<String> {
        (**self).value_for(name)
    }

    fn value_for_field(&self, field: &FieldRef) -> Option<String> {
        (**self).value_for_field(field)
    }
}

impl<T> DataSource for Box<T>
where
    T: DataSource + ?Sized,
{
    fn value_for(&self, name: &str) -> Option<String> {
        (**self).value_for(name)
    }

    fn value_for_field(&self, field: &FieldRef) -> Option<String> {
        (**self).value_for_field(field)
    }
}

impl<T> DataSource for Rc<T>
where
    T: DataSource + ?Sized,
{
    fn value_for(&self, name: &str) -> Option<String> {
        (**self).value_for(name)
    }

    fn value_for_field(&self, field: &FieldRef) -> Option<String> {
        (**self).value_for_field(field)
    }
}

impl<T> DataSource for Arc<T>
where
    T: DataSource + ?Sized,
{
    fn value_for(&self, name: &str) -> Option<String> {
        (**self).value_for(name)
    }

    fn value_for_field(&self, field: &FieldRef) -> Option<String> {
        (**self).value_for_field(field)
    }
}

impl<K, V, S> DataSource for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: Display,
    S: BuildHasher,
{
    fn value_for(&self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }
}

impl<K, V> DataSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: Display,
{
    fn value_for(&self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }
}

#[cfg(feature = "json")]
mod json {
    use serde_json::{Map, Value};

    use super::DataSource;

    fn value_text(value: &Value) -> String {
        match value {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// A JSON object, such as one record of a REDCap export.
    impl DataSource for Map<String, Value> {
        fn value_for(&self, name: &str) -> Option<String> {
            self.get(name).map(value_text)
        }
    }

    /// Only objects hold fields; any other JSON value resolves nothing.
    impl DataSource for Value {
        fn value_for(&self, name: &str) -> Option<String> {
            self.as_object().and_then(|record| record.value_for(name))
        }
    }

}
