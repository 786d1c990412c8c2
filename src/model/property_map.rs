//! PropertyMap — the ordered key-value store on parsed entities.

use indexmap::IndexMap;

use super::Value;

/// An insertion-ordered map of property names to values.
///
/// Order matters: properties are reported and formatted in the order they
/// appear in the query text (or the parameter payload), so a plain hash map
/// would scramble output between runs.
pub type PropertyMap = IndexMap<String, Value>;

/// Convert iterator of (key, value) pairs into a Map value.
impl<K, V> From<Vec<(K, V)>> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        Value::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
