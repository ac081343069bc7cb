//! Query parameters and the parameter merger.
//!
//! # Design
//! `Params` is an insertion-ordered name → value mapping. A value of `None`
//! is the "not set" sentinel: optional facade arguments the caller left empty
//! are inserted as `None` and removed by [`Params::without_nulls`] before the
//! request is built, so they never reach the wire. Keys are unique by
//! construction; inserting an existing key replaces its value in place.
//!
//! [`merge`] produces the outgoing mapping `{appid} ∪ fixed ∪ caller` and
//! refuses any caller key that the credential or the endpoint already owns.

use std::fmt;

use crate::error::QueryError;

/// Name of the query parameter carrying the caller's credential.
pub const CREDENTIAL_KEY: &str = "appid";

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Sent as one comma-joined value, never as repeated keys.
    List(Vec<String>),
}

impl ParamValue {
    /// The value as it appears in the query string, before percent-encoding.
    pub fn to_query_value(&self) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            ParamValue::Integer(n) => n.to_string(),
            ParamValue::Float(x) => x.to_string(),
            ParamValue::Boolean(b) => b.to_string(),
            ParamValue::List(items) => items.join(","),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_value())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Boolean(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Insertion-ordered query parameters, built fresh for every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Option<ParamValue>)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Params::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style [`Params::insert_opt`].
    pub fn with_opt<V: Into<ParamValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.insert_opt(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.set(key.into(), Some(value.into()));
    }

    /// Insert a possibly-unset value. `None` is kept as the null sentinel
    /// until [`Params::without_nulls`] runs.
    pub fn insert_opt<V: Into<ParamValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        self.set(key.into(), value.map(Into::into));
    }

    fn set(&mut self, key: String, value: Option<ParamValue>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value for `key`, or `None` when absent or set to the null sentinel.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        self.entries.remove(index).1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ParamValue>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// A copy of these parameters with every null-sentinel entry dropped.
    pub fn without_nulls(&self) -> Params {
        Params {
            entries: self
                .entries
                .iter()
                .filter(|(_, v)| v.is_some())
                .cloned()
                .collect(),
        }
    }

    /// Append `other` after `self`, failing on the first key present in both.
    pub fn merge_disjoint(mut self, other: &Params) -> Result<Params, QueryError> {
        for (key, value) in &other.entries {
            if self.contains_key(key) {
                return Err(QueryError::ParameterConflict(key.clone()));
            }
            self.entries.push((key.clone(), value.clone()));
        }
        Ok(self)
    }

    /// `(name, value)` pairs ready for query-string encoding. Null-sentinel
    /// entries are skipped.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.to_query_value())))
            .collect()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Combine the credential, an endpoint's fixed parameters and the caller's
/// parameters into one mapping.
///
/// Caller entries set to the null sentinel are dropped first. A caller key
/// equal to [`CREDENTIAL_KEY`] or to any fixed key is a
/// [`QueryError::ParameterConflict`].
pub fn merge(appid: &str, fixed: &[(&str, &str)], params: &Params) -> Result<Params, QueryError> {
    let mut merged = Params::new().with(CREDENTIAL_KEY, appid);
    for (key, value) in fixed {
        merged.insert(*key, *value);
    }
    merged.merge_disjoint(&params.without_nulls())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_existing_key_in_place() {
        let mut params = Params::new().with("i", "x").with("units", "metric");
        params.insert("i", "y");
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["i", "units"]);
        assert_eq!(params.get("i"), Some(&ParamValue::Text("y".to_string())));
    }

    #[test]
    fn without_nulls_drops_unset_entries_and_leaves_source_intact() {
        let params = Params::new()
            .with("i", "pi")
            .with_opt::<u32>("timeout", None)
            .with_opt("width", Some(300u32));
        let stripped = params.without_nulls();

        assert_eq!(stripped.keys().collect::<Vec<_>>(), vec!["i", "width"]);
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn merge_counts_credential_fixed_and_caller_params() {
        let params = Params::new().with("input", "pi").with("format", "plaintext");
        let merged = merge("APPID", &[("output", "json")], &params).unwrap();

        assert_eq!(merged.len(), params.len() + 1 + 1);
        assert_eq!(
            merged.keys().collect::<Vec<_>>(),
            vec!["appid", "output", "input", "format"]
        );
    }

    #[test]
    fn merge_rejects_caller_override_of_fixed_param() {
        let params = Params::new().with("input", "pi").with("output", "xml");
        let err = merge("APPID", &[("output", "json")], &params).unwrap_err();
        assert!(matches!(err, QueryError::ParameterConflict(ref k) if k == "output"));
    }

    #[test]
    fn merge_rejects_caller_credential() {
        let params = Params::new().with("appid", "someone-else");
        let err = merge("APPID", &[], &params).unwrap_err();
        assert!(matches!(err, QueryError::ParameterConflict(ref k) if k == "appid"));
    }

    #[test]
    fn merge_ignores_null_caller_params_even_when_they_shadow_fixed_keys() {
        let params = Params::new().with("i", "pi").with_opt::<String>("output", None);
        let merged = merge("APPID", &[("output", "json")], &params).unwrap();
        assert_eq!(merged.get("output"), Some(&ParamValue::Text("json".to_string())));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn list_values_are_comma_joined() {
        let value = ParamValue::from(vec!["plaintext", "image"]);
        assert_eq!(value.to_query_value(), "plaintext,image");
    }

    #[test]
    fn to_pairs_renders_scalar_values() {
        let params = Params::new()
            .with("fontsize", 14u32)
            .with("reinterpret", true)
            .with("latlong", 40.5);
        assert_eq!(
            params.to_pairs(),
            vec![
                ("fontsize".to_string(), "14".to_string()),
                ("reinterpret".to_string(), "true".to_string()),
                ("latlong".to_string(), "40.5".to_string()),
            ]
        );
    }

    #[test]
    fn collects_from_iterator() {
        let params: Params = [("s", "1"), ("conversationID", "abc")].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert!(params.contains_key("conversationID"));
    }
}
