//! Request parameters and the `key/value/key/value` path decoder.
//!
//! A request may carry free-form parameters embedded in one path segment,
//! e.g. `/blog/post/show/params/id/42/page/2` where the host hands
//! `id/42/page/2` to the router under the reserved [`PARAMS_KEY`].

use std::collections::HashMap;

/// Reserved parameter holding the flattened `key/value/...` string.
pub const PARAMS_KEY: &str = "params";

/// Ordered key/value pairs with unique keys.
pub type KeyValuePairs = Vec<(String, String)>;

/// Decode `k1/v1/k2/v2/...` into ordered pairs.
///
/// Tokens at odd 1-based positions are keys, even positions are values. A
/// trailing key without a value maps to an empty string. A repeated key
/// keeps its first position and takes the last value.
///
/// ```
/// use drone_mvc::params::parse_key_value_pairs;
///
/// let pairs = parse_key_value_pairs("cat/shoes/page/2");
/// assert_eq!(pairs, vec![
///     ("cat".to_string(), "shoes".to_string()),
///     ("page".to_string(), "2".to_string()),
/// ]);
/// assert_eq!(parse_key_value_pairs("cat"), vec![("cat".to_string(), String::new())]);
/// assert!(parse_key_value_pairs("").is_empty());
/// ```
pub fn parse_key_value_pairs(unparsed: &str) -> KeyValuePairs {
    if unparsed.is_empty() {
        return Vec::new();
    }

    let mut tokens = unparsed.split('/');
    let mut pairs: KeyValuePairs = Vec::new();
    // key -> position in `pairs`
    let mut index: HashMap<&str, usize> = HashMap::new();

    while let Some(key) = tokens.next() {
        let value = tokens.next().unwrap_or("");
        match index.get(key) {
            Some(&position) => pairs[position].1 = value.to_string(),
            None => {
                index.insert(key, pairs.len());
                pairs.push((key.to_string(), value.to_string()));
            }
        }
    }

    pairs
}

/// The inbound request parameter set (conventionally the query string).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    values: HashMap<String, String>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw `a=1&b=2` query string. Keys without `=` get an empty value.
    pub fn from_query(query: &str) -> Self {
        let values = query
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (key, value) = part.split_once('=').unwrap_or((part, ""));
                (key.to_string(), value.to_string())
            })
            .collect();
        Self { values }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Expand the reserved `params` entry into regular parameters.
    ///
    /// The reserved entry is removed and the decoded pairs are merged in,
    /// overwriting existing keys. Returns the decoded pairs; empty when the
    /// reserved entry is absent.
    pub fn expand_path_params(&mut self) -> KeyValuePairs {
        let Some(unparsed) = self.values.remove(PARAMS_KEY) else {
            return Vec::new();
        };

        let pairs = parse_key_value_pairs(&unparsed);
        self.values.extend(pairs.iter().cloned());
        pairs
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
