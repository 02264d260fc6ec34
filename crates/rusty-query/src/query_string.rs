// File: src/query_string.rs
// Purpose: URL query-string table usable as both lookup and writer

use crate::config::{DuplicateKeys, QueryConfig};
use crate::encode::create_query;
use crate::error::QueryError;
use crate::store::{QueryLookup, QueryWriter};
use crate::value::Reflect;
use std::borrow::Cow;
use std::fmt;

/// Ordered `key=value` pairs parsed from, or rendered to, a URL query string.
///
/// ```
/// use rusty_query::QueryString;
///
/// let query = QueryString::parse("?w=10&provider=open+street%20map");
/// assert_eq!(query.get("w"), Some("10"));
/// assert_eq!(query.get("provider"), Some("open street map"));
/// assert_eq!(query.to_string(), "w=10&provider=open%20street%20map");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
    duplicates: DuplicateKeys,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse with the default [`QueryConfig`]
    pub fn parse(raw: &str) -> Self {
        Self::parse_with(raw, &QueryConfig::default())
    }

    /// Parse a raw query string (with or without the leading `?`)
    pub fn parse_with(raw: &str, config: &QueryConfig) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);

        let pairs = raw
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                let key = decode_component(key, config.plus_as_space);
                let value = decode_component(value, config.plus_as_space);
                let value = if config.trim_values {
                    value.trim().to_string()
                } else {
                    value
                };
                (key, value)
            })
            .collect();

        Self {
            pairs,
            duplicates: config.duplicate_keys,
        }
    }

    /// Encode a record's non-default tagged fields into a new query string
    pub fn from_record(params: &dyn Reflect) -> Result<Self, QueryError> {
        let mut query = Self::new();
        create_query(params, &mut query)?;
        Ok(query)
    }

    /// Value for `key` under the configured duplicate-key policy
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut matches = self
            .pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str());
        match self.duplicates {
            DuplicateKeys::First => matches.next(),
            DuplicateKeys::Last => matches.last(),
        }
    }

    /// Every value recorded for `key`, in order
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn decode_component(raw: &str, plus_as_space: bool) -> String {
    let raw: Cow<'_, str> = if plus_as_space && raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };

    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            let bytes = urlencoding::decode_binary(raw.as_bytes());
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}

impl QueryLookup for QueryString {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(Cow::Borrowed)
    }
}

impl QueryWriter for QueryString {
    fn write(&mut self, key: &str, value: &str) {
        self.push(key, value);
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, value)) in self.pairs.iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(
                f,
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryString
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            duplicates: DuplicateKeys::default(),
        }
    }
}
