//! Keyed coder contract
//!
//! Records are written to and read from a caller-supplied coder through the
//! [`Encoder`] and [`Decoder`] traits. [`KeyedArchive`] is the in-memory coder
//! the storage layer hands in; its binary form is what ends up on disk.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ArchiveValue {
    Int(i64),
    Text(String),
    Urls(Vec<String>),
}

pub trait Encoder {
    fn encode_int(&mut self, key: &str, value: i64);
    fn encode_urls(&mut self, key: &str, urls: &[Url]);
}

pub trait Decoder {
    /// Integer stored under `key`, 0 when missing or unreadable
    fn decode_as_int(&self, key: &str) -> i64;

    /// Unsigned value stored through its `i64` bit pattern
    fn decode_as_u64(&self, key: &str) -> u64 {
        self.decode_as_int(key) as u64
    }

    /// `None` when the key is missing or does not hold a valid address list
    fn decode_urls(&self, key: &str) -> Option<Vec<Url>>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyedArchive {
    values: BTreeMap<String, ArchiveValue>,
}

impl KeyedArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ArchiveValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ArchiveValue> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl Encoder for KeyedArchive {
    fn encode_int(&mut self, key: &str, value: i64) {
        self.insert(key, ArchiveValue::Int(value));
    }

    fn encode_urls(&mut self, key: &str, urls: &[Url]) {
        let urls = urls.iter().map(|url| url.as_str().to_string()).collect();
        self.insert(key, ArchiveValue::Urls(urls));
    }
}

impl Decoder for KeyedArchive {
    fn decode_as_int(&self, key: &str) -> i64 {
        match self.values.get(key) {
            Some(ArchiveValue::Int(value)) => *value,
            Some(ArchiveValue::Text(text)) => text.trim().parse().unwrap_or_else(|_| {
                tracing::debug!(key, value = %text, "Archived text is not an integer");
                0
            }),
            Some(ArchiveValue::Urls(_)) => {
                tracing::debug!(key, "Archived value is not an integer");
                0
            }
            None => 0,
        }
    }

    fn decode_as_u64(&self, key: &str) -> u64 {
        match self.values.get(key) {
            Some(ArchiveValue::Text(text)) => match text.trim().parse::<u64>() {
                Ok(value) => value,
                Err(_) => self.decode_as_int(key) as u64,
            },
            _ => self.decode_as_int(key) as u64,
        }
    }

    fn decode_urls(&self, key: &str) -> Option<Vec<Url>> {
        let Some(ArchiveValue::Urls(urls)) = self.values.get(key) else {
            return None;
        };

        // One unreadable entry invalidates the whole list
        let parsed: std::result::Result<Vec<Url>, _> =
            urls.iter().map(|url| Url::parse(url)).collect();
        match parsed {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(key, error = %e, "Archived url list is malformed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_values() {
        let mut archive = KeyedArchive::new();
        archive.encode_int("page", -2);
        archive.insert("text", ArchiveValue::Text("42".to_string()));
        archive.insert("junk", ArchiveValue::Text("forty-two".to_string()));

        assert_eq!(archive.decode_as_int("page"), -2);
        assert_eq!(archive.decode_as_int("text"), 42);
        assert_eq!(archive.decode_as_int("junk"), 0);
        assert_eq!(archive.decode_as_int("missing"), 0);
    }

    #[test]
    fn test_u64_through_i64_bits() {
        let mut archive = KeyedArchive::new();
        archive.encode_int("time", u64::MAX as i64);
        assert_eq!(archive.decode_as_u64("time"), u64::MAX);

        archive.insert("text", ArchiveValue::Text(u64::MAX.to_string()));
        assert_eq!(archive.decode_as_u64("text"), u64::MAX);
    }

    #[test]
    fn test_url_values() {
        let urls = vec![
            Url::parse("https://example.com/").unwrap(),
            Url::parse("internal://local/session-restore?url=https://example.com/").unwrap(),
        ];

        let mut archive = KeyedArchive::new();
        archive.encode_urls("urls", &urls);
        assert_eq!(archive.decode_urls("urls"), Some(urls));

        archive.insert(
            "broken",
            ArchiveValue::Urls(vec!["https://example.com/".to_string(), "nope".to_string()]),
        );
        assert_eq!(archive.decode_urls("broken"), None);

        archive.encode_int("number", 1);
        assert_eq!(archive.decode_urls("number"), None);
        assert_eq!(archive.decode_urls("missing"), None);
    }

    #[test]
    fn test_bytes() {
        let mut archive = KeyedArchive::new();
        archive.encode_int("currentPage", -1);
        archive.encode_urls("urls", &[Url::parse("https://example.com/").unwrap()]);

        assert!(KeyedArchive::new().is_empty());
        assert!(!archive.is_empty());

        let bytes = archive.to_bytes().unwrap();
        let restored = KeyedArchive::from_bytes(&bytes).unwrap();
        assert_eq!(restored, archive);

        assert!(KeyedArchive::from_bytes(b"not an archive").is_err());
    }
}
