//! Decoded JSON response tree.

use std::ops::Index;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;

/// The decoded body of one API response.
///
/// A generic tagged tree over the document: objects are key-value mappings,
/// arrays ordered sequences, scalars their natural typed equivalents.
/// Unknown fields are preserved, and serializing the tree back out
/// reproduces a semantically equivalent document. Nested nodes are plain
/// [`serde_json::Value`]s, so lookups chain:
///
/// ```
/// use oanda_v20::Response;
///
/// let resp = Response::from_slice(
///     br#"{"prices":[{"instrument":"EUR_USD","bids":[{"price":"1.1000"}]}]}"#,
/// ).unwrap();
/// assert_eq!(
///     resp["prices"][0]["bids"][0]["price"].as_str(),
///     Some("1.1000")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Response(Value);

impl Response {
    /// Decode one complete JSON document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(bytes)
            .map(Self)
            .map_err(|e| Error::Decode {
                message: e.to_string(),
            })
    }

    /// Wrap an already-parsed value.
    #[must_use]
    pub const fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Field of an object document, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Element of an array document, if present.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// JSON-pointer lookup, e.g. `"/prices/0/bids/0/price"`.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    /// Deserialize the document into a typed wrapper.
    pub fn deserialize_into<T: DeserializeOwned>(self) -> Result<T, Error> {
        serde_json::from_value(self.0).map_err(|e| Error::Decode {
            message: e.to_string(),
        })
    }

    /// Borrow the underlying JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the response, returning the underlying JSON value.
    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for Response {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl Index<&str> for Response {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        &self.0[key]
    }
}

impl Index<usize> for Response {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.0[index]
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_nested_document() {
        let resp = Response::from_slice(
            br#"{"account":{"id":"001","balance":"1000.0","trades":[{"id":"7"}]}}"#,
        )
        .unwrap();

        assert_eq!(resp["account"]["id"].as_str(), Some("001"));
        assert_eq!(resp["account"]["trades"][0]["id"].as_str(), Some("7"));
        assert_eq!(resp.pointer("/account/balance").and_then(Value::as_str), Some("1000.0"));
    }

    #[test]
    fn preserves_unknown_fields() {
        let resp = Response::from_slice(br#"{"known":1,"surprise":{"deep":[true,null]}}"#).unwrap();
        assert_eq!(resp["surprise"]["deep"][0], json!(true));
        assert_eq!(resp["surprise"]["deep"][1], json!(null));
    }

    #[test]
    fn round_trips_semantically() {
        let source = r#"{"b":[3,2,1],"a":{"x":"y"},"n":1.5,"t":true,"z":null}"#;
        let resp = Response::from_slice(source.as_bytes()).unwrap();
        let reparsed: Value = serde_json::from_str(&resp.to_string()).unwrap();
        let original: Value = serde_json::from_str(source).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn rejects_invalid_json() {
        let err = Response::from_slice(b"{not json").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn deserializes_into_typed_wrapper() {
        #[derive(Debug, serde::Deserialize)]
        struct Heartbeat {
            time: String,
        }

        let resp = Response::from_slice(br#"{"type":"HEARTBEAT","time":"1"}"#).unwrap();
        let heartbeat: Heartbeat = resp.deserialize_into().unwrap();
        assert_eq!(heartbeat.time, "1");
    }

    #[test]
    fn scalar_document() {
        let resp = Response::from_slice(b"42").unwrap();
        assert_eq!(resp.as_value().as_i64(), Some(42));
        assert!(resp.get("missing").is_none());
        assert!(resp.at(0).is_none());
    }
}
