//! Request parsing helpers shared by the route modules.

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use super::errors::{ApiError, ApiResult};

/// Decode the first JSON value of a body regardless of its declared content
/// type. Anything after that value is ignored.
pub fn decode_body<T: DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    match serde_json::Deserializer::from_slice(body).into_iter::<T>().next() {
        Some(Ok(value)) => Ok(value),
        _ => Err(ApiError::bad_request_format()),
    }
}

/// Parse the trailing path segment as a record id
pub fn parse_id(raw: &str, invalid: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest(invalid.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42", "invalid").unwrap(), 42);
        assert_eq!(parse_id("-1", "invalid").unwrap(), -1);
        assert!(parse_id("abc", "invalid").is_err());
        assert!(parse_id("", "invalid").is_err());
        assert_eq!(parse_id("1.5", "invalid item id").unwrap_err().to_string(), "invalid item id");
    }

    #[test]
    fn test_decode_body() {
        let item: Item = decode_body(&Bytes::from_static(br#"{"name":"Pen","price":1.5}"#)).unwrap();
        assert_eq!(item.name, "Pen");

        let err = decode_body::<Item>(&Bytes::from_static(b"{not json")).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(decode_body::<Item>(&Bytes::new()).is_err());
    }

    #[test]
    fn test_decode_body_ignores_trailing_data() {
        let first: Item =
            decode_body(&Bytes::from_static(b"{\"name\":\"Pen\"}\n{\"name\":\"Cap\"}")).unwrap();
        assert_eq!(first.name, "Pen");

        let trailing: Item = decode_body(&Bytes::from_static(b"{\"name\":\"Pen\"}garbage")).unwrap();
        assert_eq!(trailing.name, "Pen");
    }
}
