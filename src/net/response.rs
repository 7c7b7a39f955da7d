//! Response decoding
//!
//! The shape of a body is decided from its JSON alone: an object with an
//! `items` member is a collection, any other object is a single resource, and
//! everything else carries no resource at all.

use std::collections::BTreeMap;

use serde_json::Value;
use swe_common::SweError;
use tracing::trace;

use crate::codec::DocumentCodec;
use crate::error::Result;

/// Member holding the elements of a collection response
pub const ITEMS: &str = "items";

/// What a transport returned, before any decoding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Reason phrase or error text
    pub message: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl RawResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn with_body<S: Into<String>>(mut self, body: S) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Status in 200-399
    pub fn is_successful(&self) -> bool {
        (200..400).contains(&self.status)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Structural classification of a response body
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// No body, or a body that is not a JSON object
    Empty,
    Single(Value),
    Collection(Vec<Value>),
}

impl ResponseShape {
    /// Classify a body; only bodies opening with `{` are parsed
    pub fn resolve(body: Option<&str>) -> Result<Self> {
        let Some(text) = body.map(str::trim_start).filter(|t| t.starts_with('{')) else {
            trace!("Response body holds no object");
            return Ok(Self::Empty);
        };
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(mut object) => match object.remove(ITEMS) {
                Some(Value::Array(items)) => {
                    trace!(count = items.len(), "Collection response");
                    Ok(Self::Collection(items))
                }
                Some(other) => Err(SweError::malformed(format!(
                    "'{ITEMS}' must be an array, found {other}"
                ))
                .into()),
                None => Ok(Self::Single(Value::Object(object))),
            },
            _ => Ok(Self::Empty),
        }
    }

    pub fn is_single_item(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// Decode every element with the same codec
    pub fn decode<T, C>(self, codec: &C) -> Result<Vec<T>>
    where
        C: DocumentCodec<T> + ?Sized,
    {
        match self {
            Self::Empty => Ok(Vec::new()),
            Self::Single(value) => Ok(vec![codec.decode(&value)?]),
            Self::Collection(values) => values.iter().map(|v| codec.decode(v)).collect(),
        }
    }
}

/// Decoded response of a successful request
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    raw: RawResponse,
    items: Vec<T>,
    single_item: bool,
}

impl<T> ApiResponse<T> {
    /// Decode the body of `raw` with `codec`
    pub fn decode<C>(raw: RawResponse, codec: &C) -> Result<Self>
    where
        C: DocumentCodec<T> + ?Sized,
    {
        let shape = ResponseShape::resolve(raw.body.as_deref())?;
        let single_item = shape.is_single_item();
        let items = shape.decode(codec)?;
        Ok(Self {
            raw,
            items,
            single_item,
        })
    }

    /// Response whose body is not decoded
    pub fn without_items(raw: RawResponse) -> Self {
        Self {
            raw,
            items: Vec::new(),
            single_item: false,
        }
    }

    pub fn status(&self) -> u16 {
        self.raw.status
    }

    pub fn message(&self) -> &str {
        &self.raw.message
    }

    pub fn is_successful(&self) -> bool {
        self.raw.is_successful()
    }

    pub fn body(&self) -> Option<&str> {
        self.raw.body.as_deref()
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.raw.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.raw.header(name)
    }

    /// Whether the body was a single resource rather than a collection
    pub fn is_single_item(&self) -> bool {
        self.single_item
    }

    /// The resource of a single-item response
    pub fn item(&self) -> Option<&T> {
        self.items.first().filter(|_| self.single_item)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_item(self) -> Option<T> {
        if self.single_item {
            self.items.into_iter().next()
        } else {
            None
        }
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Id of a created resource, taken from the `Location` header
    pub fn created_id(&self) -> Option<&str> {
        self.header("Location")
            .and_then(|location| location.trim_end_matches('/').rsplit('/').next())
            .filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::JsonCodec;
    use crate::error::Error;
    use crate::models::Link;
    use serde_json::json;

    #[test]
    fn test_resolve_shapes() {
        assert_eq!(ResponseShape::resolve(None).unwrap(), ResponseShape::Empty);
        assert_eq!(ResponseShape::resolve(Some("")).unwrap(), ResponseShape::Empty);
        assert_eq!(ResponseShape::resolve(Some("[1, 2]")).unwrap(), ResponseShape::Empty);
        assert_eq!(
            ResponseShape::resolve(Some(r#"{"items": []}"#)).unwrap(),
            ResponseShape::Collection(vec![])
        );
        assert_eq!(
            ResponseShape::resolve(Some(r#"{"items": [{"a": 1}]}"#)).unwrap(),
            ResponseShape::Collection(vec![json!({"a": 1})])
        );
        assert_eq!(
            ResponseShape::resolve(Some(" \n{\"a\": 1}")).unwrap(),
            ResponseShape::Single(json!({"a": 1}))
        );
    }

    #[test]
    fn test_resolve_errors() {
        assert!(matches!(
            ResponseShape::resolve(Some("{not json")),
            Err(Error::Codec(SweError::MalformedDocument { .. }))
        ));
        assert!(matches!(
            ResponseShape::resolve(Some(r#"{"items": {"a": 1}}"#)),
            Err(Error::Codec(SweError::MalformedDocument { .. }))
        ));
    }

    #[test]
    fn test_api_response_collection() {
        let raw = RawResponse::new(200)
            .with_body(r#"{"items": [{"href": "urn:a"}, {"href": "urn:b"}], "links": []}"#);
        let response: ApiResponse<Link> = ApiResponse::decode(raw, &JsonCodec).unwrap();
        assert!(!response.is_single_item());
        assert!(response.item().is_none());
        assert_eq!(response.items().len(), 2);
        assert_eq!(response.items()[1].href, "urn:b");
    }

    #[test]
    fn test_api_response_single() {
        let raw = RawResponse::new(200).with_body(r#"{"href": "urn:a"}"#);
        let response: ApiResponse<Link> = ApiResponse::decode(raw, &JsonCodec).unwrap();
        assert!(response.is_single_item());
        assert_eq!(response.item().map(|l| l.href.as_str()), Some("urn:a"));
        assert_eq!(response.into_item(), Some(Link::new("urn:a")));
    }

    #[test]
    fn test_created_id_from_location() {
        let raw = RawResponse::new(201)
            .with_header("location", "http://host/api/datastreams/038q/observations/obs7");
        let response: ApiResponse<()> = ApiResponse::without_items(raw);
        assert!(response.is_successful());
        assert_eq!(response.created_id(), Some("obs7"));
        assert!(response.items().is_empty());
    }

    #[test]
    fn test_success_range() {
        assert!(RawResponse::new(200).is_successful());
        assert!(RawResponse::new(304).is_successful());
        assert!(!RawResponse::new(199).is_successful());
        assert!(!RawResponse::new(400).is_successful());
    }
}
