//! JSON codecs for resource documents
//!
//! [`JsonCodec`] handles every serde-derived model. Observations need the
//! result schema of their data stream, so [`JsonCodec::with_result_schema`]
//! composes an [`ObservationCodec`] for the duration of one call.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use swe_common::Component;

use crate::error::Result;

mod observation;

pub use observation::ObservationCodec;

/// Converts one resource type to and from its JSON document
pub trait DocumentCodec<T> {
    fn decode(&self, json: &Value) -> Result<T>;

    fn encode(&self, item: &T) -> Result<Value>;

    fn to_body(&self, item: &T) -> Result<String> {
        Ok(serde_json::to_string(&self.encode(item)?)?)
    }
}

/// Generic codec for models that derive serde
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }

    /// Codec for observations whose results follow `schema`
    pub fn with_result_schema<'a>(&'a self, schema: &'a Component) -> ObservationCodec<'a> {
        ObservationCodec::new(self, schema)
    }
}

impl<T> DocumentCodec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn decode(&self, json: &Value) -> Result<T> {
        Ok(T::deserialize(json)?)
    }

    fn encode(&self, item: &T) -> Result<Value> {
        Ok(serde_json::to_value(item)?)
    }
}
