use serde_json::Value;
use swe_common::{Component, ValueCodec};
use tracing::{debug, trace};

use super::{DocumentCodec, JsonCodec};
use crate::error::Result;
use crate::models::{ObservationDocument, ObservationResource};

/// Observation codec bound to one result schema
///
/// The `result` property goes through a [`ValueCodec`] for the schema; every
/// other property is handled by the generic [`JsonCodec`]. Composing one is
/// free, and codecs for different schemas share nothing mutable.
#[derive(Debug, Clone, Copy)]
pub struct ObservationCodec<'a> {
    documents: &'a JsonCodec,
    results: ValueCodec<'a>,
}

impl<'a> ObservationCodec<'a> {
    pub fn new(documents: &'a JsonCodec, schema: &'a Component) -> Self {
        Self {
            documents,
            results: ValueCodec::new(schema),
        }
    }

    pub fn result_schema(&self) -> &'a Component {
        self.results.schema()
    }
}

impl DocumentCodec<ObservationResource> for ObservationCodec<'_> {
    fn decode(&self, json: &Value) -> Result<ObservationResource> {
        let mut document: ObservationDocument = self.documents.decode(json)?;
        let value = document.result.take();
        let mut observation = document.into_resource(None);
        if let Some(value) = value {
            let envelope = observation.envelope();
            observation.result = Some(self.results.decode_with_context(&value, &envelope)?);
        }
        trace!(id = ?observation.id, has_result = observation.result.is_some(), "Decoded observation");
        Ok(observation)
    }

    fn encode(&self, item: &ObservationResource) -> Result<Value> {
        let result = item
            .result
            .as_ref()
            .map(|block| self.results.encode(block))
            .transpose()?;
        let mut document = ObservationDocument::from_resource(item, result);

        // Times the result carries only in filtered fields move to the envelope
        if let Some(block) = &item.result {
            let carried = self.results.envelope(block);
            if document.phenomenon_time.is_none() && carried.phenomenon_time.is_some() {
                debug!(id = ?item.id, "Taking phenomenonTime from the result");
                document.phenomenon_time = carried.phenomenon_time;
            }
            if document.result_time.is_none() && carried.result_time.is_some() {
                debug!(id = ?item.id, "Taking resultTime from the result");
                document.result_time = carried.result_time;
            }
        }
        self.documents.encode(&document)
    }
}
