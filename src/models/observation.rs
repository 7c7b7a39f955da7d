use serde::{Deserialize, Serialize};
use serde_json::Value;
use swe_common::{Block, EnvelopeContext};
use time::OffsetDateTime;

use super::Link;

/// A single observation of a data stream
///
/// The `result` is a value tree bound to the data stream's result schema, so
/// this type is encoded and decoded through
/// [`ObservationCodec`](crate::codec::ObservationCodec) rather than serde.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationResource {
    pub id: Option<String>,
    pub data_stream_id: Option<String>,
    pub sampling_feature_id: Option<String>,
    pub procedure_link: Option<Link>,
    pub phenomenon_time: Option<OffsetDateTime>,
    pub result_time: Option<OffsetDateTime>,
    pub result: Option<Block>,
    /// Out-of-band result, for results too large to embed
    pub result_link: Option<Link>,
    pub links: Vec<Link>,
}

impl ObservationResource {
    pub fn new(result: Block) -> Self {
        Self {
            result: Some(result),
            ..Default::default()
        }
    }

    pub fn with_phenomenon_time(mut self, t: OffsetDateTime) -> Self {
        self.phenomenon_time = Some(t);
        self
    }

    pub fn with_result_time(mut self, t: OffsetDateTime) -> Self {
        self.result_time = Some(t);
        self
    }

    pub fn with_sampling_feature<S: Into<String>>(mut self, id: S) -> Self {
        self.sampling_feature_id = Some(id.into());
        self
    }

    /// Envelope properties the result payload may omit
    pub fn envelope(&self) -> EnvelopeContext {
        EnvelopeContext {
            phenomenon_time: self.phenomenon_time,
            result_time: self.result_time,
        }
    }
}

/// Wire form of an observation with its result still undecoded
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ObservationDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "datastream@id", default, skip_serializing_if = "Option::is_none")]
    pub data_stream_id: Option<String>,

    #[serde(rename = "samplingFeature@id", default, skip_serializing_if = "Option::is_none")]
    pub sampling_feature_id: Option<String>,

    #[serde(rename = "procedure@link", default, skip_serializing_if = "Option::is_none")]
    pub procedure_link: Option<Link>,

    #[serde(
        rename = "phenomenonTime",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub phenomenon_time: Option<OffsetDateTime>,

    #[serde(
        rename = "resultTime",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub result_time: Option<OffsetDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(rename = "result@link", default, skip_serializing_if = "Option::is_none")]
    pub result_link: Option<Link>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl ObservationDocument {
    /// Split an observation into its document and result value
    pub fn from_resource(resource: &ObservationResource, result: Option<Value>) -> Self {
        Self {
            id: resource.id.clone(),
            data_stream_id: resource.data_stream_id.clone(),
            sampling_feature_id: resource.sampling_feature_id.clone(),
            procedure_link: resource.procedure_link.clone(),
            phenomenon_time: resource.phenomenon_time,
            result_time: resource.result_time,
            result,
            result_link: resource.result_link.clone(),
            links: resource.links.clone(),
        }
    }

    pub fn into_resource(self, result: Option<Block>) -> ObservationResource {
        ObservationResource {
            id: self.id,
            data_stream_id: self.data_stream_id,
            sampling_feature_id: self.sampling_feature_id,
            procedure_link: self.procedure_link,
            phenomenon_time: self.phenomenon_time,
            result_time: self.result_time,
            result,
            result_link: self.result_link,
            links: self.links,
        }
    }
}
