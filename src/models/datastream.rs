use serde::{Deserialize, Serialize};
use swe_common::{Component, Record};

use super::{DataStreamType, Link, ResultType, TimeExtent};
use crate::error::{Error, Result};

/// An output of a system, producing observations that share one result schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStreamResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_time: Option<TimeExtent>,

    /// Observation encodings the server offers for this stream
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<String>,

    #[serde(rename = "system@link", default, skip_serializing_if = "Option::is_none")]
    pub system_link: Option<Link>,

    /// Name of the system output this stream carries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_name: Option<String>,

    #[serde(rename = "procedure@link", default, skip_serializing_if = "Option::is_none")]
    pub procedure_link: Option<Link>,

    #[serde(rename = "deployment@link", default, skip_serializing_if = "Option::is_none")]
    pub deployment_link: Option<Link>,

    #[serde(rename = "featureOfInterest@link", default, skip_serializing_if = "Option::is_none")]
    pub feature_of_interest_link: Option<Link>,

    #[serde(rename = "samplingFeature@link", default, skip_serializing_if = "Option::is_none")]
    pub sampling_feature_link: Option<Link>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observed_properties: Vec<ObservedProperty>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phenomenon_time: Option<TimeExtent>,

    /// ISO-8601 duration between consecutive phenomenon times
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phenomenon_time_interval: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_time: Option<TimeExtent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_time_interval: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_stream_type: Option<DataStreamType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<ResultType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,

    /// Required on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<ObservationSchema>,
}

/// A property observed by a data stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedProperty {
    pub definition: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ObservedProperty {
    pub fn new<S: Into<String>>(definition: S) -> Self {
        Self {
            definition: definition.into(),
            ..Default::default()
        }
    }
}

/// Observation schema of a data stream in the O&M JSON format
///
/// The result schema goes through the schema codec, so a fetched schema
/// always holds a time stamp and a sent one never repeats envelope times.
/// The parameters schema is a record checked the same way but otherwise
/// kept as declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationSchema {
    pub obs_format: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "swe_common::schema::serde::record::option"
    )]
    pub parameters_schema: Option<Record>,

    #[serde(with = "swe_common::schema::serde")]
    pub result_schema: Component,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_link: Option<Link>,
}

impl ObservationSchema {
    pub fn builder() -> ObservationSchemaBuilder {
        ObservationSchemaBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObservationSchemaBuilder {
    obs_format: Option<String>,
    parameters_schema: Option<Component>,
    result_schema: Option<Component>,
    result_link: Option<Link>,
}

impl ObservationSchemaBuilder {
    pub fn obs_format<S: Into<String>>(mut self, format: S) -> Self {
        self.obs_format = Some(format.into());
        self
    }

    pub fn parameters_schema<C: Into<Component>>(mut self, schema: C) -> Self {
        self.parameters_schema = Some(schema.into());
        self
    }

    pub fn result_schema<C: Into<Component>>(mut self, schema: C) -> Self {
        self.result_schema = Some(schema.into());
        self
    }

    pub fn result_link(mut self, link: Link) -> Self {
        self.result_link = Some(link);
        self
    }

    /// Fails when the format or result schema is missing, when the parameters
    /// schema is not a record, or when a result link has no media type
    pub fn build(self) -> Result<ObservationSchema> {
        const RESOURCE: &str = "observation schema";
        let obs_format = self
            .obs_format
            .filter(|f| !f.is_empty())
            .ok_or(Error::MissingField {
                resource: RESOURCE,
                field: "obsFormat",
            })?;
        let result_schema = self.result_schema.ok_or(Error::MissingField {
            resource: RESOURCE,
            field: "resultSchema",
        })?;
        let parameters_schema = match self.parameters_schema {
            Some(Component::Record(record)) => Some(record),
            Some(other) => return Err(Error::invalid_value("parametersSchema", other.type_name())),
            None => None,
        };
        if self
            .result_link
            .as_ref()
            .is_some_and(|link| link.media_type.is_none())
        {
            return Err(Error::MissingField {
                resource: RESOURCE,
                field: "resultLink.type",
            });
        }

        Ok(ObservationSchema {
            obs_format,
            parameters_schema,
            result_schema,
            result_link: self.result_link,
        })
    }
}
