//! Enumerations shared by resource models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Whether a data stream carries observations or system status reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataStreamType {
    Status,
    Observation,
}

impl DataStreamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Observation => "observation",
        }
    }
}

/// Structure of the results produced by a data stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    /// Single measurement
    Measure,
    Vector,
    Record,
    Coverage,
    Complex,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Measure => "measure",
            Self::Vector => "vector",
            Self::Record => "record",
            Self::Coverage => "coverage",
            Self::Complex => "complex",
        }
    }
}

/// SOSA feature type of a system, serialized as its ontology URI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureType {
    #[serde(rename = "http://www.w3.org/ns/sosa/Sensor")]
    Sensor,
    #[serde(rename = "http://www.w3.org/ns/sosa/Actuator")]
    Actuator,
    #[serde(rename = "http://www.w3.org/ns/sosa/Platform")]
    Platform,
    #[serde(rename = "http://www.w3.org/ns/sosa/Sampler")]
    Sampler,
    #[serde(rename = "http://www.w3.org/ns/sosa/System")]
    System,
}

impl FeatureType {
    pub const ALL: [FeatureType; 5] = [
        Self::Sensor,
        Self::Actuator,
        Self::Platform,
        Self::Sampler,
        Self::System,
    ];

    pub fn url(&self) -> &'static str {
        match self {
            Self::Sensor => "http://www.w3.org/ns/sosa/Sensor",
            Self::Actuator => "http://www.w3.org/ns/sosa/Actuator",
            Self::Platform => "http://www.w3.org/ns/sosa/Platform",
            Self::Sampler => "http://www.w3.org/ns/sosa/Sampler",
            Self::System => "http://www.w3.org/ns/sosa/System",
        }
    }
}

impl fmt::Display for DataStreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url())
    }
}

impl FromStr for DataStreamType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "status" => Ok(Self::Status),
            "observation" => Ok(Self::Observation),
            _ => Err(Error::invalid_value("data stream type", s)),
        }
    }
}

impl FromStr for ResultType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "measure" => Ok(Self::Measure),
            "vector" => Ok(Self::Vector),
            "record" => Ok(Self::Record),
            "coverage" => Ok(Self::Coverage),
            "complex" => Ok(Self::Complex),
            _ => Err(Error::invalid_value("result type", s)),
        }
    }
}

/// Parses either the full SOSA URI or its short local name
impl FromStr for FeatureType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.url() == s || t.url().rsplit('/').next() == Some(s))
            .ok_or_else(|| Error::invalid_value("feature type", s))
    }
}
