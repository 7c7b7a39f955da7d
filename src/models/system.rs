use serde::{Deserialize, Serialize};

use super::{FeatureType, Link, TimeExtent};

/// A sensor, actuator, platform or other system, as a GeoJSON feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemResource {
    /// GeoJSON object type, always `Feature`
    #[serde(rename = "type", default = "feature_tag")]
    pub feature_tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub properties: SystemProperties,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

fn feature_tag() -> String {
    "Feature".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemProperties {
    pub uid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<FeatureType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_time: Option<TimeExtent>,
}

impl SystemResource {
    pub fn new<S: Into<String>>(uid: S, feature_type: FeatureType) -> Self {
        Self {
            feature_tag: feature_tag(),
            id: None,
            properties: SystemProperties {
                uid: uid.into(),
                feature_type: Some(feature_type),
                ..Default::default()
            },
            links: Vec::new(),
        }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.properties.name = Some(name.into());
        self
    }

    pub fn uid(&self) -> &str {
        &self.properties.uid
    }
}
