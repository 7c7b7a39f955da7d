use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Typed reference to another resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,

    /// Link relation type
    #[serde(rename = "rel", default, skip_serializing_if = "Option::is_none")]
    pub relation_type: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(rename = "hreflang", default, skip_serializing_if = "Option::is_none")]
    pub href_language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Unique identifier of the target resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Semantic type of the target resource
    #[serde(rename = "rt", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Interface used to access the target resource
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
}

impl Link {
    pub fn new<S: Into<String>>(href: S) -> Self {
        Self {
            href: href.into(),
            ..Default::default()
        }
    }

    pub fn rel<S: Into<String>>(mut self, rel: S) -> Self {
        self.relation_type = Some(rel.into());
        self
    }

    pub fn media_type<S: Into<String>>(mut self, media_type: S) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the language of the target, `xx`, `xx-YY` or `x-default`
    pub fn hreflang(mut self, tag: &str) -> Result<Self> {
        if !is_language_tag(tag) {
            return Err(Error::invalid_value("hreflang", tag));
        }
        self.href_language = Some(tag.to_string());
        Ok(self)
    }
}

fn is_language_tag(tag: &str) -> bool {
    if tag == "x-default" {
        return true;
    }
    let (lang, region) = match tag.split_once('-') {
        Some((lang, region)) => (lang, Some(region)),
        None => (tag, None),
    };
    let lower = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_lowercase());
    let upper = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_uppercase());
    lower(lang) && region.is_none_or(upper)
}
