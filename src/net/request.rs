//! Request construction
//!
//! URLs follow `root/resource[/id[/sub-resource[/sub-id]]][?query]`. A
//! sub-resource is only appended when the parent id is present.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    pub fn requires_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource collections exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Systems,
    Subsystems,
    DataStreams,
    Observations,
    /// Observation schema of a data stream
    Schema,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Systems => "systems",
            Self::Subsystems => "subsystems",
            Self::DataStreams => "datastreams",
            Self::Observations => "observations",
            Self::Schema => "schema",
        }
    }
}

/// A fully built request, ready to hand to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn builder<S: Into<String>>(api_root: S) -> ApiRequestBuilder {
        ApiRequestBuilder::new(api_root)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApiRequestBuilder {
    api_root: String,
    method: Method,
    resource: Option<Endpoint>,
    resource_id: Option<String>,
    sub_resource: Option<Endpoint>,
    sub_resource_id: Option<String>,
    query: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    authorization_token: Option<String>,
    body: Option<String>,
}

impl ApiRequestBuilder {
    pub fn new<S: Into<String>>(api_root: S) -> Self {
        Self {
            api_root: api_root.into(),
            ..Default::default()
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn resource(mut self, endpoint: Endpoint) -> Self {
        self.resource = Some(endpoint);
        self
    }

    pub fn resource_id<S: Into<String>>(mut self, id: S) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    pub fn sub_resource(mut self, endpoint: Endpoint) -> Self {
        self.sub_resource = Some(endpoint);
        self
    }

    pub fn sub_resource_id<S: Into<String>>(mut self, id: S) -> Self {
        self.sub_resource_id = Some(id.into());
        self
    }

    /// Query parameters; later calls add to earlier ones
    pub fn query(mut self, params: &BTreeMap<String, String>) -> Self {
        self.query
            .extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn query_param<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn authorization_token(mut self, token: Option<&str>) -> Self {
        self.authorization_token = token.map(str::to_string);
        self
    }

    pub fn body<S: Into<String>>(mut self, body: S) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn build(self) -> Result<ApiRequest> {
        if self.api_root.is_empty() {
            return Err(Error::invalid_request("API root cannot be empty"));
        }
        if self.method.requires_body() && self.body.is_none() {
            return Err(Error::invalid_request(format!(
                "{} request requires a body",
                self.method
            )));
        }

        let url = self.url();

        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        headers.extend(self.headers);
        if let Some(token) = self.authorization_token.filter(|t| !t.is_empty()) {
            headers.insert(AUTHORIZATION.to_string(), format!("Basic {token}"));
        }

        Ok(ApiRequest {
            method: self.method,
            url,
            headers,
            body: self.body,
        })
    }

    fn url(&self) -> String {
        let mut url = self.api_root.trim_end_matches('/').to_string();

        let non_empty = |id: &Option<String>| id.as_deref().filter(|id| !id.is_empty()).map(str::to_string);
        if let Some(resource) = self.resource {
            push_segment(&mut url, resource.path());
            if let Some(id) = non_empty(&self.resource_id) {
                push_segment(&mut url, &urlencoding::encode(&id));
                if let Some(sub) = self.sub_resource {
                    push_segment(&mut url, sub.path());
                    if let Some(sub_id) = non_empty(&self.sub_resource_id) {
                        push_segment(&mut url, &urlencoding::encode(&sub_id));
                    }
                }
            }
        }

        if !self.query.is_empty() {
            let query = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

fn push_segment(url: &mut String, segment: &str) {
    url.push('/');
    url.push_str(segment);
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "http://localhost:8181/sensorhub/api";

    #[test]
    fn test_nested_resource_url() {
        let request = ApiRequest::builder(ROOT)
            .resource(Endpoint::DataStreams)
            .resource_id("038q")
            .sub_resource(Endpoint::Observations)
            .query_param("limit", "10")
            .build()
            .unwrap();
        assert_eq!(
            request.url,
            "http://localhost:8181/sensorhub/api/datastreams/038q/observations?limit=10"
        );
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.header(CONTENT_TYPE), Some(APPLICATION_JSON));
        assert_eq!(request.header(AUTHORIZATION), None);
    }

    #[test]
    fn test_sub_resource_requires_parent_id() {
        let request = ApiRequest::builder(ROOT)
            .resource(Endpoint::Systems)
            .sub_resource(Endpoint::Subsystems)
            .build()
            .unwrap();
        assert_eq!(request.url, format!("{ROOT}/systems"));
    }

    #[test]
    fn test_query_values_are_encoded() {
        let request = ApiRequest::builder(format!("{ROOT}/"))
            .resource(Endpoint::Observations)
            .query_param("phenomenonTime", "2024-01-01T00:00:00Z/now")
            .build()
            .unwrap();
        assert_eq!(
            request.url,
            format!("{ROOT}/observations?phenomenonTime=2024-01-01T00%3A00%3A00Z%2Fnow")
        );
    }

    #[test]
    fn test_basic_authorization() {
        let request = ApiRequest::builder(ROOT)
            .authorization_token(Some("YWRtaW46YWRtaW4="))
            .build()
            .unwrap();
        assert_eq!(request.header(AUTHORIZATION), Some("Basic YWRtaW46YWRtaW4="));
    }

    #[test]
    fn test_preconditions() {
        assert!(matches!(
            ApiRequest::builder("").build(),
            Err(Error::InvalidRequest(_))
        ));
        let err = ApiRequest::builder(ROOT)
            .method(Method::Put)
            .resource(Endpoint::Observations)
            .resource_id("obs1")
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: PUT request requires a body");
        assert!(ApiRequest::builder(ROOT).method(Method::Delete).build().is_ok());
    }
}
