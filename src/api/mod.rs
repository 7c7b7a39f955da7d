//! Typed entry points for the resource collections of a server

use tracing::{debug, warn};

use crate::codec::{DocumentCodec, JsonCodec};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::net::{ApiRequest, ApiRequestBuilder, ApiResponse, HttpTransport, RawResponse};

mod datastreams;
mod observations;
mod systems;

pub use datastreams::DataStreamsApi;
pub use observations::ObservationsApi;
pub use systems::SystemsApi;

/// Client for one Connected Systems API root
///
/// ```rust
/// use connected_systems::net::{ApiRequest, HttpTransport, RawResponse};
/// use connected_systems::{ClientConfig, ConnectedSystemsApi, TransportError};
///
/// struct Empty;
///
/// impl HttpTransport for Empty {
///     fn execute(&self, _: &ApiRequest) -> Result<RawResponse, TransportError> {
///         Ok(RawResponse::new(200).with_body(r#"{"items": []}"#))
///     }
/// }
///
/// let api = ConnectedSystemsApi::new(ClientConfig::default(), Empty);
/// let streams = api.data_streams().get_data_streams(Default::default()).unwrap();
/// assert!(streams.items().is_empty());
/// ```
#[derive(Debug)]
pub struct ConnectedSystemsApi<T> {
    config: ClientConfig,
    transport: T,
    codec: JsonCodec,
}

impl<T: HttpTransport> ConnectedSystemsApi<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            codec: JsonCodec::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn systems(&self) -> SystemsApi<'_, T> {
        SystemsApi::new(self)
    }

    pub fn data_streams(&self) -> DataStreamsApi<'_, T> {
        DataStreamsApi::new(self)
    }

    pub fn observations(&self) -> ObservationsApi<'_, T> {
        ObservationsApi::new(self)
    }

    pub(crate) fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    /// Request builder preloaded with the API root and credentials
    pub(crate) fn request(&self) -> ApiRequestBuilder {
        ApiRequest::builder(self.config.api_root.clone())
            .authorization_token(self.config.authorization_token.as_deref())
    }

    /// Send a request, turning non-success statuses into errors
    pub(crate) fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        debug!(method = %request.method, url = %request.url, "Sending request");
        let response = self.transport.execute(&request).map_err(Error::transport)?;

        if !response.is_successful() {
            warn!(status = response.status, url = %request.url, "Request failed");
            let message = match response.body.as_deref().map(str::trim) {
                Some(body) if !body.is_empty() => body.to_string(),
                _ => response.message,
            };
            return Err(Error::Status {
                status: response.status,
                message,
            });
        }
        Ok(response)
    }

    pub(crate) fn fetch<R, C>(&self, request: ApiRequest, codec: &C) -> Result<ApiResponse<R>>
    where
        C: DocumentCodec<R> + ?Sized,
    {
        let raw = self.send(request)?;
        ApiResponse::decode(raw, codec)
    }

    pub(crate) fn submit(&self, request: ApiRequest) -> Result<ApiResponse<()>> {
        self.send(request).map(ApiResponse::without_items)
    }
}
