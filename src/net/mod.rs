//! HTTP plumbing: request building, the transport seam and response decoding

use std::sync::Arc;

use crate::error::TransportError;

pub mod request;
pub mod response;

pub use request::{ApiRequest, ApiRequestBuilder, Endpoint, Method};
pub use response::{ApiResponse, RawResponse, ResponseShape};

/// Executes requests against a server
///
/// Implementations return every status they receive; deciding whether a
/// status is a failure is left to the caller.
pub trait HttpTransport {
    fn execute(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn execute(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn execute(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    fn execute(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        (**self).execute(request)
    }
}
