//! Test utilities: a scripted in-memory transport
//!
//! [`MockTransport`] answers requests from a queue of canned responses and
//! records every request it receives, so tests can drive the full client
//! without a server.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::error::TransportError;
use crate::net::{ApiRequest, HttpTransport, RawResponse};

#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<RawResponse, String>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn push(&self, response: RawResponse) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(response));
        self
    }

    /// Queue a response with a JSON body
    pub fn push_json(&self, status: u16, body: &str) -> &Self {
        self.push(create_test_response(status, body))
    }

    /// Queue a transport failure
    pub fn push_failure(&self, message: &str) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(message.to_string()));
        self
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests().pop()
    }
}

impl HttpTransport for MockTransport {
    fn execute(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        match self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
        {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(message.into()),
            None => Err(format!("no response queued for {} {}", request.method, request.url).into()),
        }
    }
}

/// Create a response with the given status and body
pub fn create_test_response(status: u16, body: &str) -> RawResponse {
    RawResponse::new(status)
        .with_message(reason_phrase(status))
        .with_header("Content-Type", "application/json")
        .with_body(body)
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}
