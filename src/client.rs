//! The two capabilities the behaviors need from an HTTP client. The real
//! implementation sends through the load test driver (see `attack`); tests
//! use an in-memory one.

use bytes::Bytes;
use http::StatusCode;
use serde::Serialize;

use crate::headers::SessionHeaders;


/// What the behaviors look at in a response.
pub trait ApiResponse {
    fn status_code(&self) -> StatusCode;

    /// Parses the body as JSON.
    fn json(&self) -> Result<serde_json::Value, serde_json::Error>;
}

pub trait ApiClient {
    type Response: ApiResponse + Send;

    /// Transport level failure. Never inspected by the behaviors, only passed
    /// on to the caller.
    type Error: Send;

    fn post_json<B: Serialize + Sync>(
        &mut self,
        path: &str,
        body: &B,
        headers: &SessionHeaders,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;

    fn get(
        &mut self,
        path: &str,
        headers: &SessionHeaders,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct RecordedResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl RecordedResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self { status, body: body.into() }
    }
}

impl ApiResponse for RecordedResponse {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
