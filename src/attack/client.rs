use goose::prelude::*;
use http::StatusCode;
use serde::Serialize;

use crate::{
    client::{ApiClient, RecordedResponse},
    headers::SessionHeaders,
    prelude::*,
};


/// Sends requests through a goose user, so that goose records them in its
/// metrics and applies its timeout.
pub struct GooseClient<'a> {
    user: &'a mut GooseUser,
}

impl<'a> GooseClient<'a> {
    pub fn new(user: &'a mut GooseUser) -> Self {
        Self { user }
    }

    async fn send(
        &mut self,
        method: GooseMethod,
        path: &str,
        headers: &SessionHeaders,
        body: Option<Vec<u8>>,
    ) -> Result<RecordedResponse, Box<TransactionError>> {
        let mut request_builder = self.user.get_request_builder(&method, path)?;
        for (name, value) in headers.iter() {
            request_builder = request_builder.header(name.as_str(), value.as_bytes());
        }
        if let Some(body) = body {
            request_builder = request_builder.body(body);
        }

        let request = GooseRequest::builder()
            .set_request_builder(request_builder)
            .build();
        let response = self.user.request(request).await?
            .response
            .map_err(|e| Box::new(TransactionError::Reqwest(e)))?;

        // Converted by number, goose might use a different `http` version.
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.bytes().await
            .map_err(|e| Box::new(TransactionError::Reqwest(e)))?;
        trace!(%status, path, body_len = body.len(), "got response");

        Ok(RecordedResponse::new(status, body))
    }
}

impl ApiClient for GooseClient<'_> {
    type Response = RecordedResponse;
    type Error = Box<TransactionError>;

    async fn post_json<B: Serialize + Sync>(
        &mut self,
        path: &str,
        body: &B,
        headers: &SessionHeaders,
    ) -> Result<Self::Response, Self::Error> {
        let body = json_body(path, body);
        self.send(GooseMethod::Post, path, headers, Some(body)).await
    }

    async fn get(
        &mut self,
        path: &str,
        headers: &SessionHeaders,
    ) -> Result<Self::Response, Self::Error> {
        self.send(GooseMethod::Get, path, headers, None).await
    }
}

fn json_body<B: Serialize>(path: &str, body: &B) -> Vec<u8> {
    serde_json::to_vec(body).unwrap_or_else(|e| {
        warn!(path, "failed to serialize request body, sending it empty: {e}");
        Vec::new()
    })
}
