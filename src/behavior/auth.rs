use http::StatusCode;

use crate::{
    client::{ApiClient, ApiResponse},
    credentials::Credentials,
    headers::SessionHeaders,
    prelude::*,
};


pub const REGISTER_PATH: &str = "/api/v1/auth/register";


/// How a registration attempt ended, given the server replied at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Status 200 with a usable `access_token`. The bearer header is set.
    Authenticated,

    /// Status 200, but no usable `access_token` in the body.
    MissingToken,

    /// Any status other than 200.
    Rejected(StatusCode),
}

/// Registers a fresh synthetic account and owns the headers of the session.
#[derive(Debug, Default)]
pub struct AuthenticationBehavior {
    headers: SessionHeaders,
    credentials: Option<Credentials>,
}

impl AuthenticationBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &SessionHeaders {
        &self.headers
    }

    /// The credentials used by `register`, if it was called.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Registers with newly generated credentials.
    ///
    /// Failed registrations are only logged, the session stays usable without
    /// `Authorization`. Only transport errors are returned.
    pub async fn register<C: ApiClient>(&mut self, client: &mut C) -> Result<RegisterOutcome, C::Error> {
        self.register_with(client, Credentials::generate()).await
    }

    pub async fn register_with<C: ApiClient>(
        &mut self,
        client: &mut C,
        credentials: Credentials,
    ) -> Result<RegisterOutcome, C::Error> {
        trace!(email = %credentials.email, "registering user");
        let credentials: &Credentials = self.credentials.insert(credentials);
        let response = client.post_json(REGISTER_PATH, credentials, &self.headers).await?;

        let status = response.status_code();
        if status != StatusCode::OK {
            warn!(%status, "failed to register");
            return Ok(RegisterOutcome::Rejected(status));
        }

        let body = match response.json() {
            Ok(body) => body,
            Err(e) => {
                warn!("no access token in response, body is not JSON: {e}");
                return Ok(RegisterOutcome::MissingToken);
            }
        };

        let Some(token) = body.get("access_token")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
        else {
            warn!(%body, "no access token in response");
            return Ok(RegisterOutcome::MissingToken);
        };

        if let Err(e) = self.headers.set_bearer(token) {
            warn!("access token is not a valid header value: {e}");
            return Ok(RegisterOutcome::MissingToken);
        }

        debug!(email = %credentials.email, "registered and authenticated");
        Ok(RegisterOutcome::Authenticated)
    }
}
