use http::{HeaderMap, HeaderValue, header};


/// Headers sent with every request of one simulated user.
///
/// Starts out with `Content-Type: application/json` only. Once registration
/// succeeded, an `Authorization: Bearer <token>` entry is added.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionHeaders(HeaderMap);

impl SessionHeaders {
    pub fn new() -> Self {
        let mut map = HeaderMap::new();
        map.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self(map)
    }

    /// Stores the bearer token. Fails if the token cannot be represented as a
    /// header value (e.g. contains control characters).
    pub fn set_bearer(&mut self, token: &str) -> Result<(), http::header::InvalidHeaderValue> {
        let mut value = HeaderValue::try_from(format!("Bearer {token}"))?;
        value.set_sensitive(true);
        self.0.insert(header::AUTHORIZATION, value);
        Ok(())
    }

    pub fn authorization(&self) -> Option<&HeaderValue> {
        self.0.get(header::AUTHORIZATION)
    }

    pub fn is_authenticated(&self) -> bool {
        self.authorization().is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&header::HeaderName, &HeaderValue)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &HeaderMap {
        &self.0
    }
}

impl Default for SessionHeaders {
    fn default() -> Self {
        Self::new()
    }
}
