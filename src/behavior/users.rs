use crate::{client::ApiClient, headers::SessionHeaders};


pub const PROFILE_PATH: &str = "/api/v1/users/profile";


/// Requests against the users API. Stateless: it uses whatever headers the
/// paired `AuthenticationBehavior` currently holds.
#[derive(Debug, Default, Clone, Copy)]
pub struct UsersBehavior;

impl UsersBehavior {
    /// Fetches the profile of the current user. The response is returned as
    /// is, judging it is up to the caller.
    pub async fn get_profile<C: ApiClient>(
        &self,
        client: &mut C,
        headers: &SessionHeaders,
    ) -> Result<C::Response, C::Error> {
        client.get(PROFILE_PATH, headers).await
    }
}


#[cfg(test)]
mod tests {
    use http::{Method, StatusCode, header};

    use crate::{
        behavior::AuthenticationBehavior,
        client::{ApiResponse, RecordedResponse, mock::MockClient},
    };
    use super::*;

    #[tokio::test]
    async fn before_registration_only_content_type_is_sent() {
        let auth = AuthenticationBehavior::new();
        let mut client = MockClient::default();
        UsersBehavior.get_profile(&mut client, auth.headers()).await.unwrap();

        let req = &client.sent[0];
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.path, "/api/v1/users/profile");
        assert_eq!(req.headers.as_map().len(), 1);
        assert_eq!(req.headers.as_map()[header::CONTENT_TYPE], "application/json");
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn sends_headers_held_at_call_time() {
        let mut client = MockClient::replying([
            RecordedResponse::new(StatusCode::OK, "{}"),
            RecordedResponse::new(StatusCode::OK, r#"{"access_token": "tok"}"#),
        ]);
        let mut auth = AuthenticationBehavior::new();

        UsersBehavior.get_profile(&mut client, auth.headers()).await.unwrap();
        auth.register(&mut client).await.unwrap();
        UsersBehavior.get_profile(&mut client, auth.headers()).await.unwrap();

        assert_eq!(client.sent.len(), 3);
        assert!(!client.sent[0].headers.is_authenticated());
        assert_eq!(client.sent[2].headers.authorization().unwrap(), "Bearer tok");
        assert_eq!(&client.sent[2].headers, auth.headers());
    }

    #[tokio::test]
    async fn response_is_returned_uninterpreted() {
        let mut client = MockClient::replying([
            RecordedResponse::new(StatusCode::UNAUTHORIZED, "nope"),
        ]);
        let response = UsersBehavior
            .get_profile(&mut client, &SessionHeaders::new())
            .await
            .unwrap();
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.body, "nope");
    }
}
