use crate::{
    behavior::{AuthenticationBehavior, RegisterOutcome, UsersBehavior},
    client::ApiClient,
    headers::SessionHeaders,
    prelude::*,
};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserState {
    Unregistered,
    Active,
}

/// One virtual client: registers once, then fetches its profile over and over.
#[derive(Debug)]
pub struct SimulatedUser {
    auth: AuthenticationBehavior,
    users: UsersBehavior,
    state: UserState,
}

impl SimulatedUser {
    pub fn new() -> Self {
        Self {
            auth: AuthenticationBehavior::new(),
            users: UsersBehavior,
            state: UserState::Unregistered,
        }
    }

    pub fn state(&self) -> UserState {
        self.state
    }

    pub fn headers(&self) -> &SessionHeaders {
        self.auth.headers()
    }

    /// Start of session hook. The user becomes active even if registration
    /// failed, in which case all further requests go out without
    /// `Authorization`. Transport errors are still returned so the driver
    /// can count them.
    pub async fn start<C: ApiClient>(&mut self, client: &mut C) -> Result<RegisterOutcome, C::Error> {
        if self.state == UserState::Active {
            warn!("simulated user already started, not registering again");
            return Ok(if self.headers().is_authenticated() {
                RegisterOutcome::Authenticated
            } else {
                RegisterOutcome::MissingToken
            });
        }

        let result = self.auth.register(client).await;
        self.state = UserState::Active;
        result
    }

    /// The repeated task.
    pub async fn profile<C: ApiClient>(&self, client: &mut C) -> Result<C::Response, C::Error> {
        if self.state == UserState::Unregistered {
            debug!("fetching profile before registration, sending without authorization");
        }
        self.users.get_profile(client, self.auth.headers()).await
    }
}

impl Default for SimulatedUser {
    fn default() -> Self {
        Self::new()
    }
}
