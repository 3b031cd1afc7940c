//! The requests a simulated user sends, independent of the load test driver.

mod auth;
mod users;

pub use self::{
    auth::{AuthenticationBehavior, REGISTER_PATH, RegisterOutcome},
    users::{PROFILE_PATH, UsersBehavior},
};
