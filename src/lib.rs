//! Load test for the users API: simulated users register a fresh account
//! once and then keep fetching their profile with the issued bearer token.

pub mod attack;
pub mod behavior;
pub mod check;
pub mod cli;
pub mod client;
pub mod config;
pub mod credentials;
pub mod headers;
pub mod log;
pub mod user;
pub mod util;

mod prelude;
