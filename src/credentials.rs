//! Synthetic test data for simulated users.
//!
//! Nothing here is cryptographically secure. The email space is 26^8, so
//! collisions within one load test are possible but rare.

use rand::{Rng, distributions::Alphanumeric};
use serde::Serialize;


const EMAIL_LOCAL_PART_LEN: usize = 8;
const EMAIL_DOMAIN: &str = "example.com";
const PASSWORD_LEN: usize = 12;


/// Login data of one simulated user. Serializes to the JSON body expected by
/// the register endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Fresh random credentials from the thread local generator.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        Self {
            email: generate_email_with(rng),
            password: generate_password_with(rng),
        }
    }
}

/// Returns `<8 random lowercase letters>@example.com`.
pub fn generate_email() -> String {
    generate_email_with(&mut rand::thread_rng())
}

pub fn generate_email_with<R: Rng>(rng: &mut R) -> String {
    let local: String = (0..EMAIL_LOCAL_PART_LEN)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect();
    format!("{local}@{EMAIL_DOMAIN}")
}

/// Returns 12 characters drawn uniformly from `A-Z`, `a-z` and `0-9`.
pub fn generate_password() -> String {
    generate_password_with(&mut rand::thread_rng())
}

pub fn generate_password_with<R: Rng>(rng: &mut R) -> String {
    rng.sample_iter(Alphanumeric)
        .take(PASSWORD_LEN)
        .map(char::from)
        .collect()
}
