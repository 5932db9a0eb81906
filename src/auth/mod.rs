//! Account authentication: password hashing and bearer tokens

mod password;
mod token;

pub use password::PasswordHasher;
pub(crate) use password::constant_time_eq;
pub use token::{bearer_token, Claims, TokenSigner};
