pub mod password;

pub use password::{generate_token, hash_password, verify_password};
