/// Authentication utilities
///
/// - `password`: Argon2id password hashing and verification
/// - `token`: random tokens for the password-reset flow

pub mod password;
pub mod token;
