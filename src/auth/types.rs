use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to create token: {0}")]
    TokenCreation(String),

    #[error("Failed to verify token: {0}")]
    TokenVerification(String),

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    MissingToken,

    #[error("Inactive user")]
    InactiveUser,

    #[error("Failed to hash password: {0}")]
    Hashing(String),
}
