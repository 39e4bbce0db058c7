use thiserror::Error;

#[derive(Debug, Error)]
pub enum HotelError {
    #[error("authentication failed")]
    AuthenticationFailure,

    #[error("email already registered: {0}")]
    RegistrationConflict(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("snapshot serialization error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

pub type HotelResult<T> = Result<T, HotelError>;
