// Application error type and result alias, built on thiserror.
use thiserror::Error;

pub mod response;
pub mod store;
pub mod token;

pub use store::StoreError;
pub use token::TokenError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Unauthorized(String),

    // Token failures convert through From so `?` works on TokenService results.
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
