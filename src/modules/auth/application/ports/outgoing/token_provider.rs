use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::user::application::domain::entities::UserId;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenError {
    TokenExpired,
    TokenNotYetValid,
    InvalidTokenType(TokenType),
    InvalidSignature,
    MalformedToken,
    InvalidSubject,
    EncodingError(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::TokenExpired => write!(f, "Token has expired"),
            TokenError::TokenNotYetValid => write!(f, "Token is not yet valid"),
            TokenError::InvalidTokenType(expected) => {
                write!(f, "Invalid token type, expected: {}", expected.as_str())
            }
            TokenError::InvalidSignature => write!(f, "Invalid token signature"),
            TokenError::MalformedToken => write!(f, "Malformed token"),
            TokenError::InvalidSubject => write!(f, "Token subject is not a user id"),
            TokenError::EncodingError(msg) => write!(f, "Token encoding error: {}", msg),
        }
    }
}
impl Error for TokenError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
    PasswordReset,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
            TokenType::PasswordReset => "password_reset",
        }
    }
}

/// JWT claims. `sub` is a user id for access/refresh tokens and an e-mail
/// address for password reset tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub token_type: TokenType,
}

impl TokenClaims {
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub
            .parse::<i64>()
            .map(UserId::from)
            .map_err(|_| TokenError::InvalidSubject)
    }
}

pub trait TokenProvider: Send + Sync {
    fn generate_access_token(&self, user_id: UserId) -> Result<String, TokenError>;
    fn generate_refresh_token(&self, user_id: UserId) -> Result<String, TokenError>;
    fn generate_password_reset_token(&self, email: &str) -> Result<String, TokenError>;
    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
    fn refresh_access_token(&self, refresh_token: &str) -> Result<String, TokenError>;
    /// Returns the e-mail address the reset token was issued for.
    fn verify_password_reset_token(&self, token: &str) -> Result<String, TokenError>;
    /// Lifetime of access tokens in seconds.
    fn access_token_ttl(&self) -> i64;
}
