use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use std::fmt;
use tracing;

use crate::auth::application::ports::outgoing::token_provider::{
    TokenClaims, TokenError, TokenProvider, TokenType,
};
use crate::user::application::domain::entities::UserId;

use super::jwt_config::JwtConfig;

#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &"JwtConfig")
            .finish()
    }
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn generate_token(
        &self,
        subject: String,
        token_type: TokenType,
        expiry_seconds: i64,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(expiry_seconds);

        let claims = TokenClaims {
            sub: subject,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            token_type,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))
    }

    fn verify_typed(&self, token: &str, expected: TokenType) -> Result<TokenClaims, TokenError> {
        let claims = self.verify_token(token)?;

        if claims.token_type != expected {
            tracing::warn!(
                expected = expected.as_str(),
                actual = claims.token_type.as_str(),
                "Token type mismatch"
            );
            return Err(TokenError::InvalidTokenType(expected));
        }

        Ok(claims)
    }
}

impl TokenProvider for JwtTokenService {
    fn generate_access_token(&self, user_id: UserId) -> Result<String, TokenError> {
        self.generate_token(
            user_id.to_string(),
            TokenType::Access,
            self.config.access_token_expiry,
        )
    }

    fn generate_refresh_token(&self, user_id: UserId) -> Result<String, TokenError> {
        self.generate_token(
            user_id.to_string(),
            TokenType::Refresh,
            self.config.refresh_token_expiry,
        )
    }

    fn generate_password_reset_token(&self, email: &str) -> Result<String, TokenError> {
        self.generate_token(
            email.to_string(),
            TokenType::PasswordReset,
            self.config.password_reset_token_expiry,
        )
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.validate_nbf = true;

        let decoded =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token verification failed: Token expired");
                        TokenError::TokenExpired
                    }
                    ErrorKind::ImmatureSignature => {
                        tracing::warn!("Token verification failed: Token not yet valid");
                        TokenError::TokenNotYetValid
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::error!("Security alert: Invalid token signature detected");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                        tracing::error!("Security alert: Malformed or invalid algorithm token");
                        TokenError::MalformedToken
                    }
                    _ => {
                        tracing::warn!("Token verification failed: Malformed token");
                        TokenError::MalformedToken
                    }
                }
            })?;

        Ok(decoded.claims)
    }

    fn refresh_access_token(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claims = self.verify_typed(refresh_token, TokenType::Refresh)?;
        let user_id = claims.user_id()?;

        tracing::debug!(user_id = %user_id, "Refresh token validated, issuing access token");
        self.generate_access_token(user_id)
    }

    fn verify_password_reset_token(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.verify_typed(token, TokenType::PasswordReset)?;
        Ok(claims.sub)
    }

    fn access_token_ttl(&self) -> i64 {
        self.config.access_token_expiry
    }
}
