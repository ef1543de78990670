use actix_web::web;
use chrono::Utc;
use std::sync::Arc;

use crate::auth::application::ports::outgoing::{
    TokenClaims, TokenError, TokenProvider, TokenType,
};
use crate::user::application::domain::entities::UserId;

/// Readable, unsigned tokens: `access:{id}`, `refresh:{id}`, `reset:{email}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubTokenProvider;

impl StubTokenProvider {
    pub fn access_token_for(user_id: UserId) -> String {
        format!("access:{user_id}")
    }

    pub fn refresh_token_for(user_id: UserId) -> String {
        format!("refresh:{user_id}")
    }

    fn claims(sub: &str, token_type: TokenType) -> TokenClaims {
        let now = Utc::now().timestamp();
        TokenClaims {
            sub: sub.to_string(),
            exp: now + 1800,
            iat: now,
            nbf: now,
            token_type,
        }
    }
}

impl TokenProvider for StubTokenProvider {
    fn generate_access_token(&self, user_id: UserId) -> Result<String, TokenError> {
        Ok(Self::access_token_for(user_id))
    }

    fn generate_refresh_token(&self, user_id: UserId) -> Result<String, TokenError> {
        Ok(Self::refresh_token_for(user_id))
    }

    fn generate_password_reset_token(&self, email: &str) -> Result<String, TokenError> {
        Ok(format!("reset:{email}"))
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let (kind, sub) = token.split_once(':').ok_or(TokenError::MalformedToken)?;
        let token_type = match kind {
            "access" => TokenType::Access,
            "refresh" => TokenType::Refresh,
            "reset" => TokenType::PasswordReset,
            _ => return Err(TokenError::MalformedToken),
        };
        Ok(Self::claims(sub, token_type))
    }

    fn refresh_access_token(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claims = self.verify_token(refresh_token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(TokenError::InvalidTokenType(TokenType::Refresh));
        }
        self.generate_access_token(claims.user_id()?)
    }

    fn verify_password_reset_token(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::PasswordReset {
            return Err(TokenError::InvalidTokenType(TokenType::PasswordReset));
        }
        Ok(claims.sub)
    }

    fn access_token_ttl(&self) -> i64 {
        1800
    }
}

pub fn token_provider_data() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(StubTokenProvider);
    web::Data::new(provider)
}

pub fn bearer(user_id: UserId) -> (&'static str, String) {
    bearer_token(&StubTokenProvider::access_token_for(user_id))
}

pub fn bearer_token(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
