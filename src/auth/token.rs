use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::config::TokenConfig;

/// Claims baked into a session token.
///
/// The token is treated as an opaque session key: authorization never decodes
/// it, validity always comes from the session row. The claims exist so the
/// token is correlated to its user and expiry, and `jti` guarantees two
/// issuances for the same user at the same instant still differ.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub exp: usize,
    pub iat: usize,
    pub iss: String,
    pub aud: String,
    pub jti: Uuid,
}

/// Mints opaque, URL-safe bearer tokens bound to a user and expiry instant.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    issuer: String,
    audience: String,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    pub fn issue(
        &self,
        user_id: Uuid,
        issued_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<String> {
        let claims = SessionClaims {
            sub: user_id,
            iat: issued_at.unix_timestamp() as usize,
            exp: expires_at.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            jti: Uuid::new_v4(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "session token issued");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn make_issuer() -> TokenIssuer {
        TokenIssuer::new(&crate::config::TokenConfig {
            secret: "test-secret".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            session_ttl_hours: 8,
        })
    }

    #[test]
    fn tokens_are_url_safe() {
        let issuer = make_issuer();
        let now = OffsetDateTime::now_utc();
        let token = issuer.issue(Uuid::new_v4(), now, now + Duration::hours(8)).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'));
    }

    #[test]
    fn same_user_same_instant_yields_distinct_tokens() {
        let issuer = make_issuer();
        let user_id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();
        let expires = now + Duration::hours(8);
        let a = issuer.issue(user_id, now, expires).unwrap();
        let b = issuer.issue(user_id, now, expires).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn token_encodes_user_and_expiry() {
        use jsonwebtoken::{decode, DecodingKey, Validation};

        let issuer = make_issuer();
        let user_id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();
        let expires = now + Duration::hours(8);
        let token = issuer.issue(user_id, now, expires).unwrap();

        let mut validation = Validation::default();
        validation.set_audience(&["test-aud"]);
        validation.set_issuer(&["test-issuer"]);
        let data = decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .expect("token decodes with the issuing secret");
        assert_eq!(data.claims.sub, user_id);
        assert_eq!(data.claims.exp, expires.unix_timestamp() as usize);
    }
}
