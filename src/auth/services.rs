use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::Session;
use crate::auth::token::TokenIssuer;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::{NewUser, Role, User};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Profile fields for a new account, plaintext password included. The
/// plaintext never goes further than `hash_password`.
#[derive(Debug)]
pub struct SignupProfile<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
}

/// Registers a new account. Both uniqueness checks run before any write, so
/// a rejected signup leaves nothing behind. No session is created.
pub async fn signup(db: &PgPool, profile: &SignupProfile<'_>) -> Result<User, ApiError> {
    if User::find_by_username(db, profile.username).await?.is_some() {
        warn!(username = %profile.username, "signup username taken");
        return Err(ApiError::DuplicateUsername);
    }
    if User::find_by_email(db, profile.email).await?.is_some() {
        warn!(email = %profile.email, "signup email taken");
        return Err(ApiError::DuplicateEmail);
    }

    let (salt, digest) = hash_password(profile.password)?;
    let user = User::create(
        db,
        &NewUser {
            username: profile.username,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            role: Role::NonAdmin,
            password_hash: &digest,
            password_salt: &salt,
        },
    )
    .await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Verifies credentials and opens a new session.
///
/// Concurrent sign-ins for the same user each get their own live session;
/// there is no single-session-per-user rule.
pub async fn signin(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<(User, Session), ApiError> {
    let user = User::find_by_username(&state.db, username)
        .await?
        .ok_or_else(|| {
            warn!(username = %username, "signin unknown username");
            ApiError::UnknownUser
        })?;

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = %user.id, "signin invalid password");
        return Err(ApiError::BadCredential);
    }

    let issued_at = OffsetDateTime::now_utc();
    let expires_at = issued_at + Duration::hours(state.config.token.session_ttl_hours);
    let token = TokenIssuer::new(&state.config.token).issue(user.id, issued_at, expires_at)?;
    let session = Session::create(&state.db, user.id, &token, issued_at, expires_at).await?;

    info!(user_id = %user.id, session_id = %session.id, "user signed in");
    Ok((user, session))
}

/// Closes the session behind a bearer token.
///
/// A token that resolves to nothing, or to a session that was already signed
/// out, is rejected the same way: the caller is not signed in. The session
/// row itself is retained.
pub async fn signout(db: &PgPool, token: &str) -> Result<Session, ApiError> {
    let session = Session::find_by_token(db, token)
        .await?
        .ok_or(ApiError::NotSignedIn)?;
    if session.logged_out_at.is_some() {
        return Err(ApiError::NotSignedIn);
    }

    Session::mark_logged_out(db, session.id, OffsetDateTime::now_utc()).await?;
    info!(user_id = %session.user_id, session_id = %session.id, "user signed out");
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaces in@x.com"));
    }
}
