use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::auth::session::Session;
use crate::error::ApiError;
use crate::users::repo::{Role, User};

/// Identity and role resolved from a live session, handed to the operation
/// that passed the guard.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: Role,
}

/// Resolves a bearer token to a live session.
///
/// The single authorization primitive: every protected operation calls this
/// first, then layers `require_owner_or_admin` / `require_admin` on the
/// result as its scope demands. Short-circuits on the first failure; no
/// mutation ever precedes it.
pub async fn authorize(db: &PgPool, token: &str) -> Result<AuthContext, ApiError> {
    let session = Session::find_by_token(db, token).await?;
    let session = check_liveness(session.as_ref(), OffsetDateTime::now_utc())?;
    // Role lives on the user row; a session whose user vanished is no session.
    let user = User::find_by_uuid(db, session.user_id)
        .await?
        .ok_or(ApiError::Unauthenticated)?;
    debug!(user_id = %user.id, "request authorized");
    Ok(AuthContext {
        user_id: user.id,
        role: user.role,
    })
}

/// Liveness decision, separated from the lookup so it stays pure.
fn check_liveness<'a>(
    session: Option<&'a Session>,
    now: OffsetDateTime,
) -> Result<&'a Session, ApiError> {
    let session = session.ok_or(ApiError::Unauthenticated)?;
    if !session.is_live(now) {
        return Err(ApiError::SessionExpired);
    }
    Ok(session)
}

/// Owner-or-admin rule for resource mutations.
pub fn require_owner_or_admin(ctx: &AuthContext, owner_id: Uuid) -> Result<(), ApiError> {
    if ctx.user_id == owner_id || ctx.role.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// Admin-only rule; ownership does not apply.
pub fn require_admin(ctx: &AuthContext) -> Result<(), ApiError> {
    if ctx.role.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// Extracts the raw bearer token from the Authorization header. Resolution
/// against the session store happens in `authorize`, not here.
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .unwrap_or(auth);

        Ok(BearerToken(token.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn live_session(user_id: Uuid) -> Session {
        let now = OffsetDateTime::now_utc();
        Session {
            id: Uuid::new_v4(),
            user_id,
            access_token: "tok".into(),
            issued_at: now,
            expires_at: now + Duration::hours(8),
            logged_out_at: None,
        }
    }

    #[test]
    fn missing_session_is_unauthenticated() {
        let err = check_liveness(None, OffsetDateTime::now_utc()).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[test]
    fn logged_out_session_is_expired() {
        let mut s = live_session(Uuid::new_v4());
        s.logged_out_at = Some(OffsetDateTime::now_utc());
        let err = check_liveness(Some(&s), OffsetDateTime::now_utc()).unwrap_err();
        assert!(matches!(err, ApiError::SessionExpired));
    }

    #[test]
    fn logged_out_wins_even_with_future_expiry() {
        let mut s = live_session(Uuid::new_v4());
        s.expires_at = OffsetDateTime::now_utc() + Duration::hours(100);
        s.logged_out_at = Some(OffsetDateTime::now_utc() - Duration::seconds(1));
        let err = check_liveness(Some(&s), OffsetDateTime::now_utc()).unwrap_err();
        assert!(matches!(err, ApiError::SessionExpired));
    }

    #[test]
    fn past_expiry_session_is_expired() {
        let mut s = live_session(Uuid::new_v4());
        s.expires_at = OffsetDateTime::now_utc() - Duration::minutes(1);
        let err = check_liveness(Some(&s), OffsetDateTime::now_utc()).unwrap_err();
        assert!(matches!(err, ApiError::SessionExpired));
    }

    #[test]
    fn live_session_passes() {
        let user_id = Uuid::new_v4();
        let s = live_session(user_id);
        let resolved = check_liveness(Some(&s), OffsetDateTime::now_utc()).unwrap();
        assert_eq!(resolved.user_id, user_id);
    }

    #[test]
    fn owner_passes_ownership_check() {
        let user_id = Uuid::new_v4();
        let ctx = AuthContext {
            user_id,
            role: Role::NonAdmin,
        };
        assert!(require_owner_or_admin(&ctx, user_id).is_ok());
    }

    #[test]
    fn admin_passes_ownership_check_for_any_owner() {
        let ctx = AuthContext {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
        };
        assert!(require_owner_or_admin(&ctx, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn non_owner_non_admin_is_forbidden() {
        let ctx = AuthContext {
            user_id: Uuid::new_v4(),
            role: Role::NonAdmin,
        };
        let err = require_owner_or_admin(&ctx, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[test]
    fn require_admin_rejects_nonadmin_owner() {
        let ctx = AuthContext {
            user_id: Uuid::new_v4(),
            role: Role::NonAdmin,
        };
        assert!(matches!(require_admin(&ctx).unwrap_err(), ApiError::Forbidden));
        let admin = AuthContext {
            user_id: ctx.user_id,
            role: Role::Admin,
        };
        assert!(require_admin(&admin).is_ok());
    }
}
