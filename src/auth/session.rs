use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One sign-in. Rows are append-only: sign-out sets `logged_out_at`, nothing
/// ever deletes them, so the table doubles as an audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub access_token: String,
    pub issued_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
    pub logged_out_at: Option<OffsetDateTime>,
}

impl Session {
    /// Liveness is derived at read time, never stored: not logged out and
    /// not past the expiry instant.
    pub fn is_live(&self, now: OffsetDateTime) -> bool {
        self.logged_out_at.is_none() && now < self.expires_at
    }

    /// Returns the session for a token whatever its state, so callers can
    /// tell "no such session" apart from "already logged out".
    pub async fn find_by_token(db: &PgPool, token: &str) -> anyhow::Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, access_token, issued_at, expires_at, logged_out_at
            FROM sessions
            WHERE access_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(session)
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        access_token: &str,
        issued_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<Session> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (user_id, access_token, issued_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, access_token, issued_at, expires_at, logged_out_at
            "#,
        )
        .bind(user_id)
        .bind(access_token)
        .bind(issued_at)
        .bind(expires_at)
        .fetch_one(db)
        .await?;
        Ok(session)
    }

    /// The single mutation a session ever sees.
    pub async fn mark_logged_out(
        db: &PgPool,
        id: Uuid,
        logged_out_at: OffsetDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE sessions SET logged_out_at = $1 WHERE id = $2")
            .bind(logged_out_at)
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn session(expires_in: Duration, logged_out: bool) -> (Session, OffsetDateTime) {
        let now = OffsetDateTime::now_utc();
        let session = Session {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            access_token: "tok".into(),
            issued_at: now - Duration::hours(1),
            expires_at: now + expires_in,
            logged_out_at: logged_out.then_some(now - Duration::minutes(5)),
        };
        (session, now)
    }

    #[test]
    fn fresh_session_is_live() {
        let (s, now) = session(Duration::hours(7), false);
        assert!(s.is_live(now));
    }

    #[test]
    fn logged_out_session_is_dead_even_before_expiry() {
        let (s, now) = session(Duration::hours(7), true);
        assert!(!s.is_live(now));
    }

    #[test]
    fn expired_session_is_dead_even_without_logout() {
        let (s, now) = session(Duration::hours(-1), false);
        assert!(!s.is_live(now));
    }

    #[test]
    fn expiry_instant_itself_is_dead() {
        let (s, _) = session(Duration::hours(7), false);
        assert!(!s.is_live(s.expires_at));
    }
}
