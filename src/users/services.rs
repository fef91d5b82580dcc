use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::guard;
use crate::error::ApiError;
use crate::users::repo::User;

/// Any signed-in user may view any profile.
pub async fn user_profile(db: &PgPool, token: &str, user_id: Uuid) -> Result<User, ApiError> {
    guard::authorize(db, token).await?;
    User::find_by_uuid(db, user_id)
        .await?
        .ok_or(ApiError::UserNotFound)
}

/// Admin-only. Ownership has no meaning here; a non-admin is rejected even
/// for their own account, and a missing target is 404 even for an admin.
pub async fn delete_user(db: &PgPool, token: &str, user_id: Uuid) -> Result<Uuid, ApiError> {
    let ctx = guard::authorize(db, token).await?;
    guard::require_admin(&ctx)?;

    let target = User::find_by_uuid(db, user_id)
        .await?
        .ok_or(ApiError::UserNotFound)?;
    User::delete(db, target.id).await?;
    info!(deleted_user_id = %target.id, admin_id = %ctx.user_id, "user deleted");
    Ok(target.id)
}
