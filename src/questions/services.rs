use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::guard::{self, AuthContext};
use crate::error::ApiError;
use crate::questions::repo::Question;
use crate::users::repo::User;

pub async fn create_question(
    db: &PgPool,
    token: &str,
    content: &str,
) -> Result<Question, ApiError> {
    let ctx = guard::authorize(db, token).await?;
    let question = Question::create(db, ctx.user_id, content).await?;
    info!(question_id = %question.id, user_id = %ctx.user_id, "question created");
    Ok(question)
}

pub async fn all_questions(db: &PgPool, token: &str) -> Result<Vec<Question>, ApiError> {
    guard::authorize(db, token).await?;
    Ok(Question::list_all(db).await?)
}

/// Questions posted by one user; the target user must exist.
pub async fn questions_by_user(
    db: &PgPool,
    token: &str,
    user_id: Uuid,
) -> Result<Vec<Question>, ApiError> {
    guard::authorize(db, token).await?;
    if User::find_by_uuid(db, user_id).await?.is_none() {
        return Err(ApiError::UserNotFound);
    }
    Ok(Question::list_by_user(db, user_id).await?)
}

pub async fn edit_question(
    db: &PgPool,
    token: &str,
    question_id: Uuid,
    content: &str,
) -> Result<Question, ApiError> {
    let ctx = guard::authorize(db, token).await?;
    let question = resolve_owned(db, &ctx, question_id).await?;
    let updated = Question::update_content(db, question.id, content).await?;
    info!(question_id = %question.id, user_id = %ctx.user_id, "question edited");
    Ok(updated)
}

pub async fn delete_question(db: &PgPool, token: &str, question_id: Uuid) -> Result<(), ApiError> {
    let ctx = guard::authorize(db, token).await?;
    let question = resolve_owned(db, &ctx, question_id).await?;
    Question::delete(db, question.id).await?;
    info!(question_id = %question.id, user_id = %ctx.user_id, "question deleted");
    Ok(())
}

/// Existence then ownership, in that order, so a missing question reads as
/// 404 rather than 403.
async fn resolve_owned(
    db: &PgPool,
    ctx: &AuthContext,
    question_id: Uuid,
) -> Result<Question, ApiError> {
    let question = Question::find_by_uuid(db, question_id)
        .await?
        .ok_or(ApiError::QuestionNotFound)?;
    guard::require_owner_or_admin(ctx, question.user_id)?;
    Ok(question)
}
