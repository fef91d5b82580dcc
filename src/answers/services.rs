use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::answers::repo::Answer;
use crate::auth::guard::{self, AuthContext};
use crate::error::ApiError;
use crate::questions::repo::Question;

/// Posting an answer requires a live session and an existing question.
pub async fn create_answer(
    db: &PgPool,
    token: &str,
    question_id: Uuid,
    content: &str,
) -> Result<Answer, ApiError> {
    let ctx = guard::authorize(db, token).await?;
    let question = Question::find_by_uuid(db, question_id)
        .await?
        .ok_or(ApiError::QuestionNotFound)?;
    let answer = Answer::create(db, question.id, ctx.user_id, content).await?;
    info!(answer_id = %answer.id, question_id = %question.id, user_id = %ctx.user_id, "answer created");
    Ok(answer)
}

pub async fn edit_answer(
    db: &PgPool,
    token: &str,
    answer_id: Uuid,
    content: &str,
) -> Result<Answer, ApiError> {
    let ctx = guard::authorize(db, token).await?;
    let answer = resolve_owned(db, &ctx, answer_id).await?;
    let updated = Answer::update_content(db, answer.id, content).await?;
    info!(answer_id = %answer.id, user_id = %ctx.user_id, "answer edited");
    Ok(updated)
}

pub async fn delete_answer(db: &PgPool, token: &str, answer_id: Uuid) -> Result<(), ApiError> {
    let ctx = guard::authorize(db, token).await?;
    let answer = resolve_owned(db, &ctx, answer_id).await?;
    Answer::delete(db, answer.id).await?;
    info!(answer_id = %answer.id, user_id = %ctx.user_id, "answer deleted");
    Ok(())
}

/// Answers to one question, along with the question for context.
pub async fn answers_for_question(
    db: &PgPool,
    token: &str,
    question_id: Uuid,
) -> Result<(Question, Vec<Answer>), ApiError> {
    guard::authorize(db, token).await?;
    let question = Question::find_by_uuid(db, question_id)
        .await?
        .ok_or(ApiError::QuestionNotFound)?;
    let answers = Answer::list_by_question(db, question.id).await?;
    Ok((question, answers))
}

async fn resolve_owned(db: &PgPool, ctx: &AuthContext, answer_id: Uuid) -> Result<Answer, ApiError> {
    let answer = Answer::find_by_uuid(db, answer_id)
        .await?
        .ok_or(ApiError::AnswerNotFound)?;
    guard::require_owner_or_admin(ctx, answer.user_id)?;
    Ok(answer)
}
