use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: Uuid,
    pub question_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: OffsetDateTime,
}

impl Answer {
    pub async fn create(
        db: &PgPool,
        question_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> anyhow::Result<Answer> {
        let answer = sqlx::query_as::<_, Answer>(
            r#"
            INSERT INTO answers (question_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, question_id, user_id, content, created_at
            "#,
        )
        .bind(question_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(db)
        .await?;
        Ok(answer)
    }

    pub async fn find_by_uuid(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Answer>> {
        let answer = sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, question_id, user_id, content, created_at
            FROM answers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(answer)
    }

    pub async fn list_by_question(db: &PgPool, question_id: Uuid) -> anyhow::Result<Vec<Answer>> {
        let rows = sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, question_id, user_id, content, created_at
            FROM answers
            WHERE question_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(question_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn update_content(db: &PgPool, id: Uuid, content: &str) -> anyhow::Result<Answer> {
        let answer = sqlx::query_as::<_, Answer>(
            r#"
            UPDATE answers
            SET content = $1
            WHERE id = $2
            RETURNING id, question_id, user_id, content, created_at
            "#,
        )
        .bind(content)
        .bind(id)
        .fetch_one(db)
        .await?;
        Ok(answer)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
