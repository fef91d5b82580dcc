use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: OffsetDateTime,
}

impl Question {
    pub async fn create(db: &PgPool, user_id: Uuid, content: &str) -> anyhow::Result<Question> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (user_id, content)
            VALUES ($1, $2)
            RETURNING id, user_id, content, created_at
            "#,
        )
        .bind(user_id)
        .bind(content)
        .fetch_one(db)
        .await?;
        Ok(question)
    }

    pub async fn find_by_uuid(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, user_id, content, created_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(question)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Question>> {
        let rows = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, user_id, content, created_at
            FROM questions
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Question>> {
        let rows = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, user_id, content, created_at
            FROM questions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn update_content(db: &PgPool, id: Uuid, content: &str) -> anyhow::Result<Question> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions
            SET content = $1
            WHERE id = $2
            RETURNING id, user_id, content, created_at
            "#,
        )
        .bind(content)
        .bind(id)
        .fetch_one(db)
        .await?;
        Ok(question)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
