use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres};
use streamhub_core::models::{MediaFilter, MediaRecord, MediaUpdate, NewMedia};
use streamhub_core::AppError;
use uuid::Uuid;

use super::escape_like;
use super::traits::MediaStore;

/// Shared WHERE clause of the public listing and its count.
/// $1 = genre (exact, nullable), $2 = escaped ILIKE pattern (nullable).
const PUBLIC_FILTER: &str = r#"
    m.is_public = TRUE
    AND ($1::text IS NULL OR m.genre = $1)
    AND (
        $2::text IS NULL
        OR m.title ILIKE $2 ESCAPE '\'
        OR m.description ILIKE $2 ESCAPE '\'
        OR m.tags ILIKE $2 ESCAPE '\'
    )
"#;

#[derive(Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MediaStore for MediaRepository {
    #[tracing::instrument(skip(self, media), fields(db.table = "media", db.operation = "insert", user_id = %media.user_id))]
    async fn create(&self, media: NewMedia) -> Result<MediaRecord, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let record = sqlx::query_as::<Postgres, MediaRecord>(
            r#"
            INSERT INTO media (
                id, title, description, filename, file_size, file_type,
                genre, tags, duration, storage_url, thumbnail_url,
                is_public, view_count, user_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 0, $13, $14, $14)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&media.title)
        .bind(&media.description)
        .bind(&media.filename)
        .bind(media.file_size)
        .bind(&media.file_type)
        .bind(&media.genre)
        .bind(&media.tags)
        .bind(media.duration)
        .bind(&media.storage_url)
        .bind(&media.thumbnail_url)
        .bind(media.is_public)
        .bind(media.user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "select", db.record_id = %id))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MediaRecord>, AppError> {
        let record = sqlx::query_as::<Postgres, MediaRecord>(
            r#"
            SELECT m.*, u.username AS owner_username
            FROM media m
            LEFT JOIN users u ON u.id = m.user_id
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "select"))]
    async fn find_public(
        &self,
        filter: &MediaFilter,
    ) -> Result<(Vec<MediaRecord>, i64), AppError> {
        let pattern = filter
            .search
            .as_deref()
            .map(|term| format!("%{}%", escape_like(term)));

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM media m WHERE {}",
            PUBLIC_FILTER
        ))
        .bind(&filter.genre)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let records = sqlx::query_as::<Postgres, MediaRecord>(&format!(
            r#"
            SELECT m.*, u.username AS owner_username
            FROM media m
            LEFT JOIN users u ON u.id = m.user_id
            WHERE {}
            ORDER BY m.created_at DESC, m.id DESC
            LIMIT $3 OFFSET $4
            "#,
            PUBLIC_FILTER
        ))
        .bind(&filter.genre)
        .bind(&pattern)
        .bind(filter.limit)
        .bind(filter.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((records, total))
    }

    #[tracing::instrument(skip(self, update), fields(db.table = "media", db.operation = "update", db.record_id = %id))]
    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: &MediaUpdate,
    ) -> Result<Option<MediaRecord>, AppError> {
        let record = sqlx::query_as::<Postgres, MediaRecord>(
            r#"
            UPDATE media SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                genre = COALESCE($5, genre),
                tags = COALESCE($6, tags),
                thumbnail_url = COALESCE($7, thumbnail_url),
                is_public = COALESCE($8, is_public),
                updated_at = $9
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.genre)
        .bind(&update.tags)
        .bind(&update.thumbnail_url)
        .bind(update.is_public)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "delete", db.record_id = %id))]
    async fn delete_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM media WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "update", db.record_id = %id))]
    async fn increment_view_count(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE media SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
