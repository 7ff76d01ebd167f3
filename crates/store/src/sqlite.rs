use crate::{PostRecord, PostStore};
use async_trait::async_trait;
use hive_primitives::BlockNumber;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;


const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS posts (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT UNIQUE,
    author TEXT,
    permlink TEXT,
    title TEXT,
    tags TEXT,
    block_num INTEGER,
    timestamp TEXT
);
CREATE INDEX IF NOT EXISTS idx_posts_block_num ON posts(block_num);
CREATE INDEX IF NOT EXISTS idx_posts_author ON posts(author);
";


/// SQLite-backed [`PostStore`].
///
/// The pool is opened once per run and dropped on every exit path;
/// the unique index on `url` is what makes inserts idempotent.
#[derive(Clone)]
pub struct SqlitePostStore {
    pool: SqlitePool,
}


impl SqlitePostStore {
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::raw_sql(SCHEMA).execute(&pool).await?;

        debug!(path = %path.as_ref().display(), "post store ready");

        Ok(Self { pool })
    }
}


#[async_trait]
impl PostStore for SqlitePostStore {
    async fn max_processed_height(&self) -> anyhow::Result<Option<BlockNumber>> {
        let max: Option<i64> = sqlx::query_scalar("SELECT MAX(block_num) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(max.map(|height| height as BlockNumber))
    }

    async fn insert_post_if_absent(&self, record: &PostRecord) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "INSERT INTO posts (url, author, permlink, title, tags, block_num, timestamp) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(url) DO NOTHING",
        )
        .bind(&record.url)
        .bind(&record.author)
        .bind(&record.permlink)
        .bind(&record.title)
        .bind(&record.tags)
        .bind(record.block_num as i64)
        .bind(&record.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
