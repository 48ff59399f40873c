//! Postgres repository implementation using Diesel.
//!
//! The `posts` table is used as a document collection: one row per post, with
//! the post's comments embedded in a `JSONB` array column.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Atomic comment append (`comments = comments || $1`) by post ID
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::sql_types::{Jsonb, Uuid as SqlUuid};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::db::repository::{ErrorContext, PostRepository, RepositoryError, RepositoryResult};
use crate::models::{Comment, CommentId, NewEntry, Post, PostId};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

const APPEND_COMMENT_SQL: &str = "UPDATE posts SET comments = comments || $1 WHERE id = $2";

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// See the module documentation for the variables read and their defaults.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    ///
    /// This blocks while the pool fills and migrations run; call it from
    /// `spawn_blocking` when inside a runtime.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Run a blocking database operation on a pooled connection.
    ///
    /// Failures are returned as-is; there is no retry.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new(operation).with_details("get_connection"),
                )
            })?;

            f(&mut conn).map_err(|e| e.with_operation(operation))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn post_not_found(post_id: PostId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Post {} not found", post_id),
        ErrorContext::default()
            .with_entity("post")
            .with_entity_id(post_id),
    )
}

#[async_trait]
impl PostRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn insert_post(&self, entry: NewEntry) -> RepositoryResult<PostId> {
        let post_id = PostId::generate();
        let row = NewPostRow {
            id: post_id.value(),
            content: entry.content,
            posted_at: entry.timestamp,
            comments: serde_json::Value::Array(Vec::new()),
        };

        self.with_conn("insert_post", move |conn| {
            diesel::insert_into(posts::table)
                .values(&row)
                .execute(conn)
                .map_err(RepositoryError::from)?;
            Ok(post_id)
        })
        .await
    }

    async fn list_posts(&self) -> RepositoryResult<Vec<Post>> {
        self.with_conn("list_posts", |conn| {
            let rows = posts::table
                .order(posts::posted_at.desc())
                .select(PostRow::as_select())
                .load::<PostRow>(conn)
                .map_err(RepositoryError::from)?;

            rows.into_iter().map(Post::try_from).collect()
        })
        .await
    }

    async fn get_post(&self, post_id: PostId) -> RepositoryResult<Post> {
        self.with_conn("get_post", move |conn| {
            let row = posts::table
                .find(post_id.value())
                .select(PostRow::as_select())
                .first::<PostRow>(conn)
                .optional()
                .map_err(RepositoryError::from)?
                .ok_or_else(|| post_not_found(post_id))?;

            Post::try_from(row)
        })
        .await
    }

    async fn push_comment(&self, post_id: PostId, entry: NewEntry) -> RepositoryResult<CommentId> {
        let comment = Comment::new(CommentId::generate(), entry);
        let payload = serde_json::to_value([CommentDocument::from(&comment)]).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Failed to encode comment: {}", e),
                ErrorContext::new("push_comment").with_entity("comment"),
            )
        })?;

        self.with_conn("push_comment", move |conn| {
            let matched = sql_query(APPEND_COMMENT_SQL)
                .bind::<Jsonb, _>(payload)
                .bind::<SqlUuid, _>(post_id.value())
                .execute(conn)
                .map_err(RepositoryError::from)?;

            if matched == 0 {
                return Err(post_not_found(post_id));
            }
            Ok(comment.id)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_with_url_uses_defaults() {
        let config = PostgresConfig::with_url("postgres://localhost/forum");
        assert_eq!(config.database_url, "postgres://localhost/forum");
        assert_eq!(config.max_pool_size, 10);
        assert_eq!(config.min_pool_size, 1);
        assert_eq!(config.connection_timeout_sec, 30);
        assert_eq!(config.idle_timeout_sec, 600);
    }

    #[test]
    fn test_env_or_falls_back_when_unset() {
        assert_eq!(env_or("FORUM_TEST_UNSET_POOL_VALUE", 7u32), 7);
    }
}
