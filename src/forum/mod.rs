//! Forum post store.
//!
//! Posts are stored verbatim and cleaned of markup on the way out, so
//! a change to the cleaning rules applies to already stored content.

mod sanitize;

pub use sanitize::clean_html;

use std::path::Path;

use chrono::Utc;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{Sqlite, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::models::{Post, PostId};
use crate::store::StoreError;

/// Forum database over a SQLite connection pool.
pub struct ForumDb {
    db: SqlitePool,
}

impl ForumDb {
    /// Open the forum database at `path`, creating it and its schema
    /// if needed.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let url = format!("sqlite://{}", path.display());
        if !Sqlite::database_exists(&url).await? {
            Sqlite::create_database(&url).await?;
        }

        let db = SqlitePool::connect(&url).await?;
        let store = Self { db };
        store.init_schema().await?;
        info!(path = %path.display(), "opened forum database");
        Ok(store)
    }

    /// Open a fresh in-memory database.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { db };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "create table if not exists posts(
                id integer primary key autoincrement,
                content text not null,
                created_at text not null
            )",
        )
        .execute(&self.db)
        .await?;
        Ok(())
    }

    /// Add a new post, storing the content as given.
    pub async fn add_post(&self, content: &str) -> Result<PostId, StoreError> {
        let result = sqlx::query("insert into posts(content, created_at) values(?, ?)")
            .bind(content)
            .bind(Utc::now())
            .execute(&self.db)
            .await?;

        let id = PostId::new(result.last_insert_rowid());
        debug!(%id, "added forum post");
        Ok(id)
    }

    /// All posts, newest first, with content cleaned of markup.
    pub async fn posts(&self) -> Result<Vec<Post>, StoreError> {
        let posts: Vec<Post> = sqlx::query_as(
            "select id, content, created_at from posts
              order by created_at desc, id desc",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(posts
            .into_iter()
            .map(|post| Post {
                content: clean_html(&post.content),
                ..post
            })
            .collect())
    }
}
