//! Forum post model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PostId;

/// A forum post.
///
/// Content is stored verbatim and cleaned of markup when read back
/// through [`crate::forum::ForumDb::posts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    /// Database-assigned unique identifier
    pub id: PostId,

    /// Post text content
    pub content: String,

    /// When the post was created
    pub created_at: DateTime<Utc>,
}
