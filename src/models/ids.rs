//! Integer ID newtypes for database-assigned row keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A database-assigned record ID (SQLite integer primary key).
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw row ID.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw row ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// Type alias for player IDs
pub type PlayerId = RecordId;

/// Type alias for match IDs
pub type MatchId = RecordId;

/// Type alias for forum post IDs
pub type PostId = RecordId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_roundtrip() {
        let id = RecordId::new(42);
        assert_eq!(id.as_i64(), 42);
    }

    #[test]
    fn test_record_id_from_i64() {
        let id = RecordId::from(7);
        assert_eq!(id, RecordId::new(7));
    }

    #[test]
    fn test_record_id_ordering() {
        assert!(RecordId::new(1) < RecordId::new(2));
    }

    #[test]
    fn test_record_id_display() {
        let id = RecordId::new(99);
        assert_eq!(format!("{}", id), "99");
    }

    #[test]
    fn test_record_id_debug() {
        let id = RecordId::new(3);
        assert_eq!(format!("{:?}", id), "RecordId(3)");
    }

    #[test]
    fn test_record_id_serialization() {
        let id = RecordId::new(12);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "12");
        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
