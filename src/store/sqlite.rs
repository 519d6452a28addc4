//! SQLite-backed tournament store.

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{Sqlite, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::models::{MatchId, MatchKey, MatchRecord, Player, PlayerId};

use super::{MatchHistoryProvider, MatchRecorder, StandingsProvider, StoreError};

/// Tournament database over a SQLite connection pool.
pub struct TournamentDb {
    db: SqlitePool,
}

impl TournamentDb {
    /// Open the tournament database at `path`, creating it and its
    /// schema if needed.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let url = format!("sqlite://{}", path.display());
        if !Sqlite::database_exists(&url).await? {
            Sqlite::create_database(&url).await?;
        }

        let db = SqlitePool::connect(&url).await?;
        let store = Self { db };
        store.init_schema().await?;
        info!(path = %path.display(), "opened tournament database");
        Ok(store)
    }

    /// Open a fresh in-memory database.
    ///
    /// The pool is capped at a single connection; the in-memory
    /// database lives only as long as that connection.
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
            "create table if not exists players(
                id integer primary key autoincrement,
                name text not null,
                created_at text not null
            )",
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            "create table if not exists matches(
                id integer primary key autoincrement,
                player_low integer not null references players(id),
                player_high integer not null references players(id),
                winner integer references players(id),
                created_at text not null
            )",
        )
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Register a new player; the database assigns the ID.
    pub async fn register_player(&self, name: &str) -> Result<PlayerId, StoreError> {
        let result = sqlx::query("insert into players(name, created_at) values(?, ?)")
            .bind(name)
            .bind(Utc::now())
            .execute(&self.db)
            .await?;

        let id = PlayerId::new(result.last_insert_rowid());
        debug!(%id, name, "registered player");
        Ok(id)
    }

    /// Number of currently registered players.
    pub async fn count_players(&self) -> Result<u32, StoreError> {
        Ok(sqlx::query_scalar("select count(*) from players")
            .fetch_one(&self.db)
            .await?)
    }

    /// Look up a single player with their current record.
    pub async fn player(&self, id: PlayerId) -> Result<Player, StoreError> {
        sqlx::query_as::<_, Player>(
            "select p.id, p.name,
                    (select count(*) from matches m
                      where m.winner = p.id
                         or (m.player_low = p.id and m.player_high = p.id)) as wins,
                    (select count(*) from matches m
                      where m.player_low = p.id or m.player_high = p.id) as matches_played
               from players p
              where p.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::PlayerNotFound(id))
    }

    /// All recorded matches, oldest first.
    pub async fn matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        Ok(sqlx::query_as::<_, MatchRecord>(
            "select id, player_low, player_high, winner, created_at
               from matches order by id asc",
        )
        .fetch_all(&self.db)
        .await?)
    }

    /// Remove all match records.
    pub async fn delete_matches(&self) -> Result<(), StoreError> {
        sqlx::query("delete from matches").execute(&self.db).await?;
        info!("deleted all match records");
        Ok(())
    }

    /// Remove all player records along with their matches.
    pub async fn delete_players(&self) -> Result<(), StoreError> {
        let mut tx = self.db.begin().await?;
        sqlx::query("delete from matches").execute(&mut *tx).await?;
        sqlx::query("delete from players").execute(&mut *tx).await?;
        tx.commit().await?;
        info!("deleted all player records");
        Ok(())
    }

    async fn require_player(&self, id: PlayerId) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i64>("select id from players where id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .map(|_| ())
            .ok_or(StoreError::PlayerNotFound(id))
    }
}

#[async_trait]
impl StandingsProvider for TournamentDb {
    /// Standings computed from the match records: a bye counts as a
    /// win and a played match. Ties are broken by ascending player ID,
    /// which keeps the order stable across calls.
    async fn standings(&self) -> Result<Vec<Player>, StoreError> {
        Ok(sqlx::query_as::<_, Player>(
            "select p.id, p.name,
                    (select count(*) from matches m
                      where m.winner = p.id
                         or (m.player_low = p.id and m.player_high = p.id)) as wins,
                    (select count(*) from matches m
                      where m.player_low = p.id or m.player_high = p.id) as matches_played
               from players p
              order by wins desc, p.id asc",
        )
        .fetch_all(&self.db)
        .await?)
    }
}

#[async_trait]
impl MatchHistoryProvider for TournamentDb {
    async fn match_history(&self) -> Result<HashSet<MatchKey>, StoreError> {
        let rows: Vec<(PlayerId, PlayerId)> =
            sqlx::query_as("select player_low, player_high from matches")
                .fetch_all(&self.db)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(low, high)| MatchKey::new(low, high))
            .collect())
    }
}

#[async_trait]
impl MatchRecorder for TournamentDb {
    async fn record_match(&self, winner: PlayerId, loser: PlayerId) -> Result<MatchId, StoreError> {
        if winner == loser {
            return Err(StoreError::SelfMatch);
        }
        self.require_player(winner).await?;
        self.require_player(loser).await?;

        let key = MatchKey::new(winner, loser);
        let result = sqlx::query(
            "insert into matches(player_low, player_high, winner, created_at)
             values(?, ?, ?, ?)",
        )
        .bind(key.low())
        .bind(key.high())
        .bind(winner)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        debug!(%winner, %loser, "recorded match result");
        Ok(MatchId::new(result.last_insert_rowid()))
    }

    async fn record_bye(&self, player: PlayerId) -> Result<MatchId, StoreError> {
        self.require_player(player).await?;

        let result = sqlx::query(
            "insert into matches(player_low, player_high, winner, created_at)
             values(?, ?, null, ?)",
        )
        .bind(player)
        .bind(player)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        debug!(%player, "recorded bye");
        Ok(MatchId::new(result.last_insert_rowid()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_count_players() {
        let db = TournamentDb::open_in_memory().await.unwrap();
        assert_eq!(db.count_players().await.unwrap(), 0);

        db.register_player("Ada").await.unwrap();
        db.register_player("Grace").await.unwrap();
        assert_eq!(db.count_players().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_fresh_standings_have_empty_records() {
        let db = TournamentDb::open_in_memory().await.unwrap();
        let a = db.register_player("Ada").await.unwrap();
        let b = db.register_player("Grace").await.unwrap();

        let standings = db.standings().await.unwrap();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].id, a);
        assert_eq!(standings[1].id, b);
        for player in &standings {
            assert_eq!(player.wins, 0);
            assert_eq!(player.matches_played, 0);
        }
    }

    #[tokio::test]
    async fn test_recorded_match_shows_up_in_standings() {
        let db = TournamentDb::open_in_memory().await.unwrap();
        let a = db.register_player("Ada").await.unwrap();
        let b = db.register_player("Grace").await.unwrap();

        db.record_match(b, a).await.unwrap();

        let standings = db.standings().await.unwrap();
        assert_eq!(standings[0].id, b);
        assert_eq!(standings[0].wins, 1);
        assert_eq!(standings[0].matches_played, 1);
        assert_eq!(standings[1].id, a);
        assert_eq!(standings[1].wins, 0);
        assert_eq!(standings[1].matches_played, 1);
    }

    #[tokio::test]
    async fn test_bye_counts_as_automatic_win() {
        let db = TournamentDb::open_in_memory().await.unwrap();
        let a = db.register_player("Ada").await.unwrap();

        db.record_bye(a).await.unwrap();

        let player = db.player(a).await.unwrap();
        assert_eq!(player.wins, 1);
        assert_eq!(player.matches_played, 1);
        assert!(player.record_is_consistent());
    }

    #[tokio::test]
    async fn test_match_is_stored_with_normalized_pair() {
        let db = TournamentDb::open_in_memory().await.unwrap();
        let a = db.register_player("Ada").await.unwrap();
        let b = db.register_player("Grace").await.unwrap();

        // Winner listed second after normalization
        db.record_match(b, a).await.unwrap();

        let matches = db.matches().await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].player_low, a);
        assert_eq!(matches[0].player_high, b);
        assert_eq!(matches[0].winner, Some(b));
        assert!(!matches[0].is_bye());
    }

    #[tokio::test]
    async fn test_history_key_is_order_independent() {
        let db = TournamentDb::open_in_memory().await.unwrap();
        let a = db.register_player("Ada").await.unwrap();
        let b = db.register_player("Grace").await.unwrap();

        db.record_match(b, a).await.unwrap();

        let history = db.match_history().await.unwrap();
        assert!(history.contains(&MatchKey::new(a, b)));
        assert!(history.contains(&MatchKey::new(b, a)));
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_bye_appears_in_history_as_bye_key() {
        let db = TournamentDb::open_in_memory().await.unwrap();
        let a = db.register_player("Ada").await.unwrap();

        db.record_bye(a).await.unwrap();

        let history = db.match_history().await.unwrap();
        assert!(history.contains(&MatchKey::bye(a)));
    }

    #[tokio::test]
    async fn test_self_match_is_rejected() {
        let db = TournamentDb::open_in_memory().await.unwrap();
        let a = db.register_player("Ada").await.unwrap();

        let err = db.record_match(a, a).await.unwrap_err();
        assert!(matches!(err, StoreError::SelfMatch));
    }

    #[tokio::test]
    async fn test_unknown_player_is_rejected() {
        let db = TournamentDb::open_in_memory().await.unwrap();
        let a = db.register_player("Ada").await.unwrap();
        let ghost = PlayerId::new(999);

        let err = db.record_match(a, ghost).await.unwrap_err();
        assert!(matches!(err, StoreError::PlayerNotFound(id) if id == ghost));

        let err = db.record_bye(ghost).await.unwrap_err();
        assert!(matches!(err, StoreError::PlayerNotFound(id) if id == ghost));
    }

    #[tokio::test]
    async fn test_delete_matches_keeps_players() {
        let db = TournamentDb::open_in_memory().await.unwrap();
        let a = db.register_player("Ada").await.unwrap();
        let b = db.register_player("Grace").await.unwrap();
        db.record_match(a, b).await.unwrap();

        db.delete_matches().await.unwrap();

        assert_eq!(db.count_players().await.unwrap(), 2);
        assert!(db.matches().await.unwrap().is_empty());
        assert_eq!(db.player(a).await.unwrap().wins, 0);
    }

    #[tokio::test]
    async fn test_delete_players_removes_matches_too() {
        let db = TournamentDb::open_in_memory().await.unwrap();
        let a = db.register_player("Ada").await.unwrap();
        let b = db.register_player("Grace").await.unwrap();
        db.record_match(a, b).await.unwrap();

        db.delete_players().await.unwrap();

        assert_eq!(db.count_players().await.unwrap(), 0);
        assert!(db.matches().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_standings_order_by_wins_then_id() {
        let db = TournamentDb::open_in_memory().await.unwrap();
        let a = db.register_player("Ada").await.unwrap();
        let b = db.register_player("Grace").await.unwrap();
        let c = db.register_player("Alan").await.unwrap();
        let d = db.register_player("Barbara").await.unwrap();

        db.record_match(c, a).await.unwrap();
        db.record_match(d, b).await.unwrap();

        let standings = db.standings().await.unwrap();
        let ids: Vec<PlayerId> = standings.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![c, d, a, b]);

        // Stable on repeated calls
        let again = db.standings().await.unwrap();
        assert_eq!(standings, again);
    }

    #[tokio::test]
    async fn test_file_backed_database_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tournament.db");

        {
            let db = TournamentDb::open(&path).await.unwrap();
            db.register_player("Ada").await.unwrap();
        }

        let db = TournamentDb::open(&path).await.unwrap();
        assert_eq!(db.count_players().await.unwrap(), 1);
    }
}
