//! In-memory rolling statistics store.
//!
//! Replaces ambient process-wide caches with an explicit store: one bounded
//! FIFO window per key, trimmed to the most recent [`WINDOW_CAPACITY`]
//! entries. Each key owns its own mutex so concurrent derivations for the
//! same player serialize their append-and-trim sequence without blocking
//! unrelated keys.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::models::{Game, MatchPlayerStat, TeamMatchStat};

/// Maximum records retained per key.
pub const WINDOW_CAPACITY: usize = 50;

/// Key for a player's rolling window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerKey {
    pub game: Game,
    pub player_name: String,
}

impl PlayerKey {
    pub fn new(game: Game, player_name: impl Into<String>) -> Self {
        Self {
            game,
            player_name: player_name.into(),
        }
    }
}

/// Key for a team's rolling window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeamKey {
    pub game: Game,
    pub team_name: String,
}

impl TeamKey {
    pub fn new(game: Game, team_name: impl Into<String>) -> Self {
        Self {
            game,
            team_name: team_name.into(),
        }
    }
}

/// A bounded FIFO window per key.
///
/// The outer map is read-locked on the hot path; each entry's vector sits
/// behind its own mutex, which is held for the whole read-modify-write of
/// an append.
pub struct RollingStore<K, T> {
    entries: RwLock<HashMap<K, Arc<Mutex<Vec<T>>>>>,
    capacity: usize,
}

impl<K, T> RollingStore<K, T>
where
    K: Eq + Hash + Clone,
    T: Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    async fn entry(&self, key: &K) -> Arc<Mutex<Vec<T>>> {
        {
            let map = self.entries.read().await;
            if let Some(entry) = map.get(key) {
                return Arc::clone(entry);
            }
        }
        let mut map = self.entries.write().await;
        Arc::clone(map.entry(key.clone()).or_default())
    }

    /// Append records to a key's window, trimming to capacity (oldest out).
    pub async fn append(&self, key: &K, records: impl IntoIterator<Item = T>) {
        let entry = self.entry(key).await;
        let mut window = entry.lock().await;
        window.extend(records);
        let len = window.len();
        if len > self.capacity {
            window.drain(..len - self.capacity);
        }
    }

    /// Clone out a key's current window, oldest first. Empty when unknown.
    pub async fn window(&self, key: &K) -> Vec<T> {
        let map = self.entries.read().await;
        match map.get(key) {
            Some(entry) => entry.lock().await.clone(),
            None => Vec::new(),
        }
    }

    /// Number of records currently held for a key.
    pub async fn len(&self, key: &K) -> usize {
        let map = self.entries.read().await;
        match map.get(key) {
            Some(entry) => entry.lock().await.len(),
            None => 0,
        }
    }

    /// All keys with at least one record.
    pub async fn keys(&self) -> Vec<K> {
        let map = self.entries.read().await;
        let mut keys = Vec::with_capacity(map.len());
        for (key, entry) in map.iter() {
            if !entry.lock().await.is_empty() {
                keys.push(key.clone());
            }
        }
        keys
    }
}

impl<K, T> Default for RollingStore<K, T>
where
    K: Eq + Hash + Clone,
    T: Clone,
{
    fn default() -> Self {
        Self::new(WINDOW_CAPACITY)
    }
}

/// The shared statistics store: player and team windows.
#[derive(Default)]
pub struct StatStore {
    pub players: RollingStore<PlayerKey, MatchPlayerStat>,
    pub teams: RollingStore<TeamKey, TeamMatchStat>,
}

impl StatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Player names with cached history for a title, sorted for stable
    /// listings.
    pub async fn player_names(&self, game: Game) -> Vec<String> {
        let mut names: Vec<String> = self
            .players
            .keys()
            .await
            .into_iter()
            .filter(|k| k.game == game)
            .map(|k| k.player_name)
            .collect();
        names.sort();
        names
    }

    /// All cached player windows for a title (used by the correlation
    /// rules, which need every role's recent records).
    pub async fn all_player_stats(&self, game: Game) -> Vec<MatchPlayerStat> {
        let mut all = Vec::new();
        for key in self.players.keys().await {
            if key.game == game {
                all.extend(self.players.window(&key).await);
            }
        }
        all
    }

    /// All cached team windows for a title, grouped per team in key order.
    pub async fn all_team_stats(&self, game: Game) -> Vec<TeamMatchStat> {
        let mut keys: Vec<TeamKey> = self
            .teams
            .keys()
            .await
            .into_iter()
            .filter(|k| k.game == game)
            .collect();
        keys.sort_by(|a, b| a.team_name.cmp(&b.team_name));

        let mut all = Vec::new();
        for key in keys {
            all.extend(self.teams.window(&key).await);
        }
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn record(n: u32) -> MatchPlayerStat {
        MatchPlayerStat::new(
            "Berserker".to_string(),
            format!("m-{n}"),
            n,
            Game::Lol,
            Role::Adc,
            "Zeri".to_string(),
            n,
            1,
            0,
            200,
            20,
            14000,
            12000,
            1800,
        )
    }

    #[tokio::test]
    async fn test_append_and_window() {
        let store = RollingStore::<PlayerKey, MatchPlayerStat>::default();
        let key = PlayerKey::new(Game::Lol, "Berserker");

        store.append(&key, vec![record(1), record(2)]).await;

        let window = store.window(&key).await;
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].match_id, "m-1");
        assert_eq!(window[1].match_id, "m-2");
    }

    #[tokio::test]
    async fn test_trim_keeps_last_fifty_in_order() {
        let store = RollingStore::<PlayerKey, MatchPlayerStat>::default();
        let key = PlayerKey::new(Game::Lol, "Berserker");

        for n in 1..=55 {
            store.append(&key, vec![record(n)]).await;
        }

        let window = store.window(&key).await;
        assert_eq!(window.len(), WINDOW_CAPACITY);
        assert_eq!(window.first().unwrap().match_id, "m-6");
        assert_eq!(window.last().unwrap().match_id, "m-55");

        // Relative order preserved
        for (i, stat) in window.iter().enumerate() {
            assert_eq!(stat.match_id, format!("m-{}", i + 6));
        }
    }

    #[tokio::test]
    async fn test_unknown_key_is_empty() {
        let store = RollingStore::<PlayerKey, MatchPlayerStat>::default();
        let key = PlayerKey::new(Game::Valorant, "nobody");

        assert!(store.window(&key).await.is_empty());
        assert_eq!(store.len(&key).await, 0);
    }

    #[tokio::test]
    async fn test_keys_partition_by_game() {
        let store = StatStore::new();
        store
            .players
            .append(&PlayerKey::new(Game::Lol, "Blaber"), vec![record(1)])
            .await;
        store
            .players
            .append(&PlayerKey::new(Game::Valorant, "OXY"), vec![record(2)])
            .await;

        assert_eq!(store.player_names(Game::Lol).await, vec!["Blaber"]);
        assert_eq!(store.player_names(Game::Valorant).await, vec!["OXY"]);
    }

    #[tokio::test]
    async fn test_concurrent_appends_do_not_lose_records() {
        let store = Arc::new(RollingStore::<PlayerKey, MatchPlayerStat>::new(100));
        let key = PlayerKey::new(Game::Lol, "Berserker");

        let mut handles = Vec::new();
        for n in 0..20 {
            let store = Arc::clone(&store);
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                store.append(&key, vec![record(n)]).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len(&key).await, 20);
    }
}
