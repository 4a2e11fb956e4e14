use crate::domain::entities::PostList;
use crate::domain::value_objects::CacheKey;
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::{watch, RwLock};
use tracing::debug;

/// キャッシュエントリの状態（購読者へ配信される）
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub key: CacheKey,
    /// `None` は未取得
    pub value: Option<PostList>,
    pub is_stale: bool,
    pub pending_mutations: usize,
    pub last_error: Option<AppError>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Bumped on every value replacement.
    pub version: u64,
}

impl QueryState {
    fn empty(key: CacheKey) -> Self {
        Self {
            key,
            value: None,
            is_stale: false,
            pending_mutations: 0,
            last_error: None,
            updated_at: None,
            version: 0,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }
}

/// Rollback token returned by [`CacheStore::snapshot`] and
/// [`CacheStore::stage`]. Owned by whoever took it; the store keeps no copy.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    key: CacheKey,
    value: Option<PostList>,
    version: u64,
}

struct CacheEntry {
    state: QueryState,
    sender: watch::Sender<QueryState>,
}

impl CacheEntry {
    fn new(key: CacheKey) -> Self {
        let state = QueryState::empty(key);
        let (sender, _) = watch::channel(state.clone());
        Self { state, sender }
    }

    fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            key: self.state.key,
            value: self.state.value.clone(),
            version: self.state.version,
        }
    }

    fn replace_value(&mut self, value: Option<PostList>) {
        self.state.value = value;
        self.state.version += 1;
        self.state.updated_at = Some(Utc::now());
    }

    fn publish(&self) {
        self.sender.send_replace(self.state.clone());
    }
}

/// Session-scoped in-memory store for server-derived collections.
///
/// Each operation runs under a single write guard, so a reader never sees a
/// half-applied change. Every change is pushed to the key's watch channel.
pub struct CacheStore {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    async fn with_entry<R>(&self, key: CacheKey, f: impl FnOnce(&mut CacheEntry) -> R) -> R {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(key).or_insert_with(|| CacheEntry::new(key));
        let result = f(entry);
        entry.publish();
        result
    }

    /// 最後に保持している値を返す（未取得なら `None`）
    pub async fn read(&self, key: CacheKey) -> Option<PostList> {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&key) {
                return entry.state.value.clone();
            }
        }
        let mut entries = self.entries.write().await;
        entries
            .entry(key)
            .or_insert_with(|| CacheEntry::new(key))
            .state
            .value
            .clone()
    }

    pub async fn state(&self, key: CacheKey) -> QueryState {
        let entries = self.entries.read().await;
        entries
            .get(&key)
            .map(|entry| entry.state.clone())
            .unwrap_or_else(|| QueryState::empty(key))
    }

    /// 値を丸ごと置き換える
    pub async fn write(&self, key: CacheKey, value: Option<PostList>) {
        self.with_entry(key, |entry| entry.replace_value(value)).await;
        debug!(key = %key, "cache entry replaced");
    }

    /// Replaces the value with `f(current)` under one guard and returns the
    /// new value.
    pub async fn update<F>(&self, key: CacheKey, f: F) -> Option<PostList>
    where
        F: FnOnce(Option<PostList>) -> Option<PostList>,
    {
        self.with_entry(key, |entry| {
            let next = f(entry.state.value.take());
            entry.replace_value(next.clone());
            next
        })
        .await
    }

    pub async fn snapshot(&self, key: CacheKey) -> CacheSnapshot {
        let entries = self.entries.read().await;
        match entries.get(&key) {
            Some(entry) => entry.snapshot(),
            None => CacheSnapshot {
                key,
                value: None,
                version: 0,
            },
        }
    }

    /// スナップショット時点の値へ巻き戻す
    pub async fn restore(&self, token: CacheSnapshot) {
        let key = token.key;
        let from_version = token.version;
        self.with_entry(key, |entry| entry.replace_value(token.value)).await;
        debug!(key = %key, from_version, "cache entry restored from snapshot");
    }

    /// Marks the entry stale. Data is kept until a re-fetch replaces it.
    pub async fn invalidate(&self, key: CacheKey) {
        self.with_entry(key, |entry| entry.state.is_stale = true).await;
        debug!(key = %key, "cache entry invalidated");
    }

    pub async fn is_stale(&self, key: CacheKey) -> bool {
        self.state(key).await.is_stale
    }

    pub async fn subscribe(&self, key: CacheKey) -> watch::Receiver<QueryState> {
        let mut entries = self.entries.write().await;
        entries
            .entry(key)
            .or_insert_with(|| CacheEntry::new(key))
            .sender
            .subscribe()
    }

    /// Optimistic write: snapshots the current value, replaces it with
    /// `apply(current)` and counts the mutation as pending, all under one
    /// guard. A mutation staged while another is pending snapshots the
    /// already-optimistic value.
    pub async fn stage<F>(&self, key: CacheKey, apply: F) -> CacheSnapshot
    where
        F: FnOnce(Option<PostList>) -> Option<PostList>,
    {
        self.with_entry(key, |entry| {
            let token = entry.snapshot();
            let next = apply(entry.state.value.clone());
            entry.replace_value(next);
            entry.state.pending_mutations += 1;
            token
        })
        .await
    }

    pub async fn end_mutation(&self, key: CacheKey) {
        self.with_entry(key, |entry| {
            entry.state.pending_mutations = entry.state.pending_mutations.saturating_sub(1);
        })
        .await;
    }

    pub async fn pending_mutations(&self, key: CacheKey) -> usize {
        self.state(key).await.pending_mutations
    }

    /// Stores a successful read: replaces the value and clears staleness and
    /// the last read error.
    pub async fn store_fetched(&self, key: CacheKey, value: PostList) {
        let count = value.len();
        self.with_entry(key, |entry| {
            entry.replace_value(Some(value));
            entry.state.is_stale = false;
            entry.state.last_error = None;
        })
        .await;
        debug!(key = %key, count, "cache entry refreshed");
    }

    /// Records a failed read. The cached value is left untouched.
    pub async fn record_fetch_error(&self, key: CacheKey, error: AppError) {
        self.with_entry(key, |entry| entry.state.last_error = Some(error)).await;
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}
