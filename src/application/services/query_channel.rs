use crate::application::ports::ResourceClient;
use crate::domain::entities::PostList;
use crate::domain::value_objects::CacheKey;
use crate::infrastructure::cache::{CacheSnapshot, CacheStore};
use crate::shared::error::AppError;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, warn};

type SharedRead = Shared<BoxFuture<'static, Result<PostList, AppError>>>;

/// How a read ended for the caller that awaited it.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The result was the latest for its key and has been written to the
    /// cache.
    Fresh(PostList),
    /// A newer read or an optimistic write superseded this one; its result
    /// was discarded.
    Superseded,
}

#[derive(Default)]
struct ReadSlot {
    /// Generation whose result is allowed to land in the cache.
    latest: u64,
    in_flight: Option<(u64, SharedRead)>,
}

/// Read path: loads cache entries from the resource client.
///
/// At most one live read per key: `fetch` joins the read already in flight,
/// `refetch` supersedes it, and `cancel` discards it. A superseded read may
/// still finish on the network, but its result never reaches the cache.
pub struct QueryChannel {
    client: Arc<dyn ResourceClient>,
    store: Arc<CacheStore>,
    slots: Mutex<HashMap<CacheKey, ReadSlot>>,
    generation: AtomicU64,
    background: Mutex<JoinSet<()>>,
}

impl QueryChannel {
    pub fn new(client: Arc<dyn ResourceClient>, store: Arc<CacheStore>) -> Self {
        Self {
            client,
            store,
            slots: Mutex::new(HashMap::new()),
            generation: AtomicU64::new(0),
            background: Mutex::new(JoinSet::new()),
        }
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    /// キャッシュを取得する。同じキーの読み込みが進行中ならそれに相乗りする
    pub async fn fetch(&self, key: CacheKey) -> Result<FetchOutcome, AppError> {
        let (generation, read) = {
            let mut slots = self.slots.lock().await;
            let slot = slots.entry(key).or_default();
            match &slot.in_flight {
                Some((generation, read)) => {
                    debug!(key = %key, generation, "joining in-flight read");
                    (*generation, read.clone())
                }
                None => self.issue(key, slot),
            }
        };
        self.settle(key, generation, read).await
    }

    /// 進行中の読み込みを破棄して新しく読み込む（最後の要求が勝つ）
    pub async fn refetch(&self, key: CacheKey) -> Result<FetchOutcome, AppError> {
        let (generation, read) = {
            let mut slots = self.slots.lock().await;
            let slot = slots.entry(key).or_default();
            self.issue(key, slot)
        };
        self.settle(key, generation, read).await
    }

    /// Discards whatever read is in flight for `key`.
    pub async fn cancel(&self, key: CacheKey) {
        let mut slots = self.slots.lock().await;
        self.discard(key, slots.entry(key).or_default());
    }

    /// 楽観的書き込み。進行中の読み込みを破棄してからストアへ適用する
    ///
    /// Both happen under the read slots lock, so no read can be issued or
    /// land between the cancellation and the optimistic value.
    pub async fn stage<F>(&self, key: CacheKey, apply: F) -> CacheSnapshot
    where
        F: FnOnce(Option<PostList>) -> Option<PostList>,
    {
        let mut slots = self.slots.lock().await;
        self.discard(key, slots.entry(key).or_default());
        self.store.stage(key, apply).await
    }

    /// Invalidation path: refetches `key` on a background task.
    pub async fn reconcile(self: &Arc<Self>, key: CacheKey) {
        let channel = Arc::clone(self);
        let mut background = self.background.lock().await;
        while background.try_join_next().is_some() {}
        background.spawn(async move {
            match channel.refetch(key).await {
                Ok(FetchOutcome::Fresh(posts)) => {
                    debug!(key = %key, count = posts.len(), "reconciled with server");
                }
                Ok(FetchOutcome::Superseded) => {
                    debug!(key = %key, "reconciliation superseded");
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "reconciliation read failed");
                }
            }
        });
    }

    /// Waits until no background reconciliation is left, including ones
    /// started while waiting.
    pub async fn wait_for_reconciliation(&self) {
        loop {
            let mut running = std::mem::take(&mut *self.background.lock().await);
            if running.is_empty() {
                return;
            }
            while let Some(joined) = running.join_next().await {
                match joined {
                    Ok(()) => {}
                    Err(err) if err.is_cancelled() => {
                        debug!("reconciliation task aborted");
                    }
                    Err(err) => {
                        warn!(error = %err, "reconciliation task ended abnormally");
                    }
                }
            }
        }
    }

    /// Aborts background reconciliation that has not finished yet. Tasks a
    /// caller is currently waiting on are left to that caller.
    pub fn abort_reconciliation(&self) {
        match self.background.try_lock() {
            Ok(mut background) => {
                if !background.is_empty() {
                    debug!(tasks = background.len(), "aborting reconciliation");
                }
                background.abort_all();
            }
            Err(_) => warn!("reconciliation tasks busy; leaving them to finish"),
        }
    }

    fn discard(&self, key: CacheKey, slot: &mut ReadSlot) {
        slot.latest = self.next_generation();
        if let Some((generation, _)) = slot.in_flight.take() {
            debug!(key = %key, generation, "cancelled in-flight read");
        }
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn issue(&self, key: CacheKey, slot: &mut ReadSlot) -> (u64, SharedRead) {
        let generation = self.next_generation();
        let client = Arc::clone(&self.client);
        let read = async move {
            match key {
                CacheKey::Posts => client.list_posts().await,
            }
        }
        .boxed()
        .shared();

        if let Some((superseded, _)) = slot.in_flight.replace((generation, read.clone())) {
            debug!(key = %key, superseded, generation, "superseding in-flight read");
        }
        slot.latest = generation;
        debug!(key = %key, generation, "issued read");
        (generation, read)
    }

    async fn settle(
        &self,
        key: CacheKey,
        generation: u64,
        read: SharedRead,
    ) -> Result<FetchOutcome, AppError> {
        let result = read.await;

        // Held until the result is stored so an optimistic write cannot
        // slip in between the generation check and the store write.
        let mut slots = self.slots.lock().await;
        let slot = slots.entry(key).or_default();
        if slot.latest != generation {
            debug!(key = %key, generation, "discarding superseded read");
            return Ok(FetchOutcome::Superseded);
        }
        let first_to_settle =
            matches!(&slot.in_flight, Some((in_flight, _)) if *in_flight == generation);
        if first_to_settle {
            slot.in_flight = None;
        }

        // Coalesced callers share one result; only the first writes it.
        match result {
            Ok(posts) => {
                if first_to_settle {
                    self.store.store_fetched(key, posts.clone()).await;
                }
                Ok(FetchOutcome::Fresh(posts))
            }
            Err(err) => {
                if first_to_settle {
                    warn!(key = %key, error = %err, "read failed; keeping cached value");
                    self.store.record_fetch_error(key, err.clone()).await;
                }
                Err(err)
            }
        }
    }
}
