use super::{Mutation, MutationEvent};
use crate::application::ports::ResourceClient;
use crate::application::services::query_channel::QueryChannel;
use crate::infrastructure::cache::CacheSnapshot;
use crate::shared::error::MutationError;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Runs one kind of write with optimistic-UI semantics:
///
/// 1. cancel in-flight reads of the key
/// 2. snapshot and apply the optimistic projection
/// 3. call the resource client
/// 4. commit the server result, or restore the snapshot on failure
/// 5. invalidate the key and re-fetch it in the background
///
/// Steps 3 to 5 run on their own task, so a caller that stops waiting
/// does not cancel a write that has been issued.
///
/// Pipelines on the same key are not serialized. A mutation started while
/// another is pending snapshots the already-optimistic value, so its rollback
/// does not undo the earlier write.
pub struct MutationPipeline<M: Mutation> {
    mutation: Arc<M>,
    client: Arc<dyn ResourceClient>,
    queries: Arc<QueryChannel>,
    events: broadcast::Sender<MutationEvent>,
    reconcile: bool,
}

impl<M: Mutation> MutationPipeline<M> {
    pub fn new(
        mutation: M,
        client: Arc<dyn ResourceClient>,
        queries: Arc<QueryChannel>,
        events: broadcast::Sender<MutationEvent>,
    ) -> Self {
        Self {
            mutation: Arc::new(mutation),
            client,
            queries,
            events,
            reconcile: true,
        }
    }

    /// Turns the background re-fetch after settlement on or off.
    pub fn with_reconciliation(mut self, reconcile: bool) -> Self {
        self.reconcile = reconcile;
        self
    }

    pub fn mutation(&self) -> &M {
        &self.mutation
    }

    pub async fn execute(&self, input: M::Input) -> Result<M::Output, MutationError> {
        let key = self.mutation.key();
        let kind = self.mutation.kind();

        let token = self
            .queries
            .stage(key, |current| self.mutation.apply(current, &input))
            .await;
        debug!(kind = %kind, key = %key, "optimistic update applied");

        let settlement = Settlement {
            mutation: Arc::clone(&self.mutation),
            client: Arc::clone(&self.client),
            queries: Arc::clone(&self.queries),
            events: self.events.clone(),
            reconcile: self.reconcile,
        };
        match tokio::spawn(settlement.run(input, token)).await {
            Ok(result) => result,
            Err(err) => {
                warn!(kind = %kind, error = %err, "mutation task ended abnormally");
                Err(MutationError::Rejected {
                    kind,
                    source: err.into(),
                })
            }
        }
    }
}

/// 楽観的更新の確定またはロールバック（呼び出し元から切り離して実行）
struct Settlement<M: Mutation> {
    mutation: Arc<M>,
    client: Arc<dyn ResourceClient>,
    queries: Arc<QueryChannel>,
    events: broadcast::Sender<MutationEvent>,
    reconcile: bool,
}

impl<M: Mutation> Settlement<M> {
    async fn run(self, input: M::Input, token: CacheSnapshot) -> Result<M::Output, MutationError> {
        let key = self.mutation.key();
        let kind = self.mutation.kind();
        let store = self.queries.store();

        let result = match self.mutation.invoke(self.client.as_ref(), &input).await {
            Ok(output) => {
                store
                    .update(key, |current| self.mutation.commit(current, &output, &input))
                    .await;
                info!(kind = %kind, "mutation committed");
                let _ = self.events.send(MutationEvent::Committed { kind });
                Ok(output)
            }
            Err(error) => {
                warn!(kind = %kind, error = %error, "mutation rejected; rolling back");
                store.restore(token).await;
                let _ = self.events.send(MutationEvent::Reverted {
                    kind,
                    error: error.clone(),
                });
                Err(MutationError::Rejected {
                    kind,
                    source: error,
                })
            }
        };

        store.end_mutation(key).await;
        store.invalidate(key).await;
        if self.reconcile {
            self.queries.reconcile(key).await;
        }
        result
    }
}
