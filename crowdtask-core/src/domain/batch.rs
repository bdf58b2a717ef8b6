//! Batch scoping for uploads
//!
//! Tasks uploaded without an explicit batch id are tagged with the batch of
//! the innermost enclosing scope. Scopes are task-local: concurrent tasks
//! never observe each other's batch, and the previous value is restored when
//! a scope ends, including by panic.

use std::future::Future;

use crate::domain::ids::BatchId;

tokio::task_local! {
    static CURRENT_BATCH: Option<BatchId>;
}

/// Batch id of the innermost active scope.
pub fn current_batch_id() -> Option<BatchId> {
    CURRENT_BATCH
        .try_with(|batch| batch.clone())
        .ok()
        .flatten()
}

/// Run `future` with `batch_id` as the ambient batch.
pub async fn with_batch<F>(batch_id: impl Into<BatchId>, future: F) -> F::Output
where
    F: Future,
{
    CURRENT_BATCH.scope(Some(batch_id.into()), future).await
}

/// Synchronous counterpart of [`with_batch`].
pub fn with_batch_sync<R>(batch_id: impl Into<BatchId>, f: impl FnOnce() -> R) -> R {
    CURRENT_BATCH.sync_scope(Some(batch_id.into()), f)
}
