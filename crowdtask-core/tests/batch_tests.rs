use crowdtask_core::*;
use pretty_assertions::assert_eq;

fn batch(id: &str) -> Option<BatchId> {
    Some(BatchId::new(id))
}

#[test]
fn test_sync_scope_sets_batch() {
    let seen = with_batch_sync("1234", current_batch_id);
    assert_eq!(seen, batch("1234"));
    assert_eq!(current_batch_id(), None);
}

#[test]
fn test_sync_scopes_nest_and_restore() {
    let seen = with_batch_sync("A", || {
        let outer = current_batch_id();
        let inner = with_batch_sync("B", current_batch_id);
        (outer, inner, current_batch_id())
    });

    assert_eq!(seen, (batch("A"), batch("B"), batch("A")));
    assert_eq!(current_batch_id(), None);
}

#[tokio::test]
async fn test_async_scopes_nest_and_restore() {
    let seen = with_batch("A", async {
        let outer = current_batch_id();
        let inner = with_batch("B", async { current_batch_id() }).await;
        (outer, inner, current_batch_id())
    })
    .await;

    assert_eq!(seen, (batch("A"), batch("B"), batch("A")));
    assert_eq!(current_batch_id(), None);
}

#[tokio::test]
async fn test_scope_survives_await_points() {
    let seen = with_batch("slow", async {
        tokio::task::yield_now().await;
        current_batch_id()
    })
    .await;

    assert_eq!(seen, batch("slow"));
}

#[tokio::test]
async fn test_concurrent_tasks_keep_their_own_batch() {
    let first = tokio::spawn(with_batch("first", async {
        tokio::task::yield_now().await;
        current_batch_id()
    }));
    let second = tokio::spawn(with_batch("second", async {
        tokio::task::yield_now().await;
        current_batch_id()
    }));

    assert_eq!(first.await.unwrap(), batch("first"));
    assert_eq!(second.await.unwrap(), batch("second"));
}

#[tokio::test]
async fn test_spawned_task_does_not_inherit_scope() {
    let seen = with_batch("parent", async {
        tokio::spawn(async { current_batch_id() }).await.unwrap()
    })
    .await;

    assert_eq!(seen, None);
}
