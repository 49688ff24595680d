use mediary::testing::{CountingHandler, FailingHandler};
use mediary::{
    Cancellation, ComponentResolver, DispatchError, HandlerResolver, InvocationPipeline,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

mod common;
use common::{CacheInvalidated, Ping};

fn instance<C: mediary::Contract>(
    handler: impl mediary::ContractHandler<C>,
) -> HandlerResolver<C> {
    ComponentResolver::instance(Arc::new(handler))
}

#[tokio::test]
async fn sequential_delivery_is_last_writer_wins() {
    let first = CountingHandler::new(1_u32);
    let second = CountingHandler::new(2_u32);
    let first_calls = first.counter();
    let second_calls = second.counter();

    let pipeline = InvocationPipeline::<Ping>::builder()
        .sequential_handlers(vec![instance(first), instance(second)])
        .unwrap()
        .build()
        .unwrap();

    let cx = pipeline.handle(Ping { seq: 0 }, &Cancellation::new()).await;
    assert!(cx.is_success());
    assert_eq!(cx.response(), Some(&2));
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn sequential_delivery_stops_at_the_first_failure() {
    let failing = FailingHandler::new("first broke");
    let skipped = CountingHandler::new(2_u32);
    let skipped_calls = skipped.counter();

    let pipeline = InvocationPipeline::<Ping>::builder()
        .sequential_handlers(vec![instance(failing), instance(skipped)])
        .unwrap()
        .build()
        .unwrap();

    let cx = pipeline.handle(Ping { seq: 0 }, &Cancellation::new()).await;
    assert!(cx.has_error());
    assert_eq!(skipped_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn parallel_delivery_runs_every_handler_despite_a_failure() {
    let failing = FailingHandler::new("subscriber one broke");
    let succeeding = CountingHandler::new(mediary::EventReceipt);
    let failing_calls = failing.counter();
    let succeeding_calls = succeeding.counter();

    let pipeline = InvocationPipeline::<CacheInvalidated>::builder()
        .parallel_handlers(vec![instance(failing), instance(succeeding)])
        .unwrap()
        .build()
        .unwrap();

    let cx = pipeline
        .handle(CacheInvalidated { key: "users" }, &Cancellation::new())
        .await;

    assert_eq!(failing_calls.load(Ordering::SeqCst), 1);
    assert_eq!(succeeding_calls.load(Ordering::SeqCst), 1);
    assert!(cx.has_error());
    assert!(
        cx.error()
            .unwrap()
            .to_string()
            .contains("subscriber one broke")
    );
}

#[tokio::test]
async fn parallel_delivery_aggregates_multiple_failures_flat() {
    let first = FailingHandler::new("one");
    let second = FailingHandler::new("two");

    let pipeline = InvocationPipeline::<CacheInvalidated>::builder()
        .parallel_handlers(vec![instance(first), instance(second)])
        .unwrap()
        .build()
        .unwrap();

    let cx = pipeline
        .handle(CacheInvalidated { key: "users" }, &Cancellation::new())
        .await;

    let error = cx.error().unwrap();
    let members = error.flattened();
    assert_eq!(members.len(), 2);
    assert!(
        members
            .iter()
            .all(|m| !matches!(m, DispatchError::Aggregate(_)))
    );
}

#[tokio::test]
async fn transient_handler_resolver_builds_per_dispatch() {
    let factory_calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&factory_calls);
    let resolver: HandlerResolver<Ping> = ComponentResolver::transient(move || {
        counted.fetch_add(1, Ordering::SeqCst);
        Arc::new(CountingHandler::new(7_u32)) as Arc<dyn mediary::DynContractHandler<Ping>>
    });

    let pipeline = InvocationPipeline::<Ping>::builder()
        .handler_resolver(resolver)
        .build()
        .unwrap();

    let token = Cancellation::new();
    pipeline.handle(Ping { seq: 0 }, &token).await;
    pipeline.handle(Ping { seq: 1 }, &token).await;
    assert_eq!(factory_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn deferred_handler_resolver_builds_once_across_dispatches() {
    let factory_calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&factory_calls);
    let resolver: HandlerResolver<Ping> = ComponentResolver::deferred(move || {
        counted.fetch_add(1, Ordering::SeqCst);
        Arc::new(CountingHandler::new(7_u32)) as Arc<dyn mediary::DynContractHandler<Ping>>
    });

    let pipeline = InvocationPipeline::<Ping>::builder()
        .handler_resolver(resolver)
        .build()
        .unwrap();

    let token = Cancellation::new();
    let first = pipeline.handle(Ping { seq: 0 }, &token).await;
    let second = pipeline.handle(Ping { seq: 1 }, &token).await;
    assert_eq!(first.response(), Some(&7));
    assert_eq!(second.response(), Some(&7));
    assert_eq!(factory_calls.load(Ordering::SeqCst), 1);
}
