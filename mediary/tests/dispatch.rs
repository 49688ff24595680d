use mediary::testing::{CountingHandler, FailingHandler};
use mediary::{
    BoxError, Cancellation, ContractHandler, DispatchError, InvocationPipeline, Mediator,
    PipelineRegistry,
};
use std::sync::atomic::Ordering;

mod common;
use common::{AuditCommand, CacheInvalidated, GreetRequest, Ping};

fn empty_mediator() -> Mediator {
    Mediator::new(PipelineRegistry::builder().build())
}

#[tokio::test]
async fn unrouted_request_captures_not_found() {
    let mediator = empty_mediator();
    let cx = mediator.execute_and_capture(Ping { seq: 1 }).await;
    assert!(cx.has_error());
    assert!(!cx.has_response());
    assert!(matches!(cx.error(), Some(DispatchError::NotFound { .. })));
}

#[tokio::test]
async fn unrouted_request_reraises_on_execute() {
    let mediator = empty_mediator();
    let result = mediator.execute(Ping { seq: 1 }).await;
    assert!(matches!(result, Err(DispatchError::NotFound { .. })));
}

#[tokio::test]
async fn unrouted_command_captures_not_found() {
    let mediator = empty_mediator();
    let result = mediator.send(AuditCommand { entry: "noop" }).await;
    assert!(matches!(result, Err(DispatchError::NotFound { .. })));
}

#[tokio::test]
async fn unrouted_event_is_a_clean_success() {
    let mediator = empty_mediator();
    let cx = mediator
        .execute_and_capture(CacheInvalidated { key: "users" })
        .await;
    assert!(!cx.has_error());
    assert!(mediator
        .publish(CacheInvalidated { key: "users" })
        .await
        .is_ok());
}

#[tokio::test]
async fn routed_request_returns_handler_response() {
    let handler = CountingHandler::new(41_u32);
    let calls = handler.counter();
    let registry = PipelineRegistry::builder()
        .register(
            InvocationPipeline::<Ping>::builder()
                .handler(handler)
                .build()
                .unwrap(),
        )
        .unwrap()
        .build();
    let mediator = Mediator::new(registry);

    assert_eq!(mediator.execute(Ping { seq: 0 }).await.unwrap(), 41);
    let cx = mediator.execute_and_capture(Ping { seq: 0 }).await;
    assert_eq!(cx.response(), Some(&41));
    assert!(cx.is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failing_handler_reraises_on_execute_and_captures_otherwise() {
    let handler = FailingHandler::new("backend down");
    let registry = PipelineRegistry::builder()
        .register(
            InvocationPipeline::<Ping>::builder()
                .handler(handler)
                .build()
                .unwrap(),
        )
        .unwrap()
        .build();
    let mediator = Mediator::new(registry);

    let err = mediator.execute(Ping { seq: 0 }).await.unwrap_err();
    assert!(err.to_string().contains("backend down"));

    let cx = mediator.execute_and_capture(Ping { seq: 0 }).await;
    assert!(cx.has_error());
    assert!(!cx.has_response());
    assert!(cx.error().unwrap().to_string().contains("backend down"));
}

#[tokio::test]
async fn send_dispatches_a_routed_command() {
    let handler = CountingHandler::new(mediary::CommandReceipt);
    let calls = handler.counter();
    let registry = PipelineRegistry::builder()
        .register(
            InvocationPipeline::<AuditCommand>::builder()
                .handler(handler)
                .build()
                .unwrap(),
        )
        .unwrap()
        .build();
    let mediator = Mediator::new(registry);

    mediator
        .send(AuditCommand { entry: "created" })
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

struct CancellationProbe;

impl ContractHandler<GreetRequest> for CancellationProbe {
    async fn handle(
        &self,
        request: &GreetRequest,
        cancellation: &Cancellation,
    ) -> Result<String, BoxError> {
        if cancellation.is_cancelled() {
            Ok(format!("skipped {}", request.name))
        } else {
            Ok(format!("hello {}", request.name))
        }
    }
}

#[tokio::test]
async fn cancellation_token_reaches_the_handler() {
    let registry = PipelineRegistry::builder()
        .register(
            InvocationPipeline::<GreetRequest>::builder()
                .handler(CancellationProbe)
                .build()
                .unwrap(),
        )
        .unwrap()
        .build();
    let mediator = Mediator::new(registry);

    let live = Cancellation::new();
    let greeted = mediator
        .execute_with(
            GreetRequest {
                name: "ada".into(),
            },
            &live,
        )
        .await
        .unwrap();
    assert_eq!(greeted, "hello ada");

    let cancelled = Cancellation::new();
    cancelled.cancel();
    let skipped = mediator
        .execute_with(
            GreetRequest {
                name: "ada".into(),
            },
            &cancelled,
        )
        .await
        .unwrap();
    assert_eq!(skipped, "skipped ada");
}
