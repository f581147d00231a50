use std::time::Duration;

use super::*;

#[tokio::test]
async fn test_context_cancel() {
	let (ctx, handler) = Context::new();

	let handle = tokio::spawn(async move {
		let reason = ctx.done().await;
		assert_eq!(reason, CancelReason::Cancel);
	});

	tokio::time::timeout(Duration::from_millis(300), handler.cancel())
		.await
		.expect("context should be cancelled");
	tokio::time::timeout(Duration::from_millis(300), handle)
		.await
		.expect("task should finish")
		.expect("panic in task");
}

#[tokio::test]
async fn test_context_deadline() {
	let (ctx, mut handler) = Context::with_deadline(Instant::now() + Duration::from_millis(100));

	let handle = tokio::spawn(async move {
		let reason = ctx.done().await;
		assert_eq!(reason, CancelReason::Deadline);
	});

	tokio::time::timeout(Duration::from_millis(300), handle)
		.await
		.expect("deadline should expire")
		.expect("panic in task");
	tokio::time::timeout(Duration::from_millis(300), handler.done())
		.await
		.expect("handler should report done");
}

#[tokio::test]
async fn test_context_timeout() {
	let (ctx, mut handler) = Context::with_timeout(Duration::from_millis(100));

	let handle = tokio::spawn(async move {
		let reason = ctx.done().await;
		assert_eq!(reason, CancelReason::Deadline);
	});

	tokio::time::timeout(Duration::from_millis(300), handle)
		.await
		.expect("timeout should expire")
		.expect("panic in task");
	tokio::time::timeout(Duration::from_millis(300), handler.done())
		.await
		.expect("handler should report done");
}

#[tokio::test]
async fn test_context_parent() {
	let (parent, parent_handler) = Context::new();
	let (ctx, _handler) = Context::with_parent(parent, None);

	let handle = tokio::spawn(async move {
		let reason = ctx.done().await;
		assert_eq!(reason, CancelReason::Parent);
	});

	tokio::time::timeout(Duration::from_millis(300), parent_handler.cancel())
		.await
		.expect("parent should be cancelled");
	tokio::time::timeout(Duration::from_millis(300), handle)
		.await
		.expect("task should finish")
		.expect("panic in task");
}

#[tokio::test]
async fn test_context_is_done() {
	let (ctx, handler) = Context::new();

	assert!(!ctx.is_done());

	let waiter = tokio::spawn(async move {
		let reason = ctx.done().await;
		assert!(ctx.is_done());
		reason
	});

	tokio::time::timeout(Duration::from_millis(300), handler.cancel())
		.await
		.expect("context should be cancelled");

	assert_eq!(
		tokio::time::timeout(Duration::from_millis(300), waiter)
			.await
			.expect("task should finish")
			.expect("panic in task"),
		CancelReason::Cancel
	);
}
