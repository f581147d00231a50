use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CancelReason {
	Parent,
	Deadline,
	Cancel,
}

impl Display for CancelReason {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Parent => write!(f, "Parent"),
			Self::Deadline => write!(f, "Deadline"),
			Self::Cancel => write!(f, "Cancel"),
		}
	}
}

struct RawContext {
	cancel: CancellationToken,
	deadline: Option<Instant>,
	parent: Option<Context>,
	// Cancelled on drop, which is what wakes `Handler::done`.
	_done: DropGuard,
}

impl RawContext {
	#[must_use]
	fn new() -> (Self, Handler) {
		let cancel = CancellationToken::new();
		let done = CancellationToken::new();

		(
			Self {
				cancel: cancel.clone(),
				deadline: None,
				parent: None,
				_done: done.clone().drop_guard(),
			},
			Handler { cancel, done },
		)
	}

	#[must_use]
	fn with_deadline(deadline: Instant) -> (Self, Handler) {
		let (mut ctx, handler) = Self::new();
		ctx.deadline = Some(deadline);
		(ctx, handler)
	}

	#[must_use]
	fn with_parent(parent: Context, deadline: Option<Instant>) -> (Self, Handler) {
		let (mut ctx, handler) = Self::new();
		ctx.parent = Some(parent);
		ctx.deadline = deadline;
		(ctx, handler)
	}

	fn done(&self) -> Pin<Box<dyn Future<Output = CancelReason> + '_ + Send>> {
		Box::pin(async move {
			match (&self.parent, self.deadline) {
				(Some(parent), Some(deadline)) => {
					tokio::select! {
						_ = parent.done() => CancelReason::Parent,
						_ = tokio::time::sleep_until(deadline) => CancelReason::Deadline,
						_ = self.cancel.cancelled() => CancelReason::Cancel,
					}
				}
				(Some(parent), None) => {
					tokio::select! {
						_ = parent.done() => CancelReason::Parent,
						_ = self.cancel.cancelled() => CancelReason::Cancel,
					}
				}
				(None, Some(deadline)) => {
					tokio::select! {
						_ = tokio::time::sleep_until(deadline) => CancelReason::Deadline,
						_ = self.cancel.cancelled() => CancelReason::Cancel,
					}
				}
				(None, None) => {
					self.cancel.cancelled().await;
					CancelReason::Cancel
				}
			}
		})
	}

	fn is_done(&self) -> bool {
		self.cancel.is_cancelled()
			|| self.deadline.map(|d| d <= Instant::now()).unwrap_or(false)
			|| self.parent.as_ref().map(|p| p.is_done()).unwrap_or(false)
	}
}

pub struct Handler {
	cancel: CancellationToken,
	done: CancellationToken,
}

impl Handler {
	/// Resolves once every `Context` belonging to this handler has been dropped.
	pub async fn done(&mut self) {
		self.done.cancelled().await;
	}

	/// Cancels all contexts and waits for them to be dropped.
	pub async fn cancel(self) {
		self.cancel.cancel();
		self.done.cancelled().await;
	}
}

#[derive(Clone)]
pub struct Context(Arc<RawContext>);

impl From<RawContext> for Context {
	fn from(ctx: RawContext) -> Self {
		Self(Arc::new(ctx))
	}
}

impl Context {
	pub fn new() -> (Self, Handler) {
		let (ctx, handler) = RawContext::new();
		(ctx.into(), handler)
	}

	pub fn with_deadline(deadline: Instant) -> (Self, Handler) {
		let (ctx, handler) = RawContext::with_deadline(deadline);
		(ctx.into(), handler)
	}

	pub fn with_timeout(timeout: std::time::Duration) -> (Self, Handler) {
		Self::with_deadline(Instant::now() + timeout)
	}

	pub fn with_parent(parent: Context, deadline: Option<Instant>) -> (Self, Handler) {
		let (ctx, handler) = RawContext::with_parent(parent, deadline);
		(ctx.into(), handler)
	}

	pub async fn done(&self) -> CancelReason {
		self.0.done().await
	}

	pub fn is_done(&self) -> bool {
		self.0.is_done()
	}
}

#[cfg(test)]
mod tests;
