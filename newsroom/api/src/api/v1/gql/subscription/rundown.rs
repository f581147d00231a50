use async_graphql::{Context, Subscription};
use async_stream::stream;
use futures_util::Stream;
use uuid::Uuid;

use super::super::error::{Result, ResultExt};
use super::super::ext::ContextExt;
use super::super::models::event::{LifecycleChange, RundownChange};
use crate::events;
use crate::subscription::SubscriptionTopic;

#[derive(Default)]
pub struct RundownSubscription;

#[Subscription]
impl RundownSubscription {
	/// Row-level block/item changes to a newscast's rundown, as they commit.
	/// Pair with the `rundown` query for the initial tree; each change
	/// carries the row version to discard stale and echoed updates.
	async fn rundown_changes<'ctx>(
		&self,
		ctx: &'ctx Context<'_>,
		#[graphql(desc = "Newscast to watch.")] newscast_id: Uuid,
	) -> Result<impl Stream<Item = Result<RundownChange>> + 'ctx> {
		let global = ctx.get_global();

		let mut event_stream = global
			.subscription_manager
			.subscribe(SubscriptionTopic::NewscastRundown(newscast_id))
			.await
			.map_err_gql("failed to subscribe to rundown changes")?;

		Ok(stream!({
			while let Ok(message) = event_stream.recv().await {
				match serde_json::from_slice::<events::RundownEvent>(&message.payload) {
					Ok(event) => yield Ok(RundownChange::from(event)),
					Err(err) => {
						tracing::warn!(error = %err, "malformed rundown event");
					}
				}
			}
		}))
	}

	/// Open/close transitions of a newscast's rundown.
	async fn lifecycle_changes<'ctx>(
		&self,
		ctx: &'ctx Context<'_>,
		#[graphql(desc = "Newscast to watch.")] newscast_id: Uuid,
	) -> Result<impl Stream<Item = Result<LifecycleChange>> + 'ctx> {
		let global = ctx.get_global();

		let mut event_stream = global
			.subscription_manager
			.subscribe(SubscriptionTopic::NewscastLifecycle(newscast_id))
			.await
			.map_err_gql("failed to subscribe to lifecycle changes")?;

		Ok(stream!({
			while let Ok(message) = event_stream.recv().await {
				match serde_json::from_slice::<events::LifecycleEvent>(&message.payload) {
					Ok(event) => yield Ok(LifecycleChange::from(event)),
					Err(err) => {
						tracing::warn!(error = %err, "malformed lifecycle event");
					}
				}
			}
		}))
	}
}
