use bytes::Bytes;
use uuid::Uuid;

use crate::database::{Block, Item};
use crate::global::GlobalState;
use crate::subscription::SubscriptionTopic;

/// Row-level change feed for a newscast's rundown, published on
/// `espelho.{newscast_id}.rundown`. Consumers decide staleness by comparing
/// the carried row version against the last one they applied.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RundownEvent {
	ItemUpserted {
		item: Item,
		/// Set when the item changed blocks, so consumers can remove it from
		/// the block it no longer belongs to.
		old_block_id: Option<Uuid>,
	},
	ItemDeleted {
		item_id: Uuid,
		block_id: Uuid,
		version: i64,
	},
	BlockUpserted {
		block: Block,
	},
	BlockDeleted {
		block_id: Uuid,
	},
}

/// Lifecycle transitions, published on `espelho.{newscast_id}.lifecycle`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEvent {
	RundownOpened { newscast_id: Uuid },
	RundownClosed { newscast_id: Uuid, snapshot_id: Uuid },
}

/// Teleprompter remote control, published on `espelho.{newscast_id}.prompter`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrompterEvent {
	FocusItem { item_id: Uuid },
}

#[derive(thiserror::Error, Debug)]
pub enum PublishError {
	#[error("failed to encode event: {0}")]
	Encode(#[from] serde_json::Error),
	#[error("failed to publish event: {0}")]
	Publish(#[from] async_nats::PublishError),
}

impl GlobalState {
	pub async fn publish_rundown(&self, newscast_id: Uuid, event: &RundownEvent) -> Result<(), PublishError> {
		self.publish(SubscriptionTopic::NewscastRundown(newscast_id), event).await
	}

	pub async fn publish_lifecycle(&self, newscast_id: Uuid, event: &LifecycleEvent) -> Result<(), PublishError> {
		self.publish(SubscriptionTopic::NewscastLifecycle(newscast_id), event).await
	}

	pub async fn publish_prompter(&self, newscast_id: Uuid, event: &PrompterEvent) -> Result<(), PublishError> {
		self.publish(SubscriptionTopic::NewscastPrompter(newscast_id), event).await
	}

	async fn publish<E: serde::Serialize>(&self, topic: SubscriptionTopic, event: &E) -> Result<(), PublishError> {
		let payload = Bytes::from(serde_json::to_vec(event)?);

		self.nats.publish(topic, payload).await?;

		Ok(())
	}
}
