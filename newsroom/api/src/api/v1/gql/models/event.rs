use async_graphql::{Enum, SimpleObject};
use uuid::Uuid;

use super::block::Block;
use super::item::Item;
use crate::events;

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RundownChangeKind {
	ItemUpserted,
	ItemDeleted,
	BlockUpserted,
	BlockDeleted,
}

/// One row-level change to a rundown, as delivered to subscribers. Exactly
/// the fields matching `kind` are set.
#[derive(SimpleObject)]
pub struct RundownChange {
	pub kind: RundownChangeKind,
	pub item: Option<Item>,
	pub block: Option<Block>,
	pub item_id: Option<Uuid>,
	pub block_id: Option<Uuid>,
	/// The block the item left, when the change moved it between blocks.
	pub old_block_id: Option<Uuid>,
	/// The row version to compare against the last one applied locally.
	pub version: Option<i64>,
}

impl From<events::RundownEvent> for RundownChange {
	fn from(event: events::RundownEvent) -> Self {
		match event {
			events::RundownEvent::ItemUpserted { item, old_block_id } => Self {
				kind: RundownChangeKind::ItemUpserted,
				item_id: Some(item.id),
				block_id: Some(item.bloco_id),
				version: Some(item.version),
				item: Some(item.into()),
				block: None,
				old_block_id,
			},
			events::RundownEvent::ItemDeleted {
				item_id,
				block_id,
				version,
			} => Self {
				kind: RundownChangeKind::ItemDeleted,
				item: None,
				block: None,
				item_id: Some(item_id),
				block_id: Some(block_id),
				old_block_id: None,
				version: Some(version),
			},
			events::RundownEvent::BlockUpserted { block } => Self {
				kind: RundownChangeKind::BlockUpserted,
				item: None,
				item_id: None,
				block_id: Some(block.id),
				block: Some(block.into()),
				old_block_id: None,
				version: None,
			},
			events::RundownEvent::BlockDeleted { block_id } => Self {
				kind: RundownChangeKind::BlockDeleted,
				item: None,
				block: None,
				item_id: None,
				block_id: Some(block_id),
				old_block_id: None,
				version: None,
			},
		}
	}
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleChangeKind {
	RundownOpened,
	RundownClosed,
}

#[derive(SimpleObject)]
pub struct LifecycleChange {
	pub kind: LifecycleChangeKind,
	pub newscast_id: Uuid,
	/// The snapshot a close produced.
	pub snapshot_id: Option<Uuid>,
}

impl From<events::LifecycleEvent> for LifecycleChange {
	fn from(event: events::LifecycleEvent) -> Self {
		match event {
			events::LifecycleEvent::RundownOpened { newscast_id } => Self {
				kind: LifecycleChangeKind::RundownOpened,
				newscast_id,
				snapshot_id: None,
			},
			events::LifecycleEvent::RundownClosed {
				newscast_id,
				snapshot_id,
			} => Self {
				kind: LifecycleChangeKind::RundownClosed,
				newscast_id,
				snapshot_id: Some(snapshot_id),
			},
		}
	}
}
