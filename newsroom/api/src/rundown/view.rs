use std::collections::HashMap;

use uuid::Uuid;

use crate::database::{Block, Item, Newscast};
use crate::events::RundownEvent;

/// A block with its ordered items and aggregate on-air duration.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BlockView {
	pub block: Block,
	pub items: Vec<Item>,
	pub duration_seconds: i64,
}

impl BlockView {
	fn new(block: Block, items: Vec<Item>) -> Self {
		let mut view = Self {
			block,
			items,
			duration_seconds: 0,
		};
		view.items.sort_by_key(|i| i.sort_order);
		view.recompute_duration();
		view
	}

	fn recompute_duration(&mut self) {
		self.duration_seconds = self.items.iter().map(|i| i.duration_seconds as i64).sum();
	}
}

/// An in-memory copy of one newscast's rundown, kept in sync by applying the
/// row-level change feed.
///
/// Staleness is decided per row: an event carrying a version not greater
/// than the last one applied for that row is discarded, which is also what
/// suppresses the echo of a change this process just wrote.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RundownView {
	pub newscast: Newscast,
	pub blocks: Vec<BlockView>,
	#[serde(skip)]
	versions: HashMap<Uuid, i64>,
}

impl RundownView {
	pub fn new(newscast: Newscast, blocks: Vec<(Block, Vec<Item>)>) -> Self {
		let mut versions = HashMap::new();
		for (_, items) in &blocks {
			for item in items {
				versions.insert(item.id, item.version);
			}
		}

		let mut blocks: Vec<BlockView> = blocks.into_iter().map(|(block, items)| BlockView::new(block, items)).collect();
		blocks.sort_by_key(|b| b.block.sort_order);

		Self {
			newscast,
			blocks,
			versions,
		}
	}

	/// Loads the current tree for a newscast from the store.
	pub async fn load(db: &sqlx::PgPool, newscast_id: Uuid) -> sqlx::Result<Option<Self>> {
		let Some(newscast) = Newscast::by_id(db, newscast_id).await? else {
			return Ok(None);
		};

		let blocks = Block::in_newscast(db, newscast_id).await?;
		let mut items_by_block: HashMap<Uuid, Vec<Item>> = HashMap::new();
		for item in Item::in_newscast(db, newscast_id).await? {
			items_by_block.entry(item.bloco_id).or_default().push(item);
		}

		let blocks = blocks
			.into_iter()
			.map(|block| {
				let items = items_by_block.remove(&block.id).unwrap_or_default();
				(block, items)
			})
			.collect();

		Ok(Some(Self::new(newscast, blocks)))
	}

	/// Merges one change-feed event into the view. Returns whether the view
	/// changed; stale and echoed events return false.
	pub fn apply(&mut self, event: &RundownEvent) -> bool {
		match event {
			RundownEvent::ItemUpserted { item, .. } => {
				if self.is_stale(item.id, item.version) {
					return false;
				}
				self.versions.insert(item.id, item.version);

				let removed = self.remove_item(item.id);

				let Some(block) = self.blocks.iter_mut().find(|b| b.block.id == item.bloco_id) else {
					// The item now lives in a block this view doesn't carry
					// (transferred to another newscast).
					return removed;
				};

				let index = block.items.partition_point(|i| i.sort_order <= item.sort_order);
				block.items.insert(index, item.clone());
				block.recompute_duration();

				true
			}
			RundownEvent::ItemDeleted { item_id, version, .. } => {
				if self.is_stale(*item_id, *version) {
					return false;
				}
				self.versions.insert(*item_id, *version);

				self.remove_item(*item_id)
			}
			RundownEvent::BlockUpserted { block } => {
				match self.blocks.iter_mut().find(|b| b.block.id == block.id) {
					Some(existing) => existing.block = block.clone(),
					None => self.blocks.push(BlockView::new(block.clone(), Vec::new())),
				}
				self.blocks.sort_by_key(|b| b.block.sort_order);

				true
			}
			RundownEvent::BlockDeleted { block_id } => {
				let before = self.blocks.len();
				self.blocks.retain(|b| b.block.id != *block_id);
				self.blocks.len() != before
			}
		}
	}

	/// Total on-air duration of the whole rundown.
	pub fn duration_seconds(&self) -> i64 {
		self.blocks.iter().map(|b| b.duration_seconds).sum()
	}

	fn is_stale(&self, id: Uuid, version: i64) -> bool {
		self.versions.get(&id).is_some_and(|&applied| applied >= version)
	}

	fn remove_item(&mut self, id: Uuid) -> bool {
		let mut removed = false;
		for block in &mut self.blocks {
			let before = block.items.len();
			block.items.retain(|i| i.id != id);
			if block.items.len() != before {
				block.recompute_duration();
				removed = true;
			}
		}
		removed
	}
}

#[cfg(test)]
mod tests;
