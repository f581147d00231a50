use async_graphql::SimpleObject;

use super::block::Block;
use super::item::Item;
use super::newscast::Newscast;
use crate::rundown::{BlockView, RundownView};

/// A newscast's full rundown tree in one response, durations included.
#[derive(SimpleObject)]
pub struct Rundown {
	pub newscast: Newscast,
	pub blocks: Vec<RundownBlock>,
	pub duration_seconds: i64,
}

#[derive(SimpleObject)]
pub struct RundownBlock {
	pub block: Block,
	pub items: Vec<Item>,
	pub duration_seconds: i64,
}

impl From<RundownView> for Rundown {
	fn from(view: RundownView) -> Self {
		let duration_seconds = view.duration_seconds();

		Self {
			newscast: view.newscast.into(),
			blocks: view.blocks.into_iter().map(RundownBlock::from).collect(),
			duration_seconds,
		}
	}
}

impl From<BlockView> for RundownBlock {
	fn from(view: BlockView) -> Self {
		Self {
			block: view.block.into(),
			items: view.items.into_iter().map(Item::from).collect(),
			duration_seconds: view.duration_seconds,
		}
	}
}
