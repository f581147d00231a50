use async_graphql::{Enum, SimpleObject};

use super::block::Block;
use super::item::Item;
use crate::clipboard::ClipboardPayload;

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardKind {
	Item,
	Block,
}

/// What the caller's clipboard currently holds.
#[derive(SimpleObject)]
pub struct ClipboardContents {
	pub kind: ClipboardKind,
	pub item: Option<Item>,
	pub block: Option<Block>,
	pub items: Option<Vec<Item>>,
}

impl From<ClipboardPayload> for ClipboardContents {
	fn from(payload: ClipboardPayload) -> Self {
		match payload {
			ClipboardPayload::Item(item) => Self {
				kind: ClipboardKind::Item,
				item: Some(item.into()),
				block: None,
				items: None,
			},
			ClipboardPayload::Block { block, items } => Self {
				kind: ClipboardKind::Block,
				item: None,
				block: Some(block.into()),
				items: Some(items.into_iter().map(Item::from).collect()),
			},
		}
	}
}
