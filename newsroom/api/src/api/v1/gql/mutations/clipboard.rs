use async_graphql::{Context, Object, SimpleObject};
use uuid::Uuid;

use super::super::error::{GqlError, Result, ResultExt};
use super::super::ext::ContextExt;
use super::super::models::block::Block;
use super::super::models::clipboard::ClipboardContents;
use super::super::models::item::Item;
use crate::clipboard::ClipboardPayload;
use crate::database;
use crate::rundown;

#[derive(Default)]
pub struct ClipboardMutation;

/// What a paste created: the item, or the block with its items.
#[derive(SimpleObject)]
pub struct PasteResult {
	pub block: Option<Block>,
	pub items: Vec<Item>,
}

#[Object]
impl ClipboardMutation {
	/// Copies an item onto the caller's clipboard, replacing any copied
	/// block.
	async fn copy_item(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the item.")] item_id: Uuid,
	) -> Result<ClipboardContents> {
		let global = ctx.get_global();
		let client_id = ctx.get_req_context().client_id()?;

		let item = database::Item::by_id(global.db.as_ref(), item_id)
			.await
			.map_err_gql("failed to fetch item")?
			.ok_or_else(|| GqlError::NotFound.with_message("item not found"))?;

		global.clipboard.copy_item(&client_id, item.clone());

		Ok(ClipboardPayload::Item(item).into())
	}

	/// Copies a block and its items onto the caller's clipboard, replacing
	/// any copied item.
	async fn copy_block(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the block.")] block_id: Uuid,
	) -> Result<ClipboardContents> {
		let global = ctx.get_global();
		let client_id = ctx.get_req_context().client_id()?;

		let block = database::Block::by_id(global.db.as_ref(), block_id)
			.await
			.map_err_gql("failed to fetch block")?
			.ok_or_else(|| GqlError::NotFound.with_message("block not found"))?;
		let items = database::Item::in_block(global.db.as_ref(), block_id)
			.await
			.map_err_gql("failed to fetch block items")?;

		global.clipboard.copy_block(&client_id, block.clone(), items.clone());

		Ok(ClipboardPayload::Block { block, items }.into())
	}

	/// Pastes the clipboard into a newscast. An item lands after the target
	/// item when given, else at the end of the first block; a block lands at
	/// the end of the rundown. An expired clipboard reads as empty. The
	/// clipboard is cleared on success.
	async fn paste(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The newscast to paste into.")] newscast_id: Uuid,
		#[graphql(desc = "Paste an item right after this item.")] target_item_id: Option<Uuid>,
	) -> Result<PasteResult> {
		let global = ctx.get_global();
		let client_id = ctx.get_req_context().client_id()?;

		let payload = global
			.clipboard
			.get(&client_id)
			.ok_or_else(|| GqlError::InvalidInput.with_message("clipboard is empty"))?;

		let result = match payload {
			ClipboardPayload::Item(item) => {
				let pasted = rundown::paste_item(global, newscast_id, &item, target_item_id).await?;
				PasteResult {
					block: None,
					items: vec![pasted.into()],
				}
			}
			ClipboardPayload::Block { block, items } => {
				let (pasted_block, pasted_items) = rundown::paste_block(global, newscast_id, &block, &items).await?;
				PasteResult {
					block: Some(pasted_block.into()),
					items: pasted_items.into_iter().map(Item::from).collect(),
				}
			}
		};

		global.clipboard.clear(&client_id);

		Ok(result)
	}

	/// Empties the caller's clipboard.
	async fn clear(&self, ctx: &Context<'_>) -> Result<bool> {
		let global = ctx.get_global();
		let client_id = ctx.get_req_context().client_id()?;

		global.clipboard.clear(&client_id);

		Ok(true)
	}
}
