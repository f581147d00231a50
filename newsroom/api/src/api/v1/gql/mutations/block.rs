use async_graphql::{Context, Object};
use uuid::Uuid;

use super::super::error::Result;
use super::super::ext::ContextExt;
use super::super::models::block::Block;
use crate::rundown;

#[derive(Default)]
pub struct BlockMutation;

#[Object]
impl BlockMutation {
	/// Creates a block at the end of the rundown. Racing creations of the
	/// same block name resolve to the single row the winner created.
	async fn create(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the newscast.")] newscast_id: Uuid,
		#[graphql(desc = "The name of the block.")] name: String,
	) -> Result<Block> {
		let global = ctx.get_global();

		let block = rundown::create_block(global, newscast_id, &name).await?;

		Ok(block.into())
	}

	async fn rename(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the block.")] id: Uuid,
		#[graphql(desc = "The new name.")] name: String,
	) -> Result<Block> {
		let global = ctx.get_global();

		let block = rundown::rename_block(global, id, &name).await?;

		Ok(block.into())
	}

	/// Deletes a block and every item it owns, closing the ordering gap.
	async fn delete(&self, ctx: &Context<'_>, #[graphql(desc = "The id of the block.")] id: Uuid) -> Result<Block> {
		let global = ctx.get_global();

		let block = rundown::delete_block(global, id).await?;

		Ok(block.into())
	}

	/// Moves the block at `from` to position `to`, both zero-based in
	/// rundown order. Returns the blocks whose position changed.
	async fn move_block(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the newscast.")] newscast_id: Uuid,
		#[graphql(desc = "The current index of the block.")] from: u32,
		#[graphql(desc = "The index to move the block to.")] to: u32,
	) -> Result<Vec<Block>> {
		let global = ctx.get_global();

		let blocks = rundown::reorder_blocks(global, newscast_id, from as usize, to as usize).await?;

		Ok(blocks.into_iter().map(Block::from).collect())
	}
}
