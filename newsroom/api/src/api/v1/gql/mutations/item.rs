use async_graphql::{Context, InputObject, Object};
use uuid::Uuid;

use super::super::error::Result;
use super::super::ext::ContextExt;
use super::super::models::item::{Item, ItemStatus};
use crate::rundown::{self, NewItem, UpdateItem};

#[derive(Default)]
pub struct ItemMutation;

#[derive(InputObject)]
pub struct CreateItemInput {
	/// The slug/headline ("retranca").
	pub headline: String,
	/// The teleprompter head ("cabeça").
	pub lead_in: Option<String>,
	/// The story body read off the teleprompter.
	pub script: Option<String>,
	/// The on-screen caption ("GC").
	pub caption: Option<String>,
	pub status: Option<ItemStatus>,
	pub reporter: Option<String>,
	pub location: Option<String>,
	pub tags: Option<Vec<String>>,
	pub equipment: Option<String>,
	pub duration_seconds: Option<i32>,
}

#[derive(InputObject)]
pub struct UpdateItemInput {
	pub headline: Option<String>,
	pub lead_in: Option<String>,
	pub script: Option<String>,
	pub caption: Option<String>,
	pub status: Option<ItemStatus>,
	pub reporter: Option<String>,
	pub location: Option<String>,
	pub tags: Option<Vec<String>>,
	pub equipment: Option<String>,
	pub duration_seconds: Option<i32>,
}

#[Object]
impl ItemMutation {
	/// Creates an item at the end of a block with the newscast's next free
	/// page number.
	async fn create(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the block.")] block_id: Uuid,
		input: CreateItemInput,
	) -> Result<Item> {
		let global = ctx.get_global();

		let item = rundown::create_item(
			global,
			block_id,
			NewItem {
				headline: input.headline,
				lead_in: input.lead_in,
				script: input.script,
				caption: input.caption,
				status: input.status.unwrap_or(ItemStatus::Draft).into(),
				reporter: input.reporter,
				location: input.location,
				tags: input.tags.unwrap_or_default(),
				equipment: input.equipment,
				duration_seconds: input.duration_seconds.unwrap_or(0),
			},
		)
		.await?;

		Ok(item.into())
	}

	/// Updates an item's fields; omitted fields stay as they are. Bumps the
	/// item's version.
	async fn update(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the item.")] id: Uuid,
		input: UpdateItemInput,
	) -> Result<Item> {
		let global = ctx.get_global();

		let item = rundown::update_item(
			global,
			id,
			UpdateItem {
				headline: input.headline,
				lead_in: input.lead_in,
				script: input.script,
				caption: input.caption,
				status: input.status.map(Into::into),
				reporter: input.reporter,
				location: input.location,
				tags: input.tags,
				equipment: input.equipment,
				duration_seconds: input.duration_seconds,
			},
		)
		.await?;

		Ok(item.into())
	}

	/// Deletes an item and densely renumbers the block it left.
	async fn delete(&self, ctx: &Context<'_>, #[graphql(desc = "The id of the item.")] id: Uuid) -> Result<Item> {
		let global = ctx.get_global();

		let item = rundown::delete_item(global, id).await?;

		Ok(item.into())
	}

	/// The drag-and-drop operation: moves the item at `source_index` of the
	/// source block to `dest_index` of the destination block. In-block
	/// reorders, cross-block moves and cross-newscast transfers are all this
	/// one mutation; a transfer assigns the destination newscast's next free
	/// page number. Returns every item whose placement changed.
	async fn move_item(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The block the item is dragged from.")] source_block_id: Uuid,
		#[graphql(desc = "The zero-based index of the item in the source block.")] source_index: u32,
		#[graphql(desc = "The block the item is dropped into.")] dest_block_id: Uuid,
		#[graphql(desc = "The zero-based index to drop the item at.")] dest_index: u32,
	) -> Result<Vec<Item>> {
		let global = ctx.get_global();

		let items = rundown::move_item(
			global,
			source_block_id,
			source_index as usize,
			dest_block_id,
			dest_index as usize,
		)
		.await?;

		Ok(items.into_iter().map(Item::from).collect())
	}
}
