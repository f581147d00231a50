use async_graphql::{ComplexObject, Context, SimpleObject};
use uuid::Uuid;

use super::super::error::{Result, ResultExt};
use super::super::ext::ContextExt;
use super::date::DateRFC3339;
use super::item::Item;
use crate::database;

#[derive(SimpleObject)]
#[graphql(complex)]
pub struct Block {
	pub id: Uuid,
	pub newscast_id: Uuid,
	pub name: String,
	pub sort_order: i32,
	pub created_at: DateRFC3339,
	pub updated_at: DateRFC3339,
}

#[ComplexObject]
impl Block {
	/// The block's items in rundown order.
	async fn items(&self, ctx: &Context<'_>) -> Result<Vec<Item>> {
		let global = ctx.get_global();

		let items = database::Item::in_block(global.db.as_ref(), self.id)
			.await
			.map_err_gql("failed to fetch items")?;

		Ok(items.into_iter().map(Item::from).collect())
	}

	/// Total expected on-air duration of the block's items, in seconds.
	async fn duration_seconds(&self, ctx: &Context<'_>) -> Result<i64> {
		let global = ctx.get_global();

		let duration: i64 = sqlx::query_scalar(
			"SELECT COALESCE(SUM(duration_seconds), 0)::BIGINT FROM materias WHERE bloco_id = $1",
		)
		.bind(self.id)
		.fetch_one(global.db.as_ref())
		.await
		.map_err_gql("failed to fetch block duration")?;

		Ok(duration)
	}
}

impl From<database::Block> for Block {
	fn from(value: database::Block) -> Self {
		Self {
			id: value.id,
			newscast_id: value.telejornal_id,
			name: value.name,
			sort_order: value.sort_order,
			created_at: value.created_at.into(),
			updated_at: value.updated_at.into(),
		}
	}
}
