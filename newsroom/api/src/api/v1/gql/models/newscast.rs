use async_graphql::{ComplexObject, Context, SimpleObject};
use chrono::NaiveDate;
use uuid::Uuid;

use super::super::error::{Result, ResultExt};
use super::super::ext::ContextExt;
use super::block::Block;
use super::date::DateRFC3339;
use crate::database;

#[derive(SimpleObject)]
#[graphql(complex)]
pub struct Newscast {
	pub id: Uuid,
	pub name: String,
	pub air_date: NaiveDate,
	pub rundown_open: bool,
	pub created_at: DateRFC3339,
	pub updated_at: DateRFC3339,
}

#[ComplexObject]
impl Newscast {
	/// The newscast's blocks in rundown order.
	async fn blocks(&self, ctx: &Context<'_>) -> Result<Vec<Block>> {
		let global = ctx.get_global();

		let blocks = database::Block::in_newscast(global.db.as_ref(), self.id)
			.await
			.map_err_gql("failed to fetch blocks")?;

		Ok(blocks.into_iter().map(Block::from).collect())
	}
}

impl From<database::Newscast> for Newscast {
	fn from(value: database::Newscast) -> Self {
		Self {
			id: value.id,
			name: value.name,
			air_date: value.air_date,
			rundown_open: value.rundown_open,
			created_at: value.created_at.into(),
			updated_at: value.updated_at.into(),
		}
	}
}
