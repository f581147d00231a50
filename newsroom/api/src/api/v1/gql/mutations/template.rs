use async_graphql::{Context, Object};
use uuid::Uuid;

use super::super::error::{Result, ResultExt};
use super::super::ext::ContextExt;
use super::super::models::block::Block;
use super::super::models::template::RundownTemplate;
use crate::rundown;

#[derive(Default)]
pub struct TemplateMutation;

#[Object]
impl TemplateMutation {
	/// Saves the structure of a newscast's rundown as a reusable template.
	async fn save(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The newscast to copy the structure from.")] newscast_id: Uuid,
		#[graphql(desc = "The name of the template.")] name: String,
	) -> Result<RundownTemplate> {
		let global = ctx.get_global();

		let template = rundown::save_template(global, newscast_id, &name).await?;

		Ok(template.into())
	}

	/// Recreates a template's blocks and items inside an open newscast.
	async fn apply(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The template to apply.")] template_id: Uuid,
		#[graphql(desc = "The newscast to apply it to.")] newscast_id: Uuid,
	) -> Result<Vec<Block>> {
		let global = ctx.get_global();

		let blocks = rundown::apply_template(global, template_id, newscast_id).await?;

		Ok(blocks.into_iter().map(Block::from).collect())
	}

	/// Deletes a template.
	async fn delete(&self, ctx: &Context<'_>, #[graphql(desc = "The id of the template.")] id: Uuid) -> Result<bool> {
		let global = ctx.get_global();

		let result = sqlx::query("DELETE FROM modelos_salvos WHERE id = $1")
			.bind(id)
			.execute(global.db.as_ref())
			.await
			.map_err_gql("failed to delete template")?;

		Ok(result.rows_affected() > 0)
	}
}
