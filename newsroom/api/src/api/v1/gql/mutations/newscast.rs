use async_graphql::{Context, Object, SimpleObject};
use chrono::NaiveDate;
use uuid::Uuid;

use super::super::error::{GqlError, Result, ResultExt};
use super::super::ext::ContextExt;
use super::super::models::newscast::Newscast;
use super::super::models::snapshot::RundownSnapshot;
use crate::database;
use crate::rundown::{self, is_unique_violation};

/// Unique constraint on (name, air_date): one edition of a show per day.
const NEWSCAST_EDITION_CONSTRAINT: &str = "telejornais_name_air_date_key";

#[derive(Default)]
pub struct NewscastMutation;

#[derive(SimpleObject)]
pub struct CloseRundownResult {
	pub newscast: Newscast,
	pub snapshot: RundownSnapshot,
}

#[Object]
impl NewscastMutation {
	/// Creates a newscast edition. The rundown starts closed.
	async fn create(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The name of the show.")] name: String,
		#[graphql(desc = "The air date of this edition.")] air_date: NaiveDate,
	) -> Result<Newscast> {
		if name.trim().is_empty() {
			return Err(GqlError::InvalidInput
				.with_message("name must not be empty")
				.with_field(vec!["name"]));
		}

		let global = ctx.get_global();

		let newscast: database::Newscast = sqlx::query_as(
			"INSERT INTO telejornais (id, name, air_date, rundown_open, created_at, updated_at) \
			 VALUES ($1, $2, $3, false, NOW(), NOW()) \
			 RETURNING *",
		)
		.bind(Uuid::new_v4())
		.bind(name.trim())
		.bind(air_date)
		.fetch_one(global.db.as_ref())
		.await
		.map_err(|err| {
			if is_unique_violation(&err, NEWSCAST_EDITION_CONSTRAINT) {
				GqlError::InvalidInput
					.with_message("this show already has an edition on that date")
					.with_field(vec!["name", "airDate"])
			} else {
				GqlError::InternalServerError.with_message("failed to create newscast")
			}
		})?;

		Ok(newscast.into())
	}

	async fn rename(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the newscast.")] id: Uuid,
		#[graphql(desc = "The new name.")] name: String,
	) -> Result<Newscast> {
		if name.trim().is_empty() {
			return Err(GqlError::InvalidInput
				.with_message("name must not be empty")
				.with_field(vec!["name"]));
		}

		let global = ctx.get_global();

		let newscast: Option<database::Newscast> =
			sqlx::query_as("UPDATE telejornais SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *")
				.bind(id)
				.bind(name.trim())
				.fetch_optional(global.db.as_ref())
				.await
				.map_err_gql("failed to rename newscast")?;

		newscast
			.map(Newscast::from)
			.ok_or_else(|| GqlError::NotFound.with_message("newscast not found"))
	}

	/// Opens the rundown for editing, creating (and optionally seeding) the
	/// first block when the newscast has none yet.
	async fn open_rundown(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the newscast.")] id: Uuid,
		#[graphql(
			default = false,
			desc = "Seed the first block from the previous day's last block."
		)]
		seed_from_previous: bool,
	) -> Result<Newscast> {
		let global = ctx.get_global();

		let newscast = rundown::open_rundown(global, id, seed_from_previous).await?;

		Ok(newscast.into())
	}

	/// Closes the rundown: snapshots the whole tree, then flips the flag.
	async fn close_rundown(
		&self,
		ctx: &Context<'_>,
		#[graphql(desc = "The id of the newscast.")] id: Uuid,
	) -> Result<CloseRundownResult> {
		let global = ctx.get_global();

		let (newscast, snapshot) = rundown::close_rundown(global, id).await?;

		Ok(CloseRundownResult {
			newscast: newscast.into(),
			snapshot: snapshot.into(),
		})
	}
}
