use crate::database::Newscast;
use crate::events::PublishError;

mod lifecycle;
mod ops;
mod plan;
mod view;

pub use lifecycle::*;
pub use ops::*;
pub use plan::*;
pub use view::*;

#[derive(Debug, thiserror::Error)]
pub enum RundownError {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("{0}")]
	Plan(#[from] PlanError),
	#[error("failed to publish event: {0}")]
	Publish(#[from] PublishError),
	#[error("{0} not found")]
	NotFound(&'static str),
	#[error("rundown is closed")]
	RundownClosed,
	#[error("invalid input: {0}")]
	InvalidInput(&'static str),
}

/// Every block/item mutation is gated on the owning newscast's rundown being
/// open.
pub fn require_open(newscast: &Newscast) -> Result<(), RundownError> {
	if newscast.rundown_open {
		Ok(())
	} else {
		Err(RundownError::RundownClosed)
	}
}

/// Whether a database error is a violation of the named unique constraint.
/// Duplicate-key races (two clients creating the same first block) are
/// detected this way rather than by matching the error message text.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
	matches!(err, sqlx::Error::Database(db) if db.constraint() == Some(constraint))
}
