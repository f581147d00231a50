use std::sync::Arc;

use hyper::Body;
use routerify::Router;

use super::error::RouteError;
use crate::global::GlobalState;

pub mod gql;
pub mod health;
pub mod prompter;

pub fn routes(global: &Arc<GlobalState>) -> Router<Body, RouteError> {
	Router::builder()
		.scope("/health", health::routes())
		.scope("/gql", gql::routes(global))
		.scope("/prompter", prompter::routes(global))
		.build()
		.expect("failed to build router")
}
