use std::sync::{Arc, Weak};

use anyhow::{anyhow, Result};
use hyper::{Body, Response, Server, StatusCode};
use routerify::{Router, RouterService};
use serde_json::json;

use self::error::{RouteError, ShouldLog};
use self::macros::make_response;
use crate::global::GlobalState;

pub mod error;
pub mod macros;
pub mod v1;

pub fn routes(global: &Arc<GlobalState>) -> Router<Body, RouteError> {
	let weak = Arc::downgrade(global);

	Router::builder()
		.data(weak)
		.scope("/v1", v1::routes(global))
		.err_handler(error_handler)
		.any(|_| async move {
			Ok(make_response!(
				StatusCode::NOT_FOUND,
				json!({ "message": "Not Found", "success": false })
			))
		})
		.build()
		.expect("failed to build router")
}

async fn error_handler(err: routerify::RouteError) -> Response<Body> {
	match err.downcast::<RouteError>() {
		Ok(err) => {
			let location = err.location();

			err.span().in_scope(|| match err.should_log() {
				ShouldLog::Yes => {
					tracing::error!(error = ?err, location = location.to_string(), "http error")
				}
				ShouldLog::Debug => {
					tracing::debug!(error = ?err, location = location.to_string(), "http error")
				}
				ShouldLog::No => (),
			});

			err.response()
		}
		Err(err) => {
			tracing::error!(error = ?err, "unhandled http error");
			make_response!(
				StatusCode::INTERNAL_SERVER_ERROR,
				json!({ "message": "Internal Server Error", "success": false })
			)
		}
	}
}

pub async fn run(global: Arc<GlobalState>) -> Result<()> {
	let addr = global.config.api.bind_address;
	tracing::info!("listening on {}", addr);

	let service = RouterService::new(routes(&global)).map_err(|e| anyhow!("failed to build router service: {e}"))?;

	let ctx = global.ctx.clone();
	// The service holds a Weak to the global state, so dropping our Arc here
	// lets shutdown tear the state down while keep-alive connections drain.
	drop(global);

	Server::bind(&addr)
		.serve(service)
		.with_graceful_shutdown(async move {
			ctx.done().await;
		})
		.await?;

	Ok(())
}
