use std::sync::Arc;

use arc_swap::ArcSwap;

use super::error::{GqlError, Result};

/// Per-request (or per-websocket-connection) state.
///
/// There is no authentication layer; a client identifies itself with an
/// opaque id (the `x-client-id` header, or `clientId` in the websocket
/// connection payload) which scopes its clipboard and names its edit locks.
#[derive(Default)]
pub struct RequestContext {
	is_websocket: bool,
	client_id: ArcSwap<Option<String>>,
}

impl RequestContext {
	pub fn new(is_websocket: bool) -> Self {
		Self {
			is_websocket,
			..Default::default()
		}
	}

	pub fn is_websocket(&self) -> bool {
		self.is_websocket
	}

	pub fn set_client_id(&self, client_id: Option<String>) {
		self.client_id.store(Arc::new(client_id));
	}

	/// The caller's self-declared identity. Required for clipboard and lock
	/// operations.
	pub fn client_id(&self) -> Result<String> {
		self.client_id
			.load()
			.as_ref()
			.clone()
			.ok_or_else(|| GqlError::InvalidInput.with_message("missing client id (x-client-id header)"))
	}
}
