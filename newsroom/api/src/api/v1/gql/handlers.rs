use std::future;
use std::str::FromStr;
use std::sync::{Arc, Weak};

use async_graphql::http::{WebSocketProtocols, WsMessage};
use async_graphql::Data;
use futures_util::{SinkExt, StreamExt};
use hyper::body::HttpBody;
use hyper::{header, Body, Request, Response, StatusCode};
use hyper_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use hyper_tungstenite::tungstenite::protocol::CloseFrame;
use hyper_tungstenite::tungstenite::Message;
use hyper_tungstenite::HyperWebsocket;
use routerify::prelude::RequestExt as _;
use serde_json::json;
use tokio::select;

use super::ext::RequestExt;
use super::request_context::RequestContext;
use super::MySchema;
use crate::api::error::{Result, ResultExt, RouteError};
use crate::global::GlobalState;

async fn websocket_handler(
	ws: HyperWebsocket,
	schema: MySchema,
	global: Arc<GlobalState>,
	protocol: WebSocketProtocols,
	context: Arc<RequestContext>,
) {
	let ws = match ws.await {
		Ok(ws) => ws,
		Err(e) => {
			tracing::error!("failed to upgrade websocket request: {}", e);
			return;
		}
	};

	let (mut tx, rx) = ws.split();

	let input = rx
		.take_while(|res| future::ready(res.is_ok()))
		.map(|msg| msg.unwrap()) // Safe because we check if its ok above
		.filter_map(|msg| {
			if let Message::Text(_) | Message::Binary(_) = msg {
				future::ready(Some(msg))
			} else {
				future::ready(None)
			}
		})
		.map(Message::into_data);

	let data = Data::default()
		.provide_global(global.clone())
		.provide_context(context.clone());

	let init_context = context.clone();

	let stream = async_graphql::http::WebSocket::new(schema, input, protocol)
		.connection_data(data)
		.on_connection_init(move |payload| {
			// The websocket counterpart of the x-client-id header.
			if let Some(client_id) = payload.get("clientId").and_then(|v| v.as_str()) {
				init_context.set_client_id(Some(client_id.to_string()));
			}
			future::ready(Ok::<_, async_graphql::Error>(Data::default()))
		})
		.map(|msg| match msg {
			WsMessage::Text(text) => Message::Text(text),
			WsMessage::Close(code, status) => Message::Close(Some(CloseFrame {
				code: code.into(),
				reason: status.into(),
			})),
		})
		.map(Ok);

	select! {
		_ = stream.forward(&mut tx) => {}
		_ = global.ctx.done() => {
			tx.send(Message::Close(Some(CloseFrame { code: CloseCode::Restart, reason: "server is restarting".into() }))).await.ok();
		}
	}
}

pub async fn graphql_handler(mut req: Request<Body>) -> Result<Response<Body>> {
	if req.method() == hyper::Method::OPTIONS {
		return Ok(hyper::Response::builder()
			.status(StatusCode::OK)
			.header("Access-Control-Allow-Origin", "*")
			.header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
			.header("Access-Control-Allow-Headers", "Content-Type, X-Client-Id")
			.header("Access-Control-Max-Age", "86400")
			.body(Body::empty())
			.expect("failed to build response"));
	}

	let schema = req.data::<MySchema>().expect("failed to get schema").clone();

	let global = req
		.data::<Weak<GlobalState>>()
		.and_then(|w| w.upgrade())
		.ok_or((StatusCode::INTERNAL_SERVER_ERROR, "failed to get global state"))?;

	let client_id = req
		.headers()
		.get("x-client-id")
		.and_then(|val| val.to_str().ok())
		.map(|s| s.to_string());

	// We need to check if this is a websocket upgrade request.
	// If it is, we need to upgrade the request to a websocket request.
	if hyper_tungstenite::is_upgrade_request(&req) {
		let protocol = req
			.headers()
			.get(header::SEC_WEBSOCKET_PROTOCOL)
			.and_then(|val| val.to_str().ok())
			.and_then(|protocols| protocols.split(',').find_map(|p| WebSocketProtocols::from_str(p.trim()).ok()))
			.ok_or((StatusCode::BAD_REQUEST, "invalid websocket protocol"))?;

		let (mut response, websocket) = hyper_tungstenite::upgrade(&mut req, None)
			.extend_route((StatusCode::BAD_REQUEST, "failed to upgrade to websocket"))?;

		let context = RequestContext::new(true);
		context.set_client_id(client_id);

		response.headers_mut().insert(
			header::SEC_WEBSOCKET_PROTOCOL,
			protocol
				.sec_websocket_protocol()
				.parse()
				.expect("failed to set websocket protocol"),
		);

		tokio::spawn(websocket_handler(websocket, schema, global, protocol, Arc::new(context)));

		return Ok(response);
	}

	let context = RequestContext::new(false);
	context.set_client_id(client_id);

	// We need to parse the request body into a GraphQL request.
	// If the request is a post request, we need to parse the body as a GraphQL request.
	// If the request is a get request, we need to parse the query string as a GraphQL request.
	let request = match *req.method() {
		hyper::Method::POST => {
			let body = req
				.body_mut()
				.data()
				.await
				.and_then(|f| f.ok())
				.ok_or((StatusCode::BAD_REQUEST, "invalid request body"))?;

			let content_type = req.headers().get("content-type").and_then(|val| val.to_str().ok());

			async_graphql::http::receive_body(content_type, body.to_vec().as_slice(), Default::default())
				.await
				.extend_route((StatusCode::BAD_REQUEST, "invalid request body"))?
		}
		hyper::Method::GET => {
			let query = req.uri().query().unwrap_or("");

			async_graphql::http::parse_query_string(query)
				.extend_route((StatusCode::BAD_REQUEST, "invalid query string"))?
		}
		_ => return Err(RouteError::from((StatusCode::METHOD_NOT_ALLOWED, "invalid request method"))),
	}
	.provide_global(global)
	.provide_context(Arc::new(context));

	let response = schema.execute(request).await;

	let mut resp = Response::builder()
		.status(StatusCode::OK)
		.header("Access-Control-Allow-Origin", "*")
		.header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
		.header("Access-Control-Allow-Headers", "Content-Type, X-Client-Id")
		.header("Access-Control-Max-Age", "86400")
		.header("Content-Type", "application/json")
		.body(Body::from(
			json!({
				"data": response.data,
				"errors": if response.errors.is_empty() {
					None
				} else {
					Some(response.errors)
				},
				"extensions": response.extensions,
			})
			.to_string(),
		))
		.expect("failed to build response");

	(&response.http_headers).into_iter().for_each(|(key, value)| {
		resp.headers_mut().insert(key, value.clone());
	});

	Ok(resp)
}
