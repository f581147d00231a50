use std::sync::{Arc, Weak};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use hyper::{Body, Request, Response, StatusCode};
use hyper_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use hyper_tungstenite::tungstenite::protocol::CloseFrame;
use hyper_tungstenite::tungstenite::Message;
use hyper_tungstenite::HyperWebsocket;
use routerify::prelude::RequestExt;
use routerify::Router;
use tokio::select;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use super::super::error::{Result, ResultExt, RouteError};
use crate::events::PrompterEvent;
use crate::global::GlobalState;
use crate::rundown::RundownView;
use crate::subscription::SubscriptionTopic;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

/// Messages pushed to a teleprompter window.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
enum ServerMessage {
	/// The full rundown, sent on connect and on request.
	Data { view: RundownView },
	/// The full rundown after a change-feed event was merged.
	Update { view: RundownView },
	/// A producer asked every window to jump to an item.
	FocusItem { item_id: Uuid },
	/// Periodic liveness signal.
	Heartbeat,
}

/// Messages a teleprompter or producer window sends back.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
enum ClientMessage {
	/// The window finished loading and wants the current rundown.
	Ready,
	/// Jump every window of this newscast to an item.
	FocusItem { item_id: Uuid },
	/// Liveness echo; carries nothing.
	Heartbeat,
}

async fn prompter_handler(mut req: Request<Body>) -> Result<Response<Body>> {
	let global = req
		.data::<Weak<GlobalState>>()
		.and_then(|w| w.upgrade())
		.ok_or((StatusCode::INTERNAL_SERVER_ERROR, "failed to get global state"))?;

	let newscast_id = req
		.param("newscast_id")
		.and_then(|p| Uuid::parse_str(p).ok())
		.ok_or((StatusCode::BAD_REQUEST, "invalid newscast id"))?;

	if !hyper_tungstenite::is_upgrade_request(&req) {
		return Err(RouteError::from((
			StatusCode::BAD_REQUEST,
			"the teleprompter feed is websocket-only",
		)));
	}

	let (response, websocket) = hyper_tungstenite::upgrade(&mut req, None)
		.extend_route((StatusCode::BAD_REQUEST, "failed to upgrade to websocket"))?;

	tokio::spawn(prompter_session(websocket, global, newscast_id));

	Ok(response)
}

async fn prompter_session(ws: HyperWebsocket, global: Arc<GlobalState>, newscast_id: Uuid) {
	let ws = match ws.await {
		Ok(ws) => ws,
		Err(e) => {
			tracing::error!("failed to upgrade websocket request: {}", e);
			return;
		}
	};

	let (mut tx, mut rx) = ws.split();

	// Subscribe before the snapshot read so no change slips between them.
	let mut rundown_events = match global
		.subscription_manager
		.subscribe(SubscriptionTopic::NewscastRundown(newscast_id))
		.await
	{
		Ok(sub) => sub,
		Err(e) => {
			tracing::error!("failed to subscribe to rundown changes: {}", e);
			return;
		}
	};
	let mut prompter_events = match global
		.subscription_manager
		.subscribe(SubscriptionTopic::NewscastPrompter(newscast_id))
		.await
	{
		Ok(sub) => sub,
		Err(e) => {
			tracing::error!("failed to subscribe to prompter relay: {}", e);
			return;
		}
	};

	let view = match RundownView::load(global.db.as_ref(), newscast_id).await {
		Ok(Some(view)) => view,
		Ok(None) => {
			tx.send(Message::Close(Some(CloseFrame {
				code: CloseCode::Invalid,
				reason: "newscast not found".into(),
			})))
			.await
			.ok();
			return;
		}
		Err(e) => {
			tracing::error!("failed to load rundown view: {}", e);
			return;
		}
	};
	let mut view = view;

	if send_message(&mut tx, &ServerMessage::Data { view: view.clone() }).await.is_err() {
		return;
	}

	let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);

	loop {
		select! {
			event = rundown_events.recv() => {
				match event {
					Ok(message) => {
						let event = match serde_json::from_slice::<crate::events::RundownEvent>(&message.payload) {
							Ok(event) => event,
							Err(err) => {
								tracing::warn!(error = %err, "malformed rundown event");
								continue;
							}
						};

						if view.apply(&event) && send_message(&mut tx, &ServerMessage::Update { view: view.clone() }).await.is_err() {
							break;
						}
					}
					Err(RecvError::Lagged(skipped)) => {
						// Fell behind the feed; reload and resend the whole
						// rundown rather than replaying.
						tracing::warn!(skipped, "prompter session lagged behind the change feed");
						match RundownView::load(global.db.as_ref(), newscast_id).await {
							Ok(Some(fresh)) => {
								view = fresh;
								if send_message(&mut tx, &ServerMessage::Data { view: view.clone() }).await.is_err() {
									break;
								}
							}
							_ => break,
						}
					}
					Err(RecvError::Closed) => break,
				}
			}
			event = prompter_events.recv() => {
				let Ok(message) = event else { break };

				match serde_json::from_slice::<PrompterEvent>(&message.payload) {
					Ok(PrompterEvent::FocusItem { item_id }) => {
						if send_message(&mut tx, &ServerMessage::FocusItem { item_id }).await.is_err() {
							break;
						}
					}
					Err(err) => {
						tracing::warn!(error = %err, "malformed prompter event");
					}
				}
			}
			incoming = rx.next() => {
				let Some(Ok(message)) = incoming else { break };

				let text = match message {
					Message::Text(text) => text,
					Message::Close(_) => break,
					_ => continue,
				};

				match serde_json::from_str::<ClientMessage>(&text) {
					Ok(ClientMessage::Ready) => {
						if send_message(&mut tx, &ServerMessage::Data { view: view.clone() }).await.is_err() {
							break;
						}
					}
					Ok(ClientMessage::FocusItem { item_id }) => {
						if let Err(err) = global
							.publish_prompter(newscast_id, &PrompterEvent::FocusItem { item_id })
							.await
						{
							tracing::error!(error = %err, "failed to relay focus");
						}
					}
					Ok(ClientMessage::Heartbeat) => {}
					Err(err) => {
						tracing::warn!(error = %err, "malformed prompter message");
					}
				}
			}
			_ = heartbeat.tick() => {
				if send_message(&mut tx, &ServerMessage::Heartbeat).await.is_err() {
					break;
				}
			}
			_ = global.ctx.done() => {
				tx.send(Message::Close(Some(CloseFrame {
					code: CloseCode::Restart,
					reason: "server is restarting".into(),
				})))
				.await
				.ok();
				break;
			}
		}
	}
}

async fn send_message<S>(tx: &mut S, message: &ServerMessage) -> std::result::Result<(), ()>
where
	S: futures_util::Sink<Message> + Unpin,
{
	let text = match serde_json::to_string(message) {
		Ok(text) => text,
		Err(err) => {
			tracing::error!(error = %err, "failed to encode prompter message");
			return Err(());
		}
	};

	tx.send(Message::Text(text)).await.map_err(|_| ())
}

pub fn routes(_: &Arc<GlobalState>) -> Router<Body, RouteError> {
	Router::builder()
		.any_method("/:newscast_id", prompter_handler)
		.build()
		.expect("failed to build router")
}
