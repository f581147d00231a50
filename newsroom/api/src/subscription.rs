use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use async_nats::Message;
use tokio::select;
use tokio::sync::{broadcast, mpsc, oneshot, Mutex};
use tokio_stream::{StreamExt, StreamMap, StreamNotifyClose};
use tracing::{debug, error, warn};
use uuid::Uuid;

use common::context::Context;

#[derive(thiserror::Error, Debug)]
pub enum SubscriptionManagerError {
	#[error("subscribe error: {0}")]
	Subscribe(#[from] async_nats::SubscribeError),
	#[error("unsubscribe error: {0}")]
	Unsubscribe(#[from] async_nats::UnsubscribeError),
	#[error("send error: {0}")]
	Send(#[from] mpsc::error::SendError<Event>),
	#[error("receive error: {0}")]
	Receive(#[from] oneshot::error::RecvError),
}

#[derive(Debug)]
pub enum Event {
	Subscribe {
		topic: String,
		tx: oneshot::Sender<broadcast::Receiver<Message>>,
	},
	Unsubscribe {
		topic: String,
	},
}

pub struct SubscriptionManager {
	events_tx: mpsc::UnboundedSender<Event>,
	events_rx: Mutex<mpsc::UnboundedReceiver<Event>>,
}

impl Default for SubscriptionManager {
	fn default() -> Self {
		// Only one value is needed in the channel.
		// This is a way to get around we cannot await in a drop.
		let (events_tx, events_rx) = mpsc::unbounded_channel();

		Self {
			events_rx: Mutex::new(events_rx),
			events_tx,
		}
	}
}

pub struct SubscriberReceiver<'a> {
	topic: String,
	rx: broadcast::Receiver<Message>,
	manager: &'a SubscriptionManager,
}

impl Deref for SubscriberReceiver<'_> {
	type Target = broadcast::Receiver<Message>;

	fn deref(&self) -> &Self::Target {
		&self.rx
	}
}

impl DerefMut for SubscriberReceiver<'_> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.rx
	}
}

#[derive(Debug, Clone, Copy)]
pub enum SubscriptionTopic {
	/// Row-level block/item changes for a newscast's rundown.
	NewscastRundown(Uuid),
	/// Open/close transitions for a newscast.
	NewscastLifecycle(Uuid),
	/// Teleprompter remote-control relay for a newscast.
	NewscastPrompter(Uuid),
}

impl std::fmt::Display for SubscriptionTopic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::NewscastRundown(newscast_id) => write!(f, "espelho.{newscast_id}.rundown"),
			Self::NewscastLifecycle(newscast_id) => write!(f, "espelho.{newscast_id}.lifecycle"),
			Self::NewscastPrompter(newscast_id) => write!(f, "espelho.{newscast_id}.prompter"),
		}
	}
}

impl async_nats::subject::ToSubject for SubscriptionTopic {
	fn to_subject(&self) -> async_nats::Subject {
		self.to_string().into()
	}
}

impl SubscriptionManager {
	pub async fn run(&self, ctx: Context, nats: async_nats::Client) -> Result<(), SubscriptionManagerError> {
		let mut topics = HashMap::<String, broadcast::Sender<Message>>::new();
		let mut subs = StreamMap::new();

		let mut events_rx = self.events_rx.lock().await;

		loop {
			select! {
				event = events_rx.recv() => {
					debug!("received event: {:?}", event);

					match event.expect("events channel closed") {
						Event::Subscribe { topic, tx } => {
							match topics.get(&topic) {
								Some(broadcast) => {
									tx.send(broadcast.subscribe()).ok();
								},
								None => {
									let (btx, rx) = broadcast::channel(16);
									if tx.send(rx).is_err() {
										warn!("failed to send broadcast receiver to subscriber");
										continue;
									}

									debug!("subscribing to topic: {}", topic);
									let sub = nats.subscribe(topic.clone()).await?;

									topics.insert(topic.clone(), btx);
									subs.insert(topic, StreamNotifyClose::new(sub));
								}
							};
						}
						Event::Unsubscribe { topic } => {
							debug!("received unsubscribe event for topic: {}", topic);
							if let Some(btx) = topics.get_mut(&topic) {
								if btx.receiver_count() == 0 {
									topics.remove(&topic);
									if let Some(Some(mut sub)) = subs.remove(&topic).map(|s| s.into_inner()) {
										sub.unsubscribe().await?;
									}
								}
							}

							if topics.is_empty() && ctx.is_done() {
								break;
							}
						}
					}
				}
				Some((topic, message)) = subs.next() => {
					match message {
						Some(message) => {
							let Some(subs) = topics.get(&topic) else {
								debug!("received message for unsubscribed topic: {}", topic);
								continue;
							};

							if let Err(e) = subs.send(message) {
								error!("failed to send message to subscribers: {e}");
							}
						},
						None => {
							// nats subscriber closed
							topics.remove(&topic);
						}
					}
				}
			}
		}

		Ok(())
	}

	pub async fn subscribe(&self, topic: SubscriptionTopic) -> Result<SubscriberReceiver<'_>, SubscriptionManagerError> {
		let (tx, rx) = oneshot::channel();

		self.events_tx.send(Event::Subscribe {
			topic: topic.to_string(),
			tx,
		})?;

		let rx = rx.await?;

		Ok(SubscriberReceiver {
			topic: topic.to_string(),
			rx,
			manager: self,
		})
	}
}

impl Drop for SubscriberReceiver<'_> {
	fn drop(&mut self) {
		self.manager
			.events_tx
			.send(Event::Unsubscribe {
				topic: self.topic.clone(),
			})
			.ok();
	}
}
