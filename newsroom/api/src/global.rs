use std::io;
use std::sync::Arc;
use std::time::Duration;

use common::context::Context;

use crate::clipboard::Clipboard;
use crate::config::AppConfig;
use crate::subscription::SubscriptionManager;

pub struct GlobalState {
	pub config: AppConfig,
	pub db: Arc<sqlx::PgPool>,
	pub ctx: Context,

	pub subscription_manager: SubscriptionManager,
	pub clipboard: Clipboard,
	pub nats: async_nats::Client,
}

impl GlobalState {
	pub fn new(config: AppConfig, db: Arc<sqlx::PgPool>, nats: async_nats::Client, ctx: Context) -> Self {
		Self {
			clipboard: Clipboard::new(Duration::from_secs(config.rundown.clipboard_ttl_secs)),
			config,
			ctx,

			subscription_manager: SubscriptionManager::default(),
			db,
			nats,
		}
	}
}

#[derive(thiserror::Error, Debug)]
pub enum SetupNatsError {
	#[error("failed to parse address: {0}")]
	AddressParse(io::Error),
	#[error("connect error: {0}")]
	ConnectError(#[from] async_nats::ConnectError),
}

pub async fn setup_nats(config: &AppConfig) -> Result<async_nats::Client, SetupNatsError> {
	let mut options = async_nats::ConnectOptions::new()
		.connection_timeout(Duration::from_secs(5))
		.name(&config.name)
		.retry_on_initial_connect();

	if let Some(user) = &config.nats.username {
		options = options.user_and_password(user.clone(), config.nats.password.clone().unwrap_or_default())
	} else if let Some(token) = &config.nats.token {
		options = options.token(token.clone())
	}

	if let Some(tls) = &config.nats.tls {
		options = options.require_tls(true).add_client_certificate((&tls.cert).into(), (&tls.key).into());

		if let Some(ca_cert) = &tls.ca_cert {
			options = options.add_root_certificates(ca_cert.into());
		}
	}

	let nats_addrs = config
		.nats
		.servers
		.iter()
		.map(|s| s.parse::<async_nats::ServerAddr>())
		.collect::<Result<Vec<_>, _>>()
		.map_err(SetupNatsError::AddressParse)?;

	let nats = options.connect(nats_addrs).await?;

	tracing::info!("connected to nats");

	Ok(nats)
}
