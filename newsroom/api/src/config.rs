use std::net::SocketAddr;

use anyhow::Result;
use common::config::{DatabaseConfig, LoggingConfig, NatsConfig};

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
/// The API is the backend for the Espelho newsroom rundown service
pub struct AppConfig {
	/// The path to the config file
	pub config_file: Option<String>,

	/// Name of this instance
	pub name: String,

	/// If we should export the GraphQL schema, if set to true, the schema will be exported to the stdout, and the program will exit.
	pub export_gql: bool,

	/// The logging config
	pub logging: LoggingConfig,

	/// API Config
	pub api: ApiConfig,

	/// Database Config
	pub database: DatabaseConfig,

	/// Rundown Config
	pub rundown: RundownConfig,

	/// Nats configuration
	pub nats: NatsConfig,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ApiConfig {
	/// Bind address for the API
	pub bind_address: SocketAddr,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			bind_address: "[::]:4000".parse().expect("failed to parse bind address"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct RundownConfig {
	/// How long a copied item or block stays on the clipboard, in seconds
	pub clipboard_ttl_secs: u64,

	/// How long an item edit lock is held before it expires, in seconds
	pub lock_ttl_secs: u64,

	/// How often the date rollover check runs, in seconds
	pub rollover_interval_secs: u64,
}

impl Default for RundownConfig {
	fn default() -> Self {
		Self {
			clipboard_ttl_secs: 300,
			lock_ttl_secs: 90,
			rollover_interval_secs: 60,
		}
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			config_file: Some("config".to_string()),
			name: "espelho-api".to_string(),
			export_gql: false,
			logging: LoggingConfig::default(),
			api: ApiConfig::default(),
			database: DatabaseConfig::default(),
			rundown: RundownConfig::default(),
			nats: NatsConfig::default(),
		}
	}
}

impl AppConfig {
	pub fn parse() -> Result<Self> {
		let (mut config, config_file) = common::config::parse::<Self>("ESP", Self::default().config_file)?;

		config.config_file = config_file;

		Ok(config)
	}
}
