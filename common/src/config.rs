use crate::logging;

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct TlsConfig {
	/// The path to the TLS certificate
	pub cert: String,

	/// The path to the TLS private key
	pub key: String,

	/// The path to the TLS CA certificate
	pub ca_cert: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// The log level to use, this is a tracing env filter
	pub level: String,

	/// What logging mode we should use
	pub mode: logging::Mode,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			mode: logging::Mode::Default,
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct NatsConfig {
	/// The URIs to use for connecting to Nats
	pub servers: Vec<String>,

	/// The username to use for authentication (user-pass auth)
	pub username: Option<String>,

	/// The password to use for authentication (user-pass auth)
	pub password: Option<String>,

	/// The token to use for authentication (token auth)
	pub token: Option<String>,

	/// The TLS configuration (can be used for mTLS)
	pub tls: Option<TlsConfig>,
}

impl Default for NatsConfig {
	fn default() -> Self {
		Self {
			servers: vec!["localhost:4222".into()],
			username: None,
			password: None,
			token: None,
			tls: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
	/// The database URL to use
	pub uri: String,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			uri: "postgres://root@localhost:5432/espelho_dev".to_string(),
		}
	}
}

/// Layers an optional config file under `{prefix}`-prefixed environment
/// variables and deserializes the result. Returns the path of the file that
/// was actually read, if any. A file named by `{prefix}_CONFIG_FILE` must
/// exist; the built-in default path may be silently absent.
pub fn parse<C: serde::de::DeserializeOwned>(
	env_prefix: &str,
	default_config_file: Option<String>,
) -> Result<(C, Option<String>), config::ConfigError> {
	let explicit = std::env::var(format!("{env_prefix}_CONFIG_FILE")).ok();
	let required = explicit.is_some();
	let config_file = explicit.or(default_config_file);

	let mut builder = config::Config::builder();

	let mut loaded = None;
	if let Some(file) = config_file {
		let path = std::path::Path::new(&file);
		if required || path.exists() || path.with_extension("toml").exists() {
			builder = builder.add_source(config::File::with_name(&file));
			loaded = Some(file);
		}
	}

	let config = builder
		.add_source(
			config::Environment::with_prefix(env_prefix)
				.separator("__")
				.try_parsing(true)
				.list_separator(","),
		)
		.build()?
		.try_deserialize()?;

	Ok((config, loaded))
}

#[cfg(test)]
mod tests;
