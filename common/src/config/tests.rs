use std::io::Write;

use serial_test::serial;

use super::*;

#[derive(Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
struct TestConfig {
	name: String,
	logging: LoggingConfig,
	database: DatabaseConfig,
	nats: NatsConfig,
}

#[test]
#[serial]
fn test_parse_defaults() {
	let (config, file) = parse::<TestConfig>("ESPTESTA", None).expect("failed to parse");

	assert_eq!(file, None);
	assert_eq!(config, TestConfig::default());
	assert_eq!(config.logging.level, "info");
	assert_eq!(config.nats.servers, vec!["localhost:4222".to_string()]);
}

#[test]
#[serial]
fn test_parse_env_override() {
	std::env::set_var("ESPTESTB_NAME", "espelho-test");
	std::env::set_var("ESPTESTB_LOGGING__LEVEL", "debug");

	let (config, _) = parse::<TestConfig>("ESPTESTB", None).expect("failed to parse");

	std::env::remove_var("ESPTESTB_NAME");
	std::env::remove_var("ESPTESTB_LOGGING__LEVEL");

	assert_eq!(config.name, "espelho-test");
	assert_eq!(config.logging.level, "debug");
}

#[test]
#[serial]
fn test_parse_file() {
	let dir = tempfile::tempdir().expect("failed to create tempdir");
	let path = dir.path().join("config.toml");

	let mut file = std::fs::File::create(&path).expect("failed to create config file");
	writeln!(file, "name = \"from-file\"\n\n[database]\nuri = \"postgres://test\"").expect("failed to write");

	let path = path.display().to_string();
	let (config, loaded) = parse::<TestConfig>("ESPTESTC", Some(path.clone())).expect("failed to parse");

	assert_eq!(loaded, Some(path));
	assert_eq!(config.name, "from-file");
	assert_eq!(config.database.uri, "postgres://test");
	// Untouched sections keep their defaults.
	assert_eq!(config.logging, LoggingConfig::default());
}
