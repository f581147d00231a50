use std::time::Duration;

use super::*;

#[tokio::test]
async fn test_signal() {
	let mut handler = SignalHandler::new()
		.with_signal(SignalKind::user_defined1())
		.with_signal(SignalKind::user_defined2());

	// Deliver the signals to our own pid.
	let pid = std::process::id();

	std::process::Command::new("kill")
		.arg("-s")
		.arg("USR1")
		.arg(pid.to_string())
		.status()
		.expect("failed to send SIGUSR1");

	let kind = tokio::time::timeout(Duration::from_secs(1), handler.recv())
		.await
		.expect("failed to receive signal");
	assert_eq!(kind, SignalKind::user_defined1());

	std::process::Command::new("kill")
		.arg("-s")
		.arg("USR2")
		.arg(pid.to_string())
		.status()
		.expect("failed to send SIGUSR2");

	let kind = tokio::time::timeout(Duration::from_secs(1), handler.recv())
		.await
		.expect("failed to receive signal");
	assert_eq!(kind, SignalKind::user_defined2());
}
