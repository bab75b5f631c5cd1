//! Live emulator RAM reads for hover's `Live Value:` line (spec.md §4.8
//! Hover, §5 Cancellation & timeouts).
//!
//! A best-effort side channel: any failure — no emulator listening, a slow
//! reply, a malformed response — resolves to `None` rather than bubbling an
//! error up into a capability handler.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use z3dk_common::address::Address;

const CONNECT_TIMEOUT: Duration = Duration::from_millis(100);
const READ_TIMEOUT: Duration = Duration::from_millis(200);

/// A connection to an emulator that exposes RAM over a small line protocol:
/// the client writes `$AAAAAA\n` and reads back one byte.
#[derive(Debug, Clone)]
pub struct EmulatorLink {
	addr: String,
}

impl EmulatorLink {
	#[must_use]
	pub fn new(addr: impl Into<String>) -> Self {
		Self {
			addr: addr.into(),
		}
	}

	/// Read the live byte at `address`, or `None` on any connect/read
	/// failure or timeout.
	pub async fn read_byte(&self, address: Address) -> Option<u8> {
		let stream = tokio::time::timeout(CONNECT_TIMEOUT, TcpStream::connect(&self.addr)).await.ok()?.ok()?;
		self.read_byte_over(stream, address).await
	}

	async fn read_byte_over(&self, mut stream: TcpStream, address: Address) -> Option<u8> {
		let request = format!("{address}\n");
		tokio::time::timeout(READ_TIMEOUT, stream.write_all(request.as_bytes())).await.ok()?.ok()?;

		let mut buf = [0u8; 1];
		tokio::time::timeout(READ_TIMEOUT, stream.read_exact(&mut buf)).await.ok()?.ok()?;
		Some(buf[0])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_from_a_host_port_string() {
		let link = EmulatorLink::new("127.0.0.1:65400");
		assert_eq!(link.addr, "127.0.0.1:65400");
	}
}
