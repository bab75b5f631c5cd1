mod env_filter;

use std::fmt::Debug;
use std::path::PathBuf;

use tracing::Level;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};
use tracing_subscriber::{Layer, fmt};

pub(crate) use self::env_filter::Custom;
pub(crate) use self::env_filter::CustomEnvFilterParser;

const LOG_FILE_NAME_PREFIX: &str = "z3dk.log";

/// Where the fmt layer writes to when no file appender is configured.
/// `textDocument` traffic over stdio means the `lsp` subcommand must never
/// write logs to stdout (spec.md §4.8) — everything else is free to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
	Stdout,
	Stderr,
}

#[derive(Debug, Clone)]
pub struct Builder {
	filter: Custom,
	log_to_path: Option<PathBuf>,
	target: Target,
}

#[must_use]
pub fn builder() -> Builder {
	Builder::default()
}

impl Default for Builder {
	fn default() -> Self {
		Self {
			filter: Custom(EnvFilter::default()),
			log_to_path: None,
			target: Target::Stdout,
		}
	}
}

impl Builder {
	#[allow(dead_code)]
	#[must_use]
	pub fn with_log_level(mut self, log_level: &str) -> Self {
		if let Ok(filter) = filter_from_value(log_level) {
			self.filter = Custom(filter);
		}
		self
	}

	#[must_use]
	pub fn with_filter(mut self, filter: Custom) -> Self {
		self.filter = filter;
		self
	}

	#[must_use]
	pub fn with_file_appender(mut self, path: PathBuf) -> Self {
		self.log_to_path = Some(path);
		self
	}

	/// Send fmt-layer output to `target` instead of stdout. The `lsp`
	/// subcommand must call this with [`Target::Stderr`].
	#[must_use]
	pub fn with_target(mut self, target: Target) -> Self {
		self.target = target;
		self
	}

	/// Build a tracing dispatcher with the fmt subscriber (logs) and the chosen tracer subscriber
	/// # Panics
	/// if the tracing dispatcher fails to set the global default
	pub fn build(self) -> Option<tracing_appender::non_blocking::WorkerGuard> {
		let filter = self.filter;

		LogTracer::builder().init().expect("LogTracer failed to init");

		let fmt_layer = match self.target {
			Target::Stdout => {
				fmt::layer().with_level(true).with_writer(std::io::stdout).with_filter(filter.clone().0).boxed()
			}
			Target::Stderr => {
				fmt::layer().with_level(true).with_writer(std::io::stderr).with_filter(filter.clone().0).boxed()
			}
		};

		if let Some(path) = self.log_to_path {
			let file_appender = tracing_appender::rolling::daily(path, LOG_FILE_NAME_PREFIX);
			let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
			let file_layer =
				fmt::layer().with_ansi(false).with_writer(non_blocking).with_filter(filter.0);
			let collector = tracing_subscriber::registry().with(fmt_layer).with(file_layer);
			tracing::subscriber::set_global_default(collector).expect("Tracing collect error");

			Some(guard)
		} else {
			let collector = tracing_subscriber::registry().with(fmt_layer);
			tracing::subscriber::set_global_default(collector).expect("Tracing collect error");

			None
		}
	}
}

/// Parse the log level from the value
/// # Errors
/// if the log level is invalid
pub fn filter_from_value(v: &str) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
	match v {
		"none" => Ok(EnvFilter::default()),
		"full" => Ok(EnvFilter::default().add_directive(Level::TRACE.into())),
		"error" => Ok(EnvFilter::default().add_directive(Level::ERROR.into())),
		"warn" | "info" | "debug" | "trace" => EnvFilter::builder().parse(format!("error,z3dk={v}")),
		_ => EnvFilter::builder().parse(v),
	}
}
