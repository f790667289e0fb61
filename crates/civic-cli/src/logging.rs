// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use civic_cli_config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a configured level.
pub fn default_directive(config: &LoggingConfig) -> String {
	format!("civic={level},civic_authz={level},civic_cli_config={level}", level = config.level)
}

/// Installs the global subscriber. Logs go to stderr; stdout carries results.
///
/// `RUST_LOG` takes priority over the configured level.
pub fn init_tracing(config: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(config)));
	let registry = tracing_subscriber::registry().with(filter);

	let result = match config.format {
		LogFormat::Pretty => registry
			.with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
			.try_init(),
		LogFormat::Compact => registry
			.with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
			.try_init(),
		LogFormat::Json => registry
			.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
			.try_init(),
	};

	if let Err(e) = result {
		eprintln!("failed to install tracing subscriber: {e}");
	}
}
