// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for the civic authorization CLI.
//!
//! This crate provides:
//! - XDG Base Directory compliant path resolution
//! - Layered configuration from multiple sources
//! - TOML configuration file parsing
//! - Environment variable overrides (`CIVIC_*`)
//! - Validation of log and output formats

pub mod error;
pub mod layer;
pub mod paths;
pub mod runtime;
pub mod sources;

pub use error::ConfigError;
pub use layer::CivicConfigLayer;
pub use paths::PathsConfig;
pub use runtime::{CivicConfig, LogFormat, LoggingConfig, OutputConfig, OutputFormat, SessionConfig};
pub use sources::{CliOverrides, ConfigSource, Precedence};

use std::path::PathBuf;

use tracing::debug;

/// Load configuration from every source.
///
/// Precedence (highest to lowest):
/// 1. Command-line flags
/// 2. Environment variables (`CIVIC_*`)
/// 3. File passed with `--config`
/// 4. User file (`$XDG_CONFIG_HOME/civic/config.toml`)
/// 5. System file (`/etc/civic/config.toml`)
/// 6. Built-in defaults
pub fn load_config_with_cli(
	config_file: Option<PathBuf>,
	cli: CliOverrides,
) -> Result<CivicConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;

	let mut sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(sources::DefaultsSource),
		Box::new(sources::FileSource::system(&paths)),
		Box::new(sources::FileSource::user(&paths)),
		Box::new(sources::EnvSource),
		Box::new(sources::CliSource::new(cli)),
	];
	if let Some(path) = config_file {
		sources.push(Box::new(sources::FileSource::explicit(path)));
	}

	load_from_sources(sources)
}

/// Merge `sources` in precedence order and validate the result.
pub fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<CivicConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = CivicConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	CivicConfig::from_layer(merged)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sources::{CliSource, DefaultsSource, FileSource};
	use std::io::Write;

	#[test]
	fn test_explicit_file_overrides_defaults_and_cli_overrides_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			"[logging]\nlevel = \"warn\"\n\n[session]\nuser_id = \"u1\"\nrole = \"admin\"\ntenant_id = \"t1\""
		)
		.unwrap();

		let config = load_from_sources(vec![
			Box::new(CliSource::new(CliOverrides {
				role: Some("field_agent".to_string()),
				..Default::default()
			})),
			Box::new(FileSource::explicit(file.path())),
			Box::new(DefaultsSource),
		])
		.unwrap();

		assert_eq!(config.logging.level, "warn");
		assert_eq!(config.logging.format, LogFormat::Compact);
		assert_eq!(config.session.user_id.as_deref(), Some("u1"));
		assert_eq!(config.session.role.as_deref(), Some("field_agent"));
		assert_eq!(config.session.tenant_id.as_deref(), Some("t1"));
	}

	#[test]
	fn test_invalid_file_value_surfaces_as_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		std::fs::write(&path, "[output]\nformat = \"yaml\"\n").unwrap();

		let err = load_from_sources(vec![Box::new(DefaultsSource), Box::new(FileSource::explicit(&path))])
			.unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { .. }));
	}
}
