// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files, environment and CLI flags.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::{CivicConfigLayer, LoggingConfigLayer, OutputConfigLayer, SessionConfigLayer};
use crate::paths::PathsConfig;

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	SystemFile = 20,
	UserFile = 30,
	ExplicitFile = 40,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<CivicConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<CivicConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(CivicConfigLayer {
			logging: Some(LoggingConfigLayer {
				level: Some("info".to_string()),
				format: Some("compact".to_string()),
			}),
			output: Some(OutputConfigLayer {
				format: Some("text".to_string()),
			}),
			session: None,
		})
	}
}

/// TOML file configuration source.
///
/// Missing system and user files are skipped. A file named explicitly with
/// `--config` must exist.
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	required: bool,
}

impl FileSource {
	pub fn system(paths: &PathsConfig) -> Self {
		Self {
			path: paths.system_config_file.clone(),
			precedence: Precedence::SystemFile,
			required: false,
		}
	}

	pub fn user(paths: &PathsConfig) -> Self {
		Self {
			path: paths.user_config_file.clone(),
			precedence: Precedence::UserFile,
			required: false,
		}
	}

	pub fn explicit(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			precedence: Precedence::ExplicitFile,
			required: true,
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		match self.precedence {
			Precedence::SystemFile => "system-file",
			Precedence::UserFile => "user-file",
			_ => "config-file",
		}
	}

	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<CivicConfigLayer, ConfigError> {
		if !self.required && !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(CivicConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::Io {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: CivicConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: CIVIC_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<CivicConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(layer_from_vars(|name| std::env::var(name).ok()))
	}
}

/// Builds a layer from a variable lookup. Empty values count as unset.
pub fn layer_from_vars(lookup: impl Fn(&str) -> Option<String>) -> CivicConfigLayer {
	let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

	CivicConfigLayer {
		logging: Some(LoggingConfigLayer {
			level: var("CIVIC_LOG_LEVEL"),
			format: var("CIVIC_LOG_FORMAT"),
		}),
		output: Some(OutputConfigLayer {
			format: var("CIVIC_OUTPUT_FORMAT"),
		}),
		session: Some(SessionConfigLayer {
			user_id: var("CIVIC_USER_ID"),
			role: var("CIVIC_ROLE"),
			tenant_id: var("CIVIC_TENANT_ID"),
		}),
	}
}

/// Values passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub log_level: Option<String>,
	pub log_format: Option<String>,
	pub output_format: Option<String>,
	pub user_id: Option<String>,
	pub role: Option<String>,
	pub tenant_id: Option<String>,
}

/// Command-line source.
pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<CivicConfigLayer, ConfigError> {
		let o = self.overrides.clone();
		Ok(CivicConfigLayer {
			logging: Some(LoggingConfigLayer {
				level: o.log_level,
				format: o.log_format,
			}),
			output: Some(OutputConfigLayer {
				format: o.output_format,
			}),
			session: Some(SessionConfigLayer {
				user_id: o.user_id,
				role: o.role,
				tenant_id: o.tenant_id,
			}),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use std::io::Write;

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Cli > Precedence::Environment);
		assert!(Precedence::Environment > Precedence::ExplicitFile);
		assert!(Precedence::ExplicitFile > Precedence::UserFile);
		assert!(Precedence::UserFile > Precedence::SystemFile);
		assert!(Precedence::SystemFile > Precedence::Defaults);
	}

	#[test]
	fn test_optional_file_missing_returns_empty() {
		let paths = PathsConfig {
			user_config_file: PathBuf::from("/nonexistent/civic/config.toml"),
			system_config_file: PathBuf::from("/nonexistent/etc/civic/config.toml"),
		};
		assert_eq!(FileSource::user(&paths).load().unwrap(), CivicConfigLayer::default());
		assert_eq!(FileSource::system(&paths).load().unwrap(), CivicConfigLayer::default());
	}

	#[test]
	fn test_explicit_file_missing_is_io_error() {
		let err = FileSource::explicit("/nonexistent/civic.toml").load().unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
	}

	#[test]
	fn test_file_source_parses_sections() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			"[session]\nuser_id = \"u7\"\nrole = \"Field Agent\"\ntenant_id = \"t1\"\n\n[output]\nformat = \"json\""
		)
		.unwrap();

		let layer = FileSource::explicit(file.path()).load().unwrap();
		let session = layer.session.unwrap();
		assert_eq!(session.user_id.as_deref(), Some("u7"));
		assert_eq!(session.role.as_deref(), Some("Field Agent"));
		assert_eq!(layer.output.unwrap().format.as_deref(), Some("json"));
	}

	#[test]
	fn test_file_source_reports_parse_errors_with_path() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[logging\nlevel = ").unwrap();

		let err = FileSource::explicit(file.path()).load().unwrap_err();
		match err {
			ConfigError::TomlParse { path, .. } => assert_eq!(path, file.path()),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn test_env_layer_reads_civic_vars() {
		let vars: HashMap<&str, &str> = [
			("CIVIC_LOG_LEVEL", "debug"),
			("CIVIC_ROLE", "admin"),
			("CIVIC_TENANT_ID", ""),
		]
		.into_iter()
		.collect();

		let layer = layer_from_vars(|name| vars.get(name).map(|v| v.to_string()));
		assert_eq!(layer.logging.unwrap().level.as_deref(), Some("debug"));
		let session = layer.session.unwrap();
		assert_eq!(session.role.as_deref(), Some("admin"));
		assert_eq!(session.tenant_id, None);
	}

	#[test]
	fn test_cli_source_carries_overrides() {
		let layer = CliSource::new(CliOverrides {
			output_format: Some("json".to_string()),
			user_id: Some("u1".to_string()),
			..Default::default()
		})
		.load()
		.unwrap();
		assert_eq!(layer.output.unwrap().format.as_deref(), Some("json"));
		assert_eq!(layer.session.unwrap().user_id.as_deref(), Some("u1"));
	}
}
