// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolved runtime configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::layer::CivicConfigLayer;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
	Pretty,
	#[default]
	Compact,
	Json,
}

impl FromStr for LogFormat {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"pretty" => Ok(Self::Pretty),
			"compact" => Ok(Self::Compact),
			"json" => Ok(Self::Json),
			other => Err(ConfigError::invalid_value(
				"logging.format",
				format!("expected pretty, compact or json, got '{other}'"),
			)),
		}
	}
}

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
	#[default]
	Text,
	Json,
}

impl FromStr for OutputFormat {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"text" => Ok(Self::Text),
			"json" => Ok(Self::Json),
			other => Err(ConfigError::invalid_value(
				"output.format",
				format!("expected text or json, got '{other}'"),
			)),
		}
	}
}

impl fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Text => "text",
			Self::Json => "json",
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
	pub level: String,
	pub format: LogFormat,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::default(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
	pub format: OutputFormat,
}

/// Raw session identity. The role label is normalized by the engine, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
	pub user_id: Option<String>,
	pub role: Option<String>,
	pub tenant_id: Option<String>,
}

/// Fully resolved CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CivicConfig {
	pub logging: LoggingConfig,
	pub output: OutputConfig,
	pub session: SessionConfig,
}

impl CivicConfig {
	/// Validates a merged layer and fills in defaults for anything unset.
	pub fn from_layer(layer: CivicConfigLayer) -> Result<Self, ConfigError> {
		let logging_layer = layer.logging.unwrap_or_default();
		let level = match logging_layer.level {
			Some(level) => {
				let level = level.trim().to_ascii_lowercase();
				if !LOG_LEVELS.contains(&level.as_str()) {
					return Err(ConfigError::invalid_value(
						"logging.level",
						format!("expected one of {}, got '{level}'", LOG_LEVELS.join(", ")),
					));
				}
				level
			}
			None => LoggingConfig::default().level,
		};
		let format = logging_layer
			.format
			.as_deref()
			.map(LogFormat::from_str)
			.transpose()?
			.unwrap_or_default();

		let output = layer
			.output
			.unwrap_or_default()
			.format
			.as_deref()
			.map(OutputFormat::from_str)
			.transpose()?
			.unwrap_or_default();

		let session = layer.session.unwrap_or_default();

		Ok(Self {
			logging: LoggingConfig { level, format },
			output: OutputConfig { format: output },
			session: SessionConfig {
				user_id: session.user_id,
				role: session.role,
				tenant_id: session.tenant_id,
			},
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layer::{LoggingConfigLayer, OutputConfigLayer};

	#[test]
	fn test_empty_layer_uses_defaults() {
		let config = CivicConfig::from_layer(CivicConfigLayer::default()).unwrap();
		assert_eq!(config, CivicConfig::default());
		assert_eq!(config.logging.level, "info");
		assert_eq!(config.output.format, OutputFormat::Text);
	}

	#[test]
	fn test_values_are_case_insensitive() {
		let layer = CivicConfigLayer {
			logging: Some(LoggingConfigLayer {
				level: Some("DEBUG".to_string()),
				format: Some("Json".to_string()),
			}),
			output: Some(OutputConfigLayer {
				format: Some("JSON".to_string()),
			}),
			session: None,
		};
		let config = CivicConfig::from_layer(layer).unwrap();
		assert_eq!(config.logging.level, "debug");
		assert_eq!(config.logging.format, LogFormat::Json);
		assert_eq!(config.output.format, OutputFormat::Json);
	}

	#[test]
	fn test_invalid_level_rejected() {
		let layer = CivicConfigLayer {
			logging: Some(LoggingConfigLayer {
				level: Some("loud".to_string()),
				format: None,
			}),
			..Default::default()
		};
		let err = CivicConfig::from_layer(layer).unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "logging.level"));
	}

	#[test]
	fn test_invalid_output_format_rejected() {
		let err = "yaml".parse::<OutputFormat>().unwrap_err();
		assert!(err.to_string().contains("output.format"));
		assert!("xml".parse::<LogFormat>().is_err());
	}
}
