// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::PathBuf;

use crate::ConfigError;

pub const SYSTEM_CONFIG_FILE: &str = "/etc/civic/config.toml";

/// Resolved config file locations.
#[derive(Debug, Clone)]
pub struct PathsConfig {
	/// User config file: ~/.config/civic/config.toml
	pub user_config_file: PathBuf,
	/// System config file: /etc/civic/config.toml
	pub system_config_file: PathBuf,
}

impl PathsConfig {
	/// Get the config directory (parent of user_config_file)
	pub fn config_dir(&self) -> PathBuf {
		self
			.user_config_file
			.parent()
			.map(|p| p.to_path_buf())
			.unwrap_or_else(|| self.user_config_file.clone())
	}
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			user_config_file: PathBuf::from("~/.config/civic/config.toml"),
			system_config_file: PathBuf::from(SYSTEM_CONFIG_FILE),
		}
	}
}

/// Resolve config paths, honouring `XDG_CONFIG_HOME` and falling back to
/// `~/.config`.
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let config_home = match std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
		Some(dir) => PathBuf::from(dir),
		None => dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?.join(".config"),
	};

	tracing::debug!(config_home = %config_home.display(), "resolved XDG paths");

	Ok(PathsConfig {
		user_config_file: config_home.join("civic/config.toml"),
		system_config_file: PathBuf::from(SYSTEM_CONFIG_FILE),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_paths() {
		let paths = PathsConfig::default();
		assert_eq!(paths.system_config_file, PathBuf::from("/etc/civic/config.toml"));
		assert!(paths.config_dir().to_string_lossy().ends_with("civic"));
	}

	#[test]
	fn test_resolved_user_file_is_under_civic() {
		if let Ok(paths) = resolve_xdg_paths() {
			assert!(paths.user_config_file.ends_with("civic/config.toml"));
			assert_eq!(paths.system_config_file, PathBuf::from(SYSTEM_CONFIG_FILE));
		}
	}
}
