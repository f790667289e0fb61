// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layers.
//!
//! Every field is optional so a layer only carries what its source actually
//! set. Layers are merged lowest precedence first; a `Some` in a later layer
//! replaces the earlier value.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfigLayer {
	pub level: Option<String>,
	pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfigLayer {
	pub format: Option<String>,
}

/// Default identity for checks run without explicit actor flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfigLayer {
	pub user_id: Option<String>,
	pub role: Option<String>,
	pub tenant_id: Option<String>,
}

/// One source's view of the configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CivicConfigLayer {
	pub logging: Option<LoggingConfigLayer>,
	pub output: Option<OutputConfigLayer>,
	pub session: Option<SessionConfigLayer>,
}

fn merge_field<T>(target: &mut Option<T>, other: Option<T>) {
	if other.is_some() {
		*target = other;
	}
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		merge_field(&mut self.level, other.level);
		merge_field(&mut self.format, other.format);
	}
}

impl OutputConfigLayer {
	pub fn merge(&mut self, other: Self) {
		merge_field(&mut self.format, other.format);
	}
}

impl SessionConfigLayer {
	pub fn merge(&mut self, other: Self) {
		merge_field(&mut self.user_id, other.user_id);
		merge_field(&mut self.role, other.role);
		merge_field(&mut self.tenant_id, other.tenant_id);
	}
}

impl CivicConfigLayer {
	/// Merge `other` on top of `self`.
	pub fn merge(&mut self, other: Self) {
		if let Some(logging) = other.logging {
			self.logging.get_or_insert_with(Default::default).merge(logging);
		}
		if let Some(output) = other.output {
			self.output.get_or_insert_with(Default::default).merge(output);
		}
		if let Some(session) = other.session {
			self.session.get_or_insert_with(Default::default).merge(session);
		}
	}
}
