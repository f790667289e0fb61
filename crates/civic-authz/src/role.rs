// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Canonical roles and the role-label normalizer.
//!
//! Upstream systems spell roles in many ways ("SuperAdmin", "super_admins",
//! "tenant_admin", "field agent", "Assistant", ...). Every label crosses into
//! the engine through [`normalize`], which always returns one of the closed
//! [`Role`] variants. Anything unrecognized, including a missing label,
//! becomes [`Role::RegularUser`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical roles understood by the permission catalog.
///
/// Deserializing a `Role` runs the raw label through [`normalize`], so
/// untrusted input can never fail to parse or land on an elevated role by
/// accident.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Role {
	/// Cross-tenant administrator.
	SuperAdmin,
	/// Administrator of a single tenant.
	Admin,
	/// Field staff working assigned cases. Also covers the legacy "Assistant" label.
	FieldAgent,
	/// Least-privileged role.
	#[default]
	RegularUser,
}

impl Role {
	/// Returns all canonical roles.
	pub fn all() -> &'static [Role] {
		&[
			Role::SuperAdmin,
			Role::Admin,
			Role::FieldAgent,
			Role::RegularUser,
		]
	}

	/// Normalizes a raw role label. See [`normalize`].
	pub fn normalize(raw: &str) -> Role {
		normalize(Some(raw))
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Role::SuperAdmin => "super_admin",
			Role::Admin => "admin",
			Role::FieldAgent => "field_agent",
			Role::RegularUser => "regular_user",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<Option<String>> for Role {
	fn from(raw: Option<String>) -> Self {
		normalize(raw.as_deref())
	}
}

impl From<&str> for Role {
	fn from(raw: &str) -> Self {
		normalize(Some(raw))
	}
}

impl From<Role> for String {
	fn from(role: Role) -> Self {
		role.as_str().to_string()
	}
}

/// Maps an arbitrary role label onto a canonical [`Role`].
///
/// Matching is case-insensitive; `-` and spaces are treated as `_`. Rules in
/// priority order:
///
/// 1. contains `super_admin` or `superadmin` → [`Role::SuperAdmin`]
/// 2. contains `admin` (this covers `tenant_admin`) → [`Role::Admin`]
/// 3. contains `field_agent` or `fieldagent` → [`Role::FieldAgent`]
/// 4. contains `assistant` → [`Role::FieldAgent`]
/// 5. anything else, including `None` and empty input → [`Role::RegularUser`]
pub fn normalize(raw: Option<&str>) -> Role {
	let Some(raw) = raw else {
		return Role::RegularUser;
	};

	let label: String = raw
		.trim()
		.chars()
		.map(|c| match c {
			'-' | ' ' => '_',
			c => c.to_ascii_lowercase(),
		})
		.collect();

	if label.contains("super_admin") || label.contains("superadmin") {
		Role::SuperAdmin
	} else if label.contains("admin") {
		Role::Admin
	} else if label.contains("field_agent") || label.contains("fieldagent") {
		Role::FieldAgent
	} else if label.contains("assistant") {
		Role::FieldAgent
	} else {
		Role::RegularUser
	}
}
