// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization outcomes.

use serde::Serialize;
use std::fmt;

/// Why a decision came out the way it did.
///
/// Diagnostic only: log it, assert on it in tests, but never branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
	/// Role holds the all-resources grant.
	GlobalScope,
	TenantMatch,
	TenantMismatch,
	AssigneeMatch,
	AssigneeMismatch,
	OwnerMatch,
	OwnerMismatch,
	/// Role holds the flat (unscoped) permission.
	Granted,
	/// Requested value is not in the role's allow-list.
	ValueNotPermitted,
	/// Descriptor is for a different resource family than the check.
	ResourceTypeMismatch,
	/// Actor has no identity.
	Unauthenticated,
	NoMatchingPermission,
}

impl ReasonCode {
	pub fn as_str(self) -> &'static str {
		match self {
			ReasonCode::GlobalScope => "global_scope",
			ReasonCode::TenantMatch => "tenant_match",
			ReasonCode::TenantMismatch => "tenant_mismatch",
			ReasonCode::AssigneeMatch => "assignee_match",
			ReasonCode::AssigneeMismatch => "assignee_mismatch",
			ReasonCode::OwnerMatch => "owner_match",
			ReasonCode::OwnerMismatch => "owner_mismatch",
			ReasonCode::Granted => "granted",
			ReasonCode::ValueNotPermitted => "value_not_permitted",
			ReasonCode::ResourceTypeMismatch => "resource_type_mismatch",
			ReasonCode::Unauthenticated => "unauthenticated",
			ReasonCode::NoMatchingPermission => "no_matching_permission",
		}
	}
}

impl fmt::Display for ReasonCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Result of a single authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[must_use]
pub struct Decision {
	pub allowed: bool,
	pub reason: ReasonCode,
}

impl Decision {
	pub const fn allow(reason: ReasonCode) -> Self {
		Self {
			allowed: true,
			reason,
		}
	}

	pub const fn deny(reason: ReasonCode) -> Self {
		Self {
			allowed: false,
			reason,
		}
	}
}

impl fmt::Display for Decision {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let verdict = if self.allowed { "allow" } else { "deny" };
		write!(f, "{verdict} ({})", self.reason)
	}
}
