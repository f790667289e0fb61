// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core identifier and resource-kind types.
//!
//! - **ID newtypes**: [`UserId`] and [`TenantId`] wrap the opaque string
//!   identifiers handed over by the session and persistence layers, so a user
//!   id can never be compared against a tenant id by accident.
//! - **Resource kinds**: [`ResourceType`] names the five protected resource
//!   families.
//!
//! IDs serialize transparently as strings. An empty string is a valid value
//! for serde round-trips but never counts as a present identity when the
//! engine matches ownership, assignment or tenancy.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);

		impl $name {
			/// Create a new ID from any string-like value.
			pub fn new(id: impl Into<String>) -> Self {
				Self(id.into())
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4().to_string())
			}

			/// Get the inner string value.
			pub fn as_str(&self) -> &str {
				&self.0
			}

			/// Consume the ID and return the inner string.
			pub fn into_inner(self) -> String {
				self.0
			}

			/// Returns true if the ID is empty or whitespace only.
			pub fn is_blank(&self) -> bool {
				self.0.trim().is_empty()
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl From<&str> for $name {
			fn from(id: &str) -> Self {
				Self(id.to_string())
			}
		}

		impl From<String> for $name {
			fn from(id: String) -> Self {
				Self(id)
			}
		}

		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for an authenticated user.");
define_id_type!(TenantId, "Unique identifier for a tenant (constituency office).");

/// Returns true when both sides carry the same non-blank identifier.
///
/// A missing or blank value on either side is a non-match, never an error.
pub(crate) fn ids_match<T: AsRef<str>>(left: Option<&T>, right: Option<&T>) -> bool {
	match (left, right) {
		(Some(l), Some(r)) => {
			let l = l.as_ref();
			!l.trim().is_empty() && l == r.as_ref()
		}
		_ => false,
	}
}

// =============================================================================
// Resource Types
// =============================================================================

/// Resource families protected by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
	/// A citizen grievance.
	Issue,
	/// A letter sent on a citizen's behalf.
	Letter,
	/// A scheduled meeting or visit.
	Meeting,
	/// The user directory of a tenant.
	User,
	/// A tenant record.
	Tenant,
}

impl ResourceType {
	/// Returns all resource types.
	pub fn all() -> &'static [ResourceType] {
		&[
			ResourceType::Issue,
			ResourceType::Letter,
			ResourceType::Meeting,
			ResourceType::User,
			ResourceType::Tenant,
		]
	}

	pub fn as_str(self) -> &'static str {
		match self {
			ResourceType::Issue => "issue",
			ResourceType::Letter => "letter",
			ResourceType::Meeting => "meeting",
			ResourceType::User => "user",
			ResourceType::Tenant => "tenant",
		}
	}
}

impl fmt::Display for ResourceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn id_display_and_accessors() {
		let user = UserId::new("u1");
		let tenant = TenantId::from("t1");
		assert_eq!(user.as_str(), "u1");
		assert_eq!(user.to_string(), "u1");
		assert_eq!(tenant.clone().into_inner(), "t1");
		assert!(!tenant.is_blank());
		assert!(UserId::new("  ").is_blank());
	}

	#[test]
	fn generated_ids_are_distinct() {
		assert_ne!(UserId::generate(), UserId::generate());
	}

	#[test]
	fn ids_serialize_transparently() {
		let json = serde_json::to_string(&TenantId::new("t9")).unwrap();
		assert_eq!(json, "\"t9\"");
		let parsed: UserId = serde_json::from_str("\"u4\"").unwrap();
		assert_eq!(parsed, UserId::new("u4"));
	}

	mod matching {
		use super::*;

		#[test]
		fn equal_ids_match() {
			let a = UserId::new("u1");
			let b = UserId::new("u1");
			assert!(ids_match(Some(&a), Some(&b)));
		}

		#[test]
		fn missing_side_never_matches() {
			let a = UserId::new("u1");
			assert!(!ids_match(Some(&a), None));
			assert!(!ids_match(None, Some(&a)));
			assert!(!ids_match::<UserId>(None, None));
		}

		#[test]
		fn blank_ids_never_match() {
			let a = UserId::new("");
			let b = UserId::new("");
			assert!(!ids_match(Some(&a), Some(&b)));
		}
	}

	#[test]
	fn resource_type_strings() {
		for rt in ResourceType::all() {
			let json = serde_json::to_string(rt).unwrap();
			assert_eq!(json, format!("\"{}\"", rt.as_str()));
		}
	}
}
