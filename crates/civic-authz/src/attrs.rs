// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Actor and resource attributes consumed by the engine.
//!
//! - [`ActorContext`]: who is asking (user id, normalized role, tenant)
//! - [`ResourceDescriptor`]: the tenancy/ownership/assignment facts about the
//!   resource being acted on, plus any requested field values
//!
//! Both are plain values built fresh for each decision. The engine never
//! looks anything up; whatever the caller projects into these structs is the
//! whole truth for that decision. Keeping them consistent with the current
//! session and record (for example, not reusing a tenant id after the user
//! switched tenants) is the caller's job.

use crate::role::{normalize, Role};
use crate::{ResourceType, TenantId, UserId};
use serde::{Deserialize, Serialize};

/// The authenticated caller.
///
/// An actor without a `user_id` is treated as unauthenticated and every
/// decision for it is a denial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
	#[serde(default, alias = "userId")]
	pub user_id: Option<UserId>,
	#[serde(default)]
	pub role: Role,
	#[serde(default, alias = "tenantId")]
	pub tenant_id: Option<TenantId>,
}

impl ActorContext {
	/// Creates an actor with the given identity and role and no tenant.
	pub fn new(user_id: impl Into<UserId>, role: Role) -> Self {
		Self {
			user_id: Some(user_id.into()),
			role,
			tenant_id: None,
		}
	}

	/// An actor with no identity. Every decision for it is a denial.
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// Projects raw session fields into an actor.
	///
	/// The role label is normalized; blank ids are treated as missing.
	pub fn from_session(user_id: Option<&str>, raw_role: Option<&str>, tenant_id: Option<&str>) -> Self {
		let present = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);
		Self {
			user_id: present(user_id).map(UserId::new),
			role: normalize(raw_role),
			tenant_id: present(tenant_id).map(TenantId::new),
		}
	}

	/// Builder: set tenant_id.
	pub fn with_tenant(mut self, tenant_id: impl Into<TenantId>) -> Self {
		self.tenant_id = Some(tenant_id.into());
		self
	}

	/// Returns true if the actor carries a non-blank user id.
	pub fn is_authenticated(&self) -> bool {
		self.user_id.as_ref().is_some_and(|id| !id.is_blank())
	}
}

/// Requested field values for value-gated checks.
///
/// Values are kept as raw strings: an unknown label is not a parse error, it
/// is simply not in any role's allow-list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorExtra {
	#[serde(default, alias = "priority")]
	pub requested_priority: Option<String>,
	#[serde(default, alias = "status")]
	pub requested_status: Option<String>,
}

impl DescriptorExtra {
	pub fn is_empty(&self) -> bool {
		self.requested_priority.is_none() && self.requested_status.is_none()
	}
}

/// Ownership, assignment and tenancy facts about a resource.
///
/// Use the typed constructors ([`issue`](Self::issue), [`letter`](Self::letter),
/// [`meeting`](Self::meeting), [`user_directory`](Self::user_directory),
/// [`tenant`](Self::tenant)) when projecting domain records; they encode how
/// each record's columns map onto `owner_id` and `assignee_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
	#[serde(alias = "resourceType", alias = "type")]
	pub resource_type: ResourceType,
	#[serde(default, alias = "tenantId")]
	pub tenant_id: Option<TenantId>,
	#[serde(default, alias = "ownerId")]
	pub owner_id: Option<UserId>,
	#[serde(default, alias = "assigneeId")]
	pub assignee_id: Option<UserId>,
	#[serde(default, skip_serializing_if = "DescriptorExtra::is_empty")]
	pub extra: DescriptorExtra,
}

impl ResourceDescriptor {
	/// Creates an empty descriptor of the given type.
	pub fn new(resource_type: ResourceType) -> Self {
		Self {
			resource_type,
			tenant_id: None,
			owner_id: None,
			assignee_id: None,
			extra: DescriptorExtra::default(),
		}
	}

	/// Projects an issue row: owner is the creator, assignee is `assigned_to`.
	pub fn issue(tenant_id: Option<TenantId>, created_by: Option<UserId>, assigned_to: Option<UserId>) -> Self {
		Self {
			tenant_id,
			owner_id: created_by,
			assignee_id: assigned_to,
			..Self::new(ResourceType::Issue)
		}
	}

	/// Projects a letter row.
	///
	/// A letter counts as assigned to whoever it was routed to, or to its
	/// creator when it has not been routed: `assignee = assigned_to ?? created_by`.
	pub fn letter(tenant_id: Option<TenantId>, created_by: Option<UserId>, assigned_to: Option<UserId>) -> Self {
		let assignee_id = assigned_to.or_else(|| created_by.clone());
		Self {
			tenant_id,
			owner_id: created_by,
			assignee_id,
			..Self::new(ResourceType::Letter)
		}
	}

	/// Projects a meeting row. The meeting's `user_id` is both owner and assignee.
	pub fn meeting(tenant_id: Option<TenantId>, user_id: Option<UserId>) -> Self {
		Self {
			tenant_id,
			owner_id: user_id.clone(),
			assignee_id: user_id,
			..Self::new(ResourceType::Meeting)
		}
	}

	/// The user directory of a tenant, for user-management checks.
	pub fn user_directory(tenant_id: Option<TenantId>) -> Self {
		Self {
			tenant_id,
			..Self::new(ResourceType::User)
		}
	}

	/// A tenant record. Tenants have no owner or assignee.
	pub fn tenant(tenant_id: Option<TenantId>) -> Self {
		Self {
			tenant_id,
			..Self::new(ResourceType::Tenant)
		}
	}

	/// Builder: set tenant_id.
	pub fn with_tenant(mut self, tenant_id: impl Into<TenantId>) -> Self {
		self.tenant_id = Some(tenant_id.into());
		self
	}

	/// Builder: set owner_id.
	pub fn with_owner(mut self, owner_id: impl Into<UserId>) -> Self {
		self.owner_id = Some(owner_id.into());
		self
	}

	/// Builder: set assignee_id.
	pub fn with_assignee(mut self, assignee_id: impl Into<UserId>) -> Self {
		self.assignee_id = Some(assignee_id.into());
		self
	}

	/// Builder: set the requested priority.
	pub fn with_requested_priority(mut self, priority: impl Into<String>) -> Self {
		self.extra.requested_priority = Some(priority.into());
		self
	}

	/// Builder: set the requested status.
	pub fn with_requested_status(mut self, status: impl Into<String>) -> Self {
		self.extra.requested_status = Some(status.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn uid(id: &str) -> Option<UserId> {
		Some(UserId::new(id))
	}

	fn tid(id: &str) -> Option<TenantId> {
		Some(TenantId::new(id))
	}

	mod actor {
		use super::*;

		#[test]
		fn anonymous_is_not_authenticated() {
			assert!(!ActorContext::anonymous().is_authenticated());
		}

		#[test]
		fn blank_user_id_is_not_authenticated() {
			let actor = ActorContext::new("  ", Role::SuperAdmin);
			assert!(!actor.is_authenticated());
		}

		#[test]
		fn from_session_normalizes() {
			let actor = ActorContext::from_session(Some("u1"), Some("Tenant Admin"), Some("t1"));
			assert_eq!(actor.user_id, uid("u1"));
			assert_eq!(actor.role, Role::Admin);
			assert_eq!(actor.tenant_id, tid("t1"));
			assert!(actor.is_authenticated());
		}

		#[test]
		fn from_session_drops_blank_fields() {
			let actor = ActorContext::from_session(Some(""), None, Some(" "));
			assert_eq!(actor.user_id, None);
			assert_eq!(actor.role, Role::RegularUser);
			assert_eq!(actor.tenant_id, None);
		}

		#[test]
		fn deserializes_camel_case_and_raw_roles() {
			let actor: ActorContext =
				serde_json::from_str(r#"{"userId":"u7","role":"Assistant","tenantId":"t1"}"#).unwrap();
			assert_eq!(actor.role, Role::FieldAgent);
			assert_eq!(actor.user_id, uid("u7"));

			let actor: ActorContext = serde_json::from_str(r#"{"role":""}"#).unwrap();
			assert_eq!(actor, ActorContext::anonymous());
		}
	}

	mod descriptor {
		use super::*;

		#[test]
		fn issue_projection() {
			let d = ResourceDescriptor::issue(tid("t1"), uid("u1"), uid("u2"));
			assert_eq!(d.resource_type, ResourceType::Issue);
			assert_eq!(d.owner_id, uid("u1"));
			assert_eq!(d.assignee_id, uid("u2"));
		}

		#[test]
		fn letter_assignee_prefers_routing() {
			let d = ResourceDescriptor::letter(tid("t1"), uid("creator"), uid("router"));
			assert_eq!(d.assignee_id, uid("router"));
			assert_eq!(d.owner_id, uid("creator"));
		}

		#[test]
		fn letter_assignee_falls_back_to_creator() {
			let d = ResourceDescriptor::letter(tid("t1"), uid("creator"), None);
			assert_eq!(d.assignee_id, uid("creator"));
		}

		#[test]
		fn meeting_user_is_owner_and_assignee() {
			let d = ResourceDescriptor::meeting(tid("t1"), uid("u5"));
			assert_eq!(d.owner_id, uid("u5"));
			assert_eq!(d.assignee_id, uid("u5"));
		}

		#[test]
		fn tenant_has_no_people() {
			let d = ResourceDescriptor::tenant(tid("t1"));
			assert_eq!(d.resource_type, ResourceType::Tenant);
			assert!(d.owner_id.is_none());
			assert!(d.assignee_id.is_none());
		}

		#[test]
		fn builders_set_fields() {
			let d = ResourceDescriptor::new(ResourceType::Issue)
				.with_tenant("t1")
				.with_owner("u1")
				.with_assignee("u2")
				.with_requested_priority("High")
				.with_requested_status("Open");
			assert_eq!(d.tenant_id, tid("t1"));
			assert_eq!(d.extra.requested_priority.as_deref(), Some("High"));
			assert_eq!(d.extra.requested_status.as_deref(), Some("Open"));
		}

		#[test]
		fn deserializes_with_aliases() {
			let d: ResourceDescriptor = serde_json::from_str(
				r#"{"type":"letter","tenantId":"t1","assigneeId":"u7","extra":{"priority":"Low"}}"#,
			)
			.unwrap();
			assert_eq!(d.resource_type, ResourceType::Letter);
			assert_eq!(d.assignee_id, uid("u7"));
			assert_eq!(d.owner_id, None);
			assert_eq!(d.extra.requested_priority.as_deref(), Some("Low"));
		}
	}
}
