// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission symbols and the immutable permission set.
//!
//! Every [`Permission`] is one (resource family × operation × scope) grant.
//! Scoped grants carry a [`Scope`]; flat grants such as `CreateIssues` carry
//! none. [`Permission::grant`] exposes that decomposition so the scope
//! resolver can ask "which scope does this role hold for editing letters?"
//! without string matching.

use crate::ResourceType;
use serde::{Serialize, Serializer};
use std::fmt;

/// Breadth of a scoped grant, broadest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
	/// Every resource of the family, across tenants.
	All,
	/// Resources whose tenant equals the actor's tenant.
	Tenant,
	/// Resources routed to the actor.
	Assigned,
	/// Resources the actor created.
	Own,
}

impl Scope {
	/// Evaluation order used by the scope resolver.
	pub const CASCADE: [Scope; 4] = [Scope::All, Scope::Tenant, Scope::Assigned, Scope::Own];

	pub fn as_str(self) -> &'static str {
		match self {
			Scope::All => "all",
			Scope::Tenant => "tenant",
			Scope::Assigned => "assigned",
			Scope::Own => "own",
		}
	}
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Operation half of a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
	View,
	Create,
	Edit,
	Delete,
	Assign,
	Export,
	Manage,
	ManageAssistants,
	Switch,
}

impl Operation {
	pub fn as_str(self) -> &'static str {
		match self {
			Operation::View => "view",
			Operation::Create => "create",
			Operation::Edit => "edit",
			Operation::Delete => "delete",
			Operation::Assign => "assign",
			Operation::Export => "export",
			Operation::Manage => "manage",
			Operation::ManageAssistants => "manage_assistants",
			Operation::Switch => "switch",
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Decomposition of a [`Permission`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Grant {
	pub resource: ResourceType,
	pub operation: Operation,
	pub scope: Option<Scope>,
}

macro_rules! define_permissions {
	($( $variant:ident => ($name:literal, $resource:ident, $operation:ident, $scope:expr) ),+ $(,)?) => {
		/// Closed set of grantable permissions.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		#[repr(u8)]
		pub enum Permission {
			$( $variant, )+
		}

		impl Permission {
			/// Every permission, in declaration order.
			pub const ALL: &'static [Permission] = &[ $( Permission::$variant, )+ ];

			/// Stable snake_case name.
			pub const fn as_str(self) -> &'static str {
				match self {
					$( Permission::$variant => $name, )+
				}
			}

			/// Resource family, operation and scope this permission grants.
			pub const fn grant(self) -> Grant {
				match self {
					$(
						Permission::$variant => Grant {
							resource: ResourceType::$resource,
							operation: Operation::$operation,
							scope: $scope,
						},
					)+
				}
			}
		}
	};
}

define_permissions! {
	// Issues
	ViewAllIssues => ("view_all_issues", Issue, View, Some(Scope::All)),
	ViewTenantIssues => ("view_tenant_issues", Issue, View, Some(Scope::Tenant)),
	ViewAssignedIssues => ("view_assigned_issues", Issue, View, Some(Scope::Assigned)),
	ViewOwnIssues => ("view_own_issues", Issue, View, Some(Scope::Own)),
	CreateIssues => ("create_issues", Issue, Create, None),
	EditAllIssues => ("edit_all_issues", Issue, Edit, Some(Scope::All)),
	EditTenantIssues => ("edit_tenant_issues", Issue, Edit, Some(Scope::Tenant)),
	EditAssignedIssues => ("edit_assigned_issues", Issue, Edit, Some(Scope::Assigned)),
	EditOwnIssues => ("edit_own_issues", Issue, Edit, Some(Scope::Own)),
	DeleteAllIssues => ("delete_all_issues", Issue, Delete, Some(Scope::All)),
	DeleteTenantIssues => ("delete_tenant_issues", Issue, Delete, Some(Scope::Tenant)),
	DeleteAssignedIssues => ("delete_assigned_issues", Issue, Delete, Some(Scope::Assigned)),
	DeleteOwnIssues => ("delete_own_issues", Issue, Delete, Some(Scope::Own)),
	AssignAllIssues => ("assign_all_issues", Issue, Assign, Some(Scope::All)),
	AssignTenantIssues => ("assign_tenant_issues", Issue, Assign, Some(Scope::Tenant)),
	ExportIssues => ("export_issues", Issue, Export, None),

	// Letters
	ViewAllLetters => ("view_all_letters", Letter, View, Some(Scope::All)),
	ViewTenantLetters => ("view_tenant_letters", Letter, View, Some(Scope::Tenant)),
	ViewAssignedLetters => ("view_assigned_letters", Letter, View, Some(Scope::Assigned)),
	ViewOwnLetters => ("view_own_letters", Letter, View, Some(Scope::Own)),
	CreateLetters => ("create_letters", Letter, Create, None),
	EditAllLetters => ("edit_all_letters", Letter, Edit, Some(Scope::All)),
	EditTenantLetters => ("edit_tenant_letters", Letter, Edit, Some(Scope::Tenant)),
	EditAssignedLetters => ("edit_assigned_letters", Letter, Edit, Some(Scope::Assigned)),
	EditOwnLetters => ("edit_own_letters", Letter, Edit, Some(Scope::Own)),
	DeleteAllLetters => ("delete_all_letters", Letter, Delete, Some(Scope::All)),
	DeleteTenantLetters => ("delete_tenant_letters", Letter, Delete, Some(Scope::Tenant)),
	DeleteAssignedLetters => ("delete_assigned_letters", Letter, Delete, Some(Scope::Assigned)),
	DeleteOwnLetters => ("delete_own_letters", Letter, Delete, Some(Scope::Own)),
	ManageLetterAssignments => ("manage_letter_assignments", Letter, Assign, None),

	// Meetings
	ViewAllMeetings => ("view_all_meetings", Meeting, View, Some(Scope::All)),
	ViewTenantMeetings => ("view_tenant_meetings", Meeting, View, Some(Scope::Tenant)),
	ViewAssignedMeetings => ("view_assigned_meetings", Meeting, View, Some(Scope::Assigned)),
	ViewOwnMeetings => ("view_own_meetings", Meeting, View, Some(Scope::Own)),
	CreateMeetings => ("create_meetings", Meeting, Create, None),
	EditAllMeetings => ("edit_all_meetings", Meeting, Edit, Some(Scope::All)),
	EditTenantMeetings => ("edit_tenant_meetings", Meeting, Edit, Some(Scope::Tenant)),
	EditAssignedMeetings => ("edit_assigned_meetings", Meeting, Edit, Some(Scope::Assigned)),
	EditOwnMeetings => ("edit_own_meetings", Meeting, Edit, Some(Scope::Own)),
	DeleteAllMeetings => ("delete_all_meetings", Meeting, Delete, Some(Scope::All)),
	DeleteTenantMeetings => ("delete_tenant_meetings", Meeting, Delete, Some(Scope::Tenant)),
	DeleteAssignedMeetings => ("delete_assigned_meetings", Meeting, Delete, Some(Scope::Assigned)),
	DeleteOwnMeetings => ("delete_own_meetings", Meeting, Delete, Some(Scope::Own)),

	// Users
	ManageAllUsers => ("manage_all_users", User, Manage, Some(Scope::All)),
	ManageTenantUsers => ("manage_tenant_users", User, Manage, Some(Scope::Tenant)),
	ManageAllAssistants => ("manage_all_assistants", User, ManageAssistants, Some(Scope::All)),
	ManageAssistants => ("manage_assistants", User, ManageAssistants, Some(Scope::Tenant)),

	// Tenants
	SwitchTenants => ("switch_tenants", Tenant, Switch, None),
	ViewAllTenants => ("view_all_tenants", Tenant, View, Some(Scope::All)),
	EditAllTenants => ("edit_all_tenants", Tenant, Edit, Some(Scope::All)),
	EditOwnTenant => ("edit_own_tenant", Tenant, Edit, Some(Scope::Tenant)),
	DeleteAllTenants => ("delete_all_tenants", Tenant, Delete, Some(Scope::All)),
}

impl Permission {
	/// Finds the permission granting `operation` on `resource` at `scope`.
	///
	/// Returns `None` when no such symbol exists (for example, tenant-scoped
	/// tenant deletion).
	pub fn lookup(resource: ResourceType, operation: Operation, scope: Option<Scope>) -> Option<Permission> {
		let wanted = Grant {
			resource,
			operation,
			scope,
		};
		Permission::ALL.iter().copied().find(|p| p.grant() == wanted)
	}

	const fn bit(self) -> u64 {
		1u64 << (self as u8)
	}
}

impl fmt::Display for Permission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for Permission {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

// Bitset storage requires every discriminant to fit in a u64.
const _: () = assert!(Permission::ALL.len() <= 64);

/// Immutable set of permissions with constant-time membership checks.
///
/// The set is `Copy` and exposes no mutating methods; the catalog hands out
/// values, so no caller can alter another caller's view of a role.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PermissionSet(u64);

impl PermissionSet {
	/// The empty set.
	pub const EMPTY: PermissionSet = PermissionSet(0);

	/// Builds a set from a slice at compile time.
	pub const fn from_slice(permissions: &[Permission]) -> Self {
		let mut bits = 0u64;
		let mut i = 0;
		while i < permissions.len() {
			bits |= permissions[i].bit();
			i += 1;
		}
		PermissionSet(bits)
	}

	pub const fn contains(self, permission: Permission) -> bool {
		self.0 & permission.bit() != 0
	}

	pub const fn len(self) -> usize {
		self.0.count_ones() as usize
	}

	pub const fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// Iterates the contained permissions in declaration order.
	pub fn iter(self) -> impl Iterator<Item = Permission> {
		Permission::ALL.iter().copied().filter(move |p| self.contains(*p))
	}

	/// Scopes held for `operation` on `resource`, broadest first.
	pub fn scopes_for(self, resource: ResourceType, operation: Operation) -> Vec<Scope> {
		self
			.iter()
			.map(Permission::grant)
			.filter(|g| g.resource == resource && g.operation == operation)
			.filter_map(|g| g.scope)
			.collect()
	}
}

impl fmt::Debug for PermissionSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

impl Serialize for PermissionSet {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_seq(self.iter())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn names_are_unique() {
		let names: HashSet<_> = Permission::ALL.iter().map(|p| p.as_str()).collect();
		assert_eq!(names.len(), Permission::ALL.len());
	}

	#[test]
	fn grants_are_unique() {
		let grants: HashSet<_> = Permission::ALL.iter().map(|p| p.grant()).collect();
		assert_eq!(grants.len(), Permission::ALL.len());
	}

	#[test]
	fn lookup_finds_each_permission() {
		for permission in Permission::ALL {
			let g = permission.grant();
			assert_eq!(Permission::lookup(g.resource, g.operation, g.scope), Some(*permission));
		}
	}

	#[test]
	fn lookup_missing_grant() {
		assert_eq!(
			Permission::lookup(ResourceType::Tenant, Operation::Delete, Some(Scope::Tenant)),
			None
		);
		assert_eq!(
			Permission::lookup(ResourceType::Meeting, Operation::Export, None),
			None
		);
	}

	#[test]
	fn set_membership() {
		let set = PermissionSet::from_slice(&[Permission::CreateIssues, Permission::DeleteAllTenants]);
		assert!(set.contains(Permission::CreateIssues));
		assert!(set.contains(Permission::DeleteAllTenants));
		assert!(!set.contains(Permission::ViewAllIssues));
		assert_eq!(set.len(), 2);
		assert!(!set.is_empty());
		assert!(PermissionSet::EMPTY.is_empty());
	}

	#[test]
	fn set_iterates_in_declaration_order() {
		let set = PermissionSet::from_slice(&[Permission::SwitchTenants, Permission::ViewAllIssues]);
		let items: Vec<_> = set.iter().collect();
		assert_eq!(items, vec![Permission::ViewAllIssues, Permission::SwitchTenants]);
	}

	#[test]
	fn scopes_for_filters_by_family_and_operation() {
		let set = PermissionSet::from_slice(&[
			Permission::EditTenantLetters,
			Permission::EditOwnLetters,
			Permission::EditAllIssues,
			Permission::CreateLetters,
		]);
		assert_eq!(
			set.scopes_for(ResourceType::Letter, Operation::Edit),
			vec![Scope::Tenant, Scope::Own]
		);
		assert!(set.scopes_for(ResourceType::Letter, Operation::Create).is_empty());
	}

	#[test]
	fn set_serializes_as_names() {
		let set = PermissionSet::from_slice(&[Permission::ExportIssues]);
		assert_eq!(serde_json::to_string(&set).unwrap(), "[\"export_issues\"]");
	}
}
