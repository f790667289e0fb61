// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Static role → permission catalog.
//!
//! The catalog is the only process-wide state in the engine. Every table is a
//! `const`, built at compile time and never mutated, so lookups are safe from
//! any number of threads without synchronization.
//!
//! Besides scope grants, the catalog also owns the value allow-lists for the
//! value-gated issue checks ([`allowed_priorities`], [`allowed_statuses`]).

use crate::permission::{Permission, PermissionSet};
use crate::values::{IssuePriority, IssueStatus};
use crate::Role;

use Permission::*;

const SUPER_ADMIN: PermissionSet = PermissionSet::from_slice(&[
	// Issues
	ViewAllIssues,
	CreateIssues,
	EditAllIssues,
	DeleteAllIssues,
	AssignAllIssues,
	ExportIssues,
	// Letters
	ViewAllLetters,
	CreateLetters,
	EditAllLetters,
	DeleteAllLetters,
	ManageLetterAssignments,
	// Meetings
	ViewAllMeetings,
	CreateMeetings,
	EditAllMeetings,
	DeleteAllMeetings,
	// Users
	ManageAllUsers,
	ManageAllAssistants,
	// Tenants
	SwitchTenants,
	ViewAllTenants,
	EditAllTenants,
	DeleteAllTenants,
]);

const ADMIN: PermissionSet = PermissionSet::from_slice(&[
	ViewTenantIssues,
	CreateIssues,
	EditTenantIssues,
	DeleteTenantIssues,
	AssignTenantIssues,
	ExportIssues,
	ViewTenantLetters,
	CreateLetters,
	EditTenantLetters,
	DeleteTenantLetters,
	ManageLetterAssignments,
	ViewTenantMeetings,
	CreateMeetings,
	EditTenantMeetings,
	DeleteTenantMeetings,
	ManageTenantUsers,
	ManageAssistants,
	EditOwnTenant,
]);

// Letters are create/read/update only for field staff: no delete grant at any scope.
const FIELD_AGENT: PermissionSet = PermissionSet::from_slice(&[
	ViewAssignedIssues,
	CreateIssues,
	EditAssignedIssues,
	DeleteAssignedIssues,
	ExportIssues,
	ViewAssignedLetters,
	CreateLetters,
	EditAssignedLetters,
	ViewAssignedMeetings,
	CreateMeetings,
	EditAssignedMeetings,
	DeleteAssignedMeetings,
]);

const REGULAR_USER: PermissionSet = PermissionSet::from_slice(&[
	ViewOwnIssues,
	CreateIssues,
	EditOwnIssues,
	DeleteOwnIssues,
	ExportIssues,
	ViewOwnLetters,
	CreateLetters,
	EditOwnLetters,
	DeleteOwnLetters,
]);

/// Returns the permission set granted to `role`.
pub const fn permissions_for(role: Role) -> PermissionSet {
	match role {
		Role::SuperAdmin => SUPER_ADMIN,
		Role::Admin => ADMIN,
		Role::FieldAgent => FIELD_AGENT,
		Role::RegularUser => REGULAR_USER,
	}
}

/// Priorities `role` may assign to an issue.
pub const fn allowed_priorities(role: Role) -> &'static [IssuePriority] {
	match role {
		Role::SuperAdmin | Role::Admin => &[
			IssuePriority::Low,
			IssuePriority::Medium,
			IssuePriority::High,
			IssuePriority::Urgent,
		],
		Role::FieldAgent => &[IssuePriority::Low, IssuePriority::Medium, IssuePriority::High],
		Role::RegularUser => &[IssuePriority::Low, IssuePriority::Medium],
	}
}

/// Statuses `role` may move an issue into.
pub const fn allowed_statuses(role: Role) -> &'static [IssueStatus] {
	match role {
		Role::SuperAdmin | Role::Admin => &[
			IssueStatus::Open,
			IssueStatus::InProgress,
			IssueStatus::Pending,
			IssueStatus::Resolved,
		],
		Role::FieldAgent => &[IssueStatus::Open, IssueStatus::InProgress],
		Role::RegularUser => &[IssueStatus::Open],
	}
}
