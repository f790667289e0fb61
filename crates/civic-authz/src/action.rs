// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::{AuthzError, ResourceType};
use serde::{Deserialize, Serialize};

/// Every decision the engine can make, by name.
///
/// Hosts that route checks by string (batch files, RPC payloads) parse into
/// this enum and call [`crate::engine::decide`]; there is no other path to a
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyAction {
	ViewIssue,
	CreateIssue,
	EditIssue,
	DeleteIssue,
	AssignIssue,
	SetIssuePriority,
	SetIssueStatus,
	UpdateIssue,
	ExportIssues,
	ViewLetter,
	CreateLetter,
	EditLetter,
	DeleteLetter,
	ManageLetterAssignments,
	ViewMeeting,
	CreateMeeting,
	EditMeeting,
	DeleteMeeting,
	ManageUsers,
	ManageAssistants,
	SwitchTenants,
	ViewTenants,
	EditTenant,
	DeleteTenant,
}

impl PolicyAction {
	pub const ALL: &'static [PolicyAction] = &[
		PolicyAction::ViewIssue,
		PolicyAction::CreateIssue,
		PolicyAction::EditIssue,
		PolicyAction::DeleteIssue,
		PolicyAction::AssignIssue,
		PolicyAction::SetIssuePriority,
		PolicyAction::SetIssueStatus,
		PolicyAction::UpdateIssue,
		PolicyAction::ExportIssues,
		PolicyAction::ViewLetter,
		PolicyAction::CreateLetter,
		PolicyAction::EditLetter,
		PolicyAction::DeleteLetter,
		PolicyAction::ManageLetterAssignments,
		PolicyAction::ViewMeeting,
		PolicyAction::CreateMeeting,
		PolicyAction::EditMeeting,
		PolicyAction::DeleteMeeting,
		PolicyAction::ManageUsers,
		PolicyAction::ManageAssistants,
		PolicyAction::SwitchTenants,
		PolicyAction::ViewTenants,
		PolicyAction::EditTenant,
		PolicyAction::DeleteTenant,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			PolicyAction::ViewIssue => "view-issue",
			PolicyAction::CreateIssue => "create-issue",
			PolicyAction::EditIssue => "edit-issue",
			PolicyAction::DeleteIssue => "delete-issue",
			PolicyAction::AssignIssue => "assign-issue",
			PolicyAction::SetIssuePriority => "set-issue-priority",
			PolicyAction::SetIssueStatus => "set-issue-status",
			PolicyAction::UpdateIssue => "update-issue",
			PolicyAction::ExportIssues => "export-issues",
			PolicyAction::ViewLetter => "view-letter",
			PolicyAction::CreateLetter => "create-letter",
			PolicyAction::EditLetter => "edit-letter",
			PolicyAction::DeleteLetter => "delete-letter",
			PolicyAction::ManageLetterAssignments => "manage-letter-assignments",
			PolicyAction::ViewMeeting => "view-meeting",
			PolicyAction::CreateMeeting => "create-meeting",
			PolicyAction::EditMeeting => "edit-meeting",
			PolicyAction::DeleteMeeting => "delete-meeting",
			PolicyAction::ManageUsers => "manage-users",
			PolicyAction::ManageAssistants => "manage-assistants",
			PolicyAction::SwitchTenants => "switch-tenants",
			PolicyAction::ViewTenants => "view-tenants",
			PolicyAction::EditTenant => "edit-tenant",
			PolicyAction::DeleteTenant => "delete-tenant",
		}
	}

	/// Resource family the action's descriptor must describe.
	pub fn resource_type(self) -> ResourceType {
		match self {
			PolicyAction::ViewIssue
			| PolicyAction::CreateIssue
			| PolicyAction::EditIssue
			| PolicyAction::DeleteIssue
			| PolicyAction::AssignIssue
			| PolicyAction::SetIssuePriority
			| PolicyAction::SetIssueStatus
			| PolicyAction::UpdateIssue
			| PolicyAction::ExportIssues => ResourceType::Issue,
			PolicyAction::ViewLetter
			| PolicyAction::CreateLetter
			| PolicyAction::EditLetter
			| PolicyAction::DeleteLetter
			| PolicyAction::ManageLetterAssignments => ResourceType::Letter,
			PolicyAction::ViewMeeting
			| PolicyAction::CreateMeeting
			| PolicyAction::EditMeeting
			| PolicyAction::DeleteMeeting => ResourceType::Meeting,
			PolicyAction::ManageUsers | PolicyAction::ManageAssistants => ResourceType::User,
			PolicyAction::SwitchTenants
			| PolicyAction::ViewTenants
			| PolicyAction::EditTenant
			| PolicyAction::DeleteTenant => ResourceType::Tenant,
		}
	}
}

impl std::fmt::Display for PolicyAction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for PolicyAction {
	type Err = AuthzError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let wanted = value.trim().to_ascii_lowercase().replace('_', "-");
		PolicyAction::ALL
			.iter()
			.copied()
			.find(|action| action.as_str() == wanted)
			.ok_or_else(|| AuthzError::UnknownAction(value.to_string()))
	}
}
