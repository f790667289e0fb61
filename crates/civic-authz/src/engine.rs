// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization decision API.
//!
//! [`decide`] is the single entry point: it maps a [`PolicyAction`] onto
//! either a scoped check (via [`scope::resolve`]), a flat catalog grant, or a
//! value gate, and returns a [`Decision`]. The `can_*` functions are thin
//! boolean wrappers with one function per resource-type × action pair.
//!
//! Every function here is pure and total. Unauthenticated actors, missing
//! descriptor fields and unknown values all come out as denials.

use crate::catalog::{allowed_priorities, allowed_statuses};
use crate::permission::{Operation, Permission};
use crate::scope::{check_grant, resolve};
use crate::values::{IssuePriority, IssueStatus};
use crate::{ActorContext, Decision, PolicyAction, ReasonCode, ResourceDescriptor, ResourceType, TenantId};
use std::str::FromStr;
use tracing::{debug, instrument};

/// Evaluates `action` for `actor` against `resource`.
///
/// `resource` must describe the family the action belongs to
/// ([`PolicyAction::resource_type`]); anything else is denied with
/// [`ReasonCode::ResourceTypeMismatch`]. Actions that need no particular
/// resource (create, export, tenant switching) accept a bare
/// [`ResourceDescriptor::new`] of the right type.
#[instrument(
    level = "debug",
    skip(actor, resource),
    fields(
        user_id = ?actor.user_id,
        role = %actor.role,
        action = %action,
    )
)]
pub fn decide(actor: &ActorContext, action: PolicyAction, resource: &ResourceDescriptor) -> Decision {
	let decision = evaluate(actor, action, resource);
	debug!(allowed = decision.allowed, reason = %decision.reason, "authorization decision");
	decision
}

fn evaluate(actor: &ActorContext, action: PolicyAction, resource: &ResourceDescriptor) -> Decision {
	if !actor.is_authenticated() {
		return Decision::deny(ReasonCode::Unauthenticated);
	}
	if resource.resource_type != action.resource_type() {
		return Decision::deny(ReasonCode::ResourceTypeMismatch);
	}

	use ResourceType::{Issue, Letter, Meeting, Tenant, User};

	match action {
		PolicyAction::ViewIssue => resolve(Issue, Operation::View, actor, resource),
		PolicyAction::CreateIssue => check_grant(Permission::CreateIssues, actor),
		PolicyAction::EditIssue => resolve(Issue, Operation::Edit, actor, resource),
		PolicyAction::DeleteIssue => resolve(Issue, Operation::Delete, actor, resource),
		PolicyAction::AssignIssue => resolve(Issue, Operation::Assign, actor, resource),
		PolicyAction::SetIssuePriority => {
			value_gate(resource.extra.requested_priority.as_deref(), allowed_priorities(actor.role))
		}
		PolicyAction::SetIssueStatus => {
			value_gate(resource.extra.requested_status.as_deref(), allowed_statuses(actor.role))
		}
		PolicyAction::UpdateIssue => issue_update(actor, resource),
		PolicyAction::ExportIssues => check_grant(Permission::ExportIssues, actor),

		PolicyAction::ViewLetter => resolve(Letter, Operation::View, actor, resource),
		PolicyAction::CreateLetter => check_grant(Permission::CreateLetters, actor),
		PolicyAction::EditLetter => resolve(Letter, Operation::Edit, actor, resource),
		PolicyAction::DeleteLetter => resolve(Letter, Operation::Delete, actor, resource),
		PolicyAction::ManageLetterAssignments => check_grant(Permission::ManageLetterAssignments, actor),

		PolicyAction::ViewMeeting => resolve(Meeting, Operation::View, actor, resource),
		PolicyAction::CreateMeeting => check_grant(Permission::CreateMeetings, actor),
		PolicyAction::EditMeeting => resolve(Meeting, Operation::Edit, actor, resource),
		PolicyAction::DeleteMeeting => resolve(Meeting, Operation::Delete, actor, resource),

		PolicyAction::ManageUsers => resolve(User, Operation::Manage, actor, resource),
		PolicyAction::ManageAssistants => resolve(User, Operation::ManageAssistants, actor, resource),

		PolicyAction::SwitchTenants => check_grant(Permission::SwitchTenants, actor),
		PolicyAction::ViewTenants => resolve(Tenant, Operation::View, actor, resource),
		PolicyAction::EditTenant => resolve(Tenant, Operation::Edit, actor, resource),
		PolicyAction::DeleteTenant => resolve(Tenant, Operation::Delete, actor, resource),
	}
}

/// Allows iff `raw` parses to a value in `allowed`. Missing or unknown
/// values are denied.
fn value_gate<T>(raw: Option<&str>, allowed: &[T]) -> Decision
where
	T: FromStr + PartialEq,
{
	match raw.and_then(|value| value.parse::<T>().ok()) {
		Some(value) if allowed.contains(&value) => Decision::allow(ReasonCode::Granted),
		_ => Decision::deny(ReasonCode::ValueNotPermitted),
	}
}

/// Edit scope plus every requested field value.
fn issue_update(actor: &ActorContext, issue: &ResourceDescriptor) -> Decision {
	let edit = resolve(ResourceType::Issue, Operation::Edit, actor, issue);
	if !edit.allowed {
		return edit;
	}
	if let Some(priority) = issue.extra.requested_priority.as_deref() {
		let gate = value_gate::<IssuePriority>(Some(priority), allowed_priorities(actor.role));
		if !gate.allowed {
			return gate;
		}
	}
	if let Some(status) = issue.extra.requested_status.as_deref() {
		let gate = value_gate::<IssueStatus>(Some(status), allowed_statuses(actor.role));
		if !gate.allowed {
			return gate;
		}
	}
	edit
}

// =============================================================================
// Issues
// =============================================================================

pub fn can_view_issue(actor: &ActorContext, issue: &ResourceDescriptor) -> bool {
	decide(actor, PolicyAction::ViewIssue, issue).allowed
}

pub fn can_create_issue(actor: &ActorContext) -> bool {
	decide(actor, PolicyAction::CreateIssue, &ResourceDescriptor::new(ResourceType::Issue)).allowed
}

pub fn can_edit_issue(actor: &ActorContext, issue: &ResourceDescriptor) -> bool {
	decide(actor, PolicyAction::EditIssue, issue).allowed
}

pub fn can_delete_issue(actor: &ActorContext, issue: &ResourceDescriptor) -> bool {
	decide(actor, PolicyAction::DeleteIssue, issue).allowed
}

/// SuperAdmin anywhere, Admin within their own tenant. Never field agents or
/// regular users, whatever they own.
pub fn can_assign_issue(actor: &ActorContext, issue: &ResourceDescriptor) -> bool {
	decide(actor, PolicyAction::AssignIssue, issue).allowed
}

/// Value-gated: the answer depends on which priority is requested.
pub fn can_set_issue_priority(actor: &ActorContext, priority: &str) -> bool {
	let request = ResourceDescriptor::new(ResourceType::Issue).with_requested_priority(priority);
	decide(actor, PolicyAction::SetIssuePriority, &request).allowed
}

/// Value-gated: the answer depends on which status is requested.
pub fn can_set_issue_status(actor: &ActorContext, status: &str) -> bool {
	let request = ResourceDescriptor::new(ResourceType::Issue).with_requested_status(status);
	decide(actor, PolicyAction::SetIssueStatus, &request).allowed
}

/// Edit rights on `issue` and permission for every value in `issue.extra`.
pub fn can_apply_issue_update(actor: &ActorContext, issue: &ResourceDescriptor) -> bool {
	decide(actor, PolicyAction::UpdateIssue, issue).allowed
}

/// Any authenticated actor. Export covers only what the caller already fetched.
pub fn can_export_issues(actor: &ActorContext) -> bool {
	decide(actor, PolicyAction::ExportIssues, &ResourceDescriptor::new(ResourceType::Issue)).allowed
}

// =============================================================================
// Letters
// =============================================================================

pub fn can_view_letter(actor: &ActorContext, letter: &ResourceDescriptor) -> bool {
	decide(actor, PolicyAction::ViewLetter, letter).allowed
}

pub fn can_create_letters(actor: &ActorContext) -> bool {
	decide(actor, PolicyAction::CreateLetter, &ResourceDescriptor::new(ResourceType::Letter)).allowed
}

pub fn can_edit_letter(actor: &ActorContext, letter: &ResourceDescriptor) -> bool {
	decide(actor, PolicyAction::EditLetter, letter).allowed
}

/// Field agents can never delete letters, even ones they may edit.
pub fn can_delete_letter(actor: &ActorContext, letter: &ResourceDescriptor) -> bool {
	decide(actor, PolicyAction::DeleteLetter, letter).allowed
}

pub fn can_manage_letter_assignments(actor: &ActorContext) -> bool {
	decide(
		actor,
		PolicyAction::ManageLetterAssignments,
		&ResourceDescriptor::new(ResourceType::Letter),
	)
	.allowed
}

// =============================================================================
// Meetings
// =============================================================================

pub fn can_view_meeting(actor: &ActorContext, meeting: &ResourceDescriptor) -> bool {
	decide(actor, PolicyAction::ViewMeeting, meeting).allowed
}

pub fn can_create_meetings(actor: &ActorContext) -> bool {
	decide(actor, PolicyAction::CreateMeeting, &ResourceDescriptor::new(ResourceType::Meeting)).allowed
}

pub fn can_edit_meeting(actor: &ActorContext, meeting: &ResourceDescriptor) -> bool {
	decide(actor, PolicyAction::EditMeeting, meeting).allowed
}

pub fn can_delete_meeting(actor: &ActorContext, meeting: &ResourceDescriptor) -> bool {
	decide(actor, PolicyAction::DeleteMeeting, meeting).allowed
}

// =============================================================================
// Users and tenants
// =============================================================================

pub fn can_manage_users(actor: &ActorContext, target_tenant: Option<&TenantId>) -> bool {
	let directory = ResourceDescriptor::user_directory(target_tenant.cloned());
	decide(actor, PolicyAction::ManageUsers, &directory).allowed
}

pub fn can_manage_assistants(actor: &ActorContext, target_tenant: Option<&TenantId>) -> bool {
	let directory = ResourceDescriptor::user_directory(target_tenant.cloned());
	decide(actor, PolicyAction::ManageAssistants, &directory).allowed
}

pub fn can_switch_tenants(actor: &ActorContext) -> bool {
	decide(actor, PolicyAction::SwitchTenants, &ResourceDescriptor::tenant(None)).allowed
}

pub fn can_view_tenants(actor: &ActorContext) -> bool {
	decide(actor, PolicyAction::ViewTenants, &ResourceDescriptor::tenant(None)).allowed
}

/// SuperAdmin may edit any tenant; Admin only their own.
pub fn can_edit_tenant(actor: &ActorContext, target_tenant: Option<&TenantId>) -> bool {
	let tenant = ResourceDescriptor::tenant(target_tenant.cloned());
	decide(actor, PolicyAction::EditTenant, &tenant).allowed
}

pub fn can_delete_tenant(actor: &ActorContext) -> bool {
	decide(actor, PolicyAction::DeleteTenant, &ResourceDescriptor::tenant(None)).allowed
}
