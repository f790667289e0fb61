// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Issue access policies.

use super::{decide_for, filter_visible};
use crate::{ActorContext, PolicyAction, ResourceDescriptor, ResourceType};

#[derive(Debug, Clone, Copy)]
pub struct IssuePolicy<'a> {
	actor: Option<&'a ActorContext>,
}

impl<'a> IssuePolicy<'a> {
	pub fn new(actor: Option<&'a ActorContext>) -> Self {
		Self { actor }
	}

	fn allows(&self, action: PolicyAction, issue: &ResourceDescriptor) -> bool {
		decide_for(self.actor, action, issue).allowed
	}

	fn allows_any(&self, action: PolicyAction) -> bool {
		self.allows(action, &ResourceDescriptor::new(ResourceType::Issue))
	}

	pub fn can_view(&self, issue: &ResourceDescriptor) -> bool {
		self.allows(PolicyAction::ViewIssue, issue)
	}

	pub fn can_create(&self) -> bool {
		self.allows_any(PolicyAction::CreateIssue)
	}

	pub fn can_edit(&self, issue: &ResourceDescriptor) -> bool {
		self.allows(PolicyAction::EditIssue, issue)
	}

	pub fn can_delete(&self, issue: &ResourceDescriptor) -> bool {
		self.allows(PolicyAction::DeleteIssue, issue)
	}

	pub fn can_assign(&self, issue: &ResourceDescriptor) -> bool {
		self.allows(PolicyAction::AssignIssue, issue)
	}

	pub fn can_set_priority(&self, priority: &str) -> bool {
		let request = ResourceDescriptor::new(ResourceType::Issue).with_requested_priority(priority);
		self.allows(PolicyAction::SetIssuePriority, &request)
	}

	pub fn can_set_status(&self, status: &str) -> bool {
		let request = ResourceDescriptor::new(ResourceType::Issue).with_requested_status(status);
		self.allows(PolicyAction::SetIssueStatus, &request)
	}

	/// Edit rights plus every requested value in `issue.extra`.
	pub fn can_apply_update(&self, issue: &ResourceDescriptor) -> bool {
		self.allows(PolicyAction::UpdateIssue, issue)
	}

	pub fn can_export(&self) -> bool {
		self.allows_any(PolicyAction::ExportIssues)
	}

	/// The issues in `issues` the actor may view.
	pub fn visible<'r>(&self, issues: &'r [ResourceDescriptor]) -> Vec<&'r ResourceDescriptor> {
		filter_visible(self.actor, PolicyAction::ViewIssue, issues)
	}
}
