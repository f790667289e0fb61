// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Meeting access policies.

use super::{decide_for, filter_visible};
use crate::{ActorContext, PolicyAction, ResourceDescriptor, ResourceType};

#[derive(Debug, Clone, Copy)]
pub struct MeetingPolicy<'a> {
	actor: Option<&'a ActorContext>,
}

impl<'a> MeetingPolicy<'a> {
	pub fn new(actor: Option<&'a ActorContext>) -> Self {
		Self { actor }
	}

	fn allows(&self, action: PolicyAction, meeting: &ResourceDescriptor) -> bool {
		decide_for(self.actor, action, meeting).allowed
	}

	pub fn can_view(&self, meeting: &ResourceDescriptor) -> bool {
		self.allows(PolicyAction::ViewMeeting, meeting)
	}

	pub fn can_create(&self) -> bool {
		self.allows(PolicyAction::CreateMeeting, &ResourceDescriptor::new(ResourceType::Meeting))
	}

	pub fn can_edit(&self, meeting: &ResourceDescriptor) -> bool {
		self.allows(PolicyAction::EditMeeting, meeting)
	}

	pub fn can_delete(&self, meeting: &ResourceDescriptor) -> bool {
		self.allows(PolicyAction::DeleteMeeting, meeting)
	}

	pub fn visible<'r>(&self, meetings: &'r [ResourceDescriptor]) -> Vec<&'r ResourceDescriptor> {
		filter_visible(self.actor, PolicyAction::ViewMeeting, meetings)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Role, TenantId, UserId};

	fn meeting(tenant: &str, user: &str) -> ResourceDescriptor {
		ResourceDescriptor::meeting(Some(TenantId::new(tenant)), Some(UserId::new(user)))
	}

	#[test]
	fn agent_calendar_is_personal() {
		let actor = ActorContext::new("agent", Role::FieldAgent).with_tenant("t1");
		let policy = MeetingPolicy::new(Some(&actor));
		let meetings = vec![meeting("t1", "agent"), meeting("t1", "other"), meeting("t2", "agent")];
		assert_eq!(policy.visible(&meetings), vec![&meetings[0], &meetings[2]]);
		assert!(policy.can_delete(&meetings[0]));
		assert!(!policy.can_edit(&meetings[1]));
	}

	#[test]
	fn regular_user_has_no_calendar() {
		let actor = ActorContext::new("citizen", Role::RegularUser).with_tenant("t1");
		let policy = MeetingPolicy::new(Some(&actor));
		assert!(!policy.can_create());
		assert!(policy.visible(&[meeting("t1", "citizen")]).is_empty());
	}
}
