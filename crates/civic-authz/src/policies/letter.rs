// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Letter access policies.

use super::{decide_for, filter_visible};
use crate::{ActorContext, PolicyAction, ResourceDescriptor, ResourceType};

#[derive(Debug, Clone, Copy)]
pub struct LetterPolicy<'a> {
	actor: Option<&'a ActorContext>,
}

impl<'a> LetterPolicy<'a> {
	pub fn new(actor: Option<&'a ActorContext>) -> Self {
		Self { actor }
	}

	fn allows(&self, action: PolicyAction, letter: &ResourceDescriptor) -> bool {
		decide_for(self.actor, action, letter).allowed
	}

	pub fn can_view(&self, letter: &ResourceDescriptor) -> bool {
		self.allows(PolicyAction::ViewLetter, letter)
	}

	pub fn can_create(&self) -> bool {
		self.allows(PolicyAction::CreateLetter, &ResourceDescriptor::new(ResourceType::Letter))
	}

	pub fn can_edit(&self, letter: &ResourceDescriptor) -> bool {
		self.allows(PolicyAction::EditLetter, letter)
	}

	pub fn can_delete(&self, letter: &ResourceDescriptor) -> bool {
		self.allows(PolicyAction::DeleteLetter, letter)
	}

	pub fn can_manage_assignments(&self) -> bool {
		self.allows(
			PolicyAction::ManageLetterAssignments,
			&ResourceDescriptor::new(ResourceType::Letter),
		)
	}

	pub fn visible<'r>(&self, letters: &'r [ResourceDescriptor]) -> Vec<&'r ResourceDescriptor> {
		filter_visible(self.actor, PolicyAction::ViewLetter, letters)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Role, TenantId, UserId};

	fn letter(created_by: &str, assigned_to: Option<&str>) -> ResourceDescriptor {
		ResourceDescriptor::letter(
			Some(TenantId::new("t1")),
			Some(UserId::new(created_by)),
			assigned_to.map(UserId::new),
		)
	}

	#[test]
	fn field_agent_edits_routed_letters_without_delete() {
		let actor = ActorContext::new("agent", Role::FieldAgent).with_tenant("t1");
		let policy = LetterPolicy::new(Some(&actor));
		let routed = letter("admin", Some("agent"));
		assert!(policy.can_view(&routed));
		assert!(policy.can_edit(&routed));
		assert!(!policy.can_delete(&routed));
		assert!(!policy.can_manage_assignments());
	}

	#[test]
	fn visible_includes_letters_the_agent_wrote_or_received() {
		let actor = ActorContext::new("agent", Role::FieldAgent).with_tenant("t1");
		let policy = LetterPolicy::new(Some(&actor));
		let letters = vec![
			letter("agent", None),
			letter("agent", Some("someone")),
			letter("admin", Some("agent")),
			letter("admin", Some("someone")),
		];
		assert_eq!(policy.visible(&letters), vec![&letters[0], &letters[1], &letters[2]]);
	}

	#[test]
	fn regular_user_owns_letters() {
		let actor = ActorContext::new("citizen", Role::RegularUser).with_tenant("t1");
		let policy = LetterPolicy::new(Some(&actor));
		let mine = letter("citizen", Some("agent"));
		assert!(policy.can_create());
		assert!(policy.can_view(&mine));
		assert!(policy.can_delete(&mine));
		assert!(!policy.can_view(&letter("other", Some("citizen"))));
	}
}
