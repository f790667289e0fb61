// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use super::decide_for;
use crate::{ActorContext, PolicyAction, ResourceDescriptor, TenantId};

/// User-directory policies: who may manage accounts and assistants in a tenant.
#[derive(Debug, Clone, Copy)]
pub struct UserPolicy<'a> {
	actor: Option<&'a ActorContext>,
}

impl<'a> UserPolicy<'a> {
	pub fn new(actor: Option<&'a ActorContext>) -> Self {
		Self { actor }
	}

	pub fn can_manage_users(&self, target_tenant: Option<&TenantId>) -> bool {
		let directory = ResourceDescriptor::user_directory(target_tenant.cloned());
		decide_for(self.actor, PolicyAction::ManageUsers, &directory).allowed
	}

	pub fn can_manage_assistants(&self, target_tenant: Option<&TenantId>) -> bool {
		let directory = ResourceDescriptor::user_directory(target_tenant.cloned());
		decide_for(self.actor, PolicyAction::ManageAssistants, &directory).allowed
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Role;

	#[test]
	fn admin_manages_own_tenant_only() {
		let actor = ActorContext::new("admin", Role::Admin).with_tenant("t1");
		let policy = UserPolicy::new(Some(&actor));
		assert!(policy.can_manage_users(Some(&TenantId::new("t1"))));
		assert!(policy.can_manage_assistants(Some(&TenantId::new("t1"))));
		assert!(!policy.can_manage_users(Some(&TenantId::new("t2"))));
	}

	#[test]
	fn nobody_manages_nothing() {
		let policy = UserPolicy::new(None);
		assert!(!policy.can_manage_users(Some(&TenantId::new("t1"))));
		assert!(!policy.can_manage_assistants(None));
	}
}
