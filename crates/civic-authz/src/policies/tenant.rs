// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use super::decide_for;
use crate::{ActorContext, PolicyAction, ResourceDescriptor, TenantId};

#[derive(Debug, Clone, Copy)]
pub struct TenantPolicy<'a> {
	actor: Option<&'a ActorContext>,
}

impl<'a> TenantPolicy<'a> {
	pub fn new(actor: Option<&'a ActorContext>) -> Self {
		Self { actor }
	}

	fn allows(&self, action: PolicyAction, tenant: Option<&TenantId>) -> bool {
		decide_for(self.actor, action, &ResourceDescriptor::tenant(tenant.cloned())).allowed
	}

	pub fn can_switch(&self) -> bool {
		self.allows(PolicyAction::SwitchTenants, None)
	}

	pub fn can_view(&self) -> bool {
		self.allows(PolicyAction::ViewTenants, None)
	}

	pub fn can_edit(&self, tenant: Option<&TenantId>) -> bool {
		self.allows(PolicyAction::EditTenant, tenant)
	}

	pub fn can_delete(&self) -> bool {
		self.allows(PolicyAction::DeleteTenant, None)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Role;

	#[test]
	fn super_admin_runs_every_tenant() {
		let actor = ActorContext::new("root", Role::SuperAdmin).with_tenant("t1");
		let policy = TenantPolicy::new(Some(&actor));
		assert!(policy.can_switch());
		assert!(policy.can_view());
		assert!(policy.can_edit(Some(&TenantId::new("t9"))));
		assert!(policy.can_delete());
	}

	#[test]
	fn admin_edits_home_tenant() {
		let actor = ActorContext::new("admin", Role::Admin).with_tenant("t1");
		let policy = TenantPolicy::new(Some(&actor));
		assert!(policy.can_edit(Some(&TenantId::new("t1"))));
		assert!(!policy.can_edit(Some(&TenantId::new("t9"))));
		assert!(!policy.can_switch());
		assert!(!policy.can_delete());
	}
}
