// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Scope resolution.
//!
//! [`resolve`] walks the scope cascade for one (resource family, operation)
//! pair, broadest first:
//!
//! 1. **All**: allow unconditionally ([`ReasonCode::GlobalScope`])
//! 2. **Tenant**: allow iff resource tenant == actor tenant
//! 3. **Assigned**: allow iff resource assignee == actor user
//! 4. **Own**: allow iff resource owner == actor user
//!
//! Only scopes the actor's role actually holds are evaluated. The first
//! matching scope wins; a non-matching scope is remembered and the cascade
//! falls through to narrower grants. Today each role holds at most one scope
//! per operation, but a role granted "tenant or own" needs no new code here.
//!
//! Letters are the one family where Assigned also matches the creator: a
//! letter counts as assigned to staff who wrote it or had it routed to them.
//!
//! Descriptor fields that are absent never match, so an ownership check
//! against a tenant record (which has no owner) is a plain denial.

use crate::catalog::permissions_for;
use crate::permission::{Operation, Permission, PermissionSet, Scope};
use crate::types::ids_match;
use crate::{ActorContext, Decision, ReasonCode, ResourceDescriptor, ResourceType};
use tracing::{instrument, trace};

/// Resolves a scoped permission for `actor` against `resource`.
#[instrument(
    level = "trace",
    skip(actor, resource),
    fields(
        role = %actor.role,
        resource_type = %family,
        operation = %operation,
    )
)]
pub fn resolve(
	family: ResourceType,
	operation: Operation,
	actor: &ActorContext,
	resource: &ResourceDescriptor,
) -> Decision {
	resolve_in(permissions_for(actor.role), family, operation, actor, resource)
}

/// Runs the cascade against an explicit permission set instead of the
/// actor's catalog entry.
pub fn resolve_in(
	granted: PermissionSet,
	family: ResourceType,
	operation: Operation,
	actor: &ActorContext,
	resource: &ResourceDescriptor,
) -> Decision {
	if !actor.is_authenticated() {
		return Decision::deny(ReasonCode::Unauthenticated);
	}
	if resource.resource_type != family {
		return Decision::deny(ReasonCode::ResourceTypeMismatch);
	}

	let mut first_miss = None;

	for scope in Scope::CASCADE {
		let Some(permission) = Permission::lookup(family, operation, Some(scope)) else {
			continue;
		};
		if !granted.contains(permission) {
			continue;
		}

		let decision = evaluate_scope(scope, family, actor, resource);
		if decision.allowed {
			trace!(%permission, reason = %decision.reason, "scope matched");
			return decision;
		}
		first_miss.get_or_insert(decision.reason);
	}

	let decision = Decision::deny(first_miss.unwrap_or(ReasonCode::NoMatchingPermission));
	trace!(reason = %decision.reason, "no scope matched");
	decision
}

/// Checks a flat (unscoped) permission such as `CreateIssues`.
pub fn check_grant(permission: Permission, actor: &ActorContext) -> Decision {
	if !actor.is_authenticated() {
		return Decision::deny(ReasonCode::Unauthenticated);
	}
	if permissions_for(actor.role).contains(permission) {
		Decision::allow(ReasonCode::Granted)
	} else {
		Decision::deny(ReasonCode::NoMatchingPermission)
	}
}

/// Evaluates a single scope rule.
fn evaluate_scope(scope: Scope, family: ResourceType, actor: &ActorContext, resource: &ResourceDescriptor) -> Decision {
	match scope {
		Scope::All => Decision::allow(ReasonCode::GlobalScope),
		Scope::Tenant => {
			if ids_match(resource.tenant_id.as_ref(), actor.tenant_id.as_ref()) {
				Decision::allow(ReasonCode::TenantMatch)
			} else {
				Decision::deny(ReasonCode::TenantMismatch)
			}
		}
		Scope::Assigned => {
			let assigned = ids_match(resource.assignee_id.as_ref(), actor.user_id.as_ref())
				|| (family == ResourceType::Letter && ids_match(resource.owner_id.as_ref(), actor.user_id.as_ref()));
			if assigned {
				Decision::allow(ReasonCode::AssigneeMatch)
			} else {
				Decision::deny(ReasonCode::AssigneeMismatch)
			}
		}
		Scope::Own => {
			if ids_match(resource.owner_id.as_ref(), actor.user_id.as_ref()) {
				Decision::allow(ReasonCode::OwnerMatch)
			} else {
				Decision::deny(ReasonCode::OwnerMismatch)
			}
		}
	}
}
