// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-resource policy bundles for UI and handler code.
//!
//! Each policy is bound to an optional actor (`None` when nobody is signed
//! in) and forwards every question to [`crate::engine`]. They hold no state
//! of their own and never re-encode a rule.

mod issue;
mod letter;
mod meeting;
mod tenant;
mod user;

pub use issue::IssuePolicy;
pub use letter::LetterPolicy;
pub use meeting::MeetingPolicy;
pub use tenant::TenantPolicy;
pub use user::UserPolicy;

use crate::{engine, ActorContext, Decision, PolicyAction, ReasonCode, ResourceDescriptor};

/// Decides for an actor that may be missing entirely.
pub fn decide_for(actor: Option<&ActorContext>, action: PolicyAction, resource: &ResourceDescriptor) -> Decision {
	match actor {
		Some(actor) => engine::decide(actor, action, resource),
		None => Decision::deny(ReasonCode::Unauthenticated),
	}
}

/// Keeps the descriptors `actor` may view, in their original order.
pub(crate) fn filter_visible<'r>(
	actor: Option<&ActorContext>,
	action: PolicyAction,
	resources: &'r [ResourceDescriptor],
) -> Vec<&'r ResourceDescriptor> {
	resources
		.iter()
		.filter(|resource| decide_for(actor, action, resource).allowed)
		.collect()
}

/// All five policies bound to the same actor.
#[derive(Debug, Clone, Copy)]
pub struct Policies<'a> {
	pub issues: IssuePolicy<'a>,
	pub letters: LetterPolicy<'a>,
	pub meetings: MeetingPolicy<'a>,
	pub users: UserPolicy<'a>,
	pub tenants: TenantPolicy<'a>,
}

impl<'a> Policies<'a> {
	pub fn for_actor(actor: Option<&'a ActorContext>) -> Self {
		Self {
			issues: IssuePolicy::new(actor),
			letters: LetterPolicy::new(actor),
			meetings: MeetingPolicy::new(actor),
			users: UserPolicy::new(actor),
			tenants: TenantPolicy::new(actor),
		}
	}
}
