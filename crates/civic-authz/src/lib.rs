// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role-based authorization for the civic grievance tracker.
//!
//! This crate is the single place where access rules for issues, letters,
//! meetings, user directories and tenants are written down:
//!
//! - [`role`]: collapses free-form role labels onto four canonical roles
//! - [`catalog`]: the static role → permission tables and value allow-lists
//! - [`scope`]: the All → Tenant → Assigned → Own cascade
//! - [`engine`]: `decide` plus one `can_*` function per resource × action
//! - [`policies`]: per-resource bundles bound to an optional actor
//!
//! Every decision is a pure function of an [`ActorContext`] and a
//! [`ResourceDescriptor`]. There is no I/O, no caching and no mutable state;
//! all types are `Send + Sync` and may be shared freely across threads.
//!
//! # Example
//!
//! ```
//! use civic_authz::{engine, ActorContext, ResourceDescriptor, Role, TenantId, UserId};
//!
//! let agent = ActorContext::new("u7", Role::FieldAgent).with_tenant("t1");
//! let issue = ResourceDescriptor::issue(
//!     Some(TenantId::new("t1")),
//!     Some(UserId::new("u1")),
//!     Some(UserId::new("u7")),
//! );
//!
//! assert!(engine::can_edit_issue(&agent, &issue));
//! assert!(!engine::can_assign_issue(&agent, &issue));
//! ```

pub mod action;
pub mod attrs;
pub mod catalog;
pub mod decision;
pub mod engine;
pub mod error;
pub mod permission;
pub mod policies;
pub mod role;
pub mod scope;
pub mod types;
pub mod values;

pub use action::PolicyAction;
pub use attrs::{ActorContext, DescriptorExtra, ResourceDescriptor};
pub use catalog::{allowed_priorities, allowed_statuses, permissions_for};
pub use decision::{Decision, ReasonCode};
pub use engine::decide;
pub use error::{AuthzError, AuthzResult};
pub use permission::{Grant, Operation, Permission, PermissionSet, Scope};
pub use policies::{IssuePolicy, LetterPolicy, MeetingPolicy, Policies, TenantPolicy, UserPolicy};
pub use role::{normalize, Role};
pub use types::{ResourceType, TenantId, UserId};
pub use values::{IssuePriority, IssueStatus};

#[cfg(test)]
mod tests {
	use super::*;

	fn assert_send_sync<T: Send + Sync>() {}

	#[test]
	fn public_types_are_thread_safe() {
		assert_send_sync::<ActorContext>();
		assert_send_sync::<ResourceDescriptor>();
		assert_send_sync::<Decision>();
		assert_send_sync::<PermissionSet>();
		assert_send_sync::<IssuePolicy<'static>>();
		assert_send_sync::<Policies<'static>>();
	}
}
