// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subcommand handlers.
//!
//! Handlers write results to the given writer and return an [`Outcome`];
//! `main` turns that into the process exit code.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use civic_authz::{
	allowed_priorities, allowed_statuses, decide, normalize, permissions_for, ActorContext, Decision,
	PolicyAction, ResourceDescriptor, Role,
};
use civic_cli_config::OutputFormat;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// What a command concluded, independent of how it was rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	Ok,
	Allowed,
	Denied,
}

/// Resource attributes given on the command line for `check`.
#[derive(Debug, Clone, Default)]
pub struct ResourceArgs {
	pub tenant_id: Option<String>,
	pub owner_id: Option<String>,
	pub assignee_id: Option<String>,
	pub priority: Option<String>,
	pub status: Option<String>,
}

impl ResourceArgs {
	fn into_descriptor(self, action: PolicyAction) -> ResourceDescriptor {
		let mut resource = ResourceDescriptor::new(action.resource_type());
		if let Some(tenant) = self.tenant_id {
			resource = resource.with_tenant(tenant);
		}
		if let Some(owner) = self.owner_id {
			resource = resource.with_owner(owner);
		}
		if let Some(assignee) = self.assignee_id {
			resource = resource.with_assignee(assignee);
		}
		if let Some(priority) = self.priority {
			resource = resource.with_requested_priority(priority);
		}
		if let Some(status) = self.status {
			resource = resource.with_requested_status(status);
		}
		resource
	}
}

pub fn normalize_role(raw: &str, format: OutputFormat, out: &mut impl Write) -> Result<Outcome> {
	let role = normalize(Some(raw));
	match format {
		OutputFormat::Text => writeln!(out, "{role}")?,
		OutputFormat::Json => {
			serde_json::to_writer(&mut *out, &serde_json::json!({ "input": raw, "role": role.as_str() }))?;
			writeln!(out)?;
		}
	}
	Ok(Outcome::Ok)
}

#[derive(Debug, Serialize)]
struct RoleReport {
	role: Role,
	permissions: civic_authz::PermissionSet,
	priorities: Vec<&'static str>,
	statuses: Vec<&'static str>,
}

impl RoleReport {
	fn for_role(role: Role) -> Self {
		Self {
			role,
			permissions: permissions_for(role),
			priorities: allowed_priorities(role).iter().map(|p| p.as_str()).collect(),
			statuses: allowed_statuses(role).iter().map(|s| s.as_str()).collect(),
		}
	}
}

/// Prints the catalog for one role, or every role when `role` is `None`.
pub fn permissions(role: Option<&str>, format: OutputFormat, out: &mut impl Write) -> Result<Outcome> {
	let reports: Vec<RoleReport> = match role {
		Some(raw) => vec![RoleReport::for_role(normalize(Some(raw)))],
		None => Role::all().iter().copied().map(RoleReport::for_role).collect(),
	};

	match format {
		OutputFormat::Json => {
			serde_json::to_writer_pretty(&mut *out, &reports)?;
			writeln!(out)?;
		}
		OutputFormat::Text => {
			for report in &reports {
				writeln!(out, "{}", report.role)?;
				for permission in report.permissions.iter() {
					writeln!(out, "  {permission}")?;
				}
				writeln!(out, "  priorities: {}", report.priorities.join(", "))?;
				writeln!(out, "  statuses: {}", report.statuses.join(", "))?;
			}
		}
	}
	Ok(Outcome::Ok)
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
	action: PolicyAction,
	#[serde(flatten)]
	decision: Decision,
	#[serde(skip_serializing_if = "Option::is_none")]
	role: Option<&'a Role>,
}

/// Evaluates a single action for `actor` and prints the decision.
#[instrument(skip_all, fields(action = %action))]
pub fn check(
	actor: &ActorContext,
	action: &str,
	resource: ResourceArgs,
	format: OutputFormat,
	out: &mut impl Write,
) -> Result<Outcome> {
	let action: PolicyAction = action.parse()?;
	let resource = resource.into_descriptor(action);
	debug!(?resource, "built resource descriptor");

	let decision = decide(actor, action, &resource);
	match format {
		OutputFormat::Text => writeln!(out, "{action}: {decision}")?,
		OutputFormat::Json => {
			let report = CheckReport {
				action,
				decision,
				role: Some(&actor.role),
			};
			serde_json::to_writer(&mut *out, &report)?;
			writeln!(out)?;
		}
	}

	Ok(if decision.allowed { Outcome::Allowed } else { Outcome::Denied })
}

/// One entry of a batch file.
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
	#[serde(default)]
	pub actor: ActorContext,
	pub action: PolicyAction,
	pub resource: ResourceDescriptor,
}

/// Reads a JSON array of requests from `path` (or stdin for `-`) and writes
/// the decisions in the same order: one line each as text, or a JSON array.
pub fn batch(path: &Path, format: OutputFormat, out: &mut impl Write) -> Result<Outcome> {
	let raw = if path == Path::new("-") {
		let mut buf = String::new();
		std::io::stdin()
			.read_to_string(&mut buf)
			.context("failed to read batch requests from stdin")?;
		buf
	} else {
		std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
	};

	let decisions = run_batch(&raw)?;
	match format {
		OutputFormat::Text => {
			for report in &decisions {
				writeln!(out, "{}: {}", report.action, report.decision)?;
			}
		}
		OutputFormat::Json => {
			serde_json::to_writer_pretty(&mut *out, &decisions)?;
			writeln!(out)?;
		}
	}
	Ok(Outcome::Ok)
}

fn run_batch(raw: &str) -> Result<Vec<CheckReport<'static>>> {
	let requests: Vec<BatchRequest> = serde_json::from_str(raw).context("invalid batch request JSON")?;
	info!(count = requests.len(), "evaluating batch");

	Ok(requests
		.iter()
		.map(|request| CheckReport {
			action: request.action,
			decision: decide(&request.actor, request.action, &request.resource),
			role: None,
		})
		.collect())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run<F>(f: F) -> (Outcome, String)
	where
		F: FnOnce(&mut Vec<u8>) -> Result<Outcome>,
	{
		let mut out = Vec::new();
		let outcome = f(&mut out).unwrap();
		(outcome, String::from_utf8(out).unwrap())
	}

	#[test]
	fn normalize_prints_canonical_role() {
		let (outcome, text) = run(|out| normalize_role("Tenant Admin", OutputFormat::Text, out));
		assert_eq!(outcome, Outcome::Ok);
		assert_eq!(text.trim(), "admin");

		let (_, json) = run(|out| normalize_role("assistant", OutputFormat::Json, out));
		let value: serde_json::Value = serde_json::from_str(&json).unwrap();
		assert_eq!(value["role"], "field_agent");
	}

	#[test]
	fn permissions_lists_single_role() {
		let (_, text) = run(|out| permissions(Some("field agent"), OutputFormat::Text, out));
		assert!(text.starts_with("field_agent\n"));
		assert!(text.contains("  edit_assigned_letters\n"));
		assert!(!text.contains("delete_assigned_letters"));
		assert!(text.contains("priorities: Low, Medium, High"));
	}

	#[test]
	fn permissions_json_covers_all_roles() {
		let (_, json) = run(|out| permissions(None, OutputFormat::Json, out));
		let value: serde_json::Value = serde_json::from_str(&json).unwrap();
		assert_eq!(value.as_array().unwrap().len(), 4);
		assert_eq!(value[0]["role"], "super_admin");
	}

	#[test]
	fn check_reports_allow_and_deny() {
		let agent = ActorContext::from_session(Some("u7"), Some("field_agent"), Some("t1"));
		let letter = ResourceArgs {
			tenant_id: Some("t1".to_string()),
			assignee_id: Some("u7".to_string()),
			..Default::default()
		};

		let (outcome, text) = run(|out| check(&agent, "edit-letter", letter.clone(), OutputFormat::Text, out));
		assert_eq!(outcome, Outcome::Allowed);
		assert_eq!(text.trim(), "edit-letter: allow (assignee_match)");

		let (outcome, json) = run(|out| check(&agent, "delete_letter", letter, OutputFormat::Json, out));
		assert_eq!(outcome, Outcome::Denied);
		let value: serde_json::Value = serde_json::from_str(&json).unwrap();
		assert_eq!(value["allowed"], false);
		assert_eq!(value["reason"], "no_matching_permission");
		assert_eq!(value["action"], "delete-letter");
	}

	#[test]
	fn check_rejects_unknown_action() {
		let actor = ActorContext::from_session(Some("u1"), Some("admin"), None);
		let mut out = Vec::new();
		let err = check(&actor, "approve-issue", ResourceArgs::default(), OutputFormat::Text, &mut out).unwrap_err();
		assert!(err.to_string().contains("unknown policy action"));
	}

	#[test]
	fn batch_preserves_request_order() {
		let raw = r#"[
			{"actor": {"userId": "u1", "role": "super_admins", "tenantId": "t1"},
			 "action": "edit-issue",
			 "resource": {"type": "issue", "tenantId": "t2", "ownerId": "u9"}},
			{"actor": {"role": ""},
			 "action": "create-issue",
			 "resource": {"type": "issue"}},
			{"actor": {"userId": "u5", "role": "assistant"},
			 "action": "set-issue-status",
			 "resource": {"type": "issue", "extra": {"status": "In Progress"}}}
		]"#;

		let reports = run_batch(raw).unwrap();
		let allowed: Vec<bool> = reports.iter().map(|r| r.decision.allowed).collect();
		assert_eq!(allowed, vec![true, false, true]);
	}

	#[test]
	fn batch_reads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"[{{"actor": {{"userId": "u1", "role": "admin", "tenantId": "t1"}}, "action": "switch-tenants", "resource": {{"type": "tenant"}}}}]"#
		)
		.unwrap();

		let (outcome, json) = run(|out| batch(file.path(), OutputFormat::Json, out));
		assert_eq!(outcome, Outcome::Ok);
		let value: serde_json::Value = serde_json::from_str(&json).unwrap();
		assert_eq!(value[0]["allowed"], false);
	}

	#[test]
	fn batch_text_output_prints_one_line_per_request() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"[
				{{"actor": {{"userId": "u1", "role": "super_admin"}}, "action": "switch-tenants", "resource": {{"type": "tenant"}}}},
				{{"actor": {{"userId": "u2", "role": "admin"}}, "action": "delete-tenant", "resource": {{"type": "tenant"}}}}
			]"#
		)
		.unwrap();

		let (outcome, text) = run(|out| batch(file.path(), OutputFormat::Text, out));
		assert_eq!(outcome, Outcome::Ok);
		let lines: Vec<&str> = text.lines().collect();
		assert_eq!(
			lines,
			vec![
				"switch-tenants: allow (granted)",
				"delete-tenant: deny (no_matching_permission)",
			]
		);
	}

	#[test]
	fn batch_rejects_malformed_json() {
		assert!(run_batch("{not json").is_err());
		assert!(run_batch(r#"[{"action": "fly", "resource": {"type": "issue"}}]"#).is_err());
	}
}
