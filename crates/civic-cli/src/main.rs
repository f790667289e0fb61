// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `civic`: inspect roles and run authorization checks from the shell.

mod commands;
mod logging;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use civic_authz::ActorContext;
use civic_cli_config::{load_config_with_cli, CivicConfig, CliOverrides};
use clap::{Parser, Subcommand};

use commands::{Outcome, ResourceArgs};

/// Role-based authorization checks for the civic grievance tracker.
#[derive(Parser, Debug)]
#[command(name = "civic", about = "Civic grievance tracker authorization tool", version)]
struct Args {
	/// Extra config file layered over the system and user files
	#[arg(long, global = true, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, global = true)]
	log_level: Option<String>,

	/// Log format (pretty, compact, json)
	#[arg(long, global = true)]
	log_format: Option<String>,

	/// Output format (text, json)
	#[arg(long, short = 'o', global = true)]
	output: Option<String>,

	/// Acting user id
	#[arg(long, global = true)]
	user: Option<String>,

	/// Acting role label, normalized before use
	#[arg(long, global = true)]
	role: Option<String>,

	/// Acting tenant id
	#[arg(long, global = true)]
	tenant: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the canonical role for a raw role label
	Normalize {
		/// Raw role label, e.g. "Tenant Admin"
		role: String,
	},

	/// Print the permission catalog and value allow-lists
	Permissions {
		/// Limit output to one role (raw label accepted)
		#[arg(long = "for-role", value_name = "ROLE")]
		for_role: Option<String>,
	},

	/// Decide one action for the configured actor
	Check {
		/// Action name, e.g. edit-issue or delete_letter
		action: String,

		/// Tenant the resource belongs to
		#[arg(long)]
		resource_tenant: Option<String>,

		/// Creator of the resource
		#[arg(long)]
		owner: Option<String>,

		/// User the resource is routed to
		#[arg(long)]
		assignee: Option<String>,

		/// Requested priority for value-gated checks
		#[arg(long)]
		priority: Option<String>,

		/// Requested status for value-gated checks
		#[arg(long)]
		status: Option<String>,
	},

	/// Decide a JSON array of {actor, action, resource} requests; prints one
	/// line per request, or a JSON array with --output json
	Batch {
		/// Request file, or - for stdin
		file: PathBuf,
	},
}

impl Args {
	fn overrides(&self) -> CliOverrides {
		CliOverrides {
			log_level: self.log_level.clone(),
			log_format: self.log_format.clone(),
			output_format: self.output.clone(),
			user_id: self.user.clone(),
			role: self.role.clone(),
			tenant_id: self.tenant.clone(),
		}
	}
}

fn session_actor(config: &CivicConfig) -> ActorContext {
	let session = &config.session;
	ActorContext::from_session(
		session.user_id.as_deref(),
		session.role.as_deref(),
		session.tenant_id.as_deref(),
	)
}

fn run(args: Args, config: &CivicConfig) -> Result<Outcome> {
	let format = config.output.format;
	let mut stdout = std::io::stdout().lock();

	match args.command {
		Command::Normalize { role } => commands::normalize_role(&role, format, &mut stdout),
		Command::Permissions { for_role } => commands::permissions(for_role.as_deref(), format, &mut stdout),
		Command::Check {
			action,
			resource_tenant,
			owner,
			assignee,
			priority,
			status,
		} => {
			let actor = session_actor(config);
			if !actor.is_authenticated() {
				tracing::warn!("no user id configured; every check will be denied");
			}
			let resource = ResourceArgs {
				tenant_id: resource_tenant,
				owner_id: owner,
				assignee_id: assignee,
				priority,
				status,
			};
			commands::check(&actor, &action, resource, format, &mut stdout)
		}
		Command::Batch { file } => commands::batch(&file, format, &mut stdout),
	}
}

fn main() -> ExitCode {
	let args = Args::parse();

	let config = match load_config_with_cli(args.config.clone(), args.overrides()) {
		Ok(config) => config,
		Err(e) => {
			eprintln!("error: {e}");
			return ExitCode::from(2);
		}
	};

	logging::init_tracing(&config.logging);
	tracing::debug!(output = %config.output.format, "configuration loaded");

	let result = run(args, &config);
	ExitCode::from(exit_status(result, &mut std::io::stderr()))
}

/// Maps a command result to the process status, writing a failure to `err`
/// exactly once.
fn exit_status(result: Result<Outcome>, err: &mut impl Write) -> u8 {
	match result {
		Ok(Outcome::Ok | Outcome::Allowed) => 0,
		Ok(Outcome::Denied) => 1,
		Err(e) => {
			let _ = writeln!(err, "error: {e:#}");
			2
		}
	}
}
