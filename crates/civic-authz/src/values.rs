// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Issue field values used by value-gated permissions.

use crate::{AuthzError, AuthzResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Lower-cases and folds `_`/`-` into spaces so "in_progress", "In-Progress"
/// and "In Progress" all compare equal.
fn fold_label(raw: &str) -> String {
	raw
		.trim()
		.chars()
		.map(|c| match c {
			'_' | '-' => ' ',
			c => c.to_ascii_lowercase(),
		})
		.collect()
}

/// Priority levels an issue can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum IssuePriority {
	Low,
	Medium,
	High,
	Urgent,
}

impl IssuePriority {
	pub const ALL: &'static [IssuePriority] = &[
		IssuePriority::Low,
		IssuePriority::Medium,
		IssuePriority::High,
		IssuePriority::Urgent,
	];

	/// Display label as stored by the tracker.
	pub fn as_str(self) -> &'static str {
		match self {
			IssuePriority::Low => "Low",
			IssuePriority::Medium => "Medium",
			IssuePriority::High => "High",
			IssuePriority::Urgent => "Urgent",
		}
	}
}

impl fmt::Display for IssuePriority {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for IssuePriority {
	type Err = AuthzError;

	fn from_str(value: &str) -> AuthzResult<Self> {
		match fold_label(value).as_str() {
			"low" => Ok(IssuePriority::Low),
			"medium" => Ok(IssuePriority::Medium),
			"high" => Ok(IssuePriority::High),
			"urgent" => Ok(IssuePriority::Urgent),
			_ => Err(AuthzError::UnknownPriority(value.to_string())),
		}
	}
}

/// Workflow states an issue can move through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum IssueStatus {
	Open,
	InProgress,
	Pending,
	Resolved,
}

impl IssueStatus {
	pub const ALL: &'static [IssueStatus] = &[
		IssueStatus::Open,
		IssueStatus::InProgress,
		IssueStatus::Pending,
		IssueStatus::Resolved,
	];

	/// Display label as stored by the tracker.
	pub fn as_str(self) -> &'static str {
		match self {
			IssueStatus::Open => "Open",
			IssueStatus::InProgress => "In Progress",
			IssueStatus::Pending => "Pending",
			IssueStatus::Resolved => "Resolved",
		}
	}
}

impl fmt::Display for IssueStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for IssueStatus {
	type Err = AuthzError;

	fn from_str(value: &str) -> AuthzResult<Self> {
		match fold_label(value).as_str() {
			"open" => Ok(IssueStatus::Open),
			"in progress" => Ok(IssueStatus::InProgress),
			"pending" => Ok(IssueStatus::Pending),
			"resolved" => Ok(IssueStatus::Resolved),
			_ => Err(AuthzError::UnknownStatus(value.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn priority_labels_round_trip() {
		for p in IssuePriority::ALL {
			assert_eq!(p.as_str().parse::<IssuePriority>().unwrap(), *p);
		}
	}

	#[test]
	fn status_labels_round_trip() {
		for s in IssueStatus::ALL {
			assert_eq!(s.as_str().parse::<IssueStatus>().unwrap(), *s);
		}
	}

	#[test]
	fn labels_are_case_and_separator_insensitive() {
		assert_eq!("URGENT".parse::<IssuePriority>().unwrap(), IssuePriority::Urgent);
		assert_eq!("in_progress".parse::<IssueStatus>().unwrap(), IssueStatus::InProgress);
		assert_eq!(" In-Progress ".parse::<IssueStatus>().unwrap(), IssueStatus::InProgress);
	}

	#[test]
	fn unknown_labels_are_errors() {
		let err = "Critical".parse::<IssuePriority>().unwrap_err();
		assert!(matches!(err, AuthzError::UnknownPriority(ref v) if v == "Critical"));
		let err = "Closed".parse::<IssueStatus>().unwrap_err();
		assert!(matches!(err, AuthzError::UnknownStatus(_)));
		assert!("".parse::<IssueStatus>().is_err());
	}
}
