// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Parse failures for the string-facing helpers.
///
/// Decision functions never return these; an unparseable value simply isn't
/// in any allow-list and the decision is a denial.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
	#[error("unknown issue priority: {0}")]
	UnknownPriority(String),
	#[error("unknown issue status: {0}")]
	UnknownStatus(String),
	#[error("unknown policy action: {0}")]
	UnknownAction(String),
}

pub type AuthzResult<T> = Result<T, AuthzError>;
