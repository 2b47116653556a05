//! Sinks for the warnings raised while evaluating matching rules.
//!
//! Rule evaluation never fails on a malformed path expression: the offending
//! rule is skipped and the error is handed to a [`Diagnostics`] sink instead.

use crate::error::MatchError;
use std::sync::Mutex;

/// Receives recoverable problems found while evaluating rules.
pub trait Diagnostics: Sync {
	/// Called once for every path expression that failed to parse.
	fn invalid_path_expression(&self, error: &MatchError);
}

/// Discards everything.
impl Diagnostics for () {
	fn invalid_path_expression(&self, _error: &MatchError) {}
}

/// Emits a `tracing` warning per problem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
	fn invalid_path_expression(&self, error: &MatchError) {
		match error {
			MatchError::InvalidPathExpression { expression, reason } => {
				tracing::warn!(%reason, "Path expression {expression} is invalid, ignoring");
			}
			other => tracing::warn!("{other}"),
		}
	}
}

/// Keeps the rendered warnings in memory, for callers that report them later.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
	warnings: Mutex<Vec<String>>,
}

impl CollectingDiagnostics {
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of the warnings collected so far, oldest first.
	pub fn warnings(&self) -> Vec<String> {
		self.warnings
			.lock()
			.map(|w| w.clone())
			.unwrap_or_else(|poisoned| poisoned.into_inner().clone())
	}

	pub fn len(&self) -> usize {
		self.warnings().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Diagnostics for CollectingDiagnostics {
	fn invalid_path_expression(&self, error: &MatchError) {
		let mut warnings = self
			.warnings
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner());
		warnings.push(error.to_string());
	}
}
