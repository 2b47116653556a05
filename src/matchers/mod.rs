//! Matching rule selection.
//!
//! Given a path into a request or response and the declared matching rules,
//! these functions decide whether any rule applies at that path and which one
//! is the most specific. Paths are component slices from the root, e.g.
//! `["$", "items", "0", "name"]` for a body value or `["Accept"]` for a header.
//!
//! Malformed path expressions never fail a query: the rule is treated as not
//! applying and the problem is handed to the supplied [`Diagnostics`] sink.

pub mod path;
pub mod select;

pub use path::{exact_match_count, match_depth, path_weight, token_score};
pub use select::{SelectedMatcher, resolve_matchers, select_best_matcher};

use crate::config::{ConfigSource, PACT_MATCHING_WILDCARD};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::rules::{MatchingRuleGroup, MatchingRules};

/// Turns a selected rule group plus the compared values into mismatches.
///
/// Closures of the form `Fn(&MatchingRuleGroup, &[&str], &E, &A) -> Vec<M>`
/// implement this trait.
pub trait MismatchFactory<E: ?Sized, A: ?Sized> {
	type Mismatch;

	fn mismatches(
		&self,
		group: &MatchingRuleGroup,
		path: &[&str],
		expected: &E,
		actual: &A,
	) -> Vec<Self::Mismatch>;
}

impl<F, E, A, M> MismatchFactory<E, A> for F
where
	E: ?Sized,
	A: ?Sized,
	F: Fn(&MatchingRuleGroup, &[&str], &E, &A) -> Vec<M>,
{
	type Mismatch = M;

	fn mismatches(
		&self,
		group: &MatchingRuleGroup,
		path: &[&str],
		expected: &E,
		actual: &A,
	) -> Vec<M> {
		self(group, path, expected, actual)
	}
}

/// Whether any rule of `category` applies at `path`.
///
/// Absent rules mean nothing is configured, so the answer is `false`.
pub fn matcher_defined(
	category: &str,
	path: &[&str],
	rules: Option<&MatchingRules>,
	diagnostics: &dyn Diagnostics,
) -> bool {
	rules.is_some_and(|rules| !resolve_matchers(rules, category, path, diagnostics).is_empty())
}

/// Whether a `.*` rule covers exactly this path.
///
/// Only rules whose match depth equals the full path length are considered,
/// and one of them must be keyed by an expression ending in `.*`. Such rules
/// ask for values to be compared while keys are ignored.
pub fn wildcard_matcher_defined(
	path: &[&str],
	category: &str,
	rules: Option<&MatchingRules>,
	diagnostics: &dyn Diagnostics,
) -> bool {
	let Some(group) = rules.and_then(|rules| rules.category(category)) else {
		return false;
	};

	group
		.keys()
		.filter(|expression| match_depth(expression, path, diagnostics) == path.len())
		.any(|expression| expression.ends_with(".*"))
}

/// Whether wildcard matching (keys ignored, values compared) is turned on.
///
/// Reads `pact.matching.wildcard` from `source` on every call; only a value
/// of `true` (surrounding whitespace ignored) enables it.
pub fn wildcard_matching_enabled(source: &dyn ConfigSource) -> bool {
	source
		.property(PACT_MATCHING_WILDCARD)
		.is_some_and(|value| value.trim() == "true")
}

/// Compare `expected` and `actual` with the most specific rule for `path`.
///
/// The rule group is chosen by [`select_best_matcher`] and handed to
/// `factory` together with the values; this function does not look at the
/// values itself. Fails with [`MatchError::NoMatcher`](crate::MatchError::NoMatcher)
/// when no rule applies.
pub fn domatch<E, A, F>(
	rules: &MatchingRules,
	category: &str,
	path: &[&str],
	expected: &E,
	actual: &A,
	factory: &F,
	diagnostics: &dyn Diagnostics,
) -> Result<Vec<F::Mismatch>>
where
	E: ?Sized,
	A: ?Sized,
	F: MismatchFactory<E, A> + ?Sized,
{
	let selected = select_best_matcher(rules, category, path, diagnostics)?;
	tracing::debug!(
		category,
		expression = %selected.expression,
		"Selected matcher for path {path:?}"
	);
	Ok(factory.mismatches(&selected.group, path, expected, actual))
}
