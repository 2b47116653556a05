use crate::diagnostics::Diagnostics;
use crate::error::{MatchError, Result};
use crate::matchers::path::{exact_match_count, match_depth};
use crate::rules::{MatchingRuleGroup, MatchingRules};

/// The rule group chosen for a path, with the expression it was declared under.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedMatcher {
	pub expression: String,
	pub group: MatchingRuleGroup,
}

/// The rules of `category` that apply at `path`, in declaration order.
///
/// Body rules are keyed by path expressions and apply when they match the
/// path at a nonzero depth. Header and query rules are keyed by plain names
/// and only apply when the path is exactly that name. Any other category is
/// returned unfiltered.
pub fn resolve_matchers<'a>(
	rules: &'a MatchingRules,
	category: &str,
	path: &[&str],
	diagnostics: &dyn Diagnostics,
) -> Vec<(&'a str, &'a MatchingRuleGroup)> {
	let Some(group) = rules.category(category) else {
		return Vec::new();
	};

	let entries = group.iter();
	match category {
		"body" => entries
			.filter(|(expression, _)| match_depth(expression, path, diagnostics) > 0)
			.collect(),
		"header" | "query" => entries
			.filter(|(name, _)| path.len() == 1 && path[0] == *name)
			.collect(),
		_ => entries.collect(),
	}
}

/// Pick the single most specific rule group for `path`.
///
/// For body rules the highest [`path_weight`](crate::matchers::path_weight)
/// wins, compared through [`exact_match_count`] so deep paths never tie on a
/// saturated weight. Equal weights go to the longer expression, and when
/// lengths are equal too the earliest declared rule is kept. Other categories
/// take the first applicable rule.
///
/// Returns [`MatchError::NoMatcher`] when nothing applies, so callers should
/// check [`matcher_defined`](crate::matchers::matcher_defined) first.
pub fn select_best_matcher(
	rules: &MatchingRules,
	category: &str,
	path: &[&str],
	diagnostics: &dyn Diagnostics,
) -> Result<SelectedMatcher> {
	let candidates = resolve_matchers(rules, category, path, diagnostics);

	let best = if category == "body" {
		let mut best: Option<(Option<usize>, &str, &MatchingRuleGroup)> = None;
		for (expression, group) in candidates {
			let rank = exact_match_count(expression, path, diagnostics);
			let better = match best {
				None => true,
				Some((best_rank, best_expression, _)) => {
					(rank, expression.len()) > (best_rank, best_expression.len())
				}
			};
			if better {
				best = Some((rank, expression, group));
			}
		}
		best.map(|(_, expression, group)| (expression, group))
	} else {
		candidates.into_iter().next()
	};

	best.map(|(expression, group)| SelectedMatcher {
		expression: expression.to_string(),
		group: group.clone(),
	})
	.ok_or_else(|| MatchError::NoMatcher {
		category: category.to_string(),
		path: path.iter().map(|c| c.to_string()).collect(),
	})
}
