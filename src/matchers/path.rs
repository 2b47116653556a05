use crate::diagnostics::Diagnostics;
use crate::path::{PathToken, parse_path};
use regex::Regex;
use std::sync::LazyLock;

static INT_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("integer pattern is valid"));

/// Score one path component against one token.
///
/// Returns 2 for an exact match, 1 for a wildcard match and 0 otherwise.
pub fn token_score(component: &str, token: &PathToken) -> u32 {
	match token {
		PathToken::Root => exact(component == "$"),
		PathToken::Field(name) => exact(component == name),
		PathToken::Index(index) => exact(
			INT_REGEX.is_match(component) && component.parse::<usize>().ok() == Some(*index),
		),
		PathToken::StarIndex => u32::from(INT_REGEX.is_match(component)),
		PathToken::Star => 1,
	}
}

fn exact(matched: bool) -> u32 {
	if matched { 2 } else { 0 }
}

/// How many trailing path components the expression covers.
///
/// The last token is aligned with the last component, working backwards. The
/// result is the token count when every aligned pair matches and the path is
/// at least that long, else 0. Invalid expressions are reported and score 0.
pub fn match_depth(expression: &str, path: &[&str], diagnostics: &dyn Diagnostics) -> usize {
	let tokens = match parse_path(expression) {
		Ok(tokens) => tokens,
		Err(err) => {
			diagnostics.invalid_path_expression(&err);
			return 0;
		}
	};

	if tokens.is_empty() || path.len() < tokens.len() {
		return 0;
	}

	let tail = &path[path.len() - tokens.len()..];
	let aligned = tail
		.iter()
		.zip(&tokens)
		.all(|(component, token)| token_score(component, token) != 0);

	if aligned { tokens.len() } else { 0 }
}

/// Specificity of an expression for a path, used to rank applicable rules.
///
/// Components and tokens are paired from the root up to the shorter of the
/// two and their scores multiplied, so any mismatch yields 0 and exact steps
/// outweigh wildcard ones. Invalid expressions are reported and weigh 0.
///
/// The product saturates at `u32::MAX` past 31 exact steps; rank with
/// [`exact_match_count`] when paths can be that deep.
pub fn path_weight(expression: &str, path: &[&str], diagnostics: &dyn Diagnostics) -> u32 {
	match exact_match_count(expression, path, diagnostics) {
		None => 0,
		Some(exact) => u32::try_from(exact)
			.ok()
			.and_then(|exact| 2u32.checked_pow(exact))
			.unwrap_or(u32::MAX),
	}
}

/// Exponent of [`path_weight`]: the number of exactly matched positions.
///
/// `None` when any left-aligned pair scores 0, when there is nothing to pair,
/// or when the expression is invalid (reported once). Ordering these values
/// ranks expressions the same way their weights do, without an upper bound.
pub fn exact_match_count(
	expression: &str,
	path: &[&str],
	diagnostics: &dyn Diagnostics,
) -> Option<usize> {
	let tokens = match parse_path(expression) {
		Ok(tokens) => tokens,
		Err(err) => {
			diagnostics.invalid_path_expression(&err);
			return None;
		}
	};

	let mut pairs = path.iter().zip(&tokens).peekable();
	pairs.peek()?;

	let mut exact = 0;
	for (component, token) in pairs {
		match token_score(component, token) {
			0 => return None,
			2 => exact += 1,
			_ => {}
		}
	}
	Some(exact)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::diagnostics::CollectingDiagnostics;

	fn field(name: &str) -> PathToken {
		PathToken::Field(name.to_string())
	}

	#[test]
	fn test_root_token_score() {
		assert_eq!(token_score("$", &PathToken::Root), 2);
		assert_eq!(token_score("items", &PathToken::Root), 0);
	}

	#[test]
	fn test_field_token_score() {
		assert_eq!(token_score("name", &field("name")), 2);
		assert_eq!(token_score("Name", &field("name")), 0);
	}

	#[test]
	fn test_index_token_score() {
		assert_eq!(token_score("3", &PathToken::Index(3)), 2);
		assert_eq!(token_score("03", &PathToken::Index(3)), 2);
		assert_eq!(token_score("4", &PathToken::Index(3)), 0);
		assert_eq!(token_score("three", &PathToken::Index(3)), 0);
		assert_eq!(token_score("-3", &PathToken::Index(3)), 0);
		assert_eq!(token_score("", &PathToken::Index(0)), 0);
	}

	#[test]
	fn test_star_index_token_score() {
		assert_eq!(token_score("0", &PathToken::StarIndex), 1);
		assert_eq!(token_score("42", &PathToken::StarIndex), 1);
		assert_eq!(token_score("name", &PathToken::StarIndex), 0);
		assert_eq!(token_score("1.5", &PathToken::StarIndex), 0);
	}

	#[test]
	fn test_star_token_score() {
		assert_eq!(token_score("anything", &PathToken::Star), 1);
		assert_eq!(token_score("0", &PathToken::Star), 1);
		assert_eq!(token_score("$", &PathToken::Star), 1);
	}

	#[test]
	fn test_index_overflowing_component_does_not_match() {
		let huge = "99999999999999999999999999999";
		assert_eq!(token_score(huge, &PathToken::Index(0)), 0);
		assert_eq!(token_score(huge, &PathToken::StarIndex), 1);
	}

	#[test]
	fn test_non_ascii_digits_are_not_indices() {
		assert_eq!(token_score("٣", &PathToken::StarIndex), 0);
		assert_eq!(token_score("١٢", &PathToken::Index(12)), 0);

		let path = ["$", "items", "١٢"];
		assert_eq!(match_depth("$.items[*]", &path, &()), 0);
		assert_eq!(path_weight("$.items[*]", &path, &()), 0);
	}

	#[test]
	fn test_match_depth_star_index() {
		let path = ["$", "items", "0", "name"];
		assert_eq!(match_depth("$.items[*].name", &path, &()), 4);
	}

	#[test]
	fn test_match_depth_wrong_literal_index() {
		let path = ["$", "items", "0", "name"];
		assert_eq!(match_depth("$.items[1].name", &path, &()), 0);
	}

	#[test]
	fn test_match_depth_path_shorter_than_expression() {
		let path = ["$", "items"];
		assert_eq!(match_depth("$.items[*].name", &path, &()), 0);
	}

	#[test]
	fn test_match_depth_is_right_aligned() {
		// Root must line up with the component four places from the end.
		let path = ["$", "items", "0", "name"];
		assert_eq!(match_depth("$.items", &path, &()), 0);
		assert_eq!(match_depth("$.*.*.*", &path, &()), 4);

		let nested = ["$", "$", "items"];
		assert_eq!(match_depth("$.items", &nested, &()), 2);
	}

	#[test]
	fn test_path_weight_mixed_tokens() {
		let path = ["$", "items", "0", "name"];
		assert_eq!(path_weight("$.items[*].name", &path, &()), 8);
		assert_eq!(path_weight("$.items[0].name", &path, &()), 16);
		assert_eq!(path_weight("$.*[*].*", &path, &()), 2);
	}

	#[test]
	fn test_path_weight_zero_on_any_mismatch() {
		let path = ["$", "items", "0", "name"];
		assert_eq!(path_weight("$.items[1].name", &path, &()), 0);
		assert_eq!(path_weight("$.other[*].name", &path, &()), 0);
	}

	#[test]
	fn test_path_weight_stops_at_shorter_sequence() {
		let path = ["$", "items", "0", "name"];
		assert_eq!(path_weight("$.items", &path, &()), 4);
		assert_eq!(path_weight("$.items[*].name.first", &path, &()), 8);
	}

	#[test]
	fn test_exact_match_count_ranks_deep_paths() {
		let steps = vec!["a"; 40];
		let mut path = vec!["$"];
		path.extend(&steps);

		let exact = format!("$.{}", steps.join("."));
		let wild = format!("$.*.{}", steps[1..].join("."));

		assert_eq!(exact_match_count(&exact, &path, &()), Some(41));
		assert_eq!(exact_match_count(&wild, &path, &()), Some(40));
		assert_eq!(path_weight(&exact, &path, &()), u32::MAX);
		assert_eq!(path_weight(&wild, &path, &()), u32::MAX);
	}

	#[test]
	fn test_exact_match_count_none_on_mismatch() {
		let path = ["$", "items", "0"];
		assert_eq!(exact_match_count("$.items[*]", &path, &()), Some(2));
		assert_eq!(exact_match_count("$.items[1]", &path, &()), None);
		assert_eq!(exact_match_count("$.id", &[], &()), None);
	}

	#[test]
	fn test_path_weight_empty_path() {
		assert_eq!(path_weight("$.id", &[], &()), 0);
	}

	#[test]
	fn test_invalid_expression_reported_once_per_call() {
		let diagnostics = CollectingDiagnostics::new();
		let path = ["$", "items"];

		assert_eq!(match_depth("$.[invalid", &path, &diagnostics), 0);
		assert_eq!(diagnostics.len(), 1);

		assert_eq!(path_weight("$.[invalid", &path, &diagnostics), 0);
		assert_eq!(diagnostics.len(), 2);
		assert!(diagnostics.warnings()[0].contains("$.[invalid"));
	}

	#[test]
	fn test_valid_expressions_report_nothing() {
		let diagnostics = CollectingDiagnostics::new();
		let path = ["$", "id"];
		match_depth("$.id", &path, &diagnostics);
		path_weight("$.id", &path, &diagnostics);
		assert!(diagnostics.is_empty());
	}
}
