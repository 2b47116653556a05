use crate::error::{MatchError, Result};
use crate::rules::types::MatchingRules;
use std::path::Path;

/// Parse a matching rules file from the given path.
pub fn parse_rules_file(path: &Path) -> Result<MatchingRules> {
	let content = std::fs::read_to_string(path).map_err(|source| MatchError::RulesReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_rules_str(&content, path)
}

/// Parse matching rules from a JSON string (useful for testing).
pub fn parse_rules_str(content: &str, path: &Path) -> Result<MatchingRules> {
	serde_json::from_str(content).map_err(|source| MatchError::RulesParseError {
		path: path.to_path_buf(),
		source,
	})
}
