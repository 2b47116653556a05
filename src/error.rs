use std::path::PathBuf;

/// Library-level structured errors for pact-match.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
	#[error("Path expression \"{expression}\" is invalid: {reason}")]
	InvalidPathExpression { expression: String, reason: String },

	#[error("No matcher defined for category '{category}' at path {path:?}")]
	NoMatcher { category: String, path: Vec<String> },

	#[error("Failed to read settings file: {path}")]
	SettingsReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse settings file: {path}")]
	SettingsParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid settings file: {path} ({reason})")]
	SettingsInvalid { path: PathBuf, reason: String },

	#[error("Failed to read matching rules file: {path}")]
	RulesReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse matching rules: {path}")]
	RulesParseError {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

impl MatchError {
	pub(crate) fn invalid_path(expression: &str, reason: impl Into<String>) -> Self {
		MatchError::InvalidPathExpression {
			expression: expression.to_string(),
			reason: reason.into(),
		}
	}
}

/// Result type alias using MatchError.
pub type Result<T> = std::result::Result<T, MatchError>;
