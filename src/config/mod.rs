//! Settings loading for pact-match.
//!
//! This module handles:
//! - TOML settings file parsing
//! - Directory cascade discovery and merging
//! - Property sources (environment, settings files, maps)

pub mod cascade;
pub mod parser;
pub mod source;
pub mod types;

pub use cascade::{
	SETTINGS_FILE_NAME, discover_settings, load_merged_settings, merge_settings,
	user_settings_path,
};
pub use parser::{parse_settings_file, parse_settings_str};
pub use source::{ConfigSource, EnvSource, LayeredSource, PACT_MATCHING_WILDCARD};
pub use types::{LoadedSettings, MergedSettings, Settings};
