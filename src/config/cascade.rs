use crate::config::parser::parse_settings_file;
use crate::config::types::{LoadedSettings, MergedSettings};
use crate::error::{MatchError, Result};
use std::path::{Path, PathBuf};

/// Name of the settings file looked up in each directory.
pub const SETTINGS_FILE_NAME: &str = ".pact-match.toml";

/// Discover and load all settings files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.pact-match.toml`
/// 2. If found and `root = true`, skip to user settings only
/// 3. Otherwise, continue up the directory tree
/// 4. Finally, check ~/.pact-match.toml
///
/// Returns settings in cascade order (most specific first).
pub fn discover_settings(start_dir: &Path) -> Result<Vec<LoadedSettings>> {
	let user_path = user_settings_path()?;
	discover_settings_with_user(start_dir, Some(&user_path))
}

fn discover_settings_with_user(
	start_dir: &Path,
	user_path: Option<&Path>,
) -> Result<Vec<LoadedSettings>> {
	let mut loaded = Vec::new();
	let mut current_dir = start_dir.to_path_buf();

	loop {
		let settings_path = current_dir.join(SETTINGS_FILE_NAME);

		if settings_path.is_file() {
			let settings = parse_settings_file(&settings_path)?;
			let stop = settings.root;

			loaded.push(LoadedSettings {
				settings,
				path: settings_path,
			});

			if stop {
				break;
			}
		}

		match current_dir.parent() {
			Some(parent) => current_dir = parent.to_path_buf(),
			None => break,
		}
	}

	// The walk may already have passed through the home directory
	if let Some(user_path) = user_path
		&& user_path.is_file()
		&& !loaded.iter().any(|l| l.path.as_path() == user_path)
	{
		loaded.push(LoadedSettings {
			settings: parse_settings_file(user_path)?,
			path: user_path.to_path_buf(),
		});
	}

	Ok(loaded)
}

/// Merge multiple settings files into a single effective set of properties.
///
/// Files are given most specific first, so the first value seen for a
/// property wins.
pub fn merge_settings(loaded: &[LoadedSettings]) -> MergedSettings {
	let mut merged = MergedSettings::default();

	for settings in loaded {
		for (key, value) in &settings.settings.properties {
			if !merged.properties.contains_key(key) {
				merged.properties.insert(key.clone(), value.clone());
				merged.sources.insert(key.clone(), settings.path.clone());
			}
		}
	}

	merged
}

/// Convenience function to discover, load, and merge settings from a directory.
pub fn load_merged_settings(start_dir: &Path) -> Result<MergedSettings> {
	let loaded = discover_settings(start_dir)?;
	Ok(merge_settings(&loaded))
}

/// Get the path to the user's settings file.
pub fn user_settings_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(MatchError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(SETTINGS_FILE_NAME))
}
