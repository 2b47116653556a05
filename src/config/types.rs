use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Contents of a `.pact-match.toml` settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
	/// If true, stop the directory cascade here and only add ~/.pact-match.toml.
	#[serde(default)]
	pub root: bool,

	/// Named properties such as `pact.matching.wildcard`.
	#[serde(default)]
	pub properties: BTreeMap<String, String>,
}

/// A loaded settings file with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
	/// The parsed settings.
	pub settings: Settings,

	/// The path these settings were loaded from.
	pub path: PathBuf,
}

/// Effective properties of every settings file in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedSettings {
	/// Property values; the most specific file wins.
	pub properties: BTreeMap<String, String>,

	/// The file each property value came from.
	pub sources: BTreeMap<String, PathBuf>,
}

impl Settings {
	/// Property names must be non-empty and free of surrounding whitespace.
	pub fn validate(&self) -> Result<(), String> {
		for key in self.properties.keys() {
			if key.is_empty() || key.trim() != key {
				return Err(format!("invalid property name {key:?}"));
			}
		}
		Ok(())
	}
}
