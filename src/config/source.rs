use crate::config::types::MergedSettings;
use std::collections::HashMap;

/// Property that turns on wildcard matching (keys ignored, values compared).
pub const PACT_MATCHING_WILDCARD: &str = "pact.matching.wildcard";

/// Somewhere named string properties can be read from.
///
/// Implementations are queried on every read and must not cache.
pub trait ConfigSource {
	fn property(&self, key: &str) -> Option<String>;
}

/// Reads properties from environment variables.
///
/// A property name maps to an upper-cased variable with `.` and `-` replaced
/// by `_`, so `pact.matching.wildcard` is read from `PACT_MATCHING_WILDCARD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl EnvSource {
	pub fn var_name(key: &str) -> String {
		key.to_uppercase().replace(['.', '-'], "_")
	}
}

impl ConfigSource for EnvSource {
	fn property(&self, key: &str) -> Option<String> {
		std::env::var(Self::var_name(key)).ok()
	}
}

impl ConfigSource for MergedSettings {
	fn property(&self, key: &str) -> Option<String> {
		self.properties.get(key).cloned()
	}
}

impl ConfigSource for HashMap<String, String> {
	fn property(&self, key: &str) -> Option<String> {
		self.get(key).cloned()
	}
}

/// Queries several sources in order; the first one with a value wins.
#[derive(Default)]
pub struct LayeredSource<'a> {
	sources: Vec<&'a dyn ConfigSource>,
}

impl<'a> LayeredSource<'a> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a source with lower priority than every source added before it.
	pub fn with(mut self, source: &'a dyn ConfigSource) -> Self {
		self.sources.push(source);
		self
	}
}

impl ConfigSource for LayeredSource<'_> {
	fn property(&self, key: &str) -> Option<String> {
		self.sources.iter().find_map(|source| source.property(key))
	}
}
