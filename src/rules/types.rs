use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A single matching directive attached to a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "camelCase")]
pub enum MatchingRule {
	/// Values must be equal.
	Equality,

	/// Values must match a regular expression.
	Regex { regex: String },

	/// Values must have the same type, with optional collection bounds.
	Type {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		min: Option<usize>,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		max: Option<usize>,
	},

	/// Value must contain the given string.
	Include { value: String },

	Integer,
	Decimal,
	Number,
	Boolean,
	Null,

	Date {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		format: Option<String>,
	},

	Time {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		format: Option<String>,
	},

	Timestamp {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		format: Option<String>,
	},

	/// Body must have the given content type.
	ContentType { value: String },

	/// Map keys are ignored, only values are compared.
	Values,
}

/// How the rules of a group are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleLogic {
	#[default]
	And,
	Or,
}

/// The rules declared for one path expression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingRuleGroup {
	#[serde(rename = "matchers", default)]
	pub rules: Vec<MatchingRule>,

	#[serde(default)]
	pub combine: RuleLogic,
}

impl MatchingRuleGroup {
	pub fn new(rules: Vec<MatchingRule>) -> Self {
		MatchingRuleGroup {
			rules,
			combine: RuleLogic::And,
		}
	}
}

/// The rule groups of one category (`body`, `header`, `query`, ...).
///
/// Entries keep the order they were declared in and keys are unique: adding
/// an existing key replaces its group in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Category {
	entries: Vec<(String, MatchingRuleGroup)>,
}

impl Category {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add or replace the group declared for `expression`.
	pub fn add_rule(&mut self, expression: impl Into<String>, group: MatchingRuleGroup) {
		let expression = expression.into();
		match self.entries.iter_mut().find(|(key, _)| *key == expression) {
			Some((_, existing)) => *existing = group,
			None => self.entries.push((expression, group)),
		}
	}

	pub fn get(&self, expression: &str) -> Option<&MatchingRuleGroup> {
		self.entries
			.iter()
			.find(|(key, _)| key == expression)
			.map(|(_, group)| group)
	}

	/// Expression keys in declaration order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(key, _)| key.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &MatchingRuleGroup)> {
		self.entries.iter().map(|(key, group)| (key.as_str(), group))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

}

impl<K: Into<String>> FromIterator<(K, MatchingRuleGroup)> for Category {
	fn from_iter<I: IntoIterator<Item = (K, MatchingRuleGroup)>>(iter: I) -> Self {
		let mut category = Category::new();
		for (key, group) in iter {
			category.add_rule(key, group);
		}
		category
	}
}

impl Serialize for Category {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;
		for (key, group) in &self.entries {
			map.serialize_entry(key, group)?;
		}
		map.end()
	}
}

impl<'de> Deserialize<'de> for Category {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct CategoryVisitor;

		impl<'de> Visitor<'de> for CategoryVisitor {
			type Value = Category;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("a map of path expressions to matching rule groups")
			}

			fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
			where
				M: MapAccess<'de>,
			{
				let mut category = Category::new();
				while let Some((key, group)) = map.next_entry::<String, MatchingRuleGroup>()? {
					if category.get(&key).is_some() {
						return Err(de::Error::custom(format!(
							"duplicate path expression '{key}'"
						)));
					}
					category.add_rule(key, group);
				}
				Ok(category)
			}
		}

		deserializer.deserialize_map(CategoryVisitor)
	}
}

/// All matching rules of an interaction, keyed by category name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchingRules {
	categories: BTreeMap<String, Category>,
}

impl MatchingRules {
	pub fn new() -> Self {
		Self::default()
	}

	/// The rules of `category`, or an empty category when none are declared.
	pub fn rules_for_category(&self, category: &str) -> Category {
		self.categories.get(category).cloned().unwrap_or_default()
	}

	/// Borrowing variant of [`rules_for_category`](Self::rules_for_category).
	pub fn category(&self, category: &str) -> Option<&Category> {
		self.categories.get(category)
	}

	/// Get the named category, creating it when missing.
	pub fn add_category(&mut self, category: impl Into<String>) -> &mut Category {
		self.categories.entry(category.into()).or_default()
	}

	pub fn category_names(&self) -> impl Iterator<Item = &str> {
		self.categories.keys().map(String::as_str)
	}

	pub fn is_empty(&self) -> bool {
		self.categories.values().all(Category::is_empty)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn type_group() -> MatchingRuleGroup {
		MatchingRuleGroup::new(vec![MatchingRule::Type {
			min: None,
			max: None,
		}])
	}

	#[test]
	fn test_category_preserves_insertion_order() {
		let mut category = Category::new();
		category.add_rule("$.z", type_group());
		category.add_rule("$.a", type_group());
		category.add_rule("$.m", type_group());

		let keys: Vec<_> = category.keys().collect();
		assert_eq!(keys, vec!["$.z", "$.a", "$.m"]);
	}

	#[test]
	fn test_category_add_existing_key_replaces_in_place() {
		let mut category = Category::new();
		category.add_rule("$.a", type_group());
		category.add_rule("$.b", type_group());
		category.add_rule("$.a", MatchingRuleGroup::new(vec![MatchingRule::Equality]));

		assert_eq!(category.len(), 2);
		assert_eq!(category.keys().next(), Some("$.a"));
		assert_eq!(
			category.get("$.a").unwrap().rules,
			vec![MatchingRule::Equality]
		);
	}

	#[test]
	fn test_category_collects_in_order() {
		let category: Category = [("$.a", type_group()), ("$.bb", type_group()), ("$.c", type_group())]
			.into_iter()
			.collect();
		let keys: Vec<_> = category.iter().map(|(key, _)| key).collect();
		assert_eq!(keys, vec!["$.a", "$.bb", "$.c"]);
	}

	#[test]
	fn test_category_borrows_declared_rules() {
		let mut rules = MatchingRules::new();
		rules.add_category("body").add_rule("$.id", type_group());
		let body = rules.category("body").unwrap();
		assert_eq!(body.get("$.id"), Some(&type_group()));
	}

	#[test]
	fn test_missing_category_is_empty() {
		let rules = MatchingRules::new();
		assert!(rules.rules_for_category("body").is_empty());
		assert!(rules.category("body").is_none());
		assert!(rules.is_empty());
	}

	#[test]
	fn test_deserialize_keeps_declaration_order() {
		let json = r#"{
			"body": {
				"$.zeta": { "matchers": [{ "match": "type" }] },
				"$.alpha": { "matchers": [{ "match": "regex", "regex": "\\d+" }], "combine": "OR" }
			}
		}"#;
		let rules: MatchingRules = serde_json::from_str(json).unwrap();
		let body = rules.rules_for_category("body");

		let keys: Vec<_> = body.keys().collect();
		assert_eq!(keys, vec!["$.zeta", "$.alpha"]);

		let alpha = body.get("$.alpha").unwrap();
		assert_eq!(alpha.combine, RuleLogic::Or);
		assert_eq!(
			alpha.rules,
			vec![MatchingRule::Regex {
				regex: r"\d+".to_string()
			}]
		);
	}

	#[test]
	fn test_deserialize_rejects_duplicate_keys() {
		let json = r#"{ "body": { "$.a": { "matchers": [] }, "$.a": { "matchers": [] } } }"#;
		let result: Result<MatchingRules, _> = serde_json::from_str(json);
		assert!(result.is_err());
	}

	#[test]
	fn test_deserialize_rule_variants() {
		let json = r#"[
			{ "match": "equality" },
			{ "match": "type", "min": 1 },
			{ "match": "include", "value": "foo" },
			{ "match": "timestamp", "format": "yyyy-MM-dd" },
			{ "match": "contentType", "value": "image/png" },
			{ "match": "values" }
		]"#;
		let rules: Vec<MatchingRule> = serde_json::from_str(json).unwrap();
		assert_eq!(rules[0], MatchingRule::Equality);
		assert_eq!(
			rules[1],
			MatchingRule::Type {
				min: Some(1),
				max: None
			}
		);
		assert_eq!(
			rules[3],
			MatchingRule::Timestamp {
				format: Some("yyyy-MM-dd".to_string())
			}
		);
		assert_eq!(rules[5], MatchingRule::Values);
	}

	#[test]
	fn test_serialize_category_as_ordered_map() {
		let mut rules = MatchingRules::new();
		let body = rules.add_category("body");
		body.add_rule("$.b", MatchingRuleGroup::new(vec![MatchingRule::Equality]));
		body.add_rule("$.a", MatchingRuleGroup::new(vec![MatchingRule::Null]));

		let json = serde_json::to_string(&rules).unwrap();
		assert_eq!(
			json,
			r#"{"body":{"$.b":{"matchers":[{"match":"equality"}],"combine":"AND"},"$.a":{"matchers":[{"match":"null"}],"combine":"AND"}}}"#
		);
	}
}
