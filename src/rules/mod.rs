//! Matching rule model for pact-match.
//!
//! This module handles:
//! - Rule, rule group and category types
//! - Loading rules from Pact-style JSON

pub mod parser;
pub mod types;

pub use parser::{parse_rules_file, parse_rules_str};
pub use types::{Category, MatchingRule, MatchingRuleGroup, MatchingRules, RuleLogic};
