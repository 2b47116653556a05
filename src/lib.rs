//! pact-match - matching-rule selection for consumer-driven contract tests.
//!
//! This library provides:
//! - Path expression parsing (`$.items[*].name`)
//! - Matching rule model and JSON loading
//! - Deciding whether a rule applies at a path and picking the most specific one
//! - Settings cascade for process-wide flags such as `pact.matching.wildcard`
//!
//! # Example
//!
//! ```
//! use pact_match::diagnostics::TracingDiagnostics;
//! use pact_match::matchers::{matcher_defined, select_best_matcher};
//! use pact_match::rules::parse_rules_str;
//! use std::path::Path;
//!
//! let rules = parse_rules_str(
//!     r#"{ "body": {
//!         "$.*": { "matchers": [{ "match": "type" }] },
//!         "$.id": { "matchers": [{ "match": "integer" }] }
//!     } }"#,
//!     Path::new("inline.json"),
//! )
//! .unwrap();
//!
//! let path = ["$", "id"];
//! assert!(matcher_defined("body", &path, Some(&rules), &TracingDiagnostics));
//!
//! let best = select_best_matcher(&rules, "body", &path, &TracingDiagnostics).unwrap();
//! assert_eq!(best.expression, "$.id");
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod matchers;
pub mod path;
pub mod rules;

pub use error::{MatchError, Result};
