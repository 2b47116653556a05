use crate::error::{MatchError, Result};
use crate::path::token::PathToken;
use std::iter::Peekable;
use std::str::Chars;

/// Parse a path expression such as `$.items[*].name` into its tokens.
///
/// Supported steps after the leading `$`:
/// - `.name` and `['name']` for a field
/// - `.*` for any step
/// - `[3]` for a literal index
/// - `[*]` for any index
///
/// The returned sequence always starts with [`PathToken::Root`].
pub fn parse_path(expression: &str) -> Result<Vec<PathToken>> {
	let mut chars = expression.chars().peekable();

	if chars.next() != Some('$') {
		return Err(MatchError::invalid_path(
			expression,
			"expression does not start with a root marker \"$\"",
		));
	}

	let mut tokens = vec![PathToken::Root];
	while let Some(c) = chars.next() {
		let token = match c {
			'.' => parse_dot_step(expression, &mut chars)?,
			'[' => parse_bracket_step(expression, &mut chars)?,
			other => {
				return Err(MatchError::invalid_path(
					expression,
					format!("unexpected character '{other}', expected '.' or '['"),
				));
			}
		};
		tokens.push(token);
	}

	Ok(tokens)
}

/// Characters allowed in an unquoted field name.
fn is_identifier_char(c: char) -> bool {
	c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '#' | '@')
}

fn parse_dot_step(expression: &str, chars: &mut Peekable<Chars<'_>>) -> Result<PathToken> {
	if chars.peek() == Some(&'*') {
		chars.next();
		return Ok(PathToken::Star);
	}

	let mut name = String::new();
	while let Some(&c) = chars.peek() {
		if !is_identifier_char(c) {
			break;
		}
		name.push(c);
		chars.next();
	}

	if name.is_empty() {
		return Err(MatchError::invalid_path(
			expression,
			"expected a field name or '*' after '.'",
		));
	}

	Ok(PathToken::Field(name))
}

fn parse_bracket_step(expression: &str, chars: &mut Peekable<Chars<'_>>) -> Result<PathToken> {
	let token = match chars.peek().copied() {
		Some('\'') => {
			chars.next();
			let mut name = String::new();
			loop {
				match chars.next() {
					Some('\'') => break,
					Some(c) => name.push(c),
					None => {
						return Err(MatchError::invalid_path(
							expression,
							"unterminated quoted field name",
						));
					}
				}
			}
			if name.is_empty() {
				return Err(MatchError::invalid_path(expression, "empty quoted field name"));
			}
			PathToken::Field(name)
		}
		Some('*') => {
			chars.next();
			PathToken::StarIndex
		}
		Some(c) if c.is_ascii_digit() => {
			let mut digits = String::new();
			while let Some(&d) = chars.peek() {
				if !d.is_ascii_digit() {
					break;
				}
				digits.push(d);
				chars.next();
			}
			let index = digits.parse::<usize>().map_err(|_| {
				MatchError::invalid_path(expression, format!("index {digits} is out of range"))
			})?;
			PathToken::Index(index)
		}
		Some(other) => {
			return Err(MatchError::invalid_path(
				expression,
				format!("unexpected character '{other}' after '['"),
			));
		}
		None => {
			return Err(MatchError::invalid_path(expression, "unterminated '['"));
		}
	};

	match chars.next() {
		Some(']') => Ok(token),
		Some(other) => Err(MatchError::invalid_path(
			expression,
			format!("expected ']' but found '{other}'"),
		)),
		None => Err(MatchError::invalid_path(expression, "unterminated '['")),
	}
}
