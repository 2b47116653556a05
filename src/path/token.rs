/// One step of a parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PathToken {
	/// The `$` marker every expression starts with.
	Root,

	/// A literal field name (`.name` or `['name']`).
	Field(String),

	/// A literal array index (`[2]`).
	Index(usize),

	/// Any array index (`[*]`).
	StarIndex,

	/// Any step at all (`.*`).
	Star,
}
