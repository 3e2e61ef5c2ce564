use serde::{Deserialize, Serialize};

/// Characters that close a sentence.
pub const SENTENCE_ENDINGS: [char; 3] = ['.', '!', '?'];

/// Returns `true` if the last character of `word` closes a sentence.
pub fn ends_sentence(word: &str) -> bool {
	word.chars().last().is_some_and(|c| SENTENCE_ENDINGS.contains(&c))
}

/// Start and stop conditions applied by a
/// [`TextGenerator`](super::generator::TextGenerator).
///
/// Both fields are optional in serialized form and fall back to the
/// unconstrained defaults.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Constraints {
	/// Only start from keys whose first word begins with an uppercase letter.
	pub require_capitalized_start: bool,

	/// Soft cap on the output length, in characters.
	///
	/// Once the output is longer than this, the walk only stops on a word
	/// closing a sentence (or on the terminal key) and drops every other word.
	pub max_output_chars: Option<usize>,
}

impl Constraints {
	/// Sets the capitalized start requirement.
	pub fn capitalized_start(mut self, required: bool) -> Self {
		self.require_capitalized_start = required;
		self
	}

	/// Sets the soft output length cap.
	pub fn max_output_chars(mut self, cap: Option<usize>) -> Self {
		self.max_output_chars = cap;
		self
	}
}
