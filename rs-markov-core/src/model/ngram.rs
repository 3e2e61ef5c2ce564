use std::borrow::Borrow;
use std::fmt;

/// An ordered sequence of `n` consecutive corpus words.
///
/// Used as the lookup key of a [`ChainTable`](super::chain::ChainTable).
/// Equality and hashing follow the exact word strings, so `"Hi"` and `"hi"`,
/// or `"there"` and `"there,"`, are different words.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NGram {
	words: Box<[String]>,
}

impl NGram {
	/// Builds a key from a slice of words.
	pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
		Self {
			words: words.iter().map(|w| w.as_ref().to_owned()).collect(),
		}
	}

	/// Words of the key, oldest first.
	pub fn words(&self) -> &[String] {
		&self.words
	}

	/// Number of words in the key.
	pub fn order(&self) -> usize {
		self.words.len()
	}

	/// First (oldest) word of the key.
	pub fn first(&self) -> Option<&str> {
		self.words.first().map(String::as_str)
	}

	/// Returns `true` if the first word begins with an uppercase letter.
	pub fn starts_capitalized(&self) -> bool {
		self.first()
			.and_then(|w| w.chars().next())
			.is_some_and(char::is_uppercase)
	}

	/// Next key of a walk: drops the oldest word and appends `word`.
	pub fn shift(&self, word: &str) -> Self {
		let mut words = Vec::with_capacity(self.words.len());
		words.extend(self.words.iter().skip(1).cloned());
		words.push(word.to_owned());
		Self { words: words.into_boxed_slice() }
	}
}

impl Borrow<[String]> for NGram {
	fn borrow(&self) -> &[String] {
		&self.words
	}
}

impl fmt::Display for NGram {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.words.join(" "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shift_drops_oldest_word() {
		let key = NGram::from_words(&["hi", "there"]);
		assert_eq!(key.shift("mary"), NGram::from_words(&["there", "mary"]));
	}

	#[test]
	fn shift_of_unigram_replaces_word() {
		let key = NGram::from_words(&["hi"]);
		assert_eq!(key.shift("there").words(), ["there"]);
	}

	#[test]
	fn capitalization_looks_at_first_word_only() {
		assert!(NGram::from_words(&["Hi", "there"]).starts_capitalized());
		assert!(!NGram::from_words(&["hi", "There"]).starts_capitalized());
		assert!(!NGram::from_words(&["\"Hi", "there"]).starts_capitalized());
		assert!(NGram::from_words(&["Été", "là"]).starts_capitalized());
	}

	#[test]
	fn display_joins_with_spaces() {
		assert_eq!(NGram::from_words(&["a", "b", "c"]).to_string(), "a b c");
	}
}
