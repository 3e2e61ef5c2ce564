use std::collections::HashMap;

use log::debug;

use super::link::Link;
use super::ngram::NGram;
use crate::error::{MarkovError, Result};

/// Trained word-level Markov chain.
///
/// Maps every n-gram of the corpus to the words observed after it, or to the
/// terminal marker for the n-gram closing the corpus.
///
/// # Invariants
/// - Every key has exactly `order` words
/// - Exactly one key maps to [`Link::Terminal`]: the last window of the corpus
/// - `keys` holds every key of `links` once, in first-seen corpus order, so a
///   seeded random source gives the same walk on every run
#[derive(Clone, Debug)]
pub struct ChainTable {
	order: usize,
	links: HashMap<NGram, Link>,
	keys: Vec<NGram>,
}

impl ChainTable {
	fn with_order(order: usize) -> Self {
		Self { order, links: HashMap::new(), keys: Vec::new() }
	}

	/// Number of words per key.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Keys in first-seen corpus order.
	pub fn keys(&self) -> &[NGram] {
		&self.keys
	}

	/// Looks up the link of a key.
	///
	/// Accepts an [`NGram`] or a plain `[String]` slice.
	pub fn get<K>(&self, key: &K) -> Option<&Link>
	where
		NGram: std::borrow::Borrow<K>,
		K: std::hash::Hash + Eq + ?Sized,
	{
		self.links.get(key)
	}

	/// Successor list of a key, `None` if the key is unknown or terminal.
	pub fn successors<S: AsRef<str>>(&self, words: &[S]) -> Option<&[String]> {
		match self.links.get(&NGram::from_words(words))? {
			Link::Successors(successors) => Some(successors),
			Link::Terminal => None,
		}
	}

	/// Returns `true` if the key maps to the terminal marker.
	pub fn is_terminal<S: AsRef<str>>(&self, words: &[S]) -> bool {
		self.links
			.get(&NGram::from_words(words))
			.is_some_and(Link::is_terminal)
	}

	/// The key closing the corpus.
	pub fn terminal_key(&self) -> Option<&NGram> {
		self.keys
			.iter()
			.find(|key| self.links.get(*key).is_some_and(Link::is_terminal))
	}

	fn push_successor(&mut self, key: NGram, word: &str) {
		match self.links.get_mut(&key) {
			Some(link) => link.push(word),
			None => {
				self.links.insert(key.clone(), Link::Successors(vec![word.to_owned()]));
				self.keys.push(key);
			}
		}
	}

	/// Marks `key` as terminal, dropping any successors recorded for it.
	fn terminate(&mut self, key: NGram) {
		if self.links.insert(key.clone(), Link::Terminal).is_none() {
			self.keys.push(key);
		}
	}
}

/// Builds [`ChainTable`]s of a fixed order from raw text.
///
/// Pure: no randomness, no I/O. Building twice from the same text gives the
/// same keys in the same order with the same successor lists.
#[derive(Clone, Copy, Debug)]
pub struct ChainBuilder {
	n: usize,
}

impl ChainBuilder {
	/// Creates a builder for n-grams of `n` words.
	///
	/// # Errors
	/// Returns [`MarkovError::InvalidInput`] if `n == 0`.
	pub fn new(n: usize) -> Result<Self> {
		if n == 0 {
			return Err(MarkovError::InvalidInput("n must be >= 1".to_owned()));
		}
		Ok(Self { n })
	}

	pub fn order(&self) -> usize {
		self.n
	}

	/// Splits `corpus` on whitespace and records every window of `n` words.
	///
	/// Each window but the last maps to the word following it. The last window
	/// maps to [`Link::Terminal`], replacing the successors of any earlier
	/// occurrence of the same words.
	///
	/// # Errors
	/// Returns [`MarkovError::InvalidInput`] if the corpus has fewer than
	/// `n + 1` words.
	pub fn build(&self, corpus: &str) -> Result<ChainTable> {
		let n = self.n;
		let tokens: Vec<&str> = corpus.split_whitespace().collect();
		// n may be usize::MAX, so no `n + 1` here.
		if tokens.len() <= n {
			return Err(MarkovError::InvalidInput(format!(
				"corpus has {} words, more than n = {} are needed",
				tokens.len(),
				n
			)));
		}

		let last = tokens.len() - n;
		let mut table = ChainTable::with_order(n);
		for (i, window) in tokens.windows(n).enumerate() {
			let key = NGram::from_words(window);
			if i == last {
				table.terminate(key);
			} else {
				table.push_successor(key, tokens[i + n]);
			}
		}

		debug!("built chain of order {} from {} words: {} keys", n, tokens.len(), table.len());
		Ok(table)
	}
}

/// Shorthand for `ChainBuilder::new(n)?.build(corpus)`.
pub fn build(corpus: &str, n: usize) -> Result<ChainTable> {
	ChainBuilder::new(n)?.build(corpus)
}
