use std::time::Instant;

use log::trace;
use rand::Rng;

use super::chain::ChainTable;
use super::constraints::ends_sentence;
use super::ngram::NGram;
use crate::error::{MarkovError, Result};

/// One sampled successor of a walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
	/// The word was appended to the output.
	Accepted(String),
	/// The output was over its cap and the word does not close a sentence:
	/// the walk moved through it without writing it.
	Skipped(String),
}

/// A random walk over a [`ChainTable`].
///
/// Created by [`TextGenerator::walk`](super::generator::TextGenerator::walk),
/// already seeded with the words of its start key. Each call to `next`
/// samples one successor of the current key and yields a [`Step`]; the
/// iterator ends when the walk reaches the terminal key or, above the length
/// cap, accepts a word closing a sentence.
pub struct Walk<'a, R: Rng + ?Sized> {
	chain: &'a ChainTable,
	rng: &'a mut R,
	key: NGram,
	words: Vec<String>,
	/// Length in chars of `words` joined by single spaces.
	text_len: usize,
	max_output_chars: Option<usize>,
	finished: bool,
}

impl<'a, R: Rng + ?Sized> Walk<'a, R> {
	pub(crate) fn new(chain: &'a ChainTable, rng: &'a mut R, start: NGram, max_output_chars: Option<usize>) -> Self {
		let words = start.words().to_vec();
		let text_len = words.iter().map(|w| w.chars().count()).sum::<usize>() + words.len().saturating_sub(1);
		Self { chain, rng, key: start, words, text_len, max_output_chars, finished: false }
	}

	/// Current key of the walk.
	pub fn key(&self) -> &NGram {
		&self.key
	}

	/// Words written so far.
	pub fn words(&self) -> &[String] {
		&self.words
	}

	/// Output so far, words joined by single spaces.
	pub fn text(&self) -> String {
		self.words.join(" ")
	}

	pub fn is_finished(&self) -> bool {
		self.finished
	}

	fn over_cap(&self) -> bool {
		self.max_output_chars.is_some_and(|cap| self.text_len > cap)
	}

	fn append(&mut self, word: &str) {
		if !self.words.is_empty() {
			self.text_len += 1;
		}
		self.text_len += word.chars().count();
		self.words.push(word.to_owned());
	}

	/// Runs the walk to its end and returns the text.
	///
	/// Never returns if no stop condition is reachable from the current key.
	pub fn finish(mut self) -> String {
		self.by_ref().for_each(drop);
		self.text()
	}

	/// Runs the walk to its end, giving up once `deadline` has passed.
	///
	/// The clock is checked before every step.
	///
	/// # Errors
	/// Returns [`MarkovError::DeadlineExceeded`] with the number of words
	/// written when the deadline was hit.
	pub fn finish_before(mut self, deadline: Instant) -> Result<String> {
		while !self.finished {
			if Instant::now() >= deadline {
				return Err(MarkovError::DeadlineExceeded { words: self.words.len() });
			}
			self.next();
		}
		Ok(self.text())
	}
}

impl<R: Rng + ?Sized> Iterator for Walk<'_, R> {
	type Item = Step;

	fn next(&mut self) -> Option<Step> {
		if self.finished {
			return None;
		}

		let chain = self.chain;
		// Terminal keys have nothing to sample. Every successor extends a
		// window of the corpus, so a missing key cannot come from a built
		// chain either.
		let Some(word) = chain.get(&self.key).and_then(|link| link.sample(&mut *self.rng)) else {
			trace!("walk stops on terminal key '{}'", self.key);
			self.finished = true;
			return None;
		};

		let seeking_stop = self.over_cap();
		self.key = self.key.shift(word);

		if !seeking_stop {
			self.append(word);
			return Some(Step::Accepted(word.to_owned()));
		}

		if ends_sentence(word) {
			self.append(word);
			self.finished = true;
			trace!("walk stops on '{}' after {} chars", word, self.text_len);
			Some(Step::Accepted(word.to_owned()))
		} else {
			Some(Step::Skipped(word.to_owned()))
		}
	}
}
