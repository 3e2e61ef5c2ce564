use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::chain::ChainTable;
use super::constraints::Constraints;
use super::ngram::NGram;
use super::walk::Walk;
use crate::error::{MarkovError, Result};

/// Generates text by walking a [`ChainTable`] at random.
///
/// # Responsibilities
/// - Own the random source used for start selection and sampling
/// - Pick a start key honoring the [`Constraints`]
/// - Drive a [`Walk`] to produce the text
///
/// The generator never mutates the chain, so one table can feed any number of
/// generators.
#[derive(Debug)]
pub struct TextGenerator<R: Rng> {
	rng: R,
	constraints: Constraints,
}

impl<R: Rng> TextGenerator<R> {
	/// Creates a generator drawing from `rng`.
	///
	/// A seeded `rng` (for example `StdRng::seed_from_u64`) makes generation
	/// reproducible for a given chain.
	pub fn new(rng: R, constraints: Constraints) -> Self {
		Self { rng, constraints }
	}

	pub fn constraints(&self) -> &Constraints {
		&self.constraints
	}

	pub fn set_constraints(&mut self, constraints: Constraints) {
		self.constraints = constraints;
	}

	/// Picks the key a walk starts from.
	///
	/// Uniform over every key, or over the keys whose first word is
	/// capitalized when the constraints require it.
	///
	/// # Errors
	/// Returns [`MarkovError::NoValidStart`] if no key qualifies.
	pub fn pick_start(&mut self, chain: &ChainTable) -> Result<NGram> {
		let start = if self.constraints.require_capitalized_start {
			let candidates: Vec<&NGram> = chain.keys().iter().filter(|key| key.starts_capitalized()).collect();
			debug!("{} of {} keys start capitalized", candidates.len(), chain.len());
			candidates.choose(&mut self.rng).map(|key| (*key).clone())
		} else {
			chain.keys().choose(&mut self.rng).cloned()
		};
		start.ok_or(MarkovError::NoValidStart)
	}

	/// Starts a walk over `chain`, seeded with the words of a start key.
	///
	/// # Errors
	/// Returns [`MarkovError::NoValidStart`] if no key qualifies as a start.
	pub fn walk<'a>(&'a mut self, chain: &'a ChainTable) -> Result<Walk<'a, R>> {
		let start = self.pick_start(chain)?;
		debug!("walk starts on '{}'", start);
		Ok(Walk::new(chain, &mut self.rng, start, self.constraints.max_output_chars))
	}

	/// Generates one text from `chain`.
	///
	/// Stops on the terminal key or, once the output is longer than
	/// `max_output_chars`, on the first sampled word closing a sentence. With
	/// no cap and no terminal key reachable from the start, this never
	/// returns; use [`Walk::finish_before`] to bound it.
	///
	/// # Errors
	/// Returns [`MarkovError::NoValidStart`] if no key qualifies as a start.
	pub fn generate(&mut self, chain: &ChainTable) -> Result<String> {
		Ok(self.walk(chain)?.finish())
	}
}

#[cfg(test)]
mod tests {
	use std::time::Instant;

	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::model::chain::build;
	use crate::model::constraints::ends_sentence;
	use crate::model::walk::Step;

	const STORY: &str = "One two three. four five six. seven eight nine.";

	fn generator(seed: u64, constraints: Constraints) -> TextGenerator<StdRng> {
		TextGenerator::new(StdRng::seed_from_u64(seed), constraints)
	}

	#[test]
	fn walk_runs_to_the_end_of_a_linear_corpus() {
		let chain = build("a b c d", 2).unwrap();
		for seed in 0..50 {
			let text = generator(seed, Constraints::default()).generate(&chain).unwrap();
			assert!(["a b c d", "b c d", "c d"].contains(&text.as_str()), "unexpected '{text}'");
		}
	}

	#[test]
	fn output_is_made_of_corpus_transitions() {
		let corpus = "hi there mary hi there juanita";
		let chain = build(corpus, 2).unwrap();
		for seed in 0..50 {
			let text = generator(seed, Constraints::default()).generate(&chain).unwrap();
			assert!(text.ends_with("there juanita"), "unexpected '{text}'");
			let words: Vec<&str> = text.split(' ').collect();
			for window in words.windows(3) {
				let successors = chain.successors(&window[..2]).unwrap();
				assert!(successors.iter().any(|s| s == window[2]));
			}
		}
	}

	#[test]
	fn same_seed_same_text() {
		let chain = build("the cat sat on the mat and the dog sat on the cat and the end", 1).unwrap();
		let first = generator(7, Constraints::default()).generate(&chain).unwrap();
		let second = generator(7, Constraints::default()).generate(&chain).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn capitalized_start() {
		let chain = build(STORY, 1).unwrap();
		let constraints = Constraints::default().capitalized_start(true);
		for seed in 0..20 {
			let text = generator(seed, constraints.clone()).generate(&chain).unwrap();
			assert_eq!(text, STORY);
		}
	}

	#[test]
	fn no_capitalized_key() {
		let chain = build("no capitals here at all", 2).unwrap();
		let mut generator = generator(3, Constraints::default().capitalized_start(true));
		assert!(matches!(generator.generate(&chain), Err(MarkovError::NoValidStart)));
	}

	#[test]
	fn cap_stops_on_sentence_end() {
		let chain = build(STORY, 1).unwrap();
		let constraints = Constraints::default().capitalized_start(true).max_output_chars(Some(5));
		let text = generator(0, constraints).generate(&chain).unwrap();
		assert_eq!(text, "One two three.");
	}

	#[test]
	fn cap_skips_words_while_seeking_a_stop() {
		let chain = build(STORY, 1).unwrap();
		let constraints = Constraints::default().capitalized_start(true).max_output_chars(Some(14));
		let mut generator = generator(0, constraints);
		let steps: Vec<Step> = generator.walk(&chain).unwrap().collect();

		assert_eq!(
			steps,
			[
				Step::Accepted("two".into()),
				Step::Accepted("three.".into()),
				Step::Accepted("four".into()),
				Step::Skipped("five".into()),
				Step::Accepted("six.".into()),
			]
		);
		let text = generator.generate(&chain).unwrap();
		assert_eq!(text, "One two three. four six.");
	}

	#[test]
	fn cap_gives_way_to_terminal_key() {
		let chain = build("One two three four", 1).unwrap();
		let constraints = Constraints::default().capitalized_start(true).max_output_chars(Some(3));
		let text = generator(0, constraints).generate(&chain).unwrap();
		assert_eq!(text, "One two");
	}

	#[test]
	fn cap_with_bigram_keys() {
		let corpus = "One two three four. five six seven.";
		let chain = build(corpus, 2).unwrap();

		let constraints = Constraints::default().capitalized_start(true).max_output_chars(Some(9));
		assert_eq!(generator(0, constraints).generate(&chain).unwrap(), "One two three four.");

		// Skipped words still move the key: (three, four.) -> (four., five) -> (five, six).
		let constraints = Constraints::default().capitalized_start(true).max_output_chars(Some(13));
		let mut generator = generator(0, constraints);
		let steps: Vec<Step> = generator.walk(&chain).unwrap().collect();
		assert_eq!(
			steps,
			[
				Step::Accepted("three".into()),
				Step::Accepted("four.".into()),
				Step::Skipped("five".into()),
				Step::Skipped("six".into()),
				Step::Accepted("seven.".into()),
			]
		);
		assert_eq!(generator.generate(&chain).unwrap(), "One two three four. seven.");
	}

	#[test]
	fn capped_bigram_output_is_short_or_ends_a_sentence() {
		let corpus = "The sun rose and the birds sang. The birds sang and it was warm! \
			Was it warm and the sun rose? The sun was warm and the birds sang and it rose";
		let chain = build(corpus, 2).unwrap();
		let cap = 25;
		for seed in 0..100 {
			let mut generator = generator(seed, Constraints::default().max_output_chars(Some(cap)));
			let mut walk = generator.walk(&chain).unwrap();
			walk.by_ref().for_each(drop);
			let reached_terminal = walk.key() == chain.terminal_key().unwrap();
			let text = walk.text();
			assert!(
				text.chars().count() <= cap || ends_sentence(&text) || reached_terminal,
				"seed {seed}: '{text}'"
			);
		}
	}

	#[test]
	fn capped_output_is_short_or_ends_a_sentence() {
		let corpus = "The sun rose. It was warm and the birds sang! Was it spring? \
			The birds sang and the sun was warm. It rose and it sang and it was spring";
		let chain = build(corpus, 1).unwrap();
		let cap = 20;
		for seed in 0..100 {
			let mut generator = generator(seed, Constraints::default().max_output_chars(Some(cap)));
			let mut walk = generator.walk(&chain).unwrap();
			walk.by_ref().for_each(drop);
			let reached_terminal = walk.key() == chain.terminal_key().unwrap();
			let text = walk.text();
			assert!(
				text.chars().count() <= cap || ends_sentence(&text) || reached_terminal,
				"seed {seed}: '{text}'"
			);
		}
	}

	#[test]
	fn expired_deadline() {
		let chain = build(STORY, 1).unwrap();
		let mut generator = generator(0, Constraints::default().capitalized_start(true));
		let walk = generator.walk(&chain).unwrap();
		assert!(matches!(
			walk.finish_before(Instant::now()),
			Err(MarkovError::DeadlineExceeded { words: 1 })
		));
	}

	#[test]
	fn deadline_not_reached() {
		let chain = build(STORY, 1).unwrap();
		let mut generator = generator(0, Constraints::default().capitalized_start(true));
		let deadline = Instant::now() + std::time::Duration::from_secs(60);
		assert_eq!(generator.walk(&chain).unwrap().finish_before(deadline).unwrap(), STORY);
	}
}
