use rand::Rng;
use rand::seq::IndexedRandom;

/// What a key of the chain leads to.
///
/// Conceptually, a node in a Markov chain whose outgoing edges are the
/// observed successor words.
///
/// ## Invariants
/// - `Successors` is never empty
/// - Duplicates are kept: a word seen three times after a key appears three
///   times, which is the only frequency weighting the chain has
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Link {
	/// Words observed right after the key, in corpus order.
	Successors(Vec<String>),
	/// The key only closes the corpus: a walk reaching it stops.
	Terminal,
}

impl Link {
	/// Records one more observed successor.
	///
	/// Only called while building, before the last window is marked terminal.
	pub(crate) fn push(&mut self, word: &str) {
		debug_assert!(!self.is_terminal(), "successor pushed onto a terminal link");
		if let Link::Successors(words) = self {
			words.push(word.to_owned());
		}
	}

	/// Returns `true` for the terminal marker.
	pub fn is_terminal(&self) -> bool {
		matches!(self, Link::Terminal)
	}

	/// Uniformly picks one successor, duplicates included.
	///
	/// Returns `None` for the terminal marker.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		match self {
			Link::Successors(words) => words.choose(rng).map(String::as_str),
			Link::Terminal => None,
		}
	}
}
