//! Error type shared by chain construction, generation and corpus loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T, E = MarkovError> = std::result::Result<T, E>;

/// Failures surfaced by the builder, the generator and the corpus loader.
///
/// None of these are retried internally: the caller decides what to do.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// The order is zero or the corpus is too short for the requested order.
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// No key of the chain satisfies the start constraint.
	#[error("no valid start: no key of the chain satisfies the start constraint")]
	NoValidStart,

	/// A corpus source could not be read.
	#[error("source unavailable {path:?}: {source}")]
	SourceUnavailable {
		/// Path of the source that failed.
		path: PathBuf,
		/// Underlying I/O error.
		source: std::io::Error,
	},

	/// A deadline-bounded walk ran out of time.
	#[error("deadline exceeded after {words} words")]
	DeadlineExceeded {
		/// Number of words produced before the deadline was hit.
		words: usize,
	},
}

impl MarkovError {
	/// Wraps an I/O error with the path it happened on.
	pub fn source_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::SourceUnavailable { path: path.into(), source }
	}
}
