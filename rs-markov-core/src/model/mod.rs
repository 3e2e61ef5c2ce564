//! Word-level Markov chain: construction and traversal.
//!
//! - N-gram keys (`NGram`)
//! - What a key leads to (`Link`)
//! - The trained table and its builder (`ChainTable`, `ChainBuilder`)
//! - Start and stop conditions (`Constraints`)
//! - Random walks and the high-level generator (`Walk`, `TextGenerator`)

/// Chain table and the builder producing it from raw text.
///
/// Pure construction: no randomness, no I/O.
pub mod chain;

/// Generation constraints (capitalized start, soft length cap).
pub mod constraints;

/// High-level generator owning the injected random source.
pub mod generator;

/// Successor list or terminal marker attached to each key.
pub mod link;

/// Fixed-length word sequence used as a chain key.
pub mod ngram;

/// Step-wise random walk over a chain table.
pub mod walk;
