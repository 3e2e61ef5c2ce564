//! Word-level n-gram Markov text generation.
//!
//! This crate provides:
//! - Chain construction from whitespace-separated text (`ChainBuilder`)
//! - Random walks over the chain with start and stop constraints
//!   (`TextGenerator`, `Walk`)
//! - Corpus loading helpers for the binaries (`io`)
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use rs_markov_core::{ChainBuilder, Constraints, TextGenerator};
//!
//! # fn main() -> rs_markov_core::Result<()> {
//! let chain = ChainBuilder::new(2)?.build("hi there mary hi there juanita")?;
//! let mut generator = TextGenerator::new(StdRng::seed_from_u64(7), Constraints::default());
//! println!("{}", generator.generate(&chain)?);
//! # Ok(())
//! # }
//! ```

/// Error type and result alias.
pub mod error;

/// Chain construction and generation.
pub mod model;

/// Corpus loading (file reading, punctuation policy, concatenation)
/// and data folder helpers.
pub mod io;

pub use error::{MarkovError, Result};
pub use model::chain::{ChainBuilder, ChainTable, build};
pub use model::constraints::Constraints;
pub use model::generator::TextGenerator;
pub use model::link::Link;
pub use model::ngram::NGram;
pub use model::walk::{Step, Walk};
