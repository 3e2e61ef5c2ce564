use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::io::load_corpus;
use rs_markov_core::{ChainBuilder, Constraints, TextGenerator};

/// Generates text from a word-level Markov chain trained on text files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Number of words per chain key
	#[arg(value_name = "N")]
	n: usize,

	/// Text files to train on, concatenated in order
	#[arg(required = true, value_name = "FILES")]
	files: Vec<PathBuf>,

	/// Only start from words beginning with an uppercase letter
	#[arg(short = 'c', long)]
	capitalized_start: bool,

	/// Past this many characters, stop on the next word ending a sentence
	#[arg(short = 'm', long, value_name = "CHARS")]
	max_chars: Option<usize>,

	/// Seed for reproducible output
	#[arg(short, long, value_name = "SEED")]
	seed: Option<u64>,

	/// Append a random sentence ending to files that lack one
	#[arg(short, long)]
	punctuate: bool,

	/// Give up on a text after this many milliseconds
	#[arg(short, long, value_name = "MS")]
	timeout_ms: Option<u64>,

	/// Number of texts to generate, one per line
	#[arg(long, value_name = "COUNT", default_value_t = 1)]
	count: usize,

	/// Increase verbosity (-v, -vv)
	#[arg(short = 'v', long, action = ArgAction::Count)]
	verbose: u8,

	/// Decrease verbosity (-q, -qq)
	#[arg(short = 'q', long, action = ArgAction::Count)]
	quiet: u8,
}

impl Cli {
	fn constraints(&self) -> Constraints {
		Constraints::default()
			.capitalized_start(self.capitalized_start)
			.max_output_chars(self.max_chars)
	}

	fn rng(&self) -> StdRng {
		match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		}
	}
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);
	run(&cli)
}

fn verbosity_level(verbose: u8, quiet: u8) -> LevelFilter {
	match (quiet, verbose) {
		(0, 0) => LevelFilter::Warn,
		(0, 1) => LevelFilter::Info,
		(0, 2) => LevelFilter::Debug,
		(0, _) => LevelFilter::Trace,
		_ => LevelFilter::Error,
	}
}

/// `RUST_LOG`, when set, takes precedence over `-v`/`-q`.
fn init_logging(verbose: u8, quiet: u8) {
	let mut builder = if std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some() {
		env_logger::Builder::from_env(Env::default())
	} else {
		let mut builder = env_logger::Builder::new();
		builder.filter_level(verbosity_level(verbose, quiet));
		builder
	};
	builder.format_timestamp_millis();
	let _ = builder.try_init();
}

fn run(cli: &Cli) -> Result<()> {
	let mut rng = cli.rng();

	let corpus = load_corpus(cli.files.as_slice(), cli.punctuate, &mut rng).context("unable to load corpus")?;
	let chain = ChainBuilder::new(cli.n)
		.and_then(|builder| builder.build(&corpus))
		.with_context(|| format!("unable to build a chain of order {}", cli.n))?;
	info!("chain of order {} with {} keys from {} file(s)", chain.order(), chain.len(), cli.files.len());

	let mut generator = TextGenerator::new(rng, cli.constraints());
	for _ in 0..cli.count {
		let walk = generator.walk(&chain).context("unable to start generation")?;
		let text = match cli.timeout_ms {
			Some(ms) => walk
				.finish_before(Instant::now() + Duration::from_millis(ms))
				.context("generation timed out")?,
			None => walk.finish(),
		};
		println!("{text}");
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn cli_definition_is_valid() {
		Cli::command().debug_assert();
	}

	#[test]
	fn flags_map_to_constraints() {
		let cli = Cli::try_parse_from(["rs-markov-cli", "-c", "-m", "140", "2", "a.txt", "b.txt"]).unwrap();
		assert_eq!(cli.n, 2);
		assert_eq!(cli.files.len(), 2);
		assert_eq!(cli.constraints(), Constraints::default().capitalized_start(true).max_output_chars(Some(140)));
	}

	#[test]
	fn verbosity_flags() {
		assert_eq!(verbosity_level(0, 0), LevelFilter::Warn);
		assert_eq!(verbosity_level(2, 0), LevelFilter::Debug);
		assert_eq!(verbosity_level(5, 0), LevelFilter::Trace);
		assert_eq!(verbosity_level(3, 1), LevelFilter::Error);
	}

	#[test]
	fn files_are_required() {
		assert!(Cli::try_parse_from(["rs-markov-cli", "2"]).is_err());
	}
}
