use std::path::{Path, PathBuf};
use std::{env, fs, io};

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{MarkovError, Result};
use crate::model::constraints::{SENTENCE_ENDINGS, ends_sentence};

/// Reads a whole text file.
///
/// # Errors
/// Returns [`MarkovError::SourceUnavailable`] if the file cannot be opened or
/// is not valid UTF-8.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String> {
	let path = path.as_ref();
	let text = fs::read_to_string(path).map_err(|e| MarkovError::source_unavailable(path, e))?;
	debug!("read {} bytes from {}", text.len(), path.display());
	Ok(text)
}

/// Makes sure `text` ends with a sentence ending.
///
/// Trailing whitespace is dropped. If the last word does not already end with
/// `.`, `!` or `?`, one of them is picked at random and appended.
/// Empty text is returned as is.
pub fn ensure_terminal_punctuation<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
	let trimmed = text.trim_end();
	if trimmed.is_empty() || ends_sentence(trimmed) {
		return trimmed.to_owned();
	}
	let mut punctuated = trimmed.to_owned();
	if let Some(mark) = SENTENCE_ENDINGS.choose(rng) {
		punctuated.push(*mark);
	}
	punctuated
}

/// Concatenates sources into one corpus, a newline between each.
///
/// Nothing marks the joint: the chain will see windows spanning two sources.
pub fn join_sources<S: AsRef<str>>(sources: &[S]) -> String {
	sources.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n")
}

/// Reads every path and joins them into one corpus.
///
/// With `punctuate`, each source goes through [`ensure_terminal_punctuation`]
/// before joining.
///
/// # Errors
/// Returns [`MarkovError::SourceUnavailable`] on the first unreadable path.
pub fn load_corpus<P, R>(paths: &[P], punctuate: bool, rng: &mut R) -> Result<String>
where
	P: AsRef<Path>,
	R: Rng + ?Sized,
{
	let mut sources = Vec::with_capacity(paths.len());
	for path in paths {
		let text = read_source(path)?;
		sources.push(if punctuate { ensure_terminal_punctuation(&text, rng) } else { text });
	}
	Ok(join_sources(&sources))
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/story.txt"` → `"story"`
/// - `"story.txt"` → `"story"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
