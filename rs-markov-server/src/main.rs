use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use rs_markov_core::io::{get_filename, join_sources, list_files, normalize_folder, read_source};
use rs_markov_core::{ChainBuilder, ChainTable, Constraints, MarkovError, TextGenerator};

/// Time budget of a single generation.
const GENERATION_BUDGET: Duration = Duration::from_secs(2);

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	n: Option<usize>,
	max_chars: Option<usize>,
	capitalized_start: Option<bool>,
	seed: Option<u64>,
}

#[derive(Deserialize)]
struct CorpusQuery {
	names: Option<String>,
}

struct SharedData {
	data_dir: PathBuf,
	corpus: Arc<str>,
	corpus_names: Vec<String>,
	/// Bumped on every load, so chains built from a replaced corpus are not cached.
	generation: u64,
	/// Chains built from `corpus`, by order.
	chains: HashMap<usize, Arc<ChainTable>>,
}

impl SharedData {
	fn new(data_dir: PathBuf) -> Self {
		Self {
			data_dir,
			corpus: Arc::from(""),
			corpus_names: Vec::new(),
			generation: 0,
			chains: HashMap::new(),
		}
	}
}

impl GenerateParams {
	fn constraints(&self) -> Constraints {
		Constraints::default()
			.capitalized_start(self.capitalized_start.unwrap_or(false))
			.max_output_chars(self.max_chars)
	}

	fn rng(&self) -> StdRng {
		match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		}
	}
}

fn lock_failed() -> HttpResponse {
	HttpResponse::InternalServerError().body("Corpus lock failed")
}

/// Returns the chain of order `n` for the loaded corpus, building it on first use.
///
/// The lock is only held to read or update the cache, never while building.
fn chain_for(data: &Mutex<SharedData>, n: usize) -> Result<Arc<ChainTable>, HttpResponse> {
	let (corpus, generation) = {
		let shared_data = data.lock().map_err(|_| lock_failed())?;
		if shared_data.corpus_names.is_empty() {
			return Err(HttpResponse::BadRequest().body("No corpus loaded"));
		}
		if let Some(chain) = shared_data.chains.get(&n) {
			return Ok(Arc::clone(chain));
		}
		(Arc::clone(&shared_data.corpus), shared_data.generation)
	};

	let chain = ChainBuilder::new(n)
		.and_then(|builder| builder.build(&corpus))
		.map_err(error_response)?;
	info!("built chain of order {} with {} keys", n, chain.len());
	let chain = Arc::new(chain);

	let mut shared_data = data.lock().map_err(|_| lock_failed())?;
	if shared_data.generation == generation {
		shared_data.chains.entry(n).or_insert_with(|| Arc::clone(&chain));
	}
	Ok(chain)
}

fn error_response(err: MarkovError) -> HttpResponse {
	match err {
		MarkovError::InvalidInput(_) | MarkovError::NoValidStart => HttpResponse::BadRequest().body(err.to_string()),
		MarkovError::DeadlineExceeded { .. } => HttpResponse::ServiceUnavailable().body(err.to_string()),
		MarkovError::SourceUnavailable { .. } => HttpResponse::InternalServerError().body(err.to_string()),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a text from the loaded corpus based on query parameters.
/// Returns the generated text as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let chain = match chain_for(&data, query.n.unwrap_or(2)) {
		Ok(chain) => chain,
		Err(resp) => return resp,
	};

	let mut generator = TextGenerator::new(query.rng(), query.constraints());
	let result = generator
		.walk(&chain)
		.and_then(|walk| walk.finish_before(Instant::now() + GENERATION_BUDGET));
	match result {
		Ok(text) => HttpResponse::Ok().body(text),
		Err(e) => {
			warn!("generation failed: {e}");
			error_response(e)
		}
	}
}

#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let data_dir = match data.lock() {
		Ok(m) => m.data_dir.clone(),
		Err(_) => return lock_failed(),
	};
	match list_files(&data_dir, "txt") {
		Ok(files) => {
			let names: Vec<String> = files.iter().filter_map(|file| get_filename(file).ok()).collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return lock_failed(),
	};
	HttpResponse::Ok().body(shared_data.corpus_names.join("\n"))
}

#[put("/v1/load_corpora")]
async fn put_corpora(data: web::Data<Mutex<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let corpus_names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();

	let data_dir = match data.lock() {
		Ok(m) => m.data_dir.clone(),
		Err(_) => return lock_failed(),
	};

	let mut sources = Vec::with_capacity(corpus_names.len());
	for name in &corpus_names {
		match read_source(data_dir.join(format!("{name}.txt"))) {
			Ok(text) => sources.push(text),
			Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load corpus: {e}")),
		}
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return lock_failed(),
	};
	shared_data.corpus = Arc::from(join_sources(&sources));
	shared_data.generation += 1;
	shared_data.corpus_names = corpus_names.iter().map(|s| (*s).to_owned()).collect();
	shared_data.chains.clear();
	info!("loaded corpora: {}", shared_data.corpus_names.join(", "));

	HttpResponse::Ok().body("Corpora loaded successfully")
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_corpora)
		.service(put_corpora)
		.service(get_loaded_corpora);
}

/// Main entry point for the server.
///
/// Wraps the loaded corpus and its chains in a `Mutex` and starts an
/// Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Corpora are `.txt` files of the folder named by `RS_MARKOV_DATA`
///   (default `./data`).
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let data_dir = normalize_folder(&std::env::var("RS_MARKOV_DATA").unwrap_or_else(|_| "./data".to_owned()));
	info!("serving corpora from {}", data_dir.display());
	let shared_data = web::Data::new(Mutex::new(SharedData::new(data_dir)));

	HttpServer::new(move || App::new().app_data(shared_data.clone()).configure(configure))
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
