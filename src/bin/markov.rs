use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::{info, trace};
use markov::config::DEFAULT_MODEL_CAPACITY;
use markov::byte_matrix::ByteMatrix;
use markov::{HashKind, MarkovError, MarkovModel, ModelConfig, State, Tokenizer, generate_joined};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Fits a Markov chain on text files and prints a generated sequence
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Words per state
    #[arg(short = 'n', long, default_value_t = 1)]
    order: usize,

    /// Use single characters as states instead of words
    #[arg(short, long)]
    chars: bool,

    /// Count raw byte pairs in a dense matrix instead of fitting a model
    #[arg(short, long, conflicts_with_all = ["chars", "order"])]
    bytes: bool,

    /// Number of states to generate
    #[arg(short, long, default_value_t = 50)]
    length: usize,

    /// Seed for a reproducible walk
    #[arg(short, long)]
    seed: Option<u64>,

    /// State to start from, instead of the beginning of a text
    #[arg(long)]
    start: Option<String>,

    #[arg(long, default_value_t = HashKind::Djb2)]
    hash: HashKind,

    /// Initial bucket count of the state table
    #[arg(long, default_value_t = DEFAULT_MODEL_CAPACITY)]
    capacity: usize,

    /// Print table statistics to stderr
    #[arg(long)]
    stats: bool,

    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().init();

    let args = Args::parse();
    trace!("{:#?}", args);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    if args.bytes {
        return run_bytes(&args, &mut rng);
    }

    let tokenizer = if args.chars {
        Tokenizer::Chars
    } else {
        Tokenizer::ngrams(args.order)?
    };

    let config = ModelConfig::default()
        .with_model_capacity(args.capacity)
        .with_hash(args.hash);
    let mut model = MarkovModel::with_config(config)?;

    for path in &args.files {
        let tokens = tokenizer.tokens_from_file(path)?;
        let consumed = model.fit_more(&tokens)?;
        info!(target: "fit", "{}: {} tokens", path.display(), consumed);
    }

    let initial = args.start.as_deref().map_or(State::Start, State::Token);
    let text = generate_joined(&model, initial, args.length, &tokenizer.join_policy(), &mut rng);
    println!("{text}");

    if args.stats {
        eprintln!(
            "{} states, {} transitions, {} buckets ({}), {} collisions, longest chain {}",
            model.len(),
            model.transition_count(),
            model.capacity(),
            model.config().hash,
            model.collisions(),
            model.longest_chain(),
        );
    }

    Ok(())
}

/// Byte level walk: starts from the first byte of `--start`, or of the first
/// non-empty file
fn run_bytes(args: &Args, rng: &mut StdRng) -> Result<(), Box<dyn Error>> {
    let mut matrix = ByteMatrix::new();
    let mut first = None;

    for path in &args.files {
        let bytes = fs::read(path).map_err(|source| MarkovError::Read {
            path: path.clone(),
            source,
        })?;
        matrix.fit(&bytes);
        first = first.or(bytes.first().copied());
        info!(target: "fit", "{}: {} bytes", path.display(), bytes.len());
    }

    let start = args.start.as_deref().and_then(|s| s.bytes().next()).or(first);
    let mut out = Vec::new();
    if let Some(start) = start {
        out.push(start);
        out.extend(matrix.generate(start, args.length, rng));
    }
    println!("{}", String::from_utf8_lossy(&out));

    if args.stats {
        eprintln!("{:?}", matrix);
    }

    Ok(())
}
