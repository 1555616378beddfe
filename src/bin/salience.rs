//! salience - entity-span preprocessing CLI
//!
//! Turns annotated JSON documents into the per-entity window representation
//! the scoring model consumes.
//!
//! # Usage
//!
//! ```bash
//! # Full preprocessing with a GloVe embedding file
//! salience preprocess doc.json --embeddings glove.6B.50d.txt
//!
//! # Inspect detected spans and cluster labels
//! salience spans doc.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use salience::{load_document, load_embeddings, Preprocessor, Vocabulary, WindowExtractor};

/// Entity-span preprocessing for salient-entity scoring
#[derive(Parser)]
#[command(name = "salience")]
#[command(
    author,
    version,
    about = "Entity-span preprocessing for salient-entity scoring",
    long_about = r#"
salience - entity-span preprocessing

Detects entity mentions from NER tags, clusters equivalent mentions under
canonical @entityN labels, rewrites the token stream with entity markers and
extracts fixed-width, vocabulary-encoded context windows per mention.

EXAMPLES:
  salience preprocess doc.json --embeddings glove.6B.50d.txt
  salience spans doc.json
"#
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and emit the window representation as JSON
    #[command(visible_alias = "p")]
    Preprocess(PreprocessArgs),

    /// Show detected spans, gold alignment and cluster labels
    #[command(visible_alias = "s")]
    Spans(SpansArgs),
}

#[derive(clap::Args)]
struct PreprocessArgs {
    /// Annotated JSON document
    input: PathBuf,

    /// Whitespace-delimited word embedding file (GloVe format)
    #[arg(long)]
    embeddings: PathBuf,

    /// Tokens taken before each mention
    #[arg(long, default_value_t = 15)]
    pre: usize,

    /// Tokens taken after each mention
    #[arg(long, default_value_t = 15)]
    post: usize,

    /// Keep cluster labels in windows instead of masking them to @target
    #[arg(long)]
    no_mask: bool,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct SpansArgs {
    /// Annotated JSON document
    input: PathBuf,
}

fn run_preprocess(args: &PreprocessArgs) -> salience::Result<()> {
    let document = load_document(&args.input)?;
    let (words, _weights) = load_embeddings(&args.embeddings)?;
    let postags = Vocabulary::postags();
    let entities = Vocabulary::entities(salience::vocab::DEFAULT_ENTITY_COUNT);

    let extractor = WindowExtractor::new()
        .with_sizes(args.pre, args.post)
        .mask_target(!args.no_mask);
    let preprocessor = Preprocessor::new(&words, &postags, &entities).with_extractor(extractor);

    let representation = preprocessor.preprocess(&document)?;
    let rendered = serde_json::to_string_pretty(&representation)?;
    match &args.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }
    Ok(())
}

fn run_spans(args: &SpansArgs) -> salience::Result<()> {
    let document = load_document(&args.input)?;

    // Vocabularies are irrelevant for the span view; empty ones suffice.
    let words = Vocabulary::from_items(std::iter::empty::<String>());
    let postags = Vocabulary::postags();
    let entities = Vocabulary::entities(salience::vocab::DEFAULT_ENTITY_COUNT);
    let preprocessor = Preprocessor::new(&words, &postags, &entities);

    let (_, spans) = preprocessor.rewritten_tokens(&document)?;
    if spans.is_empty() {
        eprintln!("no gold-aligned entity spans found");
        return Ok(());
    }
    for span in &spans {
        println!(
            "{}\t{}\t(sentence {}, tokens {}-{})\taligned with {:?}",
            span.label.as_deref().unwrap_or("-"),
            span.text(),
            span.sentence(),
            span.first_index(),
            span.last_index(),
            span.aligned_with.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Preprocess(args) => run_preprocess(args),
        Commands::Spans(args) => run_spans(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
