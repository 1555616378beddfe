//! # salience
//!
//! Entity-span preprocessing for salient-entity scoring models.
//!
//! Takes NLP-annotated documents (sentence-segmented, POS- and NER-tagged
//! tokens) and produces the fixed-width, integer-encoded context windows a
//! scoring model trains on:
//!
//! - **Span extraction**: contiguous non-outside NER runs become entity
//!   spans ([`spans`])
//! - **Alignment**: spans are matched against gold entity strings by
//!   normalized text ([`align`], [`normalize`])
//! - **Clustering**: equivalent mentions share one canonical `@entityN`
//!   label ([`cluster`])
//! - **Rewriting**: each mention collapses to a single marker token
//!   ([`rewrite`])
//! - **Windowing**: every mention yields a padded `pre + 1 + post` context
//!   window with the target masked ([`window`])
//! - **Vocabulary mapping**: window tokens become `(word, pos, entity)` id
//!   triples ([`vocab`])
//!
//! ## Quick start
//!
//! ```
//! use salience::{Preprocessor, Vocabulary};
//!
//! let words = Vocabulary::from_items(["the", "capital", "of", "france"]);
//! let postags = Vocabulary::postags();
//! let entities = Vocabulary::entities(127);
//!
//! let preprocessor = Preprocessor::new(&words, &postags, &entities);
//! let document = serde_json::from_str(r#"{
//!     "text": "Paris is the capital of France.",
//!     "nlp_data": {"sentences": [{"tokens": [
//!         {"originalText": "Paris", "ner": "LOCATION", "pos": "NNP"},
//!         {"originalText": "is", "ner": "O", "pos": "VBZ"},
//!         {"originalText": "the", "ner": "O", "pos": "DT"},
//!         {"originalText": "capital", "ner": "O", "pos": "NN"},
//!         {"originalText": "of", "ner": "O", "pos": "IN"},
//!         {"originalText": "France", "ner": "LOCATION", "pos": "NNP"},
//!         {"originalText": ".", "ner": "O", "pos": "."}
//!     ]}]},
//!     "salient_entities": ["Paris"],
//!     "nonsalient_entities": ["France"]
//! }"#).unwrap();
//!
//! let representation = preprocessor.preprocess(&document).unwrap();
//! assert_eq!(representation.windows.len(), 2);
//! assert!(representation.salience["@entity1"]);
//! assert!(!representation.salience["@entity2"]);
//! ```
//!
//! The pipeline is synchronous and single-threaded; documents are
//! independent and may be fanned out across threads by an external driver.

pub mod align;
pub mod cluster;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod pipeline;
pub mod rewrite;
pub mod spans;
pub mod token;
pub mod vocab;
pub mod window;

pub use align::{align, retain_aligned};
pub use cluster::cluster;
pub use error::{Error, Result};
pub use ingest::{flatten_tokens, load_document, AnnotatedDocument, CorefMention, NlpData};
pub use normalize::{fold, normalize};
pub use pipeline::{DocumentRepresentation, Preprocessor};
pub use rewrite::{rewrite, rewrite_coref_clusters};
pub use spans::{extract_spans, EntitySpan};
pub use token::{
    entity_label, remove_empty_tokens, Token, OUTSIDE_TAG, PAD_TOKEN, TARGET_MARKER, UNK_TOKEN,
};
pub use vocab::{load_embeddings, TokenIds, VocabMapper, Vocabulary};
pub use window::WindowExtractor;
