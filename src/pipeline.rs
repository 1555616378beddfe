//! Per-document preprocessing pipeline.
//!
//! Runs the stages in their required order — span extraction, gold
//! alignment, clustering, rewriting, windowing, vocabulary mapping — and
//! produces the per-entity window representation the scoring model
//! consumes. Documents are independent; nothing here is shared across
//! documents except the borrowed vocabularies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::align::{align, retain_aligned};
use crate::cluster::cluster;
use crate::error::{Error, Result};
use crate::ingest::{flatten_tokens, AnnotatedDocument};
use crate::rewrite::rewrite;
use crate::spans::extract_spans;
use crate::token::{remove_empty_tokens, Token};
use crate::vocab::{TokenIds, VocabMapper, Vocabulary};
use crate::window::WindowExtractor;

/// The model-ready form of one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRepresentation {
    /// Per cluster label, the id-triple sequences of its mention windows.
    pub windows: HashMap<String, Vec<Vec<TokenIds>>>,
    /// Per cluster label, whether it aligned with a salient gold entity.
    pub salience: HashMap<String, bool>,
}

/// Pipeline driver tying the stages together for one vocabulary set.
#[derive(Debug, Clone)]
pub struct Preprocessor<'a> {
    extractor: WindowExtractor,
    mapper: VocabMapper<'a>,
}

impl<'a> Preprocessor<'a> {
    /// Create a preprocessor with the default window extractor.
    #[must_use]
    pub fn new(words: &'a Vocabulary, postags: &'a Vocabulary, entities: &'a Vocabulary) -> Self {
        Self {
            extractor: WindowExtractor::new(),
            mapper: VocabMapper::new(words, postags, entities),
        }
    }

    /// Replace the window extractor configuration.
    #[must_use]
    pub fn with_extractor(mut self, extractor: WindowExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Rewrite a document's token stream and return it with its clustered,
    /// gold-aligned spans.
    ///
    /// This is the pipeline up to (and including) the rewriting stage:
    /// the returned stream has entity mentions collapsed to `@entityN`
    /// markers and blanked tokens already removed. Fails with
    /// [`Error::NotAnnotated`] when the document has no `nlp_data`.
    pub fn rewritten_tokens(
        &self,
        document: &AnnotatedDocument,
    ) -> Result<(Vec<Token>, Vec<crate::spans::EntitySpan>)> {
        let nlp_data = document.nlp_data.as_ref().ok_or(Error::NotAnnotated)?;
        let mut tokens = flatten_tokens(nlp_data);

        let mut spans = extract_spans(&tokens);
        log::debug!("extracted {} spans", spans.len());

        let gold = document.gold_entities();
        align(&gold, &mut spans);
        let mut spans = retain_aligned(spans);
        log::debug!("{} spans aligned with gold entities", spans.len());

        cluster(&mut spans);
        rewrite(&mut tokens, &mut spans)?;
        Ok((remove_empty_tokens(tokens), spans))
    }

    /// Run the full pipeline on one document.
    pub fn preprocess(&self, document: &AnnotatedDocument) -> Result<DocumentRepresentation> {
        let (tokens, spans) = self.rewritten_tokens(document)?;

        // Distinct labels in document order; clusters with several mentions
        // contribute one entry with one window per mention.
        let mut labels: Vec<String> = Vec::new();
        let mut salience = HashMap::new();
        for span in &spans {
            let Some(label) = span.label.clone() else { continue };
            let aligned = span.aligned_with.as_deref().unwrap_or_default();
            let salient = document.salient_entities.iter().any(|s| s == aligned);
            if !labels.contains(&label) {
                labels.push(label.clone());
            }
            // First mention of a cluster decides the flag.
            salience.entry(label).or_insert(salient);
        }

        let mut windows = HashMap::new();
        for label in labels {
            let label_windows = self.extractor.windows(&label, &tokens);
            let mapped: Vec<Vec<TokenIds>> = label_windows
                .iter()
                .map(|w| self.mapper.map_window(w))
                .collect();
            windows.insert(label, mapped);
        }

        Ok(DocumentRepresentation { windows, salience })
    }
}
