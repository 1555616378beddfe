//! Annotated-document ingestion.
//!
//! Serde model of the persisted JSON document format: raw `text`, the
//! annotation service's output under `nlp_data`, and the per-document gold
//! entity lists. [`flatten_tokens`] turns the sentence-segmented annotation
//! structure into the flat token stream the pipeline operates on, with
//! 1-based sentence and in-sentence indices.
//!
//! Missing token fields fail the whole document at decode time; span and
//! window alignment depend on precise indices, so defaulting is never safe.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::token::Token;

/// A persisted document, annotated or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    /// Raw document text.
    pub text: String,
    /// Annotation service output; `None` until the document is annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nlp_data: Option<NlpData>,
    /// Gold surface forms of salient entities.
    #[serde(default)]
    pub salient_entities: Vec<String>,
    /// Gold surface forms of non-salient entities.
    #[serde(default)]
    pub nonsalient_entities: Vec<String>,
}

impl AnnotatedDocument {
    /// All gold entity strings, salient first.
    #[must_use]
    pub fn gold_entities(&self) -> Vec<String> {
        let mut gold = self.salient_entities.clone();
        gold.extend(self.nonsalient_entities.iter().cloned());
        gold
    }
}

/// Sentence- and token-segmented annotation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlpData {
    /// Sentences in document order.
    pub sentences: Vec<Sentence>,
    /// Coreference clusters keyed by cluster id. BTreeMap keeps label
    /// numbering deterministic across runs.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub corefs: BTreeMap<String, Vec<CorefMention>>,
}

/// One annotated sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentence {
    /// Tokens in sentence order.
    pub tokens: Vec<SentenceToken>,
}

/// One token as the annotation service emits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceToken {
    /// Original surface text.
    #[serde(rename = "originalText")]
    pub original_text: String,
    /// NER tag.
    pub ner: String,
    /// POS tag.
    pub pos: String,
}

/// One coreference mention: a half-open `[start_index, end_index)` range of
/// in-sentence token indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorefMention {
    /// First token index of the mention (1-based, inclusive).
    #[serde(rename = "startIndex")]
    pub start_index: u32,
    /// One past the last token index of the mention.
    #[serde(rename = "endIndex")]
    pub end_index: u32,
    /// 1-based sentence number.
    #[serde(rename = "sentNum")]
    pub sentence: u32,
}

/// Flatten annotation output into the pipeline's token stream.
///
/// Sentence and token indices are 1-based, matching the annotation
/// service's coreference mention indices.
#[must_use]
pub fn flatten_tokens(nlp_data: &NlpData) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (sentence_index, sentence) in nlp_data.sentences.iter().enumerate() {
        for (token_index, token) in sentence.tokens.iter().enumerate() {
            tokens.push(Token::new(
                token.original_text.clone(),
                token.ner.clone(),
                token.pos.clone(),
                sentence_index as u32 + 1,
                token_index as u32 + 1,
            ));
        }
    }
    tokens
}

/// Load and decode one persisted document.
pub fn load_document(path: impl AsRef<Path>) -> Result<AnnotatedDocument> {
    let data = std::fs::read_to_string(path.as_ref())?;
    let document = serde_json::from_str(&data)?;
    Ok(document)
}
