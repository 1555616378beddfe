//! Entity span detection from per-token NER tags.
//!
//! Segmentation is driven purely by "outside vs. not outside": a span is a
//! maximal contiguous run of tokens whose NER tag is not [`OUTSIDE_TAG`],
//! within one sentence. Two adjacent runs with *different* non-outside tags
//! merge into a single span; only a transition through the outside tag (or a
//! sentence boundary) separates spans. Downstream clustering cares about
//! span boundaries, never about which tag produced them.

use serde::{Deserialize, Serialize};

use crate::token::{Token, OUTSIDE_TAG};

/// A contiguous run of non-outside tokens within one sentence.
///
/// Holds a snapshot of the tokens as they looked at extraction time, plus
/// the annotations later stages stamp onto it. Always non-empty; token
/// indices are strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Snapshot of the member tokens, in document order.
    pub tokens: Vec<Token>,
    /// Gold entity string this span aligned with ([`crate::align`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aligned_with: Option<String>,
    /// Canonical cluster label ([`crate::cluster`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EntitySpan {
    pub(crate) fn from_tokens(tokens: Vec<Token>) -> Self {
        debug_assert!(!tokens.is_empty());
        debug_assert!(tokens.windows(2).all(|w| {
            w[0].sentence == w[1].sentence && w[0].index < w[1].index
        }));
        Self {
            tokens,
            aligned_with: None,
            label: None,
        }
    }

    /// 1-based sentence number all member tokens share.
    #[must_use]
    pub fn sentence(&self) -> u32 {
        self.tokens[0].sentence
    }

    /// 1-based index of the first member token within its sentence.
    #[must_use]
    pub fn first_index(&self) -> u32 {
        self.tokens[0].index
    }

    /// 1-based index of the last member token within its sentence.
    #[must_use]
    pub fn last_index(&self) -> u32 {
        self.tokens[self.tokens.len() - 1].index
    }

    /// Surface form: member words joined with single spaces.
    #[must_use]
    pub fn text(&self) -> String {
        let words: Vec<&str> = self.tokens.iter().map(|t| t.word.as_str()).collect();
        words.join(" ")
    }
}

/// Segment a token sequence into entity spans.
///
/// Scans in order, tracking the current tag (initially the outside tag). A
/// tag change flushes the accumulated buffer; non-outside tokens are then
/// appended to the (possibly fresh) buffer. A sentence change also flushes,
/// so a span never straddles sentences. The final buffer is flushed after
/// the last token. An empty input yields no spans.
#[must_use]
pub fn extract_spans(tokens: &[Token]) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut buffer: Vec<Token> = Vec::new();
    let mut current_ner = OUTSIDE_TAG.to_string();

    for token in tokens {
        let sentence_changed = buffer
            .last()
            .is_some_and(|prev| prev.sentence != token.sentence);
        if token.ner != current_ner || sentence_changed {
            if !buffer.is_empty() {
                spans.push(EntitySpan::from_tokens(std::mem::take(&mut buffer)));
            }
        }
        if token.ner != OUTSIDE_TAG {
            buffer.push(token.clone());
        }
        current_ner = token.ner.clone();
    }
    // Trailing sentinel: force a final flush.
    if !buffer.is_empty() {
        spans.push(EntitySpan::from_tokens(buffer));
    }

    spans
}
