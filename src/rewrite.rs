//! Token-stream rewriting: collapse entity spans into marker tokens.
//!
//! The first token of each span takes the span's canonical label as its
//! `word` and keeps the original mention text in its `entity` field; the
//! remaining span tokens are blanked and later dropped by
//! [`crate::token::remove_empty_tokens`]. The label is also propagated onto
//! every member token's `label` field so mentions remain findable by label
//! after rewriting.

use crate::error::{Error, Result};
use crate::ingest::CorefMention;
use crate::spans::EntitySpan;
use crate::token::{entity_label, Token};

fn span_display(span: &EntitySpan) -> String {
    span.label.clone().unwrap_or_else(|| span.text())
}

fn overlapping(a: &EntitySpan, b: &EntitySpan) -> bool {
    a.sentence() == b.sentence()
        && a.first_index() <= b.last_index()
        && b.first_index() <= a.last_index()
}

/// Rewrite `tokens` in place, collapsing each labeled span into one marker.
///
/// Tokens are matched by `(sentence, index)` identity against each span's
/// `[first, last]` range. Spans without a label are skipped (they were never
/// clustered). Overlapping span ranges are rejected up front with
/// [`Error::OverlappingSpans`] naming the colliding pair; silently letting
/// one span corrupt another is never acceptable here.
pub fn rewrite(tokens: &mut [Token], spans: &mut [EntitySpan]) -> Result<()> {
    for i in 0..spans.len() {
        for j in (i + 1)..spans.len() {
            if overlapping(&spans[i], &spans[j]) {
                return Err(Error::OverlappingSpans {
                    first: span_display(&spans[i]),
                    second: span_display(&spans[j]),
                });
            }
        }
    }

    for span in spans.iter_mut() {
        let Some(label) = span.label.clone() else {
            log::warn!("rewrite: span {:?} has no label, skipping", span.text());
            continue;
        };
        let mention = span.text();
        let mut head_seen = false;
        for token in tokens.iter_mut() {
            if token.sentence == span.sentence()
                && token.index >= span.first_index()
                && token.index <= span.last_index()
            {
                if head_seen {
                    token.word = String::new();
                } else {
                    token.word = label.clone();
                    token.entity = Some(mention.clone());
                    head_seen = true;
                }
                token.label = Some(label.clone());
            }
        }
    }
    Ok(())
}

/// Rewrite `tokens` from externally supplied coreference clusters.
///
/// This is an opt-in alternative to the NER-driven path:
/// [`crate::pipeline::Preprocessor`] clusters mentions by normalized
/// surface text and never reads the document's `corefs`. Callers that
/// trust the annotation service's coreference output can instead rewrite
/// straight from its clusters with this function (after
/// [`crate::ingest::flatten_tokens`], before window extraction).
///
/// Every mention of a cluster shares one fresh `@entityN` label; mention
/// ranges are half-open `[start_index, end_index)` on the in-sentence token
/// index. The first token of a mention takes the label, the rest are
/// blanked. Cluster iteration order follows the input slice, so callers
/// control label numbering.
pub fn rewrite_coref_clusters(tokens: &mut [Token], clusters: &[Vec<CorefMention>]) {
    let mut current_id = 1;
    for mentions in clusters {
        let label = entity_label(current_id);
        for mention in mentions {
            for token in tokens.iter_mut() {
                if token.sentence == mention.sentence
                    && mention.start_index <= token.index
                    && token.index < mention.end_index
                {
                    token.word = if token.index == mention.start_index {
                        label.clone()
                    } else {
                        String::new()
                    };
                    token.label = Some(label.clone());
                }
            }
        }
        current_id += 1;
    }
}
