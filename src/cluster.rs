//! Canonical label assignment and normalized-text clustering.
//!
//! Every span first gets a fresh `@entity<i>` label in document order; a
//! single forward pass then propagates labels from earlier spans onto later
//! spans with equal normalized text. Propagation is last-write-wins within
//! the inner scan and only ever flows forward, which is preserved exactly:
//! a union-find would be the conventional choice but could change which
//! label a given mention ends up with.

use crate::normalize::normalize;
use crate::spans::EntitySpan;
use crate::token::entity_label;

/// Assign one canonical label per normalized-text equivalence class.
///
/// Labels are stamped on the span and on its first snapshot token. After
/// this pass, spans with equal normalized text share exactly one label, and
/// that label is the one minted for the earliest member of the class.
pub fn cluster(spans: &mut [EntitySpan]) {
    for (i, span) in spans.iter_mut().enumerate() {
        let label = entity_label(i + 1);
        span.tokens[0].label = Some(label.clone());
        span.label = Some(label);
    }

    let keys: Vec<String> = spans.iter().map(|s| normalize(&s.text())).collect();
    for i in 0..spans.len() {
        // An empty normalization (digit- or punctuation-only mention) is
        // never equal to another empty normalization; such spans keep
        // their fresh labels.
        if keys[i].is_empty() {
            continue;
        }
        let canonical = spans[i].label.clone();
        for j in (i + 1)..spans.len() {
            // No short-circuit: later outer iterations may overwrite again.
            if keys[j] == keys[i] {
                spans[j].tokens[0].label = canonical.clone();
                spans[j].label = canonical.clone();
                log::debug!(
                    "cluster: span {} ({:?}) takes label {:?}",
                    j,
                    spans[j].text(),
                    canonical
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spans::extract_spans;
    use crate::token::Token;

    fn spans_of(words: &[&str]) -> Vec<EntitySpan> {
        // One single-token entity span per word, separated by outside tokens.
        let mut tokens = Vec::new();
        for (i, word) in words.iter().enumerate() {
            tokens.push(Token::new(*word, "ENTITY", "NNP", 1, 2 * i as u32 + 1));
            tokens.push(Token::new(",", "O", ",", 1, 2 * i as u32 + 2));
        }
        extract_spans(&tokens)
    }

    #[test]
    fn test_fresh_labels_in_document_order() {
        let mut spans = spans_of(&["Paris", "Rome", "Oslo"]);
        cluster(&mut spans);
        assert_eq!(spans[0].label.as_deref(), Some("@entity1"));
        assert_eq!(spans[1].label.as_deref(), Some("@entity2"));
        assert_eq!(spans[2].label.as_deref(), Some("@entity3"));
        assert_eq!(spans[0].tokens[0].label.as_deref(), Some("@entity1"));
    }

    #[test]
    fn test_equal_spans_share_first_label() {
        let mut spans = spans_of(&["Paris", "Rome", "Paris"]);
        cluster(&mut spans);
        assert_eq!(spans[0].label.as_deref(), Some("@entity1"));
        assert_eq!(spans[1].label.as_deref(), Some("@entity2"));
        assert_eq!(spans[2].label.as_deref(), Some("@entity1"));
    }

    #[test]
    fn test_case_only_difference_clusters() {
        let mut spans = spans_of(&["Paris", "paris"]);
        cluster(&mut spans);
        assert_eq!(spans[0].label, spans[1].label);
        assert_eq!(spans[0].label.as_deref(), Some("@entity1"));
    }

    #[test]
    fn test_chain_overwrite_with_three_duplicates() {
        // A, B, C all equal: i=0 stamps B and C with @entity1; i=1 then
        // re-stamps C with B's current label, which is already @entity1.
        // The first writer's id stays canonical for the whole chain.
        let mut spans = spans_of(&["Oslo", "Oslo", "Oslo", "Bergen"]);
        cluster(&mut spans);
        assert_eq!(spans[0].label.as_deref(), Some("@entity1"));
        assert_eq!(spans[1].label.as_deref(), Some("@entity1"));
        assert_eq!(spans[2].label.as_deref(), Some("@entity1"));
        assert_eq!(spans[3].label.as_deref(), Some("@entity4"));
    }

    #[test]
    fn test_empty_normalizations_never_cluster() {
        // "42" and "1999" both normalize to "", which is not a usable
        // equality key: each mention keeps its own fresh label.
        let mut spans = spans_of(&["42", "1999", "42"]);
        cluster(&mut spans);
        assert_eq!(spans[0].label.as_deref(), Some("@entity1"));
        assert_eq!(spans[1].label.as_deref(), Some("@entity2"));
        assert_eq!(spans[2].label.as_deref(), Some("@entity3"));
    }

    #[test]
    fn test_diacritics_cluster_with_plain_form() {
        let mut spans = spans_of(&["Malmö", "Malmo"]);
        cluster(&mut spans);
        assert_eq!(spans[0].label, spans[1].label);
    }
}
