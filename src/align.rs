//! Alignment of extracted spans against gold entity labels.
//!
//! Matching is exact equality of normalized text. The stamped value is the
//! *original* gold string, not its normalization, so callers can recover
//! which gold list (salient / non-salient) a span came from.

use crate::normalize::normalize;
use crate::spans::EntitySpan;

/// Annotate each span whose normalized text equals the normalization of a
/// gold label.
///
/// Every gold label is checked for every span; when several gold labels
/// normalize identically, the later one in `gold_labels` order wins.
/// Unmatched spans are left untouched.
pub fn align<S: AsRef<str>>(gold_labels: &[S], spans: &mut [EntitySpan]) {
    for span in spans.iter_mut() {
        let key = normalize(&span.text());
        // Digit- or punctuation-only text normalizes to the empty string,
        // which is never a valid equality key: it must not match a gold
        // label whose normalization is also empty.
        if key.is_empty() {
            continue;
        }
        for gold in gold_labels {
            if normalize(gold.as_ref()) == key {
                let gold = gold.as_ref().to_string();
                for token in &mut span.tokens {
                    token.aligned_with = Some(gold.clone());
                }
                span.aligned_with = Some(gold);
            }
        }
    }
}

/// Drop spans that did not align with any gold label.
///
/// Used by callers that only score gold entities; spans the annotator found
/// but the gold lists do not mention are discarded here, before clustering.
#[must_use]
pub fn retain_aligned(spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
    spans.into_iter().filter(|s| s.aligned_with.is_some()).collect()
}
