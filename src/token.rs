//! Token records and marker constants.
//!
//! A [`Token`] is the unit the whole pipeline operates on: one word of a
//! sentence-segmented, POS- and NER-tagged document. The `(sentence, index)`
//! pair is the stable identity used for span and window alignment; it never
//! changes, even after [`crate::rewrite`] replaces the `word` field with an
//! entity marker.

use serde::{Deserialize, Serialize};

/// Padding marker shared by all three vocabularies and by window padding.
pub const PAD_TOKEN: &str = "<PAD>";

/// Unknown-item marker shared by all three vocabularies.
pub const UNK_TOKEN: &str = "<UNK>";

/// Marker substituted for the scored entity inside masked windows.
pub const TARGET_MARKER: &str = "@target";

/// The NER tag meaning "not part of any entity".
pub const OUTSIDE_TAG: &str = "O";

/// Render a cluster label for the `n`-th entity (1-based).
#[must_use]
pub fn entity_label(n: usize) -> String {
    format!("@entity{n}")
}

/// One annotated token of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form; rewritten to an entity marker or blanked by the rewriter.
    pub word: String,
    /// NER tag ([`OUTSIDE_TAG`] for non-entity tokens).
    pub ner: String,
    /// POS tag (empty for synthetic pad tokens).
    pub pos: String,
    /// 1-based sentence number within the document.
    pub sentence: u32,
    /// 1-based token position within the sentence.
    pub index: u32,
    /// Gold entity string this token's span aligned with, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aligned_with: Option<String>,
    /// Canonical cluster label (`@entityN`) propagated by the rewriter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Original joined mention text, stored on the first token of a
    /// rewritten span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl Token {
    /// Create a token with no derived annotations.
    #[must_use]
    pub fn new(
        word: impl Into<String>,
        ner: impl Into<String>,
        pos: impl Into<String>,
        sentence: u32,
        index: u32,
    ) -> Self {
        Self {
            word: word.into(),
            ner: ner.into(),
            pos: pos.into(),
            sentence,
            index,
            aligned_with: None,
            label: None,
            entity: None,
        }
    }

    /// Create a synthetic padding token. Identity fields are zero, which is
    /// never a valid 1-based position.
    #[must_use]
    pub fn pad(pad_word: &str) -> Self {
        Self::new(pad_word, OUTSIDE_TAG, "", 0, 0)
    }

    /// Whether this token carries the outside NER tag.
    #[must_use]
    pub fn is_outside(&self) -> bool {
        self.ner == OUTSIDE_TAG
    }
}

/// Drop tokens whose `word` was blanked by the rewriter.
///
/// This is the required post-step between rewriting and window extraction:
/// non-head tokens of a collapsed entity span are left behind as empty words
/// and must not count toward window offsets.
#[must_use]
pub fn remove_empty_tokens(tokens: Vec<Token>) -> Vec<Token> {
    tokens.into_iter().filter(|t| !t.word.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_label_format() {
        assert_eq!(entity_label(1), "@entity1");
        assert_eq!(entity_label(42), "@entity42");
    }

    #[test]
    fn test_pad_token_is_neutral() {
        let pad = Token::pad(PAD_TOKEN);
        assert_eq!(pad.word, PAD_TOKEN);
        assert!(pad.is_outside());
        assert_eq!(pad.sentence, 0);
        assert_eq!(pad.index, 0);
    }

    #[test]
    fn test_remove_empty_tokens() {
        let tokens = vec![
            Token::new("@entity1", "LOCATION", "NNP", 1, 1),
            Token::new("", "LOCATION", "NNP", 1, 2),
            Token::new("is", "O", "VBZ", 1, 3),
        ];
        let kept = remove_empty_tokens(tokens);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].word, "@entity1");
        assert_eq!(kept[1].word, "is");
    }

    #[test]
    fn test_token_serde_roundtrip() {
        let mut token = Token::new("Paris", "LOCATION", "NNP", 1, 1);
        token.label = Some("@entity1".to_string());
        let json = serde_json::to_string(&token).unwrap();
        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(token, back);
        // Unset annotations stay out of the serialized form.
        assert!(!json.contains("aligned_with"));
    }
}
