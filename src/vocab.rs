//! Vocabularies and integer-triple mapping of window tokens.
//!
//! Three independent vocabularies (words, POS tags, entity markers) turn a
//! window token into a `(word_id, pos_id, entity_id)` triple. Every
//! vocabulary carries `<PAD>` at id 0 and `<UNK>` at id 1; lookups never
//! fail, they fall back. Vocabularies are built once at startup and passed
//! by reference into the mapper.

use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::normalize::fold;
use crate::token::{entity_label, Token, PAD_TOKEN, TARGET_MARKER, UNK_TOKEN};

/// Penn Treebank POS tags, as emitted by the annotation service.
pub const POS_TAGS: &[&str] = &[
    "CC", "CD", "DT", "EX", "FW", "IN", "JJ", "JJR", "JJS", "LS", "MD", "NN", "NNS", "NNP",
    "NNPS", "PDT", "POS", "PRP", "PRP$", "RB", "RBR", "RBS", "RP", "SYM", "TO", "UH", "VB",
    "VBD", "VBG", "VBN", "VBP", "VBZ", "WDT", "WP", "WP$", "WRB",
];

/// Default number of `@entityN` markers in the entity vocabulary.
pub const DEFAULT_ENTITY_COUNT: usize = 127;

/// An immutable string-to-id mapping with fixed pad and unknown entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    ids: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from items, prepending `<PAD>` (0) and `<UNK>` (1).
    ///
    /// Duplicate items keep their first id.
    #[must_use]
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids = HashMap::new();
        ids.insert(PAD_TOKEN.to_string(), 0);
        ids.insert(UNK_TOKEN.to_string(), 1);
        for item in items {
            let item = item.into();
            let next = ids.len();
            ids.entry(item).or_insert(next);
        }
        Self { ids }
    }

    /// The Penn Treebank POS-tag vocabulary.
    #[must_use]
    pub fn postags() -> Self {
        Self::from_items(POS_TAGS.iter().copied())
    }

    /// The entity-marker vocabulary: `@target` plus `@entity1..=count`.
    #[must_use]
    pub fn entities(count: usize) -> Self {
        let markers = std::iter::once(TARGET_MARKER.to_string())
            .chain((1..=count).map(entity_label));
        Self::from_items(markers)
    }

    /// Number of entries, pad and unknown included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the vocabulary holds only the pad and unknown entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.len() <= 2
    }

    /// Whether `item` has an entry.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.ids.contains_key(item)
    }

    /// Look up `item`, if present.
    #[must_use]
    pub fn get(&self, item: &str) -> Option<usize> {
        self.ids.get(item).copied()
    }

    /// Look up `item`, falling back to the unknown id.
    #[must_use]
    pub fn get_or_unk(&self, item: &str) -> usize {
        self.get(item).unwrap_or(Self::UNK_ID)
    }

    /// Id of the pad entry.
    pub const PAD_ID: usize = 0;
    /// Id of the unknown entry.
    pub const UNK_ID: usize = 1;
}

/// Load a whitespace-delimited embedding file (GloVe format).
///
/// Each line is `word v1 v2 ... vm`. Returns the word vocabulary (file words
/// after the pad and unknown entries) and the weight matrix with row 0 an
/// all-zero pad vector and row 1 uniform in `±sqrt(6)/sqrt(n + m)`.
pub fn load_embeddings(path: impl AsRef<Path>) -> Result<(Vocabulary, Vec<Vec<f32>>)> {
    let reader = BufReader::new(std::fs::File::open(path.as_ref())?);

    let mut words = Vec::new();
    let mut weights: Vec<Vec<f32>> = Vec::new();
    let mut row_of: HashMap<String, usize> = HashMap::new();
    let mut dim: Option<usize> = None;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let word = fields
            .next()
            .ok_or_else(|| Error::parse(format!("embedding line {}: empty", line_no + 1)))?;
        let row: Vec<f32> = fields
            .map(str::parse)
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| {
                Error::parse(format!("embedding line {}: {e}", line_no + 1))
            })?;
        match dim {
            None => dim = Some(row.len()),
            Some(d) if d != row.len() => {
                return Err(Error::parse(format!(
                    "embedding line {}: expected {d} values, found {}",
                    line_no + 1,
                    row.len()
                )));
            }
            Some(_) => {}
        }
        // Duplicate words must not open a gap between vocabulary ids and
        // matrix rows: keep the later vector in the earlier row instead of
        // appending (last occurrence wins, as in a word -> id rebuild).
        if let Some(&at) = row_of.get(word) {
            log::warn!(
                "embedding line {}: duplicate word {word:?}, keeping the later vector",
                line_no + 1
            );
            weights[at] = row;
        } else {
            row_of.insert(word.to_string(), weights.len());
            words.push(word.to_string());
            weights.push(row);
        }
    }

    let dim = dim.ok_or_else(|| Error::parse("embedding file is empty"))?;
    if dim == 0 {
        return Err(Error::parse("embedding file has zero-dimensional vectors"));
    }

    // Pad row is all zeros; the unknown row gets a Xavier-style uniform init
    // bounded by sqrt(6)/sqrt(n + m).
    let bound = (6.0_f32).sqrt() / ((weights.len() + dim) as f32).sqrt();
    let mut rng = rand::thread_rng();
    let unk_row: Vec<f32> = (0..dim).map(|_| rng.gen_range(-bound..bound)).collect();

    let mut matrix = Vec::with_capacity(weights.len() + 2);
    matrix.push(vec![0.0; dim]);
    matrix.push(unk_row);
    matrix.extend(weights);

    log::info!(
        "loaded {} embedding rows of dimension {dim} from {}",
        matrix.len(),
        path.as_ref().display()
    );

    Ok((Vocabulary::from_items(words), matrix))
}

/// One token as three vocabulary ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenIds {
    /// Word vocabulary id.
    pub word: usize,
    /// POS-tag vocabulary id.
    pub pos: usize,
    /// Entity-marker vocabulary id.
    pub entity: usize,
}

/// Maps window tokens to [`TokenIds`] triples against three vocabularies.
#[derive(Debug, Clone)]
pub struct VocabMapper<'a> {
    words: &'a Vocabulary,
    postags: &'a Vocabulary,
    entities: &'a Vocabulary,
}

impl<'a> VocabMapper<'a> {
    /// Create a mapper over the three vocabularies.
    #[must_use]
    pub fn new(words: &'a Vocabulary, postags: &'a Vocabulary, entities: &'a Vocabulary) -> Self {
        Self {
            words,
            postags,
            entities,
        }
    }

    /// Map one `(word, pos)` pair to its id triple.
    ///
    /// A word that is itself an entity-vocabulary key (a marker like
    /// `@target`, `@entity3` or the pad token) is treated as an entity
    /// reference: its word id is the unknown id and its entity id is the
    /// marker's own id. Any other word is folded (lowercase +
    /// transliteration, no stripping) and looked up with unknown fallback,
    /// while its entity id falls back to pad. Never errors.
    #[must_use]
    pub fn tokenize(&self, word: &str, pos: Option<&str>) -> TokenIds {
        let (word_id, entity_id) = match self.entities.get(word) {
            Some(entity_id) => (Vocabulary::UNK_ID, entity_id),
            None => (self.words.get_or_unk(&fold(word)), Vocabulary::PAD_ID),
        };
        let pos_id = pos.map_or(Vocabulary::UNK_ID, |p| self.postags.get_or_unk(p));
        TokenIds {
            word: word_id,
            pos: pos_id,
            entity: entity_id,
        }
    }

    /// Map a window to its id-triple sequence, preserving order.
    #[must_use]
    pub fn map_window(&self, window: &[Token]) -> Vec<TokenIds> {
        window
            .iter()
            .map(|t| {
                let pos = if t.pos.is_empty() { None } else { Some(t.pos.as_str()) };
                self.tokenize(&t.word, pos)
            })
            .collect()
    }

    /// Map every window of every label, preserving window order per label.
    #[must_use]
    pub fn map_document(
        &self,
        windows_by_label: &[(String, Vec<Vec<Token>>)],
    ) -> HashMap<String, Vec<Vec<TokenIds>>> {
        windows_by_label
            .iter()
            .map(|(label, windows)| {
                let mapped = windows.iter().map(|w| self.map_window(w)).collect();
                (label.clone(), mapped)
            })
            .collect()
    }
}
