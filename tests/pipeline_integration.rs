//! End-to-end tests for the preprocessing pipeline.

use salience::{
    cluster, extract_spans, load_document, remove_empty_tokens, rewrite, AnnotatedDocument,
    Preprocessor, Token, Vocabulary, WindowExtractor, PAD_TOKEN,
};

fn tok(word: &str, ner: &str, pos: &str, sentence: u32, index: u32) -> Token {
    Token::new(word, ner, pos, sentence, index)
}

#[test]
fn test_paris_scenario() {
    // tokens: [Paris/LOCATION, is/O, nice/O]
    let mut tokens = vec![
        tok("Paris", "LOCATION", "NNP", 1, 1),
        tok("is", "O", "VBZ", 1, 2),
        tok("nice", "O", "JJ", 1, 3),
    ];

    let mut spans = extract_spans(&tokens);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].text(), "Paris");

    cluster(&mut spans);
    assert_eq!(spans[0].label.as_deref(), Some("@entity1"));

    rewrite(&mut tokens, &mut spans).unwrap();
    let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();
    assert_eq!(words, vec!["@entity1", "is", "nice"]);

    let tokens = remove_empty_tokens(tokens);
    let windows = WindowExtractor::new()
        .with_sizes(1, 1)
        .windows("@entity1", &tokens);
    assert_eq!(windows.len(), 1);
    let words: Vec<&str> = windows[0].iter().map(|t| t.word.as_str()).collect();
    assert_eq!(words, vec![PAD_TOKEN, "@target", "is"]);
}

#[test]
fn test_full_document_preprocessing() {
    let document: AnnotatedDocument = serde_json::from_value(serde_json::json!({
        "text": "Paris is the capital of France. France loves paris.",
        "nlp_data": {
            "sentences": [
                {"tokens": [
                    {"originalText": "Paris", "ner": "LOCATION", "pos": "NNP"},
                    {"originalText": "is", "ner": "O", "pos": "VBZ"},
                    {"originalText": "the", "ner": "O", "pos": "DT"},
                    {"originalText": "capital", "ner": "O", "pos": "NN"},
                    {"originalText": "of", "ner": "O", "pos": "IN"},
                    {"originalText": "France", "ner": "LOCATION", "pos": "NNP"},
                    {"originalText": ".", "ner": "O", "pos": "."}
                ]},
                {"tokens": [
                    {"originalText": "France", "ner": "LOCATION", "pos": "NNP"},
                    {"originalText": "loves", "ner": "O", "pos": "VBZ"},
                    {"originalText": "paris", "ner": "LOCATION", "pos": "NN"},
                    {"originalText": ".", "ner": "O", "pos": "."}
                ]}
            ]
        },
        "salient_entities": ["Paris"],
        "nonsalient_entities": ["France"]
    }))
    .unwrap();

    let words = Vocabulary::from_items(["is", "the", "capital", "of", "loves"]);
    let postags = Vocabulary::postags();
    let entities = Vocabulary::entities(16);
    let preprocessor = Preprocessor::new(&words, &postags, &entities)
        .with_extractor(WindowExtractor::new().with_sizes(3, 3));

    let representation = preprocessor.preprocess(&document).unwrap();

    // Two clusters: Paris/paris and France/France.
    assert_eq!(representation.windows.len(), 2);
    assert_eq!(representation.windows["@entity1"].len(), 2);
    assert_eq!(representation.windows["@entity2"].len(), 2);
    assert!(representation.salience["@entity1"]);
    assert!(!representation.salience["@entity2"]);

    // Every window row is exactly pre + 1 + post triples.
    for windows in representation.windows.values() {
        for window in windows {
            assert_eq!(window.len(), 7);
        }
    }

    // The center of the first Paris window is the masked target: its word
    // axis is unknown and its entity axis is the @target marker id.
    let first = &representation.windows["@entity1"][0];
    let center = first[3];
    assert_eq!(center.word, Vocabulary::UNK_ID);
    assert_eq!(center.entity, entities.get("@target").unwrap());
}

#[test]
fn test_masked_windows_never_leak_cluster_labels() {
    let mut tokens = vec![
        tok("Oslo", "LOCATION", "NNP", 1, 1),
        tok("and", "O", "CC", 1, 2),
        tok("Oslo", "LOCATION", "NNP", 1, 3),
        tok("again", "O", "RB", 1, 4),
    ];
    let mut spans = extract_spans(&tokens);
    cluster(&mut spans);
    rewrite(&mut tokens, &mut spans).unwrap();
    let tokens = remove_empty_tokens(tokens);

    for window in WindowExtractor::new().with_sizes(4, 4).windows("@entity1", &tokens) {
        assert!(window.iter().all(|t| t.word != "@entity1"));
    }
}

#[test]
fn test_gold_alignment_filters_unlisted_entities() {
    let document: AnnotatedDocument = serde_json::from_value(serde_json::json!({
        "text": "Paris and Rome.",
        "nlp_data": {
            "sentences": [{"tokens": [
                {"originalText": "Paris", "ner": "LOCATION", "pos": "NNP"},
                {"originalText": "and", "ner": "O", "pos": "CC"},
                {"originalText": "Rome", "ner": "LOCATION", "pos": "NNP"},
                {"originalText": ".", "ner": "O", "pos": "."}
            ]}]
        },
        "salient_entities": ["Paris"],
        "nonsalient_entities": []
    }))
    .unwrap();

    let words = Vocabulary::from_items(["and"]);
    let postags = Vocabulary::postags();
    let entities = Vocabulary::entities(8);
    let preprocessor = Preprocessor::new(&words, &postags, &entities);

    let representation = preprocessor.preprocess(&document).unwrap();
    // Rome is not in any gold list: it is dropped before clustering, so the
    // only cluster is Paris and Rome's surface form survives in windows.
    assert_eq!(representation.windows.len(), 1);
    assert!(representation.windows.contains_key("@entity1"));
}

#[test]
fn test_document_loading_roundtrip() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(
        file.path(),
        serde_json::json!({
            "text": "Oslo.",
            "nlp_data": {"sentences": [{"tokens": [
                {"originalText": "Oslo", "ner": "LOCATION", "pos": "NNP"},
                {"originalText": ".", "ner": "O", "pos": "."}
            ]}]},
            "salient_entities": ["Oslo"],
            "nonsalient_entities": []
        })
        .to_string(),
    )
    .unwrap();

    let document = load_document(file.path()).unwrap();
    let words = Vocabulary::from_items(std::iter::empty::<String>());
    let postags = Vocabulary::postags();
    let entities = Vocabulary::entities(4);
    let preprocessor = Preprocessor::new(&words, &postags, &entities);

    let representation = preprocessor.preprocess(&document).unwrap();
    assert_eq!(representation.windows.len(), 1);
    let windows = &representation.windows["@entity1"];
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].len(), 31);
}

#[test]
fn test_unannotated_file_is_refused() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), serde_json::json!({"text": "raw"}).to_string()).unwrap();

    let document = load_document(file.path()).unwrap();
    let words = Vocabulary::from_items(std::iter::empty::<String>());
    let postags = Vocabulary::postags();
    let entities = Vocabulary::entities(4);
    let preprocessor = Preprocessor::new(&words, &postags, &entities);

    assert!(matches!(
        preprocessor.preprocess(&document),
        Err(salience::Error::NotAnnotated)
    ));
}
