use faqmatch_text::lexical::{ngrams, tokenize};
use faqmatch_text::{fuzzy_score, normalize, partial_ratio, ratio, token_set_ratio, LexicalIndex};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn normalize_folds_case_accents_and_punctuation() {
    assert_eq!(normalize("¿Cuál es el horario de atención?"), "cual es el horario de atencion");
    assert_eq!(normalize("  Hola,   MUNDO!!  "), "hola mundo");
    assert_eq!(normalize("don't\tstop\n"), "don t stop");
    assert_eq!(normalize("snake_case stays"), "snake_case stays");
}

#[test]
fn normalize_degenerate_inputs_are_empty() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   "), "");
    assert_eq!(normalize("..."), "");
    assert_eq!(normalize("¿?¡!"), "");
}

#[test]
fn normalize_is_diacritic_invariant() {
    assert_eq!(normalize("café"), normalize("cafe"));
    assert_eq!(normalize("Ñandú"), "nandu");
    assert_eq!(normalize("ÉLÈVE"), normalize("eleve"));
}

#[test]
fn normalize_drops_spacing_marks_without_splitting_words() {
    // U+093F and U+0940 are spacing marks (Mc), U+0902 is non-spacing (Mn)
    assert_eq!(normalize("हिंदी"), "हद");
    assert_eq!(normalize("नमस्ते दुनिया").split(' ').count(), 2);
}

#[test]
fn normalize_is_idempotent() {
    for s in [
        "¿Dónde están ubicados?",
        "What are your hours?",
        "  mixed\tWHITE   space ",
        "İstanbul Straße",
        "emoji 🎉 and ¼ fractions",
        "",
        "___",
    ] {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
    }
}

#[test]
fn tokenize_drops_single_char_words() {
    assert_eq!(tokenize("a bc d efg"), vec!["bc", "efg"]);
    assert_eq!(
        ngrams("uno dos tres"),
        vec!["uno", "dos", "tres", "uno dos", "dos tres", "uno dos tres"]
    );
}

#[test]
fn lexical_vocabulary_and_idf() {
    let index = LexicalIndex::build(&["what are your hours", "where are you located"]);
    assert_eq!(index.document_count(), 2);
    assert_eq!(index.vocabulary_size(), 17, "every 1-3 gram is kept; 'are' is shared");

    let shared = index.term("are").expect("are");
    assert!(close(shared.idf, 1.0), "df == n gives idf 1");
    let rare = index.term("what are your").expect("trigram");
    assert!(close(rare.idf, (3.0f64 / 2.0).ln() + 1.0));

    // columns follow lexicographic order
    assert!(index.term("are").unwrap().column < index.term("hours").unwrap().column);

    for i in 0..index.document_count() {
        let norm = index.document(i).unwrap().norm();
        assert!((norm - 1.0).abs() < 1e-12, "row {} norm {}", i, norm);
    }
}

#[test]
fn lexical_sublinear_tf() {
    let index = LexicalIndex::build(&["eco eco eco eco", "otro texto"]);
    let row = index.document(0).unwrap();
    let eco = index.term("eco").unwrap();
    let bigram = index.term("eco eco").unwrap();
    let ratio = row.get(eco.column) / row.get(bigram.column);
    let expected = ((1.0 + 4f64.ln()) * eco.idf) / ((1.0 + 3f64.ln()) * bigram.idf);
    assert!((ratio - expected).abs() < 1e-9);
}

#[test]
fn lexical_scores_are_cosines() {
    let docs = ["what are your hours", "where are you located"];
    let index = LexicalIndex::build(&docs);

    let q = index.vectorize("what are your hours");
    let scores = index.score_all(&q);
    assert_eq!(scores.len(), 2);
    assert!((scores[0] - 1.0).abs() < 1e-9);
    assert!(scores[1] > 0.0 && scores[1] < scores[0]);

    let shared = index.score_all(&index.vectorize("are"));
    assert!(close(shared[0], shared[1]), "same structure, same cosine");
}

#[test]
fn lexical_out_of_vocabulary_is_zero() {
    let index = LexicalIndex::build(&["hola mundo"]);
    let q = index.vectorize("zebra xylophone");
    assert!(q.is_empty());
    assert_eq!(index.score_all(&q), vec![0.0]);
}

#[test]
fn lexical_empty_corpus() {
    let index = LexicalIndex::build::<&str>(&[]);
    assert_eq!(index.document_count(), 0);
    assert_eq!(index.vocabulary_size(), 0);
    assert!(index.score_all(&index.vectorize("anything")).is_empty());
}

#[test]
fn ratio_matches_indel_similarity() {
    assert!(close(ratio("this is a test", "this is a test!"), 1.0 - 1.0 / 29.0));
    assert_eq!(ratio("", "abc"), 0.0);
    assert_eq!(ratio("abc", "abc"), 1.0);
}

#[test]
fn partial_ratio_rewards_embedded_queries() {
    assert_eq!(partial_ratio("horario", "cual es el horario de atencion"), 1.0);
    assert_eq!(partial_ratio("cual es el horario de atencion", "horario"), 1.0);
    assert!(close(partial_ratio("abcd", "xxabcexx"), 0.75));
    assert_eq!(partial_ratio("", ""), 1.0);
    assert_eq!(partial_ratio("", "abc"), 0.0);
}

#[test]
fn token_set_ratio_ignores_order_and_repeats() {
    assert_eq!(token_set_ratio("fuzzy was a bear", "fuzzy fuzzy was a bear"), 1.0);
    assert_eq!(token_set_ratio("bear was fuzzy", "fuzzy was bear"), 1.0);
    assert!(close(token_set_ratio("hola amigo", "hola amiga"), 0.9));
    assert_eq!(token_set_ratio("", "hola"), 0.0);
}

#[test]
fn fuzzy_score_takes_the_best_measure() {
    let q = "hours what are your";
    let r = "what are your hours";
    assert_eq!(fuzzy_score(q, r), 1.0, "token set wins for reordering");
    let s = fuzzy_score("horaro", "cual es el horario de atencion");
    assert!(s > 0.8 && s < 1.0, "typo keeps a high partial score: {}", s);
    assert_eq!(fuzzy_score("", "anything"), 0.0);
}
