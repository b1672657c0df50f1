//! Tf-idf index over word n-grams.
//!
//! The document matrix is `[document_count × vocabulary_size]`, stored as
//! one L2-normalized sparse row per document. Dot products between rows and
//! query vectors are therefore cosine similarities.

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::normalize::is_word_char;

pub const MIN_NGRAM: usize = 1;
pub const MAX_NGRAM: usize = 3;

/// A vocabulary entry: matrix column and smoothed inverse document frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub column: usize,
    pub idf: f64,
}

/// Sparse row with strictly increasing column indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    columns: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    fn from_sorted(entries: Vec<(usize, f64)>) -> Self {
        let (columns, values) = entries.into_iter().unzip();
        Self { columns, values }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, column: usize) -> f64 {
        match self.columns.binary_search(&column) {
            Ok(i) => self.values[i],
            Err(_) => 0.0,
        }
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.columns.len() && j < other.columns.len() {
            match self.columns[i].cmp(&other.columns[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    vocabulary: HashMap<String, Term>,
    documents: Vec<SparseVector>,
}

impl LexicalIndex {
    /// Fit the vocabulary and idf weights on `normalized_docs` and vectorize
    /// every document. Every n-gram seen at least once is kept.
    pub fn build<S: AsRef<str>>(normalized_docs: &[S]) -> Self {
        let counts: Vec<HashMap<String, u32>> =
            normalized_docs.iter().map(|d| ngram_counts(d.as_ref())).collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &counts {
            for term in doc.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = counts.len() as f64;
        let vocabulary: HashMap<String, Term> = document_frequency
            .into_iter()
            .enumerate()
            .map(|(column, (term, df))| {
                let idf = ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0;
                (term.to_string(), Term { column, idf })
            })
            .collect();

        let mut index = Self {
            vocabulary,
            documents: Vec::with_capacity(counts.len()),
        };
        for doc in &counts {
            let row = index.weigh(doc);
            index.documents.push(row);
        }
        debug!(
            documents = index.documents.len(),
            vocabulary = index.vocabulary.len(),
            "built lexical index"
        );
        index
    }

    /// Project a normalized query onto the fitted vocabulary. Unknown n-grams
    /// are dropped.
    pub fn vectorize(&self, normalized_query: &str) -> SparseVector {
        self.weigh(&ngram_counts(normalized_query))
    }

    /// Cosine similarity of `query` against every document, in corpus order.
    pub fn score_all(&self, query: &SparseVector) -> Vec<f64> {
        self.documents.iter().map(|d| d.dot(query)).collect()
    }

    pub fn term(&self, term: &str) -> Option<&Term> {
        self.vocabulary.get(term)
    }

    pub fn document(&self, position: usize) -> Option<&SparseVector> {
        self.documents.get(position)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    fn weigh(&self, counts: &HashMap<String, u32>) -> SparseVector {
        let mut entries: Vec<(usize, f64)> = counts
            .iter()
            .filter_map(|(term, &count)| {
                let t = self.vocabulary.get(term)?;
                Some((t.column, sublinear_tf(count) * t.idf))
            })
            .collect();
        entries.sort_unstable_by_key(|(column, _)| *column);
        let mut row = SparseVector::from_sorted(entries);
        row.l2_normalize();
        row
    }
}

fn sublinear_tf(count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        1.0 + f64::from(count).ln()
    }
}

/// Runs of two or more word characters.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().nth(1).is_some())
        .collect()
}

/// Space-joined contiguous token n-grams, `MIN_NGRAM..=MAX_NGRAM` long.
pub fn ngrams(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let mut out = Vec::new();
    for n in MIN_NGRAM..=MAX_NGRAM {
        for window in tokens.windows(n) {
            out.push(window.join(" "));
        }
    }
    out
}

fn ngram_counts(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for gram in ngrams(text) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}
