use parking_lot::RwLock;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

use faqmatch_core::config::MatchConfig;
use faqmatch_core::error::{Error, Result};
use faqmatch_core::types::{FaqId, FaqQuestion, QueryResult, RankedQuestion};
use faqmatch_text::{fuzzy_score, normalize, LexicalIndex};

use crate::blend::{blend, blend_weight, top_k};

/// Immutable snapshot of an indexed corpus.
///
/// `faq_ids`, `raw_questions`, `normalized_questions` and the lexical rows
/// are positionally aligned and always the same length.
#[derive(Debug, Clone, Default)]
pub struct Index {
    lexical: LexicalIndex,
    faq_ids: Vec<FaqId>,
    raw_questions: Vec<String>,
    normalized_questions: Vec<String>,
}

impl Index {
    /// Index `documents` in the order given. Ids are not deduplicated.
    pub fn build(documents: &[FaqQuestion]) -> Self {
        let faq_ids: Vec<FaqId> = documents.iter().map(|d| d.id).collect();
        let raw_questions: Vec<String> = documents.iter().map(|d| d.question.clone()).collect();
        let normalized_questions: Vec<String> =
            raw_questions.iter().map(|q| normalize(q)).collect();
        let lexical = LexicalIndex::build(&normalized_questions);
        Self {
            lexical,
            faq_ids,
            raw_questions,
            normalized_questions,
        }
    }

    pub fn len(&self) -> usize {
        self.faq_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faq_ids.is_empty()
    }

    pub fn lexical(&self) -> &LexicalIndex {
        &self.lexical
    }

    /// Cosine of the query against every question, in corpus order.
    pub fn cosine_scores(&self, normalized_query: &str) -> Vec<f64> {
        self.lexical.score_all(&self.lexical.vectorize(normalized_query))
    }

    /// Fuzzy score of the query against every normalized question, in corpus
    /// order. Fans out across the rayon pool from `parallel_threshold` docs.
    pub fn fuzzy_scores(&self, normalized_query: &str, parallel_threshold: usize) -> Vec<f64> {
        if self.normalized_questions.len() >= parallel_threshold {
            self.normalized_questions
                .par_iter()
                .map(|q| fuzzy_score(normalized_query, q))
                .collect()
        } else {
            self.normalized_questions.iter().map(|q| fuzzy_score(normalized_query, q)).collect()
        }
    }

    /// Score `message` against this snapshot. `None` when the corpus is
    /// empty, the message normalizes to nothing, or nothing scores above 0.
    pub fn rank(&self, message: &str, config: &MatchConfig) -> Option<QueryResult> {
        let query = normalize(message);
        if query.is_empty() || self.is_empty() {
            return None;
        }

        let cosine = self.cosine_scores(&query);
        let fuzzy = self.fuzzy_scores(&query, config.parallel_threshold);
        let alpha = blend_weight(&query, config.base_alpha);
        let scores = blend(&cosine, &fuzzy, alpha);

        let top = top_k(&scores, config.top_k);
        let confidence = scores[*top.first()?].clamp(0.0, 1.0);
        debug!(query = %query, alpha, confidence, "ranked query");
        if confidence <= 0.0 {
            return None;
        }

        let ranked = top
            .into_iter()
            .map(|i| RankedQuestion {
                id: self.faq_ids[i],
                question: self.raw_questions[i].clone(),
            })
            .collect();
        Some(QueryResult { confidence, ranked })
    }
}

/// Owns the live index and swaps it wholesale on rebuild.
///
/// Builds run outside the lock; the write lock covers only the pointer
/// swap. Queries clone the current `Arc` once and never look again, so a
/// query racing a rebuild finishes on the snapshot it started with.
pub struct Engine {
    current: RwLock<Option<Arc<Index>>>,
    config: MatchConfig,
}

impl Engine {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            current: RwLock::new(None),
            config,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn build(&self, documents: &[FaqQuestion]) {
        let index = Arc::new(Index::build(documents));
        info!(
            documents = index.len(),
            vocabulary = index.lexical().vocabulary_size(),
            "matching index built"
        );
        *self.current.write() = Some(index);
    }

    pub fn is_ready(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn snapshot(&self) -> Option<Arc<Index>> {
        self.current.read().clone()
    }

    /// Rank `message` against the current index. Fails only with
    /// [`Error::NotReady`] before the first build.
    pub fn query(&self, message: &str) -> Result<Option<QueryResult>> {
        let index = self.snapshot().ok_or(Error::NotReady)?;
        Ok(index.rank(message, &self.config))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}
