//! Domain types shared by the matching engine and its collaborators.

use serde::{Deserialize, Serialize};

pub type FaqId = i64;

/// A corpus question as pushed to the engine on build.
///
/// The engine never sees answers or tags; it only indexes `question` and
/// reports `id` back in ranked results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqQuestion {
    pub id: FaqId,
    pub question: String,
}

impl FaqQuestion {
    pub fn new(id: FaqId, question: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
        }
    }
}

/// A full catalog record owned by the storage side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: FaqId,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub lang: String,
}

/// One ranked candidate: the corpus id and its question as originally given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedQuestion {
    pub id: FaqId,
    pub question: String,
}

/// Outcome of a single query against an index snapshot.
///
/// `confidence` is the blended score of `ranked[0]` and lies in `[0, 1]`.
/// `ranked` is ordered by descending blended score and never exceeds the
/// configured top-k or the corpus size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub confidence: f64,
    pub ranked: Vec<RankedQuestion>,
}

impl QueryResult {
    pub fn top(&self) -> Option<&RankedQuestion> {
        self.ranked.first()
    }

    pub fn questions(&self) -> Vec<String> {
        self.ranked.iter().map(|r| r.question.clone()).collect()
    }
}

/// Response classification derived from the top confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Understood,
    Ambiguous,
    NotUnderstood,
}

/// The structured reply handed to the API layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub answer: Option<String>,
    pub confidence: f64,
    pub matched_question: Option<String>,
    pub alternatives: Vec<String>,
    pub status: Status,
}

impl Reply {
    pub fn not_understood() -> Self {
        Self {
            answer: None,
            confidence: 0.0,
            matched_question: None,
            alternatives: Vec::new(),
            status: Status::NotUnderstood,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub nlp_ready: bool,
}
