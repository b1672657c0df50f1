use crate::types::{FaqId, FaqQuestion};

/// Supplies the ordered `(id, question)` corpus the engine is built from.
pub trait CorpusSource: Send + Sync {
    fn questions(&self) -> anyhow::Result<Vec<FaqQuestion>>;
}

/// Looks up stored answer text once a query has been classified as understood.
pub trait AnswerSource: Send + Sync {
    fn answer(&self, id: FaqId) -> anyhow::Result<Option<String>>;
}
