use parking_lot::{Mutex, RwLock};
use tracing::info;

use faqmatch_core::catalog::FaqCatalog;
use faqmatch_core::config::MatchConfig;
use faqmatch_core::traits::{AnswerSource, CorpusSource};
use faqmatch_core::types::{FaqId, FaqQuestion, Health, Reply};

use crate::classify::respond;
use crate::engine::Engine;

/// Wires the engine to a storage collaborator: rebuilds on corpus change
/// and resolves answers for understood queries.
pub struct FaqService<S> {
    engine: Engine,
    store: RwLock<S>,
    // held across read + build + swap so rebuilds publish in read order
    rebuild: Mutex<()>,
}

impl<S> FaqService<S>
where
    S: CorpusSource + AnswerSource,
{
    pub fn new(store: S, config: MatchConfig) -> Self {
        Self {
            engine: Engine::new(config),
            store: RwLock::new(store),
            rebuild: Mutex::new(()),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Rebuild the index from the store's current questions.
    ///
    /// Concurrent rebuilds are serialized; queries keep running against the
    /// previous snapshot meanwhile.
    pub fn reindex(&self) -> anyhow::Result<usize> {
        let _rebuild = self.rebuild.lock();
        let questions = self.store.read().questions()?;
        self.engine.build(&questions);
        Ok(questions.len())
    }

    /// The stored `(id, question)` pairs, in corpus order.
    pub fn list(&self) -> anyhow::Result<Vec<FaqQuestion>> {
        self.store.read().questions()
    }

    /// Classify `message`. Errors with `faqmatch_core::error::Error::NotReady`
    /// before the first `reindex`.
    pub fn ask(&self, message: &str) -> anyhow::Result<Reply> {
        let result = self.engine.query(message)?;
        let store = self.store.read();
        respond(result.as_ref(), self.engine.config(), &*store)
    }

    pub fn health(&self) -> Health {
        Health {
            status: "ok".to_string(),
            nlp_ready: self.engine.is_ready(),
        }
    }
}

impl FaqService<FaqCatalog> {
    /// Insert a FAQ and rebuild so the next query sees it.
    pub fn add_faq(
        &self,
        question: &str,
        answer: &str,
        tags: Option<Vec<String>>,
    ) -> anyhow::Result<FaqId> {
        let id = self.store.write().add(question, answer, tags)?;
        let documents = self.reindex()?;
        info!(id, documents, "added FAQ and reindexed");
        Ok(id)
    }
}
