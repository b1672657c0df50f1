use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::traits::{AnswerSource, CorpusSource};
use crate::types::{FaqEntry, FaqId, FaqQuestion};

pub const DEFAULT_LANG: &str = "es";
/// Shortest accepted question or answer, in characters.
pub const MIN_TEXT_CHARS: usize = 5;

/// In-memory FAQ store. Ids auto-increment from 1 in insertion order.
#[derive(Debug, Clone)]
pub struct FaqCatalog {
    entries: Vec<FaqEntry>,
    next_id: FaqId,
}

impl FaqCatalog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Load a JSON list of `{question, answer, tags?}` objects.
    ///
    /// Records that are not objects, lack a string question or answer, or
    /// fail [`FaqCatalog::add`] are skipped. `tags` is kept only when it is
    /// a list of strings.
    pub fn load_json(path: &Path) -> anyhow::Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => String::from_utf8_lossy(&fs::read(path)?).to_string(),
        };
        let text = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
        let records: Vec<Value> = serde_json::from_str(text).map_err(|e| {
            anyhow::anyhow!(
                "{}: expected a JSON list of FAQ objects: {}",
                path.display(),
                e
            )
        })?;

        let mut catalog = Self::new();
        let mut skipped = 0usize;
        for (i, record) in records.iter().enumerate() {
            let added = match (text_field(record, "question"), text_field(record, "answer")) {
                (Some(question), Some(answer)) => {
                    catalog.add(question, answer, tags_field(record))
                }
                _ => Err(Error::Catalog(
                    "question and answer must be strings".to_string(),
                )),
            };
            if let Err(e) = added {
                warn!(record = i + 1, error = %e, "skipping seed record");
                skipped += 1;
            }
        }
        info!(
            path = %path.display(),
            loaded = catalog.len(),
            skipped,
            "loaded FAQ catalog"
        );
        Ok(catalog)
    }

    /// Append a FAQ. Question and answer are trimmed and must keep at least
    /// [`MIN_TEXT_CHARS`] characters.
    pub fn add(
        &mut self,
        question: &str,
        answer: &str,
        tags: Option<Vec<String>>,
    ) -> Result<FaqId> {
        let question = question.trim();
        let answer = answer.trim();
        let too_short = |s: &str| s.chars().count() < MIN_TEXT_CHARS;
        if too_short(question) || too_short(answer) {
            return Err(Error::Catalog(format!(
                "question and answer need at least {} characters",
                MIN_TEXT_CHARS
            )));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(FaqEntry {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
            tags,
            lang: DEFAULT_LANG.to_string(),
        });
        Ok(id)
    }

    pub fn get(&self, id: FaqId) -> Option<&FaqEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn text_field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record.get(key)?.as_str()
}

fn tags_field(record: &Value) -> Option<Vec<String>> {
    record
        .get("tags")?
        .as_array()?
        .iter()
        .map(|t| t.as_str().map(str::to_string))
        .collect()
}

impl Default for FaqCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusSource for FaqCatalog {
    fn questions(&self) -> anyhow::Result<Vec<FaqQuestion>> {
        Ok(self
            .entries()
            .iter()
            .map(|e| FaqQuestion::new(e.id, e.question.clone()))
            .collect())
    }
}

impl AnswerSource for FaqCatalog {
    fn answer(&self, id: FaqId) -> anyhow::Result<Option<String>> {
        Ok(self.get(id).map(|e| e.answer.clone()))
    }
}
