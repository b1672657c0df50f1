use faqmatch_core::config::MatchConfig;
use faqmatch_core::traits::AnswerSource;
use faqmatch_core::types::{QueryResult, Reply, Status};

pub fn classify(confidence: f64, config: &MatchConfig) -> Status {
    if confidence >= config.understood_threshold {
        Status::Understood
    } else if confidence >= config.ambiguous_threshold {
        Status::Ambiguous
    } else {
        Status::NotUnderstood
    }
}

/// Turn a ranked result into the reply shape handed to the API layer.
///
/// Only `Understood` consults `answers`, for the top-ranked id.
pub fn respond(
    result: Option<&QueryResult>,
    config: &MatchConfig,
    answers: &dyn AnswerSource,
) -> anyhow::Result<Reply> {
    let Some(result) = result else {
        return Ok(Reply::not_understood());
    };
    let Some(top) = result.top() else {
        return Ok(Reply::not_understood());
    };

    let reply = match classify(result.confidence, config) {
        Status::Understood => Reply {
            answer: answers.answer(top.id)?,
            confidence: result.confidence,
            matched_question: Some(top.question.clone()),
            alternatives: Vec::new(),
            status: Status::Understood,
        },
        Status::Ambiguous => Reply {
            answer: None,
            confidence: result.confidence,
            matched_question: Some(top.question.clone()),
            alternatives: result.questions(),
            status: Status::Ambiguous,
        },
        Status::NotUnderstood => Reply {
            answer: None,
            confidence: result.confidence,
            matched_question: None,
            alternatives: result.questions(),
            status: Status::NotUnderstood,
        },
    };
    Ok(reply)
}
