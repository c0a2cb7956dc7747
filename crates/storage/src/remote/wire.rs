//! JSON shapes exchanged with the spreadsheet web app.

use std::collections::HashMap;
use std::fmt;

use quiz_core::model::{FlashcardSet, MistakeEntry, Question, SessionRecord, SetCatalog, Submission};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::repository::{StorageError, SubmitAck, SubmitStatus, UserResults};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionRecord {
    question: String,
    options: Vec<String>,
    correct_answer: String,
    #[serde(default)]
    explanation: Option<String>,
}

impl QuestionRecord {
    pub(crate) fn into_question(self) -> Question {
        Question::new(
            self.question,
            self.options,
            self.correct_answer,
            self.explanation,
        )
    }
}

/// Set mapping decoded in document order.
pub(crate) struct SetsPayload(pub(crate) SetCatalog);

impl<'de> Deserialize<'de> for SetsPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetsVisitor;

        impl<'de> Visitor<'de> for SetsVisitor {
            type Value = SetsPayload;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of set name to question list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut catalog = SetCatalog::new();
                while let Some((name, questions)) =
                    map.next_entry::<String, Vec<QuestionRecord>>()?
                {
                    let questions = questions
                        .into_iter()
                        .map(QuestionRecord::into_question)
                        .collect();
                    catalog.insert(FlashcardSet::new(name, questions));
                }
                Ok(SetsPayload(catalog))
            }
        }

        deserializer.deserialize_map(SetsVisitor)
    }
}

#[derive(Debug, Deserialize)]
struct ResultRecord {
    score: u32,
    total: u32,
    #[serde(default)]
    percentage: Option<u32>,
}

/// Error member the web app sets instead of data.
#[derive(Debug, Deserialize)]
struct ErrorProbe {
    #[serde(default)]
    error: Option<serde_json::Value>,
}

fn check_error_payload(body: &str) -> Result<(), StorageError> {
    // Non-object bodies fall through to the typed decode, which reports them.
    let Ok(probe) = serde_json::from_str::<ErrorProbe>(body) else {
        return Ok(());
    };
    match probe.error {
        None => Ok(()),
        // A set literally named "error" still carries a question list.
        Some(serde_json::Value::Array(_)) => Ok(()),
        Some(value) if is_falsy(&value) => Ok(()),
        Some(serde_json::Value::String(message)) => Err(StorageError::Remote(message)),
        Some(other) => Err(StorageError::Remote(other.to_string())),
    }
}

fn is_falsy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(flag) => !flag,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n == 0.0),
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => false,
    }
}

pub(crate) fn decode_sets(body: &str) -> Result<SetCatalog, StorageError> {
    check_error_payload(body)?;
    serde_json::from_str::<SetsPayload>(body)
        .map(|payload| payload.0)
        .map_err(|err| StorageError::Serialization(err.to_string()))
}

pub(crate) fn decode_user_results(body: &str) -> Result<UserResults, StorageError> {
    check_error_payload(body)?;
    let raw: HashMap<String, ResultRecord> = serde_json::from_str(body)
        .map_err(|err| StorageError::Serialization(err.to_string()))?;
    Ok(raw
        .into_iter()
        .map(|(name, record)| {
            let record = match record.percentage {
                Some(percentage) => SessionRecord::new(record.score, record.total, percentage),
                None => SessionRecord::from_score(record.score, record.total),
            };
            (name, record)
        })
        .collect())
}

#[derive(Debug, Serialize)]
struct MistakeRecord<'a> {
    q: &'a str,
    u: &'a str,
    c: &'a str,
}

impl<'a> From<&'a MistakeEntry> for MistakeRecord<'a> {
    fn from(entry: &'a MistakeEntry) -> Self {
        Self {
            q: &entry.question,
            u: &entry.user_answer,
            c: &entry.correct_answer,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitPayload<'a> {
    name: &'a str,
    set_name: &'a str,
    score: u32,
    total_questions: u32,
    percentage: u32,
    time_taken: u64,
    #[serde(rename = "incorrectAnswersJSON")]
    incorrect_answers_json: String,
}

impl<'a> SubmitPayload<'a> {
    pub(crate) fn from_submission(submission: &'a Submission) -> Result<Self, StorageError> {
        let mistakes: Vec<MistakeRecord<'_>> =
            submission.mistakes.iter().map(MistakeRecord::from).collect();
        let incorrect_answers_json = serde_json::to_string(&mistakes)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(Self {
            name: &submission.user_name,
            set_name: &submission.set_name,
            score: submission.score,
            total_questions: submission.total,
            percentage: submission.percentage,
            time_taken: submission.time_taken_secs,
            incorrect_answers_json,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitReply {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

impl SubmitReply {
    pub(crate) fn into_ack(self) -> SubmitAck {
        let status = if self.status == "success" {
            SubmitStatus::Success
        } else {
            SubmitStatus::Failure
        };
        SubmitAck {
            status,
            message: self.message,
        }
    }
}
