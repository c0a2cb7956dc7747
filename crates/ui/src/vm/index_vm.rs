use quiz_core::model::SetCatalog;
use services::{SessionError, UserResults};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexAction {
    Start,
    Redo,
}

impl IndexAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Redo => "Redo",
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Start => "btn index-action index-action--start",
            Self::Redo => "btn index-action index-action--redo",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntryVm {
    pub set_name: String,
    /// `Done: score/total` once a result has been recorded for the set.
    pub done_label: Option<String>,
    pub action: IndexAction,
}

/// One entry per non-empty set, in catalog order.
#[must_use]
pub fn map_index_entries(sets: &SetCatalog, results: &UserResults) -> Vec<IndexEntryVm> {
    sets.iter()
        .filter(|set| !set.is_empty())
        .map(|set| {
            let record = results.get(set.name());
            IndexEntryVm {
                set_name: set.name().to_owned(),
                done_label: record.map(|r| format!("Done: {}/{}", r.score, r.total)),
                action: if record.is_some() {
                    IndexAction::Redo
                } else {
                    IndexAction::Start
                },
            }
        })
        .collect()
}

/// Message shown on the index when a set cannot be started.
#[must_use]
pub fn start_error_message(err: &SessionError) -> String {
    match err {
        SessionError::InsufficientQuestions {
            set_name,
            available,
            required,
        } => format!(
            "The set \"{set_name}\" only has {available} questions, but {required} are required. \
             Please add more questions to the sheet."
        ),
        other => other.to_string(),
    }
}
