use services::SessionSummary;

use crate::vm::time_fmt::format_elapsed;

pub const REVIEW_HEADING: &str = "Mistakes Review Complete!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MistakeLineVm {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub heading: String,
    pub score_text: String,
    pub percentage: u32,
    pub time_text: String,
    pub encouragement: &'static str,
    pub mistakes: Vec<MistakeLineVm>,
    pub show_redo: bool,
}

#[must_use]
pub fn encouragement(percentage: u32) -> &'static str {
    match percentage {
        100.. => "Excellent! You're a top scorer!",
        70..=99 => "Great job! Keep up the good work!",
        _ => "Good effort! Practice makes perfect!",
    }
}

#[must_use]
pub fn map_results(summary: &SessionSummary) -> ResultsVm {
    let heading = if summary.was_redo {
        REVIEW_HEADING.to_owned()
    } else {
        format!("Set \"{}\" Complete!", summary.set_name)
    };

    let mistakes = summary
        .mistakes
        .iter()
        .map(|mistake| MistakeLineVm {
            question: flatten_lines(mistake.question.prompt()),
            user_answer: mistake.user_answer.clone(),
            correct_answer: mistake.question.correct_answer().to_owned(),
        })
        .collect();

    ResultsVm {
        heading,
        score_text: format!("{} / {}", summary.score, summary.total),
        percentage: summary.percentage,
        time_text: format_elapsed(summary.time_taken_secs),
        encouragement: encouragement(summary.percentage),
        mistakes,
        show_redo: summary.redo_offered,
    }
}

fn flatten_lines(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}
