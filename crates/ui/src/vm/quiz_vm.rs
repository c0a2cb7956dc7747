use services::{Feedback, QuestionView};

pub const CORRECT_TEXT: &str = "Correct!";
pub const INCORRECT_TEXT: &str = "Incorrect";
pub const NO_EXPLANATION_TEXT: &str = "No explanation provided.";
pub const REVEAL_GUIDANCE_TEXT: &str = "Click the correct answer to continue.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    /// The chosen option was right.
    Correct,
    /// The chosen option was wrong.
    Wrong,
    /// The right option, revealed after a miss.
    Reveal,
}

impl OptionMark {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Neutral => "quiz-option",
            Self::Correct => "quiz-option quiz-option--correct",
            Self::Wrong => "quiz-option quiz-option--wrong",
            Self::Reveal => "quiz-option quiz-option--reveal",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub mark: OptionMark,
    pub enabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub kind: FeedbackKind,
    pub headline: &'static str,
    pub explanation: Option<String>,
    pub guidance: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub title: String,
    pub prompt_lines: Vec<String>,
    pub options: Vec<OptionVm>,
    /// `answered / total`.
    pub progress_text: String,
    /// CSS width of the progress bar fill.
    pub progress_width: String,
    pub feedback: Option<FeedbackVm>,
    pub can_continue: bool,
}

#[must_use]
pub fn map_quiz_card(view: &QuestionView) -> QuizCardVm {
    let options = view
        .options
        .iter()
        .map(|label| map_option(label, view.feedback.as_ref()))
        .collect();

    let feedback = view.feedback.as_ref().map(|feedback| match feedback {
        Feedback::Correct { .. } => FeedbackVm {
            kind: FeedbackKind::Correct,
            headline: CORRECT_TEXT,
            explanation: None,
            guidance: None,
        },
        Feedback::Incorrect { explanation, .. } => FeedbackVm {
            kind: FeedbackKind::Incorrect,
            headline: INCORRECT_TEXT,
            explanation: Some(
                explanation
                    .clone()
                    .unwrap_or_else(|| NO_EXPLANATION_TEXT.to_owned()),
            ),
            guidance: Some(REVEAL_GUIDANCE_TEXT),
        },
    });

    QuizCardVm {
        title: view.set_name.clone(),
        prompt_lines: view.prompt.lines().map(str::to_owned).collect(),
        options,
        progress_text: format!("{} / {}", view.progress.answered, view.progress.total),
        progress_width: format!("{:.1}%", view.progress.fraction_percent()),
        feedback,
        can_continue: matches!(view.feedback, Some(Feedback::Correct { .. })),
    }
}

fn map_option(label: &str, feedback: Option<&Feedback>) -> OptionVm {
    let (mark, enabled) = match feedback {
        None => (OptionMark::Neutral, true),
        Some(Feedback::Correct { chosen }) if chosen == label => (OptionMark::Correct, false),
        Some(Feedback::Correct { .. }) => (OptionMark::Neutral, false),
        Some(Feedback::Incorrect { correct_answer, .. }) if correct_answer == label => {
            (OptionMark::Reveal, true)
        }
        Some(Feedback::Incorrect { chosen, .. }) if chosen == label => (OptionMark::Wrong, false),
        Some(Feedback::Incorrect { .. }) => (OptionMark::Neutral, false),
    };
    OptionVm {
        label: label.to_owned(),
        mark,
        enabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::SessionProgress;

    fn view(feedback: Option<Feedback>) -> QuestionView {
        QuestionView {
            set_name: "Chemistry".into(),
            prompt: "Which gas\nis noble?".into(),
            options: vec!["Neon".into(), "Oxygen".into(), "Nitrogen".into()],
            feedback,
            progress: SessionProgress {
                total: 15,
                answered: 6,
                remaining: 9,
                is_complete: false,
            },
            is_redo: false,
        }
    }

    fn marks(vm: &QuizCardVm) -> Vec<(OptionMark, bool)> {
        vm.options.iter().map(|o| (o.mark, o.enabled)).collect()
    }

    #[test]
    fn presenting_card_has_all_options_enabled() {
        let vm = map_quiz_card(&view(None));
        assert_eq!(vm.prompt_lines, vec!["Which gas", "is noble?"]);
        assert_eq!(vm.progress_text, "6 / 15");
        assert_eq!(vm.progress_width, "40.0%");
        assert!(vm.feedback.is_none());
        assert!(!vm.can_continue);
        assert!(vm.options.iter().all(|o| o.enabled && o.mark == OptionMark::Neutral));
    }

    #[test]
    fn correct_answer_locks_options_and_offers_continue() {
        let vm = map_quiz_card(&view(Some(Feedback::Correct {
            chosen: "Neon".into(),
        })));
        assert_eq!(
            marks(&vm),
            vec![
                (OptionMark::Correct, false),
                (OptionMark::Neutral, false),
                (OptionMark::Neutral, false),
            ]
        );
        assert_eq!(vm.feedback.unwrap().headline, "Correct!");
        assert!(vm.can_continue);
    }

    #[test]
    fn miss_leaves_only_the_correct_option_enabled() {
        let vm = map_quiz_card(&view(Some(Feedback::Incorrect {
            chosen: "Oxygen".into(),
            correct_answer: "Neon".into(),
            explanation: None,
        })));
        assert_eq!(
            marks(&vm),
            vec![
                (OptionMark::Reveal, true),
                (OptionMark::Wrong, false),
                (OptionMark::Neutral, false),
            ]
        );
        let feedback = vm.feedback.unwrap();
        assert_eq!(feedback.kind, FeedbackKind::Incorrect);
        assert_eq!(feedback.explanation.as_deref(), Some("No explanation provided."));
        assert_eq!(feedback.guidance, Some("Click the correct answer to continue."));
        assert!(!vm.can_continue);
    }
}
