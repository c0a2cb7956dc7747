use dioxus::prelude::*;

use crate::vm::{FeedbackKind, FeedbackVm, OptionVm, QuizCardVm};

#[component]
pub fn QuizCardView(
    vm: QuizCardVm,
    on_option: EventHandler<String>,
    on_continue: EventHandler<()>,
    on_home: EventHandler<()>,
) -> Element {
    let prompt = vm.prompt_lines.iter().map(|line| rsx! { p { "{line}" } });
    let options = vm.options.iter().cloned().map(|option| {
        let key = option.label.clone();
        rsx! {
            OptionButton { key: "{key}", option, on_option }
        }
    });

    rsx! {
        div { class: "page quiz",
            header { class: "quiz__header",
                button {
                    class: "btn btn-ghost",
                    id: "quiz-home",
                    r#type: "button",
                    onclick: move |_| on_home.call(()),
                    "Back to sets"
                }
                h2 { class: "quiz__title", "{vm.title}" }
                span { class: "quiz__progress-text", "{vm.progress_text}" }
            }
            div { class: "quiz__progress",
                div { class: "quiz__progress-fill", style: "width: {vm.progress_width}" }
            }
            div { class: "quiz__prompt", {prompt} }
            div { class: "quiz__options", {options} }
            if let Some(feedback) = vm.feedback.clone() {
                FeedbackPanel { feedback }
            }
            if vm.can_continue {
                button {
                    class: "btn btn-primary",
                    id: "quiz-continue",
                    r#type: "button",
                    onclick: move |_| on_continue.call(()),
                    "Continue"
                }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, on_option: EventHandler<String>) -> Element {
    let label = option.label.clone();
    rsx! {
        button {
            class: "{option.mark.class()}",
            r#type: "button",
            disabled: !option.enabled,
            onclick: move |_| on_option.call(label.clone()),
            "{option.label}"
        }
    }
}

#[component]
fn FeedbackPanel(feedback: FeedbackVm) -> Element {
    let (class, icon) = match feedback.kind {
        FeedbackKind::Correct => ("feedback feedback--correct", "✓"),
        FeedbackKind::Incorrect => ("feedback feedback--incorrect", "✗"),
    };
    rsx! {
        div { class: "{class}",
            span { class: "feedback__icon", "{icon}" }
            p { class: "feedback__headline", "{feedback.headline}" }
            if let Some(explanation) = feedback.explanation.as_ref() {
                div { class: "explanation-container",
                    b { "Explanation: " }
                    "{explanation}"
                }
            }
            if let Some(guidance) = feedback.guidance {
                div { class: "prompt-guidance", "{guidance}" }
            }
        }
    }
}
