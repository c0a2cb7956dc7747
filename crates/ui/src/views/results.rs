use dioxus::prelude::*;

use crate::vm::{MistakeLineVm, ResultsVm};

#[component]
pub fn ResultsView(vm: ResultsVm, on_redo: EventHandler<()>, on_home: EventHandler<()>) -> Element {
    let mistakes = vm.mistakes.iter().map(|line| rsx! { MistakeLine { line: line.clone() } });

    rsx! {
        div { class: "page results",
            h2 { class: "results__heading", "{vm.heading}" }
            div { class: "results__stats",
                p { "Score: " span { class: "results__score", "{vm.score_text}" } }
                p { "Percentage: " span { class: "results__percentage", "{vm.percentage}%" } }
                p { "Time: " span { class: "results__time", "{vm.time_text}" } }
            }
            div { class: "results__track",
                div { class: "results__track-fill", style: "width: {vm.percentage}%" }
            }
            p { class: "results__encouragement", "{vm.encouragement}" }
            if !vm.mistakes.is_empty() {
                h3 { "Review your mistakes" }
                ul { class: "results__mistakes", {mistakes} }
            }
            div { class: "results__actions",
                if vm.show_redo {
                    button {
                        class: "btn btn-primary",
                        id: "results-redo",
                        r#type: "button",
                        onclick: move |_| on_redo.call(()),
                        "Redo Incorrect Answers"
                    }
                }
                button {
                    class: "btn btn-secondary",
                    id: "results-home",
                    r#type: "button",
                    onclick: move |_| on_home.call(()),
                    "Back to sets"
                }
            }
        }
    }
}

#[component]
fn MistakeLine(line: MistakeLineVm) -> Element {
    rsx! {
        li {
            b { "Q: " }
            "{line.question}"
            br {}
            b { "Your Answer: " }
            span { class: "answer--wrong", "{line.user_answer}" }
            br {}
            b { "Correct Answer: " }
            span { class: "answer--right", "{line.correct_answer}" }
        }
    }
}
