use dioxus::prelude::*;

use crate::vm::IndexEntryVm;

#[component]
pub fn IndexView(
    user_name: String,
    entries: Vec<IndexEntryVm>,
    error: Option<String>,
    on_choose: EventHandler<String>,
) -> Element {
    let cards = entries.into_iter().map(|entry| {
        let key = entry.set_name.clone();
        rsx! {
            IndexCard { key: "{key}", entry, on_choose }
        }
    });

    rsx! {
        div { class: "page index",
            h1 { class: "index__welcome", "Welcome, {user_name}!" }
            if let Some(message) = error {
                p { class: "error", role: "alert", "{message}" }
            }
            div { class: "index__list",
                {cards}
            }
        }
    }
}

#[component]
fn IndexCard(entry: IndexEntryVm, on_choose: EventHandler<String>) -> Element {
    let set_name = entry.set_name.clone();
    rsx! {
        div { class: "index-card",
            div { class: "index-card__body",
                h3 { class: "index-card__name", "{entry.set_name}" }
                if let Some(done) = entry.done_label.as_ref() {
                    span { class: "score-badge completed", "{done}" }
                }
            }
            button {
                class: "{entry.action.class()}",
                r#type: "button",
                onclick: move |_| on_choose.call(set_name.clone()),
                "{entry.action.label()}"
            }
        }
    }
}
