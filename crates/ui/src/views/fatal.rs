use dioxus::prelude::*;

use crate::views::ViewError;

/// Full-screen error; nothing else is usable until the app is restarted.
#[component]
pub fn FatalErrorView(error: ViewError) -> Element {
    rsx! {
        div { class: "fatal", role: "alert",
            h1 { "{error.title()}" }
            p { "{error.message()}" }
            if let Some(details) = error.details() {
                p { class: "fatal-details", "Details: {details}" }
            }
        }
    }
}
