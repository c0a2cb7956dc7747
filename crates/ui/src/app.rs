use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{
    FatalErrorView, NamePromptView, QuizShell, ViewError, ViewState, view_state_from_resource,
};

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Flashcard Quiz" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Root {}
            }
        }
    }
}

/// Asks for a display name once, then hands over to the quiz shell.
#[component]
fn Root() -> Element {
    let ctx = use_context::<AppContext>();
    let mut entered_name = use_signal(|| None::<String>);
    let stored_name = {
        let profile = ctx.profile();
        use_resource(move || {
            let profile = profile.clone();
            async move {
                profile
                    .load_user_name()
                    .await
                    .map_err(|_| ViewError::Unknown)
            }
        })
    };

    if let Some(user_name) = entered_name.read().clone() {
        return rsx! { QuizShell { user_name } };
    }

    match view_state_from_resource(&stored_name) {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { class: "loading", "Loading..." }
        },
        ViewState::Ready(Some(user_name)) => rsx! { QuizShell { user_name } },
        ViewState::Ready(None) => rsx! {
            NamePromptView { on_saved: move |name: String| entered_name.set(Some(name)) }
        },
        ViewState::Error(error) => rsx! { FatalErrorView { error } },
    }
}
