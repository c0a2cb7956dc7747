use dioxus::prelude::*;

use crate::context::AppContext;

#[component]
pub fn NamePromptView(on_saved: EventHandler<String>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut draft = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut failed = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        saving.set(true);
        failed.set(false);
        let profile = ctx.profile();
        let raw = draft.read().clone();
        spawn(async move {
            match profile.save_user_name(&raw).await {
                Ok(name) => on_saved.call(name),
                Err(_) => {
                    failed.set(true);
                    saving.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "page name-prompt",
            h1 { "Welcome!" }
            p { "Enter your name to track your results." }
            form { class: "name-prompt__form", onsubmit: submit,
                input {
                    id: "name-input",
                    r#type: "text",
                    placeholder: "Your name",
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: saving(),
                    "Continue"
                }
            }
            if failed() {
                p { class: "error", role: "alert", "Could not save your name. Please try again." }
            }
        }
    }
}
