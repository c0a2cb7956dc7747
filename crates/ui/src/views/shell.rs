use dioxus::prelude::*;

use services::{QuizSnapshot, SessionDriver, SessionError, SessionEvent};

use crate::context::AppContext;
use crate::views::{
    FatalErrorView, IndexView, QuizCardView, ResultsView, ViewError, ViewState,
    view_state_from_resource,
};
use crate::vm::{map_index_entries, map_quiz_card, map_results, start_error_message};

fn dispatch(mut driver: Signal<SessionDriver>, event: SessionEvent) -> Result<(), SessionError> {
    driver.write().dispatch(event).map(|_| ())
}

fn dispatch_logged(driver: Signal<SessionDriver>, event: SessionEvent) {
    if let Err(err) = dispatch(driver, event) {
        tracing::warn!(error = %err, "quiz event rejected");
    }
}

/// Loads the catalog for `user_name`, then shows the index, a quiz card or
/// the results depending on the live session.
#[component]
pub fn QuizShell(user_name: String) -> Element {
    let ctx = use_context::<AppContext>();
    let driver = use_signal({
        let ctx = ctx.clone();
        let user_name = user_name.clone();
        move || ctx.session_driver(&user_name)
    });
    let mut start_error = use_signal(|| None::<String>);

    // Feed fired advance tickets back in; the controller drops stale ones.
    use_future(move || async move {
        let mut driver = driver;
        let Some(mut tickets) = driver.write().take_tickets() else {
            return;
        };
        while let Some(ticket) = tickets.recv().await {
            dispatch_logged(driver, SessionEvent::AdvanceTimerFired(ticket));
        }
    });

    let loaded = {
        let catalog = ctx.catalog();
        let user_name = user_name.clone();
        use_resource(move || {
            let catalog = catalog.clone();
            let user_name = user_name.clone();
            async move {
                catalog
                    .load(&user_name)
                    .await
                    .map_err(|err| ViewError::DataUnavailable {
                        details: err.to_string(),
                    })
            }
        })
    };

    let loaded = match view_state_from_resource(&loaded) {
        ViewState::Ready(loaded) => loaded,
        ViewState::Idle | ViewState::Loading => {
            return rsx! {
                div { class: "page index",
                    p { class: "loading", "Loading practice sets..." }
                }
            };
        }
        ViewState::Error(err) => return rsx! { FatalErrorView { error: err } },
    };

    let snapshot = driver.read().snapshot();
    match snapshot {
        QuizSnapshot::Idle => {
            let entries = map_index_entries(&loaded.sets, &ctx.history().snapshot());
            let sets = loaded.sets;
            rsx! {
                IndexView {
                    user_name,
                    entries,
                    error: start_error.read().clone(),
                    on_choose: move |set_name: String| {
                        let Some(set) = sets.get(&set_name).cloned() else {
                            return;
                        };
                        match dispatch(driver, SessionEvent::Start(set)) {
                            Ok(()) => start_error.set(None),
                            Err(err) => start_error.set(Some(start_error_message(&err))),
                        }
                    },
                }
            }
        }
        QuizSnapshot::Question(view) => rsx! {
            QuizCardView {
                vm: map_quiz_card(&view),
                on_option: move |answer: String| {
                    dispatch_logged(driver, SessionEvent::OptionChosen(answer));
                },
                on_continue: move |()| dispatch_logged(driver, SessionEvent::ContinueClicked),
                on_home: move |()| dispatch_logged(driver, SessionEvent::ReturnToIndex),
            }
        },
        QuizSnapshot::Complete(summary) => rsx! {
            ResultsView {
                vm: map_results(&summary),
                on_redo: move |()| dispatch_logged(driver, SessionEvent::RedoRequested),
                on_home: move |()| dispatch_logged(driver, SessionEvent::ReturnToIndex),
            }
        },
    }
}
