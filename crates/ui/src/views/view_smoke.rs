use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{FlashcardSet, Mistake, Question, QuizSettings, SessionRecord, SetCatalog};
use quiz_core::time::fixed_clock;
use services::{
    AppServices, CatalogService, HistoryCache, ProfileService, SessionDriver, SessionSummary,
    UserResults,
};
use storage::repository::{FlashcardSource, InMemoryRepository, Storage, StorageError};

use crate::context::{UiApp, build_app_context};
use crate::views::{QuizCardView, QuizShell, ResultsView};
use crate::vm::{QuizCardVm, ResultsVm, map_quiz_card, map_results};

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn profile(&self) -> Arc<ProfileService> {
        self.services.profile()
    }

    fn history(&self) -> HistoryCache {
        self.services.history().clone()
    }

    fn session_driver(&self, user_name: &str) -> SessionDriver {
        self.services.session_driver(user_name)
    }
}

#[derive(Props, Clone)]
struct ShellHarnessProps {
    app: Arc<TestApp>,
    user_name: String,
}

impl PartialEq for ShellHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ShellHarness(props: ShellHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(app));
    rsx! { QuizShell { user_name: props.user_name.clone() } }
}

#[component]
fn ResultsHarness(vm: ResultsVm) -> Element {
    rsx! { ResultsView { vm, on_redo: move |()| {}, on_home: move |()| {} } }
}

#[component]
fn CardHarness(vm: QuizCardVm) -> Element {
    rsx! {
        QuizCardView {
            vm,
            on_option: move |_: String| {},
            on_continue: move |()| {},
            on_home: move |()| {},
        }
    }
}

struct Unreachable;

#[async_trait]
impl FlashcardSource for Unreachable {
    async fn fetch_sets(&self) -> Result<SetCatalog, StorageError> {
        Err(StorageError::Connection("dns failure".into()))
    }

    async fn fetch_user_results(&self, _user_name: &str) -> Result<UserResults, StorageError> {
        Ok(UserResults::new())
    }
}

fn set(name: &str, size: usize) -> FlashcardSet {
    let questions = (0..size)
        .map(|n| {
            Question::new(
                format!("{name} {n}"),
                vec![format!("yes {n}"), format!("no {n}")],
                format!("yes {n}"),
                None,
            )
        })
        .collect();
    FlashcardSet::new(name, questions)
}

async fn render_shell(storage: &Storage) -> String {
    let services = AppServices::from_storage(storage, QuizSettings::default(), fixed_clock());
    let app = Arc::new(TestApp { services });
    let mut dom = VirtualDom::new_with_props(
        ShellHarness,
        ShellHarnessProps {
            app,
            user_name: "Ana".into(),
        },
    );
    dom.rebuild_in_place();
    for _ in 0..4 {
        let _ = tokio::time::timeout(std::time::Duration::from_millis(50), dom.wait_for_work())
            .await;
        dom.render_immediate(&mut NoOpMutations);
        dom.process_events();
    }
    dioxus_ssr::render(&dom)
}

#[tokio::test(flavor = "current_thread")]
async fn shell_lists_sets_with_history() {
    let repo = InMemoryRepository::new();
    repo.put_set(set("Algebra", 20)).unwrap();
    repo.put_set(set("Empty", 0)).unwrap();
    repo.put_set(set("Biology", 15)).unwrap();
    repo.put_user_result("Ana", "Algebra", SessionRecord::new(12, 15, 80))
        .unwrap();

    let html = render_shell(&Storage::from_in_memory(&repo)).await;
    assert!(html.contains("Welcome, Ana!"), "missing welcome in {html}");
    assert!(html.contains("Done: 12/15"), "missing badge in {html}");
    assert!(html.contains("Redo"), "missing redo action in {html}");
    assert!(html.contains("Biology"), "missing set in {html}");
    assert!(!html.contains("Empty"), "empty set listed in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn shell_blocks_on_load_failure() {
    let repo = InMemoryRepository::new();
    let mut storage = Storage::from_in_memory(&repo);
    storage.sets = Arc::new(Unreachable);

    let html = render_shell(&storage).await;
    assert!(html.contains("Error Loading Data"), "missing error in {html}");
    assert!(
        html.contains("Details: could not load quiz data: connection error: dns failure"),
        "missing details in {html}"
    );
    assert!(!html.contains("Welcome"), "index rendered in {html}");
}

#[test]
fn results_view_renders_summary() {
    let question = Question::new("Two\nplus two?", vec!["4".into(), "5".into()], "4", None);
    let summary = SessionSummary {
        set_name: "Arithmetic".into(),
        score: 14,
        total: 15,
        percentage: 93,
        time_taken_secs: 48,
        mistakes: vec![Mistake::new(question, "5")],
        was_redo: false,
        redo_offered: true,
    };

    let mut dom = VirtualDom::new_with_props(
        ResultsHarness,
        ResultsHarnessProps {
            vm: map_results(&summary),
        },
    );
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);

    assert!(html.contains("Set \"Arithmetic\" Complete!") || html.contains("Set &quot;Arithmetic&quot; Complete!"));
    assert!(html.contains("14 / 15"), "missing score in {html}");
    assert!(html.contains("Great job! Keep up the good work!"), "missing encouragement in {html}");
    assert!(html.contains("Two plus two?"), "missing mistake in {html}");
    assert!(html.contains("Redo Incorrect Answers"), "missing redo in {html}");
}

#[test]
fn quiz_card_renders_reveal_state() {
    let view = services::QuestionView {
        set_name: "Arithmetic".into(),
        prompt: "Two plus two?".into(),
        options: vec!["5".into(), "4".into()],
        feedback: Some(services::Feedback::Incorrect {
            chosen: "5".into(),
            correct_answer: "4".into(),
            explanation: Some("Count on your fingers.".into()),
        }),
        progress: services::SessionProgress {
            total: 15,
            answered: 3,
            remaining: 12,
            is_complete: false,
        },
        is_redo: false,
    };

    let mut dom = VirtualDom::new_with_props(
        CardHarness,
        CardHarnessProps {
            vm: map_quiz_card(&view),
        },
    );
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);

    assert!(html.contains("3 / 15"), "missing progress in {html}");
    assert!(html.contains("quiz-option--reveal"), "missing reveal in {html}");
    assert!(html.contains("quiz-option--wrong"), "missing wrong mark in {html}");
    assert!(html.contains("Count on your fingers."), "missing explanation in {html}");
    assert!(html.contains("Click the correct answer to continue."));
    assert!(!html.contains("quiz-continue"), "continue offered in {html}");
}
