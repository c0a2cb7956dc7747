mod fatal;
mod index;
mod name_prompt;
mod quiz;
mod results;
mod shell;
mod state;

#[cfg(test)]
mod view_smoke;

pub use fatal::FatalErrorView;
pub use index::IndexView;
pub use name_prompt::NamePromptView;
pub use quiz::QuizCardView;
pub use results::ResultsView;
pub use shell::QuizShell;
pub use state::{ViewError, ViewState, view_state_from_resource};
