mod index_vm;
mod quiz_vm;
mod results_vm;
mod time_fmt;

pub use index_vm::{IndexAction, IndexEntryVm, map_index_entries, start_error_message};
pub use quiz_vm::{
    FeedbackKind, FeedbackVm, OptionMark, OptionVm, QuizCardVm, map_quiz_card,
};
pub use results_vm::{MistakeLineVm, ResultsVm, encouragement, map_results};
pub use time_fmt::format_elapsed;
