mod mistake;
mod question;
mod record;
mod set;
mod settings;
mod submission;

pub use mistake::Mistake;
pub use question::Question;
pub use record::{SessionRecord, percentage};
pub use set::{FlashcardSet, SetCatalog};
pub use settings::{QuizSettings, SettingsError};
pub use submission::{MistakeEntry, Submission};
