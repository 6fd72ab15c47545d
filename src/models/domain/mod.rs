pub mod blooms_level;
pub mod question;
pub mod question_filter;
pub mod unit;

pub use blooms_level::BloomsLevel;
pub use question::{AnswerKey, Question, QuestionDraft};
pub use question_filter::{QuestionFilter, SelectionCriteria, SortOrder};
pub use unit::{Topic, Unit};
