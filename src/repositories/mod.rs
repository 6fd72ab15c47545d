pub mod question_repository;
pub mod unit_repository;

pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use unit_repository::{MongoUnitRepository, UnitRepository};

#[cfg(test)]
pub use question_repository::MockQuestionRepository;
#[cfg(test)]
pub use unit_repository::MockUnitRepository;
