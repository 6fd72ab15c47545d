use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuestionRepository, MongoUnitRepository, QuestionRepository, UnitRepository},
    services::{
        cache::RevisionInvalidator, export_service::ExportService,
        question_service::QuestionService, selection_service::SelectionService,
        unit_service::UnitService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub selection_service: Arc<SelectionService>,
    pub export_service: Arc<ExportService>,
    pub unit_service: Arc<UnitService>,
    pub revisions: Arc<RevisionInvalidator>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&db, &config.questions_collection));
        question_repository.ensure_indexes().await?;

        let unit_repository = Arc::new(MongoUnitRepository::new(&db, &config.units_collection));
        unit_repository.ensure_indexes().await?;

        Ok(Self::from_parts(config, question_repository, unit_repository))
    }

    /// Wire services over arbitrary store adapters
    pub fn from_parts(
        config: Config,
        question_repository: Arc<dyn QuestionRepository>,
        unit_repository: Arc<dyn UnitRepository>,
    ) -> Self {
        let revisions = Arc::new(RevisionInvalidator::new());

        let question_service = Arc::new(QuestionService::new(
            question_repository.clone(),
            revisions.clone(),
            config.default_page_limit,
        ));
        let selection_service = Arc::new(SelectionService::new(
            question_repository,
            config.max_generated_questions,
        ));
        let unit_service = Arc::new(UnitService::new(unit_repository));

        Self {
            question_service,
            selection_service,
            export_service: Arc::new(ExportService::new()),
            unit_service,
            revisions,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockQuestionRepository, MockUnitRepository};

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_from_parts_uses_config_limits() {
        let state = AppState::from_parts(
            Config::test_config(),
            Arc::new(MockQuestionRepository::new()),
            Arc::new(MockUnitRepository::new()),
        );
        assert_eq!(state.config.max_generated_questions, 100);
    }
}
