use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::{Topic, Unit},
    repositories::UnitRepository,
};

pub struct UnitService {
    repository: Arc<dyn UnitRepository>,
}

impl UnitService {
    pub fn new(repository: Arc<dyn UnitRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_units(&self) -> AppResult<Vec<Unit>> {
        self.repository.list_units().await
    }

    pub async fn topics_for_unit(&self, unit_id: i64) -> AppResult<Vec<Topic>> {
        self.repository.topics_for_unit(unit_id).await
    }
}
