use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Topic, Unit},
};

/// Read access to the unit/topic reference data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitRepository: Send + Sync {
    async fn list_units(&self) -> AppResult<Vec<Unit>>;
    async fn topics_for_unit(&self, unit_id: i64) -> AppResult<Vec<Topic>>;
}

pub struct MongoUnitRepository {
    collection: Collection<Unit>,
}

impl MongoUnitRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for units collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for units collection");
        Ok(())
    }
}

#[async_trait]
impl UnitRepository for MongoUnitRepository {
    async fn list_units(&self) -> AppResult<Vec<Unit>> {
        let units: Vec<Unit> = self
            .collection
            .find(doc! {})
            .sort(doc! { "id": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(units.into_iter().map(Unit::sorted).collect())
    }

    async fn topics_for_unit(&self, unit_id: i64) -> AppResult<Vec<Topic>> {
        let unit = self
            .collection
            .find_one(doc! { "id": unit_id })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Unit with id '{}' not found", unit_id)))?;

        Ok(unit.sorted().topics)
    }
}
