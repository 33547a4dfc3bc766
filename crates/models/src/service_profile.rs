use sea_orm::{entity::prelude::*, NotSet, Set, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::{errors, manager, client};

pub const NAME_MAX_LEN: usize = 128;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Managers, Clients }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Managers => Entity::has_many(manager::Entity).into(),
            Relation::Clients => Entity::has_many(client::Entity).into(),
        }
    }
}

impl Related<manager::Entity> for Entity {
    fn to() -> RelationDef { Relation::Managers.def() }
}

impl Related<client::Entity> for Entity {
    fn to() -> RelationDef { Relation::Clients.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Trimmed, non-empty profile name.
pub fn validate_name(name: &str) -> Result<String, errors::ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation("service profile name must not be empty".into()));
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("service profile name longer than {NAME_MAX_LEN} characters")));
    }
    Ok(trimmed.to_string())
}

pub async fn create(db: &DatabaseConnection, name: &str) -> Result<Model, errors::ModelError> {
    let name = validate_name(name)?;
    let am = ActiveModel { id: NotSet, name: Set(name) };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
