use sea_orm::{entity::prelude::*, NotSet, Set, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::{errors, service_profile, client};

pub const FULL_NAME_MAX_LEN: usize = 256;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "managers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    pub service_profile_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ServiceProfile, Clients }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceProfile => Entity::belongs_to(service_profile::Entity)
                .from(Column::ServiceProfileId)
                .to(service_profile::Column::Id)
                .into(),
            Relation::Clients => Entity::has_many(client::Entity).into(),
        }
    }
}

impl Related<service_profile::Entity> for Entity {
    fn to() -> RelationDef { Relation::ServiceProfile.def() }
}

impl Related<client::Entity> for Entity {
    fn to() -> RelationDef { Relation::Clients.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_full_name(name: &str) -> Result<String, errors::ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation("full name must not be empty".into()));
    }
    if trimmed.chars().count() > FULL_NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("full name longer than {FULL_NAME_MAX_LEN} characters")));
    }
    Ok(trimmed.to_string())
}

pub async fn create(db: &DatabaseConnection, full_name: &str, service_profile_id: i32) -> Result<Model, errors::ModelError> {
    let full_name = validate_full_name(full_name)?;
    let am = ActiveModel {
        id: NotSet,
        full_name: Set(full_name),
        service_profile_id: Set(service_profile_id),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite name and profile; `None` when the row is gone.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    full_name: &str,
    service_profile_id: i32,
) -> Result<Option<Model>, errors::ModelError> {
    let full_name = validate_full_name(full_name)?;
    let Some(found) = Entity::find_by_id(id).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.full_name = Set(full_name);
    am.service_profile_id = Set(service_profile_id);
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_rules() {
        assert_eq!(validate_full_name(" Ivan Petrov ").unwrap(), "Ivan Petrov");
        assert!(validate_full_name("").is_err());
    }
}
