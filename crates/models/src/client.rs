use sea_orm::{entity::prelude::*, NotSet, Set, DatabaseConnection, QueryOrder, PaginatorTrait};
use serde::{Deserialize, Serialize};

use crate::{errors, manager, service_profile};

pub const COMPANY_NAME_MAX_LEN: usize = 256;
pub const LEGAL_FORM_MAX_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_name: String,
    pub legal_form: String,
    pub service_profile_id: i32,
    pub assigned_manager_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ServiceProfile, Manager }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceProfile => Entity::belongs_to(service_profile::Entity)
                .from(Column::ServiceProfileId)
                .to(service_profile::Column::Id)
                .into(),
            Relation::Manager => Entity::belongs_to(manager::Entity)
                .from(Column::AssignedManagerId)
                .to(manager::Column::Id)
                .into(),
        }
    }
}

impl Related<service_profile::Entity> for Entity {
    fn to() -> RelationDef { Relation::ServiceProfile.def() }
}

impl Related<manager::Entity> for Entity {
    fn to() -> RelationDef { Relation::Manager.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for an insert or a full overwrite.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientFields {
    pub company_name: String,
    pub legal_form: String,
    pub service_profile_id: i32,
    pub assigned_manager_id: Option<i32>,
}

pub fn validate_company_name(name: &str) -> Result<String, errors::ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation("company name must not be empty".into()));
    }
    if trimmed.chars().count() > COMPANY_NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("company name longer than {COMPANY_NAME_MAX_LEN} characters")));
    }
    Ok(trimmed.to_string())
}

pub fn validate_legal_form(form: &str) -> Result<String, errors::ModelError> {
    let trimmed = form.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation("legal form must not be empty".into()));
    }
    if trimmed.chars().count() > LEGAL_FORM_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("legal form longer than {LEGAL_FORM_MAX_LEN} characters")));
    }
    Ok(trimmed.to_string())
}

pub async fn create(db: &DatabaseConnection, fields: ClientFields) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        company_name: Set(validate_company_name(&fields.company_name)?),
        legal_form: Set(validate_legal_form(&fields.legal_form)?),
        service_profile_id: Set(fields.service_profile_id),
        assigned_manager_id: Set(fields.assigned_manager_id),
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

pub async fn list_by_manager(db: &DatabaseConnection, manager_id: i32) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::AssignedManagerId.eq(manager_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Clients assigned to `manager_id`, not counting `excluding`.
pub async fn count_by_manager(
    db: &DatabaseConnection,
    manager_id: i32,
    excluding: Option<i32>,
) -> Result<u64, errors::ModelError> {
    let mut finder = Entity::find().filter(Column::AssignedManagerId.eq(manager_id));
    if let Some(id) = excluding {
        finder = finder.filter(Column::Id.ne(id));
    }
    finder.count(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite every column; `None` when the row is gone.
pub async fn update(db: &DatabaseConnection, id: i32, fields: ClientFields) -> Result<Option<Model>, errors::ModelError> {
    let company_name = validate_company_name(&fields.company_name)?;
    let legal_form = validate_legal_form(&fields.legal_form)?;
    let Some(found) = Entity::find_by_id(id).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.company_name = Set(company_name);
    am.legal_form = Set(legal_form);
    am.service_profile_id = Set(fields.service_profile_id);
    am.assigned_manager_id = Set(fields.assigned_manager_id);
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}

/// Reassign (and optionally re-profile) a client; `None` when the row is gone.
pub async fn reassign(
    db: &DatabaseConnection,
    id: i32,
    manager_id: i32,
    service_profile_id: Option<i32>,
) -> Result<Option<Model>, errors::ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.assigned_manager_id = Set(Some(manager_id));
    if let Some(p) = service_profile_id {
        am.service_profile_id = Set(p);
    }
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}
