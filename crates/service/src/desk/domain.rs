//! Request inputs and response views for the desk service.
//!
//! Inputs mirror the JSON bodies the browser frontend sends (camelCase, every
//! field optional so that missing fields are reported per field instead of as
//! a body parse failure). Id fields are kept as raw JSON values so that a
//! non-integer id is reported under its own field name. `validate` turns an
//! input into the typed values the service works with.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use models::{client, client::ClientFields, manager, service_profile};

use crate::errors::{FieldError, ServiceError};

/// Service profile creation input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceProfile {
    pub name: Option<String>,
}

/// Manager create/update input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerInput {
    pub full_name: Option<String>,
    pub service_profile_id: Option<Value>,
}

/// Validated manager fields
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerDraft {
    pub full_name: String,
    pub service_profile_id: i32,
}

/// Client create/update input. An absent `assignedManagerId` means unassigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub company_name: Option<String>,
    pub legal_form: Option<String>,
    pub service_profile_id: Option<Value>,
    pub assigned_manager_id: Option<Value>,
}

/// Transfer a client to another manager
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferInput {
    pub new_manager_id: Option<Value>,
}

/// Switch a client's profile and manager in one step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeProfileInput {
    pub new_profile_id: Option<Value>,
    pub new_manager_id: Option<Value>,
}

/// Manager row plus the name of its service profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerView {
    #[serde(flatten)]
    pub manager: manager::Model,
    pub profile_name: Option<String>,
}

/// Short client listing embedded in the manager overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientBrief {
    pub id: i32,
    pub company_name: String,
    pub legal_form: String,
}

impl From<client::Model> for ClientBrief {
    fn from(c: client::Model) -> Self {
        Self { id: c.id, company_name: c.company_name, legal_form: c.legal_form }
    }
}

/// Manager overview entry: profile name and assigned clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerWithClients {
    pub id: i32,
    pub full_name: String,
    pub service_profile_id: i32,
    pub profile_name: Option<String>,
    pub clients: Vec<ClientBrief>,
}

#[derive(Default)]
struct FieldErrors(Vec<FieldError>);

type TextCheck = fn(&str) -> Result<String, models::errors::ModelError>;

/// Integers and integer strings are accepted, like form-encoded ids.
fn parse_id(value: &Value) -> Result<i32, &'static str> {
    let n = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match n.map(i32::try_from) {
        Some(Ok(id)) if id > 0 => Ok(id),
        Some(_) => Err("must be a positive integer"),
        None => Err("must be an integer"),
    }
}

impl FieldErrors {
    fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError::new(field, message));
    }

    fn text(&mut self, field: &str, value: Option<&str>, check: TextCheck) -> Option<String> {
        let Some(v) = value else {
            self.push(field, "is required");
            return None;
        };
        match check(v) {
            Ok(v) => Some(v),
            Err(e) => {
                self.push(field, e.detail());
                None
            }
        }
    }

    fn id(&mut self, field: &str, value: Option<&Value>) -> Option<i32> {
        match value {
            None | Some(Value::Null) => {
                self.push(field, "is required");
                None
            }
            Some(v) => self.optional_id(field, Some(v)),
        }
    }

    fn optional_id(&mut self, field: &str, value: Option<&Value>) -> Option<i32> {
        match value {
            None | Some(Value::Null) => None,
            Some(v) => parse_id(v).map_err(|msg| self.push(field, msg)).ok(),
        }
    }

    /// Every failed field pushed an error, so `value` is present exactly
    /// when nothing was pushed.
    fn finish<T>(self, value: Option<T>) -> Result<T, ServiceError> {
        match value {
            Some(v) if self.0.is_empty() => Ok(v),
            _ => Err(ServiceError::InvalidFields(self.0)),
        }
    }
}

impl NewServiceProfile {
    pub fn validate(&self) -> Result<String, ServiceError> {
        let mut errs = FieldErrors::default();
        let name = errs.text("name", self.name.as_deref(), service_profile::validate_name);
        errs.finish(name)
    }
}

impl ManagerInput {
    pub fn validate(&self) -> Result<ManagerDraft, ServiceError> {
        let mut errs = FieldErrors::default();
        let full_name = errs.text("fullName", self.full_name.as_deref(), manager::validate_full_name);
        let service_profile_id = errs.id("serviceProfileId", self.service_profile_id.as_ref());
        let draft = full_name
            .zip(service_profile_id)
            .map(|(full_name, service_profile_id)| ManagerDraft { full_name, service_profile_id });
        errs.finish(draft)
    }
}

impl ClientInput {
    pub fn validate(&self) -> Result<ClientFields, ServiceError> {
        let mut errs = FieldErrors::default();
        let company_name =
            errs.text("companyName", self.company_name.as_deref(), client::validate_company_name);
        let legal_form = errs.text("legalForm", self.legal_form.as_deref(), client::validate_legal_form);
        let service_profile_id = errs.id("serviceProfileId", self.service_profile_id.as_ref());
        let assigned_manager_id =
            errs.optional_id("assignedManagerId", self.assigned_manager_id.as_ref());
        let fields = company_name.zip(legal_form).zip(service_profile_id).map(
            |((company_name, legal_form), service_profile_id)| ClientFields {
                company_name,
                legal_form,
                service_profile_id,
                assigned_manager_id,
            },
        );
        errs.finish(fields)
    }
}

impl TransferInput {
    pub fn validate(&self) -> Result<i32, ServiceError> {
        let mut errs = FieldErrors::default();
        let id = errs.id("newManagerId", self.new_manager_id.as_ref());
        errs.finish(id)
    }
}

impl ChangeProfileInput {
    /// Returns `(new_profile_id, new_manager_id)`.
    pub fn validate(&self) -> Result<(i32, i32), ServiceError> {
        let mut errs = FieldErrors::default();
        let profile = errs.id("newProfileId", self.new_profile_id.as_ref());
        let manager = errs.id("newManagerId", self.new_manager_id.as_ref());
        errs.finish(profile.zip(manager))
    }
}
