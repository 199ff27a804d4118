//! # Domain models for modules, clients and versions
//!
//! The backend owns these records; the dashboard only ever holds transient
//! copies. Every type is `Serialize + Deserialize` so it can cross the
//! server/client boundary as a JSON row.
//!
//! | Struct | Table | Draft |
//! |--------|-------|-------|
//! | [`Module`] | `modules` | [`ModuleDraft`] |
//! | [`Client`] | `clients` | [`ClientDraft`] |
//! | [`Version`] | `versions` (references `modules`) | [`VersionDraft`] |
//!
//! A draft carries the user-editable fields and is what `create` and `update`
//! send. Drafts are validated by [`Entity::validate`] before any backend call.
//!
//! [`UserInfo`] is the client-safe view of a signed-in user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::backend::Table;
use crate::error::BackendError;
use crate::role::Role;

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    /// `None` until an administrator assigns a role.
    pub role: Option<Role>,
}

impl UserInfo {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// A record stored in one backend table.
pub trait Entity: Clone + PartialEq + Serialize + DeserializeOwned + 'static {
    /// User-editable fields sent on create and update.
    type Draft: Clone + PartialEq + Default + Serialize + DeserializeOwned + 'static;

    const TABLE: Table;

    fn id(&self) -> &str;

    /// Short label for tables and confirmation messages.
    fn label(&self) -> String;

    /// Prefill a draft for editing this record.
    fn to_draft(&self) -> Self::Draft;

    /// Normalise and check a draft. Returns the trimmed draft.
    fn validate(draft: &Self::Draft) -> Result<Self::Draft, BackendError>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleDraft {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub name: String,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: String,
    pub module_id: String,
    pub version_number: String,
    pub release_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionDraft {
    pub module_id: String,
    pub version_number: String,
    pub release_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Trim a required field, rejecting blanks.
fn required(value: &str, field: &str) -> Result<String, BackendError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BackendError::Invalid(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional field; blank becomes `None`.
fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Entity for Module {
    type Draft = ModuleDraft;
    const TABLE: Table = Table::Modules;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn to_draft(&self) -> ModuleDraft {
        ModuleDraft {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    fn validate(draft: &ModuleDraft) -> Result<ModuleDraft, BackendError> {
        Ok(ModuleDraft {
            name: required(&draft.name, "Module name")?,
            description: optional(&draft.description),
        })
    }
}

impl Entity for Client {
    type Draft = ClientDraft;
    const TABLE: Table = Table::Clients;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn to_draft(&self) -> ClientDraft {
        ClientDraft {
            name: self.name.clone(),
            contact_email: self.contact_email.clone(),
            notes: self.notes.clone(),
        }
    }

    fn validate(draft: &ClientDraft) -> Result<ClientDraft, BackendError> {
        let contact_email = optional(&draft.contact_email);
        if let Some(email) = &contact_email {
            if !email.contains('@') {
                return Err(BackendError::Invalid(format!(
                    "Invalid contact email: {email}"
                )));
            }
        }
        Ok(ClientDraft {
            name: required(&draft.name, "Client name")?,
            contact_email,
            notes: optional(&draft.notes),
        })
    }
}

impl Entity for Version {
    type Draft = VersionDraft;
    const TABLE: Table = Table::Versions;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.version_number.clone()
    }

    fn to_draft(&self) -> VersionDraft {
        VersionDraft {
            module_id: self.module_id.clone(),
            version_number: self.version_number.clone(),
            release_date: self.release_date,
            notes: self.notes.clone(),
        }
    }

    fn validate(draft: &VersionDraft) -> Result<VersionDraft, BackendError> {
        Ok(VersionDraft {
            module_id: required(&draft.module_id, "Module")?,
            version_number: required(&draft.version_number, "Version number")?,
            release_date: draft.release_date,
            notes: optional(&draft.notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_validation_trims() {
        let draft = ModuleDraft {
            name: "  billing  ".into(),
            description: Some("   ".into()),
        };
        let clean = Module::validate(&draft).unwrap();
        assert_eq!(clean.name, "billing");
        assert_eq!(clean.description, None);
    }

    #[test]
    fn test_blank_names_rejected() {
        assert!(matches!(
            Module::validate(&ModuleDraft::default()),
            Err(BackendError::Invalid(_))
        ));
        assert!(Client::validate(&ClientDraft::default()).is_err());
    }

    #[test]
    fn test_client_email_must_look_like_email() {
        let mut draft = ClientDraft {
            name: "Acme".into(),
            contact_email: Some("nobody".into()),
            notes: None,
        };
        assert!(Client::validate(&draft).is_err());

        draft.contact_email = Some(" ops@acme.test ".into());
        assert_eq!(
            Client::validate(&draft).unwrap().contact_email.as_deref(),
            Some("ops@acme.test")
        );
    }

    #[test]
    fn test_version_requires_module() {
        let draft = VersionDraft {
            module_id: "".into(),
            version_number: "1.0.0".into(),
            ..Default::default()
        };
        let err = Version::validate(&draft).unwrap_err();
        assert_eq!(err, BackendError::Invalid("Module is required".into()));
    }

    #[test]
    fn test_version_deserializes_backend_row() {
        let row = serde_json::json!({
            "id": "v1",
            "module_id": "m1",
            "version_number": "2.3.0",
            "release_date": "2024-05-01",
            "notes": null,
            "created_at": "2024-05-01T10:00:00Z",
        });
        let version: Version = serde_json::from_value(row).unwrap();
        assert_eq!(version.release_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(version.to_draft().module_id, "m1");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = UserInfo {
            id: "u".into(),
            email: "dev@example.com".into(),
            name: None,
            role: None,
        };
        assert_eq!(user.display_name(), "dev@example.com");
    }
}
