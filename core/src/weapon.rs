//! Weapon record model and request shapes.
//!
//! A [`WeaponRecord`] is one document in the store. Its `id` is assigned by
//! the store on first insert, `created_at` is stamped once by the service,
//! and every successful update appends one entry to `modification_history`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque record identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponId(String);

impl WeaponId {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier carries no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for WeaponId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for WeaponId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Store-level audit fields.
///
/// Only the [`AuditingStore`](crate::audit::AuditingStore) decorator writes
/// these; records written through a bare adapter keep `audit == None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMetadata {
    /// When the record was first written through the decorator
    pub created_date: DateTime<Utc>,
    /// Who first wrote the record
    pub created_by: String,
    /// When the record was last written through the decorator
    pub last_modified_date: DateTime<Utc>,
    /// Who last wrote the record
    pub last_modified_by: String,
}

/// The persisted weapon entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponRecord {
    /// Store-assigned identifier; `None` until the first insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WeaponId>,
    /// Display label
    pub name: String,
    /// Short external identifier, unique at creation time
    pub code: String,
    /// Free text
    #[serde(default)]
    pub description: String,
    /// Set once by the service at creation
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// One timestamp per successful update, oldest first
    #[serde(default)]
    pub modification_history: Vec<DateTime<Utc>>,
    /// Audit fields stamped by the auditing decorator, if installed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditMetadata>,
}

impl WeaponRecord {
    /// Build an unsaved record with no id, no creation time and an empty history.
    ///
    /// This is the shape callers hand directly to a [`WeaponStore`](crate::store::WeaponStore)
    /// when bypassing the lifecycle service.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            code: code.into(),
            description: description.into(),
            created_at: None,
            modification_history: Vec::new(),
            audit: None,
        }
    }

    /// Set the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<WeaponId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the creation timestamp.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Two records are the same document when both carry the same id.
    ///
    /// Unsaved records (no id) never share identity.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b)
    }
}

/// Payload for creating a weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWeaponRequest {
    /// Display label
    pub name: String,
    /// External identifier; must not already exist
    pub code: String,
    /// Free text
    #[serde(default)]
    pub description: String,
}

impl CreateWeaponRequest {
    /// Create a new request.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            description: description.into(),
        }
    }
}

/// Payload for replacing the mutable fields of an existing weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateWeaponRequest {
    /// Target record
    pub id: WeaponId,
    /// New display label
    pub name: String,
    /// New external identifier (not re-checked for uniqueness)
    pub code: String,
    /// New free text
    #[serde(default)]
    pub description: String,
}

impl UpdateWeaponRequest {
    /// Create a new request.
    #[must_use]
    pub fn new(
        id: impl Into<WeaponId>,
        name: impl Into<String>,
        code: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn unsaved_records_never_share_identity() {
        let a = WeaponRecord::new("Spear", "0002", "pointy");
        let b = a.clone();
        assert!(!a.same_identity(&b));
    }

    #[test]
    fn identity_ignores_mutable_fields() {
        let a = WeaponRecord::new("Crossbow", "CB-01", "").with_id("abc");
        let mut b = a.clone();
        b.name = "Heavy Crossbow".to_string();
        assert!(a.same_identity(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn serializes_in_camel_case_without_audit() {
        let record = WeaponRecord::new("Tank", "002", "heavy").with_id("65f0c0ffee0000000000beef");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], "65f0c0ffee0000000000beef");
        assert!(json["modificationHistory"].as_array().unwrap().is_empty());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("audit").is_none());
    }

    #[test]
    fn create_request_description_defaults_to_empty() {
        let request: CreateWeaponRequest =
            serde_json::from_str(r#"{"name":"Axe","code":"006"}"#).unwrap();
        assert_eq!(request, CreateWeaponRequest::new("Axe", "006", ""));
    }
}
