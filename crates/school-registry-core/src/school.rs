//! School records and their validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::error::{Result, ValidationError};
use crate::ids::SchoolId;

/// A persisted school.
///
/// `mariadb_password` is stored and returned as given. Callers that expose
/// this record outside a trusted boundary must account for that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct School {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "01J9ZQ3V4T8K6W2M0S5N7R1B3C")]
    pub id: SchoolId,

    /// Persian display name.
    pub fa_name: String,

    /// English display name.
    pub en_name: String,

    /// Domain the school is served on. Unique across all schools.
    pub domain: String,

    /// Object storage bucket holding the school's files.
    pub storage_bucket: String,

    /// Name of the school's `MariaDB` database.
    pub mariadb_db_name: String,

    /// `MariaDB` user for the school's database.
    pub mariadb_username: String,

    /// `MariaDB` password for the school's database.
    pub mariadb_password: String,

    /// When the school was created.
    pub created_at: DateTime<Utc>,

    /// When the school was last updated. Only changes when supplied.
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a school.
///
/// Every field is optional on the wire. An explicit `null` is kept apart from
/// an absent field so that updates can reject attempts to clear a required
/// field.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SchoolFields {
    /// Persian display name.
    #[serde(default, deserialize_with = "explicit")]
    #[schema(value_type = Option<String>)]
    pub fa_name: Option<Option<String>>,

    /// English display name.
    #[serde(default, deserialize_with = "explicit")]
    #[schema(value_type = Option<String>)]
    pub en_name: Option<Option<String>>,

    /// Domain; must be unique.
    #[serde(default, deserialize_with = "explicit")]
    #[schema(value_type = Option<String>)]
    pub domain: Option<Option<String>>,

    /// Object storage bucket.
    #[serde(default, deserialize_with = "explicit")]
    #[schema(value_type = Option<String>)]
    pub storage_bucket: Option<Option<String>>,

    /// `MariaDB` database name.
    #[serde(default, deserialize_with = "explicit")]
    #[schema(value_type = Option<String>)]
    pub mariadb_db_name: Option<Option<String>>,

    /// `MariaDB` user.
    #[serde(default, deserialize_with = "explicit")]
    #[schema(value_type = Option<String>)]
    pub mariadb_username: Option<Option<String>>,

    /// `MariaDB` password.
    #[serde(default, deserialize_with = "explicit")]
    #[schema(value_type = Option<String>)]
    pub mariadb_password: Option<Option<String>>,

    /// Creation time; defaults to now.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Update time; defaults to now on create.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Marks a present field as `Some`, whether its value is `null` or not.
fn explicit<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn required(value: Option<Option<String>>, field: &'static str) -> Result<String> {
    match value {
        Some(Some(value)) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn supplied(value: Option<Option<String>>, field: &'static str) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(Some(value)) if !value.is_empty() => Ok(Some(value)),
        Some(_) => Err(ValidationError::MissingField(field)),
    }
}

/// A validated school that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchool {
    /// Persian display name.
    pub fa_name: String,
    /// English display name.
    pub en_name: String,
    /// Unique domain.
    pub domain: String,
    /// Object storage bucket.
    pub storage_bucket: String,
    /// `MariaDB` database name.
    pub mariadb_db_name: String,
    /// `MariaDB` user.
    pub mariadb_username: String,
    /// `MariaDB` password.
    pub mariadb_password: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl NewSchool {
    /// Attach the store-assigned identifier.
    #[must_use]
    pub fn into_school(self, id: SchoolId) -> School {
        School {
            id,
            fa_name: self.fa_name,
            en_name: self.en_name,
            domain: self.domain,
            storage_bucket: self.storage_bucket,
            mariadb_db_name: self.mariadb_db_name,
            mariadb_username: self.mariadb_username,
            mariadb_password: self.mariadb_password,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl TryFrom<SchoolFields> for NewSchool {
    type Error = ValidationError;

    fn try_from(fields: SchoolFields) -> Result<Self> {
        let now = Utc::now();

        Ok(Self {
            fa_name: required(fields.fa_name, "fa_name")?,
            en_name: required(fields.en_name, "en_name")?,
            domain: required(fields.domain, "domain")?,
            storage_bucket: required(fields.storage_bucket, "storage_bucket")?,
            mariadb_db_name: required(fields.mariadb_db_name, "mariadb_db_name")?,
            mariadb_username: required(fields.mariadb_username, "mariadb_username")?,
            mariadb_password: required(fields.mariadb_password, "mariadb_password")?,
            created_at: fields.created_at.unwrap_or(now),
            updated_at: fields.updated_at.unwrap_or(now),
        })
    }
}

/// A validated partial update. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolPatch {
    /// New Persian display name.
    pub fa_name: Option<String>,
    /// New English display name.
    pub en_name: Option<String>,
    /// New domain; must stay unique.
    pub domain: Option<String>,
    /// New storage bucket.
    pub storage_bucket: Option<String>,
    /// New database name.
    pub mariadb_db_name: Option<String>,
    /// New database user.
    pub mariadb_username: Option<String>,
    /// New database password.
    pub mariadb_password: Option<String>,
    /// Overridden creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Overridden update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl SchoolPatch {
    /// Overwrite the supplied fields of `school`.
    ///
    /// `updated_at` is only touched when the patch carries it.
    pub fn apply_to(&self, school: &mut School) {
        let overwrite = |target: &mut String, value: &Option<String>| {
            if let Some(value) = value {
                target.clone_from(value);
            }
        };

        overwrite(&mut school.fa_name, &self.fa_name);
        overwrite(&mut school.en_name, &self.en_name);
        overwrite(&mut school.domain, &self.domain);
        overwrite(&mut school.storage_bucket, &self.storage_bucket);
        overwrite(&mut school.mariadb_db_name, &self.mariadb_db_name);
        overwrite(&mut school.mariadb_username, &self.mariadb_username);
        overwrite(&mut school.mariadb_password, &self.mariadb_password);

        if let Some(created_at) = self.created_at {
            school.created_at = created_at;
        }
        if let Some(updated_at) = self.updated_at {
            school.updated_at = updated_at;
        }
    }
}

impl TryFrom<SchoolFields> for SchoolPatch {
    type Error = ValidationError;

    fn try_from(fields: SchoolFields) -> Result<Self> {
        Ok(Self {
            fa_name: supplied(fields.fa_name, "fa_name")?,
            en_name: supplied(fields.en_name, "en_name")?,
            domain: supplied(fields.domain, "domain")?,
            storage_bucket: supplied(fields.storage_bucket, "storage_bucket")?,
            mariadb_db_name: supplied(fields.mariadb_db_name, "mariadb_db_name")?,
            mariadb_username: supplied(fields.mariadb_username, "mariadb_username")?,
            mariadb_password: supplied(fields.mariadb_password, "mariadb_password")?,
            created_at: fields.created_at,
            updated_at: fields.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> SchoolFields {
        serde_json::from_value(value).unwrap()
    }

    fn complete() -> serde_json::Value {
        json!({
            "fa_name": "مدرسه نمونه",
            "en_name": "Sample School",
            "domain": "sample.example.com",
            "storage_bucket": "sample-bucket",
            "mariadb_db_name": "sample_db",
            "mariadb_username": "sample_user",
            "mariadb_password": "secret"
        })
    }

    #[test]
    fn complete_fields_validate() {
        let before = Utc::now();
        let school = NewSchool::try_from(fields(complete())).unwrap();

        assert_eq!(school.domain, "sample.example.com");
        assert_eq!(school.fa_name, "مدرسه نمونه");
        assert!(school.created_at >= before);
        assert_eq!(school.created_at, school.updated_at);
    }

    #[test]
    fn each_required_field_is_enforced() {
        for field in [
            "fa_name",
            "en_name",
            "domain",
            "storage_bucket",
            "mariadb_db_name",
            "mariadb_username",
            "mariadb_password",
        ] {
            let mut body = complete();
            body.as_object_mut().unwrap().remove(field);
            let err = NewSchool::try_from(fields(body)).unwrap_err();
            assert!(
                matches!(err, ValidationError::MissingField(name) if name == field),
                "expected {field} to be required, got {err:?}"
            );
        }
    }

    #[test]
    fn empty_and_null_values_count_as_missing() {
        let mut body = complete();
        body["en_name"] = json!("");
        assert_eq!(
            NewSchool::try_from(fields(body)).unwrap_err(),
            ValidationError::MissingField("en_name")
        );

        let mut body = complete();
        body["domain"] = json!(null);
        assert_eq!(
            NewSchool::try_from(fields(body)).unwrap_err(),
            ValidationError::MissingField("domain")
        );
    }

    #[test]
    fn supplied_timestamps_are_kept() {
        let mut body = complete();
        body["created_at"] = json!("2024-01-02T03:04:05Z");
        let school = NewSchool::try_from(fields(body)).unwrap();

        assert_eq!(school.created_at.to_rfc3339(), "2024-01-02T03:04:05+00:00");
        assert!(school.updated_at > school.created_at);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut body = complete();
        body["STORAGE_BUCKET"] = json!("ignored");
        let school = NewSchool::try_from(fields(body)).unwrap();
        assert_eq!(school.storage_bucket, "sample-bucket");
    }

    #[test]
    fn patch_rejects_clearing_required_fields() {
        let err = SchoolPatch::try_from(fields(json!({ "fa_name": null }))).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("fa_name"));

        let err = SchoolPatch::try_from(fields(json!({ "domain": "" }))).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("domain"));
    }

    #[test]
    fn patch_overwrites_only_supplied_fields() {
        let original = NewSchool::try_from(fields(complete()))
            .unwrap()
            .into_school(SchoolId::generate());
        let patch =
            SchoolPatch::try_from(fields(json!({ "en_name": "Renamed", "domain": "new.example.com" })))
                .unwrap();

        let mut updated = original.clone();
        patch.apply_to(&mut updated);

        assert_eq!(updated.en_name, "Renamed");
        assert_eq!(updated.domain, "new.example.com");
        assert_eq!(updated.fa_name, original.fa_name);
        assert_eq!(updated.mariadb_password, original.mariadb_password);
        assert_eq!(updated.updated_at, original.updated_at);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let original = NewSchool::try_from(fields(complete()))
            .unwrap()
            .into_school(SchoolId::generate());
        let patch = SchoolPatch::try_from(fields(json!({}))).unwrap();
        assert_eq!(patch, SchoolPatch::default());

        let mut updated = original.clone();
        patch.apply_to(&mut updated);
        assert_eq!(updated, original);
    }

    #[test]
    fn school_serializes_id_as_underscore_id() {
        let school = NewSchool::try_from(fields(complete()))
            .unwrap()
            .into_school(SchoolId::generate());
        let value = serde_json::to_value(&school).unwrap();

        assert_eq!(value["_id"], school.id.to_string());
        assert!(value.get("id").is_none());
    }
}
