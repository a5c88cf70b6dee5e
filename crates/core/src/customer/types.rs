use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::timestamp;

/// A customer profile as persisted by the repositories.
///
/// Field names on the wire are PascalCase (`Id`, `Email`, `UpdatedAt`, ...).
/// Attributes missing from a stored document fall back to their defaults, and
/// attributes this type does not know about are kept in `profile` so they
/// survive a read-modify-write cycle. Profile entries named like a typed
/// attribute or a store key are never written.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(rename = "Id")]
    pub id: Uuid,
    /// Lookup key for the email index. Not guaranteed unique.
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "FullName")]
    pub full_name: String,
    #[serde(rename = "GitHubUsername")]
    pub github_username: String,
    #[serde(rename = "DateOfBirth")]
    pub date_of_birth: Option<NaiveDate>,
    /// Assigned by the repository on every write; whatever the caller puts here is overwritten.
    #[serde(rename = "UpdatedAt", deserialize_with = "crate::timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
    /// Additional profile attributes, stored alongside the known ones.
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl Customer {
    /// Stored attribute holding the id.
    pub const ID_ATTRIBUTE: &'static str = "Id";
    /// Stored attribute queried by the email index.
    pub const EMAIL_ATTRIBUTE: &'static str = "Email";
    pub const FULL_NAME_ATTRIBUTE: &'static str = "FullName";
    pub const GITHUB_USERNAME_ATTRIBUTE: &'static str = "GitHubUsername";
    pub const DATE_OF_BIRTH_ATTRIBUTE: &'static str = "DateOfBirth";
    /// Stored attribute compared by conditional updates.
    pub const UPDATED_AT_ATTRIBUTE: &'static str = "UpdatedAt";

    /// Names `profile` may not carry: the typed attributes plus the key
    /// attributes the stores add.
    pub const RESERVED_ATTRIBUTES: [&'static str; 8] = [
        Self::ID_ATTRIBUTE,
        Self::EMAIL_ATTRIBUTE,
        Self::FULL_NAME_ATTRIBUTE,
        Self::GITHUB_USERNAME_ATTRIBUTE,
        Self::DATE_OF_BIRTH_ATTRIBUTE,
        Self::UPDATED_AT_ATTRIBUTE,
        "pk",
        "sk",
    ];

    pub fn is_reserved_attribute(name: &str) -> bool {
        Self::RESERVED_ATTRIBUTES.contains(&name)
    }

    /// Creates a new customer with a random id.
    pub fn new(
        email: impl Into<String>,
        full_name: impl Into<String>,
        github_username: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            full_name: full_name.into(),
            github_username: github_username.into(),
            ..Self::default()
        }
    }

    /// Sets a specific ID for this customer (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the date of birth.
    pub fn with_date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    /// Adds an extra profile attribute. Reserved names are dropped on write.
    pub fn with_profile_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.profile.insert(key.into(), value.into());
        self
    }

    /// Returns the copy a repository writes: `now` as its timestamp and no
    /// reserved names left in `profile`.
    pub fn stamped(&self, now: DateTime<Utc>) -> Self {
        let mut stored = Self {
            updated_at: now,
            ..self.clone()
        };
        stored.profile.retain(|name, _| !Self::is_reserved_attribute(name));
        stored
    }
}

impl Serialize for Customer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(Self::ID_ATTRIBUTE, &self.id)?;
        map.serialize_entry(Self::EMAIL_ATTRIBUTE, &self.email)?;
        map.serialize_entry(Self::FULL_NAME_ATTRIBUTE, &self.full_name)?;
        map.serialize_entry(Self::GITHUB_USERNAME_ATTRIBUTE, &self.github_username)?;
        if let Some(date_of_birth) = &self.date_of_birth {
            map.serialize_entry(Self::DATE_OF_BIRTH_ATTRIBUTE, date_of_birth)?;
        }
        map.serialize_entry(Self::UPDATED_AT_ATTRIBUTE, &timestamp::format(&self.updated_at))?;
        for (name, value) in &self.profile {
            if !Self::is_reserved_attribute(name) {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}
