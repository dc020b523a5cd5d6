//! # Domain models for users, vaccines and vaccination records
//!
//! These are the JSON shapes exchanged with the vaccination REST backend. They
//! derive `Serialize + Deserialize` so the same types serve the HTTP gateway,
//! the in-memory gateway used by tests, and the Dioxus components.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | A person whose vaccination history is tracked. `age` and `gender` are optional. |
//! | [`Vaccine`] | A catalog entry: identifier plus display name. |
//! | [`VaccinationRecord`] | One applied dose of one vaccine for one user. |
//! | [`NewUser`] / [`NewVaccine`] / [`NewVaccinationRecord`] | Create payloads; the server assigns identifiers. |
//!
//! ## Wire contract
//!
//! Field names follow the backend's camelCase serialisation, including the
//! `userID` / `vaccineID` spelling. `age` is canonically a number; a numeric
//! string is accepted on read because older backends sent it as text, but it
//! is always written back as a number. A `vaccinationRecords` array embedded in
//! a user is accepted and kept, but the dose grid is always built from the
//! per-user records endpoint instead.

use serde::{Deserialize, Deserializer, Serialize};

pub type UserId = i64;
pub type VaccineId = i64;
pub type RecordId = i64;

/// A user as returned by `/api/user`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "age_from_number_or_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Embedded records. Only populated by some backend revisions.
    #[serde(default, rename = "vaccinationRecords")]
    pub vaccination_records: Vec<VaccinationRecord>,
}

impl User {
    /// Name to show in pickers, falling back to the identifier for blank names.
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            format!("User #{}", self.id)
        } else {
            name.to_string()
        }
    }
}

/// A vaccine in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vaccine {
    pub id: VaccineId,
    pub name: String,
}

/// A single applied dose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VaccinationRecord {
    pub id: RecordId,
    #[serde(default, rename = "userID", alias = "userId")]
    pub user_id: UserId,
    #[serde(rename = "vaccineID", alias = "vaccineId")]
    pub vaccine_id: VaccineId,
    /// Expected 1..=5, never validated client-side.
    #[serde(rename = "doseNumber")]
    pub dose_number: i32,
    /// Calendar date as sent by the server, e.g. `"2024-03-05"`.
    #[serde(default, rename = "applicationDate")]
    pub application_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Payload for `POST /api/user`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }
}

/// Payload for `POST /api/vaccine`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewVaccine {
    pub name: String,
}

impl NewVaccine {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Payload for `POST /api/users/{userId}/vaccinationrecords`.
///
/// The owning user comes from the URL, not the body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewVaccinationRecord {
    #[serde(rename = "vaccineID")]
    pub vaccine_id: VaccineId,
    #[serde(rename = "doseNumber")]
    pub dose_number: i32,
    #[serde(rename = "applicationDate")]
    pub application_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn age_from_number_or_text<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Age {
        Number(u32),
        Text(String),
    }

    match Option::<Age>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Age::Number(n)) => Ok(Some(n)),
        Some(Age::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse().map(Some).map_err(serde::de::Error::custom)
            }
        }
    }
}
