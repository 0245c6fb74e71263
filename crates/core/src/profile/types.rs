use serde::{Deserialize, Serialize};

use crate::serde::deserialize_scalar_string;

/// A single colour-correction parameter belonging to a correction profile result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(rename = "idFilter")]
    pub id: i64,
    pub parameter: String,
    pub value: String,
}

/// The outcome of a correction test, categorised by `type`.
///
/// Owns its filters: they are created, replaced and deleted together with
/// the profile result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionProfileResult {
    #[serde(rename = "idCorrectionProfileResult")]
    pub id: i64,
    #[serde(rename = "type")]
    pub profile_type: String,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

/// A registered user and the correction profile results they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "idUser")]
    pub id: i64,
    pub email: Option<String>,
    pub name: Option<String>,
    pub firstname: Option<String>,
    pub age: Option<i32>,
    pub sex: Option<String>,
    #[serde(default)]
    pub correction_profile_results: Vec<CorrectionProfileResult>,
}

impl User {
    /// Returns true when the stored email equals `email` exactly.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.as_deref() == Some(email)
    }
}

/// A filter that has not been stored yet.
///
/// Any `idFilter` present in the request body is ignored; the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFilter {
    pub parameter: String,
    #[serde(deserialize_with = "deserialize_scalar_string")]
    pub value: String,
}

impl NewFilter {
    pub fn new(parameter: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            value: value.into(),
        }
    }

    /// Attaches the store-assigned id.
    pub fn into_filter(self, id: i64) -> Filter {
        Filter {
            id,
            parameter: self.parameter,
            value: self.value,
        }
    }
}

/// A correction profile result that has not been stored yet, with its filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCorrectionProfileResult {
    #[serde(rename = "type")]
    pub profile_type: String,
    #[serde(default)]
    pub filters: Vec<NewFilter>,
}

impl NewCorrectionProfileResult {
    pub fn new(profile_type: impl Into<String>) -> Self {
        Self {
            profile_type: profile_type.into(),
            filters: Vec::new(),
        }
    }

    /// Appends a filter.
    pub fn with_filter(mut self, filter: NewFilter) -> Self {
        self.filters.push(filter);
        self
    }
}

/// A user creation payload, optionally carrying profile results to create
/// alongside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub correction_profile_results: Vec<NewCorrectionProfileResult>,
}

impl NewUser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_firstname(mut self, firstname: impl Into<String>) -> Self {
        self.firstname = Some(firstname.into());
        self
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }

    /// Appends a correction profile result to create with the user.
    pub fn with_correction_profile_result(mut self, profile: NewCorrectionProfileResult) -> Self {
        self.correction_profile_results.push(profile);
        self
    }
}
