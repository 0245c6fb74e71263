//! Partial-update payloads.
//!
//! Every field is optional: a present value overwrites the stored one, an
//! absent or `null` value leaves it untouched. Nested collections are never
//! merged item by item; when present they replace the stored collection.

use serde::{Deserialize, Serialize};

use super::types::{CorrectionProfileResult, Filter, NewCorrectionProfileResult, NewFilter, User};
use crate::serde::deserialize_optional_scalar_string;

/// Request payload for `PUT /users/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction_profile_results: Option<Vec<NewCorrectionProfileResult>>,
}

impl UserPatch {
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

    pub fn with_correction_profile_results(
        mut self,
        profiles: Vec<NewCorrectionProfileResult>,
    ) -> Self {
        self.correction_profile_results = Some(profiles);
        self
    }

    /// Applies the scalar fields to a stored user.
    ///
    /// The profile result collection is left alone; the repository replaces
    /// it in the same transaction.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = Some(email.clone());
        }
        if let Some(name) = &self.name {
            user.name = Some(name.clone());
        }
        if let Some(firstname) = &self.firstname {
            user.firstname = Some(firstname.clone());
        }
        if let Some(age) = self.age {
            user.age = Some(age);
        }
        if let Some(sex) = &self.sex {
            user.sex = Some(sex.clone());
        }
    }
}

/// Request payload for `PUT /correction-profile-results/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionProfileResultPatch {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub profile_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<NewFilter>>,
}

impl CorrectionProfileResultPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, profile_type: impl Into<String>) -> Self {
        self.profile_type = Some(profile_type.into());
        self
    }

    pub fn with_filters(mut self, filters: Vec<NewFilter>) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Applies `type` to a stored profile result. Filters are replaced by the repository.
    pub fn apply_to(&self, profile: &mut CorrectionProfileResult) {
        if let Some(profile_type) = &self.profile_type {
            profile.profile_type = profile_type.clone();
        }
    }
}

/// Request payload for `PUT /filters/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn apply_to(&self, filter: &mut Filter) {
        if let Some(parameter) = &self.parameter {
            filter.parameter = parameter.clone();
        }
        if let Some(value) = &self.value {
            filter.value = value.clone();
        }
    }
}
