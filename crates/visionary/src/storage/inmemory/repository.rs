//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use visionary_core::profile::{
    profile_result_evicted_by_replacement, CorrectionProfileResult,
    CorrectionProfileResultPatch, Filter, FilterPatch, NewCorrectionProfileResult, NewFilter,
    NewUser, User, UserPatch,
};
use visionary_core::storage::{
    CorrectionProfileResultRepository, FilterRepository, RepositoryError, Result, UserRepository,
};

#[derive(Debug, Clone)]
struct UserRow {
    email: Option<String>,
    name: Option<String>,
    firstname: Option<String>,
    age: Option<i32>,
    sex: Option<String>,
}

#[derive(Debug, Clone)]
struct ProfileRow {
    user_id: Option<i64>,
    profile_type: String,
}

#[derive(Debug, Clone)]
struct FilterRow {
    profile_id: i64,
    parameter: String,
    value: String,
}

/// The three tables plus their id sequences.
///
/// `BTreeMap` keeps rows in id order, which is also insertion order because
/// ids are never reused.
#[derive(Debug, Default)]
struct Tables {
    last_user_id: i64,
    last_profile_id: i64,
    last_filter_id: i64,
    users: BTreeMap<i64, UserRow>,
    profiles: BTreeMap<i64, ProfileRow>,
    filters: BTreeMap<i64, FilterRow>,
}

impl Tables {
    fn filters_of(&self, profile_id: i64) -> Vec<Filter> {
        self.filters
            .iter()
            .filter(|(_, row)| row.profile_id == profile_id)
            .map(|(id, row)| Filter {
                id: *id,
                parameter: row.parameter.clone(),
                value: row.value.clone(),
            })
            .collect()
    }

    fn assemble_profile(&self, id: i64, row: &ProfileRow) -> CorrectionProfileResult {
        CorrectionProfileResult {
            id,
            profile_type: row.profile_type.clone(),
            filters: self.filters_of(id),
        }
    }

    fn profiles_of(&self, user_id: i64) -> Vec<CorrectionProfileResult> {
        self.profiles
            .iter()
            .filter(|(_, row)| row.user_id == Some(user_id))
            .map(|(id, row)| self.assemble_profile(*id, row))
            .collect()
    }

    fn assemble_user(&self, id: i64, row: &UserRow) -> User {
        User {
            id,
            email: row.email.clone(),
            name: row.name.clone(),
            firstname: row.firstname.clone(),
            age: row.age,
            sex: row.sex.clone(),
            correction_profile_results: self.profiles_of(id),
        }
    }

    fn insert_filter(&mut self, profile_id: i64, filter: &NewFilter) -> Filter {
        self.last_filter_id += 1;
        let id = self.last_filter_id;
        self.filters.insert(
            id,
            FilterRow {
                profile_id,
                parameter: filter.parameter.clone(),
                value: filter.value.clone(),
            },
        );
        filter.clone().into_filter(id)
    }

    fn insert_profile(
        &mut self,
        user_id: Option<i64>,
        profile: &NewCorrectionProfileResult,
    ) -> CorrectionProfileResult {
        self.last_profile_id += 1;
        let id = self.last_profile_id;
        self.profiles.insert(
            id,
            ProfileRow {
                user_id,
                profile_type: profile.profile_type.clone(),
            },
        );
        let filters = profile
            .filters
            .iter()
            .map(|filter| self.insert_filter(id, filter))
            .collect();

        CorrectionProfileResult {
            id,
            profile_type: profile.profile_type.clone(),
            filters,
        }
    }

    fn delete_filters_of(&mut self, profile_id: i64) {
        self.filters.retain(|_, row| row.profile_id != profile_id);
    }

    fn detach_profiles_of(&mut self, user_id: i64) {
        for row in self.profiles.values_mut() {
            if row.user_id == Some(user_id) {
                row.user_id = None;
            }
        }
    }

    fn delete_profile(&mut self, id: i64) -> bool {
        if self.profiles.remove(&id).is_none() {
            return false;
        }
        self.delete_filters_of(id);
        true
    }
}

/// In-memory storage backend for testing.
///
/// All tables live behind a single `Arc<RwLock<_>>` so that cascading
/// operations are atomic. Data is not persisted and will be lost when the
/// repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn list_users(&self) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .map(|(id, row)| tables.assemble_user(*id, row))
            .collect())
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .get(&id)
            .map(|row| tables.assemble_user(id, row)))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|(_, row)| row.email.as_deref() == Some(email))
            .map(|(id, row)| tables.assemble_user(*id, row)))
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;
        tables.last_user_id += 1;
        let id = tables.last_user_id;
        let row = UserRow {
            email: user.email.clone(),
            name: user.name.clone(),
            firstname: user.firstname.clone(),
            age: user.age,
            sex: user.sex.clone(),
        };
        tables.users.insert(id, row.clone());
        for profile in &user.correction_profile_results {
            tables.insert_profile(Some(id), profile);
        }
        Ok(tables.assemble_user(id, &row))
    }

    async fn update_user(&self, id: i64, patch: &UserPatch) -> Result<User> {
        let mut tables = self.tables.write().await;
        let row = tables
            .users
            .get(&id)
            .ok_or_else(|| RepositoryError::not_found("User", id))?;
        let mut user = tables.assemble_user(id, row);
        patch.apply_to(&mut user);

        let row = UserRow {
            email: user.email,
            name: user.name,
            firstname: user.firstname,
            age: user.age,
            sex: user.sex,
        };
        tables.users.insert(id, row.clone());

        if let Some(profiles) = &patch.correction_profile_results {
            if let Some(evicted) =
                profile_result_evicted_by_replacement(&user.correction_profile_results)
            {
                tables.delete_profile(evicted);
            }
            tables.detach_profiles_of(id);
            for profile in profiles {
                tables.insert_profile(Some(id), profile);
            }
        }

        Ok(tables.assemble_user(id, &row))
    }

    async fn add_correction_profile_result(
        &self,
        user_id: i64,
        profile: &NewCorrectionProfileResult,
    ) -> Result<CorrectionProfileResult> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(RepositoryError::not_found("User", user_id));
        }
        Ok(tables.insert_profile(Some(user_id), profile))
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(RepositoryError::not_found("User", id));
        }
        let owned: Vec<i64> = tables
            .profiles
            .iter()
            .filter(|(_, row)| row.user_id == Some(id))
            .map(|(profile_id, _)| *profile_id)
            .collect();
        for profile_id in owned {
            tables.delete_profile(profile_id);
        }
        Ok(())
    }
}

#[async_trait]
impl CorrectionProfileResultRepository for InMemoryRepository {
    async fn list_correction_profile_results(&self) -> Result<Vec<CorrectionProfileResult>> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .map(|(id, row)| tables.assemble_profile(*id, row))
            .collect())
    }

    async fn get_correction_profile_result(
        &self,
        id: i64,
    ) -> Result<Option<CorrectionProfileResult>> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .get(&id)
            .map(|row| tables.assemble_profile(id, row)))
    }

    async fn get_correction_profile_results_by_type(
        &self,
        profile_type: &str,
    ) -> Result<Vec<CorrectionProfileResult>> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .filter(|(_, row)| row.profile_type == profile_type)
            .map(|(id, row)| tables.assemble_profile(*id, row))
            .collect())
    }

    async fn update_correction_profile_result(
        &self,
        id: i64,
        patch: &CorrectionProfileResultPatch,
    ) -> Result<CorrectionProfileResult> {
        let mut tables = self.tables.write().await;
        let row = tables
            .profiles
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("CorrectionProfileResult", id))?;
        if let Some(profile_type) = &patch.profile_type {
            row.profile_type = profile_type.clone();
        }
        let row = row.clone();

        if let Some(filters) = &patch.filters {
            tables.delete_filters_of(id);
            for filter in filters {
                tables.insert_filter(id, filter);
            }
        }

        Ok(tables.assemble_profile(id, &row))
    }

    async fn add_filter(&self, profile_id: i64, filter: &NewFilter) -> Result<Filter> {
        let mut tables = self.tables.write().await;
        if !tables.profiles.contains_key(&profile_id) {
            return Err(RepositoryError::not_found(
                "CorrectionProfileResult",
                profile_id,
            ));
        }
        Ok(tables.insert_filter(profile_id, filter))
    }

    async fn delete_correction_profile_result(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.delete_profile(id) {
            return Err(RepositoryError::not_found("CorrectionProfileResult", id));
        }
        Ok(())
    }
}

#[async_trait]
impl FilterRepository for InMemoryRepository {
    async fn list_filters(&self) -> Result<Vec<Filter>> {
        let tables = self.tables.read().await;
        Ok(tables
            .filters
            .iter()
            .map(|(id, row)| Filter {
                id: *id,
                parameter: row.parameter.clone(),
                value: row.value.clone(),
            })
            .collect())
    }

    async fn get_filter(&self, id: i64) -> Result<Option<Filter>> {
        let tables = self.tables.read().await;
        Ok(tables.filters.get(&id).map(|row| Filter {
            id,
            parameter: row.parameter.clone(),
            value: row.value.clone(),
        }))
    }

    async fn get_filters_by_parameter(&self, parameter: &str) -> Result<Vec<Filter>> {
        let tables = self.tables.read().await;
        Ok(tables
            .filters
            .iter()
            .filter(|(_, row)| row.parameter == parameter)
            .map(|(id, row)| Filter {
                id: *id,
                parameter: row.parameter.clone(),
                value: row.value.clone(),
            })
            .collect())
    }

    async fn update_filter(&self, id: i64, patch: &FilterPatch) -> Result<Filter> {
        let mut tables = self.tables.write().await;
        let row = tables
            .filters
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Filter", id))?;
        let mut filter = Filter {
            id,
            parameter: row.parameter.clone(),
            value: row.value.clone(),
        };
        patch.apply_to(&mut filter);
        row.parameter = filter.parameter.clone();
        row.value = filter.value.clone();
        Ok(filter)
    }

    async fn delete_filter(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.filters.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Filter", id));
        }
        Ok(())
    }
}
