use async_trait::async_trait;

use crate::profile::{
    CorrectionProfileResult, CorrectionProfileResultPatch, Filter, FilterPatch,
    NewCorrectionProfileResult, NewFilter, NewUser, User, UserPatch,
};

use super::Result;

/// Repository for users and the profile results they own.
///
/// Every returned `User` carries its profile results (and their filters) in
/// insertion order.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets every user, ordered by id.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Gets a user by their ID.
    async fn get_user(&self, id: i64) -> Result<Option<User>>;

    /// Gets a user by exact email match.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Creates a user together with its profile results and their filters.
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Applies `patch` to an existing user as one atomic change.
    ///
    /// Present scalar fields overwrite the stored ones. A present
    /// `correction_profile_results` deletes the first stored profile result
    /// (see [`profile_result_evicted_by_replacement`]), detaches the others
    /// and attaches newly created ones in their place. Detached results stay
    /// readable through [`CorrectionProfileResultRepository`] without an
    /// owner. Nothing is written when any step fails.
    ///
    /// [`profile_result_evicted_by_replacement`]: crate::profile::profile_result_evicted_by_replacement
    async fn update_user(&self, id: i64, patch: &UserPatch) -> Result<User>;

    /// Appends a new profile result to the end of the user's collection.
    async fn add_correction_profile_result(
        &self,
        user_id: i64,
        profile: &NewCorrectionProfileResult,
    ) -> Result<CorrectionProfileResult>;

    /// Deletes a user, its profile results and their filters.
    async fn delete_user(&self, id: i64) -> Result<()>;
}

/// Repository for correction profile results and the filters they own.
#[async_trait]
pub trait CorrectionProfileResultRepository: Send + Sync {
    /// Gets every profile result, ordered by id.
    async fn list_correction_profile_results(&self) -> Result<Vec<CorrectionProfileResult>>;

    /// Gets a profile result by its ID.
    async fn get_correction_profile_result(&self, id: i64)
        -> Result<Option<CorrectionProfileResult>>;

    /// Gets every profile result whose type equals `profile_type`.
    async fn get_correction_profile_results_by_type(
        &self,
        profile_type: &str,
    ) -> Result<Vec<CorrectionProfileResult>>;

    /// Applies `patch` to an existing profile result as one atomic change.
    ///
    /// A present `filters` list deletes the stored filters and creates the
    /// new ones in their place.
    async fn update_correction_profile_result(
        &self,
        id: i64,
        patch: &CorrectionProfileResultPatch,
    ) -> Result<CorrectionProfileResult>;

    /// Appends a new filter to the end of the profile result's collection.
    async fn add_filter(&self, profile_id: i64, filter: &NewFilter) -> Result<Filter>;

    /// Deletes a profile result and its filters.
    async fn delete_correction_profile_result(&self, id: i64) -> Result<()>;
}

/// Repository for filters.
#[async_trait]
pub trait FilterRepository: Send + Sync {
    /// Gets every filter, ordered by id.
    async fn list_filters(&self) -> Result<Vec<Filter>>;

    /// Gets a filter by its ID.
    async fn get_filter(&self, id: i64) -> Result<Option<Filter>>;

    /// Gets every filter whose parameter equals `parameter`.
    async fn get_filters_by_parameter(&self, parameter: &str) -> Result<Vec<Filter>>;

    /// Overwrites the parameter and value of an existing filter when present in `patch`.
    async fn update_filter(&self, id: i64, patch: &FilterPatch) -> Result<Filter>;

    /// Deletes a filter.
    async fn delete_filter(&self, id: i64) -> Result<()>;
}
