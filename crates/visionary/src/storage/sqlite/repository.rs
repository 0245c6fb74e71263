//! SQLite repository implementation.
//!
//! Implements the repository traits from `visionary_core::storage` using SQLite.
//! Every mutation that touches more than one row runs inside a transaction.

use async_trait::async_trait;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use visionary_core::profile::{
    profile_result_evicted_by_replacement, CorrectionProfileResult,
    CorrectionProfileResultPatch, Filter, FilterPatch, NewCorrectionProfileResult, NewFilter,
    NewUser, User, UserPatch,
};
use visionary_core::storage::{
    CorrectionProfileResultRepository, FilterRepository, RepositoryError, Result, UserRepository,
};

use super::conversions::{row_to_filter, row_to_profile, row_to_user};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

// ============================================================================
// Row helpers
// ============================================================================

fn load_filters(conn: &rusqlite::Connection, profile_id: i64) -> rusqlite::Result<Vec<Filter>> {
    let mut stmt = conn.prepare_cached(schema::SELECT_FILTERS_BY_PROFILE)?;
    let rows = stmt.query_map([profile_id], row_to_filter)?;
    rows.collect()
}

fn with_filters(
    conn: &rusqlite::Connection,
    mut profile: CorrectionProfileResult,
) -> rusqlite::Result<CorrectionProfileResult> {
    profile.filters = load_filters(conn, profile.id)?;
    Ok(profile)
}

/// Runs a profile query and fills in each result's filters.
fn query_profiles(
    conn: &rusqlite::Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> rusqlite::Result<Vec<CorrectionProfileResult>> {
    let profiles: Vec<CorrectionProfileResult> = {
        let mut stmt = conn.prepare_cached(sql)?;
        let rows = stmt.query_map(params, row_to_profile)?;
        rows.collect::<rusqlite::Result<_>>()?
    };
    profiles
        .into_iter()
        .map(|profile| with_filters(conn, profile))
        .collect()
}

fn with_profiles(conn: &rusqlite::Connection, mut user: User) -> rusqlite::Result<User> {
    user.correction_profile_results =
        query_profiles(conn, schema::SELECT_PROFILES_BY_USER, [user.id])?;
    Ok(user)
}

fn query_filters(
    conn: &rusqlite::Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> rusqlite::Result<Vec<Filter>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(params, row_to_filter)?;
    rows.collect()
}

fn insert_filter(
    conn: &rusqlite::Connection,
    profile_id: i64,
    filter: &NewFilter,
) -> rusqlite::Result<Filter> {
    conn.execute(
        schema::INSERT_FILTER,
        rusqlite::params![profile_id, filter.parameter, filter.value],
    )?;
    Ok(filter.clone().into_filter(conn.last_insert_rowid()))
}

fn insert_profile(
    conn: &rusqlite::Connection,
    user_id: Option<i64>,
    profile: &NewCorrectionProfileResult,
) -> rusqlite::Result<CorrectionProfileResult> {
    conn.execute(
        schema::INSERT_PROFILE,
        rusqlite::params![user_id, profile.profile_type],
    )?;
    let id = conn.last_insert_rowid();
    let filters = profile
        .filters
        .iter()
        .map(|filter| insert_filter(conn, id, filter))
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(CorrectionProfileResult {
        id,
        profile_type: profile.profile_type.clone(),
        filters,
    })
}

/// Fails with `QueryReturnedNoRows` when `sql` selects nothing for `id`.
fn ensure_exists(conn: &rusqlite::Connection, sql: &str, id: i64) -> rusqlite::Result<()> {
    conn.query_row(sql, [id], |_| Ok(()))
}

/// Turns an `execute` that touched no rows into `QueryReturnedNoRows`.
fn affected(rows: usize) -> rusqlite::Result<()> {
    if rows == 0 {
        Err(rusqlite::Error::QueryReturnedNoRows)
    } else {
        Ok(())
    }
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all entity types.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Runs raw SQL against the connection, e.g. to install a trigger.
    #[cfg(test)]
    pub(crate) async fn execute_batch(&self, sql: &'static str) -> Result<()> {
        self.conn
            .call(move |conn| conn.execute_batch(sql).map_err(wrap_err))
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.conn
            .call(|conn| {
                let users: Vec<User> = {
                    let mut stmt = conn.prepare_cached(schema::SELECT_USERS).map_err(wrap_err)?;
                    let rows = stmt.query_map([], row_to_user).map_err(wrap_err)?;
                    rows.collect::<rusqlite::Result<_>>().map_err(wrap_err)?
                };
                users
                    .into_iter()
                    .map(|user| with_profiles(conn, user).map_err(wrap_err))
                    .collect::<tokio_rusqlite::Result<Vec<User>>>()
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User"))
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.conn
            .call(move |conn| {
                let user = conn
                    .query_row(schema::SELECT_USER_BY_ID, [id], row_to_user)
                    .optional()
                    .map_err(wrap_err)?;
                user.map(|user| with_profiles(conn, user))
                    .transpose()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();

        self.conn
            .call(move |conn| {
                let user = conn
                    .query_row(schema::SELECT_USER_BY_EMAIL, [&email], row_to_user)
                    .optional()
                    .map_err(wrap_err)?;
                user.map(|user| with_profiles(conn, user))
                    .transpose()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User"))
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let user = user.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                tx.execute(
                    schema::INSERT_USER,
                    rusqlite::params![user.email, user.name, user.firstname, user.age, user.sex],
                )
                .map_err(wrap_err)?;
                let id = tx.last_insert_rowid();
                let correction_profile_results = user
                    .correction_profile_results
                    .iter()
                    .map(|profile| insert_profile(&tx, Some(id), profile))
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;

                Ok(User {
                    id,
                    email: user.email,
                    name: user.name,
                    firstname: user.firstname,
                    age: user.age,
                    sex: user.sex,
                    correction_profile_results,
                })
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User"))
    }

    async fn update_user(&self, id: i64, patch: &UserPatch) -> Result<User> {
        let patch = patch.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let user = tx
                    .query_row(schema::SELECT_USER_BY_ID, [id], row_to_user)
                    .map_err(wrap_err)?;
                let mut user = with_profiles(&tx, user).map_err(wrap_err)?;
                patch.apply_to(&mut user);
                tx.execute(
                    schema::UPDATE_USER,
                    rusqlite::params![id, user.email, user.name, user.firstname, user.age, user.sex],
                )
                .map_err(wrap_err)?;

                if let Some(profiles) = &patch.correction_profile_results {
                    if let Some(evicted) =
                        profile_result_evicted_by_replacement(&user.correction_profile_results)
                    {
                        tx.execute(schema::DELETE_PROFILE, [evicted])
                            .map_err(wrap_err)?;
                    }
                    tx.execute(schema::DETACH_PROFILES_OF_USER, [id])
                        .map_err(wrap_err)?;
                    for profile in profiles {
                        insert_profile(&tx, Some(id), profile).map_err(wrap_err)?;
                    }
                }

                let user = with_profiles(&tx, user).map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(user)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id))
    }

    async fn add_correction_profile_result(
        &self,
        user_id: i64,
        profile: &NewCorrectionProfileResult,
    ) -> Result<CorrectionProfileResult> {
        let profile = profile.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                ensure_exists(&tx, schema::USER_EXISTS, user_id).map_err(wrap_err)?;
                let created = insert_profile(&tx, Some(user_id), &profile).map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(created)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", user_id))
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn.execute(schema::DELETE_USER, [id]).map_err(wrap_err)?;
                affected(rows).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id))
    }
}

// ============================================================================
// CorrectionProfileResultRepository implementation
// ============================================================================

#[async_trait]
impl CorrectionProfileResultRepository for SqliteRepository {
    async fn list_correction_profile_results(&self) -> Result<Vec<CorrectionProfileResult>> {
        self.conn
            .call(|conn| query_profiles(conn, schema::SELECT_PROFILES, []).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "CorrectionProfileResult"))
    }

    async fn get_correction_profile_result(
        &self,
        id: i64,
    ) -> Result<Option<CorrectionProfileResult>> {
        self.conn
            .call(move |conn| {
                let profile = conn
                    .query_row(schema::SELECT_PROFILE_BY_ID, [id], row_to_profile)
                    .optional()
                    .map_err(wrap_err)?;
                profile
                    .map(|profile| with_filters(conn, profile))
                    .transpose()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "CorrectionProfileResult", id))
    }

    async fn get_correction_profile_results_by_type(
        &self,
        profile_type: &str,
    ) -> Result<Vec<CorrectionProfileResult>> {
        let profile_type = profile_type.to_string();

        self.conn
            .call(move |conn| {
                query_profiles(conn, schema::SELECT_PROFILES_BY_TYPE, [&profile_type])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "CorrectionProfileResult"))
    }

    async fn update_correction_profile_result(
        &self,
        id: i64,
        patch: &CorrectionProfileResultPatch,
    ) -> Result<CorrectionProfileResult> {
        let patch = patch.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let mut profile = tx
                    .query_row(schema::SELECT_PROFILE_BY_ID, [id], row_to_profile)
                    .map_err(wrap_err)?;
                patch.apply_to(&mut profile);
                tx.execute(
                    schema::UPDATE_PROFILE,
                    rusqlite::params![id, profile.profile_type],
                )
                .map_err(wrap_err)?;

                if let Some(filters) = &patch.filters {
                    tx.execute(schema::DELETE_FILTERS_OF_PROFILE, [id])
                        .map_err(wrap_err)?;
                    for filter in filters {
                        insert_filter(&tx, id, filter).map_err(wrap_err)?;
                    }
                }

                let profile = with_filters(&tx, profile).map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(profile)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "CorrectionProfileResult", id))
    }

    async fn add_filter(&self, profile_id: i64, filter: &NewFilter) -> Result<Filter> {
        let filter = filter.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                ensure_exists(&tx, schema::PROFILE_EXISTS, profile_id).map_err(wrap_err)?;
                let created = insert_filter(&tx, profile_id, &filter).map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(created)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "CorrectionProfileResult", profile_id))
    }

    async fn delete_correction_profile_result(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_PROFILE, [id])
                    .map_err(wrap_err)?;
                affected(rows).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "CorrectionProfileResult", id))
    }
}

// ============================================================================
// FilterRepository implementation
// ============================================================================

#[async_trait]
impl FilterRepository for SqliteRepository {
    async fn list_filters(&self) -> Result<Vec<Filter>> {
        self.conn
            .call(|conn| query_filters(conn, schema::SELECT_FILTERS, []).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Filter"))
    }

    async fn get_filter(&self, id: i64) -> Result<Option<Filter>> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_FILTER_BY_ID, [id], row_to_filter)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Filter", id))
    }

    async fn get_filters_by_parameter(&self, parameter: &str) -> Result<Vec<Filter>> {
        let parameter = parameter.to_string();

        self.conn
            .call(move |conn| {
                query_filters(conn, schema::SELECT_FILTERS_BY_PARAMETER, [&parameter])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Filter"))
    }

    async fn update_filter(&self, id: i64, patch: &FilterPatch) -> Result<Filter> {
        let patch = patch.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let mut filter = tx
                    .query_row(schema::SELECT_FILTER_BY_ID, [id], row_to_filter)
                    .map_err(wrap_err)?;
                patch.apply_to(&mut filter);
                tx.execute(
                    schema::UPDATE_FILTER,
                    rusqlite::params![id, filter.parameter, filter.value],
                )
                .map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(filter)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Filter", id))
    }

    async fn delete_filter(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn.execute(schema::DELETE_FILTER, [id]).map_err(wrap_err)?;
                affected(rows).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Filter", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    fn warm_profile() -> NewCorrectionProfileResult {
        NewCorrectionProfileResult::new("warm")
            .with_filter(NewFilter::new("hue", "12"))
            .with_filter(NewFilter::new("saturation", "0.8"))
    }

    #[tokio::test]
    async fn test_create_user_round_trips_nested_rows() {
        let repo = repo().await;
        let created = repo
            .create_user(
                &NewUser::new()
                    .with_email("ada@example.com")
                    .with_firstname("Ada")
                    .with_age(36)
                    .with_correction_profile_result(warm_profile()),
            )
            .await
            .unwrap();

        let retrieved = repo.get_user(created.id).await.unwrap();
        assert_eq!(retrieved, Some(created.clone()));

        let by_email = repo.get_user_by_email("ada@example.com").await.unwrap();
        assert_eq!(by_email, Some(created));
    }

    #[tokio::test]
    async fn test_missing_rows_are_none() {
        let repo = repo().await;
        assert!(repo.get_user(1).await.unwrap().is_none());
        assert!(repo.get_correction_profile_result(1).await.unwrap().is_none());
        assert!(repo.get_filter(1).await.unwrap().is_none());
        assert!(repo.get_user_by_email("x@y.z").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = repo().await;
        let first = repo.create_user(&NewUser::new()).await.unwrap();
        repo.delete_user(first.id).await.unwrap();

        let second = repo.create_user(&NewUser::new()).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let repo = repo().await;

        let result = repo.update_user(99, &UserPatch::new().with_name("x")).await;
        assert_eq!(result, Err(RepositoryError::not_found("User", 99)));
    }

    #[tokio::test]
    async fn test_add_profile_result_to_missing_user_is_not_found() {
        let repo = repo().await;
        let result = repo
            .add_correction_profile_result(4, &NewCorrectionProfileResult::new("cold"))
            .await;
        assert_eq!(result, Err(RepositoryError::not_found("User", 4)));
    }

    #[tokio::test]
    async fn test_update_user_deletes_first_and_detaches_the_rest() {
        let repo = repo().await;
        let user = repo
            .create_user(
                &NewUser::new()
                    .with_name("Lovelace")
                    .with_correction_profile_result(warm_profile())
                    .with_correction_profile_result(NewCorrectionProfileResult::new("cold")),
            )
            .await
            .unwrap();
        let first = user.correction_profile_results[0].clone();
        let second = user.correction_profile_results[1].clone();

        let updated = repo
            .update_user(
                user.id,
                &UserPatch::new().with_correction_profile_results(vec![
                    NewCorrectionProfileResult::new("neutral")
                        .with_filter(NewFilter::new("gamma", "2")),
                ]),
            )
            .await
            .unwrap();

        assert_eq!(updated.name.as_deref(), Some("Lovelace"));
        assert_eq!(updated.correction_profile_results.len(), 1);
        assert_eq!(updated.correction_profile_results[0].profile_type, "neutral");
        assert_eq!(repo.get_user(user.id).await.unwrap(), Some(updated.clone()));

        assert!(repo
            .get_correction_profile_result(first.id)
            .await
            .unwrap()
            .is_none());
        assert_eq!(
            repo.get_correction_profile_result(second.id).await.unwrap(),
            Some(second)
        );
        assert_eq!(
            repo.list_filters().await.unwrap(),
            updated.correction_profile_results[0].filters
        );
    }

    #[tokio::test]
    async fn test_failed_user_update_writes_nothing() {
        let repo = repo().await;
        let user = repo
            .create_user(
                &NewUser::new()
                    .with_name("Lovelace")
                    .with_correction_profile_result(warm_profile())
                    .with_correction_profile_result(NewCorrectionProfileResult::new("cold")),
            )
            .await
            .unwrap();
        repo.execute_batch(
            "CREATE TRIGGER reject_broken_profile
             BEFORE INSERT ON correction_profile_results
             WHEN NEW.type = 'broken'
             BEGIN SELECT RAISE(ABORT, 'disk I/O error'); END;",
        )
        .await
        .unwrap();

        let result = repo
            .update_user(
                user.id,
                &UserPatch::new()
                    .with_name("King")
                    .with_correction_profile_results(vec![
                        NewCorrectionProfileResult::new("neutral"),
                        NewCorrectionProfileResult::new("broken"),
                    ]),
            )
            .await;

        assert!(matches!(result, Err(RepositoryError::QueryFailed(_))));
        assert_eq!(repo.get_user(user.id).await.unwrap(), Some(user));
        assert_eq!(repo.list_correction_profile_results().await.unwrap().len(), 2);
        assert_eq!(repo.list_filters().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_user_cascades_through_foreign_keys() {
        let repo = repo().await;
        let user = repo
            .create_user(&NewUser::new().with_correction_profile_result(warm_profile()))
            .await
            .unwrap();

        repo.delete_user(user.id).await.unwrap();

        assert!(repo.list_users().await.unwrap().is_empty());
        assert!(repo.list_correction_profile_results().await.unwrap().is_empty());
        assert!(repo.list_filters().await.unwrap().is_empty());
        assert_eq!(
            repo.delete_user(user.id).await,
            Err(RepositoryError::not_found("User", user.id))
        );
    }

    #[tokio::test]
    async fn test_profiles_by_type_in_id_order() {
        let repo = repo().await;
        repo.create_user(
            &NewUser::new()
                .with_correction_profile_result(warm_profile())
                .with_correction_profile_result(NewCorrectionProfileResult::new("cold"))
                .with_correction_profile_result(NewCorrectionProfileResult::new("warm")),
        )
        .await
        .unwrap();

        let warm = repo
            .get_correction_profile_results_by_type("warm")
            .await
            .unwrap();
        assert_eq!(warm.len(), 2);
        assert!(warm[0].id < warm[1].id);
        assert_eq!(warm[0].filters.len(), 2);
    }

    #[tokio::test]
    async fn test_update_profile_type_keeps_filters() {
        let repo = repo().await;
        let user = repo
            .create_user(&NewUser::new().with_correction_profile_result(warm_profile()))
            .await
            .unwrap();
        let mut profile = user.correction_profile_results[0].clone();

        let updated = repo
            .update_correction_profile_result(
                profile.id,
                &CorrectionProfileResultPatch::new().with_type("cool"),
            )
            .await
            .unwrap();

        profile.profile_type = "cool".to_string();
        assert_eq!(updated, profile);
        assert_eq!(
            repo.get_correction_profile_result(profile.id).await.unwrap(),
            Some(profile)
        );
    }

    #[tokio::test]
    async fn test_update_profile_filters_deletes_old_rows() {
        let repo = repo().await;
        let user = repo
            .create_user(&NewUser::new().with_correction_profile_result(warm_profile()))
            .await
            .unwrap();
        let profile = &user.correction_profile_results[0];

        let updated = repo
            .update_correction_profile_result(
                profile.id,
                &CorrectionProfileResultPatch::new()
                    .with_filters(vec![NewFilter::new("contrast", "1.1")]),
            )
            .await
            .unwrap();

        assert_eq!(updated.profile_type, "warm");
        assert_eq!(repo.list_filters().await.unwrap(), updated.filters);
    }

    #[tokio::test]
    async fn test_failed_profile_update_writes_nothing() {
        let repo = repo().await;
        let user = repo
            .create_user(&NewUser::new().with_correction_profile_result(warm_profile()))
            .await
            .unwrap();
        let profile = user.correction_profile_results[0].clone();
        repo.execute_batch(
            "CREATE TRIGGER reject_broken_filter
             BEFORE INSERT ON filters
             WHEN NEW.parameter = 'broken'
             BEGIN SELECT RAISE(ABORT, 'disk I/O error'); END;",
        )
        .await
        .unwrap();

        let result = repo
            .update_correction_profile_result(
                profile.id,
                &CorrectionProfileResultPatch::new()
                    .with_type("cool")
                    .with_filters(vec![
                        NewFilter::new("contrast", "1.1"),
                        NewFilter::new("broken", "0"),
                    ]),
            )
            .await;

        assert!(matches!(result, Err(RepositoryError::QueryFailed(_))));
        assert_eq!(
            repo.get_correction_profile_result(profile.id).await.unwrap(),
            Some(profile)
        );
    }

    #[tokio::test]
    async fn test_add_filter_to_missing_profile_is_not_found() {
        let repo = repo().await;
        let result = repo.add_filter(8, &NewFilter::new("hue", "1")).await;
        assert_eq!(
            result,
            Err(RepositoryError::not_found("CorrectionProfileResult", 8))
        );
    }

    #[tokio::test]
    async fn test_delete_profile_cascades_to_filters() {
        let repo = repo().await;
        let user = repo
            .create_user(&NewUser::new().with_correction_profile_result(warm_profile()))
            .await
            .unwrap();
        let profile_id = user.correction_profile_results[0].id;

        repo.delete_correction_profile_result(profile_id)
            .await
            .unwrap();

        assert!(repo.list_filters().await.unwrap().is_empty());
        let stored = repo.get_user(user.id).await.unwrap().unwrap();
        assert!(stored.correction_profile_results.is_empty());
    }

    #[tokio::test]
    async fn test_filters_by_parameter_update_and_delete() {
        let repo = repo().await;
        repo.create_user(&NewUser::new().with_correction_profile_result(warm_profile()))
            .await
            .unwrap();

        let mut filter = repo
            .get_filters_by_parameter("hue")
            .await
            .unwrap()
            .remove(0);
        let updated = repo
            .update_filter(filter.id, &FilterPatch::new().with_value("14"))
            .await
            .unwrap();
        filter.value = "14".to_string();
        assert_eq!(updated, filter);
        assert_eq!(repo.get_filter(filter.id).await.unwrap(), Some(filter.clone()));
        assert_eq!(
            repo.update_filter(99, &FilterPatch::new()).await,
            Err(RepositoryError::not_found("Filter", 99))
        );

        repo.delete_filter(filter.id).await.unwrap();
        assert!(repo.get_filter(filter.id).await.unwrap().is_none());
        assert_eq!(
            repo.delete_filter(filter.id).await,
            Err(RepositoryError::not_found("Filter", filter.id))
        );
    }
}
