//! SQLite row conversion functions.
//!
//! Rows only carry their own columns; nested collections are filled in by the
//! repository after the owning row is read.

use rusqlite::Row;

use visionary_core::profile::{CorrectionProfileResult, Filter, User};

/// Convert a SQLite row to a User with an empty profile collection.
///
/// Expected columns: id, email, name, firstname, age, sex
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        firstname: row.get(3)?,
        age: row.get(4)?,
        sex: row.get(5)?,
        correction_profile_results: Vec::new(),
    })
}

/// Convert a SQLite row to a CorrectionProfileResult with no filters.
///
/// Expected columns: id, type
pub fn row_to_profile(row: &Row) -> rusqlite::Result<CorrectionProfileResult> {
    Ok(CorrectionProfileResult {
        id: row.get(0)?,
        profile_type: row.get(1)?,
        filters: Vec::new(),
    })
}

/// Convert a SQLite row to a Filter.
///
/// Expected columns: id, parameter, value
pub fn row_to_filter(row: &Row) -> rusqlite::Result<Filter> {
    Ok(Filter {
        id: row.get(0)?,
        parameter: row.get(1)?,
        value: row.get(2)?,
    })
}
