//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Ids are `AUTOINCREMENT` so a deleted row's id is never
//! handed out again.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT,
    name TEXT,
    firstname TEXT,
    age INTEGER,
    sex TEXT
);

-- Correction profile results table. A NULL user_id marks a result that was
-- detached from its user by a collection replacement.
CREATE TABLE IF NOT EXISTS correction_profile_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER,
    type TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

-- Filters table
CREATE TABLE IF NOT EXISTS filters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    correction_profile_result_id INTEGER NOT NULL,
    parameter TEXT NOT NULL,
    value TEXT NOT NULL,
    FOREIGN KEY (correction_profile_result_id)
        REFERENCES correction_profile_results(id) ON DELETE CASCADE
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
CREATE INDEX IF NOT EXISTS idx_profiles_user_id ON correction_profile_results(user_id);
CREATE INDEX IF NOT EXISTS idx_profiles_type ON correction_profile_results(type);
CREATE INDEX IF NOT EXISTS idx_filters_profile_id ON filters(correction_profile_result_id);
CREATE INDEX IF NOT EXISTS idx_filters_parameter ON filters(parameter);
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (email, name, firstname, age, sex)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_USERS: &str = r#"
SELECT id, email, name, firstname, age, sex
FROM users
ORDER BY id ASC
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, email, name, firstname, age, sex
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_EMAIL: &str = r#"
SELECT id, email, name, firstname, age, sex
FROM users
WHERE email = ?1
ORDER BY id ASC
LIMIT 1
"#;

pub const UPDATE_USER: &str = r#"
UPDATE users
SET email = ?2, name = ?3, firstname = ?4, age = ?5, sex = ?6
WHERE id = ?1
"#;

pub const DELETE_USER: &str = r#"
DELETE FROM users
WHERE id = ?1
"#;

pub const USER_EXISTS: &str = r#"
SELECT id FROM users WHERE id = ?1
"#;

// Correction profile result queries
pub const INSERT_PROFILE: &str = r#"
INSERT INTO correction_profile_results (user_id, type)
VALUES (?1, ?2)
"#;

pub const SELECT_PROFILES: &str = r#"
SELECT id, type
FROM correction_profile_results
ORDER BY id ASC
"#;

pub const SELECT_PROFILE_BY_ID: &str = r#"
SELECT id, type
FROM correction_profile_results
WHERE id = ?1
"#;

pub const SELECT_PROFILES_BY_USER: &str = r#"
SELECT id, type
FROM correction_profile_results
WHERE user_id = ?1
ORDER BY id ASC
"#;

pub const SELECT_PROFILES_BY_TYPE: &str = r#"
SELECT id, type
FROM correction_profile_results
WHERE type = ?1
ORDER BY id ASC
"#;

pub const UPDATE_PROFILE: &str = r#"
UPDATE correction_profile_results
SET type = ?2
WHERE id = ?1
"#;

pub const DETACH_PROFILES_OF_USER: &str = r#"
UPDATE correction_profile_results
SET user_id = NULL
WHERE user_id = ?1
"#;

pub const DELETE_PROFILE: &str = r#"
DELETE FROM correction_profile_results
WHERE id = ?1
"#;

pub const PROFILE_EXISTS: &str = r#"
SELECT id FROM correction_profile_results WHERE id = ?1
"#;

// Filter queries
pub const INSERT_FILTER: &str = r#"
INSERT INTO filters (correction_profile_result_id, parameter, value)
VALUES (?1, ?2, ?3)
"#;

pub const SELECT_FILTERS: &str = r#"
SELECT id, parameter, value
FROM filters
ORDER BY id ASC
"#;

pub const SELECT_FILTER_BY_ID: &str = r#"
SELECT id, parameter, value
FROM filters
WHERE id = ?1
"#;

pub const SELECT_FILTERS_BY_PROFILE: &str = r#"
SELECT id, parameter, value
FROM filters
WHERE correction_profile_result_id = ?1
ORDER BY id ASC
"#;

pub const SELECT_FILTERS_BY_PARAMETER: &str = r#"
SELECT id, parameter, value
FROM filters
WHERE parameter = ?1
ORDER BY id ASC
"#;

pub const UPDATE_FILTER: &str = r#"
UPDATE filters
SET parameter = ?2, value = ?3
WHERE id = ?1
"#;

pub const DELETE_FILTERS_OF_PROFILE: &str = r#"
DELETE FROM filters
WHERE correction_profile_result_id = ?1
"#;

pub const DELETE_FILTER: &str = r#"
DELETE FROM filters
WHERE id = ?1
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::{params, Connection};

    fn connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(CREATE_TABLES).unwrap();
        conn
    }

    fn insert_user(conn: &Connection) -> i64 {
        conn.execute(
            INSERT_USER,
            params!["a@b.c", None::<String>, None::<String>, None::<i32>, None::<String>],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn insert_profile(conn: &Connection, user_id: i64, profile_type: &str) -> i64 {
        conn.execute(INSERT_PROFILE, params![user_id, profile_type])
            .unwrap();
        conn.last_insert_rowid()
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_create_tables_is_rerunnable_and_enables_foreign_keys() {
        let conn = connection();
        conn.execute_batch(CREATE_TABLES).unwrap();

        let foreign_keys: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn test_profiles_by_user_in_id_order() {
        let conn = connection();
        let user_id = insert_user(&conn);
        let first = insert_profile(&conn, user_id, "warm");
        let second = insert_profile(&conn, user_id, "cold");

        let mut stmt = conn.prepare(SELECT_PROFILES_BY_USER).unwrap();
        let ids: Vec<i64> = stmt
            .query_map([user_id], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_detach_clears_owner_only() {
        let conn = connection();
        let user_id = insert_user(&conn);
        let profile_id = insert_profile(&conn, user_id, "warm");
        conn.execute(INSERT_FILTER, params![profile_id, "hue", "12"])
            .unwrap();

        assert_eq!(conn.execute(DETACH_PROFILES_OF_USER, [user_id]).unwrap(), 1);

        let owner: Option<i64> = conn
            .query_row(
                "SELECT user_id FROM correction_profile_results WHERE id = ?1",
                [profile_id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(owner, None);
        assert_eq!(count(&conn, "filters"), 1);

        // A detached result no longer follows its former owner.
        conn.execute(DELETE_USER, [user_id]).unwrap();
        assert_eq!(count(&conn, "correction_profile_results"), 1);
    }

    #[test]
    fn test_delete_cascades_through_foreign_keys() {
        let conn = connection();
        let user_id = insert_user(&conn);
        let profile_id = insert_profile(&conn, user_id, "warm");
        conn.execute(INSERT_FILTER, params![profile_id, "hue", "12"])
            .unwrap();

        conn.execute(DELETE_USER, [user_id]).unwrap();

        assert_eq!(count(&conn, "users"), 0);
        assert_eq!(count(&conn, "correction_profile_results"), 0);
        assert_eq!(count(&conn, "filters"), 0);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let conn = connection();
        let first = insert_user(&conn);
        conn.execute(DELETE_USER, [first]).unwrap();

        assert!(insert_user(&conn) > first);
    }
}
