use rusqlite::{params, Connection, Row};

use super::errors::StoreResult;
use crate::models::{AuthenticatedUser, Credentials, User};

const USER_COLUMNS: &str = "id, username, password, email, role";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
        email: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        role: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

/// Every user in the order the store returns them.
pub fn fetch_users(conn: &Connection) -> StoreResult<Vec<User>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users"))?;

    let users = stmt
        .query_map([], user_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(users)
}

/// Single user read that formats the id directly into the statement text.
///
/// This is the one statement in the store that does not bind its varying
/// value through a placeholder. It is kept separate from [`fetch_user`] so
/// both paths stay observable.
pub fn fetch_user_interpolated(conn: &Connection, id: i64) -> StoreResult<User> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = {id}");
    Ok(conn.query_row(&query, [], user_from_row)?)
}

/// Single user read with the id bound as a parameter.
pub fn fetch_user(conn: &Connection, id: i64) -> StoreResult<User> {
    Ok(conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        [id],
        user_from_row,
    )?)
}

/// Insert a user and return it with the store-assigned id. Any id carried by
/// `user` is ignored.
pub fn create_user(conn: &Connection, user: &User) -> StoreResult<User> {
    conn.execute(
        "INSERT INTO users (username, password, email, role) VALUES (?1, ?2, ?3, ?4)",
        params![user.username, user.password, user.email, user.role],
    )?;

    Ok(User {
        id: conn.last_insert_rowid(),
        ..user.clone()
    })
}

/// Overwrite every column of user `id`. No existence check: a missing id
/// touches zero rows and still echoes the record back.
pub fn update_user(conn: &Connection, id: i64, user: &User) -> StoreResult<User> {
    conn.execute(
        "UPDATE users SET username = ?1, password = ?2, email = ?3, role = ?4 WHERE id = ?5",
        params![user.username, user.password, user.email, user.role, id],
    )?;

    Ok(User { id, ..user.clone() })
}

/// Delete user `id`, succeeding whether or not the row existed.
pub fn delete_user(conn: &Connection, id: i64) -> StoreResult<()> {
    conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
    Ok(())
}

/// Match a username and plaintext password against stored credentials.
pub fn find_by_credentials(
    conn: &Connection,
    credentials: &Credentials,
) -> StoreResult<AuthenticatedUser> {
    Ok(conn.query_row(
        "SELECT id, username, role FROM users WHERE username = ?1 AND password = ?2",
        params![credentials.username, credentials.password],
        |row| {
            Ok(AuthenticatedUser {
                id: row.get(0)?,
                username: row.get(1)?,
                role: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            })
        },
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Store, StoreConfig, StoreError};

    fn store() -> Store {
        Store::open_in_memory(&StoreConfig::default()).unwrap()
    }

    fn sample(username: &str) -> User {
        User {
            id: 999,
            username: username.to_string(),
            password: "pw".to_string(),
            email: format!("{username}@example.com"),
            role: "user".to_string(),
        }
    }

    #[test]
    fn test_fetch_users_returns_seed_rows() {
        let users = store().with_conn(fetch_users).unwrap();
        let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["admin", "user1"]);
        assert_eq!(users[0].password, "admin123");
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let store = store();
        let first = store.with_conn(|c| create_user(c, &sample("a"))).unwrap();
        let second = store.with_conn(|c| create_user(c, &sample("b"))).unwrap();

        assert_ne!(first.id, 999);
        assert!(second.id > first.id);
    }

    #[test]
    fn test_duplicate_username_is_database_error() {
        let store = store();
        let err = store.with_conn(|c| create_user(c, &sample("admin"))).unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_both_lookup_paths_agree() {
        let store = store();
        let bound = store.with_conn(|c| fetch_user(c, 1)).unwrap();
        let interpolated = store.with_conn(|c| fetch_user_interpolated(c, 1)).unwrap();
        assert_eq!(bound, interpolated);
        assert_eq!(bound.username, "admin");
    }

    #[test]
    fn test_missing_user_is_not_found() {
        let store = store();
        assert!(matches!(
            store.with_conn(|c| fetch_user(c, 404)),
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.with_conn(|c| fetch_user_interpolated(c, 404)),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn test_null_email_decodes_as_empty() {
        let store = store();
        store
            .with_conn(|c| {
                c.execute(
                    "INSERT INTO users (username, password) VALUES ('bare', 'x')",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        let users = store.with_conn(fetch_users).unwrap();
        let bare = users.iter().find(|u| u.username == "bare").unwrap();
        assert_eq!(bare.email, "");
        assert_eq!(bare.role, "");
    }

    #[test]
    fn test_update_missing_id_echoes_record() {
        let store = store();
        let updated = store.with_conn(|c| update_user(c, 77, &sample("ghost"))).unwrap();
        assert_eq!(updated.id, 77);
        assert_eq!(updated.username, "ghost");
        assert_eq!(store.with_conn(fetch_users).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = store();
        store.with_conn(|c| delete_user(c, 1)).unwrap();
        store.with_conn(|c| delete_user(c, 1)).unwrap();
        assert_eq!(store.with_conn(fetch_users).unwrap().len(), 1);
    }

    #[test]
    fn test_credentials_match_plaintext() {
        let store = store();
        let creds = Credentials {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        };
        let user = store.with_conn(|c| find_by_credentials(c, &creds)).unwrap();
        assert_eq!(user.role, "admin");

        let wrong = Credentials {
            password: "nope".to_string(),
            ..creds
        };
        assert!(matches!(
            store.with_conn(|c| find_by_credentials(c, &wrong)),
            Err(StoreError::NotFound)
        ));
    }
}
