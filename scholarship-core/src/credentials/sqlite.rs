//! SQLite-backed credential store.

use std::path::Path;

use rusqlite::{Connection, ErrorCode, OptionalExtension, params};

use super::{CreateAccount, CredentialStore, PasswordHasher, UserAccount};
use crate::error::{ScholarError, ScholarResult};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS users (
    username TEXT UNIQUE,
    password TEXT,
    details TEXT
)";

/// Owns a single connection for its whole lifetime.
/// Call `close` on shutdown to surface any error from closing the database.
pub struct SqliteCredentialStore {
    conn: Connection,
    hasher: PasswordHasher,
}

impl SqliteCredentialStore {
    /// Open (or create) the database at `path` and ensure the `users` table exists.
    pub fn open(path: &Path, hasher: PasswordHasher) -> ScholarResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        log::debug!("Opened credential store at {}", path.display());
        Self::init(conn, hasher)
    }

    pub fn open_in_memory(hasher: PasswordHasher) -> ScholarResult<Self> {
        Self::init(Connection::open_in_memory()?, hasher)
    }

    fn init(conn: Connection, hasher: PasswordHasher) -> ScholarResult<Self> {
        conn.execute(SCHEMA, [])?;
        Ok(SqliteCredentialStore { conn, hasher })
    }

    pub fn close(self) -> ScholarResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| ScholarError::Storage(format!("Failed to close credential store: {}", e)))?;
        log::debug!("Closed credential store");
        Ok(())
    }

    pub fn account(&self, username: &str) -> ScholarResult<Option<UserAccount>> {
        let account = self
            .conn
            .query_row(
                "SELECT username, password, details FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(UserAccount {
                        username: row.get(0)?,
                        password_hash: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                        details: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    })
                },
            )
            .optional()?;
        Ok(account)
    }

    fn stored_hash(&self, username: &str) -> ScholarResult<Option<String>> {
        let hash = self
            .conn
            .query_row(
                "SELECT password FROM users WHERE username = ?1",
                params![username],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?;
        Ok(hash.flatten())
    }
}

impl CredentialStore for SqliteCredentialStore {
    fn create_account(&mut self, username: &str, password: &str) -> ScholarResult<CreateAccount> {
        let hash = self.hasher.hash(password).to_string();

        let result = self.conn.execute(
            "INSERT INTO users (username, password, details) VALUES (?1, ?2, ?3)",
            params![username, hash, ""],
        );

        match result {
            Ok(_) => {
                log::info!("Created account '{}'", username);
                Ok(CreateAccount::Created)
            }
            Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
                log::debug!("Rejected duplicate username '{}'", username);
                Ok(CreateAccount::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn authenticate(&self, username: &str, password: &str) -> ScholarResult<bool> {
        let stored = self.stored_hash(username)?;
        let ok = self.hasher.verify(password, stored.as_deref());

        if !ok {
            log::info!("Failed login for '{}'", username);
        }
        Ok(ok)
    }

    fn save_details(&mut self, username: &str, details: &str) -> ScholarResult<()> {
        let updated = self.conn.execute(
            "UPDATE users SET details = ?1 WHERE username = ?2",
            params![details, username],
        )?;

        if updated == 0 {
            log::debug!("No account '{}'; details not saved", username);
        }
        Ok(())
    }

    fn get_details(&self, username: &str) -> ScholarResult<String> {
        let details = self
            .conn
            .query_row(
                "SELECT details FROM users WHERE username = ?1",
                params![username],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?;
        Ok(details.flatten().unwrap_or_default())
    }
}
