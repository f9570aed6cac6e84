//! Account storage: usernames, password hashes and saved profile details.

mod memory;
mod password;
mod sqlite;

pub use memory::MemoryCredentialStore;
pub use password::{DEFAULT_HASH_ITERATIONS, PasswordHash, PasswordHasher, verify_password};
pub use sqlite::SqliteCredentialStore;

use crate::error::ScholarResult;

/// A stored account row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub username: String,
    pub password_hash: String,
    /// Free-form blob, overwritten wholesale by `save_details`.
    pub details: String,
}

/// Outcome of a sign-up attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateAccount {
    Created,
    Duplicate,
}

impl CreateAccount {
    pub fn is_created(self) -> bool {
        self == CreateAccount::Created
    }
}

/// Storage contract for accounts.
///
/// Unknown usernames are never an error: `authenticate` answers false,
/// `get_details` answers an empty string and `save_details` does nothing.
pub trait CredentialStore {
    /// Store a new account with empty details, unless the username is taken.
    fn create_account(&mut self, username: &str, password: &str) -> ScholarResult<CreateAccount>;

    /// True iff the account exists and `password` matches its stored hash.
    fn authenticate(&self, username: &str, password: &str) -> ScholarResult<bool>;

    /// Replace the details blob of an existing account.
    fn save_details(&mut self, username: &str, details: &str) -> ScholarResult<()>;

    fn get_details(&self, username: &str) -> ScholarResult<String>;
}
