//! In-process credential store.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::{CreateAccount, CredentialStore, PasswordHasher, UserAccount};
use crate::error::ScholarResult;

/// Accounts held in a map; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    hasher: PasswordHasher,
    accounts: HashMap<String, UserAccount>,
}

impl MemoryCredentialStore {
    pub fn new(hasher: PasswordHasher) -> Self {
        MemoryCredentialStore {
            hasher,
            accounts: HashMap::new(),
        }
    }

    pub fn account(&self, username: &str) -> Option<&UserAccount> {
        self.accounts.get(username)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn create_account(&mut self, username: &str, password: &str) -> ScholarResult<CreateAccount> {
        match self.accounts.entry(username.to_string()) {
            Entry::Occupied(_) => Ok(CreateAccount::Duplicate),
            Entry::Vacant(slot) => {
                slot.insert(UserAccount {
                    username: username.to_string(),
                    password_hash: self.hasher.hash(password).to_string(),
                    details: String::new(),
                });
                Ok(CreateAccount::Created)
            }
        }
    }

    fn authenticate(&self, username: &str, password: &str) -> ScholarResult<bool> {
        let stored = self.accounts.get(username).map(|a| a.password_hash.as_str());
        Ok(self.hasher.verify(password, stored))
    }

    fn save_details(&mut self, username: &str, details: &str) -> ScholarResult<()> {
        if let Some(account) = self.accounts.get_mut(username) {
            account.details = details.to_string();
        }
        Ok(())
    }

    fn get_details(&self, username: &str) -> ScholarResult<String> {
        Ok(self
            .accounts
            .get(username)
            .map(|account| account.details.clone())
            .unwrap_or_default())
    }
}
