use anyhow::Result;
use owo_colors::OwoColorize;
use scholarship_core::credentials::{CreateAccount, CredentialStore};

use crate::prompt;

pub fn run<S: CredentialStore>(store: &mut S, username: Option<String>) -> Result<()> {
    let username = prompt::username(username)?;
    let password = prompt::password("Password")?;
    let confirm = prompt::password("Confirm password")?;

    match sign_up(store, &username, &password, &confirm)? {
        CreateAccount::Created => {
            println!("{}", "  Account created. You can now log in.".green());
            Ok(())
        }
        CreateAccount::Duplicate => anyhow::bail!("Username '{}' already exists", username),
    }
}

/// Presence and confirmation checks, then the store call.
fn sign_up<S: CredentialStore>(
    store: &mut S,
    username: &str,
    password: &str,
    confirm: &str,
) -> Result<CreateAccount> {
    prompt::require_filled(&[("Username", username), ("Password", password)])?;

    if password != confirm {
        anyhow::bail!("Passwords do not match");
    }

    Ok(store.create_account(username, password)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholarship_core::credentials::{MemoryCredentialStore, PasswordHasher};

    fn store() -> MemoryCredentialStore {
        MemoryCredentialStore::new(PasswordHasher::new(1_000))
    }

    #[test]
    fn creates_then_reports_duplicate() {
        let mut store = store();
        assert_eq!(sign_up(&mut store, "alice", "pw1", "pw1").unwrap(), CreateAccount::Created);
        assert_eq!(sign_up(&mut store, "alice", "pw2", "pw2").unwrap(), CreateAccount::Duplicate);
        assert!(store.authenticate("alice", "pw1").unwrap());
    }

    #[test]
    fn empty_fields_never_reach_the_store() {
        let mut store = store();
        assert!(sign_up(&mut store, "", "pw", "pw").is_err());
        assert!(sign_up(&mut store, "alice", "", "").is_err());
        assert!(store.account("alice").is_none());
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let mut store = store();
        let err = sign_up(&mut store, "alice", "pw1", "pw2").unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
        assert!(store.account("alice").is_none());
    }
}
