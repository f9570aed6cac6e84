pub mod calendar;
pub mod export;
pub mod find;
pub mod login;
pub mod preferences;
pub mod profile;
pub mod scholarships;
pub mod signup;

use anyhow::Result;
use scholarship_core::credentials::CredentialStore;

use crate::prompt;

/// Ask for credentials and check them. Returns the username on success.
pub fn login_interactive<S: CredentialStore>(store: &S, username: Option<String>) -> Result<String> {
    let username = prompt::username(username)?;
    let password = prompt::password("Password")?;
    prompt::require_filled(&[("Username", username.as_str()), ("Password", password.as_str())])?;

    if !store.authenticate(&username, &password)? {
        anyhow::bail!("Invalid username or password");
    }
    Ok(username)
}
