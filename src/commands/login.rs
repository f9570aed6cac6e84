use anyhow::Result;
use owo_colors::OwoColorize;
use scholarship_core::credentials::CredentialStore;

use super::login_interactive;

pub fn run<S: CredentialStore>(store: &mut S, username: Option<String>) -> Result<()> {
    let username = login_interactive(store, username)?;
    println!("{}", format!("  Welcome back, {}!", username).green());
    Ok(())
}
