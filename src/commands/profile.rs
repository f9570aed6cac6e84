use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use scholarship_core::credentials::CredentialStore;

use super::login_interactive;
use super::preferences::load_profile;
use crate::render::Render;

pub fn run<S: CredentialStore>(store: &mut S, username: Option<String>, json: bool) -> Result<()> {
    let username = login_interactive(store, username)?;

    let Some(profile) = load_profile(store, &username)? else {
        println!(
            "{}",
            "  No preferences saved yet. Run `scholarship-finder preferences` to add them.".dimmed()
        );
        return Ok(());
    };

    if json {
        let out = serde_json::to_string_pretty(&profile).context("Failed to serialize profile")?;
        println!("{}", out);
    } else {
        println!("{}", format!("Profile for {}", username).bold());
        println!("{}", profile.render());
    }

    Ok(())
}
