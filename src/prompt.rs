use anyhow::{Context, Result};
use dialoguer::Input;

/// Use the username given on the command line, or ask for one.
pub fn username(given: Option<String>) -> Result<String> {
    let name = match given {
        Some(u) => u,
        None => Input::<String>::new()
            .with_prompt("  Username")
            .allow_empty(true)
            .interact_text()?,
    };
    Ok(name.trim().to_string())
}

/// Prompt the user for password input (hidden).
pub fn password(label: &str) -> Result<String> {
    let prompt = format!("  {}: ", label);
    rpassword::prompt_password(&prompt).context("Failed to read password")
}

/// Presence check done before anything reaches the credential store.
pub fn require_filled(fields: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        anyhow::bail!("Please fill in: {}", missing.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_fields_pass() {
        assert!(require_filled(&[("Username", "alice"), ("Password", "pw")]).is_ok());
    }

    #[test]
    fn missing_fields_are_listed() {
        let err = require_filled(&[("Username", "  "), ("Password", "")]).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in: Username, Password");
    }
}
