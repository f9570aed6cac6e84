use std::fmt::Display;
use std::str::FromStr;

use anyhow::Result;
use dialoguer::{Input, MultiSelect, Select};
use owo_colors::OwoColorize;
use scholarship_core::ScholarResult;
use scholarship_core::credentials::CredentialStore;
use scholarship_core::profile::{
    Cause, Gender, ScholarshipType, SchoolYear, StudentProfile, validate_age, validate_gpa,
    validate_test_score,
};

use super::login_interactive;

pub fn run<S: CredentialStore>(store: &mut S, username: Option<String>) -> Result<()> {
    let username = login_interactive(store, username)?;

    let current = match load_profile(store, &username) {
        Ok(profile) => profile.unwrap_or_default(),
        Err(e) => {
            log::warn!("Starting from a blank profile for '{}': {}", username, e);
            StudentProfile::default()
        }
    };

    let profile = fill_form(current)?;
    save_profile(store, &username, &profile)?;

    println!();
    println!("{}", "  Your scholarship preferences have been saved.".green());
    Ok(())
}

/// The saved profile, or None if nothing has been saved yet.
pub fn load_profile<S: CredentialStore>(store: &S, username: &str) -> Result<Option<StudentProfile>> {
    let details = store.get_details(username)?;
    Ok(StudentProfile::from_details(&details)?)
}

/// Validate and overwrite the account's details with `profile`.
pub fn save_profile<S: CredentialStore>(store: &mut S, username: &str, profile: &StudentProfile) -> Result<()> {
    let details = profile.to_details()?;
    store.save_details(username, &details)?;
    Ok(())
}

fn fill_form(mut p: StudentProfile) -> Result<StudentProfile> {
    section("Basic Information");
    p.full_name = required_text("Full Name", &p.full_name)?;
    p.email = text("Email Address", &p.email)?;
    p.age = number("Age", p.age, validate_age)?;
    p.gender = select("Gender", &Gender::ALL, p.gender)?;

    section("Academic Information");
    p.gpa = number("GPA (0.0-4.0)", p.gpa, validate_gpa)?;
    p.major = text("Academic Major", &p.major)?;
    p.school_year = select("School Year", &SchoolYear::ALL, p.school_year)?;
    p.test_score = test_score(p.test_score)?;

    section("Financial and Demographic Information");
    p.financial_need = yes_no("Do you require need-based scholarships?", p.financial_need)?;
    let ethnicity = text("Ethnicity (optional)", p.ethnicity.as_deref().unwrap_or_default())?;
    p.ethnicity = if ethnicity.is_empty() { None } else { Some(ethnicity) };
    p.state = text("State of Residence", &p.state)?;
    p.disability = yes_no("Do you have any physical disabilities?", p.disability)?;

    section("Preferences");
    p.scholarship_types = multi_select("Types of Scholarships", &ScholarshipType::ALL, &p.scholarship_types)?;
    p.causes = multi_select("Causes or Values Important to You", &Cause::ALL, &p.causes)?;

    Ok(p)
}

fn section(title: &str) {
    println!();
    println!("{}", title.bold());
}

fn text(prompt: &str, current: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(format!("  {}", prompt))
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(input.trim().to_string())
}

fn required_text(prompt: &str, current: &str) -> Result<String> {
    loop {
        let input = text(prompt, current)?;
        if !input.is_empty() {
            return Ok(input);
        }
        eprintln!("  {}", format!("{} is required", prompt).red());
    }
}

fn number<T>(prompt: &str, current: T, validate: fn(T) -> ScholarResult<()>) -> Result<T>
where
    T: Copy + Display + FromStr + 'static,
    T::Err: Display,
{
    let value = Input::<T>::new()
        .with_prompt(format!("  {}", prompt))
        .default(current)
        .validate_with(move |v: &T| validate(*v).map_err(|e| e.to_string()))
        .interact_text()?;
    Ok(value)
}

fn test_score(current: Option<u16>) -> Result<Option<u16>> {
    let input: String = Input::new()
        .with_prompt("  SAT/ACT Score (optional)")
        .with_initial_text(current.map(|s| s.to_string()).unwrap_or_default())
        .allow_empty(true)
        .validate_with(|s: &String| -> Result<(), String> {
            if s.trim().is_empty() {
                return Ok(());
            }
            let score: u16 = s.trim().parse().map_err(|_| "Enter a whole number".to_string())?;
            validate_test_score(score).map_err(|e| e.to_string())
        })
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    Ok(Some(input.parse()?))
}

fn select<T: Copy + PartialEq + Display>(prompt: &str, options: &[T], current: T) -> Result<T> {
    let labels: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    let default = options.iter().position(|o| *o == current).unwrap_or(0);

    let idx = Select::new()
        .with_prompt(format!("  {}", prompt))
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(options[idx])
}

fn yes_no(prompt: &str, current: bool) -> Result<bool> {
    let idx = Select::new()
        .with_prompt(format!("  {}", prompt))
        .items(&["Yes", "No"])
        .default(if current { 0 } else { 1 })
        .interact()?;
    Ok(idx == 0)
}

fn multi_select<T: Copy + PartialEq + Display>(prompt: &str, options: &[T], current: &[T]) -> Result<Vec<T>> {
    let labels: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    let defaults: Vec<bool> = options.iter().map(|o| current.contains(o)).collect();

    let selections = MultiSelect::new()
        .with_prompt(format!("  {} (space to toggle, enter to confirm)", prompt))
        .items(&labels)
        .defaults(&defaults)
        .interact()?;
    Ok(selections.into_iter().map(|i| options[i]).collect())
}
