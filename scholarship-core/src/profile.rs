//! Student profile collected by the preferences form.
//!
//! The profile is stored as a JSON blob in the account's `details` column.
//! It is never used to filter scholarships.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ScholarError, ScholarResult};

pub const MIN_AGE: u8 = 13;
pub const MAX_AGE: u8 = 100;
pub const MAX_GPA: f64 = 4.0;
pub const MAX_TEST_SCORE: u16 = 1600;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[serde(rename = "Non-Binary")]
    NonBinary,
    #[default]
    #[serde(rename = "Prefer Not to Say")]
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Male, Gender::Female, Gender::NonBinary, Gender::PreferNotToSay];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NonBinary => "Non-Binary",
            Gender::PreferNotToSay => "Prefer Not to Say",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchoolYear {
    #[default]
    #[serde(rename = "High School Senior")]
    HighSchoolSenior,
    #[serde(rename = "College Freshman")]
    CollegeFreshman,
    Sophomore,
    Junior,
    Senior,
    #[serde(rename = "Graduate Student")]
    GraduateStudent,
}

impl SchoolYear {
    pub const ALL: [SchoolYear; 6] = [
        SchoolYear::HighSchoolSenior,
        SchoolYear::CollegeFreshman,
        SchoolYear::Sophomore,
        SchoolYear::Junior,
        SchoolYear::Senior,
        SchoolYear::GraduateStudent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SchoolYear::HighSchoolSenior => "High School Senior",
            SchoolYear::CollegeFreshman => "College Freshman",
            SchoolYear::Sophomore => "Sophomore",
            SchoolYear::Junior => "Junior",
            SchoolYear::Senior => "Senior",
            SchoolYear::GraduateStudent => "Graduate Student",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScholarshipType {
    #[serde(rename = "Merit Scholarships")]
    Merit,
    #[serde(rename = "Need-Based Scholarships")]
    NeedBased,
    #[serde(rename = "Federal Grants")]
    FederalGrants,
    #[serde(rename = "Athletic Scholarships")]
    Athletic,
    #[serde(rename = "Artistic Scholarships")]
    Artistic,
    #[serde(rename = "Graduate Aid")]
    GraduateAid,
    Other,
}

impl ScholarshipType {
    pub const ALL: [ScholarshipType; 7] = [
        ScholarshipType::Merit,
        ScholarshipType::NeedBased,
        ScholarshipType::FederalGrants,
        ScholarshipType::Athletic,
        ScholarshipType::Artistic,
        ScholarshipType::GraduateAid,
        ScholarshipType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScholarshipType::Merit => "Merit Scholarships",
            ScholarshipType::NeedBased => "Need-Based Scholarships",
            ScholarshipType::FederalGrants => "Federal Grants",
            ScholarshipType::Athletic => "Athletic Scholarships",
            ScholarshipType::Artistic => "Artistic Scholarships",
            ScholarshipType::GraduateAid => "Graduate Aid",
            ScholarshipType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cause {
    #[serde(rename = "Community Service")]
    CommunityService,
    Sustainability,
    #[serde(rename = "Social Justice")]
    SocialJustice,
    Diversity,
    #[serde(rename = "STEM")]
    Stem,
    Arts,
}

impl Cause {
    pub const ALL: [Cause; 6] = [
        Cause::CommunityService,
        Cause::Sustainability,
        Cause::SocialJustice,
        Cause::Diversity,
        Cause::Stem,
        Cause::Arts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Cause::CommunityService => "Community Service",
            Cause::Sustainability => "Sustainability",
            Cause::SocialJustice => "Social Justice",
            Cause::Diversity => "Diversity",
            Cause::Stem => "STEM",
            Cause::Arts => "Arts",
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_label!(Gender, SchoolYear, ScholarshipType, Cause);

/// Everything the form asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub full_name: String,
    pub email: String,
    pub age: u8,
    pub gender: Gender,
    pub gpa: f64,
    pub major: String,
    pub school_year: SchoolYear,
    /// SAT/ACT score, if the student has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_score: Option<u16>,
    pub financial_need: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,
    pub state: String,
    pub disability: bool,
    #[serde(default)]
    pub scholarship_types: Vec<ScholarshipType>,
    #[serde(default)]
    pub causes: Vec<Cause>,
}

impl Default for StudentProfile {
    fn default() -> Self {
        StudentProfile {
            full_name: String::new(),
            email: String::new(),
            age: 18,
            gender: Gender::default(),
            gpa: 3.0,
            major: String::new(),
            school_year: SchoolYear::default(),
            test_score: None,
            financial_need: false,
            ethnicity: None,
            state: String::new(),
            disability: false,
            scholarship_types: Vec::new(),
            causes: Vec::new(),
        }
    }
}

impl StudentProfile {
    pub fn validate(&self) -> ScholarResult<()> {
        if self.full_name.trim().is_empty() {
            return Err(ScholarError::InvalidProfile("full name is required".into()));
        }
        validate_age(self.age)?;
        validate_gpa(self.gpa)?;
        if let Some(score) = self.test_score {
            validate_test_score(score)?;
        }
        Ok(())
    }

    /// Serialize for the account's details blob.
    pub fn to_details(&self) -> ScholarResult<String> {
        self.validate()?;
        serde_json::to_string(self).map_err(|e| ScholarError::InvalidProfile(e.to_string()))
    }

    /// Parse a details blob. An empty blob means nothing has been saved yet.
    pub fn from_details(details: &str) -> ScholarResult<Option<Self>> {
        if details.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(details)
            .map(Some)
            .map_err(|e| ScholarError::InvalidProfile(format!("stored details unreadable: {}", e)))
    }
}

pub fn validate_age(age: u8) -> ScholarResult<()> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ScholarError::InvalidProfile(format!(
            "age must be between {} and {}",
            MIN_AGE, MAX_AGE
        )));
    }
    Ok(())
}

/// GPA is on a 0.0-4.0 scale in steps of 0.1.
pub fn validate_gpa(gpa: f64) -> ScholarResult<()> {
    let tenths = gpa * 10.0;
    if !(0.0..=MAX_GPA).contains(&gpa) || (tenths - tenths.round()).abs() > 1e-6 {
        return Err(ScholarError::InvalidProfile(format!(
            "GPA must be between 0.0 and {:.1} in steps of 0.1",
            MAX_GPA
        )));
    }
    Ok(())
}

pub fn validate_test_score(score: u16) -> ScholarResult<()> {
    if score > MAX_TEST_SCORE {
        return Err(ScholarError::InvalidProfile(format!(
            "SAT/ACT score must be between 0 and {}",
            MAX_TEST_SCORE
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StudentProfile {
        StudentProfile {
            full_name: "Alice Example".into(),
            email: "alice@example.com".into(),
            major: "Biology".into(),
            state: "Ohio".into(),
            test_score: Some(1350),
            financial_need: true,
            scholarship_types: vec![ScholarshipType::Merit, ScholarshipType::NeedBased],
            causes: vec![Cause::Stem],
            ..StudentProfile::default()
        }
    }

    #[test]
    fn default_matches_form_defaults() {
        let profile = StudentProfile::default();
        assert_eq!(profile.age, 18);
        assert_eq!(profile.gpa, 3.0);
        assert_eq!(profile.school_year, SchoolYear::HighSchoolSenior);
    }

    #[test]
    fn details_blob_uses_form_labels() {
        let details = sample().to_details().unwrap();
        assert!(details.contains("\"Merit Scholarships\""));
        assert!(details.contains("\"Need-Based Scholarships\""));
        assert!(details.contains("\"STEM\""));
        assert!(details.contains("\"Prefer Not to Say\""));

        let back = StudentProfile::from_details(&details).unwrap().unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn empty_details_mean_no_profile() {
        assert!(StudentProfile::from_details("").unwrap().is_none());
        assert!(StudentProfile::from_details("  \n").unwrap().is_none());
    }

    #[test]
    fn unreadable_details_are_reported() {
        let err = StudentProfile::from_details("{'name': 'legacy dict dump'}").unwrap_err();
        assert!(matches!(err, ScholarError::InvalidProfile(_)));
    }

    #[test]
    fn age_bounds() {
        assert!(validate_age(13).is_ok());
        assert!(validate_age(100).is_ok());
        assert!(validate_age(12).is_err());
        assert!(validate_age(101).is_err());
    }

    #[test]
    fn gpa_steps_and_bounds() {
        assert!(validate_gpa(0.0).is_ok());
        assert!(validate_gpa(3.7).is_ok());
        assert!(validate_gpa(4.0).is_ok());
        assert!(validate_gpa(3.75).is_err());
        assert!(validate_gpa(4.1).is_err());
        assert!(validate_gpa(-0.1).is_err());
    }

    #[test]
    fn test_score_bounds() {
        assert!(validate_test_score(1600).is_ok());
        assert!(validate_test_score(1601).is_err());

        let mut profile = sample();
        profile.test_score = Some(2000);
        assert!(profile.to_details().is_err());
    }

    #[test]
    fn name_is_required() {
        let mut profile = sample();
        profile.full_name = "  ".into();
        assert!(matches!(profile.validate(), Err(ScholarError::InvalidProfile(_))));
    }

    #[test]
    fn labels_cover_every_option() {
        let labels: Vec<_> = Cause::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            labels,
            ["Community Service", "Sustainability", "Social Justice", "Diversity", "STEM", "Arts"]
        );
        assert_eq!(ScholarshipType::ALL.len(), 7);
        assert_eq!(Gender::NonBinary.to_string(), "Non-Binary");
    }
}
