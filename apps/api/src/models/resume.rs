//! Canonical, template-agnostic resume record.
//!
//! Every render call receives a `ResumeData` by reference and never mutates it.
//! Optional fields and empty collections are valid input: layouts omit the
//! corresponding visual element instead of rendering an empty placeholder.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub educations: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    /// Expected but not enforced; a missing name renders as blank.
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub headline: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    /// Rich-text markup.
    pub summary: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub website_url: Option<String>,
}

impl PersonalInfo {
    /// First and last name joined, with blank parts skipped.
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
    /// Rich-text markup.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default)]
    pub institution: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
    pub grade: Option<String>,
    /// Rich-text markup.
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_level")]
    pub level: Option<SkillLevel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    pub issue_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    /// Rich-text markup.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub live_url: Option<String>,
    pub repo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_level")]
    pub proficiency: Option<LanguageLevel>,
}

// ────────────────────────────────────────────────────────────────────────────
// Proficiency scales
// ────────────────────────────────────────────────────────────────────────────

/// Ordered skill proficiency. Unrecognised values deserialize to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "BEGINNER" => Some(Self::Beginner),
            "INTERMEDIATE" => Some(Self::Intermediate),
            "ADVANCED" => Some(Self::Advanced),
            "EXPERT" => Some(Self::Expert),
            _ => None,
        }
    }

    /// 1-based position on the scale.
    pub fn rank(self) -> u8 {
        self as u8 + 1
    }

    pub const SCALE: u8 = 4;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LanguageLevel {
    Basic,
    Conversational,
    Professional,
    Fluent,
    Native,
}

impl LanguageLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "BASIC" => Some(Self::Basic),
            "CONVERSATIONAL" => Some(Self::Conversational),
            "PROFESSIONAL" => Some(Self::Professional),
            "FLUENT" => Some(Self::Fluent),
            "NATIVE" => Some(Self::Native),
            _ => None,
        }
    }

    pub fn rank(self) -> u8 {
        self as u8 + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Conversational => "Conversational",
            Self::Professional => "Professional",
            Self::Fluent => "Fluent",
            Self::Native => "Native",
        }
    }

    pub const SCALE: u8 = 5;
}

trait LenientLevel: Sized {
    fn parse_lenient(raw: &str) -> Option<Self>;
}

impl LenientLevel for SkillLevel {
    fn parse_lenient(raw: &str) -> Option<Self> {
        SkillLevel::parse(raw)
    }
}

impl LenientLevel for LanguageLevel {
    fn parse_lenient(raw: &str) -> Option<Self> {
        LanguageLevel::parse(raw)
    }
}

/// Accepts any string (or null) and maps unknown levels to `None` instead of failing
/// the whole record.
fn lenient_level<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: LenientLevel,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(T::parse_lenient))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_skips_blank_parts() {
        let info = PersonalInfo {
            first_name: "  Ada ".to_string(),
            last_name: String::new(),
            ..PersonalInfo::default()
        };
        assert_eq!(info.full_name(), "Ada");
        assert_eq!(PersonalInfo::default().full_name(), "");
    }

    #[test]
    fn test_unknown_skill_level_deserializes_to_none() {
        let skill: Skill = serde_json::from_str(r#"{"name":"Rust","level":"GURU"}"#).unwrap();
        assert_eq!(skill.level, None);

        let skill: Skill = serde_json::from_str(r#"{"name":"Rust","level":"expert"}"#).unwrap();
        assert_eq!(skill.level, Some(SkillLevel::Expert));

        let skill: Skill = serde_json::from_str(r#"{"name":"Rust"}"#).unwrap();
        assert_eq!(skill.level, None);
    }

    #[test]
    fn test_language_level_ranks_are_ordered() {
        assert_eq!(LanguageLevel::Basic.rank(), 1);
        assert_eq!(LanguageLevel::Native.rank(), LanguageLevel::SCALE);
        assert!(LanguageLevel::Fluent > LanguageLevel::Professional);
    }

    #[test]
    fn test_resume_accepts_camel_case_payload() {
        let json = r#"{
            "personalInfo": {"firstName": "Ada", "lastName": "Lovelace"},
            "experiences": [{
                "title": "Engineer", "company": "Analytical Engines",
                "startDate": "1842-01-01", "isCurrent": true,
                "achievements": ["Wrote the first program"]
            }]
        }"#;
        let data: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(data.personal_info.full_name(), "Ada Lovelace");
        assert!(data.experiences[0].is_current);
        assert!(data.skills.is_empty());
    }
}
