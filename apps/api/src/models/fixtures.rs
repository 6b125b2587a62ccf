//! Realistic resume fixtures shared by unit tests across modules.

use chrono::NaiveDate;

use super::resume::*;

pub fn date(y: i32, m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, 1).unwrap()
}

pub fn experience(title: &str, company: &str, start: NaiveDate, end: Option<NaiveDate>) -> Experience {
    Experience {
        title: title.to_string(),
        company: company.to_string(),
        location: Some("Berlin, DE".to_string()),
        start_date: start,
        end_date: end,
        is_current: false,
        description: "Owned the <b>billing</b> platform and its <i>on-call</i> rotation.".to_string(),
        achievements: vec![
            "Cut invoice latency by 40% with a streaming ledger".to_string(),
            "Mentored four engineers".to_string(),
        ],
    }
}

pub fn sample_resume() -> ResumeData {
    let mut current = experience("Staff Engineer", "Northwind", date(2021, 3), None);
    current.is_current = true;
    // Supplied but ignored for display because the role is current.
    current.end_date = Some(date(2022, 1));

    ResumeData {
        personal_info: PersonalInfo {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            headline: Some("Software Engineer".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: Some("+44 20 7946 0000".to_string()),
            location: Some("London, UK".to_string()),
            summary: Some(
                "<p>Engineer focused on <strong>distributed systems</strong> and \
                 <a href=\"https://example.com/talks\">public speaking</a>.</p>"
                    .to_string(),
            ),
            linkedin_url: Some("https://linkedin.com/in/ada".to_string()),
            github_url: Some("https://github.com/ada".to_string()),
            portfolio_url: None,
            website_url: Some("https://ada.dev".to_string()),
        },
        experiences: vec![
            current,
            experience("Senior Engineer", "Contoso", date(2018, 6), Some(date(2021, 2))),
        ],
        educations: vec![Education {
            degree: "BSc".to_string(),
            field_of_study: "Mathematics".to_string(),
            institution: "University of London".to_string(),
            start_date: Some(date(2012, 9)),
            end_date: Some(date(2015, 6)),
            is_current: false,
            grade: Some("First".to_string()),
            description: None,
        }],
        skills: vec![
            Skill { name: "Rust".to_string(), level: Some(SkillLevel::Expert) },
            Skill { name: "PostgreSQL".to_string(), level: Some(SkillLevel::Advanced) },
            Skill { name: "Kubernetes".to_string(), level: None },
        ],
        certifications: vec![Certification {
            name: "Certified Kubernetes Administrator".to_string(),
            issuer: "CNCF".to_string(),
            issue_date: date(2022, 5),
            expiry_date: Some(date(2025, 5)),
            credential_id: Some("CKA-1234".to_string()),
        }],
        projects: vec![Project {
            title: "ledgerd".to_string(),
            description: "Append-only ledger service with <u>exactly-once</u> delivery.".to_string(),
            technologies: vec!["Rust".to_string(), "Kafka".to_string()],
            live_url: None,
            repo_url: Some("https://github.com/ada/ledgerd".to_string()),
        }],
        languages: vec![
            Language { name: "English".to_string(), proficiency: Some(LanguageLevel::Native) },
            Language { name: "French".to_string(), proficiency: None },
        ],
    }
}
