pub mod resume;
pub mod settings;

#[cfg(test)]
pub mod fixtures;

pub use resume::{
    Certification, Education, Experience, Language, LanguageLevel, PersonalInfo, Project,
    ResumeData, Skill, SkillLevel,
};
pub use settings::ResumeSettings;
