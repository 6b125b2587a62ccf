//! Behaviour every layout shares: date formatting, section suppression, contact
//! extraction and the entry builders. Layouts choose styles and arrangement; the
//! rules for what appears and in which order live here only.

use chrono::NaiveDate;

use crate::layout::tree::{
    Align, BulletList, Chips, Meter, Node, Paragraph, Rule, Section, SectionKind, TextStyle,
};
use crate::models::{
    Certification, Education, Experience, Language, PersonalInfo, Project, Skill, SkillLevel,
};
use crate::richtext::{self, RunStyle, StyledRun};
use crate::theme::Color;

pub const PRESENT: &str = "Present";

/// Separator between the two ends of a date range.
const RANGE_DASH: &str = " \u{2013} ";

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// "Jan 2020".
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Formats a date range. An in-progress item always ends with "Present", whatever
/// end date was supplied. Returns `None` when there is nothing to show.
pub fn date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    is_current: bool,
) -> Option<String> {
    let start = start.map(format_month_year);
    let end = if is_current {
        Some(PRESENT.to_string())
    } else {
        end.map(format_month_year)
    };
    match (start, end) {
        (Some(s), Some(e)) => Some(format!("{s}{RANGE_DASH}{e}")),
        (Some(s), None) => Some(s),
        (None, Some(e)) => Some(e),
        (None, None) => None,
    }
}

pub fn experience_dates(exp: &Experience) -> String {
    date_range(Some(exp.start_date), exp.end_date, exp.is_current).unwrap_or_default()
}

pub fn education_dates(edu: &Education) -> Option<String> {
    date_range(edu.start_date, edu.end_date, edu.is_current)
}

// ────────────────────────────────────────────────────────────────────────────
// Proficiency weights
// ────────────────────────────────────────────────────────────────────────────

/// Filled segments out of `SkillLevel::SCALE`. Missing levels sit mid-scale.
pub fn skill_weight(level: Option<SkillLevel>) -> u8 {
    level.map(SkillLevel::rank).unwrap_or(2)
}

pub fn language_weight(lang: &Language) -> u8 {
    lang.proficiency.map(|p| p.rank()).unwrap_or(3)
}

pub fn language_label(lang: &Language) -> String {
    match lang.proficiency {
        Some(p) => format!("{} ({})", lang.name, p.label()),
        None => lang.name.clone(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Suppression helpers
// ────────────────────────────────────────────────────────────────────────────

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Wraps children in a section, or returns `None` when there are none.
pub fn section(
    kind: SectionKind,
    title: Paragraph,
    rule: Option<Rule>,
    children: Vec<Node>,
) -> Option<Node> {
    if children.is_empty() {
        return None;
    }
    Some(Node::Section(Section {
        kind,
        title,
        rule,
        children,
    }))
}

/// Rich-text paragraph, or `None` when the markup has no visible text.
pub fn rich(markup: &str, style: TextStyle) -> Option<Paragraph> {
    let para = Paragraph::new(richtext::render(markup.trim()), style);
    (!para.is_blank()).then_some(para)
}

pub fn text(value: &str, style: TextStyle) -> Option<Paragraph> {
    let value = value.trim();
    (!value.is_empty()).then(|| Paragraph::text(value, style))
}

/// Joins non-blank parts with `sep`.
pub fn join_present<'a>(parts: impl IntoIterator<Item = &'a str>, sep: &str) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

// ────────────────────────────────────────────────────────────────────────────
// Contact
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    pub label: &'static str,
    pub text: String,
    pub href: Option<String>,
}

impl ContactItem {
    pub fn run(&self) -> StyledRun {
        match &self.href {
            Some(href) => StyledRun::link(self.text.clone(), href.clone()),
            None => StyledRun::plain(self.text.clone()),
        }
    }
}

/// Email, phone and location, in that order, skipping absent fields.
pub fn contact_items(info: &PersonalInfo) -> Vec<ContactItem> {
    let mut items = Vec::new();
    if let Some(email) = present(&info.email) {
        items.push(ContactItem {
            label: "Email",
            text: email.to_string(),
            href: Some(format!("mailto:{email}")),
        });
    }
    if let Some(phone) = present(&info.phone) {
        let dial: String = phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        items.push(ContactItem {
            label: "Phone",
            text: phone.to_string(),
            href: (!dial.is_empty()).then(|| format!("tel:{dial}")),
        });
    }
    if let Some(location) = present(&info.location) {
        items.push(ContactItem {
            label: "Location",
            text: location.to_string(),
            href: None,
        });
    }
    items
}

/// Profile links with their display text stripped of the scheme.
pub fn link_items(info: &PersonalInfo) -> Vec<ContactItem> {
    [
        ("LinkedIn", &info.linkedin_url),
        ("GitHub", &info.github_url),
        ("Portfolio", &info.portfolio_url),
        ("Website", &info.website_url),
    ]
    .into_iter()
    .filter_map(|(label, url)| {
        present(url).map(|url| ContactItem {
            label,
            text: display_url(url),
            href: Some(url.to_string()),
        })
    })
    .collect()
}

pub fn display_url(url: &str) -> String {
    let trimmed = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");
    trimmed.trim_end_matches('/').to_string()
}

/// Contact items and links on one line, separated by `sep`.
pub fn contact_line(items: &[ContactItem], sep: &str, style: TextStyle) -> Option<Paragraph> {
    if items.is_empty() {
        return None;
    }
    let mut runs = Vec::with_capacity(items.len() * 2);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            runs.push(StyledRun::plain(sep));
        }
        runs.push(item.run());
    }
    Some(Paragraph::new(runs, style))
}

/// One paragraph per item, each prefixed by its bold label when `labelled`.
pub fn contact_block(items: &[ContactItem], labelled: bool, style: TextStyle) -> Vec<Node> {
    items
        .iter()
        .map(|item| {
            let mut runs = Vec::new();
            if labelled {
                runs.push(StyledRun::styled(format!("{}: ", item.label), RunStyle::bold()));
            }
            runs.push(item.run());
            Node::Text(Paragraph::new(runs, style))
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Entry builders
// ────────────────────────────────────────────────────────────────────────────

/// The styles an entry builder needs. Each layout supplies its own.
#[derive(Debug, Clone, Copy)]
pub struct EntryStyles {
    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub meta: TextStyle,
    pub body: TextStyle,
    pub bullet_marker: Color,
    /// Dates sit right-aligned on the title row instead of under the subtitle.
    pub dates_on_title_row: bool,
    pub gap_after: f32,
}

fn title_block(
    title: &str,
    subtitle: String,
    dates: Option<String>,
    styles: &EntryStyles,
    out: &mut Vec<Node>,
) {
    let subtitle = text(&subtitle, styles.subtitle).map(Node::Text);
    match (text(title, styles.title), dates.filter(|d| !d.is_empty())) {
        (Some(title), Some(dates)) if styles.dates_on_title_row => {
            out.push(Node::Row {
                left: title,
                right: Paragraph::text(dates, styles.meta.align(Align::Right)),
            });
            out.extend(subtitle);
        }
        // A blank title leaves no line behind; dates move under the subtitle.
        (title, dates) => {
            out.extend(title.map(Node::Text));
            out.extend(subtitle);
            out.extend(dates.map(|d| Node::Text(Paragraph::text(d, styles.meta))));
        }
    }
}

fn finish_group(mut children: Vec<Node>, styles: &EntryStyles) -> Node {
    if styles.gap_after > 0.0 {
        children.push(Node::Spacer {
            height: styles.gap_after,
        });
    }
    Node::Group { children }
}

pub fn experience_entry(exp: &Experience, styles: &EntryStyles) -> Node {
    let mut children = Vec::new();
    let subtitle = join_present(
        [exp.company.as_str(), exp.location.as_deref().unwrap_or("")],
        " \u{00b7} ",
    );
    title_block(
        &exp.title,
        subtitle,
        Some(experience_dates(exp)),
        styles,
        &mut children,
    );
    children.extend(rich(&exp.description, styles.body).map(Node::Text));
    let achievements: Vec<Paragraph> = exp
        .achievements
        .iter()
        .filter_map(|a| rich(a, styles.body))
        .collect();
    if !achievements.is_empty() {
        children.push(Node::Bullets(BulletList {
            items: achievements,
            marker: styles.bullet_marker,
            indent: 10.0,
        }));
    }
    finish_group(children, styles)
}

pub fn education_entry(edu: &Education, styles: &EntryStyles) -> Node {
    let mut children = Vec::new();
    let heading = if edu.field_of_study.trim().is_empty() {
        edu.degree.trim().to_string()
    } else {
        join_present([edu.degree.as_str(), edu.field_of_study.as_str()], " in ")
    };
    title_block(
        &heading,
        edu.institution.trim().to_string(),
        education_dates(edu),
        styles,
        &mut children,
    );
    if let Some(grade) = present(&edu.grade) {
        children.push(Node::Text(Paragraph::text(format!("Grade: {grade}"), styles.meta)));
    }
    if let Some(desc) = &edu.description {
        children.extend(rich(desc, styles.body).map(Node::Text));
    }
    finish_group(children, styles)
}

pub fn project_entry(project: &Project, styles: &EntryStyles, chips: Option<&Chips>) -> Node {
    let mut children = vec![Node::Text(Paragraph::text(project.title.trim(), styles.title))];
    children.extend(rich(&project.description, styles.body).map(Node::Text));
    let technologies: Vec<String> = project
        .technologies
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if !technologies.is_empty() {
        match chips {
            Some(template) => children.push(Node::Chips(Chips {
                items: technologies,
                ..template.clone()
            })),
            None => children.push(Node::Text(Paragraph::new(
                vec![
                    StyledRun::styled("Tech: ", RunStyle::bold()),
                    StyledRun::plain(technologies.join(", ")),
                ],
                styles.meta,
            ))),
        }
    }
    let links: Vec<StyledRun> = [("Live", &project.live_url), ("Source", &project.repo_url)]
        .into_iter()
        .filter_map(|(label, url)| present(url).map(|u| StyledRun::link(label, u)))
        .collect();
    if !links.is_empty() {
        let mut runs = Vec::new();
        for (i, link) in links.into_iter().enumerate() {
            if i > 0 {
                runs.push(StyledRun::plain(" | "));
            }
            runs.push(link);
        }
        children.push(Node::Text(Paragraph::new(runs, styles.meta)));
    }
    finish_group(children, styles)
}

pub fn certification_entry(cert: &Certification, styles: &EntryStyles) -> Node {
    let mut children = Vec::new();
    let dates = match cert.expiry_date {
        Some(expiry) => format!(
            "{}{RANGE_DASH}{}",
            format_month_year(cert.issue_date),
            format_month_year(expiry)
        ),
        None => format_month_year(cert.issue_date),
    };
    title_block(&cert.name, cert.issuer.trim().to_string(), Some(dates), styles, &mut children);
    if let Some(id) = present(&cert.credential_id) {
        children.push(Node::Text(Paragraph::text(format!("Credential ID: {id}"), styles.meta)));
    }
    finish_group(children, styles)
}

// ────────────────────────────────────────────────────────────────────────────
// Skill renderings
// ────────────────────────────────────────────────────────────────────────────

pub fn skill_meters(skills: &[Skill], label: TextStyle, color: Color, track: Color) -> Vec<Node> {
    skills
        .iter()
        .filter(|s| !s.name.trim().is_empty())
        .map(|s| {
            Node::Meter(Meter {
                label: Paragraph::text(s.name.trim(), label),
                filled: skill_weight(s.level),
                total: SkillLevel::SCALE,
                color,
                track,
            })
        })
        .collect()
}

pub fn language_meters(langs: &[Language], label: TextStyle, color: Color, track: Color) -> Vec<Node> {
    langs
        .iter()
        .filter(|l| !l.name.trim().is_empty())
        .map(|l| {
            Node::Meter(Meter {
                label: Paragraph::text(language_label(l), label),
                filled: language_weight(l),
                total: crate::models::LanguageLevel::SCALE,
                color,
                track,
            })
        })
        .collect()
}

pub fn skill_names(skills: &[Skill]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.name.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{date, experience, sample_resume};

    // ── dates ───────────────────────────────────────────────────────────────

    #[test]
    fn test_format_month_year_is_stable() {
        let d = date(2020, 1);
        assert_eq!(format_month_year(d), "Jan 2020");
        assert_eq!(format_month_year(d), format_month_year(d));
    }

    #[test]
    fn test_current_role_ends_with_present_regardless_of_end_date() {
        let mut exp = experience("Engineer", "Acme", date(2019, 4), Some(date(2020, 6)));
        exp.is_current = true;
        assert_eq!(experience_dates(&exp), "Apr 2019 \u{2013} Present");
    }

    #[test]
    fn test_date_range_partial_inputs() {
        assert_eq!(date_range(None, None, false), None);
        assert_eq!(date_range(None, None, true).as_deref(), Some(PRESENT));
        assert_eq!(date_range(Some(date(2015, 9)), None, false).as_deref(), Some("Sep 2015"));
    }

    // ── weights ─────────────────────────────────────────────────────────────

    #[test]
    fn test_missing_levels_have_default_weight() {
        assert_eq!(skill_weight(None), 2);
        assert_eq!(skill_weight(Some(SkillLevel::Expert)), 4);
        let lang = Language {
            name: "French".to_string(),
            proficiency: None,
        };
        assert_eq!(language_weight(&lang), 3);
        assert_eq!(language_label(&lang), "French");
    }

    // ── suppression ─────────────────────────────────────────────────────────

    #[test]
    fn test_section_without_children_is_suppressed() {
        let title = Paragraph::text("Skills", TextStyle::new(10.0, Color::BLACK));
        assert!(section(SectionKind::Skills, title, None, vec![]).is_none());
    }

    #[test]
    fn test_blank_markup_yields_no_paragraph() {
        let style = TextStyle::new(10.0, Color::BLACK);
        assert!(rich("<p>  </p>", style).is_none());
        assert!(rich("", style).is_none());
        assert!(rich("<b>x</b>", style).is_some());
    }

    #[test]
    fn test_contact_items_skip_absent_fields() {
        let mut info = sample_resume().personal_info;
        info.phone = Some("   ".to_string());
        info.location = None;
        let items = contact_items(&info);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].href.as_deref(), Some("mailto:ada@example.com"));
    }

    #[test]
    fn test_link_items_strip_scheme_for_display() {
        let links = link_items(&sample_resume().personal_info);
        let texts: Vec<&str> = links.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["linkedin.com/in/ada", "github.com/ada", "ada.dev"]);
    }

    // ── entries ─────────────────────────────────────────────────────────────

    fn entry_styles(dates_on_title_row: bool) -> EntryStyles {
        EntryStyles {
            title: TextStyle::new(11.0, Color::BLACK),
            subtitle: TextStyle::new(10.0, Color::BLACK),
            meta: TextStyle::new(9.0, Color::BLACK),
            body: TextStyle::new(10.0, Color::BLACK),
            bullet_marker: Color::BLACK,
            dates_on_title_row,
            gap_after: 0.0,
        }
    }

    #[test]
    fn test_blank_title_leaves_no_empty_line() {
        for dates_on_title_row in [true, false] {
            let mut exp = experience("   ", "Acme", date(2019, 4), None);
            exp.achievements.clear();
            let Node::Group { children } = experience_entry(&exp, &entry_styles(dates_on_title_row))
            else {
                panic!("expected a group");
            };
            assert!(!children.iter().any(|c| matches!(c, Node::Row { .. })));
            for child in &children {
                if let Node::Text(para) = child {
                    assert!(!para.is_blank(), "empty line in {children:?}");
                }
            }
            let Node::Text(first) = &children[0] else {
                panic!("expected text, got {:?}", children[0]);
            };
            assert_eq!(first.runs[0].text, "Acme \u{00b7} Berlin, DE");
        }
    }

    #[test]
    fn test_experience_entry_without_achievements_has_no_bullets() {
        let mut exp = experience("Engineer", "Acme", date(2019, 4), None);
        exp.achievements.clear();
        let styles = entry_styles(true);
        let Node::Group { children } = experience_entry(&exp, &styles) else {
            panic!("expected a group");
        };
        assert!(!children.iter().any(|c| matches!(c, Node::Bullets(_))));
        assert!(matches!(children[0], Node::Row { .. }));
    }
}
