//! Classic: single column, name over a contact line, accent rule, ruled section titles.

use crate::layout::common::*;
use crate::layout::tree::{Align, Body, Margins, Node, PageTree, Paragraph, Rule, SectionKind, TextStyle};
use crate::layout::LayoutContext;

pub fn layout(ctx: &LayoutContext<'_>, centered: bool) -> PageTree {
    let p = &ctx.palette;
    let data = ctx.data;
    let info = &data.personal_info;
    let align = if centered { Align::Center } else { Align::Left };

    let mut header = vec![Node::Text(Paragraph::text(
        info.full_name(),
        TextStyle::new(24.0, p.ink).bold().align(align).after(2.0),
    ))];
    header.extend(
        text(info.headline.as_deref().unwrap_or(""), TextStyle::new(12.0, p.accent).align(align).after(4.0))
            .map(Node::Text),
    );
    let mut contacts = contact_items(info);
    contacts.extend(link_items(info));
    header.extend(
        contact_line(&contacts, "  |  ", TextStyle::new(9.0, p.muted).link(p.accent).align(align))
            .map(Node::Text),
    );
    header.push(Node::Rule(Rule {
        color: p.accent,
        thickness: 1.5,
        space_before: 6.0,
        space_after: 6.0,
    }));

    let title = |label: &str| {
        Paragraph::text(label.to_uppercase(), TextStyle::new(11.0, p.accent).bold().after(1.0))
    };
    let rule = Some(Rule {
        color: p.rule,
        thickness: 0.75,
        space_before: 1.0,
        space_after: 5.0,
    });
    let body_style = TextStyle::new(10.0, p.body).link(p.accent).after(2.0);
    let styles = EntryStyles {
        title: TextStyle::new(11.0, p.ink).bold(),
        subtitle: TextStyle::new(10.0, p.accent_dark).italic(),
        meta: TextStyle::new(9.0, p.muted).link(p.accent),
        body: body_style,
        bullet_marker: p.accent,
        dates_on_title_row: true,
        gap_after: 6.0,
    };

    let mut nodes = Vec::new();
    let summary = info.summary.as_deref().and_then(|s| rich(s, body_style));
    nodes.extend(section(
        SectionKind::Summary,
        title("Summary"),
        rule,
        summary.map(Node::Text).into_iter().collect(),
    ));
    nodes.extend(section(
        SectionKind::Experience,
        title("Experience"),
        rule,
        data.experiences.iter().map(|e| experience_entry(e, &styles)).collect(),
    ));
    nodes.extend(section(
        SectionKind::Education,
        title("Education"),
        rule,
        data.educations.iter().map(|e| education_entry(e, &styles)).collect(),
    ));
    let skills = skill_names(&data.skills);
    nodes.extend(section(
        SectionKind::Skills,
        title("Skills"),
        rule,
        text(&skills.join("  \u{2022}  "), body_style).map(Node::Text).into_iter().collect(),
    ));
    nodes.extend(section(
        SectionKind::Projects,
        title("Projects"),
        rule,
        data.projects.iter().map(|pr| project_entry(pr, &styles, None)).collect(),
    ));
    nodes.extend(section(
        SectionKind::Certifications,
        title("Certifications"),
        rule,
        data.certifications.iter().map(|c| certification_entry(c, &styles)).collect(),
    ));
    let languages: Vec<String> = data.languages.iter().map(language_label).collect();
    nodes.extend(section(
        SectionKind::Languages,
        title("Languages"),
        rule,
        text(&join_present(languages.iter().map(String::as_str), ", "), body_style)
            .map(Node::Text)
            .into_iter()
            .collect(),
    ));

    PageTree {
        font: ctx.font,
        paper: p.paper,
        margins: Margins::uniform(48.0),
        header,
        body: Body::Single { nodes },
    }
}
