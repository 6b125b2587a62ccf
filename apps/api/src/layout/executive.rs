//! Executive: bold name block with a heavy accent rule, a competencies grid up
//! front and experience given the most room.

use crate::layout::common::*;
use crate::layout::tree::{
    Body, Chips, Margins, Node, PageTree, Paragraph, Rule, SectionKind, TextStyle,
};
use crate::layout::LayoutContext;

pub fn layout(ctx: &LayoutContext<'_>) -> PageTree {
    let p = &ctx.palette;
    let data = ctx.data;
    let info = &data.personal_info;

    let mut header = vec![Node::Text(Paragraph::text(
        info.full_name().to_uppercase(),
        TextStyle::new(26.0, p.ink).bold().after(2.0),
    ))];
    header.extend(
        text(info.headline.as_deref().unwrap_or(""), TextStyle::new(13.0, p.accent).bold().after(4.0))
            .map(Node::Text),
    );
    let mut contacts = contact_items(info);
    contacts.extend(link_items(info));
    header.extend(
        contact_line(&contacts, "  \u{2022}  ", TextStyle::new(9.0, p.body).link(p.accent_dark))
            .map(Node::Text),
    );
    header.push(Node::Rule(Rule {
        color: p.accent,
        thickness: 3.0,
        space_before: 8.0,
        space_after: 10.0,
    }));

    let title = |label: &str| {
        Paragraph::text(label.to_uppercase(), TextStyle::new(12.0, p.accent_dark).bold().after(1.0))
    };
    let rule = Some(Rule {
        color: p.accent,
        thickness: 1.0,
        space_before: 1.0,
        space_after: 6.0,
    });
    let body_style = TextStyle::new(10.0, p.body).link(p.accent).after(2.0).leading(1.35);
    let styles = EntryStyles {
        title: TextStyle::new(11.5, p.ink).bold(),
        subtitle: TextStyle::new(10.5, p.accent_dark).bold(),
        meta: TextStyle::new(9.0, p.muted).italic().link(p.accent),
        body: body_style,
        bullet_marker: p.accent_dark,
        dates_on_title_row: true,
        gap_after: 8.0,
    };

    let mut nodes = Vec::new();
    let summary = info.summary.as_deref().and_then(|s| rich(s, body_style));
    nodes.extend(section(
        SectionKind::Summary,
        title("Professional Summary"),
        rule,
        summary.map(Node::Text).into_iter().collect(),
    ));
    let competencies = skill_names(&data.skills);
    let competency_nodes = if competencies.is_empty() {
        Vec::new()
    } else {
        vec![Node::Chips(Chips {
            items: competencies,
            fill: p.accent_faint,
            text: TextStyle::new(9.0, p.accent_dark).bold(),
        })]
    };
    nodes.extend(section(
        SectionKind::Skills,
        title("Core Competencies"),
        rule,
        competency_nodes,
    ));
    nodes.extend(section(
        SectionKind::Experience,
        title("Professional Experience"),
        rule,
        data.experiences.iter().map(|e| experience_entry(e, &styles)).collect(),
    ));
    nodes.extend(section(
        SectionKind::Education,
        title("Education"),
        rule,
        data.educations.iter().map(|e| education_entry(e, &styles)).collect(),
    ));
    nodes.extend(section(
        SectionKind::Certifications,
        title("Certifications"),
        rule,
        data.certifications.iter().map(|c| certification_entry(c, &styles)).collect(),
    ));
    nodes.extend(section(
        SectionKind::Projects,
        title("Selected Projects"),
        rule,
        data.projects.iter().map(|pr| project_entry(pr, &styles, None)).collect(),
    ));
    let languages: Vec<String> = data.languages.iter().map(language_label).collect();
    nodes.extend(section(
        SectionKind::Languages,
        title("Languages"),
        rule,
        text(&join_present(languages.iter().map(String::as_str), "  \u{2022}  "), body_style)
            .map(Node::Text)
            .into_iter()
            .collect(),
    ));

    PageTree {
        font: ctx.font,
        paper: p.paper,
        margins: Margins::uniform(50.0),
        header,
        body: Body::Single { nodes },
    }
}
