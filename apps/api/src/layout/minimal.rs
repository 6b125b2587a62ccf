//! Minimal: quiet single column, serif by default, no fills. The compact variant
//! tightens type sizes and entry spacing to fit more on each page.

use crate::layout::common::*;
use crate::layout::tree::{Body, Margins, Node, PageTree, Paragraph, SectionKind, TextStyle};
use crate::layout::LayoutContext;

pub fn layout(ctx: &LayoutContext<'_>, compact: bool) -> PageTree {
    let p = &ctx.palette;
    let data = ctx.data;
    let info = &data.personal_info;
    let scale = if compact { 0.9 } else { 1.0 };
    let pt = |size: f32| size * scale;

    let mut header = vec![Node::Text(Paragraph::text(
        info.full_name(),
        TextStyle::new(pt(22.0), p.ink).after(1.0),
    ))];
    header.extend(
        text(info.headline.as_deref().unwrap_or(""), TextStyle::new(pt(11.0), p.muted).italic())
            .map(Node::Text),
    );
    let mut contacts = contact_items(info);
    contacts.extend(link_items(info));
    header.extend(
        contact_line(&contacts, "   ", TextStyle::new(pt(9.0), p.body).link(p.accent).after(pt(10.0)))
            .map(Node::Text),
    );

    let title = |label: &str| {
        Paragraph::text(
            label.to_uppercase(),
            TextStyle::new(pt(9.0), p.accent).bold().after(pt(5.0)),
        )
    };
    let body_style = TextStyle::new(pt(10.0), p.body).link(p.accent).after(pt(2.0));
    let styles = EntryStyles {
        title: TextStyle::new(pt(10.5), p.ink).bold(),
        subtitle: TextStyle::new(pt(10.0), p.body),
        meta: TextStyle::new(pt(9.0), p.muted).link(p.accent),
        body: body_style,
        bullet_marker: p.muted,
        dates_on_title_row: true,
        gap_after: pt(if compact { 4.0 } else { 8.0 }),
    };

    let mut nodes = Vec::new();
    let summary = info.summary.as_deref().and_then(|s| rich(s, body_style));
    nodes.extend(section(
        SectionKind::Summary,
        title("About"),
        None,
        summary.map(Node::Text).into_iter().collect(),
    ));
    nodes.extend(section(
        SectionKind::Experience,
        title("Experience"),
        None,
        data.experiences.iter().map(|e| experience_entry(e, &styles)).collect(),
    ));
    nodes.extend(section(
        SectionKind::Projects,
        title("Projects"),
        None,
        data.projects.iter().map(|pr| project_entry(pr, &styles, None)).collect(),
    ));
    nodes.extend(section(
        SectionKind::Education,
        title("Education"),
        None,
        data.educations.iter().map(|e| education_entry(e, &styles)).collect(),
    ));
    nodes.extend(section(
        SectionKind::Certifications,
        title("Certifications"),
        None,
        data.certifications.iter().map(|c| certification_entry(c, &styles)).collect(),
    ));
    nodes.extend(section(
        SectionKind::Skills,
        title("Skills"),
        None,
        text(&skill_names(&data.skills).join(", "), body_style)
            .map(Node::Text)
            .into_iter()
            .collect(),
    ));
    let languages: Vec<String> = data.languages.iter().map(language_label).collect();
    nodes.extend(section(
        SectionKind::Languages,
        title("Languages"),
        None,
        text(&join_present(languages.iter().map(String::as_str), ", "), body_style)
            .map(Node::Text)
            .into_iter()
            .collect(),
    ));

    PageTree {
        font: ctx.font,
        paper: p.paper,
        margins: Margins::uniform(if compact { 40.0 } else { 56.0 }),
        header,
        body: Body::Single { nodes },
    }
}
