//! Creative: full-height accent sidebar carrying the identity block, contact and
//! proficiency meters; narrative sections flow in the main column.

use crate::layout::common::*;
use crate::layout::tree::{
    Body, Chips, Column, Margins, Node, PageTree, Paragraph, Rule, SectionKind, Side, TextStyle,
};
use crate::layout::LayoutContext;

pub fn layout(ctx: &LayoutContext<'_>, side: Side) -> PageTree {
    let p = &ctx.palette;
    let data = ctx.data;
    let info = &data.personal_info;

    let on = p.on_accent;
    let mut sidebar = vec![Node::Text(Paragraph::text(
        info.full_name(),
        TextStyle::new(22.0, on).bold().leading(1.15).after(4.0),
    ))];
    sidebar.extend(
        text(info.headline.as_deref().unwrap_or(""), TextStyle::new(11.0, on).italic().after(6.0))
            .map(Node::Text),
    );
    sidebar.push(Node::Rule(Rule {
        color: on,
        thickness: 0.75,
        space_before: 2.0,
        space_after: 10.0,
    }));

    let side_title = |label: &str| {
        Paragraph::text(label.to_uppercase(), TextStyle::new(10.0, on).bold().after(4.0))
    };
    let side_text = TextStyle::new(9.0, on).after(3.0);
    let meter_label = TextStyle::new(9.0, on).after(1.0);
    sidebar.extend(section(
        SectionKind::Contact,
        side_title("Contact"),
        None,
        contact_block(&contact_items(info), false, side_text),
    ));
    sidebar.extend(section(
        SectionKind::Links,
        side_title("Find me"),
        None,
        contact_block(&link_items(info), true, side_text),
    ));
    sidebar.extend(section(
        SectionKind::Skills,
        side_title("Skills"),
        None,
        skill_meters(&data.skills, meter_label, on, p.accent_dark),
    ));
    sidebar.extend(section(
        SectionKind::Languages,
        side_title("Languages"),
        None,
        language_meters(&data.languages, meter_label, on, p.accent_dark),
    ));

    let title = |label: &str| {
        Paragraph::text(label, TextStyle::new(15.0, p.accent).bold().after(6.0))
    };
    let body_style = TextStyle::new(9.5, p.body).link(p.accent).after(2.0);
    let styles = EntryStyles {
        title: TextStyle::new(11.0, p.accent_dark).bold(),
        subtitle: TextStyle::new(9.5, p.ink).bold(),
        meta: TextStyle::new(8.5, p.muted).link(p.accent),
        body: body_style,
        bullet_marker: p.accent,
        dates_on_title_row: false,
        gap_after: 8.0,
    };
    let chips = Chips {
        items: Vec::new(),
        fill: p.accent_soft,
        text: TextStyle::new(8.0, p.ink),
    };

    let mut main = Vec::new();
    let summary = info.summary.as_deref().and_then(|s| rich(s, body_style));
    main.extend(section(
        SectionKind::Summary,
        title("Hello"),
        None,
        summary.map(Node::Text).into_iter().collect(),
    ));
    main.extend(section(
        SectionKind::Experience,
        title("Experience"),
        None,
        data.experiences.iter().map(|e| experience_entry(e, &styles)).collect(),
    ));
    main.extend(section(
        SectionKind::Projects,
        title("Projects"),
        None,
        data.projects.iter().map(|pr| project_entry(pr, &styles, Some(&chips))).collect(),
    ));
    main.extend(section(
        SectionKind::Education,
        title("Education"),
        None,
        data.educations.iter().map(|e| education_entry(e, &styles)).collect(),
    ));
    main.extend(section(
        SectionKind::Certifications,
        title("Certifications"),
        None,
        data.certifications.iter().map(|c| certification_entry(c, &styles)).collect(),
    ));

    PageTree {
        font: ctx.font,
        paper: p.paper,
        margins: Margins {
            top: 40.0,
            bottom: 40.0,
            side: 0.0,
        },
        header: Vec::new(),
        body: Body::Columns {
            side,
            sidebar: Column {
                ratio: 0.34,
                fill: Some(p.accent),
                padding: 20.0,
                nodes: sidebar,
            },
            main: Column {
                ratio: 0.66,
                fill: None,
                padding: 24.0,
                nodes: main,
            },
            gutter: 0.0,
        },
    }
}
