//! Modern: accent header band over a tinted sidebar (contact, skills, languages)
//! and a main column for the narrative sections.

use crate::layout::common::*;
use crate::layout::tree::{
    Band, Body, Chips, Column, Margins, Node, PageTree, Paragraph, Rule, SectionKind, Side,
    TextStyle,
};
use crate::layout::LayoutContext;

pub fn layout(ctx: &LayoutContext<'_>, side: Side) -> PageTree {
    let p = &ctx.palette;
    let data = ctx.data;
    let info = &data.personal_info;

    let mut band = vec![Node::Text(Paragraph::text(
        info.full_name(),
        TextStyle::new(26.0, p.on_accent).bold().after(2.0),
    ))];
    band.extend(
        text(info.headline.as_deref().unwrap_or(""), TextStyle::new(12.0, p.on_accent))
            .map(Node::Text),
    );
    let header = vec![Node::Band(Band {
        fill: p.accent,
        padding: 18.0,
        bleed: true,
        children: band,
    })];

    let side_title = |label: &str| {
        Paragraph::text(label.to_uppercase(), TextStyle::new(10.0, p.accent_dark).bold().after(4.0))
    };
    let side_text = TextStyle::new(9.0, p.body).link(p.accent_dark).after(3.0);
    let meter_label = TextStyle::new(9.0, p.ink).after(1.0);

    let mut sidebar = Vec::new();
    sidebar.extend(section(
        SectionKind::Contact,
        side_title("Contact"),
        None,
        contact_block(&contact_items(info), false, side_text),
    ));
    sidebar.extend(section(
        SectionKind::Links,
        side_title("Links"),
        None,
        contact_block(&link_items(info), false, side_text),
    ));
    sidebar.extend(section(
        SectionKind::Skills,
        side_title("Skills"),
        None,
        skill_meters(&data.skills, meter_label, p.accent, p.accent_soft),
    ));
    sidebar.extend(section(
        SectionKind::Languages,
        side_title("Languages"),
        None,
        language_meters(&data.languages, meter_label, p.accent, p.accent_soft),
    ));

    let title = |label: &str| Paragraph::text(label, TextStyle::new(13.0, p.accent).bold().after(1.0));
    let rule = Some(Rule {
        color: p.accent_soft,
        thickness: 1.0,
        space_before: 1.0,
        space_after: 6.0,
    });
    let body_style = TextStyle::new(9.5, p.body).link(p.accent).after(2.0);
    let styles = EntryStyles {
        title: TextStyle::new(10.5, p.ink).bold(),
        subtitle: TextStyle::new(9.5, p.accent_dark),
        meta: TextStyle::new(8.5, p.muted).link(p.accent),
        body: body_style,
        bullet_marker: p.accent,
        dates_on_title_row: true,
        gap_after: 7.0,
    };
    let chips = Chips {
        items: Vec::new(),
        fill: p.accent_faint,
        text: TextStyle::new(8.0, p.accent_dark),
    };

    let mut main = Vec::new();
    let summary = info.summary.as_deref().and_then(|s| rich(s, body_style));
    main.extend(section(
        SectionKind::Summary,
        title("Profile"),
        rule,
        summary.map(Node::Text).into_iter().collect(),
    ));
    main.extend(section(
        SectionKind::Experience,
        title("Experience"),
        rule,
        data.experiences.iter().map(|e| experience_entry(e, &styles)).collect(),
    ));
    main.extend(section(
        SectionKind::Projects,
        title("Projects"),
        rule,
        data.projects.iter().map(|pr| project_entry(pr, &styles, Some(&chips))).collect(),
    ));
    main.extend(section(
        SectionKind::Education,
        title("Education"),
        rule,
        data.educations.iter().map(|e| education_entry(e, &styles)).collect(),
    ));
    main.extend(section(
        SectionKind::Certifications,
        title("Certifications"),
        rule,
        data.certifications.iter().map(|c| certification_entry(c, &styles)).collect(),
    ));

    PageTree {
        font: ctx.font,
        paper: p.paper,
        margins: Margins {
            top: 36.0,
            bottom: 36.0,
            side: 0.0,
        },
        header,
        body: Body::Columns {
            side,
            sidebar: Column {
                ratio: 0.32,
                fill: Some(p.accent_faint),
                padding: 18.0,
                nodes: sidebar,
            },
            main: Column {
                ratio: 0.68,
                fill: None,
                padding: 22.0,
                nodes: main,
            },
            gutter: 0.0,
        },
    }
}
