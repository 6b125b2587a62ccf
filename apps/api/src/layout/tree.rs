//! PageTree — renderer-agnostic description of a document's visual structure.
//!
//! Layout strategies build a tree; the compositor flows it onto pages and
//! serializes it. Nothing here carries absolute positions: content whose length
//! depends on the data is positioned by the flow engine only.

use serde::Serialize;

use crate::layout::font_metrics::FontFamily;
use crate::richtext::StyledRun;
use crate::theme::Color;

#[derive(Debug, Clone, Serialize)]
pub struct PageTree {
    pub font: FontFamily,
    /// Page background.
    pub paper: Color,
    pub margins: Margins,
    /// Full-width content placed once, at the top of the first page.
    pub header: Vec<Node>,
    pub body: Body,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub side: f32,
}

impl Margins {
    pub const fn uniform(pt: f32) -> Self {
        Self {
            top: pt,
            bottom: pt,
            side: pt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Body {
    Single { nodes: Vec<Node> },
    /// Sidebar + main column. Each column flows onto further pages independently;
    /// a sidebar fill is repainted full-height on every page.
    Columns {
        side: Side,
        sidebar: Column,
        main: Column,
        gutter: f32,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Column {
    /// Share of the page width (sidebar). The main column takes the rest.
    pub ratio: f32,
    pub fill: Option<Color>,
    pub padding: f32,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Contact,
    Links,
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
    Languages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    /// Color of hyperlink runs.
    pub link: Color,
    pub bold: bool,
    pub italic: bool,
    pub align: Align,
    /// Line height as a multiple of `size`.
    pub leading: f32,
    pub space_after: f32,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            link: color,
            bold: false,
            italic: false,
            align: Align::Left,
            leading: 1.3,
            space_after: 0.0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn link(mut self, color: Color) -> Self {
        self.link = color;
        self
    }

    pub fn after(mut self, pt: f32) -> Self {
        self.space_after = pt;
        self
    }

    pub fn leading(mut self, factor: f32) -> Self {
        self.leading = factor;
        self
    }

    pub fn line_height(&self) -> f32 {
        self.size * self.leading
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Paragraph {
    pub runs: Vec<StyledRun>,
    pub style: TextStyle,
}

impl Paragraph {
    pub fn new(runs: Vec<StyledRun>, style: TextStyle) -> Self {
        Self { runs, style }
    }

    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Self::new(vec![StyledRun::plain(text)], style)
    }

    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Section(Section),
    Text(Paragraph),
    /// Left text and a single-line right-aligned label sharing a baseline.
    Row { left: Paragraph, right: Paragraph },
    Bullets(BulletList),
    Rule(Rule),
    Spacer { height: f32 },
    /// Filled block behind its children. Not split across pages.
    Band(Band),
    /// Label followed by a proficiency bar of `filled` out of `total` segments.
    Meter(Meter),
    /// Wrapped inline tags on a filled background.
    Chips(Chips),
    /// One logical entry (a job, a degree…).
    Group { children: Vec<Node> },
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: Paragraph,
    pub rule: Option<Rule>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletList {
    pub items: Vec<Paragraph>,
    pub marker: Color,
    pub indent: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Rule {
    pub color: Color,
    pub thickness: f32,
    pub space_before: f32,
    pub space_after: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Band {
    pub fill: Color,
    pub padding: f32,
    /// Extend the fill over the page side margins.
    pub bleed: bool,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meter {
    pub label: Paragraph,
    pub filled: u8,
    pub total: u8,
    pub color: Color,
    pub track: Color,
}

#[derive(Debug, Clone, Serialize)]
pub struct Chips {
    pub items: Vec<String>,
    pub fill: Color,
    pub text: TextStyle,
}

// ────────────────────────────────────────────────────────────────────────────
// Traversal
// ────────────────────────────────────────────────────────────────────────────

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Section(s) => &s.children,
            Node::Band(b) => &b.children,
            Node::Group { children } => children,
            _ => &[],
        }
    }
}

impl PageTree {
    /// All nodes in document order (header, then sidebar, then main), depth-first.
    pub fn nodes(&self) -> Vec<&Node> {
        fn visit<'a>(nodes: &'a [Node], out: &mut Vec<&'a Node>) {
            for node in nodes {
                out.push(node);
                visit(node.children(), out);
            }
        }
        let mut out = Vec::new();
        visit(&self.header, &mut out);
        match &self.body {
            Body::Single { nodes } => visit(nodes, &mut out),
            Body::Columns { sidebar, main, .. } => {
                visit(&sidebar.nodes, &mut out);
                visit(&main.nodes, &mut out);
            }
        }
        out
    }

    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.nodes()
            .into_iter()
            .filter_map(|n| match n {
                Node::Section(s) => Some(s.kind),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl PageTree {
    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.section_kinds().contains(&kind)
    }

    /// Visible text in document order, one paragraph per line.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        for node in self.nodes() {
            node_text(node, &mut lines);
        }
        lines.join("\n")
    }

    /// Every color referenced anywhere in the tree.
    pub fn colors(&self) -> Vec<Color> {
        let mut out = vec![self.paper];
        if let Body::Columns { sidebar, main, .. } = &self.body {
            out.extend(sidebar.fill);
            out.extend(main.fill);
        }
        for node in self.nodes() {
            match node {
                Node::Section(s) => {
                    push_style(&s.title.style, &mut out);
                    out.extend(s.rule.map(|r| r.color));
                }
                Node::Text(p) => push_style(&p.style, &mut out),
                Node::Row { left, right } => {
                    push_style(&left.style, &mut out);
                    push_style(&right.style, &mut out);
                }
                Node::Bullets(b) => {
                    out.push(b.marker);
                    b.items.iter().for_each(|p| push_style(&p.style, &mut out));
                }
                Node::Rule(r) => out.push(r.color),
                Node::Band(b) => out.push(b.fill),
                Node::Meter(m) => {
                    push_style(&m.label.style, &mut out);
                    out.extend([m.color, m.track]);
                }
                Node::Chips(c) => {
                    out.push(c.fill);
                    push_style(&c.text, &mut out);
                }
                Node::Spacer { .. } | Node::Group { .. } => {}
            }
        }
        out
    }
}

#[cfg(test)]
fn push_style(style: &TextStyle, out: &mut Vec<Color>) {
    out.extend([style.color, style.link]);
}

#[cfg(test)]
fn node_text(node: &Node, lines: &mut Vec<String>) {
    let para = |p: &Paragraph| crate::richtext::plain_text(&p.runs);
    match node {
        Node::Section(s) => lines.push(para(&s.title)),
        Node::Text(p) => lines.push(para(p)),
        Node::Row { left, right } => lines.push(format!("{} {}", para(left), para(right))),
        Node::Bullets(b) => lines.extend(b.items.iter().map(para)),
        Node::Meter(m) => lines.push(para(&m.label)),
        Node::Chips(c) => lines.push(c.items.join(" ")),
        _ => {}
    }
}
