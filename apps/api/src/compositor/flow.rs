//! Places a PageTree onto physical pages.
//!
//! Text is wrapped greedily using the static font metrics, content moves to a new
//! page at line granularity, a section title is kept with the start of its body,
//! and the two columns of a split body flow independently from the same start.
//! Coordinates are top-down points; the serializer flips them.

use crate::layout::font_metrics::{get_metrics, FontFamily, PaperSize};
use crate::layout::tree::{
    Align, Band, Body, BulletList, Chips, Meter, Node, PageTree, Paragraph, Rule, Section, Side,
    TextStyle,
};
use crate::richtext::StyledRun;
use crate::theme::Color;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        top: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    Text {
        x: f32,
        baseline: f32,
        text: String,
        bold: bool,
        italic: bool,
        size: f32,
        color: Color,
    },
    Link {
        x: f32,
        top: f32,
        w: f32,
        h: f32,
        uri: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct LaidOutPage {
    /// Painted first: column fills.
    pub backgrounds: Vec<DrawOp>,
    pub content: Vec<DrawOp>,
}

#[derive(Debug, Clone)]
pub struct FlowedDocument {
    pub width: f32,
    pub height: f32,
    pub font: FontFamily,
    pub paper: Color,
    pub pages: Vec<LaidOutPage>,
}

/// Space reserved below a section title so it never sits alone at a page bottom.
const KEEP_WITH_NEXT_MAX: f32 = 36.0;
const BULLET_GLYPH: &str = "\u{2022}";
const METER_HEIGHT: f32 = 4.0;
const CHIP_PAD_X: f32 = 5.0;
const CHIP_GAP: f32 = 4.0;

pub fn flow(tree: &PageTree, paper: PaperSize) -> FlowedDocument {
    let (width, height) = paper.dimensions();
    let mut engine = Flow::new(tree.font, tree.margins.top, height - tree.margins.bottom);
    let content_x = tree.margins.side;
    let content_w = width - 2.0 * tree.margins.side;

    let mut cur = Cursor {
        page: 0,
        y: tree.margins.top,
    };
    let full = Region {
        x: content_x,
        width: content_w,
    };
    engine.nodes(&tree.header, full, &mut cur, width);

    let mut fills = Vec::new();
    match &tree.body {
        Body::Single { nodes } => engine.nodes(nodes, full, &mut cur, width),
        Body::Columns {
            side,
            sidebar,
            main,
            gutter,
        } => {
            let sidebar_w = content_w * sidebar.ratio.clamp(0.1, 0.9);
            let main_w = content_w - sidebar_w - gutter;
            let (sidebar_x, main_x) = match side {
                Side::Left => (content_x, content_x + sidebar_w + gutter),
                Side::Right => (content_x + main_w + gutter, content_x),
            };
            let start = cur;
            let mut side_cur = start;
            let mut main_cur = start;
            engine.nodes(
                &sidebar.nodes,
                Region::inset(sidebar_x, sidebar_w, sidebar.padding),
                &mut side_cur,
                width,
            );
            engine.nodes(
                &main.nodes,
                Region::inset(main_x, main_w, main.padding),
                &mut main_cur,
                width,
            );
            cur = side_cur.max(main_cur);
            fills.extend(sidebar.fill.map(|c| (sidebar_x, sidebar_w, c)));
            fills.extend(main.fill.map(|c| (main_x, main_w, c)));
        }
    }

    engine.ensure_page(cur.page);
    for page in &mut engine.pages {
        for &(x, w, color) in &fills {
            page.backgrounds.push(DrawOp::Rect {
                x,
                top: 0.0,
                w,
                h: height,
                color,
            });
        }
    }

    tracing::debug!(pages = engine.pages.len(), "Flowed page tree");
    FlowedDocument {
        width,
        height,
        font: tree.font,
        paper: tree.paper,
        pages: engine.pages,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cursor {
    page: usize,
    y: f32,
}

impl Cursor {
    fn max(self, other: Cursor) -> Cursor {
        if (other.page, other.y) > (self.page, self.y) {
            other
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Region {
    x: f32,
    width: f32,
}

impl Region {
    fn inset(x: f32, width: f32, padding: f32) -> Self {
        Self {
            x: x + padding,
            width: (width - 2.0 * padding).max(1.0),
        }
    }
}

struct Flow {
    font: FontFamily,
    top: f32,
    limit: f32,
    pages: Vec<LaidOutPage>,
}

impl Flow {
    fn new(font: FontFamily, top: f32, limit: f32) -> Self {
        Self {
            font,
            top,
            limit,
            pages: Vec::new(),
        }
    }

    fn ensure_page(&mut self, index: usize) {
        while self.pages.len() <= index {
            self.pages.push(LaidOutPage::default());
        }
    }

    fn emit(&mut self, page: usize, op: DrawOp) {
        self.ensure_page(page);
        self.pages[page].content.push(op);
    }

    /// Moves to the next page unless `height` fits, or the cursor is already at the
    /// top (an item taller than a page is placed anyway).
    fn reserve(&mut self, cur: &mut Cursor, height: f32) {
        if cur.y + height > self.limit && cur.y > self.top + 0.5 {
            cur.page += 1;
            cur.y = self.top;
            tracing::debug!(page = cur.page, needed = height, "Page break");
        }
    }

    /// Height the nodes would occupy on an endless page.
    fn measure(&self, nodes: &[Node], width: f32, page_width: f32) -> f32 {
        let mut scratch = Flow::new(self.font, 0.0, f32::INFINITY);
        let mut cur = Cursor { page: 0, y: 0.0 };
        scratch.nodes(nodes, Region { x: 0.0, width }, &mut cur, page_width);
        cur.y
    }

    fn nodes(&mut self, nodes: &[Node], region: Region, cur: &mut Cursor, page_width: f32) {
        for node in nodes {
            self.node(node, region, cur, page_width);
        }
    }

    fn node(&mut self, node: &Node, region: Region, cur: &mut Cursor, page_width: f32) {
        match node {
            Node::Section(section) => self.section(section, region, cur, page_width),
            Node::Text(para) => self.paragraph(para, region, cur),
            Node::Row { left, right } => self.row(left, right, region, cur),
            Node::Bullets(list) => self.bullets(list, region, cur),
            Node::Rule(rule) => self.rule(rule, region, cur),
            Node::Spacer { height } => cur.y += height,
            Node::Band(band) => self.band(band, region, cur, page_width),
            Node::Meter(meter) => self.meter(meter, region, cur),
            Node::Chips(chips) => self.chips(chips, region, cur),
            Node::Group { children } => self.nodes(children, region, cur, page_width),
        }
    }

    fn section(&mut self, section: &Section, region: Region, cur: &mut Cursor, page_width: f32) {
        let title_h = self.measure(
            &[Node::Text(section.title.clone())],
            region.width,
            page_width,
        );
        let rule_h = section
            .rule
            .map(|r| r.space_before + r.thickness + r.space_after)
            .unwrap_or(0.0);
        let first_h = section
            .children
            .first()
            .map(|first| {
                self.measure(std::slice::from_ref(first), region.width, page_width)
                    .min(KEEP_WITH_NEXT_MAX)
            })
            .unwrap_or(0.0);
        self.reserve(cur, title_h + rule_h + first_h);

        self.paragraph(&section.title, region, cur);
        if let Some(rule) = &section.rule {
            self.rule(rule, region, cur);
        }
        self.nodes(&section.children, region, cur, page_width);
    }

    fn paragraph(&mut self, para: &Paragraph, region: Region, cur: &mut Cursor) {
        let lines = wrap(&para.runs, &para.style, self.font, region.width);
        for line in &lines {
            self.place_line(line, &para.style, region.x, region.width, cur);
        }
        cur.y += para.style.space_after;
    }

    fn place_line(&mut self, line: &Line, style: &TextStyle, x: f32, width: f32, cur: &mut Cursor) {
        let line_h = style.line_height();
        self.reserve(cur, line_h);
        let offset = match style.align {
            Align::Left => 0.0,
            Align::Center => ((width - line.width) / 2.0).max(0.0),
            Align::Right => (width - line.width).max(0.0),
        };
        let baseline = baseline_for(cur.y, style);
        for seg in &line.segments {
            self.segment(seg, style, x + offset, baseline, cur.page, cur.y, line_h);
        }
        cur.y += line_h;
    }

    #[allow(clippy::too_many_arguments)]
    fn segment(
        &mut self,
        seg: &Segment,
        style: &TextStyle,
        x: f32,
        baseline: f32,
        page: usize,
        line_top: f32,
        line_h: f32,
    ) {
        let color = if seg.href.is_some() { style.link } else { style.color };
        let sx = x + seg.x;
        self.emit(
            page,
            DrawOp::Text {
                x: sx,
                baseline,
                text: seg.text.clone(),
                bold: seg.bold,
                italic: seg.italic,
                size: style.size,
                color,
            },
        );
        if seg.underline {
            let thickness = (style.size * 0.05).max(0.5);
            self.emit(
                page,
                DrawOp::Rect {
                    x: sx,
                    top: baseline + style.size * 0.12,
                    w: seg.width,
                    h: thickness,
                    color,
                },
            );
        }
        if let Some(uri) = &seg.href {
            self.emit(
                page,
                DrawOp::Link {
                    x: sx,
                    top: line_top,
                    w: seg.width,
                    h: line_h,
                    uri: uri.clone(),
                },
            );
        }
    }

    fn row(&mut self, left: &Paragraph, right: &Paragraph, region: Region, cur: &mut Cursor) {
        let right_lines = wrap(&right.runs, &right.style, self.font, region.width * 0.4);
        let right_w = right_lines.iter().map(|l| l.width).fold(0.0, f32::max);
        let left_w = (region.width - right_w - 8.0).max(region.width * 0.5);
        let left_lines = wrap(&left.runs, &left.style, self.font, left_w);

        let first_h = left.style.line_height().max(right.style.line_height());
        self.reserve(cur, first_h);
        let start = *cur;

        let mut right_cur = start;
        for line in &right_lines {
            self.place_line(line, &right.style, region.x, region.width, &mut right_cur);
        }
        let mut left_cur = start;
        for line in &left_lines {
            self.place_line(line, &left.style, region.x, left_w, &mut left_cur);
        }
        *cur = left_cur.max(right_cur);
        cur.y += left.style.space_after.max(right.style.space_after);
    }

    fn bullets(&mut self, list: &BulletList, region: Region, cur: &mut Cursor) {
        let inner = Region {
            x: region.x + list.indent,
            width: (region.width - list.indent).max(1.0),
        };
        for item in &list.items {
            let lines = wrap(&item.runs, &item.style, self.font, inner.width);
            for (i, line) in lines.iter().enumerate() {
                if i == 0 {
                    self.reserve(cur, item.style.line_height());
                    let marker_size = item.style.size;
                    self.emit(
                        cur.page,
                        DrawOp::Text {
                            x: region.x + 1.0,
                            baseline: baseline_for(cur.y, &item.style),
                            text: BULLET_GLYPH.to_string(),
                            bold: false,
                            italic: false,
                            size: marker_size,
                            color: list.marker,
                        },
                    );
                }
                self.place_line(line, &item.style, inner.x, inner.width, cur);
            }
            cur.y += item.style.space_after;
        }
    }

    fn rule(&mut self, rule: &Rule, region: Region, cur: &mut Cursor) {
        cur.y += rule.space_before;
        self.reserve(cur, rule.thickness);
        self.emit(
            cur.page,
            DrawOp::Rect {
                x: region.x,
                top: cur.y,
                w: region.width,
                h: rule.thickness,
                color: rule.color,
            },
        );
        cur.y += rule.thickness + rule.space_after;
    }

    fn band(&mut self, band: &Band, region: Region, cur: &mut Cursor, page_width: f32) {
        let inner_w = (region.width - 2.0 * band.padding).max(1.0);
        let height = self.measure(&band.children, inner_w, page_width) + 2.0 * band.padding;
        self.reserve(cur, height);

        let (x, w) = if band.bleed {
            (0.0, page_width)
        } else {
            (region.x, region.width)
        };
        // A bleeding band at the top of a page extends to the paper edge.
        let top = if band.bleed && cur.y <= self.top + 0.5 {
            0.0
        } else {
            cur.y
        };
        self.emit(
            cur.page,
            DrawOp::Rect {
                x,
                top,
                w,
                h: cur.y + height - top,
                color: band.fill,
            },
        );

        let band_top = *cur;
        cur.y += band.padding;
        let inner = Region {
            x: region.x + band.padding,
            width: inner_w,
        };
        self.nodes(&band.children, inner, cur, page_width);
        if cur.page == band_top.page {
            cur.y = cur.y.max(band_top.y + height);
        }
    }

    fn meter(&mut self, meter: &Meter, region: Region, cur: &mut Cursor) {
        let label_h = meter.label.style.line_height();
        self.reserve(cur, label_h + METER_HEIGHT + meter.label.style.space_after);
        self.paragraph(&meter.label, region, cur);
        let total = meter.total.max(1);
        let filled = meter.filled.min(total);
        self.emit(
            cur.page,
            DrawOp::Rect {
                x: region.x,
                top: cur.y,
                w: region.width,
                h: METER_HEIGHT,
                color: meter.track,
            },
        );
        if filled > 0 {
            self.emit(
                cur.page,
                DrawOp::Rect {
                    x: region.x,
                    top: cur.y,
                    w: region.width * f32::from(filled) / f32::from(total),
                    h: METER_HEIGHT,
                    color: meter.color,
                },
            );
        }
        cur.y += METER_HEIGHT + 6.0;
    }

    fn chips(&mut self, chips: &Chips, region: Region, cur: &mut Cursor) {
        let style = &chips.text;
        let metrics = get_metrics(self.font, style.bold);
        let chip_h = style.size * 1.7;
        let mut x = 0.0_f32;
        let mut row_started = false;
        for item in &chips.items {
            let w = (metrics.measure(item, style.size) + 2.0 * CHIP_PAD_X).min(region.width);
            if row_started && x + w > region.width {
                cur.y += chip_h + CHIP_GAP;
                x = 0.0;
                row_started = false;
            }
            if !row_started {
                self.reserve(cur, chip_h);
                row_started = true;
            }
            self.emit(
                cur.page,
                DrawOp::Rect {
                    x: region.x + x,
                    top: cur.y,
                    w,
                    h: chip_h,
                    color: chips.fill,
                },
            );
            self.emit(
                cur.page,
                DrawOp::Text {
                    x: region.x + x + CHIP_PAD_X,
                    baseline: cur.y + (chip_h - style.size) / 2.0 + style.size * 0.78,
                    text: item.clone(),
                    bold: style.bold,
                    italic: style.italic,
                    size: style.size,
                    color: style.color,
                },
            );
            x += w + CHIP_GAP;
        }
        if row_started {
            cur.y += chip_h + CHIP_GAP;
        }
        cur.y += style.space_after;
    }
}

fn baseline_for(line_top: f32, style: &TextStyle) -> f32 {
    line_top + (style.line_height() - style.size) / 2.0 + style.size * 0.78
}

// ────────────────────────────────────────────────────────────────────────────
// Line wrapping
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Segment {
    pub x: f32,
    pub width: f32,
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub href: Option<String>,
}

impl Segment {
    fn same_face(&self, other: &Piece<'_>) -> bool {
        self.bold == other.bold
            && self.italic == other.italic
            && self.underline == other.underline
            && self.href.as_deref() == other.href
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Line {
    pub segments: Vec<Segment>,
    pub width: f32,
}

#[derive(Debug, Clone, Copy)]
struct Piece<'a> {
    text: &'a str,
    bold: bool,
    italic: bool,
    underline: bool,
    href: Option<&'a str>,
}

enum Token<'a> {
    /// Pieces with no whitespace between them; they wrap as one unit.
    Word(Vec<Piece<'a>>),
    Space,
    Break,
}

fn tokenize<'a>(runs: &'a [StyledRun], style: &TextStyle) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut word: Vec<Piece<'a>> = Vec::new();
    for run in runs {
        if run.is_break() {
            if !word.is_empty() {
                tokens.push(Token::Word(std::mem::take(&mut word)));
            }
            tokens.push(Token::Break);
            continue;
        }
        let face = |text: &'a str| Piece {
            text,
            bold: style.bold || run.style.bold,
            italic: style.italic || run.style.italic,
            underline: run.style.underline,
            href: run.href.as_deref(),
        };
        let mut start = None;
        for (i, c) in run.text.char_indices() {
            let is_space = c.is_whitespace() && c != '\u{a0}';
            match (is_space, start) {
                (true, Some(s)) => {
                    word.push(face(&run.text[s..i]));
                    tokens.push(Token::Word(std::mem::take(&mut word)));
                    tokens.push(if c == '\n' { Token::Break } else { Token::Space });
                    start = None;
                }
                (true, None) => {
                    if !word.is_empty() {
                        tokens.push(Token::Word(std::mem::take(&mut word)));
                    }
                    tokens.push(if c == '\n' { Token::Break } else { Token::Space });
                }
                (false, None) => start = Some(i),
                (false, Some(_)) => {}
            }
        }
        if let Some(s) = start {
            word.push(face(&run.text[s..]));
        }
    }
    if !word.is_empty() {
        tokens.push(Token::Word(word));
    }
    tokens
}

/// Greedy wrap of styled runs into lines no wider than `max_width` points.
/// A single word wider than the line is placed on its own line, unbroken.
pub(crate) fn wrap(runs: &[StyledRun], style: &TextStyle, font: FontFamily, max_width: f32) -> Vec<Line> {
    let width_of = |p: &Piece<'_>| get_metrics(font, p.bold).measure(p.text, style.size);
    let space_w = get_metrics(font, style.bold).measure(" ", style.size);

    let mut lines = Vec::new();
    let mut line = Line::default();
    let mut pending_space = false;

    for token in tokenize(runs, style) {
        match token {
            Token::Break => {
                lines.push(std::mem::take(&mut line));
                pending_space = false;
            }
            Token::Space => pending_space = !line.segments.is_empty(),
            Token::Word(pieces) => {
                let word_w: f32 = pieces.iter().map(width_of).sum();
                let gap = if pending_space { space_w } else { 0.0 };
                if !line.segments.is_empty() && line.width + gap + word_w > max_width {
                    lines.push(std::mem::take(&mut line));
                    pending_space = false;
                }
                for (i, piece) in pieces.iter().enumerate() {
                    let lead_space = i == 0 && pending_space;
                    let piece_w = width_of(piece);
                    match line.segments.last_mut() {
                        Some(last) if last.same_face(piece) => {
                            if lead_space {
                                last.text.push(' ');
                                last.width += space_w;
                            }
                            last.text.push_str(piece.text);
                            last.width += piece_w;
                        }
                        _ => {
                            let x = if lead_space { line.width + space_w } else { line.width };
                            line.segments.push(Segment {
                                x,
                                width: piece_w,
                                text: piece.text.to_string(),
                                bold: piece.bold,
                                italic: piece.italic,
                                underline: piece.underline,
                                href: piece.href.map(str::to_string),
                            });
                        }
                    }
                    line.width = line.segments.last().map(|s| s.x + s.width).unwrap_or(0.0);
                }
                pending_space = false;
            }
        }
    }
    if !line.segments.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tree::Margins;
    use crate::richtext::render;

    fn style(size: f32) -> TextStyle {
        TextStyle::new(size, Color::BLACK)
    }

    fn line_text(line: &Line) -> String {
        let mut out = String::new();
        for (i, seg) in line.segments.iter().enumerate() {
            if i > 0 && seg.x > line.segments[i - 1].x + line.segments[i - 1].width + 0.01 {
                out.push(' ');
            }
            out.push_str(&seg.text);
        }
        out
    }

    // ── wrap ────────────────────────────────────────────────────────────────

    #[test]
    fn test_wrap_respects_width() {
        let runs = vec![StyledRun::plain("alpha beta gamma delta epsilon zeta eta theta")];
        let lines = wrap(&runs, &style(10.0), FontFamily::Helvetica, 80.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 80.0 + 1e-3, "{line:?}");
        }
        let rejoined: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(rejoined.join(" "), "alpha beta gamma delta epsilon zeta eta theta");
    }

    #[test]
    fn test_wrap_keeps_adjacent_styles_together() {
        let runs = render("a <b>bold</b><i>italic</i> word");
        let lines = wrap(&runs, &style(10.0), FontFamily::Helvetica, 1000.0);
        assert_eq!(lines.len(), 1);
        let texts: Vec<&str> = lines[0].segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "bold", "italic", "word"]);
        let segs = &lines[0].segments;
        // "bold" and "italic" are glued: no gap between them.
        assert!((segs[1].x + segs[1].width - segs[2].x).abs() < 1e-3);
        assert!(segs[1].bold && segs[2].italic);
    }

    #[test]
    fn test_wrap_honours_breaks() {
        let runs = render("<p>one</p><p>two</p>");
        let lines = wrap(&runs, &style(10.0), FontFamily::Helvetica, 1000.0);
        assert_eq!(lines.iter().map(line_text).collect::<Vec<_>>(), vec!["one", "two"]);
    }

    #[test]
    fn test_overlong_word_gets_its_own_line() {
        let runs = vec![StyledRun::plain("a supercalifragilisticexpialidocious b")];
        let lines = wrap(&runs, &style(12.0), FontFamily::Helvetica, 60.0);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_link_segment_keeps_href() {
        let runs = vec![StyledRun::plain("see "), StyledRun::link("site", "https://x.dev")];
        let lines = wrap(&runs, &style(10.0), FontFamily::Times, 500.0);
        let link = &lines[0].segments[1];
        assert_eq!(link.href.as_deref(), Some("https://x.dev"));
        assert!(link.underline);
        assert!(!link.bold);
    }

    // ── pagination ──────────────────────────────────────────────────────────

    fn tree_with(nodes: Vec<Node>) -> PageTree {
        PageTree {
            font: FontFamily::Helvetica,
            paper: Color::WHITE,
            margins: Margins::uniform(50.0),
            header: Vec::new(),
            body: Body::Single { nodes },
        }
    }

    #[test]
    fn test_long_content_flows_onto_more_pages() {
        let items: Vec<Paragraph> = (0..200)
            .map(|i| Paragraph::text(format!("Achievement number {i}"), style(10.0)))
            .collect();
        let tree = tree_with(vec![Node::Bullets(BulletList {
            items,
            marker: Color::BLACK,
            indent: 10.0,
        })]);
        let doc = flow(&tree, PaperSize::Letter);
        assert!(doc.pages.len() >= 3, "got {} pages", doc.pages.len());

        // Nothing is placed below the bottom margin.
        for page in &doc.pages {
            for op in &page.content {
                if let DrawOp::Text { baseline, .. } = op {
                    assert!(*baseline <= 792.0 - 50.0 + 1.0);
                }
            }
        }
        // Order survives pagination: the last item is on the last page.
        let last = doc.pages.last().unwrap();
        assert!(last.content.iter().any(
            |op| matches!(op, DrawOp::Text { text, .. } if text.contains("number 199"))
        ));
    }

    #[test]
    fn test_empty_tree_still_has_one_page() {
        let doc = flow(&tree_with(Vec::new()), PaperSize::A4);
        assert_eq!(doc.pages.len(), 1);
        assert_eq!((doc.width, doc.height), PaperSize::A4.dimensions());
    }

    #[test]
    fn test_sidebar_fill_repeats_on_every_page() {
        let long: Vec<Node> = (0..150)
            .map(|i| Node::Text(Paragraph::text(format!("Line {i}"), style(11.0))))
            .collect();
        let tree = PageTree {
            body: Body::Columns {
                side: Side::Left,
                sidebar: crate::layout::tree::Column {
                    ratio: 0.3,
                    fill: Some(Color::rgb(1, 2, 3)),
                    padding: 10.0,
                    nodes: vec![Node::Text(Paragraph::text("Side", style(9.0)))],
                },
                main: crate::layout::tree::Column {
                    ratio: 0.7,
                    fill: None,
                    padding: 10.0,
                    nodes: long,
                },
                gutter: 0.0,
            },
            ..tree_with(Vec::new())
        };
        let doc = flow(&tree, PaperSize::Letter);
        assert!(doc.pages.len() > 1);
        for page in &doc.pages {
            assert_eq!(page.backgrounds.len(), 1);
        }
    }

    #[test]
    fn test_section_title_is_not_orphaned() {
        // Fill the first page almost completely, then start a section.
        let filler_lines = ((792.0 - 100.0) / 13.0) as usize - 1;
        let mut nodes: Vec<Node> = (0..filler_lines)
            .map(|i| Node::Text(Paragraph::text(format!("filler {i}"), style(10.0))))
            .collect();
        nodes.push(Node::Section(Section {
            kind: crate::layout::tree::SectionKind::Skills,
            title: Paragraph::text("SKILLS", style(11.0)),
            rule: None,
            children: vec![Node::Text(Paragraph::text("Rust", style(10.0)))],
        }));
        let doc = flow(&tree_with(nodes), PaperSize::Letter);
        assert_eq!(doc.pages.len(), 2);
        let second = &doc.pages[1];
        assert!(second
            .content
            .iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if text == "SKILLS")));
    }
}
