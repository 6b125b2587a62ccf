//! Inline rich-text renderer.
//!
//! Free-text resume fields carry a small HTML-like markup subset produced by the
//! authoring editor. `render` turns that markup into an ordered sequence of styled
//! runs consumed by the layouts. The function is total: unsupported or malformed
//! constructs degrade to their text content and never abort a render.
//!
//! Supported:
//! - `b`/`strong`, `i`/`em`, `u`/`ins`, `a href="…"`
//! - block breaks: `p`, `div`, `br`, `h1`–`h6`, `blockquote`, `ul`/`ol`/`li`
//! - named entities `&amp; &lt; &gt; &quot; &apos; &#39; &nbsp;` and numeric references
//!
//! Block boundaries are emitted as a plain run whose text is exactly `"\n"`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl RunStyle {
    pub const PLAIN: RunStyle = RunStyle {
        bold: false,
        italic: false,
        underline: false,
    };

    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::PLAIN
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledRun {
    pub text: String,
    pub style: RunStyle,
    /// Target of a hyperlink run.
    pub href: Option<String>,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::PLAIN,
            href: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
            href: None,
        }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle {
                underline: true,
                ..RunStyle::PLAIN
            },
            href: Some(href.into()),
        }
    }

    pub fn is_break(&self) -> bool {
        self.text == "\n"
    }
}

/// Concatenated text of a run sequence (breaks included as newlines).
#[cfg(test)]
pub fn plain_text(runs: &[StyledRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

/// Renders markup into styled runs, preserving source order.
///
/// Text without any tag or entity is returned untouched as a single plain run.
/// Empty input yields no runs.
pub fn render(markup: &str) -> Vec<StyledRun> {
    if markup.is_empty() {
        return Vec::new();
    }
    if !looks_like_markup(markup) {
        return vec![StyledRun::plain(markup)];
    }
    Parser::new(markup).run()
}

fn looks_like_markup(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| match b {
        b'<' => bytes
            .get(i + 1)
            .is_some_and(|&n| n.is_ascii_alphabetic() || n == b'/' || n == b'!'),
        b'&' => decode_entity(&s[i..]).is_some(),
        _ => false,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Parser
// ────────────────────────────────────────────────────────────────────────────

enum ListKind {
    Bulleted,
    Numbered(u32),
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    out: Vec<StyledRun>,
    bold: u32,
    italic: u32,
    underline: u32,
    links: Vec<Option<String>>,
    lists: Vec<ListKind>,
    /// Content of these tags is dropped entirely.
    skip_depth: u32,
    /// Breaks owed before the next visible character. Block edges collapse into
    /// one; every `br` adds its own.
    pending_breaks: u32,
    /// Markers of open list items that have not shown any text yet, outermost first.
    pending_markers: Vec<String>,
    /// Last emitted character was whitespace (for collapsing).
    after_space: bool,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            out: Vec::new(),
            bold: 0,
            italic: 0,
            underline: 0,
            links: Vec::new(),
            lists: Vec::new(),
            skip_depth: 0,
            pending_breaks: 0,
            pending_markers: Vec::new(),
            after_space: true,
        }
    }

    fn run(mut self) -> Vec<StyledRun> {
        let src = self.src;
        while self.pos < src.len() {
            let rest = &src[self.pos..];
            if rest.starts_with('<') {
                if let Some(consumed) = self.try_tag(rest) {
                    self.pos += consumed;
                    continue;
                }
            }
            if rest.starts_with('&') {
                if let Some((decoded, consumed)) = decode_entity(rest) {
                    self.pos += consumed;
                    self.push_char(decoded);
                    continue;
                }
            }
            // Safe: pos always sits on a char boundary.
            let ch = rest.chars().next().unwrap_or(' ');
            self.pos += ch.len_utf8();
            self.push_char(ch);
        }
        self.trim_trailing_space();
        self.out
    }

    fn current_style(&self) -> RunStyle {
        let linked = self.links.last().is_some_and(|h| h.is_some());
        RunStyle {
            bold: self.bold > 0,
            italic: self.italic > 0,
            underline: self.underline > 0 || linked,
        }
    }

    fn current_href(&self) -> Option<String> {
        self.links.iter().rev().find_map(|h| h.clone())
    }

    fn push_char(&mut self, ch: char) {
        if self.skip_depth > 0 {
            return;
        }
        let is_space = ch.is_whitespace() && ch != '\u{a0}';
        if is_space {
            if self.after_space {
                return;
            }
            self.after_space = true;
            self.append(" ");
            return;
        }
        if self.pending_breaks > 0 {
            self.trim_trailing_space();
            if !self.out.is_empty() {
                for _ in 0..self.pending_breaks {
                    self.out.push(StyledRun::plain("\n"));
                }
            }
            self.pending_breaks = 0;
        }
        if !self.pending_markers.is_empty() {
            let prefix: String = self.pending_markers.drain(..).collect();
            self.append(&prefix);
        }
        self.after_space = false;
        let mut buf = [0u8; 4];
        self.append(ch.encode_utf8(&mut buf));
    }

    fn append(&mut self, text: &str) {
        let style = self.current_style();
        let href = self.current_href();
        match self.out.last_mut() {
            Some(last) if !last.is_break() && last.style == style && last.href == href => {
                last.text.push_str(text)
            }
            _ => self.out.push(StyledRun {
                text: text.to_string(),
                style,
                href,
            }),
        }
    }

    fn trim_trailing_space(&mut self) {
        if let Some(last) = self.out.last_mut() {
            if !last.is_break() && last.text.ends_with(' ') {
                last.text.pop();
                if last.text.is_empty() {
                    self.out.pop();
                }
            }
        }
    }

    fn block_break(&mut self) {
        self.pending_breaks = self.pending_breaks.max(1);
        self.after_space = true;
    }

    fn line_break(&mut self) {
        self.pending_breaks += 1;
        self.after_space = true;
    }

    /// Numbers the item when it opens, so an item without text still counts.
    fn open_list_item(&mut self) {
        let marker = match self.lists.last_mut() {
            Some(ListKind::Numbered(n)) => {
                *n += 1;
                format!("{n}. ")
            }
            _ => "\u{2022} ".to_string(),
        };
        self.pending_markers.push(marker);
    }

    /// Attempts to parse a tag at the start of `rest`. Returns bytes consumed, or
    /// `None` when the `<` is literal text.
    fn try_tag(&mut self, rest: &str) -> Option<usize> {
        if rest.starts_with("<!--") {
            return Some(rest.find("-->").map(|i| i + 3).unwrap_or(rest.len()));
        }
        let bytes = rest.as_bytes();
        let next = *bytes.get(1)?;
        if !(next.is_ascii_alphabetic() || next == b'/' || next == b'!') {
            return None;
        }
        let end = find_tag_end(rest)?;
        let inner = &rest[1..end];
        let closing = inner.starts_with('/');
        let inner = inner.trim_start_matches('/');
        let name_len = inner
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(inner.len());
        let name = inner[..name_len].to_ascii_lowercase();
        let attrs = &inner[name_len..];
        let self_closing = attrs.trim_end().ends_with('/');

        if closing {
            self.close_tag(&name);
        } else {
            self.open_tag(&name, attrs);
            if self_closing && name != "br" {
                self.close_tag(&name);
            }
        }
        Some(end + 1)
    }

    fn open_tag(&mut self, name: &str, attrs: &str) {
        match name {
            "b" | "strong" => self.bold += 1,
            "i" | "em" => self.italic += 1,
            "u" | "ins" => self.underline += 1,
            "a" => self.links.push(attribute(attrs, "href").filter(|h| !h.is_empty())),
            "br" => self.line_break(),
            "p" | "div" | "blockquote" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.block_break()
            }
            "ul" => {
                self.lists.push(ListKind::Bulleted);
                self.block_break();
            }
            "ol" => {
                self.lists.push(ListKind::Numbered(0));
                self.block_break();
            }
            "li" => {
                self.block_break();
                self.open_list_item();
            }
            "script" | "style" => self.skip_depth += 1,
            _ => {}
        }
    }

    fn close_tag(&mut self, name: &str) {
        match name {
            "b" | "strong" => self.bold = self.bold.saturating_sub(1),
            "i" | "em" => self.italic = self.italic.saturating_sub(1),
            "u" | "ins" => self.underline = self.underline.saturating_sub(1),
            "a" => {
                self.links.pop();
            }
            "p" | "div" | "blockquote" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.block_break()
            }
            "li" => {
                // An item that never showed text leaves no marker behind.
                self.pending_markers.pop();
                self.block_break();
            }
            "ul" | "ol" => {
                self.lists.pop();
                self.block_break();
            }
            "script" | "style" => self.skip_depth = self.skip_depth.saturating_sub(1),
            _ => {}
        }
    }
}

/// Finds the `>` that closes a tag, skipping over quoted attribute values.
fn find_tag_end(rest: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in rest.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, '<') => return None,
            _ => {}
        }
    }
    None
}

fn attribute(attrs: &str, key: &str) -> Option<String> {
    let lower = attrs.to_ascii_lowercase();
    let mut search_from = 0;
    while let Some(found) = lower[search_from..].find(key) {
        let start = search_from + found;
        search_from = start + key.len();
        let boundary_ok = start == 0
            || lower.as_bytes()[start - 1].is_ascii_whitespace();
        let after = lower[search_from..].trim_start();
        if !boundary_ok || !after.starts_with('=') {
            continue;
        }
        let value_start = attrs.len() - after.len() + 1;
        let value = attrs[value_start..].trim_start();
        let decoded = match value.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &value[1..];
                body.find(q).map(|end| &body[..end]).unwrap_or(body)
            }
            _ => value
                .split(|c: char| c.is_whitespace() || c == '/')
                .next()
                .unwrap_or(""),
        };
        return Some(decode_all_entities(decoded.trim()));
    }
    None
}

fn decode_all_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < s.len() {
        let rest = &s[i..];
        if rest.starts_with('&') {
            if let Some((c, used)) = decode_entity(rest) {
                out.push(c);
                i += used;
                continue;
            }
        }
        let c = rest.chars().next().unwrap_or(' ');
        out.push(c);
        i += c.len_utf8();
    }
    out
}

/// Decodes an entity at the start of `s`, returning the character and bytes consumed.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let semi = s.get(..12).unwrap_or(s).find(';')?;
    let body = &s[1..semi];
    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ if body.starts_with("#x") || body.starts_with("#X") => {
            char::from_u32(u32::from_str_radix(&body[2..], 16).ok()?)?
        }
        _ if body.starts_with('#') => char::from_u32(body[1..].parse().ok()?)?,
        _ => return None,
    };
    Some((ch, semi + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_plain(markup: &str) -> String {
        plain_text(&render(markup))
    }

    fn texts(runs: &[StyledRun]) -> Vec<&str> {
        runs.iter().map(|r| r.text.as_str()).collect()
    }

    // ── plain input ─────────────────────────────────────────────────────────

    #[test]
    fn test_plain_text_is_single_identical_run() {
        let input = "Led a team of 5   engineers, shipping a < b comparisons & more";
        let runs = render(input);
        assert_eq!(runs, vec![StyledRun::plain(input)]);
    }

    #[test]
    fn test_render_is_idempotent_on_plain_output() {
        let once = to_plain("<p>Built <b>fast</b> things</p>");
        let twice = render(&once);
        assert_eq!(twice, vec![StyledRun::plain(once.clone())]);
    }

    #[test]
    fn test_empty_input_has_no_runs() {
        assert!(render("").is_empty());
    }

    // ── inline styles ───────────────────────────────────────────────────────

    #[test]
    fn test_styles_preserve_order_and_adjacency() {
        let runs = render("Shipped <b>bold</b><i>italic</i> and <u>under</u>.");
        assert_eq!(texts(&runs), vec!["Shipped ", "bold", "italic", " and ", "under", "."]);
        assert!(runs[1].style.bold && !runs[1].style.italic);
        assert!(runs[2].style.italic && !runs[2].style.bold);
        assert!(runs[4].style.underline);
        assert_eq!(runs[3].style, RunStyle::PLAIN);
    }

    #[test]
    fn test_nested_styles_combine() {
        let runs = render("<strong>a <em>b</em></strong>");
        assert_eq!(texts(&runs), vec!["a ", "b"]);
        assert!(runs[1].style.bold && runs[1].style.italic);
    }

    #[test]
    fn test_link_runs_carry_href() {
        let runs = render(r#"See <a href="https://example.com?a=1&amp;b=2">my site</a>"#);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].text, "my site");
        assert_eq!(runs[1].href.as_deref(), Some("https://example.com?a=1&b=2"));
        assert!(runs[1].style.underline);
    }

    // ── blocks ──────────────────────────────────────────────────────────────

    #[test]
    fn test_paragraphs_emit_single_breaks() {
        let runs = render("<p>One</p>\n  <p>Two</p><div><p>Three</p></div>");
        assert_eq!(texts(&runs), vec!["One", "\n", "Two", "\n", "Three"]);
    }

    #[test]
    fn test_each_line_break_counts() {
        let runs = render("One<br><br>Two<br>Three");
        assert_eq!(texts(&runs), vec!["One", "\n", "\n", "Two", "\n", "Three"]);
        // Leading and trailing breaks still vanish.
        assert_eq!(texts(&render("<br>One<br><br>")), vec!["One"]);
    }

    #[test]
    fn test_lists_get_markers() {
        let runs = render("<ul><li>Alpha</li><li>Beta</li></ul><ol><li>x</li><li>y</li></ol>");
        assert_eq!(
            plain_text(&runs),
            "\u{2022} Alpha\n\u{2022} Beta\n1. x\n2. y"
        );
    }

    #[test]
    fn test_nested_list_keeps_outer_marker() {
        assert_eq!(
            plain_text(&render("<ol><li><ol><li>x</li></ol></li><li>y</li></ol>")),
            "1. 1. x\n2. y"
        );
        assert_eq!(
            plain_text(&render("<ul><li>Lead<ul><li>sub</li></ul></li></ul>")),
            "\u{2022} Lead\n\u{2022} sub"
        );
    }

    #[test]
    fn test_empty_list_item_leaves_no_marker() {
        assert_eq!(plain_text(&render("<ul><li></li><li>b</li></ul>")), "\u{2022} b");
    }

    // ── degradation ─────────────────────────────────────────────────────────

    #[test]
    fn test_unknown_tags_are_stripped_to_text() {
        let runs = render(r#"<span class="x">Hello</span> <marquee>world</marquee>"#);
        assert_eq!(plain_text(&runs), "Hello world");
    }

    #[test]
    fn test_malformed_markup_never_panics() {
        for input in ["<b>unclosed", "</i>stray close", "<a href='x>broken", "a <", "&#xZZ; &bogus;", "<"] {
            let _ = render(input);
        }
        assert_eq!(plain_text(&render("<b>unclosed")), "unclosed");
        assert_eq!(plain_text(&render("a <")), "a <");
    }

    #[test]
    fn test_script_content_is_dropped() {
        assert_eq!(to_plain("<p>ok</p><script>alert(1)</script>"), "ok");
    }

    #[test]
    fn test_entities_decode() {
        assert_eq!(to_plain("R&amp;D &lt;3 &#8212; &#x41;"), "R&D <3 \u{2014} A");
    }
}
