//! Markup codec: the restricted HTML subset article bodies are stored in.
//!
//! Rendering is canonical (`<p>`, `<h1>`..`<h3>`, `<ul>/<ol>/<li>`,
//! `<pre class="code-block">`, `<a>`, highlight `<span>`, `<b>`, `<i>`, `<u>`).
//! Parsing is lenient: unknown tags are dropped but their text kept, and a body
//! with no tags at all is read as newline separated paragraphs.

use super::document::{Block, BlockKind, Document, HeadingLevel, InlineStyle, ListKind, Run};

pub const CODE_BLOCK_CLASS: &str = "code-block";
pub const DEFAULT_MARK_COLOR: &str = "#fcd34d";

pub fn render(doc: &Document) -> String {
    if doc.is_blank() {
        return String::new();
    }

    let mut out = String::new();
    let mut open_list: Option<ListKind> = None;

    for block in &doc.blocks {
        let list = block.kind.list_kind();
        if list != open_list {
            if let Some(kind) = open_list {
                push_close(&mut out, kind.tag());
            }
            if let Some(kind) = list {
                push_open(&mut out, kind.tag());
            }
            open_list = list;
        }

        match block.kind {
            BlockKind::Paragraph => render_block(&mut out, "p", "<p>", block),
            BlockKind::Heading(level) => {
                let open = format!("<{}>", level.tag());
                render_block(&mut out, level.tag(), &open, block);
            }
            BlockKind::ListItem(_) => render_block(&mut out, "li", "<li>", block),
            BlockKind::CodeBlock => {
                let open = format!("<pre class=\"{CODE_BLOCK_CLASS}\">");
                render_block(&mut out, "pre", &open, block);
            }
        }
    }

    if let Some(kind) = open_list {
        push_close(&mut out, kind.tag());
    }
    out
}

fn render_block(out: &mut String, tag: &str, open: &str, block: &Block) {
    out.push_str(open);
    if block.is_empty() {
        out.push_str("<br>");
    }
    for run in &block.runs {
        render_run(out, run);
    }
    push_close(out, tag);
}

fn render_run(out: &mut String, run: &Run) {
    let style = &run.style;
    let mut closers: Vec<&str> = Vec::new();

    if let Some(href) = &style.link {
        out.push_str("<a href=\"");
        out.push_str(&escape_html(href));
        out.push_str("\">");
        closers.push("a");
    }
    if let Some(color) = &style.highlight {
        out.push_str("<span style=\"background-color: ");
        out.push_str(&escape_html(color));
        out.push_str(";\">");
        closers.push("span");
    }
    for (on, tag) in [(style.bold, "b"), (style.italic, "i"), (style.underline, "u")] {
        if on {
            push_open(out, tag);
            closers.push(tag);
        }
    }

    out.push_str(&escape_html(&run.text));

    for tag in closers.iter().rev() {
        push_close(out, tag);
    }
}

fn push_open(out: &mut String, tag: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
}

fn push_close(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|ch| (ch, semi)));
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Open {
        name: String,
        attrs: &'a str,
    },
    Close {
        name: String,
    },
    Text(&'a str),
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            tokens.push(Token::Text(rest));
            break;
        };
        if lt > 0 {
            tokens.push(Token::Text(&rest[..lt]));
            rest = &rest[lt..];
        }

        if let Some(after) = rest.strip_prefix("<!--") {
            rest = match after.find("-->") {
                Some(end) => &after[end + 3..],
                None => "",
            };
            continue;
        }

        let looks_like_tag = rest[1..]
            .chars()
            .next()
            .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '/' || ch == '!');
        let Some(gt) = rest.find('>').filter(|_| looks_like_tag) else {
            tokens.push(Token::Text(&rest[..1]));
            rest = &rest[1..];
            continue;
        };

        let inner = rest[1..gt].trim();
        rest = &rest[gt + 1..];

        if let Some(name) = inner.strip_prefix('/') {
            tokens.push(Token::Close {
                name: name.trim().to_ascii_lowercase(),
            });
            continue;
        }
        if inner.starts_with('!') {
            continue;
        }

        let inner = inner.strip_suffix('/').unwrap_or(inner).trim_end();
        let name_end = inner
            .find(|ch: char| ch.is_ascii_whitespace())
            .unwrap_or(inner.len());
        tokens.push(Token::Open {
            name: inner[..name_end].to_ascii_lowercase(),
            attrs: &inner[name_end..],
        });
    }

    tokens
}

fn attr_value<'a>(attrs: &'a str, key: &str) -> Option<&'a str> {
    let mut rest = attrs;
    while let Some(pos) = rest.find(key) {
        let boundary = rest[..pos]
            .chars()
            .last()
            .map_or(true, |ch| ch.is_ascii_whitespace());
        let after = rest[pos + key.len()..].trim_start();
        if boundary {
            if let Some(value) = after.strip_prefix('=') {
                let value = value.trim_start();
                let quote = value.chars().next()?;
                if quote == '"' || quote == '\'' {
                    let body = &value[1..];
                    return body.find(quote).map(|end| &body[..end]);
                }
                let end = value
                    .find(|ch: char| ch.is_ascii_whitespace())
                    .unwrap_or(value.len());
                return Some(&value[..end]);
            }
        }
        rest = &rest[pos + key.len()..];
    }
    None
}

fn background_color(style_attr: &str) -> Option<String> {
    style_attr.split(';').find_map(|decl| {
        let (prop, value) = decl.split_once(':')?;
        let prop = prop.trim().to_ascii_lowercase();
        let value = value.trim();
        if (prop == "background-color" || prop == "background") && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

struct Parser {
    blocks: Vec<Block>,
    current: Option<Block>,
    lists: Vec<ListKind>,
    styles: Vec<(String, InlineStyle)>,
    in_pre: bool,
}

impl Parser {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            current: None,
            lists: Vec::new(),
            styles: Vec::new(),
            in_pre: false,
        }
    }

    fn style(&self) -> InlineStyle {
        self.styles
            .last()
            .map(|(_, style)| style.clone())
            .unwrap_or_default()
    }

    fn flush(&mut self) {
        if let Some(mut block) = self.current.take() {
            block.normalize();
            self.blocks.push(block);
        }
    }

    fn start(&mut self, kind: BlockKind) {
        self.flush();
        self.current = Some(Block::new(kind));
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let style = self.style();
        let block = self
            .current
            .get_or_insert_with(|| Block::new(BlockKind::Paragraph));
        match block.runs.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => block.runs.push(Run::new(text, style)),
        }
    }

    fn derived(&self, f: impl FnOnce(&mut InlineStyle)) -> InlineStyle {
        let mut style = self.style();
        f(&mut style);
        style
    }

    fn open(&mut self, name: &str, attrs: &str) {
        let style = match name {
            "p" | "div" => return self.start(BlockKind::Paragraph),
            "h1" => return self.start(BlockKind::Heading(HeadingLevel::H1)),
            "h2" => return self.start(BlockKind::Heading(HeadingLevel::H2)),
            "h3" | "h4" | "h5" | "h6" => return self.start(BlockKind::Heading(HeadingLevel::H3)),
            "ul" | "ol" => {
                self.flush();
                self.lists.push(if name == "ol" {
                    ListKind::Ordered
                } else {
                    ListKind::Unordered
                });
                return;
            }
            "li" => {
                let kind = self.lists.last().copied().unwrap_or(ListKind::Unordered);
                return self.start(BlockKind::ListItem(kind));
            }
            "pre" => {
                self.start(BlockKind::CodeBlock);
                self.in_pre = true;
                return;
            }
            "br" => return self.line_break(),
            "b" | "strong" => self.derived(|s| s.bold = true),
            "i" | "em" => self.derived(|s| s.italic = true),
            "u" => self.derived(|s| s.underline = true),
            "a" => {
                let href = attr_value(attrs, "href").map(decode_entities);
                self.derived(|s| s.link = href)
            }
            "span" | "mark" => {
                let color = attr_value(attrs, "style")
                    .and_then(background_color)
                    .or_else(|| (name == "mark").then(|| DEFAULT_MARK_COLOR.to_string()));
                self.derived(|s| {
                    if color.is_some() {
                        s.highlight = color;
                    }
                })
            }
            _ => return,
        };
        self.styles.push((name.to_string(), style));
    }

    fn close(&mut self, name: &str) {
        match name {
            "p" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "li" => self.flush(),
            "pre" => {
                self.flush();
                self.in_pre = false;
            }
            "ul" | "ol" => {
                self.flush();
                self.lists.pop();
            }
            _ => {
                if let Some(pos) = self.styles.iter().rposition(|(open, _)| open == name) {
                    self.styles.truncate(pos);
                }
            }
        }
    }

    fn line_break(&mut self) {
        let Some(block) = self.current.as_ref() else {
            return;
        };
        if block.kind == BlockKind::CodeBlock {
            self.push_text("\n");
        } else if !block.is_empty() {
            let kind = block.kind;
            self.start(kind);
        }
    }

    fn text(&mut self, raw: &str) {
        let text = decode_entities(raw);
        if self.in_pre {
            self.push_text(&text);
            return;
        }

        if self.current.is_none() {
            if text.trim().is_empty() {
                return;
            }
            if !self.lists.is_empty() {
                let kind = self.lists.last().copied().unwrap_or(ListKind::Unordered);
                self.start(BlockKind::ListItem(kind));
                self.push_text(&text.replace('\n', " "));
                return;
            }
            for (index, line) in text.split('\n').enumerate() {
                if index > 0 {
                    self.start(BlockKind::Paragraph);
                }
                self.push_text(line.trim_end_matches('\r'));
            }
            return;
        }

        self.push_text(&text.replace('\n', " "));
    }

    fn finish(mut self) -> Document {
        self.flush();
        Document::from_blocks(self.blocks)
    }
}

pub fn parse(markup: &str) -> Document {
    let mut parser = Parser::new();
    for token in tokenize(markup) {
        match token {
            Token::Open { name, attrs } => parser.open(&name, attrs),
            Token::Close { name } => parser.close(&name),
            Token::Text(text) => parser.text(text),
        }
    }
    parser.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/models/markup.rs"]
mod tests;
