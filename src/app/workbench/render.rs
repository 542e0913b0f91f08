//! 渲染：侧边栏、标题、正文、状态栏和目标进度条。

use super::super::theme::{contrast_fg, parse_color, UiTheme};
use super::Workbench;
use crate::kernel::{AppState, FocusTarget};
use crate::models::{BlockKind, Document, InlineStyle, ListKind, Selection, TextPosition};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

const SIDEBAR_WIDTH: u16 = 30;
const KEY_HINTS: &str = " ^N new  ^E sidebar  ^D dark  ^Q quit ";

impl Workbench {
    pub fn render(&self, frame: &mut Frame) {
        let state = self.store.state();
        render_state(frame, state, self.themes.get(state.ui.dark_mode));
    }
}

pub(crate) fn render_state(frame: &mut Frame, state: &AppState, theme: &UiTheme) {
    let area = frame.area();
    frame.render_widget(
        ratatui::widgets::Block::new().style(Style::default().bg(theme.background).fg(theme.foreground)),
        area,
    );

    let main = if state.ui.sidebar_visible {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
            .split(area);
        render_sidebar(frame, columns[0], state, theme);
        columns[1]
    } else {
        area
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(main);

    render_title(frame, rows[0], state, theme);
    render_body(frame, rows[1], state, theme);
    render_status(frame, rows[2], state, theme);
    render_gauge(frame, rows[3], state, theme);

    if let Some(url) = &state.ui.link_prompt {
        render_link_prompt(frame, rows[1], url, theme);
    }
}

fn panel<'a>(title: &'a str, focused: bool, theme: &UiTheme) -> ratatui::widgets::Block<'a> {
    let border = if focused {
        theme.focus_border
    } else {
        theme.inactive_border
    };
    ratatui::widgets::Block::new()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
}

fn render_sidebar(frame: &mut Frame, area: Rect, state: &AppState, theme: &UiTheme) {
    let focused = state.ui.focus == FocusTarget::Sidebar;
    let block = panel(" Articles ", focused, theme)
        .title_bottom(Line::styled(KEY_HINTS, Style::default().fg(theme.muted_fg)));

    let directory = &state.directory;
    if !directory.loaded || directory.is_empty() {
        let (text, color) = match &directory.load_error {
            Some(error) => (error.as_str(), theme.error_fg),
            None if !directory.loaded => ("Loading...", theme.muted_fg),
            None => ("No articles yet", theme.muted_fg),
        };
        let paragraph = Paragraph::new(Line::styled(text.to_string(), Style::default().fg(color)))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let selected = state.session.selected_article_id.as_deref();
    let items = directory
        .articles()
        .iter()
        .map(|article| {
            let (mark, mark_style) = if article.completed {
                ("[x] ", Style::default().fg(theme.completed_fg))
            } else {
                ("[ ] ", Style::default().fg(theme.muted_fg))
            };
            let mut title_style = Style::default();
            if selected == Some(article.id.as_str()) {
                title_style = title_style.fg(theme.accent_fg).add_modifier(Modifier::BOLD);
            }
            let title = if article.title.trim().is_empty() {
                crate::models::DEFAULT_TITLE.to_string()
            } else {
                article.title.clone()
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, mark_style),
                Span::styled(title, title_style),
            ]))
        })
        .collect::<Vec<_>>();

    let highlight = if focused {
        Style::default().bg(theme.selection_bg)
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight);
    let mut list_state = ListState::default().with_selected(Some(state.ui.sidebar_cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_title(frame: &mut Frame, area: Rect, state: &AppState, theme: &UiTheme) {
    let focused = state.ui.focus == FocusTarget::Title;
    let session = &state.session;

    let mut spans = vec![Span::styled(
        session.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if focused && session.can_edit() {
        spans.push(Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(panel(" Title ", focused, theme)),
        area,
    );
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState, theme: &UiTheme) {
    let focused = state.ui.focus == FocusTarget::Body;
    let session = &state.session;

    let label = if session.loading {
        " Body (loading...) "
    } else {
        " Body "
    };
    let block = panel(label, focused, theme);

    if let Some(error) = &session.load_error {
        let paragraph = Paragraph::new(Line::styled(
            error.message(),
            Style::default().fg(theme.error_fg),
        ))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }
    if session.selected_article_id.is_none() {
        let paragraph = Paragraph::new(Line::styled(
            "Press Ctrl-N to start a new article",
            Style::default().fg(theme.muted_fg),
        ))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let view = body_lines(
        &session.document,
        session.selection,
        focused && session.can_edit(),
        theme,
    );
    let inner = block.inner(area);
    let scroll = scroll_for_cursor(&view, inner.width, inner.height);
    let paragraph = Paragraph::new(view.lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut Frame, area: Rect, state: &AppState, theme: &UiTheme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(32)])
        .split(area);

    let mut left = vec![Span::styled(
        format!(" {}", state.session.save_status.label()),
        Style::default().fg(theme.muted_fg),
    )];
    if let Some(notice) = &state.ui.notice {
        left.push(Span::styled(
            format!("  {notice}"),
            Style::default().fg(theme.error_fg),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(left)), columns[0]);

    let words = format!("{} / {} words ", state.word_count(), state.goal);
    frame.render_widget(
        Paragraph::new(Line::from(words).right_aligned()),
        columns[1],
    );
}

fn render_gauge(frame: &mut Frame, area: Rect, state: &AppState, theme: &UiTheme) {
    let progress = state.progress();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.gauge_fg).bg(theme.gauge_bg))
        .ratio((progress / 100.0).clamp(0.0, 1.0))
        .label(format!("{progress:.1}%"));
    frame.render_widget(gauge, area);
}

fn render_link_prompt(frame: &mut Frame, body: Rect, url: &str, theme: &UiTheme) {
    let width = body.width.saturating_sub(4).min(60);
    let area = Rect {
        x: body.x + (body.width.saturating_sub(width)) / 2,
        y: body.y + body.height.saturating_sub(3) / 2,
        width,
        height: 3.min(body.height),
    };
    frame.render_widget(Clear, area);
    let line = Line::from(vec![
        Span::raw(url.to_string()),
        Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(panel(" Link URL (Enter to apply, Esc to cancel) ", true, theme)),
        area,
    );
}

/// 带样式的正文行，以及光标所在行。
pub(crate) struct BodyView {
    pub lines: Vec<Line<'static>>,
    pub cursor_line: usize,
}

/// 每个块排成一行；代码块按换行拆开。
///
/// 选区字符和光标用反色绘制。
pub(crate) fn body_lines(
    doc: &Document,
    selection: Selection,
    show_caret: bool,
    theme: &UiTheme,
) -> BodyView {
    let (start, end) = selection.range();
    let collapsed = selection.is_collapsed();
    let cursor = selection.cursor();
    let marked = |pos: TextPosition| {
        if collapsed {
            show_caret && pos == cursor
        } else {
            start <= pos && pos < end
        }
    };
    let reversed = Style::default().add_modifier(Modifier::REVERSED);

    let mut lines = Vec::new();
    let mut cursor_line = 0;

    for (index, block) in doc.blocks.iter().enumerate() {
        let (prefix, base) = block_prefix(doc, index, block.kind, theme);
        let continuation = Span::styled(
            " ".repeat(prefix.chars().count()),
            Style::default().fg(theme.muted_fg),
        );
        let mut spans = vec![Span::styled(prefix, Style::default().fg(theme.muted_fg))];
        let mut offset = 0;

        for run in &block.runs {
            let run_style = base.patch(inline_style(&run.style, theme));
            for ch in run.text.chars() {
                let pos = TextPosition::new(index, offset);
                if pos == cursor {
                    cursor_line = lines.len();
                }
                let style = if marked(pos) {
                    run_style.patch(reversed)
                } else {
                    run_style
                };
                if ch == '\n' {
                    if marked(pos) {
                        spans.push(Span::styled(" ", reversed));
                    }
                    lines.push(Line::from(std::mem::take(&mut spans)));
                    spans.push(continuation.clone());
                } else {
                    push_char(&mut spans, ch, style);
                }
                offset += 1;
            }
        }

        let tail = TextPosition::new(index, offset);
        if tail == cursor {
            cursor_line = lines.len();
        }
        if collapsed && marked(tail) {
            spans.push(Span::styled(" ", reversed));
        }
        lines.push(Line::from(spans));
    }

    BodyView { lines, cursor_line }
}

fn block_prefix(doc: &Document, index: usize, kind: BlockKind, theme: &UiTheme) -> (String, Style) {
    match kind {
        BlockKind::Paragraph => (String::new(), Style::default()),
        BlockKind::Heading(level) => (
            format!("{} ", "#".repeat(level.depth())),
            Style::default().fg(theme.accent_fg).add_modifier(Modifier::BOLD),
        ),
        BlockKind::ListItem(ListKind::Unordered) => ("  • ".to_string(), Style::default()),
        BlockKind::ListItem(ListKind::Ordered) => {
            let first = doc.list_bounds(index).map_or(index, |bounds| bounds.start);
            (format!("  {}. ", index - first + 1), Style::default())
        }
        BlockKind::CodeBlock => ("│ ".to_string(), Style::default().fg(theme.code_fg)),
    }
}

fn inline_style(style: &InlineStyle, theme: &UiTheme) -> Style {
    let mut out = Style::default();
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.underline {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    if let Some(color) = style.highlight.as_deref() {
        let bg = parse_color(color).unwrap_or(ratatui::style::Color::Yellow);
        out = out.bg(bg).fg(contrast_fg(bg));
    }
    if style.link.is_some() {
        out = out.fg(theme.link_fg).add_modifier(Modifier::UNDERLINED);
    }
    out
}

/// 样式相同则接到最后一个正文 span 上；第一个 span 是块前缀，不接正文。
fn push_char(spans: &mut Vec<Span<'static>>, ch: char, style: Style) {
    if let [_, .., last] = spans.as_mut_slice() {
        if last.style == style {
            last.content.to_mut().push(ch);
            return;
        }
    }
    spans.push(Span::styled(ch.to_string(), style));
}

/// 折行后让光标行保持可见的首行。
fn scroll_for_cursor(view: &BodyView, width: u16, height: u16) -> u16 {
    if width == 0 || height == 0 {
        return 0;
    }
    let width = usize::from(width);
    let rows_before: usize = view.lines[..view.cursor_line.min(view.lines.len())]
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    let scroll = rows_before.saturating_sub(usize::from(height) - 1);
    u16::try_from(scroll).unwrap_or(u16::MAX)
}

#[cfg(test)]
#[path = "../../../tests/unit/app/workbench/render.rs"]
mod tests;
