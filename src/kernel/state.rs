use chrono::{DateTime, Local};

use crate::kernel::directory::ArticleDirectory;
use crate::kernel::progress;
use crate::kernel::services::ports::Settings;
use crate::models::markup;
use crate::models::{Article, ArticleId, Document, Selection, TextPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Sidebar,
    Title,
    Body,
}

impl FocusTarget {
    pub fn next(self, sidebar_visible: bool) -> Self {
        match self {
            FocusTarget::Sidebar => FocusTarget::Title,
            FocusTarget::Title => FocusTarget::Body,
            FocusTarget::Body if sidebar_visible => FocusTarget::Sidebar,
            FocusTarget::Body => FocusTarget::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saving,
    SavedAt(DateTime<Local>),
}

impl SaveStatus {
    pub fn label(&self) -> String {
        match self {
            SaveStatus::Idle => "Not saved yet".to_string(),
            SaveStatus::Saving => "Saving...".to_string(),
            SaveStatus::SavedAt(at) => format!("Saved at {}", at.format("%H:%M:%S")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    NotFound(ArticleId),
    Unavailable(String),
}

impl LoadError {
    pub fn message(&self) -> String {
        match self {
            LoadError::NotFound(id) => format!("Article {id} was not found"),
            LoadError::Unavailable(reason) => format!("Could not load article: {reason}"),
        }
    }
}

/// The article open in the editor and its pending local values.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub selected_article_id: Option<ArticleId>,
    /// Bumped on every selection; fetch results carry the value they were issued with.
    pub fetch_generation: u64,
    /// A fetch for the selected article is outstanding; edits are ignored meanwhile.
    pub loading: bool,
    pub title: String,
    pub document: Document,
    /// Markup of `document`, as persisted.
    pub body: String,
    pub selection: Selection,
    pub save_status: SaveStatus,
    pub last_saved: Option<DateTime<Local>>,
    pub saves_in_flight: usize,
    pub load_error: Option<LoadError>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self {
            selected_article_id: None,
            fetch_generation: 0,
            loading: false,
            title: String::new(),
            document: Document::default(),
            body: String::new(),
            selection: Selection::caret(TextPosition::default()),
            save_status: SaveStatus::Idle,
            last_saved: None,
            saves_in_flight: 0,
            load_error: None,
        }
    }
}

impl EditorSession {
    /// Replaces pending values with `article`'s. The body is kept verbatim so an
    /// untouched article is never rewritten in canonical form.
    pub fn fill_from(&mut self, article: &Article) {
        self.title = article.title.clone();
        self.body = article.body.clone();
        self.document = markup::parse(&article.body);
        self.selection = Selection::caret(TextPosition::default());
    }

    pub fn clear_content(&mut self) {
        self.title.clear();
        self.body.clear();
        self.document = Document::default();
        self.selection = Selection::caret(TextPosition::default());
    }

    pub fn can_edit(&self) -> bool {
        self.selected_article_id.is_some() && !self.loading && self.load_error.is_none()
    }

    /// Re-renders `body` from `document`.
    pub fn sync_body(&mut self) {
        self.body = markup::render(&self.document);
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub dark_mode: bool,
    pub sidebar_visible: bool,
    pub focus: FocusTarget,
    /// Highlighted row in the sidebar list.
    pub sidebar_cursor: usize,
    /// Url being typed for an `InsertLink`; `Some` while the prompt is open.
    pub link_prompt: Option<String>,
    /// Transient non-modal message shown in the status line.
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            dark_mode: false,
            sidebar_visible: true,
            focus: FocusTarget::Body,
            sidebar_cursor: 0,
            link_prompt: None,
            notice: None,
            should_quit: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub directory: ArticleDirectory,
    pub session: EditorSession,
    pub ui: UiState,
    pub goal: u64,
    pub highlight_color: String,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            directory: ArticleDirectory::default(),
            session: EditorSession::default(),
            ui: UiState {
                dark_mode: settings.dark_mode,
                ..UiState::default()
            },
            goal: settings.goal,
            highlight_color: settings.highlight_color.clone(),
        }
    }

    pub fn word_count(&self) -> usize {
        progress::word_count(&self.session.body)
    }

    pub fn progress(&self) -> f64 {
        progress::progress(self.word_count(), self.goal)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
