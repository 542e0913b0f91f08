use chrono::{DateTime, Local};

use crate::kernel::format::{EditCommand, FormatCommand};
use crate::kernel::state::{FocusTarget, LoadError};
use crate::models::{Article, ArticleId, Selection};

#[derive(Debug, Clone)]
pub enum Action {
    SetTitle(String),
    /// Replaces the body with raw markup.
    SetBody(String),
    SelectArticle(ArticleId),
    ToggleDarkMode,
    ToggleSidebar,
    Format(FormatCommand),
    Edit(EditCommand),
    SetSelection(Selection),
    FocusNext,
    Focus(FocusTarget),
    SidebarMove(isize),
    SidebarActivate,
    CreateArticle,
    ToggleCompleted(ArticleId),
    OpenLinkPrompt,
    LinkPromptInput(char),
    /// Replaces the whole url, as a paste does.
    LinkPromptSet(String),
    LinkPromptBackspace,
    LinkPromptSubmit,
    LinkPromptCancel,
    DismissNotice,
    Quit,

    ArticlesLoaded(Vec<Article>),
    ArticlesLoadFailed(String),
    ArticleLoaded {
        id: ArticleId,
        generation: u64,
        article: Article,
    },
    ArticleLoadFailed {
        id: ArticleId,
        generation: u64,
        error: LoadError,
    },
    ArticleCreated(Article),
    CreateArticleFailed(String),
    CompletedSaved {
        id: ArticleId,
        completed: bool,
        success: bool,
    },
    SaveStarted {
        id: ArticleId,
    },
    SaveFinished {
        id: ArticleId,
        saved_at: Option<DateTime<Local>>,
    },
}
