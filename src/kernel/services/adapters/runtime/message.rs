use chrono::{DateTime, Local};

use crate::kernel::state::LoadError;
use crate::models::{Article, ArticleId};

/// Results of store calls, posted back to the UI thread.
#[derive(Debug)]
pub enum AppMessage {
    ArticlesListed(Vec<Article>),
    ArticlesListFailed {
        error: String,
    },
    ArticleFetched {
        id: ArticleId,
        generation: u64,
        result: Result<Article, LoadError>,
    },
    ArticleCreated(Article),
    CreateFailed {
        error: String,
    },
    /// `saved_at` is `None` when every retry failed.
    SaveFinished {
        id: ArticleId,
        saved_at: Option<DateTime<Local>>,
    },
    CompletedSaved {
        id: ArticleId,
        completed: bool,
        success: bool,
    },
}
