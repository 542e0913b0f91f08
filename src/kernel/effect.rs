use crate::models::ArticleId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ListArticles,
    FetchArticle {
        id: ArticleId,
        generation: u64,
    },
    /// Handed to the persistence gateway, which coalesces per id.
    SchedulePersist {
        id: ArticleId,
        title: String,
        body: String,
    },
    CreateArticle,
    SetCompleted {
        id: ArticleId,
        completed: bool,
    },
}
