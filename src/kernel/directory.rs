//! Cached listing of the articles the store holds, in backend order.

use crate::models::{Article, ArticleId};

#[derive(Debug, Clone, Default)]
pub struct ArticleDirectory {
    articles: Vec<Article>,
    /// Set once the first listing (or listing failure) arrives.
    pub loaded: bool,
    pub load_error: Option<String>,
    /// A create request is in flight.
    pub creating: bool,
}

impl ArticleDirectory {
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|article| article.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.articles.iter().position(|article| article.id == id)
    }

    pub fn first_id(&self) -> Option<&ArticleId> {
        self.articles.first().map(|article| &article.id)
    }

    pub fn replace_all(&mut self, articles: Vec<Article>) {
        self.articles = articles;
        self.loaded = true;
        self.load_error = None;
    }

    pub fn set_load_error(&mut self, error: String) {
        self.loaded = true;
        self.load_error = Some(error);
    }

    /// Appends `article`, or replaces the entry with the same id.
    pub fn append(&mut self, article: Article) {
        match self.position(&article.id) {
            Some(index) => self.articles[index] = article,
            None => self.articles.push(article),
        }
    }

    /// Flips the completed flag and returns the new value.
    pub fn toggle_completed(&mut self, id: &str) -> Option<bool> {
        let article = self.articles.iter_mut().find(|article| article.id == id)?;
        article.completed = !article.completed;
        Some(article.completed)
    }

    pub fn set_completed(&mut self, id: &str, completed: bool) -> bool {
        match self.articles.iter_mut().find(|article| article.id == id) {
            Some(article) if article.completed != completed => {
                article.completed = completed;
                true
            }
            _ => false,
        }
    }

    /// Mirrors local edits into the listing entry so the sidebar stays current.
    pub fn update_content(&mut self, id: &str, title: &str, body: &str) -> bool {
        let Some(article) = self.articles.iter_mut().find(|article| article.id == id) else {
            return false;
        };
        if article.title == title && article.body == body {
            return false;
        }
        article.title = title.to_string();
        article.body = body.to_string();
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/directory.rs"]
mod tests;
