//! REST client for a remote document store.
//!
//! Routes: `GET /documents/{id}`, `GET /documents?type=`, `POST /documents`,
//! `PATCH /documents/{id}`. Bodies use the article wire shape (`content` for
//! the body field).

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::kernel::services::ports::{
    DocumentPatch, DocumentStore, NewDocument, StoreError, StoreResult,
};
use crate::models::Article;

/// Path segment escaping: everything but unreserved characters.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub struct HttpDocumentStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpDocumentStore {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> StoreResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| StoreError::Http(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|token| !token.trim().is_empty()),
        })
    }

    pub(crate) fn document_url(&self, id: &str) -> String {
        format!(
            "{}/documents/{}",
            self.base_url,
            utf8_percent_encode(id, SEGMENT)
        )
    }

    pub(crate) fn collection_url(&self) -> String {
        format!("{}/documents", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> StoreResult<Response> {
        self.authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))
    }
}

async fn check_status(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> StoreResult<T> {
    response
        .json()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn get_document(&self, id: &str) -> StoreResult<Option<Article>> {
        let response = self.send(self.client.get(self.document_url(id))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response).await?;
        decode(response).await.map(Some)
    }

    async fn query(&self, doc_type: &str) -> StoreResult<Vec<Article>> {
        let request = self
            .client
            .get(self.collection_url())
            .query(&[("type", doc_type)]);
        let response = check_status(self.send(request).await?).await?;
        decode(response).await
    }

    async fn create_document(&self, doc: NewDocument) -> StoreResult<Article> {
        let request = self.client.post(self.collection_url()).json(&doc);
        let response = check_status(self.send(request).await?).await?;
        decode(response).await
    }

    async fn patch_document(&self, id: &str, patch: DocumentPatch) -> StoreResult<()> {
        let request = self.client.patch(self.document_url(id)).json(&patch);
        let response = self.send(request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/store/http.rs"]
mod tests;
