use serde::{Deserialize, Serialize};

/// The body returned by the API when a request is rejected.
///
/// The API is not consistent about the field name, so both `message` and
/// `error` are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorDto {
    /// The server's rejection reason, if the body carried one.
    pub fn reason(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .filter(|m| !m.trim().is_empty())
    }
}

/// A page of results as returned by the paginated `getAll` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u32>,
}

/// `getAll` responses come back either as a bare array or as a page object
/// depending on the resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paged(PageDto<T>),
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Paged(page) => page.items,
            Self::Plain(items) => items,
        }
    }

    pub fn total_pages(&self) -> u32 {
        match self {
            Self::Paged(page) => page.total_pages.unwrap_or(1).max(1),
            Self::Plain(_) => 1,
        }
    }
}

/// Body of `POST /notifications/subscribe`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub token: String,
    pub topic: String,
}
