//! HTTP client for the workorder REST resource.
//!
//! All calls are synchronous request/response. Failures carry the request URL
//! but no finer classification — a 4xx, a 5xx, and a refused connection all
//! surface as the same [`ApiError::Request`].

use crate::error::ApiError;
use crate::filters::FilterSet;
use crate::model::Workorder;
use serde::{Deserialize, Serialize};

/// Sort column sent with every list request.
pub const SORT_BY: &str = "createdDate";
/// Sort direction sent with every list request.
pub const SORT_DIR: &str = "desc";

/// One page of a collection response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_pages: usize,
}

/// Parameters of a paginated list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: usize,
    pub size: usize,
    pub filters: FilterSet,
}

impl ListQuery {
    /// Full query-parameter set for this request. Blank filter fields are
    /// omitted entirely.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sortBy", SORT_BY.to_string()),
            ("sortDir", SORT_DIR.to_string()),
        ];
        pairs.extend(self.filters.query_pairs());
        pairs
    }
}

/// Operations on the workorder resource.
///
/// The list controller is generic over this trait so tests substitute an
/// in-memory fake for the HTTP transport.
pub trait WorkorderApi {
    fn list(&self, query: &ListQuery) -> Result<Page<Workorder>, ApiError>;
    fn get(&self, id: &str) -> Result<Workorder, ApiError>;
    fn create(&self, workorder: &Workorder) -> Result<Workorder, ApiError>;
    fn update(&self, id: &str, workorder: &Workorder) -> Result<Workorder, ApiError>;
    fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// [`WorkorderApi`] over HTTP via a shared ureq agent.
#[derive(Debug, Clone)]
pub struct HttpApi {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            agent: ureq::agent(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{id}", self.base_url)
    }

    fn decode<T: serde::de::DeserializeOwned>(
        url: &str,
        response: ureq::Response,
    ) -> Result<T, ApiError> {
        response.into_json::<T>().map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn request_err(url: &str, source: ureq::Error) -> ApiError {
        ApiError::Request {
            url: url.to_string(),
            source: Box::new(source),
        }
    }
}

impl WorkorderApi for HttpApi {
    fn list(&self, query: &ListQuery) -> Result<Page<Workorder>, ApiError> {
        let url = self.base_url.clone();
        let mut request = self.agent.get(&url);
        for (key, value) in query.query_pairs() {
            request = request.query(key, &value);
        }
        let response = request.call().map_err(|e| Self::request_err(&url, e))?;
        Self::decode(&url, response)
    }

    fn get(&self, id: &str) -> Result<Workorder, ApiError> {
        let url = self.item_url(id);
        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| Self::request_err(&url, e))?;
        Self::decode(&url, response)
    }

    fn create(&self, workorder: &Workorder) -> Result<Workorder, ApiError> {
        let url = self.base_url.clone();
        let response = self
            .agent
            .post(&url)
            .send_json(workorder)
            .map_err(|e| Self::request_err(&url, e))?;
        Self::decode(&url, response)
    }

    fn update(&self, id: &str, workorder: &Workorder) -> Result<Workorder, ApiError> {
        let url = self.item_url(id);
        let response = self
            .agent
            .put(&url)
            .send_json(workorder)
            .map_err(|e| Self::request_err(&url, e))?;
        Self::decode(&url, response)
    }

    fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.item_url(id);
        self.agent
            .delete(&url)
            .call()
            .map_err(|e| Self::request_err(&url, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Status};

    #[test]
    fn query_pairs_carry_fixed_sort_order() {
        let query = ListQuery {
            page: 2,
            size: 20,
            filters: FilterSet::default(),
        };
        assert_eq!(
            query.query_pairs(),
            vec![
                ("page", "2".to_string()),
                ("size", "20".to_string()),
                ("sortBy", "createdDate".to_string()),
                ("sortDir", "desc".to_string()),
            ]
        );
    }

    #[test]
    fn query_pairs_append_only_active_filters() {
        let query = ListQuery {
            page: 0,
            size: 10,
            filters: FilterSet {
                title: String::new(),
                status: Some(Status::Done),
                priority: Some(Priority::Low),
            },
        };
        let pairs = query.query_pairs();
        assert!(!pairs.iter().any(|(k, _)| *k == "title"));
        assert!(pairs.contains(&("status", "DONE".to_string())));
        assert!(pairs.contains(&("priority", "LOW".to_string())));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpApi::new("http://localhost:8082/restoam/workorders/");
        assert_eq!(
            api.item_url("wo-1"),
            "http://localhost:8082/restoam/workorders/wo-1"
        );
    }

    #[test]
    fn page_envelope_deserializes_with_defaults() {
        let page: Page<Workorder> = serde_json::from_str("{}").expect("deserialize");
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn page_envelope_deserializes_camel_case() {
        let raw = r#"{"content": [{"title": "t"}], "totalPages": 7}"#;
        let page: Page<Workorder> = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_pages, 7);
    }
}
