pub mod client_dto;
pub mod quotation_dto;
pub mod settings_dto;
pub mod report_dto;

use serde::{Deserialize, Serialize};

/// Query parameters shared by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
    /// Free-text search.
    pub q: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(20).clamp(1, 100)
    }
}

/// Envelope for paginated list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query = ListQuery {
            page: None,
            page_size: None,
            q: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), 20);
    }

    #[test]
    fn test_list_query_clamps() {
        let query = ListQuery {
            page: Some(0),
            page_size: Some(100_000),
            q: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), 100);
    }
}
