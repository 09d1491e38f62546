use serde::{Deserialize, Serialize};

/// Server-side pagination block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// 1-based index range of the rows on this page, `None` when empty
    pub fn row_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 || self.page == 0 {
            return None;
        }
        let start = (u64::from(self.page) - 1) * u64::from(self.limit) + 1;
        let end = (start + u64::from(self.limit) - 1).min(self.total);
        (start <= end).then_some((start, end))
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes() {
        let page: Page<u32> = serde_json::from_str(
            r#"{"data":[1,2],"pagination":{"total":12,"page":2,"limit":10,"totalPages":2}}"#,
        )
        .unwrap();
        assert_eq!(page.data, vec![1, 2]);
        assert!(!page.pagination.has_next());
        assert!(page.pagination.has_previous());
        assert_eq!(page.pagination.row_range(), Some((11, 12)));
    }

    #[test]
    fn test_empty_pagination() {
        let p = Pagination::default();
        assert!(p.row_range().is_none());
        assert!(!p.has_next());
    }
}
