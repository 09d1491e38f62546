//! List query parameters for paged endpoints

use std::fmt;
use std::str::FromStr;

use super::model::Pagination;

pub const DEFAULT_LIMIT: u32 = 10;

/// Creation-date ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest to newest
    Asc,
    /// Newest to oldest
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "oldest" => Ok(SortOrder::Asc),
            "desc" | "newest" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}' (expected asc or desc)", other)),
        }
    }
}

/// Paging, search, sort and status filter for a list endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub sort: SortOrder,
    /// Tab filter, e.g. `all`, `active`, `pending`; sent as given
    pub status: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            search: None,
            sort: SortOrder::default(),
            status: None,
        }
    }
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            ..Default::default()
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.trim().is_empty()).then_some(search);
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Query string pairs in the order the backend documents them
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("page".to_string(), self.page.to_string()),
        ];
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        params.push(("sort".to_string(), self.sort.to_string()));
        if let Some(status) = &self.status {
            params.push(("status".to_string(), status.clone()));
        }
        params
    }

    /// Query for the following page, `None` on the last page
    pub fn next(&self, pagination: &Pagination) -> Option<Self> {
        (self.page < pagination.total_pages).then(|| Self {
            page: self.page + 1,
            ..self.clone()
        })
    }

    /// Query for the preceding page, `None` on the first page
    pub fn previous(&self) -> Option<Self> {
        (self.page > 1).then(|| Self {
            page: self.page - 1,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = ListQuery::default().to_params();
        assert_eq!(
            params,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("page".to_string(), "1".to_string()),
                ("sort".to_string(), "desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_params() {
        let params = ListQuery::new(3, 25)
            .search("chidi")
            .sort(SortOrder::Asc)
            .status("active")
            .to_params();
        assert!(params.contains(&("search".to_string(), "chidi".to_string())));
        assert!(params.contains(&("sort".to_string(), "asc".to_string())));
        assert!(params.contains(&("status".to_string(), "active".to_string())));
        assert!(params.contains(&("page".to_string(), "3".to_string())));
    }

    #[test]
    fn test_blank_search_is_dropped() {
        assert!(ListQuery::default().search("   ").search.is_none());
    }

    #[test]
    fn test_page_navigation_is_bounded() {
        let pagination = Pagination {
            total: 25,
            page: 2,
            limit: 10,
            total_pages: 3,
        };
        let query = ListQuery::new(2, 10);
        assert_eq!(query.next(&pagination).unwrap().page, 3);
        assert_eq!(query.previous().unwrap().page, 1);
        assert!(ListQuery::new(3, 10).next(&pagination).is_none());
        assert!(ListQuery::new(1, 10).previous().is_none());
        assert_eq!(ListQuery::new(0, 0), ListQuery::new(1, 1));
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("newest".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("up".parse::<SortOrder>().is_err());
    }
}
