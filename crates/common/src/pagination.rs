//! Page/per-page parameters accepted by list endpoints.

use serde::Deserialize;

pub const MAX_PER_PAGE: u32 = 100;

/// Query-string pagination (`?page=2&perPage=50`). Both fields are optional.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Zero-based page index and page size, clamped to `1..=MAX_PER_PAGE`.
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        (u64::from(page - 1), u64::from(per_page))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_zero_is_first_page() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!((idx, per), (0, 1));
    }

    #[test]
    fn per_page_is_capped() {
        let (idx, per) = Pagination { page: 3, per_page: 5000 }.normalize();
        assert_eq!((idx, per), (2, u64::from(MAX_PER_PAGE)));
    }

    #[test]
    fn missing_query_fields_use_defaults() {
        let p: Pagination = serde_json::from_str(r#"{"perPage": 7}"#).unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 7);
    }
}
