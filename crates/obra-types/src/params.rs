use std::collections::BTreeMap;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Query parameters accepted by every list endpoint. Built from the raw
/// query-pair map so the typed controls and the open-ended per-field
/// filters can share one query string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListParams {
    pub id: Option<i64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub asc: Option<bool>,
    pub filters: BTreeMap<String, String>,
}

impl ListParams {
    pub fn from_pairs(pairs: BTreeMap<String, String>) -> Self {
        let mut params = ListParams::default();
        for (key, value) in pairs {
            match key.as_str() {
                "id" => params.id = value.parse().ok(),
                "page" => params.page = value.parse().ok(),
                "limit" => params.limit = value.parse().ok(),
                "sort_by" => params.sort_by = Some(value),
                "asc" => params.asc = value.parse().ok(),
                _ => {
                    if !value.is_empty() {
                        params.filters.insert(key, value);
                    }
                }
            }
        }
        params
    }

    pub fn page_or_default(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    pub fn limit_or_default(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).max(1)
    }

    pub fn offset(&self) -> usize {
        // Widened before multiplying; u32 arithmetic overflows on
        // hostile page numbers.
        (self.page_or_default() as usize - 1).saturating_mul(self.limit_or_default() as usize)
    }

    /// True when the caller asked for paging, sorting, or filtering, i.e.
    /// anything beyond the plain full listing.
    pub fn is_scoped(&self) -> bool {
        self.page.is_some()
            || self.limit.is_some()
            || self.sort_by.is_some()
            || self.asc.is_some()
            || !self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn splits_typed_controls_from_filters() {
        let params = ListParams::from_pairs(pairs(&[
            ("page", "3"),
            ("limit", "25"),
            ("sort_by", "code"),
            ("asc", "false"),
            ("code", "%PRJ%"),
            ("title", "bridge"),
        ]));
        assert_eq!(params.page, Some(3));
        assert_eq!(params.limit, Some(25));
        assert_eq!(params.sort_by.as_deref(), Some("code"));
        assert_eq!(params.asc, Some(false));
        assert_eq!(params.filters.get("code").map(String::as_str), Some("%PRJ%"));
        assert_eq!(params.filters.get("title").map(String::as_str), Some("bridge"));
        assert!(params.is_scoped());
    }

    #[test]
    fn empty_filter_values_are_dropped() {
        let params = ListParams::from_pairs(pairs(&[("code", "")]));
        assert!(params.filters.is_empty());
        assert!(!params.is_scoped());
    }

    #[test]
    fn bare_query_is_unscoped_with_defaults() {
        let params = ListParams::from_pairs(BTreeMap::new());
        assert!(!params.is_scoped());
        assert_eq!(params.page_or_default(), DEFAULT_PAGE);
        assert_eq!(params.limit_or_default(), DEFAULT_LIMIT);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn unparsable_numbers_fall_back_to_defaults() {
        let params = ListParams::from_pairs(pairs(&[("page", "x"), ("limit", "-2")]));
        assert_eq!(params.page, None);
        assert_eq!(params.limit, None);
        assert_eq!(params.page_or_default(), 1);
    }

    #[test]
    fn offset_advances_by_whole_pages() {
        let params = ListParams::from_pairs(pairs(&[("page", "4"), ("limit", "10")]));
        assert_eq!(params.offset(), 30);
    }

    #[test]
    fn offset_survives_a_hostile_page_number() {
        let params = ListParams::from_pairs(pairs(&[("page", "4294967295"), ("limit", "50")]));
        assert_eq!(params.offset(), (u32::MAX as usize - 1) * 50);
    }
}
