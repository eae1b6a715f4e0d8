//! State behind the record tables: which page is showing, how it is
//! sorted, which filters are committed, and which dialog is open. The
//! widgets in `components::record_table` render this; everything here
//! is plain data so it can be tested without a browser.

use std::collections::BTreeMap;

use leptos::prelude::{AnyView, Callback};
use obra_types::Record;

pub const DEFAULT_PAGE_SIZE: u32 = 9;
pub const PAGE_SIZE_CHOICES: [u32; 4] = [9, 10, 20, 50];
pub const FILTER_DEBOUNCE_MS: u64 = 500;

/// How a column formats, sorts and filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Number,
    Flag,
    Time,
}

/// One column of a record table.
#[derive(Clone)]
pub struct FieldDef<T: 'static> {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Query key the filter input submits under. No key, no input.
    pub filter_key: Option<&'static str>,
    /// Query key sent as `sort_by` when it differs from `key`.
    pub sort_key: Option<&'static str>,
    /// CSS width hint for the column, e.g. "70px".
    pub width: Option<&'static str>,
    /// Pins the column while the table scrolls horizontally.
    pub fixed: bool,
    /// Custom cell renderer; the default prints the record field.
    pub view: Option<Callback<T, AnyView>>,
}

impl<T> FieldDef<T> {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            filter_key: None,
            sort_key: None,
            width: None,
            fixed: false,
            view: None,
        }
    }

    pub fn filterable(mut self, key: &'static str) -> Self {
        self.filter_key = Some(key);
        self
    }

    pub fn sorted_as(mut self, key: &'static str) -> Self {
        self.sort_key = Some(key);
        self
    }

    pub fn width(mut self, width: &'static str) -> Self {
        self.width = Some(width);
        self
    }

    pub fn pinned(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn with_view(mut self, view: Callback<T, AnyView>) -> Self {
        self.view = Some(view);
        self
    }

    /// Booleans render as check marks and cannot be ordered.
    pub fn sortable(&self) -> bool {
        self.kind != FieldKind::Flag
    }

    pub fn wire_sort_key(&self) -> &'static str {
        self.sort_key.unwrap_or(self.key)
    }

    /// Key for the header filter input, only on text columns that
    /// declared one.
    pub fn filter_input_key(&self) -> Option<&'static str> {
        if self.kind == FieldKind::Text {
            self.filter_key
        } else {
            None
        }
    }
}

/// Which modal is open over the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialogMode {
    #[default]
    None,
    Create,
    Update,
    Delete,
    Read,
}

/// A keystroke in a filter input waiting out the debounce window.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingFilter {
    pub generation: u64,
    pub key: String,
    pub raw: String,
}

/// Latest-wins debounce slot shared by every filter input. [`arm`] hands
/// out a ticket per keystroke and stages the raw value; when a timer
/// fires, [`settle`] releases the staged edit only to the newest ticket,
/// so edits typed inside the window supersede earlier ones.
///
/// [`arm`]: FilterDebounce::arm
/// [`settle`]: FilterDebounce::settle
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterDebounce {
    pending: Option<PendingFilter>,
    serial: u64,
}

impl FilterDebounce {
    pub fn arm(&mut self, key: &str, raw: &str) -> u64 {
        self.serial += 1;
        self.pending = Some(PendingFilter {
            generation: self.serial,
            key: key.to_string(),
            raw: raw.to_string(),
        });
        self.serial
    }

    pub fn settle(&mut self, ticket: u64) -> Option<PendingFilter> {
        match &self.pending {
            Some(pending) if pending.generation == ticket => self.pending.take(),
            _ => None,
        }
    }
}

/// The table fetches only while no dialog is up; a refresh underneath an
/// open dialog would clobber the rows the dialog is editing against.
pub fn fetch_suppressed(mode: DialogMode) -> bool {
    mode != DialogMode::None
}

/// The server-facing query a table is currently showing.
#[derive(Clone, Debug, PartialEq)]
pub struct TableQuery {
    pub page: u32,
    pub limit: u32,
    /// Last column the user sorted by; `created_at` when untouched.
    pub sort_key: Option<String>,
    /// Explicit direction. When unset no `asc` parameter is sent and
    /// the server falls back to ascending.
    pub ascending: Option<bool>,
    /// Committed filters keyed by the wire key, wildcards included.
    pub filters: BTreeMap<String, String>,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            sort_key: None,
            ascending: None,
            filters: BTreeMap::new(),
        }
    }
}

fn upsert(params: &mut Vec<(String, String)>, key: &str, value: String) {
    match params.iter_mut().find(|(k, _)| k == key) {
        Some(slot) => slot.1 = value,
        None => params.push((key.to_string(), value)),
    }
}

impl TableQuery {
    /// Builds the query pairs for a fetch: page, limit and sort_by are
    /// always present, `asc` only once a direction was chosen, then the
    /// caller's fixed params and the non-empty filters.
    pub fn request_params(&self, extra: &[(String, String)]) -> Vec<(String, String)> {
        let sort_by = match self.sort_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => "created_at".to_string(),
        };

        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("sort_by".to_string(), sort_by),
        ];

        for (key, value) in extra {
            upsert(&mut params, key, value.clone());
        }

        if let Some(ascending) = self.ascending {
            upsert(&mut params, "asc", ascending.to_string());
        }

        for (key, value) in &self.filters {
            if !value.is_empty() {
                upsert(&mut params, key, value.clone());
            }
        }

        params
    }

    /// Header click: a new column starts ascending, clicking the same
    /// column again flips to descending, a third click drops the
    /// direction but keeps the column.
    pub fn cycle_sort(&mut self, key: &str) {
        if self.sort_key.as_deref() != Some(key) {
            self.sort_key = Some(key.to_string());
            self.ascending = Some(true);
            return;
        }
        self.ascending = match self.ascending {
            Some(true) => Some(false),
            Some(false) => None,
            None => Some(true),
        };
    }

    /// Commits a filter value once the debounce settles. `*` is the
    /// user-facing wildcard and becomes SQL-style `%`. Returns false
    /// when nothing changed; a real change rewinds to the first page.
    pub fn commit_filter(&mut self, key: &str, raw: &str) -> bool {
        let clean = raw.trim().replace('*', "%");
        if self.filters.get(key).map(String::as_str).unwrap_or("") == clean {
            return false;
        }
        self.filters.insert(key.to_string(), clean);
        self.page = 1;
        true
    }

    /// What the filter input should display for a committed value.
    pub fn display_filter(&self, key: &str) -> String {
        self.filters
            .get(key)
            .map(|value| value.replace('%', "*"))
            .unwrap_or_default()
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    pub fn page_count(&self, total: u64) -> u32 {
        let limit = u64::from(self.limit.max(1));
        (total.div_ceil(limit) as u32).max(1)
    }

    /// Folds the pagination echoed by the server back into the query.
    /// Returns true when it moved, so the caller can decide whether a
    /// refetch is due.
    pub fn absorb(&mut self, page: u32, limit: u32) -> bool {
        let page = page.max(1);
        let limit = limit.max(1);
        if self.page == page && self.limit == limit {
            return false;
        }
        self.page = page;
        self.limit = limit;
        true
    }
}

/// Applies a dialog outcome to the rows on screen without refetching,
/// mirroring what the server just did.
pub fn reconcile_rows<T: Record>(rows: &mut Vec<T>, mode: DialogMode, outcome: Option<T>) {
    let Some(record) = outcome else {
        return;
    };
    match mode {
        DialogMode::Delete => rows.retain(|row| row.id() != record.id()),
        DialogMode::Update => {
            for row in rows.iter_mut() {
                if row.id() == record.id() {
                    *row = record.clone();
                }
            }
        }
        DialogMode::Create => {
            rows.retain(|row| row.id().is_some());
            rows.push(record);
        }
        DialogMode::Read | DialogMode::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obra_types::Unit;
    use rstest::rstest;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn default_request_always_carries_page_limit_and_sort() {
        let query = TableQuery::default();
        assert_eq!(
            query.request_params(&[]),
            vec![
                pair("page", "1"),
                pair("limit", "9"),
                pair("sort_by", "created_at"),
            ]
        );
    }

    #[test]
    fn asc_joins_the_request_only_once_a_direction_is_set() {
        let mut query = TableQuery::default();
        query.cycle_sort("name");
        let params = query.request_params(&[]);
        assert!(params.contains(&pair("sort_by", "name")));
        assert!(params.contains(&pair("asc", "true")));

        query.cycle_sort("name");
        assert!(query.request_params(&[]).contains(&pair("asc", "false")));

        // Third click keeps the column but drops the direction.
        query.cycle_sort("name");
        let params = query.request_params(&[]);
        assert!(params.contains(&pair("sort_by", "name")));
        assert!(!params.iter().any(|(k, _)| k == "asc"));
    }

    #[test]
    fn switching_columns_restarts_ascending() {
        let mut query = TableQuery::default();
        query.cycle_sort("name");
        query.cycle_sort("name");
        assert_eq!(query.ascending, Some(false));

        query.cycle_sort("code");
        assert_eq!(query.sort_key.as_deref(), Some("code"));
        assert_eq!(query.ascending, Some(true));
    }

    #[test]
    fn fixed_params_override_the_defaults_and_filters_come_last() {
        let mut query = TableQuery::default();
        query.commit_filter("title", "ring");
        let params = query.request_params(&[pair("limit", "50")]);
        assert_eq!(
            params,
            vec![
                pair("page", "1"),
                pair("limit", "50"),
                pair("sort_by", "created_at"),
                pair("title", "ring"),
            ]
        );
    }

    #[test]
    fn committing_a_filter_maps_wildcards_and_rewinds_the_page() {
        let mut query = TableQuery::default();
        query.set_page(4);

        assert!(query.commit_filter("code", " PRJ*01 "));
        assert_eq!(query.filters["code"], "PRJ%01");
        assert_eq!(query.page, 1);

        // Same committed value again is a no-op and keeps the page.
        query.set_page(3);
        assert!(!query.commit_filter("code", "PRJ*01"));
        assert_eq!(query.page, 3);
    }

    #[test]
    fn display_filter_shows_wildcards_the_way_they_were_typed() {
        let mut query = TableQuery::default();
        query.commit_filter("code", "PRJ*");
        assert_eq!(query.display_filter("code"), "PRJ*");
        assert_eq!(query.display_filter("title"), "");
    }

    #[test]
    fn plain_filter_values_pass_through_untouched() {
        // The server wraps text matches itself; only `*` needs mapping.
        let mut query = TableQuery::default();
        query.commit_filter("title", "road");
        assert_eq!(query.filters["title"], "road");
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(9, 1)]
    #[case(10, 2)]
    #[case(45, 5)]
    #[case(46, 6)]
    fn page_count_rounds_up_and_never_hits_zero(#[case] total: u64, #[case] pages: u32) {
        let query = TableQuery::default();
        assert_eq!(query.page_count(total), pages);
    }

    #[test]
    fn absorb_reports_whether_the_server_moved_the_window() {
        let mut query = TableQuery::default();
        assert!(!query.absorb(1, 9));
        assert!(query.absorb(2, 10));
        assert_eq!((query.page, query.limit), (2, 10));
    }

    fn unit(id: i64, name: &str) -> Unit {
        Unit {
            id: Some(id),
            name: name.to_string(),
            ..Unit::default()
        }
    }

    #[test]
    fn debounce_applies_only_the_latest_edit() {
        let mut debounce = FilterDebounce::default();
        let first = debounce.arm("title", "r");
        let second = debounce.arm("title", "ri");
        let last = debounce.arm("code", "PRJ*");

        // Stale timers fire in order and claim nothing.
        assert_eq!(debounce.settle(first), None);
        assert_eq!(debounce.settle(second), None);

        let settled = debounce.settle(last).unwrap();
        assert_eq!(settled.key, "code");
        assert_eq!(settled.raw, "PRJ*");
        // The slot is spent; a duplicate timer is a no-op.
        assert_eq!(debounce.settle(last), None);
    }

    #[test]
    fn settled_edit_commits_with_a_page_rewind() {
        let mut query = TableQuery::default();
        query.set_page(5);

        let mut debounce = FilterDebounce::default();
        debounce.arm("title", "bridge");
        let ticket = debounce.arm("title", "road*");

        let pending = debounce.settle(ticket).unwrap();
        assert!(query.commit_filter(&pending.key, &pending.raw));
        assert_eq!(query.filters["title"], "road%");
        assert_eq!(query.page, 1);
    }

    #[rstest]
    #[case(DialogMode::None, false)]
    #[case(DialogMode::Create, true)]
    #[case(DialogMode::Read, true)]
    #[case(DialogMode::Update, true)]
    #[case(DialogMode::Delete, true)]
    fn fetches_pause_whenever_a_dialog_is_up(
        #[case] mode: DialogMode,
        #[case] suppressed: bool,
    ) {
        assert_eq!(fetch_suppressed(mode), suppressed);
    }

    #[test]
    fn delete_outcome_drops_the_row() {
        let mut rows = vec![unit(1, "meter"), unit(2, "hour")];
        reconcile_rows(&mut rows, DialogMode::Delete, Some(unit(1, "meter")));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, Some(2));
    }

    #[test]
    fn update_outcome_replaces_the_row_in_place() {
        let mut rows = vec![unit(1, "meter"), unit(2, "hour")];
        reconcile_rows(&mut rows, DialogMode::Update, Some(unit(1, "metre")));
        assert_eq!(rows[0].name, "metre");
        assert_eq!(rows[1].name, "hour");
    }

    #[test]
    fn create_outcome_appends_and_sweeps_unsaved_rows() {
        let mut rows = vec![unit(1, "meter"), Unit::default()];
        reconcile_rows(&mut rows, DialogMode::Create, Some(unit(7, "litre")));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id, Some(7));
    }

    #[test]
    fn closing_without_a_record_changes_nothing() {
        let mut rows = vec![unit(1, "meter")];
        reconcile_rows(&mut rows, DialogMode::Delete, None);
        assert_eq!(rows.len(), 1);
    }
}
