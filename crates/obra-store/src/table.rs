use chrono::Utc;
use std::sync::RwLock;
use thiserror::Error;
use tracing::debug;

use obra_types::{ListParams, Pagination, Record};

use crate::query::{matches_filters, sort_rows};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },
    #[error("ID is mandatory")]
    MissingId,
}

/// One in-memory resource table. Rows keep insertion order; ids grow
/// monotonically and are never reused, so a delete then create cannot
/// resurrect a stale reference.
pub struct Table<T: Record> {
    inner: RwLock<Inner<T>>,
}

struct Inner<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Table<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Inserts a record, assigning its id and both audit stamps. Whatever
    /// id or stamps came over the wire are discarded.
    pub fn create(&self, mut record: T) -> T {
        let mut inner = self.inner.write().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        record.set_id(id);
        let now = Utc::now();
        record.stamp(Some(now), Some(now));
        inner.rows.push(record.clone());
        debug!(resource = T::RESOURCE, id, "row created");
        record
    }

    pub fn get(&self, id: i64) -> Option<T> {
        let inner = self.inner.read().unwrap();
        inner.rows.iter().find(|r| r.id() == Some(id)).cloned()
    }

    /// First row satisfying the predicate, in insertion order.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let inner = self.inner.read().unwrap();
        inner.rows.iter().find(|r| predicate(r)).cloned()
    }

    /// Replaces the stored row with the incoming record. The original
    /// `created_at` survives, `updated_at` is refreshed, and fields the
    /// wire form does not carry are merged back from the stored row.
    pub fn update(&self, mut record: T) -> Result<T, StoreError> {
        let Some(id) = record.id() else {
            return Err(StoreError::MissingId);
        };
        let mut inner = self.inner.write().unwrap();
        let Some(slot) = inner.rows.iter_mut().find(|r| r.id() == Some(id)) else {
            return Err(StoreError::NotFound {
                resource: T::RESOURCE,
                id,
            });
        };
        record.merge_existing(slot);
        record.stamp(slot.created_at(), Some(Utc::now()));
        *slot = record.clone();
        debug!(resource = T::RESOURCE, id, "row updated");
        Ok(record)
    }

    /// Removes a row and hands it back, mirroring `DELETE ... RETURNING *`.
    pub fn delete(&self, id: i64) -> Result<T, StoreError> {
        let mut inner = self.inner.write().unwrap();
        let Some(pos) = inner.rows.iter().position(|r| r.id() == Some(id)) else {
            return Err(StoreError::NotFound {
                resource: T::RESOURCE,
                id,
            });
        };
        debug!(resource = T::RESOURCE, id, "row deleted");
        Ok(inner.rows.remove(pos))
    }

    /// Filtered, sorted, paged view plus the pagination block describing it.
    /// `records` counts every row matching the filters, not just the page.
    pub fn list(&self, params: &ListParams) -> (Vec<T>, Pagination) {
        let inner = self.inner.read().unwrap();
        let mut rows: Vec<T> = inner
            .rows
            .iter()
            .filter(|r| matches_filters(*r, &params.filters))
            .cloned()
            .collect();
        if let Some(sort_by) = &params.sort_by {
            sort_rows(&mut rows, sort_by, params.asc.unwrap_or(true));
        }
        let records = rows.len() as u64;
        let start = params.offset().min(rows.len());
        let end = (start + params.limit_or_default() as usize).min(rows.len());
        let page = rows[start..end].to_vec();
        debug!(
            resource = T::RESOURCE,
            records,
            returned = page.len(),
            "rows listed"
        );
        (
            page,
            Pagination {
                page: params.page_or_default(),
                limit: params.limit_or_default(),
                records,
            },
        )
    }

    /// Every row in insertion order, no paging. Backs the plain listing
    /// the dialogs use to fill their select options.
    pub fn all(&self) -> Vec<T> {
        self.inner.read().unwrap().rows.clone()
    }

    pub fn count(&self) -> u64 {
        self.inner.read().unwrap().rows.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obra_types::Project;
    use std::collections::BTreeMap;

    fn params(entries: &[(&str, &str)]) -> ListParams {
        ListParams::from_pairs(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    fn seeded() -> Table<Project> {
        let table = Table::new();
        for i in 1..=9 {
            table.create(Project {
                code: format!("PRJ-{:03}", i),
                title: format!("Project {}", i),
                ..Project::default()
            });
        }
        table
    }

    #[test]
    fn create_assigns_sequential_ids_and_stamps() {
        let table = Table::new();
        let first = table.create(Project::default());
        let second = table.create(Project::default());
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert!(first.created_at.is_some());
        assert_eq!(first.created_at, first.updated_at);
    }

    #[test]
    fn create_discards_client_supplied_id() {
        let table = Table::new();
        let created = table.create(Project {
            id: Some(99),
            ..Project::default()
        });
        assert_eq!(created.id, Some(1));
    }

    #[test]
    fn get_returns_stored_row_or_none() {
        let table = seeded();
        assert_eq!(table.get(3).unwrap().code, "PRJ-003");
        assert!(table.get(42).is_none());
    }

    #[test]
    fn update_replaces_row_and_keeps_created_at() {
        let table = seeded();
        let mut row = table.get(2).unwrap();
        let created = row.created_at;
        row.title = "Renamed".into();
        row.created_at = None;
        let updated = table.update(row).unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.created_at, created);
        assert_eq!(table.get(2).unwrap().title, "Renamed");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let table = seeded();
        let row = Project {
            id: Some(404),
            ..Project::default()
        };
        assert_eq!(
            table.update(row),
            Err(StoreError::NotFound {
                resource: "projects",
                id: 404
            })
        );
        assert_eq!(
            table.update(Project::default()),
            Err(StoreError::MissingId)
        );
    }

    #[test]
    fn delete_returns_removed_row_and_never_reuses_its_id() {
        let table = seeded();
        let removed = table.delete(5).unwrap();
        assert_eq!(removed.code, "PRJ-005");
        assert!(table.get(5).is_none());
        assert_eq!(table.count(), 8);

        let next = table.create(Project::default());
        assert_eq!(next.id, Some(10));
        assert!(matches!(table.delete(5), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn list_pages_with_total_record_count() {
        let table = seeded();
        let (rows, pagination) = table.list(&params(&[("page", "2"), ("limit", "4")]));
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].code, "PRJ-005");
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.limit, 4);
        assert_eq!(pagination.records, 9);
    }

    #[test]
    fn nine_rows_fit_one_default_page() {
        let table = seeded();
        let (rows, pagination) = table.list(&params(&[("page", "1")]));
        assert_eq!(rows.len(), 9);
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.records, 9);
    }

    #[test]
    fn list_filters_before_paging() {
        let table = seeded();
        let (rows, pagination) = table.list(&params(&[("code", "PRJ-00"), ("limit", "5")]));
        assert_eq!(pagination.records, 9);
        assert_eq!(rows.len(), 5);

        let (rows, pagination) = table.list(&params(&[("title", "Project 3")]));
        assert_eq!(pagination.records, 1);
        assert_eq!(rows[0].code, "PRJ-003");
    }

    #[test]
    fn list_sorts_when_asked() {
        let table = seeded();
        let (rows, _) = table.list(&params(&[("sort_by", "code"), ("asc", "false")]));
        assert_eq!(rows[0].code, "PRJ-009");
        let (rows, _) = table.list(&params(&[("sort_by", "code")]));
        assert_eq!(rows[0].code, "PRJ-001");
    }

    #[test]
    fn page_past_the_end_is_empty_not_an_error() {
        let table = seeded();
        let (rows, pagination) = table.list(&params(&[("page", "5"), ("limit", "10")]));
        assert!(rows.is_empty());
        assert_eq!(pagination.records, 9);
    }

    #[test]
    fn find_scans_in_insertion_order() {
        let table = seeded();
        let hit = table.find(|p| p.title.contains("Project")).unwrap();
        assert_eq!(hit.id, Some(1));
        assert!(table.find(|p| p.title == "missing").is_none());
    }
}
