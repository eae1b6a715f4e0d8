use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

use crate::records::{
    Budget, Decomposition, Element, Measurement, Price, Project, Role, Unit, User, Version,
};

/// A single field value surfaced for sorting, filtering, and display.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Number(f64),
    Flag(bool),
    Time(DateTime<Utc>),
    Empty,
}

impl FieldValue {
    pub fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    pub fn opt_text(s: &Option<String>) -> FieldValue {
        match s {
            Some(s) => FieldValue::Text(s.clone()),
            None => FieldValue::Empty,
        }
    }

    pub fn opt_int(v: Option<i64>) -> FieldValue {
        match v {
            Some(v) => FieldValue::Int(v),
            None => FieldValue::Empty,
        }
    }

    pub fn opt_number(v: Option<f64>) -> FieldValue {
        match v {
            Some(v) => FieldValue::Number(v),
            None => FieldValue::Empty,
        }
    }

    pub fn opt_time(t: Option<DateTime<Utc>>) -> FieldValue {
        match t {
            Some(t) => FieldValue::Time(t),
            None => FieldValue::Empty,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Empty => 0,
            FieldValue::Flag(_) => 1,
            FieldValue::Int(_) => 2,
            FieldValue::Number(_) => 3,
            FieldValue::Time(_) => 4,
            FieldValue::Text(_) => 5,
        }
    }

    /// Total order for sorting a column. `Empty` sorts before everything.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Flag(a), FieldValue::Flag(b)) => a.cmp(b),
            (FieldValue::Time(a), FieldValue::Time(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Number(v) => write!(f, "{}", v),
            FieldValue::Flag(v) => write!(f, "{}", v),
            FieldValue::Time(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M")),
            FieldValue::Empty => Ok(()),
        }
    }
}

/// Shared behavior of every stored record: wire resource name, identity,
/// audit stamps, and field lookup by column key.
pub trait Record: Clone {
    /// Path segment of the record's REST collection.
    const RESOURCE: &'static str;

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Overwrites both audit stamps. Creation passes the same instant twice;
    /// updates carry the stored `created_at` forward.
    fn stamp(&mut self, created: Option<DateTime<Utc>>, updated: Option<DateTime<Utc>>);

    /// Looks up a field by column key; `None` for unknown keys.
    fn field(&self, key: &str) -> Option<FieldValue>;

    /// Carries forward server-managed fields the wire form does not round-trip.
    fn merge_existing(&mut self, _existing: &Self) {}
}

macro_rules! impl_record {
    ($ty:ty, $resource:literal, $rec:ident => { $($key:literal => $val:expr),* $(,)? }) => {
        impl Record for $ty {
            const RESOURCE: &'static str = $resource;

            fn id(&self) -> Option<i64> {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = Some(id);
            }

            fn created_at(&self) -> Option<DateTime<Utc>> {
                self.created_at
            }

            fn stamp(&mut self, created: Option<DateTime<Utc>>, updated: Option<DateTime<Utc>>) {
                self.created_at = created;
                self.updated_at = updated;
            }

            fn field(&self, key: &str) -> Option<FieldValue> {
                let $rec = self;
                match key {
                    "id" => Some(FieldValue::opt_int($rec.id)),
                    "created_at" => Some(FieldValue::opt_time($rec.created_at)),
                    "updated_at" => Some(FieldValue::opt_time($rec.updated_at)),
                    $($key => Some($val),)*
                    _ => None,
                }
            }
        }
    };
}

impl_record!(Project, "projects", r => {
    "code" => FieldValue::text(&r.code),
    "title" => FieldValue::text(&r.title),
});

impl_record!(Budget, "budgets", r => {
    "project_id" => FieldValue::Int(r.project_id),
    "code" => FieldValue::text(&r.code),
    "version_number" => FieldValue::Int(r.version_number as i64),
    "name" => FieldValue::text(&r.name),
    "status" => FieldValue::text(r.status.as_str()),
});

impl_record!(Role, "roles", r => {
    "name" => FieldValue::text(&r.name),
});

impl_record!(Unit, "units", r => {
    "name" => FieldValue::text(&r.name),
    "symbol" => FieldValue::text(&r.symbol),
    "description" => FieldValue::opt_text(&r.description),
    "formula" => FieldValue::text(&r.formula),
});

impl_record!(Version, "versions", r => {
    "name" => FieldValue::text(&r.name),
});

impl_record!(Price, "prices", r => {
    "version_id" => FieldValue::Int(r.version_id),
    "code" => FieldValue::text(&r.code),
    "description" => FieldValue::text(&r.description),
    "base_price" => FieldValue::Number(r.base_price),
    "unit_id" => FieldValue::Int(r.unit_id),
    "price_type" => FieldValue::text(r.price_type.as_str()),
});

impl_record!(Element, "elements", r => {
    "budget_id" => FieldValue::Int(r.budget_id),
    "parent_id" => FieldValue::opt_int(r.parent_id),
    "version_id" => FieldValue::Int(r.version_id),
    "element_type" => FieldValue::text(r.element_type.as_str()),
    "code" => FieldValue::text(&r.code),
    "budget_code" => FieldValue::text(&r.budget_code),
    "description" => FieldValue::opt_text(&r.description),
});

impl_record!(Measurement, "measurements", r => {
    "element_id" => FieldValue::Int(r.element_id),
    "price_id" => FieldValue::Int(r.price_id),
    "measurement_text" => FieldValue::opt_text(&r.measurement_text),
    "measured_quantity" => FieldValue::Number(r.measured_quantity),
});

impl_record!(Decomposition, "decompositions", r => {
    "parent_price_id" => FieldValue::Int(r.parent_price_id),
    "component_price_id" => FieldValue::Int(r.component_price_id),
    "calculation_mode" => FieldValue::text(r.calculation_mode.as_str()),
    "fixed_quantity" => FieldValue::opt_number(r.fixed_quantity),
});

// Users are the odd one out: the password hash never crosses the wire, so
// an update has to keep the stored hash unless a new one is supplied.
impl Record for User {
    const RESOURCE: &'static str = "users";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn stamp(&mut self, created: Option<DateTime<Utc>>, updated: Option<DateTime<Utc>>) {
        self.created_at = created;
        self.updated_at = updated;
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(FieldValue::opt_int(self.id)),
            "created_at" => Some(FieldValue::opt_time(self.created_at)),
            "updated_at" => Some(FieldValue::opt_time(self.updated_at)),
            "username" => Some(FieldValue::text(&self.username)),
            "email" => Some(FieldValue::text(&self.email)),
            "role_id" => Some(FieldValue::Int(self.role_id)),
            "is_active" => Some(FieldValue::Flag(self.is_active)),
            _ => None,
        }
    }

    fn merge_existing(&mut self, existing: &Self) {
        if self.hashed_password.is_empty() {
            self.hashed_password = existing.hashed_password.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::BudgetStatus;
    use chrono::TimeZone;

    fn sample_budget() -> Budget {
        Budget {
            id: Some(7),
            project_id: 3,
            code: "BG-001".into(),
            version_number: 2,
            name: "Foundations".into(),
            status: BudgetStatus::Approved,
            created_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()),
            updated_at: None,
        }
    }

    #[test]
    fn field_lookup_covers_declared_keys() {
        let budget = sample_budget();
        assert_eq!(budget.field("id"), Some(FieldValue::Int(7)));
        assert_eq!(budget.field("code"), Some(FieldValue::text("BG-001")));
        assert_eq!(budget.field("status"), Some(FieldValue::text("approved")));
        assert_eq!(budget.field("version_number"), Some(FieldValue::Int(2)));
        assert_eq!(budget.field("updated_at"), Some(FieldValue::Empty));
        assert_eq!(budget.field("nonexistent"), None);
    }

    #[test]
    fn stamp_overwrites_both_audit_fields() {
        let mut project = Project::default();
        let first = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        project.stamp(Some(first), Some(first));
        assert_eq!(project.created_at, Some(first));
        assert_eq!(project.updated_at, Some(first));
        project.stamp(project.created_at, Some(later));
        assert_eq!(project.created_at, Some(first));
        assert_eq!(project.updated_at, Some(later));
    }

    #[test]
    fn user_update_keeps_stored_hash_when_blank() {
        let stored = User {
            hashed_password: "$2b$10$abcdef".into(),
            ..User::default()
        };
        let mut incoming = User::default();
        incoming.merge_existing(&stored);
        assert_eq!(incoming.hashed_password, "$2b$10$abcdef");

        let mut replacing = User {
            hashed_password: "$2b$10$fresh".into(),
            ..User::default()
        };
        replacing.merge_existing(&stored);
        assert_eq!(replacing.hashed_password, "$2b$10$fresh");
    }

    #[test]
    fn compare_orders_within_and_across_kinds() {
        assert_eq!(
            FieldValue::Int(2).compare(&FieldValue::Int(10)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Number(1.5).compare(&FieldValue::Number(1.25)),
            Ordering::Greater
        );
        assert_eq!(
            FieldValue::text("alpha").compare(&FieldValue::text("beta")),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Empty.compare(&FieldValue::Int(0)),
            Ordering::Less
        );
    }

    #[test]
    fn display_is_wire_friendly() {
        assert_eq!(FieldValue::text("m2").to_string(), "m2");
        assert_eq!(FieldValue::Number(12.5).to_string(), "12.5");
        assert_eq!(FieldValue::Flag(true).to_string(), "true");
        assert_eq!(FieldValue::Empty.to_string(), "");
    }
}
